// Copyright (c) 2019 Alain Brenzikofer
// This file is part of Encointer
//
// Encointer is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// Encointer is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with Encointer.  If not, see <http://www.gnu.org/licenses/>.

//! Mock runtime for the encointer_policy_verifier module

use crate as dut;
use frame_support::derive_impl;
use ark_bn254::Fr;
use encointer_policy_verifier_core::{
	circuit::{Attributes, Policy, Salts},
	prover::test_fixtures::{generate_test_proof, get_test_vk_bytes},
};
use frame_support::traits::ConstU32;
use sp_runtime::BuildStorage;
use std::sync::OnceLock;
use test_utils::{helpers::bob, *};

frame_support::construct_runtime!(
	pub enum TestRuntime
	{
		System: frame_system::{Pallet, Call, Config<T>, Storage, Event<T>},
		Timestamp: pallet_timestamp::{Pallet, Call, Storage, Inherent},
		EncointerIdentityCredentials: pallet_encointer_identity_credentials::{Pallet, Call, Storage, Config<T>, Event<T>},
		EncointerPolicyVerifier: dut::{Pallet, Call, Storage, Config<T>, Event<T>},
	}
);

impl dut::Config for TestRuntime {
	type RuntimeEvent = RuntimeEvent;
	type Credentials = EncointerIdentityCredentials;
	type AdminOrigin = EnsureAlice;
	type ProofVerifier = dut::StoredKeyVerifier<TestRuntime>;
	type MaxVerificationKeyLen = ConstU32<1024>;
	type WeightInfo = ();
	#[cfg(feature = "runtime-benchmarks")]
	type BenchmarkHelper = BenchmarkHelper;
}

// boilerplate
impl_frame_system!(TestRuntime);
impl_timestamp!(TestRuntime);
impl_encointer_identity_credentials!(TestRuntime);

/// Minimum age 19, gender 0, nationality one of 410 or 840. All checks enabled.
pub fn adult_policy() -> Policy {
	Policy {
		age_check: 1,
		required_age: 19,
		gender_check: 1,
		required_gender: 0,
		nationality_check: 1,
		allowed_countries: [410, 840, 0, 0, 0],
	}
}

pub fn holder_attributes() -> Attributes {
	Attributes { age: 23, gender: 0, nationality: 410 }
}

pub fn holder_salts() -> Salts {
	Salts { age: Fr::from(1111u64), gender: Fr::from(2222u64), nationality: Fr::from(3333u64) }
}

/// Proof of [`holder_attributes`] against [`adult_policy`], generated once
pub fn holder_proof() -> (dut::PolicyProof, dut::PublicSignals) {
	static PROOF: OnceLock<(dut::PolicyProof, dut::PublicSignals)> = OnceLock::new();
	PROOF
		.get_or_init(|| {
			let (proof, public_signals) =
				generate_test_proof(adult_policy(), holder_attributes(), holder_salts()).unwrap();
			(proof.into(), public_signals)
		})
		.clone()
}

#[cfg(feature = "runtime-benchmarks")]
pub struct BenchmarkHelper;

#[cfg(feature = "runtime-benchmarks")]
impl dut::BenchmarkHelper<AccountId, Moment> for BenchmarkHelper {
	fn create_credential(owner: &AccountId, expiry: Moment, commitment_root: [u8; 32]) -> u64 {
		pallet_encointer_identity_credentials::OpenIssuerMode::<TestRuntime>::put(true);
		EncointerIdentityCredentials::mint(
			RuntimeOrigin::signed(owner.clone()),
			owner.clone(),
			expiry,
			commitment_root,
		)
		.unwrap();
		pallet_encointer_identity_credentials::CredentialCount::<TestRuntime>::get()
	}

	fn valid_proof() -> (Vec<u8>, dut::PolicyProof, dut::PublicSignals) {
		let (proof, public_signals) = holder_proof();
		(get_test_vk_bytes(), proof, public_signals)
	}
}

// genesis values: bob is a registered issuer and on the verifier's allowlist
pub fn new_test_ext() -> sp_io::TestExternalities {
	let mut t = frame_system::GenesisConfig::<TestRuntime>::default().build_storage().unwrap();
	pallet_encointer_identity_credentials::GenesisConfig::<TestRuntime> {
		open_issuer_mode: false,
		issuers: vec![bob()],
	}
	.assimilate_storage(&mut t)
	.unwrap();
	dut::GenesisConfig::<TestRuntime> {
		require_issuer_allowlist: true,
		allowed_issuers: vec![bob()],
		verification_key: Some(get_test_vk_bytes()),
	}
	.assimilate_storage(&mut t)
	.unwrap();
	let mut ext: sp_io::TestExternalities = t.into();
	ext.execute_with(|| System::set_block_number(1));
	ext
}
