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

use crate::{
	mock::*, signals, AllowedIssuers, Error, Event, GenesisConfig, PolicyProof, PublicSignals,
	RequireIssuerAllowlist, UsedNullifiers, VerificationKey,
};
use encointer_policy_verifier_core::prover::{
	derive_policy_hash, test_fixtures::get_test_vk_bytes,
};
use frame_support::{assert_noop, assert_ok, BoundedVec};
use sp_runtime::{DispatchError, DispatchResult};
use test_utils::{
	helpers::{alice, bob, charlie, dave, event_count, set_now},
	AccountId, GENESIS_TIME, ONE_DAY,
};

const NULLIFIER: [u8; 32] = [7u8; 32];

fn expiry() -> u64 {
	GENESIS_TIME + ONE_DAY
}

fn mint(issuer: AccountId, owner: AccountId, commitment_root: [u8; 32]) -> u64 {
	assert_ok!(EncointerIdentityCredentials::mint(
		RuntimeOrigin::signed(issuer),
		owner,
		expiry(),
		commitment_root
	));
	pallet_encointer_identity_credentials::CredentialCount::<TestRuntime>::get()
}

/// bob mints a credential for charlie over the attributes the test proof was made for
fn setup() -> (u64, PolicyProof, PublicSignals) {
	set_now::<TestRuntime>(GENESIS_TIME);
	let (proof, public_signals) = holder_proof();
	let id = mint(bob(), charlie(), public_signals[signals::ROOT]);
	(id, proof, public_signals)
}

fn verify(
	who: AccountId,
	id: u64,
	public_signals: PublicSignals,
	proof: PolicyProof,
	nullifier: [u8; 32],
) -> DispatchResult {
	EncointerPolicyVerifier::verify_and_emit(
		RuntimeOrigin::signed(who),
		id,
		public_signals,
		proof,
		derive_policy_hash(&adult_policy()),
		nullifier,
	)
}

#[test]
fn genesis_defaults_enforce_allowlist() {
	assert!(GenesisConfig::<TestRuntime>::default().require_issuer_allowlist);
	new_test_ext().execute_with(|| {
		assert!(RequireIssuerAllowlist::<TestRuntime>::get());
		assert!(AllowedIssuers::<TestRuntime>::contains_key(bob()));
		assert!(VerificationKey::<TestRuntime>::get().is_some());
	});
}

#[test]
fn verify_and_emit_works() {
	new_test_ext().execute_with(|| {
		let (id, proof, public_signals) = setup();
		assert_ok!(verify(charlie(), id, public_signals, proof, NULLIFIER));

		assert!(EncointerPolicyVerifier::is_nullifier_used(&NULLIFIER));
		System::assert_last_event(
			Event::<TestRuntime>::Verified {
				who: charlie(),
				id,
				policy_hash: derive_policy_hash(&adult_policy()),
				nullifier: NULLIFIER,
			}
			.into(),
		);
	});
}

#[test]
fn nullifier_replay_fails() {
	new_test_ext().execute_with(|| {
		let (id, proof, public_signals) = setup();
		assert_ok!(verify(charlie(), id, public_signals, proof.clone(), NULLIFIER));
		assert_noop!(
			verify(charlie(), id, public_signals, proof.clone(), NULLIFIER),
			Error::<TestRuntime>::NullifierUsed
		);
		// a fresh nullifier is accepted with the same proof
		assert_ok!(verify(charlie(), id, public_signals, proof, [8u8; 32]));
	});
}

#[test]
fn zero_nullifier_is_consumed_like_any_other() {
	new_test_ext().execute_with(|| {
		let (id, proof, public_signals) = setup();
		assert_ok!(verify(charlie(), id, public_signals, proof.clone(), [0u8; 32]));
		assert!(UsedNullifiers::<TestRuntime>::contains_key([0u8; 32]));
		assert_noop!(
			verify(charlie(), id, public_signals, proof, [0u8; 32]),
			Error::<TestRuntime>::NullifierUsed
		);
	});
}

#[test]
fn expired_credential_fails() {
	new_test_ext().execute_with(|| {
		let (id, proof, public_signals) = setup();
		set_now::<TestRuntime>(expiry());
		assert_noop!(
			verify(charlie(), id, public_signals, proof.clone(), NULLIFIER),
			Error::<TestRuntime>::Expired
		);
		set_now::<TestRuntime>(expiry() + 1);
		assert_noop!(
			verify(charlie(), id, public_signals, proof, NULLIFIER),
			Error::<TestRuntime>::Expired
		);
	});
}

#[test]
fn credential_valid_until_just_before_expiry() {
	new_test_ext().execute_with(|| {
		let (id, proof, public_signals) = setup();
		set_now::<TestRuntime>(expiry() - 1);
		assert_ok!(verify(charlie(), id, public_signals, proof, NULLIFIER));
	});
}

#[test]
fn revoked_credential_fails() {
	new_test_ext().execute_with(|| {
		let (id, proof, public_signals) = setup();
		assert_ok!(EncointerIdentityCredentials::revoke(RuntimeOrigin::signed(bob()), id));
		assert_noop!(
			verify(charlie(), id, public_signals, proof, NULLIFIER),
			Error::<TestRuntime>::Revoked
		);
	});
}

#[test]
fn root_mismatch_fails() {
	new_test_ext().execute_with(|| {
		set_now::<TestRuntime>(GENESIS_TIME);
		let (proof, public_signals) = holder_proof();
		let id = mint(bob(), charlie(), [9u8; 32]);
		assert_noop!(
			verify(charlie(), id, public_signals, proof, NULLIFIER),
			Error::<TestRuntime>::RootMismatch
		);
	});
}

#[test]
fn tampered_signal_fails() {
	new_test_ext().execute_with(|| {
		let (id, proof, mut public_signals) = setup();
		// required age 19 -> 20
		public_signals[signals::REQUIRED_AGE][0] += 1;
		assert_noop!(
			verify(charlie(), id, public_signals, proof, NULLIFIER),
			Error::<TestRuntime>::InvalidProof
		);
	});
}

#[test]
fn tampered_proof_fails() {
	new_test_ext().execute_with(|| {
		let (id, mut proof, public_signals) = setup();
		core::mem::swap(&mut proof.a, &mut proof.c);
		assert_noop!(
			verify(charlie(), id, public_signals, proof, NULLIFIER),
			Error::<TestRuntime>::InvalidProof
		);
	});
}

#[test]
fn missing_verification_key_fails() {
	new_test_ext().execute_with(|| {
		let (id, proof, public_signals) = setup();
		VerificationKey::<TestRuntime>::kill();
		assert_noop!(
			verify(charlie(), id, public_signals, proof, NULLIFIER),
			Error::<TestRuntime>::InvalidProof
		);
	});
}

#[test]
fn non_owner_fails() {
	new_test_ext().execute_with(|| {
		let (id, proof, public_signals) = setup();
		// not even the issuer
		assert_noop!(
			verify(bob(), id, public_signals, proof.clone(), NULLIFIER),
			Error::<TestRuntime>::NotOwner
		);
		assert_noop!(
			verify(dave(), id, public_signals, proof, NULLIFIER),
			Error::<TestRuntime>::NotOwner
		);
	});
}

#[test]
fn unknown_credential_fails() {
	new_test_ext().execute_with(|| {
		let (id, proof, public_signals) = setup();
		assert_noop!(
			verify(charlie(), id + 1, public_signals, proof, NULLIFIER),
			Error::<TestRuntime>::NotOwner
		);
	});
}

#[test]
fn issuer_not_on_allowlist_fails() {
	new_test_ext().execute_with(|| {
		set_now::<TestRuntime>(GENESIS_TIME);
		let (proof, public_signals) = holder_proof();
		assert_ok!(EncointerIdentityCredentials::set_issuer(
			RuntimeOrigin::signed(alice()),
			dave(),
			true
		));
		let id = mint(dave(), charlie(), public_signals[signals::ROOT]);

		assert_noop!(
			verify(charlie(), id, public_signals, proof.clone(), NULLIFIER),
			Error::<TestRuntime>::IssuerNotAllowed
		);

		assert_ok!(EncointerPolicyVerifier::set_issuer_allowed(
			RuntimeOrigin::signed(alice()),
			dave(),
			true
		));
		assert_ok!(verify(charlie(), id, public_signals, proof, NULLIFIER));
	});
}

#[test]
fn disabled_allowlist_skips_issuer_check() {
	new_test_ext().execute_with(|| {
		set_now::<TestRuntime>(GENESIS_TIME);
		let (proof, public_signals) = holder_proof();
		assert_ok!(EncointerIdentityCredentials::set_open_issuer_mode(
			RuntimeOrigin::signed(alice()),
			true
		));
		let id = mint(dave(), charlie(), public_signals[signals::ROOT]);

		assert_ok!(EncointerPolicyVerifier::set_require_issuer_allowlist(
			RuntimeOrigin::signed(alice()),
			false
		));
		assert_ok!(verify(charlie(), id, public_signals, proof, NULLIFIER));
	});
}

#[test]
fn first_failing_check_is_reported() {
	new_test_ext().execute_with(|| {
		set_now::<TestRuntime>(GENESIS_TIME);
		let (proof, mut public_signals) = holder_proof();
		assert_ok!(EncointerPolicyVerifier::set_issuer_allowed(
			RuntimeOrigin::signed(alice()),
			bob(),
			false
		));
		let id = mint(bob(), charlie(), [9u8; 32]);
		assert_ok!(EncointerIdentityCredentials::revoke(RuntimeOrigin::signed(bob()), id));
		set_now::<TestRuntime>(expiry());
		public_signals[signals::REQUIRED_AGE][0] += 1;

		assert_noop!(
			verify(dave(), id, public_signals, proof.clone(), NULLIFIER),
			Error::<TestRuntime>::NotOwner
		);
		assert_noop!(
			verify(charlie(), id, public_signals, proof.clone(), NULLIFIER),
			Error::<TestRuntime>::IssuerNotAllowed
		);

		assert_ok!(EncointerPolicyVerifier::set_issuer_allowed(
			RuntimeOrigin::signed(alice()),
			bob(),
			true
		));
		assert_noop!(
			verify(charlie(), id, public_signals, proof.clone(), NULLIFIER),
			Error::<TestRuntime>::Expired
		);

		set_now::<TestRuntime>(GENESIS_TIME + 1);
		assert_noop!(
			verify(charlie(), id, public_signals, proof.clone(), NULLIFIER),
			Error::<TestRuntime>::Revoked
		);
	});
}

#[test]
fn used_nullifier_reported_before_invalid_proof() {
	new_test_ext().execute_with(|| {
		let (id, proof, mut public_signals) = setup();
		assert_ok!(verify(charlie(), id, public_signals, proof.clone(), NULLIFIER));
		public_signals[signals::REQUIRED_AGE][0] += 1;
		assert_noop!(
			verify(charlie(), id, public_signals, proof, NULLIFIER),
			Error::<TestRuntime>::NullifierUsed
		);
	});
}

#[test]
fn failed_verification_consumes_nothing() {
	new_test_ext().execute_with(|| {
		let (id, proof, mut public_signals) = setup();
		let events_before = event_count::<TestRuntime>();
		public_signals[signals::AGE_FLAG][0] = 0;
		assert!(verify(charlie(), id, public_signals, proof, NULLIFIER).is_err());
		assert!(!EncointerPolicyVerifier::is_nullifier_used(&NULLIFIER));
		assert_eq!(event_count::<TestRuntime>(), events_before);
	});
}

#[test]
fn admin_calls_require_admin_origin() {
	new_test_ext().execute_with(|| {
		assert_noop!(
			EncointerPolicyVerifier::set_require_issuer_allowlist(
				RuntimeOrigin::signed(bob()),
				false
			),
			DispatchError::BadOrigin
		);
		assert_noop!(
			EncointerPolicyVerifier::set_issuer_allowed(RuntimeOrigin::signed(bob()), dave(), true),
			DispatchError::BadOrigin
		);
		let vk: BoundedVec<u8, _> = get_test_vk_bytes().try_into().unwrap();
		assert_noop!(
			EncointerPolicyVerifier::set_verification_key(RuntimeOrigin::signed(bob()), vk),
			DispatchError::BadOrigin
		);
	});
}

#[test]
fn set_require_issuer_allowlist_works() {
	new_test_ext().execute_with(|| {
		assert_ok!(EncointerPolicyVerifier::set_require_issuer_allowlist(
			RuntimeOrigin::root(),
			false
		));
		assert!(!RequireIssuerAllowlist::<TestRuntime>::get());
		System::assert_last_event(
			Event::<TestRuntime>::RequireIssuerAllowlistSet { required: false }.into(),
		);
	});
}

#[test]
fn set_issuer_allowed_adds_and_removes() {
	new_test_ext().execute_with(|| {
		assert_ok!(EncointerPolicyVerifier::set_issuer_allowed(
			RuntimeOrigin::signed(alice()),
			dave(),
			true
		));
		assert!(EncointerPolicyVerifier::is_issuer_allowed(&dave()));
		System::assert_last_event(
			Event::<TestRuntime>::IssuerAllowedSet { issuer: dave(), allowed: true }.into(),
		);

		assert_ok!(EncointerPolicyVerifier::set_issuer_allowed(
			RuntimeOrigin::signed(alice()),
			dave(),
			false
		));
		assert!(!EncointerPolicyVerifier::is_issuer_allowed(&dave()));
	});
}

#[test]
fn set_verification_key_works() {
	new_test_ext().execute_with(|| {
		VerificationKey::<TestRuntime>::kill();
		let vk: BoundedVec<u8, _> = get_test_vk_bytes().try_into().unwrap();
		assert_ok!(EncointerPolicyVerifier::set_verification_key(
			RuntimeOrigin::signed(alice()),
			vk.clone()
		));
		assert_eq!(VerificationKey::<TestRuntime>::get(), Some(vk));
		System::assert_last_event(Event::<TestRuntime>::VerificationKeySet.into());
	});
}

#[test]
fn set_verification_key_rejects_garbage() {
	new_test_ext().execute_with(|| {
		let garbage: BoundedVec<u8, _> = vec![0xabu8; 128].try_into().unwrap();
		assert_noop!(
			EncointerPolicyVerifier::set_verification_key(RuntimeOrigin::signed(alice()), garbage),
			Error::<TestRuntime>::InvalidVerificationKey
		);

		let mut truncated = get_test_vk_bytes();
		truncated.truncate(truncated.len() - 32);
		let truncated: BoundedVec<u8, _> = truncated.try_into().unwrap();
		assert_noop!(
			EncointerPolicyVerifier::set_verification_key(RuntimeOrigin::signed(alice()), truncated),
			Error::<TestRuntime>::InvalidVerificationKey
		);
	});
}
