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

use crate::*;
use frame_benchmarking::{account, benchmarks, impl_benchmark_test_suite};
use frame_support::BoundedVec;
use frame_system::RawOrigin;
use sp_runtime::traits::Bounded;

fn bounded_vk<T: Config>(vk: sp_std::vec::Vec<u8>) -> BoundedVec<u8, T::MaxVerificationKeyLen> {
	BoundedVec::try_from(vk).expect("VK within bounds")
}

benchmarks! {
	verify_and_emit {
		let owner: T::AccountId = account("owner", 1, 1);
		let (vk, proof, public_signals) = T::BenchmarkHelper::valid_proof();
		let id = T::BenchmarkHelper::create_credential(
			&owner,
			MomentOf::<T>::max_value(),
			public_signals[signals::ROOT],
		);

		// worst case: every check runs
		let issuer = T::Credentials::issuer_of(id).expect("credential just created");
		RequireIssuerAllowlist::<T>::put(true);
		AllowedIssuers::<T>::insert(&issuer, ());
		VerificationKey::<T>::put(bounded_vk::<T>(vk));
		let nullifier = [42u8; 32];
	}: _(RawOrigin::Signed(owner), id, public_signals, proof, [1u8; 32], nullifier)
	verify {
		assert!(UsedNullifiers::<T>::contains_key(nullifier));
	}

	set_require_issuer_allowlist {
	}: _(RawOrigin::Root, false)
	verify {
		assert!(!RequireIssuerAllowlist::<T>::get());
	}

	set_issuer_allowed {
		let issuer: T::AccountId = account("issuer", 1, 1);
	}: _(RawOrigin::Root, issuer.clone(), true)
	verify {
		assert!(AllowedIssuers::<T>::contains_key(&issuer));
	}

	set_verification_key {
		let (vk, _, _) = T::BenchmarkHelper::valid_proof();
		let vk = bounded_vk::<T>(vk);
	}: _(RawOrigin::Root, vk.clone())
	verify {
		assert_eq!(VerificationKey::<T>::get(), Some(vk));
	}
}

impl_benchmark_test_suite!(Pallet, crate::mock::new_test_ext(), crate::mock::TestRuntime);
