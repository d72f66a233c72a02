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
use frame_system::RawOrigin;
use sp_runtime::traits::Bounded;

fn issue<T: Config>(issuer: &T::AccountId, owner: &T::AccountId) -> CredentialIndexType {
	Issuers::<T>::insert(issuer, ());
	Pallet::<T>::mint(
		RawOrigin::Signed(issuer.clone()).into(),
		owner.clone(),
		MomentOf::<T>::max_value(),
		[1u8; 32],
	)
	.unwrap();
	CredentialCount::<T>::get()
}

benchmarks! {
	mint {
		let issuer: T::AccountId = account("issuer", 1, 1);
		let owner: T::AccountId = account("owner", 2, 2);
		Issuers::<T>::insert(&issuer, ());
	}: _(RawOrigin::Signed(issuer), owner.clone(), MomentOf::<T>::max_value(), [7u8; 32])
	verify {
		assert_eq!(Credentials::<T>::get(1).map(|c| c.owner), Some(owner));
	}

	revoke {
		let issuer: T::AccountId = account("issuer", 1, 1);
		let owner: T::AccountId = account("owner", 2, 2);
		let id = issue::<T>(&issuer, &owner);
	}: _(RawOrigin::Signed(issuer), id)
	verify {
		assert_eq!(Credentials::<T>::get(id).map(|c| c.revoked), Some(true));
	}

	set_open_issuer_mode {
	}: _(RawOrigin::Root, true)
	verify {
		assert!(OpenIssuerMode::<T>::get());
	}

	set_issuer {
		let issuer: T::AccountId = account("issuer", 1, 1);
	}: _(RawOrigin::Root, issuer.clone(), true)
	verify {
		assert!(Issuers::<T>::contains_key(&issuer));
	}
}

impl_benchmark_test_suite!(Pallet, crate::mock::new_test_ext(), crate::mock::TestRuntime);
