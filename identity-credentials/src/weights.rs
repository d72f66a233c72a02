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

#![allow(unused_parens)]
#![allow(unused_imports)]

use frame_support::{
	traits::Get,
	weights::{constants::RocksDbWeight, Weight},
};
use sp_std::marker::PhantomData;

pub trait WeightInfo {
	fn mint() -> Weight;
	fn revoke() -> Weight;
	fn set_open_issuer_mode() -> Weight;
	fn set_issuer() -> Weight;
}

pub struct EncointerWeight<T>(PhantomData<T>);
impl<T: frame_system::Config> WeightInfo for EncointerWeight<T> {
	fn mint() -> Weight {
		Weight::from_parts(21_300_000, 0)
			.saturating_add(T::DbWeight::get().reads(3))
			.saturating_add(T::DbWeight::get().writes(2))
	}
	fn revoke() -> Weight {
		Weight::from_parts(16_800_000, 0)
			.saturating_add(T::DbWeight::get().reads(1))
			.saturating_add(T::DbWeight::get().writes(1))
	}
	fn set_open_issuer_mode() -> Weight {
		Weight::from_parts(8_200_000, 0).saturating_add(T::DbWeight::get().writes(1))
	}
	fn set_issuer() -> Weight {
		Weight::from_parts(9_400_000, 0).saturating_add(T::DbWeight::get().writes(1))
	}
}

// For tests
impl WeightInfo for () {
	fn mint() -> Weight {
		Weight::from_parts(21_300_000, 0)
			.saturating_add(RocksDbWeight::get().reads(3))
			.saturating_add(RocksDbWeight::get().writes(2))
	}
	fn revoke() -> Weight {
		Weight::from_parts(16_800_000, 0)
			.saturating_add(RocksDbWeight::get().reads(1))
			.saturating_add(RocksDbWeight::get().writes(1))
	}
	fn set_open_issuer_mode() -> Weight {
		Weight::from_parts(8_200_000, 0).saturating_add(RocksDbWeight::get().writes(1))
	}
	fn set_issuer() -> Weight {
		Weight::from_parts(9_400_000, 0).saturating_add(RocksDbWeight::get().writes(1))
	}
}
