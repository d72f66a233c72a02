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

use crate::{AccountId, Moment};
use sp_keyring::Sr25519Keyring;

pub fn alice() -> AccountId {
	Sr25519Keyring::Alice.to_account_id()
}

pub fn bob() -> AccountId {
	Sr25519Keyring::Bob.to_account_id()
}

pub fn charlie() -> AccountId {
	Sr25519Keyring::Charlie.to_account_id()
}

pub fn dave() -> AccountId {
	Sr25519Keyring::Dave.to_account_id()
}

/// Most recent event deposited in the current block, if any
pub fn last_event<T: frame_system::Config>() -> Option<<T as frame_system::Config>::RuntimeEvent> {
	frame_system::Pallet::<T>::events().pop().map(|record| record.event)
}

/// Number of events deposited in the current block
pub fn event_count<T: frame_system::Config>() -> usize {
	frame_system::Pallet::<T>::events().len()
}

/// Set the chain time as the timestamp inherent would
pub fn set_now<T>(now: Moment)
where
	T: pallet_timestamp::Config<Moment = Moment>,
{
	pallet_timestamp::Pallet::<T>::set_timestamp(now);
}
