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

use frame_support::{ord_parameter_types, parameter_types, traits::EitherOfDiverse};
use frame_system::{EnsureRoot, EnsureSignedBy};
use sp_core::crypto::AccountId32;
use sp_runtime::{traits::IdentifyAccount, MultiSignature};

// convenience reexport such that the tests do not need to put sp-keyring in the Cargo.toml.
pub use sp_keyring::Sr25519Keyring;

// reexports for macro resolution
pub use frame_support;
pub use frame_system;
pub use pallet_encointer_identity_credentials;
pub use pallet_timestamp;
pub use sp_runtime;

pub use sp_core::H256;
pub use sp_runtime::traits::{BlakeTwo256, Verify};

pub mod helpers;

pub const GENESIS_TIME: u64 = 1_585_058_843_000;
pub const ONE_DAY: u64 = 86_400_000;
pub const BLOCKTIME: u64 = 6_000; // 6s per block

/// The signature type used by accounts/transactions.
pub type Signature = MultiSignature;
/// An identifier for an account on this system.
pub type AccountId = <<MultiSignature as Verify>::Signer as IdentifyAccount>::AccountId;

pub type BlockNumber = u64;

#[macro_export]
macro_rules! impl_frame_system {
	($t:ident) => {
		#[frame_support::derive_impl(frame_system::config_preludes::TestDefaultConfig)]
		impl frame_system::Config for $t {
			type Block = frame_system::mocking::MockBlock<$t>;
			type AccountId = AccountId;
			type Lookup = sp_runtime::traits::IdentityLookup<Self::AccountId>;
		}
	};
}

pub type Moment = u64;
parameter_types! {
	pub const MinimumPeriod: Moment = BLOCKTIME / 2;
}

#[macro_export]
macro_rules! impl_timestamp {
	($t:ident) => {
		impl pallet_timestamp::Config for $t {
			type Moment = Moment;
			type OnTimestampSet = ();
			type MinimumPeriod = MinimumPeriod;
			type WeightInfo = ();
		}
	};
}

#[macro_export]
macro_rules! impl_encointer_identity_credentials {
	($t:ident) => {
		impl pallet_encointer_identity_credentials::Config for $t {
			type RuntimeEvent = RuntimeEvent;
			type AdminOrigin = EnsureAlice;
			type WeightInfo = ();
		}
	};
}

ord_parameter_types! {
	pub const Alice: AccountId32 = AccountId32::new([212, 53, 147, 199, 21, 253, 211, 28, 97, 20, 26, 189, 4, 169, 159, 214, 130, 44, 133, 88, 133, 76, 205, 227, 154, 86, 132, 231, 165, 109, 162, 125]);
}

/// Test origin for the pallet's `EnsureOrigin` associated type.
pub type EnsureAlice = EitherOfDiverse<EnsureSignedBy<Alice, AccountId32>, EnsureRoot<AccountId32>>;
