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

use parity_scale_codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
use scale_info::TypeInfo;
use sp_core::RuntimeDebug;

#[cfg(feature = "serde_derive")]
use serde::{Deserialize, Serialize};

pub type CredentialIndexType = u64;

/// Little-endian canonical encoding of a BN254 scalar. Summarizes the salted attribute leaves.
pub type CommitmentRoot = [u8; 32];

#[derive(
	Encode,
	Decode,
	DecodeWithMemTracking,
	RuntimeDebug,
	Clone,
	PartialEq,
	Eq,
	TypeInfo,
	MaxEncodedLen,
)]
#[cfg_attr(feature = "serde_derive", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde_derive", serde(rename_all = "camelCase"))]
/// A non-transferable credential binding an owner to a commitment over private attributes.
/// Only `revoked` may change after mint, and only from `false` to `true`.
pub struct Credential<AccountId, Moment> {
	/// the holder. Only this account can present the credential to a verifier
	pub owner: AccountId,
	/// the account that minted the credential. Only this account can revoke it
	pub issuer: AccountId,
	/// the credential is valid strictly before this moment
	pub expiry: Moment,
	pub commitment_root: CommitmentRoot,
	pub revoked: bool,
}

impl<AccountId, Moment: PartialOrd> Credential<AccountId, Moment> {
	pub fn new(owner: AccountId, issuer: AccountId, expiry: Moment, root: CommitmentRoot) -> Self {
		Self { owner, issuer, expiry, commitment_root: root, revoked: false }
	}

	pub fn is_expired_at(&self, now: &Moment) -> bool {
		now >= &self.expiry
	}
}

/// Read access to credentials for pallets that consume them.
pub trait CredentialRegistry<AccountId, Moment> {
	fn credential(id: CredentialIndexType) -> Option<Credential<AccountId, Moment>>;

	fn owner_of(id: CredentialIndexType) -> Option<AccountId> {
		Self::credential(id).map(|c| c.owner)
	}

	fn issuer_of(id: CredentialIndexType) -> Option<AccountId> {
		Self::credential(id).map(|c| c.issuer)
	}

	fn expiry_of(id: CredentialIndexType) -> Option<Moment> {
		Self::credential(id).map(|c| c.expiry)
	}

	fn commitment_root_of(id: CredentialIndexType) -> Option<CommitmentRoot> {
		Self::credential(id).map(|c| c.commitment_root)
	}

	fn is_revoked(id: CredentialIndexType) -> Option<bool> {
		Self::credential(id).map(|c| c.revoked)
	}
}
