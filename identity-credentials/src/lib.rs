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

//! # Identity Credentials Pallet
//!
//! A registry of non-transferable credentials. Each credential binds an owner to a commitment
//! root over private attributes (age, gender, nationality) and records who issued it, until when
//! it is valid and whether it was revoked.
//!
//! ## Overview
//!
//! Issuers mint credentials for holders. Minting is restricted to registered issuers unless
//! open issuer mode is enabled. The commitment root and expiry never change after mint.
//! The issuer may revoke a credential; revocation is irreversible.
//!
//! Other pallets read credentials through [`CredentialRegistry`].

#![cfg_attr(not(feature = "std"), no_std)]

use core::marker::PhantomData;
pub use encointer_primitives::identity_credentials::{
	CommitmentRoot, Credential, CredentialIndexType, CredentialRegistry,
};
use frame_system::ensure_signed;
use log::{debug, info};
pub use weights::{EncointerWeight, WeightInfo};

const LOG: &str = "encointer::identity-credentials";

pub use pallet::*;

#[cfg(feature = "runtime-benchmarks")]
mod benchmarking;
#[cfg(test)]
mod mock;

mod weights;

pub type MomentOf<T> = <T as pallet_timestamp::Config>::Moment;
pub type CredentialOf<T> = Credential<<T as frame_system::Config>::AccountId, MomentOf<T>>;

#[frame_support::pallet]
pub mod pallet {
	use super::*;
	use frame_support::pallet_prelude::*;
	use frame_system::pallet_prelude::*;
	use sp_std::vec::Vec;

	#[pallet::pallet]
	pub struct Pallet<T>(PhantomData<T>);

	#[pallet::config]
	pub trait Config: frame_system::Config + pallet_timestamp::Config {
		/// The overarching event type
		type RuntimeEvent: From<Event<Self>> + IsType<<Self as frame_system::Config>::RuntimeEvent>;

		/// Required origin for managing issuers and open issuer mode
		type AdminOrigin: EnsureOrigin<Self::RuntimeOrigin>;

		/// Weight information for extrinsics
		type WeightInfo: WeightInfo;
	}

	/// Number of credentials ever minted. Also the index of the latest credential.
	#[pallet::storage]
	pub type CredentialCount<T: Config> = StorageValue<_, CredentialIndexType, ValueQuery>;

	#[pallet::storage]
	pub type Credentials<T: Config> =
		StorageMap<_, Blake2_128Concat, CredentialIndexType, CredentialOf<T>, OptionQuery>;

	/// Accounts allowed to mint while open issuer mode is off
	#[pallet::storage]
	pub type Issuers<T: Config> = StorageMap<_, Blake2_128Concat, T::AccountId, (), OptionQuery>;

	/// If true, anyone may mint
	#[pallet::storage]
	pub type OpenIssuerMode<T: Config> = StorageValue<_, bool, ValueQuery>;

	#[derive(frame_support::DefaultNoBound)]
	#[pallet::genesis_config]
	pub struct GenesisConfig<T: Config> {
		pub open_issuer_mode: bool,
		pub issuers: Vec<T::AccountId>,
	}

	#[pallet::genesis_build]
	impl<T: Config> BuildGenesisConfig for GenesisConfig<T> {
		fn build(&self) {
			<OpenIssuerMode<T>>::put(self.open_issuer_mode);
			self.issuers.iter().for_each(|issuer| <Issuers<T>>::insert(issuer, ()));
		}
	}

	#[pallet::event]
	#[pallet::generate_deposit(pub(super) fn deposit_event)]
	pub enum Event<T: Config> {
		/// A credential has been minted
		CredentialMinted {
			id: CredentialIndexType,
			owner: T::AccountId,
			issuer: T::AccountId,
			expiry: MomentOf<T>,
			commitment_root: CommitmentRoot,
		},
		/// A credential has been revoked by its issuer
		CredentialRevoked { id: CredentialIndexType, issuer: T::AccountId },
		/// Open issuer mode has been switched
		OpenIssuerModeSet { open: bool },
		/// An account has been added to or removed from the issuers
		IssuerSet { issuer: T::AccountId, allowed: bool },
	}

	#[pallet::error]
	pub enum Error<T> {
		/// The caller is not a registered issuer and open issuer mode is off
		IssuerNotAuthorized,
		/// No credential with this index exists
		CredentialNotFound,
		/// Only the issuer of a credential may revoke it
		NotIssuer,
		/// Credential index space exhausted
		CredentialIndexOverflow,
	}

	#[pallet::call]
	impl<T: Config> Pallet<T> {
		/// Mint a credential for `owner`. The caller becomes its issuer.
		///
		/// # Arguments
		/// * `owner` - The holder, the only account able to present the credential
		/// * `expiry` - The credential is valid strictly before this moment
		/// * `commitment_root` - Commitment over the holder's salted attributes
		#[pallet::call_index(0)]
		#[pallet::weight(<T as pallet::Config>::WeightInfo::mint())]
		pub fn mint(
			origin: OriginFor<T>,
			owner: T::AccountId,
			expiry: MomentOf<T>,
			commitment_root: CommitmentRoot,
		) -> DispatchResult {
			let issuer = ensure_signed(origin)?;

			ensure!(
				OpenIssuerMode::<T>::get() || Issuers::<T>::contains_key(&issuer),
				Error::<T>::IssuerNotAuthorized
			);

			let id = CredentialCount::<T>::get()
				.checked_add(1)
				.ok_or(Error::<T>::CredentialIndexOverflow)?;

			Credentials::<T>::insert(
				id,
				Credential::new(owner.clone(), issuer.clone(), expiry, commitment_root),
			);
			CredentialCount::<T>::put(id);

			info!(target: LOG, "credential {} minted for {:?} by {:?}", id, owner, issuer);
			Self::deposit_event(Event::CredentialMinted {
				id,
				owner,
				issuer,
				expiry,
				commitment_root,
			});
			Ok(())
		}

		/// Revoke a credential. Revoking an already revoked credential has no effect.
		#[pallet::call_index(1)]
		#[pallet::weight(<T as pallet::Config>::WeightInfo::revoke())]
		pub fn revoke(origin: OriginFor<T>, id: CredentialIndexType) -> DispatchResult {
			let sender = ensure_signed(origin)?;

			let mut credential = Credentials::<T>::get(id).ok_or(Error::<T>::CredentialNotFound)?;
			ensure!(credential.issuer == sender, Error::<T>::NotIssuer);

			if credential.revoked {
				debug!(target: LOG, "credential {} already revoked", id);
				return Ok(());
			}

			credential.revoked = true;
			Credentials::<T>::insert(id, credential);

			info!(target: LOG, "credential {} revoked", id);
			Self::deposit_event(Event::CredentialRevoked { id, issuer: sender });
			Ok(())
		}

		#[pallet::call_index(2)]
		#[pallet::weight(<T as pallet::Config>::WeightInfo::set_open_issuer_mode())]
		pub fn set_open_issuer_mode(origin: OriginFor<T>, open: bool) -> DispatchResult {
			T::AdminOrigin::ensure_origin(origin)?;
			OpenIssuerMode::<T>::put(open);
			info!(target: LOG, "open issuer mode set to {}", open);
			Self::deposit_event(Event::OpenIssuerModeSet { open });
			Ok(())
		}

		#[pallet::call_index(3)]
		#[pallet::weight(<T as pallet::Config>::WeightInfo::set_issuer())]
		pub fn set_issuer(origin: OriginFor<T>, issuer: T::AccountId, allowed: bool) -> DispatchResult {
			T::AdminOrigin::ensure_origin(origin)?;
			if allowed {
				Issuers::<T>::insert(&issuer, ());
			} else {
				Issuers::<T>::remove(&issuer);
			}
			info!(target: LOG, "issuer {:?} allowed: {}", issuer, allowed);
			Self::deposit_event(Event::IssuerSet { issuer, allowed });
			Ok(())
		}
	}
}

impl<T: Config> Pallet<T> {
	pub fn is_issuer(account: &T::AccountId) -> bool {
		Issuers::<T>::contains_key(account)
	}
}

impl<T: Config> CredentialRegistry<T::AccountId, MomentOf<T>> for Pallet<T> {
	fn credential(id: CredentialIndexType) -> Option<CredentialOf<T>> {
		Credentials::<T>::get(id)
	}
}
