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

//! # Policy Verifier Pallet
//!
//! Accepts zero-knowledge proofs that the attributes committed to in an identity credential
//! satisfy a policy (minimum age, gender, nationality allowlist), without revealing them.
//!
//! ## Overview
//!
//! `verify_and_emit` runs a fixed sequence of checks and stops at the first failure:
//!
//! 1. the caller owns the credential
//! 2. the credential's issuer is allowed (only while the allowlist is enforced)
//! 3. the credential has not expired
//! 4. the credential has not been revoked
//! 5. the commitment root among the public signals equals the credential's root
//! 6. the nullifier has not been used before
//! 7. the Groth16 proof verifies against the stored verifying key
//!
//! On success the nullifier is consumed forever and [`Event::Verified`] is emitted.
//! The policy hash is passed through to the event unchecked.

#![cfg_attr(not(feature = "std"), no_std)]

use core::marker::PhantomData;
pub use encointer_policy_verifier_core::signals;
use encointer_primitives::identity_credentials::{CredentialIndexType, CredentialRegistry};
use frame_system::ensure_signed;
use log::{debug, info, warn};
pub use verifier::{verify_policy_proof, PolicyProof, PublicSignals};
pub use weights::{EncointerWeight, WeightInfo};

const LOG: &str = "encointer::policy-verifier";

pub use pallet::*;

#[cfg(feature = "runtime-benchmarks")]
mod benchmarking;
#[cfg(test)]
mod mock;
#[cfg(test)]
mod tests;

pub mod verifier;
mod weights;

pub type MomentOf<T> = <T as pallet_timestamp::Config>::Moment;
pub type Nullifier = [u8; 32];
pub type PolicyHash = [u8; 32];

/// Checks a policy proof against its public signals
pub trait PolicyProofVerifier {
	fn verify(proof: &PolicyProof, public_signals: &PublicSignals) -> bool;
}

/// Verifies against the key in [`VerificationKey`] storage. Fails if no key is set.
pub struct StoredKeyVerifier<T>(PhantomData<T>);

impl<T: Config> PolicyProofVerifier for StoredKeyVerifier<T> {
	fn verify(proof: &PolicyProof, public_signals: &PublicSignals) -> bool {
		match VerificationKey::<T>::get() {
			Some(vk) => verify_policy_proof(&vk, proof, public_signals),
			None => {
				warn!(target: LOG, "no verification key set");
				false
			},
		}
	}
}

#[cfg(feature = "runtime-benchmarks")]
pub trait BenchmarkHelper<AccountId, Moment> {
	/// Create a credential owned by `owner` and return its index
	fn create_credential(
		owner: &AccountId,
		expiry: Moment,
		commitment_root: [u8; 32],
	) -> CredentialIndexType;

	/// A serialized verifying key together with a proof it accepts
	fn valid_proof() -> (sp_std::vec::Vec<u8>, PolicyProof, PublicSignals);
}

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

		/// Source of credentials presented to `verify_and_emit`
		type Credentials: CredentialRegistry<Self::AccountId, MomentOf<Self>>;

		/// Required origin for managing the issuer allowlist and the verification key
		type AdminOrigin: EnsureOrigin<Self::RuntimeOrigin>;

		type ProofVerifier: PolicyProofVerifier;

		/// Upper bound for a serialized verifying key
		#[pallet::constant]
		type MaxVerificationKeyLen: Get<u32>;

		/// Weight information for extrinsics
		type WeightInfo: WeightInfo;

		#[cfg(feature = "runtime-benchmarks")]
		type BenchmarkHelper: BenchmarkHelper<Self::AccountId, MomentOf<Self>>;
	}

	#[pallet::type_value]
	pub(super) fn DefaultForRequireIssuerAllowlist() -> bool {
		true
	}

	/// If true, only credentials by [`AllowedIssuers`] pass
	#[pallet::storage]
	pub type RequireIssuerAllowlist<T: Config> =
		StorageValue<_, bool, ValueQuery, DefaultForRequireIssuerAllowlist>;

	#[pallet::storage]
	pub type AllowedIssuers<T: Config> =
		StorageMap<_, Blake2_128Concat, T::AccountId, (), OptionQuery>;

	/// Nullifiers of all accepted proofs. Never pruned.
	#[pallet::storage]
	pub type UsedNullifiers<T: Config> =
		StorageMap<_, Blake2_128Concat, Nullifier, (), OptionQuery>;

	/// Compressed Groth16 verifying key of the policy circuit
	#[pallet::storage]
	pub type VerificationKey<T: Config> =
		StorageValue<_, BoundedVec<u8, T::MaxVerificationKeyLen>, OptionQuery>;

	#[pallet::genesis_config]
	pub struct GenesisConfig<T: Config> {
		pub require_issuer_allowlist: bool,
		pub allowed_issuers: Vec<T::AccountId>,
		pub verification_key: Option<Vec<u8>>,
	}

	impl<T: Config> Default for GenesisConfig<T> {
		fn default() -> Self {
			Self { require_issuer_allowlist: true, allowed_issuers: Vec::new(), verification_key: None }
		}
	}

	#[pallet::genesis_build]
	impl<T: Config> BuildGenesisConfig for GenesisConfig<T> {
		fn build(&self) {
			<RequireIssuerAllowlist<T>>::put(self.require_issuer_allowlist);
			self.allowed_issuers
				.iter()
				.for_each(|issuer| <AllowedIssuers<T>>::insert(issuer, ()));
			if let Some(vk) = &self.verification_key {
				let vk: BoundedVec<u8, T::MaxVerificationKeyLen> =
					vk.clone().try_into().expect("genesis verification key too long");
				assert!(Pallet::<T>::is_valid_verification_key(&vk), "invalid genesis verification key");
				<VerificationKey<T>>::put(vk);
			}
		}
	}

	#[pallet::event]
	#[pallet::generate_deposit(pub(super) fn deposit_event)]
	pub enum Event<T: Config> {
		/// A credential holder proved that their attributes satisfy a policy
		Verified {
			who: T::AccountId,
			id: CredentialIndexType,
			policy_hash: PolicyHash,
			nullifier: Nullifier,
		},
		/// Issuer allowlist enforcement has been switched
		RequireIssuerAllowlistSet { required: bool },
		/// An issuer has been added to or removed from the allowlist
		IssuerAllowedSet { issuer: T::AccountId, allowed: bool },
		/// The verification key has been replaced
		VerificationKeySet,
	}

	#[pallet::error]
	pub enum Error<T> {
		/// The caller does not own this credential, or it does not exist
		NotOwner,
		/// The credential's issuer is not on the allowlist
		IssuerNotAllowed,
		/// The credential's expiry has been reached
		Expired,
		/// The credential has been revoked by its issuer
		Revoked,
		/// The commitment root among the public signals differs from the credential's
		RootMismatch,
		/// This nullifier has been used before
		NullifierUsed,
		/// The proof does not verify, or no verification key is set
		InvalidProof,
		/// The bytes do not decode to a verifying key for the policy circuit
		InvalidVerificationKey,
	}

	#[pallet::call]
	impl<T: Config> Pallet<T> {
		/// Present a proof that the caller's credential satisfies a policy.
		///
		/// # Arguments
		/// * `id` - The credential, owned by the caller
		/// * `public_signals` - Policy parameters and commitment root, laid out per [`signals`]
		/// * `proof` - Groth16 proof over `public_signals`
		/// * `policy_hash` - Opaque correlation token, echoed in the event
		/// * `nullifier` - Consumed on success, rejected on reuse
		#[pallet::call_index(0)]
		#[pallet::weight(<T as pallet::Config>::WeightInfo::verify_and_emit())]
		pub fn verify_and_emit(
			origin: OriginFor<T>,
			id: CredentialIndexType,
			public_signals: PublicSignals,
			proof: PolicyProof,
			policy_hash: PolicyHash,
			nullifier: Nullifier,
		) -> DispatchResult {
			let who = ensure_signed(origin)?;

			let credential = T::Credentials::credential(id)
				.filter(|c| c.owner == who)
				.ok_or(Error::<T>::NotOwner)?;

			if RequireIssuerAllowlist::<T>::get() {
				ensure!(
					AllowedIssuers::<T>::contains_key(&credential.issuer),
					Error::<T>::IssuerNotAllowed
				);
			}

			let now = pallet_timestamp::Pallet::<T>::get();
			ensure!(!credential.is_expired_at(&now), Error::<T>::Expired);
			ensure!(!credential.revoked, Error::<T>::Revoked);
			ensure!(
				public_signals[signals::ROOT] == credential.commitment_root,
				Error::<T>::RootMismatch
			);
			ensure!(!UsedNullifiers::<T>::contains_key(nullifier), Error::<T>::NullifierUsed);

			if !T::ProofVerifier::verify(&proof, &public_signals) {
				debug!(target: LOG, "proof for credential {} rejected", id);
				return Err(Error::<T>::InvalidProof.into());
			}

			UsedNullifiers::<T>::insert(nullifier, ());

			info!(target: LOG, "credential {} verified for {:?}", id, who);
			Self::deposit_event(Event::Verified { who, id, policy_hash, nullifier });
			Ok(())
		}

		#[pallet::call_index(1)]
		#[pallet::weight(<T as pallet::Config>::WeightInfo::set_require_issuer_allowlist())]
		pub fn set_require_issuer_allowlist(origin: OriginFor<T>, required: bool) -> DispatchResult {
			T::AdminOrigin::ensure_origin(origin)?;
			RequireIssuerAllowlist::<T>::put(required);
			info!(target: LOG, "issuer allowlist required: {}", required);
			Self::deposit_event(Event::RequireIssuerAllowlistSet { required });
			Ok(())
		}

		#[pallet::call_index(2)]
		#[pallet::weight(<T as pallet::Config>::WeightInfo::set_issuer_allowed())]
		pub fn set_issuer_allowed(
			origin: OriginFor<T>,
			issuer: T::AccountId,
			allowed: bool,
		) -> DispatchResult {
			T::AdminOrigin::ensure_origin(origin)?;
			if allowed {
				AllowedIssuers::<T>::insert(&issuer, ());
			} else {
				AllowedIssuers::<T>::remove(&issuer);
			}
			info!(target: LOG, "issuer {:?} allowed: {}", issuer, allowed);
			Self::deposit_event(Event::IssuerAllowedSet { issuer, allowed });
			Ok(())
		}

		/// Replace the verifying key. Only keys expecting exactly [`signals::COUNT`] public
		/// inputs are accepted.
		#[pallet::call_index(3)]
		#[pallet::weight(<T as pallet::Config>::WeightInfo::set_verification_key())]
		pub fn set_verification_key(
			origin: OriginFor<T>,
			vk: BoundedVec<u8, T::MaxVerificationKeyLen>,
		) -> DispatchResult {
			T::AdminOrigin::ensure_origin(origin)?;
			ensure!(Self::is_valid_verification_key(&vk), Error::<T>::InvalidVerificationKey);
			VerificationKey::<T>::put(vk);
			info!(target: LOG, "verification key set");
			Self::deposit_event(Event::VerificationKeySet);
			Ok(())
		}
	}
}

impl<T: Config> Pallet<T> {
	pub fn is_nullifier_used(nullifier: &Nullifier) -> bool {
		UsedNullifiers::<T>::contains_key(nullifier)
	}

	pub fn is_issuer_allowed(issuer: &T::AccountId) -> bool {
		AllowedIssuers::<T>::contains_key(issuer)
	}

	fn is_valid_verification_key(bytes: &[u8]) -> bool {
		verifier::decode_verifying_key(bytes)
			.is_some_and(|vk| verifier::input_count(&vk) == signals::COUNT)
	}
}
