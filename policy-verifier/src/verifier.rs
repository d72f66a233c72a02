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

//! Groth16 verification of policy proofs on the BN254 curve.
//!
//! Decoding is strict: non-canonical coordinates or signals, points off the curve or outside the
//! prime-order subgroup, and keys expecting a different number of signals all verify as `false`.

use ark_bn254::{Bn254, Fr};
use ark_groth16::{Groth16, PreparedVerifyingKey, Proof, VerifyingKey};
use ark_serialize::CanonicalDeserialize;
use encointer_policy_verifier_core::{
	signals,
	wire::{canonical_field, g1_from_bytes, g2_from_bytes, G1Bytes, G2Bytes},
};
use parity_scale_codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
use scale_info::TypeInfo;
use sp_runtime::RuntimeDebug;
use sp_std::vec::Vec;

/// Public signals in the order fixed by [`signals`], each a canonical little-endian scalar
pub type PublicSignals = [[u8; 32]; signals::COUNT];

/// Groth16 proof as affine coordinates, each a canonical little-endian base field element
#[derive(
	Clone, Encode, Decode, DecodeWithMemTracking, Eq, PartialEq, RuntimeDebug, TypeInfo, MaxEncodedLen,
)]
pub struct PolicyProof {
	pub a: G1Bytes,
	pub b: G2Bytes,
	pub c: G1Bytes,
}

impl PolicyProof {
	pub fn new(a: G1Bytes, b: G2Bytes, c: G1Bytes) -> Self {
		Self { a, b, c }
	}

	/// Convert to arkworks Proof type. `None` if any point is malformed.
	pub fn to_ark_proof(&self) -> Option<Proof<Bn254>> {
		Some(Proof { a: g1_from_bytes(&self.a)?, b: g2_from_bytes(&self.b)?, c: g1_from_bytes(&self.c)? })
	}
}

impl From<(G1Bytes, G2Bytes, G1Bytes)> for PolicyProof {
	fn from((a, b, c): (G1Bytes, G2Bytes, G1Bytes)) -> Self {
		Self { a, b, c }
	}
}

/// Deserialize a compressed verifying key, checking all points
pub fn decode_verifying_key(bytes: &[u8]) -> Option<VerifyingKey<Bn254>> {
	VerifyingKey::<Bn254>::deserialize_compressed(bytes).ok()
}

/// Number of public inputs a verifying key expects
pub fn input_count(vk: &VerifyingKey<Bn254>) -> usize {
	vk.gamma_abc_g1.len().saturating_sub(1)
}

/// Decode public signals. `None` if any signal is not a canonical scalar.
pub fn decode_public_signals(public_signals: &PublicSignals) -> Option<Vec<Fr>> {
	public_signals.iter().map(canonical_field::<Fr>).collect()
}

/// Verify a policy proof against a serialized verifying key.
///
/// Returns `true` if the proof is valid, `false` otherwise.
pub fn verify_policy_proof(
	vk_bytes: &[u8],
	proof: &PolicyProof,
	public_signals: &PublicSignals,
) -> bool {
	let (Some(vk), Some(proof), Some(inputs)) = (
		decode_verifying_key(vk_bytes),
		proof.to_ark_proof(),
		decode_public_signals(public_signals),
	) else {
		return false;
	};
	if input_count(&vk) != inputs.len() {
		return false;
	}

	let pvk: PreparedVerifyingKey<Bn254> = vk.into();
	Groth16::<Bn254>::verify_proof(&pvk, &proof, &inputs).unwrap_or(false)
}
