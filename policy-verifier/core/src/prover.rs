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

//! Groth16 proof generation for policy proofs.
//!
//! This module provides:
//! - Trusted setup (key generation)
//! - Proof generation, refusing unsatisfiable witnesses
//! - Byte encodings consumed by the on-chain verifier
//! - Test fixtures for e2e testing

use crate::{
	circuit::{poseidon_config, Attributes, Policy, PolicyCircuit, Salts},
	signals,
	wire::{canonical_field, field_to_bytes32, g1_to_bytes, g2_to_bytes, G1Bytes, G2Bytes},
};
use ark_bn254::{Bn254, Fr};
use ark_groth16::{Groth16, PreparedVerifyingKey, Proof, ProvingKey, VerifyingKey};
use ark_relations::r1cs::{ConstraintSynthesizer, ConstraintSystem, SynthesisError};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize, SerializationError};
use ark_snark::SNARK;
use ark_std::rand::{rngs::StdRng, CryptoRng, RngCore, SeedableRng};
use log::debug;

const LOG: &str = "encointer::policy-prover";

#[derive(Debug, thiserror::Error)]
pub enum ProofGenerationError {
	/// The witness violates the policy, a range or boolean constraint, or the commitment
	#[error("witness does not satisfy the policy circuit (first violation: {0})")]
	Unsatisfied(String),
	#[error("constraint synthesis failed: {0}")]
	Synthesis(#[from] SynthesisError),
	#[error("serialization failed: {0}")]
	Serialization(#[from] SerializationError),
}

/// Result of trusted setup ceremony
pub struct TrustedSetup {
	pub proving_key: ProvingKey<Bn254>,
	pub verifying_key: VerifyingKey<Bn254>,
}

impl TrustedSetup {
	/// Perform trusted setup with a deterministic seed (FOR TESTING ONLY)
	/// In production, use a proper MPC ceremony
	pub fn generate_with_seed(seed: u64) -> Result<Self, ProofGenerationError> {
		let mut rng = StdRng::seed_from_u64(seed);
		let circuit = PolicyCircuit::new(
			poseidon_config(),
			Policy::default(),
			Attributes::default(),
			Salts::default(),
		);
		let (proving_key, verifying_key) =
			Groth16::<Bn254>::circuit_specific_setup(circuit, &mut rng)?;
		Ok(Self { proving_key, verifying_key })
	}

	/// Serialize the verifying key to bytes
	pub fn verifying_key_bytes(&self) -> Result<Vec<u8>, ProofGenerationError> {
		let mut bytes = Vec::new();
		self.verifying_key.serialize_compressed(&mut bytes)?;
		Ok(bytes)
	}

	/// Serialize the proving key to bytes
	pub fn proving_key_bytes(&self) -> Result<Vec<u8>, ProofGenerationError> {
		let mut bytes = Vec::new();
		self.proving_key.serialize_compressed(&mut bytes)?;
		Ok(bytes)
	}

	pub fn verifying_key_from_bytes(bytes: &[u8]) -> Option<VerifyingKey<Bn254>> {
		VerifyingKey::<Bn254>::deserialize_compressed(bytes).ok()
	}

	pub fn proving_key_from_bytes(bytes: &[u8]) -> Option<ProvingKey<Bn254>> {
		ProvingKey::<Bn254>::deserialize_compressed(bytes).ok()
	}
}

/// Groth16 does not check the witness while proving, so an unsatisfiable circuit would still
/// yield a (useless) proof. Synthesize once and refuse instead.
fn ensure_satisfied(circuit: &PolicyCircuit) -> Result<(), ProofGenerationError> {
	let cs = ConstraintSystem::<Fr>::new_ref();
	circuit.clone().generate_constraints(cs.clone())?;
	if cs.is_satisfied()? {
		return Ok(());
	}
	let violation = cs.which_is_unsatisfied()?.unwrap_or_default();
	debug!(target: LOG, "refusing to prove unsatisfied witness: {}", violation);
	Err(ProofGenerationError::Unsatisfied(violation))
}

/// Generate a policy proof with caller-supplied randomness
pub fn generate_proof_with_rng<R: RngCore + CryptoRng>(
	proving_key: &ProvingKey<Bn254>,
	policy: Policy,
	attributes: Attributes,
	salts: Salts,
	rng: &mut R,
) -> Result<(Proof<Bn254>, Vec<Fr>), ProofGenerationError> {
	let circuit = PolicyCircuit::new(poseidon_config(), policy, attributes, salts);
	ensure_satisfied(&circuit)?;

	let public_inputs = circuit.public_inputs();
	let proof = Groth16::<Bn254>::prove(proving_key, circuit, rng)?;
	Ok((proof, public_inputs))
}

/// Generate a policy proof. Returns the proof and the public signals it binds.
pub fn generate_proof(
	proving_key: &ProvingKey<Bn254>,
	policy: Policy,
	attributes: Attributes,
	salts: Salts,
) -> Result<(Proof<Bn254>, Vec<Fr>), ProofGenerationError> {
	generate_proof_with_rng(proving_key, policy, attributes, salts, &mut StdRng::from_entropy())
}

/// Verify a proof (off-chain counterpart of the pallet's verifier)
pub fn verify_proof(
	verifying_key: &VerifyingKey<Bn254>,
	proof: &Proof<Bn254>,
	public_inputs: &[Fr],
) -> bool {
	let pvk: PreparedVerifyingKey<Bn254> = verifying_key.clone().into();
	Groth16::<Bn254>::verify_proof(&pvk, proof, public_inputs).unwrap_or(false)
}

pub fn proof_to_bytes(proof: &Proof<Bn254>) -> Result<Vec<u8>, ProofGenerationError> {
	let mut bytes = Vec::new();
	proof.serialize_compressed(&mut bytes)?;
	Ok(bytes)
}

pub fn proof_from_bytes(bytes: &[u8]) -> Option<Proof<Bn254>> {
	Proof::<Bn254>::deserialize_compressed(bytes).ok()
}

/// Affine coordinates `(A, B, C)` as submitted on chain
pub fn proof_to_wire(proof: &Proof<Bn254>) -> (G1Bytes, G2Bytes, G1Bytes) {
	(g1_to_bytes(&proof.a), g2_to_bytes(&proof.b), g1_to_bytes(&proof.c))
}

/// Public signals as submitted on chain
pub fn public_inputs_to_bytes(
	public_inputs: &[Fr],
) -> Result<[[u8; 32]; signals::COUNT], ProofGenerationError> {
	if public_inputs.len() != signals::COUNT {
		return Err(ProofGenerationError::Unsatisfied(format!(
			"expected {} public signals, got {}",
			signals::COUNT,
			public_inputs.len()
		)));
	}
	let mut out = [[0u8; 32]; signals::COUNT];
	for (slot, input) in out.iter_mut().zip(public_inputs) {
		*slot = field_to_bytes32(input);
	}
	Ok(out)
}

/// Convert a 32-byte array to a field element. `None` unless canonical.
pub fn bytes32_to_field(bytes: &[u8; 32]) -> Option<Fr> {
	canonical_field(bytes)
}

/// Canonical policy hash: the Poseidon digest of the policy signals
pub fn derive_policy_hash(policy: &Policy) -> [u8; 32] {
	field_to_bytes32(&policy.digest(&poseidon_config()))
}

/// Well-known test seed for deterministic trusted setup
/// This seed should ONLY be used for testing
pub const TEST_SETUP_SEED: u64 = 0xDEADBEEF_CAFEBABE;

/// Pre-generated test fixtures using TEST_SETUP_SEED
pub mod test_fixtures {
	use super::*;
	use std::sync::OnceLock;

	static TEST_SETUP: OnceLock<TrustedSetup> = OnceLock::new();

	/// Get the test trusted setup (lazily initialized)
	pub fn get_test_setup() -> &'static TrustedSetup {
		TEST_SETUP.get_or_init(|| {
			TrustedSetup::generate_with_seed(TEST_SETUP_SEED).expect("test setup must succeed")
		})
	}

	pub fn get_test_vk_bytes() -> Vec<u8> {
		get_test_setup().verifying_key_bytes().expect("test key serializes")
	}

	pub fn get_test_pk() -> &'static ProvingKey<Bn254> {
		&get_test_setup().proving_key
	}

	/// Wire-encoded proof and public signals for the test setup
	pub fn generate_test_proof(
		policy: Policy,
		attributes: Attributes,
		salts: Salts,
	) -> Result<((G1Bytes, G2Bytes, G1Bytes), [[u8; 32]; signals::COUNT]), ProofGenerationError>
	{
		let (proof, public_inputs) = generate_proof(get_test_pk(), policy, attributes, salts)?;
		Ok((proof_to_wire(&proof), public_inputs_to_bytes(&public_inputs)?))
	}
}
