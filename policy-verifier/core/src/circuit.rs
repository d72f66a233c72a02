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

//! Attribute commitment and the selective-disclosure policy circuit.
//!
//! The commitment is a flat 3-leaf Poseidon aggregate:
//! - leaf = Poseidon(tag, value, salt) for age (tag 1), gender (tag 2), nationality (tag 3)
//! - root = Poseidon(leaf_age, leaf_gender, leaf_nationality)
//!
//! The circuit proves knowledge of attributes and salts opening the public root, and that the
//! attributes satisfy every check whose flag is set:
//! - age: `age >= required_age`, both within [`AGE_BITS`] bits
//! - gender: `gender == required_gender`, both boolean
//! - nationality: `nationality` equals a non-zero entry of the allow-list
//!
//! Public inputs follow [`crate::signals`]. Private inputs: attributes and salts.

use crate::signals::{self, MAX_COUNTRIES};
use ark_bn254::Fr;
use ark_crypto_primitives::sponge::{
	constraints::CryptographicSpongeVar,
	poseidon::{
		constraints::PoseidonSpongeVar, find_poseidon_ark_and_mds, PoseidonConfig, PoseidonSponge,
	},
	CryptographicSponge,
};
use ark_ff::PrimeField;
use ark_r1cs_std::{fields::fp::FpVar, prelude::*};
use ark_relations::r1cs::{ConstraintSynthesizer, ConstraintSystemRef, SynthesisError};
use ark_std::{vec, vec::Vec};

pub const AGE_TAG: u64 = 1;
pub const GENDER_TAG: u64 = 2;
pub const NATIONALITY_TAG: u64 = 3;

/// Bit budget for both the prover's age and the required age.
pub const AGE_BITS: usize = 8;

const FULL_ROUNDS: usize = 8;
const PARTIAL_ROUNDS: usize = 57;
const ALPHA: u64 = 5;
const RATE: usize = 2;
const CAPACITY: usize = 1;

/// Poseidon configuration for the BN254 scalar field.
/// Round constants and MDS matrix come from the Grain LFSR.
pub fn poseidon_config() -> PoseidonConfig<Fr> {
	let (ark, mds) = find_poseidon_ark_and_mds::<Fr>(
		Fr::MODULUS_BIT_SIZE as u64,
		RATE,
		FULL_ROUNDS as u64,
		PARTIAL_ROUNDS as u64,
		0,
	);
	PoseidonConfig::new(FULL_ROUNDS, PARTIAL_ROUNDS, ALPHA, mds, ark, RATE, CAPACITY)
}

/// Compute Poseidon hash of inputs
pub fn poseidon_hash(config: &PoseidonConfig<Fr>, inputs: &[Fr]) -> Fr {
	let mut sponge = PoseidonSponge::new(config);
	for input in inputs {
		sponge.absorb(input);
	}
	sponge.squeeze_field_elements::<Fr>(1)[0]
}

/// Private attributes of a credential holder
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Attributes {
	pub age: u64,
	/// 0 or 1
	pub gender: u64,
	/// ISO 3166-1 numeric country code
	pub nationality: u64,
}

/// Blinding salts, one per attribute leaf
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Salts {
	pub age: Fr,
	pub gender: Fr,
	pub nationality: Fr,
}

/// The checks a verifier asks for. Flags are raw numbers so that malformed policies can be
/// expressed; anything but 0 or 1 makes the circuit unsatisfiable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Policy {
	pub age_check: u64,
	pub required_age: u64,
	pub gender_check: u64,
	pub required_gender: u64,
	pub nationality_check: u64,
	/// zero entries are padding and never match
	pub allowed_countries: [u64; MAX_COUNTRIES],
}

impl Policy {
	/// The policy part of the public signals, in signal order
	pub fn signals(&self) -> [Fr; signals::POLICY_COUNT] {
		let mut out = [Fr::from(0u64); signals::POLICY_COUNT];
		out[signals::AGE_FLAG] = Fr::from(self.age_check);
		out[signals::REQUIRED_AGE] = Fr::from(self.required_age);
		out[signals::GENDER_FLAG] = Fr::from(self.gender_check);
		out[signals::REQUIRED_GENDER] = Fr::from(self.required_gender);
		out[signals::NATIONALITY_FLAG] = Fr::from(self.nationality_check);
		for (i, country) in self.allowed_countries.iter().enumerate() {
			out[signals::COUNTRIES + i] = Fr::from(*country);
		}
		out
	}

	/// Poseidon digest over the policy signals. Usable as a canonical policy hash.
	pub fn digest(&self, config: &PoseidonConfig<Fr>) -> Fr {
		poseidon_hash(config, &self.signals())
	}
}

/// leaf = Poseidon(tag, value, salt)
pub fn attribute_leaf(config: &PoseidonConfig<Fr>, tag: u64, value: u64, salt: &Fr) -> Fr {
	poseidon_hash(config, &[Fr::from(tag), Fr::from(value), *salt])
}

/// root = Poseidon(leaf_age, leaf_gender, leaf_nationality)
pub fn commitment_root(config: &PoseidonConfig<Fr>, attributes: &Attributes, salts: &Salts) -> Fr {
	let leaves = [
		attribute_leaf(config, AGE_TAG, attributes.age, &salts.age),
		attribute_leaf(config, GENDER_TAG, attributes.gender, &salts.gender),
		attribute_leaf(config, NATIONALITY_TAG, attributes.nationality, &salts.nationality),
	];
	poseidon_hash(config, &leaves)
}

#[derive(Clone)]
pub struct PolicyCircuit {
	pub poseidon_config: PoseidonConfig<Fr>,

	// Public inputs
	pub policy: Policy,
	pub root: Fr,

	// Private inputs (witnesses)
	pub attributes: Attributes,
	pub salts: Salts,
}

impl PolicyCircuit {
	/// Create a circuit whose public root commits to `attributes` under `salts`
	pub fn new(
		poseidon_config: PoseidonConfig<Fr>,
		policy: Policy,
		attributes: Attributes,
		salts: Salts,
	) -> Self {
		let root = commitment_root(&poseidon_config, &attributes, &salts);
		Self { poseidon_config, policy, root, attributes, salts }
	}

	/// Public inputs in signal order
	pub fn public_inputs(&self) -> Vec<Fr> {
		let mut inputs = Vec::with_capacity(signals::COUNT);
		inputs.extend_from_slice(&self.policy.signals());
		inputs.push(self.root);
		inputs
	}
}

/// Allocate a boolean witness and bind it to `var`. Unsatisfiable unless `var` is 0 or 1.
fn enforce_boolean(
	cs: ConstraintSystemRef<Fr>,
	raw: u64,
	var: &FpVar<Fr>,
) -> Result<Boolean<Fr>, SynthesisError> {
	let bit = Boolean::new_witness(cs, || Ok(raw == 1))?;
	FpVar::from(bit.clone()).enforce_equal(var)?;
	Ok(bit)
}

/// Decompose `var` into `n_bits` little-endian bit witnesses.
/// Unsatisfiable if `var` does not fit into `n_bits`.
fn enforce_bit_budget(
	cs: ConstraintSystemRef<Fr>,
	raw: u64,
	var: &FpVar<Fr>,
	n_bits: usize,
) -> Result<Vec<Boolean<Fr>>, SynthesisError> {
	let bits = (0..n_bits)
		.map(|i| Boolean::new_witness(cs.clone(), || Ok((raw >> i) & 1 == 1)))
		.collect::<Result<Vec<_>, _>>()?;
	Boolean::le_bits_to_fp_var(&bits)?.enforce_equal(var)?;
	Ok(bits)
}

/// Poseidon over `inputs` inside the circuit
fn poseidon_gadget(
	cs: ConstraintSystemRef<Fr>,
	config: &PoseidonConfig<Fr>,
	inputs: Vec<FpVar<Fr>>,
) -> Result<FpVar<Fr>, SynthesisError> {
	let mut sponge = PoseidonSpongeVar::new(cs, config);
	sponge.absorb(&inputs)?;
	Ok(sponge.squeeze_field_elements(1)?[0].clone())
}

impl ConstraintSynthesizer<Fr> for PolicyCircuit {
	fn generate_constraints(self, cs: ConstraintSystemRef<Fr>) -> Result<(), SynthesisError> {
		let policy = self.policy;
		let attributes = self.attributes;

		// Allocate public inputs in signal order
		let public = self
			.public_inputs()
			.into_iter()
			.map(|v| FpVar::new_input(cs.clone(), || Ok(v)))
			.collect::<Result<Vec<_>, _>>()?;

		// Allocate private witnesses
		let age_var = FpVar::new_witness(cs.clone(), || Ok(Fr::from(attributes.age)))?;
		let gender_var = FpVar::new_witness(cs.clone(), || Ok(Fr::from(attributes.gender)))?;
		let nationality_var =
			FpVar::new_witness(cs.clone(), || Ok(Fr::from(attributes.nationality)))?;
		let salt_age_var = FpVar::new_witness(cs.clone(), || Ok(self.salts.age))?;
		let salt_gender_var = FpVar::new_witness(cs.clone(), || Ok(self.salts.gender))?;
		let salt_nationality_var = FpVar::new_witness(cs.clone(), || Ok(self.salts.nationality))?;

		// Flags are booleans
		let age_check =
			enforce_boolean(cs.clone(), policy.age_check, &public[signals::AGE_FLAG])?;
		let gender_check =
			enforce_boolean(cs.clone(), policy.gender_check, &public[signals::GENDER_FLAG])?;
		let nationality_check = enforce_boolean(
			cs.clone(),
			policy.nationality_check,
			&public[signals::NATIONALITY_FLAG],
		)?;

		// Age: both operands within budget, then age + 2^AGE_BITS - required has its top bit set
		// iff age >= required
		enforce_bit_budget(cs.clone(), attributes.age, &age_var, AGE_BITS)?;
		enforce_bit_budget(cs.clone(), policy.required_age, &public[signals::REQUIRED_AGE], AGE_BITS)?;
		let offset = 1u64 << AGE_BITS;
		let diff_var = &age_var + FpVar::constant(Fr::from(offset)) - &public[signals::REQUIRED_AGE];
		let diff_raw = attributes.age.wrapping_add(offset).wrapping_sub(policy.required_age);
		let diff_bits = enforce_bit_budget(cs.clone(), diff_raw, &diff_var, AGE_BITS + 1)?;
		let age_ok = diff_bits[AGE_BITS].clone();
		age_check.and(&age_ok.not())?.enforce_equal(&Boolean::constant(false))?;

		// Gender: both booleans, equal when checked
		let gender = enforce_boolean(cs.clone(), attributes.gender, &gender_var)?;
		let required_gender =
			enforce_boolean(cs.clone(), policy.required_gender, &public[signals::REQUIRED_GENDER])?;
		let gender_mismatch = gender.is_neq(&required_gender)?;
		gender_check.and(&gender_mismatch)?.enforce_equal(&Boolean::constant(false))?;

		// Nationality: some non-zero allow-list entry matches
		let zero = FpVar::<Fr>::zero();
		let matches = public[signals::COUNTRIES..signals::COUNTRIES + MAX_COUNTRIES]
			.iter()
			.map(|country| nationality_var.is_eq(country)?.and(&country.is_neq(&zero)?))
			.collect::<Result<Vec<_>, _>>()?;
		let nationality_ok = Boolean::kary_or(&matches)?;
		nationality_check.and(&nationality_ok.not())?.enforce_equal(&Boolean::constant(false))?;

		// Commitment: recompute the root from attribute leaves
		let config = &self.poseidon_config;
		let leaf = |tag: u64, value: &FpVar<Fr>, salt: &FpVar<Fr>| {
			poseidon_gadget(
				cs.clone(),
				config,
				vec![FpVar::constant(Fr::from(tag)), value.clone(), salt.clone()],
			)
		};
		let leaves = vec![
			leaf(AGE_TAG, &age_var, &salt_age_var)?,
			leaf(GENDER_TAG, &gender_var, &salt_gender_var)?,
			leaf(NATIONALITY_TAG, &nationality_var, &salt_nationality_var)?,
		];
		let computed_root = poseidon_gadget(cs.clone(), config, leaves)?;
		computed_root.enforce_equal(&public[signals::ROOT])?;

		Ok(())
	}
}
