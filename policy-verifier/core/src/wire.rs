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

//! Fixed-width byte encodings of field elements and curve points.
//!
//! Every coordinate is 32 bytes, little-endian, canonical. Decoding never reduces modulo
//! the field order and rejects points off the curve or outside the prime-order subgroup.

use ark_bn254::{Fq, Fq2, G1Affine, G2Affine};
use ark_ff::{BigInt, BigInteger, PrimeField};

/// Affine G1 point as `[x, y]`
pub type G1Bytes = [[u8; 32]; 2];
/// Affine G2 point as `[[x.c0, x.c1], [y.c0, y.c1]]`
pub type G2Bytes = [[[u8; 32]; 2]; 2];

/// Decode a canonical little-endian field element. `None` if it is not below the modulus.
pub fn canonical_field<F: PrimeField<BigInt = BigInt<4>>>(bytes: &[u8; 32]) -> Option<F> {
	let mut limbs = [0u64; 4];
	for (limb, chunk) in limbs.iter_mut().zip(bytes.chunks_exact(8)) {
		let mut buf = [0u8; 8];
		buf.copy_from_slice(chunk);
		*limb = u64::from_le_bytes(buf);
	}
	F::from_bigint(BigInt::new(limbs))
}

/// Encode a field element as 32 little-endian bytes
pub fn field_to_bytes32<F: PrimeField>(field: &F) -> [u8; 32] {
	let mut bytes = [0u8; 32];
	let repr = field.into_bigint().to_bytes_le();
	let len = repr.len().min(32);
	bytes[..len].copy_from_slice(&repr[..len]);
	bytes
}

fn valid_point<P: ark_ec::short_weierstrass::SWCurveConfig>(
	point: ark_ec::short_weierstrass::Affine<P>,
) -> Option<ark_ec::short_weierstrass::Affine<P>> {
	(point.is_on_curve() && point.is_in_correct_subgroup_assuming_on_curve()).then_some(point)
}

pub fn g1_from_bytes(bytes: &G1Bytes) -> Option<G1Affine> {
	let x = canonical_field::<Fq>(&bytes[0])?;
	let y = canonical_field::<Fq>(&bytes[1])?;
	valid_point(G1Affine::new_unchecked(x, y))
}

pub fn g2_from_bytes(bytes: &G2Bytes) -> Option<G2Affine> {
	let fq2 = |c: &[[u8; 32]; 2]| -> Option<Fq2> {
		Some(Fq2::new(canonical_field::<Fq>(&c[0])?, canonical_field::<Fq>(&c[1])?))
	};
	valid_point(G2Affine::new_unchecked(fq2(&bytes[0])?, fq2(&bytes[1])?))
}

pub fn g1_to_bytes(point: &G1Affine) -> G1Bytes {
	[field_to_bytes32(&point.x), field_to_bytes32(&point.y)]
}

pub fn g2_to_bytes(point: &G2Affine) -> G2Bytes {
	[
		[field_to_bytes32(&point.x.c0), field_to_bytes32(&point.x.c1)],
		[field_to_bytes32(&point.y.c0), field_to_bytes32(&point.y.c1)],
	]
}
