// Copyright 2026 RISC Zero, Inc.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! BN254 (alt_bn128) G1 point addition, scalar multiplication and pairing check.
//!
//! Implements [EIP-196](https://eips.ethereum.org/EIPS/eip-196) and
//! [EIP-197](https://eips.ethereum.org/EIPS/eip-197).

use crate::{Error, Membership, Result, buffer::Input, buffer::put_be};
use ark_bn254::{Bn254, Fq, Fq2, G1Affine, G2Affine};
use ark_ec::{AffineRepr, CurveGroup, pairing::Pairing};
use ark_ff::{AdditiveGroup, BigInt, BigInteger, One, PrimeField, Zero};

/// Width of an encoded base field element.
pub const FQ_LEN: usize = 32;
/// Width of an encoded scalar.
pub const SCALAR_LEN: usize = 32;
/// Width of an encoded G1 point: `x ‖ y`.
pub const G1_LEN: usize = 2 * FQ_LEN;
/// Width of an encoded G2 point: `x.c1 ‖ x.c0 ‖ y.c1 ‖ y.c0`.
pub const G2_LEN: usize = 4 * FQ_LEN;

pub const ADD_INPUT_LEN: usize = 2 * G1_LEN;
pub const MUL_INPUT_LEN: usize = G1_LEN + SCALAR_LEN;
pub const PAIR_LEN: usize = G1_LEN + G2_LEN;

/// The scalar `2` as little-endian limbs.
const TWO: [u64; 4] = [2, 0, 0, 0];

/// BN254 point addition.
///
/// Short input is zero-extended and anything past [`ADD_INPUT_LEN`] is ignored.
pub fn g1_add(input: &[u8]) -> Result<[u8; G1_LEN]> {
    let input = Input::new(input).padded::<ADD_INPUT_LEN>();
    let a = decode_g1(&input[..G1_LEN], Membership::Curve)?;
    let b = decode_g1(&input[G1_LEN..], Membership::Curve)?;

    encode_g1(&(a.into_group() + b).into_affine())
}

/// BN254 scalar multiplication.
///
/// Short input is zero-extended and anything past [`MUL_INPUT_LEN`] is ignored.
pub fn g1_mul(input: &[u8]) -> Result<[u8; G1_LEN]> {
    let input = Input::new(input).padded::<MUL_INPUT_LEN>();
    let p = decode_g1(&input[..G1_LEN], Membership::Subgroup)?;
    let scalar = be_bytes_to_limbs(&input[G1_LEN..]);

    let prod = if scalar == TWO { p.into_group().double() } else { p.mul_bigint(scalar) };
    encode_g1(&prod.into_affine())
}

/// BN254 pairing check over `n` concatenated `(G1, G2)` pairs.
///
/// Returns `true` for empty input.
pub fn pairing_check(input: &[u8]) -> Result<bool> {
    let blocks = Input::new(input).blocks(PAIR_LEN, "invalid input length for pairing")?;

    let mut g1s = Vec::with_capacity(blocks.len());
    let mut g2s = Vec::with_capacity(blocks.len());
    for block in blocks {
        g1s.push(decode_g1(&block[..G1_LEN], Membership::Subgroup)?);
        g2s.push(decode_g2(&block[G1_LEN..], Membership::Subgroup)?);
    }

    multi_pairing_is_one(&g1s, &g2s)
}

fn multi_pairing_is_one(g1s: &[G1Affine], g2s: &[G2Affine]) -> Result<bool> {
    if g1s.len() != g2s.len() {
        return Err(Error::PairingInternalError("G1 and G2 counts differ"));
    }
    tracing::trace!(pairs = g1s.len(), "bn254 pairing");
    if g1s.is_empty() {
        return Ok(true);
    }

    Ok(Bn254::multi_pairing(g1s.iter().copied(), g2s.iter().copied()).0.is_one())
}

/// Decodes a canonical base field element from 32 big-endian bytes.
fn decode_fq(bytes: &[u8]) -> Result<Fq> {
    Fq::from_bigint(BigInt::new(be_bytes_to_limbs(bytes))).ok_or(Error::FieldElementNonCanonical)
}

/// Decodes a G1 point from [`G1_LEN`] bytes.
pub(crate) fn decode_g1(bytes: &[u8], membership: Membership) -> Result<G1Affine> {
    debug_assert_eq!(bytes.len(), G1_LEN);
    let x = decode_fq(&bytes[..FQ_LEN])?;
    let y = decode_fq(&bytes[FQ_LEN..])?;

    // (0, 0) is the identity point
    if x.is_zero() && y.is_zero() {
        return Ok(G1Affine::identity());
    }

    let p = G1Affine::new_unchecked(x, y);
    if !p.is_on_curve() {
        return Err(Error::PointNotOnCurve);
    }
    // cofactor 1: every point on the curve is in G1
    if membership == Membership::Subgroup && !p.is_in_correct_subgroup_assuming_on_curve() {
        return Err(Error::PointNotInSubgroup);
    }
    Ok(p)
}

/// Decodes a G2 point from [`G2_LEN`] bytes, imaginary part first.
pub(crate) fn decode_g2(bytes: &[u8], membership: Membership) -> Result<G2Affine> {
    debug_assert_eq!(bytes.len(), G2_LEN);
    let x = Fq2::new(decode_fq(&bytes[FQ_LEN..2 * FQ_LEN])?, decode_fq(&bytes[..FQ_LEN])?);
    let y = Fq2::new(decode_fq(&bytes[3 * FQ_LEN..])?, decode_fq(&bytes[2 * FQ_LEN..3 * FQ_LEN])?);

    if x.is_zero() && y.is_zero() {
        return Ok(G2Affine::identity());
    }

    let p = G2Affine::new_unchecked(x, y);
    if !p.is_on_curve() {
        return Err(Error::PointNotOnCurve);
    }
    if membership == Membership::Subgroup && !p.is_in_correct_subgroup_assuming_on_curve() {
        return Err(Error::PointNotInSubgroup);
    }
    Ok(p)
}

/// Encodes a G1 point as `x ‖ y`; the identity encodes as all zeros.
pub(crate) fn encode_g1(p: &G1Affine) -> Result<[u8; G1_LEN]> {
    let mut out = [0u8; G1_LEN];
    if !p.infinity {
        put_be(&mut out[..FQ_LEN], &p.x.into_bigint().to_bytes_be())?;
        put_be(&mut out[FQ_LEN..], &p.y.into_bigint().to_bytes_be())?;
    }
    Ok(out)
}

/// Converts up to 32 big-endian bytes into little-endian `u64` limbs.
fn be_bytes_to_limbs(bytes: &[u8]) -> [u64; 4] {
    debug_assert!(bytes.len() <= 32);
    let mut limbs = [0u64; 4];
    for (dst, chunk) in limbs.iter_mut().zip(bytes.rchunks(8)) {
        let mut word = [0u8; 8];
        word[8 - chunk.len()..].copy_from_slice(chunk);
        *dst = u64::from_be_bytes(word);
    }
    limbs
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{Bytes, hex};
    use rstest::rstest;

    const G1: [u8; 64] = hex!("00000000000000000000000000000000000000000000000000000000000000010000000000000000000000000000000000000000000000000000000000000002");
    const G1_NEG: [u8; 64] = hex!("000000000000000000000000000000000000000000000000000000000000000130644e72e131a029b85045b68181585d97816a916871ca8d3c208c16d87cfd45");
    const G1_DOUBLE: [u8; 64] = hex!("030644e72e131a029b85045b68181585d97816a916871ca8d3c208c16d87cfd315ed738c0e0a7c92e7845f96b2ae9c0a68a6a449e3538fc7ff3ebf7a5a18a2c4");
    const G2: [u8; 128] = hex!("198e9393920d483a7260bfb731fb5d25f1aa493335a9e71297e485b7aef312c21800deef121f1e76426a00665e5c4479674322d4f75edadd46debd5cd992f6ed090689d0585ff075ec9e99ad690c3395bc4b313370b38ef355acdadcd122975b12c85ea5db8c6deb4aab71808dcb408fe3d1e7690c43d37b4ce6cc0166fa7daa");

    #[rstest]
    #[rustfmt::skip]
    #[case::identity_both("00000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000", "00000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000", "00000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000")]
    #[case::identity_lhs("00000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000", "00000000000000000000000000000000000000000000000000000000000000010000000000000000000000000000000000000000000000000000000000000002", "00000000000000000000000000000000000000000000000000000000000000010000000000000000000000000000000000000000000000000000000000000002")]
    #[case::identity_rhs("00000000000000000000000000000000000000000000000000000000000000010000000000000000000000000000000000000000000000000000000000000002", "00000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000", "00000000000000000000000000000000000000000000000000000000000000010000000000000000000000000000000000000000000000000000000000000002")]
    #[case::inverse("00000000000000000000000000000000000000000000000000000000000000010000000000000000000000000000000000000000000000000000000000000002", "000000000000000000000000000000000000000000000000000000000000000130644e72e131a029b85045b68181585d97816a916871ca8d3c208c16d87cfd45", "00000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000")]
    #[case::double("00000000000000000000000000000000000000000000000000000000000000010000000000000000000000000000000000000000000000000000000000000002", "00000000000000000000000000000000000000000000000000000000000000010000000000000000000000000000000000000000000000000000000000000002", "030644e72e131a029b85045b68181585d97816a916871ca8d3c208c16d87cfd315ed738c0e0a7c92e7845f96b2ae9c0a68a6a449e3538fc7ff3ebf7a5a18a2c4")]
    fn add(#[case] p1: Bytes, #[case] p2: Bytes, #[case] expected: Bytes) {
        let input = [&p1[..], &p2[..]].concat();
        assert_eq!(g1_add(&input).unwrap().as_slice(), &expected[..]);
    }

    #[rstest]
    #[rustfmt::skip]
    #[case::not_on_curve("00000000000000000000000000000000000000000000000000000000000000010000000000000000000000000000000000000000000000000000000000000001", Error::PointNotOnCurve)]
    #[case::x_eq_p("30644e72e131a029b85045b68181585d97816a916871ca8d3c208c16d87cfd470000000000000000000000000000000000000000000000000000000000000002", Error::FieldElementNonCanonical)]
    #[case::y_gt_p("000000000000000000000000000000000000000000000000000000000000000130644e72e131a029b85045b68181585d97816a916871ca8d3c208c16d87cfd49", Error::FieldElementNonCanonical)]
    fn add_invalid(#[case] p: Bytes, #[case] err: Error) {
        let input = [&p[..], &G1].concat();
        assert_eq!(g1_add(&input), Err(err.clone()));
        let input = [G1.as_slice(), &p[..]].concat();
        assert_eq!(g1_add(&input), Err(err));
    }

    #[rstest]
    #[case::empty(0)]
    #[case::one_point(64)]
    #[case::ragged(100)]
    fn add_short_input_is_zero_extended(#[case] len: usize) {
        let full = [G1.as_slice(), &[0u8; 64]].concat();
        let mut expected = [0u8; 64];
        if len >= 64 {
            expected = G1;
        }
        assert_eq!(g1_add(&full[..len]), Ok(expected));
    }

    #[test]
    fn add_ignores_trailing_bytes() {
        let input = [G1.as_slice(), &G1, &[0xff; 17]].concat();
        assert_eq!(g1_add(&input), Ok(G1_DOUBLE));
    }

    #[rstest]
    #[rustfmt::skip]
    #[case::identity("00000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000", "0000000000000000000000000000000000000000000000000000000000000003", "00000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000")]
    #[case::zero_scalar("00000000000000000000000000000000000000000000000000000000000000010000000000000000000000000000000000000000000000000000000000000002", "0000000000000000000000000000000000000000000000000000000000000000", "00000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000")]
    #[case::scalar_one("00000000000000000000000000000000000000000000000000000000000000010000000000000000000000000000000000000000000000000000000000000002", "0000000000000000000000000000000000000000000000000000000000000001", "00000000000000000000000000000000000000000000000000000000000000010000000000000000000000000000000000000000000000000000000000000002")]
    #[case::scalar_two("00000000000000000000000000000000000000000000000000000000000000010000000000000000000000000000000000000000000000000000000000000002", "0000000000000000000000000000000000000000000000000000000000000002", "030644e72e131a029b85045b68181585d97816a916871ca8d3c208c16d87cfd315ed738c0e0a7c92e7845f96b2ae9c0a68a6a449e3538fc7ff3ebf7a5a18a2c4")]
    #[case::scalar_n("00000000000000000000000000000000000000000000000000000000000000010000000000000000000000000000000000000000000000000000000000000002", "30644e72e131a029b85045b68181585d2833e84879b9709143e1f593f0000001", "00000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000")]
    #[case::scalar_n_minus_1("00000000000000000000000000000000000000000000000000000000000000010000000000000000000000000000000000000000000000000000000000000002", "30644e72e131a029b85045b68181585d2833e84879b9709143e1f593f0000000", "000000000000000000000000000000000000000000000000000000000000000130644e72e131a029b85045b68181585d97816a916871ca8d3c208c16d87cfd45")]
    #[case::scalar_n_plus_2("00000000000000000000000000000000000000000000000000000000000000010000000000000000000000000000000000000000000000000000000000000002", "30644e72e131a029b85045b68181585d2833e84879b9709143e1f593f0000003", "030644e72e131a029b85045b68181585d97816a916871ca8d3c208c16d87cfd315ed738c0e0a7c92e7845f96b2ae9c0a68a6a449e3538fc7ff3ebf7a5a18a2c4")]
    fn mul(#[case] p: Bytes, #[case] scalar: Bytes, #[case] expected: Bytes) {
        let input = [&p[..], &scalar[..]].concat();
        assert_eq!(g1_mul(&input).unwrap().as_slice(), &expected[..]);
    }

    #[test]
    fn mul_short_scalar_is_right_padded() {
        // 0x02 followed by 31 implicit zero bytes is 2^249, not 2
        let short = [G1.as_slice(), &[0x02]].concat();
        let full = [G1.as_slice(), &hex!("0200000000000000000000000000000000000000000000000000000000000000")].concat();
        assert_eq!(g1_mul(&short), g1_mul(&full));
        assert_ne!(g1_mul(&short), Ok(G1_DOUBLE));
    }

    #[test]
    fn mul_not_on_curve() {
        let input = hex!("0000000000000000000000000000000000000000000000000000000000001234000000000000000000000000000000000000000000000000000000000000567800000000000000000000000000000000000000000000000000000000000000ff");
        assert_eq!(g1_mul(&input), Err(Error::PointNotOnCurve));
    }

    #[rstest]
    #[case::empty(Bytes::new(), true)]
    #[case::same_pair_twice([G1.as_slice(), &G2, &G1, &G2].concat().into(), false)]
    #[case::negated([G1.as_slice(), &G2, &G1_NEG, &G2].concat().into(), true)]
    #[case::identity_g1([[0u8; 64].as_slice(), &G2].concat().into(), true)]
    #[case::identity_g2([G1.as_slice(), &[0u8; 128]].concat().into(), true)]
    fn pairing(#[case] input: Bytes, #[case] expected: bool) {
        assert_eq!(pairing_check(&input), Ok(expected));
    }

    #[rstest]
    #[rustfmt::skip]
    #[case::g2_not_on_curve("0000000000000000000000000000000000000000000000000000000000000001000000000000000000000000000000000000000000000000000000000000000200000000000000000000000000000000000000000000000000000000000000030000000000000000000000000000000000000000000000000000000000000004", Error::PointNotOnCurve)]
    #[case::g2_not_in_subgroup("1382cd45e5674247f9c900b5c6f6cabbc189c2fabe2df0bf5acd84c97818f5081246178655ab8f2f26956b189894b7eb93cd4215b9937e7969e44305f80f521e08331c0a261a74e7e75db1232956663cbc88110f726159c5cba1857ecd03fa641fbf8045ce3e79b5cde4112d38bcd0efbdb1295d2eefdf58151ae309d7ded7db", Error::PointNotInSubgroup)]
    #[case::g2_non_canonical("30644e72e131a029b85045b68181585d97816a916871ca8d3c208c16d87cfd471800deef121f1e76426a00665e5c4479674322d4f75edadd46debd5cd992f6ed090689d0585ff075ec9e99ad690c3395bc4b313370b38ef355acdadcd122975b12c85ea5db8c6deb4aab71808dcb408fe3d1e7690c43d37b4ce6cc0166fa7daa", Error::FieldElementNonCanonical)]
    fn pairing_invalid_g2(#[case] g2: Bytes, #[case] err: Error) {
        let input = [G1.as_slice(), &g2[..]].concat();
        assert_eq!(pairing_check(&input), Err(err));
    }

    #[rstest]
    #[case::short(191)]
    #[case::ragged(193)]
    #[case::one_and_a_half(288)]
    fn pairing_invalid_length(#[case] len: usize) {
        let input = vec![0u8; len];
        assert_eq!(
            pairing_check(&input),
            Err(Error::InvalidInputLength("invalid input length for pairing"))
        );
    }

    #[test]
    fn pairing_count_mismatch() {
        let g1 = decode_g1(&G1, Membership::Subgroup).unwrap();
        assert!(matches!(multi_pairing_is_one(&[g1], &[]), Err(Error::PairingInternalError(_))));
    }

    #[test]
    fn decode_encode_g1() {
        let p = decode_g1(&G1_DOUBLE, Membership::Subgroup).unwrap();
        assert_eq!(encode_g1(&p), Ok(G1_DOUBLE));
    }

    #[test]
    fn be_bytes_to_limbs_short() {
        assert_eq!(be_bytes_to_limbs(&hex!("0102")), [0x0102, 0, 0, 0]);
        assert_eq!(be_bytes_to_limbs(&hex!("010000000000000002")), [2, 1, 0, 0]);
    }
}
