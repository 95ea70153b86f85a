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

//! EIP-2537 wire encoding: 64-byte field slots with 16 bytes of zero padding.

use super::arith::{G1, G2, Group};
use crate::{Error, Membership, Result, buffer::put_be};
use alloy_primitives::hex;
use blst::{
    blst_bendian_from_fp, blst_fp, blst_fp_from_bendian, blst_fp2, blst_p1_affine, blst_p2_affine,
    blst_scalar, blst_scalar_from_bendian,
};

/// Width of a big-endian base field element.
pub const FP_LEN: usize = 48;
/// Width of the zero padding in front of each field element.
pub const PADDING_LEN: usize = 16;
/// Width of an encoded field slot.
pub const PADDED_FP_LEN: usize = PADDING_LEN + FP_LEN;
/// Width of an encoded Fp2 element: `c0 ‖ c1`.
pub const PADDED_FP2_LEN: usize = 2 * PADDED_FP_LEN;
/// Width of an encoded G1 point: `x ‖ y`.
pub const G1_LEN: usize = 2 * PADDED_FP_LEN;
/// Width of an encoded G2 point: `x.c0 ‖ x.c1 ‖ y.c0 ‖ y.c1`.
pub const G2_LEN: usize = 2 * PADDED_FP2_LEN;
/// Width of an encoded scalar.
pub const SCALAR_LEN: usize = 32;

/// Base field modulus p, big-endian.
const MODULUS: [u8; FP_LEN] = hex!(
    "1a0111ea397fe69a4b1ba7b6434bacd764774b84f38512bf6730d2a0f6b0f6241eabfffeb153ffffb9feffffffffaaab"
);

/// Fixed-width encoding of a group's affine points.
pub(crate) trait Codec: Group {
    const LEN: usize;

    /// Decodes a point from [`Self::LEN`] bytes, applying the requested membership check.
    fn decode(bytes: &[u8], membership: Membership) -> Result<Self::Affine>;
}

impl Codec for G1 {
    const LEN: usize = G1_LEN;

    fn decode(bytes: &[u8], membership: Membership) -> Result<blst_p1_affine> {
        decode_g1(bytes, membership)
    }
}

impl Codec for G2 {
    const LEN: usize = G2_LEN;

    fn decode(bytes: &[u8], membership: Membership) -> Result<blst_p2_affine> {
        decode_g2(bytes, membership)
    }
}

/// Decodes a padded base field element from [`PADDED_FP_LEN`] bytes.
///
/// The padding is checked before the value, so a slot that is both badly padded and
/// non-canonical reports [`Error::MalformedPadding`].
pub(crate) fn decode_fp(slot: &[u8]) -> Result<blst_fp> {
    let Some((padding, fp)) = slot.split_first_chunk::<PADDING_LEN>() else {
        return Err(Error::MalformedPadding);
    };
    if padding.iter().any(|&b| b != 0) {
        return Err(Error::MalformedPadding);
    }
    let fp: &[u8; FP_LEN] = fp.try_into().map_err(|_| Error::MalformedPadding)?;
    // equal-width big-endian byte strings order like the integers they encode
    if fp >= &MODULUS {
        return Err(Error::FieldElementNonCanonical);
    }

    let mut out = blst_fp::default();
    // SAFETY: `fp` is exactly FP_LEN bytes
    unsafe { blst_fp_from_bendian(&mut out, fp.as_ptr()) };
    Ok(out)
}

/// Decodes an Fp2 element `c0 ‖ c1` from [`PADDED_FP2_LEN`] bytes.
pub(crate) fn decode_fp2(bytes: &[u8]) -> Result<blst_fp2> {
    debug_assert_eq!(bytes.len(), PADDED_FP2_LEN);
    let c0 = decode_fp(&bytes[..PADDED_FP_LEN])?;
    let c1 = decode_fp(&bytes[PADDED_FP_LEN..])?;
    Ok(blst_fp2 { fp: [c0, c1] })
}

/// Decodes a 32-byte big-endian scalar. Every value is accepted.
pub(crate) fn decode_scalar(bytes: &[u8]) -> Result<blst_scalar> {
    let bytes: &[u8; SCALAR_LEN] =
        bytes.try_into().map_err(|_| Error::InvalidInputLength("invalid scalar length"))?;
    let mut out = blst_scalar::default();
    // SAFETY: `bytes` is exactly SCALAR_LEN bytes
    unsafe { blst_scalar_from_bendian(&mut out, bytes.as_ptr()) };
    Ok(out)
}

pub(crate) fn decode_g1(bytes: &[u8], membership: Membership) -> Result<blst_p1_affine> {
    debug_assert_eq!(bytes.len(), G1_LEN);
    let x = decode_fp(&bytes[..PADDED_FP_LEN])?;
    let y = decode_fp(&bytes[PADDED_FP_LEN..])?;
    let p = blst_p1_affine { x, y };

    check::<G1>(&p, bytes, membership)?;
    Ok(p)
}

pub(crate) fn decode_g2(bytes: &[u8], membership: Membership) -> Result<blst_p2_affine> {
    debug_assert_eq!(bytes.len(), G2_LEN);
    let x = decode_fp2(&bytes[..PADDED_FP2_LEN])?;
    let y = decode_fp2(&bytes[PADDED_FP2_LEN..])?;
    let p = blst_p2_affine { x, y };

    check::<G2>(&p, bytes, membership)?;
    Ok(p)
}

fn check<G: Group>(p: &G::Affine, encoded: &[u8], membership: Membership) -> Result<()> {
    // all zeros is the point at infinity
    if encoded.iter().all(|&b| b == 0) {
        return Ok(());
    }
    if !G::on_curve(p) {
        return Err(Error::PointNotOnCurve);
    }
    if membership == Membership::Subgroup && !G::in_group(p) {
        return Err(Error::PointNotInSubgroup);
    }
    Ok(())
}

/// Writes a base field element right-aligned into a [`PADDED_FP_LEN`] slot.
fn encode_fp(fp: &blst_fp, slot: &mut [u8]) -> Result<()> {
    let mut be = [0u8; FP_LEN];
    // SAFETY: `be` is exactly FP_LEN bytes
    unsafe { blst_bendian_from_fp(be.as_mut_ptr(), fp) };
    put_be(slot, &be)
}

pub(crate) fn encode_g1(p: &blst_p1_affine) -> Result<[u8; G1_LEN]> {
    let mut out = [0u8; G1_LEN];
    let (x, y) = out.split_at_mut(PADDED_FP_LEN);
    encode_fp(&p.x, x)?;
    encode_fp(&p.y, y)?;
    Ok(out)
}

pub(crate) fn encode_g2(p: &blst_p2_affine) -> Result<[u8; G2_LEN]> {
    let mut out = [0u8; G2_LEN];
    let coords = [&p.x.fp[0], &p.x.fp[1], &p.y.fp[0], &p.y.fp[1]];
    for (slot, fp) in out.chunks_exact_mut(PADDED_FP_LEN).zip(coords) {
        encode_fp(fp, slot)?;
    }
    Ok(out)
}
