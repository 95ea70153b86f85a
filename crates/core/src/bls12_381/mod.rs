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

//! BLS12-381 precompile operations.
//!
//! Implements [EIP-2537](https://eips.ethereum.org/EIPS/eip-2537) plus standalone point validation
//! queries.

mod arith;
mod codec;

pub use codec::{FP_LEN, G1_LEN, G2_LEN, PADDED_FP_LEN, PADDED_FP2_LEN, PADDING_LEN, SCALAR_LEN};

use crate::{Error, Membership, MsmConfig, Result, buffer::Input};
use arith::{G1, G2, Group};
use codec::Codec;

pub const G1_ADD_INPUT_LEN: usize = 2 * G1_LEN;
pub const G1_MUL_INPUT_LEN: usize = G1_LEN + SCALAR_LEN;
pub const G2_ADD_INPUT_LEN: usize = 2 * G2_LEN;
pub const G2_MUL_INPUT_LEN: usize = G2_LEN + SCALAR_LEN;
pub const PAIR_LEN: usize = G1_LEN + G2_LEN;

pub fn g1_add(input: &[u8]) -> Result<[u8; G1_LEN]> {
    codec::encode_g1(&add::<G1>(input, "invalid input length for G1 addition")?)
}

pub fn g2_add(input: &[u8]) -> Result<[u8; G2_LEN]> {
    codec::encode_g2(&add::<G2>(input, "invalid input length for G2 addition")?)
}

pub fn g1_mul(input: &[u8]) -> Result<[u8; G1_LEN]> {
    codec::encode_g1(&mul::<G1>(input, "invalid input length for G1 multiplication")?)
}

pub fn g2_mul(input: &[u8]) -> Result<[u8; G2_LEN]> {
    codec::encode_g2(&mul::<G2>(input, "invalid input length for G2 multiplication")?)
}

/// G1 multi-scalar multiplication over `n ≥ 1` concatenated `(point, scalar)` pairs.
pub fn g1_msm(input: &[u8], config: &MsmConfig) -> Result<[u8; G1_LEN]> {
    codec::encode_g1(&msm::<G1>(input, config, "invalid input length for G1 multiplication")?)
}

/// G2 multi-scalar multiplication over `n ≥ 1` concatenated `(point, scalar)` pairs.
pub fn g2_msm(input: &[u8], config: &MsmConfig) -> Result<[u8; G2_LEN]> {
    codec::encode_g2(&msm::<G2>(input, config, "invalid input length for G2 multiplication")?)
}

/// Pairing check over `n` concatenated `(G1, G2)` pairs.
///
/// Pairs with an identity member contribute the unit and are dropped after validation; empty input
/// returns `true`.
pub fn pairing_check(input: &[u8]) -> Result<bool> {
    let blocks = Input::new(input).blocks(PAIR_LEN, "invalid input length for pairing")?;

    let mut g1s = Vec::with_capacity(blocks.len());
    let mut g2s = Vec::with_capacity(blocks.len());
    for block in blocks {
        let g1 = codec::decode_g1(&block[..G1_LEN], Membership::Subgroup)?;
        let g2 = codec::decode_g2(&block[G1_LEN..], Membership::Subgroup)?;
        if G1::is_inf(&g1) || G2::is_inf(&g2) {
            continue;
        }
        g1s.push(g1);
        g2s.push(g2);
    }

    arith::pairing_check(&g1s, &g2s)
}

/// Maps a base field element onto G1.
pub fn map_fp_to_g1(input: &[u8]) -> Result<[u8; G1_LEN]> {
    let input = Input::new(input)
        .exact(PADDED_FP_LEN, "invalid input length for Fp to G1 to curve mapping")?;
    let fp = codec::decode_fp(input)?;
    codec::encode_g1(&arith::map_fp_to_g1(&fp))
}

/// Maps an Fp2 element `c0 ‖ c1` onto G2.
pub fn map_fp2_to_g2(input: &[u8]) -> Result<[u8; G2_LEN]> {
    let input = Input::new(input)
        .exact(PADDED_FP2_LEN, "invalid input length for Fp2 to G2 to curve mapping")?;
    let fp2 = codec::decode_fp2(input)?;
    codec::encode_g2(&arith::map_fp2_to_g2(&fp2))
}

/// Returns whether an encoded G1 point lies on the curve.
///
/// Malformed encodings are still errors; only a failed curve equation yields `false`.
pub fn g1_is_on_curve(input: &[u8]) -> Result<bool> {
    query::<G1>(input, Membership::Curve, "invalid input length for G1 point validation")
}

/// Returns whether an encoded G1 point lies on the curve and in the prime-order subgroup.
pub fn g1_is_in_subgroup(input: &[u8]) -> Result<bool> {
    query::<G1>(input, Membership::Subgroup, "invalid input length for G1 point validation")
}

pub fn g2_is_on_curve(input: &[u8]) -> Result<bool> {
    query::<G2>(input, Membership::Curve, "invalid input length for G2 point validation")
}

pub fn g2_is_in_subgroup(input: &[u8]) -> Result<bool> {
    query::<G2>(input, Membership::Subgroup, "invalid input length for G2 point validation")
}

fn add<G: Codec>(input: &[u8], context: &'static str) -> Result<G::Affine> {
    let input = Input::new(input).exact(2 * G::LEN, context)?;
    let a = G::decode(&input[..G::LEN], Membership::Curve)?;
    let b = G::decode(&input[G::LEN..], Membership::Curve)?;
    Ok(arith::add::<G>(&a, &b))
}

fn mul<G: Codec>(input: &[u8], context: &'static str) -> Result<G::Affine> {
    let input = Input::new(input).exact(G::LEN + SCALAR_LEN, context)?;
    let p = G::decode(&input[..G::LEN], Membership::Subgroup)?;
    let scalar = codec::decode_scalar(&input[G::LEN..])?;
    Ok(arith::mul::<G>(&p, &scalar))
}

fn msm<G: Codec>(input: &[u8], config: &MsmConfig, context: &'static str) -> Result<G::Affine> {
    let input = Input::new(input);
    if input.is_empty() {
        return Err(Error::InvalidInputLength("invalid number of pairs"));
    }

    let pairs = input
        .blocks(G::LEN + SCALAR_LEN, context)?
        .map(|block| {
            let p = G::decode(&block[..G::LEN], Membership::Subgroup)?;
            let scalar = codec::decode_scalar(&block[G::LEN..])?;
            Ok((p, scalar))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(arith::msm::<G>(&pairs, config.effective_tasks()))
}

fn query<G: Codec>(input: &[u8], membership: Membership, context: &'static str) -> Result<bool> {
    let input = Input::new(input).exact(G::LEN, context)?;
    match G::decode(input, membership) {
        Ok(_) => Ok(true),
        Err(Error::PointNotOnCurve | Error::PointNotInSubgroup) => Ok(false),
        Err(err) => Err(err),
    }
}
