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

//! Safe wrappers around the `blst` primitives used by the BLS12-381 operations.

use crate::{Error, Result};
use blst::{
    MultiPoint, blst_final_exp, blst_fp, blst_fp2, blst_fp12, blst_fp12_is_one, blst_fp12_mul,
    blst_map_to_g1, blst_map_to_g2, blst_miller_loop, blst_p1, blst_p1_add_or_double,
    blst_p1_affine, blst_p1_affine_in_g1, blst_p1_affine_is_inf, blst_p1_affine_on_curve,
    blst_p1_from_affine, blst_p1_mult, blst_p1_to_affine, blst_p2, blst_p2_add_or_double,
    blst_p2_affine, blst_p2_affine_in_g2, blst_p2_affine_is_inf, blst_p2_affine_on_curve,
    blst_p2_from_affine, blst_p2_mult, blst_p2_to_affine, blst_scalar,
};
use rayon::prelude::*;

/// Scalar width in bits; scalars are used unreduced.
const SCALAR_BITS: usize = 256;
const SCALAR_BYTES: usize = SCALAR_BITS / 8;

/// Group operations shared by G1 and G2.
///
/// Scalars are taken by reference. `blst_scalar` zeroizes on drop and is `Clone` but not `Copy`,
/// so batching moves clones of them into owned buffers.
pub(crate) trait Group {
    /// Affine point as exchanged with callers.
    type Affine: Copy + Default + Send + Sync;
    /// Jacobian point used for intermediate results.
    type Point: Copy + Default + Send;

    const NAME: &'static str;

    fn is_inf(p: &Self::Affine) -> bool;
    fn on_curve(p: &Self::Affine) -> bool;
    fn in_group(p: &Self::Affine) -> bool;
    fn from_affine(p: &Self::Affine) -> Self::Point;
    fn to_affine(p: &Self::Point) -> Self::Affine;
    /// Adds two Jacobian points, handling equal inputs and the identity.
    fn add(a: &Self::Point, b: &Self::Point) -> Self::Point;
    fn mul(p: &Self::Affine, scalar: &blst_scalar) -> Self::Point;
    /// Pippenger multi-scalar multiplication. `points` must be non-empty and free of the identity,
    /// `scalars` holds one little-endian 32-byte scalar per point.
    fn pippenger(points: &[Self::Affine], scalars: &[u8]) -> Self::Point;
}

/// The BLS12-381 G1 group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum G1 {}

/// The BLS12-381 G2 group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum G2 {}

impl Group for G1 {
    type Affine = blst_p1_affine;
    type Point = blst_p1;

    const NAME: &'static str = "G1";

    #[inline]
    fn is_inf(p: &blst_p1_affine) -> bool {
        // SAFETY: argument is a valid blst type
        unsafe { blst_p1_affine_is_inf(p) }
    }

    #[inline]
    fn on_curve(p: &blst_p1_affine) -> bool {
        // SAFETY: argument is a valid blst type
        unsafe { blst_p1_affine_on_curve(p) }
    }

    #[inline]
    fn in_group(p: &blst_p1_affine) -> bool {
        // SAFETY: argument is a valid blst type
        unsafe { blst_p1_affine_in_g1(p) }
    }

    #[inline]
    fn from_affine(p: &blst_p1_affine) -> blst_p1 {
        let mut out = blst_p1::default();
        // SAFETY: both inputs are valid blst types
        unsafe { blst_p1_from_affine(&mut out, p) };
        out
    }

    #[inline]
    fn to_affine(p: &blst_p1) -> blst_p1_affine {
        let mut out = blst_p1_affine::default();
        // SAFETY: both inputs are valid blst types
        unsafe { blst_p1_to_affine(&mut out, p) };
        out
    }

    #[inline]
    fn add(a: &blst_p1, b: &blst_p1) -> blst_p1 {
        let mut out = blst_p1::default();
        // SAFETY: all inputs are valid blst types
        unsafe { blst_p1_add_or_double(&mut out, a, b) };
        out
    }

    #[inline]
    fn mul(p: &blst_p1_affine, scalar: &blst_scalar) -> blst_p1 {
        let mut out = blst_p1::default();
        // SAFETY: all inputs are valid blst types, the scalar holds exactly SCALAR_BITS bits
        unsafe { blst_p1_mult(&mut out, &Self::from_affine(p), scalar.b.as_ptr(), SCALAR_BITS) };
        out
    }

    #[inline]
    fn pippenger(points: &[blst_p1_affine], scalars: &[u8]) -> blst_p1 {
        points.mult(scalars, SCALAR_BITS)
    }
}

impl Group for G2 {
    type Affine = blst_p2_affine;
    type Point = blst_p2;

    const NAME: &'static str = "G2";

    #[inline]
    fn is_inf(p: &blst_p2_affine) -> bool {
        // SAFETY: argument is a valid blst type
        unsafe { blst_p2_affine_is_inf(p) }
    }

    #[inline]
    fn on_curve(p: &blst_p2_affine) -> bool {
        // SAFETY: argument is a valid blst type
        unsafe { blst_p2_affine_on_curve(p) }
    }

    #[inline]
    fn in_group(p: &blst_p2_affine) -> bool {
        // SAFETY: argument is a valid blst type
        unsafe { blst_p2_affine_in_g2(p) }
    }

    #[inline]
    fn from_affine(p: &blst_p2_affine) -> blst_p2 {
        let mut out = blst_p2::default();
        // SAFETY: both inputs are valid blst types
        unsafe { blst_p2_from_affine(&mut out, p) };
        out
    }

    #[inline]
    fn to_affine(p: &blst_p2) -> blst_p2_affine {
        let mut out = blst_p2_affine::default();
        // SAFETY: both inputs are valid blst types
        unsafe { blst_p2_to_affine(&mut out, p) };
        out
    }

    #[inline]
    fn add(a: &blst_p2, b: &blst_p2) -> blst_p2 {
        let mut out = blst_p2::default();
        // SAFETY: all inputs are valid blst types
        unsafe { blst_p2_add_or_double(&mut out, a, b) };
        out
    }

    #[inline]
    fn mul(p: &blst_p2_affine, scalar: &blst_scalar) -> blst_p2 {
        let mut out = blst_p2::default();
        // SAFETY: all inputs are valid blst types, the scalar holds exactly SCALAR_BITS bits
        unsafe { blst_p2_mult(&mut out, &Self::from_affine(p), scalar.b.as_ptr(), SCALAR_BITS) };
        out
    }

    #[inline]
    fn pippenger(points: &[blst_p2_affine], scalars: &[u8]) -> blst_p2 {
        points.mult(scalars, SCALAR_BITS)
    }
}

/// Adds two affine points.
pub(crate) fn add<G: Group>(a: &G::Affine, b: &G::Affine) -> G::Affine {
    G::to_affine(&G::add(&G::from_affine(a), &G::from_affine(b)))
}

/// Multiplies an affine point by an unreduced scalar.
pub(crate) fn mul<G: Group>(p: &G::Affine, scalar: &blst_scalar) -> G::Affine {
    G::to_affine(&G::mul(p, scalar))
}

/// Computes `Σ sᵢ·Pᵢ`, picking the evaluation strategy from the number of pairs.
///
/// One pair is a single multiplication and two pairs are two multiplications plus an addition.
/// Larger batches run Pippenger over at most `tasks` chunks in parallel.
pub(crate) fn msm<G: Group>(pairs: &[(G::Affine, blst_scalar)], tasks: usize) -> G::Affine {
    match pairs {
        [] => G::Affine::default(),
        [(p, s)] => {
            tracing::trace!(group = G::NAME, pairs = 1, path = "mul", "msm");
            mul::<G>(p, s)
        }
        [(p, s), (q, t)] => {
            tracing::trace!(group = G::NAME, pairs = 2, path = "mul-add", "msm");
            G::to_affine(&G::add(&G::mul(p, s), &G::mul(q, t)))
        }
        _ => pippenger::<G>(pairs, tasks),
    }
}

fn pippenger<G: Group>(pairs: &[(G::Affine, blst_scalar)], tasks: usize) -> G::Affine {
    // blst's batch API cannot take the point at infinity
    let pairs: Vec<_> = pairs.iter().filter(|(p, _)| !G::is_inf(p)).cloned().collect();
    if pairs.is_empty() {
        return G::Affine::default();
    }

    let chunk = chunk_len(pairs.len(), tasks);
    tracing::trace!(
        group = G::NAME,
        points = pairs.len(),
        tasks,
        chunk,
        path = "pippenger",
        "msm"
    );

    let sum = if chunk == pairs.len() {
        sum_chunk::<G>(&pairs)
    } else {
        pairs
            .par_chunks(chunk)
            .map(sum_chunk::<G>)
            .reduce(<G::Point as Default>::default, |a, b| G::add(&a, &b))
    };
    G::to_affine(&sum)
}

/// Number of points per parallel chunk, so that at most `tasks` chunks cover `points` points.
fn chunk_len(points: usize, tasks: usize) -> usize {
    points.div_ceil(tasks.clamp(1, points.max(1)))
}

/// Sums one chunk of identity-free pairs; a single pair skips the bucket method.
fn sum_chunk<G: Group>(pairs: &[(G::Affine, blst_scalar)]) -> G::Point {
    if let [(p, s)] = pairs {
        return G::mul(p, s);
    }
    let mut points = Vec::with_capacity(pairs.len());
    let mut scalars = Vec::with_capacity(pairs.len() * SCALAR_BYTES);
    for (p, s) in pairs {
        points.push(*p);
        scalars.extend_from_slice(&s.b);
    }
    G::pippenger(&points, &scalars)
}

/// Maps a field element to G1 with the simplified SWU map and cofactor clearing.
pub(crate) fn map_fp_to_g1(fp: &blst_fp) -> blst_p1_affine {
    let mut p = blst_p1::default();
    // SAFETY: `p` and `fp` are blst values, the third argument is unused if null
    unsafe { blst_map_to_g1(&mut p, fp, core::ptr::null()) };
    G1::to_affine(&p)
}

/// Maps an Fp2 element to G2 with the simplified SWU map and cofactor clearing.
pub(crate) fn map_fp2_to_g2(fp2: &blst_fp2) -> blst_p2_affine {
    let mut p = blst_p2::default();
    // SAFETY: `p` and `fp2` are blst values, the third argument is unused if null
    unsafe { blst_map_to_g2(&mut p, fp2, core::ptr::null()) };
    G2::to_affine(&p)
}

/// Returns whether `Π e(g1s[i], g2s[i])` is the identity of the target group.
///
/// Pairs containing the point at infinity must be removed by the caller.
pub(crate) fn pairing_check(g1s: &[blst_p1_affine], g2s: &[blst_p2_affine]) -> Result<bool> {
    if g1s.len() != g2s.len() {
        return Err(Error::PairingInternalError("G1 and G2 counts differ"));
    }
    tracing::trace!(pairs = g1s.len(), "bls12-381 pairing");

    let mut pairs = g1s.iter().zip(g2s);
    let Some((g1, g2)) = pairs.next() else {
        return Ok(true);
    };
    let mut acc = miller_loop(g1, g2);
    for (g1, g2) in pairs {
        let ml = miller_loop(g1, g2);
        let mut prod = blst_fp12::default();
        // SAFETY: all arguments are valid blst types
        unsafe { blst_fp12_mul(&mut prod, &acc, &ml) };
        acc = prod;
    }

    let mut result = blst_fp12::default();
    // SAFETY: all arguments are valid blst types
    unsafe { blst_final_exp(&mut result, &acc) };
    // SAFETY: argument is a valid blst type
    Ok(unsafe { blst_fp12_is_one(&result) })
}

#[inline]
fn miller_loop(g1: &blst_p1_affine, g2: &blst_p2_affine) -> blst_fp12 {
    let mut out = blst_fp12::default();
    // SAFETY: all arguments are valid blst types
    unsafe { blst_miller_loop(&mut out, g2, g1) };
    out
}
