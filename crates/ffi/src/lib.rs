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

//! C ABI for the elliptic-curve precompile operations.
//!
//! Every export takes `(input, input_len, output, output_len, error, error_len)` and returns `0` on
//! success or the nonzero status of [`ecp_core::Error`]. The output buffer must be zeroed by the
//! caller; on failure it is reset to zero and `error` receives a NUL-terminated message of at most
//! [`ecp_core::ERROR_MESSAGE_CAPACITY`] bytes. Panics never cross the boundary.

use ecp_core::{Error, MsmConfig, Operation, buffer::Output};
use std::panic::{AssertUnwindSafe, catch_unwind};

/// Views `len` bytes at `ptr`. A zero length yields an empty slice; a null pointer with a nonzero
/// length yields `None`.
///
/// # Safety
/// A non-null `ptr` must be valid for reads of `len` bytes for the lifetime `'a`.
unsafe fn input_slice<'a>(ptr: *const u8, len: usize) -> Option<&'a [u8]> {
    match (ptr.is_null(), len) {
        (_, 0) => Some(&[]),
        (true, _) => None,
        // SAFETY: upheld by the caller
        (false, _) => Some(unsafe { std::slice::from_raw_parts(ptr, len) }),
    }
}

/// Mutable counterpart of [`input_slice`]. A null pointer yields an empty slice.
///
/// # Safety
/// A non-null `ptr` must be valid for writes of `len` bytes for the lifetime `'a` and must not
/// alias any other buffer passed to the same call.
unsafe fn output_slice<'a>(ptr: *mut u8, len: usize) -> &'a mut [u8] {
    if ptr.is_null() || len == 0 {
        return &mut [];
    }
    // SAFETY: upheld by the caller
    unsafe { std::slice::from_raw_parts_mut(ptr, len) }
}

/// Shared body of every export.
///
/// # Safety
/// See [`input_slice`] and [`output_slice`].
#[allow(clippy::too_many_arguments)]
unsafe fn call(
    op: Result<Operation, Error>,
    input: *const u8,
    input_len: usize,
    output: *mut u8,
    output_len: usize,
    error: *mut u8,
    error_len: usize,
    tasks: i32,
) -> i32 {
    // SAFETY: upheld by the caller
    let (input, output, error) = unsafe {
        (
            input_slice(input, input_len),
            output_slice(output, output_len),
            output_slice(error, error_len),
        )
    };

    let (op, input) = match (op, input) {
        (Ok(op), Some(input)) => (op, input),
        (Err(err), _) => return ecp_core::report(Err(err), &mut Output::new(output), error),
        (Ok(_), None) => {
            let err = Error::InvalidInputLength("null input buffer");
            return ecp_core::report(Err(err), &mut Output::new(output), error);
        }
    };
    let config = MsmConfig::new(usize::try_from(tasks).unwrap_or(0));

    let result = catch_unwind(AssertUnwindSafe(|| {
        ecp_core::run(op, input, &mut *output, &mut *error, &config)
    }));
    result.unwrap_or_else(|_| {
        tracing::error!(%op, "operation panicked");
        ecp_core::report(Err(Error::Internal), &mut Output::new(output), error)
    })
}

/// Declares one C export per operation.
macro_rules! export {
    ($($(#[$meta:meta])* $name:ident => $op:expr;)*) => {$(
        $(#[$meta])*
        ///
        /// # Safety
        /// Each pointer must be null or valid for its length, and `output` and `error` must not
        /// overlap any other argument.
        #[unsafe(no_mangle)]
        pub unsafe extern "C" fn $name(
            input: *const u8,
            input_len: usize,
            output: *mut u8,
            output_len: usize,
            error: *mut u8,
            error_len: usize,
        ) -> i32 {
            // SAFETY: upheld by the caller
            unsafe { call(Ok($op), input, input_len, output, output_len, error, error_len, 0) }
        }
    )*};
}

/// Declares one C export per multi-scalar multiplication, with a trailing parallelism hint.
macro_rules! export_msm {
    ($($(#[$meta:meta])* $name:ident => $op:expr;)*) => {$(
        $(#[$meta])*
        ///
        /// `tasks` bounds the number of parallel chunks; `0` or a negative value uses every
        /// available thread.
        ///
        /// # Safety
        /// Each pointer must be null or valid for its length, and `output` and `error` must not
        /// overlap any other argument.
        #[unsafe(no_mangle)]
        pub unsafe extern "C" fn $name(
            input: *const u8,
            input_len: usize,
            output: *mut u8,
            output_len: usize,
            error: *mut u8,
            error_len: usize,
            tasks: i32,
        ) -> i32 {
            // SAFETY: upheld by the caller
            unsafe { call(Ok($op), input, input_len, output, output_len, error, error_len, tasks) }
        }
    )*};
}

export! {
    /// BN254 G1 addition: up to 128 input bytes, 64 output bytes.
    ecp_bn254_g1_add => Operation::Bn254G1Add;
    /// BN254 G1 scalar multiplication: up to 96 input bytes, 64 output bytes.
    ecp_bn254_g1_mul => Operation::Bn254G1Mul;
    /// BN254 pairing check: `n*192` input bytes, 32 output bytes.
    ecp_bn254_pairing_check => Operation::Bn254Pairing;
    /// BLS12-381 G1 addition: 256 input bytes, 128 output bytes.
    ecp_bls12_g1_add => Operation::Bls12G1Add;
    /// BLS12-381 G1 scalar multiplication: 160 input bytes, 128 output bytes.
    ecp_bls12_g1_mul => Operation::Bls12G1Mul;
    /// BLS12-381 G2 addition: 512 input bytes, 256 output bytes.
    ecp_bls12_g2_add => Operation::Bls12G2Add;
    /// BLS12-381 G2 scalar multiplication: 288 input bytes, 256 output bytes.
    ecp_bls12_g2_mul => Operation::Bls12G2Mul;
    /// BLS12-381 pairing check: `n*384` input bytes, 32 output bytes.
    ecp_bls12_pairing_check => Operation::Bls12Pairing;
    /// BLS12-381 Fp to G1 mapping: 64 input bytes, 128 output bytes.
    ecp_bls12_map_fp_to_g1 => Operation::Bls12MapFpToG1;
    /// BLS12-381 Fp2 to G2 mapping: 128 input bytes, 256 output bytes.
    ecp_bls12_map_fp2_to_g2 => Operation::Bls12MapFp2ToG2;
    /// BLS12-381 G1 on-curve query: 128 input bytes, 32 output bytes.
    ecp_bls12_g1_is_on_curve => Operation::Bls12G1IsOnCurve;
    /// BLS12-381 G1 subgroup query: 128 input bytes, 32 output bytes.
    ecp_bls12_g1_is_in_subgroup => Operation::Bls12G1IsInSubgroup;
    /// BLS12-381 G2 on-curve query: 256 input bytes, 32 output bytes.
    ecp_bls12_g2_is_on_curve => Operation::Bls12G2IsOnCurve;
    /// BLS12-381 G2 subgroup query: 256 input bytes, 32 output bytes.
    ecp_bls12_g2_is_in_subgroup => Operation::Bls12G2IsInSubgroup;
}

export_msm! {
    /// BLS12-381 G1 multi-scalar multiplication: `n*160` input bytes, 128 output bytes.
    ecp_bls12_g1_msm => Operation::Bls12G1MultiExp;
    /// BLS12-381 G2 multi-scalar multiplication: `n*288` input bytes, 256 output bytes.
    ecp_bls12_g2_msm => Operation::Bls12G2MultiExp;
}

/// Dispatches an EIP-196 operation by raw tag: `1` add, `2` mul, `3` pairing.
///
/// # Safety
/// Each pointer must be null or valid for its length, and `output` and `error` must not overlap
/// any other argument.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn ecp_eip196_perform_operation(
    op: u8,
    input: *const u8,
    input_len: usize,
    output: *mut u8,
    output_len: usize,
    error: *mut u8,
    error_len: usize,
) -> i32 {
    let op = Operation::from_eip196(op);
    // SAFETY: upheld by the caller
    unsafe { call(op, input, input_len, output, output_len, error, error_len, 0) }
}

/// Dispatches an EIP-2537 operation by raw tag: `1` G1 add, `2` G1 MSM, `3` G2 add, `4` G2 MSM,
/// `5` pairing, `6` map Fp to G1, `7` map Fp2 to G2.
///
/// # Safety
/// Each pointer must be null or valid for its length, and `output` and `error` must not overlap
/// any other argument.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn ecp_eip2537_perform_operation(
    op: u8,
    input: *const u8,
    input_len: usize,
    output: *mut u8,
    output_len: usize,
    error: *mut u8,
    error_len: usize,
    tasks: i32,
) -> i32 {
    let op = Operation::from_eip2537(op);
    // SAFETY: upheld by the caller
    unsafe { call(op, input, input_len, output, output_len, error, error_len, tasks) }
}
