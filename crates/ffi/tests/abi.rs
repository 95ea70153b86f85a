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

//! Calls the C exports the way a host would: raw pointers, caller-zeroed output buffers and a
//! 256-byte error buffer.

use alloy_primitives::hex;
use ecp_core::{Error, ERROR_MESSAGE_CAPACITY};
use ecp_ffi::*;
use rstest::rstest;

const BN_G1: [u8; 64] = hex!("00000000000000000000000000000000000000000000000000000000000000010000000000000000000000000000000000000000000000000000000000000002");
const BN_G1_DOUBLE: [u8; 64] = hex!("030644e72e131a029b85045b68181585d97816a916871ca8d3c208c16d87cfd315ed738c0e0a7c92e7845f96b2ae9c0a68a6a449e3538fc7ff3ebf7a5a18a2c4");
const BLS_G1: [u8; 128] = hex!("0000000000000000000000000000000017f1d3a73197d7942695638c4fa9ac0fc3688c4f9774b905a14e3a3f171bac586c55e83ff97a1aeffb3af00adb22c6bb0000000000000000000000000000000008b3f481e3aaa0f1a09e30ed741d8ae4fcf5e095d5d00af600db18cb2c04b3edd03cc744a2888ae40caa232946c5e7e1");
const BLS_G1_DOUBLE: [u8; 128] = hex!("000000000000000000000000000000000572cbea904d67468808c8eb50a9450c9721db309128012543902d0ac358a62ae28f75bb8f1c7c42c39a8c5529bf0f4e00000000000000000000000000000000166a9d8cabc673a322fda673779d8e3822ba3ecb8670e461f73bb9021d5fd76a4c56d9d4cd16bd1bba86881979749d28");

type Export = unsafe extern "C" fn(*const u8, usize, *mut u8, usize, *mut u8, usize) -> i32;

struct Call {
    status: i32,
    output: Vec<u8>,
    message: String,
}

fn call(f: Export, input: &[u8], output_len: usize) -> Call {
    let mut output = vec![0u8; output_len];
    let mut error = [0u8; ERROR_MESSAGE_CAPACITY];
    // SAFETY: every pointer is valid for its length
    let status = unsafe {
        f(
            input.as_ptr(),
            input.len(),
            output.as_mut_ptr(),
            output.len(),
            error.as_mut_ptr(),
            error.len(),
        )
    };
    Call { status, output, message: message(&error) }
}

fn message(error: &[u8]) -> String {
    let len = error.iter().position(|&b| b == 0).unwrap();
    String::from_utf8(error[..len].to_vec()).unwrap()
}

#[test_log::test]
fn bn254_add() {
    let res = call(ecp_bn254_g1_add, &[BN_G1, BN_G1].concat(), 64);
    assert_eq!(res.status, 0);
    assert_eq!(res.output, BN_G1_DOUBLE);
    assert_eq!(res.message, "");
}

#[test_log::test]
fn bls12_add_wrong_length() {
    let res = call(ecp_bls12_g1_add, &[0u8; 100], 128);
    assert_eq!(res.status, Error::InvalidInputLength("").status());
    assert_eq!(res.output, [0u8; 128]);
    assert_eq!(res.message, "invalid input parameters, invalid input length for G1 addition");
}

#[test_log::test]
fn bls12_padding_error_message() {
    let mut input = [BLS_G1, BLS_G1].concat();
    input[3] = 1;
    let res = call(ecp_bls12_g1_add, &input, 128);
    assert_eq!(res.status, Error::MalformedPadding.status());
    assert_eq!(res.message, "invalid point: point is not left padded with zero");
}

#[rstest]
#[case::bn254(ecp_bn254_pairing_check as Export)]
#[case::bls12(ecp_bls12_pairing_check as Export)]
fn empty_pairing(#[case] f: Export) {
    let res = call(f, &[], 32);
    assert_eq!(res.status, 0);
    let mut expected = [0u8; 32];
    expected[31] = 1;
    assert_eq!(res.output, expected);
}

#[rstest]
#[case::bn254(ecp_bn254_g1_add as Export, 63)]
#[case::bls12(ecp_bls12_map_fp_to_g1 as Export, 64)]
fn output_too_small(#[case] f: Export, #[case] output_len: usize) {
    let res = call(f, &[0u8; 64], output_len);
    assert_eq!(res.status, Error::OutputEncodingOverflow { needed: 0, available: 0 }.status());
    assert!(res.message.starts_with("malformed output buffer parameter"));
}

#[test_log::test]
fn null_input_with_length() {
    let mut output = [0u8; 64];
    let mut error = [0u8; 64];
    // SAFETY: the null input is rejected before it is read
    let status = unsafe {
        ecp_bn254_g1_add(std::ptr::null(), 128, output.as_mut_ptr(), 64, error.as_mut_ptr(), 64)
    };
    assert_eq!(status, Error::InvalidInputLength("").status());
    assert_eq!(message(&error), "invalid input parameters, null input buffer");
}

#[test_log::test]
fn null_error_buffer() {
    let mut output = [0u8; 128];
    // SAFETY: a null error buffer is treated as empty
    let status = unsafe {
        ecp_bls12_g1_add([0u8; 10].as_ptr(), 10, output.as_mut_ptr(), 128, std::ptr::null_mut(), 256)
    };
    assert_eq!(status, Error::InvalidInputLength("").status());
}

#[test_log::test]
fn truncated_error_buffer() {
    let mut output = [0u8; 128];
    let mut error = [0xffu8; 8];
    // SAFETY: every pointer is valid for its length
    let status = unsafe {
        ecp_bls12_g1_add([0u8; 10].as_ptr(), 10, output.as_mut_ptr(), 128, error.as_mut_ptr(), 8)
    };
    assert_ne!(status, 0);
    assert_eq!(&error, b"invalid\0");
}

#[rstest]
#[case::tasks_default(0)]
#[case::tasks_negative(-3)]
#[case::tasks_two(2)]
fn msm(#[case] tasks: i32) {
    let mut scalar = [0u8; 32];
    scalar[31] = 1;
    let pair = [BLS_G1.as_slice(), &scalar].concat();
    let input = pair.repeat(2);
    let mut output = [0u8; 128];
    let mut error = [0u8; 256];
    // SAFETY: every pointer is valid for its length
    let status = unsafe {
        ecp_bls12_g1_msm(
            input.as_ptr(),
            input.len(),
            output.as_mut_ptr(),
            output.len(),
            error.as_mut_ptr(),
            error.len(),
            tasks,
        )
    };
    assert_eq!(status, 0);
    assert_eq!(output, BLS_G1_DOUBLE);
}

#[rstest]
#[case::add(1, [BN_G1, BN_G1].concat(), 0)]
#[case::mul(2, [BN_G1.as_slice(), &[2u8]].concat(), 0)]
#[case::unknown(9, Vec::new(), Error::UnsupportedOperation(9).status())]
fn eip196_dispatch(#[case] op: u8, #[case] input: Vec<u8>, #[case] status: i32) {
    let mut output = [0u8; 64];
    let mut error = [0u8; 256];
    // SAFETY: every pointer is valid for its length
    let res = unsafe {
        ecp_eip196_perform_operation(
            op,
            input.as_ptr(),
            input.len(),
            output.as_mut_ptr(),
            output.len(),
            error.as_mut_ptr(),
            error.len(),
        )
    };
    assert_eq!(res, status);
    if status != 0 {
        assert_eq!(message(&error), "unsupported operation 9");
        assert_eq!(output, [0u8; 64]);
    }
}

#[test_log::test]
fn eip2537_dispatch() {
    let input = [BLS_G1, BLS_G1].concat();
    let mut output = [0u8; 128];
    let mut error = [0u8; 256];
    // SAFETY: every pointer is valid for its length
    let status = unsafe {
        ecp_eip2537_perform_operation(
            1,
            input.as_ptr(),
            input.len(),
            output.as_mut_ptr(),
            output.len(),
            error.as_mut_ptr(),
            error.len(),
            0,
        )
    };
    assert_eq!(status, 0);
    assert_eq!(output, BLS_G1_DOUBLE);
}
