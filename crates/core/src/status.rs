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

//! Status-code convention of the host boundary.
//!
//! A call returns [`SUCCESS`] and leaves the error buffer untouched, or returns the nonzero
//! [`Error::status`] of the failure, zeroes the output buffer and writes a NUL-terminated message
//! into the error buffer.

use crate::{MsmConfig, Operation, Result, buffer::Output};

pub const SUCCESS: i32 = 0;

/// Upper bound on the message bytes written to an error buffer, terminator included.
pub const ERROR_MESSAGE_CAPACITY: usize = 256;

/// Runs `op` over caller-owned buffers and reports the outcome as a status code.
pub fn run(
    op: Operation,
    input: &[u8],
    output: &mut [u8],
    error: &mut [u8],
    config: &MsmConfig,
) -> i32 {
    let _guard = tracing::debug_span!("run", %op, len = input.len()).entered();
    let mut output = Output::new(output);
    let result = op.execute(input, &mut output, config);
    report(result, &mut output, error)
}

/// Maps an operation result onto the status-code convention.
pub fn report(result: Result<()>, output: &mut Output<'_>, error: &mut [u8]) -> i32 {
    match result {
        Ok(()) => SUCCESS,
        Err(err) => {
            tracing::debug!(code = err.status(), %err, "operation failed");
            output.clear();
            write_message(error, &err.to_string());
            err.status()
        }
    }
}

/// Copies `message` into `error` followed by a NUL byte, truncating it to fit both the buffer and
/// [`ERROR_MESSAGE_CAPACITY`]. Returns the number of message bytes written.
pub fn write_message(error: &mut [u8], message: &str) -> usize {
    let Some(room) = error.len().min(ERROR_MESSAGE_CAPACITY).checked_sub(1) else {
        return 0;
    };
    let len = message.len().min(room);
    error[..len].copy_from_slice(&message.as_bytes()[..len]);
    error[len] = 0;
    len
}
