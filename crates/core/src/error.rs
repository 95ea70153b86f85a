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

//! Error taxonomy shared by every operation.

/// Alias for results produced by this crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Reasons an operation can be rejected.
///
/// Every variant maps to a stable, nonzero status code (see [`Error::status`]); `0` is reserved for
/// success.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The input does not have the length the operation requires.
    #[error("invalid input parameters, {0}")]
    InvalidInputLength(&'static str),
    /// A 64-byte BLS12-381 field slot does not start with 16 zero bytes.
    #[error("invalid point: point is not left padded with zero")]
    MalformedPadding,
    /// An encoded field element is not less than the field modulus.
    #[error("invalid fp: element is not in canonical form")]
    FieldElementNonCanonical,
    #[error("invalid point: point is not on curve")]
    PointNotOnCurve,
    #[error("invalid point: subgroup check failed")]
    PointNotInSubgroup,
    /// The caller's output buffer cannot hold the encoded result.
    #[error("malformed output buffer parameter: need {needed} bytes, have {available}")]
    OutputEncodingOverflow { needed: usize, available: usize },
    /// The pairing primitive was invoked with inconsistent arguments.
    #[error("pairing check failed: {0}")]
    PairingInternalError(&'static str),
    /// A dispatcher received a raw operation tag it does not know.
    #[error("unsupported operation {0}")]
    UnsupportedOperation(u8),
    /// The arithmetic backend panicked; the call was abandoned.
    #[error("internal error")]
    Internal,
}

impl Error {
    /// Returns the status code reported across the host boundary.
    pub const fn status(&self) -> i32 {
        match self {
            Error::InvalidInputLength(_) => 1,
            Error::MalformedPadding => 2,
            Error::FieldElementNonCanonical => 3,
            Error::PointNotOnCurve => 4,
            Error::PointNotInSubgroup => 5,
            Error::OutputEncodingOverflow { .. } => 6,
            Error::PairingInternalError(_) => 7,
            Error::UnsupportedOperation(_) => 8,
            Error::Internal => 9,
        }
    }
}
