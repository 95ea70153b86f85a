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

//! Byte-level protocol layer for the Ethereum elliptic-curve precompiles.
//!
//! Covers BN254 ([EIP-196](https://eips.ethereum.org/EIPS/eip-196),
//! [EIP-197](https://eips.ethereum.org/EIPS/eip-197)) and BLS12-381
//! ([EIP-2537](https://eips.ethereum.org/EIPS/eip-2537)). Every operation decodes and validates
//! its input, runs the arithmetic and encodes the result into fixed-width big-endian bytes. Hosts
//! that speak the status-code convention go through [`run`].

pub mod bls12_381;
pub mod bn254;
pub mod buffer;
mod config;
mod error;
mod operation;
mod status;

pub use config::MsmConfig;
pub use error::{Error, Result};
pub use operation::{InputRule, Operation, ParseOperationError};
pub use status::{ERROR_MESSAGE_CAPACITY, SUCCESS, report, run, write_message};

/// Validation applied to a decoded point beyond field canonicity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Membership {
    /// The point must satisfy the curve equation.
    Curve,
    /// The point must also lie in the prime-order subgroup.
    Subgroup,
}
