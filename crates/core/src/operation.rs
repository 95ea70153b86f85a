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

//! Operation table: tags, wire layout and dispatch.

use crate::{
    Error, MsmConfig, Result, bls12_381, bn254,
    buffer::{BOOL_LEN, Output},
};
use std::{fmt, str::FromStr};

/// Length policy of an operation's input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputRule {
    /// Any length. Input is truncated to, or right-zero-extended up to, `len` bytes.
    Padded { len: usize },
    /// Exactly `len` bytes.
    Exact { len: usize },
    /// A concatenation of at least `min` blocks of `size` bytes.
    Blocks { size: usize, min: usize },
}

impl fmt::Display for InputRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputRule::Padded { len } => write!(f, "{len} (zero-extended)"),
            InputRule::Exact { len } => write!(f, "{len}"),
            InputRule::Blocks { size, min } => write!(f, "n*{size}, n >= {min}"),
        }
    }
}

/// Every operation the protocol layer exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Bn254G1Add,
    Bn254G1Mul,
    Bn254Pairing,
    Bls12G1Add,
    Bls12G1Mul,
    Bls12G1MultiExp,
    Bls12G2Add,
    Bls12G2Mul,
    Bls12G2MultiExp,
    Bls12Pairing,
    Bls12MapFpToG1,
    Bls12MapFp2ToG2,
    Bls12G1IsOnCurve,
    Bls12G1IsInSubgroup,
    Bls12G2IsOnCurve,
    Bls12G2IsInSubgroup,
}

impl Operation {
    pub const ALL: [Operation; 16] = [
        Operation::Bn254G1Add,
        Operation::Bn254G1Mul,
        Operation::Bn254Pairing,
        Operation::Bls12G1Add,
        Operation::Bls12G1Mul,
        Operation::Bls12G1MultiExp,
        Operation::Bls12G2Add,
        Operation::Bls12G2Mul,
        Operation::Bls12G2MultiExp,
        Operation::Bls12Pairing,
        Operation::Bls12MapFpToG1,
        Operation::Bls12MapFp2ToG2,
        Operation::Bls12G1IsOnCurve,
        Operation::Bls12G1IsInSubgroup,
        Operation::Bls12G2IsOnCurve,
        Operation::Bls12G2IsInSubgroup,
    ];

    /// Resolves a raw EIP-196 dispatcher tag.
    pub const fn from_eip196(raw: u8) -> Result<Self> {
        match raw {
            1 => Ok(Operation::Bn254G1Add),
            2 => Ok(Operation::Bn254G1Mul),
            3 => Ok(Operation::Bn254Pairing),
            _ => Err(Error::UnsupportedOperation(raw)),
        }
    }

    /// Resolves a raw EIP-2537 dispatcher tag.
    pub const fn from_eip2537(raw: u8) -> Result<Self> {
        match raw {
            1 => Ok(Operation::Bls12G1Add),
            2 => Ok(Operation::Bls12G1MultiExp),
            3 => Ok(Operation::Bls12G2Add),
            4 => Ok(Operation::Bls12G2MultiExp),
            5 => Ok(Operation::Bls12Pairing),
            6 => Ok(Operation::Bls12MapFpToG1),
            7 => Ok(Operation::Bls12MapFp2ToG2),
            _ => Err(Error::UnsupportedOperation(raw)),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Operation::Bn254G1Add => "bn254-g1-add",
            Operation::Bn254G1Mul => "bn254-g1-mul",
            Operation::Bn254Pairing => "bn254-pairing",
            Operation::Bls12G1Add => "bls12-g1-add",
            Operation::Bls12G1Mul => "bls12-g1-mul",
            Operation::Bls12G1MultiExp => "bls12-g1-msm",
            Operation::Bls12G2Add => "bls12-g2-add",
            Operation::Bls12G2Mul => "bls12-g2-mul",
            Operation::Bls12G2MultiExp => "bls12-g2-msm",
            Operation::Bls12Pairing => "bls12-pairing",
            Operation::Bls12MapFpToG1 => "bls12-map-fp-to-g1",
            Operation::Bls12MapFp2ToG2 => "bls12-map-fp2-to-g2",
            Operation::Bls12G1IsOnCurve => "bls12-g1-is-on-curve",
            Operation::Bls12G1IsInSubgroup => "bls12-g1-is-in-subgroup",
            Operation::Bls12G2IsOnCurve => "bls12-g2-is-on-curve",
            Operation::Bls12G2IsInSubgroup => "bls12-g2-is-in-subgroup",
        }
    }

    pub const fn input_rule(self) -> InputRule {
        use InputRule::*;
        match self {
            Operation::Bn254G1Add => Padded { len: bn254::ADD_INPUT_LEN },
            Operation::Bn254G1Mul => Padded { len: bn254::MUL_INPUT_LEN },
            Operation::Bn254Pairing => Blocks { size: bn254::PAIR_LEN, min: 0 },
            Operation::Bls12G1Add => Exact { len: bls12_381::G1_ADD_INPUT_LEN },
            Operation::Bls12G1Mul => Exact { len: bls12_381::G1_MUL_INPUT_LEN },
            Operation::Bls12G1MultiExp => Blocks { size: bls12_381::G1_MUL_INPUT_LEN, min: 1 },
            Operation::Bls12G2Add => Exact { len: bls12_381::G2_ADD_INPUT_LEN },
            Operation::Bls12G2Mul => Exact { len: bls12_381::G2_MUL_INPUT_LEN },
            Operation::Bls12G2MultiExp => Blocks { size: bls12_381::G2_MUL_INPUT_LEN, min: 1 },
            Operation::Bls12Pairing => Blocks { size: bls12_381::PAIR_LEN, min: 0 },
            Operation::Bls12MapFpToG1 => Exact { len: bls12_381::PADDED_FP_LEN },
            Operation::Bls12MapFp2ToG2 => Exact { len: bls12_381::PADDED_FP2_LEN },
            Operation::Bls12G1IsOnCurve | Operation::Bls12G1IsInSubgroup => {
                Exact { len: bls12_381::G1_LEN }
            }
            Operation::Bls12G2IsOnCurve | Operation::Bls12G2IsInSubgroup => {
                Exact { len: bls12_381::G2_LEN }
            }
        }
    }

    /// Number of bytes written on success.
    pub const fn output_len(self) -> usize {
        match self {
            Operation::Bn254G1Add | Operation::Bn254G1Mul => bn254::G1_LEN,
            Operation::Bls12G1Add
            | Operation::Bls12G1Mul
            | Operation::Bls12G1MultiExp
            | Operation::Bls12MapFpToG1 => bls12_381::G1_LEN,
            Operation::Bls12G2Add
            | Operation::Bls12G2Mul
            | Operation::Bls12G2MultiExp
            | Operation::Bls12MapFp2ToG2 => bls12_381::G2_LEN,
            Operation::Bn254Pairing
            | Operation::Bls12Pairing
            | Operation::Bls12G1IsOnCurve
            | Operation::Bls12G1IsInSubgroup
            | Operation::Bls12G2IsOnCurve
            | Operation::Bls12G2IsInSubgroup => BOOL_LEN,
        }
    }

    /// Runs the operation on `input` and writes the encoded result to the start of `output`.
    ///
    /// The output capacity is checked before any work is done. On error `output` may be partially
    /// written; [`report`](crate::report) resets it.
    pub fn execute(
        self,
        input: &[u8],
        output: &mut Output<'_>,
        config: &MsmConfig,
    ) -> Result<()> {
        output.reserve(self.output_len())?;
        match self {
            Operation::Bn254G1Add => output.write(&bn254::g1_add(input)?),
            Operation::Bn254G1Mul => output.write(&bn254::g1_mul(input)?),
            Operation::Bn254Pairing => output.write_bool(bn254::pairing_check(input)?),
            Operation::Bls12G1Add => output.write(&bls12_381::g1_add(input)?),
            Operation::Bls12G1Mul => output.write(&bls12_381::g1_mul(input)?),
            Operation::Bls12G1MultiExp => output.write(&bls12_381::g1_msm(input, config)?),
            Operation::Bls12G2Add => output.write(&bls12_381::g2_add(input)?),
            Operation::Bls12G2Mul => output.write(&bls12_381::g2_mul(input)?),
            Operation::Bls12G2MultiExp => output.write(&bls12_381::g2_msm(input, config)?),
            Operation::Bls12Pairing => output.write_bool(bls12_381::pairing_check(input)?),
            Operation::Bls12MapFpToG1 => output.write(&bls12_381::map_fp_to_g1(input)?),
            Operation::Bls12MapFp2ToG2 => output.write(&bls12_381::map_fp2_to_g2(input)?),
            Operation::Bls12G1IsOnCurve => output.write_bool(bls12_381::g1_is_on_curve(input)?),
            Operation::Bls12G1IsInSubgroup => {
                output.write_bool(bls12_381::g1_is_in_subgroup(input)?)
            }
            Operation::Bls12G2IsOnCurve => output.write_bool(bls12_381::g2_is_on_curve(input)?),
            Operation::Bls12G2IsInSubgroup => {
                output.write_bool(bls12_381::g2_is_in_subgroup(input)?)
            }
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Returned when parsing an unknown operation name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown operation `{0}`")]
pub struct ParseOperationError(String);

impl FromStr for Operation {
    type Err = ParseOperationError;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.name() == s)
            .ok_or_else(|| ParseOperationError(s.to_string()))
    }
}
