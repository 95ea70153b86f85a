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

//! Length-checked views over caller-owned byte buffers.
//!
//! Every read and write goes through these views so that the declared length is checked before any
//! byte is touched.

use crate::{Error, Result};
use std::slice::ChunksExact;

/// Width of the boolean word written by pairing checks and membership queries.
pub const BOOL_LEN: usize = 32;

/// Borrowed operation input.
#[derive(Debug, Clone, Copy)]
pub struct Input<'a>(&'a [u8]);

impl<'a> Input<'a> {
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self(bytes)
    }

    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the first `N` bytes, appending implicit zero bytes when the input is shorter.
    ///
    /// Bytes beyond `N` are ignored.
    pub fn padded<const N: usize>(&self) -> [u8; N] {
        let mut buf = [0u8; N];
        let len = self.0.len().min(N);
        buf[..len].copy_from_slice(&self.0[..len]);
        buf
    }

    /// Requires the input to be exactly `len` bytes long.
    pub fn exact(&self, len: usize, context: &'static str) -> Result<&'a [u8]> {
        if self.0.len() != len {
            return Err(Error::InvalidInputLength(context));
        }
        Ok(self.0)
    }

    /// Splits the input into `size`-byte blocks. The total length must be a multiple of `size`;
    /// an empty input yields no blocks.
    pub fn blocks(&self, size: usize, context: &'static str) -> Result<ChunksExact<'a, u8>> {
        if size == 0 || self.0.len() % size != 0 {
            return Err(Error::InvalidInputLength(context));
        }
        Ok(self.0.chunks_exact(size))
    }
}

/// Borrowed, caller-zeroed output buffer.
#[derive(Debug)]
pub struct Output<'a>(&'a mut [u8]);

impl<'a> Output<'a> {
    pub fn new(bytes: &'a mut [u8]) -> Self {
        Self(bytes)
    }

    /// Fails unless the buffer can hold `needed` bytes.
    pub fn reserve(&self, needed: usize) -> Result<()> {
        if self.0.len() < needed {
            return Err(Error::OutputEncodingOverflow { needed, available: self.0.len() });
        }
        Ok(())
    }

    /// Copies `bytes` to the start of the buffer. Bytes past `bytes.len()` are left untouched.
    pub fn write(&mut self, bytes: &[u8]) -> Result<()> {
        self.reserve(bytes.len())?;
        self.0[..bytes.len()].copy_from_slice(bytes);
        Ok(())
    }

    /// Writes a 32-byte boolean word: the last byte is `0x01` for `true`, every other byte stays
    /// zero.
    pub fn write_bool(&mut self, value: bool) -> Result<()> {
        let mut word = [0u8; BOOL_LEN];
        word[BOOL_LEN - 1] = u8::from(value);
        self.write(&word)
    }

    /// Resets the whole buffer to zero.
    pub fn clear(&mut self) {
        self.0.fill(0);
    }
}

/// Writes the big-endian `value` right-aligned into `slot`, zero-filling the bytes in front of it.
pub(crate) fn put_be(slot: &mut [u8], value: &[u8]) -> Result<()> {
    let Some(offset) = slot.len().checked_sub(value.len()) else {
        return Err(Error::OutputEncodingOverflow { needed: value.len(), available: slot.len() });
    };
    slot[..offset].fill(0);
    slot[offset..].copy_from_slice(value);
    Ok(())
}
