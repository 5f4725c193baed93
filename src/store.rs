// Code and Data Stores
//
// This file is part of asm24.
// Copyright (C) 2026 Jeff Sharp
//
// asm24 is free software: you can redistribute it and/or modify it
// under the terms of the GNU General Public License as published
// by the Free Software Foundation, either version 3 of the License,
// or (at your option) any later version.
//
// asm24 is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See
// the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with asm24.  If not, see <http://www.gnu.org/licenses/>.

//! Append-only word sequences indexed by instruction/data counter
//! (`original_source/machine_code.c`'s `add_instruction_code`/
//! `add_data_code`, minus the fixed-size array and its capacity check,
//! which [`Store::push`] reports as a [`crate::error::AssemblerError`]
//! instead of truncating silently).

use crate::error::AssemblerError;

/// Total words (code + data) the target machine can address (§4 "Size
/// calibration" / `original_source/definitions.h`'s `CAPACITY`).
pub const CAPACITY: usize = 2_097_152;

/// Where code and data segments begin (`original_source/definitions.h`'s
/// `STARTING_ADDRESS`).
pub const STARTING_ADDRESS: i32 = 100;

/// A flat, append-only sequence of words starting at a fixed base address.
/// Used for both the code store (base = [`STARTING_ADDRESS`]) and the data
/// store (base = 0, rebased once the final IC is known).
#[derive(Default)]
pub struct Store {
    words: Vec<u32>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `word` and returns the counter value it was written at.
    pub fn push(&mut self, word: u32, total_words_so_far: usize) -> Result<i32, AssemblerError> {
        if total_words_so_far >= CAPACITY {
            return Err(AssemblerError::MemoryExceeded(total_words_so_far));
        }
        self.words.push(word);
        Ok(self.words.len() as i32 - 1)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<u32> {
        self.words.get(index).copied()
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut u32> {
        self.words.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &u32> {
        self.words.iter()
    }
}
