// asm24 Root Module
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

//! Two-pass assembler for a 24-bit word, 16-opcode, 8-register machine.
//!
//! The pipeline: [`macros`] expands `.as` into `.am`, [`first_pass`] builds
//! the symbol table and emits placeholder code/data words, [`second_pass`]
//! resolves those placeholders and writes `.ob`/`.ent`/`.ext`. [`pipeline`]
//! drives the three stages for a single input stem.

pub mod diag;
pub mod error;
pub mod isa;
pub mod word;
pub mod lex;
pub mod symtab;
pub mod store;
pub mod macros;
pub mod encode;
pub mod first_pass;
pub mod second_pass;
pub mod output;
pub mod pipeline;
pub mod cli;

pub use diag::{Diagnostic, Diagnostics, Level};
pub use error::AssemblerError;
pub use pipeline::assemble_one;
