// Operand Classification and Instruction Encoding
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

//! Operand parsing and the opcode-word builder (§4.3). Grounded on
//! `original_source/machine_code.c`'s `handle_one_operand`/
//! `handle_two_operands`/`process_instruction_code`, reshaped around typed
//! [`Operand`] values instead of re-parsing the addressing-mode character
//! at each call site.

use crate::isa::{register_index, AddressingMode, OpcodeRow};
use crate::lex::{is_valid_name_shape, parse_immediate_integer, IntParseError};
use crate::word;

#[derive(Clone, Debug)]
pub enum Operand {
    Immediate(i32),
    Direct(String),
    Relative(String),
    Register(u32),
}

#[derive(Debug)]
pub enum OperandError {
    Empty,
    BadImmediate(IntParseError),
    BadLabelName(String),
}

/// Parses one operand token (§4.3's mode-dispatch-by-leading-character
/// rule: `#n`, `&label`, `rN`, or bare `label`).
pub fn parse_operand(text: &str) -> Result<Operand, OperandError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(OperandError::Empty);
    }

    if let Some(rest) = text.strip_prefix('#') {
        let value = parse_immediate_integer(rest).map_err(OperandError::BadImmediate)?;
        return Ok(Operand::Immediate(value));
    }

    if let Some(rest) = text.strip_prefix('&') {
        if !is_valid_name_shape(rest, false) {
            return Err(OperandError::BadLabelName(rest.to_string()));
        }
        return Ok(Operand::Relative(rest.to_string()));
    }

    if let Some(index) = register_index(text) {
        return Ok(Operand::Register(index));
    }

    if !is_valid_name_shape(text, false) {
        return Err(OperandError::BadLabelName(text.to_string()));
    }
    Ok(Operand::Direct(text.to_string()))
}

pub fn addressing_mode(op: &Operand) -> AddressingMode {
    match op {
        Operand::Immediate(_) => AddressingMode::Immediate,
        Operand::Direct(_) => AddressingMode::Direct,
        Operand::Relative(_) => AddressingMode::Relative,
        Operand::Register(_) => AddressingMode::RegisterDirect,
    }
}

pub fn mode_allowed(allowed: &[AddressingMode], op: &Operand) -> bool {
    allowed.contains(&addressing_mode(op))
}

/// True if `op` needs a following extra word (every mode but
/// register-direct, whose register index already lives in the opcode
/// word).
pub fn needs_extra_word(op: &Operand) -> bool {
    !matches!(op, Operand::Register(_))
}

fn as_mode_reg(op: Option<&Operand>) -> Option<(AddressingMode, Option<u32>)> {
    op.map(|o| match o {
        Operand::Register(r) => (AddressingMode::RegisterDirect, Some(*r)),
        other => (addressing_mode(other), None),
    })
}

/// Builds the opcode word for `row` given its (possibly absent) source and
/// destination operands.
pub fn opcode_word(row: &OpcodeRow, src: Option<&Operand>, dst: Option<&Operand>) -> u32 {
    word::opcode_word(row.opcode, row.funct, as_mode_reg(src), as_mode_reg(dst))
}

/// Builds the provisional or final extra word for a non-register operand.
/// `origin_ic` is the IC the extra word itself will occupy, used to anchor
/// a relative offset.
pub fn extra_word(op: &Operand, origin_ic: i32) -> u32 {
    match op {
        Operand::Immediate(value) => word::immediate_word(*value),
        Operand::Direct(_) => word::direct_provisional_word(),
        Operand::Relative(_) => word::relative_provisional_word(origin_ic as u32),
        Operand::Register(_) => unreachable!("register-direct operands need no extra word"),
    }
}
