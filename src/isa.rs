// Instruction Set Tables
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

//! Static ISA tables (§2's leaf layer): opcodes, registers, directives, and
//! macro keywords. Nothing here depends on any other module.

/// How an operand supplies its value (§3).
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
#[repr(u8)]
pub enum AddressingMode {
    Immediate = 0,
    Direct = 1,
    Relative = 2,
    RegisterDirect = 3,
}

impl AddressingMode {
    pub fn bits(self) -> u32 {
        self as u32
    }
}

/// One row of the opcode table: mnemonic, opcode/funct pair, operand count,
/// and the addressing modes each operand position accepts.
pub struct OpcodeRow {
    pub mnemonic: &'static str,
    pub opcode: u8,
    pub funct: u8,
    pub operand_count: u8,
    pub src_modes: &'static [AddressingMode],
    pub dst_modes: &'static [AddressingMode],
}

use AddressingMode::*;

const NONE: &[AddressingMode] = &[];
const METHOD_1: &[AddressingMode] = &[Direct];
const METHODS_1_3: &[AddressingMode] = &[Direct, RegisterDirect];
const METHODS_1_2: &[AddressingMode] = &[Direct, Relative];
const METHODS_0_1_3: &[AddressingMode] = &[Immediate, Direct, RegisterDirect];

/// The 16 opcodes, in the order `original_source/const.c` lists them.
pub const OPCODES: &[OpcodeRow] = &[
    OpcodeRow { mnemonic: "mov", opcode: 0, funct: 0, operand_count: 2, src_modes: METHODS_0_1_3, dst_modes: METHODS_1_3 },
    OpcodeRow { mnemonic: "cmp", opcode: 1, funct: 0, operand_count: 2, src_modes: METHODS_0_1_3, dst_modes: METHODS_0_1_3 },
    OpcodeRow { mnemonic: "add", opcode: 2, funct: 1, operand_count: 2, src_modes: METHODS_0_1_3, dst_modes: METHODS_1_3 },
    OpcodeRow { mnemonic: "sub", opcode: 2, funct: 2, operand_count: 2, src_modes: METHODS_0_1_3, dst_modes: METHODS_1_3 },
    OpcodeRow { mnemonic: "lea", opcode: 4, funct: 0, operand_count: 2, src_modes: METHOD_1, dst_modes: METHODS_1_3 },
    OpcodeRow { mnemonic: "clr", opcode: 5, funct: 1, operand_count: 1, src_modes: NONE, dst_modes: METHODS_1_3 },
    OpcodeRow { mnemonic: "not", opcode: 5, funct: 2, operand_count: 1, src_modes: NONE, dst_modes: METHODS_1_3 },
    OpcodeRow { mnemonic: "inc", opcode: 5, funct: 3, operand_count: 1, src_modes: NONE, dst_modes: METHODS_1_3 },
    OpcodeRow { mnemonic: "dec", opcode: 5, funct: 4, operand_count: 1, src_modes: NONE, dst_modes: METHODS_1_3 },
    OpcodeRow { mnemonic: "jmp", opcode: 9, funct: 1, operand_count: 1, src_modes: NONE, dst_modes: METHODS_1_2 },
    OpcodeRow { mnemonic: "bne", opcode: 9, funct: 2, operand_count: 1, src_modes: NONE, dst_modes: METHODS_1_2 },
    OpcodeRow { mnemonic: "jsr", opcode: 9, funct: 3, operand_count: 1, src_modes: NONE, dst_modes: METHODS_1_2 },
    OpcodeRow { mnemonic: "red", opcode: 12, funct: 0, operand_count: 1, src_modes: NONE, dst_modes: METHODS_1_3 },
    OpcodeRow { mnemonic: "prn", opcode: 13, funct: 0, operand_count: 1, src_modes: NONE, dst_modes: METHODS_0_1_3 },
    OpcodeRow { mnemonic: "rts", opcode: 14, funct: 0, operand_count: 0, src_modes: NONE, dst_modes: NONE },
    OpcodeRow { mnemonic: "stop", opcode: 15, funct: 0, operand_count: 0, src_modes: NONE, dst_modes: NONE },
];

pub fn lookup_opcode(mnemonic: &str) -> Option<&'static OpcodeRow> {
    OPCODES.iter().find(|row| row.mnemonic == mnemonic)
}

/// The 8 general-purpose registers.
pub const REGISTERS: &[&str] = &["r0", "r1", "r2", "r3", "r4", "r5", "r6", "r7"];

/// Returns the register index (0..8) for a name like `"r3"`, if valid.
pub fn register_index(name: &str) -> Option<u32> {
    REGISTERS.iter().position(|&r| r == name).map(|i| i as u32)
}

/// The four directive keywords.
pub const DIRECTIVES: &[&str] = &[".data", ".string", ".entry", ".extern"];

pub fn is_directive(word: &str) -> bool {
    DIRECTIVES.contains(&word)
}

pub const MACRO_START: &str = "mcro";
pub const MACRO_END: &str = "mcroend";

/// True if `word` names an opcode, register, directive, or macro keyword —
/// none of these may be used as a label or macro name (mirrors
/// `original_source/validations.c`'s `is_reserved_word`).
pub fn is_reserved_word(word: &str) -> bool {
    lookup_opcode(word).is_some()
        || REGISTERS.contains(&word)
        || is_directive(word)
        || word == MACRO_START
        || word == MACRO_END
}
