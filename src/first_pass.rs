// First Pass
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

//! Pass 1 (§4.2): line classification, symbol definition, and placeholder
//! word emission. Grounded on `original_source/first_pass.c`, restructured
//! around a typed [`Line`] classification instead of the original's
//! sequential `if`-chain over raw `char*` state.

use std::fs;
use std::io::{BufRead, BufReader};

use crate::diag::Diagnostics;
use crate::encode::{self, OperandError};
use crate::error::AssemblerError;
use crate::isa::{is_directive, is_reserved_word, lookup_opcode};
use crate::lex::{
    first_word, is_blank, is_comment, is_valid_name_shape, parse_data_integer_list, strip_label_colon, IntListError,
};
use crate::store::{Store, STARTING_ADDRESS};
use crate::symtab::{SymbolKind, SymbolTable};
use crate::word::mask24;

pub struct FirstPassResult {
    pub symtab: SymbolTable,
    pub code: Store,
    pub data: Store,
    pub diagnostics: Diagnostics,
    pub ic_final: i32,
}

/// Runs pass 1 over `<stem>.am`. Succeeds (possibly with diagnostics) as
/// long as the file could be read; the caller checks
/// `diagnostics.has_errors()` before proceeding to pass 2, per contract.
/// `macro_names` is the pre-processor's macro declaration list, so a label
/// can't be declared with the same name as a macro.
pub fn run(stem: &str, macro_names: &[String]) -> Result<FirstPassResult, AssemblerError> {
    let path = std::path::PathBuf::from(format!("{stem}.am"));
    let file_name = path.to_string_lossy().into_owned();
    let file = fs::File::open(&path).map_err(|source| AssemblerError::CannotOpen { path: path.clone(), source })?;

    let mut symtab = SymbolTable::new();
    let mut code = Store::new();
    let mut data = Store::new();
    let mut diagnostics = Diagnostics::new();
    let mut ic = STARTING_ADDRESS;
    let mut dc: i32 = 0;
    let mut memory_exceeded = false;

    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line_no = (index + 1) as u32;
        let line = line.map_err(|source| AssemblerError::CannotOpen { path: path.clone(), source })?;

        if is_blank(&line) || is_comment(&line) {
            continue;
        }

        process_line(
            &line,
            line_no,
            &file_name,
            macro_names,
            &mut symtab,
            &mut code,
            &mut data,
            &mut ic,
            &mut dc,
            &mut memory_exceeded,
            &mut diagnostics,
        );
    }

    symtab.rebase_data(ic);

    Ok(FirstPassResult { symtab, code, data, diagnostics, ic_final: ic })
}

#[allow(clippy::too_many_arguments)]
fn process_line(
    line: &str,
    line_no: u32,
    file_name: &str,
    macro_names: &[String],
    symtab: &mut SymbolTable,
    code: &mut Store,
    data: &mut Store,
    ic: &mut i32,
    dc: &mut i32,
    memory_exceeded: &mut bool,
    diagnostics: &mut Diagnostics,
) {
    let (label, rest) = match split_label(line, line_no, file_name, macro_names, diagnostics) {
        Some(parts) => parts,
        None => return,
    };

    let Some((head, tail)) = first_word(rest) else {
        if label.is_some() {
            diagnostics.error(file_name, line_no, "invalid label declaration: no value associated with label");
        }
        return;
    };

    match head {
        ".data" => handle_data(tail, label, line_no, file_name, symtab, data, dc, memory_exceeded, diagnostics),
        ".string" => handle_string(tail, label, line_no, file_name, symtab, data, dc, memory_exceeded, diagnostics),
        ".extern" => handle_extern(tail, label, line_no, file_name, macro_names, symtab, diagnostics),
        ".entry" => {
            if label.is_some() {
                diagnostics.error(file_name, line_no, "a label preceding .entry is an error");
            }
        }
        mnemonic if lookup_opcode(mnemonic).is_some() => {
            handle_instruction(mnemonic, tail, label, line_no, file_name, symtab, code, ic, memory_exceeded, diagnostics)
        }
        other => report_unrecognized(other, rest, line_no, file_name, diagnostics),
    }
}

/// Splits an optional `label:` prefix off the front of `line`, reporting
/// the colon-stuck / colon-detached malformations along the way. Returns
/// `None` when the line was fully consumed by an error.
fn split_label(
    line: &str,
    line_no: u32,
    file_name: &str,
    macro_names: &[String],
    diagnostics: &mut Diagnostics,
) -> Option<(Option<String>, String)> {
    let Some((tok0, rest)) = first_word(line) else {
        return Some((None, String::new()));
    };

    if let Some(candidate) = strip_label_colon(tok0) {
        return match validate_label_name(candidate, macro_names) {
            Ok(()) => Some((Some(candidate.to_string()), rest.to_string())),
            Err(message) => {
                diagnostics.error(file_name, line_no, message);
                None
            }
        };
    }

    if tok0.contains(':') {
        diagnostics.error(
            file_name,
            line_no,
            "unrecognized command, note that label declarations must have the colon (:) attached to the label name",
        );
        return None;
    }

    if rest.starts_with(':') {
        diagnostics.error(
            file_name,
            line_no,
            "unrecognized command, note that label declarations must have a space after the colon (:)",
        );
        return None;
    }

    Some((None, line.to_string()))
}

fn validate_label_name(name: &str, macro_names: &[String]) -> Result<(), String> {
    if !is_valid_name_shape(name, false) {
        return Err(format!("{name:?} is not a valid label name"));
    }
    if is_reserved_word(name) {
        return Err(format!("{name:?} is a reserved word and cannot be used as a label"));
    }
    if macro_names.iter().any(|m| m == name) {
        return Err(format!("{name:?} is already defined as a macro name"));
    }
    Ok(())
}

fn report_unrecognized(head: &str, full_rest: &str, line_no: u32, file_name: &str, diagnostics: &mut Diagnostics) {
    let guessed_directive = format!(".{head}");
    if is_directive(&guessed_directive) {
        diagnostics.error(
            file_name,
            line_no,
            format!("unrecognized command, note that a directive must start with a dot ({guessed_directive:?})"),
        );
        return;
    }
    if is_valid_name_shape(head, false) && !is_reserved_word(head) && full_rest.trim() == head {
        diagnostics.error(file_name, line_no, format!("{head:?} is not a valid command; a label declaration needs a colon"));
        return;
    }
    diagnostics.error(file_name, line_no, "unrecognized command, please check syntax");
}

#[allow(clippy::too_many_arguments)]
#[allow(clippy::too_many_arguments)]
fn handle_data(
    args: &str,
    label: Option<String>,
    line_no: u32,
    file_name: &str,
    symtab: &mut SymbolTable,
    data: &mut Store,
    dc: &mut i32,
    memory_exceeded: &mut bool,
    diagnostics: &mut Diagnostics,
) {
    let values = match parse_data_integer_list(args) {
        Ok(values) => values,
        Err(IntListError::Empty) => {
            diagnostics.error(file_name, line_no, ".data requires at least one integer");
            return;
        }
        Err(_) => {
            diagnostics.error(file_name, line_no, "malformed .data integer list");
            return;
        }
    };

    if let Some(name) = &label {
        define_label(name, *dc, SymbolKind::Data, line_no, file_name, symtab, diagnostics);
    }

    for value in values {
        if !emit_data_word(data, mask24(value), dc, memory_exceeded, file_name, diagnostics) {
            break;
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn handle_string(
    args: &str,
    label: Option<String>,
    line_no: u32,
    file_name: &str,
    symtab: &mut SymbolTable,
    data: &mut Store,
    dc: &mut i32,
    memory_exceeded: &mut bool,
    diagnostics: &mut Diagnostics,
) {
    let args = args.trim();
    let Some(inner) = args.strip_prefix('"').and_then(|s| s.strip_suffix('"')) else {
        diagnostics.error(file_name, line_no, ".string requires a single quoted string");
        return;
    };

    if inner.is_empty() {
        diagnostics.warning(file_name, line_no, ".string has an empty body");
    }

    if let Some(name) = &label {
        define_label(name, *dc, SymbolKind::Data, line_no, file_name, symtab, diagnostics);
    }

    for ch in inner.chars().chain(std::iter::once('\0')) {
        if !emit_data_word(data, mask24(ch as i32), dc, memory_exceeded, file_name, diagnostics) {
            break;
        }
    }
}

fn emit_data_word(data: &mut Store, word: u32, dc: &mut i32, memory_exceeded: &mut bool, file_name: &str, diagnostics: &mut Diagnostics) -> bool {
    if *memory_exceeded {
        return false;
    }
    match data.push(word, data.len()) {
        Ok(_) => {
            *dc += 1;
            true
        }
        Err(_) => {
            *memory_exceeded = true;
            diagnostics.error_no_line(file_name, "memory capacity exceeded; further code/data emission suspended");
            false
        }
    }
}

fn handle_extern(
    args: &str,
    label: Option<String>,
    line_no: u32,
    file_name: &str,
    macro_names: &[String],
    symtab: &mut SymbolTable,
    diagnostics: &mut Diagnostics,
) {
    if label.is_some() {
        diagnostics.error(file_name, line_no, "a label preceding .extern is an error");
    }

    let mut tokens = args.split_whitespace();
    let Some(name) = tokens.next() else {
        diagnostics.error(file_name, line_no, ".extern requires exactly one name");
        return;
    };
    if tokens.next().is_some() {
        diagnostics.error(file_name, line_no, ".extern requires exactly one name");
        return;
    }
    if let Err(message) = validate_label_name(name, macro_names) {
        diagnostics.error(file_name, line_no, message);
        return;
    }

    match symtab.lookup_defined(name) {
        Some(existing) if existing.kind == SymbolKind::Extern => {
            diagnostics.warning(file_name, line_no, format!("{name:?} is already declared extern"));
        }
        Some(_) => {
            diagnostics.error(file_name, line_no, format!("{name:?} is already defined locally"));
        }
        None => {
            let _ = symtab.define(name, 0, SymbolKind::Extern);
        }
    }
}

fn define_label(
    name: &str,
    address: i32,
    kind: SymbolKind,
    line_no: u32,
    file_name: &str,
    symtab: &mut SymbolTable,
    diagnostics: &mut Diagnostics,
) {
    if let Err(conflict) = symtab.define(name, address, kind) {
        diagnostics.error(
            file_name,
            line_no,
            format!("{name:?} is already defined as a {:?} symbol", conflict.existing_kind),
        );
    }
}

#[allow(clippy::too_many_arguments)]
fn handle_instruction(
    mnemonic: &str,
    args: &str,
    label: Option<String>,
    line_no: u32,
    file_name: &str,
    symtab: &mut SymbolTable,
    code: &mut Store,
    ic: &mut i32,
    memory_exceeded: &mut bool,
    diagnostics: &mut Diagnostics,
) {
    let row = lookup_opcode(mnemonic).expect("caller verified mnemonic is known");

    let operand_texts: Vec<&str> = if args.trim().is_empty() { Vec::new() } else { split_operands(args) };

    if operand_texts.len() != row.operand_count as usize {
        diagnostics.error(
            file_name,
            line_no,
            format!("{mnemonic} takes {} operand(s), found {}", row.operand_count, operand_texts.len()),
        );
        return;
    }
    if operand_texts.iter().any(|t| t.trim().is_empty()) {
        diagnostics.error(file_name, line_no, "malformed operand list: empty operand (check comma placement)");
        return;
    }

    let mut operands = Vec::with_capacity(operand_texts.len());
    for text in &operand_texts {
        match encode::parse_operand(text) {
            Ok(op) => operands.push(op),
            Err(OperandError::Empty) => {
                diagnostics.error(file_name, line_no, "malformed operand list: empty operand");
                return;
            }
            Err(OperandError::BadImmediate(_)) => {
                diagnostics.error(file_name, line_no, format!("{text:?} is not a valid immediate value"));
                return;
            }
            Err(OperandError::BadLabelName(name)) => {
                diagnostics.error(file_name, line_no, format!("{name:?} is not a valid label name"));
                return;
            }
        }
    }

    let (src, dst) = match operands.len() {
        0 => (None, None),
        1 => (None, Some(&operands[0])),
        2 => (Some(&operands[0]), Some(&operands[1])),
        _ => unreachable!("operand count already checked against the table"),
    };

    if let Some(op) = src {
        if !encode::mode_allowed(row.src_modes, op) {
            diagnostics.error(file_name, line_no, format!("{mnemonic} does not allow that addressing mode for its source operand"));
            return;
        }
    }
    if let Some(op) = dst {
        if !encode::mode_allowed(row.dst_modes, op) {
            diagnostics.error(file_name, line_no, format!("{mnemonic} does not allow that addressing mode for its destination operand"));
            return;
        }
    }

    if let Some(name) = &label {
        define_label(name, *ic, SymbolKind::Code, line_no, file_name, symtab, diagnostics);
    }

    let opcode_word = encode::opcode_word(row, src, dst);
    if !emit_word(code, opcode_word, ic, memory_exceeded, file_name, diagnostics) {
        return;
    }

    for op in [src, dst].into_iter().flatten() {
        if !encode::needs_extra_word(op) {
            continue;
        }
        let slot_ic = *ic;
        let word = encode::extra_word(op, slot_ic);
        if !emit_word(code, word, ic, memory_exceeded, file_name, diagnostics) {
            return;
        }
        if let crate::encode::Operand::Direct(name) | crate::encode::Operand::Relative(name) = op {
            symtab.reference(name, slot_ic);
        }
    }
}

fn emit_word(code: &mut Store, word: u32, ic: &mut i32, memory_exceeded: &mut bool, file_name: &str, diagnostics: &mut Diagnostics) -> bool {
    if *memory_exceeded {
        return false;
    }
    match code.push(word, code.len()) {
        Ok(_) => {
            *ic += 1;
            true
        }
        Err(_) => {
            *memory_exceeded = true;
            diagnostics.error_no_line(file_name, "memory capacity exceeded; further code/data emission suspended");
            false
        }
    }
}

/// Splits an operand list on commas, rejecting the same malformations as
/// `.data`'s integer list (leading/trailing/double comma). Unlike
/// [`parse_data_integer_list`] this keeps the raw text for
/// mode-specific parsing downstream, so it returns a placeholder "empty"
/// marker on malformation rather than an error enum.
fn split_operands(args: &str) -> Vec<&str> {
    let args = args.trim();
    if args.starts_with(',') || args.ends_with(',') {
        return vec![""];
    }
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    if parts.iter().any(|p| p.is_empty()) {
        return vec![""];
    }
    parts
}
