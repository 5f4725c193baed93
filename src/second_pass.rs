// Second Pass
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

//! Pass 2 (§4.5): operand resolution and `.entry` promotion. Grounded on
//! `original_source/second_pass.c`'s `code_operand_labels`/`is_entry`, with
//! the relative-offset formula taken verbatim from the spec rather than
//! the original's off-by-one (see the design ledger).

use std::fs;
use std::io::{BufRead, BufReader};

use crate::diag::Diagnostics;
use crate::error::AssemblerError;
use crate::lex::first_word;
use crate::store::{Store, STARTING_ADDRESS};
use crate::symtab::{SymbolKind, SymbolTable};
use crate::word;

pub struct SecondPassResult {
    pub diagnostics: Diagnostics,
    /// `(extern name, slot address)` pairs, in the order each usage site
    /// was resolved, for the `.ext` writer.
    pub externs_used: Vec<(String, i32)>,
}

pub fn run(stem: &str, symtab: &mut SymbolTable, code: &mut Store) -> Result<SecondPassResult, AssemblerError> {
    let mut diagnostics = Diagnostics::new();
    let mut externs_used = Vec::new();

    resolve_operands(stem, symtab, code, &mut diagnostics, &mut externs_used);
    process_entries(stem, symtab, &mut diagnostics)?;

    Ok(SecondPassResult { diagnostics, externs_used })
}

fn resolve_operands(
    stem: &str,
    symtab: &mut SymbolTable,
    code: &mut Store,
    diagnostics: &mut Diagnostics,
    externs_used: &mut Vec<(String, i32)>,
) {
    let file_name = format!("{stem}.am");
    let len = code.len();

    for index in 0..len {
        let ic = STARTING_ADDRESS + index as i32;
        let bits = code.get(index).expect("index within bounds");

        if word::is_direct_provisional(bits) {
            resolve_direct(ic, symtab, code, index, &file_name, diagnostics, externs_used);
        } else if word::is_relative_provisional(bits) {
            resolve_relative(ic, bits, symtab, code, index, &file_name, diagnostics);
        }
    }
}

fn resolve_direct(
    ic: i32,
    symtab: &mut SymbolTable,
    code: &mut Store,
    index: usize,
    file_name: &str,
    diagnostics: &mut Diagnostics,
    externs_used: &mut Vec<(String, i32)>,
) {
    let Some(reference) = symtab.pop_operand() else {
        diagnostics.error_no_line(file_name, format!("internal: no operand reference for code word at {ic}"));
        return;
    };

    match symtab.lookup_defined(&reference.name) {
        Some(symbol) if matches!(symbol.kind, SymbolKind::Code | SymbolKind::Data) => {
            let resolved = word::resolve_direct_local(symbol.address);
            *code.get_mut(index).expect("index within bounds") = resolved;
        }
        Some(symbol) if symbol.kind == SymbolKind::Extern => {
            *code.get_mut(index).expect("index within bounds") = word::resolve_direct_external();
            externs_used.push((reference.name.clone(), ic));
        }
        _ => {
            diagnostics.error_no_line(file_name, format!("undefined reference to label {:?}", reference.name));
        }
    }
}

fn resolve_relative(
    ic: i32,
    bits: u32,
    symtab: &mut SymbolTable,
    code: &mut Store,
    index: usize,
    file_name: &str,
    diagnostics: &mut Diagnostics,
) {
    let origin_ic = word::relative_origin_ic(bits) as i32;
    let Some(reference) = symtab.pop_operand() else {
        diagnostics.error_no_line(file_name, format!("internal: no operand reference for code word at {ic}"));
        return;
    };

    match symtab.lookup_defined(&reference.name) {
        Some(symbol) if matches!(symbol.kind, SymbolKind::Code | SymbolKind::Data) => {
            let resolved = word::resolve_relative_local(symbol.address, origin_ic);
            *code.get_mut(index).expect("index within bounds") = resolved;
        }
        _ => {
            diagnostics.error_no_line(
                file_name,
                format!("relative reference to undefined/external label {:?}", reference.name),
            );
        }
    }
}

fn process_entries(stem: &str, symtab: &mut SymbolTable, diagnostics: &mut Diagnostics) -> Result<(), AssemblerError> {
    let path = std::path::PathBuf::from(format!("{stem}.am"));
    let file_name = path.to_string_lossy().into_owned();
    let file = fs::File::open(&path).map_err(|source| AssemblerError::CannotOpen { path: path.clone(), source })?;

    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line_no = (index + 1) as u32;
        let line = line.map_err(|source| AssemblerError::CannotOpen { path: path.clone(), source })?;

        let Some((head, rest)) = first_word(&line) else { continue };
        if head != ".entry" {
            continue;
        }

        let mut tokens = rest.split_whitespace();
        let Some(name) = tokens.next() else {
            diagnostics.error(&file_name, line_no, ".entry requires exactly one name");
            continue;
        };
        if tokens.next().is_some() {
            diagnostics.error(&file_name, line_no, ".entry requires exactly one name");
            continue;
        }

        if symtab.promote_to_entry(name).is_err() {
            diagnostics.error(&file_name, line_no, format!("{name:?} was declared .entry but was not defined as a label"));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Store;
    use std::io::Write;

    fn write_am(stem: &str, contents: &str) {
        let mut f = fs::File::create(format!("{stem}.am")).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
    }

    fn cleanup(stem: &str) {
        let _ = fs::remove_file(format!("{stem}.am"));
    }

    #[test]
    fn resolves_local_direct_reference() {
        let stem = "test_tmp_sp_direct_local";
        write_am(stem, "jmp END\nEND: stop\n");

        let mut symtab = SymbolTable::new();
        symtab.define("END", 101, SymbolKind::Code).unwrap();
        symtab.reference("END", 100);

        let mut code = Store::new();
        code.push(0, 0).unwrap(); // placeholder opcode word
        code.push(word::direct_provisional_word(), 1).unwrap();

        let result = run(stem, &mut symtab, &mut code).unwrap();
        assert!(!result.diagnostics.has_errors(), "{}", result.diagnostics);
        assert_eq!(word::resolve_direct_local(101), code.get(1).unwrap());

        cleanup(stem);
    }

    #[test]
    fn direct_reference_to_extern_is_recorded_for_ext_output() {
        let stem = "test_tmp_sp_direct_extern";
        write_am(stem, ".extern FOO\njmp FOO\n");

        let mut symtab = SymbolTable::new();
        symtab.define("FOO", 0, SymbolKind::Extern).unwrap();
        symtab.reference("FOO", 100);

        let mut code = Store::new();
        code.push(0, 0).unwrap();
        code.push(word::direct_provisional_word(), 1).unwrap();

        let result = run(stem, &mut symtab, &mut code).unwrap();
        assert!(!result.diagnostics.has_errors(), "{}", result.diagnostics);
        assert_eq!(vec![("FOO".to_string(), 100)], result.externs_used);
        assert_eq!(word::resolve_direct_external(), code.get(1).unwrap());

        cleanup(stem);
    }

    #[test]
    fn relative_reference_to_extern_is_an_error() {
        let stem = "test_tmp_sp_relative_extern";
        write_am(stem, ".extern FOO\njmp &FOO\n");

        let mut symtab = SymbolTable::new();
        symtab.define("FOO", 0, SymbolKind::Extern).unwrap();
        symtab.reference("FOO", 100);

        let mut code = Store::new();
        code.push(0, 0).unwrap();
        code.push(word::relative_provisional_word(100), 1).unwrap();

        let result = run(stem, &mut symtab, &mut code).unwrap();
        assert!(result.diagnostics.has_errors());

        cleanup(stem);
    }

    #[test]
    fn entry_directive_promotes_existing_label() {
        let stem = "test_tmp_sp_entry";
        write_am(stem, "HELLO: stop\n.entry HELLO\n");

        let mut symtab = SymbolTable::new();
        symtab.define("HELLO", 100, SymbolKind::Code).unwrap();
        let mut code = Store::new();

        let result = run(stem, &mut symtab, &mut code).unwrap();
        assert!(!result.diagnostics.has_errors(), "{}", result.diagnostics);
        assert!(symtab.has_entries());

        cleanup(stem);
    }

    #[test]
    fn entry_directive_on_undefined_name_is_an_error() {
        let stem = "test_tmp_sp_entry_undefined";
        write_am(stem, ".entry GHOST\n");

        let mut symtab = SymbolTable::new();
        let mut code = Store::new();

        let result = run(stem, &mut symtab, &mut code).unwrap();
        assert!(result.diagnostics.has_errors());

        cleanup(stem);
    }
}
