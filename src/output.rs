// Output Writers
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

//! `.ob`/`.ent`/`.ext` writers (§4.5, §6). Written only after both passes
//! succeed end-to-end; an entries or externs file is omitted entirely when
//! there is nothing to put in it.

use std::fs;
use std::io::Write;

use crate::error::AssemblerError;
use crate::store::{Store, STARTING_ADDRESS};
use crate::symtab::SymbolTable;
use crate::word::{format_addr7, format_hex6};

fn create(path: &std::path::Path) -> Result<fs::File, AssemblerError> {
    fs::File::create(path).map_err(|source| AssemblerError::CannotCreate { path: path.to_path_buf(), source })
}

fn write_line(file: &mut fs::File, path: &std::path::Path, line: &str) -> Result<(), AssemblerError> {
    writeln!(file, "{line}").map_err(|source| AssemblerError::CannotWrite { path: path.to_path_buf(), source })
}

/// Writes `<stem>.ob`: header `<ic_count> <dc_count>`, then code words at
/// `100..ic_final`, then data words at `ic_final..ic_final+dc_final`.
pub fn write_object(stem: &str, code: &Store, data: &Store, ic_final: i32) -> Result<(), AssemblerError> {
    let path = std::path::PathBuf::from(format!("{stem}.ob"));
    let mut file = create(&path)?;

    let ic_count = ic_final - STARTING_ADDRESS;
    write_line(&mut file, &path, &format!("{} {}", ic_count, data.len()))?;

    for (index, word) in code.iter().enumerate() {
        let address = STARTING_ADDRESS + index as i32;
        write_line(&mut file, &path, &format!("{} {}", format_addr7(address as i64), format_hex6(*word)))?;
    }
    for (index, word) in data.iter().enumerate() {
        let address = ic_final + index as i32;
        write_line(&mut file, &path, &format!("{} {}", format_addr7(address as i64), format_hex6(*word)))?;
    }

    Ok(())
}

/// Writes `<stem>.ent`, one line per ENTRY symbol in insertion order.
/// Returns `Ok(false)` without creating the file if there are none.
pub fn write_entries(stem: &str, symtab: &SymbolTable) -> Result<bool, AssemblerError> {
    if !symtab.has_entries() {
        return Ok(false);
    }

    let path = std::path::PathBuf::from(format!("{stem}.ent"));
    let mut file = create(&path)?;
    for symbol in symtab.entries() {
        write_line(&mut file, &path, &format!("{} {}", symbol.name, format_addr7(symbol.address as i64)))?;
    }
    Ok(true)
}

/// Writes `<stem>.ext`, one line per external usage site (multiple lines
/// per name are expected when the same extern is used more than once).
/// Returns `Ok(false)` without creating the file if there are none.
pub fn write_externs(stem: &str, externs_used: &[(String, i32)]) -> Result<bool, AssemblerError> {
    if externs_used.is_empty() {
        return Ok(false);
    }

    let path = std::path::PathBuf::from(format!("{stem}.ext"));
    let mut file = create(&path)?;
    for (name, address) in externs_used {
        write_line(&mut file, &path, &format!("{} {}", name, format_addr7(*address as i64)))?;
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cleanup(stem: &str) {
        for ext in ["ob", "ent", "ext"] {
            let _ = fs::remove_file(format!("{stem}.{ext}"));
        }
    }

    #[test]
    fn object_file_header_and_body() {
        let stem = "test_tmp_out_object";
        let mut code = Store::new();
        code.push(0x0C0004, 0).unwrap();
        let mut data = Store::new();
        data.push(0x000007, 0).unwrap();

        write_object(stem, &code, &data, STARTING_ADDRESS + 1).unwrap();

        let body = fs::read_to_string(format!("{stem}.ob")).unwrap();
        let mut lines = body.lines();
        assert_eq!(Some("1 1"), lines.next());
        assert_eq!(Some("0000100 0c0004"), lines.next());
        assert_eq!(Some("0000101 000007"), lines.next());
        assert_eq!(None, lines.next());

        cleanup(stem);
    }

    #[test]
    fn entries_file_omitted_when_empty() {
        let stem = "test_tmp_out_entries_empty";
        let symtab = SymbolTable::new();
        assert!(!write_entries(stem, &symtab).unwrap());
        assert!(!std::path::Path::new(&format!("{stem}.ent")).exists());
    }

    #[test]
    fn externs_file_lists_every_usage_site() {
        let stem = "test_tmp_out_externs";
        let usages = vec![("FOO".to_string(), 100), ("FOO".to_string(), 104)];
        assert!(write_externs(stem, &usages).unwrap());

        let body = fs::read_to_string(format!("{stem}.ext")).unwrap();
        assert_eq!("FOO 0000100\nFOO 0000104\n", body);

        cleanup(stem);
    }
}
