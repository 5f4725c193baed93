// Symbol Table
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

//! Insertion-ordered symbol table (§4.4). Mirrors
//! `original_source/symbols_list.c`'s `add_symbol`/`is_label_defined`/
//! `update_data_labels` without its linked-list plumbing: one `Vec`, plus a
//! FIFO queue for unresolved operand references (I1–I3).

use std::collections::VecDeque;

#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum SymbolKind {
    Code,
    Data,
    Extern,
    Entry,
}

#[derive(Clone, Debug)]
pub struct Symbol {
    pub name: String,
    pub address: i32,
    pub kind: SymbolKind,
}

/// An unresolved operand reference recorded at the IC of the code word
/// that needs patching (§4.3's "operand label" record).
#[derive(Clone, Debug)]
pub struct OperandRef {
    pub name: String,
    pub slot_ic: i32,
}

/// Returned by [`SymbolTable::define`] when `name` already names a
/// differently- or identically-kinded symbol.
#[derive(Debug)]
pub struct DefineConflict {
    pub existing_kind: SymbolKind,
}

#[derive(Default)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
    operands: VecDeque<OperandRef>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defines a new CODE, DATA, or EXTERN symbol. Fails if `name` already
    /// names a CODE/DATA/EXTERN symbol (I1); the caller decides whether
    /// that's a hard error or (for repeated identical `.extern`s) a warning.
    pub fn define(&mut self, name: &str, address: i32, kind: SymbolKind) -> Result<(), DefineConflict> {
        debug_assert!(matches!(kind, SymbolKind::Code | SymbolKind::Data | SymbolKind::Extern));
        if let Some(existing) = self.lookup_defined(name) {
            return Err(DefineConflict { existing_kind: existing.kind });
        }
        self.symbols.push(Symbol { name: name.to_string(), address, kind });
        Ok(())
    }

    /// Records that the code word at `slot_ic` needs `name`'s final
    /// address once it is resolved in the second pass. Duplicates across
    /// distinct slots are expected and kept.
    pub fn reference(&mut self, name: &str, slot_ic: i32) {
        self.operands.push_back(OperandRef { name: name.to_string(), slot_ic });
    }

    /// Pops the next unresolved operand reference, in the order the first
    /// pass recorded them — which matches the order the second pass
    /// encounters provisional markers, since both passes walk the code
    /// store by increasing IC.
    pub fn pop_operand(&mut self) -> Option<OperandRef> {
        self.operands.pop_front()
    }

    pub fn lookup_defined(&self, name: &str) -> Option<&Symbol> {
        self.symbols.iter().find(|s| s.name == name)
    }

    /// Promotes an existing CODE or DATA symbol to ENTRY. Fails if no such
    /// symbol exists, or if it exists only as EXTERN.
    pub fn promote_to_entry(&mut self, name: &str) -> Result<(), ()> {
        let symbol = self
            .symbols
            .iter_mut()
            .find(|s| s.name == name && matches!(s.kind, SymbolKind::Code | SymbolKind::Data));
        match symbol {
            Some(s) => {
                s.kind = SymbolKind::Entry;
                Ok(())
            }
            None => Err(()),
        }
    }

    /// Adds `ic_final` to every DATA symbol's address, once the final
    /// instruction counter is known (I2: data addresses follow all code).
    pub fn rebase_data(&mut self, ic_final: i32) {
        for symbol in &mut self.symbols {
            if symbol.kind == SymbolKind::Data {
                symbol.address += ic_final;
            }
        }
    }

    pub fn has_entries(&self) -> bool {
        self.symbols.iter().any(|s| s.kind == SymbolKind::Entry)
    }

    /// ENTRY symbols in insertion order, for the `.ent` writer.
    pub fn entries(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter().filter(|s| s.kind == SymbolKind::Entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn define_then_lookup() {
        let mut table = SymbolTable::new();
        table.define("LOOP", 100, SymbolKind::Code).unwrap();

        let sym = table.lookup_defined("LOOP").unwrap();
        assert_eq!(100, sym.address);
        assert_eq!(SymbolKind::Code, sym.kind);
    }

    #[test]
    fn define_conflict_reports_existing_kind() {
        let mut table = SymbolTable::new();
        table.define("X", 100, SymbolKind::Code).unwrap();

        let err = table.define("X", 0, SymbolKind::Extern).unwrap_err();
        assert_eq!(SymbolKind::Code, err.existing_kind);
    }

    #[test]
    fn operand_queue_is_fifo() {
        let mut table = SymbolTable::new();
        table.reference("A", 100);
        table.reference("B", 101);

        assert_eq!("A", table.pop_operand().unwrap().name);
        assert_eq!("B", table.pop_operand().unwrap().name);
        assert!(table.pop_operand().is_none());
    }

    #[test]
    fn promote_to_entry_requires_code_or_data() {
        let mut table = SymbolTable::new();
        table.define("EXT", 0, SymbolKind::Extern).unwrap();
        assert!(table.promote_to_entry("EXT").is_err());
        assert!(table.promote_to_entry("MISSING").is_err());

        table.define("LOOP", 100, SymbolKind::Code).unwrap();
        table.promote_to_entry("LOOP").unwrap();
        assert_eq!(SymbolKind::Entry, table.lookup_defined("LOOP").unwrap().kind);
    }

    #[test]
    fn rebase_data_shifts_only_data_symbols() {
        let mut table = SymbolTable::new();
        table.define("CODE_SYM", 100, SymbolKind::Code).unwrap();
        table.define("DATA_SYM", 0, SymbolKind::Data).unwrap();

        table.rebase_data(105);

        assert_eq!(100, table.lookup_defined("CODE_SYM").unwrap().address);
        assert_eq!(105, table.lookup_defined("DATA_SYM").unwrap().address);
    }

    #[test]
    fn entries_iterate_in_insertion_order() {
        let mut table = SymbolTable::new();
        table.define("B", 101, SymbolKind::Code).unwrap();
        table.define("A", 100, SymbolKind::Code).unwrap();
        table.promote_to_entry("B").unwrap();
        table.promote_to_entry("A").unwrap();

        let names: Vec<&str> = table.entries().map(|s| s.name.as_str()).collect();
        assert_eq!(vec!["B", "A"], names);
        assert!(table.has_entries());
    }
}
