// Macro Store and Pre-processor
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

//! The macro store and the `.as` → `.am` pre-processor (§4.1). Grounded on
//! `original_source/macro_list.c` (`add_macro`/`append_macro_content`) for
//! the store, and the most complete `pre_proc.c`/`macro.c` variant (per
//! §9's "duplicate/legacy source files" note) for the state machine — kept
//! here as a single-pass scan rather than the original's separate
//! line-buffering pass.

use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::diag::Diagnostics;
use crate::error::AssemblerError;
use crate::isa::is_reserved_word;
use crate::lex::{first_word, is_blank, is_comment, is_standalone_word, is_valid_name_shape, starts_with_word, MAX_LINE_LENGTH};

pub const MAX_MACRO_NAME_LENGTH: usize = 30;

#[derive(Clone)]
pub struct Macro {
    pub name: String,
    pub lines: Vec<String>,
}

/// Insertion-ordered macro definitions (`original_source/macro_list.c`'s
/// linked list, flattened to a `Vec`).
#[derive(Default)]
pub struct MacroStore {
    macros: Vec<Macro>,
}

impl MacroStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_macro_name(&self, name: &str) -> bool {
        self.macros.iter().any(|m| m.name == name)
    }

    pub fn add(&mut self, name: &str) {
        self.macros.push(Macro { name: name.to_string(), lines: Vec::new() });
    }

    pub fn append_line(&mut self, line: &str) {
        if let Some(m) = self.macros.last_mut() {
            m.lines.push(line.to_string());
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&Macro> {
        self.macros.iter().find(|m| m.name == name)
    }

    /// Names of every macro defined during pre-processing, in declaration
    /// order. Carried into pass 1 so a label can't shadow a macro name.
    pub fn names(&self) -> Vec<String> {
        self.macros.iter().map(|m| m.name.clone()).collect()
    }
}

enum State {
    Top,
    InsideMacro,
}

/// The result of expanding `<stem>.as` into `<stem>.am`: the accumulated
/// diagnostics (the caller should treat any errors as failure — the `.am`
/// file is removed automatically in that case, per §4.1's contract) and
/// the names of every macro declared, needed by pass 1 to reject a label
/// that collides with one.
pub struct PreprocessResult {
    pub diagnostics: Diagnostics,
    pub macro_names: Vec<String>,
}

pub fn preprocess(stem: &str) -> Result<PreprocessResult, AssemblerError> {
    if stem.ends_with(".as") || stem.ends_with(".am") {
        return Err(AssemblerError::IllegalFileName(stem.to_string()));
    }

    let input_path = PathBuf::from(format!("{stem}.as"));
    let output_path = PathBuf::from(format!("{stem}.am"));
    let input_name = input_path.to_string_lossy().into_owned();

    let file = fs::File::open(&input_path).map_err(|source| AssemblerError::CannotOpen {
        path: input_path.clone(),
        source,
    })?;
    let mut output = fs::File::create(&output_path).map_err(|source| AssemblerError::CannotCreate {
        path: output_path.clone(),
        source,
    })?;

    let mut diagnostics = Diagnostics::new();
    let mut macros = MacroStore::new();
    let mut state = State::Top;

    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line_no = (index + 1) as u32;
        let line = line.map_err(|source| AssemblerError::CannotOpen { path: input_path.clone(), source })?;

        if line.len() > MAX_LINE_LENGTH {
            diagnostics.error(&input_name, line_no, format!("line exceeds {MAX_LINE_LENGTH} characters"));
            continue;
        }

        match state {
            State::Top => process_top_line(&line, line_no, &input_name, &mut macros, &mut state, &mut output, &mut diagnostics)?,
            State::InsideMacro => process_macro_line(&line, line_no, &input_name, &mut macros, &mut state, &mut diagnostics),
        }
    }

    if diagnostics.has_errors() {
        let _ = fs::remove_file(&output_path);
    }

    Ok(PreprocessResult { macro_names: macros.names(), diagnostics })
}

#[allow(clippy::too_many_arguments)]
fn process_top_line(
    line: &str,
    line_no: u32,
    file_name: &str,
    macros: &mut MacroStore,
    state: &mut State,
    output: &mut fs::File,
    diagnostics: &mut Diagnostics,
) -> Result<(), AssemblerError> {
    if is_blank(line) || is_comment(line) {
        emit(output, line)?;
        return Ok(());
    }

    if starts_with_word(line, "mcro") {
        match parse_macro_declaration(line, macros) {
            Ok(name) => {
                macros.add(&name);
                *state = State::InsideMacro;
            }
            Err(message) => diagnostics.error(file_name, line_no, message),
        }
        return Ok(());
    }

    if let Some((first, _)) = first_word(line) {
        if macros.is_macro_name(first) {
            if let Some(m) = macros.lookup(first) {
                for body_line in m.lines.clone() {
                    emit(output, &body_line)?;
                }
            }
            return Ok(());
        }
    }

    if let Some(pos) = line.find(';') {
        if pos != 0 {
            diagnostics.error(file_name, line_no, "inline comments are not supported; comments must start the line");
            return Ok(());
        }
    }

    emit(output, line)
}

fn process_macro_line(
    line: &str,
    line_no: u32,
    file_name: &str,
    macros: &mut MacroStore,
    state: &mut State,
    diagnostics: &mut Diagnostics,
) {
    if is_standalone_word(line, "mcroend") {
        *state = State::Top;
        return;
    }
    if starts_with_word(line, "mcroend") {
        diagnostics.error(file_name, line_no, "mcroend must be alone on its line");
        return;
    }
    macros.append_line(line);
}

fn parse_macro_declaration(line: &str, macros: &MacroStore) -> Result<String, String> {
    let (_, rest) = first_word(line).expect("caller verified line starts with mcro");
    let mut tokens = rest.split_whitespace();
    let name = tokens.next().ok_or_else(|| "mcro must be followed by a macro name".to_string())?;
    if tokens.next().is_some() {
        return Err("mcro declaration must have exactly one name".to_string());
    }
    if name.len() > MAX_MACRO_NAME_LENGTH || !is_valid_name_shape(name, true) {
        return Err(format!("{name:?} is not a valid macro name"));
    }
    if is_reserved_word(name) || name == "mcro" {
        return Err(format!("{name:?} is a reserved word and cannot be used as a macro name"));
    }
    if macros.is_macro_name(name) {
        return Err(format!("macro {name:?} is already defined"));
    }
    Ok(name.to_string())
}

fn emit(output: &mut fs::File, line: &str) -> Result<(), AssemblerError> {
    writeln!(output, "{line}").map_err(|source| AssemblerError::CannotWrite {
        path: Path::new("<.am output>").to_path_buf(),
        source,
    })
}
