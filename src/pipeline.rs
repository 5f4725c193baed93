// Pipeline Orchestration
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

//! Drives pre-process → pass 1 → pass 2 → output for one input stem (§5).
//! Every store is freshly constructed per call and dropped at return; no
//! state survives across inputs.

use crate::diag::Diagnostics;
use crate::error::AssemblerError;
use crate::{first_pass, macros, output, second_pass};

/// Assembles `<stem>.as`, returning `true` iff `.ob` (and, if applicable,
/// `.ent`/`.ext`) were written. Any failure — I/O, or accumulated
/// diagnostics — prints its errors to stdout and returns `false`; the
/// caller moves on to the next input (§5, §6).
pub fn assemble_one(stem: &str) -> bool {
    log::info!("assembling {stem}");

    let preprocessed = match macros::preprocess(stem) {
        Ok(result) => result,
        Err(error) => return report_fatal(stem, error),
    };
    preprocessed.diagnostics.print();
    if preprocessed.diagnostics.has_errors() {
        return false;
    }
    log::debug!("{stem}: pre-processing produced {stem}.am");

    let fp = match first_pass::run(stem, &preprocessed.macro_names) {
        Ok(result) => result,
        Err(error) => return report_fatal(stem, error),
    };
    fp.diagnostics.print();
    if fp.diagnostics.has_errors() {
        return false;
    }
    log::debug!("{stem}: first pass complete, IC_final={}", fp.ic_final);

    let first_pass::FirstPassResult { mut symtab, mut code, data, ic_final, .. } = fp;

    let sp = match second_pass::run(stem, &mut symtab, &mut code) {
        Ok(result) => result,
        Err(error) => return report_fatal(stem, error),
    };
    sp.diagnostics.print();
    if sp.diagnostics.has_errors() {
        return false;
    }
    log::debug!("{stem}: second pass complete");

    if let Err(error) = output::write_object(stem, &code, &data, ic_final) {
        return report_fatal(stem, error);
    }
    if let Err(error) = output::write_entries(stem, &symtab) {
        return report_fatal(stem, error);
    }
    if let Err(error) = output::write_externs(stem, &sp.externs_used) {
        return report_fatal(stem, error);
    }

    log::info!("{stem}: assembled successfully");
    true
}

fn report_fatal(stem: &str, error: AssemblerError) -> bool {
    log::error!("{stem}: {error}");
    let mut diagnostics = Diagnostics::new();
    diagnostics.error_no_line(stem, error.to_string());
    diagnostics.print();
    false
}
