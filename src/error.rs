// Fatal Errors
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

//! Process-level failures (§7: "I/O failure", "Memory exhaustion").
//!
//! These abort the current file's pipeline outright; they are distinct from
//! [`crate::diag::Diagnostics`], which accumulates non-fatal per-line
//! problems and never stops a pass early.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssemblerError {
    #[error("illegal input name {0:?}: must not already carry a .as extension")]
    IllegalFileName(String),

    #[error("can't open {path:?}: {source}")]
    CannotOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("can't create {path:?}: {source}")]
    CannotCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("can't write {path:?}: {source}")]
    CannotWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("memory capacity exceeded: assembler machine-coding suspended at word {0}")]
    MemoryExceeded(usize),
}
