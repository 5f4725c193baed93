// Command-Line Interface
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

//! `asm24 <name>...` (§6): one or more input stems, each processed
//! without its extension.

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "asm24", about = "Two-pass assembler for a 24-bit word machine")]
pub struct Cli {
    /// Input names, without the `.as` extension.
    #[arg(required = true)]
    pub inputs: Vec<String>,
}
