// asm24 Binary Entry Point
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

use clap::Parser;

use asm24::cli::Cli;
use asm24::pipeline::assemble_one;

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let mut all_ok = true;
    for stem in &cli.inputs {
        if !assemble_one(stem) {
            all_ok = false;
        }
    }

    if !all_ok {
        std::process::exit(1);
    }
}
