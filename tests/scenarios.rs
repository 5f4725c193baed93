// End-to-End Assembly Scenarios
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

//! Drives [`asm24::pipeline::assemble_one`] over whole `.as` programs and
//! checks the files it leaves behind, covering the scenarios a reviewer
//! would hand-trace through both passes.

use std::fs;
use std::path::Path;

use asm24::pipeline::assemble_one;

fn write_source(stem: &str, contents: &str) {
    fs::write(format!("{stem}.as"), contents).unwrap();
}

fn cleanup(stem: &str) {
    for ext in ["as", "am", "ob", "ent", "ext"] {
        let _ = fs::remove_file(format!("{stem}.{ext}"));
    }
}

fn read_ob(stem: &str) -> String {
    fs::read_to_string(format!("{stem}.ob")).unwrap()
}

#[test]
fn minimal_data_program() {
    let stem = "test_tmp_s1_minimal_data";
    write_source(stem, "; test\nLEN: .data 6,-9,15\n");

    assert!(assemble_one(stem));

    let body = read_ob(stem);
    let mut lines = body.lines();
    assert_eq!(Some("3 0"), lines.next());
    assert_eq!(Some("0000100 000006"), lines.next());
    assert_eq!(Some("0000101 fffff7"), lines.next());
    assert_eq!(Some("0000102 00000f"), lines.next());
    assert_eq!(None, lines.next());

    assert!(!Path::new(&format!("{stem}.ent")).exists());
    assert!(!Path::new(&format!("{stem}.ext")).exists());

    cleanup(stem);
}

#[test]
fn immediate_and_register_operands() {
    let stem = "test_tmp_s2_imm_reg";
    write_source(stem, "START: mov #-1, r3\n       stop\n");

    assert!(assemble_one(stem));

    let body = read_ob(stem);
    let mut lines = body.lines();
    assert_eq!(Some("3 0"), lines.next());
    assert_eq!(Some("0000100 001b04"), lines.next());
    assert_eq!(Some("0000101 fffffc"), lines.next());
    assert_eq!(Some("0000102 3c0004"), lines.next());
    assert_eq!(None, lines.next());

    cleanup(stem);
}

#[test]
fn relative_reference_to_extern_is_rejected_and_no_object_file_written() {
    let stem = "test_tmp_s3_extern_relative";
    write_source(stem, ".extern FOO\n       jmp &FOO\n       stop\n");

    assert!(!assemble_one(stem));
    assert!(!Path::new(&format!("{stem}.ob")).exists());

    cleanup(stem);
}

#[test]
fn macro_expansion_inlines_both_call_sites() {
    let stem = "test_tmp_s4_macro";
    write_source(stem, "mcro GREET\nmov r1, r2\nmcroend\nGREET\nGREET\n");

    assert!(assemble_one(stem));

    let expanded = fs::read_to_string(format!("{stem}.am")).unwrap();
    assert_eq!("mov r1, r2\nmov r1, r2\n", expanded);

    let body = read_ob(stem);
    let mut lines = body.lines();
    assert_eq!(Some("2 0"), lines.next());
    assert_eq!(None, lines.nth(2));

    cleanup(stem);
}

#[test]
fn forward_local_reference_resolves_in_second_pass() {
    let stem = "test_tmp_s5_forward_local";
    write_source(stem, "       jmp END\nEND:   stop\n");

    assert!(assemble_one(stem));

    let body = read_ob(stem);
    let mut lines = body.lines();
    assert_eq!(Some("3 0"), lines.next());
    assert_eq!(Some("0000100 24080c"), lines.next());
    assert_eq!(Some("0000101 000332"), lines.next());
    assert_eq!(Some("0000102 3c0004"), lines.next());
    assert_eq!(None, lines.next());

    cleanup(stem);
}

#[test]
fn entry_promotion_writes_ent_file() {
    let stem = "test_tmp_s6_entry";
    write_source(stem, "VAL: .data 42\n.entry VAL\n");

    assert!(assemble_one(stem));

    let body = read_ob(stem);
    let mut lines = body.lines();
    assert_eq!(Some("1 0"), lines.next());
    assert_eq!(Some("0000100 00002a"), lines.next());
    assert_eq!(None, lines.next());

    let entries = fs::read_to_string(format!("{stem}.ent")).unwrap();
    assert_eq!("VAL 0000100\n", entries);
    assert!(!Path::new(&format!("{stem}.ext")).exists());

    cleanup(stem);
}

#[test]
fn reserved_word_used_as_label_fails_the_whole_file() {
    let stem = "test_tmp_reserved_label";
    write_source(stem, "stop: mov r1, r2\n");

    assert!(!assemble_one(stem));
    assert!(!Path::new(&format!("{stem}.ob")).exists());

    cleanup(stem);
}

#[test]
fn empty_data_directive_is_an_error() {
    let stem = "test_tmp_empty_data";
    write_source(stem, "X: .data\nstop\n");

    assert!(!assemble_one(stem));
    assert!(!Path::new(&format!("{stem}.ob")).exists());

    cleanup(stem);
}

#[test]
fn redeclaring_extern_warns_but_colliding_with_a_local_label_fails() {
    let stem = "test_tmp_extern_redeclare";
    write_source(stem, ".extern FOO\n.extern FOO\nstop\n");
    assert!(assemble_one(stem));
    cleanup(stem);

    let stem2 = "test_tmp_extern_local_collision";
    write_source(stem2, "FOO: stop\n.extern FOO\n");
    assert!(!assemble_one(stem2));
    assert!(!Path::new(&format!("{stem2}.ob")).exists());
    cleanup(stem2);
}

#[test]
fn undefined_entry_name_fails_the_whole_file() {
    let stem = "test_tmp_entry_undefined";
    write_source(stem, "stop\n.entry GHOST\n");

    assert!(!assemble_one(stem));
    assert!(!Path::new(&format!("{stem}.ob")).exists());

    cleanup(stem);
}

#[test]
fn multiple_extern_usages_each_get_their_own_ext_line() {
    let stem = "test_tmp_extern_multi_use";
    write_source(stem, ".extern FOO\n       jmp FOO\n       jmp FOO\n");

    assert!(assemble_one(stem));

    let externs = fs::read_to_string(format!("{stem}.ext")).unwrap();
    let mut lines = externs.lines();
    assert_eq!(Some("FOO 0000101"), lines.next());
    assert_eq!(Some("FOO 0000103"), lines.next());
    assert_eq!(None, lines.next());

    cleanup(stem);
}
