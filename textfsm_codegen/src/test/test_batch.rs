// TextFSM: Template-driven parsing of network device CLI output
// Copyright (C) 2021  Tibor Schneider
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

use crate::{generate_dir, CodegenError};

use std::fs;
use std::path::PathBuf;

const GOOD: &str = "Value NAME (\\S+)\n\nStart\n  ^name ${NAME} -> Record\n";
const BAD: &str = "Value NAME (\\S+)\n\nStart\n  ^name ${ADDRESS} -> Record\n";

#[test]
fn generate_directory() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let target = output.path().join("generated");

    fs::write(input.path().join("show_names.textfsm"), GOOD).unwrap();
    fs::write(input.path().join("show_addresses.textfsm"), GOOD).unwrap();
    fs::write(input.path().join("broken.textfsm"), BAD).unwrap();
    fs::write(input.path().join("README.md"), "not a template").unwrap();

    let report = generate_dir(input.path(), &target).unwrap();
    assert!(!report.is_success());

    let generated: Vec<PathBuf> = report.generated.clone();
    assert_eq!(
        generated,
        vec![target.join("show_addresses.rs"), target.join("show_names.rs"), target.join("mod.rs")]
    );

    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, input.path().join("broken.textfsm"));
    assert!(matches!(
        report.failed[0].1,
        CodegenError::Template(textfsm::Error::UndefinedValue { .. })
    ));

    let mod_rs = fs::read_to_string(target.join("mod.rs")).unwrap();
    assert!(mod_rs.ends_with("pub mod show_addresses;\npub mod show_names;\n"));

    let names = fs::read_to_string(target.join("show_names.rs")).unwrap();
    assert!(names.contains("pub struct ShowNames {"));
    assert!(names.contains("pub struct ShowNamesRow {"));
}

#[test]
fn module_name_collision() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    fs::write(input.path().join("Show-Interface.textfsm"), GOOD).unwrap();
    fs::write(input.path().join("show_interface.textfsm"), BAD).unwrap();

    let report = generate_dir(input.path(), output.path()).unwrap();
    assert_eq!(
        report.generated,
        vec![output.path().join("show_interface.rs"), output.path().join("mod.rs")]
    );

    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, input.path().join("show_interface.textfsm"));
    match &report.failed[0].1 {
        CodegenError::DuplicateModule { module, first } => {
            assert_eq!(module, "show_interface");
            assert_eq!(first, &input.path().join("Show-Interface.textfsm"));
        }
        other => panic!("expected a duplicate module, got {:?}", other),
    }

    // the first template is kept
    let code = fs::read_to_string(output.path().join("show_interface.rs")).unwrap();
    assert!(code.contains("from the Show-Interface template"));
    let mod_rs = fs::read_to_string(output.path().join("mod.rs")).unwrap();
    assert_eq!(mod_rs.matches("pub mod show_interface;").count(), 1);
}

#[test]
fn regenerating_is_deterministic() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    fs::write(input.path().join("show_names.textfsm"), GOOD).unwrap();

    generate_dir(input.path(), output.path()).unwrap();
    let first = fs::read_to_string(output.path().join("show_names.rs")).unwrap();
    generate_dir(input.path(), output.path()).unwrap();
    let second = fs::read_to_string(output.path().join("show_names.rs")).unwrap();
    assert_eq!(first, second);
}

#[test]
fn missing_input_directory() {
    let output = tempfile::tempdir().unwrap();
    let missing = output.path().join("does_not_exist");
    match generate_dir(&missing, output.path()) {
        Err(CodegenError::Io { path, .. }) => assert_eq!(path, missing),
        other => panic!("expected an I/O error, got {:?}", other),
    }
}
