// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

use rstest::rstest;

use super::*;

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[rstest]
#[case("tcl", ModuleType::Tcl)]
#[case("bash", ModuleType::Bash)]
#[case("TCL", ModuleType::Tcl)]
fn test_parse_module_type(#[case] name: &str, #[case] expected: ModuleType) {
    assert_eq!(ModuleType::parse(name).unwrap(), expected);
}

#[rstest]
fn test_parse_unknown_module_type() {
    match ModuleType::parse("lmod") {
        Err(crate::Error::UnknownDialect(name)) => assert_eq!(name, "lmod"),
        other => panic!("Expected UnknownDialect, got: {other:?}"),
    }
}

#[rstest]
fn test_module_type_round_trips_through_dialect() {
    for module_type in [ModuleType::Tcl, ModuleType::Bash] {
        assert_eq!(module_type.dialect().module_type(), module_type);
        assert_eq!(ModuleType::parse(&module_type.to_string()).unwrap(), module_type);
    }
}

#[rstest]
fn test_only_bash_loads_in_session() {
    assert!(ModuleType::Bash.dialect().loads_in_session());
    assert!(!ModuleType::Tcl.dialect().loads_in_session());
}

#[rstest]
fn test_bash_syntax() {
    let bash = ModuleType::Bash.dialect();

    assert_eq!(bash.emit_set("FOO", "bar"), "export FOO=bar");
    assert_eq!(bash.emit_unset("FOO"), "unset FOO");
    assert_eq!(
        bash.emit_prepend("PATH", &strings(&["/a/bin", "/b/bin"]), Some("/usr/bin")),
        "export PATH=/a/bin:/b/bin:/usr/bin"
    );
    assert_eq!(
        bash.emit_prepend("PATH", &strings(&["/a/bin"]), None),
        "export PATH=/a/bin"
    );
    assert_eq!(
        bash.emit_append("MANPATH", &strings(&["/a/man"]), Some("/usr/man")),
        "export MANPATH=/usr/man:/a/man"
    );
    assert_eq!(
        bash.emit_append("MANPATH", &strings(&["/a/man"]), Some("")),
        "export MANPATH=/a/man"
    );
}

#[rstest]
fn test_bash_escapes_special_values() {
    let bash = ModuleType::Bash.dialect();
    let line = bash.emit_set("SPECIAL", "value with $dollar and \"quotes\"");

    assert_eq!(line, r#"export SPECIAL="value with \$dollar and \"quotes\"""#);
    assert!(!line.contains("$dollar and \"quotes\""));
    assert_eq!(bash.emit_set("EMPTY", ""), r#"export EMPTY="""#);
}

#[rstest]
fn test_tcl_syntax() {
    let tcl = ModuleType::Tcl.dialect();

    assert_eq!(tcl.emit_set("FOO_HOME", "/opt/foo"), "setenv FOO_HOME /opt/foo");
    assert_eq!(tcl.emit_unset("FOO_HOME"), "unsetenv FOO_HOME");
    assert_eq!(
        tcl.emit_prepend("PATH", &strings(&["/opt/foo/bin"]), Some("/usr/bin")),
        "prepend-path PATH /opt/foo/bin"
    );
    assert_eq!(
        tcl.emit_append("MANPATH", &strings(&["/opt/foo/man"]), None),
        "append-path MANPATH /opt/foo/man"
    );
    assert_eq!(
        tcl.emit_set("GREETING", "hello [world]"),
        r#"setenv GREETING "hello \[world\]""#
    );
}
