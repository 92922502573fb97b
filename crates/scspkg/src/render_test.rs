// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

use rstest::rstest;

use super::*;
use crate::{Config, ModuleType, PackageLayout};

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn foo_skeleton() -> EnvMutationSet {
    // packages live directly below /opt
    let mut config = Config::new("/opt", ModuleType::Tcl);
    config.pkg_dir = "/opt".into();
    let layout = PackageLayout::new(&config, "foo").unwrap();
    EnvMutationSet::new(&layout)
}

fn position(text: &str, line: &str) -> usize {
    text.lines()
        .position(|l| l == line)
        .unwrap_or_else(|| panic!("missing line {line:?} in:\n{text}"))
}

#[rstest]
fn test_tcl_end_to_end_example() {
    let mut set = foo_skeleton();
    set.set_env("FOO_HOME", "/opt/foo");
    set.prepend_env("FOO_PLUGINS", &strings(&["/opt/foo/plugins"]));

    let text = render_modulefile(&ModuleType::Tcl.dialect(), "foo", &set);

    assert!(text.starts_with("#%Module1.0\n"));
    let setenv = position(&text, "setenv FOO_HOME /opt/foo");
    let path = position(&text, "prepend-path PATH /opt/foo/bin");
    let sbin = position(&text, "prepend-path PATH /opt/foo/sbin");
    let plugins = position(&text, "prepend-path FOO_PLUGINS /opt/foo/plugins");
    assert!(setenv < path);
    assert!(path < sbin);
    assert!(sbin < plugins);
}

#[rstest]
fn test_tcl_section_order() {
    let mut set = EnvMutationSet::default();
    set.set_doc("Name", "foo");
    set.set_doc("Version", "1.0");
    set.add_deps(&strings(&["zlib", "hdf5"]));
    set.set_env("FOO_HOME", "/opt/foo");
    set.prepend_env("X", &strings(&["a"]));
    set.prepend_env("X", &strings(&["b"]));
    set.prepend_env("EMPTY", &[]);
    set.append_env("MANPATH", &strings(&["/opt/foo/man"]));

    let text = render_modulefile(&ModuleType::Tcl.dialect(), "foo", &set);

    let expected = "\
#%Module1.0
module-whatis \"Name: foo\"
module-whatis \"Version: 1.0\"
module load zlib
module load hdf5
setenv FOO_HOME /opt/foo
prepend-path X a
prepend-path X b
append-path MANPATH /opt/foo/man
";
    assert_eq!(text, expected);
}

#[rstest]
fn test_bash_is_a_loading_stub() {
    let mut set = foo_skeleton();
    set.add_deps(&strings(&["zlib"]));
    set.set_env("FOO_HOME", "/opt/foo");

    let text = render_modulefile(&ModuleType::Bash.dialect(), "foo", &set);

    let expected = "\
#!/bin/bash
# \"Name: foo\"
# \"Version: None\"
# \"doc: None\"
eval \"$(scspkg module load zlib)\"
eval \"$(scspkg module load foo)\"
";
    assert_eq!(text, expected);
    assert!(!text.contains("FOO_HOME"));
    assert!(!text.contains("/opt/foo/bin"));
}

#[rstest]
#[case(ModuleType::Tcl)]
#[case(ModuleType::Bash)]
fn test_render_is_deterministic(#[case] module_type: ModuleType) {
    let mut set = foo_skeleton();
    set.add_deps(&strings(&["b", "a", "c"]));
    set.set_env("Z", "1");
    set.set_env("A", "2");

    let dialect = module_type.dialect();
    let first = render_modulefile(&dialect, "foo", &set);
    let second = render_modulefile(&dialect, "foo", &set.clone());
    assert_eq!(first, second);
}

#[rstest]
fn test_bash_doc_lines_stay_comments() {
    let mut set = foo_skeleton();
    set.set_doc("doc", "first\nrm -rf /tmp/x");
    // documents edited by hand bypass set_doc
    set.doc.insert("notes".to_string(), "a\necho pwned".to_string());

    let text = render_modulefile(&ModuleType::Bash.dialect(), "foo", &set);
    for line in text.lines() {
        assert!(
            line.starts_with('#') || line.starts_with("eval "),
            "unexpected script line {line:?} in:\n{text}"
        );
    }
    assert!(text.contains("# \"doc: first rm -rf /tmp/x\"\n"));
    assert!(text.contains("# \"notes: a echo pwned\"\n"));
}

#[rstest]
#[case(ModuleType::Tcl, "module load \"my dep\"")]
#[case(ModuleType::Bash, "eval \"$(scspkg module load \"my dep\")\"")]
fn test_dependency_names_are_quoted(#[case] module_type: ModuleType, #[case] expected: &str) {
    let mut set = foo_skeleton();
    set.add_deps(&strings(&["my dep"]));

    let text = render_modulefile(&module_type.dialect(), "foo", &set);
    assert!(text.lines().any(|line| line == expected), "missing {expected:?} in:\n{text}");
}
