// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

use std::path::Path;

use clap::{CommandFactory, Parser};
use rstest::rstest;
use tempfile::TempDir;

use super::*;

fn scspkg(root: &Path, args: &[&str]) -> Result<i32> {
    let mut argv = vec!["scspkg"];
    argv.extend_from_slice(args);
    let opt = Opt::try_parse_from(argv).unwrap();
    opt.cmd.run(root)
}

#[test]
fn test_cli_definition() {
    Opt::command().debug_assert();
}

#[rstest]
#[case(&["scspkg", "init", "--module-type", "tcl"])]
#[case(&["scspkg", "-vv", "create", "foo", "bar"])]
#[case(&["scspkg", "env", "prepend", "foo", "PATH", "/a", "/b"])]
#[case(&["scspkg", "env", "pop-prepend", "foo", "PATH", "/a"])]
#[case(&["scspkg", "deps", "ls", "foo"])]
#[case(&["scspkg", "module", "unload", "foo"])]
#[case(&["scspkg", "build-profile", "--rebuild", "foo"])]
#[case(&["scspkg", "pkg", "doc", "foo", "Version", "1.0"])]
fn test_parse(#[case] argv: &[&str]) {
    assert!(Opt::try_parse_from(argv).is_ok());
}

#[rstest]
#[case(&["scspkg", "init", "--module-type", "csh"])]
#[case(&["scspkg", "create"])]
#[case(&["scspkg", "env", "prepend", "foo", "PATH"])]
#[case(&["scspkg", "deps", "add", "foo"])]
fn test_parse_rejects(#[case] argv: &[&str]) {
    assert!(Opt::try_parse_from(argv).is_err());
}

#[test]
fn test_commands_edit_modulefile() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();

    scspkg(root, &["init", "--module-type", "tcl"]).unwrap();
    scspkg(root, &["create", "foo"]).unwrap();
    scspkg(root, &["env", "set", "foo", "FOO_HOME", "/opt/foo"]).unwrap();
    scspkg(root, &["env", "prepend", "foo", "FOO_PLUGINS", "/a", "/b"]).unwrap();
    scspkg(root, &["env", "pop-prepend", "foo", "FOO_PLUGINS", "/a"]).unwrap();
    scspkg(root, &["deps", "add", "foo", "zlib"]).unwrap();
    scspkg(root, &["pkg", "doc", "foo", "Version", "1.0"]).unwrap();

    let config = scspkg::Config::load(root).unwrap();
    let store = scspkg::PackageStore::new(&config);
    let package = store.require("foo").unwrap();
    assert_eq!(package.env.list_deps(), vec!["zlib"]);
    assert_eq!(package.env.prepends["FOO_PLUGINS"], vec!["/b".to_string()]);
    assert_eq!(package.env.doc["Version"], "1.0");

    let text = store.modulefile_text("foo").unwrap();
    assert!(text.contains("module load zlib\n"));
    assert!(text.contains("setenv FOO_HOME /opt/foo\n"));
    assert!(text.contains("prepend-path FOO_PLUGINS /b\n"));
}

#[test]
fn test_init_twice_requires_force() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();

    scspkg(root, &["init"]).unwrap();
    assert!(scspkg(root, &["init"]).is_err());
    scspkg(root, &["init", "--force", "--module-type", "tcl"]).unwrap();

    let config = scspkg::Config::load(root).unwrap();
    assert_eq!(config.module_type, scspkg::ModuleType::Tcl);
}

#[test]
fn test_commands_require_config() {
    let tmp = TempDir::new().unwrap();
    assert!(scspkg(tmp.path(), &["create", "foo"]).is_err());
}

#[test]
fn test_edit_missing_package_fails() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();

    scspkg(root, &["init"]).unwrap();
    assert!(scspkg(root, &["env", "set", "ghost", "X", "1"]).is_err());
    assert!(scspkg(root, &["deps", "ls", "ghost"]).is_err());
}

#[test]
fn test_module_load_refused_for_tcl() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();

    scspkg(root, &["init", "--module-type", "tcl"]).unwrap();
    scspkg(root, &["create", "foo"]).unwrap();
    assert!(scspkg(root, &["module", "load", "foo"]).is_err());
}

#[test]
fn test_destroy_removes_package() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();

    scspkg(root, &["init"]).unwrap();
    scspkg(root, &["create", "foo", "bar"]).unwrap();
    scspkg(root, &["destroy", "foo"]).unwrap();

    let config = scspkg::Config::load(root).unwrap();
    let store = scspkg::PackageStore::new(&config);
    assert_eq!(store.list().unwrap(), vec!["bar"]);
}
