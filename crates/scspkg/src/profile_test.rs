// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

use rstest::rstest;

use super::*;

#[rstest]
fn test_capture_profile() {
    let snapshot = EnvSnapshot::from_iter([
        ("HOME", "/home/user"),
        ("LDFLAGS", "-L/opt/lib"),
        ("PATH", "/usr/local/bin::/usr/bin"),
        ("CPATH", ""),
        ("PKG_CONFIG_PATH", "/opt/lib/pkgconfig"),
    ]);

    let profile = capture_profile(&snapshot);

    let names: Vec<&str> = profile.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["PATH", "PKG_CONFIG_PATH", "LDFLAGS"]);
    assert_eq!(profile["PATH"], vec!["/usr/local/bin", "/usr/bin"]);
}

#[rstest]
fn test_render_profile() {
    let snapshot = EnvSnapshot::from_iter([("PATH", "/a:/b"), ("CFLAGS", "-O2 -g")]);

    let text = render_profile(&capture_profile(&snapshot));

    assert_eq!(text, "PATH=/a:/b\nCFLAGS=-O2 -g");
}

#[rstest]
fn test_empty_profile() {
    let profile = capture_profile(&EnvSnapshot::default());
    assert!(profile.is_empty());
    assert_eq!(render_profile(&profile), "");
}
