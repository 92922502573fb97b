// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Build profiles: the compiler and loader variables of an environment.

use indexmap::IndexMap;

use crate::dialect::PATH_SEPARATOR;
use crate::loader::EnvSnapshot;

#[cfg(test)]
#[path = "./profile_test.rs"]
mod profile_test;

/// Variables captured in a build profile, in output order.
pub const PROFILE_VARS: &[&str] = &[
    "PATH",
    "LD_LIBRARY_PATH",
    "LIBRARY_PATH",
    "INCLUDE",
    "CPATH",
    "CMAKE_PREFIX_PATH",
    "PYTHONPATH",
    "PKG_CONFIG_PATH",
    "CFLAGS",
    "LDFLAGS",
];

/// Capture the profile variables set in `snapshot`, split into fragments.
///
/// Unset and empty variables are left out, as are empty fragments.
pub fn capture_profile(snapshot: &EnvSnapshot) -> IndexMap<String, Vec<String>> {
    PROFILE_VARS
        .iter()
        .filter_map(|name| {
            let fragments: Vec<String> = snapshot
                .get(name)?
                .split(PATH_SEPARATOR)
                .filter(|fragment| !fragment.is_empty())
                .map(str::to_string)
                .collect();
            (!fragments.is_empty()).then(|| (name.to_string(), fragments))
        })
        .collect()
}

/// One `NAME=value` line per captured variable.
pub fn render_profile(profile: &IndexMap<String, Vec<String>>) -> String {
    profile
        .iter()
        .map(|(name, fragments)| {
            format!("{name}={}", fragments.join(&PATH_SEPARATOR.to_string()))
        })
        .collect::<Vec<_>>()
        .join("\n")
}
