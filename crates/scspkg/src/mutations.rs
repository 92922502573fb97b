// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! The environment changes a package makes when it is loaded.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::layout::PackageLayout;

#[cfg(test)]
#[path = "./mutations_test.rs"]
mod mutations_test;

/// Variables prepended to by every new package, with the package-root
/// relative fragments they start with.
const DEFAULT_PREPENDS: &[(&str, &[&[&str]])] = &[
    ("PATH", &[&["bin"], &["sbin"]]),
    ("LD_LIBRARY_PATH", &[&["lib"], &["lib64"]]),
    ("LIBRARY_PATH", &[&["lib"], &["lib64"]]),
    ("INCLUDE", &[]),
    ("CPATH", &[]),
    ("CMAKE_PREFIX_PATH", &[&["cmake"]]),
    ("PYTHONPATH", &[&["bin"], &["lib"], &["lib64"]]),
    (
        "PKG_CONFIG_PATH",
        &[&["lib", "pkgconfig"], &["lib64", "pkgconfig"]],
    ),
    ("CFLAGS", &[]),
    ("LDFLAGS", &[]),
];

/// Documentation, dependencies and environment changes of one package.
///
/// This is the persisted document of a package. All sections keep
/// insertion order so that rendering is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct EnvMutationSet {
    /// Free text documentation, always containing `Name`.
    #[serde(default)]
    pub doc: IndexMap<String, String>,

    /// Names of packages loaded before this one.
    #[serde(default, with = "deps_format")]
    pub deps: IndexSet<String>,

    /// Unconditional assignments.
    #[serde(default)]
    pub setenvs: IndexMap<String, String>,

    /// Fragments placed before the current value of a variable.
    #[serde(default)]
    pub prepends: IndexMap<String, Vec<String>>,

    /// Fragments placed after the current value of a variable.
    #[serde(default)]
    pub appends: IndexMap<String, Vec<String>>,
}

impl EnvMutationSet {
    /// The skeleton for a freshly created package.
    pub fn new(layout: &PackageLayout) -> Self {
        let mut set = Self::default();
        set.reset_to_default(layout);
        set
    }

    /// Replace every section with the skeleton for `layout`.
    pub fn reset_to_default(&mut self, layout: &PackageLayout) {
        self.doc = IndexMap::from([
            ("Name".to_string(), layout.name().to_string()),
            ("Version".to_string(), "None".to_string()),
            ("doc".to_string(), "None".to_string()),
        ]);
        self.deps = IndexSet::new();
        self.setenvs = IndexMap::new();
        self.prepends = DEFAULT_PREPENDS
            .iter()
            .map(|(name, fragments)| {
                let fragments = fragments.iter().map(|c| layout.fragment(c)).collect();
                (name.to_string(), fragments)
            })
            .collect();
        self.appends = IndexMap::new();
    }

    /// Make sure `doc` names the package.
    pub(crate) fn ensure_name(&mut self, name: &str) {
        if !self.doc.contains_key("Name") {
            self.doc.shift_insert(0, "Name".to_string(), name.to_string());
        }
    }

    /// Set a documentation entry such as `Version` or `doc`.
    ///
    /// Line breaks in the key or value are replaced by spaces.
    pub fn set_doc(&mut self, key: &str, value: &str) {
        self.doc.insert(single_line(key), single_line(value));
    }

    /// Assign `value` to `name`, dropping any prepends or appends to it.
    pub fn set_env(&mut self, name: &str, value: &str) {
        self.setenvs.insert(name.to_string(), value.to_string());
        self.prepends.shift_remove(name);
        self.appends.shift_remove(name);
    }

    /// Add fragments to the tail of the prepend list of `name`.
    pub fn prepend_env(&mut self, name: &str, values: &[String]) {
        self.prepends
            .entry(name.to_string())
            .or_default()
            .extend(values.iter().cloned());
    }

    /// Add fragments to the tail of the append list of `name`.
    pub fn append_env(&mut self, name: &str, values: &[String]) {
        self.appends
            .entry(name.to_string())
            .or_default()
            .extend(values.iter().cloned());
    }

    /// Forget every change made to `name`.
    ///
    /// Returns whether anything was removed.
    pub fn remove_env(&mut self, name: &str) -> bool {
        let set = self.setenvs.shift_remove(name).is_some();
        let prepend = self.prepends.shift_remove(name).is_some();
        let append = self.appends.shift_remove(name).is_some();
        let removed = set || prepend || append;
        if !removed {
            tracing::warn!("{name} is not modified by this package");
        }
        removed
    }

    /// Remove one fragment from the prepend list of `name`.
    ///
    /// Returns whether the fragment was found.
    pub fn pop_prepend(&mut self, name: &str, fragment: &str) -> bool {
        let Some(prepends) = self.prepends.get_mut(name) else {
            tracing::warn!("{name} is not a prepend variable");
            return false;
        };
        match prepends.iter().position(|f| f == fragment) {
            Some(index) => {
                prepends.remove(index);
                true
            }
            None => {
                tracing::warn!("{fragment} not in {name} prepend variable");
                false
            }
        }
    }

    /// Record dependencies, keeping the first insertion position of each.
    pub fn add_deps(&mut self, names: &[String]) {
        self.deps.extend(names.iter().cloned());
    }

    /// Drop dependencies. Returns how many were removed.
    pub fn pop_deps(&mut self, names: &[String]) -> usize {
        let mut removed = 0;
        for name in names {
            if self.deps.shift_remove(name) {
                removed += 1;
            } else {
                tracing::warn!("{name} is not a dependency");
            }
        }
        removed
    }

    /// Dependency names in insertion order.
    pub fn list_deps(&self) -> Vec<&str> {
        self.deps.iter().map(String::as_str).collect()
    }

    /// Reset to the skeleton and append every captured variable.
    pub fn rebuild_from_profile(
        &mut self,
        layout: &PackageLayout,
        profile: &IndexMap<String, Vec<String>>,
    ) {
        self.reset_to_default(layout);
        for (name, fragments) in profile {
            self.append_env(name, fragments);
        }
    }
}

/// `value` with every line break replaced by a space.
pub(crate) fn single_line(value: &str) -> String {
    value.replace("\r\n", " ").replace(['\r', '\n'], " ")
}

/// `deps` is stored as a mapping of name to `true`, the format older
/// documents use. A plain list is accepted as well.
mod deps_format {
    use indexmap::{IndexMap, IndexSet};
    use serde::ser::SerializeMap;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum DepsRepr {
        Map(IndexMap<String, bool>),
        List(Vec<String>),
    }

    pub fn serialize<S: Serializer>(
        deps: &IndexSet<String>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(deps.len()))?;
        for dep in deps {
            map.serialize_entry(dep, &true)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<IndexSet<String>, D::Error> {
        let deps = match Option::<DepsRepr>::deserialize(deserializer)? {
            None => IndexSet::new(),
            Some(DepsRepr::Map(map)) => map
                .into_iter()
                .filter(|(_, enabled)| *enabled)
                .map(|(name, _)| name)
                .collect(),
            Some(DepsRepr::List(list)) => list.into_iter().collect(),
        };
        Ok(deps)
    }
}
