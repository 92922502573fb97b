// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Session scripts that load and unload a package in the invoking shell.
//!
//! Nothing here reads or writes the process environment. The caller
//! captures an [`EnvSnapshot`] once, and every operation returns the
//! script text together with the snapshot as it will look once the
//! shell has evaluated that text.

use std::collections::BTreeMap;

use indexmap::IndexMap;

use crate::dialect::{Dialect, PATH_SEPARATOR, ScriptSyntax, join_fragments};
use crate::layout::loaded_flag;
use crate::mutations::EnvMutationSet;
use crate::{Error, Result};

#[cfg(test)]
#[path = "./loader_test.rs"]
mod loader_test;

/// The environment variables a script will be evaluated against.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    vars: BTreeMap<String, String>,
}

impl EnvSnapshot {
    /// Capture the environment of the current process.
    ///
    /// Variables whose name or value is not valid unicode are skipped.
    pub fn from_process() -> Self {
        std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    pub fn set<K: Into<String>, V: Into<String>>(&mut self, name: K, value: V) {
        self.vars.insert(name.into(), value.into());
    }

    pub fn unset(&mut self, name: &str) -> Option<String> {
        self.vars.remove(name)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EnvSnapshot {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Whether a package is loaded in a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Unloaded,
    Loaded,
}

/// Script text for the invoking shell and the environment it produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionScript {
    pub text: String,
    pub snapshot: EnvSnapshot,
}

/// Generates load and unload scripts for one package.
#[derive(Debug, Clone)]
pub struct ModuleLoader<'a> {
    dialect: Dialect,
    name: &'a str,
    set: &'a EnvMutationSet,
    flag: String,
}

impl<'a> ModuleLoader<'a> {
    pub fn new(dialect: Dialect, name: &'a str, set: &'a EnvMutationSet) -> Self {
        Self {
            dialect,
            name,
            set,
            flag: loaded_flag(name),
        }
    }

    /// The variable marking this package as loaded.
    pub fn flag(&self) -> &str {
        &self.flag
    }

    pub fn state(&self, snapshot: &EnvSnapshot) -> LoadState {
        match snapshot.get(&self.flag) {
            Some(value) if !value.is_empty() => LoadState::Loaded,
            _ => LoadState::Unloaded,
        }
    }

    /// Script applying every change of the package on top of `snapshot`.
    pub fn load(&self, snapshot: &EnvSnapshot) -> Result<SessionScript> {
        self.ensure_session_dialect()?;
        if self.state(snapshot) == LoadState::Loaded {
            return Err(Error::AlreadyLoaded {
                name: self.name.to_string(),
            });
        }

        let mut next = snapshot.clone();
        let mut lines = Vec::new();

        for (env, value) in &self.set.setenvs {
            lines.push(self.dialect.emit_set(env, value));
            next.set(env, value);
        }

        for (env, fragments) in non_empty(&self.set.prepends) {
            let current = next.get(env).map(str::to_owned);
            lines.push(self.dialect.emit_prepend(env, fragments, current.as_deref()));
            next.set(env, join_around(Some(fragments.as_slice()), current.as_deref(), None));
        }

        for (env, fragments) in non_empty(&self.set.appends) {
            let current = next.get(env).map(str::to_owned);
            lines.push(self.dialect.emit_append(env, fragments, current.as_deref()));
            next.set(env, join_around(None, current.as_deref(), Some(fragments.as_slice())));
        }

        lines.push(self.dialect.emit_set(&self.flag, "1"));
        next.set(&self.flag, "1");

        tracing::debug!(name = self.name, lines = lines.len(), "generated load script");
        Ok(SessionScript {
            text: lines.join("\n"),
            snapshot: next,
        })
    }

    /// Script reverting the changes of the package from `snapshot`.
    ///
    /// Prepended and appended variables missing from the snapshot, or no
    /// longer containing the fragments, are left alone.
    pub fn unload(&self, snapshot: &EnvSnapshot) -> Result<SessionScript> {
        self.ensure_session_dialect()?;
        if self.state(snapshot) == LoadState::Unloaded {
            return Err(Error::NotLoaded {
                name: self.name.to_string(),
            });
        }

        let mut next = snapshot.clone();
        let mut lines = Vec::new();

        for env in self.set.setenvs.keys() {
            lines.push(self.dialect.emit_unset(env));
            next.unset(env);
        }

        let sections = [
            (&self.set.prepends, StripFrom::Front),
            (&self.set.appends, StripFrom::Back),
        ];
        for (section, from) in sections {
            for (env, fragments) in non_empty(section) {
                let Some(current) = next.get(env) else {
                    tracing::debug!("{env} is not set, nothing to strip");
                    continue;
                };
                let Some(stripped) = strip_fragments(current, fragments, from) else {
                    tracing::debug!("{env} no longer contains the fragments of {}", self.name);
                    continue;
                };
                lines.push(self.dialect.emit_set(env, &stripped));
                next.set(env, stripped);
            }
        }

        lines.push(self.dialect.emit_unset(&self.flag));
        next.unset(&self.flag);

        tracing::debug!(name = self.name, lines = lines.len(), "generated unload script");
        Ok(SessionScript {
            text: lines.join("\n"),
            snapshot: next,
        })
    }

    fn ensure_session_dialect(&self) -> Result<()> {
        if self.dialect.loads_in_session() {
            Ok(())
        } else {
            Err(Error::NativeModuleSystem {
                name: self.name.to_string(),
            })
        }
    }
}

fn non_empty(
    section: &IndexMap<String, Vec<String>>,
) -> impl Iterator<Item = (&String, &Vec<String>)> {
    section.iter().filter(|(_, fragments)| !fragments.is_empty())
}

fn join_around(
    before: Option<&[String]>,
    current: Option<&str>,
    after: Option<&[String]>,
) -> String {
    let before = before.map(join_fragments);
    let after = after.map(join_fragments);
    [before.as_deref(), current, after.as_deref()]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(&PATH_SEPARATOR.to_string())
}

/// Which end of a variable the entries of a package were placed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StripFrom {
    /// Prepended entries: the run closest to the front is removed.
    Front,
    /// Appended entries: the run closest to the back is removed.
    Back,
}

/// Remove `fragments` from `current` as a contiguous run of whole
/// separator-delimited entries.
///
/// Returns `None` when no such run exists.
pub fn strip_fragments(current: &str, fragments: &[String], from: StripFrom) -> Option<String> {
    let joined = join_fragments(fragments);
    if joined.is_empty() {
        return None;
    }
    let needle: Vec<&str> = joined.split(PATH_SEPARATOR).collect();
    let entries: Vec<&str> = current.split(PATH_SEPARATOR).collect();
    let mut windows = entries.windows(needle.len());
    let start = match from {
        StripFrom::Front => windows.position(|window| window == needle.as_slice()),
        StripFrom::Back => windows.rposition(|window| window == needle.as_slice()),
    }?;

    let remaining: Vec<&str> = entries[..start]
        .iter()
        .chain(&entries[start + needle.len()..])
        .copied()
        .collect();
    Some(remaining.join(&PATH_SEPARATOR.to_string()))
}
