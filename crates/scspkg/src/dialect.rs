// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Script dialects and the shell syntax each one emits.

use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "./dialect_test.rs"]
mod dialect_test;

/// Separator used between path fragments of a variable.
pub const PATH_SEPARATOR: char = ':';

/// Module type as written in the scspkg config.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Deserialize,
    Serialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ModuleType {
    /// Declarative modulefiles for Environment Modules / Lmod.
    Tcl,
    /// Shell-executable scripts loaded through `scspkg module load`.
    #[default]
    Bash,
}

impl ModuleType {
    /// Parse a module type, reporting unknown names as [`crate::Error::UnknownDialect`].
    pub fn parse(name: &str) -> crate::Result<Self> {
        name.parse()
            .map_err(|_| crate::Error::UnknownDialect(name.to_string()))
    }

    /// The dialect that renders and loads this module type.
    pub fn dialect(self) -> Dialect {
        match self {
            Self::Tcl => Dialect::Tcl(Tcl),
            Self::Bash => Dialect::Bash(Bash),
        }
    }
}

/// The operations a dialect must be able to express.
///
/// `current` is the value the variable has in the environment the
/// script will be evaluated in, if any.
#[enum_dispatch]
pub trait ScriptSyntax {
    fn emit_set(&self, name: &str, value: &str) -> String;

    fn emit_prepend(&self, name: &str, fragments: &[String], current: Option<&str>) -> String;

    fn emit_append(&self, name: &str, fragments: &[String], current: Option<&str>) -> String;

    fn emit_unset(&self, name: &str) -> String;
}

/// Declarative TCL modulefile syntax.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tcl;

/// Bash syntax for scripts evaluated by the invoking shell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bash;

/// One of the supported script dialects.
#[enum_dispatch(ScriptSyntax)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Tcl(Tcl),
    Bash(Bash),
}

impl Dialect {
    pub fn module_type(&self) -> ModuleType {
        match self {
            Self::Tcl(_) => ModuleType::Tcl,
            Self::Bash(_) => ModuleType::Bash,
        }
    }

    /// Whether scspkg itself generates load/unload scripts for this dialect.
    ///
    /// TCL modulefiles are loaded by the native `module` command.
    pub fn loads_in_session(&self) -> bool {
        matches!(self, Self::Bash(_))
    }
}

impl ScriptSyntax for Tcl {
    fn emit_set(&self, name: &str, value: &str) -> String {
        format!("setenv {name} {}", tcl_word(value))
    }

    fn emit_prepend(&self, name: &str, fragments: &[String], _current: Option<&str>) -> String {
        format!("prepend-path {name} {}", tcl_word(&join_fragments(fragments)))
    }

    fn emit_append(&self, name: &str, fragments: &[String], _current: Option<&str>) -> String {
        format!("append-path {name} {}", tcl_word(&join_fragments(fragments)))
    }

    fn emit_unset(&self, name: &str) -> String {
        format!("unsetenv {name}")
    }
}

impl ScriptSyntax for Bash {
    fn emit_set(&self, name: &str, value: &str) -> String {
        format!("export {name}={}", shell_word(value))
    }

    fn emit_prepend(&self, name: &str, fragments: &[String], current: Option<&str>) -> String {
        let value = match current {
            Some(current) if !current.is_empty() => {
                format!("{}{PATH_SEPARATOR}{current}", join_fragments(fragments))
            }
            _ => join_fragments(fragments),
        };
        self.emit_set(name, &value)
    }

    fn emit_append(&self, name: &str, fragments: &[String], current: Option<&str>) -> String {
        let value = match current {
            Some(current) if !current.is_empty() => {
                format!("{current}{PATH_SEPARATOR}{}", join_fragments(fragments))
            }
            _ => join_fragments(fragments),
        };
        self.emit_set(name, &value)
    }

    fn emit_unset(&self, name: &str) -> String {
        format!("unset {name}")
    }
}

/// Join fragments with [`PATH_SEPARATOR`].
pub fn join_fragments(fragments: &[String]) -> String {
    fragments.join(&PATH_SEPARATOR.to_string())
}

fn is_plain_word(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "/._-+:,=@%".contains(c))
}

/// Quote a value for bash, leaving plain words untouched.
pub(crate) fn shell_word(value: &str) -> String {
    if is_plain_word(value) {
        return value.to_string();
    }
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        if matches!(c, '\\' | '"' | '$' | '`') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

/// Quote a value for TCL, leaving plain words untouched.
pub(crate) fn tcl_word(value: &str) -> String {
    if is_plain_word(value) {
        return value.to_string();
    }
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        if matches!(c, '\\' | '"' | '$' | '[' | ']') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}
