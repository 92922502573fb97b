// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Rendering of the static modulefile of a package.

use crate::dialect::{Dialect, ScriptSyntax, shell_word, tcl_word};
use crate::mutations::{EnvMutationSet, single_line};

#[cfg(test)]
#[path = "./render_test.rs"]
mod render_test;

/// Name of this tool, used by bash modulefiles to load dependencies.
pub const TOOL_NAME: &str = "scspkg";

/// Render the static modulefile of `name` in the given dialect.
///
/// TCL modulefiles carry every change. Bash modulefiles only load the
/// dependencies and then the package itself through `scspkg module load`,
/// which computes the changes against the live environment.
pub fn render_modulefile(dialect: &Dialect, name: &str, set: &EnvMutationSet) -> String {
    let lines = match dialect {
        Dialect::Tcl(tcl) => render_tcl(tcl, set),
        Dialect::Bash(_) => render_bash(name, set),
    };
    let mut text = lines.join("\n");
    text.push('\n');
    text
}

fn render_tcl<S: ScriptSyntax>(syntax: &S, set: &EnvMutationSet) -> Vec<String> {
    let mut module = vec!["#%Module1.0".to_string()];
    for (key, value) in &set.doc {
        module.push(format!("module-whatis {}", tcl_word(&format!("{key}: {value}"))));
    }
    for dep in &set.deps {
        module.push(format!("module load {}", tcl_word(dep)));
    }
    for (env, value) in &set.setenvs {
        module.push(syntax.emit_set(env, value));
    }
    for (env, fragments) in &set.prepends {
        for fragment in fragments {
            module.push(syntax.emit_prepend(env, std::slice::from_ref(fragment), None));
        }
    }
    for (env, fragments) in &set.appends {
        for fragment in fragments {
            module.push(syntax.emit_append(env, std::slice::from_ref(fragment), None));
        }
    }
    module
}

fn render_bash(name: &str, set: &EnvMutationSet) -> Vec<String> {
    let mut module = vec!["#!/bin/bash".to_string()];
    for (key, value) in &set.doc {
        module.push(format!("# \"{}: {}\"", single_line(key), single_line(value)));
    }
    for dep in set.deps.iter().map(String::as_str).chain([name]) {
        module.push(format!(
            "eval \"$({TOOL_NAME} module load {})\"",
            shell_word(dep)
        ));
    }
    module
}
