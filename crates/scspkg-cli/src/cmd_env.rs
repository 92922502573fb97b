// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Implementation of the `scspkg env` command.

use clap::{Args, Subcommand};
use miette::Result;
use scspkg::{Config, PackageStore};

/// Edit the environment changes of a package
#[derive(Debug, Args)]
pub struct CmdEnv {
    #[clap(subcommand)]
    action: EnvAction,
}

#[derive(Debug, Subcommand)]
enum EnvAction {
    /// Assign a variable outright
    Set {
        /// Name of the package
        name: String,
        /// Variable to assign
        var: String,
        /// Value to assign
        value: String,
    },

    /// Prepend fragments to a path variable
    Prepend {
        /// Name of the package
        name: String,
        /// Variable to prepend to
        var: String,
        /// Fragments, in the order they should appear
        #[clap(required = true)]
        values: Vec<String>,
    },

    /// Append fragments to a path variable
    Append {
        /// Name of the package
        name: String,
        /// Variable to append to
        var: String,
        /// Fragments, in the order they should appear
        #[clap(required = true)]
        values: Vec<String>,
    },

    /// Forget a variable
    Rm {
        /// Name of the package
        name: String,
        /// Variable to forget
        var: String,
    },

    /// Remove one fragment from a prepended variable
    PopPrepend {
        /// Name of the package
        name: String,
        /// Prepended variable
        var: String,
        /// Fragment to remove
        value: String,
    },
}

impl EnvAction {
    fn package(&self) -> &str {
        match self {
            Self::Set { name, .. }
            | Self::Prepend { name, .. }
            | Self::Append { name, .. }
            | Self::Rm { name, .. }
            | Self::PopPrepend { name, .. } => name,
        }
    }
}

impl CmdEnv {
    pub fn run(&mut self, config: &Config) -> Result<i32> {
        let store = PackageStore::new(config);
        let mut package = store.require(self.action.package())?;

        match &self.action {
            EnvAction::Set { var, value, .. } => package.env.set_env(var, value),
            EnvAction::Prepend { var, values, .. } => package.env.prepend_env(var, values),
            EnvAction::Append { var, values, .. } => package.env.append_env(var, values),
            EnvAction::Rm { var, .. } => {
                package.env.remove_env(var);
            }
            EnvAction::PopPrepend { var, value, .. } => {
                package.env.pop_prepend(var, value);
            }
        }

        store.save(&package)?;
        Ok(0)
    }
}
