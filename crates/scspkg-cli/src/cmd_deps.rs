// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Implementation of the `scspkg deps` command.

use clap::{Args, Subcommand};
use miette::Result;
use scspkg::{Config, PackageStore};

/// Edit the dependencies of a package
#[derive(Debug, Args)]
pub struct CmdDeps {
    #[clap(subcommand)]
    action: DepsAction,
}

#[derive(Debug, Subcommand)]
enum DepsAction {
    /// Add dependencies, loaded before the package itself
    Add {
        /// Name of the package
        name: String,
        /// Dependencies to add
        #[clap(required = true)]
        deps: Vec<String>,
    },

    /// Remove dependencies
    Pop {
        /// Name of the package
        name: String,
        /// Dependencies to remove
        #[clap(required = true)]
        deps: Vec<String>,
    },

    /// List dependencies in load order
    Ls {
        /// Name of the package
        name: String,
    },
}

impl CmdDeps {
    pub fn run(&mut self, config: &Config) -> Result<i32> {
        let store = PackageStore::new(config);
        match &self.action {
            DepsAction::Add { name, deps } => {
                let mut package = store.require(name)?;
                package.env.add_deps(deps);
                store.save(&package)?;
            }
            DepsAction::Pop { name, deps } => {
                let mut package = store.require(name)?;
                let removed = package.env.pop_deps(deps);
                tracing::debug!("removed {removed} dependencies from {name}");
                store.save(&package)?;
            }
            DepsAction::Ls { name } => {
                let package = store.require(name)?;
                for dep in package.env.list_deps() {
                    println!("{dep}");
                }
            }
        }
        Ok(0)
    }
}
