// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Implementation of the `scspkg module` command.
//!
//! The script is printed to stdout so it can be evaluated by the calling
//! shell, for example `eval "$(scspkg module load foo)"`.

use clap::{Args, Subcommand};
use miette::Result;
use scspkg::{Config, EnvSnapshot, ModuleLoader, PackageStore};

/// Print scripts that load or unload a package in this shell
#[derive(Debug, Args)]
pub struct CmdModule {
    #[clap(subcommand)]
    action: ModuleAction,
}

#[derive(Debug, Subcommand)]
enum ModuleAction {
    /// Print the script that loads a package
    Load {
        /// Name of the package
        name: String,
    },

    /// Print the script that unloads a package
    Unload {
        /// Name of the package
        name: String,
    },
}

impl CmdModule {
    pub fn run(&mut self, config: &Config) -> Result<i32> {
        let store = PackageStore::new(config);
        let snapshot = EnvSnapshot::from_process();

        let script = match &self.action {
            ModuleAction::Load { name } => {
                let package = store.require(name)?;
                ModuleLoader::new(config.dialect(), name, &package.env).load(&snapshot)?
            }
            ModuleAction::Unload { name } => {
                let package = store.require(name)?;
                ModuleLoader::new(config.dialect(), name, &package.env).unload(&snapshot)?
            }
        };

        println!("{}", script.text);
        Ok(0)
    }
}
