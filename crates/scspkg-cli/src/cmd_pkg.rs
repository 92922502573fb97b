// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Implementation of the `scspkg pkg` command.

use clap::{Args, Subcommand};
use miette::Result;
use scspkg::{Config, PackageStore};

/// Inspect a package
#[derive(Debug, Args)]
pub struct CmdPkg {
    #[clap(subcommand)]
    action: PkgAction,
}

#[derive(Debug, Subcommand)]
enum PkgAction {
    /// Print the install root of a package
    Root {
        /// Name of the package
        name: String,
    },

    /// Print the source directory of a package
    Src {
        /// Name of the package
        name: String,
    },

    /// Print the path of the rendered modulefile
    ModulePath {
        /// Name of the package
        name: String,
    },

    /// Print the environment document as JSON
    Schema {
        /// Name of the package
        name: String,
    },

    /// Print the rendered modulefile
    Show {
        /// Name of the package
        name: String,
    },

    /// Set a documentation entry
    Doc {
        /// Name of the package
        name: String,

        /// Documentation key, such as Version or doc
        key: String,

        /// Value to record
        value: String,
    },

    /// Rewrite the environment document to the default skeleton
    Reset {
        /// Name of the package
        name: String,
    },
}

impl CmdPkg {
    pub fn run(&mut self, config: &Config) -> Result<i32> {
        let store = PackageStore::new(config);
        match &self.action {
            PkgAction::Root { name } => {
                println!("{}", store.layout(name)?.root().display());
            }
            PkgAction::Src { name } => {
                println!("{}", store.layout(name)?.src_dir().display());
            }
            PkgAction::ModulePath { name } => {
                println!("{}", store.layout(name)?.module_path().display());
            }
            PkgAction::Schema { name } => {
                println!("{}", store.schema_json(name)?);
            }
            PkgAction::Show { name } => {
                print!("{}", store.modulefile_text(name)?);
            }
            PkgAction::Doc { name, key, value } => {
                let mut package = store.require(name)?;
                package.env.set_doc(key, value);
                store.save(&package)?;
            }
            PkgAction::Reset { name } => {
                let mut package = store.require(name)?;
                package.reset_to_default();
                store.save(&package)?;
                tracing::info!("reset {name} to the default environment");
            }
        }
        Ok(0)
    }
}
