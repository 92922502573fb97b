// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Implementation of the `scspkg create` and `scspkg destroy` commands.

use clap::Args;
use miette::Result;
use scspkg::{Config, PackageStore};

/// Create packages
#[derive(Debug, Args)]
pub struct CmdCreate {
    /// Names of the packages to create
    #[clap(required = true)]
    names: Vec<String>,
}

impl CmdCreate {
    pub fn run(&mut self, config: &Config) -> Result<i32> {
        let store = PackageStore::new(config);
        for name in &self.names {
            let package = store.create(name)?;
            tracing::info!("created {} at {}", package.name(), package.layout.root().display());
        }
        Ok(0)
    }
}

/// Remove packages and their modulefiles
#[derive(Debug, Args)]
pub struct CmdDestroy {
    /// Names of the packages to remove
    #[clap(required = true)]
    names: Vec<String>,
}

impl CmdDestroy {
    pub fn run(&mut self, config: &Config) -> Result<i32> {
        let store = PackageStore::new(config);
        for name in &self.names {
            store.destroy(name)?;
            tracing::info!("destroyed {name}");
        }
        Ok(0)
    }
}
