// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Implementation of the `scspkg build-profile` command.

use std::path::PathBuf;

use clap::Args;
use miette::{IntoDiagnostic, Result, WrapErr};
use scspkg::{Config, EnvSnapshot, PackageStore};

/// Capture the compiler and loader variables of this shell
#[derive(Debug, Args)]
pub struct CmdBuildProfile {
    /// Write the profile to PATH instead of stdout
    #[clap(short, long)]
    output: Option<PathBuf>,

    /// Replace the environment of this package with the captured profile
    #[clap(long, value_name = "PACKAGE")]
    rebuild: Option<String>,
}

impl CmdBuildProfile {
    pub fn run(&mut self, config: &Config) -> Result<i32> {
        let profile = scspkg::capture_profile(&EnvSnapshot::from_process());
        tracing::debug!("captured {} profile variables", profile.len());

        let text = scspkg::render_profile(&profile);
        match &self.output {
            Some(path) => {
                std::fs::write(path, format!("{text}\n"))
                    .into_diagnostic()
                    .wrap_err_with(|| format!("Failed to write profile to {}", path.display()))?;
                tracing::info!("wrote build profile to {}", path.display());
            }
            None => println!("{text}"),
        }

        if let Some(name) = &self.rebuild {
            let store = PackageStore::new(config);
            let mut package = store.require(name)?;
            package.env.rebuild_from_profile(&package.layout, &profile);
            store.save(&package)?;
            tracing::info!("rebuilt {name} from the build profile");
        }

        Ok(0)
    }
}
