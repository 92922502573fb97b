// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Implementation of the `scspkg init` command.

use std::path::Path;

use clap::Args;
use miette::Result;
use scspkg::{Config, ModuleType};

/// Initialize a scspkg root
#[derive(Debug, Args)]
pub struct CmdInit {
    /// Module type to render: tcl or bash
    #[clap(long, default_value = "bash", value_parser = parse_module_type)]
    module_type: ModuleType,

    /// Directory holding package trees (default: <ROOT>/packages)
    #[clap(long)]
    pkg_dir: Option<std::path::PathBuf>,

    /// Directory holding modulefiles (default: <ROOT>/modulefiles)
    #[clap(long)]
    module_dir: Option<std::path::PathBuf>,

    /// Overwrite an existing config
    #[clap(long)]
    force: bool,
}

fn parse_module_type(value: &str) -> std::result::Result<ModuleType, String> {
    ModuleType::parse(value).map_err(|err| err.to_string())
}

impl CmdInit {
    pub fn run(&mut self, root: &Path) -> Result<i32> {
        let config_path = root.join(scspkg::SCSPKG_CONFIG_FILENAME);

        // Check if a config already exists
        if config_path.exists() && !self.force {
            return Err(miette::miette!(
                "scspkg is already initialized at {:?}. Use --force to overwrite",
                config_path
            ));
        }

        let mut config = Config::new(root, self.module_type);
        if let Some(pkg_dir) = &self.pkg_dir {
            config.pkg_dir = Config::resolve_root(pkg_dir)?;
        }
        if let Some(module_dir) = &self.module_dir {
            config.module_dir = Config::resolve_root(module_dir)?;
        }
        config.save(root)?;

        println!("Initialized scspkg at {:?}", root);
        println!();
        println!("Packages:    {}", config.pkg_dir.display());
        println!("Modulefiles: {}", config.module_dir.display());
        println!("Module type: {}", config.module_type);
        if config.module_type == ModuleType::Tcl {
            println!();
            println!("Add the modulefiles to your module path:");
            println!("  module use {}", config.module_dir.display());
        }

        Ok(0)
    }
}
