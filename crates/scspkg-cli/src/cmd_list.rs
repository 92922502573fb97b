// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Implementation of the `scspkg list` command.

use clap::Args;
use colored::Colorize;
use miette::Result;
use scspkg::{Config, PackageStore};

/// List packages
#[derive(Debug, Args)]
pub struct CmdList {
    /// Show the version and description of each package
    #[clap(short, long)]
    long: bool,
}

impl CmdList {
    pub fn run(&mut self, config: &Config) -> Result<i32> {
        let store = PackageStore::new(config);
        let names = store.list()?;

        if !self.long {
            for name in &names {
                println!("{name}");
            }
            return Ok(0);
        }

        for name in &names {
            let package = store.load(name)?;
            let version = package
                .env
                .doc
                .get("Version")
                .map(String::as_str)
                .unwrap_or("None");
            println!("{} {}", name.cyan(), version.green());
            if let Some(doc) = package.env.doc.get("doc").filter(|d| d.as_str() != "None") {
                println!("    {}", doc.dimmed());
            }
        }
        println!();
        println!("Total: {} package(s)", names.len());

        Ok(0)
    }
}
