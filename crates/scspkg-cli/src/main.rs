// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! scspkg - environment modules for software packages

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use miette::Result;

mod cmd_deps;
mod cmd_destroy;
mod cmd_env;
mod cmd_init;
mod cmd_list;
mod cmd_module;
mod cmd_pkg;
mod cmd_profile;

#[cfg(test)]
#[path = "./main_test.rs"]
mod main_test;

use cmd_deps::CmdDeps;
use cmd_destroy::{CmdCreate, CmdDestroy};
use cmd_env::CmdEnv;
use cmd_init::CmdInit;
use cmd_list::CmdList;
use cmd_module::CmdModule;
use cmd_pkg::CmdPkg;
use cmd_profile::CmdBuildProfile;

#[derive(Parser)]
#[clap(
    name = "scspkg",
    about = "Environment modules for software packages",
    version,
    long_about = "Create packages, record their environment changes and render them as TCL modulefiles or bash scripts"
)]
struct Opt {
    #[clap(flatten)]
    logging: Logging,

    /// Root directory holding the scspkg config
    #[clap(long, global = true, env = scspkg::SCSPKG_ROOT_VAR)]
    root: Option<PathBuf>,

    #[clap(subcommand)]
    cmd: Command,
}

#[derive(Parser)]
struct Logging {
    /// Increase verbosity (-v, -vv, -vvv)
    #[clap(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[clap(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Initialize a scspkg root
    Init(CmdInit),

    /// Create packages
    Create(CmdCreate),

    /// Remove packages and their modulefiles
    Destroy(CmdDestroy),

    /// List packages
    List(CmdList),

    /// Inspect a package
    Pkg(CmdPkg),

    /// Edit the environment changes of a package
    Env(CmdEnv),

    /// Edit the dependencies of a package
    Deps(CmdDeps),

    /// Print scripts that load or unload a package in this shell
    Module(CmdModule),

    /// Capture the compiler and loader variables of this shell
    BuildProfile(CmdBuildProfile),
}

impl Opt {
    fn run(self) -> Result<i32> {
        // Setup logging
        let log_level = match (self.logging.quiet, self.logging.verbose) {
            (true, _) => tracing::Level::ERROR,
            (false, 0) => tracing::Level::WARN,
            (false, 1) => tracing::Level::INFO,
            (false, 2) => tracing::Level::DEBUG,
            (false, _) => tracing::Level::TRACE,
        };

        // stdout is reserved for scripts the shell evaluates
        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .init();

        let root = match self.root {
            Some(root) => root,
            None => scspkg::Config::default_root()?,
        };
        let root = scspkg::Config::resolve_root(root)?;
        tracing::debug!(root = %root.display(), "using scspkg root");

        self.cmd.run(&root)
    }
}

impl Command {
    fn run(self, root: &Path) -> Result<i32> {
        let config = || scspkg::Config::load(root);

        // Dispatch to command
        match self {
            Command::Init(mut cmd) => cmd.run(root),
            Command::Create(mut cmd) => cmd.run(&config()?),
            Command::Destroy(mut cmd) => cmd.run(&config()?),
            Command::List(mut cmd) => cmd.run(&config()?),
            Command::Pkg(mut cmd) => cmd.run(&config()?),
            Command::Env(mut cmd) => cmd.run(&config()?),
            Command::Deps(mut cmd) => cmd.run(&config()?),
            Command::Module(mut cmd) => cmd.run(&config()?),
            Command::BuildProfile(mut cmd) => cmd.run(&config()?),
        }
    }
}

fn main() -> Result<()> {
    let opt = Opt::parse();
    let code = opt.run()?;
    std::process::exit(code);
}
