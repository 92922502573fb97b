// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! scspkg - environment modules for software packages
//!
//! Every package owns a directory tree and a YAML document recording its
//! documentation, dependencies and environment changes. The document is
//! rendered into a static modulefile in one of two dialects, and for bash
//! modulefiles into session scripts that load or unload the package in the
//! invoking shell.
//!
//! # Example
//!
//! ```yaml
//! # <pkg_dir>/foo/foo.yaml
//! doc:
//!   Name: foo
//!   Version: '1.0'
//! deps:
//!   zlib: true
//! setenvs:
//!   FOO_HOME: /opt/foo
//! prepends:
//!   PATH:
//!     - /opt/foo/bin
//! appends: {}
//! ```
//!
//! renders as the TCL modulefile
//!
//! ```text
//! #%Module1.0
//! module-whatis "Name: foo"
//! module-whatis "Version: 1.0"
//! module load zlib
//! setenv FOO_HOME /opt/foo
//! prepend-path PATH /opt/foo/bin
//! ```

pub mod config;
pub mod dialect;
pub mod error;
pub mod layout;
pub mod loader;
pub mod mutations;
pub mod profile;
pub mod render;
pub mod store;

pub use config::Config;
pub use dialect::{Dialect, ModuleType, ScriptSyntax};
pub use error::{Error, Result};
pub use layout::{PackageLayout, loaded_flag};
pub use loader::{EnvSnapshot, LoadState, ModuleLoader, SessionScript, StripFrom};
pub use mutations::EnvMutationSet;
pub use profile::{capture_profile, render_profile};
pub use render::render_modulefile;
pub use store::{Package, PackageStore};

/// Well-known filename of the scspkg config below its root.
pub const SCSPKG_CONFIG_FILENAME: &str = "config.yaml";

/// Environment variable naming the scspkg root.
pub const SCSPKG_ROOT_VAR: &str = "SCSPKG_ROOT";
