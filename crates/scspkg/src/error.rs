// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Error types for scspkg operations.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Convenience Result type with scspkg Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during scspkg operations.
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Package has no persisted document
    #[error("Package {name} does not exist")]
    #[diagnostic(
        code(scspkg::not_found),
        help("Create the package first with 'scspkg create {}'", name)
    )]
    NotFound { name: String },

    /// Package name cannot be used to derive paths
    #[error("Invalid package name: {0:?}")]
    #[diagnostic(
        code(scspkg::invalid_name),
        help("Package names must be non-empty, must not start with '.' and must not contain path separators")
    )]
    InvalidName(String),

    /// Load requested while the loaded flag is present
    #[error("Module {name} is already loaded")]
    #[diagnostic(
        code(scspkg::already_loaded),
        help("Run 'scspkg module unload {}' first", name)
    )]
    AlreadyLoaded { name: String },

    /// Unload requested while the loaded flag is absent
    #[error("Module {name} is not loaded")]
    #[diagnostic(code(scspkg::not_loaded))]
    NotLoaded { name: String },

    /// Configured module type is not one of the supported dialects
    #[error("Unknown module type {0:?}")]
    #[diagnostic(code(scspkg::unknown_dialect), help("Expected one of: tcl, bash"))]
    UnknownDialect(String),

    /// The TCL dialect is loaded by the native module system, not by scspkg
    #[error("Module {name} is a TCL modulefile and cannot be loaded by scspkg")]
    #[diagnostic(
        code(scspkg::native_module_system),
        help("Use \"module load {}\" instead of \"scspkg module load\"", name)
    )]
    NativeModuleSystem { name: String },

    /// No config document at the scspkg root
    #[error("No scspkg config found at {0:?}")]
    #[diagnostic(
        code(scspkg::config_not_found),
        help("Run 'scspkg init' or point --root / SCSPKG_ROOT at an initialized root")
    )]
    ConfigNotFound(PathBuf),

    /// Invalid YAML in a package document or config
    #[error("Invalid YAML document {path:?}: {error}")]
    #[diagnostic(code(scspkg::invalid_yaml))]
    InvalidYaml {
        path: PathBuf,
        #[source]
        error: serde_yaml::Error,
    },

    /// Failed to read file
    #[error("Failed to read file: {path:?}")]
    #[diagnostic(code(scspkg::read_failed))]
    ReadFailed {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },

    /// Failed to write file
    #[error("Failed to write file: {path:?}")]
    #[diagnostic(code(scspkg::write_failed))]
    WriteFailed {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },

    /// YAML serialization passthrough
    #[error(transparent)]
    #[diagnostic(code(scspkg::yaml_error))]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization passthrough
    #[error(transparent)]
    #[diagnostic(code(scspkg::json_error))]
    Json(#[from] serde_json::Error),

    /// IO error passthrough
    #[error(transparent)]
    #[diagnostic(code(scspkg::io_error))]
    Io(#[from] std::io::Error),
}
