// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! The scspkg configuration, loaded once per invocation.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::dialect::{Dialect, ModuleType};
use crate::{Error, Result, SCSPKG_CONFIG_FILENAME};

#[cfg(test)]
#[path = "./config_test.rs"]
mod config_test;

/// Where packages and modulefiles live, and which dialect is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Directory holding one subdirectory per package.
    pub pkg_dir: PathBuf,

    /// Directory holding the rendered modulefiles.
    pub module_dir: PathBuf,

    /// Dialect of the rendered modulefiles.
    #[serde(default)]
    pub module_type: ModuleType,
}

/// `config.yaml` as written on disk, before the module type is checked.
#[derive(Deserialize)]
struct ConfigDocument {
    pkg_dir: PathBuf,
    module_dir: PathBuf,
    #[serde(default)]
    module_type: Option<String>,
}

impl Config {
    /// Default config for a root directory.
    pub fn new<P: AsRef<Path>>(root: P, module_type: ModuleType) -> Self {
        let root = root.as_ref();
        Self {
            pkg_dir: root.join("packages"),
            module_dir: root.join("modulefiles"),
            module_type,
        }
    }

    /// The default root, `~/.scspkg`.
    pub fn default_root() -> Result<PathBuf> {
        let home =
            dirs::home_dir().ok_or_else(|| Error::ConfigNotFound(PathBuf::from("~/.scspkg")))?;
        Ok(home.join(".scspkg"))
    }

    /// Resolve a user supplied root to an absolute path.
    ///
    /// Roots that do not exist yet are made absolute against the current
    /// directory without being canonicalized.
    pub fn resolve_root<P: AsRef<Path>>(root: P) -> Result<PathBuf> {
        let root = root.as_ref();
        if root.exists() {
            return Ok(dunce::canonicalize(root)?);
        }
        if root.is_absolute() {
            Ok(root.to_path_buf())
        } else {
            Ok(std::env::current_dir()?.join(root))
        }
    }

    /// Load the config stored under `root`.
    pub fn load<P: AsRef<Path>>(root: P) -> Result<Self> {
        let path = root.as_ref().join(SCSPKG_CONFIG_FILENAME);
        let yaml = match std::fs::read_to_string(&path) {
            Ok(yaml) => yaml,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::ConfigNotFound(path));
            }
            Err(error) => return Err(Error::ReadFailed { path, error }),
        };
        let raw: ConfigDocument =
            serde_yaml::from_str(&yaml).map_err(|error| Error::InvalidYaml { path, error })?;
        let module_type = match raw.module_type {
            Some(name) => ModuleType::parse(&name)?,
            None => ModuleType::default(),
        };
        Ok(Self {
            pkg_dir: raw.pkg_dir,
            module_dir: raw.module_dir,
            module_type,
        })
    }

    /// Write this config under `root`, creating the package and module
    /// directories.
    pub fn save<P: AsRef<Path>>(&self, root: P) -> Result<()> {
        let root = root.as_ref();
        for dir in [root, self.pkg_dir.as_path(), self.module_dir.as_path()] {
            std::fs::create_dir_all(dir).map_err(|error| Error::WriteFailed {
                path: dir.to_path_buf(),
                error,
            })?;
        }
        let path = root.join(SCSPKG_CONFIG_FILENAME);
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(&path, yaml).map_err(|error| Error::WriteFailed { path, error })?;
        Ok(())
    }

    pub fn dialect(&self) -> Dialect {
        self.module_type.dialect()
    }
}
