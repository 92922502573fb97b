// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Canonical filesystem locations of a package.

use std::path::{Path, PathBuf};

use crate::Config;

#[cfg(test)]
#[path = "./layout_test.rs"]
mod layout_test;

/// Prefix of the per-package loaded flag variable.
pub const LOADED_FLAG_PREFIX: &str = "SCSPKG";

/// Paths derived from a package name and the scspkg config.
///
/// Nothing here touches the filesystem except [`PackageLayout::create_dirs`]
/// and [`PackageLayout::remove`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageLayout {
    name: String,
    root: PathBuf,
    module_path: PathBuf,
}

impl PackageLayout {
    /// Derive the layout of `name`, rejecting names that would escape the
    /// package directory.
    pub fn new(config: &Config, name: &str) -> crate::Result<Self> {
        validate_name(name)?;
        Ok(Self {
            name: name.to_string(),
            root: config.pkg_dir.join(name),
            module_path: config.module_dir.join(name),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[inline]
    pub fn src_dir(&self) -> PathBuf {
        self.root.join("src")
    }

    #[inline]
    pub fn include_dir(&self) -> PathBuf {
        self.root.join("include")
    }

    #[inline]
    pub fn lib_dir(&self) -> PathBuf {
        self.root.join("lib")
    }

    #[inline]
    pub fn lib64_dir(&self) -> PathBuf {
        self.root.join("lib64")
    }

    /// The static modulefile rendered for this package.
    #[inline]
    pub fn module_path(&self) -> &Path {
        &self.module_path
    }

    /// The persisted YAML document describing this package.
    #[inline]
    pub fn schema_path(&self) -> PathBuf {
        self.root.join(format!("{}.yaml", self.name))
    }

    /// Name of the variable whose presence marks this package as loaded.
    pub fn loaded_flag(&self) -> String {
        loaded_flag(&self.name)
    }

    /// `root` joined with each relative component, as a string fragment.
    pub(crate) fn fragment(&self, components: &[&str]) -> String {
        let mut path = self.root.clone();
        for component in components {
            path.push(component);
        }
        path.display().to_string()
    }

    /// Create the root, src, include, lib and lib64 directories.
    pub fn create_dirs(&self) -> crate::Result<()> {
        for dir in [
            self.root.clone(),
            self.src_dir(),
            self.include_dir(),
            self.lib_dir(),
            self.lib64_dir(),
        ] {
            std::fs::create_dir_all(&dir).map_err(|error| crate::Error::WriteFailed {
                path: dir.clone(),
                error,
            })?;
        }
        if let Some(parent) = self.module_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    /// Remove the package tree and its modulefile. Missing paths are ignored.
    pub fn remove(&self) -> crate::Result<()> {
        match std::fs::remove_dir_all(&self.root) {
            Ok(()) => tracing::debug!(path = %self.root.display(), "removed package root"),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(error) => {
                return Err(crate::Error::WriteFailed {
                    path: self.root.clone(),
                    error,
                });
            }
        }
        match std::fs::remove_file(&self.module_path) {
            Ok(()) => tracing::debug!(path = %self.module_path.display(), "removed modulefile"),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(error) => {
                return Err(crate::Error::WriteFailed {
                    path: self.module_path.clone(),
                    error,
                });
            }
        }
        Ok(())
    }
}

/// Name of the loaded flag for `name`.
///
/// Characters that cannot appear in a shell identifier become `_`.
pub fn loaded_flag(name: &str) -> String {
    let name: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    format!("{LOADED_FLAG_PREFIX}_{name}_LOADED")
}

fn validate_name(name: &str) -> crate::Result<()> {
    if name.is_empty()
        || name.starts_with('.')
        || name.contains('/')
        || name.contains('\\')
        || name.contains('\0')
    {
        return Err(crate::Error::InvalidName(name.to_string()));
    }
    Ok(())
}
