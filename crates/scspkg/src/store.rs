// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Persistence of package documents and their rendered modulefiles.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::layout::PackageLayout;
use crate::mutations::EnvMutationSet;
use crate::render::render_modulefile;
use crate::{Config, Error, Result};

#[cfg(test)]
#[path = "./store_test.rs"]
mod store_test;

/// A package: where it lives and what it changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    pub layout: PackageLayout,
    pub env: EnvMutationSet,
}

impl Package {
    /// A package holding the default skeleton.
    pub fn new(layout: PackageLayout) -> Self {
        let env = EnvMutationSet::new(&layout);
        Self { layout, env }
    }

    pub fn name(&self) -> &str {
        self.layout.name()
    }

    pub fn reset_to_default(&mut self) {
        self.env.reset_to_default(&self.layout);
    }
}

/// Reads and writes packages below the directories of a [`Config`].
#[derive(Debug, Clone, Copy)]
pub struct PackageStore<'a> {
    config: &'a Config,
}

impl<'a> PackageStore<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    pub fn layout(&self, name: &str) -> Result<PackageLayout> {
        PackageLayout::new(self.config, name)
    }

    /// Whether `name` has a persisted document.
    pub fn exists(&self, name: &str) -> Result<bool> {
        Ok(self.layout(name)?.schema_path().is_file())
    }

    /// Load `name`, falling back to the default skeleton when it has never
    /// been saved.
    pub fn load(&self, name: &str) -> Result<Package> {
        let mut package = Package::new(self.layout(name)?);
        let path = package.layout.schema_path();
        if path.is_file() {
            package.env = read_document(&path)?;
            package.env.ensure_name(name);
        } else {
            tracing::debug!("no document for {name}, using the default skeleton");
        }
        Ok(package)
    }

    /// Load `name`, failing when it has never been saved.
    pub fn require(&self, name: &str) -> Result<Package> {
        if !self.exists(name)? {
            return Err(Error::NotFound {
                name: name.to_string(),
            });
        }
        self.load(name)
    }

    /// Create the directories of `name` and save its current state.
    pub fn create(&self, name: &str) -> Result<Package> {
        let package = self.load(name)?;
        package.layout.create_dirs()?;
        self.save(&package)?;
        Ok(package)
    }

    /// Write the document of `package` and re-render its modulefile.
    ///
    /// Both files are fully written to temporary files before either target
    /// is replaced, so a failure while serializing or writing leaves the
    /// previous document and modulefile in place. If the modulefile cannot
    /// be replaced once the document has been, the previous document is
    /// restored.
    pub fn save(&self, package: &Package) -> Result<()> {
        let layout = &package.layout;
        let schema_path = layout.schema_path();
        let module_path = layout.module_path();

        let document = serde_yaml::to_string(&package.env)?;
        let modulefile = render_modulefile(&self.config.dialect(), layout.name(), &package.env);

        let staged_document = stage(&schema_path, &document)?;
        let staged_modulefile = stage(module_path, &modulefile)?;

        let previous = match std::fs::read(&schema_path) {
            Ok(bytes) => Some(bytes),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
            Err(error) => {
                return Err(Error::ReadFailed {
                    path: schema_path,
                    error,
                });
            }
        };

        persist(staged_document, &schema_path)?;
        if let Err(err) = persist(staged_modulefile, module_path) {
            tracing::warn!(
                "failed to replace the modulefile of {}, restoring its document",
                layout.name()
            );
            restore(&schema_path, previous.as_deref())?;
            return Err(err);
        }

        tracing::debug!(
            name = layout.name(),
            document = %schema_path.display(),
            modulefile = %module_path.display(),
            "saved package"
        );
        Ok(())
    }

    /// Remove every file of `name`. Removing a missing package is a no-op.
    pub fn destroy(&self, name: &str) -> Result<()> {
        self.layout(name)?.remove()
    }

    /// Names of all saved packages, sorted.
    pub fn list(&self) -> Result<Vec<String>> {
        let entries = match std::fs::read_dir(&self.config.pkg_dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(error) => {
                return Err(Error::ReadFailed {
                    path: self.config.pkg_dir.clone(),
                    error,
                });
            }
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry?;
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            if self.exists(&name).unwrap_or(false) {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }

    /// The document of `name` as pretty printed JSON.
    pub fn schema_json(&self, name: &str) -> Result<String> {
        let package = self.require(name)?;
        Ok(serde_json::to_string_pretty(&package.env)?)
    }

    /// The text of the rendered modulefile of `name`.
    pub fn modulefile_text(&self, name: &str) -> Result<String> {
        let layout = self.layout(name)?;
        let path = layout.module_path();
        match std::fs::read_to_string(path) {
            Ok(text) => Ok(text),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Err(Error::NotFound {
                name: name.to_string(),
            }),
            Err(error) => Err(Error::ReadFailed {
                path: path.to_path_buf(),
                error,
            }),
        }
    }
}

fn read_document(path: &Path) -> Result<EnvMutationSet> {
    let yaml = std::fs::read_to_string(path).map_err(|error| Error::ReadFailed {
        path: path.to_path_buf(),
        error,
    })?;
    serde_yaml::from_str(&yaml).map_err(|error| Error::InvalidYaml {
        path: path.to_path_buf(),
        error,
    })
}

fn stage(dest: &Path, content: &str) -> Result<NamedTempFile> {
    let write_failed = |error: std::io::Error| Error::WriteFailed {
        path: dest.to_path_buf(),
        error,
    };
    let dir = dest.parent().unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir).map_err(write_failed)?;
    let mut tmp = NamedTempFile::new_in(dir).map_err(write_failed)?;
    tmp.write_all(content.as_bytes()).map_err(write_failed)?;
    // temporary files are created owner-only
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o644))
            .map_err(write_failed)?;
    }
    tmp.as_file().sync_all().map_err(write_failed)?;
    Ok(tmp)
}

/// Put back the document that was in place before a failed save.
fn restore(path: &Path, previous: Option<&[u8]>) -> Result<()> {
    let result = match previous {
        Some(bytes) => std::fs::write(path, bytes),
        None => std::fs::remove_file(path),
    };
    result.map_err(|error| Error::WriteFailed {
        path: path.to_path_buf(),
        error,
    })
}

fn persist(tmp: NamedTempFile, dest: &Path) -> Result<()> {
    tmp.persist(dest).map_err(|e| Error::WriteFailed {
        path: dest.to_path_buf(),
        error: e.error,
    })?;
    Ok(())
}
