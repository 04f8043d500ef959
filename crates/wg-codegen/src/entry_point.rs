//! Entry point resolution for WunderGraph projects.
//!
//! Projects authored with `export default defineConfig(...)` cannot be run
//! directly from `wundergraph.config.ts`; they need a small generated wrapper
//! that hands the config (and the optional server) to
//! `createWunderGraphApplication`. Older projects run from the config file
//! itself.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::EntryPointConfig;
use crate::emitters::application::{ApplicationOptions, emit_application};
use crate::error::EntryPointError;

/// Substrings that mark a config file as an application config.
///
/// Either one suffices; both are matched literally anywhere in the file.
pub const APPLICATION_MARKERS: [&str; 2] = ["export default defineConfig", "WunderGraphConfig"];

/// The file a project should be started from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "path", rename_all = "snake_case")]
pub enum EntryPoint {
    /// The config file itself, returned unchanged.
    Legacy(PathBuf),
    /// The wrapper written into the generated directory.
    Generated(PathBuf),
}

impl EntryPoint {
    pub fn path(&self) -> &Path {
        match self {
            Self::Legacy(path) | Self::Generated(path) => path,
        }
    }

    pub fn into_path(self) -> PathBuf {
        match self {
            Self::Legacy(path) | Self::Generated(path) => path,
        }
    }

    pub fn is_generated(&self) -> bool {
        matches!(self, Self::Generated(_))
    }
}

/// Whether the config text uses one of the application markers.
pub fn has_application_config(content: &str) -> bool {
    APPLICATION_MARKERS
        .iter()
        .any(|marker| content.contains(marker))
}

/// Resolves and, when needed, generates the entry point of a project.
#[derive(Debug, Clone, Default)]
pub struct EntryPointResolver {
    config: EntryPointConfig,
}

impl EntryPointResolver {
    pub fn new(config: EntryPointConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EntryPointConfig {
        &self.config
    }

    /// Path of the legacy config file inside `project_dir`.
    pub fn legacy_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.config.config_file)
    }

    /// Path the generated entry point is written to inside `project_dir`.
    pub fn application_path(&self, project_dir: &Path) -> PathBuf {
        project_dir
            .join(&self.config.generated_dir)
            .join(&self.config.application_file)
    }

    /// Reads the legacy config and reports whether it carries an application marker.
    pub fn detect(&self, project_dir: &Path) -> Result<bool, EntryPointError> {
        let path = self.legacy_path(project_dir);
        let content = fs::read_to_string(&path).map_err(|source| EntryPointError::Read {
            path: path.clone(),
            source,
        })?;
        let detected = has_application_config(&content);
        log::debug!(
            "{}: application config {}",
            path.display(),
            if detected { "detected" } else { "not detected" }
        );
        Ok(detected)
    }

    /// Return the entry point of `project_dir`, writing the generated wrapper
    /// if the legacy config uses an application marker.
    ///
    /// The returned path exists after a successful call.
    pub fn resolve(&self, project_dir: &Path) -> Result<EntryPoint, EntryPointError> {
        if self.detect(project_dir)? {
            self.generate(project_dir).map(EntryPoint::Generated)
        } else {
            Ok(EntryPoint::Legacy(self.legacy_path(project_dir)))
        }
    }

    /// Whether the server config exists as a regular file.
    ///
    /// A missing file is `false`; any other stat failure is an error.
    pub fn has_server_config(&self, project_dir: &Path) -> Result<bool, EntryPointError> {
        let path = project_dir.join(&self.config.server_file);
        match fs::metadata(&path) {
            Ok(meta) => Ok(!meta.is_dir()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(EntryPointError::Stat { path, source }),
        }
    }

    /// Write the application entry point into the generated directory,
    /// overwriting any previous content, and return its path.
    pub fn generate(&self, project_dir: &Path) -> Result<PathBuf, EntryPointError> {
        self.config.validate()?;
        let has_server_config = self.has_server_config(project_dir)?;
        let options = ApplicationOptions::from_config(&self.config, has_server_config);
        let file = emit_application(&options)?;

        let generated = project_dir.join(&self.config.generated_dir);
        fs::create_dir_all(&generated).map_err(|source| EntryPointError::DirCreate {
            path: generated.clone(),
            source,
        })?;

        let path = generated.join(&file.path);
        fs::write(&path, &file.content).map_err(|source| EntryPointError::Write {
            path: path.clone(),
            source,
        })?;
        log::debug!(
            "wrote {} (server config: {})",
            path.display(),
            has_server_config
        );

        Ok(path)
    }
}

/// Resolve the entry point of `project_dir` using the default layout.
pub fn resolve_entry_point(project_dir: &Path) -> Result<PathBuf, EntryPointError> {
    EntryPointResolver::default()
        .resolve(project_dir)
        .map(EntryPoint::into_path)
}

/// Generate the application entry point of `project_dir` using the default layout.
pub fn generate_entry_point(project_dir: &Path) -> Result<PathBuf, EntryPointError> {
    EntryPointResolver::default().generate(project_dir)
}
