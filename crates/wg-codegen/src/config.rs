use std::fs;
use std::io;
use std::path::{Component, Path};

use serde::Deserialize;

use crate::error::ConfigError;

/// Legacy entry point, used by default.
pub const DEFAULT_CONFIG_FILE: &str = "wundergraph.config.ts";
/// Optional server configuration, only checked for existence.
pub const DEFAULT_SERVER_FILE: &str = "wundergraph.server.ts";
/// Directory, relative to the project directory, that holds generated files.
pub const DEFAULT_GENERATED_DIR: &str = "generated";
/// Entry point written for projects that use `export default defineConfig`.
pub const DEFAULT_APPLICATION_FILE: &str = "wundergraph.application.ts";

/// Default config file name, looked up in the project directory.
pub const CONFIG_FILE_NAME: &str = ".wg-entry.yaml";

/// Project layout used to locate inputs and place the generated entry point.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EntryPointConfig {
    pub config_file: String,
    pub server_file: String,
    pub generated_dir: String,
    pub application_file: String,
}

impl Default for EntryPointConfig {
    fn default() -> Self {
        Self {
            config_file: DEFAULT_CONFIG_FILE.to_string(),
            server_file: DEFAULT_SERVER_FILE.to_string(),
            generated_dir: DEFAULT_GENERATED_DIR.to_string(),
            application_file: DEFAULT_APPLICATION_FILE.to_string(),
        }
    }
}

impl EntryPointConfig {
    /// Check that every layout path stays inside the project directory.
    ///
    /// Import specifiers are derived by walking up out of `generated_dir`, so
    /// absolute paths and `..` segments cannot be expressed and are rejected.
    /// `application_file` must be a bare file name.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("config_file", &self.config_file),
            ("server_file", &self.server_file),
            ("generated_dir", &self.generated_dir),
        ] {
            let escapes = Path::new(value).components().any(|c| {
                matches!(
                    c,
                    Component::ParentDir | Component::RootDir | Component::Prefix(_)
                )
            });
            if escapes {
                return Err(ConfigError::InvalidLayout {
                    field,
                    value: value.clone(),
                });
            }
        }

        let mut components = Path::new(&self.application_file).components();
        let bare_name = matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        );
        if !bare_name {
            return Err(ConfigError::InvalidLayout {
                field: "application_file",
                value: self.application_file.clone(),
            });
        }

        Ok(())
    }

    /// Import specifier for the config module, relative to the generated directory.
    pub fn config_module(&self) -> String {
        self.module_specifier(&self.config_file)
    }

    /// Import specifier for the server module, relative to the generated directory.
    pub fn server_module(&self) -> String {
        self.module_specifier(&self.server_file)
    }

    /// `generated` + `wundergraph.config.ts` → `../wundergraph.config`
    fn module_specifier(&self, file: &str) -> String {
        let depth = Path::new(&self.generated_dir)
            .components()
            .filter(|c| matches!(c, Component::Normal(_)))
            .count();
        let prefix = if depth == 0 {
            "./".to_string()
        } else {
            "../".repeat(depth)
        };

        let module: Vec<String> = Path::new(file)
            .with_extension("")
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();

        format!("{prefix}{}", module.join("/"))
    }
}

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<EntryPointConfig>, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    let config: EntryPointConfig =
        serde_yaml_ng::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    config.validate()?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# wg-entry configuration
config_file: wundergraph.config.ts        # legacy entry point, scanned for defineConfig
server_file: wundergraph.server.ts        # imported by the generated entry point when present
generated_dir: generated                  # relative to the project directory
application_file: wundergraph.application.ts
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EntryPointConfig::default();
        assert_eq!(config.config_file, "wundergraph.config.ts");
        assert_eq!(config.server_file, "wundergraph.server.ts");
        assert_eq!(config.generated_dir, "generated");
        assert_eq!(config.application_file, "wundergraph.application.ts");
    }

    #[test]
    fn test_default_config_content_matches_defaults() {
        let config: EntryPointConfig = serde_yaml_ng::from_str(default_config_content()).unwrap();
        assert_eq!(config, EntryPointConfig::default());
    }

    #[test]
    fn test_parse_minimal_config() {
        let yaml = "generated_dir: .wundergraph/generated\n";
        let config: EntryPointConfig = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(config.generated_dir, ".wundergraph/generated");
        // Defaults applied
        assert_eq!(config.config_file, "wundergraph.config.ts");
        assert_eq!(config.application_file, "wundergraph.application.ts");
    }

    #[test]
    fn test_module_specifiers() {
        let config = EntryPointConfig::default();
        assert_eq!(config.config_module(), "../wundergraph.config");
        assert_eq!(config.server_module(), "../wundergraph.server");
    }

    #[test]
    fn test_module_specifier_nested_generated_dir() {
        let config = EntryPointConfig {
            generated_dir: "build/generated".to_string(),
            ..EntryPointConfig::default()
        };
        assert_eq!(config.config_module(), "../../wundergraph.config");
    }

    #[test]
    fn test_module_specifier_flat_generated_dir() {
        let config = EntryPointConfig {
            generated_dir: ".".to_string(),
            ..EntryPointConfig::default()
        };
        assert_eq!(config.server_module(), "./wundergraph.server");
    }

    #[test]
    fn test_load_missing_config() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_config(&dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_load_unreadable_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        // Exists but cannot be read as a file.
        fs::create_dir(&path).unwrap();
        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }), "got {err:?}");
    }

    #[test]
    fn test_load_rejects_escaping_generated_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "generated_dir: ../out\n").unwrap();
        let err = load_config(&path).unwrap_err();
        match err {
            ConfigError::InvalidLayout { field, value } => {
                assert_eq!(field, "generated_dir");
                assert_eq!(value, "../out");
            }
            other => panic!("expected invalid layout, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_default_layout() {
        assert!(EntryPointConfig::default().validate().is_ok());
        let nested = EntryPointConfig {
            generated_dir: "./build/generated".to_string(),
            ..EntryPointConfig::default()
        };
        assert!(nested.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_absolute_and_parent_paths() {
        let absolute = EntryPointConfig {
            generated_dir: "/tmp/generated".to_string(),
            ..EntryPointConfig::default()
        };
        assert!(matches!(
            absolute.validate(),
            Err(ConfigError::InvalidLayout { field: "generated_dir", .. })
        ));

        let parent = EntryPointConfig {
            generated_dir: "generated/../../out".to_string(),
            ..EntryPointConfig::default()
        };
        assert!(parent.validate().is_err());

        let server = EntryPointConfig {
            server_file: "../wundergraph.server.ts".to_string(),
            ..EntryPointConfig::default()
        };
        assert!(matches!(
            server.validate(),
            Err(ConfigError::InvalidLayout { field: "server_file", .. })
        ));
    }

    #[test]
    fn test_validate_requires_bare_application_file() {
        let nested = EntryPointConfig {
            application_file: "app/wundergraph.application.ts".to_string(),
            ..EntryPointConfig::default()
        };
        assert!(matches!(
            nested.validate(),
            Err(ConfigError::InvalidLayout { field: "application_file", .. })
        ));
    }

    #[test]
    fn test_load_invalid_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "generated_dir: [unterminated\n").unwrap();
        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
