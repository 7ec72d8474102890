use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::LicenseStatus;

/// Default location of the source document.
pub const DEFAULT_INPUT_PATH: &str = "content/source.pdf";
/// Default location of the generated dataset.
pub const DEFAULT_OUTPUT_PATH: &str = "content/false_identities.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    pub paths: Option<PathsConfig>,
    pub document: Option<DocumentConfig>,
    pub authoring: Option<AuthoringConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathsConfig {
    pub input: Option<String>,
    pub output: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentConfig {
    /// 1-based page holding the table of contents.
    pub toc_page: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthoringConfig {
    pub license_status: Option<LicenseStatus>,
    pub last_updated: Option<String>,
}

/// Platform config directory path: `<config_dir>/identex/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("identex").join("config.toml"))
}

/// Load config by cascading CWD `.identex.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(Path::new(".identex.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &Path) -> Option<ConfigFile> {
    read_config(path).ok()
}

/// Strict variant of [`load_from_path`] for a file the user asked for explicitly.
pub fn read_config(path: &Path) -> Result<ConfigFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    let base_paths = base.paths.unwrap_or_default();
    let overlay_paths = overlay.paths.unwrap_or_default();
    let base_doc = base.document.unwrap_or_default();
    let overlay_doc = overlay.document.unwrap_or_default();
    let base_auth = base.authoring.unwrap_or_default();
    let overlay_auth = overlay.authoring.unwrap_or_default();

    ConfigFile {
        paths: Some(PathsConfig {
            input: overlay_paths.input.or(base_paths.input),
            output: overlay_paths.output.or(base_paths.output),
        }),
        document: Some(DocumentConfig {
            toc_page: overlay_doc.toc_page.or(base_doc.toc_page),
        }),
        authoring: Some(AuthoringConfig {
            license_status: overlay_auth.license_status.or(base_auth.license_status),
            last_updated: overlay_auth.last_updated.or(base_auth.last_updated),
        }),
    }
}

impl ConfigFile {
    pub fn input_path(&self) -> Option<&str> {
        self.paths.as_ref().and_then(|p| p.input.as_deref())
    }

    pub fn output_path(&self) -> Option<&str> {
        self.paths.as_ref().and_then(|p| p.output.as_deref())
    }

    pub fn toc_page(&self) -> Option<usize> {
        self.document.as_ref().and_then(|d| d.toc_page)
    }

    pub fn license_status(&self) -> Option<LicenseStatus> {
        self.authoring.as_ref().and_then(|a| a.license_status)
    }

    pub fn last_updated(&self) -> Option<&str> {
        self.authoring.as_ref().and_then(|a| a.last_updated.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_partial_config() {
        let toml_str = "[document]\ntoc_page = 3\n";
        let parsed: ConfigFile = toml::from_str(toml_str).unwrap();
        assert_eq!(parsed.toc_page(), Some(3));
        assert!(parsed.paths.is_none());
        assert!(parsed.input_path().is_none());
    }

    #[test]
    fn parses_license_status() {
        let toml_str = "[authoring]\nlicense_status = \"paraphrased\"\nlast_updated = \"2026-02-01\"\n";
        let parsed: ConfigFile = toml::from_str(toml_str).unwrap();
        assert_eq!(parsed.license_status(), Some(LicenseStatus::Paraphrased));
        assert_eq!(parsed.last_updated(), Some("2026-02-01"));
    }

    #[test]
    fn merge_overlay_wins() {
        let base = ConfigFile {
            paths: Some(PathsConfig {
                input: Some("base.pdf".to_string()),
                output: Some("base.json".to_string()),
            }),
            ..Default::default()
        };
        let overlay = ConfigFile {
            paths: Some(PathsConfig {
                input: Some("overlay.pdf".to_string()),
                output: None,
            }),
            document: Some(DocumentConfig { toc_page: Some(4) }),
            ..Default::default()
        };
        let merged = merge(base, overlay);
        assert_eq!(merged.input_path(), Some("overlay.pdf"));
        assert_eq!(merged.output_path(), Some("base.json"));
        assert_eq!(merged.toc_page(), Some(4));
        assert!(merged.license_status().is_none());
    }

    #[test]
    fn read_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("identex.toml");
        std::fs::write(&path, "[paths]\ninput = \"docs/catalogue.pdf\"\n").unwrap();

        let config = read_config(&path).unwrap();
        assert_eq!(config.input_path(), Some("docs/catalogue.pdf"));
        assert_eq!(load_from_path(&path), Some(config));
    }

    #[test]
    fn read_config_reports_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert!(matches!(read_config(&missing), Err(ConfigError::Read { .. })));
        assert!(load_from_path(&missing).is_none());

        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "[paths\ninput = 1").unwrap();
        assert!(matches!(read_config(&broken), Err(ConfigError::Parse { .. })));
    }
}
