use std::path::PathBuf;

use identex_core::Authoring;
use identex_core::config_file::{ConfigFile, DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_PATH};

/// Environment variable overriding the source document path.
pub const INPUT_ENV: &str = "IDENTEX_INPUT";
/// Environment variable overriding the dataset output path.
pub const OUTPUT_ENV: &str = "IDENTEX_OUTPUT";

/// Effective settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub input: PathBuf,
    pub output: PathBuf,
    pub toc_page: usize,
    pub authoring: Authoring,
}

impl Settings {
    /// Resolve configuration: CLI flags > env vars > config file > defaults.
    pub fn resolve(
        input_flag: Option<PathBuf>,
        output_flag: Option<PathBuf>,
        config: &ConfigFile,
        env: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let input = input_flag
            .or_else(|| env(INPUT_ENV).map(PathBuf::from))
            .or_else(|| config.input_path().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT_PATH));
        let output = output_flag
            .or_else(|| env(OUTPUT_ENV).map(PathBuf::from))
            .or_else(|| config.output_path().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_PATH));

        let defaults = Authoring::default();
        let authoring = Authoring {
            license_status: config.license_status().unwrap_or(defaults.license_status),
            last_updated: config
                .last_updated()
                .map(str::to_string)
                .unwrap_or(defaults.last_updated),
        };

        Self {
            input,
            output,
            toc_page: config.toc_page().unwrap_or(2),
            authoring,
        }
    }
}
