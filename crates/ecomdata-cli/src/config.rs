use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use ecomdata_generate::GenerateOptions;
use ecomdata_ingest::IngestOptions;

use crate::CliError;

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "ecomdata.toml";

/// File-level settings; every key falls back to the compiled-in default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub generate: GenerateOptions,
    pub ingest: IngestOptions,
}

pub fn load_settings(path: Option<&Path>) -> Result<Settings, CliError> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !default.exists() {
                return Ok(Settings::default());
            }
            default
        }
    };

    let content = std::fs::read_to_string(&path).map_err(|err| {
        CliError::Config(format!("cannot read {}: {err}", path.display()))
    })?;
    parse_settings(&content)
        .map_err(|err| CliError::Config(format!("{}: {err}", path.display())))
}

pub fn parse_settings(content: &str) -> Result<Settings, toml::de::Error> {
    toml::from_str(content)
}
