use shape_kit::{DetectionConfig, ShapeError};

use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    SerdeError(#[from] serde_json::Error),
    #[error(transparent)]
    TomlDeError(#[from] toml::de::Error),
    #[error(transparent)]
    TomlSerError(#[from] toml::ser::Error),
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[error(transparent)]
    Detection(#[from] ShapeError),
    #[error("Unsupported file format. Please use .toml or .json files")]
    UnsupportedFileFormat,
}

/// Load a detection config from a `.toml` or `.json` file and validate it.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<DetectionConfig, CliError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let config = match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => config_from_toml(&content)?,
        Some("json") => config_from_json(&content)?,
        _ => return Err(CliError::UnsupportedFileFormat),
    };
    config.validate()?;
    Ok(config)
}

pub fn config_from_toml(content: &str) -> Result<DetectionConfig, CliError> {
    Ok(toml::from_str(content)?)
}

pub fn config_from_json(content: &str) -> Result<DetectionConfig, CliError> {
    Ok(serde_json::from_str(content)?)
}

/// Default config rendered as TOML, for seeding a config file.
pub fn default_config_toml() -> Result<String, CliError> {
    Ok(toml::to_string_pretty(&DetectionConfig::default())?)
}
