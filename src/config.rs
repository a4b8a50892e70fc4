//! Generator configuration structures and YAML parsing.

use std::fs::File;
use std::path::{Path, PathBuf};

use color_eyre::Result;
use log::info;
use serde::{Deserialize, Serialize};

/// Top-level configuration for one generator run.
///
/// Either a persisted graph (`graph_file`) or an inventory plus a shape
/// name (`hostfile` + `graph_type`) describes the topology; `graph_file`
/// wins when both are present.
#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    /// Path to an inventory file naming the routers and brokers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostfile: Option<PathBuf>,
    /// Path to a persisted node-link graph, bypassing topology construction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graph_file: Option<PathBuf>,
    /// Topology shape name used together with `hostfile`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graph_type: Option<String>,
    /// Output directory root; takes precedence over the command-line value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out_dir: Option<PathBuf>,
}

impl Config {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.graph_file.is_none() && self.graph_type.is_none() {
            return Err(ValidationError::MissingInput(
                "either graph_file or graph_type must be set".to_string(),
            ));
        }
        if self.graph_file.is_none() && self.hostfile.is_none() {
            return Err(ValidationError::MissingInput(
                "hostfile is required when building from graph_type".to_string(),
            ));
        }
        if let Some(shape) = &self.graph_type {
            if shape.is_empty() {
                return Err(ValidationError::MissingInput(
                    "graph_type cannot be empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid configuration: {0}")]
    MissingInput(String),
}

/// Load and validate configuration from a YAML file
pub fn load_config(config_path: &Path) -> Result<Config> {
    info!("Loading configuration from: {:?}", config_path);

    let file = File::open(config_path)?;
    let config: Config = serde_yaml::from_reader(file)?;
    config.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn load_str(yaml: &str) -> Result<Config> {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", yaml).unwrap();
        load_config(temp_file.path())
    }

    #[test]
    fn test_load_shape_config() {
        let config = load_str("hostfile: hosts\ngraph_type: bus\n").unwrap();
        assert_eq!(config.hostfile, Some(PathBuf::from("hosts")));
        assert_eq!(config.graph_type.as_deref(), Some("bus"));
        assert!(config.graph_file.is_none());
    }

    #[test]
    fn test_load_graph_file_config() {
        let config = load_str("graph_file: topology.yml\n").unwrap();
        assert_eq!(config.graph_file, Some(PathBuf::from("topology.yml")));
        assert!(config.out_dir.is_none());
    }

    #[test]
    fn test_load_out_dir() {
        let config =
            load_str("hostfile: hosts\ngraph_type: line\nout_dir: generated/run1\n").unwrap();
        assert_eq!(config.out_dir, Some(PathBuf::from("generated/run1")));
    }

    #[test]
    fn test_missing_input_rejected() {
        assert!(load_str("hostfile: hosts\n").is_err());
    }

    #[test]
    fn test_shape_without_hostfile_rejected() {
        assert!(load_str("graph_type: bus\n").is_err());
    }
}
