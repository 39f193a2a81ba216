use crate::{AddressRecord, DecodeOptions, DEFAULT_SOURCE};
use serde::Deserialize;
use std::{
    ffi::OsStr,
    fs::File,
    io::{self, Read},
    path::PathBuf,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("error in reading {filename}: {source}")]
    Io {
        filename: String,
        #[source]
        source: io::Error,
    },

    #[error("error in parsing config: {0}")]
    Toml(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source: PathBuf,
    /// Device names to report. Empty means every device.
    pub interfaces: Vec<String>,
    pub output: Output,
    pub decode: DecodeOptions,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Output {
    #[default]
    Text,
    Toml,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            source: PathBuf::from(DEFAULT_SOURCE),
            interfaces: vec![],
            output: Output::default(),
            decode: DecodeOptions::default(),
        }
    }
}

impl Config {
    const FILENAME: &'static str = "ipv6flags.toml";

    /// Loads the configuration from `filename`, or from `ipv6flags.toml`
    /// when `filename` is empty. A missing default file is not an error.
    pub fn parse(mut filename: &str) -> Result<Config, ConfigError> {
        let explicit = !filename.is_empty();
        if !explicit {
            filename = Config::FILENAME;
        }

        let mut f = match File::open(filename) {
            Ok(f) => f,
            Err(e) if !explicit && e.kind() == io::ErrorKind::NotFound => {
                return Ok(Config::default())
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    filename: filename.to_string(),
                    source,
                })
            }
        };

        let mut contents = String::new();
        f.read_to_string(&mut contents)
            .map_err(|source| ConfigError::Io {
                filename: filename.to_string(),
                source,
            })?;

        Config::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Config, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Toml(e.message().to_string()))
    }

    pub fn selects(&self, record: &AddressRecord) -> bool {
        self.interfaces.is_empty()
            || self
                .interfaces
                .iter()
                .any(|name| record.device_name.as_os_str() == OsStr::new(name))
    }
}
