use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::cli::GlobalArgs;
use crate::error::{Error, Result};

/// Process-wide settings, built once in `main` and passed by reference.
#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub log_file: Option<PathBuf>,
    pub json_output: bool,
    pub verbose: u8,
}

/// Contents of `config.toml`. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub data_dir: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
}

impl FileConfig {
    fn parse(raw: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    fn read(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {e}", path.display())))?;
        Self::parse(&raw).map_err(|e| Error::Config(format!("{}: {e}", path.display())))
    }
}

impl Config {
    /// Defaults, overlaid by the config file, overlaid by CLI flags.
    ///
    /// An explicit `--config` path must exist; the platform default is only
    /// read when present.
    pub fn from_args(args: &GlobalArgs) -> Result<Self> {
        let file = match &args.config {
            Some(path) => FileConfig::read(path)?,
            None => match default_config_path() {
                Some(path) if path.is_file() => FileConfig::read(&path)?,
                _ => FileConfig::default(),
            },
        };

        Ok(Config::resolve(file, args))
    }

    fn resolve(file: FileConfig, args: &GlobalArgs) -> Self {
        let data_dir = args
            .data_dir
            .clone()
            .or(file.data_dir)
            .unwrap_or_else(default_data_dir);

        Config {
            data_dir,
            log_file: file.log_file,
            json_output: args.json,
            verbose: args.verbose,
        }
    }

    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Config {
            data_dir: data_dir.into(),
            ..Config::default()
        }
    }

    /// Create the data directory if needed. Only commands that write call this.
    pub fn ensure_data_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.data_dir).map_err(|source| Error::Write {
            path: self.data_dir.clone(),
            source,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_dir: default_data_dir(),
            log_file: None,
            json_output: false,
            verbose: 0,
        }
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("", "", "kith")
}

/// `~/.local/share/kith/snapshots` or the platform equivalent.
pub fn default_data_dir() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().join("snapshots"))
        .unwrap_or_else(|| PathBuf::from("snapshots"))
}

/// `~/.config/kith/config.toml` or the platform equivalent.
pub fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
}
