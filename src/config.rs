//! Server configuration.
//!
//! Built once at startup from the command line and an optional YAML file, then frozen
//! into a [`ServerConfig`] that every connection shares read-only.

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::Parser;
use serde::Deserialize;

/// Command-line surface.
#[derive(Debug, Parser)]
#[command(name = "hearth", version)]
#[command(about = "A lightweight web server with script support", long_about = None)]
pub struct Cli {
    /// Set root directory
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub root: PathBuf,

    /// Set port
    #[arg(short, long, value_name = "PORT", default_value_t = 8080,
          value_parser = clap::value_parser!(u16).range(1..))]
    pub port: u16,

    /// Run as daemon
    #[arg(short, long)]
    pub daemon: bool,

    /// YAML file with interpreter and limit overrides
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Program used to execute .php files
    #[arg(long, value_name = "PROGRAM")]
    pub interpreter: Option<String>,
}

/// Size caps applied while handling a single request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Bytes taken from the socket for one request; the rest is never read
    pub read_buffer: usize,
    pub max_method_len: usize,
    pub max_path_len: usize,
    pub max_version_len: usize,
    /// Header lines beyond this count are ignored
    pub max_headers: usize,
    /// Script output beyond this many bytes is cut off
    pub max_script_output: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            read_buffer: 8191,
            max_method_len: 15,
            max_path_len: 4095,
            max_version_len: 15,
            max_headers: 100,
            max_script_output: 16 * 1024 * 1024,
        }
    }
}

/// Contents of the optional `--config` file.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub interpreter: Option<String>,
    pub limits: Limits,
}

impl FileConfig {
    pub fn from_yaml(text: &str) -> anyhow::Result<Self> {
        serde_yaml::from_str(text).context("invalid configuration file")
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_yaml(&text)
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub root: PathBuf,
    pub port: u16,
    pub daemon: bool,
    pub interpreter: String,
    pub limits: Limits,
}

pub const DEFAULT_INTERPRETER: &str = "php";

impl ServerConfig {
    /// A configuration serving `root` with default limits.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            port: 8080,
            daemon: false,
            interpreter: DEFAULT_INTERPRETER.to_string(),
            limits: Limits::default(),
        }
    }

    /// Merges the command line with the optional config file and checks the root.
    ///
    /// The command-line interpreter wins over the file's.
    pub fn from_cli(cli: Cli) -> anyhow::Result<Self> {
        let file = match &cli.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };

        if !cli.root.is_dir() {
            bail!(
                "Root directory '{}' does not exist or is not a directory",
                cli.root.display()
            );
        }

        Ok(Self {
            root: cli.root,
            port: cli.port,
            daemon: cli.daemon,
            interpreter: cli
                .interpreter
                .or(file.interpreter)
                .unwrap_or_else(|| DEFAULT_INTERPRETER.to_string()),
            limits: file.limits,
        })
    }
}
