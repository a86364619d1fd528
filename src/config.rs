//! Parameter configuration for the command line tool.
//!
//! Values are resolved per field: flag or `ARGONHASH_*` variable, then the
//! JSON config file, then [`Params::default`].

use anyhow::{Context, Result};
use argonhash::Params;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, clap::Args)]
pub struct Argon2Args {
    /// JSON file with any of time_cost, mem_cost_kib, parallelism, key_len
    #[arg(long, value_name = "PATH", env = "ARGONHASH_CONFIG")]
    config: Option<PathBuf>,

    /// Argon2 memory cost in KiB (default: 65536)
    #[arg(long = "argon-mem", env = "ARGONHASH_MEM")]
    mem_cost_kib: Option<u32>,

    /// Argon2 time cost / iterations (default: 2)
    #[arg(long = "argon-time", env = "ARGONHASH_TIME")]
    time_cost: Option<u32>,

    /// Argon2 parallelism (default: number of CPUs)
    #[arg(long = "argon-parallelism", env = "ARGONHASH_PARALLELISM")]
    parallelism: Option<u8>,

    /// Derived key length in bytes (default: 32)
    #[arg(long = "key-len", env = "ARGONHASH_KEY_LEN")]
    key_len: Option<u32>,
}

/// Partial parameter set as read from a config file.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub time_cost: Option<u32>,
    pub mem_cost_kib: Option<u32>,
    pub parallelism: Option<u8>,
    pub key_len: Option<u32>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        serde_json::from_str(&data)
            .with_context(|| format!("invalid config file {}", path.display()))
    }
}

impl Argon2Args {
    pub fn to_params(&self) -> Result<Params> {
        let file = match &self.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        let default = Params::default();

        let params = Params::new(
            self.time_cost
                .or(file.time_cost)
                .unwrap_or(default.time_cost()),
            self.mem_cost_kib
                .or(file.mem_cost_kib)
                .unwrap_or(default.mem_cost_kib()),
            self.parallelism
                .or(file.parallelism)
                .unwrap_or(default.parallelism()),
            self.key_len.or(file.key_len).unwrap_or(default.key_len()),
        )
        .context("invalid Argon2 parameters")?;

        log::debug!("resolved parameters {params:?}");
        Ok(params)
    }
}
