//! Configuration handling for apigw-snapshot
//!
//! Values come from three layers, highest priority first: command-line
//! arguments, the TOML config file, built-in defaults. The merge yields an
//! immutable [`Config`].

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use apigw_aws::AwsClientConfig;
use apigw_core::{MethodFilter, SnapshotError, SnapshotResult};
use clap::ValueEnum;
use serde::Deserialize;

use crate::output::OutputFormat;

/// Credentials profile used when none is configured
pub const DEFAULT_PROFILE: &str = "default";

/// REST method names accepted by the method filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Deserialize)]
pub enum RestMethod {
    #[value(name = "GET")]
    #[serde(rename = "GET")]
    Get,
    #[value(name = "POST")]
    #[serde(rename = "POST")]
    Post,
    #[value(name = "PUT")]
    #[serde(rename = "PUT")]
    Put,
    #[value(name = "DELETE")]
    #[serde(rename = "DELETE")]
    Delete,
    #[value(name = "PATCH")]
    #[serde(rename = "PATCH")]
    Patch,
    #[value(name = "OPTIONS")]
    #[serde(rename = "OPTIONS")]
    Options,
    #[value(name = "HEAD")]
    #[serde(rename = "HEAD")]
    Head,
    /// Every method
    #[value(name = "ALL")]
    #[serde(rename = "ALL")]
    All,
}

impl RestMethod {
    /// Wire name of the method
    pub fn as_str(self) -> &'static str {
        match self {
            RestMethod::Get => "GET",
            RestMethod::Post => "POST",
            RestMethod::Put => "PUT",
            RestMethod::Delete => "DELETE",
            RestMethod::Patch => "PATCH",
            RestMethod::Options => "OPTIONS",
            RestMethod::Head => "HEAD",
            RestMethod::All => apigw_core::ALL_METHODS,
        }
    }
}

/// Contents of the optional config file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Default region
    pub region: Option<String>,
    /// Default credentials profile
    pub profile: Option<String>,
    /// Default output format
    pub format: Option<OutputFormat>,
    /// Default method filter
    pub methods: Option<Vec<RestMethod>>,
    /// Default endpoint override
    pub endpoint_url: Option<String>,
}

impl ConfigFile {
    /// Load the config file from its default location, if present
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load the config file from a specific path
    ///
    /// Unreadable files fail with I/O context; malformed or invalid values
    /// fail with [`SnapshotError::Config`].
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let file: Self = toml::from_str(&content).map_err(|e| {
            SnapshotError::config(format!(
                "cannot parse {}: {}",
                path.display(),
                e.message()
            ))
        })?;
        Ok(file)
    }

    /// Default config file path (`<config_dir>/apigw-snapshot/config.toml`)
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("apigw-snapshot").join("config.toml"))
    }

    /// Merge command-line values over file values and defaults
    pub fn merge_with_args(&self, args: &ArgOverrides) -> SnapshotResult<Config> {
        let region = args
            .region
            .clone()
            .or_else(|| self.region.clone())
            .filter(|r| !r.trim().is_empty())
            .ok_or_else(|| {
                SnapshotError::config("region is required (pass -r/--region or set it in the config file)")
            })?;

        let methods = match (args.methods.as_slice(), self.methods.as_deref()) {
            ([], None) => MethodFilter::all(),
            ([], Some([])) => {
                return Err(SnapshotError::config(
                    "methods in the config file must list at least one method",
                ))
            }
            ([], Some(file)) => method_filter(file),
            (cli, _) => method_filter(cli),
        };

        Ok(Config {
            region,
            profile: args
                .profile
                .clone()
                .or_else(|| self.profile.clone())
                .unwrap_or_else(|| DEFAULT_PROFILE.to_string()),
            format: args.format.or(self.format).unwrap_or_default(),
            methods,
            endpoint_url: args
                .endpoint_url
                .clone()
                .or_else(|| self.endpoint_url.clone()),
        })
    }
}

fn method_filter(methods: &[RestMethod]) -> MethodFilter {
    MethodFilter::new(methods.iter().map(|m| m.as_str()))
}

/// Values given on the command line; `None`/empty means "not given"
#[derive(Debug, Clone, Default)]
pub struct ArgOverrides {
    pub region: Option<String>,
    pub profile: Option<String>,
    pub format: Option<OutputFormat>,
    pub methods: Vec<RestMethod>,
    pub endpoint_url: Option<String>,
}

/// Fully resolved configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub region: String,
    pub profile: String,
    pub format: OutputFormat,
    pub methods: MethodFilter,
    pub endpoint_url: Option<String>,
}

impl Config {
    /// Connection settings for the AWS client
    pub fn aws_client_config(&self) -> AwsClientConfig {
        let config = AwsClientConfig::new(&self.region, &self.profile);
        match &self.endpoint_url {
            Some(url) => config.with_endpoint(url),
            None => config,
        }
    }
}
