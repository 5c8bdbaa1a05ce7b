//! apigw-snapshot - AWS API Gateway information getter
//!
//! Prints every REST API in a region together with its resources and the
//! configuration of the selected HTTP methods.

mod config;
mod output;
mod snapshot;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use apigw_aws::AwsGatewayClient;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{ArgOverrides, ConfigFile, RestMethod};
use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "apigw-snapshot")]
#[command(author, version, about = "AWS API Gateways information getter")]
struct Cli {
    /// Gateway region
    #[arg(short, long, value_name = "REGION_NAME")]
    region: Option<String>,

    /// Credentials profile [default: default]
    #[arg(short, long, value_name = "PROFILE_NAME")]
    profile: Option<String>,

    /// Output format [default: json]
    #[arg(short, long, value_enum, value_name = "FORMAT")]
    format: Option<OutputFormat>,

    /// REST method(s) to expand; all methods when not specified
    #[arg(short, long, value_enum, num_args = 1.., value_name = "REST_METHOD")]
    methods: Vec<RestMethod>,

    /// Configuration file path
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// API Gateway endpoint override (e.g. LocalStack)
    #[arg(long, value_name = "URL")]
    endpoint_url: Option<String>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn overrides(&self) -> ArgOverrides {
        ArgOverrides {
            region: self.region.clone(),
            profile: self.profile.clone(),
            format: self.format,
            methods: self.methods.clone(),
            endpoint_url: self.endpoint_url.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so stdout only carries the snapshot
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();

    match run(&cli).await {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("ERROR: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> Result<String> {
    let file = match &cli.config {
        Some(path) => ConfigFile::load_from(path)?,
        None => ConfigFile::load()?,
    };
    let config = file.merge_with_args(&cli.overrides())?;

    let client = AwsGatewayClient::new(&config.aws_client_config()).await;
    let output = snapshot::snapshot(Arc::new(client), &config).await?;

    Ok(output)
}
