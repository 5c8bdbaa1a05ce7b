//! AWS API Gateway client
//!
//! Implements [`apigw_core::GatewayClient`] on top of the official
//! `aws-sdk-apigateway` crate. Credentials are resolved by `aws-config` from
//! the named profile; setting an endpoint URL makes the client talk to any
//! API-Gateway-compatible service such as LocalStack.
//!
//! ```rust,no_run
//! use apigw_aws::{AwsClientConfig, AwsGatewayClient};
//! use apigw_core::GatewayClient;
//!
//! # async fn demo() -> apigw_core::SnapshotResult<()> {
//! let client = AwsGatewayClient::new(&AwsClientConfig::new("eu-west-1", "default")).await;
//! let gateways = client.list_gateways().await?;
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod convert;

pub use client::AwsGatewayClient;
pub use config::AwsClientConfig;
