//! apigw-core - Core types for API Gateway snapshots
//!
//! This crate holds the pieces that do not depend on a particular cloud SDK:
//! the snapshot data model, the [`GatewayClient`] capability trait, the
//! method filter, and the [`Aggregator`] that walks a client to build the
//! gateway → resource → method tree.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use apigw_core::{Aggregator, MethodFilter};
//! use apigw_core::testing::{gateway, resource, MockGatewayClient};
//!
//! # async fn demo() -> apigw_core::SnapshotResult<()> {
//! let client = MockGatewayClient::new()
//!     .with_gateway(gateway("a1", "orders"), vec![resource("r1", "/orders", &["GET"])]);
//!
//! let aggregator = Aggregator::new(Arc::new(client), MethodFilter::all());
//! let tree = aggregator.load().await?;
//! assert!(tree.contains_key("orders"));
//! # Ok(())
//! # }
//! ```

pub mod aggregator;
pub mod client;
pub mod error;
pub mod filter;
pub mod models;
pub mod testing;

pub use aggregator::Aggregator;
pub use client::GatewayClient;
pub use error::{SnapshotError, SnapshotResult};
pub use filter::{MethodFilter, ALL_METHODS, REST_METHODS};
pub use models::*;
