//! GatewayClient trait - the remote read capability the aggregator walks

use async_trait::async_trait;

use crate::error::SnapshotResult;
use crate::models::{Document, Gateway, Resource};

/// Read access to a gateway management service
///
/// Implementations perform exactly one logical remote read per call and
/// report any failure as [`SnapshotError::Remote`](crate::SnapshotError::Remote).
/// Retries and authentication belong to the implementation.
#[async_trait]
pub trait GatewayClient: Send + Sync {
    /// List every gateway visible to the caller
    ///
    /// Returned gateways have empty `endpoints`.
    async fn list_gateways(&self) -> SnapshotResult<Vec<Gateway>>;

    /// List the resources of a gateway
    ///
    /// Methods on the returned resources are in their unexpanded listing form.
    async fn list_resources(&self, gateway_id: &str) -> SnapshotResult<Vec<Resource>>;

    /// Fetch the full configuration of one method
    ///
    /// The response may still carry the transport envelope; stripping it is
    /// the caller's job.
    async fn get_method_detail(
        &self,
        gateway_id: &str,
        resource_id: &str,
        http_method: &str,
    ) -> SnapshotResult<Document>;
}
