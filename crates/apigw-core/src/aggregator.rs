//! Aggregator - builds the gateway → resource → method tree
//!
//! The aggregator walks a [`GatewayClient`] strictly sequentially: every
//! remote call completes before the next one is issued. The first failure
//! aborts the whole load and no partial tree is returned.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::client::GatewayClient;
use crate::error::SnapshotResult;
use crate::filter::MethodFilter;
use crate::models::{Gateway, GatewayTree, MethodDetail, MethodEntry, Resource};

/// Assembles a complete snapshot from a gateway client
pub struct Aggregator {
    client: Arc<dyn GatewayClient>,
    filter: MethodFilter,
}

impl Aggregator {
    /// Create an aggregator over the given client and method filter
    pub fn new(client: Arc<dyn GatewayClient>, filter: MethodFilter) -> Self {
        Self { client, filter }
    }

    /// Load every gateway with its resources and selected method details
    ///
    /// Gateways are keyed by name; when two gateways share a name the one
    /// listed last wins.
    #[instrument(skip(self))]
    pub async fn load(&self) -> SnapshotResult<GatewayTree> {
        let mut tree = GatewayTree::new();

        for mut gateway in self.client.list_gateways().await? {
            self.load_resources(&mut gateway).await?;

            if let Some(previous) = tree.insert(gateway.name.clone(), gateway) {
                warn!(
                    gateway_id = %previous.id,
                    gateway_name = %previous.name,
                    "Duplicate gateway name, replacing earlier gateway"
                );
            }
        }

        info!(gateways = tree.len(), "Loaded gateway snapshot");
        Ok(tree)
    }

    /// Populate `gateway.endpoints` from the gateway's resource listing
    pub async fn load_resources(&self, gateway: &mut Gateway) -> SnapshotResult<()> {
        debug!(gateway_id = %gateway.id, "Listing resources");

        for mut resource in self.client.list_resources(&gateway.id).await? {
            self.load_methods(gateway, &mut resource).await?;
            gateway.endpoints.insert(resource.path.clone(), resource);
        }

        Ok(())
    }

    /// Expand the methods on `resource` that the filter selects
    ///
    /// Methods the filter skips keep the value they had in the listing.
    pub async fn load_methods(
        &self,
        gateway: &Gateway,
        resource: &mut Resource,
    ) -> SnapshotResult<()> {
        for (http_method, entry) in resource.resource_methods.iter_mut() {
            if !self.filter.allows(http_method) {
                debug!(
                    resource_id = %resource.id,
                    http_method = %http_method,
                    "Skipping method excluded by filter"
                );
                continue;
            }

            debug!(
                gateway_id = %gateway.id,
                resource_id = %resource.id,
                http_method = %http_method,
                "Fetching method detail"
            );
            let response = self
                .client
                .get_method_detail(&gateway.id, &resource.id, http_method)
                .await?;
            *entry = MethodEntry::Expanded(MethodDetail::from_response(response));
        }

        Ok(())
    }
}
