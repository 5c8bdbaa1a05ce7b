//! AWS implementation of [`GatewayClient`]

use apigw_core::{Document, Gateway, GatewayClient, Resource, SnapshotError, SnapshotResult};
use async_trait::async_trait;
use aws_sdk_apigateway::error::DisplayErrorContext;
use aws_sdk_apigateway::Client;
use tracing::{debug, instrument};

use crate::config::AwsClientConfig;
use crate::convert;

/// Gateway client backed by `aws-sdk-apigateway`
///
/// Listing calls follow pagination to the last page.
#[derive(Debug, Clone)]
pub struct AwsGatewayClient {
    client: Client,
    region: String,
}

impl AwsGatewayClient {
    /// Build a client, resolving credentials from the configured profile
    pub async fn new(config: &AwsClientConfig) -> Self {
        let sdk_config = config.load_sdk_config().await;
        Self {
            client: Client::new(&sdk_config),
            region: config.region.clone(),
        }
    }
}

fn remote_error<E>(operation: &'static str, err: E) -> SnapshotError
where
    E: std::error::Error,
{
    SnapshotError::remote(operation, DisplayErrorContext(err).to_string())
}

#[async_trait]
impl GatewayClient for AwsGatewayClient {
    #[instrument(skip(self), fields(region = %self.region))]
    async fn list_gateways(&self) -> SnapshotResult<Vec<Gateway>> {
        let apis = self
            .client
            .get_rest_apis()
            .into_paginator()
            .items()
            .send()
            .try_collect()
            .await
            .map_err(|e| remote_error("GetRestApis", e))?;

        debug!(count = apis.len(), "Listed REST APIs");
        Ok(apis.iter().map(convert::gateway).collect())
    }

    #[instrument(skip(self))]
    async fn list_resources(&self, gateway_id: &str) -> SnapshotResult<Vec<Resource>> {
        let resources = self
            .client
            .get_resources()
            .rest_api_id(gateway_id)
            .into_paginator()
            .items()
            .send()
            .try_collect()
            .await
            .map_err(|e| remote_error("GetResources", e))?;

        debug!(count = resources.len(), "Listed resources");
        Ok(resources.iter().map(convert::resource).collect())
    }

    #[instrument(skip(self))]
    async fn get_method_detail(
        &self,
        gateway_id: &str,
        resource_id: &str,
        http_method: &str,
    ) -> SnapshotResult<Document> {
        let output = self
            .client
            .get_method()
            .rest_api_id(gateway_id)
            .resource_id(resource_id)
            .http_method(http_method)
            .send()
            .await
            .map_err(|e| remote_error("GetMethod", e))?;

        Ok(convert::method_detail(&output))
    }
}
