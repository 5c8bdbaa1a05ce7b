//! AWS SDK configuration

use aws_config::{BehaviorVersion, Region, SdkConfig};
use tracing::info;

/// Connection settings for [`AwsGatewayClient`](crate::AwsGatewayClient)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AwsClientConfig {
    /// AWS region (e.g. `"us-east-1"`)
    pub region: String,
    /// Shared-credentials profile name
    pub profile: String,
    /// Optional endpoint override
    pub endpoint_url: Option<String>,
}

impl AwsClientConfig {
    /// Create a config for the given region and profile
    pub fn new(region: impl Into<String>, profile: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            profile: profile.into(),
            endpoint_url: None,
        }
    }

    /// Route requests to a custom endpoint
    pub fn with_endpoint(mut self, url: impl Into<String>) -> Self {
        self.endpoint_url = Some(url.into());
        self
    }

    /// Resolve the SDK configuration (credentials, region, endpoint)
    pub async fn load_sdk_config(&self) -> SdkConfig {
        let mut builder = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(self.region.clone()))
            .profile_name(&self.profile);

        if let Some(endpoint) = &self.endpoint_url {
            info!(endpoint = %endpoint, "Routing API Gateway requests to custom endpoint");
            builder = builder.endpoint_url(endpoint);
        }

        builder.load().await
    }
}
