//! Snapshot command - load the gateway tree and render it

use std::sync::Arc;

use apigw_core::{Aggregator, GatewayClient, SnapshotResult};
use tracing::debug;

use crate::config::Config;
use crate::output::render;

/// Load every gateway through `client` and render it per `config`
///
/// Nothing is rendered unless the whole load succeeds.
pub async fn snapshot(client: Arc<dyn GatewayClient>, config: &Config) -> SnapshotResult<String> {
    config.format.ensure_supported()?;

    debug!(region = %config.region, profile = %config.profile, "Loading gateway snapshot");
    let tree = Aggregator::new(client, config.methods.clone())
        .load()
        .await?;

    render(&tree, config.format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use apigw_core::testing::{gateway, resource, MockGatewayClient, RecordedCall};
    use apigw_core::{MethodFilter, SnapshotError};
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    fn config(format: OutputFormat, methods: MethodFilter) -> Config {
        Config {
            region: "eu-west-1".to_string(),
            profile: "default".to_string(),
            format,
            methods,
            endpoint_url: None,
        }
    }

    #[tokio::test]
    async fn test_empty_account_renders_empty_object() {
        let client = Arc::new(MockGatewayClient::new());
        let out = snapshot(client, &config(OutputFormat::Json, MethodFilter::all()))
            .await
            .unwrap();
        assert_eq!(out, "{}");
    }

    #[tokio::test]
    async fn test_snapshot_renders_filtered_tree() {
        let client = Arc::new(MockGatewayClient::new().with_gateway(
            gateway("a", "A"),
            vec![resource("r1", "/foo", &["GET", "POST"])],
        ));

        let out = snapshot(client, &config(OutputFormat::JsonPretty, MethodFilter::new(["GET"])))
            .await
            .unwrap();
        let value: Value = serde_json::from_str(&out).unwrap();

        assert_eq!(
            value,
            json!({
                "A": {
                    "id": "a",
                    "name": "A",
                    "endpoints": {
                        "/foo": {
                            "id": "r1",
                            "path": "/foo",
                            "resourceMethods": {
                                "GET": {
                                    "httpMethod": "GET",
                                    "authorizationType": "NONE",
                                    "apiKeyRequired": false
                                },
                                "POST": {}
                            }
                        }
                    }
                }
            })
        );
    }

    #[tokio::test]
    async fn test_remote_failure_produces_no_output() {
        let client = Arc::new(
            MockGatewayClient::new()
                .with_gateway(gateway("g1", "one"), vec![])
                .with_gateway(gateway("g2", "two"), vec![])
                .with_gateway(gateway("g3", "three"), vec![])
                .failing_on(RecordedCall::list_resources("g2")),
        );

        let result = snapshot(client.clone(), &config(OutputFormat::Json, MethodFilter::all())).await;

        assert!(matches!(result, Err(SnapshotError::Remote { .. })));
        assert!(!client.calls().contains(&RecordedCall::list_resources("g3")));
    }

    #[tokio::test]
    async fn test_csv_fails_before_any_remote_call() {
        let client = Arc::new(MockGatewayClient::new());
        let err = snapshot(client.clone(), &config(OutputFormat::Csv, MethodFilter::all()))
            .await
            .unwrap_err();

        assert!(matches!(err, SnapshotError::NotImplemented(_)));
        assert!(client.calls().is_empty());
    }
}
