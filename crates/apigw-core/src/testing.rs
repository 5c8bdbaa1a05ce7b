//! Test utilities for apigw-core
//!
//! Provides an in-memory [`GatewayClient`] driven by fixtures, so the
//! aggregation pipeline can be exercised without a cloud account.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{json, Value};

use crate::client::GatewayClient;
use crate::error::{SnapshotError, SnapshotResult};
use crate::models::{Document, Gateway, Resource, TRANSPORT_METADATA_KEY};

/// A remote call observed by [`MockGatewayClient`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordedCall {
    ListGateways,
    ListResources {
        gateway_id: String,
    },
    GetMethod {
        gateway_id: String,
        resource_id: String,
        http_method: String,
    },
}

impl RecordedCall {
    /// Shorthand for a `ListResources` call
    pub fn list_resources(gateway_id: &str) -> Self {
        Self::ListResources {
            gateway_id: gateway_id.to_string(),
        }
    }

    /// Shorthand for a `GetMethod` call
    pub fn get_method(gateway_id: &str, resource_id: &str, http_method: &str) -> Self {
        Self::GetMethod {
            gateway_id: gateway_id.to_string(),
            resource_id: resource_id.to_string(),
            http_method: http_method.to_string(),
        }
    }
}

/// Fixture-backed gateway client
///
/// Method details that were not registered explicitly are synthesized from
/// the call arguments and always carry a transport envelope.
#[derive(Debug, Default)]
pub struct MockGatewayClient {
    gateways: Vec<Gateway>,
    resources: HashMap<String, Vec<Resource>>,
    details: HashMap<(String, String, String), Document>,
    failures: HashSet<RecordedCall>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockGatewayClient {
    /// Create an empty client (no gateways)
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a gateway together with its resource listing
    pub fn with_gateway(mut self, gateway: Gateway, resources: Vec<Resource>) -> Self {
        self.resources.insert(gateway.id.clone(), resources);
        self.gateways.push(gateway);
        self
    }

    /// Register the response returned for one method
    pub fn with_method_detail(
        mut self,
        gateway_id: &str,
        resource_id: &str,
        http_method: &str,
        response: Document,
    ) -> Self {
        self.details.insert(
            (
                gateway_id.to_string(),
                resource_id.to_string(),
                http_method.to_string(),
            ),
            response,
        );
        self
    }

    /// Make the given call fail with a remote error
    pub fn failing_on(mut self, call: RecordedCall) -> Self {
        self.failures.insert(call);
        self
    }

    /// Calls made so far, in order
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    fn record(&self, call: RecordedCall, operation: &'static str) -> SnapshotResult<()> {
        let fail = self.failures.contains(&call);
        self.calls.lock().push(call);
        if fail {
            return Err(SnapshotError::remote(operation, "injected failure"));
        }
        Ok(())
    }
}

#[async_trait]
impl GatewayClient for MockGatewayClient {
    async fn list_gateways(&self) -> SnapshotResult<Vec<Gateway>> {
        self.record(RecordedCall::ListGateways, "GetRestApis")?;
        Ok(self.gateways.clone())
    }

    async fn list_resources(&self, gateway_id: &str) -> SnapshotResult<Vec<Resource>> {
        self.record(RecordedCall::list_resources(gateway_id), "GetResources")?;
        self.resources.get(gateway_id).cloned().ok_or_else(|| {
            SnapshotError::remote("GetResources", format!("Invalid API identifier: {gateway_id}"))
        })
    }

    async fn get_method_detail(
        &self,
        gateway_id: &str,
        resource_id: &str,
        http_method: &str,
    ) -> SnapshotResult<Document> {
        self.record(
            RecordedCall::get_method(gateway_id, resource_id, http_method),
            "GetMethod",
        )?;

        let key = (
            gateway_id.to_string(),
            resource_id.to_string(),
            http_method.to_string(),
        );
        if let Some(response) = self.details.get(&key) {
            return Ok(response.clone());
        }

        let mut response = document(json!({
            "httpMethod": http_method,
            "authorizationType": "NONE",
            "apiKeyRequired": false
        }));
        response.insert(
            TRANSPORT_METADATA_KEY.to_string(),
            json!({ "RequestId": format!("mock-{gateway_id}-{resource_id}-{http_method}") }),
        );
        Ok(response)
    }
}

/// Gateway fixture with no metadata
pub fn gateway(id: &str, name: &str) -> Gateway {
    Gateway::new(id, name)
}

/// Resource fixture whose methods carry the empty listing placeholder
pub fn resource(id: &str, path: &str, methods: &[&str]) -> Resource {
    methods
        .iter()
        .fold(Resource::new(id, path), |res, method| {
            res.with_method(*method, json!({}))
        })
}

/// Unwrap a JSON object literal into a [`Document`]
///
/// # Panics
///
/// Panics if `value` is not an object.
pub fn document(value: Value) -> Document {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}
