//! Integration tests for the aggregation pipeline
//!
//! These tests drive the aggregator against the in-memory client and check
//! the shape of the resulting tree and the remote calls it issued.

use std::sync::Arc;

use apigw_core::testing::{document, gateway, resource, MockGatewayClient, RecordedCall};
use apigw_core::{
    Aggregator, Gateway, GatewayTree, MethodEntry, MethodFilter, REST_METHODS,
    TRANSPORT_METADATA_KEY,
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;

// =============================================================================
// Fixtures
// =============================================================================

/// Two gateways, one resource per method combination
fn fixture() -> MockGatewayClient {
    MockGatewayClient::new()
        .with_gateway(
            gateway("a1", "orders"),
            vec![
                resource("r0", "/", &[]),
                resource("r1", "/orders", &["GET", "POST"]),
                resource("r2", "/orders/{id}", &["GET", "PUT", "DELETE", "OPTIONS"]),
            ],
        )
        .with_gateway(
            gateway("b2", "billing"),
            vec![resource("r9", "/invoices", &["GET", "PATCH", "HEAD"])],
        )
}

async fn load(client: MockGatewayClient, filter: MethodFilter) -> GatewayTree {
    Aggregator::new(Arc::new(client), filter)
        .load()
        .await
        .expect("load should succeed")
}

fn expanded_methods(tree: &GatewayTree) -> Vec<(String, String, String)> {
    let mut out = Vec::new();
    for (name, gw) in tree {
        for (path, res) in &gw.endpoints {
            for (method, entry) in &res.resource_methods {
                if entry.is_expanded() {
                    out.push((name.clone(), path.clone(), method.clone()));
                }
            }
        }
    }
    out
}

// =============================================================================
// Filtering
// =============================================================================

#[rstest]
#[case(vec!["GET"])]
#[case(vec!["POST", "DELETE"])]
#[case(vec!["HEAD", "OPTIONS", "PATCH", "PUT"])]
#[case(vec!["ALL"])]
#[case(vec!["ALL", "GET"])]
#[tokio::test]
async fn test_filter_expands_exactly_selected_methods(#[case] methods: Vec<&str>) {
    let filter = MethodFilter::new(methods.iter().copied());
    let tree = load(fixture(), filter.clone()).await;

    for gw in tree.values() {
        for res in gw.endpoints.values() {
            for (method, entry) in &res.resource_methods {
                if filter.allows(method) {
                    assert!(entry.is_expanded(), "{method} on {} should be expanded", res.path);
                } else {
                    assert_eq!(entry, &MethodEntry::Unexpanded(json!({})));
                }
            }
        }
    }
}

#[tokio::test]
async fn test_all_filter_expands_every_method() {
    let tree = load(fixture(), MethodFilter::all()).await;
    assert_eq!(expanded_methods(&tree).len(), 9);
}

#[tokio::test]
async fn test_filtered_out_methods_issue_no_calls() {
    let client = Arc::new(fixture());
    Aggregator::new(client.clone(), MethodFilter::new(["PATCH"]))
        .load()
        .await
        .unwrap();

    let method_calls: Vec<RecordedCall> = client
        .calls()
        .into_iter()
        .filter(|c| matches!(c, RecordedCall::GetMethod { .. }))
        .collect();
    assert_eq!(method_calls, vec![RecordedCall::get_method("b2", "r9", "PATCH")]);
}

#[tokio::test]
async fn test_get_expanded_post_left_as_placeholder() {
    let detail = document(json!({
        "httpMethod": "GET",
        "authorizationType": "NONE",
        "methodIntegration": { "type": "MOCK" },
        "ResponseMetadata": { "RequestId": "req-1", "HTTPStatusCode": 200 }
    }));
    let client = MockGatewayClient::new()
        .with_gateway(gateway("a", "A"), vec![resource("r1", "/foo", &["GET", "POST"])])
        .with_method_detail("a", "r1", "GET", detail);

    let tree = load(client, MethodFilter::new(["GET"])).await;
    let value = serde_json::to_value(&tree).unwrap();

    assert_eq!(
        value["A"]["endpoints"]["/foo"]["resourceMethods"],
        json!({
            "GET": {
                "httpMethod": "GET",
                "authorizationType": "NONE",
                "methodIntegration": { "type": "MOCK" }
            },
            "POST": {}
        })
    );
}

#[tokio::test]
async fn test_transport_metadata_never_reaches_tree() {
    let tree = load(fixture(), MethodFilter::all()).await;
    let rendered = serde_json::to_string(&tree).unwrap();
    assert!(!rendered.contains(TRANSPORT_METADATA_KEY));
}

#[tokio::test]
async fn test_every_rest_method_can_be_expanded() {
    let client = MockGatewayClient::new()
        .with_gateway(gateway("a", "A"), vec![resource("r1", "/all", &REST_METHODS)]);
    let tree = load(client, MethodFilter::all()).await;
    let res = &tree["A"].endpoints["/all"];
    assert_eq!(res.resource_methods.len(), REST_METHODS.len());
    for method in REST_METHODS {
        let detail = res.resource_methods[method].detail().expect("expanded");
        assert_eq!(detail.get("httpMethod"), Some(&json!(method)));
    }
}

// =============================================================================
// Tree shape
// =============================================================================

#[tokio::test]
async fn test_empty_account_yields_empty_tree() {
    let tree = load(MockGatewayClient::new(), MethodFilter::all()).await;
    assert!(tree.is_empty());
}

#[tokio::test]
async fn test_load_is_idempotent() {
    let client = Arc::new(fixture());
    let aggregator = Aggregator::new(client, MethodFilter::new(["GET", "DELETE"]));

    let first = aggregator.load().await.unwrap();
    let second = aggregator.load().await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_gateway_metadata_is_passed_through() {
    let metadata = document(json!({
        "description": "Orders API",
        "createdDate": "2024-05-01T10:00:00Z",
        "endpointConfiguration": { "types": ["REGIONAL"] }
    }));
    let client = MockGatewayClient::new()
        .with_gateway(Gateway::new("a1", "orders").with_metadata(metadata), vec![]);

    let tree = load(client, MethodFilter::all()).await;
    let value = serde_json::to_value(&tree).unwrap();
    assert_eq!(
        value,
        json!({
            "orders": {
                "id": "a1",
                "name": "orders",
                "description": "Orders API",
                "createdDate": "2024-05-01T10:00:00Z",
                "endpointConfiguration": { "types": ["REGIONAL"] },
                "endpoints": {}
            }
        })
    );
}

#[tokio::test]
async fn test_duplicate_gateway_names_keep_last() {
    let client = MockGatewayClient::new()
        .with_gateway(gateway("first", "shared"), vec![resource("r1", "/one", &[])])
        .with_gateway(gateway("second", "shared"), vec![resource("r2", "/two", &[])]);

    let tree = load(client, MethodFilter::all()).await;
    assert_eq!(tree.len(), 1);
    assert_eq!(tree["shared"].id, "second");
    assert!(tree["shared"].endpoints.contains_key("/two"));
}

// =============================================================================
// Failures
// =============================================================================

#[tokio::test]
async fn test_resource_failure_on_second_gateway_aborts_load() {
    let client = Arc::new(
        MockGatewayClient::new()
            .with_gateway(gateway("g1", "one"), vec![resource("r1", "/a", &["GET"])])
            .with_gateway(gateway("g2", "two"), vec![resource("r2", "/b", &["GET"])])
            .with_gateway(gateway("g3", "three"), vec![resource("r3", "/c", &["GET"])])
            .failing_on(RecordedCall::list_resources("g2")),
    );

    let err = Aggregator::new(client.clone(), MethodFilter::all())
        .load()
        .await
        .unwrap_err();

    assert!(err.is_remote());
    assert_eq!(
        client.calls(),
        vec![
            RecordedCall::ListGateways,
            RecordedCall::list_resources("g1"),
            RecordedCall::get_method("g1", "r1", "GET"),
            RecordedCall::list_resources("g2"),
        ]
    );
}

#[tokio::test]
async fn test_method_failure_aborts_load() {
    let client = fixture().failing_on(RecordedCall::get_method("a1", "r2", "PUT"));
    let err = Aggregator::new(Arc::new(client), MethodFilter::all())
        .load()
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "GetMethod failed: injected failure");
}

#[tokio::test]
async fn test_list_gateways_failure_propagates() {
    let client = fixture().failing_on(RecordedCall::ListGateways);
    let result = Aggregator::new(Arc::new(client), MethodFilter::all())
        .load()
        .await;
    assert!(matches!(
        result,
        Err(apigw_core::SnapshotError::Remote { operation: "GetRestApis", .. })
    ));
}
