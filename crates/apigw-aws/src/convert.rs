//! Conversion of SDK shapes into snapshot documents
//!
//! Field names follow the service's camelCase wire names so the snapshot
//! reads like the API Gateway documentation. Absent optional fields and empty
//! lists are omitted; timestamps are RFC 3339 strings.

use std::collections::HashMap;

use apigw_core::{Document, Gateway, Resource, TRANSPORT_METADATA_KEY};
use aws_sdk_apigateway::operation::get_method::GetMethodOutput;
use aws_sdk_apigateway::operation::RequestId;
use aws_sdk_apigateway::primitives::{DateTime, DateTimeFormat};
use aws_sdk_apigateway::types::{
    EndpointConfiguration, Integration, IntegrationResponse, Method, MethodResponse, RestApi,
    TlsConfig,
};
use serde_json::{json, Value};

/// Incremental builder that skips absent values
#[derive(Debug, Default)]
struct DocumentBuilder(Document);

impl DocumentBuilder {
    fn new() -> Self {
        Self::default()
    }

    fn value(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    fn opt<V: Into<Value>>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.value(key, v),
            None => self,
        }
    }

    fn str(self, key: &str, value: Option<&str>) -> Self {
        self.opt(key, value)
    }

    fn list<'a>(self, key: &str, values: impl IntoIterator<Item = &'a str>) -> Self {
        let items: Vec<Value> = values.into_iter().map(Value::from).collect();
        if items.is_empty() {
            self
        } else {
            self.value(key, items)
        }
    }

    fn map<V: Clone + Into<Value>>(self, key: &str, values: Option<&HashMap<String, V>>) -> Self {
        let Some(values) = values else {
            return self;
        };
        let doc: Document = values
            .iter()
            .map(|(k, v)| (k.clone(), v.clone().into()))
            .collect();
        self.value(key, doc)
    }

    fn nested<T>(
        self,
        key: &str,
        values: Option<&HashMap<String, T>>,
        convert: fn(&T) -> Document,
    ) -> Self {
        let Some(values) = values else {
            return self;
        };
        let doc: Document = values
            .iter()
            .map(|(k, v)| (k.clone(), Value::Object(convert(v))))
            .collect();
        self.value(key, doc)
    }

    fn doc(self, key: &str, value: Option<Document>) -> Self {
        self.opt(key, value.map(Value::Object))
    }

    fn build(self) -> Document {
        self.0
    }
}

fn timestamp(value: &DateTime) -> Option<String> {
    value.fmt(DateTimeFormat::DateTime).ok()
}

// =============================================================================
// Gateways and resources
// =============================================================================

/// Convert a REST API listing entry into a gateway without endpoints
pub(crate) fn gateway(api: &RestApi) -> Gateway {
    let metadata = DocumentBuilder::new()
        .str("description", api.description())
        .opt("createdDate", api.created_date().and_then(timestamp))
        .str("version", api.version())
        .list("warnings", api.warnings().iter().map(String::as_str))
        .list(
            "binaryMediaTypes",
            api.binary_media_types().iter().map(String::as_str),
        )
        .opt("minimumCompressionSize", api.minimum_compression_size())
        .str("apiKeySource", api.api_key_source().map(|s| s.as_str()))
        .doc(
            "endpointConfiguration",
            api.endpoint_configuration().map(endpoint_configuration),
        )
        .str("policy", api.policy())
        .map("tags", api.tags())
        .value(
            "disableExecuteApiEndpoint",
            api.disable_execute_api_endpoint(),
        )
        .str("rootResourceId", api.root_resource_id())
        .build();

    Gateway::new(
        api.id().unwrap_or_default(),
        api.name().unwrap_or_default(),
    )
    .with_metadata(metadata)
}

fn endpoint_configuration(config: &EndpointConfiguration) -> Document {
    DocumentBuilder::new()
        .list("types", config.types().iter().map(|t| t.as_str()))
        .list(
            "vpcEndpointIds",
            config.vpc_endpoint_ids().iter().map(String::as_str),
        )
        .build()
}

/// Convert a resource listing entry, keeping its methods unexpanded
pub(crate) fn resource(res: &aws_sdk_apigateway::types::Resource) -> Resource {
    let metadata = DocumentBuilder::new()
        .str("parentId", res.parent_id())
        .str("pathPart", res.path_part())
        .build();

    let mut resource = Resource::new(res.id().unwrap_or_default(), res.path().unwrap_or_default())
        .with_metadata(metadata);

    if let Some(methods) = res.resource_methods() {
        for (http_method, listing) in methods {
            resource = resource.with_method(http_method.clone(), Value::Object(method(listing)));
        }
    }

    resource
}

// =============================================================================
// Methods
// =============================================================================

// `Method` and `GetMethodOutput` are distinct SDK types with identical accessors.
macro_rules! method_document {
    ($method:expr) => {{
        let m = $method;
        DocumentBuilder::new()
            .str("httpMethod", m.http_method())
            .str("authorizationType", m.authorization_type())
            .str("authorizerId", m.authorizer_id())
            .opt("apiKeyRequired", m.api_key_required())
            .str("requestValidatorId", m.request_validator_id())
            .str("operationName", m.operation_name())
            .map("requestParameters", m.request_parameters())
            .map("requestModels", m.request_models())
            .nested("methodResponses", m.method_responses(), method_response)
            .doc("methodIntegration", m.method_integration().map(integration))
            .list(
                "authorizationScopes",
                m.authorization_scopes().iter().map(String::as_str),
            )
            .build()
    }};
}

fn method(listing: &Method) -> Document {
    method_document!(listing)
}

/// Convert a GetMethod response, keeping the request id as transport metadata
pub(crate) fn method_detail(output: &GetMethodOutput) -> Document {
    let mut doc = method_document!(output);
    if let Some(request_id) = output.request_id() {
        doc.insert(
            TRANSPORT_METADATA_KEY.to_string(),
            json!({ "RequestId": request_id }),
        );
    }
    doc
}

fn method_response(response: &MethodResponse) -> Document {
    DocumentBuilder::new()
        .str("statusCode", response.status_code())
        .map("responseParameters", response.response_parameters())
        .map("responseModels", response.response_models())
        .build()
}

fn integration(integration: &Integration) -> Document {
    DocumentBuilder::new()
        .str("type", integration.r#type().map(|t| t.as_str()))
        .str("httpMethod", integration.http_method())
        .str("uri", integration.uri())
        .str(
            "connectionType",
            integration.connection_type().map(|c| c.as_str()),
        )
        .str("connectionId", integration.connection_id())
        .str("credentials", integration.credentials())
        .map("requestParameters", integration.request_parameters())
        .map("requestTemplates", integration.request_templates())
        .str("passthroughBehavior", integration.passthrough_behavior())
        .str(
            "contentHandling",
            integration.content_handling().map(|c| c.as_str()),
        )
        .value("timeoutInMillis", integration.timeout_in_millis())
        .str("cacheNamespace", integration.cache_namespace())
        .list(
            "cacheKeyParameters",
            integration.cache_key_parameters().iter().map(String::as_str),
        )
        .nested(
            "integrationResponses",
            integration.integration_responses(),
            integration_response,
        )
        .doc("tlsConfig", integration.tls_config().map(tls_config))
        .build()
}

fn integration_response(response: &IntegrationResponse) -> Document {
    DocumentBuilder::new()
        .str("statusCode", response.status_code())
        .str("selectionPattern", response.selection_pattern())
        .map("responseParameters", response.response_parameters())
        .map("responseTemplates", response.response_templates())
        .str(
            "contentHandling",
            response.content_handling().map(|c| c.as_str()),
        )
        .build()
}

fn tls_config(config: &TlsConfig) -> Document {
    DocumentBuilder::new()
        .value(
            "insecureSkipVerification",
            config.insecure_skip_verification(),
        )
        .build()
}
