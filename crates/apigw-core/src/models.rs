//! Snapshot data model
//!
//! Provider-supplied records are carried as opaque JSON [`Document`]s so that
//! every field the service returns ends up in the output without this crate
//! having to know about it. Only the fields the aggregation pipeline needs
//! (ids, names, paths and method names) are lifted into typed struct fields.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Opaque JSON object as returned by the provider
pub type Document = serde_json::Map<String, Value>;

/// Complete snapshot, keyed by gateway name
pub type GatewayTree = BTreeMap<String, Gateway>;

/// Name of the response-envelope field injected by the transport layer
pub const TRANSPORT_METADATA_KEY: &str = "ResponseMetadata";

/// Field every "get method" response carries; listing placeholders lack it
pub const METHOD_DETAIL_KEY: &str = "httpMethod";

// =============================================================================
// Gateway
// =============================================================================

/// A REST API exposed through the gateway service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gateway {
    /// Provider-assigned identifier
    pub id: String,
    /// Display name (the snapshot key)
    pub name: String,
    /// Remaining provider metadata, passed through verbatim
    #[serde(flatten)]
    pub metadata: Document,
    /// Resources keyed by path, filled in by the aggregator
    #[serde(default)]
    pub endpoints: BTreeMap<String, Resource>,
}

impl Gateway {
    /// Create a gateway with no metadata and no endpoints
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            metadata: Document::new(),
            endpoints: BTreeMap::new(),
        }
    }

    /// Attach provider metadata
    pub fn with_metadata(mut self, metadata: Document) -> Self {
        self.metadata = metadata;
        self
    }
}

// =============================================================================
// Resource
// =============================================================================

/// A path within a gateway together with its HTTP methods
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// Provider-assigned identifier
    pub id: String,
    /// Full resource path, e.g. `/orders/{id}`
    pub path: String,
    /// Remaining provider metadata (`parentId`, `pathPart`, ...)
    #[serde(flatten)]
    pub metadata: Document,
    /// Methods keyed by HTTP method name
    #[serde(
        rename = "resourceMethods",
        default,
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub resource_methods: BTreeMap<String, MethodEntry>,
}

impl Resource {
    /// Create a resource with no metadata and no methods
    pub fn new(id: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            path: path.into(),
            metadata: Document::new(),
            resource_methods: BTreeMap::new(),
        }
    }

    /// Attach provider metadata
    pub fn with_metadata(mut self, metadata: Document) -> Self {
        self.metadata = metadata;
        self
    }

    /// Add a method in the form returned by a resource listing
    pub fn with_method(mut self, http_method: impl Into<String>, listing: Value) -> Self {
        self.resource_methods
            .insert(http_method.into(), MethodEntry::Unexpanded(listing));
        self
    }
}

// =============================================================================
// Methods
// =============================================================================

/// A method on a resource, either as listed or fully expanded
///
/// When parsed back, an object carrying [`METHOD_DETAIL_KEY`] is an expanded
/// detail and anything else is a listing value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MethodEntry {
    /// Value exactly as received from the resource listing
    Unexpanded(Value),
    /// Full method configuration
    Expanded(MethodDetail),
}

impl<'de> Deserialize<'de> for MethodEntry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Object(detail) if detail.contains_key(METHOD_DETAIL_KEY) => {
                Self::Expanded(MethodDetail::from_response(detail))
            }
            listing => Self::Unexpanded(listing),
        })
    }
}

impl MethodEntry {
    /// Whether the method has been expanded
    pub fn is_expanded(&self) -> bool {
        matches!(self, Self::Expanded(_))
    }

    /// The expanded detail, if any
    pub fn detail(&self) -> Option<&MethodDetail> {
        match self {
            Self::Expanded(detail) => Some(detail),
            Self::Unexpanded(_) => None,
        }
    }
}

/// Method configuration returned by the "get method" call
///
/// Never contains [`TRANSPORT_METADATA_KEY`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MethodDetail(Document);

impl MethodDetail {
    /// Build a detail from a raw response, dropping the transport envelope
    pub fn from_response(mut response: Document) -> Self {
        response.remove(TRANSPORT_METADATA_KEY);
        Self(response)
    }

    /// Look up a field of the detail
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }
}
