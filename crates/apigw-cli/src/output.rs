//! Output rendering for apigw-snapshot (json, json-pretty, csv)

use apigw_core::{GatewayTree, SnapshotError, SnapshotResult};
use clap::ValueEnum;
use serde::ser::Serialize;
use serde::Deserialize;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Indentation used by the `json-pretty` format
const PRETTY_INDENT: &[u8] = b"    ";

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// Compact single-line JSON (default)
    #[default]
    Json,
    /// Indented JSON
    JsonPretty,
    /// CSV (not implemented)
    Csv,
}

impl OutputFormat {
    /// Fail early for formats that cannot be rendered
    pub fn ensure_supported(self) -> SnapshotResult<()> {
        match self {
            OutputFormat::Json | OutputFormat::JsonPretty => Ok(()),
            OutputFormat::Csv => Err(csv_not_implemented()),
        }
    }
}

fn csv_not_implemented() -> SnapshotError {
    SnapshotError::NotImplemented("CSV format".to_string())
}

/// Serialize the snapshot in the requested format
pub fn render(tree: &GatewayTree, format: OutputFormat) -> SnapshotResult<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(tree)?),
        OutputFormat::JsonPretty => {
            let mut buf = Vec::new();
            let mut serializer =
                Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(PRETTY_INDENT));
            tree.serialize(&mut serializer)?;
            String::from_utf8(buf).map_err(|e| {
                SnapshotError::Serialization(serde::ser::Error::custom(e.to_string()))
            })
        }
        OutputFormat::Csv => Err(csv_not_implemented()),
    }
}
