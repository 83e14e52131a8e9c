use serde::Serialize;

use crate::tabular::ParsedTable;

/// One decoded resource of a dataset, with its provenance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetTable {
    pub table: ParsedTable,
    /// Hostname of the listing page.
    #[serde(rename = "provider")]
    pub provider_host: String,
    /// The resource that was downloaded.
    pub resource_url: String,
    /// The listing page the resource was discovered on.
    pub listing_endpoint: String,
}

/// Result of resolving a dataset name.
///
/// The variant is decided by how many matching resources the listing page
/// advertised: exactly one gives `Single`, more than one gives `Many` in
/// discovery order. Zero is an error, never an empty `Many`. Consumers
/// rely on position in `Many` (e.g. the first resource is the most recent
/// period).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DatasetResolution {
    Single(DatasetTable),
    Many(Vec<DatasetTable>),
}

impl DatasetResolution {
    /// Number of resolved resources.
    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Many(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All tables in discovery order, whatever the variant.
    pub fn tables(&self) -> &[DatasetTable] {
        match self {
            Self::Single(t) => std::slice::from_ref(t),
            Self::Many(v) => v,
        }
    }

    pub fn into_tables(self) -> Vec<DatasetTable> {
        match self {
            Self::Single(t) => vec![t],
            Self::Many(v) => v,
        }
    }
}
