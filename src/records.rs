use serde::{Deserialize, Serialize};

/// Sentinel written when a field is structurally absent for a page layout
pub const NOT_GIVEN: &str = "Not Given";

/// Represents one extracted submarine cable entry
///
/// Every field is always populated, possibly with the [`NOT_GIVEN`]
/// sentinel. A record is either built in full or not at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CableRecord {
    /// Cable name, taken from the final path segment of the detail URL
    pub cable_name: String,

    /// Ready-for-service date, free text
    pub rfs: String,

    /// Cable length, free text with surrounding quotes stripped
    pub cable_length: String,

    /// Owning companies, flattened to a single ` - ` separated line
    pub owners: String,

    /// Supplying companies, flattened the same way, or the sentinel
    pub suppliers: String,

    /// Link to the cable's page on submarinenetworks.com, or the sentinel
    pub submarine_networks_url: String,

    /// The detail page this record was extracted from
    pub submarine_cable_map_url: String,
}

impl CableRecord {
    /// True when the page layout carried no suppliers item
    pub fn suppliers_missing(&self) -> bool {
        self.suppliers == NOT_GIVEN
    }

    /// True when the page layout carried no networks link item
    pub fn networks_url_missing(&self) -> bool {
        self.submarine_networks_url == NOT_GIVEN
    }
}
