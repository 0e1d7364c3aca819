use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A notable spot inside a location.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PointOfInterest {
    pub name: String,
    pub description: String,
}

/// Canonical record for a location or place.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct LocationRecord {
    #[schemars(length(min = 1))]
    pub name: String,
    pub location_type: String,
    pub region: String,
    pub description: String,
    pub atmosphere: String,
    pub points_of_interest: Vec<PointOfInterest>,
    pub inhabitants: Vec<String>,
    pub hooks: Vec<String>,
    pub secrets: Vec<String>,
    pub hazards: Vec<String>,
    pub connections: Vec<String>,
    pub sources_used: Vec<String>,
    pub assumptions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<String>,
}
