use serde::{Deserialize, Deserializer, Serialize};

/// Accepts both string and numeric ids. The backend sends ids as strings,
/// but numeric representations have been observed across host/backend
/// versions; comparisons are string-based either way.
fn lenient_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {other}"
        ))),
    }
}

/// Lifecycle of a collection. The backend closes a collection once the
/// target amount is reached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionStatus {
    #[default]
    Active,
    Finished,
}

impl CollectionStatus {
    pub fn is_finished(self) -> bool {
        matches!(self, CollectionStatus::Finished)
    }
}

/// A collection as it appears in the created/participated lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionSummary {
    #[serde(deserialize_with = "lenient_id")]
    pub id: String,
    pub goal: String,
    pub amount: i64,
    pub current: i64,
    #[serde(default)]
    pub percent: i64,
    #[serde(default)]
    pub status: CollectionStatus,
}

/// The full collection record returned by the detail endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    #[serde(deserialize_with = "lenient_id")]
    pub id: String,
    #[serde(deserialize_with = "lenient_id")]
    pub creator_id: String,
    pub goal: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    pub amount: i64,
    pub current: i64,
    #[serde(default)]
    pub percent: i64,
    #[serde(default)]
    pub status: CollectionStatus,
}

/// Both list halves of the "my collections" screen, fetched in one call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MyCollections {
    #[serde(default)]
    pub created: Vec<CollectionSummary>,
    #[serde(default)]
    pub participated: Vec<CollectionSummary>,
}
