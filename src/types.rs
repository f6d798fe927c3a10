use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Open JSON object returned for API entities (blocks, channels, users, ...).
pub type Entity = serde_json::Map<String, JsonValue>;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationMeta {
    pub current_page: i64,
    pub per_page: i64,
    pub total_pages: i64,
    pub total_count: i64,
    pub next_page: Option<i64>,
    pub prev_page: Option<i64>,
    pub has_more_pages: bool,
}

/// Paginated envelope, passed through as returned by the API.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResult<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub meta: PaginationMeta,
}
