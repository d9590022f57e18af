use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Envelope shared by every AIC endpoint: `data` is an object for single
/// records and an array for listings and searches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: Option<OneOrMany<T>>,
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Pagination {
    pub total: Option<u64>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    pub total_pages: Option<u64>,
    pub current_page: Option<u64>,
}

// Record fields are raw JSON values; the API mixes strings and numbers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Artwork {
    pub id: Option<Value>,
    pub title: Option<Value>,
    pub artist_display: Option<Value>,
    pub date_display: Option<Value>,
    pub medium_display: Option<Value>,
    pub place_of_origin: Option<Value>,
    pub short_description: Option<Value>,
    pub description: Option<Value>,
    pub image_id: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Agent {
    pub id: Option<Value>,
    pub title: Option<Value>,
    pub birth_date: Option<Value>,
    pub death_date: Option<Value>,
    pub description: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Exhibition {
    pub id: Option<Value>,
    pub title: Option<Value>,
    pub short_description: Option<Value>,
    pub aic_start_at: Option<Value>,
    pub aic_end_at: Option<Value>,
    pub status: Option<Value>,
    pub gallery_title: Option<Value>,
    pub web_url: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Gallery {
    pub id: Option<Value>,
    pub title: Option<Value>,
    pub number: Option<Value>,
    pub floor: Option<Value>,
    pub is_closed: Option<Value>,
}

/// One hit of the cross-model `/search` endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: Option<Value>,
    pub title: Option<Value>,
    pub api_model: Option<Value>,
}
