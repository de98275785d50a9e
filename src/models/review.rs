use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One row per external review source for a hotel. `(hotel_id, source)` is
/// unique; `last_updated` is stamped on every write.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ReviewAggregate {
    pub id: i64,
    pub hotel_id: i64,
    pub source: String,
    pub average_rating: f64,
    pub total_reviews: i64,
    pub last_updated: chrono::NaiveDateTime,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewInput {
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub average_rating: f64,
    #[serde(default)]
    pub total_reviews: i64,
}
