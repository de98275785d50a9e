use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use validator::Validate;

use crate::models::faq::Faq;
use crate::models::master::MasterRef;
use crate::models::review::{ReviewAggregate, ReviewInput};
use crate::models::room::{RoomInput, RoomWithPackages};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Hotel {
    pub id: i64,
    pub name_en: String,
    pub name_ar: String,
    pub address_en: Option<String>,
    pub address_ar: Option<String>,
    pub description_en: Option<String>,
    pub description_ar: Option<String>,
    pub type_id: i64,
    pub chain_id: Option<i64>,
    pub area_id: i64,
    pub star_rating: Option<i64>,
    pub rank: i64,
    pub status: String,
    pub thumbnail_url: Option<String>,
    pub image_url: Option<String>,
    pub images: Option<Json<Vec<HotelImage>>>,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

/// Entry of the `hotels.images` JSON column. The first entry of a saved list
/// is the primary image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotelImage {
    pub url: String,
    pub is_primary: bool,
    pub sort_order: i64,
}

/// Scalar fields of the add/edit form. Foreign keys must already point at
/// existing master-data rows; only the database checks them.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct HotelInput {
    #[validate(length(min = 1))]
    pub name_en: String,
    #[validate(length(min = 1))]
    pub name_ar: String,
    pub address_en: Option<String>,
    pub address_ar: Option<String>,
    pub description_en: Option<String>,
    pub description_ar: Option<String>,
    pub type_id: i64,
    pub chain_id: Option<i64>,
    pub area_id: i64,
    #[validate(range(min = 1, max = 5))]
    pub star_rating: Option<i64>,
    #[serde(default)]
    pub rank: i64,
    #[serde(default = "default_status")]
    pub status: String,
    pub thumbnail_url: Option<String>,
}

fn default_status() -> String {
    "active".to_string()
}

/// Hotel row plus the master-data rows it points at. A missing or failed
/// lookup leaves the ref as `None`.
#[derive(Debug, Clone, Serialize)]
pub struct HotelWithRefs {
    #[serde(flatten)]
    pub hotel: Hotel,
    #[serde(rename = "type")]
    pub property_type: Option<MasterRef>,
    pub chain: Option<MasterRef>,
    pub area: Option<MasterRef>,
}

/// The full aggregate the edit form and the detail endpoint work with.
#[derive(Debug, Clone, Serialize)]
pub struct HotelComplete {
    #[serde(flatten)]
    pub hotel: Hotel,
    #[serde(rename = "type")]
    pub property_type: Option<MasterRef>,
    pub chain: Option<MasterRef>,
    pub area: Option<MasterRef>,
    pub amenities: Vec<i64>,
    pub rooms: Vec<RoomWithPackages>,
    pub review_aggregates: Vec<ReviewAggregate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faqs: Option<Vec<Faq>>,
}

/// Subordinate collections submitted alongside the scalar fields. `None`
/// means the form did not touch that section; the matching synchronizer is
/// skipped entirely.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RelatedCollections {
    pub amenities: Option<Vec<i64>>,
    pub rooms: Option<Vec<RoomInput>>,
    pub image_urls: Option<Vec<String>>,
    pub review_aggregates: Option<Vec<ReviewInput>>,
}

/// Result of a multi-table save: the persisted hotel plus an advisory
/// warning when one of the best-effort related saves failed.
#[derive(Debug, Clone, Serialize)]
pub struct HotelSaveOutcome {
    pub hotel: Hotel,
    pub warning: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HotelFilters {
    pub search: Option<String>,
    pub type_id: Option<i64>,
    pub area_id: Option<i64>,
    pub status: Option<String>,
}
