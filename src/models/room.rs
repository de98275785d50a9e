use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Room {
    pub id: i64,
    pub hotel_id: i64,
    pub room_type: String,
    pub bedding: String,
    pub view: String,
    pub images: Json<Vec<String>>,
    pub created_at: chrono::NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RoomPackage {
    pub id: i64,
    pub room_id: i64,
    pub meal_board: String,
    pub cancellation_policy: String,
    pub first_price: f64,
    pub base_price: f64,
    pub almosafer_points: f64,
    pub shukran_points: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoomWithPackages {
    #[serde(flatten)]
    pub room: Room,
    pub packages: Vec<RoomPackage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoomInput {
    #[serde(default)]
    pub room_type: String,
    #[serde(default)]
    pub bedding: String,
    #[serde(default)]
    pub view: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub packages: Vec<PackageInput>,
}

/// Package as submitted by the form. Point values sent by a client are
/// ignored; the insert path recomputes them from `base_price`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageInput {
    #[serde(default)]
    pub meal_board: String,
    #[serde(default)]
    pub cancellation_policy: String,
    #[serde(default)]
    pub base_price: f64,
    pub first_price: Option<f64>,
    pub almosafer_points: Option<f64>,
    pub shukran_points: Option<f64>,
}
