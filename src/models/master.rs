use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Row shape shared by the four reference tables. `icon` only exists on
/// amenities and defaults to `None` for the rest.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MasterRecord {
    pub id: i64,
    pub name_en: String,
    pub name_ar: String,
    #[sqlx(default)]
    pub icon: Option<String>,
    pub status: String,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

/// Slim shape attached to hotels when resolving type/chain/area ids.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MasterRef {
    pub id: i64,
    pub name_en: String,
    pub name_ar: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MasterInput {
    #[validate(length(min = 1))]
    pub name_en: String,
    #[validate(length(min = 1))]
    pub name_ar: String,
    pub icon: Option<String>,
    #[serde(default = "default_status")]
    pub status: String,
}

fn default_status() -> String {
    "active".to_string()
}
