use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Bilingual Q&A attached to a hotel. Read-only for this service: rows are
/// returned by the detail endpoint but no save path writes them.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Faq {
    pub id: i64,
    pub hotel_id: i64,
    pub question_en: String,
    pub question_ar: String,
    pub answer_en: String,
    pub answer_ar: String,
}
