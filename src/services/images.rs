//! Image-URL persistence. The ordered list lives as a JSON column on the
//! hotel row itself, not in a child table; index 0 is the primary image and
//! also mirrored into the legacy single `image_url` column.
//!
//! Callers only invoke this for a non-empty list: submitting no images
//! during an edit leaves whatever is stored untouched.

use sqlx::types::Json;
use sqlx::SqlitePool;

use crate::error::{ServiceError, ServiceResult};
use crate::models::hotel::{Hotel, HotelImage};

pub async fn save_image_urls(
    pool: &SqlitePool,
    hotel_id: i64,
    image_urls: &[String],
) -> ServiceResult<Hotel> {
    let images: Vec<HotelImage> = image_urls
        .iter()
        .enumerate()
        .map(|(index, url)| HotelImage {
            url: url.clone(),
            is_primary: index == 0,
            sort_order: index as i64,
        })
        .collect();

    let hotel = sqlx::query_as::<_, Hotel>(
        "UPDATE hotels SET images = ?, image_url = ?, updated_at = CURRENT_TIMESTAMP \
         WHERE id = ? RETURNING *",
    )
    .bind(Json(&images))
    .bind(image_urls.first().cloned())
    .bind(hotel_id)
    .fetch_optional(pool)
    .await
    .map_err(|e| {
        log::error!("failed to save image urls for hotel {hotel_id}: {e}");
        ServiceError::from(e)
    })?;

    hotel.ok_or(ServiceError::NotFound("hotel"))
}
