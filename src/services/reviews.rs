//! Review-aggregate synchronizer. Unlike rooms and amenities this one
//! reconciles: `source` is the natural key, so existing rows keep their ids
//! across edits while removed sources are deleted.

use chrono::Utc;
use sqlx::SqlitePool;
use std::collections::HashSet;

use crate::error::{ServiceError, ServiceResult};
use crate::models::review::{ReviewAggregate, ReviewInput};
use crate::services::placeholders;

struct ReviewRow {
    source: String,
    average_rating: f64,
    total_reviews: i64,
}

/// Entries with a blank source are silently dropped; total_reviews is
/// clamped to zero.
fn normalize(reviews: &[ReviewInput]) -> Vec<ReviewRow> {
    reviews
        .iter()
        .filter_map(|review| {
            let source = review.source.trim();
            if source.is_empty() {
                return None;
            }
            Some(ReviewRow {
                source: source.to_string(),
                average_rating: review.average_rating,
                total_reviews: review.total_reviews.max(0),
            })
        })
        .collect()
}

/// Create-time insert of the submitted sources, stamped with the current
/// time.
pub async fn save_reviews(
    pool: &SqlitePool,
    hotel_id: i64,
    reviews: &[ReviewInput],
) -> ServiceResult<Vec<ReviewAggregate>> {
    let rows = normalize(reviews);
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let now = Utc::now().naive_utc();
    let mut sql = String::from(
        "INSERT INTO review_aggregates \
         (hotel_id, source, average_rating, total_reviews, last_updated) VALUES ",
    );
    sql.push_str(&vec!["(?, ?, ?, ?, ?)"; rows.len()].join(", "));
    sql.push_str(" RETURNING *");

    let mut query = sqlx::query_as::<_, ReviewAggregate>(&sql);
    for row in &rows {
        query = query
            .bind(hotel_id)
            .bind(&row.source)
            .bind(row.average_rating)
            .bind(row.total_reviews)
            .bind(now);
    }

    query.fetch_all(pool).await.map_err(|e| {
        log::error!("failed to save review aggregates for hotel {hotel_id}: {e}");
        ServiceError::from(e)
    })
}

/// Edit-time reconciliation: delete rows whose source is no longer
/// submitted, upsert the rest on (hotel_id, source) with a fresh
/// `last_updated`, then return the full current set.
pub async fn reconcile_reviews(
    pool: &SqlitePool,
    hotel_id: i64,
    reviews: &[ReviewInput],
) -> ServiceResult<Vec<ReviewAggregate>> {
    let rows = normalize(reviews);
    let mut tx = pool.begin().await?;

    let existing: Vec<(i64, String)> =
        sqlx::query_as("SELECT id, source FROM review_aggregates WHERE hotel_id = ?")
            .bind(hotel_id)
            .fetch_all(&mut *tx)
            .await?;

    let submitted: HashSet<&str> = rows.iter().map(|row| row.source.as_str()).collect();
    let stale: Vec<i64> = existing
        .iter()
        .filter(|(_, source)| !submitted.contains(source.as_str()))
        .map(|(id, _)| *id)
        .collect();

    if !stale.is_empty() {
        let sql = format!(
            "DELETE FROM review_aggregates WHERE id IN ({})",
            placeholders(stale.len())
        );
        let mut query = sqlx::query(&sql);
        for id in &stale {
            query = query.bind(id);
        }
        query.execute(&mut *tx).await.map_err(|e| {
            log::error!("failed to delete removed review aggregates for hotel {hotel_id}: {e}");
            ServiceError::from(e)
        })?;
    }

    if !rows.is_empty() {
        let now = Utc::now().naive_utc();
        let mut sql = String::from(
            "INSERT INTO review_aggregates \
             (hotel_id, source, average_rating, total_reviews, last_updated) VALUES ",
        );
        sql.push_str(&vec!["(?, ?, ?, ?, ?)"; rows.len()].join(", "));
        sql.push_str(
            " ON CONFLICT (hotel_id, source) DO UPDATE SET \
             average_rating = excluded.average_rating, \
             total_reviews = excluded.total_reviews, \
             last_updated = excluded.last_updated",
        );

        let mut query = sqlx::query(&sql);
        for row in &rows {
            query = query
                .bind(hotel_id)
                .bind(&row.source)
                .bind(row.average_rating)
                .bind(row.total_reviews)
                .bind(now);
        }
        query.execute(&mut *tx).await.map_err(|e| {
            log::error!("failed to upsert review aggregates for hotel {hotel_id}: {e}");
            ServiceError::from(e)
        })?;
    }

    tx.commit().await?;

    list_reviews(pool, hotel_id).await
}

pub async fn list_reviews(pool: &SqlitePool, hotel_id: i64) -> ServiceResult<Vec<ReviewAggregate>> {
    let reviews = sqlx::query_as::<_, ReviewAggregate>(
        "SELECT * FROM review_aggregates WHERE hotel_id = ? ORDER BY id ASC",
    )
    .bind(hotel_id)
    .fetch_all(pool)
    .await?;
    Ok(reviews)
}
