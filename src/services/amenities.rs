//! Hotel-amenity join-row synchronizer. Replace-all on edit: the previous
//! set is dropped and the submitted ids reinserted, in one transaction.

use sqlx::{SqliteConnection, SqlitePool};

use crate::error::{ServiceError, ServiceResult};

pub async fn save_amenities(
    pool: &SqlitePool,
    hotel_id: i64,
    amenity_ids: &[i64],
) -> ServiceResult<()> {
    if amenity_ids.is_empty() {
        return Ok(());
    }
    let mut conn = pool.acquire().await?;
    insert_join_rows(&mut conn, hotel_id, amenity_ids).await
}

pub async fn replace_amenities(
    pool: &SqlitePool,
    hotel_id: i64,
    amenity_ids: &[i64],
) -> ServiceResult<()> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM hotel_amenities WHERE hotel_id = ?")
        .bind(hotel_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            log::error!("failed to delete amenities for hotel {hotel_id}: {e}");
            ServiceError::from(e)
        })?;

    if !amenity_ids.is_empty() {
        insert_join_rows(&mut tx, hotel_id, amenity_ids).await?;
    }

    tx.commit().await?;
    Ok(())
}

async fn insert_join_rows(
    conn: &mut SqliteConnection,
    hotel_id: i64,
    amenity_ids: &[i64],
) -> ServiceResult<()> {
    let mut sql = String::from("INSERT INTO hotel_amenities (hotel_id, amenity_id) VALUES ");
    sql.push_str(&vec!["(?, ?)"; amenity_ids.len()].join(", "));

    let mut query = sqlx::query(&sql);
    for amenity_id in amenity_ids {
        query = query.bind(hotel_id).bind(amenity_id);
    }

    query.execute(&mut *conn).await.map_err(|e| {
        log::error!("failed to insert amenities for hotel {hotel_id}: {e}");
        ServiceError::from(e)
    })?;

    Ok(())
}

/// Amenity ids currently attached to a hotel, in id order.
pub async fn list_amenity_ids(pool: &SqlitePool, hotel_id: i64) -> ServiceResult<Vec<i64>> {
    let ids = sqlx::query_scalar::<_, i64>(
        "SELECT amenity_id FROM hotel_amenities WHERE hotel_id = ? ORDER BY amenity_id ASC",
    )
    .bind(hotel_id)
    .fetch_all(pool)
    .await?;
    Ok(ids)
}
