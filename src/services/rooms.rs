//! Room + package synchronizer.
//!
//! Rooms carry no stable identity across edits: the edit path deletes every
//! room for the hotel (packages cascade) and reinserts the submitted set.
//! Package point fields are always recomputed from the base price on the way
//! in, whatever the client sent.

use sqlx::types::Json;
use sqlx::{SqliteConnection, SqlitePool};

use crate::error::{ServiceError, ServiceResult};
use crate::models::room::{PackageInput, Room, RoomInput};
use crate::pricing;

/// Create-time blind insert. Rooms go in one at a time so their ids follow
/// submission order; each room's packages go in as one batch.
pub async fn save_rooms(
    pool: &SqlitePool,
    hotel_id: i64,
    rooms: &[RoomInput],
) -> ServiceResult<Vec<Room>> {
    if rooms.is_empty() {
        return Ok(Vec::new());
    }
    let mut conn = pool.acquire().await?;
    insert_rooms(&mut conn, hotel_id, rooms).await
}

/// Edit-time replace-all: delete the hotel's rooms, reinsert the submitted
/// set. Runs in one transaction, so a failed replace leaves the previous
/// rooms in place.
pub async fn replace_rooms(
    pool: &SqlitePool,
    hotel_id: i64,
    rooms: &[RoomInput],
) -> ServiceResult<Vec<Room>> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM rooms WHERE hotel_id = ?")
        .bind(hotel_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            log::error!("failed to delete rooms for hotel {hotel_id}: {e}");
            ServiceError::from(e)
        })?;

    let inserted = if rooms.is_empty() {
        Vec::new()
    } else {
        insert_rooms(&mut tx, hotel_id, rooms).await?
    };

    tx.commit().await?;
    Ok(inserted)
}

async fn insert_rooms(
    conn: &mut SqliteConnection,
    hotel_id: i64,
    rooms: &[RoomInput],
) -> ServiceResult<Vec<Room>> {
    let mut inserted = Vec::with_capacity(rooms.len());

    for room in rooms {
        let row = sqlx::query_as::<_, Room>(
            r#"
            INSERT INTO rooms (hotel_id, room_type, bedding, "view", images)
            VALUES (?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(hotel_id)
        .bind(&room.room_type)
        .bind(&room.bedding)
        .bind(&room.view)
        .bind(Json(&room.images))
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| {
            log::error!("failed to insert room for hotel {hotel_id}: {e}");
            ServiceError::from(e)
        })?;

        if !room.packages.is_empty() {
            insert_packages(conn, row.id, &room.packages).await?;
        }

        inserted.push(row);
    }

    Ok(inserted)
}

async fn insert_packages(
    conn: &mut SqliteConnection,
    room_id: i64,
    packages: &[PackageInput],
) -> ServiceResult<()> {
    let mut sql = String::from(
        "INSERT INTO room_packages \
         (room_id, meal_board, cancellation_policy, first_price, base_price, \
          almosafer_points, shukran_points) VALUES ",
    );
    sql.push_str(&vec!["(?, ?, ?, ?, ?, ?, ?)"; packages.len()].join(", "));

    let mut query = sqlx::query(&sql);
    for pkg in packages {
        let base = pricing::normalize_base_price(pkg.base_price);
        let first = match pkg.first_price {
            Some(value) => pricing::round2(value),
            None => pricing::default_first_price(base),
        };
        let points = pricing::derive_points(base);

        query = query
            .bind(room_id)
            .bind(&pkg.meal_board)
            .bind(&pkg.cancellation_policy)
            .bind(first)
            .bind(base)
            .bind(points.almosafer_points)
            .bind(points.shukran_points);
    }

    query.execute(&mut *conn).await.map_err(|e| {
        log::error!("failed to insert packages for room {room_id}: {e}");
        ServiceError::from(e)
    })?;

    Ok(())
}
