//! Hotel repository: CRUD on the primary record plus the aggregate
//! composition and multi-table save orchestration.
//!
//! A save is not atomic across tables. The scalar hotel write goes first and
//! is the only fatal step; the related-collection synchronizers run
//! best-effort afterwards, and their failures surface as an advisory warning
//! on an otherwise successful result.

use std::collections::{HashMap, HashSet};

use sqlx::SqlitePool;
use tokio::join;
use validator::Validate;

use crate::error::{ServiceError, ServiceResult};
use crate::models::faq::Faq;
use crate::models::hotel::{
    Hotel, HotelComplete, HotelFilters, HotelInput, HotelSaveOutcome, HotelWithRefs,
    RelatedCollections,
};
use crate::models::master::MasterRef;
use crate::models::review::ReviewAggregate;
use crate::models::room::{Room, RoomPackage, RoomWithPackages};
use crate::services::{amenities, images, placeholders, reviews, rooms};

#[derive(Clone)]
pub struct HotelService {
    pool: SqlitePool,
}

impl HotelService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, input: &HotelInput) -> ServiceResult<Hotel> {
        input.validate()?;

        sqlx::query_as::<_, Hotel>(
            r#"
            INSERT INTO hotels
                (name_en, name_ar, address_en, address_ar, description_en, description_ar,
                 type_id, chain_id, area_id, star_rating, "rank", status, thumbnail_url)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&input.name_en)
        .bind(&input.name_ar)
        .bind(&input.address_en)
        .bind(&input.address_ar)
        .bind(&input.description_en)
        .bind(&input.description_ar)
        .bind(input.type_id)
        .bind(input.chain_id)
        .bind(input.area_id)
        .bind(input.star_rating)
        .bind(input.rank)
        .bind(&input.status)
        .bind(&input.thumbnail_url)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            log::error!("failed to create hotel: {e}");
            ServiceError::from(e)
        })
    }

    /// Full replace of the scalar fields.
    pub async fn update(&self, id: i64, input: &HotelInput) -> ServiceResult<Hotel> {
        input.validate()?;

        let hotel = sqlx::query_as::<_, Hotel>(
            r#"
            UPDATE hotels SET
                name_en = ?, name_ar = ?, address_en = ?, address_ar = ?,
                description_en = ?, description_ar = ?, type_id = ?, chain_id = ?,
                area_id = ?, star_rating = ?, "rank" = ?, status = ?, thumbnail_url = ?,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(&input.name_en)
        .bind(&input.name_ar)
        .bind(&input.address_en)
        .bind(&input.address_ar)
        .bind(&input.description_en)
        .bind(&input.description_ar)
        .bind(input.type_id)
        .bind(input.chain_id)
        .bind(input.area_id)
        .bind(input.star_rating)
        .bind(input.rank)
        .bind(&input.status)
        .bind(&input.thumbnail_url)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            log::error!("failed to update hotel {id}: {e}");
            ServiceError::from(e)
        })?;

        hotel.ok_or(ServiceError::NotFound("hotel"))
    }

    /// Dependent rows go with the hotel via the schema's cascades.
    pub async fn delete(&self, id: i64) -> ServiceResult<()> {
        sqlx::query("DELETE FROM hotels WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                log::error!("failed to delete hotel {id}: {e}");
                ServiceError::from(e)
            })?;
        Ok(())
    }

    pub async fn get_by_id(&self, id: i64) -> ServiceResult<HotelWithRefs> {
        let hotel = sqlx::query_as::<_, Hotel>("SELECT * FROM hotels WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                log::error!("failed to fetch hotel {id}: {e}");
                ServiceError::from(e)
            })?
            .ok_or(ServiceError::NotFound("hotel"))?;

        let (property_type, chain, area) = fetch_refs(&self.pool, &hotel).await;

        Ok(HotelWithRefs {
            hotel,
            property_type,
            chain,
            area,
        })
    }

    /// The aggregate the edit form loads: hotel, amenity ids, rooms, and
    /// review aggregates are read in parallel, then packages are fetched by
    /// the room-id set. Only the hotel row itself is fatal; the collections
    /// degrade to empty with a logged warning.
    pub async fn get_complete(&self, id: i64) -> ServiceResult<HotelComplete> {
        let (hotel_res, amenities_res, rooms_res, reviews_res) = join!(
            sqlx::query_as::<_, Hotel>("SELECT * FROM hotels WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool),
            amenities::list_amenity_ids(&self.pool, id),
            sqlx::query_as::<_, Room>("SELECT * FROM rooms WHERE hotel_id = ? ORDER BY id ASC")
                .bind(id)
                .fetch_all(&self.pool),
            reviews::list_reviews(&self.pool, id),
        );

        let hotel = hotel_res
            .map_err(|e| {
                log::error!("failed to fetch hotel {id}: {e}");
                ServiceError::from(e)
            })?
            .ok_or(ServiceError::NotFound("hotel"))?;

        let amenity_ids = amenities_res.unwrap_or_else(|e| {
            log::warn!("amenity query failed for hotel {id}, returning empty list: {e}");
            Vec::new()
        });
        let room_rows = rooms_res.unwrap_or_else(|e| {
            log::warn!("rooms query failed for hotel {id}, returning empty rooms: {e}");
            Vec::new()
        });
        let review_aggregates = reviews_res.unwrap_or_else(|e| {
            log::warn!("review query failed for hotel {id}, returning empty list: {e}");
            Vec::new()
        });

        let rooms = attach_packages(&self.pool, room_rows).await;
        let (property_type, chain, area) = fetch_refs(&self.pool, &hotel).await;

        Ok(HotelComplete {
            hotel,
            property_type,
            chain,
            area,
            amenities: amenity_ids,
            rooms,
            review_aggregates,
            faqs: None,
        })
    }

    /// All hotels ordered by rank, filtered, with type/chain/area names
    /// attached through at most three batched lookups.
    pub async fn list(&self, filters: &HotelFilters) -> ServiceResult<Vec<HotelWithRefs>> {
        let mut sql = String::from("SELECT * FROM hotels WHERE 1=1");
        if filters.search.is_some() {
            sql.push_str(" AND (name_en LIKE ? OR name_ar LIKE ?)");
        }
        if filters.type_id.is_some() {
            sql.push_str(" AND type_id = ?");
        }
        if filters.area_id.is_some() {
            sql.push_str(" AND area_id = ?");
        }
        if filters.status.is_some() {
            sql.push_str(" AND status = ?");
        }
        sql.push_str(r#" ORDER BY "rank" ASC"#);

        let mut query = sqlx::query_as::<_, Hotel>(&sql);
        if let Some(search) = &filters.search {
            let pattern = format!("%{search}%");
            query = query.bind(pattern.clone()).bind(pattern);
        }
        if let Some(type_id) = filters.type_id {
            query = query.bind(type_id);
        }
        if let Some(area_id) = filters.area_id {
            query = query.bind(area_id);
        }
        if let Some(status) = &filters.status {
            query = query.bind(status);
        }

        let hotels = query.fetch_all(&self.pool).await.map_err(|e| {
            log::error!("failed to list hotels: {e}");
            ServiceError::from(e)
        })?;

        self.enrich(hotels).await
    }

    /// `list` plus every hotel's subordinate collections, assembled with one
    /// batched read per child table across the whole result set.
    pub async fn list_detailed(&self, filters: &HotelFilters) -> ServiceResult<Vec<HotelComplete>> {
        let hotels = self.list(filters).await?;
        if hotels.is_empty() {
            return Ok(Vec::new());
        }
        let hotel_ids: Vec<i64> = hotels.iter().map(|entry| entry.hotel.id).collect();

        let (amenity_rows, room_rows, review_rows) = join!(
            fetch_amenity_rows(&self.pool, &hotel_ids),
            fetch_rooms(&self.pool, &hotel_ids),
            fetch_reviews(&self.pool, &hotel_ids),
        );

        let rooms_with_packages = attach_packages(&self.pool, room_rows).await;

        let mut amenities_by_hotel: HashMap<i64, Vec<i64>> = HashMap::new();
        for (hotel_id, amenity_id) in amenity_rows {
            amenities_by_hotel
                .entry(hotel_id)
                .or_default()
                .push(amenity_id);
        }
        let mut rooms_by_hotel: HashMap<i64, Vec<RoomWithPackages>> = HashMap::new();
        for room in rooms_with_packages {
            rooms_by_hotel
                .entry(room.room.hotel_id)
                .or_default()
                .push(room);
        }
        let mut reviews_by_hotel: HashMap<i64, Vec<ReviewAggregate>> = HashMap::new();
        for review in review_rows {
            reviews_by_hotel
                .entry(review.hotel_id)
                .or_default()
                .push(review);
        }

        Ok(hotels
            .into_iter()
            .map(|entry| {
                let id = entry.hotel.id;
                HotelComplete {
                    hotel: entry.hotel,
                    property_type: entry.property_type,
                    chain: entry.chain,
                    area: entry.area,
                    amenities: amenities_by_hotel.remove(&id).unwrap_or_default(),
                    rooms: rooms_by_hotel.remove(&id).unwrap_or_default(),
                    review_aggregates: reviews_by_hotel.remove(&id).unwrap_or_default(),
                    faqs: None,
                }
            })
            .collect())
    }

    /// Create-time orchestration: the hotel row first (fatal), then each
    /// submitted collection best-effort, in sequence. Failures downstream of
    /// the insert turn into warnings, not errors.
    pub async fn create_complete(
        &self,
        input: &HotelInput,
        related: &RelatedCollections,
    ) -> ServiceResult<HotelSaveOutcome> {
        let mut hotel = self.create(input).await?;
        let mut warnings: Vec<String> = Vec::new();

        if let Some(urls) = related.image_urls.as_deref() {
            if !urls.is_empty() {
                match images::save_image_urls(&self.pool, hotel.id, urls).await {
                    Ok(updated) => hotel = updated,
                    Err(e) => {
                        log::error!("image save failed for new hotel {}: {e}", hotel.id);
                        warnings.push("Hotel created but images failed to save".to_string());
                    }
                }
            }
        }

        if let Some(amenity_ids) = related.amenities.as_deref() {
            if !amenity_ids.is_empty() {
                if let Err(e) = amenities::save_amenities(&self.pool, hotel.id, amenity_ids).await {
                    log::error!("amenity save failed for new hotel {}: {e}", hotel.id);
                    warnings.push("Hotel created but amenities failed to save".to_string());
                }
            }
        }

        if let Some(room_inputs) = related.rooms.as_deref() {
            if !room_inputs.is_empty() {
                if let Err(e) = rooms::save_rooms(&self.pool, hotel.id, room_inputs).await {
                    log::error!("room save failed for new hotel {}: {e}", hotel.id);
                    warnings.push("Hotel created but rooms failed to save".to_string());
                }
            }
        }

        if let Some(review_inputs) = related.review_aggregates.as_deref() {
            if !review_inputs.is_empty() {
                if let Err(e) = reviews::save_reviews(&self.pool, hotel.id, review_inputs).await {
                    log::error!("review save failed for new hotel {}: {e}", hotel.id);
                    warnings
                        .push("Hotel created but review aggregates failed to save".to_string());
                }
            }
        }

        let warning = (!warnings.is_empty()).then(|| warnings.join("; "));
        Ok(HotelSaveOutcome { hotel, warning })
    }

    /// Edit-time orchestration: scalar update first (fatal), then the
    /// applicable synchronizers concurrently and independently. The updated
    /// hotel is returned even when some of them fail; the caller only gets
    /// an advisory warning, never a rollback.
    pub async fn update_complete(
        &self,
        id: i64,
        input: &HotelInput,
        related: &RelatedCollections,
    ) -> ServiceResult<HotelSaveOutcome> {
        let hotel = self.update(id, input).await?;

        let (amenities_failed, rooms_failed, images_failed, reviews_failed) = join!(
            async {
                match related.amenities.as_deref() {
                    Some(ids) => amenities::replace_amenities(&self.pool, id, ids)
                        .await
                        .is_err(),
                    None => false,
                }
            },
            async {
                match related.rooms.as_deref() {
                    Some(list) => rooms::replace_rooms(&self.pool, id, list).await.is_err(),
                    None => false,
                }
            },
            async {
                match related.image_urls.as_deref() {
                    // an empty list on edit means "leave stored images alone"
                    Some(urls) if !urls.is_empty() => {
                        images::save_image_urls(&self.pool, id, urls).await.is_err()
                    }
                    _ => false,
                }
            },
            async {
                match related.review_aggregates.as_deref() {
                    Some(list) => reviews::reconcile_reviews(&self.pool, id, list)
                        .await
                        .is_err(),
                    None => false,
                }
            },
        );

        let warning = if amenities_failed || rooms_failed || images_failed || reviews_failed {
            log::error!("some related updates failed for hotel {id}");
            Some("Hotel updated but some related data failed to update".to_string())
        } else {
            None
        };

        Ok(HotelSaveOutcome { hotel, warning })
    }

    pub async fn list_faqs(&self, hotel_id: i64) -> ServiceResult<Vec<Faq>> {
        let faqs = sqlx::query_as::<_, Faq>(
            "SELECT * FROM hotel_faqs WHERE hotel_id = ? ORDER BY id ASC",
        )
        .bind(hotel_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(faqs)
    }

    async fn enrich(&self, hotels: Vec<Hotel>) -> ServiceResult<Vec<HotelWithRefs>> {
        if hotels.is_empty() {
            return Ok(Vec::new());
        }

        let type_ids = distinct_ids(hotels.iter().map(|h| Some(h.type_id)));
        let chain_ids = distinct_ids(hotels.iter().map(|h| h.chain_id));
        let area_ids = distinct_ids(hotels.iter().map(|h| Some(h.area_id)));

        let (types, chains, areas) = join!(
            master_refs_by_id(&self.pool, "property_types", &type_ids),
            master_refs_by_id(&self.pool, "chains", &chain_ids),
            master_refs_by_id(&self.pool, "areas", &area_ids),
        );

        Ok(hotels
            .into_iter()
            .map(|hotel| {
                let property_type = types.get(&hotel.type_id).cloned();
                let chain = hotel.chain_id.and_then(|id| chains.get(&id).cloned());
                let area = areas.get(&hotel.area_id).cloned();
                HotelWithRefs {
                    hotel,
                    property_type,
                    chain,
                    area,
                }
            })
            .collect())
    }
}

async fn fetch_refs(
    pool: &SqlitePool,
    hotel: &Hotel,
) -> (Option<MasterRef>, Option<MasterRef>, Option<MasterRef>) {
    join!(
        master_ref(pool, "property_types", Some(hotel.type_id)),
        master_ref(pool, "chains", hotel.chain_id),
        master_ref(pool, "areas", Some(hotel.area_id)),
    )
}

async fn master_ref(pool: &SqlitePool, table: &str, id: Option<i64>) -> Option<MasterRef> {
    let id = id?;
    let sql = format!("SELECT id, name_en, name_ar FROM {table} WHERE id = ?");
    match sqlx::query_as::<_, MasterRef>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
    {
        Ok(found) => found,
        Err(e) => {
            log::warn!("{table} lookup failed for id {id}: {e}");
            None
        }
    }
}

async fn master_refs_by_id(
    pool: &SqlitePool,
    table: &str,
    ids: &[i64],
) -> HashMap<i64, MasterRef> {
    if ids.is_empty() {
        return HashMap::new();
    }
    let sql = format!(
        "SELECT id, name_en, name_ar FROM {table} WHERE id IN ({})",
        placeholders(ids.len())
    );
    let mut query = sqlx::query_as::<_, MasterRef>(&sql);
    for id in ids {
        query = query.bind(id);
    }
    match query.fetch_all(pool).await {
        Ok(rows) => rows.into_iter().map(|row| (row.id, row)).collect(),
        Err(e) => {
            log::warn!("{table} batch lookup failed: {e}");
            HashMap::new()
        }
    }
}

fn distinct_ids<I: IntoIterator<Item = Option<i64>>>(ids: I) -> Vec<i64> {
    let mut seen = HashSet::new();
    ids.into_iter()
        .flatten()
        .filter(|id| seen.insert(*id))
        .collect()
}

/// Packages for a set of rooms in one dependent read, grouped back onto
/// their rooms. A failed read degrades to package-less rooms.
async fn attach_packages(pool: &SqlitePool, room_rows: Vec<Room>) -> Vec<RoomWithPackages> {
    if room_rows.is_empty() {
        return Vec::new();
    }

    let room_ids: Vec<i64> = room_rows.iter().map(|room| room.id).collect();
    let sql = format!(
        "SELECT * FROM room_packages WHERE room_id IN ({}) ORDER BY id ASC",
        placeholders(room_ids.len())
    );
    let mut query = sqlx::query_as::<_, RoomPackage>(&sql);
    for room_id in &room_ids {
        query = query.bind(room_id);
    }

    let packages = match query.fetch_all(pool).await {
        Ok(rows) => rows,
        Err(e) => {
            log::warn!("room packages query failed: {e}");
            Vec::new()
        }
    };

    let mut by_room: HashMap<i64, Vec<RoomPackage>> = HashMap::new();
    for package in packages {
        by_room.entry(package.room_id).or_default().push(package);
    }

    room_rows
        .into_iter()
        .map(|room| {
            let packages = by_room.remove(&room.id).unwrap_or_default();
            RoomWithPackages { room, packages }
        })
        .collect()
}

async fn fetch_amenity_rows(pool: &SqlitePool, hotel_ids: &[i64]) -> Vec<(i64, i64)> {
    let sql = format!(
        "SELECT hotel_id, amenity_id FROM hotel_amenities WHERE hotel_id IN ({}) \
         ORDER BY amenity_id ASC",
        placeholders(hotel_ids.len())
    );
    let mut query = sqlx::query_as::<_, (i64, i64)>(&sql);
    for id in hotel_ids {
        query = query.bind(id);
    }
    match query.fetch_all(pool).await {
        Ok(rows) => rows,
        Err(e) => {
            log::warn!("amenity listing failed: {e}");
            Vec::new()
        }
    }
}

async fn fetch_rooms(pool: &SqlitePool, hotel_ids: &[i64]) -> Vec<Room> {
    let sql = format!(
        "SELECT * FROM rooms WHERE hotel_id IN ({}) ORDER BY id ASC",
        placeholders(hotel_ids.len())
    );
    let mut query = sqlx::query_as::<_, Room>(&sql);
    for id in hotel_ids {
        query = query.bind(id);
    }
    match query.fetch_all(pool).await {
        Ok(rows) => rows,
        Err(e) => {
            log::warn!("rooms listing failed: {e}");
            Vec::new()
        }
    }
}

async fn fetch_reviews(pool: &SqlitePool, hotel_ids: &[i64]) -> Vec<ReviewAggregate> {
    let sql = format!(
        "SELECT * FROM review_aggregates WHERE hotel_id IN ({}) ORDER BY id ASC",
        placeholders(hotel_ids.len())
    );
    let mut query = sqlx::query_as::<_, ReviewAggregate>(&sql);
    for id in hotel_ids {
        query = query.bind(id);
    }
    match query.fetch_all(pool).await {
        Ok(rows) => rows,
        Err(e) => {
            log::warn!("review listing failed: {e}");
            Vec::new()
        }
    }
}
