#![allow(dead_code)]

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use hotel_admin_api::models::hotel::HotelInput;
use hotel_admin_api::models::master::MasterInput;
use hotel_admin_api::services::master_data::{MasterDataService, MasterTable};

/// In-memory database with the schema applied. One connection only, so the
/// whole pool sees the same `:memory:` database.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("failed to open in-memory database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("failed to run migrations");

    pool
}

pub struct Seed {
    pub type_id: i64,
    pub chain_id: i64,
    pub area_id: i64,
    pub amenity_ids: Vec<i64>,
}

pub fn master_input(name_en: &str, name_ar: &str) -> MasterInput {
    MasterInput {
        name_en: name_en.to_string(),
        name_ar: name_ar.to_string(),
        icon: None,
        status: "active".to_string(),
    }
}

pub async fn seed_master_data(pool: &SqlitePool) -> Seed {
    let master = MasterDataService::new(pool.clone());

    let property_type = master
        .create(MasterTable::Types, &master_input("Hotel", "فندق"))
        .await
        .expect("seed property type");
    let chain = master
        .create(MasterTable::Chains, &master_input("Hilton", "هيلتون"))
        .await
        .expect("seed chain");
    let area = master
        .create(MasterTable::Areas, &master_input("Makkah", "مكة"))
        .await
        .expect("seed area");

    let wifi = master
        .create(
            MasterTable::Amenities,
            &MasterInput {
                icon: Some("wifi".to_string()),
                ..master_input("Free WiFi", "واي فاي مجاني")
            },
        )
        .await
        .expect("seed amenity");
    let swimming = master
        .create(MasterTable::Amenities, &master_input("Pool", "مسبح"))
        .await
        .expect("seed amenity");

    Seed {
        type_id: property_type.id,
        chain_id: chain.id,
        area_id: area.id,
        amenity_ids: vec![wifi.id, swimming.id],
    }
}

pub fn hotel_input(seed: &Seed, name_en: &str, name_ar: &str) -> HotelInput {
    HotelInput {
        name_en: name_en.to_string(),
        name_ar: name_ar.to_string(),
        address_en: Some("King Abdul Aziz Road".to_string()),
        address_ar: Some("طريق الملك عبدالعزيز".to_string()),
        description_en: None,
        description_ar: None,
        type_id: seed.type_id,
        chain_id: Some(seed.chain_id),
        area_id: seed.area_id,
        star_rating: Some(5),
        rank: 0,
        status: "active".to_string(),
        thumbnail_url: Some("https://cdn.example.com/thumb.jpg".to_string()),
    }
}
