mod common;

use common::{hotel_input, master_input, seed_master_data, test_pool};
use hotel_admin_api::error::ServiceError;
use hotel_admin_api::models::master::MasterInput;
use hotel_admin_api::services::hotels::HotelService;
use hotel_admin_api::services::master_data::{MasterDataService, MasterTable};

#[tokio::test]
async fn list_sorts_by_english_name() {
    let pool = test_pool().await;
    let master = MasterDataService::new(pool.clone());

    for (en, ar) in [("Resort", "منتجع"), ("Apartment", "شقة"), ("Hotel", "فندق")] {
        master
            .create(MasterTable::Types, &master_input(en, ar))
            .await
            .unwrap();
    }

    let types = master.list(MasterTable::Types, false).await.unwrap();
    let names: Vec<&str> = types.iter().map(|t| t.name_en.as_str()).collect();
    assert_eq!(names, vec!["Apartment", "Hotel", "Resort"]);
}

#[tokio::test]
async fn active_only_filters_inactive_rows() {
    let pool = test_pool().await;
    let master = MasterDataService::new(pool.clone());

    master
        .create(MasterTable::Chains, &master_input("Hilton", "هيلتون"))
        .await
        .unwrap();
    master
        .create(
            MasterTable::Chains,
            &MasterInput {
                status: "inactive".to_string(),
                ..master_input("Defunct Chain", "سلسلة منتهية")
            },
        )
        .await
        .unwrap();

    let all = master.list(MasterTable::Chains, false).await.unwrap();
    assert_eq!(all.len(), 2);

    let active = master.list(MasterTable::Chains, true).await.unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].name_en, "Hilton");
}

#[tokio::test]
async fn update_and_delete_round_trip() {
    let pool = test_pool().await;
    let master = MasterDataService::new(pool.clone());

    let area = master
        .create(MasterTable::Areas, &master_input("Makkah", "مكة"))
        .await
        .unwrap();

    let renamed = master
        .update(
            MasterTable::Areas,
            area.id,
            &master_input("Makkah Central", "مكة المركزية"),
        )
        .await
        .unwrap();
    assert_eq!(renamed.id, area.id);
    assert_eq!(renamed.name_en, "Makkah Central");
    assert!(renamed.updated_at >= area.updated_at);

    master.delete(MasterTable::Areas, area.id).await.unwrap();
    assert!(master.list(MasterTable::Areas, false).await.unwrap().is_empty());

    let err = master
        .update(MasterTable::Areas, area.id, &master_input("Gone", "غير موجود"))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
    assert_eq!(err.to_string(), "area not found");
}

#[tokio::test]
async fn blank_name_is_rejected() {
    let pool = test_pool().await;
    let master = MasterDataService::new(pool.clone());

    let err = master
        .create(MasterTable::Types, &master_input("", "فندق"))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Invalid(_)));
}

#[tokio::test]
async fn amenities_carry_icons_and_other_tables_do_not() {
    let pool = test_pool().await;
    let master = MasterDataService::new(pool.clone());

    master
        .create(
            MasterTable::Amenities,
            &MasterInput {
                icon: Some("wifi".to_string()),
                ..master_input("Free WiFi", "واي فاي مجاني")
            },
        )
        .await
        .unwrap();
    master
        .create(MasterTable::Types, &master_input("Hotel", "فندق"))
        .await
        .unwrap();

    let amenities = master.list(MasterTable::Amenities, false).await.unwrap();
    assert_eq!(amenities[0].icon.as_deref(), Some("wifi"));

    let types = master.list(MasterTable::Types, false).await.unwrap();
    assert!(types[0].icon.is_none());
}

#[tokio::test]
async fn deleting_a_referenced_row_surfaces_constraint_error() {
    let pool = test_pool().await;
    let seed = seed_master_data(&pool).await;
    let hotels = HotelService::new(pool.clone());
    let master = MasterDataService::new(pool.clone());

    hotels
        .create(&hotel_input(&seed, "Desert Rose", "وردة الصحراء"))
        .await
        .unwrap();

    let err = master
        .delete(MasterTable::Types, seed.type_id)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Database(_)));
}
