mod common;

use actix_web::{test, web, App};
use serde_json::Value;
use sqlx::SqlitePool;

use common::{hotel_input, seed_master_data, test_pool};
use hotel_admin_api::handlers;
use hotel_admin_api::models::hotel::RelatedCollections;
use hotel_admin_api::models::review::ReviewInput;
use hotel_admin_api::models::room::{PackageInput, RoomInput};
use hotel_admin_api::services::hotels::HotelService;

macro_rules! hotel_app {
    ($service:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($service.clone()))
                .service(
                    web::scope("/hotels")
                        .route("", web::get().to(handlers::hotels::get_hotels))
                        .route("/{id}", web::get().to(handlers::hotels::get_hotel_by_id)),
                ),
        )
        .await
    };
}

async fn seeded_hotel(pool: &SqlitePool, service: &HotelService) -> i64 {
    let seed = seed_master_data(pool).await;
    let related = RelatedCollections {
        amenities: Some(seed.amenity_ids.clone()),
        rooms: Some(vec![RoomInput {
            room_type: "Double".to_string(),
            bedding: "2 Twin Beds".to_string(),
            view: "Haram View".to_string(),
            images: Vec::new(),
            packages: vec![PackageInput {
                meal_board: "Room Only".to_string(),
                base_price: 250.0,
                ..Default::default()
            }],
        }]),
        image_urls: None,
        review_aggregates: Some(vec![ReviewInput {
            source: "Google".to_string(),
            average_rating: 8.6,
            total_reviews: 120,
        }]),
    };
    let outcome = service
        .create_complete(&hotel_input(&seed, "Desert Rose", "وردة الصحراء"), &related)
        .await
        .unwrap();
    outcome.hotel.id
}

#[actix_web::test]
async fn list_endpoint_returns_joined_hotels() {
    let pool = test_pool().await;
    let service = HotelService::new(pool.clone());
    let hotel_id = seeded_hotel(&pool, &service).await;

    let app = hotel_app!(service);
    let resp = test::call_service(&app, test::TestRequest::get().uri("/hotels").to_request()).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);

    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);

    let hotel = &data[0];
    assert_eq!(hotel["id"], hotel_id);
    assert_eq!(hotel["name_en"], "Desert Rose");
    assert_eq!(hotel["type"]["name_en"], "Hotel");
    assert_eq!(hotel["chain"]["name_en"], "Hilton");
    assert_eq!(hotel["area"]["name_en"], "Makkah");
    assert_eq!(hotel["amenities"].as_array().unwrap().len(), 2);
    assert_eq!(hotel["rooms"].as_array().unwrap().len(), 1);
    assert_eq!(hotel["rooms"][0]["packages"][0]["almosafer_points"], 25.0);
    assert_eq!(hotel["review_aggregates"][0]["source"], "Google");
    // FAQs only appear on the detail endpoint
    assert!(hotel.get("faqs").is_none());
}

#[actix_web::test]
async fn list_endpoint_applies_search_filter() {
    let pool = test_pool().await;
    let service = HotelService::new(pool.clone());
    seeded_hotel(&pool, &service).await;

    let app = hotel_app!(service);
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/hotels?search=pearl")
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn detail_endpoint_includes_faqs() {
    let pool = test_pool().await;
    let service = HotelService::new(pool.clone());
    let hotel_id = seeded_hotel(&pool, &service).await;

    sqlx::query(
        "INSERT INTO hotel_faqs (hotel_id, question_en, question_ar, answer_en, answer_ar) \
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(hotel_id)
    .bind("Is breakfast included?")
    .bind("هل الفطور مشمول؟")
    .bind("Only with the breakfast package.")
    .bind("فقط مع باقة الفطور.")
    .execute(&pool)
    .await
    .unwrap();

    let app = hotel_app!(service);
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/hotels/{hotel_id}"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["name_en"], "Desert Rose");
    assert_eq!(body["data"]["rooms"].as_array().unwrap().len(), 1);

    let faqs = body["data"]["faqs"].as_array().unwrap();
    assert_eq!(faqs.len(), 1);
    assert_eq!(faqs[0]["question_en"], "Is breakfast included?");
}

#[actix_web::test]
async fn malformed_id_is_bad_request() {
    let pool = test_pool().await;
    let service = HotelService::new(pool.clone());

    let app = hotel_app!(service);
    for uri in ["/hotels/abc", "/hotels/0", "/hotels/-3"] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), 400, "{uri} should be rejected");

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Invalid hotel id");
    }
}

#[actix_web::test]
async fn missing_hotel_is_server_error() {
    let pool = test_pool().await;
    let service = HotelService::new(pool.clone());

    let app = hotel_app!(service);
    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/hotels/9999").to_request(),
    )
    .await;
    assert_eq!(resp.status(), 500);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "hotel not found");
}
