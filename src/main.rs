use actix_web::{middleware, web, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;

use hotel_admin_api::db;
use hotel_admin_api::handlers;
use hotel_admin_api::services::hotels::HotelService;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logger and environment
    dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    log::info!("Connecting to database...");
    let pool = db::get_db_pool().await;

    // Run migrations
    log::info!("Running migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    log::info!("Starting server at http://localhost:8080");

    let hotels = web::Data::new(HotelService::new(pool));

    HttpServer::new(move || {
        App::new()
            .app_data(hotels.clone())
            .wrap(middleware::Logger::default())
            .service(
                web::scope("/hotels")
                    .route("", web::get().to(handlers::hotels::get_hotels))
                    .route("/{id}", web::get().to(handlers::hotels::get_hotel_by_id)),
            )
    })
    .bind(("127.0.0.1", 8080))?
    .run()
    .await
}
