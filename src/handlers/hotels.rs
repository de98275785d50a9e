use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

use crate::models::hotel::HotelFilters;
use crate::services::hotels::HotelService;

/// List every hotel with its refs, amenity ids, rooms (with packages) and
/// review aggregates. Accepts the same filters as the dashboard list.
pub async fn get_hotels(
    service: web::Data<HotelService>,
    params: web::Query<HotelFilters>,
) -> impl Responder {
    match service.list_detailed(&params).await {
        Ok(hotels) => HttpResponse::Ok().json(json!({
            "success": true,
            "data": hotels,
        })),
        Err(e) => {
            log::error!("hotel listing failed: {e}");
            HttpResponse::InternalServerError().json(json!({
                "success": false,
                "message": e.to_string(),
            }))
        }
    }
}

/// Single hotel in the same joined shape, plus its FAQs.
pub async fn get_hotel_by_id(
    service: web::Data<HotelService>,
    path: web::Path<String>,
) -> impl Responder {
    let id = match path.into_inner().parse::<i64>() {
        Ok(id) if id > 0 => id,
        _ => {
            return HttpResponse::BadRequest().json(json!({
                "success": false,
                "message": "Invalid hotel id",
            }))
        }
    };

    let mut hotel = match service.get_complete(id).await {
        Ok(hotel) => hotel,
        Err(e) => {
            log::error!("hotel fetch failed for id {id}: {e}");
            return HttpResponse::InternalServerError().json(json!({
                "success": false,
                "message": e.to_string(),
            }));
        }
    };

    match service.list_faqs(id).await {
        Ok(faqs) => hotel.faqs = Some(faqs),
        Err(e) => {
            log::error!("faq fetch failed for hotel {id}: {e}");
            return HttpResponse::InternalServerError().json(json!({
                "success": false,
                "message": e.to_string(),
            }));
        }
    }

    HttpResponse::Ok().json(json!({
        "success": true,
        "data": hotel,
    }))
}
