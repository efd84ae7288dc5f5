use actix_web::{web, HttpRequest, HttpResponse};
use serde::Serialize;

use crate::auth::handlers::bearer_token;
use crate::auth::scope_to_identity;
use crate::db::models::{Booking, BookingDetails, Place};
use crate::error::{AppError, DatabaseError};
use crate::AppState;
use tracing::info;

#[derive(Debug, Serialize)]
pub struct BookingWithPlace {
    #[serde(flatten)]
    pub booking: Booking,
    pub place: Option<Place>,
}

pub async fn create_booking(
    req: HttpRequest,
    details: web::Json<BookingDetails>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let identity = state.auth.identify(bearer_token(&req)?)?;
    let details = details.into_inner();

    // The booked place must exist before we attribute a booking to it.
    state
        .db
        .get_place_by_id(details.place_id)
        .await?
        .ok_or(AppError::DatabaseError(DatabaseError::NotFound))?;

    let booking = Booking::new(identity.id, details);
    let booking = state.db.create_booking(&booking).await?;

    info!("User {} booked place {}", identity.id, booking.place_id);
    Ok(HttpResponse::Created().json(booking))
}

pub async fn my_bookings(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let identity = state.auth.identify(bearer_token(&req)?)?;

    let filter = scope_to_identity(&identity);
    let bookings = state.db.list_bookings_for_user(&filter).await?;

    let mut enriched = Vec::with_capacity(bookings.len());
    for booking in bookings {
        let place = state.db.get_place_by_id(booking.place_id).await?;
        enriched.push(BookingWithPlace { booking, place });
    }

    Ok(HttpResponse::Ok().json(enriched))
}
