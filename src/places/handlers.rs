use actix_web::{web, HttpRequest, HttpResponse};
use uuid::Uuid;

use crate::auth::handlers::bearer_token;
use crate::auth::{authorize_owner, scope_to_identity};
use crate::db::models::{Place, PlaceDetails};
use crate::error::{AppError, DatabaseError};
use crate::AppState;
use tracing::info;

pub async fn create_place(
    req: HttpRequest,
    details: web::Json<PlaceDetails>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let identity = state.auth.identify(bearer_token(&req)?)?;

    let place = Place::new(identity.id, details.into_inner());
    let place = state.db.create_place(&place).await?;

    info!("User {} created place {}", identity.id, place.id);
    Ok(HttpResponse::Created().json(place))
}

pub async fn list_places(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let places = state.db.list_places().await?;
    Ok(HttpResponse::Ok().json(places))
}

pub async fn get_place(
    path: web::Path<Uuid>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let place = state
        .db
        .get_place_by_id(path.into_inner())
        .await?
        .ok_or(AppError::DatabaseError(DatabaseError::NotFound))?;

    Ok(HttpResponse::Ok().json(place))
}

/// Owner-gated mutation: load the place, check ownership against its stored
/// owner, and only then write.
pub async fn update_place(
    req: HttpRequest,
    path: web::Path<Uuid>,
    details: web::Json<PlaceDetails>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let identity = state.auth.identify(bearer_token(&req)?)?;
    let place_id = path.into_inner();

    let place = state
        .db
        .get_place_by_id(place_id)
        .await?
        .ok_or(AppError::DatabaseError(DatabaseError::NotFound))?;

    authorize_owner(&identity, place.owner_id)?;

    let updated = state.db.update_place(place_id, &details).await?;
    info!("User {} updated place {}", identity.id, place_id);
    Ok(HttpResponse::Ok().json(updated))
}

pub async fn my_places(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let identity = state.auth.identify(bearer_token(&req)?)?;

    let filter = scope_to_identity(&identity);
    let places = state.db.list_places_by_owner(&filter).await?;

    Ok(HttpResponse::Ok().json(places))
}
