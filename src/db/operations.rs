use crate::auth::guard::OwnerFilter;
use crate::db::models::{Booking, Place, PlaceDetails, User};
use crate::error::{AppError, DatabaseError};
use chrono::Utc;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

#[derive(Clone)]
pub struct DbOperations {
    pool: Arc<PgPool>,
}

impl DbOperations {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    pub async fn new_with_options(
        url: &str,
        max_connections: u32,
        acquire_timeout: Duration,
    ) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(acquire_timeout)
            .connect(url)
            .await
            .map_err(|e| AppError::DatabaseError(DatabaseError::ConnectionError(e.to_string())))?;

        Ok(Self { pool: Arc::new(pool) })
    }

    pub fn pool(&self) -> &PgPool {
        self.pool.as_ref()
    }

    /// Inserts a new user. Email uniqueness is enforced by the `users_email_key`
    /// index, so a concurrent duplicate registration surfaces as a unique
    /// violation here rather than racing a check-then-insert.
    pub async fn create_user(&self, user: &User) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, name, email, password_hash, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, email, password_hash, created_at, updated_at
            "#,
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.created_at)
        .bind(user.updated_at)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(user)
    }

    pub async fn get_user_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, password_hash, created_at, updated_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(user)
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, password_hash, created_at, updated_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(user)
    }

    pub async fn create_place(&self, place: &Place) -> Result<Place, AppError> {
        let place = sqlx::query_as::<_, Place>(
            r#"
            INSERT INTO places (id, owner_id, title, address, photos, description,
                                perks, extra_info, check_in, check_out, max_guests, price,
                                created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING *
            "#,
        )
        .bind(place.id)
        .bind(place.owner_id)
        .bind(&place.title)
        .bind(&place.address)
        .bind(&place.photos)
        .bind(&place.description)
        .bind(&place.perks)
        .bind(&place.extra_info)
        .bind(place.check_in)
        .bind(place.check_out)
        .bind(place.max_guests)
        .bind(place.price)
        .bind(place.created_at)
        .bind(place.updated_at)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(place)
    }

    pub async fn get_place_by_id(&self, id: Uuid) -> Result<Option<Place>, AppError> {
        let place = sqlx::query_as::<_, Place>("SELECT * FROM places WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(place)
    }

    pub async fn list_places(&self) -> Result<Vec<Place>, AppError> {
        let places = sqlx::query_as::<_, Place>("SELECT * FROM places ORDER BY created_at DESC")
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(places)
    }

    pub async fn list_places_by_owner(&self, filter: &OwnerFilter) -> Result<Vec<Place>, AppError> {
        let places = sqlx::query_as::<_, Place>(
            "SELECT * FROM places WHERE owner_id = $1 ORDER BY created_at DESC",
        )
        .bind(filter.owner_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(places)
    }

    /// Rewrites the mutable fields of a place. Ownership is decided by the
    /// caller before this runs; `owner_id` is never part of the update.
    pub async fn update_place(&self, id: Uuid, details: &PlaceDetails) -> Result<Place, AppError> {
        let place = sqlx::query_as::<_, Place>(
            r#"
            UPDATE places
            SET title = $2, address = $3, photos = $4, description = $5,
                perks = $6, extra_info = $7, check_in = $8, check_out = $9,
                max_guests = $10, price = $11, updated_at = $12
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&details.title)
        .bind(&details.address)
        .bind(&details.photos)
        .bind(&details.description)
        .bind(&details.perks)
        .bind(&details.extra_info)
        .bind(details.check_in)
        .bind(details.check_out)
        .bind(details.max_guests)
        .bind(details.price)
        .bind(Utc::now())
        .fetch_optional(self.pool.as_ref())
        .await?
        .ok_or(AppError::DatabaseError(DatabaseError::NotFound))?;

        Ok(place)
    }

    pub async fn create_booking(&self, booking: &Booking) -> Result<Booking, AppError> {
        let booking = sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings (id, place_id, user_id, check_in, check_out,
                                  num_guests, name, phone, price, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(booking.id)
        .bind(booking.place_id)
        .bind(booking.user_id)
        .bind(booking.check_in)
        .bind(booking.check_out)
        .bind(booking.num_guests)
        .bind(&booking.name)
        .bind(&booking.phone)
        .bind(booking.price)
        .bind(booking.created_at)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(booking)
    }

    pub async fn list_bookings_for_user(
        &self,
        filter: &OwnerFilter,
    ) -> Result<Vec<Booking>, AppError> {
        let bookings = sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE user_id = $1 ORDER BY check_in",
        )
        .bind(filter.owner_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(bookings)
    }
}
