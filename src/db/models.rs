use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(name: String, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A rental listing. `owner_id` is written once at creation from the
/// authenticated identity and is the sole authority for write access.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Place {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub address: String,
    pub photos: Vec<String>,
    pub description: String,
    pub perks: Vec<String>,
    pub extra_info: String,
    pub check_in: i32,
    pub check_out: i32,
    pub max_guests: i32,
    pub price: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Mutable listing fields, shared by the create and update payloads.
/// Deliberately excludes `owner_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceDetails {
    pub title: String,
    pub address: String,
    #[serde(default)]
    pub photos: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub perks: Vec<String>,
    #[serde(default)]
    pub extra_info: String,
    pub check_in: i32,
    pub check_out: i32,
    pub max_guests: i32,
    pub price: i32,
}

impl Place {
    pub fn new(owner_id: Uuid, details: PlaceDetails) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            owner_id,
            title: details.title,
            address: details.address,
            photos: details.photos,
            description: details.description,
            perks: details.perks,
            extra_info: details.extra_info,
            check_in: details.check_in,
            check_out: details.check_out,
            max_guests: details.max_guests,
            price: details.price,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A stay booked against a place, attributed to the user who made it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
    pub id: Uuid,
    pub place_id: Uuid,
    pub user_id: Uuid,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub num_guests: i32,
    pub name: String,
    pub phone: String,
    pub price: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingDetails {
    pub place_id: Uuid,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub num_guests: i32,
    pub name: String,
    pub phone: String,
    pub price: i32,
}

impl Booking {
    pub fn new(user_id: Uuid, details: BookingDetails) -> Self {
        Self {
            id: Uuid::new_v4(),
            place_id: details.place_id,
            user_id,
            check_in: details.check_in,
            check_out: details.check_out,
            num_guests: details.num_guests,
            name: details.name,
            phone: details.phone,
            price: details.price,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_new_stamps_identity() {
        let user = User::new(
            "Ann".to_string(),
            "ann@example.com".to_string(),
            "$argon2id$fake".to_string(),
        );
        assert_eq!(user.name, "Ann");
        assert_eq!(user.email, "ann@example.com");
        assert_eq!(user.created_at, user.updated_at);
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let user = User::new(
            "Ann".to_string(),
            "ann@example.com".to_string(),
            "$argon2id$fake".to_string(),
        );
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert!(json.get("email").is_some());
    }

    #[test]
    fn test_place_owner_comes_from_caller() {
        let owner = Uuid::new_v4();
        let place = Place::new(
            owner,
            PlaceDetails {
                title: "Loft".into(),
                address: "1 Main St".into(),
                photos: vec![],
                description: String::new(),
                perks: vec![],
                extra_info: String::new(),
                check_in: 14,
                check_out: 11,
                max_guests: 2,
                price: 90,
            },
        );
        assert_eq!(place.owner_id, owner);
    }
}
