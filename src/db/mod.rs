//! Database module for the bookstay server
//!
//! This module handles database connections and the data access
//! layer for users, places, and bookings.

pub mod models;
pub mod operations;

pub use models::{Booking, BookingDetails, Place, PlaceDetails, User};
pub use operations::DbOperations;
