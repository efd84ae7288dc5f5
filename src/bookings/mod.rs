//! Bookings made against places, attributed to the booking user.

pub mod handlers;
