//! Shared types for Mesa
//!
//! Wire types exchanged with the reservation service: restaurant and
//! reservation records, their create/update payloads, query parameters and
//! the conventional `{ "error": "..." }` payload.

pub mod models;
pub mod request;
pub mod response;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use models::{
    Reservation, ReservationCreate, Restaurant, RestaurantCreate, RestaurantUpdate,
    UNKNOWN_RESTAURANT,
};
pub use request::RestaurantFilter;
pub use response::{ErrorPayload, in_band_error};
