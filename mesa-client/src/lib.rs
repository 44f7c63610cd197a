//! Mesa Client - HTTP client for the reservation service
//!
//! One typed call per remote operation, no retries and no caching.

pub mod api;
pub mod config;
pub mod error;
pub mod http;

pub use api::{MesaApi, MesaClient};
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;

// Re-export shared types for convenience
pub use shared::{
    Reservation, ReservationCreate, Restaurant, RestaurantCreate, RestaurantFilter,
    RestaurantUpdate,
};
