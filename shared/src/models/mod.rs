//! Data models
//!
//! Owned by the reservation service; the console only ever holds
//! transient copies. All IDs are `i64` as assigned by the service.

pub mod reservation;
pub mod restaurant;

// Re-exports
pub use reservation::*;
pub use restaurant::*;
