//! Reservation Model

use serde::{Deserialize, Serialize};

/// Reservation entity: one numbered table at one restaurant for one date
///
/// `date` is kept as the literal `YYYY-MM-DD` string the service returned;
/// availability checks compare it verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: i64,
    pub restaurant_id: i64,
    pub date: String,
    pub table_number: i64,
}

/// Create reservation payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationCreate {
    pub restaurant_id: i64,
    pub date: String,
    pub table_number: i64,
}
