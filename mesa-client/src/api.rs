//! Typed operations of the reservation service
//!
//! | Operation | Route |
//! |---|---|
//! | list restaurants | `GET /restaurants?letra=&ciudad=` |
//! | create restaurant | `POST /restaurants` |
//! | update restaurant | `PUT /restaurants/{id}` |
//! | delete restaurant | `DELETE /restaurants/{id}` |
//! | list reservations | `GET /reservations` |
//! | create reservation | `POST /reservations` |
//! | delete reservation | `DELETE /reservations/{id}` |

use async_trait::async_trait;
use shared::{
    Reservation, ReservationCreate, Restaurant, RestaurantCreate, RestaurantFilter,
    RestaurantUpdate,
};

use crate::{ClientResult, HttpClient};

/// Reservation service operations
///
/// Each call performs exactly one request. Implemented over HTTP by
/// [`MesaClient`]; views only see this trait.
#[async_trait]
pub trait MesaApi: Send + Sync {
    /// List restaurants, filtered by the service when a filter is given
    async fn list_restaurants(
        &self,
        filter: Option<&RestaurantFilter>,
    ) -> ClientResult<Vec<Restaurant>>;

    async fn create_restaurant(&self, data: &RestaurantCreate) -> ClientResult<Restaurant>;

    async fn update_restaurant(&self, id: i64, data: &RestaurantUpdate)
    -> ClientResult<Restaurant>;

    async fn delete_restaurant(&self, id: i64) -> ClientResult<()>;

    async fn list_reservations(&self) -> ClientResult<Vec<Reservation>>;

    async fn create_reservation(&self, data: &ReservationCreate) -> ClientResult<Reservation>;

    /// Delete a reservation; an `error` field in a success body is a failure
    async fn delete_reservation(&self, id: i64) -> ClientResult<()>;
}

/// HTTP implementation of [`MesaApi`]
#[derive(Debug, Clone)]
pub struct MesaClient {
    http: HttpClient,
}

impl MesaClient {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }
}

#[async_trait]
impl MesaApi for MesaClient {
    async fn list_restaurants(
        &self,
        filter: Option<&RestaurantFilter>,
    ) -> ClientResult<Vec<Restaurant>> {
        match filter.filter(|f| !f.is_empty()) {
            Some(filter) => self.http.get_with_query("restaurants", filter).await,
            None => self.http.get("restaurants").await,
        }
    }

    async fn create_restaurant(&self, data: &RestaurantCreate) -> ClientResult<Restaurant> {
        self.http.post("restaurants", data).await
    }

    async fn update_restaurant(
        &self,
        id: i64,
        data: &RestaurantUpdate,
    ) -> ClientResult<Restaurant> {
        self.http.put(&format!("restaurants/{}", id), data).await
    }

    async fn delete_restaurant(&self, id: i64) -> ClientResult<()> {
        self.http.delete(&format!("restaurants/{}", id), false).await
    }

    async fn list_reservations(&self) -> ClientResult<Vec<Reservation>> {
        self.http.get("reservations").await
    }

    async fn create_reservation(&self, data: &ReservationCreate) -> ClientResult<Reservation> {
        self.http.post("reservations", data).await
    }

    async fn delete_reservation(&self, id: i64) -> ClientResult<()> {
        self.http.delete(&format!("reservations/{}", id), true).await
    }
}
