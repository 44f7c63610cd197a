//! Reservation booking view
//!
//! Loads reservations and restaurants together, offers a booking form
//! (restaurant, date, table) whose table picker is driven by the
//! availability engine, and lists existing reservations with delete.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use mesa_client::{ClientResult, MesaApi};
use shared::{Reservation, ReservationCreate, Restaurant};
pub use shared::UNKNOWN_RESTAURANT;
use thiserror::Error;

use super::{ConfirmState, LOAD_FAILED, REQUEST_FAILED, banner_text};
use crate::engine::{TableSlot, occupied_tables, pool_exhausted, table_pool, table_slots};

/// Wire date format
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Rejected form input; the form keeps its previous value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("The date cannot be in the past")]
    DateInPast,

    #[error("Table {0} is already booked")]
    TableOccupied(i64),

    #[error("There is no table {0}")]
    TableOutOfRange(i64),

    #[error("Choose a restaurant and a date first")]
    PickerClosed,
}

/// Booking form fields, each unset until chosen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingForm {
    pub restaurant_id: Option<i64>,
    pub date: Option<String>,
    pub table_number: Option<i64>,
}

impl BookingForm {
    pub fn is_complete(&self) -> bool {
        self.restaurant_id.is_some() && self.date.is_some() && self.table_number.is_some()
    }

    pub fn to_create(&self) -> Option<ReservationCreate> {
        Some(ReservationCreate {
            restaurant_id: self.restaurant_id?,
            date: self.date.clone()?,
            table_number: self.table_number?,
        })
    }
}

/// Which mutation a reservation re-fetch follows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshReason {
    Created,
    Deleted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReservationCommand {
    /// Fetch reservations and restaurants concurrently
    Load,
    Create(ReservationCreate),
    Refresh(RefreshReason),
    Delete(i64),
}

impl ReservationCommand {
    pub async fn execute(self, api: &dyn MesaApi) -> ReservationEvent {
        match self {
            Self::Load => {
                let (reservations, restaurants) =
                    tokio::join!(api.list_reservations(), api.list_restaurants(None));
                ReservationEvent::Loaded {
                    reservations,
                    restaurants,
                }
            }
            Self::Create(data) => ReservationEvent::Created(api.create_reservation(&data).await),
            Self::Refresh(reason) => {
                ReservationEvent::Refreshed(reason, api.list_reservations().await)
            }
            Self::Delete(id) => ReservationEvent::Deleted(api.delete_reservation(id).await),
        }
    }
}

#[derive(Debug)]
pub enum ReservationEvent {
    Loaded {
        reservations: ClientResult<Vec<Reservation>>,
        restaurants: ClientResult<Vec<Restaurant>>,
    },
    Created(ClientResult<Reservation>),
    Refreshed(RefreshReason, ClientResult<Vec<Reservation>>),
    Deleted(ClientResult<()>),
}

/// A listed reservation joined with its restaurant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationCard {
    pub id: i64,
    pub restaurant_name: String,
    pub city: Option<String>,
    pub address: Option<String>,
    pub date: String,
    pub table_number: i64,
}

impl ReservationCard {
    pub fn new(reservation: &Reservation, restaurant: Option<&Restaurant>) -> Self {
        let non_empty = |v: Option<&String>| v.filter(|s| !s.is_empty()).cloned();
        let restaurant_name = restaurant
            .map_or(UNKNOWN_RESTAURANT, Restaurant::display_name)
            .to_string();
        Self {
            id: reservation.id,
            restaurant_name,
            city: restaurant.and_then(|r| non_empty(r.city.as_ref())),
            address: restaurant.and_then(|r| non_empty(r.address.as_ref())),
            date: long_date(&reservation.date),
            table_number: reservation.table_number,
        }
    }
}

/// `2025-06-01` → `1 June 2025`; unparseable dates are shown as-is
pub fn long_date(raw: &str) -> String {
    match NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        Ok(date) => date.format("%-d %B %Y").to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Reservation booking state
#[derive(Debug, Default)]
pub struct ReservationsView {
    reservations: Vec<Reservation>,
    restaurants: Vec<Restaurant>,
    loading: bool,
    form: BookingForm,
    submitting: bool,
    confirm: ConfirmState,
    banner: Option<String>,
}

impl ReservationsView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the initial load
    pub fn mount(&mut self) -> ReservationCommand {
        self.loading = true;
        ReservationCommand::Load
    }

    /// Fetch reservations and restaurants again, keeping the form as typed
    pub fn reload(&mut self) -> ReservationCommand {
        self.banner = None;
        self.mount()
    }

    // ========== Accessors ==========

    pub fn reservations(&self) -> &[Reservation] {
        &self.reservations
    }

    pub fn restaurants(&self) -> &[Restaurant] {
        &self.restaurants
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn form(&self) -> &BookingForm {
        &self.form
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn confirm(&self) -> ConfirmState {
        self.confirm
    }

    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    /// Label of the submit control
    pub fn submit_label(&self) -> &'static str {
        if self.submitting { "Booking…" } else { "Book" }
    }

    // ========== Form ==========

    pub fn select_restaurant(&mut self, id: Option<i64>) {
        if self.form.restaurant_id != id {
            self.form.restaurant_id = id;
            self.form.table_number = None;
        }
    }

    /// Parse and set the booking date. Empty input unsets it.
    pub fn set_date(&mut self, raw: &str, today: NaiveDate) -> Result<(), FormError> {
        let raw = raw.trim();
        let date = if raw.is_empty() {
            None
        } else {
            let parsed = NaiveDate::parse_from_str(raw, DATE_FORMAT)
                .ok()
                .filter(|_| raw.len() == 10)
                .ok_or_else(|| FormError::InvalidDate(raw.to_string()))?;
            if parsed < today {
                return Err(FormError::DateInPast);
            }
            Some(parsed.format(DATE_FORMAT).to_string())
        };
        if self.form.date != date {
            self.form.date = date;
            self.form.table_number = None;
        }
        Ok(())
    }

    /// Tables already booked for the chosen restaurant and date
    pub fn occupied(&self) -> BTreeSet<i64> {
        match (self.form.restaurant_id, self.form.date.as_deref()) {
            (Some(id), Some(date)) => occupied_tables(&self.reservations, id, date),
            _ => BTreeSet::new(),
        }
    }

    /// Picker slots, offered once restaurant and date are both chosen
    pub fn table_picker(&self) -> Option<Vec<TableSlot>> {
        if self.form.restaurant_id.is_none() || self.form.date.is_none() {
            return None;
        }
        Some(table_slots(&self.occupied(), self.form.table_number))
    }

    pub fn select_table(&mut self, number: i64) -> Result<(), FormError> {
        if self.table_picker().is_none() {
            return Err(FormError::PickerClosed);
        }
        if !table_pool().contains(&number) {
            return Err(FormError::TableOutOfRange(number));
        }
        if self.occupied().contains(&number) {
            return Err(FormError::TableOccupied(number));
        }
        self.form.table_number = Some(number);
        Ok(())
    }

    /// Every table is booked for the chosen restaurant and date
    pub fn no_tables_available(&self) -> bool {
        self.table_picker().is_some() && pool_exhausted(&self.occupied())
    }

    pub fn can_submit(&self) -> bool {
        self.form.is_complete() && !self.no_tables_available() && !self.submitting
    }

    pub fn submit(&mut self) -> Option<ReservationCommand> {
        if !self.can_submit() {
            return None;
        }
        let payload = self.form.to_create()?;
        self.banner = None;
        self.submitting = true;
        Some(ReservationCommand::Create(payload))
    }

    // ========== Listing & deleting ==========

    pub fn cards(&self) -> Vec<ReservationCard> {
        self.reservations
            .iter()
            .map(|r| {
                let restaurant = self.restaurants.iter().find(|x| x.id == r.restaurant_id);
                ReservationCard::new(r, restaurant)
            })
            .collect()
    }

    pub fn request_delete(&mut self, id: i64) {
        self.confirm = ConfirmState::ConfirmingDelete(id);
    }

    pub fn cancel_delete(&mut self) {
        self.confirm = ConfirmState::Closed;
    }

    /// Issue the delete; the dialog closes whatever the outcome
    pub fn confirm_delete(&mut self) -> Option<ReservationCommand> {
        let id = self.confirm.take()?;
        self.banner = None;
        Some(ReservationCommand::Delete(id))
    }

    pub fn dismiss_banner(&mut self) {
        self.banner = None;
    }

    fn replace_reservations(&mut self, reservations: Vec<Reservation>) {
        self.reservations = reservations;
        // the picker is recomputed against the new list
        self.form.table_number = None;
    }

    // ========== Results ==========

    pub fn handle(&mut self, event: ReservationEvent) -> Option<ReservationCommand> {
        match event {
            ReservationEvent::Loaded {
                reservations,
                restaurants,
            } => {
                self.loading = false;
                match (reservations, restaurants) {
                    (Ok(reservations), Ok(restaurants)) => {
                        tracing::debug!(
                            reservations = reservations.len(),
                            restaurants = restaurants.len(),
                            "booking data loaded"
                        );
                        self.restaurants = restaurants;
                        self.replace_reservations(reservations);
                    }
                    (Err(e), _) | (_, Err(e)) => {
                        self.banner = Some(banner_text(&e, LOAD_FAILED));
                    }
                }
                None
            }
            ReservationEvent::Created(result) => match result {
                Ok(created) => {
                    tracing::info!(
                        id = created.id,
                        restaurant_id = created.restaurant_id,
                        table = created.table_number,
                        "reservation created"
                    );
                    Some(ReservationCommand::Refresh(RefreshReason::Created))
                }
                Err(e) => {
                    self.submitting = false;
                    self.banner = Some(banner_text(&e, REQUEST_FAILED));
                    None
                }
            },
            ReservationEvent::Refreshed(reason, result) => {
                if reason == RefreshReason::Created {
                    self.submitting = false;
                }
                match result {
                    Ok(reservations) => {
                        self.replace_reservations(reservations);
                        if reason == RefreshReason::Created {
                            self.form = BookingForm::default();
                        }
                    }
                    Err(e) => self.banner = Some(banner_text(&e, REQUEST_FAILED)),
                }
                None
            }
            ReservationEvent::Deleted(result) => match result {
                Ok(()) => {
                    tracing::info!("reservation deleted");
                    Some(ReservationCommand::Refresh(RefreshReason::Deleted))
                }
                Err(e) => {
                    self.banner = Some(banner_text(&e, REQUEST_FAILED));
                    None
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesa_client::ClientError;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 20).unwrap()
    }

    fn reservation(id: i64, restaurant_id: i64, date: &str, table_number: i64) -> Reservation {
        Reservation {
            id,
            restaurant_id,
            date: date.into(),
            table_number,
        }
    }

    fn restaurant(id: i64, name: &str, city: &str) -> Restaurant {
        Restaurant {
            id,
            name: Some(name.into()),
            description: None,
            address: Some("Calle 1".into()),
            city: Some(city.into()),
            image_url: None,
        }
    }

    fn loaded(reservations: Vec<Reservation>) -> ReservationsView {
        let mut view = ReservationsView::new();
        assert_eq!(view.mount(), ReservationCommand::Load);
        view.handle(ReservationEvent::Loaded {
            reservations: Ok(reservations),
            restaurants: Ok(vec![restaurant(2, "Central", "Lima")]),
        });
        view
    }

    fn filled(view: &mut ReservationsView, table: i64) {
        view.select_restaurant(Some(2));
        view.set_date("2025-06-01", today()).unwrap();
        view.select_table(table).unwrap();
    }

    #[test]
    fn test_load_failure_sets_banner_and_keeps_empty() {
        let mut view = ReservationsView::new();
        view.mount();
        view.handle(ReservationEvent::Loaded {
            reservations: Ok(vec![reservation(1, 2, "2025-06-01", 5)]),
            restaurants: Err(ClientError::InvalidResponse("x".into())),
        });
        assert!(!view.is_loading());
        assert!(view.reservations().is_empty());
        assert_eq!(view.banner(), Some(LOAD_FAILED));
    }

    #[test]
    fn test_reload_after_failure_fetches_again() {
        let mut view = ReservationsView::new();
        view.mount();
        view.handle(ReservationEvent::Loaded {
            reservations: Err(ClientError::InvalidResponse("x".into())),
            restaurants: Ok(vec![]),
        });
        assert_eq!(view.banner(), Some(LOAD_FAILED));

        assert_eq!(view.reload(), ReservationCommand::Load);
        assert!(view.is_loading());
        assert!(view.banner().is_none());

        view.handle(ReservationEvent::Loaded {
            reservations: Ok(vec![reservation(1, 2, "2025-06-01", 5)]),
            restaurants: Ok(vec![restaurant(2, "Central", "Lima")]),
        });
        assert!(!view.is_loading());
        assert_eq!(view.cards().len(), 1);
        assert!(view.banner().is_none());
    }

    #[test]
    fn test_picker_hidden_until_restaurant_and_date() {
        let mut view = loaded(vec![]);
        assert!(view.table_picker().is_none());
        view.select_restaurant(Some(2));
        assert!(view.table_picker().is_none());
        assert_eq!(view.select_table(3), Err(FormError::PickerClosed));
        view.set_date("2025-06-01", today()).unwrap();
        assert_eq!(view.table_picker().map(|s| s.len()), Some(15));
    }

    #[test]
    fn test_occupied_scenario() {
        let mut view = loaded(vec![reservation(1, 2, "2025-06-01", 5)]);
        view.select_restaurant(Some(2));
        view.set_date("2025-06-01", today()).unwrap();
        assert_eq!(view.occupied(), BTreeSet::from([5]));
        assert_eq!(view.select_table(5), Err(FormError::TableOccupied(5)));
        assert_eq!(view.select_table(16), Err(FormError::TableOutOfRange(16)));
        assert!(view.select_table(6).is_ok());
    }

    #[test]
    fn test_changing_restaurant_or_date_clears_table() {
        let mut view = loaded(vec![]);
        filled(&mut view, 3);
        view.select_restaurant(Some(2));
        assert_eq!(view.form().table_number, Some(3));

        view.select_restaurant(Some(4));
        assert_eq!(view.form().table_number, None);

        view.select_restaurant(Some(2));
        view.select_table(3).unwrap();
        view.set_date("2025-06-02", today()).unwrap();
        assert_eq!(view.form().table_number, None);
    }

    #[test]
    fn test_date_validation() {
        let mut view = loaded(vec![]);
        assert_eq!(
            view.set_date("01/06/2025", today()),
            Err(FormError::InvalidDate("01/06/2025".into()))
        );
        assert_eq!(view.set_date("2025-05-19", today()), Err(FormError::DateInPast));
        assert!(view.form().date.is_none());

        view.set_date("2025-05-20", today()).unwrap();
        assert_eq!(view.form().date.as_deref(), Some("2025-05-20"));

        view.set_date("", today()).unwrap();
        assert!(view.form().date.is_none());
    }

    #[test]
    fn test_submit_requires_complete_form() {
        let mut view = loaded(vec![]);
        view.select_restaurant(Some(2));
        view.set_date("2025-06-01", today()).unwrap();
        assert!(!view.can_submit());
        assert!(view.submit().is_none());

        view.select_table(1).unwrap();
        let cmd = view.submit().unwrap();
        assert_eq!(
            cmd,
            ReservationCommand::Create(ReservationCreate {
                restaurant_id: 2,
                date: "2025-06-01".into(),
                table_number: 1,
            })
        );
        assert!(view.is_submitting());
        assert_eq!(view.submit_label(), "Booking…");
        assert!(view.submit().is_none());
    }

    #[test]
    fn test_in_band_rejection_keeps_form_and_list() {
        let existing = vec![reservation(1, 2, "2025-06-01", 5)];
        let mut view = loaded(existing.clone());
        filled(&mut view, 6);
        view.submit().unwrap();

        let out = view.handle(ReservationEvent::Created(Err(ClientError::Rejected {
            message: "Mesa ya reservada".into(),
        })));
        assert!(out.is_none());
        assert_eq!(view.banner(), Some("Mesa ya reservada"));
        assert_eq!(view.reservations(), existing.as_slice());
        assert_eq!(view.form().table_number, Some(6));
        assert!(!view.is_submitting());
    }

    #[test]
    fn test_successful_create_refreshes_then_resets() {
        let mut view = loaded(vec![]);
        filled(&mut view, 6);
        view.submit().unwrap();

        let next = view.handle(ReservationEvent::Created(Ok(reservation(
            9,
            2,
            "2025-06-01",
            6,
        ))));
        assert_eq!(next, Some(ReservationCommand::Refresh(RefreshReason::Created)));
        assert!(view.is_submitting());

        view.handle(ReservationEvent::Refreshed(
            RefreshReason::Created,
            Ok(vec![reservation(9, 2, "2025-06-01", 6)]),
        ));
        assert!(!view.is_submitting());
        assert_eq!(view.form(), &BookingForm::default());
        assert_eq!(view.reservations().len(), 1);
    }

    #[test]
    fn test_full_pool_blocks_submission() {
        let reservations = table_pool()
            .map(|n| reservation(n, 2, "2025-06-01", n))
            .collect();
        let mut view = loaded(reservations);
        view.select_restaurant(Some(2));
        view.set_date("2025-06-01", today()).unwrap();
        assert!(view.no_tables_available());
        assert!(!view.can_submit());
        assert!(view.table_picker().unwrap().iter().all(|s| !s.is_selectable()));
    }

    #[test]
    fn test_delete_closes_dialog_even_on_failure() {
        let mut view = loaded(vec![reservation(1, 2, "2025-06-01", 5)]);
        view.request_delete(1);
        assert_eq!(view.confirm(), ConfirmState::ConfirmingDelete(1));

        assert_eq!(view.confirm_delete(), Some(ReservationCommand::Delete(1)));
        assert!(!view.confirm().is_open());

        let out = view.handle(ReservationEvent::Deleted(Err(ClientError::Rejected {
            message: "Reserva no encontrada".into(),
        })));
        assert!(out.is_none());
        assert_eq!(view.banner(), Some("Reserva no encontrada"));
        assert_eq!(view.reservations().len(), 1);
    }

    #[test]
    fn test_delete_success_refreshes() {
        let mut view = loaded(vec![reservation(1, 2, "2025-06-01", 5)]);
        view.request_delete(1);
        view.confirm_delete();
        let next = view.handle(ReservationEvent::Deleted(Ok(())));
        assert_eq!(next, Some(ReservationCommand::Refresh(RefreshReason::Deleted)));

        view.handle(ReservationEvent::Refreshed(RefreshReason::Deleted, Ok(vec![])));
        assert!(view.cards().is_empty());
    }

    #[test]
    fn test_cancel_delete() {
        let mut view = loaded(vec![]);
        view.request_delete(4);
        view.cancel_delete();
        assert!(view.confirm_delete().is_none());
    }

    #[test]
    fn test_cards_join_restaurant() {
        let view = loaded(vec![
            reservation(1, 2, "2025-06-01", 5),
            reservation(2, 77, "not-a-date", 1),
        ]);
        let cards = view.cards();
        assert_eq!(cards[0].restaurant_name, "Central");
        assert_eq!(cards[0].city.as_deref(), Some("Lima"));
        assert_eq!(cards[0].date, "1 June 2025");
        assert_eq!(cards[1].restaurant_name, UNKNOWN_RESTAURANT);
        assert_eq!(cards[1].date, "not-a-date");
        assert!(cards[1].address.is_none());
    }

    #[test]
    fn test_reservation_list_change_clears_table() {
        let mut view = loaded(vec![]);
        filled(&mut view, 4);
        view.handle(ReservationEvent::Refreshed(
            RefreshReason::Deleted,
            Ok(vec![reservation(3, 2, "2025-06-01", 4)]),
        ));
        assert_eq!(view.form().table_number, None);
        assert_eq!(view.occupied(), BTreeSet::from([4]));
    }
}
