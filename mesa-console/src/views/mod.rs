//! View controllers
//!
//! Each view owns its fetched data and form state. User actions are plain
//! method calls that may return a command; commands run against the API and
//! come back as events that the view folds into its state.

pub mod reservations;
pub mod restaurants;

use mesa_client::ClientError;

pub use reservations::{
    BookingForm, FormError, RefreshReason, ReservationCard, ReservationCommand, ReservationEvent,
    ReservationsView,
};
pub use restaurants::{
    EditBuffer, ListMode, RestaurantCommand, RestaurantDraft, RestaurantEvent, RestaurantQuery,
    RestaurantsView,
};

/// Banner text when loading fails without a server message
pub const LOAD_FAILED: &str = "Could not load data. Please try again later.";

/// Banner text when a request fails without a server message
pub const REQUEST_FAILED: &str = "Network or server error.";

/// Delete confirmation dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfirmState {
    #[default]
    Closed,
    ConfirmingDelete(i64),
}

impl ConfirmState {
    pub fn target(&self) -> Option<i64> {
        match self {
            Self::Closed => None,
            Self::ConfirmingDelete(id) => Some(*id),
        }
    }

    pub fn is_open(&self) -> bool {
        self.target().is_some()
    }

    /// Close the dialog, yielding the id it was confirming
    pub fn take(&mut self) -> Option<i64> {
        std::mem::take(self).target()
    }
}

/// Banner text for a failed call
pub(crate) fn banner_text(err: &ClientError, fallback: &str) -> String {
    tracing::warn!(error = %err, "request failed");
    err.user_message(fallback)
}
