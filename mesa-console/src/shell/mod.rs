//! Terminal shell
//!
//! Routes keys to the active view, runs the commands views return on the
//! tokio runtime and feeds results back. Holds no business rules.

pub mod app;
pub mod runtime;
pub mod ui;

use mesa_client::MesaApi;

use crate::views::{ReservationCommand, ReservationEvent, RestaurantCommand, RestaurantEvent};

pub use app::{ActiveView, App, BookingFocus, Prompt, PromptTarget, Route};
pub use runtime::run;

/// A request produced by the active view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Restaurants(RestaurantCommand),
    Reservations(ReservationCommand),
}

impl Command {
    pub async fn execute(self, api: &dyn MesaApi) -> ViewEvent {
        match self {
            Self::Restaurants(cmd) => ViewEvent::Restaurants(cmd.execute(api).await),
            Self::Reservations(cmd) => ViewEvent::Reservations(cmd.execute(api).await),
        }
    }
}

impl From<RestaurantCommand> for Command {
    fn from(cmd: RestaurantCommand) -> Self {
        Self::Restaurants(cmd)
    }
}

impl From<ReservationCommand> for Command {
    fn from(cmd: ReservationCommand) -> Self {
        Self::Reservations(cmd)
    }
}

#[derive(Debug)]
pub enum ViewEvent {
    Restaurants(RestaurantEvent),
    Reservations(ReservationEvent),
}

/// A finished command, tagged with the mount generation that issued it
#[derive(Debug)]
pub struct Completed {
    pub generation: u64,
    pub event: ViewEvent,
}
