//! Mesa console
//!
//! Terminal administration for a restaurant reservation service:
//!
//! - `engine`: pure projections (column filter, table availability)
//! - `views`: per-view state machines that turn user actions into API commands
//! - `shell`: ratatui front end, key routing and the async command loop

pub mod config;
pub mod engine;
pub mod logging;
pub mod shell;
pub mod views;

pub use config::{Args, ConsoleConfig};
