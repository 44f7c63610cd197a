//! Request types
//!
//! Query parameters sent to the reservation service.

use serde::{Deserialize, Serialize};

/// Server-side restaurant filter (`GET /restaurants?letra=..&ciudad=..`)
///
/// Both parameters are opaque to the console: their matching semantics
/// belong to the service. Empty values are never sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestaurantFilter {
    /// Single leading character
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letra: Option<String>,
    /// City
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ciudad: Option<String>,
}

impl RestaurantFilter {
    /// Build a filter from raw form input
    ///
    /// The letter is cut to its first character; empty inputs become absent.
    pub fn new(letter: &str, city: &str) -> Self {
        let letra = letter.chars().next().map(String::from);
        let ciudad = (!city.is_empty()).then(|| city.to_string());
        Self { letra, ciudad }
    }

    /// True when no parameter would be sent
    pub fn is_empty(&self) -> bool {
        self.letra.is_none() && self.ciudad.is_none()
    }
}
