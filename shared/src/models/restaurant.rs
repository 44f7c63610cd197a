//! Restaurant Model

use serde::{Deserialize, Serialize};

/// Restaurant entity
///
/// Text fields are optional on the wire: older rows may lack any of them and
/// the console must still list them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Shown wherever a restaurant has no usable name
pub const UNKNOWN_RESTAURANT: &str = "Unknown restaurant";

impl Restaurant {
    /// The name, or [`UNKNOWN_RESTAURANT`] when missing or empty
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(UNKNOWN_RESTAURANT)
    }

    /// Label used in pickers: `name (city)`, or just the name without a city
    pub fn label(&self) -> String {
        let name = self.display_name();
        match self.city.as_deref() {
            Some(city) if !city.is_empty() => format!("{} ({})", name, city),
            _ => name.to_string(),
        }
    }
}

/// Create restaurant payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestaurantCreate {
    pub name: String,
    pub description: String,
    pub address: String,
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Update restaurant payload
///
/// Absent fields are left untouched by the service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestaurantUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}
