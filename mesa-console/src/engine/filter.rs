//! Client-side restaurant row filter
//!
//! Each non-empty column filter keeps the rows whose field contains the
//! needle, case-insensitively. Filters combine with AND and the input order
//! is preserved.

use shared::Restaurant;

/// Restaurant column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RestaurantField {
    Name,
    Description,
    Address,
    City,
    ImageUrl,
}

impl RestaurantField {
    /// Columns the client-side filter bar offers
    pub const FILTERABLE: [Self; 4] = [Self::Name, Self::Description, Self::Address, Self::City];

    /// Columns an edit buffer or creation draft holds
    pub const EDITABLE: [Self; 5] = [
        Self::Name,
        Self::Description,
        Self::Address,
        Self::City,
        Self::ImageUrl,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Description => "Description",
            Self::Address => "Address",
            Self::City => "City",
            Self::ImageUrl => "Image URL",
        }
    }

    pub fn is_filterable(self) -> bool {
        !matches!(self, Self::ImageUrl)
    }

    /// Read this column from a row; absent values stay absent
    pub fn get(self, restaurant: &Restaurant) -> Option<&str> {
        match self {
            Self::Name => restaurant.name.as_deref(),
            Self::Description => restaurant.description.as_deref(),
            Self::Address => restaurant.address.as_deref(),
            Self::City => restaurant.city.as_deref(),
            Self::ImageUrl => restaurant.image_url.as_deref(),
        }
    }
}

/// Free-text needles for the four filterable columns
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnFilters {
    pub name: String,
    pub description: String,
    pub address: String,
    pub city: String,
}

impl ColumnFilters {
    pub fn get(&self, field: RestaurantField) -> &str {
        match field {
            RestaurantField::Name => &self.name,
            RestaurantField::Description => &self.description,
            RestaurantField::Address => &self.address,
            RestaurantField::City => &self.city,
            RestaurantField::ImageUrl => "",
        }
    }

    /// Set a column needle. The image column has no filter and is ignored.
    pub fn set(&mut self, field: RestaurantField, value: impl Into<String>) {
        let slot = match field {
            RestaurantField::Name => &mut self.name,
            RestaurantField::Description => &mut self.description,
            RestaurantField::Address => &mut self.address,
            RestaurantField::City => &mut self.city,
            RestaurantField::ImageUrl => return,
        };
        *slot = value.into();
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        RestaurantField::FILTERABLE
            .iter()
            .all(|f| self.get(*f).is_empty())
    }

    /// True when `restaurant` passes every non-empty needle
    pub fn matches(&self, restaurant: &Restaurant) -> bool {
        RestaurantField::FILTERABLE.iter().all(|field| {
            let needle = self.get(*field);
            if needle.is_empty() {
                return true;
            }
            field
                .get(restaurant)
                .is_some_and(|value| value.to_lowercase().contains(&needle.to_lowercase()))
        })
    }
}

/// Rows of `rows` that pass `filters`, in their original order
pub fn filter_restaurants<'a>(rows: &'a [Restaurant], filters: &ColumnFilters) -> Vec<&'a Restaurant> {
    rows.iter().filter(|row| filters.matches(row)).collect()
}
