//! Pure projections over data a view already holds
//!
//! Nothing here touches the network or mutates its inputs.

pub mod availability;
pub mod filter;

pub use availability::{
    TABLE_COUNT, TableSlot, TableState, occupied_tables, pool_exhausted, table_pool, table_slots,
};
pub use filter::{ColumnFilters, RestaurantField, filter_restaurants};
