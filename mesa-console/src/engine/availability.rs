//! Table availability for one restaurant on one date
//!
//! Every restaurant has the same fixed pool of numbered tables. A table is
//! occupied when some reservation matches both the restaurant id and the
//! literal date string.

use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use shared::Reservation;

/// Tables per restaurant
pub const TABLE_COUNT: i64 = 15;

/// The selectable table numbers, `1..=15`
pub fn table_pool() -> RangeInclusive<i64> {
    1..=TABLE_COUNT
}

/// Table numbers already booked for `(restaurant_id, date)`
///
/// Numbers outside the pool are reported as-is.
pub fn occupied_tables(reservations: &[Reservation], restaurant_id: i64, date: &str) -> BTreeSet<i64> {
    reservations
        .iter()
        .filter(|r| r.restaurant_id == restaurant_id && r.date == date)
        .map(|r| r.table_number)
        .collect()
}

/// True when every table of the pool is occupied
pub fn pool_exhausted(occupied: &BTreeSet<i64>) -> bool {
    table_pool().all(|n| occupied.contains(&n))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableState {
    Free,
    Occupied,
    Selected,
}

/// One button of the table picker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSlot {
    pub number: i64,
    pub state: TableState,
}

impl TableSlot {
    pub fn is_selectable(&self) -> bool {
        self.state != TableState::Occupied
    }
}

/// Picker slots for the whole pool. An occupied table never shows as selected.
pub fn table_slots(occupied: &BTreeSet<i64>, selected: Option<i64>) -> Vec<TableSlot> {
    table_pool()
        .map(|number| {
            let state = if occupied.contains(&number) {
                TableState::Occupied
            } else if selected == Some(number) {
                TableState::Selected
            } else {
                TableState::Free
            };
            TableSlot { number, state }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reservation(id: i64, restaurant_id: i64, date: &str, table_number: i64) -> Reservation {
        Reservation {
            id,
            restaurant_id,
            date: date.into(),
            table_number,
        }
    }

    #[test]
    fn test_single_reservation_scenario() {
        let reservations = vec![reservation(1, 2, "2025-06-01", 5)];
        let occupied = occupied_tables(&reservations, 2, "2025-06-01");
        assert_eq!(occupied, BTreeSet::from([5]));

        let slots = table_slots(&occupied, None);
        assert_eq!(slots.len(), 15);
        for slot in slots {
            if slot.number == 5 {
                assert_eq!(slot.state, TableState::Occupied);
                assert!(!slot.is_selectable());
            } else {
                assert_eq!(slot.state, TableState::Free);
            }
        }
    }

    #[test]
    fn test_matches_both_keys_exactly() {
        let reservations = vec![
            reservation(1, 2, "2025-06-01", 5),
            reservation(2, 3, "2025-06-01", 6),
            reservation(3, 2, "2025-06-02", 7),
            reservation(4, 2, "2025-6-1", 8),
            reservation(5, 2, "2025-06-01", 9),
        ];
        let occupied = occupied_tables(&reservations, 2, "2025-06-01");
        assert_eq!(occupied, BTreeSet::from([5, 9]));
    }

    #[test]
    fn test_out_of_range_numbers_are_reported() {
        let reservations = vec![
            reservation(1, 1, "2025-01-01", 0),
            reservation(2, 1, "2025-01-01", 42),
        ];
        let occupied = occupied_tables(&reservations, 1, "2025-01-01");
        assert_eq!(occupied, BTreeSet::from([0, 42]));
        assert!(!pool_exhausted(&occupied));
    }

    #[test]
    fn test_pool_exhausted() {
        let reservations: Vec<_> = table_pool()
            .map(|n| reservation(n, 4, "2025-07-10", n))
            .collect();
        let occupied = occupied_tables(&reservations, 4, "2025-07-10");
        assert!(pool_exhausted(&occupied));
        assert!(table_slots(&occupied, None).iter().all(|s| !s.is_selectable()));
    }

    #[test]
    fn test_duplicates_do_not_exhaust_pool() {
        let reservations: Vec<_> = (0..15).map(|i| reservation(i, 4, "2025-07-10", 1)).collect();
        let occupied = occupied_tables(&reservations, 4, "2025-07-10");
        assert!(!pool_exhausted(&occupied));
    }

    #[test]
    fn test_selected_slot() {
        let occupied = BTreeSet::from([3]);
        let slots = table_slots(&occupied, Some(4));
        assert_eq!(slots[3].state, TableState::Selected);
        assert_eq!(slots[2].state, TableState::Occupied);

        let slots = table_slots(&occupied, Some(3));
        assert_eq!(slots[2].state, TableState::Occupied);
    }
}
