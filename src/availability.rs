//! Availability table
//!
//! Open time slots keyed by calendar day. Like the catalog this is a trait
//! seam; [`InMemoryAvailability`] serves the reference data.

use crate::types::AvailabilitySlot;
use chrono::NaiveDate;
use thiserror::Error;

/// Read-only access to open time slots.
pub trait AvailabilityTable: Send + Sync {
    /// Every date with availability, in chronological (insertion) order.
    fn all_dates(&self) -> Vec<NaiveDate>;

    /// Ordered open times on `date`; empty when the date is unknown.
    fn slots_for_date(&self, date: NaiveDate) -> Vec<String>;

    /// Whether `time` is open on `date`.
    fn has_slot(&self, date: NaiveDate, time: &str) -> bool {
        self.slots_for_date(date).iter().any(|t| t == time)
    }

    /// Whether `date` appears in the table at all.
    fn has_date(&self, date: NaiveDate) -> bool {
        self.all_dates().contains(&date)
    }
}

/// Errors building an availability table
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AvailabilityError {
    #[error("Date {0} appears more than once")]
    DuplicateDate(NaiveDate),
}

/// Availability backed by an in-memory list of slots.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAvailability {
    slots: Vec<AvailabilitySlot>,
}

impl InMemoryAvailability {
    /// Build a table, rejecting duplicate dates.
    pub fn new(slots: Vec<AvailabilitySlot>) -> Result<Self, AvailabilityError> {
        for (i, slot) in slots.iter().enumerate() {
            if slots[..i].iter().any(|s| s.date == slot.date) {
                return Err(AvailabilityError::DuplicateDate(slot.date));
            }
        }
        Ok(Self { slots })
    }

    /// Table holding the built-in reference slots.
    pub fn mock() -> Self {
        Self {
            slots: crate::data::mock_availability(),
        }
    }
}

impl AvailabilityTable for InMemoryAvailability {
    fn all_dates(&self) -> Vec<NaiveDate> {
        self.slots.iter().map(|s| s.date).collect()
    }

    fn slots_for_date(&self, date: NaiveDate) -> Vec<String> {
        self.slots
            .iter()
            .find(|s| s.date == date)
            .map(|s| s.slots.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 6, d).unwrap()
    }

    #[test]
    fn test_all_dates_in_insertion_order() {
        let table = InMemoryAvailability::mock();
        assert_eq!(table.all_dates(), vec![day(20), day(21), day(22)]);
    }

    #[test]
    fn test_slots_for_known_date() {
        let table = InMemoryAvailability::mock();
        assert_eq!(
            table.slots_for_date(day(20)),
            vec!["10:00", "12:00", "15:00", "17:00"]
        );
    }

    #[test]
    fn test_slots_for_unknown_date_is_empty() {
        let table = InMemoryAvailability::mock();
        assert!(table.slots_for_date(day(1)).is_empty());
        assert!(!table.has_date(day(1)));
    }

    #[test]
    fn test_has_slot() {
        let table = InMemoryAvailability::mock();
        assert!(table.has_slot(day(21), "09:00"));
        assert!(!table.has_slot(day(21), "10:00"));
    }

    #[test]
    fn test_duplicate_dates_rejected() {
        let result = InMemoryAvailability::new(vec![
            AvailabilitySlot::new(day(20), &["10:00"]),
            AvailabilitySlot::new(day(20), &["12:00"]),
        ]);
        assert_eq!(result.unwrap_err(), AvailabilityError::DuplicateDate(day(20)));
    }
}
