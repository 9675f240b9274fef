//! Marketplace domain types
//!
//! Plain data shared by the catalog, the availability table, the booking
//! wizard and the dashboard. String-valued enums use strum so they can be
//! parsed from the command line and printed without hand-written tables.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// The creator who owns a service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creator {
    pub name: String,
    /// Avatar URL
    pub profile_image: String,
}

/// Public profile of a creator, keyed by username.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatorBio {
    pub username: String,
    /// Matches [`Creator::name`] on the creator's services.
    pub name: String,
    pub title: String,
    pub bio: String,
    pub location: String,
    pub verified: bool,
    pub rating: Decimal,
    pub review_count: u32,
}

/// A bookable offering. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Fixed-format duration, e.g. `"60 min"`.
    pub duration: String,
    pub price: Decimal,
    pub creator: Creator,
}

impl Service {
    /// Parse the `"<minutes> min"` duration, `None` if malformed.
    pub fn duration_minutes(&self) -> Option<u32> {
        parse_duration(&self.duration)
    }

    /// Price formatted for display, e.g. `$120`.
    pub fn display_price(&self) -> String {
        format!("${}", self.price.normalize())
    }

    /// One-line summary used in listings.
    pub fn display_line(&self) -> String {
        format!(
            "{} - {} ({}, {})",
            self.title,
            self.creator.name,
            self.duration,
            self.display_price()
        )
    }
}

/// Parse a duration string of the form `"45 min"`.
pub fn parse_duration(duration: &str) -> Option<u32> {
    let minutes = duration.strip_suffix(" min")?;
    if minutes.is_empty() || !minutes.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    minutes.parse().ok().filter(|m| *m > 0)
}

/// Check a time string is `HH:MM` on a 24 hour clock.
pub fn is_valid_time(time: &str) -> bool {
    let Some((hours, minutes)) = time.split_once(':') else {
        return false;
    };
    let two_digits = |part: &str| part.len() == 2 && part.bytes().all(|b| b.is_ascii_digit());
    if !two_digits(hours) || !two_digits(minutes) {
        return false;
    }
    matches!(
        (hours.parse::<u8>(), minutes.parse::<u8>()),
        (Ok(h), Ok(m)) if h < 24 && m < 60
    )
}

/// Open time slots on a single calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilitySlot {
    pub date: NaiveDate,
    /// Ordered `HH:MM` times.
    pub slots: Vec<String>,
}

impl AvailabilitySlot {
    pub fn new(date: NaiveDate, slots: &[&str]) -> Self {
        Self {
            date,
            slots: slots.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Account type chosen at signup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum UserType {
    #[default]
    User,
    Creator,
}

/// Status of a booking shown on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
pub enum BookingStatus {
    Upcoming,
    Completed,
}

/// Format a date the way the booking screens show it, e.g. `Tue, Jun 20`.
pub fn short_date(date: NaiveDate) -> String {
    date.format("%a, %b %-d").to_string()
}

/// Format a date in long form, e.g. `Tuesday, June 20`.
pub fn long_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d").to_string()
}
