//! Dashboard view model
//!
//! Everything the dashboard screen and the `dashboard` command show, built
//! from the session. Creators see earnings and client columns; clients see
//! their own bookings.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::data::{mock_bookings, mock_earnings, BookingRecord, MonthlyEarning};
use crate::session::SessionData;
use crate::types::BookingStatus;

/// A headline number on the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatCard {
    pub label: &'static str,
    pub value: String,
}

impl StatCard {
    fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub welcome_name: String,
    pub is_creator: bool,
    pub stats: Vec<StatCard>,
    pub bookings_title: &'static str,
    pub bookings: Vec<BookingRecord>,
    /// Empty for non-creators
    pub earnings: Vec<MonthlyEarning>,
}

impl DashboardSummary {
    pub fn build(session: &SessionData) -> Self {
        let is_creator = session.is_creator();
        let bookings = mock_bookings();

        let (stats, bookings_title, earnings) = if is_creator {
            (
                vec![
                    StatCard::new("Total Earnings", "$3,200"),
                    StatCard::new("Total Clients", "24"),
                    StatCard::new("Active Conversations", "8"),
                ],
                "Recent Bookings",
                mock_earnings(),
            )
        } else {
            (
                vec![
                    StatCard::new("Booked Services", "5"),
                    StatCard::new("Upcoming Sessions", "2"),
                    StatCard::new("Messages", "3"),
                ],
                "Your Bookings",
                Vec::new(),
            )
        };

        Self {
            welcome_name: session.display_name().to_string(),
            is_creator,
            stats,
            bookings_title,
            bookings,
            earnings,
        }
    }

    pub fn count_with_status(&self, status: BookingStatus) -> usize {
        self.bookings.iter().filter(|b| b.status == status).count()
    }

    /// Bookings table title with the number still to come, e.g. `Your Bookings (1 upcoming)`.
    pub fn bookings_heading(&self) -> String {
        format!(
            "{} ({} upcoming)",
            self.bookings_title,
            self.count_with_status(BookingStatus::Upcoming)
        )
    }

    /// Sum of the earnings series.
    pub fn total_earnings(&self) -> Decimal {
        self.earnings.iter().map(|e| e.amount).sum()
    }

    /// Largest monthly amount, used to scale the bar chart.
    pub fn peak_earning(&self) -> Decimal {
        self.earnings
            .iter()
            .map(|e| e.amount)
            .max()
            .unwrap_or(Decimal::ZERO)
    }
}
