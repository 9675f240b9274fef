//! Marketplace reference data and data files
//!
//! The built-in mock data mirrors what the marketplace front-end ships with.
//! A JSON data file with the same shape can replace it at startup.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::availability::InMemoryAvailability;
use crate::catalog::InMemoryCatalog;
use crate::types::{
    is_valid_time, parse_duration, AvailabilitySlot, BookingStatus, Creator, CreatorBio, Service,
};

const ALEX_AVATAR: &str = "https://images.unsplash.com/photo-1472099645785-5658abf4ff4e?ixlib=rb-1.2.1&auto=format&fit=facearea&facepad=2&w=300&h=300&q=80";

fn alex_smith() -> Creator {
    Creator {
        name: "Alex Smith".to_string(),
        profile_image: ALEX_AVATAR.to_string(),
    }
}

/// Reference services.
pub fn mock_services() -> Vec<Service> {
    vec![
        Service {
            id: "1".to_string(),
            title: "Strategy Consultation".to_string(),
            description: "One-on-one consultation to develop a custom marketing strategy for your business".to_string(),
            duration: "60 min".to_string(),
            price: Decimal::from(120),
            creator: alex_smith(),
        },
        Service {
            id: "2".to_string(),
            title: "SEO Audit & Recommendations".to_string(),
            description: "Comprehensive analysis of your website SEO with actionable recommendations".to_string(),
            duration: "45 min".to_string(),
            price: Decimal::from(95),
            creator: alex_smith(),
        },
        Service {
            id: "3".to_string(),
            title: "Content Calendar Planning".to_string(),
            description: "Create a 3-month content calendar tailored to your business goals".to_string(),
            duration: "90 min".to_string(),
            price: Decimal::from(150),
            creator: alex_smith(),
        },
    ]
}

/// Reference creator profiles.
pub fn mock_creators() -> Vec<CreatorBio> {
    vec![CreatorBio {
        username: "alexsmith".to_string(),
        name: "Alex Smith".to_string(),
        title: "Digital Marketing Consultant".to_string(),
        bio: "Helping businesses grow their online presence with proven marketing strategies. I specialize in SEO, content marketing, and social media management.".to_string(),
        location: "San Francisco, CA".to_string(),
        verified: true,
        rating: Decimal::new(49, 1),
        review_count: 127,
    }]
}

fn june(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 6, day).expect("June 2023 has this day")
}

/// Reference availability, chronological.
pub fn mock_availability() -> Vec<AvailabilitySlot> {
    vec![
        AvailabilitySlot::new(june(20), &["10:00", "12:00", "15:00", "17:00"]),
        AvailabilitySlot::new(june(21), &["09:00", "11:00", "14:00", "16:00"]),
        AvailabilitySlot::new(june(22), &["10:00", "13:00", "16:00", "18:00"]),
    ]
}

/// A booking row on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRecord {
    pub id: u32,
    pub client: String,
    pub service: String,
    pub date: NaiveDate,
    pub time: String,
    pub status: BookingStatus,
}

/// Earnings for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyEarning {
    pub month: String,
    pub amount: Decimal,
}

/// Reference dashboard bookings, most recent first.
pub fn mock_bookings() -> Vec<BookingRecord> {
    let record = |id, client: &str, service: &str, day, time: &str, status| BookingRecord {
        id,
        client: client.to_string(),
        service: service.to_string(),
        date: june(day),
        time: time.to_string(),
        status,
    };
    vec![
        record(1, "Alex Johnson", "Consultation Call", 15, "14:00", BookingStatus::Upcoming),
        record(2, "Sam Taylor", "Private Chat", 14, "10:30", BookingStatus::Completed),
        record(3, "Jordan Smith", "Content Review", 12, "16:00", BookingStatus::Completed),
    ]
}

/// Reference earnings series, January to June.
pub fn mock_earnings() -> Vec<MonthlyEarning> {
    [("Jan", 400), ("Feb", 300), ("Mar", 600), ("Apr", 800), ("May", 500), ("Jun", 900)]
        .into_iter()
        .map(|(month, amount)| MonthlyEarning {
            month: month.to_string(),
            amount: Decimal::from(amount),
        })
        .collect()
}

/// Catalog and availability loaded together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketplaceData {
    pub services: Vec<Service>,
    pub availability: Vec<AvailabilitySlot>,
    #[serde(default)]
    pub creators: Vec<CreatorBio>,
}

impl Default for MarketplaceData {
    fn default() -> Self {
        Self::mock()
    }
}

impl MarketplaceData {
    /// The built-in reference data.
    pub fn mock() -> Self {
        Self {
            services: mock_services(),
            availability: mock_availability(),
            creators: mock_creators(),
        }
    }

    /// Load marketplace data from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read marketplace data from {:?}", path.as_ref()))?;

        let data: Self =
            serde_json::from_str(&content).context("Failed to parse marketplace data JSON")?;

        Ok(data)
    }

    /// Save marketplace data to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize marketplace data to JSON")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write marketplace data to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Validate the data
    pub fn validate(&self) -> Result<()> {
        let mut ids = HashSet::new();
        for service in &self.services {
            if service.id.trim().is_empty() {
                anyhow::bail!("Service '{}' has an empty id", service.title);
            }
            if !ids.insert(service.id.as_str()) {
                anyhow::bail!("Duplicate service id '{}'", service.id);
            }
            if service.title.trim().is_empty() {
                anyhow::bail!("Service '{}' has an empty title", service.id);
            }
            if parse_duration(&service.duration).is_none() {
                anyhow::bail!(
                    "Service '{}' has invalid duration '{}' (expected e.g. \"60 min\")",
                    service.id,
                    service.duration
                );
            }
            if service.price.is_sign_negative() {
                anyhow::bail!("Service '{}' has a negative price", service.id);
            }
        }

        let mut usernames = HashSet::new();
        for creator in &self.creators {
            let username = creator.username.trim().to_ascii_lowercase();
            if username.is_empty() {
                anyhow::bail!("Creator '{}' has an empty username", creator.name);
            }
            if !usernames.insert(username) {
                anyhow::bail!("Duplicate creator username '{}'", creator.username);
            }
            if creator.name.trim().is_empty() {
                anyhow::bail!("Creator '{}' has an empty name", creator.username);
            }
            if creator.rating.is_sign_negative() || creator.rating > Decimal::from(5) {
                anyhow::bail!(
                    "Creator '{}' has rating {} (expected 0 to 5)",
                    creator.username,
                    creator.rating
                );
            }
        }

        let mut dates = HashSet::new();
        for slot in &self.availability {
            if !dates.insert(slot.date) {
                anyhow::bail!("Date {} appears more than once", slot.date);
            }
            for time in &slot.slots {
                if !is_valid_time(time) {
                    anyhow::bail!("Invalid time '{}' on {} (expected HH:MM)", time, slot.date);
                }
            }
            if slot.slots.windows(2).any(|w| w[0] >= w[1]) {
                anyhow::bail!("Times on {} must be ascending and unique", slot.date);
            }
        }

        Ok(())
    }

    /// Split into the catalog and availability sources.
    pub fn into_sources(self) -> Result<(InMemoryCatalog, InMemoryAvailability)> {
        let availability = InMemoryAvailability::new(self.availability)?;
        let catalog = InMemoryCatalog::new(self.services).with_creators(self.creators);
        Ok((catalog, availability))
    }
}
