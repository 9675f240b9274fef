//! Service catalog
//!
//! Lookup of bookable services by identifier. The wizard only ever sees the
//! [`ServiceCatalog`] trait, so a networked or database-backed catalog can be
//! dropped in without touching the state machine.

use serde::Serialize;

use crate::types::{CreatorBio, Service};

/// A creator's public page: the profile plus everything they offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatorProfile {
    #[serde(flatten)]
    pub creator: CreatorBio,
    pub services: Vec<Service>,
}

/// Read-only access to bookable services.
pub trait ServiceCatalog: Send + Sync {
    /// Find a service by id.
    ///
    /// `None` is the NotFound signal: the booking attempt must end and the
    /// caller redirects to a fallback listing.
    fn find_service(&self, id: &str) -> Option<Service>;

    /// All services, in catalog order.
    fn services(&self) -> Vec<Service>;

    /// Find a creator by username, ignoring ASCII case.
    fn find_creator(&self, username: &str) -> Option<CreatorBio>;

    /// Services offered by the creator with this display name, in catalog order.
    fn services_by_creator(&self, name: &str) -> Vec<Service> {
        self.services()
            .into_iter()
            .filter(|s| s.creator.name == name)
            .collect()
    }

    /// The creator page for `username`, or `None` for an unknown creator.
    fn creator_profile(&self, username: &str) -> Option<CreatorProfile> {
        let creator = self.find_creator(username)?;
        let services = self.services_by_creator(&creator.name);
        Some(CreatorProfile { creator, services })
    }
}

/// Catalog backed by an in-memory list.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    services: Vec<Service>,
    creators: Vec<CreatorBio>,
}

impl InMemoryCatalog {
    pub fn new(services: Vec<Service>) -> Self {
        Self {
            services,
            creators: Vec::new(),
        }
    }

    pub fn with_creators(mut self, creators: Vec<CreatorBio>) -> Self {
        self.creators = creators;
        self
    }

    /// Catalog holding the built-in reference services and creators.
    pub fn mock() -> Self {
        Self::new(crate::data::mock_services()).with_creators(crate::data::mock_creators())
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

impl ServiceCatalog for InMemoryCatalog {
    fn find_service(&self, id: &str) -> Option<Service> {
        self.services.iter().find(|s| s.id == id).cloned()
    }

    fn services(&self) -> Vec<Service> {
        self.services.clone()
    }

    fn find_creator(&self, username: &str) -> Option<CreatorBio> {
        let username = username.trim();
        self.creators
            .iter()
            .find(|c| c.username.eq_ignore_ascii_case(username))
            .cloned()
    }
}
