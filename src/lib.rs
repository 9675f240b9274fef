//! creatorbook library
//!
//! Core of the creator marketplace client: the service catalog, the booking
//! wizard, sessions, simulated payments and the terminal UI built on them.

pub mod app;
pub mod availability;
pub mod booking;
pub mod catalog;
pub mod cli;
pub mod components;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod error;
pub mod notify;
pub mod payment;
pub mod session;
pub mod theme;
pub mod types;
pub mod ui;

// Re-export main types for convenience
pub use app::{App, AppMode, AppState};
pub use availability::{AvailabilityError, AvailabilityTable, InMemoryAvailability};
pub use booking::{
    booking_path, Advance, BookingConfirmation, BookingError, BookingSelection, BookingStep,
    BookingWizard, OpenBookingError, FALLBACK_ROUTE, LOGIN_ROUTE,
};
pub use catalog::{CreatorProfile, InMemoryCatalog, ServiceCatalog};
pub use config::AppConfig;
pub use dashboard::DashboardSummary;
pub use data::MarketplaceData;
pub use error::AppError;
pub use notify::{Notification, NotificationLog, Notifier, NotifyKind, TracingNotifier};
pub use payment::{
    PaymentError, PaymentProcessor, PaymentReceipt, PaymentRequest, SimulatedPayment,
    SubmissionOutcome,
};
pub use session::{
    AuthError, Authenticator, PayoutInfo, PayoutMethod, SessionData, SessionStore,
};
pub use types::{AvailabilitySlot, BookingStatus, Creator, CreatorBio, Service, UserType};
