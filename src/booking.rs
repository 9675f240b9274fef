//! Booking Wizard State Machine
//!
//! Owns a single booking attempt for one service, from picking a slot to the
//! confirmed booking. Every transition is validated here; the UI only
//! forwards user events and renders the result.
//!
//! # Step Flow
//!
//! ```text
//! SelectDateTime  --advance (date + time set)-->  Payment
//!       ^                                           |
//!       +------------------- back ------------------+
//!                                                   |
//!                      advance (age verified) -> submission in flight
//!                                                   |
//!                          complete_submission(Ok)  v
//!                                             Confirmation (terminal)
//! ```
//!
//! A failed submission leaves the wizard on `Payment` with nothing in flight,
//! so the user can retry by advancing again. There is no automatic retry.
//!
//! # Invariants
//!
//! - A time is only ever selected together with a date; changing the date
//!   clears the time.
//! - At most one payment submission is in flight per wizard.
//! - Nothing leaves `Confirmation`.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

use crate::availability::AvailabilityTable;
use crate::catalog::ServiceCatalog;
use crate::notify::Notifier;
use crate::payment::{PaymentError, PaymentRequest, SubmissionOutcome};
use crate::session::Authenticator;
use crate::types::{long_date, Service};

/// Where an unauthenticated user is sent.
pub const LOGIN_ROUTE: &str = "/login";

/// Where the user lands when a booking cannot be opened.
pub const FALLBACK_ROUTE: &str = "/dashboard";

/// Route that opens the wizard for `service_id`.
pub fn booking_path(service_id: &str) -> String {
    format!("/book/{}", service_id)
}

/// Inverse of [`booking_path`].
pub fn service_id_from_path(path: &str) -> Option<&str> {
    path.strip_prefix("/book/").filter(|id| !id.is_empty())
}

/// Wizard steps in order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum BookingStep {
    /// Choose a date, then one of its open times
    #[default]
    SelectDateTime = 0,
    /// Review the total and confirm age, then submit payment
    Payment = 1,
    /// Booking done (terminal)
    Confirmation = 2,
}

impl BookingStep {
    /// Total number of steps.
    pub const TOTAL_STEPS: usize = 3;

    #[inline]
    pub const fn order(self) -> u8 {
        self as u8
    }

    #[inline]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Confirmation)
    }

    pub const fn next(self) -> Option<Self> {
        match self {
            Self::SelectDateTime => Some(Self::Payment),
            Self::Payment => Some(Self::Confirmation),
            Self::Confirmation => None,
        }
    }

    /// Previous step, `None` from the first step and from the terminal step.
    pub const fn previous(self) -> Option<Self> {
        match self {
            Self::Payment => Some(Self::SelectDateTime),
            Self::SelectDateTime | Self::Confirmation => None,
        }
    }

    pub const fn can_go_back(self) -> bool {
        self.previous().is_some()
    }

    /// Heading shown above the step content.
    pub const fn title(self) -> &'static str {
        match self {
            Self::SelectDateTime => "Select Date & Time",
            Self::Payment => "Payment Details",
            Self::Confirmation => "Booking Confirmed!",
        }
    }

    /// Short label for the progress indicator.
    pub const fn label(self) -> &'static str {
        match self {
            Self::SelectDateTime => "Schedule",
            Self::Payment => "Payment",
            Self::Confirmation => "Confirmation",
        }
    }

    /// 1-indexed, for display.
    pub const fn step_number(self) -> usize {
        self as usize + 1
    }

    pub const fn all_steps() -> &'static [Self] {
        &[Self::SelectDateTime, Self::Payment, Self::Confirmation]
    }
}

impl fmt::Display for BookingStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Broad classes of [`BookingError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or invalid user input; recoverable, state unchanged
    Validation,
    /// Event not allowed in the current state; state unchanged
    Transition,
    /// Payment failed; wizard stays on Payment and may be retried
    Submission,
}

/// Rejected wizard events. State is never modified when one is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    #[error("Please select both date and time")]
    MissingDateTime,

    #[error("Please verify your age to continue")]
    AgeNotVerified,

    #[error("No availability on {0}")]
    DateUnavailable(NaiveDate),

    #[error("Select a date before choosing a time")]
    NoDateSelected,

    #[error("{time} is not available on {date}")]
    TimeUnavailable { date: NaiveDate, time: String },

    #[error("Cannot {action} during the {step} step")]
    WrongStep {
        action: &'static str,
        step: BookingStep,
    },

    #[error("Cannot go back from the {0} step")]
    NoPreviousStep(BookingStep),

    #[error("Booking is already confirmed")]
    AlreadyConfirmed,

    #[error("Payment is already being processed")]
    SubmissionInFlight,

    #[error("No payment with submission id {0} is in flight")]
    UnknownSubmission(u64),

    #[error("Payment processing failed: {0}")]
    PaymentFailed(PaymentError),
}

impl BookingError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingDateTime
            | Self::AgeNotVerified
            | Self::DateUnavailable(_)
            | Self::NoDateSelected
            | Self::TimeUnavailable { .. } => ErrorKind::Validation,
            Self::WrongStep { .. }
            | Self::NoPreviousStep(_)
            | Self::AlreadyConfirmed
            | Self::SubmissionInFlight
            | Self::UnknownSubmission(_) => ErrorKind::Transition,
            Self::PaymentFailed(_) => ErrorKind::Submission,
        }
    }
}

/// Reasons a booking attempt cannot start.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OpenBookingError {
    /// Not signed in. `return_to` lets the caller resume after login.
    #[error("Sign in to book this service")]
    AuthenticationRequired { return_to: String },

    /// Unknown service; terminal for this attempt.
    #[error("Service not found")]
    ServiceNotFound { service_id: String },
}

impl OpenBookingError {
    /// Route the caller should navigate to.
    pub fn redirect(&self) -> &'static str {
        match self {
            Self::AuthenticationRequired { .. } => LOGIN_ROUTE,
            Self::ServiceNotFound { .. } => FALLBACK_ROUTE,
        }
    }
}

/// Mutable, session-scoped state of one booking attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingSelection {
    selected_date: Option<NaiveDate>,
    selected_time: Option<String>,
    step: BookingStep,
    age_verified: bool,
    /// Id of the outstanding submission
    in_flight: Option<u64>,
}

impl BookingSelection {
    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    pub fn selected_time(&self) -> Option<&str> {
        self.selected_time.as_deref()
    }

    pub fn step(&self) -> BookingStep {
        self.step
    }

    pub fn is_age_verified(&self) -> bool {
        self.age_verified
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn in_flight(&self) -> Option<u64> {
        self.in_flight
    }

    /// Both halves of the slot are chosen.
    pub fn has_date_and_time(&self) -> bool {
        self.selected_date.is_some() && self.selected_time.is_some()
    }
}

/// What a successful [`BookingWizard::advance`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// Moved to the given step
    Moved(BookingStep),
    /// Payment must be submitted; report the outcome through
    /// [`BookingWizard::complete_submission`].
    Submit(PaymentRequest),
}

/// The confirmed booking, assembled for display. Not persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingConfirmation {
    pub service_id: String,
    pub service_title: String,
    pub creator_name: String,
    pub date: NaiveDate,
    pub time: String,
    pub duration: String,
    pub amount: Decimal,
    pub payment_reference: String,
}

impl BookingConfirmation {
    pub fn summary(&self) -> String {
        format!(
            "Your session with {} has been scheduled for {} at {}.",
            self.creator_name,
            long_date(self.date),
            self.time
        )
    }
}

/// One booking attempt for one service.
pub struct BookingWizard {
    service: Service,
    availability: Arc<dyn AvailabilityTable>,
    notifier: Arc<dyn Notifier>,
    selection: BookingSelection,
    next_submission_id: u64,
    confirmation: Option<BookingConfirmation>,
}

impl fmt::Debug for BookingWizard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BookingWizard")
            .field("service", &self.service.id)
            .field("selection", &self.selection)
            .field("next_submission_id", &self.next_submission_id)
            .field("confirmation", &self.confirmation)
            .finish_non_exhaustive()
    }
}

impl BookingWizard {
    /// Start a wizard for an already resolved service.
    pub fn new(
        service: Service,
        availability: Arc<dyn AvailabilityTable>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        tracing::debug!(service_id = %service.id, "booking wizard created");
        Self {
            service,
            availability,
            notifier,
            selection: BookingSelection::default(),
            next_submission_id: 1,
            confirmation: None,
        }
    }

    /// Open a booking for `service_id`.
    ///
    /// # Errors
    ///
    /// - `AuthenticationRequired` if the user is not signed in; nothing else
    ///   is consulted
    /// - `ServiceNotFound` if the catalog has no such service; an error
    ///   notification is emitted
    pub fn open(
        service_id: &str,
        auth: &dyn Authenticator,
        catalog: &dyn ServiceCatalog,
        availability: Arc<dyn AvailabilityTable>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, OpenBookingError> {
        if !auth.is_authenticated() {
            tracing::info!(service_id, "booking requires sign in");
            return Err(OpenBookingError::AuthenticationRequired {
                return_to: booking_path(service_id),
            });
        }

        match catalog.find_service(service_id) {
            Some(service) => Ok(Self::new(service, availability, notifier)),
            None => {
                tracing::warn!(service_id, "booking requested for unknown service");
                notifier.error("Service not found");
                Err(OpenBookingError::ServiceNotFound {
                    service_id: service_id.to_string(),
                })
            }
        }
    }

    pub fn service(&self) -> &Service {
        &self.service
    }

    pub fn selection(&self) -> &BookingSelection {
        &self.selection
    }

    pub fn step(&self) -> BookingStep {
        self.selection.step
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selection.selected_date
    }

    pub fn selected_time(&self) -> Option<&str> {
        self.selection.selected_time()
    }

    pub fn is_age_verified(&self) -> bool {
        self.selection.age_verified
    }

    pub fn is_submitting(&self) -> bool {
        self.selection.is_submitting()
    }

    pub fn confirmation(&self) -> Option<&BookingConfirmation> {
        self.confirmation.as_ref()
    }

    /// Dates the user can pick from.
    pub fn available_dates(&self) -> Vec<NaiveDate> {
        self.availability.all_dates()
    }

    /// Open times on the selected date; empty until a date is chosen.
    pub fn available_times(&self) -> Vec<String> {
        self.selection
            .selected_date
            .map(|date| self.availability.slots_for_date(date))
            .unwrap_or_default()
    }

    /// Whether the continue button should be enabled.
    pub fn can_advance(&self) -> bool {
        match self.selection.step {
            BookingStep::SelectDateTime => self.selection.has_date_and_time(),
            BookingStep::Payment => !self.selection.is_submitting(),
            BookingStep::Confirmation => false,
        }
    }

    /// Whether the back button should be shown and enabled.
    pub fn can_go_back(&self) -> bool {
        self.selection.step.can_go_back() && !self.selection.is_submitting()
    }

    fn ensure_step(&self, action: &'static str, step: BookingStep) -> Result<(), BookingError> {
        let current = self.selection.step;
        if current.is_terminal() {
            return Err(BookingError::AlreadyConfirmed);
        }
        if current != step {
            return Err(BookingError::WrongStep {
                action,
                step: current,
            });
        }
        Ok(())
    }

    /// Pick a date. Clears any selected time, even when re-picking the same date.
    pub fn select_date(&mut self, date: NaiveDate) -> Result<(), BookingError> {
        self.ensure_step("select a date", BookingStep::SelectDateTime)?;
        if !self.availability.has_date(date) {
            return Err(BookingError::DateUnavailable(date));
        }

        self.selection.selected_date = Some(date);
        self.selection.selected_time = None;
        tracing::debug!(%date, "date selected");
        Ok(())
    }

    /// Pick a time on the selected date.
    pub fn select_time(&mut self, time: &str) -> Result<(), BookingError> {
        self.ensure_step("select a time", BookingStep::SelectDateTime)?;
        let date = self
            .selection
            .selected_date
            .ok_or(BookingError::NoDateSelected)?;
        if !self.availability.has_slot(date, time) {
            return Err(BookingError::TimeUnavailable {
                date,
                time: time.to_string(),
            });
        }

        self.selection.selected_time = Some(time.to_string());
        tracing::debug!(%date, time, "time selected");
        Ok(())
    }

    /// Flip the age confirmation. Returns the new value.
    pub fn toggle_age_verification(&mut self) -> Result<bool, BookingError> {
        self.ensure_step("change age verification", BookingStep::Payment)?;
        if self.selection.is_submitting() {
            return Err(BookingError::SubmissionInFlight);
        }

        self.selection.age_verified = !self.selection.age_verified;
        Ok(self.selection.age_verified)
    }

    /// Go back exactly one step, keeping the date and time.
    ///
    /// # Errors
    ///
    /// - `NoPreviousStep` on the first step (the caller leaves the wizard)
    /// - `AlreadyConfirmed` on the terminal step
    /// - `SubmissionInFlight` while a payment is processing
    pub fn back(&mut self) -> Result<BookingStep, BookingError> {
        let current = self.selection.step;
        if current.is_terminal() {
            return Err(BookingError::AlreadyConfirmed);
        }
        if self.selection.is_submitting() {
            return Err(BookingError::SubmissionInFlight);
        }
        let previous = current
            .previous()
            .ok_or(BookingError::NoPreviousStep(current))?;

        self.selection.step = previous;
        tracing::debug!(from = %current, to = %previous, "booking step back");
        Ok(previous)
    }

    /// The "Continue" / "Confirm Payment" action.
    ///
    /// On `SelectDateTime` this moves to `Payment`. On `Payment` it marks a
    /// submission in flight and returns the request to process; the step
    /// only changes when the outcome arrives.
    ///
    /// # Errors
    ///
    /// - `MissingDateTime` / `AgeNotVerified`, each with an error notification
    /// - `SubmissionInFlight` while a payment is processing (no notification)
    /// - `AlreadyConfirmed` on the terminal step
    pub fn advance(&mut self) -> Result<Advance, BookingError> {
        match self.selection.step {
            BookingStep::SelectDateTime => {
                if !self.selection.has_date_and_time() {
                    let err = BookingError::MissingDateTime;
                    self.notifier.error(&err.to_string());
                    return Err(err);
                }
                self.selection.step = BookingStep::Payment;
                tracing::debug!("booking step advanced to payment");
                Ok(Advance::Moved(BookingStep::Payment))
            }
            BookingStep::Payment => {
                if self.selection.is_submitting() {
                    return Err(BookingError::SubmissionInFlight);
                }
                if !self.selection.age_verified {
                    let err = BookingError::AgeNotVerified;
                    self.notifier.error(&err.to_string());
                    return Err(err);
                }
                let request = self.payment_request()?;
                self.next_submission_id += 1;
                self.selection.in_flight = Some(request.submission_id);
                tracing::info!(
                    submission_id = request.submission_id,
                    service_id = %request.service_id,
                    "payment submitted"
                );
                Ok(Advance::Submit(request))
            }
            BookingStep::Confirmation => Err(BookingError::AlreadyConfirmed),
        }
    }

    fn payment_request(&self) -> Result<PaymentRequest, BookingError> {
        let (Some(date), Some(time)) = (
            self.selection.selected_date,
            self.selection.selected_time.clone(),
        ) else {
            return Err(BookingError::MissingDateTime);
        };
        Ok(PaymentRequest {
            submission_id: self.next_submission_id,
            service_id: self.service.id.clone(),
            date,
            time,
            amount: self.service.price,
        })
    }

    /// Deliver the outcome of the in-flight submission.
    ///
    /// # Errors
    ///
    /// - `UnknownSubmission` if the id does not match the in-flight one
    ///   (stale or abandoned); state unchanged
    /// - `PaymentFailed` if the payment failed; the wizard stays on
    ///   `Payment` with nothing in flight and an error notification is emitted
    pub fn complete_submission(
        &mut self,
        outcome: SubmissionOutcome,
    ) -> Result<&BookingConfirmation, BookingError> {
        if self.selection.in_flight != Some(outcome.submission_id) {
            tracing::debug!(
                submission_id = outcome.submission_id,
                "ignoring outcome for unknown submission"
            );
            return Err(BookingError::UnknownSubmission(outcome.submission_id));
        }
        self.selection.in_flight = None;

        match outcome.result {
            Ok(receipt) => {
                let (Some(date), Some(time)) = (
                    self.selection.selected_date,
                    self.selection.selected_time.clone(),
                ) else {
                    return Err(BookingError::MissingDateTime);
                };
                self.selection.step = BookingStep::Confirmation;
                tracing::info!(
                    service_id = %self.service.id,
                    %date,
                    time = %time,
                    reference = %receipt.reference,
                    "booking confirmed"
                );
                self.notifier.success("Booking confirmed!");
                Ok(&*self.confirmation.insert(BookingConfirmation {
                    service_id: self.service.id.clone(),
                    service_title: self.service.title.clone(),
                    creator_name: self.service.creator.name.clone(),
                    date,
                    time,
                    duration: self.service.duration.clone(),
                    amount: self.service.price,
                    payment_reference: receipt.reference,
                }))
            }
            Err(e) => {
                let err = BookingError::PaymentFailed(e);
                tracing::warn!(error = %err, "payment failed");
                self.notifier.error(&err.to_string());
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::availability::InMemoryAvailability;
    use crate::catalog::InMemoryCatalog;
    use crate::notify::{NotificationLog, NotifyKind};
    use crate::payment::{PaymentReceipt, SubmissionOutcome};

    struct Auth(bool);

    impl Authenticator for Auth {
        fn is_authenticated(&self) -> bool {
            self.0
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 6, d).unwrap()
    }

    fn wizard() -> (BookingWizard, Arc<NotificationLog>) {
        let log = Arc::new(NotificationLog::new());
        let wizard = BookingWizard::open(
            "1",
            &Auth(true),
            &InMemoryCatalog::mock(),
            Arc::new(InMemoryAvailability::mock()),
            log.clone(),
        )
        .unwrap();
        (wizard, log)
    }

    fn at_payment() -> (BookingWizard, Arc<NotificationLog>) {
        let (mut w, log) = wizard();
        w.select_date(day(20)).unwrap();
        w.select_time("12:00").unwrap();
        w.advance().unwrap();
        (w, log)
    }

    fn receipt() -> PaymentReceipt {
        PaymentReceipt {
            reference: "PAY-000001".to_string(),
        }
    }

    #[test]
    fn test_step_order() {
        assert_eq!(BookingStep::SelectDateTime.next(), Some(BookingStep::Payment));
        assert_eq!(BookingStep::Confirmation.next(), None);
        assert_eq!(BookingStep::Payment.previous(), Some(BookingStep::SelectDateTime));
        assert_eq!(BookingStep::Confirmation.previous(), None);
        assert_eq!(BookingStep::SelectDateTime.previous(), None);
        assert!(BookingStep::Confirmation.is_terminal());
        assert_eq!(BookingStep::Payment.step_number(), 2);
        assert_eq!(BookingStep::all_steps().len(), BookingStep::TOTAL_STEPS);
        assert_eq!(BookingStep::default(), BookingStep::SelectDateTime);
    }

    #[test]
    fn test_new_wizard_defaults() {
        let (w, _) = wizard();
        assert_eq!(w.step(), BookingStep::SelectDateTime);
        assert!(w.selected_date().is_none());
        assert!(w.selected_time().is_none());
        assert!(!w.is_age_verified());
        assert!(!w.is_submitting());
        assert!(!w.can_advance());
        assert!(w.available_times().is_empty());
    }

    #[test]
    fn test_select_unknown_date_rejected() {
        let (mut w, _) = wizard();
        assert_eq!(
            w.select_date(day(1)),
            Err(BookingError::DateUnavailable(day(1)))
        );
        assert!(w.selected_date().is_none());
    }

    #[test]
    fn test_unknown_date_keeps_existing_selection() {
        let (mut w, _) = wizard();
        w.select_date(day(20)).unwrap();
        w.select_time("12:00").unwrap();
        let before = w.selection().clone();

        assert_eq!(
            w.select_date(day(1)),
            Err(BookingError::DateUnavailable(day(1)))
        );
        assert_eq!(w.selection(), &before);
        assert_eq!(w.selected_date(), Some(day(20)));
        assert_eq!(w.selected_time(), Some("12:00"));
        assert_eq!(w.step(), BookingStep::SelectDateTime);
    }

    #[test]
    fn test_time_requires_date() {
        let (mut w, _) = wizard();
        assert_eq!(w.select_time("10:00"), Err(BookingError::NoDateSelected));
    }

    #[test]
    fn test_time_must_be_open_on_date() {
        let (mut w, _) = wizard();
        w.select_date(day(21)).unwrap();
        let err = w.select_time("10:00").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(w.selected_time().is_none());
    }

    #[test]
    fn test_changing_date_clears_time() {
        let (mut w, _) = wizard();
        w.select_date(day(20)).unwrap();
        w.select_time("10:00").unwrap();
        w.select_date(day(22)).unwrap();
        assert_eq!(w.selected_date(), Some(day(22)));
        assert!(w.selected_time().is_none());
    }

    #[test]
    fn test_advance_without_selection_notifies() {
        let (mut w, log) = wizard();
        assert_eq!(w.advance(), Err(BookingError::MissingDateTime));
        assert_eq!(w.step(), BookingStep::SelectDateTime);
        let last = log.last().unwrap();
        assert_eq!(last.kind, NotifyKind::Error);
        assert_eq!(last.message, "Please select both date and time");
    }

    #[test]
    fn test_back_from_first_step() {
        let (mut w, _) = wizard();
        assert_eq!(
            w.back(),
            Err(BookingError::NoPreviousStep(BookingStep::SelectDateTime))
        );
    }

    #[test]
    fn test_back_preserves_selection() {
        let (mut w, _) = at_payment();
        assert_eq!(w.back(), Ok(BookingStep::SelectDateTime));
        assert_eq!(w.selected_date(), Some(day(20)));
        assert_eq!(w.selected_time(), Some("12:00"));
    }

    #[test]
    fn test_date_selection_locked_on_payment() {
        let (mut w, _) = at_payment();
        assert!(matches!(
            w.select_date(day(21)),
            Err(BookingError::WrongStep { .. })
        ));
        assert_eq!(w.selected_date(), Some(day(20)));
    }

    #[test]
    fn test_age_toggle_only_on_payment() {
        let (mut w, _) = wizard();
        assert!(w.toggle_age_verification().is_err());
        let (mut w, _) = at_payment();
        assert_eq!(w.toggle_age_verification(), Ok(true));
        assert_eq!(w.toggle_age_verification(), Ok(false));
    }

    #[test]
    fn test_payment_requires_age_verification() {
        let (mut w, log) = at_payment();
        assert_eq!(w.advance(), Err(BookingError::AgeNotVerified));
        assert_eq!(w.step(), BookingStep::Payment);
        assert!(!w.is_submitting());
        assert_eq!(log.last().unwrap().message, "Please verify your age to continue");
    }

    #[test]
    fn test_submission_is_single_flight() {
        let (mut w, log) = at_payment();
        w.toggle_age_verification().unwrap();
        let Ok(Advance::Submit(request)) = w.advance() else {
            panic!("expected a payment request");
        };
        assert_eq!(request.submission_id, 1);
        assert_eq!(request.amount, Decimal::from(120));
        assert!(w.is_submitting());
        assert!(!w.can_advance());
        assert!(!w.can_go_back());

        let notified = log.entries().len();
        assert_eq!(w.advance(), Err(BookingError::SubmissionInFlight));
        assert_eq!(w.back(), Err(BookingError::SubmissionInFlight));
        assert_eq!(w.toggle_age_verification(), Err(BookingError::SubmissionInFlight));
        assert_eq!(log.entries().len(), notified);
        assert_eq!(w.step(), BookingStep::Payment);
    }

    #[test]
    fn test_successful_submission_confirms() {
        let (mut w, log) = at_payment();
        w.toggle_age_verification().unwrap();
        let Ok(Advance::Submit(request)) = w.advance() else {
            panic!("expected a payment request");
        };

        let confirmation = w
            .complete_submission(SubmissionOutcome::success(request.submission_id, receipt()))
            .unwrap()
            .clone();
        assert_eq!(confirmation.service_id, "1");
        assert_eq!(confirmation.creator_name, "Alex Smith");
        assert_eq!(confirmation.date, day(20));
        assert_eq!(confirmation.time, "12:00");
        assert_eq!(
            confirmation.summary(),
            "Your session with Alex Smith has been scheduled for Tuesday, June 20 at 12:00."
        );
        assert_eq!(w.step(), BookingStep::Confirmation);
        assert!(!w.is_submitting());
        assert_eq!(log.last().unwrap().kind, NotifyKind::Success);
    }

    #[test]
    fn test_failed_submission_stays_on_payment() {
        let (mut w, log) = at_payment();
        w.toggle_age_verification().unwrap();
        let Ok(Advance::Submit(request)) = w.advance() else {
            panic!("expected a payment request");
        };

        let err = w
            .complete_submission(SubmissionOutcome::failure(
                request.submission_id,
                PaymentError::Unavailable,
            ))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Submission);
        assert_eq!(w.step(), BookingStep::Payment);
        assert!(!w.is_submitting());
        assert!(w.is_age_verified());
        assert_eq!(log.last().unwrap().kind, NotifyKind::Error);

        // Manual retry issues a fresh submission
        let Ok(Advance::Submit(retry)) = w.advance() else {
            panic!("expected a retry request");
        };
        assert_eq!(retry.submission_id, 2);
    }

    #[test]
    fn test_stale_outcome_ignored() {
        let (mut w, _) = at_payment();
        w.toggle_age_verification().unwrap();
        w.advance().unwrap();
        assert_eq!(
            w.complete_submission(SubmissionOutcome::success(99, receipt()))
                .unwrap_err(),
            BookingError::UnknownSubmission(99)
        );
        assert!(w.is_submitting());
    }

    #[test]
    fn test_outcome_without_submission_rejected() {
        let (mut w, _) = wizard();
        assert!(w
            .complete_submission(SubmissionOutcome::success(1, receipt()))
            .is_err());
        assert_eq!(w.step(), BookingStep::SelectDateTime);
    }

    #[test]
    fn test_confirmation_is_terminal() {
        let (mut w, _) = at_payment();
        w.toggle_age_verification().unwrap();
        w.advance().unwrap();
        w.complete_submission(SubmissionOutcome::success(1, receipt()))
            .unwrap();

        assert_eq!(w.advance(), Err(BookingError::AlreadyConfirmed));
        assert_eq!(w.back(), Err(BookingError::AlreadyConfirmed));
        assert_eq!(w.select_date(day(21)), Err(BookingError::AlreadyConfirmed));
        assert_eq!(w.select_time("09:00"), Err(BookingError::AlreadyConfirmed));
        assert_eq!(w.toggle_age_verification(), Err(BookingError::AlreadyConfirmed));
        assert_eq!(w.step(), BookingStep::Confirmation);
    }

    #[test]
    fn test_open_requires_authentication() {
        let log = Arc::new(NotificationLog::new());
        let err = BookingWizard::open(
            "2",
            &Auth(false),
            &InMemoryCatalog::mock(),
            Arc::new(InMemoryAvailability::mock()),
            log.clone(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            OpenBookingError::AuthenticationRequired {
                return_to: "/book/2".to_string()
            }
        );
        assert_eq!(err.redirect(), LOGIN_ROUTE);
        assert!(log.entries().is_empty());
    }

    #[test]
    fn test_open_unknown_service() {
        let log = Arc::new(NotificationLog::new());
        let err = BookingWizard::open(
            "unknown-id",
            &Auth(true),
            &InMemoryCatalog::mock(),
            Arc::new(InMemoryAvailability::mock()),
            log.clone(),
        )
        .unwrap_err();
        assert!(matches!(err, OpenBookingError::ServiceNotFound { .. }));
        assert_eq!(err.redirect(), FALLBACK_ROUTE);
        assert_eq!(log.last().unwrap().message, "Service not found");
    }

    #[test]
    fn test_booking_paths() {
        assert_eq!(booking_path("7"), "/book/7");
        assert_eq!(service_id_from_path("/book/7"), Some("7"));
        assert_eq!(service_id_from_path("/book/"), None);
        assert_eq!(service_id_from_path("/dashboard"), None);
    }
}
