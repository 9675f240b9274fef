//! Payment submission
//!
//! The wizard hands out a [`PaymentRequest`] and waits for exactly one
//! outcome. Processing is blocking; the TUI runs it on a worker thread and
//! reports back over a channel, headless mode calls it inline.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::thread;
use std::time::Duration;
use thiserror::Error;

/// Default simulated processing latency
pub const DEFAULT_PAYMENT_DELAY: Duration = Duration::from_millis(2000);

/// A single payment submission issued by the wizard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRequest {
    /// Wizard-local id; the outcome must carry it back.
    pub submission_id: u64,
    pub service_id: String,
    pub date: NaiveDate,
    pub time: String,
    pub amount: Decimal,
}

/// Proof of a successful payment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentReceipt {
    pub reference: String,
}

/// Payment failures. All are recoverable: the user may press continue again.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaymentError {
    #[error("Payment declined: {0}")]
    Declined(String),

    #[error("Payment service unavailable")]
    Unavailable,
}

/// The outcome of one submission, tagged with its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionOutcome {
    pub submission_id: u64,
    pub result: Result<PaymentReceipt, PaymentError>,
}

impl SubmissionOutcome {
    pub fn success(submission_id: u64, receipt: PaymentReceipt) -> Self {
        Self {
            submission_id,
            result: Ok(receipt),
        }
    }

    pub fn failure(submission_id: u64, error: PaymentError) -> Self {
        Self {
            submission_id,
            result: Err(error),
        }
    }
}

/// Something that can take a payment.
pub trait PaymentProcessor: Send + Sync {
    fn process(&self, request: &PaymentRequest) -> Result<PaymentReceipt, PaymentError>;

    /// Process and tag the result with the request's submission id.
    fn submit(&self, request: &PaymentRequest) -> SubmissionOutcome {
        SubmissionOutcome {
            submission_id: request.submission_id,
            result: self.process(request),
        }
    }
}

/// Stand-in for a payment provider: waits, then succeeds (or fails on demand).
#[derive(Debug, Clone)]
pub struct SimulatedPayment {
    delay: Duration,
    fail: bool,
}

impl Default for SimulatedPayment {
    fn default() -> Self {
        Self::new(DEFAULT_PAYMENT_DELAY)
    }
}

impl SimulatedPayment {
    pub fn new(delay: Duration) -> Self {
        Self { delay, fail: false }
    }

    /// No latency. Used by tests and the headless `book` command.
    pub fn instant() -> Self {
        Self::new(Duration::ZERO)
    }

    /// Make every payment fail.
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl PaymentProcessor for SimulatedPayment {
    fn process(&self, request: &PaymentRequest) -> Result<PaymentReceipt, PaymentError> {
        tracing::debug!(
            submission_id = request.submission_id,
            service_id = %request.service_id,
            amount = %request.amount,
            "processing payment"
        );
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }

        if self.fail {
            tracing::warn!(submission_id = request.submission_id, "simulated payment failure");
            return Err(PaymentError::Declined("card was declined".to_string()));
        }

        Ok(PaymentReceipt {
            reference: format!("PAY-{:06}", request.submission_id),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(id: u64) -> PaymentRequest {
        PaymentRequest {
            submission_id: id,
            service_id: "1".to_string(),
            date: NaiveDate::from_ymd_opt(2023, 6, 20).unwrap(),
            time: "12:00".to_string(),
            amount: Decimal::from(120),
        }
    }

    #[test]
    fn test_instant_payment_succeeds() {
        let receipt = SimulatedPayment::instant().process(&request(7)).unwrap();
        assert_eq!(receipt.reference, "PAY-000007");
    }

    #[test]
    fn test_failing_payment() {
        let err = SimulatedPayment::instant().failing().process(&request(1)).unwrap_err();
        assert!(matches!(err, PaymentError::Declined(_)));
        assert!(err.to_string().contains("declined"));
    }

    #[test]
    fn test_submit_tags_outcome() {
        let outcome = SimulatedPayment::instant().submit(&request(3));
        assert_eq!(outcome.submission_id, 3);
        assert!(outcome.result.is_ok());
    }

    #[test]
    fn test_default_delay() {
        assert_eq!(SimulatedPayment::default().delay(), Duration::from_millis(2000));
    }
}
