//! User session
//!
//! Holds who is signed in and persists it as JSON between runs, the terminal
//! counterpart of the browser's local storage. Credentials are checked for
//! shape only; there is no account backend.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use strum::{Display, EnumIter, EnumString};
use thiserror::Error;

use crate::types::UserType;

/// Minimum password length accepted at login, signup and password change
pub const MIN_PASSWORD_LEN: usize = 6;

/// Answers whether the current user may book.
pub trait Authenticator {
    fn is_authenticated(&self) -> bool;
}

/// Session validation failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Please provide valid information")]
    InvalidSignup,

    #[error("You must be signed in to do that")]
    NotLoggedIn,

    #[error("Name cannot be empty")]
    EmptyName,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Password must be at least 6 characters")]
    PasswordTooShort,

    #[error("Please fill in all payment fields")]
    IncompletePayout,

    #[error("Please enter a valid PayPal email")]
    InvalidPaypalEmail,
}

/// Where creator earnings are paid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PayoutMethod {
    #[default]
    Bank,
    Paypal,
}

/// Saved payout details. For PayPal the account is the PayPal email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutInfo {
    pub method: PayoutMethod,
    pub account_holder: String,
    pub account: String,
}

impl PayoutInfo {
    /// Account shown with all but the last four characters hidden.
    pub fn masked_account(&self) -> String {
        if self.method == PayoutMethod::Paypal {
            return self.account.clone();
        }
        let chars: Vec<char> = self.account.chars().collect();
        let visible = chars.len().saturating_sub(4);
        let tail: String = chars[visible..].iter().collect();
        format!("{}{}", "•".repeat(visible.max(4)), tail)
    }
}

/// Persisted session state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    pub is_logged_in: bool,
    pub user_type: UserType,
    pub user_name: String,
    pub email: String,
    #[serde(default)]
    pub payout: Option<PayoutInfo>,
}

impl SessionData {
    pub fn is_creator(&self) -> bool {
        self.is_logged_in && self.user_type == UserType::Creator
    }

    /// Name to greet the user with.
    pub fn display_name(&self) -> &str {
        if self.user_name.trim().is_empty() {
            "User"
        } else {
            &self.user_name
        }
    }
}

impl Authenticator for SessionData {
    fn is_authenticated(&self) -> bool {
        self.is_logged_in
    }
}

fn valid_credentials(email: &str, password: &str) -> bool {
    email.contains('@') && password.chars().count() >= MIN_PASSWORD_LEN
}

/// Session state plus where it is saved.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    path: Option<PathBuf>,
    data: SessionData,
}

impl SessionStore {
    /// A store that never touches the filesystem.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Load the session saved at `path`. A missing file is a signed-out session.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let data = if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read session from {:?}", path))?;
            serde_json::from_str(&content).context("Failed to parse session JSON")?
        } else {
            tracing::debug!(?path, "no saved session");
            SessionData::default()
        };
        Ok(Self {
            path: Some(path),
            data,
        })
    }

    /// Write the session to its file, if it has one.
    pub fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create session directory {:?}", parent))?;
        }
        let json =
            serde_json::to_string_pretty(&self.data).context("Failed to serialize session")?;
        fs::write(path, json).with_context(|| format!("Failed to write session to {:?}", path))?;
        Ok(())
    }

    pub fn data(&self) -> &SessionData {
        &self.data
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Sign in. Saved profile fields (name, account type) are kept.
    pub fn login(&mut self, email: &str, password: &str) -> Result<&SessionData, AuthError> {
        if !valid_credentials(email, password) {
            tracing::info!("login rejected");
            return Err(AuthError::InvalidCredentials);
        }
        self.data.is_logged_in = true;
        self.data.email = email.to_string();
        tracing::info!(email, "signed in");
        Ok(&self.data)
    }

    /// Create an account and sign in.
    pub fn signup(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
        is_creator: bool,
    ) -> Result<&SessionData, AuthError> {
        if name.trim().is_empty() || !valid_credentials(email, password) {
            tracing::info!("signup rejected");
            return Err(AuthError::InvalidSignup);
        }
        self.data = SessionData {
            is_logged_in: true,
            user_type: if is_creator {
                UserType::Creator
            } else {
                UserType::User
            },
            user_name: name.trim().to_string(),
            email: email.to_string(),
            payout: None,
        };
        tracing::info!(email, user_type = %self.data.user_type, "account created");
        Ok(&self.data)
    }

    /// Sign out. The profile stays saved for the next login.
    pub fn logout(&mut self) {
        tracing::info!("signed out");
        self.data.is_logged_in = false;
    }

    pub fn update_profile(&mut self, name: &str) -> Result<(), AuthError> {
        if !self.data.is_logged_in {
            return Err(AuthError::NotLoggedIn);
        }
        if name.trim().is_empty() {
            return Err(AuthError::EmptyName);
        }
        self.data.user_name = name.trim().to_string();
        tracing::info!(name = %self.data.user_name, "profile updated");
        Ok(())
    }

    /// Replace the payout details. Bank transfers need a holder and an
    /// account number; PayPal needs only the PayPal email.
    pub fn update_payout(
        &mut self,
        method: PayoutMethod,
        account_holder: &str,
        account: &str,
    ) -> Result<(), AuthError> {
        if !self.data.is_logged_in {
            return Err(AuthError::NotLoggedIn);
        }
        let account = account.trim();
        let account_holder = account_holder.trim();
        match method {
            PayoutMethod::Bank if account_holder.is_empty() || account.is_empty() => {
                return Err(AuthError::IncompletePayout);
            }
            PayoutMethod::Paypal if account.is_empty() => {
                return Err(AuthError::IncompletePayout);
            }
            PayoutMethod::Paypal if !account.contains('@') => {
                return Err(AuthError::InvalidPaypalEmail);
            }
            _ => {}
        }
        self.data.payout = Some(PayoutInfo {
            method,
            account_holder: account_holder.to_string(),
            account: account.to_string(),
        });
        tracing::info!(%method, "payout details updated");
        Ok(())
    }

    /// Validate a password change. Nothing is stored.
    pub fn change_password(&self, new: &str, confirm: &str) -> Result<(), AuthError> {
        if !self.data.is_logged_in {
            return Err(AuthError::NotLoggedIn);
        }
        if new != confirm {
            return Err(AuthError::PasswordMismatch);
        }
        if new.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::PasswordTooShort);
        }
        Ok(())
    }
}

impl Authenticator for SessionStore {
    fn is_authenticated(&self) -> bool {
        self.data.is_logged_in
    }
}
