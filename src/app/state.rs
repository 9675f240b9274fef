//! Application state definitions
//!
//! Contains the state shared between the event loop and the renderer:
//! the current screen, list cursors, the login form and the open booking.

use crate::booking::BookingWizard;
use crate::dashboard::DashboardSummary;
use crate::notify::Notification;
use crate::session::SessionStore;
use crate::types::Service;

/// Which login form field has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Email,
    Password,
}

/// Login form contents
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub focus: LoginField,
}

impl LoginForm {
    /// The field currently receiving keystrokes
    pub fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            LoginField::Email => &mut self.email,
            LoginField::Password => &mut self.password,
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            LoginField::Email => LoginField::Password,
            LoginField::Password => LoginField::Email,
        };
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Main application state
#[derive(Debug)]
pub struct AppState {
    /// Current application mode
    pub mode: AppMode,
    /// Signed-in user
    pub session: SessionStore,
    /// Catalog listing shown on the services screen
    pub services: Vec<Service>,
    /// Services list selection
    pub service_selection: usize,
    /// Open booking, if any
    pub wizard: Option<BookingWizard>,
    /// Highlighted date in the booking date row
    pub date_cursor: usize,
    /// Highlighted time on the selected date
    pub time_cursor: usize,
    pub login_form: LoginForm,
    /// Booking route to resume after signing in
    pub return_to: Option<String>,
    /// Dashboard contents, rebuilt on entry
    pub dashboard: Option<DashboardSummary>,
    /// Most recent notification, shown in the status bar
    pub notification: Option<Notification>,
    /// Status message for user feedback
    pub status_message: String,
    /// Whether help overlay is visible
    pub help_visible: bool,
}

/// Application operating modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AppMode {
    /// Service browser - entry point
    #[default]
    Services,
    /// Sign-in form
    Login,
    /// Booking wizard for one service
    Booking,
    /// Bookings and earnings overview
    Dashboard,
}

impl AppMode {
    /// Display name used in the header and help overlay
    pub fn title(self) -> &'static str {
        match self {
            Self::Services => "Services",
            Self::Login => "Sign In",
            Self::Booking => "Book a Session",
            Self::Dashboard => "Dashboard",
        }
    }
}

impl AppState {
    pub fn new(session: SessionStore, services: Vec<Service>) -> Self {
        Self {
            mode: AppMode::default(),
            session,
            services,
            service_selection: 0,
            wizard: None,
            date_cursor: 0,
            time_cursor: 0,
            login_form: LoginForm::default(),
            return_to: None,
            dashboard: None,
            notification: None,
            status_message: "Welcome to creatorbook".to_string(),
            help_visible: false,
        }
    }

    /// Service under the list cursor
    pub fn selected_service(&self) -> Option<&Service> {
        self.services.get(self.service_selection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_form_focus() {
        let mut form = LoginForm::default();
        form.focused_mut().push_str("sam@example.com");
        form.toggle_focus();
        form.focused_mut().push_str("secret");
        assert_eq!(form.email, "sam@example.com");
        assert_eq!(form.password, "secret");
        form.clear();
        assert!(form.email.is_empty());
        assert_eq!(form.focus, LoginField::Email);
    }

    #[test]
    fn test_default_state() {
        let state = AppState::new(SessionStore::in_memory(), crate::data::mock_services());
        assert_eq!(state.mode, AppMode::Services);
        assert_eq!(state.selected_service().map(|s| s.id.as_str()), Some("1"));
        assert!(state.wizard.is_none());
    }
}
