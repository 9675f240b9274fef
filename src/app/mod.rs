//! Application module
//!
//! Contains the main application logic, state management, and event handling.
//!
//! # Module Structure
//! - `state` - Application state types (AppState, AppMode, LoginForm)
//! - Main module - App struct and event loop
//!
//! Payments run on a worker thread and report back over a channel that the
//! event loop drains every tick, so the UI stays responsive while a
//! submission is in flight.

mod state;

// Re-export state types for external use
pub use state::{AppMode, AppState, LoginField, LoginForm};

use crate::availability::AvailabilityTable;
use crate::booking::{
    service_id_from_path, Advance, BookingError, BookingStep, BookingWizard, ErrorKind,
    OpenBookingError, FALLBACK_ROUTE, LOGIN_ROUTE,
};
use crate::catalog::ServiceCatalog;
use crate::components::keybindings::KeybindingContext;
use crate::dashboard::DashboardSummary;
use crate::error::{AppError, Result};
use crate::notify::{NotificationLog, Notifier};
use crate::payment::{PaymentError, PaymentProcessor, PaymentRequest, SubmissionOutcome};
use crate::session::SessionStore;
use crate::types::short_date;
use crate::ui::UiRenderer;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{backend::Backend, Terminal};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Messages sent from payment threads to the main UI thread
#[derive(Debug)]
pub enum PaymentMessage {
    /// The processor returned for one submission
    Finished(SubmissionOutcome),
}

/// Main application struct
pub struct App {
    state: Arc<Mutex<AppState>>,
    catalog: Arc<dyn ServiceCatalog>,
    availability: Arc<dyn AvailabilityTable>,
    payment: Arc<dyn PaymentProcessor>,
    /// Sink handed to every wizard; drained into the status bar
    notifications: Arc<NotificationLog>,
    ui_renderer: UiRenderer,
    /// Keybinding context for navigation hints
    keybinding_context: KeybindingContext,
    /// Channel sender for payment outcomes (cloned to threads)
    payment_tx: Sender<PaymentMessage>,
    /// Channel receiver for payment outcomes (polled in main loop)
    payment_rx: Receiver<PaymentMessage>,
}

/// What the booking screen asked for after handling a key
enum BookingNav {
    Stay,
    Leave(&'static str),
}

impl App {
    /// Helper function to safely lock the state mutex
    fn lock_state(&self) -> Result<MutexGuard<'_, AppState>> {
        self.state
            .lock()
            .map_err(|e| AppError::general(format!("Mutex poisoned: {}", e)))
    }

    /// Create a new application instance
    pub fn new(
        session: SessionStore,
        catalog: Arc<dyn ServiceCatalog>,
        availability: Arc<dyn AvailabilityTable>,
        payment: Arc<dyn PaymentProcessor>,
    ) -> Self {
        info!("Creating new App instance");
        let (payment_tx, payment_rx) = mpsc::channel();
        let services = catalog.services();

        Self {
            state: Arc::new(Mutex::new(AppState::new(session, services))),
            catalog,
            availability,
            payment,
            notifications: Arc::new(NotificationLog::new()),
            ui_renderer: UiRenderer::new(),
            keybinding_context: KeybindingContext::new(),
            payment_tx,
            payment_rx,
        }
    }

    /// Read the current state.
    pub fn with_state<R>(&self, f: impl FnOnce(&AppState) -> R) -> Result<R> {
        let state = self.lock_state()?;
        Ok(f(&state))
    }

    /// Toggle help overlay visibility
    pub fn toggle_help(&self) -> Result<()> {
        let mut state = self.lock_state()?;
        state.help_visible = !state.help_visible;
        Ok(())
    }

    /// Run the main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        info!("Starting main application loop");

        loop {
            // Deliver finished payments before reading input
            self.poll_payment_messages()?;

            if crossterm::event::poll(Duration::from_millis(50))? {
                if let Event::Key(key_event) = crossterm::event::read()? {
                    if self.handle_key_event(key_event)? {
                        break; // Exit requested
                    }
                }
            }

            self.draw(terminal)?;
        }

        info!("Main application loop finished");
        Ok(())
    }

    /// Render one frame
    pub fn draw<B: Backend>(&self, terminal: &mut Terminal<B>) -> Result<()> {
        let state = self.lock_state()?;
        terminal
            .draw(|f| {
                self.ui_renderer
                    .render(f, &state, &self.keybinding_context)
            })
            .map_err(|e| AppError::terminal(format!("Failed to draw frame: {}", e)))?;
        Ok(())
    }

    /// Handle keyboard input events. Returns `true` when the user quits.
    pub fn handle_key_event(&mut self, key_event: KeyEvent) -> Result<bool> {
        if key_event.kind != KeyEventKind::Press {
            return Ok(false);
        }
        if key_event.modifiers.contains(KeyModifiers::CONTROL)
            && key_event.code == KeyCode::Char('c')
        {
            return Ok(true);
        }

        let (current_mode, help_visible) = {
            let state = self.lock_state()?;
            (state.mode, state.help_visible)
        };

        // Handle help overlay - ? or Esc dismisses it
        if help_visible {
            if matches!(key_event.code, KeyCode::Char('?') | KeyCode::Esc) {
                self.toggle_help()?;
            }
            return Ok(false);
        }

        let quit = match current_mode {
            // The login form takes printable keys as text
            AppMode::Login => {
                self.handle_login_key(key_event)?;
                false
            }
            _ => match key_event.code {
                KeyCode::Char('?') => {
                    self.toggle_help()?;
                    false
                }
                KeyCode::Char('q') => true,
                _ => {
                    match current_mode {
                        AppMode::Services => self.handle_services_key(key_event)?,
                        AppMode::Booking => self.handle_booking_key(key_event)?,
                        AppMode::Dashboard => self.handle_dashboard_key(key_event)?,
                        AppMode::Login => {}
                    }
                    false
                }
            },
        };

        self.sync_notifications()?;
        Ok(quit)
    }

    /// Apply every payment outcome that has arrived, without blocking
    pub fn poll_payment_messages(&mut self) -> Result<()> {
        while let Ok(msg) = self.payment_rx.try_recv() {
            self.apply_payment_message(msg)?;
        }
        self.sync_notifications()
    }

    /// Block up to `timeout` for one payment outcome. Returns whether one arrived.
    pub fn wait_for_payment(&mut self, timeout: Duration) -> Result<bool> {
        match self.payment_rx.recv_timeout(timeout) {
            Ok(msg) => {
                self.apply_payment_message(msg)?;
                self.sync_notifications()?;
                Ok(true)
            }
            Err(_) => Ok(false),
        }
    }

    fn apply_payment_message(&self, msg: PaymentMessage) -> Result<()> {
        let PaymentMessage::Finished(outcome) = msg;
        let mut state = self.lock_state()?;
        let Some(wizard) = state.wizard.as_mut() else {
            debug!(
                submission_id = outcome.submission_id,
                "payment finished after the booking was closed"
            );
            return Ok(());
        };

        match wizard.complete_submission(outcome) {
            Ok(confirmation) => {
                let summary = confirmation.summary();
                info!("{}", summary);
            }
            Err(BookingError::UnknownSubmission(id)) => {
                debug!(submission_id = id, "dropping stale payment outcome");
            }
            Err(e) => {
                // Already notified; the wizard stays on Payment for a retry
                debug!(error = %e, "payment not completed");
            }
        }
        Ok(())
    }

    /// Move queued notifications into the status bar
    fn sync_notifications(&self) -> Result<()> {
        if let Some(last) = self.notifications.drain().pop() {
            let mut state = self.lock_state()?;
            state.status_message = last.message.clone();
            state.notification = Some(last);
        }
        Ok(())
    }

    fn set_status(state: &mut AppState, message: impl Into<String>) {
        state.status_message = message.into();
        state.notification = None;
    }

    /// Switch screens by route, the way the marketplace links pages
    fn navigate(&mut self, route: &str) -> Result<()> {
        debug!(route, "navigating");
        if route == LOGIN_ROUTE {
            let mut state = self.lock_state()?;
            state.login_form.clear();
            state.mode = AppMode::Login;
            Ok(())
        } else if route == FALLBACK_ROUTE {
            self.show_dashboard()
        } else if let Some(service_id) = service_id_from_path(route) {
            self.open_booking(service_id)
        } else {
            let mut state = self.lock_state()?;
            state.mode = AppMode::Services;
            Ok(())
        }
    }

    /// Open the booking wizard for a service
    fn open_booking(&mut self, service_id: &str) -> Result<()> {
        let mut state = self.lock_state()?;
        let opened = BookingWizard::open(
            service_id,
            &state.session,
            self.catalog.as_ref(),
            Arc::clone(&self.availability),
            self.notifications.clone(),
        );

        match opened {
            Ok(wizard) => {
                info!(service_id, "booking opened");
                state.wizard = Some(wizard);
                state.date_cursor = 0;
                state.time_cursor = 0;
                state.mode = AppMode::Booking;
                Self::set_status(&mut state, "Pick a date and time");
                Ok(())
            }
            Err(err) => {
                let route = err.redirect();
                if let OpenBookingError::AuthenticationRequired { return_to } = err {
                    self.notifications.info("Please sign in to book this service");
                    state.return_to = Some(return_to);
                }
                drop(state);
                self.navigate(route)
            }
        }
    }

    fn show_dashboard(&mut self) -> Result<()> {
        let mut state = self.lock_state()?;
        if !state.session.data().is_logged_in {
            drop(state);
            return self.navigate(LOGIN_ROUTE);
        }
        let summary = DashboardSummary::build(state.session.data());
        state.dashboard = Some(summary);
        state.mode = AppMode::Dashboard;
        Ok(())
    }

    fn logout(&self) -> Result<()> {
        let mut state = self.lock_state()?;
        if !state.session.data().is_logged_in {
            Self::set_status(&mut state, "Not signed in");
            return Ok(());
        }
        state.session.logout();
        if let Err(e) = state.session.save() {
            warn!(error = %e, "failed to save session");
        }
        state.dashboard = None;
        state.mode = AppMode::Services;
        self.notifications.info("Logged out");
        Ok(())
    }

    fn handle_services_key(&mut self, key_event: KeyEvent) -> Result<()> {
        match key_event.code {
            KeyCode::Up => {
                let mut state = self.lock_state()?;
                state.service_selection = state.service_selection.saturating_sub(1);
            }
            KeyCode::Down => {
                let mut state = self.lock_state()?;
                if state.service_selection + 1 < state.services.len() {
                    state.service_selection += 1;
                }
            }
            KeyCode::Enter => {
                let service_id = {
                    let state = self.lock_state()?;
                    state.selected_service().map(|s| s.id.clone())
                };
                if let Some(service_id) = service_id {
                    self.open_booking(&service_id)?;
                }
            }
            KeyCode::Char('l') => {
                let logged_in = self.lock_state()?.session.data().is_logged_in;
                if logged_in {
                    let mut state = self.lock_state()?;
                    Self::set_status(&mut state, "Already signed in");
                } else {
                    self.navigate(LOGIN_ROUTE)?;
                }
            }
            KeyCode::Char('d') => self.show_dashboard()?,
            KeyCode::Char('o') => self.logout()?,
            _ => {}
        }
        Ok(())
    }

    fn handle_login_key(&mut self, key_event: KeyEvent) -> Result<()> {
        match key_event.code {
            KeyCode::Esc => {
                let mut state = self.lock_state()?;
                state.login_form.clear();
                state.return_to = None;
                state.mode = AppMode::Services;
            }
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.lock_state()?.login_form.toggle_focus();
            }
            KeyCode::Backspace => {
                self.lock_state()?.login_form.focused_mut().pop();
            }
            KeyCode::Enter => self.submit_login()?,
            KeyCode::Char(c) => {
                self.lock_state()?.login_form.focused_mut().push(c);
            }
            _ => {}
        }
        Ok(())
    }

    fn submit_login(&mut self) -> Result<()> {
        let mut state = self.lock_state()?;
        let email = state.login_form.email.trim().to_string();
        let password = state.login_form.password.clone();

        let result = state.session.login(&email, &password).map(|_| ());
        match result {
            Ok(()) => {
                if let Err(e) = state.session.save() {
                    warn!(error = %e, "failed to save session");
                }
                self.notifications.success("Logged in successfully");
                state.login_form.clear();
                let return_to = state.return_to.take();
                drop(state);
                // Resume an interrupted booking, otherwise land on the dashboard
                self.navigate(return_to.as_deref().unwrap_or(FALLBACK_ROUTE))
            }
            Err(e) => {
                self.notifications.error(&e.to_string());
                state.login_form.password.clear();
                Ok(())
            }
        }
    }

    fn handle_dashboard_key(&mut self, key_event: KeyEvent) -> Result<()> {
        match key_event.code {
            KeyCode::Esc | KeyCode::Char('b') => {
                self.lock_state()?.mode = AppMode::Services;
            }
            KeyCode::Char('o') => self.logout()?,
            _ => {}
        }
        Ok(())
    }

    fn handle_booking_key(&mut self, key_event: KeyEvent) -> Result<()> {
        let mut guard = self.lock_state()?;
        let state = &mut *guard;
        let Some(wizard) = state.wizard.as_mut() else {
            state.mode = AppMode::Services;
            return Ok(());
        };

        let mut nav = BookingNav::Stay;
        match key_event.code {
            KeyCode::Left | KeyCode::Right if wizard.step() == BookingStep::SelectDateTime => {
                let dates = wizard.available_dates();
                if dates.is_empty() {
                    return Ok(());
                }
                let cursor = match (wizard.selected_date(), key_event.code) {
                    (None, _) => 0,
                    (Some(_), KeyCode::Left) => state.date_cursor.saturating_sub(1),
                    (Some(_), _) => (state.date_cursor + 1).min(dates.len() - 1),
                };
                match wizard.select_date(dates[cursor]) {
                    Ok(()) => {
                        state.date_cursor = cursor;
                        state.time_cursor = 0;
                    }
                    Err(e) => Self::set_status(state, e.to_string()),
                }
            }
            KeyCode::Up | KeyCode::Down if wizard.step() == BookingStep::SelectDateTime => {
                let times = wizard.available_times();
                if times.is_empty() {
                    let message = match wizard.selected_date() {
                        Some(date) => format!("No open times on {}", short_date(date)),
                        None => BookingError::NoDateSelected.to_string(),
                    };
                    Self::set_status(state, message);
                    return Ok(());
                }
                let cursor = match (wizard.selected_time(), key_event.code) {
                    (None, _) => 0,
                    (Some(_), KeyCode::Up) => state.time_cursor.saturating_sub(1),
                    (Some(_), _) => (state.time_cursor + 1).min(times.len() - 1),
                };
                match wizard.select_time(&times[cursor]) {
                    Ok(()) => state.time_cursor = cursor,
                    Err(e) => Self::set_status(state, e.to_string()),
                }
            }
            KeyCode::Enter => match wizard.advance() {
                Ok(Advance::Moved(step)) => {
                    Self::set_status(state, format!("Step {}: {}", step.step_number(), step.title()));
                }
                Ok(Advance::Submit(request)) => {
                    state.status_message = "Processing payment...".to_string();
                    state.notification = None;
                    if let Err(e) = self.spawn_payment(request.clone()) {
                        warn!(error = %e, "could not start payment worker");
                        let outcome = SubmissionOutcome::failure(
                            request.submission_id,
                            PaymentError::Unavailable,
                        );
                        if let Err(e) = wizard.complete_submission(outcome) {
                            debug!(error = %e, "payment not completed");
                        }
                    }
                }
                // Validation failures were already notified
                Err(e) if e.kind() == ErrorKind::Validation => {}
                Err(BookingError::AlreadyConfirmed) => nav = BookingNav::Leave(FALLBACK_ROUTE),
                Err(e) => Self::set_status(state, e.to_string()),
            },
            KeyCode::Char(' ') | KeyCode::Char('a') if wizard.step() == BookingStep::Payment => {
                match wizard.toggle_age_verification() {
                    Ok(true) => Self::set_status(state, "Age confirmed"),
                    Ok(false) => Self::set_status(state, "Age confirmation cleared"),
                    Err(e) => Self::set_status(state, e.to_string()),
                }
            }
            KeyCode::Esc | KeyCode::Char('b') => match wizard.back() {
                Ok(step) => Self::set_status(state, format!("Back to {}", step.title())),
                Err(BookingError::NoPreviousStep(_)) => nav = BookingNav::Leave("/"),
                Err(BookingError::AlreadyConfirmed) => nav = BookingNav::Leave("/"),
                Err(e) => Self::set_status(state, e.to_string()),
            },
            KeyCode::Char('d') if wizard.step().is_terminal() => {
                nav = BookingNav::Leave(FALLBACK_ROUTE);
            }
            _ => {}
        }

        if let BookingNav::Leave(route) = nav {
            state.wizard = None;
            drop(guard);
            self.navigate(route)?;
        }
        Ok(())
    }

    /// Process a payment on a worker thread
    fn spawn_payment(&self, request: PaymentRequest) -> Result<()> {
        let tx = self.payment_tx.clone();
        let processor = Arc::clone(&self.payment);
        thread::Builder::new()
            .name(format!("payment-{}", request.submission_id))
            .spawn(move || {
                let outcome = processor.submit(&request);
                if tx.send(PaymentMessage::Finished(outcome)).is_err() {
                    debug!("payment outcome dropped, app has exited");
                }
            })?;
        Ok(())
    }
}
