//! User interface rendering module
//!
//! This module is organized into submodules:
//! - `header` - Header, status bar, nav bar and help overlay rendering
//! - `screens` - One renderer per application mode

mod header;
pub mod screens;

pub use header::HeaderRenderer;

use crate::app::{AppMode, AppState};
use crate::components::keybindings::KeybindingContext;
use crate::theme::UiConstants;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

/// Top-level renderer; lays out the chrome and dispatches to the screen for the current mode
pub struct UiRenderer {
    header: HeaderRenderer,
}

impl Default for UiRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl UiRenderer {
    pub fn new() -> Self {
        Self {
            header: HeaderRenderer::new(),
        }
    }

    /// Render the whole frame
    pub fn render(&self, f: &mut Frame, state: &AppState, keybinding_ctx: &KeybindingContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(UiConstants::HEADER_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(UiConstants::STATUS_BAR_HEIGHT),
                Constraint::Length(UiConstants::NAV_BAR_HEIGHT),
            ])
            .split(f.area());

        self.header.render_header(f, state, chunks[0]);

        let content = chunks[1];
        match state.mode {
            AppMode::Services => screens::render_services_screen(f, content, state),
            AppMode::Login => screens::render_login_screen(f, content, state),
            AppMode::Booking => match &state.wizard {
                Some(wizard) => screens::render_booking_screen(
                    f,
                    content,
                    wizard,
                    state.date_cursor,
                    state.time_cursor,
                ),
                // Mode and wizard are switched together; an empty frame is transient
                None => screens::render_services_screen(f, content, state),
            },
            AppMode::Dashboard => {
                if let Some(summary) = &state.dashboard {
                    screens::render_dashboard_screen(f, content, summary);
                }
            }
        }

        header::render_status_bar(f, state, chunks[2]);
        header::render_nav_bar(f, state, keybinding_ctx, chunks[3]);

        if state.help_visible {
            header::render_help_overlay(f, state, keybinding_ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::availability::InMemoryAvailability;
    use crate::booking::BookingWizard;
    use crate::catalog::{InMemoryCatalog, ServiceCatalog};
    use crate::dashboard::DashboardSummary;
    use crate::data::mock_services;
    use crate::notify::NotificationLog;
    use crate::session::SessionStore;
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
    use std::sync::Arc;

    fn draw(state: &AppState) -> Buffer {
        let backend = TestBackend::new(100, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        let renderer = UiRenderer::new();
        let ctx = KeybindingContext::new();
        terminal
            .draw(|f| renderer.render(f, state, &ctx))
            .unwrap();
        terminal.backend().buffer().clone()
    }

    fn buffer_text(buffer: &Buffer) -> String {
        buffer
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>()
    }

    fn state() -> AppState {
        AppState::new(SessionStore::in_memory(), mock_services())
    }

    #[test]
    fn test_services_screen_lists_catalog() {
        let text = buffer_text(&draw(&state()));
        assert!(text.contains("Strategy Consultation"));
        assert!(text.contains("creatorbook"));
    }

    #[test]
    fn test_booking_screen_shows_progress() {
        let mut state = state();
        let catalog = InMemoryCatalog::mock();
        let service = catalog.find_service("1").unwrap();
        state.wizard = Some(BookingWizard::new(
            service,
            Arc::new(InMemoryAvailability::mock()),
            Arc::new(NotificationLog::default()),
        ));
        state.mode = AppMode::Booking;
        let text = buffer_text(&draw(&state));
        assert!(text.contains("Select a Date"));
        assert!(text.contains("Continue"));
    }

    #[test]
    fn test_dashboard_screen_renders_stats() {
        let mut state = state();
        state.dashboard = Some(DashboardSummary::build(state.session.data()));
        state.mode = AppMode::Dashboard;
        let text = buffer_text(&draw(&state));
        assert!(text.contains("Booked Services"));
        assert!(text.contains("Your Bookings (1 upcoming)"));
    }

    #[test]
    fn test_help_overlay_drawn_on_top() {
        let mut state = state();
        state.help_visible = true;
        let text = buffer_text(&draw(&state));
        assert!(text.contains("creatorbook Help"));
    }
}
