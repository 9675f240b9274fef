//! Header, status bar, and navigation bar rendering

use crate::app::AppState;
use crate::components::help_overlay::HelpOverlay;
use crate::components::keybindings::KeybindingContext;
use crate::theme::{Colors, Styles, Theme};
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Header renderer: application name, current screen, signed-in user
pub struct HeaderRenderer {
    app_name: &'static str,
}

impl Default for HeaderRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl HeaderRenderer {
    pub fn new() -> Self {
        Self {
            app_name: "creatorbook",
        }
    }

    /// Render the top bar
    pub fn render_header(&self, f: &mut Frame, state: &AppState, area: Rect) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let session = state.session.data();
        let user = if session.is_logged_in {
            format!("{} ({})", session.display_name(), session.user_type)
        } else {
            "not signed in".to_string()
        };

        let line = Line::from(vec![
            Span::styled(format!(" {} ", self.app_name), Styles::title()),
            Span::styled("│ ", Styles::text_muted()),
            Span::styled(state.mode.title(), Style::default().fg(Colors::SECONDARY)),
            Span::styled("  │ ", Styles::text_muted()),
            Span::styled(user, Styles::text_secondary()),
        ]);

        let header = Paragraph::new(line)
            .block(
                Block::default()
                    .borders(Borders::BOTTOM)
                    .border_style(Styles::border_inactive()),
            )
            .alignment(Alignment::Left);
        f.render_widget(header, area);
    }
}

/// Render the status bar with the latest notification or status message
pub fn render_status_bar(f: &mut Frame, state: &AppState, area: Rect) {
    let line = match &state.notification {
        Some(notification) => Line::from(vec![
            Span::styled(
                format!(" {} ", Theme::notify_icon(notification.kind)),
                Theme::notify_style(notification.kind),
            ),
            Span::styled(notification.message.clone(), Theme::notify_style(notification.kind)),
        ]),
        None => Line::from(Span::styled(
            format!(" {}", state.status_message),
            Styles::text_secondary(),
        )),
    };

    let status = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Styles::border_inactive()),
    );
    f.render_widget(status, area);
}

/// Render the navigation bar
pub fn render_nav_bar(
    f: &mut Frame,
    state: &AppState,
    keybinding_ctx: &KeybindingContext,
    area: Rect,
) {
    let mut spans = Vec::new();
    for item in keybinding_ctx.get_nav_items(&state.mode) {
        spans.push(Span::styled(format!(" [{}] ", item.key_display), Styles::key()));
        spans.push(Span::styled(item.action_label, Styles::nav_hint()));
    }
    let nav_bar = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    f.render_widget(nav_bar, area);
}

/// Render the help overlay
pub fn render_help_overlay(f: &mut Frame, state: &AppState, keybinding_ctx: &KeybindingContext) {
    let help_overlay = HelpOverlay::new(&state.mode, keybinding_ctx);
    help_overlay.render(f, f.area());
}
