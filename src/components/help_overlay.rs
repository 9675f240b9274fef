//! Help overlay component
//!
//! Displays context-sensitive help in a centered popup over the current screen.

use super::keybindings::{HelpSection, KeybindingContext};
use crate::app::AppMode;
use crate::theme::{Colors, Styles, UiConstants, UiText};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Help overlay component
pub struct HelpOverlay {
    content: Vec<Line<'static>>,
}

impl HelpOverlay {
    /// Create a new help overlay for the given mode
    pub fn new(mode: &AppMode, keybinding_ctx: &KeybindingContext) -> Self {
        let sections = keybinding_ctx.get_help_content(mode);
        Self {
            content: Self::build_content(&sections, mode),
        }
    }

    /// Build the help content from sections
    fn build_content(sections: &[HelpSection], mode: &AppMode) -> Vec<Line<'static>> {
        let mut lines: Vec<Line<'static>> = Vec::new();

        lines.push(Line::from(vec![Span::styled(
            "  creatorbook Help  ",
            Styles::title(),
        )]));
        lines.push(Line::from(""));

        lines.push(Line::from(vec![
            Span::styled("Current: ", Styles::text_muted()),
            Span::styled(mode.title().to_string(), Style::default().fg(Colors::SECONDARY)),
        ]));
        lines.push(Line::from(""));

        for section in sections {
            lines.push(Line::from(vec![Span::styled(
                format!("  {}  ", section.title),
                Style::default()
                    .fg(Colors::SUCCESS)
                    .add_modifier(Modifier::BOLD),
            )]));
            lines.push(Line::from(""));

            for (key, description) in &section.items {
                lines.push(Line::from(vec![
                    Span::raw("    "),
                    Span::styled(format!("{:<10}", key), Styles::key()),
                    Span::styled(description.clone(), Styles::text()),
                ]));
            }
            lines.push(Line::from(""));
        }

        lines.push(Line::from(vec![Span::styled(UiText::CLOSE_HELP, Styles::text_muted())]));

        lines
    }

    /// Number of content lines
    pub fn line_count(&self) -> usize {
        self.content.len()
    }

    /// Render the help overlay
    pub fn render(&self, f: &mut Frame, parent: Rect) {
        let area = popup_area(parent);
        f.render_widget(Clear, area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Help ")
            .title_alignment(Alignment::Center)
            .border_style(Styles::border_active())
            .style(Style::default().bg(Colors::BG_PRIMARY));

        let paragraph = Paragraph::new(self.content.clone())
            .block(block)
            .wrap(Wrap { trim: false });
        f.render_widget(paragraph, area);
    }
}

/// Centered popup rectangle sized from the theme constants and clamped to `parent`.
fn popup_area(parent: Rect) -> Rect {
    let width = (parent.width * UiConstants::HELP_WIDTH_PCT / 100)
        .clamp(UiConstants::HELP_MIN_WIDTH, UiConstants::HELP_MAX_WIDTH)
        .min(parent.width);
    let height = (parent.height * UiConstants::HELP_HEIGHT_PCT / 100).min(parent.height);
    Rect {
        x: parent.x + (parent.width - width) / 2,
        y: parent.y + (parent.height - height) / 2,
        width,
        height,
    }
}

/// Quick help builder for generating plain-text help content
pub fn build_quick_help(mode: &AppMode) -> Vec<String> {
    let keybinding_ctx = KeybindingContext::new();
    let sections = keybinding_ctx.get_help_content(mode);

    let mut lines = Vec::new();
    for section in sections {
        lines.push(format!("-- {} --", section.title));
        for (key, desc) in section.items {
            lines.push(format!("  {}: {}", key, desc));
        }
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_popup_fits_small_screen() {
        let parent = Rect::new(0, 0, 40, 10);
        let area = popup_area(parent);
        assert!(area.width <= parent.width);
        assert!(area.height <= parent.height);
    }

    #[test]
    fn test_popup_is_centered() {
        let area = popup_area(Rect::new(0, 0, 100, 40));
        assert_eq!(area.width, 60);
        assert_eq!(area.x, 20);
        assert_eq!(area.height, 28);
    }

    #[test]
    fn test_quick_help_lists_booking_keys() {
        let lines = build_quick_help(&AppMode::Booking);
        assert!(lines.iter().any(|l| l.contains("Confirm age")));
        assert!(lines.iter().any(|l| l == "-- Navigation --"));
    }

    #[test]
    fn test_overlay_has_content() {
        let overlay = HelpOverlay::new(&AppMode::Services, &KeybindingContext::new());
        assert!(overlay.line_count() > 5);
    }
}
