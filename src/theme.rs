//! Centralized theme and styling for the TUI
//!
//! Single source of truth for the colors, styles, and visual constants used
//! by the screens and components.
//!
//! # Usage
//! ```rust
//! use creatorbook::theme::{Colors, Styles, Theme};
//! use creatorbook::notify::NotifyKind;
//! use ratatui::style::Style;
//!
//! let style = Style::default().fg(Colors::PRIMARY);
//! let title_style = Styles::title();
//! let error_style = Theme::notify_style(NotifyKind::Error);
//! ```

use crate::notify::NotifyKind;
use ratatui::style::{Color, Modifier, Style};

// =============================================================================
// COLOR PALETTE
// =============================================================================

/// Core color palette for the application
pub struct Colors;

impl Colors {
    /// Primary dark background - used for panels and the help overlay
    pub const BG_PRIMARY: Color = Color::Rgb(20, 20, 30);

    /// Default foreground text color
    pub const FG_PRIMARY: Color = Color::White;

    /// Secondary/muted text color
    pub const FG_SECONDARY: Color = Color::Gray;

    /// Disabled/inactive text color
    pub const FG_MUTED: Color = Color::DarkGray;

    /// Primary accent color - used for borders, titles, highlights
    pub const PRIMARY: Color = Color::Cyan;

    /// Secondary accent color - used for prices and emphasis
    pub const SECONDARY: Color = Color::Yellow;

    /// Success/positive feedback
    pub const SUCCESS: Color = Color::Green;

    /// Warning/caution feedback
    pub const WARNING: Color = Color::Yellow;

    /// Error/danger feedback
    pub const ERROR: Color = Color::Red;

    /// Informational feedback
    pub const INFO: Color = Color::LightBlue;

    /// Active border color
    pub const BORDER_ACTIVE: Color = Color::Cyan;

    /// Inactive/unfocused border color
    pub const BORDER_INACTIVE: Color = Color::DarkGray;

    /// Selected item highlight
    pub const SELECTED_BG: Color = Color::Cyan;

    /// Selected item text
    pub const SELECTED_FG: Color = Color::Black;

    /// Navigation hints in the bottom bar
    pub const NAV_HINT: Color = Color::DarkGray;

    /// Wizard step currently shown
    pub const STEP_ACTIVE: Color = Color::Yellow;

    /// Wizard step already passed
    pub const STEP_COMPLETE: Color = Color::Green;

    /// Wizard step not reached yet
    pub const STEP_PENDING: Color = Color::Gray;

    /// Earnings chart bars
    pub const CHART_BAR: Color = Color::Cyan;
}

// =============================================================================
// PRE-BUILT STYLES
// =============================================================================

/// Commonly used styles
pub struct Styles;

impl Styles {
    pub fn text() -> Style {
        Style::default().fg(Colors::FG_PRIMARY)
    }

    pub fn text_muted() -> Style {
        Style::default().fg(Colors::FG_MUTED)
    }

    pub fn text_secondary() -> Style {
        Style::default().fg(Colors::FG_SECONDARY)
    }

    /// Screen titles
    pub fn title() -> Style {
        Style::default()
            .fg(Colors::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border_active() -> Style {
        Style::default().fg(Colors::BORDER_ACTIVE)
    }

    pub fn border_inactive() -> Style {
        Style::default().fg(Colors::BORDER_INACTIVE)
    }

    /// Highlighted list entry or chip
    pub fn selected() -> Style {
        Style::default()
            .fg(Colors::SELECTED_FG)
            .bg(Colors::SELECTED_BG)
            .add_modifier(Modifier::BOLD)
    }

    pub fn unselected() -> Style {
        Style::default().fg(Colors::FG_SECONDARY)
    }

    pub fn price() -> Style {
        Style::default()
            .fg(Colors::SECONDARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Key name in hints
    pub fn key() -> Style {
        Style::default()
            .fg(Colors::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn nav_hint() -> Style {
        Style::default().fg(Colors::NAV_HINT)
    }

    /// Enabled button
    pub fn button_active() -> Style {
        Style::default()
            .fg(Colors::SELECTED_FG)
            .bg(Colors::SUCCESS)
            .add_modifier(Modifier::BOLD)
    }

    /// Disabled button
    pub fn button_inactive() -> Style {
        Style::default().fg(Colors::FG_MUTED)
    }
}

// =============================================================================
// SEMANTIC STYLES
// =============================================================================

/// Styles derived from application state
pub struct Theme;

impl Theme {
    /// Status bar style for a notification
    pub fn notify_style(kind: NotifyKind) -> Style {
        match kind {
            NotifyKind::Success => Style::default().fg(Colors::SUCCESS),
            NotifyKind::Error => Style::default()
                .fg(Colors::ERROR)
                .add_modifier(Modifier::BOLD),
            NotifyKind::Info => Style::default().fg(Colors::INFO),
        }
    }

    pub fn notify_icon(kind: NotifyKind) -> &'static str {
        match kind {
            NotifyKind::Success => "✓",
            NotifyKind::Error => "✗",
            NotifyKind::Info => "ℹ",
        }
    }

    /// Wizard progress indicator style
    pub fn step_style(completed: bool, active: bool) -> Style {
        if active {
            Style::default()
                .fg(Colors::STEP_ACTIVE)
                .add_modifier(Modifier::BOLD)
        } else if completed {
            Style::default().fg(Colors::STEP_COMPLETE)
        } else {
            Style::default().fg(Colors::STEP_PENDING)
        }
    }
}

// =============================================================================
// LAYOUT CONSTANTS
// =============================================================================

/// UI layout constants
pub struct UiConstants;

impl UiConstants {
    /// Help overlay width as a percentage of the screen
    pub const HELP_WIDTH_PCT: u16 = 60;

    /// Help overlay height as a percentage of the screen
    pub const HELP_HEIGHT_PCT: u16 = 70;

    pub const HELP_MIN_WIDTH: u16 = 50;

    pub const HELP_MAX_WIDTH: u16 = 80;

    /// Navigation bar height
    pub const NAV_BAR_HEIGHT: u16 = 1;

    /// Header height (title line plus border)
    pub const HEADER_HEIGHT: u16 = 3;

    /// Status bar height
    pub const STATUS_BAR_HEIGHT: u16 = 3;

    /// Widest earnings bar, in cells
    pub const CHART_WIDTH: u16 = 40;
}

/// Common UI text strings
pub struct UiText;

impl UiText {
    pub const BTN_CONTINUE: &'static str = "[ Continue ]";
    pub const BTN_CONFIRM_PAYMENT: &'static str = "[ Confirm Payment ]";
    pub const BTN_PROCESSING: &'static str = "[ Processing... ]";
    pub const BTN_BACK: &'static str = "[ Back ]";
    pub const AGE_CHECKBOX: &'static str = "I confirm that I am at least 18 years old";
    pub const CLOSE_HELP: &'static str = "Press ? or Esc to close";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_style_precedence() {
        assert_eq!(Theme::step_style(true, true).fg, Some(Colors::STEP_ACTIVE));
        assert_eq!(Theme::step_style(true, false).fg, Some(Colors::STEP_COMPLETE));
        assert_eq!(Theme::step_style(false, false).fg, Some(Colors::STEP_PENDING));
    }

    #[test]
    fn test_notify_styles_differ() {
        use strum::IntoEnumIterator;

        let kinds: Vec<NotifyKind> = NotifyKind::iter().collect();
        for (i, a) in kinds.iter().enumerate() {
            for b in &kinds[i + 1..] {
                assert_ne!(Theme::notify_style(*a), Theme::notify_style(*b));
                assert_ne!(Theme::notify_icon(*a), Theme::notify_icon(*b));
            }
        }
        assert_eq!(Theme::notify_icon(NotifyKind::Error), "✗");
    }
}
