//! Keybinding system for context-aware keyboard shortcuts
//!
//! Provides a registry of keybindings that change based on the current application mode.
//! The registry only describes keys for the navigation bar and help overlay; the
//! event loop in `app` does the dispatching.

use crate::app::AppMode;
use crossterm::event::{KeyCode, KeyModifiers};
use std::collections::HashMap;

/// Actions that can be triggered by keybindings
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyAction {
    NavigateUp,
    NavigateDown,
    PreviousDate,
    NextDate,
    Select,
    Continue,
    ToggleAge,
    Back,
    Login,
    Dashboard,
    Logout,
    SwitchField,
    Quit,
    Help,
}

/// A keybinding definition
#[derive(Debug, Clone)]
pub struct Keybinding {
    pub key: KeyCode,
    pub modifiers: KeyModifiers,
    pub action: KeyAction,
    pub display: String,
    pub description: String,
}

impl Keybinding {
    /// Create a new keybinding with no modifiers
    pub fn new(key: KeyCode, action: KeyAction, display: &str, description: &str) -> Self {
        Self {
            key,
            modifiers: KeyModifiers::NONE,
            action,
            display: display.to_string(),
            description: description.to_string(),
        }
    }

    /// Create a keybinding with modifiers
    pub fn with_modifiers(
        key: KeyCode,
        modifiers: KeyModifiers,
        action: KeyAction,
        display: &str,
        description: &str,
    ) -> Self {
        Self {
            key,
            modifiers,
            action,
            display: display.to_string(),
            description: description.to_string(),
        }
    }
}

/// Context-aware keybinding registry
pub struct KeybindingContext {
    /// Mode-specific keybindings
    mode_bindings: HashMap<AppMode, Vec<Keybinding>>,
    /// Global keybindings (available in all modes but Login)
    global_bindings: Vec<Keybinding>,
}

impl Default for KeybindingContext {
    fn default() -> Self {
        Self::new()
    }
}

impl KeybindingContext {
    /// Create a new keybinding context with default bindings
    pub fn new() -> Self {
        let mut ctx = Self {
            mode_bindings: HashMap::new(),
            global_bindings: Vec::new(),
        };
        ctx.register_defaults();
        ctx
    }

    /// Register default keybindings for all modes
    fn register_defaults(&mut self) {
        self.global_bindings = vec![
            Keybinding::new(KeyCode::Char('?'), KeyAction::Help, "?", "Help"),
            Keybinding::new(KeyCode::Char('q'), KeyAction::Quit, "Q", "Quit"),
        ];

        self.mode_bindings.insert(
            AppMode::Services,
            vec![
                Keybinding::new(KeyCode::Up, KeyAction::NavigateUp, "Up", "Previous service"),
                Keybinding::new(KeyCode::Down, KeyAction::NavigateDown, "Down", "Next service"),
                Keybinding::new(KeyCode::Enter, KeyAction::Select, "Enter", "Book service"),
                Keybinding::new(KeyCode::Char('l'), KeyAction::Login, "L", "Sign in"),
                Keybinding::new(KeyCode::Char('d'), KeyAction::Dashboard, "D", "Dashboard"),
                Keybinding::new(KeyCode::Char('o'), KeyAction::Logout, "O", "Sign out"),
            ],
        );

        // Login consumes printable keys, so it has no global bindings
        self.mode_bindings.insert(
            AppMode::Login,
            vec![
                Keybinding::new(KeyCode::Tab, KeyAction::SwitchField, "Tab", "Switch field"),
                Keybinding::new(KeyCode::Enter, KeyAction::Select, "Enter", "Sign in"),
                Keybinding::new(KeyCode::Esc, KeyAction::Back, "Esc", "Back"),
                Keybinding::with_modifiers(
                    KeyCode::Char('c'),
                    KeyModifiers::CONTROL,
                    KeyAction::Quit,
                    "Ctrl+C",
                    "Quit",
                ),
            ],
        );

        self.mode_bindings.insert(
            AppMode::Booking,
            vec![
                Keybinding::new(KeyCode::Left, KeyAction::PreviousDate, "Left", "Previous date"),
                Keybinding::new(KeyCode::Right, KeyAction::NextDate, "Right", "Next date"),
                Keybinding::new(KeyCode::Up, KeyAction::NavigateUp, "Up", "Previous time"),
                Keybinding::new(KeyCode::Down, KeyAction::NavigateDown, "Down", "Next time"),
                Keybinding::new(KeyCode::Enter, KeyAction::Continue, "Enter", "Continue"),
                Keybinding::new(KeyCode::Char(' '), KeyAction::ToggleAge, "Space", "Confirm age"),
                Keybinding::new(KeyCode::Esc, KeyAction::Back, "Esc", "Back"),
                Keybinding::new(KeyCode::Char('d'), KeyAction::Dashboard, "D", "Dashboard (when done)"),
            ],
        );

        self.mode_bindings.insert(
            AppMode::Dashboard,
            vec![
                Keybinding::new(KeyCode::Esc, KeyAction::Back, "Esc", "Back to services"),
                Keybinding::new(KeyCode::Char('o'), KeyAction::Logout, "O", "Sign out"),
            ],
        );
    }

    /// Get keybindings for a specific mode (includes global bindings)
    pub fn get_bindings(&self, mode: &AppMode) -> Vec<&Keybinding> {
        let mut bindings: Vec<&Keybinding> = Vec::new();

        if let Some(mode_bindings) = self.mode_bindings.get(mode) {
            bindings.extend(mode_bindings.iter());
        }

        if *mode != AppMode::Login {
            bindings.extend(self.global_bindings.iter());
        }

        bindings
    }

    /// Get navigation bar items for display
    pub fn get_nav_items(&self, mode: &AppMode) -> Vec<NavBarItem> {
        let bindings = self.get_bindings(mode);

        // Most important bindings per mode
        let priority_actions = match mode {
            AppMode::Services => vec![
                KeyAction::NavigateUp,
                KeyAction::NavigateDown,
                KeyAction::Select,
                KeyAction::Login,
                KeyAction::Dashboard,
                KeyAction::Help,
                KeyAction::Quit,
            ],
            AppMode::Login => vec![
                KeyAction::SwitchField,
                KeyAction::Select,
                KeyAction::Back,
                KeyAction::Quit,
            ],
            AppMode::Booking => vec![
                KeyAction::PreviousDate,
                KeyAction::NextDate,
                KeyAction::NavigateUp,
                KeyAction::NavigateDown,
                KeyAction::Continue,
                KeyAction::ToggleAge,
                KeyAction::Back,
                KeyAction::Help,
            ],
            AppMode::Dashboard => vec![
                KeyAction::Back,
                KeyAction::Logout,
                KeyAction::Help,
                KeyAction::Quit,
            ],
        };

        // Combine paired arrows into single items for cleaner display
        let mut items: Vec<NavBarItem> = Vec::new();
        let mut has_nav = false;
        let mut has_dates = false;

        for action in priority_actions {
            let is_nav = matches!(action, KeyAction::NavigateUp | KeyAction::NavigateDown);
            let is_date = matches!(action, KeyAction::PreviousDate | KeyAction::NextDate);
            if (is_nav && has_nav) || (is_date && has_dates) {
                continue;
            }

            if let Some(binding) = bindings.iter().find(|b| b.action == action) {
                if is_nav {
                    let label = if *mode == AppMode::Booking { "Time" } else { "Navigate" };
                    items.push(NavBarItem::new("Up/Dn", label));
                    has_nav = true;
                } else if is_date {
                    items.push(NavBarItem::new("Lt/Rt", "Date"));
                    has_dates = true;
                } else {
                    items.push(NavBarItem::new(&binding.display, &binding.description));
                }
            }
        }

        items
    }

    /// Get full help content for a mode (for help overlay)
    pub fn get_help_content(&self, mode: &AppMode) -> Vec<HelpSection> {
        let bindings = self.get_bindings(mode);
        let section = |title: &str, pick: fn(&KeyAction) -> bool| {
            let items: Vec<(String, String)> = bindings
                .iter()
                .filter(|b| pick(&b.action))
                .map(|b| (b.display.clone(), b.description.clone()))
                .collect();
            (!items.is_empty()).then(|| HelpSection {
                title: title.to_string(),
                items,
            })
        };

        [
            section("Navigation", |a| {
                matches!(
                    a,
                    KeyAction::NavigateUp
                        | KeyAction::NavigateDown
                        | KeyAction::PreviousDate
                        | KeyAction::NextDate
                        | KeyAction::SwitchField
                )
            }),
            section("Actions", |a| {
                matches!(
                    a,
                    KeyAction::Select
                        | KeyAction::Continue
                        | KeyAction::ToggleAge
                        | KeyAction::Login
                        | KeyAction::Dashboard
                        | KeyAction::Logout
                )
            }),
            section("General", |a| {
                matches!(a, KeyAction::Back | KeyAction::Help | KeyAction::Quit)
            }),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

/// Navigation bar item for display
#[derive(Debug, Clone)]
pub struct NavBarItem {
    pub key_display: String,
    pub action_label: String,
}

impl NavBarItem {
    fn new(key_display: &str, action_label: &str) -> Self {
        Self {
            key_display: key_display.to_string(),
            action_label: action_label.to_string(),
        }
    }
}

/// Help section for the help overlay
#[derive(Debug, Clone)]
pub struct HelpSection {
    pub title: String,
    pub items: Vec<(String, String)>,
}
