//! Reusable UI components
//!
//! - `keybindings` - Context-aware key registry for the nav bar and help
//! - `help_overlay` - Help popup built from the key registry

pub mod help_overlay;
pub mod keybindings;
