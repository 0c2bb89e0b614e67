//! User Interface module
//!
//! Keybindings, layout and text helpers, and the terminal front end.

pub mod input;
pub mod layout;
pub mod terminal;
pub mod text;

pub use input::{Action, KeyBindings};
pub use terminal::TerminalUi;
