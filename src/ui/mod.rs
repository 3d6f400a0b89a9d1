//! Terminal user interface.
//!
//! # Module Structure
//!
//! - `loop_runner` - Main event loop and terminal management
//! - `input` - Keyboard input dispatch
//! - `render` - Frame layout and overlays
//! - `nav` - Section index and title list
//! - `viewer` - Read-only article display
//! - `editor` - Title/body form
//! - `action_bar` - Add/Edit/Delete buttons
//! - `status` - Status line
//! - `help` - Keybinding overlay

mod action_bar;
mod editor;
mod help;
mod input;
mod loop_runner;
mod nav;
mod render;
mod status;
pub mod viewer;

pub use loop_runner::{run, Flow};
pub use render::draw;
