//! Simplepedia: a terminal browser and editor for a collection of articles
//! served by a REST API.
//!
//! The crate is split into a pure core (the [`app::reduce`] state
//! transition, the [`index`] helpers, and the [`editor`] form) and the
//! shells around it: the HTTP client in [`api`] and the terminal UI in [`ui`].

pub mod action_bar;
pub mod api;
pub mod app;
pub mod config;
pub mod editor;
pub mod index;
pub mod keybindings;
pub mod model;
pub mod nav;
pub mod ui;
pub mod util;
