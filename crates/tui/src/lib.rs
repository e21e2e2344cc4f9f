//! Terminal front-end for the roster search widget.
//!
//! The crate hosts a [`roster_core::SearchController`] inside a ratatui
//! application: a bordered query line with a loader and clear affordance,
//! and a scrollable results panel grouped by matching field.

mod app;
pub mod components;
pub mod input;
mod render;
mod runtime;
pub mod style;
pub mod view;

#[cfg(test)]
mod snapshot_tests;

pub use app::{App, AppOptions, Flow};
pub use runtime::run;

pub use crate::input::QueryInput;
pub use crate::style::Theme;
pub use crate::view::{Focus, TerminalView};
