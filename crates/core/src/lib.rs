//! Core search-and-render state machine for `roster`.
//!
//! The crate is split along the seams of the widget: [`engine`] matches a
//! query against the record collection, [`debounce`] collapses bursts of
//! keystrokes into a single dispatch, [`render`] turns grouped matches into a
//! flat list of headers and items, and [`controller`] ties those together into
//! explicit state transitions that emit [`view::Effect`]s. Hosts implement
//! [`view::View`] and feed user input back through
//! [`controller::ControllerEvent`].

pub mod controller;
pub mod debounce;
pub mod engine;
pub mod record;
pub mod render;
pub mod view;

pub use controller::{
	ControllerEvent, ControllerOptions, DEFAULT_NO_RESULTS_MESSAGE, Direction, PointerKind,
	PointerTarget, SearchController, SearchState,
};
pub use debounce::{DEFAULT_DEBOUNCE, Debouncer, Scheduler, TaskHandle, TimerQueue};
pub use engine::{GroupedResults, search};
pub use record::{FieldKey, FieldValue, Record};
pub use render::{Entry, RenderedRecord, ResultList, ResultsContent, Segment, highlight, plain_text};
pub use view::{Bounds, Effect, Element, ScrollBehavior, View, apply, scroll_selection_into_view};
