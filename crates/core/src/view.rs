//! View effects and the binding that executes them.
//!
//! Controller transitions never touch a view directly. They return [`Effect`]s
//! and [`apply`] replays them against anything implementing [`View`], the
//! narrow capability set a host has to provide.

use tracing::trace;

use crate::render::ResultsContent;

/// Elements whose visibility the controller toggles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Element {
	ClearButton,
	Loader,
	ResultsPanel,
}

/// Vertical extent of something on screen, in view units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Bounds {
	pub top: i32,
	pub bottom: i32,
}

impl Bounds {
	pub const fn new(top: i32, bottom: i32) -> Self {
		Self { top, bottom }
	}

	pub const fn height(&self) -> i32 {
		self.bottom - self.top
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScrollBehavior {
	#[default]
	Smooth,
	Instant,
}

/// A single instruction for the view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
	SetInputText(String),
	FocusInput,
	SetHidden { element: Element, hidden: bool },
	/// Toggle the "search in progress" marking of the input.
	SetInputActive(bool),
	ReplaceResults(ResultsContent),
	SetHighlight { item: usize, highlighted: bool },
	ScrollToTop,
	/// Scroll so that `item` is fully visible.
	Reveal { item: usize, first_in_category: bool },
}

/// Capabilities the controller needs from a host view.
pub trait View {
	fn set_input_text(&mut self, text: &str);
	fn focus_input(&mut self);
	fn set_hidden(&mut self, element: Element, hidden: bool);
	fn set_input_active(&mut self, active: bool);
	fn replace_results(&mut self, content: ResultsContent);
	fn set_item_highlight(&mut self, item: usize, highlighted: bool);
	/// Visible area of the results panel.
	fn panel_bounds(&self) -> Bounds;
	/// Current on-screen extent of an item, `None` when it is not rendered.
	fn item_bounds(&self, item: usize) -> Option<Bounds>;
	/// Height of a category header row.
	fn header_height(&self) -> i32;
	fn scroll_to_top(&mut self);
	fn scroll_by(&mut self, delta: i32, behavior: ScrollBehavior);
}

/// Execute `effects` in order against `view`.
pub fn apply<V: View + ?Sized>(view: &mut V, effects: impl IntoIterator<Item = Effect>) {
	for effect in effects {
		match effect {
			Effect::SetInputText(text) => view.set_input_text(&text),
			Effect::FocusInput => view.focus_input(),
			Effect::SetHidden { element, hidden } => view.set_hidden(element, hidden),
			Effect::SetInputActive(active) => view.set_input_active(active),
			Effect::ReplaceResults(content) => view.replace_results(content),
			Effect::SetHighlight { item, highlighted } => {
				view.set_item_highlight(item, highlighted)
			}
			Effect::ScrollToTop => view.scroll_to_top(),
			Effect::Reveal {
				item,
				first_in_category,
			} => {
				let Some(item_bounds) = view.item_bounds(item) else {
					continue;
				};
				if let Some(delta) = scroll_selection_into_view(
					view.panel_bounds(),
					item_bounds,
					first_in_category,
					view.header_height(),
				) {
					trace!(item, delta, "revealing highlighted item");
					view.scroll_by(delta, ScrollBehavior::Smooth);
				}
			}
		}
	}
}

/// Scroll delta that brings `item` fully inside `panel`.
///
/// Negative values scroll up. When the item sits above the panel and is the
/// first item under a category header, the delta grows by `header_height` so
/// the header stays visible too. An item taller than the panel aligns its top.
pub fn scroll_selection_into_view(
	panel: Bounds,
	item: Bounds,
	first_in_category: bool,
	header_height: i32,
) -> Option<i32> {
	if item.top >= panel.top && item.bottom <= panel.bottom {
		return None;
	}
	if item.top < panel.top {
		let header = if first_in_category { header_height } else { 0 };
		return Some(-(panel.top - item.top + header));
	}
	Some(item.bottom - panel.bottom)
}
