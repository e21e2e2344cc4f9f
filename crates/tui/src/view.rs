//! Terminal implementation of the controller's view capabilities.
//!
//! Everything the controller asks for lands in plain fields here and is only
//! turned into widgets when the frame is drawn. Geometry is expressed in
//! content rows relative to the top of the visible results viewport.

use std::collections::HashSet;

use roster_core::{Bounds, Element, ResultsContent, ScrollBehavior, View};

use crate::components::results::{content_height, entry_offset};
use crate::input::QueryInput;

/// Which control receives keyboard input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Focus {
	#[default]
	Input,
	ClearButton,
}

/// Current scroll offset and the offset a smooth scroll is heading to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScrollState {
	pub offset: i32,
	pub target: i32,
}

impl ScrollState {
	/// Move one animation step toward the target. Returns `true` while moving.
	pub fn step(&mut self) -> bool {
		let distance = self.target - self.offset;
		if distance == 0 {
			return false;
		}
		let stride = (distance.abs() / 2).max(1);
		self.offset += distance.signum() * stride;
		true
	}

	fn jump(&mut self, offset: i32) {
		self.offset = offset;
		self.target = offset;
	}
}

pub struct TerminalView {
	pub input: QueryInput,
	pub focus: Focus,
	hidden: HashSet<Element>,
	pub input_active: bool,
	pub content: ResultsContent,
	pub highlighted: Option<usize>,
	pub scroll: ScrollState,
	/// Rows available to the results list, refreshed on every draw.
	pub viewport_rows: i32,
	header_rows: i32,
}

impl TerminalView {
	pub fn new(initial_query: &str) -> Self {
		Self {
			input: QueryInput::new(initial_query),
			focus: Focus::Input,
			hidden: HashSet::from([Element::ClearButton, Element::Loader, Element::ResultsPanel]),
			input_active: false,
			content: ResultsContent::Empty,
			highlighted: None,
			scroll: ScrollState::default(),
			viewport_rows: 0,
			header_rows: 1,
		}
	}

	/// Rows a category header occupies when revealing the first item under it.
	pub fn with_header_rows(mut self, rows: i32) -> Self {
		self.header_rows = rows.max(0);
		self
	}

	pub fn is_visible(&self, element: Element) -> bool {
		!self.hidden.contains(&element)
	}

	/// Largest offset that still fills the viewport.
	pub fn max_scroll(&self) -> i32 {
		let total = self.content.list().map_or(0, content_height);
		(total - self.viewport_rows).max(0)
	}

	/// Update the viewport height and keep the scroll offsets inside it.
	pub fn set_viewport_rows(&mut self, rows: i32) {
		self.viewport_rows = rows.max(0);
		let max = self.max_scroll();
		self.scroll.offset = self.scroll.offset.min(max);
		self.scroll.target = self.scroll.target.min(max);
	}

	/// Advance a running smooth scroll by one frame.
	pub fn animate(&mut self) -> bool {
		self.scroll.step()
	}
}

impl View for TerminalView {
	fn set_input_text(&mut self, text: &str) {
		self.input.set_text(text);
	}

	fn focus_input(&mut self) {
		self.focus = Focus::Input;
	}

	fn set_hidden(&mut self, element: Element, hidden: bool) {
		if hidden {
			self.hidden.insert(element);
			if element == Element::ClearButton && self.focus == Focus::ClearButton {
				self.focus = Focus::Input;
			}
		} else {
			self.hidden.remove(&element);
		}
	}

	fn set_input_active(&mut self, active: bool) {
		self.input_active = active;
	}

	fn replace_results(&mut self, content: ResultsContent) {
		self.content = content;
		self.highlighted = None;
		let max = self.max_scroll();
		self.scroll.offset = self.scroll.offset.min(max);
		self.scroll.target = self.scroll.target.min(max);
	}

	fn set_item_highlight(&mut self, item: usize, highlighted: bool) {
		if highlighted {
			self.highlighted = Some(item);
		} else if self.highlighted == Some(item) {
			self.highlighted = None;
		}
	}

	fn panel_bounds(&self) -> Bounds {
		Bounds::new(0, self.viewport_rows)
	}

	fn item_bounds(&self, item: usize) -> Option<Bounds> {
		let list = self.content.list()?;
		let (top, height) = entry_offset(list, list.entry_of_item(item)?)?;
		let top = top - self.scroll.target;
		Some(Bounds::new(top, top + height))
	}

	fn header_height(&self) -> i32 {
		self.header_rows
	}

	fn scroll_to_top(&mut self) {
		self.scroll.jump(0);
	}

	fn scroll_by(&mut self, delta: i32, behavior: ScrollBehavior) {
		let target = (self.scroll.target + delta).clamp(0, self.max_scroll());
		match behavior {
			ScrollBehavior::Smooth => self.scroll.target = target,
			ScrollBehavior::Instant => self.scroll.jump(target),
		}
	}
}
