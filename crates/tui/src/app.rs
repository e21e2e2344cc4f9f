//! Application state and input routing for the terminal widget.
//!
//! The [`App`] owns the controller and its terminal view. Key and mouse events
//! are translated into [`ControllerEvent`]s; the effects that come back are
//! applied to the view straight away.

use std::time::Instant;

use ratatui::crossterm::event::{
	KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;
use roster_core::{
	ControllerEvent, ControllerOptions, Direction, Element, Entry, PointerKind, PointerTarget,
	Record, SearchController, ScrollBehavior, View, apply,
};
use throbber_widgets_tui::ThrobberState;
use tracing::debug;

use crate::components::point_in_rect;
use crate::components::results::entry_at_row;
use crate::style::Theme;
use crate::view::{Focus, TerminalView};

/// Host-level options on top of the controller's.
#[derive(Clone, Debug)]
pub struct AppOptions {
	pub controller: ControllerOptions,
	/// Text placed in the input before the first frame.
	pub initial_query: String,
	/// Extra rows kept visible above an item that opens a category.
	pub header_height: u16,
	pub theme: Theme,
}

impl Default for AppOptions {
	fn default() -> Self {
		Self {
			controller: ControllerOptions::default(),
			initial_query: String::new(),
			header_height: 1,
			theme: Theme::default(),
		}
	}
}

/// Screen areas captured during the last draw.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct HitAreas {
	/// Inner rows of the results panel.
	pub results: Rect,
	pub clear_button: Option<Rect>,
}

/// Whether the event loop should keep running.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
	Continue,
	Exit,
}

pub struct App {
	pub(crate) controller: SearchController,
	pub view: TerminalView,
	pub(crate) theme: Theme,
	pub(crate) throbber_state: ThrobberState,
	pub(crate) areas: HitAreas,
	/// Entry position under the pointer, while it is inside the panel.
	hovered: Option<usize>,
	pointer_inside: bool,
	/// Last known pointer cell.
	pointer: Option<(u16, u16)>,
}

impl App {
	pub fn new(records: Vec<Record>, options: AppOptions) -> Self {
		let AppOptions {
			controller,
			initial_query,
			header_height,
			theme,
		} = options;

		let mut app = Self {
			controller: SearchController::with_options(records, controller),
			view: TerminalView::new("").with_header_rows(i32::from(header_height)),
			theme,
			throbber_state: ThrobberState::default(),
			areas: HitAreas::default(),
			hovered: None,
			pointer_inside: false,
			pointer: None,
		};
		if !initial_query.is_empty() {
			app.dispatch(ControllerEvent::Input(initial_query));
		}
		app
	}

	/// Start the controller's debounce clock at `now`.
	pub fn with_clock(mut self, now: Instant) -> Self {
		self.controller = self.controller.with_clock(now);
		self
	}

	pub fn controller(&self) -> &SearchController {
		&self.controller
	}

	/// Run a controller transition and apply its effects to the view.
	pub fn dispatch(&mut self, event: ControllerEvent) {
		let effects = self.controller.handle(event);
		apply(&mut self.view, effects);
	}

	/// Per-frame housekeeping: fire due searches and advance animations.
	pub fn tick(&mut self, now: Instant) {
		self.dispatch(ControllerEvent::Tick(now));
		self.view.animate();
		if self.view.is_visible(Element::Loader) {
			self.throbber_state.calc_next();
		}
	}

	/// Route a key press. Esc and Ctrl+C end the session.
	pub fn handle_key(&mut self, key: KeyEvent) -> Flow {
		let control = key.modifiers.contains(KeyModifiers::CONTROL);
		match (self.view.focus, key.code) {
			(_, KeyCode::Esc) => return Flow::Exit,
			(_, KeyCode::Char('c')) if control => return Flow::Exit,
			(_, KeyCode::Tab | KeyCode::BackTab) => self.toggle_focus(),
			(Focus::ClearButton, KeyCode::Enter) => {
				self.view.focus_input();
				self.dispatch(ControllerEvent::Clear);
			}
			(Focus::ClearButton, _) => {}
			(Focus::Input, KeyCode::Up | KeyCode::Down) => {
				let direction = if key.code == KeyCode::Up {
					Direction::Up
				} else {
					Direction::Down
				};
				// The highlight leaves the pointer's entry; the next move re-enters it.
				self.hovered = None;
				self.dispatch(ControllerEvent::Navigate(direction));
			}
			(Focus::Input, _) => {
				if self.view.input.input(key) {
					let text = self.view.input.text().to_string();
					self.dispatch(ControllerEvent::Input(text));
				}
			}
		}
		Flow::Continue
	}

	pub fn handle_mouse(&mut self, mouse: MouseEvent) {
		match mouse.kind {
			MouseEventKind::Moved | MouseEventKind::Drag(_) => {
				self.pointer = Some((mouse.column, mouse.row));
				self.update_hover(mouse.column, mouse.row);
			}
			MouseEventKind::Down(MouseButton::Left) => {
				let on_clear = self
					.areas
					.clear_button
					.is_some_and(|area| point_in_rect(mouse.column, mouse.row, area));
				if on_clear {
					self.view.focus_input();
					self.dispatch(ControllerEvent::Clear);
				}
			}
			MouseEventKind::ScrollUp if self.pointer_inside => self.scroll_under_pointer(-1),
			MouseEventKind::ScrollDown if self.pointer_inside => self.scroll_under_pointer(1),
			_ => {}
		}
	}

	/// Wheel scrolling moves other rows under a resting pointer.
	fn scroll_under_pointer(&mut self, delta: i32) {
		self.view.scroll_by(delta, ScrollBehavior::Instant);
		if let Some((column, row)) = self.pointer {
			self.update_hover(column, row);
		}
	}

	fn toggle_focus(&mut self) {
		self.view.focus = match self.view.focus {
			Focus::Input if self.view.is_visible(Element::ClearButton) => Focus::ClearButton,
			_ => Focus::Input,
		};
	}

	/// Translate pointer movement into enter/leave transitions. Enter only
	/// fires when the entry under the pointer changes.
	fn update_hover(&mut self, column: u16, row: u16) {
		let inside = self.view.is_visible(Element::ResultsPanel)
			&& point_in_rect(column, row, self.areas.results);

		if !inside {
			if self.pointer_inside {
				self.pointer_inside = false;
				self.hovered = None;
				self.dispatch(ControllerEvent::Pointer {
					target: PointerTarget::Panel,
					kind: PointerKind::Leave,
				});
			}
			return;
		}

		self.pointer_inside = true;
		let content_row = i32::from(row - self.areas.results.y) + self.view.scroll.offset;
		let position = self
			.view
			.content
			.list()
			.and_then(|list| entry_at_row(list, content_row));
		if position == self.hovered {
			return;
		}
		self.hovered = position;

		let target = match position.and_then(|position| {
			self.view
				.content
				.list()
				.and_then(|list| list.entries().get(position))
		}) {
			Some(Entry::Header { key, .. }) => PointerTarget::Header(*key),
			Some(Entry::Item { index, .. }) => PointerTarget::Item(*index),
			None => PointerTarget::Panel,
		};
		debug!(?target, "pointer entered");
		self.dispatch(ControllerEvent::Pointer {
			target,
			kind: PointerKind::Enter,
		});
	}
}
