//! Single-line query field backed by `tui-textarea`.

use ratatui::Frame;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use tui_textarea::{CursorMove, TextArea};

/// Editable query text. The buffer always holds exactly one line.
#[derive(Clone, Debug)]
pub struct QueryInput {
	textarea: TextArea<'static>,
	cursor_visible: bool,
}

impl Default for QueryInput {
	fn default() -> Self {
		Self::new("")
	}
}

impl QueryInput {
	pub fn new(initial: impl Into<String>) -> Self {
		let mut input = Self {
			textarea: TextArea::default(),
			cursor_visible: true,
		};
		input.replace(initial.into());
		input
	}

	pub fn text(&self) -> &str {
		self.textarea.lines().first().map_or("", String::as_str)
	}

	/// Replace the text and move the cursor to the end. Setting the current
	/// text again keeps the cursor where it is.
	pub fn set_text(&mut self, text: &str) {
		if self.text() == text {
			return;
		}
		self.replace(text.to_string());
	}

	/// Cursor position in characters.
	pub fn cursor_column(&self) -> usize {
		self.textarea.cursor().1
	}

	/// Show the block cursor only while the field holds focus.
	pub fn set_cursor_visible(&mut self, visible: bool) {
		if self.cursor_visible != visible {
			self.cursor_visible = visible;
			self.apply_styles();
		}
	}

	/// Apply an editing key. Returns `true` when the text changed.
	///
	/// Up and Down belong to list navigation and line breaks are never
	/// inserted, so those keys are not forwarded.
	pub fn input(&mut self, key: KeyEvent) -> bool {
		let control = key.modifiers.contains(KeyModifiers::CONTROL);
		match key.code {
			KeyCode::Up | KeyCode::Down | KeyCode::Enter => false,
			KeyCode::Char('m' | 'n' | 'p') if control => false,
			_ => self.textarea.input(key),
		}
	}

	pub fn render_textarea(&self, frame: &mut Frame, area: Rect) {
		frame.render_widget(&self.textarea, area);
	}

	fn replace(&mut self, text: String) {
		self.textarea = TextArea::new(vec![text]);
		self.textarea.move_cursor(CursorMove::End);
		self.apply_styles();
	}

	fn apply_styles(&mut self) {
		self.textarea.set_cursor_line_style(Style::default());
		let cursor = if self.cursor_visible {
			Style::default().add_modifier(Modifier::REVERSED)
		} else {
			Style::default()
		};
		self.textarea.set_cursor_style(cursor);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn key(code: KeyCode) -> KeyEvent {
		KeyEvent::new(code, KeyModifiers::NONE)
	}

	#[test]
	fn typing_inserts_at_cursor() {
		let mut input = QueryInput::new("Ann");
		input.input(key(KeyCode::Left));
		assert!(input.input(key(KeyCode::Char('x'))));
		assert_eq!(input.text(), "Anxn");
		assert_eq!(input.cursor_column(), 3);
	}

	#[test]
	fn arrows_do_not_edit() {
		let mut input = QueryInput::new("Ann");
		assert!(!input.input(key(KeyCode::Up)));
		assert!(!input.input(key(KeyCode::Down)));
		assert_eq!(input.cursor_column(), 3);
	}

	#[test]
	fn enter_never_breaks_the_line() {
		let mut input = QueryInput::new("Ann");
		assert!(!input.input(key(KeyCode::Enter)));
		assert!(!input.input(KeyEvent::new(KeyCode::Char('m'), KeyModifiers::CONTROL)));
		assert_eq!(input.text(), "Ann");
	}

	#[test]
	fn backspace_handles_multibyte_text() {
		let mut input = QueryInput::new("Zoë");
		assert!(input.input(key(KeyCode::Backspace)));
		assert_eq!(input.text(), "Zo");
		input.input(key(KeyCode::Home));
		assert!(!input.input(key(KeyCode::Backspace)));
		assert!(input.input(key(KeyCode::Delete)));
		assert_eq!(input.text(), "o");
	}

	#[test]
	fn setting_same_text_keeps_cursor() {
		let mut input = QueryInput::new("Ann");
		input.input(key(KeyCode::Home));
		input.set_text("Ann");
		assert_eq!(input.cursor_column(), 0);
		input.set_text("Bob");
		assert_eq!(input.cursor_column(), 3);
		input.set_text("");
		assert_eq!(input.text(), "");
	}
}
