//! Colors and text styles for the terminal widget.

use ratatui::style::{Color, Modifier, Style};

/// Styles for the pieces of the search widget.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
	/// Category header rows.
	pub header: Style,
	/// The highlighted result item.
	pub row_highlight: Style,
	/// Prompt glyph in front of the query.
	pub prompt: Style,
	/// "No results" message and secondary text.
	pub empty: Style,
	/// Query hits inside a result.
	pub mark: Style,
	/// Border of an idle input.
	pub border: Style,
	/// Border of the input while a search is pending or shown.
	pub border_active: Style,
}

impl Default for Theme {
	fn default() -> Self {
		Self {
			header: Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD),
			row_highlight: Style::new().bg(Color::DarkGray),
			prompt: Style::new().fg(Color::Cyan),
			empty: Style::new().fg(Color::Gray).add_modifier(Modifier::ITALIC),
			mark: Style::new().fg(Color::Black).bg(Color::Yellow),
			border: Style::new().fg(Color::DarkGray),
			border_active: Style::new().fg(Color::Cyan),
		}
	}
}

impl Theme {
	/// Border style for the input depending on whether it is active.
	#[must_use]
	pub fn input_border(&self, active: bool) -> Style {
		if active { self.border_active } else { self.border }
	}

	/// Style for the clear affordance, inverted when it holds focus.
	#[must_use]
	pub fn clear_button(&self, focused: bool) -> Style {
		if focused {
			self.prompt.add_modifier(Modifier::REVERSED)
		} else {
			self.prompt
		}
	}
}
