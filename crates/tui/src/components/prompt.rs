use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};
use roster_core::Element;
use throbber_widgets_tui::{Throbber, ThrobberState};

use crate::style::Theme;
use crate::view::{Focus, TerminalView};

const PROMPT: &str = "> ";
const CLEAR_SYMBOL: &str = "✕";

pub struct PromptContext<'a> {
	pub view: &'a TerminalView,
	pub theme: &'a Theme,
	pub throbber_state: &'a ThrobberState,
	pub area: Rect,
}

/// Draw the bordered query line. Returns the cell occupied by the clear
/// affordance when it is shown, so pointer clicks can be routed to it.
pub fn render_prompt(frame: &mut Frame, ctx: PromptContext<'_>) -> Option<Rect> {
	let PromptContext {
		view,
		theme,
		throbber_state,
		area,
	} = ctx;

	let block = Block::bordered()
		.border_type(BorderType::Rounded)
		.border_style(theme.input_border(view.input_active));
	let inner = block.inner(area);
	frame.render_widget(block, area);
	if inner.width == 0 || inner.height == 0 {
		return None;
	}

	let [prompt_area, text_area, status_area] = Layout::horizontal([
		Constraint::Length(PROMPT.len() as u16),
		Constraint::Min(1),
		Constraint::Length(3),
	])
	.areas(inner);

	frame.render_widget(Span::styled(PROMPT, theme.prompt), prompt_area);
	view.input.render_textarea(frame, text_area);

	// Loader and clear affordance sit side by side: [loader][clear][pad].
	let [loader_cell, clear_cell, _] =
		Layout::horizontal([Constraint::Length(1); 3]).areas(status_area);

	if view.is_visible(Element::Loader) {
		let spinner = Throbber::default()
			.style(theme.prompt)
			.throbber_style(theme.prompt);
		frame.render_widget(
			Paragraph::new(Line::from(spinner.to_symbol_span(throbber_state))),
			loader_cell,
		);
	}

	if !view.is_visible(Element::ClearButton) || clear_cell.width == 0 {
		return None;
	}
	let focused = view.focus == Focus::ClearButton;
	frame.render_widget(
		Paragraph::new(Span::styled(CLEAR_SYMBOL, theme.clear_button(focused))),
		clear_cell,
	);
	Some(clear_cell)
}
