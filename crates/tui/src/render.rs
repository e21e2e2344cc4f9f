use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Margin};

use crate::App;
use crate::components::{PromptContext, ResultsContext, render_prompt, render_results};
use crate::view::Focus;

/// Rows taken by the bordered query line.
const PROMPT_HEIGHT: u16 = 3;

impl App {
	pub(crate) fn draw(&mut self, frame: &mut Frame) {
		let [prompt_area, results_area] =
			Layout::vertical([Constraint::Length(PROMPT_HEIGHT), Constraint::Min(1)])
				.areas(frame.area());

		// Inside the results border.
		let results_inner = results_area.inner(Margin {
			vertical: 1,
			horizontal: 1,
		});
		self.areas.results = results_inner;
		self.view.set_viewport_rows(i32::from(results_inner.height));
		self.view
			.input
			.set_cursor_visible(self.view.focus == Focus::Input);

		self.areas.clear_button = render_prompt(
			frame,
			PromptContext {
				view: &self.view,
				theme: &self.theme,
				throbber_state: &self.throbber_state,
				area: prompt_area,
			},
		);
		render_results(
			frame,
			ResultsContext {
				view: &self.view,
				theme: &self.theme,
				area: results_area,
			},
		);
	}
}
