use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};
use roster_core::{Element, Entry, ResultList, ResultsContent, Segment};

use super::scrollbar::{ScrollMetrics, render_scrollbar};
use crate::style::Theme;
use crate::view::TerminalView;

const INDENT: &str = "  ";

/// Rows an entry occupies: headers take one, items two or three depending on
/// whether the record lists any items.
pub fn entry_height(entry: &Entry) -> i32 {
	match entry {
		Entry::Header { .. } => 1,
		Entry::Item { record, .. } if record.items.is_empty() => 2,
		Entry::Item { .. } => 3,
	}
}

pub fn content_height(list: &ResultList) -> i32 {
	list.entries().iter().map(entry_height).sum()
}

/// Top row and height of the entry at `position`.
pub fn entry_offset(list: &ResultList, position: usize) -> Option<(i32, i32)> {
	let entry = list.entries().get(position)?;
	let top = list.entries()[..position].iter().map(entry_height).sum();
	Some((top, entry_height(entry)))
}

/// Entry position covering content row `row`.
pub fn entry_at_row(list: &ResultList, row: i32) -> Option<usize> {
	if row < 0 {
		return None;
	}
	let mut top = 0;
	for (position, entry) in list.entries().iter().enumerate() {
		let bottom = top + entry_height(entry);
		if row < bottom {
			return Some(position);
		}
		top = bottom;
	}
	None
}

fn spans(segments: &[Segment], mark: Style) -> impl Iterator<Item = Span<'static>> + '_ {
	segments.iter().map(move |segment| {
		if segment.marked {
			Span::styled(segment.text.clone(), mark)
		} else {
			Span::raw(segment.text.clone())
		}
	})
}

/// Lines for a single entry.
pub fn entry_lines(entry: &Entry, highlighted: bool, theme: &Theme) -> Vec<Line<'static>> {
	let record = match entry {
		Entry::Header { label, .. } => return vec![Line::styled(label.clone(), theme.header)],
		Entry::Item { record, .. } => record,
	};

	let mut heading: Vec<Span<'static>> = spans(&record.id, theme.mark).collect();
	heading.push(Span::raw(INDENT));
	heading.extend(spans(&record.name, theme.mark));

	let mut lines = vec![Line::from(heading)];

	if !record.items.is_empty() {
		let mut items = vec![Span::raw(INDENT)];
		for (idx, item) in record.items.iter().enumerate() {
			if idx > 0 {
				items.push(Span::styled(", ", theme.empty));
			}
			items.extend(spans(item, theme.mark));
		}
		lines.push(Line::from(items));
	}

	let mut location = vec![Span::raw(INDENT)];
	location.extend(spans(&record.address, theme.mark));
	location.push(Span::raw(", "));
	location.extend(spans(&record.pincode, theme.mark));
	lines.push(Line::from(location));

	if highlighted {
		lines
			.into_iter()
			.map(|line| line.patch_style(theme.row_highlight))
			.collect()
	} else {
		lines
	}
}

pub struct ResultsContext<'a> {
	pub view: &'a TerminalView,
	pub theme: &'a Theme,
	pub area: Rect,
}

/// Draw the results panel: a bordered list of headers and items, or the
/// "no results" message. Nothing is drawn while the panel is hidden.
pub fn render_results(frame: &mut Frame, ctx: ResultsContext<'_>) {
	let ResultsContext { view, theme, area } = ctx;
	if !view.is_visible(Element::ResultsPanel) || area.height < 3 {
		return;
	}

	let block = Block::bordered()
		.border_type(BorderType::Rounded)
		.border_style(theme.border);
	let inner = block.inner(area);
	frame.render_widget(block, area);

	let list = match &view.content {
		ResultsContent::Empty => return,
		ResultsContent::NoResults(message) => {
			frame.render_widget(Paragraph::new(message.as_str()).style(theme.empty), inner);
			return;
		}
		ResultsContent::List(list) => list,
	};

	let offset = usize::try_from(view.scroll.offset).unwrap_or_default();
	let visible = usize::from(inner.height);
	let lines: Vec<Line<'static>> = list
		.entries()
		.iter()
		.flat_map(|entry| {
			let highlighted = matches!(
				entry,
				Entry::Item { index, .. } if view.highlighted == Some(*index)
			);
			entry_lines(entry, highlighted, theme)
		})
		.skip(offset)
		.take(visible)
		.collect();
	frame.render_widget(Paragraph::new(lines), inner);

	let total = usize::try_from(content_height(list)).unwrap_or_default();
	let metrics = ScrollMetrics::compute(total, visible);
	let track = Rect {
		x: area.x,
		y: inner.y,
		width: area.width,
		height: inner.height,
	};
	render_scrollbar(frame, track, metrics, offset, theme);
}

#[cfg(test)]
mod tests {
	use roster_core::{Record, search};

	use super::*;

	fn list() -> ResultList {
		let records = vec![
			Record::new("1", "Ann Lee", "560001", ["pen", "ink"], "1 Oak Rd"),
			Record::new("2", "Bob Ann", "560099", Vec::<String>::new(), "9 Ann St"),
		];
		ResultList::build(&search(&records, "Ann"), "Ann")
	}

	fn text(line: &Line<'_>) -> String {
		line.spans.iter().map(|span| span.content.as_ref()).collect()
	}

	#[test]
	fn rows_are_mapped_back_to_entries() {
		let list = list();
		assert_eq!(content_height(&list), 9);
		assert_eq!(entry_at_row(&list, 0), Some(0));
		assert_eq!(entry_at_row(&list, 3), Some(1));
		assert_eq!(entry_at_row(&list, 4), Some(2));
		assert_eq!(entry_at_row(&list, 6), Some(3));
		assert_eq!(entry_at_row(&list, 9), None);
		assert_eq!(entry_at_row(&list, -1), None);
		assert_eq!(entry_offset(&list, 4), Some((7, 2)));
	}

	#[test]
	fn item_lines_mark_only_the_group_field() {
		let list = list();
		let theme = Theme::default();
		let lines = entry_lines(&list.entries()[4], false, &theme);
		assert_eq!(
			lines.iter().map(text).collect::<Vec<_>>(),
			["2  Bob Ann", "  9 Ann St, 560099"]
		);
		let marked: Vec<_> = lines
			.iter()
			.flat_map(|line| line.spans.iter())
			.filter(|span| span.style == theme.mark)
			.map(|span| span.content.as_ref())
			.collect();
		assert_eq!(marked, ["Ann"]);
		assert_eq!(lines[0].spans.len(), 3);
	}

	#[test]
	fn items_line_joins_every_item() {
		let list = list();
		let lines = entry_lines(&list.entries()[1], false, &Theme::default());
		assert_eq!(text(&lines[1]), "  pen, ink");
	}
}
