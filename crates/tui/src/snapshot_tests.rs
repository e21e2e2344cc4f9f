use std::time::{Duration, Instant};

use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::crossterm::event::{KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use roster_core::{ControllerEvent, Element, Record};

use crate::{App, AppOptions};

fn records() -> Vec<Record> {
	vec![
		Record::new("1", "Ann Lee", "560001", ["pen"], "1 Oak Rd"),
		Record::new("2", "Bob Ann", "560099", Vec::<String>::new(), "9 Ann St"),
	]
}

fn settled_app(query: &str) -> App {
	let start = Instant::now();
	let mut app = App::new(records(), AppOptions::default()).with_clock(start);
	app.dispatch(ControllerEvent::Input(query.to_string()));
	app.tick(start + Duration::from_millis(300));
	app
}

fn draw(app: &mut App, width: u16, height: u16) -> String {
	let backend = TestBackend::new(width, height);
	let mut terminal = Terminal::new(backend).expect("terminal");
	terminal.draw(|frame| app.draw(frame)).expect("draw frame");
	buffer_to_string(terminal.backend().buffer())
}

#[test]
fn grouped_results_snapshot() {
	let mut app = settled_app("Ann");
	let snapshot = draw(&mut app, 44, 14);
	insta::assert_snapshot!("grouped_results", snapshot);
}

#[test]
fn no_results_message_is_drawn() {
	let mut app = settled_app("Zed");
	let snapshot = draw(&mut app, 44, 8);
	let lines: Vec<&str> = snapshot.lines().collect();
	assert!(lines[4].starts_with("│No User found"), "{snapshot}");
	assert!(lines[1].contains('✕'));
}

#[test]
fn idle_widget_shows_only_the_prompt() {
	let mut app = App::new(records(), AppOptions::default());
	let snapshot = draw(&mut app, 30, 8);
	let lines: Vec<&str> = snapshot.lines().collect();
	assert!(lines[1].starts_with("│> "));
	assert!(!lines[1].contains('✕'));
	assert!(lines[3..].iter().all(|line| line.trim().is_empty()), "{snapshot}");
}

#[test]
fn clear_button_stays_clickable_while_pending() {
	let mut app = App::new(records(), AppOptions::default());
	app.dispatch(ControllerEvent::Input("Ann".into()));
	assert!(app.view.is_visible(Element::Loader));
	let snapshot = draw(&mut app, 30, 8);
	let lines: Vec<&str> = snapshot.lines().collect();
	assert!(lines[1].contains('✕'), "{snapshot}");
	assert!(lines[3..].iter().all(|line| line.trim().is_empty()), "{snapshot}");

	let cell = app.areas.clear_button.expect("clear cell");
	assert_eq!(cell, Rect::new(27, 1, 1, 1));
	app.handle_mouse(MouseEvent {
		kind: MouseEventKind::Down(MouseButton::Left),
		column: cell.x,
		row: cell.y,
		modifiers: KeyModifiers::NONE,
	});
	assert_eq!(app.view.input.text(), "");
	assert!(!app.view.is_visible(Element::ClearButton));
}

#[test]
fn highlighted_item_scrolls_into_small_viewport() {
	let mut app = settled_app("Ann");
	draw(&mut app, 44, 8);
	for _ in 0..3 {
		app.dispatch(ControllerEvent::Navigate(roster_core::Direction::Down));
	}
	while app.view.animate() {}
	let snapshot = draw(&mut app, 44, 8);
	assert!(snapshot.contains("  9 Ann St, 560099"), "{snapshot}");
	assert!(app.view.scroll.offset > 0);
}

fn buffer_to_string(buf: &Buffer) -> String {
	let mut lines = Vec::new();
	for y in 0..buf.area.height {
		let mut line = String::new();
		for x in 0..buf.area.width {
			line.push_str(buf[(x, y)].symbol());
		}
		lines.push(line);
	}
	lines.join("\n")
}
