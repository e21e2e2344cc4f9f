//! Search-and-render state machine.
//!
//! [`SearchController`] owns the [`SearchState`] and the rendered
//! [`ResultsContent`]. Each transition mutates that state and returns the
//! [`Effect`]s a view has to perform; nothing is pushed to a view implicitly.
//! Hosts route user input through [`SearchController::handle`].

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::debounce::{DEFAULT_DEBOUNCE, Debouncer, TimerQueue};
use crate::engine::{GroupedResults, search};
use crate::record::{FieldKey, Record};
use crate::render::{ResultList, ResultsContent};
use crate::view::{Effect, Element};

/// Message shown when a query matched nothing.
pub const DEFAULT_NO_RESULTS_MESSAGE: &str = "No User found";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
	Up,
	Down,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerKind {
	Enter,
	Leave,
}

/// What the pointer is over inside the results panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerTarget {
	Header(FieldKey),
	Item(usize),
	/// Anywhere else in the panel, such as the "no results" message.
	Panel,
}

/// User-visible search state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchState {
	/// Raw text shown in the input field.
	pub input: String,
	/// Trimmed text the last dispatch was made with.
	pub query: String,
	pub is_loading: bool,
	/// Index into the navigable items of the rendered list.
	pub highlighted: Option<usize>,
}

/// Inputs the controller reacts to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ControllerEvent {
	/// The input field now holds this text.
	Input(String),
	Clear,
	Navigate(Direction),
	Pointer {
		target: PointerTarget,
		kind: PointerKind,
	},
	/// Advance the debounce clock.
	Tick(Instant),
}

/// Tunables for a [`SearchController`].
#[derive(Clone, Debug)]
pub struct ControllerOptions {
	pub debounce: Duration,
	pub no_results_message: String,
}

impl Default for ControllerOptions {
	fn default() -> Self {
		Self {
			debounce: DEFAULT_DEBOUNCE,
			no_results_message: DEFAULT_NO_RESULTS_MESSAGE.to_string(),
		}
	}
}

pub struct SearchController {
	records: Arc<[Record]>,
	state: SearchState,
	content: ResultsContent,
	timers: TimerQueue<String>,
	debouncer: Debouncer,
	no_results_message: String,
	searches_run: u64,
}

impl SearchController {
	pub fn new(records: impl Into<Arc<[Record]>>) -> Self {
		Self::with_options(records, ControllerOptions::default())
	}

	pub fn with_options(records: impl Into<Arc<[Record]>>, options: ControllerOptions) -> Self {
		Self {
			records: records.into(),
			state: SearchState::default(),
			content: ResultsContent::Empty,
			timers: TimerQueue::new(),
			debouncer: Debouncer::new(options.debounce),
			no_results_message: options.no_results_message,
			searches_run: 0,
		}
	}

	/// Start the debounce clock at `now` instead of the current instant.
	pub fn with_clock(mut self, now: Instant) -> Self {
		self.timers = TimerQueue::starting_at(now);
		self
	}

	pub fn state(&self) -> &SearchState {
		&self.state
	}

	pub fn content(&self) -> &ResultsContent {
		&self.content
	}

	pub fn records(&self) -> &[Record] {
		&self.records
	}

	/// How many times the search engine has run.
	pub fn searches_run(&self) -> u64 {
		self.searches_run
	}

	/// Deadline of the pending search, if one is scheduled.
	pub fn next_deadline(&self) -> Option<Instant> {
		self.timers.next_deadline()
	}

	/// Dispatch an event to its handler.
	pub fn handle(&mut self, event: ControllerEvent) -> Vec<Effect> {
		match event {
			ControllerEvent::Input(raw) => self.set_query(&raw),
			ControllerEvent::Clear => self.clear_query(),
			ControllerEvent::Navigate(direction) => self.navigate(direction),
			ControllerEvent::Pointer { target, kind } => {
				self.set_highlight_from_pointer(target, kind)
			}
			ControllerEvent::Tick(now) => self.tick(now),
		}
	}

	/// Take new input text and schedule a search for its trimmed form.
	///
	/// A non-empty query switches the view into its loading state right away;
	/// the results only change once the debounce window elapses.
	pub fn set_query(&mut self, raw: &str) -> Vec<Effect> {
		let query = raw.trim().to_string();
		self.state.input = raw.to_string();

		let mut effects = vec![
			Effect::SetInputText(raw.to_string()),
			Effect::SetHidden {
				element: Element::ClearButton,
				hidden: raw.is_empty(),
			},
		];

		if !query.is_empty() {
			self.state.is_loading = true;
			effects.extend([
				Effect::SetHidden {
					element: Element::Loader,
					hidden: false,
				},
				Effect::SetHidden {
					element: Element::ResultsPanel,
					hidden: true,
				},
				Effect::SetInputActive(true),
			]);
		}

		trace!(query = %query, "scheduling search");
		self.state.query = query.clone();
		self.debouncer.call(&mut self.timers, query);
		effects
	}

	pub fn clear_query(&mut self) -> Vec<Effect> {
		self.set_query("")
	}

	/// Advance the debounce clock and run the search if it became due.
	pub fn tick(&mut self, now: Instant) -> Vec<Effect> {
		let mut effects = Vec::new();
		for (handle, query) in self.timers.advance_to(now) {
			if !self.debouncer.acknowledge(handle) {
				continue;
			}
			let results = if query.is_empty() {
				GroupedResults::new()
			} else {
				self.searches_run += 1;
				search(&self.records, &query)
			};
			effects.extend(self.on_search_complete(&query, &results));
		}
		effects
	}

	/// Render the outcome of a search for `query`.
	///
	/// Results for anything other than the latest dispatched query are
	/// dropped.
	pub fn on_search_complete(&mut self, query: &str, results: &GroupedResults) -> Vec<Effect> {
		if query != self.state.query {
			debug!(query, latest = %self.state.query, "discarding stale results");
			return Vec::new();
		}

		self.state.is_loading = false;
		self.state.highlighted = None;

		if query.is_empty() {
			self.content = ResultsContent::Empty;
			return vec![
				Effect::SetHidden {
					element: Element::Loader,
					hidden: true,
				},
				Effect::SetInputActive(false),
				Effect::SetHidden {
					element: Element::ResultsPanel,
					hidden: true,
				},
				Effect::ReplaceResults(ResultsContent::Empty),
			];
		}

		let mut effects = vec![
			Effect::FocusInput,
			Effect::SetHidden {
				element: Element::Loader,
				hidden: true,
			},
			Effect::SetHidden {
				element: Element::ResultsPanel,
				hidden: false,
			},
		];

		if results.is_empty() {
			debug!(query, "no matches");
			self.content = ResultsContent::NoResults(self.no_results_message.clone());
			effects.push(Effect::ReplaceResults(self.content.clone()));
			return effects;
		}

		let list = ResultList::build(results, query);
		debug!(query, items = list.item_count(), "rendering results");
		self.content = ResultsContent::List(list);
		effects.push(Effect::ReplaceResults(self.content.clone()));
		effects.push(Effect::ScrollToTop);
		effects
	}

	/// Move the highlight one item up or down without wrapping.
	pub fn navigate(&mut self, direction: Direction) -> Vec<Effect> {
		let count = self.item_count();
		let next = match (self.state.highlighted, direction) {
			(None, Direction::Up) => return Vec::new(),
			(None, Direction::Down) if count == 0 => return Vec::new(),
			(None, Direction::Down) => Some(0),
			(Some(current), Direction::Up) => current.checked_sub(1),
			(Some(current), Direction::Down) if current + 1 >= count => return Vec::new(),
			(Some(current), Direction::Down) => Some(current + 1),
		};
		trace!(?direction, ?next, "navigate");
		self.set_highlight(next)
	}

	/// Follow the pointer: hovering a header picks its first item, hovering an
	/// item picks that item and leaving the panel clears the highlight.
	pub fn set_highlight_from_pointer(
		&mut self,
		target: PointerTarget,
		kind: PointerKind,
	) -> Vec<Effect> {
		let next = match kind {
			PointerKind::Leave => None,
			PointerKind::Enter => {
				let item = match target {
					PointerTarget::Header(key) => {
						self.content.list().and_then(|list| list.first_item_in(key))
					}
					PointerTarget::Item(item) => (item < self.item_count()).then_some(item),
					PointerTarget::Panel => None,
				};
				let Some(item) = item else {
					return Vec::new();
				};
				Some(item)
			}
		};

		let mut effects = self.set_highlight(next);
		effects.push(Effect::FocusInput);
		effects
	}

	fn item_count(&self) -> usize {
		self.content.list().map_or(0, ResultList::item_count)
	}

	fn set_highlight(&mut self, next: Option<usize>) -> Vec<Effect> {
		if next == self.state.highlighted {
			return Vec::new();
		}

		let mut effects = Vec::with_capacity(3);
		if let Some(previous) = self.state.highlighted {
			effects.push(Effect::SetHighlight {
				item: previous,
				highlighted: false,
			});
		}
		self.state.highlighted = next;
		if let Some(item) = next {
			let first_in_category = self
				.content
				.list()
				.is_some_and(|list| list.is_first_in_category(item));
			effects.push(Effect::SetHighlight {
				item,
				highlighted: true,
			});
			effects.push(Effect::Reveal {
				item,
				first_in_category,
			});
		}
		effects
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const WINDOW: Duration = Duration::from_millis(250);

	fn records() -> Vec<Record> {
		vec![
			Record::new("1", "Ann Lee", "560001", ["pen"], "1 Oak Rd"),
			Record::new("2", "Bob Ann", "560099", Vec::<String>::new(), "9 Ann St"),
		]
	}

	fn searched(query: &str) -> (SearchController, Instant) {
		let start = Instant::now();
		let mut controller = SearchController::new(records()).with_clock(start);
		controller.set_query(query);
		controller.tick(start + WINDOW);
		(controller, start + WINDOW)
	}

	#[test]
	fn starts_empty() {
		let controller = SearchController::new(records());
		assert_eq!(controller.state(), &SearchState::default());
		assert_eq!(controller.content(), &ResultsContent::Empty);
	}

	#[test]
	fn typing_enters_loading_state_before_search() {
		let mut controller = SearchController::new(records());
		let effects = controller.set_query("  Ann ");
		assert!(controller.state().is_loading);
		assert_eq!(controller.state().query, "Ann");
		assert_eq!(controller.state().input, "  Ann ");
		assert_eq!(
			effects,
			[
				Effect::SetInputText("  Ann ".into()),
				Effect::SetHidden { element: Element::ClearButton, hidden: false },
				Effect::SetHidden { element: Element::Loader, hidden: false },
				Effect::SetHidden { element: Element::ResultsPanel, hidden: true },
				Effect::SetInputActive(true),
			]
		);
		assert_eq!(controller.searches_run(), 0);
	}

	#[test]
	fn whitespace_only_input_shows_clear_button_without_loading() {
		let mut controller = SearchController::new(records());
		let effects = controller.set_query("   ");
		assert!(!controller.state().is_loading);
		assert_eq!(effects.len(), 2);
		assert!(effects.contains(&Effect::SetHidden {
			element: Element::ClearButton,
			hidden: false
		}));
	}

	#[test]
	fn completion_renders_list_and_scrolls_to_top() {
		let (controller, _) = searched("Ann");
		let list = controller.content().list().expect("list rendered");
		assert_eq!(list.item_count(), 3);
		assert!(!controller.state().is_loading);
		assert_eq!(controller.searches_run(), 1);
	}

	#[test]
	fn no_match_renders_message() {
		let (controller, _) = searched("zzz");
		assert_eq!(
			controller.content(),
			&ResultsContent::NoResults(DEFAULT_NO_RESULTS_MESSAGE.into())
		);
	}

	#[test]
	fn stale_completion_is_ignored() {
		let mut controller = SearchController::new(records());
		controller.set_query("Bob");
		let effects = controller.on_search_complete("Bo", &search(&records(), "Bo"));
		assert!(effects.is_empty());
		assert_eq!(controller.content(), &ResultsContent::Empty);
	}

	#[test]
	fn keyboard_navigation_is_clamped() {
		let (mut controller, _) = searched("Ann");
		assert!(controller.navigate(Direction::Up).is_empty());

		controller.navigate(Direction::Down);
		assert_eq!(controller.state().highlighted, Some(0));
		controller.navigate(Direction::Down);
		controller.navigate(Direction::Down);
		assert_eq!(controller.state().highlighted, Some(2));
		assert!(controller.navigate(Direction::Down).is_empty());
		assert_eq!(controller.state().highlighted, Some(2));

		controller.navigate(Direction::Up);
		controller.navigate(Direction::Up);
		let effects = controller.navigate(Direction::Up);
		assert_eq!(controller.state().highlighted, None);
		assert_eq!(
			effects,
			[Effect::SetHighlight { item: 0, highlighted: false }]
		);
	}

	#[test]
	fn moving_highlight_clears_previous_first() {
		let (mut controller, _) = searched("Ann");
		controller.navigate(Direction::Down);
		let effects = controller.navigate(Direction::Down);
		assert_eq!(
			effects,
			[
				Effect::SetHighlight { item: 0, highlighted: false },
				Effect::SetHighlight { item: 1, highlighted: true },
				Effect::Reveal { item: 1, first_in_category: false },
			]
		);
	}

	#[test]
	fn down_without_results_is_noop() {
		let (mut controller, _) = searched("zzz");
		assert!(controller.navigate(Direction::Down).is_empty());
		assert_eq!(controller.state().highlighted, None);
	}

	#[test]
	fn pointer_over_header_picks_first_item_of_category() {
		let (mut controller, _) = searched("Ann");
		let effects = controller
			.set_highlight_from_pointer(PointerTarget::Header(FieldKey::Address), PointerKind::Enter);
		assert_eq!(controller.state().highlighted, Some(2));
		assert_eq!(
			effects,
			[
				Effect::SetHighlight { item: 2, highlighted: true },
				Effect::Reveal { item: 2, first_in_category: true },
				Effect::FocusInput,
			]
		);
	}

	#[test]
	fn pointer_leave_clears_and_refocuses() {
		let (mut controller, _) = searched("Ann");
		controller.set_highlight_from_pointer(PointerTarget::Item(1), PointerKind::Enter);
		assert_eq!(controller.state().highlighted, Some(1));
		let effects =
			controller.set_highlight_from_pointer(PointerTarget::Panel, PointerKind::Leave);
		assert_eq!(controller.state().highlighted, None);
		assert_eq!(
			effects,
			[
				Effect::SetHighlight { item: 1, highlighted: false },
				Effect::FocusInput,
			]
		);
	}

	#[test]
	fn pointer_over_missing_item_is_ignored() {
		let (mut controller, _) = searched("Ann");
		assert!(
			controller
				.set_highlight_from_pointer(PointerTarget::Item(7), PointerKind::Enter)
				.is_empty()
		);
		assert!(
			controller
				.set_highlight_from_pointer(PointerTarget::Panel, PointerKind::Enter)
				.is_empty()
		);
	}

	#[test]
	fn new_results_reset_highlight() {
		let (mut controller, at) = searched("Ann");
		controller.navigate(Direction::Down);
		controller.set_query("Bob");
		controller.tick(at + WINDOW);
		assert_eq!(controller.state().highlighted, None);
		assert_eq!(controller.content().list().map(ResultList::item_count), Some(1));
	}

	#[test]
	fn clearing_restores_initial_state() {
		let (mut controller, at) = searched("Ann");
		controller.navigate(Direction::Down);
		let effects = controller.clear_query();
		assert_eq!(
			effects,
			[
				Effect::SetInputText(String::new()),
				Effect::SetHidden { element: Element::ClearButton, hidden: true },
			]
		);
		let effects = controller.tick(at + WINDOW);
		assert!(effects.contains(&Effect::SetHidden {
			element: Element::ResultsPanel,
			hidden: true
		}));
		assert!(effects.contains(&Effect::ReplaceResults(ResultsContent::Empty)));
		assert_eq!(controller.state(), &SearchState::default());
		assert_eq!(controller.content(), &ResultsContent::Empty);
		assert_eq!(controller.searches_run(), 1);
	}

	#[test]
	fn events_dispatch_to_handlers() {
		let start = Instant::now();
		let mut controller = SearchController::new(records()).with_clock(start);
		controller.handle(ControllerEvent::Input("Ann".into()));
		controller.handle(ControllerEvent::Tick(start + WINDOW));
		controller.handle(ControllerEvent::Navigate(Direction::Down));
		assert_eq!(controller.state().highlighted, Some(0));
		controller.handle(ControllerEvent::Pointer {
			target: PointerTarget::Panel,
			kind: PointerKind::Leave,
		});
		assert_eq!(controller.state().highlighted, None);
		controller.handle(ControllerEvent::Clear);
		assert_eq!(controller.state().input, "");
	}
}
