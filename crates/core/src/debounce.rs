//! Delay-and-supersede dispatch.
//!
//! A [`Debouncer`] keeps at most one task pending on a [`Scheduler`]. Every
//! call cancels the previous handle before scheduling the new task, so a burst
//! of calls inside the quiescence window collapses into one execution carrying
//! the last value.
//!
//! [`TimerQueue`] is the single-threaded scheduler the controller runs on. It
//! never reads the wall clock on its own: the host advances it explicitly,
//! which keeps every transition reproducible in tests.

use std::mem;
use std::time::{Duration, Instant};

/// Quiescence window applied when no other delay is configured.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(250);

/// Opaque handle for a scheduled task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(u64);

/// Anything that can run a task after a delay and cancel it beforehand.
pub trait Scheduler {
	type Task;

	/// Schedule `task` to become due after `delay`.
	fn schedule(&mut self, delay: Duration, task: Self::Task) -> TaskHandle;

	/// Cancel a pending task. Returns `false` when the handle already fired or
	/// was never issued by this scheduler.
	fn cancel(&mut self, handle: TaskHandle) -> bool;
}

struct Timer<T> {
	handle: TaskHandle,
	deadline: Instant,
	task: T,
}

/// Deadline-ordered task queue driven by an explicit clock.
pub struct TimerQueue<T> {
	now: Instant,
	next_id: u64,
	pending: Vec<Timer<T>>,
}

impl<T> Default for TimerQueue<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T> TimerQueue<T> {
	/// Create a queue whose clock starts at the current instant.
	pub fn new() -> Self {
		Self::starting_at(Instant::now())
	}

	/// Create a queue whose clock starts at `now`.
	pub fn starting_at(now: Instant) -> Self {
		Self {
			now,
			next_id: 0,
			pending: Vec::new(),
		}
	}

	/// The instant the queue was last advanced to.
	pub fn now(&self) -> Instant {
		self.now
	}

	pub fn len(&self) -> usize {
		self.pending.len()
	}

	pub fn is_empty(&self) -> bool {
		self.pending.is_empty()
	}

	/// Earliest deadline among pending tasks.
	pub fn next_deadline(&self) -> Option<Instant> {
		self.pending.iter().map(|timer| timer.deadline).min()
	}

	/// Move the clock forward and drain every task that is now due, earliest
	/// deadline first. An instant earlier than the current clock leaves the
	/// clock untouched.
	pub fn advance_to(&mut self, now: Instant) -> Vec<(TaskHandle, T)> {
		if now > self.now {
			self.now = now;
		}
		let clock = self.now;
		let (mut due, waiting): (Vec<_>, Vec<_>) = mem::take(&mut self.pending)
			.into_iter()
			.partition(|timer| timer.deadline <= clock);
		self.pending = waiting;
		due.sort_by_key(|timer| (timer.deadline, timer.handle));
		due.into_iter().map(|timer| (timer.handle, timer.task)).collect()
	}
}

impl<T> Scheduler for TimerQueue<T> {
	type Task = T;

	fn schedule(&mut self, delay: Duration, task: T) -> TaskHandle {
		self.next_id = self.next_id.wrapping_add(1);
		let handle = TaskHandle(self.next_id);
		self.pending.push(Timer {
			handle,
			deadline: self.now + delay,
			task,
		});
		handle
	}

	fn cancel(&mut self, handle: TaskHandle) -> bool {
		let before = self.pending.len();
		self.pending.retain(|timer| timer.handle != handle);
		self.pending.len() != before
	}
}

/// Keeps a single pending task alive on a scheduler.
#[derive(Clone, Debug)]
pub struct Debouncer {
	delay: Duration,
	pending: Option<TaskHandle>,
}

impl Default for Debouncer {
	fn default() -> Self {
		Self::new(DEFAULT_DEBOUNCE)
	}
}

impl Debouncer {
	pub fn new(delay: Duration) -> Self {
		Self {
			delay,
			pending: None,
		}
	}

	pub fn delay(&self) -> Duration {
		self.delay
	}

	pub fn pending(&self) -> Option<TaskHandle> {
		self.pending
	}

	/// Supersede any pending task with `task`.
	pub fn call<S: Scheduler>(&mut self, scheduler: &mut S, task: S::Task) -> TaskHandle {
		if let Some(previous) = self.pending.take() {
			scheduler.cancel(previous);
		}
		let handle = scheduler.schedule(self.delay, task);
		self.pending = Some(handle);
		handle
	}

	/// Record that `handle` fired. Returns `false` for a handle that is no
	/// longer the pending one.
	pub fn acknowledge(&mut self, handle: TaskHandle) -> bool {
		if self.pending == Some(handle) {
			self.pending = None;
			true
		} else {
			false
		}
	}
}
