use alloc::vec::Vec;

use crate::{CarouselOptions, CarouselState, ConfigError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Transition {
    target: usize,
    due_ms: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Due {
    Completion,
    AutoAdvance(u64),
}

/// A circular carousel over a fixed, non-empty item sequence.
///
/// Navigation calls are *requests*. A request that arrives while a transition holds the lock is
/// dropped (no queue, no error); otherwise the lock is taken and the index changes once
/// `transition_ms` has elapsed. Auto-advance goes through the same lock, so a tick that lands
/// during a manual transition is simply skipped and the next tick retries.
///
/// Time is supplied by the host: every request takes `now_ms`, and `tick(now_ms)` fires the due
/// completions and auto-advance ticks in chronological order. Use `next_deadline()` to arm a
/// single host timer.
#[derive(Clone, Debug)]
pub struct Carousel<T> {
    items: Vec<T>,
    options: CarouselOptions,
    index: usize,
    transition: Option<Transition>,
    next_auto_ms: Option<u64>,
    torn_down: bool,
}

impl<T> Carousel<T> {
    /// Creates a carousel starting at index 0.
    ///
    /// With `auto_play`, the first auto-advance tick is due at `now_ms + interval_ms`.
    pub fn new(items: Vec<T>, options: CarouselOptions, now_ms: u64) -> Result<Self, ConfigError> {
        if items.is_empty() {
            swarn!("Carousel::new: empty item sequence");
            return Err(ConfigError::EmptyItems);
        }
        options.validate()?;
        sdebug!(
            len = items.len(),
            auto_play = options.auto_play,
            interval_ms = options.interval_ms,
            "Carousel::new"
        );
        let next_auto_ms = options
            .auto_play
            .then(|| now_ms.saturating_add(options.interval_ms));
        Ok(Self {
            items,
            options,
            index: 0,
            transition: None,
            next_auto_ms,
            torn_down: false,
        })
    }

    pub fn options(&self) -> &CarouselOptions {
        &self.options
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always `false`: construction rejects empty sequences.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> &T {
        &self.items[self.index]
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    /// The index an in-flight transition will land on.
    pub fn pending_index(&self) -> Option<usize> {
        self.transition.map(|t| t.target)
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn is_auto_playing(&self) -> bool {
        self.next_auto_ms.is_some()
    }

    pub fn state(&self) -> CarouselState {
        CarouselState {
            index: self.index,
            len: self.items.len(),
            is_transitioning: self.is_transitioning(),
        }
    }

    /// Requests a move to the following item, wrapping at the end.
    ///
    /// Returns `true` when the request took the lock.
    pub fn next(&mut self, now_ms: u64) -> bool {
        let target = (self.index + 1) % self.items.len();
        self.request(target, now_ms)
    }

    /// Requests a move to the preceding item, wrapping at the start.
    pub fn previous(&mut self, now_ms: u64) -> bool {
        let len = self.items.len();
        let target = (self.index + len - 1) % len;
        self.request(target, now_ms)
    }

    /// Requests a jump to `index`.
    ///
    /// Jumping to the current index or past the end is a no-op that never takes the lock.
    pub fn go_to(&mut self, index: usize, now_ms: u64) -> bool {
        if index == self.index || index >= self.items.len() {
            strace!(index, current = self.index, "Carousel::go_to: ignored");
            return false;
        }
        self.request(index, now_ms)
    }

    /// Turns auto-advance on or off. Turning it on restarts the cadence from `now_ms`.
    pub fn set_auto_play(&mut self, auto_play: bool, now_ms: u64) {
        if self.torn_down {
            return;
        }
        self.options.auto_play = auto_play;
        match (auto_play, self.next_auto_ms) {
            (true, None) => {
                self.next_auto_ms = Some(now_ms.saturating_add(self.options.interval_ms));
            }
            (false, Some(_)) => self.next_auto_ms = None,
            _ => {}
        }
    }

    /// The earliest time at which `tick` has work to do.
    pub fn next_deadline(&self) -> Option<u64> {
        if self.torn_down {
            return None;
        }
        match (self.transition.map(|t| t.due_ms), self.next_auto_ms) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Fires every event due at or before `now_ms`, oldest first.
    ///
    /// Missed auto-advance ticks are not replayed: when the host comes back after several
    /// intervals, only the latest due tick fires, the way a throttled interval timer coalesces.
    /// An in-flight transition that completes before that tick is finished first. When a
    /// completion and an auto-advance tick are due at the same instant, the completion runs
    /// first so the tick sees the lock released.
    ///
    /// Returns `true` if the current index changed.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        let start = self.index;
        while let Some(due) = self.next_due(now_ms) {
            match due {
                Due::Completion => self.complete(),
                Due::AutoAdvance(first) => {
                    let interval = self.options.interval_ms;
                    let missed = (now_ms - first) / interval;
                    let at = first + missed * interval;
                    if self.transition.is_some_and(|t| t.due_ms <= at) {
                        self.complete();
                        continue;
                    }
                    // Past the end of the clock there is no later slot to schedule.
                    self.next_auto_ms = at.checked_add(interval);
                    strace!(at, missed, "Carousel: auto-advance tick");
                    self.next(at);
                }
            }
        }
        self.index != start
    }

    /// Cancels auto-advance and any in-flight transition, releasing the lock.
    ///
    /// No index change and no callback happens afterwards.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        sdebug!(
            index = self.index,
            in_flight = self.transition.is_some(),
            "Carousel::teardown"
        );
        self.torn_down = true;
        self.transition = None;
        self.next_auto_ms = None;
    }

    fn next_due(&self, now_ms: u64) -> Option<Due> {
        if self.torn_down {
            return None;
        }
        let completion = self
            .transition
            .map(|t| t.due_ms)
            .filter(|&at| at <= now_ms);
        let auto = self.next_auto_ms.filter(|&at| at <= now_ms);
        match (completion, auto) {
            (Some(c), Some(a)) if a < c => Some(Due::AutoAdvance(a)),
            (Some(_), _) => Some(Due::Completion),
            (None, Some(a)) => Some(Due::AutoAdvance(a)),
            (None, None) => None,
        }
    }

    fn request(&mut self, target: usize, now_ms: u64) -> bool {
        if self.torn_down {
            return false;
        }
        if self.transition.is_some() {
            strace!(
                target,
                in_flight = ?self.pending_index(),
                "Carousel: request dropped, transition in flight"
            );
            return false;
        }
        let due_ms = now_ms.saturating_add(self.options.transition_ms);
        self.transition = Some(Transition { target, due_ms });
        strace!(from = self.index, target, due_ms, "Carousel: transition started");
        self.notify();
        true
    }

    fn complete(&mut self) {
        let Some(t) = self.transition.take() else {
            return;
        };
        debug_assert!(t.target < self.items.len(), "transition target out of range");
        self.index = t.target;
        sdebug!(index = self.index, due_ms = t.due_ms, "Carousel: transition complete");
        self.notify();
    }

    fn notify(&self) {
        if let Some(cb) = &self.options.on_change {
            cb(&self.state());
        }
    }
}
