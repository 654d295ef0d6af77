//! Spin session: the item list, history and the Idle → Spinning →
//! ResultPending → Idle cycle.
//!
//! The selected index is fixed before the animation starts, so the slice the
//! wheel draws and the result that gets recorded always agree. Invalid
//! requests are ignored and only logged at debug level.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;
use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::animator::SpinAnimator;
use crate::config::WheelConfig;
use crate::history::{HistoryEntry, HistoryLog};
use crate::selector::{select_next, PriorityNames, WonSet};
use crate::store::ItemStore;

/// Every action the UI (or a remote driver) can take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WheelCommand {
    AddItem(String),
    RemoveItem(usize),
    ClearItems,
    ClearHistory,
    Spin,
    RemoveWinner,
    KeepWinner,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinState {
    Idle,
    Spinning { index: usize, resolves_at: Instant },
    ResultPending { index: usize },
}

/// A resolved spin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpinOutcome {
    pub index: usize,
    pub result: String,
    pub priority_hit: bool,
}

#[derive(Debug)]
pub struct WheelSession<R = StdRng> {
    items: ItemStore,
    history: HistoryLog,
    won: WonSet,
    priority: PriorityNames,
    state: SpinState,
    animator: SpinAnimator,
    result_delay: Duration,
    // Names that arrived from the command channel while the wheel was busy.
    deferred: VecDeque<String>,
    rng: R,
}

impl WheelSession<StdRng> {
    pub fn from_config(config: &WheelConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::with_rng(
            config.initial_items.iter().collect(),
            config.priority_names.clone(),
            SpinAnimator::new(config.spin_duration, config.spin_turns),
            config.result_delay,
            rng,
        )
    }
}

impl<R: Rng> WheelSession<R> {
    pub fn with_rng(
        items: ItemStore,
        priority: PriorityNames,
        animator: SpinAnimator,
        result_delay: Duration,
        rng: R,
    ) -> Self {
        Self {
            items,
            history: HistoryLog::new(),
            won: WonSet::new(),
            priority,
            state: SpinState::Idle,
            animator,
            result_delay,
            deferred: VecDeque::new(),
            rng,
        }
    }

    pub fn apply(&mut self, command: WheelCommand, now: Instant) {
        match command {
            WheelCommand::AddItem(text) => {
                self.add_item(&text);
            }
            WheelCommand::RemoveItem(index) => {
                self.remove_item(index);
            }
            WheelCommand::ClearItems => self.clear_items(),
            WheelCommand::ClearHistory => self.clear_history(),
            WheelCommand::Spin => {
                self.request_spin(now);
            }
            WheelCommand::RemoveWinner => {
                self.remove_winner();
            }
            WheelCommand::KeepWinner => {
                self.keep_winner();
            }
        }
    }

    /// Applies every queued command without blocking.
    ///
    /// Names added while a spin or a pending result holds the list are kept
    /// back and appended once the wheel is idle again.
    pub fn drain_commands(&mut self, receiver: &Receiver<WheelCommand>, now: Instant) {
        while let Ok(command) = receiver.try_recv() {
            match command {
                WheelCommand::AddItem(text) if self.state != SpinState::Idle => {
                    debug!(item = %text, "item deferred until the wheel is idle");
                    self.deferred.push_back(text);
                }
                command => self.apply(command, now),
            }
        }
    }

    /// Picks the winner and starts the animation. Ignored unless idle with at
    /// least one item.
    pub fn request_spin(&mut self, now: Instant) -> Option<usize> {
        if self.state != SpinState::Idle {
            debug!("spin ignored: wheel is busy");
            return None;
        }
        let Some(index) = select_next(
            self.items.as_slice(),
            &self.priority,
            &self.won,
            &mut self.rng,
        ) else {
            debug!("spin ignored: no items");
            return None;
        };

        let item_count = self.items.len();
        let result_delay = self.result_delay;
        let state = &mut self.state;
        self.animator.start(now, index, item_count, |animation| {
            *state = SpinState::Spinning {
                index,
                resolves_at: animation.started_at() + result_delay,
            };
        });
        info!(index, items = item_count, "spin started");
        Some(index)
    }

    /// Advances the animation and resolves the spin once the result delay
    /// has passed.
    pub fn tick(&mut self, now: Instant) -> Option<SpinOutcome> {
        self.animator.frame(now);

        let SpinState::Spinning { index, resolves_at } = self.state else {
            return None;
        };
        if now < resolves_at {
            return None;
        }
        let Some(result) = self.items.get(index).map(str::to_string) else {
            debug!(index, "spin dropped: winner no longer on the wheel");
            self.enter_idle();
            return None;
        };

        let priority_hit = self.priority.contains(&result);
        if priority_hit {
            self.won.insert(index);
        }
        self.history.record(HistoryEntry::stamped_now(result.clone()));
        self.state = SpinState::ResultPending { index };
        info!(index, winner = %result, priority_hit, "spin resolved");

        Some(SpinOutcome {
            index,
            result,
            priority_hit,
        })
    }

    /// Removes the pending winner. Indices shift, so the won set starts over.
    pub fn remove_winner(&mut self) -> Option<String> {
        let SpinState::ResultPending { index } = self.state else {
            debug!("remove winner ignored: no pending result");
            return None;
        };
        let removed = self.items.remove_at(index);
        self.won.clear();
        self.animator.cancel();
        self.enter_idle();
        info!(index, "winner removed");
        removed
    }

    pub fn keep_winner(&mut self) -> bool {
        if !matches!(self.state, SpinState::ResultPending { .. }) {
            debug!("keep winner ignored: no pending result");
            return false;
        }
        self.enter_idle();
        true
    }

    pub fn add_item(&mut self, text: &str) -> Option<usize> {
        if text.trim().is_empty() || !self.prepare_item_change() {
            return None;
        }
        self.items.append(text)
    }

    pub fn remove_item(&mut self, index: usize) -> Option<String> {
        if index >= self.items.len() || !self.prepare_item_change() {
            return None;
        }
        let removed = self.items.remove_at(index)?;
        self.won.shift_after_removal(index);
        Some(removed)
    }

    pub fn clear_items(&mut self) {
        if !self.prepare_item_change() {
            return;
        }
        self.items.clear();
        self.won.clear();
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Stops any animation before the drawing surface goes away.
    pub fn shutdown(&mut self) {
        if self.animator.cancel() {
            debug!("spin animation cancelled on shutdown");
        }
    }

    // A pending result pins its index, so the list is frozen until the user
    // decides. A spin in flight is abandoned instead: its slice geometry
    // would no longer match the list.
    fn prepare_item_change(&mut self) -> bool {
        match self.state {
            SpinState::ResultPending { .. } => {
                debug!("item change ignored: result pending");
                false
            }
            SpinState::Spinning { index, .. } => {
                self.animator.cancel();
                self.enter_idle();
                debug!(index, "spin aborted: item list changed");
                true
            }
            SpinState::Idle => true,
        }
    }

    fn enter_idle(&mut self) {
        self.state = SpinState::Idle;
        for text in self.deferred.drain(..) {
            self.items.append(&text);
        }
    }

    /// Names waiting for the wheel to become idle.
    pub fn deferred_items(&self) -> impl Iterator<Item = &str> {
        self.deferred.iter().map(String::as_str)
    }

    pub fn items(&self) -> &ItemStore {
        &self.items
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn won(&self) -> &WonSet {
        &self.won
    }

    pub fn priority(&self) -> &PriorityNames {
        &self.priority
    }

    pub fn state(&self) -> SpinState {
        self.state
    }

    pub fn rotation(&self) -> f64 {
        self.animator.rotation()
    }

    pub fn is_spinning(&self) -> bool {
        matches!(self.state, SpinState::Spinning { .. })
    }

    /// Index and text of the winner awaiting a decision.
    pub fn pending_result(&self) -> Option<(usize, &str)> {
        match self.state {
            SpinState::ResultPending { index } => self.items.get(index).map(|item| (index, item)),
            _ => None,
        }
    }
}
