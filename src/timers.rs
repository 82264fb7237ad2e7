//! One-shot deferred callbacks on the simulated clock.
//!
//! Timers only fire when the show's frame loop advances the clock, so a
//! callback always runs on a frame boundary and never in the middle of a
//! population pass.

use crate::sequence::SequenceItem;

/// Work that a timer performs when it comes due.
#[derive(Debug, Clone, PartialEq)]
pub enum Deferred {
    /// The second pop of a click.
    Explosion { x: f32, y: f32 },
    /// Launch one captioned rocket of the greeting.
    Launch(SequenceItem),
    /// Start the scripted greeting.
    StartSequence,
    /// Raise the ambient spawn chance.
    Escalate,
}

#[derive(Debug)]
struct Timer {
    due_ms: f64,
    seq: u64,
    action: Deferred,
}

#[derive(Debug, Default)]
pub struct Timers {
    now_ms: f64,
    next_seq: u64,
    pending: Vec<Timer>,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Pending timers as (due time, action), in scheduling order.
    pub fn pending(&self) -> impl Iterator<Item = (f64, &Deferred)> {
        self.pending.iter().map(|t| (t.due_ms, &t.action))
    }

    /// Run `action` once, `delay_ms` after the current time.
    pub fn schedule(&mut self, delay_ms: u64, action: Deferred) {
        self.schedule_at(self.now_ms + delay_ms as f64, action);
    }

    pub fn schedule_at(&mut self, due_ms: f64, action: Deferred) {
        self.pending.push(Timer { due_ms, seq: self.next_seq, action });
        self.next_seq += 1;
    }

    /// Move the clock forward and hand back everything that came due, earliest
    /// first; timers due at the same instant keep their scheduling order.
    pub fn advance(&mut self, elapsed_ms: f64) -> Vec<Deferred> {
        self.now_ms += elapsed_ms;
        let now = self.now_ms;

        let (mut due, pending): (Vec<Timer>, Vec<Timer>) =
            self.pending.drain(..).partition(|t| t.due_ms <= now);
        self.pending = pending;

        due.sort_by(|a, b| a.due_ms.total_cmp(&b.due_ms).then(a.seq.cmp(&b.seq)));
        due.into_iter().map(|t| t.action).collect()
    }
}
