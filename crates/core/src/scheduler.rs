//! Deterministic turn order.
//! This module exists to decide who acts next from a clock and insertion order alone.
//! It does not own what an actor does with its turn.
//!
//! Tickets are ordered by `(time, seq, actor)`. `seq` is a monotonically
//! increasing insertion counter, so two actors due at the same time are
//! served in the order they were scheduled.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::SchedulerError;
use crate::types::EntityId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Ticket {
    pub time: u64,
    pub seq: u64,
    pub actor: EntityId,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnQueue {
    time: u64,
    next_seq: u64,
    tickets: BTreeSet<Ticket>,
}

impl TurnQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `actor` to act `interval` ticks after the current time.
    pub fn schedule(&mut self, actor: EntityId, interval: u64) -> Ticket {
        let ticket = Ticket { time: self.time.saturating_add(interval), seq: self.next_seq, actor };
        self.next_seq += 1;
        self.tickets.insert(ticket);
        ticket
    }

    /// Pops the earliest ticket and advances the clock to its time.
    pub fn next(&mut self) -> Result<Ticket, SchedulerError> {
        let ticket = self.tickets.pop_first().ok_or(SchedulerError::Empty)?;
        self.time = ticket.time;
        Ok(ticket)
    }

    pub fn time(&self) -> u64 {
        self.time
    }

    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }

    pub fn contains(&self, actor: EntityId) -> bool {
        self.tickets.iter().any(|ticket| ticket.actor == actor)
    }

    pub fn tickets(&self) -> impl Iterator<Item = &Ticket> {
        self.tickets.iter()
    }

    /// Drops every ticket and restarts the clock, keeping `seq` monotonic.
    pub fn clear(&mut self) {
        self.tickets.clear();
        self.time = 0;
    }
}

#[cfg(test)]
mod tests {
    use slotmap::SlotMap;

    use super::*;

    fn ids(n: usize) -> Vec<EntityId> {
        let mut arena: SlotMap<EntityId, ()> = SlotMap::with_key();
        (0..n).map(|_| arena.insert(())).collect()
    }

    #[test]
    fn earlier_time_is_served_first() {
        let actors = ids(2);
        let mut queue = TurnQueue::new();
        queue.schedule(actors[0], 100);
        queue.schedule(actors[1], 50);
        assert_eq!(queue.next().map(|t| t.actor), Ok(actors[1]));
        assert_eq!(queue.time(), 50);
        assert_eq!(queue.next().map(|t| t.actor), Ok(actors[0]));
        assert_eq!(queue.time(), 100);
    }

    #[test]
    fn equal_times_keep_insertion_order() {
        let actors = ids(4);
        let mut queue = TurnQueue::new();
        for actor in actors.iter().rev() {
            queue.schedule(*actor, 0);
        }
        let served: Vec<_> = std::iter::from_fn(|| queue.next().ok()).map(|t| t.actor).collect();
        let expected: Vec<_> = actors.iter().rev().copied().collect();
        assert_eq!(served, expected);
    }

    #[test]
    fn interval_is_relative_to_current_time() {
        let actors = ids(2);
        let mut queue = TurnQueue::new();
        queue.schedule(actors[0], 30);
        queue.next().expect("one ticket");
        let ticket = queue.schedule(actors[1], 30);
        assert_eq!(ticket.time, 60);
    }

    #[test]
    fn next_on_empty_queue_is_an_error() {
        let mut queue = TurnQueue::new();
        assert_eq!(queue.next(), Err(SchedulerError::Empty));
        assert_eq!(queue.time(), 0);
    }

    #[test]
    fn clear_keeps_sequence_counter_running() {
        let actors = ids(1);
        let mut queue = TurnQueue::new();
        let first = queue.schedule(actors[0], 5);
        queue.clear();
        assert!(queue.is_empty());
        let second = queue.schedule(actors[0], 5);
        assert!(second.seq > first.seq);
        assert_eq!(second.time, 5);
    }
}
