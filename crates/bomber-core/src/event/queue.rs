// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The thread-safe FIFO of pushed events.

use super::types::Event;
use super::lock;
use std::collections::VecDeque;
use std::mem;
use std::sync::Mutex;

#[derive(Default)]
struct QueueState {
    events: VecDeque<Event>,
    closed: bool,
}

/// FIFO of custom events waiting for the next drain.
///
/// The lock is held only while inserting or while swapping the whole content
/// out, never while an event is being delivered.
#[derive(Default)]
pub(crate) struct EventQueue {
    state: Mutex<QueueState>,
}

impl EventQueue {
    /// Appends an event. Returns `false` (and drops the event) once closed.
    pub(crate) fn push(&self, event: Event) -> bool {
        let mut state = lock(&self.state);
        if state.closed {
            return false;
        }
        state.events.push_back(event);
        true
    }

    /// Takes every queued event at once.
    pub(crate) fn drain(&self) -> DrainedBatch<'_> {
        let pending = mem::take(&mut lock(&self.state).events);
        DrainedBatch {
            queue: self,
            pending,
        }
    }

    /// Puts undelivered events back in front of anything pushed since the drain.
    fn restore_front(&self, mut remaining: VecDeque<Event>) {
        let mut state = lock(&self.state);
        if state.closed {
            return;
        }
        remaining.append(&mut state.events);
        state.events = remaining;
    }

    /// Refuses further pushes and returns whatever was still queued.
    pub(crate) fn close(&self) -> VecDeque<Event> {
        let mut state = lock(&self.state);
        state.closed = true;
        mem::take(&mut state.events)
    }

    pub(crate) fn len(&self) -> usize {
        lock(&self.state).events.len()
    }
}

/// Events taken out of the queue for one tick.
///
/// If the batch is dropped before being fully consumed (a handler failed or
/// panicked), the remaining events go back to the front of the queue.
pub(crate) struct DrainedBatch<'a> {
    queue: &'a EventQueue,
    pending: VecDeque<Event>,
}

impl DrainedBatch<'_> {
    /// Returns `true` if no event is left in the batch.
    pub(crate) fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl Iterator for DrainedBatch<'_> {
    type Item = Event;

    fn next(&mut self) -> Option<Event> {
        self.pending.pop_front()
    }
}

impl Drop for DrainedBatch<'_> {
    fn drop(&mut self) {
        if !self.pending.is_empty() {
            log::debug!(
                "Returning {} undelivered event(s) to the queue.",
                self.pending.len()
            );
            self.queue.restore_front(mem::take(&mut self.pending));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::types::{KeyCode, KeyDown, MouseWheel};

    fn key(code: u32) -> Event {
        KeyDown {
            code: KeyCode(code),
        }
        .into()
    }

    #[test]
    fn test_drain_is_fifo_and_empties_queue() {
        let queue = EventQueue::default();
        queue.push(key(1));
        queue.push(key(2));
        queue.push(key(3));

        let drained: Vec<Event> = queue.drain().collect();
        assert_eq!(drained, vec![key(1), key(2), key(3)]);
        assert_eq!(queue.len(), 0);
    }

    #[test]
    fn test_partially_consumed_batch_is_restored_in_front() {
        let queue = EventQueue::default();
        queue.push(key(1));
        queue.push(key(2));
        queue.push(key(3));

        {
            let mut batch = queue.drain();
            assert_eq!(batch.next(), Some(key(1)));
            // Pushed while the batch is being delivered.
            queue.push(MouseWheel { delta: 1 }.into());
        }

        let rest: Vec<Event> = queue.drain().collect();
        assert_eq!(rest, vec![key(2), key(3), MouseWheel { delta: 1 }.into()]);
    }

    #[test]
    fn test_drain_of_empty_queue_is_empty() {
        let queue = EventQueue::default();
        assert!(queue.drain().is_empty());

        queue.push(key(1));
        let batch = queue.drain();
        assert!(!batch.is_empty());
        assert_eq!(queue.len(), 0);
    }

    #[test]
    fn test_closed_queue_rejects_pushes() {
        let queue = EventQueue::default();
        assert!(queue.push(key(1)));

        let leftovers = queue.close();
        assert_eq!(leftovers.len(), 1);
        assert!(!queue.push(key(2)));
        assert_eq!(queue.len(), 0);
    }
}
