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

//! Handler registry with registration-ordered iteration.

use super::handler::EventHandler;
use std::fmt;
use std::sync::{Arc, Mutex};

/// A handler shared between the registry and in-flight delivery snapshots.
pub type SharedHandler = Arc<Mutex<dyn EventHandler>>;

/// Identifies one registration. Ids grow with registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandlerId(u64);

impl HandlerId {
    /// Returns the registration sequence number.
    pub fn index(self) -> u64 {
        self.0
    }
}

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Entry in the handler registry.
#[derive(Clone)]
pub(crate) struct HandlerEntry {
    pub(crate) id: HandlerId,
    pub(crate) handler: SharedHandler,
}

/// Ordered collection of the currently active handlers.
///
/// Delivery never iterates the registry itself: it copies a snapshot and
/// releases the lock, so handlers are free to register more handlers.
#[derive(Default)]
pub(crate) struct HandlerRegistry {
    entries: Vec<HandlerEntry>,
    next_id: u64,
    closed: bool,
}

impl HandlerRegistry {
    /// Appends a handler at the end of the delivery order.
    ///
    /// Once the registry is closed the handler is handed back instead.
    pub(crate) fn register(&mut self, handler: SharedHandler) -> Result<HandlerId, SharedHandler> {
        if self.closed {
            return Err(handler);
        }
        let id = HandlerId(self.next_id);
        self.next_id += 1;
        self.entries.push(HandlerEntry { id, handler });
        Ok(id)
    }

    /// Copies the current registrations, in delivery order.
    pub(crate) fn snapshot(&self) -> Vec<HandlerEntry> {
        self.entries.clone()
    }

    /// Closes the registry and hands back every registration.
    ///
    /// The caller drops them after releasing the registry lock, so a handler's
    /// `Drop` may safely touch the loop.
    pub(crate) fn close(&mut self) -> Vec<HandlerEntry> {
        self.closed = true;
        std::mem::take(&mut self.entries)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::types::Event;
    use anyhow::Result;

    struct Noop;

    impl EventHandler for Noop {
        fn can_handle(&self, _event: &Event) -> bool {
            false
        }

        fn handle(&mut self, _event: &Event) -> Result<()> {
            Ok(())
        }
    }

    fn noop() -> SharedHandler {
        Arc::new(Mutex::new(Noop))
    }

    #[test]
    fn test_ids_follow_registration_order() {
        let mut registry = HandlerRegistry::default();
        let first = registry.register(noop()).ok().unwrap();
        let second = registry.register(noop()).ok().unwrap();

        assert!(first < second);
        assert_eq!((first.index(), second.index()), (0, 1));
        assert_eq!(second.to_string(), "#1");
        let ids: Vec<HandlerId> = registry.snapshot().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![first, second]);
    }

    #[test]
    fn test_snapshot_is_independent_of_later_registrations() {
        let mut registry = HandlerRegistry::default();
        registry.register(noop()).ok().unwrap();

        let snapshot = registry.snapshot();
        registry.register(noop()).ok().unwrap();

        assert_eq!(snapshot.len(), 1);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_close_releases_entries_and_rejects_new_ones() {
        let mut registry = HandlerRegistry::default();
        let handler = noop();
        registry.register(handler.clone()).ok().unwrap();
        assert_eq!(Arc::strong_count(&handler), 2);

        let released = registry.close();
        assert_eq!(released.len(), 1);
        drop(released);
        assert_eq!(Arc::strong_count(&handler), 1);

        assert!(registry.register(noop()).is_err());
        assert_eq!(registry.len(), 0);
    }
}
