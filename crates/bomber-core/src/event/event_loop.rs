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

//! The event loop: queue, handler registry and per-tick delivery.
//!
//! # Threading
//!
//! [`EventLoop::process`] runs on a single loop thread. Any other thread, and
//! any handler, talks to the loop through a [`LoopHandle`]:
//!
//! - the push queue is locked only for an insert or for the drain swap;
//! - the registry is locked only for a registration, the teardown, or to copy
//!   a snapshot before each delivery.
//!
//! No lock is held while a handler runs, so handlers may push events and
//! register handlers without deadlocking. Handlers registered during a tick
//! see the events delivered after their registration.

use super::error::EventError;
use super::handler::{EventHandler, Typed, TypedHandler};
use super::lock;
use super::queue::EventQueue;
use super::registry::{HandlerId, HandlerRegistry, SharedHandler};
use super::translate::SystemEventTranslator;
use super::types::Event;
use crate::platform::input::PlatformEventSource;
use std::sync::{Arc, Mutex};

/// Lifecycle state of an [`EventLoop`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Built, handlers may be registered, no tick has run yet.
    Constructed,
    /// At least one tick has run.
    Running,
    /// Torn down: handlers released, pushes and registrations are discarded.
    Destroyed,
}

/// What one tick did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Translated platform events dispatched.
    pub system_events: usize,
    /// Queued custom events dispatched.
    pub queued_events: usize,
    /// Total handler invocations.
    pub deliveries: usize,
    /// Events no handler accepted; they were discarded.
    pub unhandled: usize,
}

impl TickReport {
    /// Returns the number of events dispatched during the tick.
    pub fn total_events(&self) -> usize {
        self.system_events + self.queued_events
    }

    /// Returns `true` if the tick had nothing to do.
    pub fn is_idle(&self) -> bool {
        self.total_events() == 0
    }
}

/// State shared between the loop and its handles.
#[derive(Default)]
struct Shared {
    queue: EventQueue,
    registry: Mutex<HandlerRegistry>,
}

impl Shared {
    fn push(&self, event: Event) {
        let kind = event.kind();
        if self.queue.push(event) {
            log::trace!("Queued a {kind} event.");
        } else {
            log::debug!("Discarding {kind} event pushed after teardown.");
        }
    }

    fn register(&self, handler: SharedHandler) -> Option<HandlerId> {
        let result = lock(&self.registry).register(handler);
        match result {
            Ok(id) => {
                log::debug!("Registered event handler {id}.");
                Some(id)
            }
            Err(rejected) => {
                // Dropped outside the registry lock.
                drop(rejected);
                log::debug!("Discarding handler registered after teardown.");
                None
            }
        }
    }

    /// Delivers one event to every matching handler, in registration order.
    fn dispatch(&self, event: &Event, report: &mut TickReport) -> Result<(), EventError> {
        let snapshot = lock(&self.registry).snapshot();
        let kind = event.kind();

        let mut delivered = 0;
        for entry in &snapshot {
            let mut handler = lock(&entry.handler);
            if !handler.can_handle(event) {
                continue;
            }
            log::trace!("Delivering {kind} event to {} ({}).", handler.name(), entry.id);
            handler
                .handle(event)
                .map_err(|source| EventError::HandlerFailed {
                    handler: handler.name().to_string(),
                    kind,
                    source,
                })?;
            delivered += 1;
        }

        if delivered == 0 {
            log::trace!("No handler for {kind} event, discarding it.");
            report.unhandled += 1;
        }
        report.deliveries += delivered;
        Ok(())
    }
}

/// A cloneable, thread-safe handle to an [`EventLoop`].
///
/// Handles outlive nothing: once the loop is torn down, pushes and
/// registrations made through a handle are silently discarded.
#[derive(Clone)]
pub struct LoopHandle {
    shared: Arc<Shared>,
}

impl LoopHandle {
    /// Enqueues a custom event for delivery on the next tick.
    pub fn push_event(&self, event: impl Into<Event>) {
        self.shared.push(event.into());
    }

    /// Registers a handler; the loop takes ownership of it.
    ///
    /// Returns `None` if the loop has already been torn down.
    pub fn add_handler(&self, handler: impl EventHandler + 'static) -> Option<HandlerId> {
        self.shared.register(Arc::new(Mutex::new(handler)))
    }

    /// Registers a typed handler through the [`Typed`] adapter.
    pub fn add_typed_handler<H: TypedHandler + 'static>(&self, handler: H) -> Option<HandlerId> {
        self.add_handler(Typed::new(handler))
    }

    /// Registers a handler that the caller keeps a reference to.
    ///
    /// The same handler may be registered several times; every registration
    /// receives its own delivery.
    pub fn add_shared_handler(&self, handler: SharedHandler) -> Option<HandlerId> {
        self.shared.register(handler)
    }

    /// Returns the number of events waiting for the next drain.
    pub fn pending_events(&self) -> usize {
        self.shared.queue.len()
    }
}

/// Owns the event queue and the handler registry, and runs the ticks.
///
/// Each [`process`](EventLoop::process) call first dispatches the platform's
/// pending notifications, then every event queued before the drain started.
///
/// Dropping the loop tears it down. Tearing down from inside a handler is
/// not supported.
pub struct EventLoop {
    shared: Arc<Shared>,
    translator: Option<SystemEventTranslator>,
    state: LoopState,
}

impl EventLoop {
    /// Creates a loop without a platform source.
    pub fn new() -> Self {
        log::info!("Event loop initialized.");
        Self {
            shared: Arc::default(),
            translator: None,
            state: LoopState::Constructed,
        }
    }

    /// Creates a loop that pulls platform notifications from `source` each tick.
    pub fn with_source(source: impl PlatformEventSource + 'static) -> Self {
        let mut event_loop = Self::new();
        event_loop.set_source(source);
        event_loop
    }

    /// Replaces the platform source.
    pub fn set_source(&mut self, source: impl PlatformEventSource + 'static) {
        self.translator = Some(SystemEventTranslator::new(source));
    }

    /// Returns a handle for other threads and for handlers.
    pub fn handle(&self) -> LoopHandle {
        LoopHandle {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Registers a handler; the loop takes ownership of it.
    pub fn add_handler(&self, handler: impl EventHandler + 'static) -> Option<HandlerId> {
        self.shared.register(Arc::new(Mutex::new(handler)))
    }

    /// Registers a typed handler through the [`Typed`] adapter.
    pub fn add_typed_handler<H: TypedHandler + 'static>(&self, handler: H) -> Option<HandlerId> {
        self.add_handler(Typed::new(handler))
    }

    /// Registers a handler that the caller keeps a reference to.
    pub fn add_shared_handler(&self, handler: SharedHandler) -> Option<HandlerId> {
        self.shared.register(handler)
    }

    /// Enqueues a custom event for delivery on the next tick.
    pub fn push_event(&self, event: impl Into<Event>) {
        self.shared.push(event.into());
    }

    /// Runs one tick.
    ///
    /// Platform notifications pending on the source are translated and
    /// dispatched first, in arrival order; then the push queue is drained and
    /// each event is dispatched in FIFO order. Events that handlers push
    /// during the tick are delivered before it returns, so a handler that
    /// pushes on every event it receives keeps the tick going. Never waits
    /// for new events.
    ///
    /// # Errors
    ///
    /// Returns the first handler failure. The tick stops there: the failing
    /// event is not retried, queued events not yet dispatched stay at the
    /// front of the queue, and platform notifications not yet pulled stay on
    /// the source, so the next tick picks up where this one stopped.
    pub fn process(&mut self) -> Result<TickReport, EventError> {
        let mut report = TickReport::default();
        if self.state == LoopState::Destroyed {
            return Ok(report);
        }
        self.state = LoopState::Running;

        if let Some(translator) = self.translator.as_mut() {
            while let Some(event) = translator.next_event() {
                report.system_events += 1;
                self.shared.dispatch(&event, &mut report)?;
            }
        }

        // Events pushed by handlers during a round are delivered by the next one.
        loop {
            let batch = self.shared.queue.drain();
            if batch.is_empty() {
                break;
            }
            for event in batch {
                report.queued_events += 1;
                self.shared.dispatch(&event, &mut report)?;
            }
        }

        if !report.is_idle() {
            log::debug!(
                "Tick: {} system and {} queued event(s), {} delivery(ies), {} unhandled.",
                report.system_events,
                report.queued_events,
                report.deliveries,
                report.unhandled
            );
        }
        Ok(report)
    }

    /// Tears the loop down, releasing every handler and pending event.
    ///
    /// Calling it again does nothing. Must not be called while a tick is in
    /// progress.
    pub fn shutdown(&mut self) {
        if self.state == LoopState::Destroyed {
            return;
        }
        self.state = LoopState::Destroyed;

        let released = lock(&self.shared.registry).close();
        let discarded = self.shared.queue.close();
        self.translator = None;

        log::info!(
            "Event loop shut down: released {} handler(s), discarded {} pending event(s).",
            released.len(),
            discarded.len()
        );
    }

    /// Returns the lifecycle state.
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Returns the number of registered handlers.
    pub fn handler_count(&self) -> usize {
        lock(&self.shared.registry).len()
    }

    /// Returns the number of events waiting for the next drain.
    ///
    /// A drain takes its whole batch out of the queue before delivering it,
    /// so while a tick runs this only counts events pushed since the batch
    /// was taken. Undelivered events of a failed tick count again once they
    /// are put back.
    pub fn pending_events(&self) -> usize {
        self.shared.queue.len()
    }
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for EventLoop {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::types::{CloseRequested, EventKind, KeyCode, KeyDown, KeyUp};
    use anyhow::{bail, Result};

    /// Records every kind it is offered and accepts only `accepts`.
    struct Probe {
        accepts: EventKind,
        log: Arc<Mutex<Vec<(&'static str, EventKind)>>>,
        label: &'static str,
    }

    impl EventHandler for Probe {
        fn can_handle(&self, event: &Event) -> bool {
            event.kind() == self.accepts
        }

        fn handle(&mut self, event: &Event) -> Result<()> {
            lock(&self.log).push((self.label, event.kind()));
            Ok(())
        }
    }

    struct Failing;

    impl EventHandler for Failing {
        fn can_handle(&self, event: &Event) -> bool {
            event.kind() == EventKind::KeyDown
        }

        fn handle(&mut self, _event: &Event) -> Result<()> {
            bail!("boom")
        }
    }

    #[test]
    fn test_empty_tick_is_idle() {
        let mut event_loop = EventLoop::new();
        assert_eq!(event_loop.state(), LoopState::Constructed);

        let report = event_loop.process().expect("tick should succeed");
        assert!(report.is_idle());
        assert_eq!(event_loop.state(), LoopState::Running);
    }

    #[test]
    fn test_delivery_follows_registration_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut event_loop = EventLoop::new();
        for label in ["first", "second", "third"] {
            event_loop.add_handler(Probe {
                accepts: EventKind::CloseRequested,
                log: Arc::clone(&log),
                label,
            });
        }

        event_loop.push_event(CloseRequested);
        let report = event_loop.process().expect("tick should succeed");

        let labels: Vec<&str> = lock(&log).iter().map(|(label, _)| *label).collect();
        assert_eq!(labels, vec!["first", "second", "third"]);
        assert_eq!(report.deliveries, 3);
        assert_eq!(report.unhandled, 0);
    }

    #[test]
    fn test_unmatched_event_is_discarded() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut event_loop = EventLoop::new();
        event_loop.add_handler(Probe {
            accepts: EventKind::KeyUp,
            log: Arc::clone(&log),
            label: "key-up",
        });

        event_loop.push_event(KeyDown { code: KeyCode::A });
        let report = event_loop.process().expect("tick should succeed");

        assert_eq!(report.unhandled, 1);
        assert_eq!(event_loop.pending_events(), 0);
        assert!(lock(&log).is_empty());
    }

    #[test]
    fn test_handler_failure_surfaces_and_keeps_rest_of_queue() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut event_loop = EventLoop::new();
        event_loop.add_handler(Failing);
        event_loop.add_handler(Probe {
            accepts: EventKind::KeyUp,
            log: Arc::clone(&log),
            label: "key-up",
        });

        event_loop.push_event(KeyDown { code: KeyCode::A });
        event_loop.push_event(KeyUp { code: KeyCode::A });

        let err = event_loop.process().expect_err("the failing handler must surface");
        match err {
            EventError::HandlerFailed { kind, .. } => assert_eq!(kind, EventKind::KeyDown),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(event_loop.pending_events(), 1);

        let report = event_loop.process().expect("next tick is unaffected");
        assert_eq!(report.queued_events, 1);
        assert_eq!(*lock(&log), vec![("key-up", EventKind::KeyUp)]);
    }

    /// Pushes one key-up event through the loop handle for each key-down.
    struct Echo {
        handle: LoopHandle,
    }

    impl EventHandler for Echo {
        fn can_handle(&self, event: &Event) -> bool {
            event.kind() == EventKind::KeyDown
        }

        fn handle(&mut self, event: &Event) -> Result<()> {
            if let Some(code) = event.key_code() {
                self.handle.push_event(KeyUp { code });
            }
            Ok(())
        }
    }

    #[test]
    fn test_events_pushed_by_handlers_are_delivered_in_the_same_tick() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut event_loop = EventLoop::new();
        event_loop.add_handler(Echo {
            handle: event_loop.handle(),
        });
        event_loop.add_handler(Probe {
            accepts: EventKind::KeyUp,
            log: Arc::clone(&log),
            label: "key-up",
        });

        event_loop.push_event(KeyDown { code: KeyCode::A });
        event_loop.push_event(KeyDown { code: KeyCode::B });
        let report = event_loop.process().expect("tick should succeed");

        assert_eq!(report.queued_events, 4);
        assert_eq!(event_loop.pending_events(), 0);
        assert_eq!(
            *lock(&log),
            vec![("key-up", EventKind::KeyUp), ("key-up", EventKind::KeyUp)]
        );
    }

    /// Records what the loop reports as pending each time it handles a key-down.
    struct PendingWatcher {
        handle: LoopHandle,
        seen: Arc<Mutex<Vec<usize>>>,
    }

    impl EventHandler for PendingWatcher {
        fn can_handle(&self, event: &Event) -> bool {
            event.kind() == EventKind::KeyDown
        }

        fn handle(&mut self, _event: &Event) -> Result<()> {
            lock(&self.seen).push(self.handle.pending_events());
            self.handle.push_event(CloseRequested);
            Ok(())
        }
    }

    #[test]
    fn test_pending_events_mid_tick_counts_only_new_pushes() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut event_loop = EventLoop::new();
        event_loop.add_handler(PendingWatcher {
            handle: event_loop.handle(),
            seen: Arc::clone(&seen),
        });

        for code in [KeyCode::A, KeyCode::B, KeyCode::C] {
            event_loop.push_event(KeyDown { code });
        }
        let report = event_loop.process().expect("tick should succeed");

        // The three key-downs were taken out together; only the close
        // requests pushed since then are counted.
        assert_eq!(*lock(&seen), vec![0, 1, 2]);
        assert_eq!(report.queued_events, 6);
        assert_eq!(event_loop.pending_events(), 0);
    }

    #[test]
    fn test_shutdown_is_idempotent_and_stops_processing() {
        let mut event_loop = EventLoop::new();
        event_loop.add_handler(Failing);
        event_loop.push_event(KeyDown { code: KeyCode::A });

        event_loop.shutdown();
        event_loop.shutdown();

        assert_eq!(event_loop.state(), LoopState::Destroyed);
        assert_eq!(event_loop.handler_count(), 0);
        assert_eq!(event_loop.pending_events(), 0);
        assert!(event_loop.add_handler(Failing).is_none());
        assert!(event_loop.process().expect("no-op tick").is_idle());
    }
}
