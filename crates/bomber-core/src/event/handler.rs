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

//! The handler capability and the typed adapter built on top of it.

use super::error::EventError;
use super::types::{Event, EventCategory};
use anyhow::Result;
use std::any::type_name;

/// A registered capability that conditionally reacts to events.
///
/// The loop asks [`can_handle`](EventHandler::can_handle) first and only calls
/// [`handle`](EventHandler::handle) with the same event when the answer is `true`.
///
/// Most handlers care about exactly one category and should implement
/// [`TypedHandler`] instead, wrapped in [`Typed`].
pub trait EventHandler: Send {
    /// Returns `true` if this handler wants `event`.
    ///
    /// Must not have side effects and must return `false`, never fail, for
    /// categories it does not know about.
    fn can_handle(&self, event: &Event) -> bool;

    /// Reacts to an event previously accepted by [`can_handle`](EventHandler::can_handle).
    ///
    /// An error aborts the current tick and is reported to the application driver.
    fn handle(&mut self, event: &Event) -> Result<()>;

    /// A human-readable name for logs and errors.
    fn name(&self) -> &str {
        type_name::<Self>()
    }
}

/// A handler for a single, statically declared event category.
pub trait TypedHandler: Send {
    /// The category this handler subscribes to.
    type Event: EventCategory;

    /// Reacts to an event of the declared category.
    fn handle_typed(&mut self, event: &Self::Event) -> Result<()>;
}

/// Adapter implementing [`EventHandler`] for any [`TypedHandler`].
///
/// Matching compares the event's tag with the declared category exactly, so a
/// `KeyDown` handler never sees `KeyUp` events.
#[derive(Debug, Default)]
pub struct Typed<H> {
    inner: H,
}

impl<H: TypedHandler> Typed<H> {
    /// Wraps a typed handler.
    pub fn new(inner: H) -> Self {
        Self { inner }
    }

    /// Returns the wrapped handler.
    pub fn inner(&self) -> &H {
        &self.inner
    }

    /// Unwraps the adapter.
    pub fn into_inner(self) -> H {
        self.inner
    }
}

impl<H: TypedHandler> EventHandler for Typed<H> {
    fn can_handle(&self, event: &Event) -> bool {
        event.kind() == H::Event::kind()
    }

    fn handle(&mut self, event: &Event) -> Result<()> {
        let typed = H::Event::extract(event).ok_or_else(|| EventError::CategoryMismatch {
            handler: type_name::<H>().to_string(),
            expected: H::Event::kind(),
            found: event.kind(),
        })?;
        self.inner.handle_typed(typed)
    }

    fn name(&self) -> &str {
        type_name::<H>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::types::{EventKind, KeyCode, KeyDown, KeyUp, UserEvent};

    #[derive(Default)]
    struct KeyUpRecorder {
        seen: Vec<KeyCode>,
    }

    impl TypedHandler for KeyUpRecorder {
        type Event = KeyUp;

        fn handle_typed(&mut self, event: &KeyUp) -> Result<()> {
            self.seen.push(event.code);
            Ok(())
        }
    }

    #[derive(Debug)]
    struct Detonation;

    impl UserEvent for Detonation {
        const NAME: &'static str = "detonation";
    }

    #[derive(Debug)]
    struct FakeDetonation;

    impl UserEvent for FakeDetonation {
        const NAME: &'static str = "detonation";
    }

    #[derive(Default)]
    struct DetonationCounter(usize);

    impl TypedHandler for DetonationCounter {
        type Event = Detonation;

        fn handle_typed(&mut self, _event: &Detonation) -> Result<()> {
            self.0 += 1;
            Ok(())
        }
    }

    #[test]
    fn test_typed_adapter_matches_exact_category() {
        let handler = Typed::new(KeyUpRecorder::default());
        assert!(handler.can_handle(&KeyUp { code: KeyCode::A }.into()));
        assert!(!handler.can_handle(&KeyDown { code: KeyCode::A }.into()));
        assert!(!handler.can_handle(&Event::user(Detonation)));
    }

    #[test]
    fn test_typed_adapter_forwards_payload() {
        let mut handler = Typed::new(KeyUpRecorder::default());
        handler
            .handle(&KeyUp { code: KeyCode(65) }.into())
            .expect("typed handling should succeed");
        assert_eq!(handler.inner().seen, vec![KeyCode(65)]);
    }

    #[test]
    fn test_typed_adapter_reports_category_mismatch() {
        let mut handler = Typed::new(KeyUpRecorder::default());
        let err = handler
            .handle(&KeyDown { code: KeyCode::A }.into())
            .expect_err("a KeyDown must not reach a KeyUp handler");

        match err.downcast_ref::<EventError>() {
            Some(EventError::CategoryMismatch {
                expected, found, ..
            }) => {
                assert_eq!(*expected, EventKind::KeyUp);
                assert_eq!(*found, EventKind::KeyDown);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(handler.into_inner().seen.is_empty());
    }

    #[test]
    fn test_user_category_with_colliding_name_is_an_invariant_violation() {
        let mut handler = Typed::new(DetonationCounter::default());
        let event = Event::user(FakeDetonation);

        // The tags agree, so the handler accepts the event...
        assert!(handler.can_handle(&event));
        // ...but the payload is not a `Detonation`, which must not pass silently.
        assert!(handler.handle(&event).is_err());
        assert_eq!(handler.inner().0, 0);

        handler
            .handle(&Event::user(Detonation))
            .expect("real detonation should be handled");
        assert_eq!(handler.inner().0, 1);
    }

    #[test]
    fn test_name_uses_inner_type() {
        let handler = Typed::new(KeyUpRecorder::default());
        assert!(handler.name().ends_with("KeyUpRecorder"));
    }
}
