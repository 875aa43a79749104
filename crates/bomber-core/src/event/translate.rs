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

//! Translation of raw platform notifications into domain events.

use super::types::{CloseRequested, Event, KeyDown, KeyUp, MouseDown, MouseUp, MouseWheel};
use crate::platform::input::{PlatformEventSource, RawInput};

/// Pulls raw notifications from a platform source and turns them into [`Event`]s.
///
/// The translator keeps no state of its own beyond the source it reads from.
pub struct SystemEventTranslator {
    source: Box<dyn PlatformEventSource>,
}

impl SystemEventTranslator {
    /// Creates a translator reading from `source`.
    pub fn new(source: impl PlatformEventSource + 'static) -> Self {
        Self {
            source: Box::new(source),
        }
    }

    /// Maps one raw notification to its domain event.
    ///
    /// Returns `None` for notifications without a counterpart (resizes,
    /// focus changes, cursor motion, text input).
    pub fn translate(raw: &RawInput) -> Option<Event> {
        let event: Event = match *raw {
            RawInput::CloseRequested => CloseRequested.into(),
            RawInput::MouseButtonPressed { button, x, y } => MouseDown { button, x, y }.into(),
            RawInput::MouseButtonReleased { button, x, y } => MouseUp { button, x, y }.into(),
            RawInput::MouseWheelMoved { delta } => MouseWheel { delta }.into(),
            RawInput::KeyPressed { code } => KeyDown { code }.into(),
            RawInput::KeyReleased { code } => KeyUp { code }.into(),
            RawInput::Resized { .. }
            | RawInput::FocusChanged(_)
            | RawInput::CursorMoved { .. }
            | RawInput::TextEntered(_) => return None,
        };
        Some(event)
    }

    /// Returns the next translatable event pending on the source.
    ///
    /// Unrecognized notifications met on the way are dropped. Returns `None`
    /// once the source has nothing pending.
    pub fn next_event(&mut self) -> Option<Event> {
        while let Some(raw) = self.source.poll() {
            match Self::translate(&raw) {
                Some(event) => return Some(event),
                None => log::trace!("Dropping untranslated platform notification {raw:?}."),
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::types::{EventKind, KeyCode, MouseButton};
    use std::collections::VecDeque;

    #[test]
    fn test_translate_mapping_table() {
        let cases = [
            (RawInput::CloseRequested, EventKind::CloseRequested),
            (
                RawInput::MouseButtonPressed {
                    button: MouseButton::Left,
                    x: 1,
                    y: 2,
                },
                EventKind::MouseDown,
            ),
            (
                RawInput::MouseButtonReleased {
                    button: MouseButton::Left,
                    x: 1,
                    y: 2,
                },
                EventKind::MouseUp,
            ),
            (RawInput::MouseWheelMoved { delta: 3 }, EventKind::MouseWheel),
            (RawInput::KeyPressed { code: KeyCode::A }, EventKind::KeyDown),
            (RawInput::KeyReleased { code: KeyCode::A }, EventKind::KeyUp),
        ];

        for (raw, kind) in cases {
            let event = SystemEventTranslator::translate(&raw).expect("should translate");
            assert_eq!(event.kind(), kind, "wrong kind for {raw:?}");
        }
    }

    #[test]
    fn test_translate_keeps_payload() {
        let event = SystemEventTranslator::translate(&RawInput::MouseButtonPressed {
            button: MouseButton::Middle,
            x: 320,
            y: 240,
        });
        assert_eq!(
            event,
            Some(Event::MouseDown(MouseDown {
                button: MouseButton::Middle,
                x: 320,
                y: 240
            }))
        );
    }

    #[test]
    fn test_translate_unrecognized_returns_none() {
        assert_eq!(
            SystemEventTranslator::translate(&RawInput::Resized {
                width: 800,
                height: 600
            }),
            None
        );
        assert_eq!(SystemEventTranslator::translate(&RawInput::FocusChanged(true)), None);
        assert_eq!(
            SystemEventTranslator::translate(&RawInput::CursorMoved { x: 0, y: 0 }),
            None
        );
        assert_eq!(SystemEventTranslator::translate(&RawInput::TextEntered('x')), None);
    }

    #[test]
    fn test_next_event_skips_unrecognized_and_keeps_order() {
        let source = VecDeque::from(vec![
            RawInput::FocusChanged(true),
            RawInput::KeyPressed { code: KeyCode::W },
            RawInput::CursorMoved { x: 5, y: 5 },
            RawInput::CloseRequested,
            RawInput::TextEntered('w'),
        ]);
        let mut translator = SystemEventTranslator::new(source);

        assert_eq!(
            translator.next_event(),
            Some(Event::KeyDown(KeyDown { code: KeyCode::W }))
        );
        assert_eq!(
            translator.next_event(),
            Some(Event::CloseRequested(CloseRequested))
        );
        assert_eq!(translator.next_event(), None);
        assert_eq!(translator.next_event(), None);
    }
}
