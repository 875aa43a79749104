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

//! Domain event values and the category tags used to match them to handlers.
//!
//! Every [`Event`] exposes an [`EventKind`] discriminant. Handlers never inspect
//! runtime type identity to decide whether an event concerns them; they compare
//! kinds, and the typed adapter only downcasts after the kinds agree.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A keyboard key code.
///
/// Letter keys use the ASCII value of their uppercase character (`A == 65`),
/// digits and whitespace keys use their ASCII value, and keys without a
/// printable character live above `0xFF`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyCode(pub u32);

#[allow(missing_docs)]
impl KeyCode {
    pub const BACKSPACE: Self = Self(8);
    pub const TAB: Self = Self(9);
    pub const ENTER: Self = Self(13);
    pub const ESCAPE: Self = Self(27);
    pub const SPACE: Self = Self(32);

    pub const NUM_0: Self = Self(48);
    pub const NUM_1: Self = Self(49);
    pub const NUM_2: Self = Self(50);
    pub const NUM_3: Self = Self(51);
    pub const NUM_4: Self = Self(52);
    pub const NUM_5: Self = Self(53);
    pub const NUM_6: Self = Self(54);
    pub const NUM_7: Self = Self(55);
    pub const NUM_8: Self = Self(56);
    pub const NUM_9: Self = Self(57);

    pub const A: Self = Self(65);
    pub const B: Self = Self(66);
    pub const C: Self = Self(67);
    pub const D: Self = Self(68);
    pub const E: Self = Self(69);
    pub const F: Self = Self(70);
    pub const G: Self = Self(71);
    pub const H: Self = Self(72);
    pub const I: Self = Self(73);
    pub const J: Self = Self(74);
    pub const K: Self = Self(75);
    pub const L: Self = Self(76);
    pub const M: Self = Self(77);
    pub const N: Self = Self(78);
    pub const O: Self = Self(79);
    pub const P: Self = Self(80);
    pub const Q: Self = Self(81);
    pub const R: Self = Self(82);
    pub const S: Self = Self(83);
    pub const T: Self = Self(84);
    pub const U: Self = Self(85);
    pub const V: Self = Self(86);
    pub const W: Self = Self(87);
    pub const X: Self = Self(88);
    pub const Y: Self = Self(89);
    pub const Z: Self = Self(90);

    pub const LEFT: Self = Self(0x100);
    pub const RIGHT: Self = Self(0x101);
    pub const UP: Self = Self(0x102);
    pub const DOWN: Self = Self(0x103);

    pub const LEFT_SHIFT: Self = Self(0x110);
    pub const RIGHT_SHIFT: Self = Self(0x111);
    pub const LEFT_CONTROL: Self = Self(0x112);
    pub const RIGHT_CONTROL: Self = Self(0x113);
    pub const LEFT_ALT: Self = Self(0x114);
    pub const RIGHT_ALT: Self = Self(0x115);

    pub const F1: Self = Self(0x120);
    pub const F2: Self = Self(0x121);
    pub const F3: Self = Self(0x122);
    pub const F4: Self = Self(0x123);
    pub const F5: Self = Self(0x124);
    pub const F6: Self = Self(0x125);
    pub const F7: Self = Self(0x126);
    pub const F8: Self = Self(0x127);
    pub const F9: Self = Self(0x128);
    pub const F10: Self = Self(0x129);
    pub const F11: Self = Self(0x12A);
    pub const F12: Self = Self(0x12B);
}

impl KeyCode {
    /// Returns the key code for a letter, digit or space character.
    ///
    /// Letters are case-insensitive. Returns `None` for any other character.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'a'..='z' => Some(Self(c.to_ascii_uppercase() as u32)),
            'A'..='Z' | '0'..='9' | ' ' => Some(Self(c as u32)),
            _ => None,
        }
    }

    /// Returns the printable character of this key, if it has one.
    pub fn as_char(self) -> Option<char> {
        match self.0 {
            32 | 48..=57 | 65..=90 => char::from_u32(self.0),
            _ => None,
        }
    }
}

/// An engine-internal representation of a mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// The left mouse button.
    Left,
    /// The right mouse button.
    Right,
    /// The middle mouse button.
    Middle,
    /// The back mouse button (typically on the side).
    Back,
    /// The forward mouse button (typically on the side).
    Forward,
    /// Another mouse button, identified by a numeric code.
    Other(u16),
}

/// The user asked for the game window to close.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CloseRequested;

/// A keyboard key went down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyDown {
    /// The key that was pressed.
    pub code: KeyCode,
}

/// A keyboard key was released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyUp {
    /// The key that was released.
    pub code: KeyCode,
}

/// A mouse button went down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseDown {
    /// The button that was pressed.
    pub button: MouseButton,
    /// Cursor x-coordinate in window pixels.
    pub x: i32,
    /// Cursor y-coordinate in window pixels.
    pub y: i32,
}

/// A mouse button was released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseUp {
    /// The button that was released.
    pub button: MouseButton,
    /// Cursor x-coordinate in window pixels.
    pub x: i32,
    /// Cursor y-coordinate in window pixels.
    pub y: i32,
}

/// The mouse wheel moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseWheel {
    /// Number of lines scrolled; positive values scroll away from the user.
    pub delta: i32,
}

/// A user-defined event category.
///
/// Implementing this trait is all a type needs to travel through the event
/// loop and to be the declared category of a typed handler.
///
/// ```rust
/// use bomber_core::event::{Event, EventKind, UserEvent};
///
/// #[derive(Debug)]
/// struct BombPlaced { tile: (u32, u32) }
///
/// impl UserEvent for BombPlaced {
///     const NAME: &'static str = "bomb_placed";
/// }
///
/// let event = Event::user(BombPlaced { tile: (3, 4) });
/// assert_eq!(event.kind(), EventKind::User("bomb_placed"));
/// assert_eq!(event.user_payload::<BombPlaced>().unwrap().tile, (3, 4));
/// ```
pub trait UserEvent: Any + fmt::Debug + Send + Sync {
    /// The category name; it is the tag the loop matches on.
    const NAME: &'static str;
}

/// Object-safe view over a user payload, so it can be both printed and downcast.
trait ErasedPayload: Any + fmt::Debug + Send + Sync {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any + fmt::Debug + Send + Sync> ErasedPayload for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A type-erased, shared user event payload tagged with its category name.
#[derive(Clone)]
pub struct UserPayload {
    name: &'static str,
    value: Arc<dyn ErasedPayload>,
}

impl UserPayload {
    /// Wraps a user event value.
    pub fn new<T: UserEvent>(value: T) -> Self {
        Self {
            name: T::NAME,
            value: Arc::new(value),
        }
    }

    /// Returns the category name of the payload.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the payload as `T` if that is its concrete type.
    pub fn downcast_ref<T: UserEvent>(&self) -> Option<&T> {
        // Deref explicitly: the `Arc` itself also satisfies `ErasedPayload`.
        (*self.value).as_any().downcast_ref::<T>()
    }
}

impl fmt::Debug for UserPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPayload")
            .field("name", &self.name)
            .field("value", &self.value)
            .finish()
    }
}

/// Two user payloads are equal when they share the same allocation.
impl PartialEq for UserPayload {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && Arc::ptr_eq(&self.value, &other.value)
    }
}

/// Discriminant of an [`Event`], used as the dispatch tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// See [`CloseRequested`].
    CloseRequested,
    /// See [`KeyDown`].
    KeyDown,
    /// See [`KeyUp`].
    KeyUp,
    /// See [`MouseDown`].
    MouseDown,
    /// See [`MouseUp`].
    MouseUp,
    /// See [`MouseWheel`].
    MouseWheel,
    /// A user-defined category, identified by [`UserEvent::NAME`].
    User(&'static str),
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::User(name) => write!(f, "User({name})"),
            other => write!(f, "{other:?}"),
        }
    }
}

/// Something that happened, on its way from a producer to the handlers.
///
/// Events are immutable once built. The loop owns each one from push to
/// delivery; handlers only ever see a borrow.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The window close button was pressed.
    CloseRequested(CloseRequested),
    /// A key went down.
    KeyDown(KeyDown),
    /// A key was released.
    KeyUp(KeyUp),
    /// A mouse button went down.
    MouseDown(MouseDown),
    /// A mouse button was released.
    MouseUp(MouseUp),
    /// The mouse wheel moved.
    MouseWheel(MouseWheel),
    /// A user-defined event.
    User(UserPayload),
}

impl Event {
    /// Builds an event carrying a user-defined payload.
    pub fn user<T: UserEvent>(value: T) -> Self {
        Event::User(UserPayload::new(value))
    }

    /// Returns the category tag of this event.
    pub fn kind(&self) -> EventKind {
        match self {
            Event::CloseRequested(_) => EventKind::CloseRequested,
            Event::KeyDown(_) => EventKind::KeyDown,
            Event::KeyUp(_) => EventKind::KeyUp,
            Event::MouseDown(_) => EventKind::MouseDown,
            Event::MouseUp(_) => EventKind::MouseUp,
            Event::MouseWheel(_) => EventKind::MouseWheel,
            Event::User(payload) => EventKind::User(payload.name()),
        }
    }

    /// Returns the user payload as `T`, if this is a user event of that type.
    pub fn user_payload<T: UserEvent>(&self) -> Option<&T> {
        match self {
            Event::User(payload) => payload.downcast_ref::<T>(),
            _ => None,
        }
    }

    /// Returns the key code of a keyboard event.
    pub fn key_code(&self) -> Option<KeyCode> {
        match self {
            Event::KeyDown(KeyDown { code }) | Event::KeyUp(KeyUp { code }) => Some(*code),
            _ => None,
        }
    }

    /// Returns the button and cursor position of a mouse button event.
    pub fn mouse_position(&self) -> Option<(MouseButton, i32, i32)> {
        match self {
            Event::MouseDown(MouseDown { button, x, y }) | Event::MouseUp(MouseUp { button, x, y }) => {
                Some((*button, *x, *y))
            }
            _ => None,
        }
    }

    /// Returns `true` for the built-in categories a platform can produce.
    pub fn is_system(&self) -> bool {
        !matches!(self, Event::User(_))
    }
}

/// A concrete event category a typed handler can declare.
///
/// Implemented for every built-in payload type and, through a blanket
/// implementation, for every [`UserEvent`].
pub trait EventCategory: fmt::Debug + Send + Sync + 'static {
    /// The tag shared by all events of this category.
    fn kind() -> EventKind;

    /// Borrows the payload out of `event` if it belongs to this category.
    fn extract(event: &Event) -> Option<&Self>;
}

macro_rules! builtin_category {
    ($($name:ident),* $(,)?) => {
        $(
            impl EventCategory for $name {
                fn kind() -> EventKind {
                    EventKind::$name
                }

                fn extract(event: &Event) -> Option<&Self> {
                    match event {
                        Event::$name(inner) => Some(inner),
                        _ => None,
                    }
                }
            }

            impl From<$name> for Event {
                fn from(value: $name) -> Self {
                    Event::$name(value)
                }
            }
        )*
    };
}

builtin_category!(CloseRequested, KeyDown, KeyUp, MouseDown, MouseUp, MouseWheel);

impl<T: UserEvent> EventCategory for T {
    fn kind() -> EventKind {
        EventKind::User(T::NAME)
    }

    fn extract(event: &Event) -> Option<&Self> {
        event.user_payload::<T>()
    }
}

impl From<UserPayload> for Event {
    fn from(value: UserPayload) -> Self {
        Event::User(value)
    }
}
