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

//! Raw platform input notifications and the sources the event loop pulls them from.

use crate::event::{KeyCode, MouseButton};
use flume::TryRecvError;
use std::collections::VecDeque;

/// A raw notification reported by the windowing backend, before translation.
///
/// Only some notifications have a domain event counterpart; the rest are
/// dropped by the translator.
#[derive(Debug, Clone, PartialEq)]
pub enum RawInput {
    /// The window close button was pressed.
    CloseRequested,
    /// A mouse button was pressed at the given cursor position.
    MouseButtonPressed {
        /// The button.
        button: MouseButton,
        /// Cursor x-coordinate in window pixels.
        x: i32,
        /// Cursor y-coordinate in window pixels.
        y: i32,
    },
    /// A mouse button was released at the given cursor position.
    MouseButtonReleased {
        /// The button.
        button: MouseButton,
        /// Cursor x-coordinate in window pixels.
        x: i32,
        /// Cursor y-coordinate in window pixels.
        y: i32,
    },
    /// The mouse wheel moved by a number of lines.
    MouseWheelMoved {
        /// Lines scrolled; positive scrolls away from the user.
        delta: i32,
    },
    /// A key was pressed.
    KeyPressed {
        /// The key.
        code: KeyCode,
    },
    /// A key was released.
    KeyReleased {
        /// The key.
        code: KeyCode,
    },
    /// The window was resized.
    Resized {
        /// New inner width in physical pixels.
        width: u32,
        /// New inner height in physical pixels.
        height: u32,
    },
    /// The window gained (`true`) or lost (`false`) focus.
    FocusChanged(bool),
    /// The cursor moved inside the window.
    CursorMoved {
        /// Cursor x-coordinate in window pixels.
        x: i32,
        /// Cursor y-coordinate in window pixels.
        y: i32,
    },
    /// A character was typed.
    TextEntered(char),
}

/// A non-blocking supplier of raw platform notifications.
///
/// The event loop calls [`poll`](PlatformEventSource::poll) repeatedly each tick
/// until it returns `None`, so implementations must never wait for input.
pub trait PlatformEventSource: Send {
    /// Returns the next pending notification, or `None` if nothing is pending.
    fn poll(&mut self) -> Option<RawInput>;
}

impl PlatformEventSource for VecDeque<RawInput> {
    fn poll(&mut self) -> Option<RawInput> {
        self.pop_front()
    }
}

/// A platform source backed by an unbounded channel.
///
/// The windowing backend holds an [`InputFeeder`] and sends notifications as
/// it receives them; the event loop owns the source and drains it once per tick.
#[derive(Debug)]
pub struct ChannelInputSource {
    sender: flume::Sender<RawInput>,
    receiver: flume::Receiver<RawInput>,
}

impl ChannelInputSource {
    /// Creates a new source with an unbounded channel.
    pub fn new() -> Self {
        let (sender, receiver) = flume::unbounded();
        log::debug!("Platform input channel initialized.");
        Self { sender, receiver }
    }

    /// Returns a feeder for this source.
    /// Feeders are cheap to clone and can be moved to other threads.
    pub fn feeder(&self) -> InputFeeder {
        InputFeeder {
            sender: self.sender.clone(),
        }
    }

    /// Returns the number of notifications waiting to be polled.
    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    /// Returns `true` if no notification is waiting.
    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }
}

impl Default for ChannelInputSource {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformEventSource for ChannelInputSource {
    fn poll(&mut self) -> Option<RawInput> {
        match self.receiver.try_recv() {
            Ok(raw) => Some(raw),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }
}

/// The sending half of a [`ChannelInputSource`].
#[derive(Debug, Clone)]
pub struct InputFeeder {
    sender: flume::Sender<RawInput>,
}

impl InputFeeder {
    /// Sends a notification to the source.
    ///
    /// If the source has been dropped (the loop was torn down) the
    /// notification is discarded.
    pub fn feed(&self, raw: RawInput) {
        if let Err(e) = self.sender.send(raw) {
            log::debug!("Discarding {:?}: input source is gone.", e.into_inner());
        }
    }

    /// Returns `true` while the source is still alive.
    pub fn is_connected(&self) -> bool {
        !self.sender.is_disconnected()
    }
}
