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

//! Event ingestion and dispatch.
//!
//! - [`types`]: the [`Event`] values, their [`EventKind`] tags and the
//!   [`EventCategory`] / [`UserEvent`] traits that make categories matchable.
//! - [`handler`]: the [`EventHandler`] capability and the [`Typed`] adapter.
//! - [`translate`]: the [`SystemEventTranslator`] from raw platform input.
//! - [`event_loop`]: the [`EventLoop`] that queues, matches and delivers.

pub mod error;
pub mod event_loop;
pub mod handler;
mod queue;
mod registry;
pub mod translate;
pub mod types;

pub use self::error::EventError;
pub use self::event_loop::{EventLoop, LoopHandle, LoopState, TickReport};
pub use self::handler::{EventHandler, Typed, TypedHandler};
pub use self::registry::{HandlerId, SharedHandler};
pub use self::translate::SystemEventTranslator;
pub use self::types::{
    CloseRequested, Event, EventCategory, EventKind, KeyCode, KeyDown, KeyUp, MouseButton,
    MouseDown, MouseUp, MouseWheel, UserEvent, UserPayload,
};

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Locks `mutex`, recovering the data if a panicking handler poisoned it.
pub(crate) fn lock<T: ?Sized>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
