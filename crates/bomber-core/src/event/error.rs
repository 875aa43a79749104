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

//! Error types of the event dispatch core.
//!
//! Unmatched events and unrecognized platform notifications are not errors and
//! never show up here.

use super::types::EventKind;
use thiserror::Error;

/// A fatal condition raised while delivering events.
#[derive(Debug, Error)]
pub enum EventError {
    /// A typed handler accepted an event whose payload is not of its declared
    /// category. This is an invariant violation in the adapter or the loop.
    #[error("handler '{handler}' declared {expected} but was given a {found} event")]
    CategoryMismatch {
        /// Name of the handler that detected the mismatch.
        handler: String,
        /// The category the handler was declared for.
        expected: EventKind,
        /// The category of the event it was given.
        found: EventKind,
    },

    /// A handler failed while handling an event. The rest of the tick was abandoned.
    #[error("handler '{handler}' failed while handling a {kind} event")]
    HandlerFailed {
        /// Name of the failing handler.
        handler: String,
        /// Category of the event being delivered.
        kind: EventKind,
        /// The error returned by the handler.
        #[source]
        source: anyhow::Error,
    },
}
