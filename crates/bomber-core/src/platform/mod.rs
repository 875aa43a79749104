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

//! Provides abstractions over platform-specific functionalities.
//!
//! This module contains the traits and types that define a common interface
//! for the underlying windowing system: the raw input notifications it reports
//! and the window the game runs in. Concrete backends live in `bomber-infra`.

pub mod input;
pub mod window;

pub use input::{ChannelInputSource, InputFeeder, PlatformEventSource, RawInput};
pub use window::GameWindow;
