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

//! Concrete platform backend for the bomber runtime.
//!
//! This crate implements the platform abstractions declared in `bomber-core`
//! on top of `winit`: a window wrapper and an adapter that turns window
//! notifications into the core's raw input stream.

#![warn(missing_docs)]

pub mod platform;

pub use platform::input::WinitInputAdapter;
pub use platform::window::{WinitWindow, WinitWindowBuilder};
