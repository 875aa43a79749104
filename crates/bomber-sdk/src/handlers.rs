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

//! Handlers every game registers.

use crate::control::GameControl;
use anyhow::Result;
use bomber_core::event::{CloseRequested, TypedHandler};

/// Stops the game when the window's close button is pressed.
#[derive(Debug, Clone)]
pub struct CloseHandler {
    control: GameControl,
}

impl CloseHandler {
    /// Creates a handler stopping the game behind `control`.
    pub fn new(control: GameControl) -> Self {
        Self { control }
    }
}

impl TypedHandler for CloseHandler {
    type Event = CloseRequested;

    fn handle_typed(&mut self, _event: &CloseRequested) -> Result<()> {
        log::info!("Close requested by the platform.");
        self.control.request_exit();
        Ok(())
    }
}
