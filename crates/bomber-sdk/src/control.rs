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

//! The shared running flag of a game.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A cloneable handle over the game's running flag.
///
/// Handlers that need to stop the game receive a clone at construction.
#[derive(Debug, Clone)]
pub struct GameControl {
    running: Arc<AtomicBool>,
}

impl GameControl {
    /// Creates a handle in the running state.
    pub fn new() -> Self {
        Self {
            running: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Returns `true` until an exit has been requested.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Asks the game to stop at the end of the current frame.
    pub fn request_exit(&self) {
        if self.running.swap(false, Ordering::AcqRel) {
            log::info!("Exit requested.");
        }
    }
}

impl Default for GameControl {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_the_flag() {
        let control = GameControl::new();
        let clone = control.clone();
        assert!(clone.is_running());

        control.request_exit();
        control.request_exit();
        assert!(!clone.is_running());
    }
}
