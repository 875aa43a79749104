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

//! Game configuration, persisted as JSON.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Window settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Title shown in the window decoration.
    pub title: String,
    /// Inner width in logical pixels.
    pub width: u32,
    /// Inner height in logical pixels.
    pub height: u32,
    /// Whether the window opens fullscreen.
    pub fullscreen: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Bomber".to_string(),
            width: 640,
            height: 480,
            fullscreen: false,
        }
    }
}

/// Frame pacing settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    /// Maximum frames per second; `0` disables the limiter.
    pub fps_limit: u32,
    /// How often the frames-per-second figure is refreshed, in seconds.
    pub stats_interval_secs: f64,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            fps_limit: 60,
            stats_interval_secs: 1.0,
        }
    }
}

/// Audio switches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Whether background music plays.
    pub music_on: bool,
    /// Whether sound effects play.
    pub sounds_on: bool,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            music_on: true,
            sounds_on: true,
        }
    }
}

/// Complete game configuration.
///
/// Every section and field is optional in the JSON file; missing ones take
/// their default value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Window settings.
    pub window: WindowConfig,
    /// Frame pacing settings.
    pub frame: FrameConfig,
    /// Audio switches.
    pub audio: AudioConfig,
}

impl GameConfig {
    /// Parses a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Loads a configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("malformed config file {}", path.display()))
    }

    /// Loads a configuration, falling back to the defaults if the file is
    /// missing or malformed.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            log::info!(
                "No config file at {}, using default settings.",
                path.display()
            );
            return Self::default();
        }
        match Self::from_file(path) {
            Ok(config) => {
                log::info!("Loaded config from {}.", path.display());
                config
            }
            Err(e) => {
                log::warn!("{e:#}. Using default settings.");
                Self::default()
            }
        }
    }

    /// Saves the configuration as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write config file {}", path.display()))?;
        Ok(())
    }

    /// Applies command-line switches on top of the loaded settings.
    ///
    /// `-window` and `-fullscreen` (or their `--` forms) select the display
    /// mode; the last one given wins. Anything else is logged and ignored.
    pub fn apply_args<I, S>(&mut self, args: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for arg in args {
            match arg.as_ref() {
                "-window" | "--window" => self.window.fullscreen = false,
                "-fullscreen" | "--fullscreen" => self.window.fullscreen = true,
                other => log::warn!("Ignoring unknown command-line argument '{other}'."),
            }
        }
    }

    /// Returns the stats interval, or one second if the configured value is unusable.
    pub fn stats_interval(&self) -> Duration {
        Duration::try_from_secs_f64(self.frame.stats_interval_secs)
            .ok()
            .filter(|interval| !interval.is_zero())
            .unwrap_or(Duration::from_secs(1))
    }
}
