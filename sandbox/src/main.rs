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

// Bomber Sandbox
// Main binary for trying out input handling and custom events

use anyhow::Result;
use bomber_sdk::prelude::*;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Runtime;

const CONFIG_PATH: &str = "bomber.json";
const TILE_SIZE: i32 = 32;
const ARENA_TILES: i32 = 13;

/// Pushed once per second by a background task.
#[derive(Debug)]
struct SecondElapsed {
    seconds: u64,
}

impl UserEvent for SecondElapsed {
    const NAME: &'static str = "second_elapsed";
}

/// Pushed when the player drops a bomb.
#[derive(Debug)]
struct BombPlaced {
    tile: (i32, i32),
}

impl UserEvent for BombPlaced {
    const NAME: &'static str = "bomb_placed";
}

/// Logs every key and mouse button event.
struct InputLogger;

impl EventHandler for InputLogger {
    fn can_handle(&self, event: &Event) -> bool {
        event.key_code().is_some() || event.mouse_position().is_some()
    }

    fn handle(&mut self, event: &Event) -> Result<()> {
        if let Some(code) = event.key_code() {
            match code.as_char() {
                Some(c) => log::info!("{}: '{c}'", event.kind()),
                None => log::info!("{}: {code:?}", event.kind()),
            }
        } else if let Some((button, x, y)) = event.mouse_position() {
            log::info!(
                "{}: {button:?} at ({x}, {y}), tile ({}, {})",
                event.kind(),
                x / TILE_SIZE,
                y / TILE_SIZE
            );
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "input-logger"
    }
}

/// Moves the player around the arena and drops bombs.
struct PlayerControls {
    events: LoopHandle,
    control: GameControl,
    tile: (i32, i32),
}

impl TypedHandler for PlayerControls {
    type Event = KeyDown;

    fn handle_typed(&mut self, event: &KeyDown) -> Result<()> {
        let (x, y) = self.tile;
        self.tile = match event.code {
            KeyCode::ESCAPE => {
                self.control.request_exit();
                return Ok(());
            }
            KeyCode::SPACE => {
                self.events.push_event(Event::user(BombPlaced { tile: self.tile }));
                return Ok(());
            }
            KeyCode::LEFT | KeyCode::A => (x - 1, y),
            KeyCode::RIGHT | KeyCode::D => (x + 1, y),
            KeyCode::UP | KeyCode::W => (x, y - 1),
            KeyCode::DOWN | KeyCode::S => (x, y + 1),
            _ => return Ok(()),
        };
        self.tile.0 = self.tile.0.clamp(0, ARENA_TILES - 1);
        self.tile.1 = self.tile.1.clamp(0, ARENA_TILES - 1);
        log::debug!("Player at tile {:?}.", self.tile);
        Ok(())
    }
}

struct BombLogger;

impl TypedHandler for BombLogger {
    type Event = BombPlaced;

    fn handle_typed(&mut self, event: &BombPlaced) -> Result<()> {
        log::info!("Bomb placed at tile {:?}.", event.tile);
        Ok(())
    }
}

/// Records the latest second reported by the ticker.
struct Stopwatch {
    seconds: Arc<AtomicU64>,
}

impl TypedHandler for Stopwatch {
    type Event = SecondElapsed;

    fn handle_typed(&mut self, event: &SecondElapsed) -> Result<()> {
        self.seconds.store(event.seconds, Ordering::Relaxed);
        Ok(())
    }
}

struct SandboxApp {
    runtime: Option<Runtime>,
    seconds: Arc<AtomicU64>,
    shown_seconds: u64,
    frames_this_second: u32,
}

impl SandboxApp {
    /// Starts a background task pushing a [`SecondElapsed`] event every second.
    fn spawn_ticker(events: LoopHandle) -> Option<Runtime> {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_time()
            .build()
        {
            Ok(runtime) => runtime,
            Err(e) => {
                log::warn!("Could not start the background ticker: {e}");
                return None;
            }
        };

        runtime.spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(1));
            // The first tick completes immediately.
            interval.tick().await;
            let mut seconds = 0;
            loop {
                interval.tick().await;
                seconds += 1;
                events.push_event(Event::user(SecondElapsed { seconds }));
            }
        });
        Some(runtime)
    }
}

impl Application for SandboxApp {
    fn new(ctx: &mut GameContext) -> Self {
        let events = ctx.events().clone();
        events.add_handler(InputLogger);
        events.add_typed_handler(BombLogger);
        let seconds = Arc::new(AtomicU64::new(0));
        events.add_typed_handler(Stopwatch {
            seconds: Arc::clone(&seconds),
        });
        events.add_typed_handler(PlayerControls {
            events: events.clone(),
            control: ctx.control().clone(),
            tile: (ARENA_TILES / 2, ARENA_TILES / 2),
        });

        Self {
            runtime: Self::spawn_ticker(events),
            seconds,
            shown_seconds: 0,
            frames_this_second: 0,
        }
    }

    fn update(&mut self, ctx: &mut GameContext, _dt: f32) -> Result<()> {
        self.frames_this_second += 1;

        let seconds = self.seconds.load(Ordering::Relaxed);
        if seconds != self.shown_seconds {
            self.shown_seconds = seconds;
            if let Some(window) = ctx.window() {
                window.set_title(&format!(
                    "{} - {seconds}s - {} fps",
                    ctx.config().window.title,
                    self.frames_this_second
                ));
            }
            self.frames_this_second = 0;
        }
        Ok(())
    }

    fn on_shutdown(&mut self) {
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
        log::info!("Sandbox ran for {} second(s).", self.shown_seconds);
    }
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let mut config = GameConfig::load_or_default(CONFIG_PATH);
    config.apply_args(std::env::args().skip(1));

    Engine::run::<SandboxApp>(config)?;
    Ok(())
}
