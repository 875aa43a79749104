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

//! The headless game driver.
//!
//! [`Game`] owns the event loop and runs frames: tick the clock, dispatch
//! the pending events, then let the [`Application`] update. It knows nothing
//! about windows; [`Engine`](crate::Engine) drives it from `winit`.

use crate::clock::FrameClock;
use crate::config::GameConfig;
use crate::control::GameControl;
use crate::handlers::CloseHandler;
use anyhow::Result;
use bomber_core::event::{EventLoop, LoopHandle};
use bomber_core::platform::{GameWindow, PlatformEventSource};
use std::sync::Arc;
use std::time::Duration;

/// The user's game logic.
pub trait Application: Sized + 'static {
    /// Called once when the game starts, to register handlers and grab handles.
    fn new(ctx: &mut GameContext) -> Self;

    /// Called every frame, after the frame's events were dispatched.
    fn update(&mut self, ctx: &mut GameContext, dt: f32) -> Result<()>;

    /// Called once when the game shuts down, after the event loop was torn down.
    fn on_shutdown(&mut self) {}
}

/// What an [`Application`] gets to work with.
pub struct GameContext {
    events: LoopHandle,
    control: GameControl,
    config: GameConfig,
    window: Option<Arc<dyn GameWindow>>,
}

impl GameContext {
    /// Returns the event loop handle, to push events and register handlers.
    pub fn events(&self) -> &LoopHandle {
        &self.events
    }

    /// Returns the running-flag handle.
    pub fn control(&self) -> &GameControl {
        &self.control
    }

    /// Returns the configuration the game was started with.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Returns the game window, if the game runs in one.
    pub fn window(&self) -> Option<&dyn GameWindow> {
        self.window.as_deref()
    }

    /// Asks the game to stop at the end of the current frame.
    pub fn request_exit(&self) {
        self.control.request_exit();
    }
}

/// Runs an [`Application`] on top of an [`EventLoop`].
pub struct Game<A: Application> {
    app: A,
    context: GameContext,
    event_loop: EventLoop,
    clock: FrameClock,
    shut_down: bool,
}

impl<A: Application> Game<A> {
    /// Creates a game without a platform: only pushed events are dispatched.
    pub fn new(config: GameConfig) -> Self {
        Self::build(config, EventLoop::new(), None)
    }

    /// Creates a game reading platform input from `source`.
    pub fn with_platform(
        config: GameConfig,
        source: impl PlatformEventSource + 'static,
        window: Option<Arc<dyn GameWindow>>,
    ) -> Self {
        Self::build(config, EventLoop::with_source(source), window)
    }

    fn build(config: GameConfig, event_loop: EventLoop, window: Option<Arc<dyn GameWindow>>) -> Self {
        let control = GameControl::new();
        event_loop.add_typed_handler(CloseHandler::new(control.clone()));

        let clock = FrameClock::new(config.frame.fps_limit, config.stats_interval());
        let mut context = GameContext {
            events: event_loop.handle(),
            control,
            config,
            window,
        };
        let app = A::new(&mut context);
        log::info!("Game '{}' initialized.", context.config.window.title);

        Self {
            app,
            context,
            event_loop,
            clock,
            shut_down: false,
        }
    }

    /// Runs one frame.
    ///
    /// # Errors
    ///
    /// Returns the first handler failure of the frame, or the application's
    /// update error. The game stays usable: the next frame resumes with the
    /// events that were not dispatched.
    pub fn frame(&mut self) -> Result<()> {
        if self.shut_down {
            return Ok(());
        }
        let tick = self.clock.tick();
        if let Some(fps) = tick.fps {
            log::debug!("FPS: {fps:.1}");
        }

        self.event_loop.process()?;
        self.app.update(&mut self.context, tick.dt)?;
        Ok(())
    }

    /// Runs frames until an exit is requested, then shuts the game down.
    ///
    /// Sleeps between frames to honor the configured frame-rate limit.
    pub fn run(&mut self) -> Result<()> {
        log::info!("Game loop started.");
        let result = self.run_frames();
        if let Err(e) = &result {
            log::error!("Game loop aborted: {e:#}");
        }
        self.shutdown();
        result
    }

    fn run_frames(&mut self) -> Result<()> {
        while self.is_running() {
            self.frame()?;
            if let Some(pause) = self.clock.sleep_duration() {
                std::thread::sleep(pause);
            }
        }
        Ok(())
    }

    /// Tears the event loop down and notifies the application. Idempotent.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;
        self.context.control.request_exit();
        self.event_loop.shutdown();
        self.app.on_shutdown();
        log::info!(
            "Game shut down after {} frame(s).",
            self.clock.frame_count()
        );
    }

    /// Returns `true` until an exit was requested or the game was shut down.
    pub fn is_running(&self) -> bool {
        !self.shut_down && self.context.control.is_running()
    }

    /// Returns how long to wait before the next frame to honor the frame-rate limit.
    pub fn sleep_duration(&self) -> Option<Duration> {
        self.clock.sleep_duration()
    }

    /// Returns the application.
    pub fn app(&self) -> &A {
        &self.app
    }

    /// Returns the context shared with the application.
    pub fn context(&self) -> &GameContext {
        &self.context
    }

    /// Returns the frame clock.
    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }
}

impl<A: Application> Drop for Game<A> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
