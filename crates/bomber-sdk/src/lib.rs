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

//! The public-facing Software Development Kit (SDK) for the bomber runtime.
//! This crate provides a simple API to configure and run a game: implement
//! [`Application`], then hand it to [`Engine::run`] for a windowed game or to
//! [`Game`] for a headless one.

pub mod clock;
pub mod config;
pub mod control;
pub mod game;
pub mod handlers;

use anyhow::Result;
use bomber_core::platform::{ChannelInputSource, GameWindow};
use bomber_infra::platform::input::WinitInputAdapter;
use bomber_infra::platform::window::{WinitWindow, WinitWindowBuilder};
use std::sync::Arc;
use std::time::Instant;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::WindowId;

pub use clock::{FrameClock, FrameTick};
pub use config::GameConfig;
pub use control::GameControl;
pub use game::{Application, Game, GameContext};
pub use handlers::CloseHandler;

/// Everything a game usually needs, in one import.
pub mod prelude {
    pub use crate::{Application, Engine, Game, GameConfig, GameContext, GameControl};
    pub use bomber_core::event::{
        CloseRequested, Event, EventHandler, EventKind, KeyCode, KeyDown, KeyUp, LoopHandle,
        MouseButton, MouseDown, MouseUp, MouseWheel, TypedHandler, UserEvent,
    };
    pub use bomber_core::platform::GameWindow;
}

/// The internal state of the running engine, managed by the winit event loop.
struct EngineState<A: Application> {
    config: Option<GameConfig>,
    window: Option<WinitWindow>,
    input: Option<WinitInputAdapter>,
    game: Option<Game<A>>,
    error: Option<anyhow::Error>,
}

impl<A: Application> EngineState<A> {
    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("Stopping: {error:#}");
        self.error = Some(error);
        event_loop.exit();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(game) = self.game.as_mut() else {
            return;
        };
        if let Err(e) = game.frame() {
            self.fail(event_loop, e);
            return;
        }
        if !game.is_running() {
            event_loop.exit();
        }
    }
}

impl<A: Application> ApplicationHandler for EngineState<A> {
    /// Called when the event loop is ready to start processing events.
    /// The window and the game are created here, once.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let Some(config) = self.config.take() else {
            return;
        };

        log::info!("Application resumed. Creating window and game...");

        let window = match WinitWindowBuilder::new()
            .with_title(config.window.title.clone())
            .with_dimensions(config.window.width, config.window.height)
            .with_fullscreen(config.window.fullscreen)
            .build(event_loop)
        {
            Ok(window) => window,
            Err(e) => {
                self.fail(event_loop, anyhow::Error::new(e).context("failed to create window"));
                return;
            }
        };

        let source = ChannelInputSource::new();
        self.input = Some(WinitInputAdapter::new(source.feeder()));

        let shared: Arc<dyn GameWindow> = Arc::new(window.clone());
        self.game = Some(Game::with_platform(config, source, Some(shared)));
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        if self.window.as_ref().map(WinitWindow::winit_id) != Some(id) {
            return;
        }

        match event {
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {
                if let Some(input) = self.input.as_mut() {
                    input.handle_window_event(&event);
                }
            }
        }
    }

    /// Called when the event loop has processed all pending events and is about to wait.
    /// Either schedules the next frame or waits out the frame-rate limiter.
    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(game) = self.game.as_ref() else {
            return;
        };
        if !game.is_running() {
            event_loop.exit();
            return;
        }

        match game.sleep_duration() {
            Some(pause) => event_loop.set_control_flow(ControlFlow::WaitUntil(Instant::now() + pause)),
            None => {
                event_loop.set_control_flow(ControlFlow::Poll);
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(game) = self.game.as_mut() {
            game.shutdown();
        }
    }
}

/// The public entry point for a windowed game.
pub struct Engine;

impl Engine {
    /// Opens a window per `config` and runs `A` in it.
    ///
    /// Blocks the current thread until the game stops. Returns the error that
    /// stopped it, if any.
    pub fn run<A: Application>(config: GameConfig) -> Result<()> {
        log::info!("Bomber SDK: Starting...");
        let event_loop = EventLoop::new()?;

        // Populated in the `resumed` callback.
        let mut state = EngineState::<A> {
            config: Some(config),
            window: None,
            input: None,
            game: None,
            error: None,
        };

        event_loop.run_app(&mut state)?;

        // Shut the game down before the window goes away.
        drop(state.game.take());
        log::info!("Bomber SDK: Stopped.");
        match state.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
