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

//! Provides translation from a concrete windowing backend (`winit`) to the core's raw input stream.
//!
//! This module acts as an adapter layer, decoupling the rest of the runtime from the
//! specific input event format of the `winit` crate.

use bomber_core::event::{KeyCode, MouseButton};
use bomber_core::platform::{InputFeeder, RawInput};
use winit::dpi::PhysicalPosition;
use winit::event::{
    ElementState, KeyEvent, MouseButton as WinitMouseButton, MouseScrollDelta, WindowEvent,
};
use winit::keyboard::{KeyCode as WinitKeyCode, PhysicalKey};

/// Pixels scrolled by one wheel line, for devices reporting pixel deltas.
pub const PIXELS_PER_LINE: f64 = 20.0;

/// Converts `winit` window events into [`RawInput`] notifications and feeds them
/// to the event loop's input source.
///
/// `winit` reports the cursor position separately from button presses, so the
/// adapter remembers the last known position and stamps it on every button
/// notification.
#[derive(Debug)]
pub struct WinitInputAdapter {
    feeder: InputFeeder,
    cursor: (i32, i32),
}

impl WinitInputAdapter {
    /// Creates an adapter feeding `feeder`.
    pub fn new(feeder: InputFeeder) -> Self {
        Self {
            feeder,
            cursor: (0, 0),
        }
    }

    /// Returns the last known cursor position, in window pixels.
    pub fn cursor(&self) -> (i32, i32) {
        self.cursor
    }

    /// Translates `event` and forwards the result to the input source.
    ///
    /// Events without a raw counterpart are ignored.
    pub fn handle_window_event(&mut self, event: &WindowEvent) {
        if let WindowEvent::KeyboardInput {
            event: key_event, ..
        } = event
        {
            self.handle_key_event(key_event);
            return;
        }
        if let Some(raw) = self.translate(event) {
            self.feeder.feed(raw);
        }
    }

    /// Translates every non-keyboard window event.
    ///
    /// Keyboard events carry a `KeyEvent` that only `winit` itself can build,
    /// so they go through [`translate_key`] instead.
    pub fn translate(&mut self, event: &WindowEvent) -> Option<RawInput> {
        match event {
            WindowEvent::CloseRequested => Some(RawInput::CloseRequested),
            WindowEvent::Resized(size) => Some(RawInput::Resized {
                width: size.width,
                height: size.height,
            }),
            WindowEvent::Focused(focused) => Some(RawInput::FocusChanged(*focused)),
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = to_window_pixels(*position);
                let (x, y) = self.cursor;
                Some(RawInput::CursorMoved { x, y })
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let button = map_mouse_button(*button);
                let (x, y) = self.cursor;
                Some(match state {
                    ElementState::Pressed => RawInput::MouseButtonPressed { button, x, y },
                    ElementState::Released => RawInput::MouseButtonReleased { button, x, y },
                })
            }
            WindowEvent::MouseWheel { delta, .. } => {
                wheel_lines(*delta).map(|delta| RawInput::MouseWheelMoved { delta })
            }
            _ => None,
        }
    }

    fn handle_key_event(&mut self, key_event: &KeyEvent) {
        if let Some(raw) = translate_key(key_event.physical_key, key_event.state, key_event.repeat)
        {
            self.feeder.feed(raw);
        }
        if key_event.state == ElementState::Pressed {
            if let Some(text) = key_event.text.as_ref() {
                for c in text.chars().filter(|c| !c.is_control()) {
                    self.feeder.feed(RawInput::TextEntered(c));
                }
            }
        }
    }
}

/// Translates the physical part of a keyboard event.
///
/// Auto-repeated presses and keys without a [`KeyCode`] counterpart are ignored.
pub fn translate_key(key: PhysicalKey, state: ElementState, repeat: bool) -> Option<RawInput> {
    let PhysicalKey::Code(winit_code) = key else {
        return None;
    };
    let code = map_key_code(winit_code)?;
    match state {
        ElementState::Pressed if !repeat => Some(RawInput::KeyPressed { code }),
        ElementState::Released => Some(RawInput::KeyReleased { code }),
        ElementState::Pressed => None,
    }
}

// --- Private Helper Functions ---

/// (Internal) Rounds a `winit` cursor position to whole window pixels.
fn to_window_pixels(position: PhysicalPosition<f64>) -> (i32, i32) {
    (position.x.round() as i32, position.y.round() as i32)
}

/// (Internal) Converts a vertical scroll delta to whole lines; zero deltas yield `None`.
fn wheel_lines(delta: MouseScrollDelta) -> Option<i32> {
    let lines = match delta {
        MouseScrollDelta::LineDelta(_, y) => f64::from(y),
        MouseScrollDelta::PixelDelta(pos) => pos.y / PIXELS_PER_LINE,
    };
    let lines = lines.round() as i32;
    (lines != 0).then_some(lines)
}

/// (Internal) Maps a `winit::event::MouseButton` to the core's `MouseButton` enum.
fn map_mouse_button(button: WinitMouseButton) -> MouseButton {
    match button {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back => MouseButton::Back,
        WinitMouseButton::Forward => MouseButton::Forward,
        WinitMouseButton::Other(id) => MouseButton::Other(id),
    }
}

/// (Internal) Maps a `winit` physical key to the core's key code.
fn map_key_code(code: WinitKeyCode) -> Option<KeyCode> {
    use WinitKeyCode as W;

    let mapped = match code {
        W::KeyA => KeyCode::A,
        W::KeyB => KeyCode::B,
        W::KeyC => KeyCode::C,
        W::KeyD => KeyCode::D,
        W::KeyE => KeyCode::E,
        W::KeyF => KeyCode::F,
        W::KeyG => KeyCode::G,
        W::KeyH => KeyCode::H,
        W::KeyI => KeyCode::I,
        W::KeyJ => KeyCode::J,
        W::KeyK => KeyCode::K,
        W::KeyL => KeyCode::L,
        W::KeyM => KeyCode::M,
        W::KeyN => KeyCode::N,
        W::KeyO => KeyCode::O,
        W::KeyP => KeyCode::P,
        W::KeyQ => KeyCode::Q,
        W::KeyR => KeyCode::R,
        W::KeyS => KeyCode::S,
        W::KeyT => KeyCode::T,
        W::KeyU => KeyCode::U,
        W::KeyV => KeyCode::V,
        W::KeyW => KeyCode::W,
        W::KeyX => KeyCode::X,
        W::KeyY => KeyCode::Y,
        W::KeyZ => KeyCode::Z,
        W::Digit0 => KeyCode::NUM_0,
        W::Digit1 => KeyCode::NUM_1,
        W::Digit2 => KeyCode::NUM_2,
        W::Digit3 => KeyCode::NUM_3,
        W::Digit4 => KeyCode::NUM_4,
        W::Digit5 => KeyCode::NUM_5,
        W::Digit6 => KeyCode::NUM_6,
        W::Digit7 => KeyCode::NUM_7,
        W::Digit8 => KeyCode::NUM_8,
        W::Digit9 => KeyCode::NUM_9,
        W::Space => KeyCode::SPACE,
        W::Enter | W::NumpadEnter => KeyCode::ENTER,
        W::Escape => KeyCode::ESCAPE,
        W::Tab => KeyCode::TAB,
        W::Backspace => KeyCode::BACKSPACE,
        W::ArrowLeft => KeyCode::LEFT,
        W::ArrowRight => KeyCode::RIGHT,
        W::ArrowUp => KeyCode::UP,
        W::ArrowDown => KeyCode::DOWN,
        W::ShiftLeft => KeyCode::LEFT_SHIFT,
        W::ShiftRight => KeyCode::RIGHT_SHIFT,
        W::ControlLeft => KeyCode::LEFT_CONTROL,
        W::ControlRight => KeyCode::RIGHT_CONTROL,
        W::AltLeft => KeyCode::LEFT_ALT,
        W::AltRight => KeyCode::RIGHT_ALT,
        W::F1 => KeyCode::F1,
        W::F2 => KeyCode::F2,
        W::F3 => KeyCode::F3,
        W::F4 => KeyCode::F4,
        W::F5 => KeyCode::F5,
        W::F6 => KeyCode::F6,
        W::F7 => KeyCode::F7,
        W::F8 => KeyCode::F8,
        W::F9 => KeyCode::F9,
        W::F10 => KeyCode::F10,
        W::F11 => KeyCode::F11,
        W::F12 => KeyCode::F12,
        _ => return None,
    };
    Some(mapped)
}

// --- Unit Tests for Input Translation ---
#[cfg(test)]
mod tests {
    use super::*;
    use bomber_core::platform::{ChannelInputSource, PlatformEventSource};
    use winit::dpi::PhysicalSize;
    use winit::event::{DeviceId, TouchPhase};
    use winit::keyboard::NativeKeyCode;

    fn adapter() -> (WinitInputAdapter, ChannelInputSource) {
        let source = ChannelInputSource::new();
        (WinitInputAdapter::new(source.feeder()), source)
    }

    fn wheel(delta: MouseScrollDelta) -> WindowEvent {
        WindowEvent::MouseWheel {
            device_id: DeviceId::dummy(),
            delta,
            phase: TouchPhase::Moved,
        }
    }

    fn cursor_at(x: f64, y: f64) -> WindowEvent {
        WindowEvent::CursorMoved {
            device_id: DeviceId::dummy(),
            position: PhysicalPosition::new(x, y),
        }
    }

    /// Test cases for translating keycodes to the core's key codes
    #[test]
    fn test_map_key_code_simple() {
        assert_eq!(map_key_code(WinitKeyCode::KeyA), Some(KeyCode(65)));
        assert_eq!(map_key_code(WinitKeyCode::Digit1), Some(KeyCode::NUM_1));
        assert_eq!(map_key_code(WinitKeyCode::Space), Some(KeyCode::SPACE));
        assert_eq!(map_key_code(WinitKeyCode::Escape), Some(KeyCode::ESCAPE));
        assert_eq!(map_key_code(WinitKeyCode::MediaPlayPause), None);
    }

    #[test]
    fn test_translate_key_ignores_repeats() {
        let key = PhysicalKey::Code(WinitKeyCode::ArrowUp);
        assert_eq!(
            translate_key(key, ElementState::Pressed, false),
            Some(RawInput::KeyPressed { code: KeyCode::UP })
        );
        assert_eq!(translate_key(key, ElementState::Pressed, true), None);
        assert_eq!(
            translate_key(key, ElementState::Released, false),
            Some(RawInput::KeyReleased { code: KeyCode::UP })
        );
    }

    #[test]
    fn test_translate_key_unidentified_returns_none() {
        let key = PhysicalKey::Unidentified(NativeKeyCode::Unidentified);
        assert_eq!(translate_key(key, ElementState::Pressed, false), None);
    }

    /// Test cases for translating mouse buttons to the core's internal representation
    #[test]
    fn test_map_mouse_button_standard() {
        assert_eq!(map_mouse_button(WinitMouseButton::Left), MouseButton::Left);
        assert_eq!(
            map_mouse_button(WinitMouseButton::Right),
            MouseButton::Right
        );
        assert_eq!(
            map_mouse_button(WinitMouseButton::Middle),
            MouseButton::Middle
        );
        assert_eq!(map_mouse_button(WinitMouseButton::Back), MouseButton::Back);
        assert_eq!(
            map_mouse_button(WinitMouseButton::Forward),
            MouseButton::Forward
        );
        assert_eq!(
            map_mouse_button(WinitMouseButton::Other(8)),
            MouseButton::Other(8)
        );
    }

    /// Button notifications carry the last cursor position
    #[test]
    fn test_mouse_button_uses_tracked_cursor() {
        let (mut adapter, _source) = adapter();
        assert_eq!(
            adapter.translate(&cursor_at(100.4, 200.6)),
            Some(RawInput::CursorMoved { x: 100, y: 201 })
        );

        let pressed = WindowEvent::MouseInput {
            device_id: DeviceId::dummy(),
            state: ElementState::Pressed,
            button: WinitMouseButton::Left,
        };
        assert_eq!(
            adapter.translate(&pressed),
            Some(RawInput::MouseButtonPressed {
                button: MouseButton::Left,
                x: 100,
                y: 201
            })
        );

        let released = WindowEvent::MouseInput {
            device_id: DeviceId::dummy(),
            state: ElementState::Released,
            button: WinitMouseButton::Right,
        };
        assert_eq!(
            adapter.translate(&released),
            Some(RawInput::MouseButtonReleased {
                button: MouseButton::Right,
                x: 100,
                y: 201
            })
        );
    }

    #[test]
    fn test_translate_mouse_wheel_line() {
        let (mut adapter, _source) = adapter();
        assert_eq!(
            adapter.translate(&wheel(MouseScrollDelta::LineDelta(-1.0, 2.0))),
            Some(RawInput::MouseWheelMoved { delta: 2 })
        );
        assert_eq!(
            adapter.translate(&wheel(MouseScrollDelta::LineDelta(3.0, 0.0))),
            None
        );
    }

    #[test]
    fn test_translate_mouse_wheel_pixel() {
        let (mut adapter, _source) = adapter();
        assert_eq!(
            adapter.translate(&wheel(MouseScrollDelta::PixelDelta(PhysicalPosition::new(
                5.5, -60.0
            )))),
            Some(RawInput::MouseWheelMoved { delta: -3 })
        );
        // Less than half a line rounds to nothing.
        assert_eq!(
            adapter.translate(&wheel(MouseScrollDelta::PixelDelta(PhysicalPosition::new(
                0.0, 4.0
            )))),
            None
        );
    }

    #[test]
    fn test_translate_window_notifications() {
        let (mut adapter, _source) = adapter();
        assert_eq!(
            adapter.translate(&WindowEvent::CloseRequested),
            Some(RawInput::CloseRequested)
        );
        assert_eq!(
            adapter.translate(&WindowEvent::Resized(PhysicalSize::new(800, 600))),
            Some(RawInput::Resized {
                width: 800,
                height: 600
            })
        );
        assert_eq!(
            adapter.translate(&WindowEvent::Focused(false)),
            Some(RawInput::FocusChanged(false))
        );
        assert_eq!(adapter.translate(&WindowEvent::RedrawRequested), None);
    }

    #[test]
    fn test_handle_window_event_feeds_the_source() {
        let (mut adapter, mut source) = adapter();
        adapter.handle_window_event(&cursor_at(3.0, 4.0));
        adapter.handle_window_event(&WindowEvent::RedrawRequested);
        adapter.handle_window_event(&WindowEvent::CloseRequested);

        assert_eq!(source.poll(), Some(RawInput::CursorMoved { x: 3, y: 4 }));
        assert_eq!(source.poll(), Some(RawInput::CloseRequested));
        assert_eq!(source.poll(), None);
        assert_eq!(adapter.cursor(), (3, 4));
    }
}
