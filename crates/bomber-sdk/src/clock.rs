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

//! Frame timing: delta time, frames-per-second and the frame-rate limiter.

use std::time::{Duration, Instant};

/// What one [`FrameClock::tick`] measured.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTick {
    /// Seconds since the previous tick.
    pub dt: f32,
    /// Frames per second over the stats interval that just closed, if one did.
    pub fps: Option<f32>,
}

/// Measures frame times and paces the frame rate.
#[derive(Debug, Clone)]
pub struct FrameClock {
    frame_budget: Option<Duration>,
    stats_interval: Duration,
    last_frame: Instant,
    window_start: Instant,
    frames_in_window: u32,
    fps: f32,
    frame_count: u64,
}

impl FrameClock {
    /// Creates a clock. An `fps_limit` of `0` disables the limiter.
    pub fn new(fps_limit: u32, stats_interval: Duration) -> Self {
        Self::starting_at(Instant::now(), fps_limit, stats_interval)
    }

    /// Creates a clock whose first frame started at `now`.
    pub fn starting_at(now: Instant, fps_limit: u32, stats_interval: Duration) -> Self {
        let frame_budget = (fps_limit > 0).then(|| Duration::from_secs(1) / fps_limit);
        Self {
            frame_budget,
            stats_interval,
            last_frame: now,
            window_start: now,
            frames_in_window: 0,
            fps: 0.0,
            frame_count: 0,
        }
    }

    /// Starts a new frame.
    pub fn tick(&mut self) -> FrameTick {
        self.tick_at(Instant::now())
    }

    /// Starts a new frame at `now`.
    pub fn tick_at(&mut self, now: Instant) -> FrameTick {
        let dt = now.saturating_duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.frame_count += 1;
        self.frames_in_window += 1;

        let elapsed = now.saturating_duration_since(self.window_start);
        let fps = if elapsed >= self.stats_interval {
            self.fps = self.frames_in_window as f32 / elapsed.as_secs_f32();
            self.window_start = now;
            self.frames_in_window = 0;
            Some(self.fps)
        } else {
            None
        };

        FrameTick { dt, fps }
    }

    /// Returns how long to sleep to honor the frame-rate limit.
    ///
    /// `None` if the limiter is off or the current frame is already over budget.
    pub fn sleep_duration(&self) -> Option<Duration> {
        self.sleep_duration_at(Instant::now())
    }

    /// Same as [`sleep_duration`](Self::sleep_duration), measured at `now`.
    pub fn sleep_duration_at(&self, now: Instant) -> Option<Duration> {
        let budget = self.frame_budget?;
        budget
            .checked_sub(now.saturating_duration_since(self.last_frame))
            .filter(|remaining| !remaining.is_zero())
    }

    /// Returns the last measured frames per second.
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Returns the number of frames ticked so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}
