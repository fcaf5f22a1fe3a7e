//! Per-frame inputs shared by both visuals.

use crate::camera::Camera;
use glam::{Mat4, Vec2};

/// Everything a visual reads from the outside world for one frame.
#[derive(Clone, Copy, Debug)]
pub struct FrameInputs {
    /// Seconds since start; never reset.
    pub time_sec: f64,
    pub dt_sec: f32,
    /// Smoothed pointer in normalized device coordinates (-1..1).
    pub pointer_ndc: Vec2,
    /// Smoothed pointer projected onto the z = 0 plane.
    pub pointer_world: Vec2,
    /// Drawing buffer size in physical pixels.
    pub resolution: [f32; 2],
    pub pixel_ratio: f32,
    pub scroll_progress: f32,
    pub view: Mat4,
    pub view_proj: Mat4,
}

impl FrameInputs {
    pub fn new(
        time_sec: f64,
        dt_sec: f32,
        pointer_ndc: Vec2,
        camera: &Camera,
        resolution: [f32; 2],
        pixel_ratio: f32,
        scroll_progress: f32,
    ) -> Self {
        Self {
            time_sec,
            dt_sec,
            pointer_ndc,
            pointer_world: camera.pointer_world_on_plane(pointer_ndc),
            resolution,
            pixel_ratio,
            scroll_progress,
            view: camera.view(),
            view_proj: camera.view_proj(),
        }
    }
}

/// Exponential smoothing of the raw pointer sample, one step per frame.
#[derive(Clone, Copy, Debug)]
pub struct PointerSmoother {
    value: Vec2,
    raw: Vec2,
    factor: f32,
}

impl PointerSmoother {
    pub fn new(factor: f32) -> Self {
        Self {
            value: Vec2::ZERO,
            raw: Vec2::ZERO,
            factor: factor.clamp(0.0, 1.0),
        }
    }

    pub fn set_raw(&mut self, ndc: Vec2) {
        self.raw = ndc.clamp(Vec2::splat(-1.0), Vec2::splat(1.0));
    }

    pub fn step(&mut self) -> Vec2 {
        self.value += (self.raw - self.value) * self.factor;
        self.value
    }

    pub fn value(&self) -> Vec2 {
        self.value
    }
}

/// Which two keyframes the morph interpolates between this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KeyframePair {
    pub a: usize,
    pub b: usize,
    /// Intra-keyframe progress in \[0, 1).
    pub factor: f32,
}

/// Frame-rate independent walk through a looping keyframe sequence.
///
/// The last keyframe of a looping clip is the same pose as the first, so the
/// walk wraps from the second-to-last keyframe straight back to 0.
#[derive(Clone, Copy, Debug, Default)]
pub struct KeyframeCursor {
    current: usize,
    acc: f32,
    count: usize,
    steps_per_sec: f32,
}

impl KeyframeCursor {
    pub fn new(count: usize, steps_per_sec: f32) -> Self {
        Self {
            current: 0,
            acc: 0.0,
            count,
            steps_per_sec: steps_per_sec.max(0.0),
        }
    }

    /// Number of distinct pairs in one loop.
    fn span(&self) -> usize {
        if self.count >= 2 {
            self.count - 1
        } else {
            self.count
        }
    }

    /// Accumulate `dt * speed` keyframe steps. Each whole step advances the
    /// pair (wrapping at the end of the loop); the remainder is the factor.
    pub fn advance(&mut self, dt_sec: f32, speed: f32) -> KeyframePair {
        if self.count == 0 {
            return KeyframePair {
                a: 0,
                b: 0,
                factor: 0.0,
            };
        }
        self.acc += dt_sec.max(0.0) * speed.max(0.0) * self.steps_per_sec;
        if self.acc >= 1.0 {
            let steps = self.acc.floor();
            self.acc -= steps;
            self.current = (self.current + steps as usize) % self.span();
        }
        self.pair()
    }

    pub fn pair(&self) -> KeyframePair {
        KeyframePair {
            a: self.current,
            b: (self.current + 1) % self.count.max(1),
            factor: self.acc,
        }
    }
}
