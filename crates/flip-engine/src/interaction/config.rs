use glam::Vec3;
use serde::Deserialize;

use crate::error::Result;

/// Tunables for gestures and the canned animations.
///
/// Every field has a default, so a JSON document only needs the keys it
/// overrides.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Canonical resting position the object returns to after a drag.
    pub rest_position: Vec3,
    /// Height of the jump arc in world units.
    pub jump_height: f32,
    pub jump_rise_duration: f32,
    pub jump_fall_duration: f32,
    /// Gap between the jump starting and the flip starting.
    pub flip_delay: f32,
    pub flip_duration: f32,
    /// Local axis the flip turns about.
    pub flip_axis: Vec3,
    pub return_duration: f32,
    /// Spawn a ripple under the object when it is tapped.
    pub ripple_on_object_tap: bool,
    pub ripple_scale: f32,
    pub ripple_duration: f32,
    pub ripple_ring_radius: f32,
    pub ripple_pipe_radius: f32,
    pub ripple_color: [f32; 4],
    /// Pointer travel in points before a press stops being a tap.
    pub tap_slop: f32,
    /// Longest press, in seconds, still recognised as a tap.
    pub tap_max_duration: f64,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            rest_position: Vec3::new(0.0, 1.5, 0.0),
            jump_height: 1.0,
            jump_rise_duration: 0.25,
            jump_fall_duration: 0.25,
            flip_delay: 0.08,
            flip_duration: 0.42,
            flip_axis: Vec3::Z,
            return_duration: 1.0,
            ripple_on_object_tap: true,
            ripple_scale: 3.0,
            ripple_duration: 0.8,
            ripple_ring_radius: 0.5,
            ripple_pipe_radius: 0.05,
            ripple_color: [0.4, 0.8, 1.0, 0.8],
            tap_slop: 10.0,
            tap_max_duration: 0.35,
        }
    }
}

impl InteractionConfig {
    /// Parse from a JSON string. Missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Time from tap until the jump-flip graph completes.
    pub fn jump_flip_duration(&self) -> f32 {
        let jump = self.jump_rise_duration + self.jump_fall_duration;
        jump.max(self.flip_delay + self.flip_duration)
    }
}
