//! Turns raw pointer phases into tap and pan gestures.
//!
//! Tap is attempted first. The pan only takes over once the pointer leaves
//! the slop radius, at which point the tap has failed for this touch.

use glam::Vec2;

use super::queue::{PointerEvent, PointerPhase};

/// A recognised gesture in viewport points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    Tap { location: Vec2 },
    /// Carries the touch-down location, not where the slop was crossed.
    DragBegin { location: Vec2 },
    DragMove { location: Vec2 },
    DragEnd { location: Vec2 },
    DragCancel,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Tracking {
    Idle,
    Pressed { start: Vec2, started_at: f64 },
    Panning,
}

pub struct GestureRecognizer {
    /// Distance in points the pointer may wander before the tap fails.
    slop: f32,
    /// Longest press, in seconds, still counted as a tap.
    max_tap_duration: f64,
    tracking: Tracking,
}

impl GestureRecognizer {
    pub fn new(slop: f32, max_tap_duration: f64) -> Self {
        Self {
            slop: slop.max(0.0),
            max_tap_duration,
            tracking: Tracking::Idle,
        }
    }

    pub fn set_thresholds(&mut self, slop: f32, max_tap_duration: f64) {
        self.slop = slop.max(0.0);
        self.max_tap_duration = max_tap_duration;
    }

    /// Whether a pan is in progress.
    pub fn is_panning(&self) -> bool {
        self.tracking == Tracking::Panning
    }

    /// Feed one pointer sample; recognised gestures are appended to `out`.
    pub fn process(&mut self, event: &PointerEvent, out: &mut Vec<Gesture>) {
        let location = event.location;
        match (self.tracking, event.phase) {
            (tracking, PointerPhase::Begin) => {
                // A begin without an end means the host lost the previous touch.
                if tracking == Tracking::Panning {
                    out.push(Gesture::DragCancel);
                }
                self.tracking = Tracking::Pressed {
                    start: location,
                    started_at: event.timestamp,
                };
            }
            (Tracking::Pressed { start, .. }, PointerPhase::Move) => {
                if location.distance(start) > self.slop {
                    out.push(Gesture::DragBegin { location: start });
                    out.push(Gesture::DragMove { location });
                    self.tracking = Tracking::Panning;
                }
            }
            (Tracking::Panning, PointerPhase::Move) => {
                out.push(Gesture::DragMove { location });
            }
            (Tracking::Pressed { start, started_at }, PointerPhase::End) => {
                if event.timestamp - started_at <= self.max_tap_duration {
                    out.push(Gesture::Tap { location: start });
                }
                self.tracking = Tracking::Idle;
            }
            (Tracking::Panning, PointerPhase::End) => {
                out.push(Gesture::DragEnd { location });
                self.tracking = Tracking::Idle;
            }
            (Tracking::Panning, PointerPhase::Cancel) => {
                out.push(Gesture::DragCancel);
                self.tracking = Tracking::Idle;
            }
            (_, PointerPhase::Cancel) => {
                self.tracking = Tracking::Idle;
            }
            (Tracking::Idle, PointerPhase::Move | PointerPhase::End) => {}
        }
    }
}

impl Default for GestureRecognizer {
    fn default() -> Self {
        Self::new(10.0, 0.35)
    }
}
