// animation/easing.rs
//
// Timing curves for action interpolation.
// Named curves are the usual cubic Béziers anchored at (0,0) and (1,1).

use glam::Vec3;
use serde::{Deserialize, Serialize};

const SOLVE_EPSILON: f32 = 1e-6;

/// Maps linear time in [0, 1] to animation progress in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    #[default]
    Linear,
    /// Slow start.
    EaseIn,
    /// Slow end.
    EaseOut,
    /// Slow start and end.
    EaseInOut,
    /// Arbitrary curve through control points (x1, y1) and (x2, y2).
    CubicBezier { x1: f32, y1: f32, x2: f32, y2: f32 },
}

impl Easing {
    fn control_points(self) -> Option<(f32, f32, f32, f32)> {
        match self {
            Easing::Linear => None,
            Easing::EaseIn => Some((0.42, 0.0, 1.0, 1.0)),
            Easing::EaseOut => Some((0.0, 0.0, 0.58, 1.0)),
            Easing::EaseInOut => Some((0.42, 0.0, 0.58, 1.0)),
            Easing::CubicBezier { x1, y1, x2, y2 } => Some((x1.clamp(0.0, 1.0), y1, x2.clamp(0.0, 1.0), y2)),
        }
    }

    /// Progress at normalized time `t`. Input is clamped; the endpoints are exact.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        let Some((x1, y1, x2, y2)) = self.control_points() else {
            return t;
        };
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        let s = solve_for_x(t, x1, x2);
        bezier(s, y1, y2)
    }
}

/// One axis of a cubic Bézier with P0 = 0 and P3 = 1.
#[inline]
fn bezier(s: f32, p1: f32, p2: f32) -> f32 {
    let u = 1.0 - s;
    3.0 * u * u * s * p1 + 3.0 * u * s * s * p2 + s * s * s
}

#[inline]
fn bezier_slope(s: f32, p1: f32, p2: f32) -> f32 {
    let u = 1.0 - s;
    3.0 * u * u * p1 + 6.0 * u * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
}

/// Curve parameter whose x equals `x`. Newton first, bisection if it stalls.
fn solve_for_x(x: f32, x1: f32, x2: f32) -> f32 {
    let mut s = x;
    for _ in 0..8 {
        let err = bezier(s, x1, x2) - x;
        if err.abs() < SOLVE_EPSILON {
            return s;
        }
        let slope = bezier_slope(s, x1, x2);
        if slope.abs() < SOLVE_EPSILON {
            break;
        }
        s = (s - err / slope).clamp(0.0, 1.0);
    }

    let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
    s = x;
    for _ in 0..32 {
        let v = bezier(s, x1, x2);
        if (v - x).abs() < SOLVE_EPSILON {
            break;
        }
        if v < x {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) * 0.5;
    }
    s
}

// ── Interpolation helpers ────────────────────────────────────────────────

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
pub fn ease(a: f32, b: f32, t: f32, easing: Easing) -> f32 {
    lerp(a, b, easing.apply(t))
}

#[inline]
pub fn ease_vec3(a: Vec3, b: Vec3, t: f32, easing: Easing) -> Vec3 {
    a.lerp(b, easing.apply(t))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 4] = [Easing::Linear, Easing::EaseIn, Easing::EaseOut, Easing::EaseInOut];

    #[test]
    fn endpoints_are_exact() {
        for e in ALL {
            assert_eq!(e.apply(0.0), 0.0, "{e:?}");
            assert_eq!(e.apply(1.0), 1.0, "{e:?}");
            assert_eq!(e.apply(-3.0), 0.0, "{e:?}");
            assert_eq!(e.apply(7.0), 1.0, "{e:?}");
        }
    }

    #[test]
    fn ease_in_starts_slow_and_ease_out_starts_fast() {
        assert!(Easing::EaseIn.apply(0.25) < 0.25);
        assert!(Easing::EaseOut.apply(0.25) > 0.25);
    }

    #[test]
    fn ease_in_out_is_symmetric() {
        assert!((Easing::EaseInOut.apply(0.5) - 0.5).abs() < 1e-4);
        let a = Easing::EaseInOut.apply(0.2);
        let b = Easing::EaseInOut.apply(0.8);
        assert!((a + b - 1.0).abs() < 1e-4);
    }

    #[test]
    fn curves_are_monotonic() {
        for e in ALL {
            let mut prev = 0.0;
            for i in 1..=100 {
                let v = e.apply(i as f32 / 100.0);
                assert!(v + 1e-5 >= prev, "{e:?} dipped at {i}");
                prev = v;
            }
        }
    }

    #[test]
    fn linear_bezier_matches_linear() {
        let e = Easing::CubicBezier {
            x1: 0.25,
            y1: 0.25,
            x2: 0.75,
            y2: 0.75,
        };
        assert!((e.apply(0.3) - 0.3).abs() < 1e-4);
    }

    #[test]
    fn ease_interpolates() {
        assert!((ease(100.0, 200.0, 0.5, Easing::Linear) - 150.0).abs() < 1e-4);
        let v = ease_vec3(Vec3::ZERO, Vec3::new(0.0, 2.0, 0.0), 1.0, Easing::EaseOut);
        assert_eq!(v, Vec3::new(0.0, 2.0, 0.0));
    }

    #[test]
    fn deserializes_from_snake_case() {
        let e: Easing = serde_json::from_str("\"ease_in_out\"").unwrap();
        assert_eq!(e, Easing::EaseInOut);
    }
}
