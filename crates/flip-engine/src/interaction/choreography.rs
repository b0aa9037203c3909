// interaction/choreography.rs
//
// The canned action graphs. Built fresh for every trigger.

use glam::Vec3;
use std::f32::consts::TAU;

use super::config::InteractionConfig;
use crate::animation::action::Action;
use crate::animation::easing::Easing;

/// Jump arc and one full turn, run together. The turn starts after
/// `flip_delay` so the two do not look locked in step.
pub fn jump_flip(cfg: &InteractionConfig) -> Action {
    let up = Vec3::Y * cfg.jump_height;
    let jump = Action::sequence(vec![
        Action::move_by(up, cfg.jump_rise_duration).with_easing(Easing::EaseOut),
        Action::move_by(-up, cfg.jump_fall_duration).with_easing(Easing::EaseIn),
    ]);
    let flip = Action::sequence(vec![
        Action::wait(cfg.flip_delay),
        Action::rotate_by(TAU, cfg.flip_axis, cfg.flip_duration).with_easing(Easing::EaseInOut),
    ]);
    Action::group(vec![jump, flip])
}

/// Glide from `current` back to the configured rest position.
pub fn return_to_rest(cfg: &InteractionConfig, current: Vec3) -> Action {
    Action::move_by(cfg.rest_position - current, cfg.return_duration).with_easing(Easing::EaseOut)
}

/// Expand and fade out together.
pub fn ripple(cfg: &InteractionConfig) -> Action {
    Action::group(vec![
        Action::scale_to(cfg.ripple_scale, cfg.ripple_duration),
        Action::fade_out(cfg.ripple_duration),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jump_flip_shape() {
        let cfg = InteractionConfig::default();
        let Action::Group(branches) = jump_flip(&cfg) else {
            panic!("expected a group");
        };
        assert_eq!(branches.len(), 2);
        let Action::Sequence(flip) = &branches[1] else {
            panic!("expected a sequence");
        };
        assert_eq!(flip[0], Action::wait(cfg.flip_delay));
        assert!(matches!(
            flip[1],
            Action::RotateBy { angle, easing: Easing::EaseInOut, .. } if (angle - TAU).abs() < 1e-6
        ));
        assert!((jump_flip(&cfg).duration() - cfg.jump_flip_duration()).abs() < 1e-6);
    }

    #[test]
    fn return_targets_rest_position() {
        let cfg = InteractionConfig::default();
        let action = return_to_rest(&cfg, Vec3::new(2.0, -1.0, 0.0));
        assert_eq!(
            action,
            Action::Move {
                delta: Vec3::new(-2.0, 2.5, 0.0),
                duration: 1.0,
                easing: Easing::EaseOut,
            }
        );
    }

    #[test]
    fn ripple_runs_for_configured_duration() {
        let cfg = InteractionConfig::default();
        assert!((ripple(&cfg).duration() - 0.8).abs() < 1e-6);
    }
}
