// animation/action.rs
//
// Declarative action graphs applied to a single node over time.
//
// Leaves animate one property; Sequence runs children back to back and
// Group runs them together. Leaves apply increments rather than absolute
// values, so a move composes with whatever else touches the node.
//
// Usage:
//   let hop = Action::sequence(vec![
//       Action::move_by(Vec3::Y, 0.25).with_easing(Easing::EaseOut),
//       Action::move_by(-Vec3::Y, 0.25).with_easing(Easing::EaseIn),
//   ]);
//   sequencer.run(node_id, hop);

use glam::{Quat, Vec3};

use super::easing::{lerp, Easing};
use crate::components::node::Node;

/// A composable animation description. Cheap to clone, holds no node state.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Translate by `delta` in parent space.
    Move { delta: Vec3, duration: f32, easing: Easing },
    /// Rotate by `angle` radians about a local `axis`.
    RotateBy { angle: f32, axis: Vec3, duration: f32, easing: Easing },
    /// Scale uniformly from the current scale to `factor`.
    ScaleTo { factor: f32, duration: f32 },
    /// Fade opacity from its current value to zero.
    FadeOut { duration: f32 },
    Wait { duration: f32 },
    Sequence(Vec<Action>),
    Group(Vec<Action>),
}

impl Action {
    pub fn move_by(delta: Vec3, duration: f32) -> Self {
        Action::Move {
            delta,
            duration,
            easing: Easing::Linear,
        }
    }

    pub fn rotate_by(angle: f32, axis: Vec3, duration: f32) -> Self {
        Action::RotateBy {
            angle,
            axis,
            duration,
            easing: Easing::Linear,
        }
    }

    pub fn scale_to(factor: f32, duration: f32) -> Self {
        Action::ScaleTo { factor, duration }
    }

    pub fn fade_out(duration: f32) -> Self {
        Action::FadeOut { duration }
    }

    pub fn wait(duration: f32) -> Self {
        Action::Wait { duration }
    }

    pub fn sequence(steps: Vec<Action>) -> Self {
        Action::Sequence(steps)
    }

    pub fn group(members: Vec<Action>) -> Self {
        Action::Group(members)
    }

    /// Set the timing curve. Only moves and rotations are eased; other
    /// actions are returned unchanged.
    pub fn with_easing(mut self, curve: Easing) -> Self {
        match &mut self {
            Action::Move { easing, .. } | Action::RotateBy { easing, .. } => *easing = curve,
            _ => {}
        }
        self
    }

    /// Total running time in seconds. Sequences sum, groups take the longest member.
    pub fn duration(&self) -> f32 {
        match self {
            Action::Move { duration, .. }
            | Action::RotateBy { duration, .. }
            | Action::ScaleTo { duration, .. }
            | Action::FadeOut { duration }
            | Action::Wait { duration } => duration.max(0.0),
            Action::Sequence(steps) => steps.iter().map(Action::duration).sum(),
            Action::Group(members) => members.iter().map(Action::duration).fold(0.0, f32::max),
        }
    }

    pub(crate) fn start(&self) -> RunningAction {
        match self {
            Action::Sequence(steps) => RunningAction::Sequence {
                steps: steps.iter().map(Action::start).collect(),
                current: 0,
            },
            Action::Group(members) => RunningAction::Group {
                done: vec![false; members.len()],
                members: members.iter().map(Action::start).collect(),
            },
            leaf => RunningAction::Leaf(LeafState {
                action: leaf.clone(),
                elapsed: 0.0,
                applied: 0.0,
                start_scale: None,
                start_opacity: None,
            }),
        }
    }
}

/// Result of advancing a running action by one time step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Advance {
    pub finished: bool,
    /// Unused part of the step, handed to whatever runs next.
    pub leftover: f32,
}

impl Advance {
    fn running() -> Self {
        Self {
            finished: false,
            leftover: 0.0,
        }
    }

    fn finished(leftover: f32) -> Self {
        Self {
            finished: true,
            leftover,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct LeafState {
    action: Action,
    elapsed: f32,
    /// Eased progress already written to the node.
    applied: f32,
    start_scale: Option<Vec3>,
    start_opacity: Option<f32>,
}

impl LeafState {
    fn advance(&mut self, dt: f32, node: &mut Node) -> Advance {
        let duration = self.action.duration();
        if duration <= 0.0 {
            self.apply(1.0, node);
            return Advance::finished(dt);
        }

        let remaining = duration - self.elapsed;
        if dt >= remaining {
            self.elapsed = duration;
            self.apply(1.0, node);
            return Advance::finished((dt - remaining).max(0.0));
        }

        self.elapsed += dt.max(0.0);
        self.apply(self.elapsed / duration, node);
        Advance::running()
    }

    fn apply(&mut self, t: f32, node: &mut Node) {
        let t = t.clamp(0.0, 1.0);
        match self.action {
            Action::Move { delta, easing, .. } => {
                let p = easing.apply(t);
                node.transform.position += delta * (p - self.applied);
                self.applied = p;
            }
            Action::RotateBy {
                angle, axis, easing, ..
            } => {
                let p = easing.apply(t);
                let axis = axis.try_normalize().unwrap_or(Vec3::Z);
                let step = Quat::from_axis_angle(axis, angle * (p - self.applied));
                node.transform.rotation = (node.transform.rotation * step).normalize();
                self.applied = p;
            }
            Action::ScaleTo { factor, .. } => {
                let from = *self.start_scale.get_or_insert(node.transform.scale);
                node.transform.scale = from.lerp(Vec3::splat(factor), t);
            }
            Action::FadeOut { .. } => {
                let from = *self.start_opacity.get_or_insert(node.opacity);
                node.opacity = lerp(from, 0.0, t);
            }
            Action::Wait { .. } | Action::Sequence(_) | Action::Group(_) => {}
        }
    }
}

/// Per-run state of an [`Action`] tree.
#[derive(Debug, Clone)]
pub(crate) enum RunningAction {
    Leaf(LeafState),
    Sequence { steps: Vec<RunningAction>, current: usize },
    Group { members: Vec<RunningAction>, done: Vec<bool> },
}

impl RunningAction {
    pub fn advance(&mut self, dt: f32, node: &mut Node) -> Advance {
        match self {
            RunningAction::Leaf(leaf) => leaf.advance(dt, node),
            RunningAction::Sequence { steps, current } => {
                let mut remaining = dt;
                while let Some(step) = steps.get_mut(*current) {
                    let r = step.advance(remaining, node);
                    if !r.finished {
                        return Advance::running();
                    }
                    *current += 1;
                    remaining = r.leftover;
                }
                Advance::finished(remaining)
            }
            RunningAction::Group { members, done } => {
                let mut leftover = dt;
                for (member, done) in members.iter_mut().zip(done.iter_mut()) {
                    if *done {
                        continue;
                    }
                    let r = member.advance(dt, node);
                    if r.finished {
                        *done = true;
                        leftover = leftover.min(r.leftover);
                    }
                }
                if done.iter().all(|d| *d) {
                    Advance::finished(leftover)
                } else {
                    Advance::running()
                }
            }
        }
    }
}
