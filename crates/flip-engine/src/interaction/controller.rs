// interaction/controller.rs
//
// The interaction state machine. Consumes recognised gestures, asks the
// classifier whether they target the object, and then either drags the
// object through the coordinate mapper or hands an action graph to the
// sequencer. Dragging and animating never overlap: a gesture that does not
// fit the current state is logged and dropped.

use glam::{Vec2, Vec3};

use crate::animation::sequencer::{CompletionToken, GraphOutcome};
use crate::api::stage::{StageBinding, StageContext};
use crate::api::types::{NodeId, StageEvent, StageEventKind};
use crate::components::mesh::{MeshColor, MeshComponent, MeshShape};
use crate::components::node::Node;
use crate::error::StageError;
use crate::input::gesture::Gesture;

use super::choreography;
use super::classifier::{HitClassifier, OwnershipChainClassifier};
use super::config::InteractionConfig;
use super::mapper::CoordinateMapper;
use super::object::FloatingObject;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InteractionState {
    Idle,
    /// Following the pointer on the plane `z = depth`.
    Dragging { depth: f32 },
    /// Running the jump-flip graph identified by `token`.
    Animating { token: CompletionToken },
}

pub struct InteractionController<C: HitClassifier = OwnershipChainClassifier> {
    object: FloatingObject,
    surface: Option<NodeId>,
    classifier: C,
    config: InteractionConfig,
    state: InteractionState,
    /// Return-to-rest graph still gliding the object home.
    settling: Option<CompletionToken>,
    /// A flip interrupted the glide home; glide again once it lands.
    settle_after_flip: bool,
    ripples: Vec<NodeId>,
}

impl InteractionController<OwnershipChainClassifier> {
    pub fn new(object: FloatingObject, config: InteractionConfig) -> Self {
        Self::with_classifier(object, config, OwnershipChainClassifier)
    }

    pub fn from_binding(binding: StageBinding, config: InteractionConfig) -> Self {
        let mut controller = Self::new(binding.object, config);
        controller.surface = binding.surface;
        controller
    }
}

impl<C: HitClassifier> InteractionController<C> {
    /// The object is expected to be a scene root: drags write its local
    /// position directly.
    pub fn with_classifier(object: FloatingObject, config: InteractionConfig, classifier: C) -> Self {
        Self {
            object,
            surface: None,
            classifier,
            config,
            state: InteractionState::Idle,
            settling: None,
            settle_after_flip: false,
            ripples: Vec::new(),
        }
    }

    /// Taps on `surface` (or anything under it) spawn a ripple.
    pub fn with_surface(mut self, surface: NodeId) -> Self {
        self.surface = Some(surface);
        self
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == InteractionState::Idle
    }

    pub fn object(&self) -> &FloatingObject {
        &self.object
    }

    pub fn surface(&self) -> Option<NodeId> {
        self.surface
    }

    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    /// Replace the tunables. Graphs already running keep their old timing.
    pub fn set_config(&mut self, config: InteractionConfig) {
        self.object.rest_position = config.rest_position;
        self.config = config;
    }

    /// Ripple nodes still on stage.
    pub fn active_ripples(&self) -> &[NodeId] {
        &self.ripples
    }

    /// Apply one recognised gesture.
    pub fn handle(&mut self, gesture: Gesture, ctx: &mut StageContext) {
        match (self.state, gesture) {
            (_, Gesture::Tap { location }) => self.on_tap(location, ctx),
            (InteractionState::Idle, Gesture::DragBegin { location }) => self.on_drag_begin(location, ctx),
            (InteractionState::Dragging { depth }, Gesture::DragMove { location }) => {
                self.on_drag_move(location, depth, ctx)
            }
            (InteractionState::Dragging { .. }, Gesture::DragEnd { .. } | Gesture::DragCancel) => {
                self.end_drag(ctx)
            }
            (state, gesture) => {
                log::debug!("interaction: ignoring {gesture:?} while {state:?}");
            }
        }
    }

    /// Advance running graphs and settle any that finished this frame.
    pub fn tick(&mut self, dt: f32, ctx: &mut StageContext) {
        ctx.sequencer.tick(dt, &mut ctx.scene);
        for (token, outcome) in ctx.sequencer.drain_outcomes() {
            self.on_outcome(token, outcome, ctx);
        }

        // The outcome may have been drained by someone else.
        if let InteractionState::Animating { token } = self.state {
            if !ctx.sequencer.is_pending(token) {
                log::debug!("interaction: {token:?} no longer pending, back to idle");
                self.state = InteractionState::Idle;
            }
        }

        let scene = &ctx.scene;
        self.ripples.retain(|id| scene.contains(*id));
    }

    /// Cancel everything this controller started and remove leftover ripples.
    pub fn shutdown(&mut self, ctx: &mut StageContext) {
        ctx.sequencer.cancel(self.object.node);
        for id in std::mem::take(&mut self.ripples) {
            ctx.despawn(id);
        }
        ctx.sequencer.drain_outcomes();
        self.settling = None;
        self.settle_after_flip = false;
        self.state = InteractionState::Idle;
        log::info!("interaction: shut down");
    }

    fn on_tap(&mut self, location: Vec2, ctx: &mut StageContext) {
        if let InteractionState::Dragging { .. } = self.state {
            log::debug!("interaction: tap during drag ignored");
            return;
        }
        let Some(hit) = ctx.hit_test(location) else {
            return;
        };

        if self.classifier.targets(&ctx.scene, hit.node, &self.object) {
            if self.state != InteractionState::Idle {
                log::debug!("interaction: tap on object while {:?} ignored", self.state);
                return;
            }
            self.start_flip(ctx);
            if self.config.ripple_on_object_tap {
                self.spawn_ripple(hit.point, ctx);
            }
        } else if self.is_surface(hit.node, ctx) {
            self.spawn_ripple(hit.point, ctx);
        }
    }

    fn start_flip(&mut self, ctx: &mut StageContext) {
        let node = self.object.node;
        let Some(at) = ctx.scene.world_position(node) else {
            log::warn!("interaction: object {node:?} missing, cannot flip");
            return;
        };
        // Checked before `run`, which cancels the glide.
        self.settle_after_flip = self
            .settling
            .take()
            .is_some_and(|glide| ctx.sequencer.is_pending(glide));
        let token = ctx.sequencer.run(node, choreography::jump_flip(&self.config));
        self.state = InteractionState::Animating { token };
        ctx.emit_event(StageEvent::new(StageEventKind::FlipStarted, at));
        log::debug!("interaction: idle -> animating ({token:?})");
    }

    fn on_drag_begin(&mut self, location: Vec2, ctx: &mut StageContext) {
        if self
            .classifier
            .classify_hit(&ctx.scene, &ctx.camera, location, &self.object)
            .is_none()
        {
            return;
        }
        let node = self.object.node;
        let Some(position) = ctx.scene.get(node).map(|n| n.transform.position) else {
            return;
        };

        // A new drag interrupts the glide home.
        if ctx.sequencer.cancel(node).is_some() {
            log::debug!("interaction: drag interrupted return-to-rest");
        }
        self.settling = None;
        self.state = InteractionState::Dragging { depth: position.z };
        ctx.emit_event(StageEvent::new(StageEventKind::DragStarted, position));
        log::debug!("interaction: idle -> dragging at z = {}", position.z);
    }

    fn on_drag_move(&mut self, location: Vec2, depth: f32, ctx: &mut StageContext) {
        let node = self.object.node;
        match CoordinateMapper::drag_to(&mut ctx.scene, &ctx.camera, node, location, depth) {
            Ok(_) => {}
            Err(StageError::MissingNode(_)) => self.abort_drag(ctx),
            Err(err) => log::debug!("interaction: drag move skipped: {err}"),
        }
    }

    fn end_drag(&mut self, ctx: &mut StageContext) {
        let Some(current) = self.return_to_rest(ctx) else {
            self.abort_drag(ctx);
            return;
        };
        self.state = InteractionState::Idle;
        ctx.emit_event(StageEvent::new(StageEventKind::DragEnded, current));
        log::debug!("interaction: dragging -> idle, returning to rest");
    }

    /// Start the glide home from wherever the object is. Returns the start
    /// position, or `None` when the object is gone.
    fn return_to_rest(&mut self, ctx: &mut StageContext) -> Option<Vec3> {
        let node = self.object.node;
        let current = ctx.scene.get(node)?.transform.position;
        let token = ctx
            .sequencer
            .run(node, choreography::return_to_rest(&self.config, current));
        self.settling = Some(token);
        Some(current)
    }

    fn abort_drag(&mut self, ctx: &mut StageContext) {
        log::warn!("interaction: object {:?} vanished mid-drag, aborting", self.object.node);
        self.state = InteractionState::Idle;
        ctx.emit_event(StageEvent::new(StageEventKind::DragAborted, Vec3::ZERO));
    }

    fn on_outcome(&mut self, token: CompletionToken, outcome: GraphOutcome, ctx: &mut StageContext) {
        if self.settling == Some(token) {
            self.settling = None;
        }
        if self.state != (InteractionState::Animating { token }) {
            return;
        }
        self.state = InteractionState::Idle;
        let resume_glide = std::mem::take(&mut self.settle_after_flip);
        match outcome {
            GraphOutcome::Finished => {
                let at = ctx.scene.world_position(self.object.node).unwrap_or(Vec3::ZERO);
                ctx.emit_event(StageEvent::new(StageEventKind::FlipFinished, at));
                log::debug!("interaction: animating -> idle");
                if resume_glide {
                    self.return_to_rest(ctx);
                }
            }
            GraphOutcome::Cancelled => {
                log::debug!("interaction: flip {token:?} cancelled, back to idle");
            }
        }
    }

    fn is_surface(&self, hit: NodeId, ctx: &StageContext) -> bool {
        self.surface
            .is_some_and(|surface| ctx.scene.ancestors(hit).any(|id| id == surface))
    }

    fn spawn_ripple(&mut self, at: Vec3, ctx: &mut StageContext) {
        let cfg = &self.config;
        let [r, g, b, a] = cfg.ripple_color;
        let mesh = MeshComponent::new(
            MeshShape::Torus {
                ring_radius: cfg.ripple_ring_radius,
                pipe_radius: cfg.ripple_pipe_radius,
            },
            MeshColor::new(r, g, b, a),
        )
        .with_emissive(1.0);

        let id = ctx.next_id();
        ctx.scene.spawn(
            Node::new(id)
                .with_tag("ripple")
                .with_position(at)
                .with_mesh(mesh)
                .unpickable(),
        );
        ctx.sequencer.run_transient(id, choreography::ripple(cfg));
        self.ripples.push(id);
        ctx.emit_event(StageEvent::new(StageEventKind::RippleSpawned, at));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Quat;

    const DT: f32 = 1.0 / 60.0;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    struct Rig {
        ctx: StageContext,
        controller: InteractionController,
        bottle: NodeId,
        floor: NodeId,
    }

    impl Rig {
        fn new(at: Vec3) -> Self {
            Self::with_config(
                at,
                InteractionConfig {
                    rest_position: at,
                    ..Default::default()
                },
            )
        }

        fn with_config(at: Vec3, config: InteractionConfig) -> Self {
            let mut ctx = StageContext::new();
            let bottle = ctx.next_id();
            let liquid = ctx.next_id();
            let floor = ctx.next_id();
            ctx.scene.spawn(
                Node::new(bottle)
                    .with_position(at)
                    .with_mesh(MeshComponent::default()),
            );
            ctx.scene
                .spawn_child(
                    bottle,
                    Node::new(liquid).with_mesh(MeshComponent::new(
                        MeshShape::Cylinder { radius: 0.7, height: 1.0 },
                        MeshColor::new(0.2, 0.5, 1.0, 0.8),
                    )),
                )
                .unwrap();
            ctx.scene.spawn(
                Node::new(floor)
                    .with_position(Vec3::new(0.0, -2.5, 0.0))
                    .with_rotation(Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2))
                    .with_mesh(MeshComponent::new(
                        MeshShape::Plane { width: 6.0, height: 10.0 },
                        MeshColor::rgb(0.3, 0.3, 0.3),
                    )),
            );

            let object = FloatingObject::new(bottle, config.rest_position).with_decoration(liquid);
            let controller = InteractionController::new(object, config).with_surface(floor);
            Self {
                ctx,
                controller,
                bottle,
                floor,
            }
        }

        fn screen_of(&self, world: Vec3) -> Vec2 {
            self.ctx.camera.project(world).unwrap().truncate()
        }

        fn object_on_screen(&self) -> Vec2 {
            self.screen_of(self.position())
        }

        fn position(&self) -> Vec3 {
            self.ctx.scene.get(self.bottle).unwrap().transform.position
        }

        fn rotation(&self) -> Quat {
            self.ctx.scene.get(self.bottle).unwrap().transform.rotation
        }

        fn send(&mut self, gesture: Gesture) {
            self.controller.handle(gesture, &mut self.ctx);
        }

        /// Tick for `seconds`, collecting every event emitted along the way.
        fn run_for(&mut self, seconds: f32) -> Vec<StageEventKind> {
            let mut kinds = Vec::new();
            let frames = (seconds / DT).ceil() as usize;
            for _ in 0..frames {
                kinds.extend(self.drain_events());
                self.controller.tick(DT, &mut self.ctx);
            }
            kinds.extend(self.drain_events());
            kinds
        }

        fn drain_events(&mut self) -> Vec<StageEventKind> {
            let kinds = self.ctx.events.iter().filter_map(|e| e.kind()).collect();
            self.ctx.clear_frame_data();
            kinds
        }

        fn count(kinds: &[StageEventKind], kind: StageEventKind) -> usize {
            kinds.iter().filter(|k| **k == kind).count()
        }
    }

    #[test]
    fn pointer_outside_object_leaves_machine_idle() {
        let mut rig = Rig::new(Vec3::new(0.0, 1.5, 0.0));
        let corner = Vec2::new(5.0, 5.0);
        assert!(!OwnershipChainClassifier.classify(&rig.ctx.scene, &rig.ctx.camera, corner, rig.controller.object()));

        rig.send(Gesture::Tap { location: corner });
        assert!(rig.controller.is_idle());
        rig.send(Gesture::DragBegin { location: corner });
        rig.send(Gesture::DragMove { location: Vec2::new(100.0, 100.0) });
        assert!(rig.controller.is_idle());
        assert_eq!(rig.position(), Vec3::new(0.0, 1.5, 0.0));
        assert!(rig.ctx.sequencer.is_empty());
    }

    #[test]
    fn tap_on_center_flips_once_and_restores_position() {
        let start = Vec3::new(0.0, 1.5, 0.0);
        let mut rig = Rig::new(start);
        let center = rig.object_on_screen();

        rig.send(Gesture::Tap { location: center });
        assert!(matches!(rig.controller.state(), InteractionState::Animating { .. }));

        let mut kinds = rig.run_for(0.25);
        assert!(!rig.controller.is_idle());
        assert!(rig.position().y > start.y + 0.5);
        assert!(rig.rotation().angle_between(Quat::IDENTITY) > 0.1);

        kinds.extend(rig.run_for(0.5));
        assert!(rig.controller.is_idle());
        assert_eq!(Rig::count(&kinds, StageEventKind::FlipStarted), 1);
        assert_eq!(Rig::count(&kinds, StageEventKind::FlipFinished), 1);
        assert!(approx(rig.position(), start));
        // One whole turn lands back on the starting orientation.
        assert!(rig.rotation().angle_between(Quat::IDENTITY) < 1e-3);
    }

    #[test]
    fn tap_on_object_spawns_ripple_that_cleans_itself_up() {
        let mut rig = Rig::new(Vec3::new(0.0, 1.5, 0.0));
        let nodes_before = rig.ctx.scene.len();
        rig.send(Gesture::Tap { location: rig.object_on_screen() });

        assert_eq!(rig.controller.active_ripples().len(), 1);
        let ripple = rig.controller.active_ripples()[0];
        assert!(!rig.ctx.scene.get(ripple).unwrap().pickable);

        rig.run_for(1.0);
        assert!(!rig.ctx.scene.contains(ripple));
        assert!(rig.controller.active_ripples().is_empty());
        assert_eq!(rig.ctx.scene.len(), nodes_before);
    }

    #[test]
    fn ripple_on_object_tap_can_be_disabled() {
        let at = Vec3::new(0.0, 1.5, 0.0);
        let mut rig = Rig::with_config(
            at,
            InteractionConfig {
                rest_position: at,
                ripple_on_object_tap: false,
                ..Default::default()
            },
        );
        rig.send(Gesture::Tap { location: rig.object_on_screen() });
        assert!(matches!(rig.controller.state(), InteractionState::Animating { .. }));
        assert!(rig.controller.active_ripples().is_empty());
    }

    #[test]
    fn surface_tap_ripples_without_changing_state() {
        let mut rig = Rig::new(Vec3::new(0.0, 1.5, 0.0));
        let on_floor = rig.screen_of(Vec3::new(1.5, -2.5, 1.0));
        let hit = rig.ctx.hit_test(on_floor).unwrap();
        assert_eq!(hit.node, rig.floor);

        rig.send(Gesture::Tap { location: on_floor });
        assert!(rig.controller.is_idle());
        assert_eq!(rig.controller.active_ripples().len(), 1);
        let ripple = rig.controller.active_ripples()[0];
        let pos = rig.ctx.scene.get(ripple).unwrap().transform.position;
        assert!((pos.y + 2.5).abs() < 1e-2);

        let kinds = rig.run_for(0.9);
        assert_eq!(Rig::count(&kinds, StageEventKind::RippleSpawned), 1);
        assert!(!rig.ctx.scene.contains(ripple));
    }

    #[test]
    fn drag_tracks_unprojection_at_fixed_depth_then_returns_home() {
        let rest = Vec3::new(0.0, 0.0, 3.0);
        let mut rig = Rig::new(rest);
        let p1 = rig.object_on_screen();
        let p2 = p1 + Vec2::new(60.0, -80.0);

        rig.send(Gesture::DragBegin { location: p1 });
        assert_eq!(rig.controller.state(), InteractionState::Dragging { depth: 3.0 });

        for step in 1..=4 {
            let p = p1 + (p2 - p1) * (step as f32 / 4.0);
            rig.send(Gesture::DragMove { location: p });
            let expected = rig.ctx.camera.unproject(p, 3.0).unwrap();
            let pos = rig.position();
            assert_eq!(pos.z, 3.0);
            assert!((pos.x - expected.x).abs() < 1e-5);
            assert!((pos.y - expected.y).abs() < 1e-5);
        }

        rig.send(Gesture::DragEnd { location: p2 });
        assert!(rig.controller.is_idle());
        assert!(rig.ctx.sequencer.is_running(rig.bottle));

        let kinds = rig.run_for(1.1);
        assert!(approx(rig.position(), rest));
        assert_eq!(Rig::count(&kinds, StageEventKind::DragStarted), 1);
        assert_eq!(Rig::count(&kinds, StageEventKind::DragEnded), 1);
        assert!(!rig.ctx.sequencer.is_running(rig.bottle));
    }

    #[test]
    fn drag_begin_while_animating_is_rejected() {
        let mut rig = Rig::new(Vec3::new(0.0, 1.5, 0.0));
        rig.send(Gesture::Tap { location: rig.object_on_screen() });
        rig.run_for(0.1);
        let state = rig.controller.state();
        let before = rig.position();

        rig.send(Gesture::DragBegin { location: rig.object_on_screen() });
        rig.send(Gesture::DragMove { location: Vec2::new(10.0, 10.0) });
        assert_eq!(rig.controller.state(), state);
        assert_eq!(rig.position(), before);
    }

    #[test]
    fn tap_while_dragging_is_ignored() {
        let mut rig = Rig::new(Vec3::new(0.0, 1.5, 0.0));
        let p = rig.object_on_screen();
        rig.send(Gesture::DragBegin { location: p });
        rig.send(Gesture::Tap { location: p });
        assert!(matches!(rig.controller.state(), InteractionState::Dragging { .. }));
        assert!(rig.ctx.sequencer.is_empty());
    }

    #[test]
    fn new_drag_cancels_return_to_rest() {
        let rest = Vec3::new(0.0, 1.5, 0.0);
        let mut rig = Rig::new(rest);
        let p = rig.object_on_screen();
        rig.send(Gesture::DragBegin { location: p });
        rig.send(Gesture::DragMove { location: p + Vec2::new(0.0, 150.0) });
        rig.send(Gesture::DragEnd { location: p + Vec2::new(0.0, 150.0) });
        rig.run_for(0.2);

        let mid_glide = rig.position();
        assert!(!approx(mid_glide, rest));
        rig.send(Gesture::DragBegin { location: rig.object_on_screen() });
        assert!(matches!(rig.controller.state(), InteractionState::Dragging { .. }));
        assert!(!rig.ctx.sequencer.is_running(rig.bottle));

        rig.run_for(0.5);
        assert_eq!(rig.position(), mid_glide);
    }

    #[test]
    fn tap_during_glide_flips_then_settles() {
        let rest = Vec3::new(0.0, 1.5, 0.0);
        let mut rig = Rig::new(rest);
        let p = rig.object_on_screen();
        rig.send(Gesture::DragBegin { location: p });
        rig.send(Gesture::DragMove { location: p + Vec2::new(120.0, 0.0) });
        rig.send(Gesture::DragEnd { location: p + Vec2::new(120.0, 0.0) });
        rig.run_for(6.0 * DT);
        assert!(!approx(rig.position(), rest));

        rig.send(Gesture::Tap { location: rig.object_on_screen() });
        assert!(matches!(rig.controller.state(), InteractionState::Animating { .. }));

        let kinds = rig.run_for(5.0);
        assert_eq!(Rig::count(&kinds, StageEventKind::FlipFinished), 1);
        assert!(rig.controller.is_idle());
        assert!(approx(rig.position(), rest));
        assert!(!rig.ctx.sequencer.is_running(rig.bottle));
    }

    #[test]
    fn only_an_interrupted_glide_is_resumed() {
        let rest = Vec3::new(0.0, 1.5, 0.0);
        let mut rig = Rig::new(rest);
        let p = rig.object_on_screen();
        rig.send(Gesture::DragBegin { location: p });
        rig.send(Gesture::DragMove { location: p + Vec2::new(120.0, 0.0) });
        rig.send(Gesture::DragEnd { location: p + Vec2::new(120.0, 0.0) });
        rig.run_for(6.0 * DT);
        rig.send(Gesture::Tap { location: rig.object_on_screen() });
        rig.run_for(1.0);
        assert!(approx(rig.position(), rest) || rig.ctx.sequencer.is_running(rig.bottle));

        // A plain flip from rest leaves nothing running afterwards.
        rig.run_for(2.0);
        rig.send(Gesture::Tap { location: rig.object_on_screen() });
        rig.run_for(1.0);
        assert!(rig.controller.is_idle());
        assert!(!rig.ctx.sequencer.is_running(rig.bottle));
        assert!(approx(rig.position(), rest));
    }

    #[test]
    fn object_removed_mid_drag_aborts_to_idle() {
        let mut rig = Rig::new(Vec3::new(0.0, 1.5, 0.0));
        let p = rig.object_on_screen();
        rig.send(Gesture::DragBegin { location: p });
        rig.ctx.despawn(rig.bottle);

        rig.send(Gesture::DragMove { location: p + Vec2::new(20.0, 0.0) });
        assert!(rig.controller.is_idle());
        let kinds = rig.drain_events();
        assert!(kinds.contains(&StageEventKind::DragAborted));

        // A stray end afterwards is a no-op.
        rig.send(Gesture::DragEnd { location: p });
        assert!(rig.controller.is_idle());
        assert!(rig.ctx.sequencer.is_empty());
    }

    #[test]
    fn object_removed_mid_flip_returns_to_idle() {
        let mut rig = Rig::new(Vec3::new(0.0, 1.5, 0.0));
        rig.send(Gesture::Tap { location: rig.object_on_screen() });
        rig.run_for(0.1);
        rig.ctx.despawn(rig.bottle);
        let kinds = rig.run_for(DT);
        assert!(rig.controller.is_idle());
        assert_eq!(Rig::count(&kinds, StageEventKind::FlipFinished), 0);
    }

    #[test]
    fn stray_gestures_in_idle_are_no_ops() {
        let mut rig = Rig::new(Vec3::new(0.0, 1.5, 0.0));
        rig.send(Gesture::DragEnd { location: Vec2::ZERO });
        rig.send(Gesture::DragCancel);
        rig.send(Gesture::DragMove { location: Vec2::new(50.0, 50.0) });
        assert!(rig.controller.is_idle());
        assert!(rig.drain_events().is_empty());
    }

    #[test]
    fn shutdown_cancels_everything() {
        let mut rig = Rig::new(Vec3::new(0.0, 1.5, 0.0));
        rig.send(Gesture::Tap { location: rig.object_on_screen() });
        let ripple = rig.controller.active_ripples()[0];

        rig.controller.shutdown(&mut rig.ctx);
        assert!(rig.controller.is_idle());
        assert!(rig.ctx.sequencer.is_empty());
        assert!(!rig.ctx.scene.contains(ripple));

        let kinds = rig.run_for(1.0);
        assert_eq!(Rig::count(&kinds, StageEventKind::FlipFinished), 0);
    }
}
