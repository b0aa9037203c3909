use flip_engine::{
    build_render_buffer, FrameClock, Gesture, GestureRecognizer, HitClassifier, InputEvent,
    InputQueue, InteractionConfig, InteractionController, InteractionState,
    OwnershipChainClassifier, RenderBuffer, StageConfig, StageContext, StageSetup,
};

/// Generic stage runner that wires up the frame loop.
///
/// Each concrete demo creates a `thread_local!` StageRunner and exports free
/// functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export
/// generic structs directly.
pub struct StageRunner<S: StageSetup, C: HitClassifier = OwnershipChainClassifier> {
    setup: S,
    ctx: StageContext,
    input: InputQueue,
    recognizer: GestureRecognizer,
    gestures: Vec<Gesture>,
    /// Held until `init` binds the object.
    classifier: Option<C>,
    controller: Option<InteractionController<C>>,
    render_buffer: RenderBuffer,
    clock: FrameClock,
    config: StageConfig,
    interaction: InteractionConfig,
    /// View matrix followed by projection matrix, column-major.
    camera_matrices: [f32; 32],
    initialized: bool,
}

impl<S: StageSetup> StageRunner<S> {
    pub fn new(setup: S) -> Self {
        Self::with_classifier(setup, OwnershipChainClassifier)
    }
}

impl<S: StageSetup, C: HitClassifier> StageRunner<S, C> {
    pub fn with_classifier(setup: S, classifier: C) -> Self {
        let config = setup.config();
        let interaction = setup.interaction_config();

        Self {
            ctx: StageContext::with_config(&config),
            input: InputQueue::new(),
            recognizer: GestureRecognizer::new(interaction.tap_slop, interaction.tap_max_duration),
            gestures: Vec::new(),
            classifier: Some(classifier),
            controller: None,
            render_buffer: RenderBuffer::with_capacity(config.max_instances),
            clock: FrameClock::new(config.max_frame_dt),
            camera_matrices: [0.0; 32],
            setup,
            config,
            interaction,
            initialized: false,
        }
    }

    /// Build the scene and bind the controller. Call once after construction.
    pub fn init(&mut self) {
        let Some(classifier) = self.classifier.take() else {
            log::warn!("stage: init called twice, ignoring");
            return;
        };
        let binding = self.setup.init(&mut self.ctx);
        log::info!(
            "stage: {} nodes, object {:?}, surface {:?}",
            self.ctx.scene.len(),
            binding.object.node,
            binding.surface
        );

        let mut object = binding.object;
        object.rest_position = self.interaction.rest_position;
        let mut controller = InteractionController::with_classifier(object, self.interaction.clone(), classifier);
        if let Some(surface) = binding.surface {
            controller = controller.with_surface(surface);
        }
        self.controller = Some(controller);
        self.refresh_outputs();
        self.initialized = true;
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame: recognise gestures, apply them, advance animations,
    /// rebuild output buffers.
    pub fn tick(&mut self, frame_dt: f32) {
        if !self.initialized {
            return;
        }

        // Clear per-frame transient data
        self.ctx.clear_frame_data();
        let dt = self.clock.tick(frame_dt);

        for event in self.input.drain() {
            match event {
                InputEvent::Pointer(pointer) => self.recognizer.process(&pointer, &mut self.gestures),
                InputEvent::Resize { width, height } => self.ctx.camera.resize(width, height),
            }
        }

        if let Some(controller) = self.controller.as_mut() {
            for gesture in self.gestures.drain(..) {
                controller.handle(gesture, &mut self.ctx);
            }
            controller.tick(dt, &mut self.ctx);
        }
        self.gestures.clear();

        self.setup.update(&mut self.ctx, dt);
        self.refresh_outputs();
    }

    /// Replace interaction tunables from JSON. Bad input keeps the current values.
    pub fn load_interaction_config(&mut self, json: &str) {
        match InteractionConfig::from_json(json) {
            Ok(config) => {
                self.recognizer.set_thresholds(config.tap_slop, config.tap_max_duration);
                if let Some(controller) = self.controller.as_mut() {
                    controller.set_config(config.clone());
                }
                self.interaction = config;
                log::info!("stage: interaction config loaded");
            }
            Err(e) => log::warn!("stage: {e}, keeping previous interaction config"),
        }
    }

    /// Cancel running animations and drop transient nodes.
    pub fn shutdown(&mut self) {
        if let Some(controller) = self.controller.as_mut() {
            controller.shutdown(&mut self.ctx);
        }
        self.ctx.sequencer.cancel_all();
        self.ctx.sequencer.drain_outcomes();
        self.initialized = false;
    }

    fn refresh_outputs(&mut self) {
        build_render_buffer(&self.ctx.scene, &mut self.render_buffer);
        let camera = &self.ctx.camera;
        self.camera_matrices[..16].copy_from_slice(&camera.view_matrix().to_cols_array());
        self.camera_matrices[16..].copy_from_slice(&camera.projection_matrix().to_cols_array());
    }

    // ---- State accessors ----

    pub fn context(&self) -> &StageContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut StageContext {
        &mut self.ctx
    }

    pub fn interaction_state(&self) -> InteractionState {
        self.controller
            .as_ref()
            .map_or(InteractionState::Idle, |c| c.state())
    }

    /// 0 = idle, 1 = dragging, 2 = animating.
    pub fn interaction_state_code(&self) -> u32 {
        match self.interaction_state() {
            InteractionState::Idle => 0,
            InteractionState::Dragging { .. } => 1,
            InteractionState::Animating { .. } => 2,
        }
    }

    pub fn elapsed(&self) -> f64 {
        self.clock.elapsed()
    }

    // ---- Pointer accessors for host reads ----

    pub fn instances_ptr(&self) -> *const f32 {
        self.render_buffer.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.render_buffer.instance_count()
    }

    pub fn translucent_split(&self) -> u32 {
        self.render_buffer.translucent_split
    }

    pub fn events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    pub fn lights_ptr(&self) -> *const f32 {
        self.ctx.lights.buffer_ptr()
    }

    pub fn light_count(&self) -> u32 {
        self.ctx.lights.count() as u32
    }

    pub fn ambient(&self) -> [f32; 3] {
        self.ctx.lights.ambient_color()
    }

    pub fn background(&self) -> [f32; 3] {
        self.ctx.lights.background
    }

    /// `[start, end, r, g, b]`, or all zeros when the stage has no fog.
    pub fn fog(&self) -> [f32; 5] {
        self.ctx.lights.fog.map_or([0.0; 5], |f| {
            [f.start, f.end, f.color[0], f.color[1], f.color[2]]
        })
    }

    pub fn camera_matrices_ptr(&self) -> *const f32 {
        self.camera_matrices.as_ptr()
    }

    // ---- Capacity accessors ----

    pub fn max_instances(&self) -> u32 {
        self.config.max_instances as u32
    }

    pub fn max_events(&self) -> u32 {
        self.config.max_events as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flip_engine::{
        FloatingObject, MeshComponent, Node, PointerEvent, StageBinding, StageEventKind,
    };
    use glam::Vec3;

    struct OneBottle;

    impl StageSetup for OneBottle {
        fn init(&mut self, ctx: &mut StageContext) -> StageBinding {
            let id = ctx.next_id();
            ctx.scene.spawn(
                Node::new(id)
                    .with_position(Vec3::new(0.0, 1.5, 0.0))
                    .with_mesh(MeshComponent::default()),
            );
            StageBinding {
                object: FloatingObject::new(id, Vec3::new(0.0, 1.5, 0.0)),
                surface: None,
            }
        }
    }

    fn runner() -> StageRunner<OneBottle> {
        let mut runner = StageRunner::new(OneBottle);
        runner.init();
        runner
    }

    fn bottle_on_screen(runner: &StageRunner<OneBottle>) -> (f32, f32) {
        let p = runner
            .context()
            .camera
            .project(Vec3::new(0.0, 1.5, 0.0))
            .unwrap();
        (p.x, p.y)
    }

    #[test]
    fn tick_before_init_does_nothing() {
        let mut runner = StageRunner::new(OneBottle);
        runner.tick(0.016);
        assert_eq!(runner.instance_count(), 0);
        assert_eq!(runner.elapsed(), 0.0);
    }

    #[test]
    fn init_fills_render_buffer_and_camera() {
        let runner = runner();
        assert_eq!(runner.instance_count(), 1);
        let camera = unsafe { std::slice::from_raw_parts(runner.camera_matrices_ptr(), 32) };
        assert!(camera.iter().any(|v| *v != 0.0));
    }

    #[test]
    fn pointer_tap_starts_flip() {
        let mut runner = runner();
        let (x, y) = bottle_on_screen(&runner);
        runner.push_input(InputEvent::Pointer(PointerEvent::begin(x, y, 0.0)));
        runner.push_input(InputEvent::Pointer(PointerEvent::end(x, y, 0.1)));
        runner.tick(0.016);

        assert_eq!(runner.interaction_state_code(), 2);
        let kinds: Vec<_> = runner.context().events.iter().filter_map(|e| e.kind()).collect();
        assert!(kinds.contains(&StageEventKind::FlipStarted));

        for _ in 0..60 {
            runner.tick(0.016);
        }
        assert_eq!(runner.interaction_state_code(), 0);
    }

    #[test]
    fn pointer_pan_drags_then_settles() {
        let mut runner = runner();
        let (x, y) = bottle_on_screen(&runner);
        runner.push_input(InputEvent::Pointer(PointerEvent::begin(x, y, 0.0)));
        runner.push_input(InputEvent::Pointer(PointerEvent::moved(x + 80.0, y, 0.05)));
        runner.tick(0.016);
        assert_eq!(runner.interaction_state_code(), 1);
        assert!(runner.context().scene.get(flip_engine::NodeId(1)).unwrap().transform.position.x > 0.5);

        runner.push_input(InputEvent::Pointer(PointerEvent::end(x + 80.0, y, 0.1)));
        for _ in 0..90 {
            runner.tick(0.016);
        }
        assert_eq!(runner.interaction_state_code(), 0);
        let pos = runner.context().scene.get(flip_engine::NodeId(1)).unwrap().transform.position;
        assert!((pos - Vec3::new(0.0, 1.5, 0.0)).length() < 1e-4);
    }

    #[test]
    fn bad_config_keeps_previous_values() {
        let mut runner = runner();
        runner.load_interaction_config(r#"{ "jump_height": 3.0 }"#);
        runner.load_interaction_config("nonsense");
        assert_eq!(runner.interaction.jump_height, 3.0);
    }

    #[test]
    fn resize_reaches_camera() {
        let mut runner = runner();
        runner.push_input(InputEvent::Resize {
            width: 800.0,
            height: 600.0,
        });
        runner.tick(0.016);
        assert_eq!(runner.context().camera.viewport, glam::Vec2::new(800.0, 600.0));
    }
}
