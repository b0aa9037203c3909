pub mod runner;

pub use flip_engine;
pub use runner::StageRunner;

/// Generate all `#[wasm_bindgen]` exports for a stage.
///
/// Generates:
/// - `thread_local!` storage for the StageRunner
/// - `with_runner()` helper function
/// - All wasm-bindgen exports (stage_init, stage_tick, pointer phases, data accessors)
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
///
/// mod stage;
/// use stage::MyStage;
///
/// flip_web::export_stage!(MyStage, "my-stage");
/// ```
///
/// # Arguments
///
/// - `$stage_type`: The setup struct type that implements `flip_engine::StageSetup`
///   and has a `new()` constructor
/// - `$stage_name`: A string literal used in the initialization log message
#[macro_export]
macro_rules! export_stage {
    ($stage_type:ty, $stage_name:literal) => {
        use std::cell::RefCell;
        use $crate::flip_engine::{InputEvent, PointerEvent};

        thread_local! {
            static RUNNER: RefCell<Option<$crate::StageRunner<$stage_type>>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::StageRunner<$stage_type>) -> R) -> R {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                let runner = borrow.as_mut().expect("Stage not initialized. Call stage_init() first.");
                f(runner)
            })
        }

        #[wasm_bindgen]
        pub fn stage_init() {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let stage = <$stage_type>::new();
            let runner = $crate::StageRunner::new(stage);

            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });

            with_runner(|r| r.init());
            log::info!("{}: initialized", $stage_name);
        }

        #[wasm_bindgen]
        pub fn stage_tick(dt: f32) {
            with_runner(|r| r.tick(dt));
        }

        #[wasm_bindgen]
        pub fn stage_shutdown() {
            with_runner(|r| r.shutdown());
        }

        // ---- Input ----
        // `t` is the host's event timestamp in seconds.

        #[wasm_bindgen]
        pub fn stage_pointer_down(x: f32, y: f32, t: f64) {
            with_runner(|r| r.push_input(InputEvent::Pointer(PointerEvent::begin(x, y, t))));
        }

        #[wasm_bindgen]
        pub fn stage_pointer_move(x: f32, y: f32, t: f64) {
            with_runner(|r| r.push_input(InputEvent::Pointer(PointerEvent::moved(x, y, t))));
        }

        #[wasm_bindgen]
        pub fn stage_pointer_up(x: f32, y: f32, t: f64) {
            with_runner(|r| r.push_input(InputEvent::Pointer(PointerEvent::end(x, y, t))));
        }

        #[wasm_bindgen]
        pub fn stage_pointer_cancel(x: f32, y: f32, t: f64) {
            with_runner(|r| r.push_input(InputEvent::Pointer(PointerEvent::cancel(x, y, t))));
        }

        #[wasm_bindgen]
        pub fn stage_resize(width: f32, height: f32) {
            with_runner(|r| r.push_input(InputEvent::Resize { width, height }));
        }

        #[wasm_bindgen]
        pub fn stage_load_config(json: &str) {
            with_runner(|r| r.load_interaction_config(json));
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_instances_ptr() -> *const f32 {
            with_runner(|r| r.instances_ptr())
        }

        #[wasm_bindgen]
        pub fn get_instance_count() -> u32 {
            with_runner(|r| r.instance_count())
        }

        #[wasm_bindgen]
        pub fn get_translucent_split() -> u32 {
            with_runner(|r| r.translucent_split())
        }

        #[wasm_bindgen]
        pub fn get_events_ptr() -> *const f32 {
            with_runner(|r| r.events_ptr())
        }

        #[wasm_bindgen]
        pub fn get_events_len() -> u32 {
            with_runner(|r| r.events_len())
        }

        #[wasm_bindgen]
        pub fn get_camera_matrices_ptr() -> *const f32 {
            with_runner(|r| r.camera_matrices_ptr())
        }

        #[wasm_bindgen]
        pub fn get_interaction_state() -> u32 {
            with_runner(|r| r.interaction_state_code())
        }

        #[wasm_bindgen]
        pub fn get_max_instances() -> u32 {
            with_runner(|r| r.max_instances())
        }

        #[wasm_bindgen]
        pub fn get_max_events() -> u32 {
            with_runner(|r| r.max_events())
        }

        // ---- Lighting ----

        #[wasm_bindgen]
        pub fn get_lights_ptr() -> *const f32 {
            with_runner(|r| r.lights_ptr())
        }

        #[wasm_bindgen]
        pub fn get_light_count() -> u32 {
            with_runner(|r| r.light_count())
        }

        #[wasm_bindgen]
        pub fn get_ambient_r() -> f32 {
            with_runner(|r| r.ambient()[0])
        }

        #[wasm_bindgen]
        pub fn get_ambient_g() -> f32 {
            with_runner(|r| r.ambient()[1])
        }

        #[wasm_bindgen]
        pub fn get_ambient_b() -> f32 {
            with_runner(|r| r.ambient()[2])
        }

        #[wasm_bindgen]
        pub fn get_background_r() -> f32 {
            with_runner(|r| r.background()[0])
        }

        #[wasm_bindgen]
        pub fn get_background_g() -> f32 {
            with_runner(|r| r.background()[1])
        }

        #[wasm_bindgen]
        pub fn get_background_b() -> f32 {
            with_runner(|r| r.background()[2])
        }

        /// Fog as `[start, end, r, g, b]` at index `i`.
        #[wasm_bindgen]
        pub fn get_fog(i: u32) -> f32 {
            with_runner(|r| r.fog().get(i as usize).copied().unwrap_or(0.0))
        }
    };
}
