pub mod runner;

pub use domino_engine;
pub use runner::SandboxRunner;

/// Generate all `#[wasm_bindgen]` exports for a sandbox.
///
/// Generates:
/// - `thread_local!` storage for the SandboxRunner
/// - `with_runner()` helper function
/// - All wasm-bindgen exports (sandbox_init, sandbox_tick, input handlers,
///   commands, buffer accessors)
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
/// use domino_engine::MemoryWorld;
///
/// domino_web::export_sandbox!(MemoryWorld, "my-sandbox");
/// ```
///
/// # Arguments
///
/// - `$world_type`: a `Default` world implementing `WorldObjects + RayCaster`
/// - `$sandbox_name`: A string literal used in the initialization log message
///
/// The calling crate depends on `wasm-bindgen`, `log`, `console_log` and
/// `console_error_panic_hook`.
#[macro_export]
macro_rules! export_sandbox {
    ($world_type:ty, $sandbox_name:literal) => {
        use std::cell::RefCell;
        use $crate::domino_engine::{InputEvent, PointerButton};

        thread_local! {
            static RUNNER: RefCell<Option<$crate::SandboxRunner<$world_type>>> = RefCell::new(None);
        }

        /// Run `f` against the runner, or return `None` before `sandbox_init`.
        fn with_runner<R>(f: impl FnOnce(&mut $crate::SandboxRunner<$world_type>) -> R) -> Option<R> {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                match borrow.as_mut() {
                    Some(runner) => Some(f(runner)),
                    None => {
                        log::warn!("{}: call sandbox_init() first", $sandbox_name);
                        None
                    }
                }
            })
        }

        fn push(event: InputEvent) {
            with_runner(|r| r.push_input(event));
        }

        #[wasm_bindgen]
        pub fn sandbox_init(config_json: &str) {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let world = <$world_type>::default();
            let runner = $crate::SandboxRunner::from_json(config_json, world);

            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });
            log::info!("{}: initialized", $sandbox_name);
        }

        #[wasm_bindgen]
        pub fn sandbox_tick(dt: f32) {
            with_runner(|r| r.tick(dt));
        }

        // ---- Input ----

        #[wasm_bindgen]
        pub fn sandbox_pointer_down(button: u32, x: f32, y: f32) {
            match PointerButton::from_index(button) {
                Some(button) => push(InputEvent::PointerDown { button, x, y }),
                None => log::debug!("{}: ignoring pointer button {}", $sandbox_name, button),
            }
        }

        #[wasm_bindgen]
        pub fn sandbox_pointer_up(button: u32, x: f32, y: f32) {
            match PointerButton::from_index(button) {
                Some(button) => push(InputEvent::PointerUp { button, x, y }),
                None => log::debug!("{}: ignoring pointer button {}", $sandbox_name, button),
            }
        }

        #[wasm_bindgen]
        pub fn sandbox_pointer_move(x: f32, y: f32) {
            push(InputEvent::PointerMove { x, y });
        }

        #[wasm_bindgen]
        pub fn sandbox_pointer_delta(dx: f32, dy: f32) {
            push(InputEvent::PointerDelta { dx, dy });
        }

        #[wasm_bindgen]
        pub fn sandbox_scroll(delta: f32) {
            push(InputEvent::Scroll { delta });
        }

        #[wasm_bindgen]
        pub fn sandbox_key_down(key_code: u32) {
            push(InputEvent::KeyDown { key_code });
        }

        #[wasm_bindgen]
        pub fn sandbox_key_up(key_code: u32) {
            push(InputEvent::KeyUp { key_code });
        }

        #[wasm_bindgen]
        pub fn sandbox_resize(width: f32, height: f32) {
            push(InputEvent::Resize { width, height });
        }

        // ---- Commands ----

        #[wasm_bindgen]
        pub fn sandbox_undo() -> i32 {
            with_runner(|r| r.undo()).unwrap_or(-1)
        }

        #[wasm_bindgen]
        pub fn sandbox_redo() -> i32 {
            with_runner(|r| r.redo()).unwrap_or(-1)
        }

        #[wasm_bindgen]
        pub fn sandbox_restart_history(from: u32) -> u32 {
            with_runner(|r| r.restart_history(from)).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn sandbox_toggle_simulation() -> bool {
            with_runner(|r| r.toggle_simulation()).unwrap_or(false)
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_instances_ptr() -> *const f32 {
            with_runner(|r| r.instances_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_instance_count() -> u32 {
            with_runner(|r| r.instance_count()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_instance_floats() -> u32 {
            with_runner(|r| r.instance_floats()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_events_ptr() -> *const f32 {
            with_runner(|r| r.events_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_events_len() -> u32 {
            with_runner(|r| r.events_len()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_piece_count() -> u32 {
            with_runner(|r| r.piece_count()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_placed_total() -> u32 {
            with_runner(|r| r.placed_total()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_is_simulating() -> bool {
            with_runner(|r| r.is_simulating()).unwrap_or(false)
        }
    };
}
