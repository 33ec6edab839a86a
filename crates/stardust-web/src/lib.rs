//! Browser bridge for the Stardust particle field.
//!
//! JS creates the page canvas, calls `letter_init`, and drives
//! `letter_tick(now)` from `requestAnimationFrame` until it returns false:
//!
//! ```ignore
//! letter_init(canvas, null);
//! const frame = (now) => { if (letter_tick(now)) id = requestAnimationFrame(frame); };
//! let id = requestAnimationFrame(frame);
//! window.addEventListener('resize', onResize);
//! // on unmount:
//! cancelAnimationFrame(id);
//! window.removeEventListener('resize', onResize);
//! letter_teardown();
//! ```

pub mod audio;
pub mod canvas;
pub mod glyph;
pub mod runner;

use std::cell::RefCell;

use stardust::{CircleInstance, LetterConfig, StardustError};
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

pub use runner::LetterRunner;

thread_local! {
    static RUNNER: RefCell<Option<LetterRunner>> = const { RefCell::new(None) };
}

/// Run `f` against the runner, or return `default` if none is alive.
fn with_runner<R>(default: R, f: impl FnOnce(&mut LetterRunner) -> R) -> R {
    RUNNER.with(|cell| match cell.borrow_mut().as_mut() {
        Some(runner) => f(runner),
        None => default,
    })
}

/// Put `next` into `slot`, tearing down the previous occupant first.
/// Returns true if something was replaced.
fn replace_torn_down<T>(slot: &mut Option<T>, next: Option<T>, teardown: impl FnOnce(&mut T)) -> bool {
    let replaced = match slot.take() {
        Some(mut previous) => {
            teardown(&mut previous);
            true
        }
        None => false,
    };
    *slot = next;
    replaced
}

/// Swap the live runner. A dropped `AudioContext` keeps playing, so the old
/// runner is always torn down.
fn swap_runner(next: Option<LetterRunner>) -> bool {
    RUNNER.with(|cell| replace_torn_down(&mut cell.borrow_mut(), next, LetterRunner::teardown))
}

fn viewport_size() -> (u32, u32) {
    let Some(window) = web_sys::window() else {
        return (0, 0);
    };
    let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0).max(0.0) as u32;
    (dim(window.inner_width()), dim(window.inner_height()))
}

fn load_config(config_json: Option<String>) -> Result<LetterConfig, StardustError> {
    match config_json {
        Some(json) => LetterConfig::from_json(&json),
        None => Ok(LetterConfig::default()),
    }
}

/// Create the letter on `canvas`, sized to the viewport. Failures are logged
/// and leave the page without an animation.
#[wasm_bindgen]
pub fn letter_init(canvas: HtmlCanvasElement, config_json: Option<String>) {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let runner = load_config(config_json).and_then(|config| LetterRunner::new(canvas, config));
    let mut runner = match runner {
        Ok(runner) => runner,
        Err(err) => {
            log::error!("stardust: {err}");
            return;
        }
    };
    let (width, height) = viewport_size();
    runner.start(width, height);

    if swap_runner(Some(runner)) {
        log::info!("stardust: replaced running letter");
    }
    log::info!("stardust: initialized");
}

#[wasm_bindgen]
pub fn letter_resize(width: u32, height: u32) {
    with_runner((), |r| r.resize(width, height));
}

/// Advance and paint one frame. False means "stop rescheduling".
#[wasm_bindgen]
pub fn letter_tick(now_ms: f64) -> bool {
    with_runner(false, |r| r.tick(now_ms))
}

#[wasm_bindgen]
pub fn letter_begin(now_ms: f64) {
    with_runner((), |r| r.begin(now_ms));
}

#[wasm_bindgen]
pub fn letter_dedicate(now_ms: f64) {
    with_runner((), |r| r.dedicate(now_ms));
}

#[wasm_bindgen]
pub fn letter_close(now_ms: f64) {
    with_runner((), |r| r.close(now_ms));
}

#[wasm_bindgen]
pub fn letter_toggle_sound() {
    with_runner((), |r| r.toggle_sound());
}

#[wasm_bindgen]
pub fn letter_is_muted() -> bool {
    with_runner(true, |r| r.is_muted())
}

#[wasm_bindgen]
pub fn letter_stage() -> String {
    with_runner(String::new(), |r| r.stage().name().to_string())
}

#[wasm_bindgen]
pub fn letter_tagline_visible(now_ms: f64) -> bool {
    with_runner(false, |r| r.tagline_visible(now_ms))
}

#[wasm_bindgen]
pub fn letter_final_link_visible(now_ms: f64) -> bool {
    with_runner(false, |r| r.final_link_visible(now_ms))
}

/// Stop the loop and drop the runner.
#[wasm_bindgen]
pub fn letter_teardown() {
    if swap_runner(None) {
        log::info!("stardust: torn down");
    }
}

// ---- Frame accessors ----

#[wasm_bindgen]
pub fn get_frame_ptr() -> *const f32 {
    with_runner(std::ptr::null(), |r| r.frame_ptr())
}

#[wasm_bindgen]
pub fn get_circle_count() -> u32 {
    with_runner(0, |r| r.circle_count())
}

/// Bytes per circle record behind `get_frame_ptr`.
#[wasm_bindgen]
pub fn get_circle_stride() -> u32 {
    CircleInstance::STRIDE_BYTES as u32
}
