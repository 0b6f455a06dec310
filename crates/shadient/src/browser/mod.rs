//! Browser runtime for the landing page.
//!
//! [`Page`] mounts the rendered markup, turns DOM events into
//! [`PageMessage`](shadient_core::PageMessage)s and drives every timeline from
//! a single `requestAnimationFrame` loop.
//!
//! ```javascript
//! import init, { Page } from './pkg/shadient.js';
//!
//! await init();
//! const page = new Page();
//! page.mount('shadient-root');
//! ```

mod app;
mod frame;

pub use app::Page;
pub use frame::FrameLoop;

use wasm_bindgen::prelude::*;

/// Initialize panic hook for better error messages.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Log to browser console.
#[wasm_bindgen]
pub fn log(msg: &str) {
    web_sys::console::log_1(&JsValue::from_str(msg));
}

pub(crate) fn warn(msg: &str) {
    web_sys::console::warn_1(&JsValue::from_str(msg));
}

/// Host clock in seconds, on the same origin as frame timestamps.
pub(crate) fn now() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map_or(0.0, |p| p.now() / 1000.0)
}
