use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

type Tick = Closure<dyn FnMut(f64)>;

struct Inner {
    closure: RefCell<Option<Tick>>,
    handle: Cell<Option<i32>>,
    stopped: Cell<bool>,
}

impl Inner {
    fn request(&self) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("No window")?;
        let closure = self.closure.borrow();
        let Some(tick) = closure.as_ref() else {
            return Ok(());
        };
        let handle = window.request_animation_frame(tick.as_ref().unchecked_ref())?;
        self.handle.set(Some(handle));
        Ok(())
    }
}

/// A `requestAnimationFrame` loop holding at most one pending callback.
///
/// [`stop`](Self::stop) cancels the pending frame and releases the callback.
/// It must not be called from inside the tick itself; a tick that wants to end
/// the loop returns `false` instead.
pub struct FrameLoop {
    inner: Rc<Inner>,
}

impl FrameLoop {
    /// Call `tick` with the frame time in seconds until it returns `false`.
    pub fn start(mut tick: impl FnMut(f64) -> bool + 'static) -> Result<Self, JsValue> {
        let inner = Rc::new(Inner {
            closure: RefCell::new(None),
            handle: Cell::new(None),
            stopped: Cell::new(false),
        });
        let weak = Rc::downgrade(&inner);
        let closure: Tick = Closure::new(move |timestamp: f64| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            inner.handle.set(None);
            if inner.stopped.get() {
                return;
            }
            if !tick(timestamp / 1000.0) {
                inner.stopped.set(true);
                return;
            }
            if let Err(e) = inner.request() {
                web_sys::console::error_1(&e);
                inner.stopped.set(true);
            }
        });
        *inner.closure.borrow_mut() = Some(closure);
        inner.request()?;
        Ok(Self { inner })
    }

    /// Whether the loop has ended.
    pub fn is_stopped(&self) -> bool {
        self.inner.stopped.get()
    }

    /// Cancel the pending frame and drop the callback.
    pub fn stop(&self) {
        self.inner.stopped.set(true);
        if let Some(handle) = self.inner.handle.take() {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(handle);
            }
        }
        self.inner.closure.borrow_mut().take();
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.stop();
    }
}
