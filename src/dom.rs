//! Thin owners for browser callbacks. Each one keeps its `Closure` alive for
//! as long as the browser may call it and unregisters it on `stop`.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AddEventListenerOptions, Element, ResizeObserver, WheelEvent};

fn window() -> Result<web_sys::Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

/// Resolve once the document's fonts are loaded, so label metrics are right
/// on the first static redraw. Errors are logged and treated as "ready".
pub async fn wait_for_fonts() {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else { return };
    match document.fonts().ready() {
        Ok(promise) => {
            if let Err(e) = JsFuture::from(promise).await {
                log::error!("document.fonts.ready rejected: {:?}", e);
            }
        }
        Err(e) => log::error!("document.fonts.ready unavailable: {:?}", e),
    }
}

// ── requestAnimationFrame loop ───────────────────────────────────────────────

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Self-re-registering `requestAnimationFrame` loop.
#[derive(Default)]
pub struct FrameLoop {
    callback: FrameCallback,
    pending: Rc<Cell<Option<i32>>>,
}

fn request_frame(callback: &FrameCallback) -> Result<i32, JsValue> {
    let slot = callback.borrow();
    let Some(cb) = slot.as_ref() else {
        return Err(JsValue::from_str("frame loop stopped"));
    };
    window()?.request_animation_frame(cb.as_ref().unchecked_ref())
}

impl FrameLoop {
    /// Run `tick(timestamp_ms)` every display frame until it returns `false`
    /// or [`FrameLoop::stop`] is called.
    pub fn start(&self, mut tick: impl FnMut(f64) -> bool + 'static) -> Result<(), JsValue> {
        self.stop();
        let callback = self.callback.clone();
        let pending = self.pending.clone();
        *self.callback.borrow_mut() = Some(Closure::new(move |now: f64| {
            pending.set(None);
            if !tick(now) {
                return;
            }
            match request_frame(&callback) {
                Ok(id) => pending.set(Some(id)),
                Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
            }
        }));
        let id = request_frame(&self.callback)?;
        self.pending.set(Some(id));
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.pending.get().is_some()
    }

    /// Cancel the pending frame and drop the callback. Must not be called
    /// from inside the tick.
    pub fn stop(&self) {
        if let Some(id) = self.pending.take() {
            if let Ok(w) = window() {
                let _ = w.cancel_animation_frame(id);
            }
        }
        self.callback.borrow_mut().take();
    }
}

// ── ResizeObserver ───────────────────────────────────────────────────────────

pub struct SizeWatch {
    observer: ResizeObserver,
    _callback: Closure<dyn FnMut(js_sys::Array, ResizeObserver)>,
}

impl SizeWatch {
    /// Call `on_resize` whenever `target`'s box changes size, including once
    /// right after observing starts.
    pub fn observe(target: &Element, mut on_resize: impl FnMut() + 'static) -> Result<Self, JsValue> {
        let callback = Closure::<dyn FnMut(js_sys::Array, ResizeObserver)>::new(
            move |_entries: js_sys::Array, _observer: ResizeObserver| on_resize(),
        );
        let observer = ResizeObserver::new(callback.as_ref().unchecked_ref())?;
        observer.observe(target);
        Ok(Self { observer, _callback: callback })
    }

    pub fn disconnect(&self) {
        self.observer.disconnect();
    }
}

// ── Non-passive wheel listener ───────────────────────────────────────────────

/// Wheel listener registered with `passive: false`, so the handler can stop
/// ctrl+wheel from zooming the page.
pub struct WheelListener {
    target: Element,
    callback: Closure<dyn FnMut(WheelEvent)>,
}

impl WheelListener {
    pub fn attach(target: &Element, handler: impl FnMut(WheelEvent) + 'static) -> Result<Self, JsValue> {
        let callback = Closure::<dyn FnMut(WheelEvent)>::new(handler);
        let options = AddEventListenerOptions::new();
        options.set_passive(false);
        target.add_event_listener_with_callback_and_add_event_listener_options(
            "wheel",
            callback.as_ref().unchecked_ref(),
            &options,
        )?;
        Ok(Self { target: target.clone(), callback })
    }

    pub fn detach(&self) {
        let _ = self
            .target
            .remove_event_listener_with_callback("wheel", self.callback.as_ref().unchecked_ref());
    }
}
