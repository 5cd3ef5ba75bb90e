use std::rc::Rc;

use barline_core::input::{apply_pan, classify_wheel, hit_test, select_hit, PanController, WheelInput};
use barline_core::{TimelineHost, Viewport};
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{MouseEvent, PointerEvent, WheelEvent};

use crate::canvas::WebSurface;
use crate::dom::{wait_for_fonts, FrameLoop, SizeWatch, WheelListener};
use crate::state::TimelineState;

type HostCell = StoredValue<TimelineHost<WebSurface>, LocalStorage>;

const DOM_DELTA_LINE: u32 = 1;
const DOM_DELTA_PAGE: u32 = 2;
const LINE_HEIGHT_PX: f64 = 16.0;

/// Browser registrations owned by one mounted timeline.
#[derive(Default)]
struct Mounted {
    started: bool,
    frames: FrameLoop,
    size: Option<SizeWatch>,
    wheel: Option<WheelListener>,
}

impl Mounted {
    fn stop(&mut self) {
        self.frames.stop();
        if let Some(size) = self.size.take() {
            size.disconnect();
        }
        if let Some(wheel) = self.wheel.take() {
            wheel.detach();
        }
    }
}

fn wheel_input(ev: &WheelEvent, page_height: f64) -> WheelInput {
    let scale = match ev.delta_mode() {
        DOM_DELTA_LINE => LINE_HEIGHT_PX,
        DOM_DELTA_PAGE => page_height.max(1.0),
        _ => 1.0,
    };
    WheelInput {
        delta_x: ev.delta_x() * scale,
        delta_y: ev.delta_y() * scale,
        ctrl: ev.ctrl_key(),
        meta: ev.meta_key(),
        shift: ev.shift_key(),
        pointer_x: ev.offset_x() as f64,
    }
}

fn publish_stats(host: HostCell, state: TimelineState) {
    if let Some(stats) = host.try_with_value(|h| h.stats()) {
        state.stats.set(stats);
    }
}

/// Measure the container and hand the size to the host, which redraws the
/// static layers when it changed.
fn sync_size(host: HostCell, state: TimelineState, container: &web_sys::Element) {
    let dpr = web_sys::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
    let viewport = Viewport::new(container.client_width() as f64, container.client_height() as f64, dpr);
    state.camera.with_untracked(|store| {
        state.tracks.with_untracked(|tracks| {
            host.try_update_value(|h| {
                h.resize(viewport, store, tracks);
                if h.needs_static_redraw() {
                    h.redraw_static(store, tracks);
                }
            });
        })
    });
    publish_stats(host, state);
}

/// The timeline surface: two stacked canvases driven by a [`TimelineHost`].
///
/// `position` is queried once per display frame for the playhead, in bars.
#[component]
pub fn TimelineCanvas<F>(position: F) -> impl IntoView
where
    F: Fn() -> f64 + 'static,
{
    let state = expect_context::<TimelineState>();
    let container_ref = NodeRef::<leptos::html::Div>::new();
    let base_ref = NodeRef::<leptos::html::Canvas>::new();
    let overlay_ref = NodeRef::<leptos::html::Canvas>::new();

    let host: HostCell = StoredValue::new_local(TimelineHost::new(state.config.get_untracked()));
    let mounted = StoredValue::new_local(Mounted::default());
    let pan = StoredValue::new(PanController::new());
    let position = Rc::new(position);

    // Static cadence: camera, selection, project data or config changed
    Effect::new(move || {
        let config = state.config.get();
        state.camera.with(|store| {
            state.tracks.with(|tracks| {
                host.try_update_value(|h| {
                    h.set_config(config);
                    h.redraw_static(store, tracks);
                });
            })
        });
        publish_stats(host, state);
    });

    // Attach once the canvases exist and fonts are ready
    Effect::new(move || {
        let (Some(container), Some(base), Some(overlay)) = (container_ref.get(), base_ref.get(), overlay_ref.get())
        else {
            return;
        };
        if mounted.try_update_value(|m| std::mem::replace(&mut m.started, true)).unwrap_or(true) {
            return;
        }
        let position = position.clone();

        spawn_local(async move {
            wait_for_fonts().await;

            let surface = match WebSurface::new(base, overlay) {
                Ok(s) => s,
                Err(e) => {
                    log::error!("timeline canvas unavailable: {:?}", e);
                    return;
                }
            };
            // None when the component was unmounted while fonts loaded
            if host.try_update_value(|h| h.attach(surface)) != Some(true) {
                return;
            }

            let element: web_sys::Element = container.into();
            sync_size(host, state, &element);

            let watched = element.clone();
            match SizeWatch::observe(&element, move || sync_size(host, state, &watched)) {
                Ok(watch) => {
                    mounted.try_update_value(|m| m.size = Some(watch));
                }
                Err(e) => log::error!("ResizeObserver failed: {:?}", e),
            }

            let on_wheel = move |ev: WheelEvent| {
                ev.prevent_default();
                let page_height = host.try_with_value(|h| h.viewport().height).unwrap_or(0.0);
                let input = wheel_input(&ev, page_height);
                let sensitivity = state.config.with_untracked(|c| c.wheel_zoom_sensitivity);
                state.mutate_camera(|store| classify_wheel(&input, sensitivity).apply(store));
            };
            match WheelListener::attach(&element, on_wheel) {
                Ok(listener) => {
                    mounted.try_update_value(|m| m.wheel = Some(listener));
                }
                Err(e) => log::error!("wheel listener failed: {:?}", e),
            }

            // Dynamic cadence: playhead only, every display frame
            let tick = move |_now: f64| {
                let bars = position();
                state
                    .camera
                    .try_with_untracked(|store| host.try_update_value(|h| h.redraw_dynamic(store.camera(), bars)))
                    .flatten()
                    .unwrap_or(false)
            };
            let started = mounted.try_with_value(|m| m.frames.start(tick));
            if let Some(Err(e)) = started {
                log::error!("requestAnimationFrame failed: {:?}", e);
            }
        });
    });

    on_cleanup(move || {
        mounted.try_update_value(|m| m.stop());
        host.try_update_value(|h| h.teardown());
    });

    let on_pointerdown = move |ev: PointerEvent| {
        if ev.button() == 0 {
            let (x, y) = (ev.offset_x() as f64, ev.offset_y() as f64);
            let hit = state
                .camera
                .with_untracked(|store| state.tracks.with_untracked(|tracks| hit_test(store, tracks, x, y)));
            state.mutate_camera(|store| select_hit(store, hit));
            return;
        }
        let started = state.camera.with_untracked(|store| {
            pan.try_update_value(|p| {
                p.pointer_down(
                    ev.button(),
                    ev.pointer_id(),
                    ev.client_x() as f64,
                    ev.client_y() as f64,
                    store.camera(),
                )
            })
        });
        if started != Some(true) {
            return;
        }
        ev.prevent_default();
        if let Some(target) = ev.target().and_then(|t| t.dyn_into::<web_sys::Element>().ok()) {
            if let Err(e) = target.set_pointer_capture(ev.pointer_id()) {
                log::error!("pointer capture failed: {:?}", e);
            }
        }
    };

    let on_pointermove = move |ev: PointerEvent| {
        let target = pan
            .try_with_value(|p| p.pointer_move(ev.pointer_id(), ev.client_x() as f64, ev.client_y() as f64))
            .flatten();
        if let Some(target) = target {
            state.mutate_camera(|store| apply_pan(store, target));
        }
    };

    let end_pan = move |ev: PointerEvent| {
        if pan.try_update_value(|p| p.pointer_up(ev.pointer_id())) != Some(true) {
            return;
        }
        if let Some(target) = ev.target().and_then(|t| t.dyn_into::<web_sys::Element>().ok()) {
            let _ = target.release_pointer_capture(ev.pointer_id());
        }
    };

    // middle-click autoscroll would fight the pan
    let block_autoscroll = |ev: MouseEvent| {
        if ev.button() == 1 {
            ev.prevent_default();
        }
    };

    view! {
        <div class="timeline" node_ref=container_ref>
            <canvas class="timeline-layer" node_ref=base_ref />
            <canvas
                class="timeline-layer timeline-overlay"
                node_ref=overlay_ref
                on:pointerdown=on_pointerdown
                on:pointermove=on_pointermove
                on:pointerup=end_pan
                on:pointercancel=end_pan
                on:mousedown=block_autoscroll
            />
        </div>
    }
}
