use leptos::prelude::*;

use crate::demo;
use crate::settings;
use crate::state::{now_ms, TimelineState};

#[component]
pub fn Toolbar() -> impl IntoView {
    let state = expect_context::<TimelineState>();

    let zoom_label = move || {
        state.camera.with(|s| {
            let cam = s.camera();
            format!("{:.0}% \u{00d7} {:.0}%", cam.zoom_x * 100.0, cam.zoom_y * 100.0)
        })
    };
    let selection_label = move || {
        let sel = state.camera.with(|s| s.selection());
        state.tracks.with(|tracks| {
            let Some(track) = sel.track.and_then(|id| tracks.iter().find(|t| t.id == id)) else {
                return "Nothing selected".to_string();
            };
            match sel.clip.and_then(|id| track.clips.iter().find(|c| c.id == id)) {
                Some(clip) => format!("{} / {}", track.name, clip.name),
                None => track.name.clone(),
            }
        })
    };
    let stats_label = move || {
        let stats = state.stats.get();
        format!("{} clips visible, pool {}", stats.visible_clips, stats.pool_size)
    };
    let is_playing = move || state.transport.with(|t| t.is_playing());

    let on_play = move |_| {
        let now = now_ms();
        state.transport.update(|t| {
            if t.is_playing() {
                t.pause(now);
            } else {
                t.play(now);
            }
        });
    };
    let on_rewind = move |_| state.transport.update(|t| t.seek(0.0, now_ms()));
    let on_reset = move |_| {
        state.mutate_camera(|s| s.reset_camera());
    };
    let on_stress = move |_| {
        state.mutate_camera(|s| s.select_track(None));
        state.tracks.set(demo::stress_project(48, 4_000));
    };
    let on_demo = move |_| {
        state.mutate_camera(|s| s.select_track(None));
        state.tracks.set(demo::load_demo_project().tracks);
    };
    let on_meter = move |ev: web_sys::Event| {
        let Ok(beats) = event_target_value(&ev).parse::<u32>() else { return };
        let mut config = state.config.get_untracked();
        config.beats_per_bar = beats;
        settings::save_config(&config);
        state.config.set(config);
        state.transport.update(|t| t.beats_per_bar = beats);
    };

    view! {
        <div class="toolbar">
            <span class="toolbar-brand"><b>"bar"</b><i>"line"</i></span>
            <button class="toolbar-btn" on:click=on_play>
                {move || if is_playing() { "Pause" } else { "Play" }}
            </button>
            <button class="toolbar-btn" on:click=on_rewind title="Back to bar 1">"\u{23ee}"</button>
            <select class="toolbar-select" on:change=on_meter title="Beats per bar">
                {[2u32, 3, 4, 5, 6, 7].into_iter().map(|n| {
                    let selected = move || state.config.with(|c| c.beats_per_bar == n);
                    view! { <option value=n.to_string() selected=selected>{format!("{n}/4")}</option> }
                }).collect_view()}
            </select>
            <button class="toolbar-btn" on:click=on_reset title="Reset zoom and scroll">"Reset view"</button>
            <span class="toolbar-readout">{zoom_label}</span>
            <div style="flex: 1;"></div>
            <span class="toolbar-readout">{selection_label}</span>
            <span class="toolbar-readout">{stats_label}</span>
            <button class="toolbar-btn" on:click=on_demo>"Demo song"</button>
            <button class="toolbar-btn" on:click=on_stress title="48 lanes, 4000 bars">"Stress test"</button>
        </div>
    }
}
