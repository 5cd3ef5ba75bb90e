use leptos::prelude::*;

use crate::components::timeline_canvas::TimelineCanvas;
use crate::components::toolbar::Toolbar;
use crate::demo;
use crate::settings;
use crate::state::{now_ms, TimelineState};
use crate::transport::DemoTransport;

#[component]
pub fn App() -> impl IntoView {
    let config = settings::load_config();
    let project = demo::load_demo_project();
    let transport = DemoTransport::new(project.tempo_bpm, config.beats_per_bar);
    let state = TimelineState::new(config, project.tracks, transport);
    provide_context(state);

    let position = move || {
        state
            .transport
            .try_with_untracked(|t| t.position_bars(now_ms()))
            .unwrap_or(0.0)
    };

    view! {
        <div class="app">
            <Toolbar />
            <TimelineCanvas position=position />
        </div>
    }
}
