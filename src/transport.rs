//! Stand-in transport for the demo page. Real playback lives outside the
//! timeline; all the canvas needs is "where is the playhead, in bars".

/// Clock-driven play position. Times are `performance.now()` milliseconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DemoTransport {
    pub tempo_bpm: f64,
    pub beats_per_bar: u32,
    /// Position when the clock was last anchored.
    anchor_bars: f64,
    /// Set while playing.
    started_at_ms: Option<f64>,
}

impl Default for DemoTransport {
    fn default() -> Self {
        Self::new(120.0, 4)
    }
}

impl DemoTransport {
    pub fn new(tempo_bpm: f64, beats_per_bar: u32) -> Self {
        Self {
            tempo_bpm,
            beats_per_bar: beats_per_bar.max(1),
            anchor_bars: 0.0,
            started_at_ms: None,
        }
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.started_at_ms.is_some()
    }

    fn bars_per_ms(&self) -> f64 {
        self.tempo_bpm / 60_000.0 / self.beats_per_bar as f64
    }

    pub fn position_bars(&self, now_ms: f64) -> f64 {
        match self.started_at_ms {
            Some(t0) => self.anchor_bars + (now_ms - t0).max(0.0) * self.bars_per_ms(),
            None => self.anchor_bars,
        }
    }

    pub fn play(&mut self, now_ms: f64) {
        if self.started_at_ms.is_none() {
            self.started_at_ms = Some(now_ms);
        }
    }

    /// Stop and keep the current position.
    pub fn pause(&mut self, now_ms: f64) {
        self.anchor_bars = self.position_bars(now_ms);
        self.started_at_ms = None;
    }

    pub fn seek(&mut self, bars: f64, now_ms: f64) {
        self.anchor_bars = bars.max(0.0);
        if self.started_at_ms.is_some() {
            self.started_at_ms = Some(now_ms);
        }
    }
}
