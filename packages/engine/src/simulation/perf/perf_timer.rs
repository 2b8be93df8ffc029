/// Milliseconds on a monotonic-enough clock. `Instant` is unavailable on
/// wasm32, so the browser clock is used there.
#[cfg(target_arch = "wasm32")]
fn now_ms() -> f64 {
    js_sys::Date::now()
}

#[cfg(not(target_arch = "wasm32"))]
fn now_ms() -> f64 {
    use std::sync::OnceLock;
    use std::time::Instant;

    static EPOCH: OnceLock<Instant> = OnceLock::new();
    EPOCH.get_or_init(Instant::now).elapsed().as_secs_f64() * 1000.0
}

/// Stage stopwatch. `lap_ms` reads and restarts, so consecutive stages can
/// share one timer.
#[derive(Clone, Copy)]
pub(crate) struct PerfTimer {
    start_ms: f64,
}

impl PerfTimer {
    pub(crate) fn start() -> Self {
        PerfTimer { start_ms: now_ms() }
    }

    pub(crate) fn elapsed_ms(&self) -> f64 {
        (now_ms() - self.start_ms).max(0.0)
    }

    pub(crate) fn lap_ms(&mut self) -> f64 {
        let now = now_ms();
        let lap = (now - self.start_ms).max(0.0);
        self.start_ms = now;
        lap
    }
}
