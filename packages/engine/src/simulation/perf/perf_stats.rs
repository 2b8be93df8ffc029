use wasm_bindgen::prelude::*;

/// Per-frame timings. Milliseconds per stage, zero when perf metrics are off.
#[wasm_bindgen]
#[derive(Clone, Debug, Default)]
pub struct PerfStats {
    pub(super) step_ms: f64,
    pub(super) splat_ms: f64,
    pub(super) advect_ms: f64,
    pub(super) vorticity_ms: f64,
    pub(super) pressure_ms: f64,
    pub(super) dye_ms: f64,
    pub(super) bloom_ms: f64,
    pub(super) display_ms: f64,
    pub(super) splats_applied: u32,
    pub(super) sim_cells: u32,
    pub(super) dye_cells: u32,
    pub(super) bloom_levels: u32,
    pub(super) memory_bytes: u32,
    pub(super) frame: u64,
}

impl PerfStats {
    pub(crate) fn reset(&mut self) {
        let frame = self.frame;
        *self = PerfStats::default();
        self.frame = frame;
    }
}

#[wasm_bindgen]
impl PerfStats {
    #[wasm_bindgen(getter)]
    pub fn step_ms(&self) -> f64 { self.step_ms }
    #[wasm_bindgen(getter)]
    pub fn splat_ms(&self) -> f64 { self.splat_ms }
    #[wasm_bindgen(getter)]
    pub fn advect_ms(&self) -> f64 { self.advect_ms }
    #[wasm_bindgen(getter)]
    pub fn vorticity_ms(&self) -> f64 { self.vorticity_ms }
    #[wasm_bindgen(getter)]
    pub fn pressure_ms(&self) -> f64 { self.pressure_ms }
    #[wasm_bindgen(getter)]
    pub fn dye_ms(&self) -> f64 { self.dye_ms }
    #[wasm_bindgen(getter)]
    pub fn bloom_ms(&self) -> f64 { self.bloom_ms }
    #[wasm_bindgen(getter)]
    pub fn display_ms(&self) -> f64 { self.display_ms }
    #[wasm_bindgen(getter)]
    pub fn splats_applied(&self) -> u32 { self.splats_applied }
    #[wasm_bindgen(getter)]
    pub fn sim_cells(&self) -> u32 { self.sim_cells }
    #[wasm_bindgen(getter)]
    pub fn dye_cells(&self) -> u32 { self.dye_cells }
    #[wasm_bindgen(getter)]
    pub fn bloom_levels(&self) -> u32 { self.bloom_levels }
    #[wasm_bindgen(getter)]
    pub fn memory_bytes(&self) -> u32 { self.memory_bytes }
    #[wasm_bindgen(getter)]
    pub fn frame(&self) -> u64 { self.frame }
}
