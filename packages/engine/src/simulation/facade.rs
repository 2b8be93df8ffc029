use glam::{Vec2, Vec3};
use wasm_bindgen::prelude::*;

use crate::core::FluidError;
use crate::domain::FluidConfig;

use super::perf_stats::PerfStats;
use super::{FluidCore, FramePhase};

fn to_js(e: FluidError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[wasm_bindgen]
pub struct FluidSimulation {
    core: FluidCore,
}

#[wasm_bindgen]
impl FluidSimulation {
    /// Create a simulation for a `width x height` canvas. `options` is a
    /// partial JSON config; pass an empty string for the defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, options: &str) -> Result<FluidSimulation, JsValue> {
        let config = if options.trim().is_empty() {
            FluidConfig::default()
        } else {
            crate::domain::ConfigPatch::from_json(options)
                .map_err(to_js)?
                .merged_into(&FluidConfig::default())
        };
        let core = FluidCore::new(width, height, config).map_err(to_js)?;
        Ok(Self { core })
    }

    #[wasm_bindgen(getter)]
    pub fn frame(&self) -> u64 { self.core.frame() }

    /// 0 = idle, 1 = stepping, 2 = rendered.
    #[wasm_bindgen(getter)]
    pub fn phase(&self) -> u8 {
        match self.core.phase() {
            FramePhase::Idle => 0,
            FramePhase::Stepping => 1,
            FramePhase::Rendered => 2,
        }
    }

    /// Run one animation frame at `now_ms` (e.g. `performance.now()`).
    pub fn tick(&mut self, now_ms: f64) {
        self.core.tick(now_ms);
    }

    /// Reallocate for a new canvas size. Fluid state restarts empty.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), JsValue> {
        self.core.resize(width, height).map_err(to_js)
    }

    // === Config ===
    /// Merge partial JSON options into the current config.
    pub fn set_config(&mut self, json: &str) -> Result<(), JsValue> {
        self.core.set_config_json(json).map_err(to_js)
    }

    pub fn get_config_json(&self) -> String {
        self.core.config().to_json()
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.core.set_paused(paused);
    }

    /// Enable or disable per-stage perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.core.enable_perf_metrics(enabled);
    }

    /// Last frame perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        self.core.perf_stats()
    }

    // === Stimuli ===
    /// Splat at canvas pixel (x, y), top-left origin, color components in [0, 1]
    /// (brighter values are allowed and feed the bloom).
    pub fn splat(&mut self, x: f32, y: f32, r: f32, g: f32, b: f32, force_scale: f32) {
        self.core.splat(x, y, Vec3::new(r, g, b), force_scale);
    }

    /// Queue `amount` random splats for the next tick.
    pub fn queue_random_splats(&mut self, amount: u32) {
        self.core.queue_random_splats(amount);
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.core.pointer_down(x, y);
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.core.pointer_move(x, y);
    }

    pub fn pointer_up(&mut self) {
        self.core.pointer_up();
    }

    /// Normalized audio loudness for the next tick.
    pub fn set_excitation(&mut self, excitation: f32) {
        self.core.set_excitation(excitation);
    }

    // === Readback ===
    /// Velocity `[vx, vy]` at a normalized position (origin bottom-left).
    pub fn sample_velocity(&self, u: f32, v: f32) -> Vec<f32> {
        let vel = self.core.sample_velocity(Vec2::new(u, v));
        vec![vel.x, vel.y]
    }

    /// Pointer to the ABGR frame (top row first) in wasm memory
    pub fn frame_ptr(&self) -> *const u32 {
        self.core.pixels().as_ptr()
    }

    /// Frame length in pixels
    pub fn frame_len(&self) -> usize {
        self.core.pixels().len()
    }

    #[wasm_bindgen(getter)]
    pub fn frame_width(&self) -> u32 { self.core.dye_resolution().width }

    #[wasm_bindgen(getter)]
    pub fn frame_height(&self) -> u32 { self.core.dye_resolution().height }

    // === Particle overlay ===
    pub fn spawn_particles(&mut self, count: usize, min_age: f32, max_age: f32, seed: u32) {
        self.core.spawn_particles(count, min_age, max_age, seed as u64);
    }

    /// Particle positions as `[x0, y0, x1, y1, ...]`, normalized, top-left origin.
    pub fn particle_positions(&self) -> Vec<f32> {
        self.core
            .particles()
            .map(|p| p.positions_top_left())
            .unwrap_or_default()
    }
}

impl FluidSimulation {
    pub fn core(&self) -> &FluidCore {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut FluidCore {
        &mut self.core
    }
}
