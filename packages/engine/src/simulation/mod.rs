//! FluidCore - the per-frame stepper
//!
//! Owns every field, the bloom chain and the stimulus mailbox. One `tick`
//! runs a whole frame: stimuli -> velocity advection -> vorticity ->
//! projection -> dye advection -> bloom -> display. Nothing outside this
//! type mutates a field; hosts only splat, change config, resize or point
//! sample velocity, and all of those happen between ticks.
//!
//! Split by concern:
//! - init/      construction, config and resize
//! - commands/  splats and the pointer mailbox
//! - step/      the pure pipeline and the frame driver
//! - render/    dye to displayable pixels
//! - perf/      optional per-stage timings

use glam::{Vec2, Vec3};
use rand::rngs::SmallRng;

use crate::core::FluidError;
use crate::domain::FluidConfig;
use crate::spatial::{Field, FieldStore, Resolution};
use crate::systems::{BloomCompositor, ParticleOverlay, PressureSolver, VelocitySampler};

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "init/random.rs"]
mod random;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
#[path = "commands/commands.rs"]
mod commands;
#[path = "commands/stimulus.rs"]
mod stimulus;
#[path = "step/step.rs"]
mod step;
#[path = "step/tick.rs"]
mod tick;
#[path = "render/render_extract.rs"]
mod render_extract;
mod facade;

pub use facade::FluidSimulation;
pub use perf_stats::PerfStats;
pub use stimulus::PointerMailbox;

use perf_timer::PerfTimer;

/// Where the stepper is inside the current frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FramePhase {
    /// No frame produced since construction or the last resize.
    Idle,
    Stepping,
    /// The frame buffer holds the latest image.
    Rendered,
}

impl FramePhase {
    /// Idle -> Stepping -> Rendered -> Idle.
    pub fn next(self) -> Self {
        match self {
            FramePhase::Idle => FramePhase::Stepping,
            FramePhase::Stepping => FramePhase::Rendered,
            FramePhase::Rendered => FramePhase::Idle,
        }
    }
}

pub struct FluidCore {
    config: FluidConfig,
    viewport: Resolution,
    fields: FieldStore,
    bloom: BloomCompositor,
    solver: PressureSolver,

    // Stimuli
    pointer: PointerMailbox,
    pointer_color: Vec3,
    color_timer: f32,
    excitation: Option<f32>,
    queued_splats: u32,
    rng: SmallRng,

    // Output
    pixels: Vec<u32>,
    particles: Option<ParticleOverlay>,

    // State
    last_time_ms: Option<f64>,
    frame: u64,
    phase: FramePhase,

    // Perf metrics
    perf_enabled: bool,
    perf_stats: PerfStats,
}

impl FluidCore {
    /// Create a stepper for a `width x height` pixel viewport.
    pub fn new(width: u32, height: u32, config: FluidConfig) -> Result<Self, FluidError> {
        init::create_fluid_core(width, height, config, random::DEFAULT_SEED)
    }

    /// Same as [`FluidCore::new`] with a fixed random seed.
    pub fn with_seed(width: u32, height: u32, config: FluidConfig, seed: u64) -> Result<Self, FluidError> {
        init::create_fluid_core(width, height, config, seed)
    }

    // === Config ===
    pub fn config(&self) -> &FluidConfig {
        &self.config
    }

    /// Replace the whole config. Resolution changes reallocate fields.
    pub fn set_config(&mut self, config: FluidConfig) -> Result<(), FluidError> {
        settings::set_config(self, config)
    }

    /// Merge partial JSON options into the current config.
    pub fn set_config_json(&mut self, json: &str) -> Result<(), FluidError> {
        settings::set_config_json(self, json)
    }

    /// Edit a copy of the current config and apply it.
    pub fn update_config<F: FnOnce(&mut FluidConfig)>(&mut self, edit: F) -> Result<(), FluidError> {
        let mut next = self.config.clone();
        edit(&mut next);
        self.set_config(next)
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.config.paused = paused;
    }

    /// Enable or disable per-stage perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        settings::enable_perf_metrics(self, enabled);
    }

    /// Last frame perf snapshot (zeros when perf disabled)
    pub fn perf_stats(&self) -> PerfStats {
        self.perf_stats.clone()
    }

    // === Resources ===
    /// Reallocate every field for a new viewport. Simulation state restarts
    /// from empty fields.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), FluidError> {
        settings::resize(self, width, height)
    }

    pub fn viewport(&self) -> Resolution {
        self.viewport
    }

    pub fn sim_resolution(&self) -> Resolution {
        self.fields.sim_resolution()
    }

    pub fn dye_resolution(&self) -> Resolution {
        self.fields.dye_resolution()
    }

    pub fn bloom_resolution(&self) -> Resolution {
        self.bloom.base_resolution()
    }

    pub fn fields(&self) -> &FieldStore {
        &self.fields
    }

    pub fn velocity(&self) -> &Field {
        self.fields.velocity.read()
    }

    pub fn dye(&self) -> &Field {
        self.fields.dye.read()
    }

    // === Stimuli ===
    /// Inject one splat at a pixel position (top-left origin).
    pub fn splat(&mut self, x: f32, y: f32, color: Vec3, force_scale: f32) {
        commands::splat_at_pixel(self, x, y, color, force_scale);
    }

    /// Apply `amount` random splats right away.
    pub fn multiple_splats(&mut self, amount: u32) {
        commands::multiple_splats(self, amount);
    }

    /// Queue random splats for the next tick.
    pub fn queue_random_splats(&mut self, amount: u32) {
        self.queued_splats = self.queued_splats.saturating_add(amount);
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        commands::pointer_down(self, x, y);
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        commands::pointer_move(self, x, y);
    }

    pub fn pointer_up(&mut self) {
        self.pointer.release();
    }

    /// Audio loudness in [0, 1] for the next tick. Only the latest value
    /// counts.
    pub fn set_excitation(&mut self, excitation: f32) {
        self.excitation = Some(excitation.clamp(0.0, 1.0));
    }

    // === Frame ===
    /// Run one frame at wall-clock time `now_ms`.
    pub fn tick(&mut self, now_ms: f64) {
        tick::tick(self, now_ms);
    }

    /// Advance the fluid by `dt` seconds with no stimuli, bloom or display.
    pub fn step(&mut self, dt: f32) {
        step::step(self, dt);
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn phase(&self) -> FramePhase {
        self.phase
    }

    /// Displayable ABGR pixels at dye resolution, top row first.
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Velocity at a normalized position (origin bottom-left).
    pub fn sample_velocity(&self, uv: Vec2) -> Vec2 {
        self.fields.velocity.read().sample_velocity(uv)
    }

    // === Particle overlay ===
    pub fn spawn_particles(&mut self, count: usize, min_age: f32, max_age: f32, seed: u64) {
        self.particles = Some(ParticleOverlay::new(count, min_age, max_age, seed));
    }

    pub fn particles(&self) -> Option<&ParticleOverlay> {
        self.particles.as_ref()
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
