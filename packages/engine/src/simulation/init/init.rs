use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::core::FluidError;
use crate::domain::{generate_color, resolution_for, FluidConfig};
use crate::spatial::{FieldStore, Resolution};
use crate::systems::{BloomCompositor, PressureSolver};

use super::perf_stats::PerfStats;
use super::stimulus::PointerMailbox;
use super::{FluidCore, FramePhase};

pub(super) fn create_fluid_core(
    width: u32,
    height: u32,
    config: FluidConfig,
    seed: u64,
) -> Result<FluidCore, FluidError> {
    config.validate()?;
    let viewport = viewport_for(width, height)?;
    let fields = allocate_fields(&config, viewport)?;
    let bloom = build_bloom(&config, viewport)?;
    let solver = build_solver(&config)?;
    let mut rng = SmallRng::seed_from_u64(seed);
    let pointer_color = generate_color(&mut rng);

    log::info!(
        "fluid engine ready: viewport {}x{}, sim {}x{}, dye {}x{}",
        viewport.width,
        viewport.height,
        fields.sim_resolution().width,
        fields.sim_resolution().height,
        fields.dye_resolution().width,
        fields.dye_resolution().height
    );

    let pixels = vec![0u32; fields.dye_resolution().cells()];

    Ok(FluidCore {
        config,
        viewport,
        fields,
        bloom,
        solver,
        pointer: PointerMailbox::default(),
        pointer_color,
        color_timer: 0.0,
        excitation: None,
        queued_splats: 0,
        rng,
        pixels,
        particles: None,
        last_time_ms: None,
        frame: 0,
        phase: FramePhase::Idle,
        perf_enabled: false,
        perf_stats: PerfStats::default(),
    })
}

pub(super) fn viewport_for(width: u32, height: u32) -> Result<Resolution, FluidError> {
    if width == 0 || height == 0 {
        return Err(FluidError::InvalidResolution { width, height });
    }
    Ok(Resolution::new(width, height))
}

pub(super) fn allocate_fields(config: &FluidConfig, viewport: Resolution) -> Result<FieldStore, FluidError> {
    let sim = resolution_for(config.sim_resolution, viewport.width, viewport.height);
    let dye = resolution_for(config.dye_resolution, viewport.width, viewport.height);
    FieldStore::allocate(sim, dye)
}

pub(super) fn build_bloom(config: &FluidConfig, viewport: Resolution) -> Result<BloomCompositor, FluidError> {
    let base = resolution_for(config.bloom_resolution, viewport.width, viewport.height);
    BloomCompositor::new(base, config.bloom_iterations)
}

pub(super) fn build_solver(config: &FluidConfig) -> Result<PressureSolver, FluidError> {
    PressureSolver::build(config.pressure_iterations, config.pressure_dissipation)
}
