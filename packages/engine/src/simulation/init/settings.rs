use crate::core::FluidError;
use crate::domain::{ConfigPatch, FluidConfig};

use super::init::{allocate_fields, build_bloom, build_solver, viewport_for};
use super::{FluidCore, FramePhase};

pub(super) fn enable_perf_metrics(core: &mut FluidCore, enabled: bool) {
    core.perf_enabled = enabled;
    if !enabled {
        core.perf_stats.reset();
    }
}

pub(super) fn set_config(core: &mut FluidCore, next: FluidConfig) -> Result<(), FluidError> {
    next.validate()?;

    // Build everything the new config needs before touching `core`, so a
    // failed allocation leaves the previous state intact.
    let fields = if core.config.needs_field_realloc(&next) {
        Some(allocate_fields(&next, core.viewport)?)
    } else {
        None
    };
    let bloom = if core.config.needs_bloom_rebuild(&next) {
        Some(build_bloom(&next, core.viewport)?)
    } else {
        None
    };
    let solver = build_solver(&next)?;

    if let Some(fields) = fields {
        log::info!(
            "fields reallocated: sim {}x{}, dye {}x{}",
            fields.sim_resolution().width,
            fields.sim_resolution().height,
            fields.dye_resolution().width,
            fields.dye_resolution().height
        );
        core.pixels = vec![0u32; fields.dye_resolution().cells()];
        core.fields = fields;
        core.phase = FramePhase::Idle;
    }
    if let Some(bloom) = bloom {
        core.bloom = bloom;
    }
    core.solver = solver;
    core.config = next;
    log::info!("config replaced");
    Ok(())
}

pub(super) fn set_config_json(core: &mut FluidCore, json: &str) -> Result<(), FluidError> {
    let patch = ConfigPatch::from_json(json).inspect_err(|e| log::warn!("rejected config options: {}", e))?;
    let next = patch.merged_into(&core.config);
    set_config(core, next).inspect_err(|e| log::warn!("rejected config options: {}", e))
}

pub(super) fn resize(core: &mut FluidCore, width: u32, height: u32) -> Result<(), FluidError> {
    let viewport = viewport_for(width, height)?;
    let fields = allocate_fields(&core.config, viewport)?;
    let bloom = build_bloom(&core.config, viewport)?;

    log::info!(
        "resized to {}x{}: sim {}x{}, dye {}x{}",
        width,
        height,
        fields.sim_resolution().width,
        fields.sim_resolution().height,
        fields.dye_resolution().width,
        fields.dye_resolution().height
    );

    core.pixels = vec![0u32; fields.dye_resolution().cells()];
    core.viewport = viewport;
    core.fields = fields;
    core.bloom = bloom;
    core.pointer.release();
    core.phase = FramePhase::Idle;
    Ok(())
}
