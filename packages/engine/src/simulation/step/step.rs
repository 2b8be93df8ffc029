use crate::systems::advection::{advect_dye, advect_velocity};
use crate::systems::vorticity::apply_vorticity;

use super::{FluidCore, PerfTimer};

/// One fluid step. The order is fixed: velocity self-advection, vorticity,
/// projection, then dye through the projected velocity.
pub(super) fn step(core: &mut FluidCore, dt: f32) {
    let config = &core.config;
    let fields = &mut core.fields;
    let solver = core.solver;

    if !core.perf_enabled {
        advect_velocity(&mut fields.velocity, dt, config.velocity_dissipation);
        apply_vorticity(&mut fields.velocity, &mut fields.curl, config.curl, dt);
        solver.project(&mut fields.velocity, &mut fields.pressure, &mut fields.divergence);
        advect_dye(&mut fields.dye, fields.velocity.read(), dt, config.density_dissipation);
        return;
    }

    let stats = &mut core.perf_stats;
    let step_start = PerfTimer::start();
    let mut lap = PerfTimer::start();

    advect_velocity(&mut fields.velocity, dt, config.velocity_dissipation);
    stats.advect_ms = lap.lap_ms();

    apply_vorticity(&mut fields.velocity, &mut fields.curl, config.curl, dt);
    stats.vorticity_ms = lap.lap_ms();

    solver.project(&mut fields.velocity, &mut fields.pressure, &mut fields.divergence);
    stats.pressure_ms = lap.lap_ms();

    advect_dye(&mut fields.dye, fields.velocity.read(), dt, config.density_dissipation);
    stats.dye_ms = lap.lap_ms();

    stats.step_ms = step_start.elapsed_ms();
    stats.sim_cells = fields.sim_resolution().cells() as u32;
    stats.dye_cells = fields.dye_resolution().cells() as u32;
    stats.memory_bytes = fields.approx_bytes().min(u32::MAX as usize) as u32;
}
