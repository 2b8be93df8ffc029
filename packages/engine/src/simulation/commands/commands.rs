use glam::Vec3;

use crate::domain::generate_color;
use crate::systems::splat::{apply_splat, normalize_pointer, radius_for, Splat};

use super::random::{random_delta, random_point, RANDOM_SPLAT_BRIGHTNESS};
use super::stimulus::PointerSample;
use super::{FluidCore, PerfTimer};

#[inline]
fn aspect(core: &FluidCore) -> f32 {
    core.viewport.width as f32 / core.viewport.height as f32
}

/// Run both splat passes and count the splat.
pub(super) fn apply(core: &mut FluidCore, splat: Splat) {
    let aspect = aspect(core);
    let radius = radius_for(core.config.splat_radius, aspect);
    if core.perf_enabled {
        let t0 = PerfTimer::start();
        apply_splat(&mut core.fields.velocity, &mut core.fields.dye, &splat, radius, aspect);
        core.perf_stats.splat_ms += t0.elapsed_ms();
        core.perf_stats.splats_applied += 1;
    } else {
        apply_splat(&mut core.fields.velocity, &mut core.fields.dye, &splat, radius, aspect);
    }
}

pub(super) fn splat_at_pixel(core: &mut FluidCore, x: f32, y: f32, color: Vec3, force_scale: f32) {
    let point = normalize_pointer(x, y, core.viewport.width, core.viewport.height);
    let force = random_delta(&mut core.rng) * core.config.splat_force * force_scale;
    apply(core, Splat { point, force, color, force_scale });
}

/// One splat at a random position with a random bright color.
pub(super) fn random_splat(core: &mut FluidCore, force_scale: f32) {
    let color = generate_color(&mut core.rng) * RANDOM_SPLAT_BRIGHTNESS;
    let point = random_point(&mut core.rng);
    let force = random_delta(&mut core.rng) * core.config.splat_force * force_scale;
    apply(core, Splat { point, force, color, force_scale });
}

pub(super) fn multiple_splats(core: &mut FluidCore, amount: u32) {
    if amount == 0 {
        return;
    }
    log::debug!("random splat burst: {}", amount);
    for _ in 0..amount {
        random_splat(core, 1.0);
    }
}

pub(super) fn pointer_down(core: &mut FluidCore, x: f32, y: f32) {
    let uv = normalize_pointer(x, y, core.viewport.width, core.viewport.height);
    core.pointer.press(uv);
    core.pointer_color = generate_color(&mut core.rng);
}

pub(super) fn pointer_move(core: &mut FluidCore, x: f32, y: f32) {
    let uv = normalize_pointer(x, y, core.viewport.width, core.viewport.height);
    let aspect = aspect(core);
    core.pointer.move_to(uv, aspect);
}

/// Drag splat: force follows the pointer, color is the current pointer color.
pub(super) fn splat_pointer(core: &mut FluidCore, sample: PointerSample) {
    let splat = Splat {
        point: sample.position,
        force: sample.delta * core.config.splat_force,
        color: core.pointer_color,
        force_scale: 1.0,
    };
    apply(core, splat);
}
