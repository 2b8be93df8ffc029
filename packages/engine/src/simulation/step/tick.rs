use rand::Rng;

use crate::domain::generate_color;
use crate::systems::bloom::BloomParams;

use super::commands;
use super::render_extract::render_display;
use super::{FluidCore, FramePhase, PerfTimer};

/// Frame time in seconds since the previous tick, clamped to `[0, max_dt]`.
/// The first tick has no previous timestamp and gets 0, as does a
/// non-finite elapsed time.
pub(super) fn frame_dt(last_time_ms: Option<f64>, now_ms: f64, max_dt: f32) -> f32 {
    let Some(last) = last_time_ms else {
        return 0.0;
    };
    let elapsed = ((now_ms - last) / 1000.0) as f32;
    if !elapsed.is_finite() {
        return 0.0;
    }
    elapsed.clamp(0.0, max_dt)
}

pub(super) fn tick(core: &mut FluidCore, now_ms: f64) {
    // The previous frame has been yielded.
    if core.phase == FramePhase::Rendered {
        core.phase = core.phase.next();
    }
    core.phase = core.phase.next();
    if core.perf_enabled {
        core.perf_stats.reset();
    }

    let dt = frame_dt(core.last_time_ms, now_ms, core.config.max_dt);
    core.last_time_ms = Some(now_ms);

    update_colors(core, dt);
    apply_inputs(core);

    if !core.config.paused {
        core.step(dt);
    }

    if let Some(particles) = core.particles.as_mut() {
        particles.update(core.fields.velocity.read(), dt);
    }

    let bloom_on = core.config.bloom;
    if bloom_on {
        let params = BloomParams {
            intensity: core.config.bloom_intensity,
            threshold: core.config.bloom_threshold,
            soft_knee: core.config.bloom_soft_knee,
        };
        if core.perf_enabled {
            let t0 = PerfTimer::start();
            core.bloom.apply(&mut core.fields.dye, params);
            core.perf_stats.bloom_ms = t0.elapsed_ms();
            core.perf_stats.bloom_levels = core.bloom.level_count() as u32;
        } else {
            core.bloom.apply(&mut core.fields.dye, params);
        }
    }

    if core.perf_enabled {
        let t0 = PerfTimer::start();
        render_display(core);
        core.perf_stats.display_ms = t0.elapsed_ms();
    } else {
        render_display(core);
    }

    // The composite only exists for display; the unbloomed dye goes back to
    // being the simulation state.
    if bloom_on {
        core.fields.dye.swap();
    }

    core.frame += 1;
    core.perf_stats.frame = core.frame;
    core.phase = core.phase.next();
}

/// Cycle the pointer color in colorful mode.
fn update_colors(core: &mut FluidCore, dt: f32) {
    if !core.config.colorful {
        return;
    }
    core.color_timer += dt * core.config.color_update_speed;
    if core.color_timer >= 1.0 {
        core.color_timer = core.color_timer.rem_euclid(1.0);
        core.pointer_color = generate_color(&mut core.rng);
    }
}

/// Turn everything that arrived since the last frame into splats.
fn apply_inputs(core: &mut FluidCore) {
    let queued = std::mem::take(&mut core.queued_splats);
    commands::multiple_splats(core, queued);

    if let Some(sample) = core.pointer.take(core.config.pointer_speed_threshold) {
        commands::splat_pointer(core, sample);
    }

    if let Some(excitation) = core.excitation.take() {
        if excitation > core.config.audio_threshold {
            log::debug!("audio splat at excitation {:.2}", excitation);
            commands::random_splat(core, 1.0 + excitation * core.config.audio_force_gain);
        }
    }

    if core.rng.random::<f32>() < core.config.random_splat_chance {
        commands::random_splat(core, 1.0);
    }
}
