//! End-to-end properties driven through the public API.

use dyeflow_engine::spatial::{ChannelFormat, DoubleBuffer, Field, FilterMode};
use dyeflow_engine::systems::pressure::divergence_norm;
use dyeflow_engine::systems::splat::{apply_splat, radius_for, Splat};
use dyeflow_engine::systems::PressureSolver;
use dyeflow_engine::{FluidConfig, FluidCore, FluidError};
use glam::{Vec2, Vec3};

fn small_config() -> FluidConfig {
    FluidConfig {
        sim_resolution: 48,
        dye_resolution: 96,
        bloom_resolution: 48,
        random_splat_chance: 0.0,
        ..FluidConfig::default()
    }
}

#[test]
fn projection_after_splats_reduces_divergence() {
    let mut velocity = DoubleBuffer::new(48, 48, ChannelFormat::RG, FilterMode::Linear).unwrap();
    let mut dye = DoubleBuffer::new(48, 48, ChannelFormat::RGBA, FilterMode::Linear).unwrap();
    let radius = radius_for(1.0, 1.0);
    for (point, force) in [
        (Vec2::new(0.3, 0.4), Vec2::new(40.0, 10.0)),
        (Vec2::new(0.7, 0.6), Vec2::new(-20.0, 35.0)),
    ] {
        let splat = Splat { point, force, color: Vec3::ONE, force_scale: 1.0 };
        apply_splat(&mut velocity, &mut dye, &splat, radius, 1.0);
    }

    let before = divergence_norm(velocity.read());
    let mut pressure = DoubleBuffer::new(48, 48, ChannelFormat::R, FilterMode::Nearest).unwrap();
    let mut divergence = Field::new(48, 48, ChannelFormat::R, FilterMode::Nearest).unwrap();
    PressureSolver::new(40, 0.8).project(&mut velocity, &mut pressure, &mut divergence);

    assert!(before > 0.0);
    assert!(divergence_norm(velocity.read()) < before);
}

#[test]
fn swap_twice_restores_roles() {
    let mut pair = DoubleBuffer::new(4, 4, ChannelFormat::R, FilterMode::Nearest).unwrap();
    let read = pair.read().texels().as_ptr();
    let write = pair.write().texels().as_ptr();
    pair.swap();
    assert_eq!(pair.read().texels().as_ptr(), write);
    assert_eq!(pair.write().texels().as_ptr(), read);
    pair.swap();
    assert_eq!(pair.read().texels().as_ptr(), read);
    assert_eq!(pair.write().texels().as_ptr(), write);
}

#[test]
fn frames_keep_running_under_constant_input() {
    let mut world = FluidCore::with_seed(160, 90, small_config(), 11).unwrap();
    world.pointer_down(20.0, 45.0);

    let mut now = 0.0;
    for i in 0..60 {
        world.pointer_move(20.0 + i as f32 * 2.0, 45.0);
        world.tick(now);
        now += 16.7;
    }

    assert_eq!(world.frame(), 60);
    for t in world.velocity().texels() {
        assert!(t.x.is_finite() && t.y.is_finite());
        assert!(t.x.abs() <= 1000.0 && t.y.abs() <= 1000.0);
    }
    assert!(world.pixels().iter().any(|&px| px & 0x00FF_FFFF != 0));
}

#[test]
fn hitch_is_clamped_to_max_dt() {
    let mut slow = FluidCore::with_seed(64, 64, small_config(), 3).unwrap();
    let mut fast = FluidCore::with_seed(64, 64, small_config(), 3).unwrap();
    for world in [&mut slow, &mut fast] {
        world.splat(32.0, 32.0, Vec3::X, 1.0);
        world.tick(0.0);
    }

    // A five second stall integrates exactly like one max-length frame.
    slow.tick(5000.0);
    fast.tick(1000.0 / 60.0 + 1.0);

    for (a, b) in slow.velocity().texels().iter().zip(fast.velocity().texels()) {
        assert!((*a - *b).length() < 1e-5);
    }
}

#[test]
fn invalid_construction_is_reported() {
    assert!(matches!(
        FluidCore::new(0, 100, FluidConfig::default()),
        Err(FluidError::InvalidResolution { .. })
    ));

    let bad = FluidConfig { pressure_iterations: 100_000, ..FluidConfig::default() };
    assert!(matches!(FluidCore::new(64, 64, bad), Err(FluidError::InvalidConfig(_))));

    let huge = FluidConfig { sim_resolution: 8000, ..FluidConfig::default() };
    assert!(FluidCore::new(4000, 1000, huge).is_err());
}
