use glam::Vec2;
use rand::Rng;

pub(super) const DEFAULT_SEED: u64 = 0x5EED_F1A1;

/// Half-width of the random splat impulse before it is scaled by splat force.
pub(crate) const RANDOM_SPLAT_DELTA: f32 = 0.02;

/// Random burst colors are brighter than pointer colors.
pub(super) const RANDOM_SPLAT_BRIGHTNESS: f32 = 10.0;

#[inline]
pub(super) fn random_point<R: Rng + ?Sized>(rng: &mut R) -> Vec2 {
    Vec2::new(rng.random::<f32>(), rng.random::<f32>())
}

/// Random direction and magnitude in `[-RANDOM_SPLAT_DELTA / 2, RANDOM_SPLAT_DELTA / 2]`
/// per axis.
#[inline]
pub(super) fn random_delta<R: Rng + ?Sized>(rng: &mut R) -> Vec2 {
    Vec2::new(rng.random::<f32>() - 0.5, rng.random::<f32>() - 0.5) * RANDOM_SPLAT_DELTA
}
