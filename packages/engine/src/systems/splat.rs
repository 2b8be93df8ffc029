//! SplatInjector - Gaussian impulses into velocity and dye
//!
//! A splat is two full passes: one adds a force into velocity at the base
//! radius, one adds color into dye at the radius scaled by `force_scale`.
//! Both read the old buffer, write the other and swap.

use glam::{Vec2, Vec3, Vec4};

use crate::spatial::{DoubleBuffer, Field};

use super::kernel::{run_pass, Cell, Kernel};

/// One queued impulse in normalized coordinates (origin bottom-left).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Splat {
    pub point: Vec2,
    /// Velocity added at the centre, already scaled by splat force.
    pub force: Vec2,
    pub color: Vec3,
    pub force_scale: f32,
}

/// Convert the configured splat radius into the Gaussian denominator used by
/// the kernel. Landscape viewports widen it so splats stay round on screen.
pub fn radius_for(splat_radius: f32, aspect: f32) -> f32 {
    let radius = splat_radius / 100.0;
    if aspect > 1.0 {
        radius * aspect
    } else {
        radius
    }
}

/// Convert a top-left pixel position into bottom-left normalized space.
pub fn normalize_pointer(x: f32, y: f32, width: u32, height: u32) -> Vec2 {
    Vec2::new(x / width.max(1) as f32, 1.0 - y / height.max(1) as f32)
}

pub struct SplatKernel<'a> {
    pub target: &'a Field,
    pub point: Vec2,
    pub value: Vec3,
    pub radius: f32,
    pub aspect: f32,
}

impl SplatKernel<'_> {
    #[inline]
    fn weight(&self, uv: Vec2) -> f32 {
        if self.radius <= 0.0 {
            return 0.0;
        }
        let mut p = uv - self.point;
        p.x *= self.aspect;
        (-p.dot(p) / self.radius).exp()
    }
}

impl Kernel for SplatKernel<'_> {
    #[inline]
    fn shade(&self, cell: Cell) -> Vec4 {
        let base = self.target.get(cell.x, cell.y).truncate();
        (base + self.value * self.weight(cell.uv)).extend(1.0)
    }
}

/// Apply one splat: force into velocity, color into dye.
pub fn apply_splat(velocity: &mut DoubleBuffer, dye: &mut DoubleBuffer, splat: &Splat, radius: f32, aspect: f32) {
    velocity.pass(|read, write| {
        run_pass(
            &SplatKernel {
                target: read,
                point: splat.point,
                value: splat.force.extend(0.0),
                radius,
                aspect,
            },
            write,
        )
    });

    let dye_radius = radius * splat.force_scale;
    dye.pass(|read, write| {
        run_pass(
            &SplatKernel {
                target: read,
                point: splat.point,
                value: splat.color,
                radius: dye_radius,
                aspect,
            },
            write,
        )
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::{ChannelFormat, FilterMode};

    fn fields() -> (DoubleBuffer, DoubleBuffer) {
        let mut velocity = DoubleBuffer::new(32, 32, ChannelFormat::RG, FilterMode::Linear).unwrap();
        let mut dye = DoubleBuffer::new(64, 64, ChannelFormat::RGBA, FilterMode::Linear).unwrap();
        velocity.read_mut().fill(Vec4::new(0.3, -0.2, 0.0, 1.0));
        dye.read_mut().fill(Vec4::new(0.1, 0.2, 0.3, 1.0));
        (velocity, dye)
    }

    #[test]
    fn zero_force_splat_is_a_no_op() {
        let (mut velocity, mut dye) = fields();
        let vel_before = velocity.read().texels().to_vec();
        let dye_before = dye.read().texels().to_vec();

        let splat = Splat {
            point: Vec2::splat(0.5),
            force: Vec2::ZERO,
            color: Vec3::new(1.0, 0.0, 0.0),
            force_scale: 0.0,
        };
        apply_splat(&mut velocity, &mut dye, &splat, radius_for(0.25, 1.0), 1.0);

        for (a, b) in vel_before.iter().zip(velocity.read().texels()) {
            assert!((*a - *b).length() < 1e-6);
        }
        for (a, b) in dye_before.iter().zip(dye.read().texels()) {
            assert!((*a - *b).length() < 1e-6);
        }
    }

    #[test]
    fn splat_peaks_at_point_and_falls_off() {
        let (mut velocity, mut dye) = fields();
        let splat = Splat {
            point: Vec2::new(0.5, 0.5),
            force: Vec2::new(10.0, 0.0),
            color: Vec3::new(1.0, 0.0, 0.0),
            force_scale: 1.0,
        };
        apply_splat(&mut velocity, &mut dye, &splat, radius_for(0.25, 1.0), 1.0);

        let centre = dye.read().get(32, 32).x;
        let edge = dye.read().get(2, 2).x;
        assert!(centre > 1.0);
        assert!((edge - 0.1).abs() < 1e-3);
        assert!(velocity.read().get(16, 16).x > 8.0);
        assert!((velocity.read().get(16, 16).y + 0.2).abs() < 1e-6);
    }

    #[test]
    fn dye_radius_scales_with_force() {
        let (mut velocity, mut dye_small) = fields();
        let (_, mut dye_large) = fields();
        let mut splat = Splat {
            point: Vec2::splat(0.5),
            force: Vec2::ZERO,
            color: Vec3::X,
            force_scale: 1.0,
        };
        let radius = radius_for(0.25, 1.0);
        apply_splat(&mut velocity, &mut dye_small, &splat, radius, 1.0);
        splat.force_scale = 3.0;
        apply_splat(&mut velocity, &mut dye_large, &splat, radius, 1.0);

        assert!(dye_large.read().channel_sum(0) > dye_small.read().channel_sum(0));
    }

    #[test]
    fn landscape_widens_radius() {
        assert_eq!(radius_for(0.25, 0.5), 0.0025);
        assert!((radius_for(0.25, 2.0) - 0.005).abs() < 1e-9);
    }

    #[test]
    fn pointer_origin_is_flipped() {
        let uv = normalize_pointer(0.0, 0.0, 200, 100);
        assert_eq!(uv, Vec2::new(0.0, 1.0));
        let uv = normalize_pointer(100.0, 100.0, 200, 100);
        assert_eq!(uv, Vec2::new(0.5, 0.0));
    }
}
