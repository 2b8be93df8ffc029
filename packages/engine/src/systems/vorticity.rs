//! Curl + vorticity confinement
//!
//! The curl pass stores the scalar rotation of the velocity field; the
//! confinement pass pushes velocity along `N x curl`, where `N` is the
//! normalized gradient of curl magnitude. Both passes share one sign
//! convention: counter-clockwise rotation (with +y up) is positive curl.

use glam::{Vec2, Vec4};

use crate::spatial::{DoubleBuffer, Field};

use super::kernel::{run_pass, Cell, Kernel};

/// Velocity components are hard-clamped to this magnitude after confinement.
pub const VELOCITY_CLAMP: f32 = 1000.0;

const NORMALIZE_EPSILON: f32 = 1e-4;

pub struct CurlKernel<'a> {
    pub velocity: &'a Field,
}

impl Kernel for CurlKernel<'_> {
    #[inline]
    fn shade(&self, cell: Cell) -> Vec4 {
        let n = self.velocity.neighbors(cell.x, cell.y);
        let curl = 0.5 * ((n.r.y - n.l.y) - (n.t.x - n.b.x));
        Vec4::new(curl, 0.0, 0.0, 1.0)
    }
}

pub struct VorticityKernel<'a> {
    pub velocity: &'a Field,
    pub curl: &'a Field,
    pub strength: f32,
    pub dt: f32,
}

impl Kernel for VorticityKernel<'_> {
    #[inline]
    fn shade(&self, cell: Cell) -> Vec4 {
        let n = self.curl.neighbors(cell.x, cell.y);

        let mut force = 0.5 * Vec2::new(n.t.x.abs() - n.b.x.abs(), n.r.x.abs() - n.l.x.abs());
        force /= force.length() + NORMALIZE_EPSILON;
        force *= self.strength * n.c.x;
        force.y = -force.y;

        let vel = self.velocity.get(cell.x, cell.y).truncate().truncate() + force * self.dt;
        let vel = vel.clamp(Vec2::splat(-VELOCITY_CLAMP), Vec2::splat(VELOCITY_CLAMP));
        Vec4::new(vel.x, vel.y, 0.0, 1.0)
    }
}

/// Compute curl into `curl`, then add the confinement force to velocity.
pub fn apply_vorticity(velocity: &mut DoubleBuffer, curl: &mut Field, strength: f32, dt: f32) {
    run_pass(&CurlKernel { velocity: velocity.read() }, curl);

    let curl: &Field = curl;
    velocity.pass(|read, write| {
        run_pass(
            &VorticityKernel { velocity: read, curl, strength, dt },
            write,
        )
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::{ChannelFormat, FilterMode};

    const N: u32 = 32;
    const CENTRE: f32 = 16.0;

    /// Counter-clockwise Gaussian vortex centred on (16, 16).
    fn vortex() -> DoubleBuffer {
        let mut velocity = DoubleBuffer::new(N, N, ChannelFormat::RG, FilterMode::Linear).unwrap();
        let field = velocity.read_mut();
        for y in 0..N {
            for x in 0..N {
                let dx = x as f32 - CENTRE;
                let dy = y as f32 - CENTRE;
                let falloff = (-(dx * dx + dy * dy) / 36.0).exp();
                field.set(x, y, Vec4::new(-dy * falloff, dx * falloff, 0.0, 1.0));
            }
        }
        velocity
    }

    fn curl_field() -> Field {
        Field::new(N, N, ChannelFormat::R, FilterMode::Nearest).unwrap()
    }

    #[test]
    fn counter_clockwise_rotation_has_positive_curl() {
        let velocity = vortex();
        let mut curl = curl_field();
        run_pass(&CurlKernel { velocity: velocity.read() }, &mut curl);
        assert!(curl.get(16, 16).x > 0.5);
    }

    #[test]
    fn confinement_reinforces_existing_rotation() {
        let mut velocity = vortex();
        let right_before = velocity.read().get(19, 16).y;
        let left_before = velocity.read().get(13, 16).y;
        let top_before = velocity.read().get(16, 19).x;

        let mut curl = curl_field();
        apply_vorticity(&mut velocity, &mut curl, 30.0, 1.0 / 60.0);

        // Counter-clockwise: up on the right, down on the left, leftward on top.
        assert!(velocity.read().get(19, 16).y > right_before);
        assert!(velocity.read().get(13, 16).y < left_before);
        assert!(velocity.read().get(16, 19).x < top_before);
    }

    #[test]
    fn zero_strength_leaves_velocity_unchanged() {
        let mut velocity = vortex();
        let before: Vec<Vec4> = velocity.read().texels().to_vec();
        let mut curl = curl_field();
        apply_vorticity(&mut velocity, &mut curl, 0.0, 1.0 / 60.0);
        for (a, b) in before.iter().zip(velocity.read().texels()) {
            assert!((*a - *b).length() < 1e-6);
        }
    }

    #[test]
    fn velocity_is_clamped() {
        let mut velocity = DoubleBuffer::new(4, 4, ChannelFormat::RG, FilterMode::Linear).unwrap();
        velocity.read_mut().fill(Vec4::new(5000.0, -5000.0, 0.0, 1.0));
        let mut curl = Field::new(4, 4, ChannelFormat::R, FilterMode::Nearest).unwrap();
        apply_vorticity(&mut velocity, &mut curl, 30.0, 1.0 / 60.0);
        for t in velocity.read().texels() {
            assert_eq!(t.x, VELOCITY_CLAMP);
            assert_eq!(t.y, -VELOCITY_CLAMP);
        }
    }
}
