//! AdvectionStage - semi-Lagrangian transport along the velocity field
//!
//! Every cell traces backwards along the velocity at its own centre, samples
//! the source there and scales the result by `dissipation`. The traced
//! coordinate is not clamped; clamp-to-edge sampling handles the overshoot.

use glam::Vec4;

use crate::spatial::{DoubleBuffer, Field};

use super::kernel::{run_pass, Cell, Kernel};

pub struct AdvectKernel<'a> {
    pub velocity: &'a Field,
    pub source: &'a Field,
    pub dt: f32,
    pub dissipation: f32,
}

impl Kernel for AdvectKernel<'_> {
    #[inline]
    fn shade(&self, cell: Cell) -> Vec4 {
        let vel = self.velocity.sample(cell.uv).truncate().truncate();
        let coord = cell.uv - self.dt * vel * self.velocity.texel_size();
        let mut out = self.source.sample(coord) * self.dissipation;
        out.w = 1.0;
        out
    }
}

/// Self-advect velocity.
pub fn advect_velocity(velocity: &mut DoubleBuffer, dt: f32, dissipation: f32) {
    velocity.pass(|read, write| {
        run_pass(
            &AdvectKernel { velocity: read, source: read, dt, dissipation },
            write,
        )
    });
}

/// Carry dye through the (already projected) velocity field.
pub fn advect_dye(dye: &mut DoubleBuffer, velocity: &Field, dt: f32, dissipation: f32) {
    dye.pass(|read, write| {
        run_pass(
            &AdvectKernel { velocity, source: read, dt, dissipation },
            write,
        )
    });
}
