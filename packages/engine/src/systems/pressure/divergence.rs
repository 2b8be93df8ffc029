use glam::Vec4;

use crate::spatial::Field;
use crate::systems::kernel::{Cell, Kernel};

pub struct DivergenceKernel<'a> {
    pub velocity: &'a Field,
}

#[inline]
fn divergence_at(velocity: &Field, x: u32, y: u32) -> f32 {
    let n = velocity.neighbors(x, y);
    0.5 * ((n.r.x - n.l.x) + (n.t.y - n.b.y))
}

impl Kernel for DivergenceKernel<'_> {
    #[inline]
    fn shade(&self, cell: Cell) -> Vec4 {
        Vec4::new(divergence_at(self.velocity, cell.x, cell.y), 0.0, 0.0, 1.0)
    }
}

/// L2 norm of the discrete divergence of `velocity`, using the same stencil
/// as the projection.
pub fn divergence_norm(velocity: &Field) -> f64 {
    let mut sum = 0.0f64;
    for y in 0..velocity.height() {
        for x in 0..velocity.width() {
            let d = divergence_at(velocity, x, y) as f64;
            sum += d * d;
        }
    }
    sum.sqrt()
}
