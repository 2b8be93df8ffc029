use glam::Vec4;

use crate::spatial::Field;
use crate::systems::kernel::{Cell, Kernel};

/// Scales the previous solution before the sweeps start.
pub struct DecayKernel<'a> {
    pub source: &'a Field,
    pub factor: f32,
}

impl Kernel for DecayKernel<'_> {
    #[inline]
    fn shade(&self, cell: Cell) -> Vec4 {
        self.source.get(cell.x, cell.y) * self.factor
    }
}

/// One Jacobi sweep of the pressure Poisson equation.
pub struct JacobiKernel<'a> {
    pub pressure: &'a Field,
    pub divergence: &'a Field,
}

impl Kernel for JacobiKernel<'_> {
    #[inline]
    fn shade(&self, cell: Cell) -> Vec4 {
        let n = self.pressure.neighbors(cell.x, cell.y);
        let div = self.divergence.get(cell.x, cell.y).x;
        let p = 0.25 * (n.l.x + n.r.x + n.t.x + n.b.x - div);
        Vec4::new(p, 0.0, 0.0, 1.0)
    }
}
