use glam::Vec4;

use crate::spatial::Field;
use crate::systems::kernel::{Cell, Kernel};

/// `base + add`, sampling `add` at the target's coordinates.
pub struct AdditiveKernel<'a> {
    pub base: &'a Field,
    pub add: &'a Field,
}

impl Kernel for AdditiveKernel<'_> {
    #[inline]
    fn shade(&self, cell: Cell) -> Vec4 {
        let c = self.base.get(cell.x, cell.y).truncate() + self.add.sample(cell.uv).truncate();
        c.extend(1.0)
    }
}

/// Final image: `dye + bloom * intensity`.
pub struct CompositeKernel<'a> {
    pub dye: &'a Field,
    pub bloom: &'a Field,
    pub intensity: f32,
}

impl Kernel for CompositeKernel<'_> {
    #[inline]
    fn shade(&self, cell: Cell) -> Vec4 {
        let dye = self.dye.get(cell.x, cell.y);
        let glow = self.bloom.sample(cell.uv).truncate() * self.intensity;
        (dye.truncate() + glow).extend(dye.w)
    }
}
