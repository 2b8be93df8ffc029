use glam::{Vec2, Vec4};

use crate::spatial::Field;
use crate::systems::kernel::{Cell, Kernel};

/// Subtracts the pressure gradient from velocity.
pub struct GradientKernel<'a> {
    pub pressure: &'a Field,
    pub velocity: &'a Field,
}

impl Kernel for GradientKernel<'_> {
    #[inline]
    fn shade(&self, cell: Cell) -> Vec4 {
        let n = self.pressure.neighbors(cell.x, cell.y);
        let grad = 0.5 * Vec2::new(n.r.x - n.l.x, n.t.x - n.b.x);
        let vel = self.velocity.get(cell.x, cell.y).truncate().truncate() - grad;
        Vec4::new(vel.x, vel.y, 0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::{ChannelFormat, FilterMode};

    #[test]
    fn linear_pressure_pushes_towards_low_side() {
        let mut pressure = Field::new(5, 5, ChannelFormat::R, FilterMode::Nearest).unwrap();
        for y in 0..5 {
            for x in 0..5 {
                pressure.set(x, y, Vec4::new(x as f32 * 2.0, 0.0, 0.0, 1.0));
            }
        }
        let velocity = Field::new(5, 5, ChannelFormat::RG, FilterMode::Linear).unwrap();
        let k = GradientKernel { pressure: &pressure, velocity: &velocity };
        let v = k.shade(Cell { x: 2, y: 2, uv: Vec2::splat(0.5) });
        assert!((v.x + 2.0).abs() < 1e-6);
        assert_eq!(v.y, 0.0);
    }
}
