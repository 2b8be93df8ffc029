use glam::{Vec2, Vec4};

use crate::spatial::Field;
use crate::systems::kernel::{Cell, Kernel};

const CENTER_WEIGHT: f32 = 0.2270270270;
const NEAR_WEIGHT: f32 = 0.3162162162;
const FAR_WEIGHT: f32 = 0.0702702703;
const NEAR_OFFSET: f32 = 1.3846153846;
const FAR_OFFSET: f32 = 3.2307692308;

/// 5-tap linear-sampled Gaussian along `direction`, offsets in source texels.
/// The target may be smaller than the source, which makes this a blurred
/// downsample as well.
pub struct BlurKernel<'a> {
    pub source: &'a Field,
    pub direction: Vec2,
}

impl Kernel for BlurKernel<'_> {
    #[inline]
    fn shade(&self, cell: Cell) -> Vec4 {
        let step = self.direction * self.source.texel_size();
        let near = step * NEAR_OFFSET;
        let far = step * FAR_OFFSET;
        let s = |uv: Vec2| self.source.sample(uv);

        let mut color = s(cell.uv) * CENTER_WEIGHT;
        color += (s(cell.uv + near) + s(cell.uv - near)) * NEAR_WEIGHT;
        color += (s(cell.uv + far) + s(cell.uv - far)) * FAR_WEIGHT;
        color.w = 1.0;
        color
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::{ChannelFormat, FilterMode};
    use crate::systems::run_pass;

    #[test]
    fn constant_field_survives_blur() {
        let mut source = Field::new(16, 16, ChannelFormat::RGBA, FilterMode::Linear).unwrap();
        source.fill(Vec4::new(0.5, 0.25, 1.0, 1.0));
        let mut out = Field::new(8, 8, ChannelFormat::RGBA, FilterMode::Linear).unwrap();
        run_pass(&BlurKernel { source: &source, direction: Vec2::X }, &mut out);
        for t in out.texels() {
            assert!((t.x - 0.5).abs() < 1e-5);
            assert!((t.z - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn horizontal_blur_does_not_spread_vertically() {
        let mut source = Field::new(16, 16, ChannelFormat::RGBA, FilterMode::Linear).unwrap();
        source.set(8, 8, Vec4::new(1.0, 0.0, 0.0, 1.0));
        let mut out = Field::new(16, 16, ChannelFormat::RGBA, FilterMode::Linear).unwrap();
        run_pass(&BlurKernel { source: &source, direction: Vec2::X }, &mut out);
        assert!(out.get(9, 8).x > 0.0);
        assert_eq!(out.get(8, 9).x, 0.0);
        let row: f32 = (0..16).map(|x| out.get(x, 8).x).sum();
        assert!((row - 1.0).abs() < 1e-4);
    }
}
