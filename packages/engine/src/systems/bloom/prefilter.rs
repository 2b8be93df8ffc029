use glam::Vec4;

use crate::spatial::Field;
use crate::systems::kernel::{Cell, Kernel};

/// Quadratic soft-knee curve around a brightness threshold.
#[derive(Clone, Copy, Debug)]
pub struct SoftKnee {
    pub threshold: f32,
    pub curve: [f32; 3],
}

impl SoftKnee {
    pub fn new(threshold: f32, soft_knee: f32) -> Self {
        let knee = threshold * soft_knee + 0.0001;
        Self {
            threshold,
            curve: [threshold - knee, knee * 2.0, 0.25 / knee],
        }
    }

    /// Fraction of a color with peak channel `brightness` that passes.
    #[inline]
    pub fn contribution(&self, brightness: f32) -> f32 {
        let [c0, c1, c2] = self.curve;
        let rq = (brightness - c0).clamp(0.0, c1);
        let rq = c2 * rq * rq;
        rq.max(brightness - self.threshold) / brightness.max(0.0001)
    }
}

pub struct PrefilterKernel<'a> {
    pub source: &'a Field,
    pub curve: SoftKnee,
}

impl Kernel for PrefilterKernel<'_> {
    #[inline]
    fn shade(&self, cell: Cell) -> Vec4 {
        let c = self.source.sample(cell.uv).truncate();
        let brightness = c.max_element();
        (c * self.curve.contribution(brightness)).extend(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::{ChannelFormat, FilterMode};
    use crate::systems::run_pass;

    #[test]
    fn gray_below_knee_turns_black() {
        let curve = SoftKnee::new(0.6, 0.7);
        // threshold - knee = 0.18
        let mut source = Field::new(8, 8, ChannelFormat::RGBA, FilterMode::Linear).unwrap();
        source.fill(Vec4::new(0.15, 0.15, 0.15, 1.0));
        let mut out = Field::new(4, 4, ChannelFormat::RGBA, FilterMode::Linear).unwrap();
        out.fill(Vec4::ONE);

        run_pass(&PrefilterKernel { source: &source, curve }, &mut out);

        for t in out.texels() {
            assert_eq!(t.truncate(), glam::Vec3::ZERO);
        }
    }

    #[test]
    fn knee_is_smooth_and_keeps_hue() {
        let curve = SoftKnee::new(0.6, 0.7);
        let inside = curve.contribution(0.5);
        assert!(inside > 0.0 && inside < 0.2);
        // Well above the knee the pass is linear in excess brightness.
        assert!((curve.contribution(2.0) - 1.4 / 2.0).abs() < 1e-4);

        let mut source = Field::new(1, 1, ChannelFormat::RGBA, FilterMode::Linear).unwrap();
        source.fill(Vec4::new(2.0, 1.0, 0.0, 1.0));
        let mut out = Field::new(1, 1, ChannelFormat::RGBA, FilterMode::Linear).unwrap();
        run_pass(&PrefilterKernel { source: &source, curve }, &mut out);
        let t = out.get(0, 0);
        assert!((t.x / t.y - 2.0).abs() < 1e-4);
    }
}
