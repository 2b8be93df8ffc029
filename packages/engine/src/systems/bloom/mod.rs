//! BloomCompositor - bright-pass, blur cascade, additive composite
//!
//! The prefilter isolates the part of the dye brighter than the soft-knee
//! threshold into a base buffer at bloom resolution. Each pyramid level
//! downsamples its parent with a horizontal blur, blurs vertically in place,
//! and the levels are then added back up into the base. The composite writes
//! `dye + bloom * intensity` into the dye write side and swaps.

#[path = "blur.rs"]
mod blur;
#[path = "composite.rs"]
mod composite;
#[path = "prefilter.rs"]
mod prefilter;
#[path = "pyramid.rs"]
mod pyramid;

pub use blur::BlurKernel;
pub use composite::{AdditiveKernel, CompositeKernel};
pub use prefilter::{PrefilterKernel, SoftKnee};
pub use pyramid::level_sizes;

use glam::Vec2;

use crate::core::FluidError;
use crate::spatial::{ChannelFormat, DoubleBuffer, FilterMode, Resolution};

use super::kernel::run_pass;

#[derive(Clone, Copy, Debug)]
pub struct BloomParams {
    pub intensity: f32,
    pub threshold: f32,
    pub soft_knee: f32,
}

pub struct BloomCompositor {
    base: DoubleBuffer,
    levels: Vec<DoubleBuffer>,
}

impl BloomCompositor {
    pub fn new(base: Resolution, iterations: u32) -> Result<Self, FluidError> {
        let levels = level_sizes(base, iterations)
            .into_iter()
            .map(|r| DoubleBuffer::new(r.width, r.height, ChannelFormat::RGBA, FilterMode::Linear))
            .collect::<Result<Vec<_>, _>>()?;

        log::debug!(
            "bloom pyramid rebuilt: base {}x{}, {} levels",
            base.width,
            base.height,
            levels.len()
        );

        Ok(Self {
            base: DoubleBuffer::new(base.width, base.height, ChannelFormat::RGBA, FilterMode::Linear)?,
            levels,
        })
    }

    pub fn base_resolution(&self) -> Resolution {
        Resolution::new(self.base.width(), self.base.height())
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// The blurred bright-pass from the last `apply`.
    pub fn bloom(&self) -> &crate::spatial::Field {
        self.base.read()
    }

    /// Run the full bloom chain over `dye`. On return `dye.read()` holds the
    /// composited image and `dye.write()` the unbloomed input.
    pub fn apply(&mut self, dye: &mut DoubleBuffer, params: BloomParams) {
        self.extract(dye, params);
        self.blur_cascade();
        self.composite(dye, params.intensity);
    }

    fn extract(&mut self, dye: &DoubleBuffer, params: BloomParams) {
        let curve = SoftKnee::new(params.threshold, params.soft_knee);
        let source = dye.read();
        self.base.pass(|_, write| run_pass(&PrefilterKernel { source, curve }, write));
    }

    fn blur_cascade(&mut self) {
        let horizontal = Vec2::X;
        let vertical = Vec2::Y;

        // No pyramid: blur the bright-pass in place at base resolution.
        if self.levels.is_empty() {
            self.base.pass(|read, write| {
                run_pass(&BlurKernel { source: read, direction: horizontal }, write)
            });
            self.base.pass(|read, write| {
                run_pass(&BlurKernel { source: read, direction: vertical }, write)
            });
            return;
        }

        for i in 0..self.levels.len() {
            let (parents, rest) = self.levels.split_at_mut(i);
            let parent = match parents.last() {
                Some(level) => level.read(),
                None => self.base.read(),
            };
            let level = &mut rest[0];
            level.pass(|_, write| {
                run_pass(&BlurKernel { source: parent, direction: horizontal }, write)
            });
            level.pass(|read, write| {
                run_pass(&BlurKernel { source: read, direction: vertical }, write)
            });
        }

        for i in (0..self.levels.len()).rev() {
            let (parents, rest) = self.levels.split_at_mut(i);
            let add = rest[0].read();
            let target = match parents.last_mut() {
                Some(level) => level,
                None => &mut self.base,
            };
            target.pass(|read, write| run_pass(&AdditiveKernel { base: read, add }, write));
        }
    }

    fn composite(&self, dye: &mut DoubleBuffer, intensity: f32) {
        let bloom = self.base.read();
        dye.pass(|read, write| run_pass(&CompositeKernel { dye: read, bloom, intensity }, write));
    }
}
