//! Field - one 2D grid of 4-channel texels
//!
//! Storage is row-major with row 0 at the bottom: normalized coordinate
//! (0, 0) is the bottom-left corner and texel centres sit at
//! ((x + 0.5) / width, (y + 0.5) / height), matching the GPU convention the
//! stencil passes are written against.

use glam::{Vec2, Vec4};

use crate::core::FluidError;

mod double_buffer;
mod format;
mod indexing;
mod sampling;
mod store;

pub use double_buffer::DoubleBuffer;
pub use format::{ChannelFormat, FilterMode};
pub use indexing::Neighbors;
pub use store::{FieldStore, Resolution};

/// Largest edge the CPU backend hands out, mirroring a typical
/// `MAX_TEXTURE_SIZE`.
pub const MAX_FIELD_DIM: u32 = 8192;

pub struct Field {
    width: u32,
    height: u32,
    texel_size: Vec2,
    format: ChannelFormat,
    filter: FilterMode,
    pub(crate) texels: Vec<Vec4>,
}

impl Field {
    /// Allocate a zero-initialized field.
    pub fn new(width: u32, height: u32, format: ChannelFormat, filter: FilterMode) -> Result<Self, FluidError> {
        if width == 0 || height == 0 {
            return Err(FluidError::InvalidResolution { width, height });
        }
        if width > MAX_FIELD_DIM || height > MAX_FIELD_DIM {
            return Err(FluidError::UnsupportedCapability(format!(
                "field {}x{} exceeds max dimension {}",
                width, height, MAX_FIELD_DIM
            )));
        }

        let size = (width as usize) * (height as usize);
        let mut texels = Vec::new();
        texels
            .try_reserve_exact(size)
            .map_err(|_| FluidError::ResourceExhausted { texels: size })?;
        texels.resize(size, format.cleared());

        Ok(Self {
            width,
            height,
            texel_size: Vec2::new(1.0 / width as f32, 1.0 / height as f32),
            format,
            filter,
            texels,
        })
    }

    // === Dimensions ===
    #[inline]
    pub fn width(&self) -> u32 { self.width }

    #[inline]
    pub fn height(&self) -> u32 { self.height }

    #[inline]
    pub fn size(&self) -> usize { self.texels.len() }

    #[inline]
    pub fn texel_size(&self) -> Vec2 { self.texel_size }

    #[inline]
    pub fn format(&self) -> ChannelFormat { self.format }

    #[inline]
    pub fn filter(&self) -> FilterMode { self.filter }

    /// Width over height.
    #[inline]
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    // === Raw access ===
    pub fn texels(&self) -> &[Vec4] {
        &self.texels
    }

    /// Set one texel directly. Only for seeding fields outside the pass
    /// pipeline (tests, tools); stages always go through a full pass.
    pub fn set(&mut self, x: u32, y: u32, value: Vec4) {
        let idx = self.index(x, y);
        self.texels[idx] = self.format.store(value);
    }

    /// Overwrite every texel. Only for seeding fields outside the pass
    /// pipeline.
    pub fn fill(&mut self, value: Vec4) {
        let stored = self.format.store(value);
        self.texels.fill(stored);
    }

    pub fn clear(&mut self) {
        let cleared = self.format.cleared();
        self.texels.fill(cleared);
    }

    /// Sum of one channel over the whole field.
    pub fn channel_sum(&self, channel: usize) -> f64 {
        self.texels.iter().map(|t| t[channel] as f64).sum()
    }

    /// Largest value of one channel.
    pub fn channel_max(&self, channel: usize) -> f32 {
        self.texels
            .iter()
            .map(|t| t[channel])
            .fold(f32::NEG_INFINITY, f32::max)
    }

    pub fn approx_bytes(&self) -> usize {
        self.size() * self.format.channels() * std::mem::size_of::<f32>()
    }
}
