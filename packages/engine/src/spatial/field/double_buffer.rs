use glam::Vec2;

use crate::core::FluidError;

use super::{ChannelFormat, Field, FilterMode};

/// Read/write pair of equally sized fields.
///
/// A pass samples `read` and writes `write`, then [`DoubleBuffer::swap`]
/// makes the result readable. Handing out `&Field` for one side and
/// `&mut Field` for the other through [`DoubleBuffer::split`] is what keeps a
/// pass from ever sampling the texels it is writing.
pub struct DoubleBuffer {
    read: Field,
    write: Field,
}

impl DoubleBuffer {
    pub fn new(width: u32, height: u32, format: ChannelFormat, filter: FilterMode) -> Result<Self, FluidError> {
        Ok(Self {
            read: Field::new(width, height, format, filter)?,
            write: Field::new(width, height, format, filter)?,
        })
    }

    #[inline]
    pub fn read(&self) -> &Field {
        &self.read
    }

    #[inline]
    pub fn write(&self) -> &Field {
        &self.write
    }

    /// Mutable access to the readable side, for seeding state outside the
    /// pipeline.
    pub fn read_mut(&mut self) -> &mut Field {
        &mut self.read
    }

    /// Borrow the read side for sampling and the write side as the pass
    /// target at the same time.
    #[inline]
    pub fn split(&mut self) -> (&Field, &mut Field) {
        (&self.read, &mut self.write)
    }

    /// Exchange roles. Moves the two field headers only, texel storage stays
    /// where it is.
    #[inline]
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.read, &mut self.write);
    }

    #[inline]
    pub fn width(&self) -> u32 { self.read.width() }

    #[inline]
    pub fn height(&self) -> u32 { self.read.height() }

    #[inline]
    pub fn texel_size(&self) -> Vec2 { self.read.texel_size() }

    pub fn clear(&mut self) {
        self.read.clear();
        self.write.clear();
    }

    pub fn approx_bytes(&self) -> usize {
        self.read.approx_bytes() + self.write.approx_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swap_twice_restores_assignment() {
        let mut pair = DoubleBuffer::new(8, 4, ChannelFormat::RG, FilterMode::Linear).unwrap();
        let read_ptr = pair.read().texels().as_ptr();
        let write_ptr = pair.write().texels().as_ptr();

        pair.swap();
        assert_eq!(pair.read().texels().as_ptr(), write_ptr);
        assert_eq!(pair.write().texels().as_ptr(), read_ptr);

        pair.swap();
        assert_eq!(pair.read().texels().as_ptr(), read_ptr);
        assert_eq!(pair.write().texels().as_ptr(), write_ptr);
    }

    #[test]
    fn texel_size_is_reciprocal_resolution() {
        let pair = DoubleBuffer::new(8, 4, ChannelFormat::RGBA, FilterMode::Linear).unwrap();
        assert_eq!(pair.texel_size(), Vec2::new(0.125, 0.25));
    }

    #[test]
    fn zero_sized_pair_is_rejected() {
        let result = DoubleBuffer::new(0, 4, ChannelFormat::R, FilterMode::Nearest);
        assert!(matches!(result, Err(FluidError::InvalidResolution { .. })));
    }
}
