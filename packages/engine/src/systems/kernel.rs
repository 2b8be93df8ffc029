//! KernelStage - one full-grid stencil pass
//!
//! A kernel computes one output texel from read-only inputs. `run_pass`
//! evaluates it for every cell of the target, row by row in parallel when the
//! `parallel` feature is on. Inputs are shared borrows and the target is an
//! exclusive borrow, so a kernel can never sample the field it writes.

use glam::{Vec2, Vec4};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::spatial::{DoubleBuffer, Field};

/// The cell being shaded: integer coordinates in the target and the
/// normalized texel centre.
#[derive(Clone, Copy, Debug)]
pub struct Cell {
    pub x: u32,
    pub y: u32,
    pub uv: Vec2,
}

pub trait Kernel: Sync {
    fn shade(&self, cell: Cell) -> Vec4;
}

/// Evaluate `kernel` over every cell of `target`. Returns once every row has
/// been written.
pub fn run_pass<K: Kernel + ?Sized>(kernel: &K, target: &mut Field) {
    let width = target.width() as usize;
    let texel = target.texel_size();
    let format = target.format();

    let shade_row = |(y, row): (usize, &mut [Vec4])| {
        let v = (y as f32 + 0.5) * texel.y;
        for (x, out) in row.iter_mut().enumerate() {
            let cell = Cell {
                x: x as u32,
                y: y as u32,
                uv: Vec2::new((x as f32 + 0.5) * texel.x, v),
            };
            *out = format.store(kernel.shade(cell));
        }
    };

    #[cfg(feature = "parallel")]
    {
        target.texels.par_chunks_mut(width).enumerate().for_each(shade_row);
    }

    #[cfg(not(feature = "parallel"))]
    {
        target.texels.chunks_mut(width).enumerate().for_each(shade_row);
    }
}

impl DoubleBuffer {
    /// Run `render` from the read side into the write side, then swap.
    pub fn pass<F>(&mut self, render: F)
    where
        F: FnOnce(&Field, &mut Field),
    {
        {
            let (read, write) = self.split();
            render(read, write);
        }
        self.swap();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::{ChannelFormat, FilterMode};

    struct Coordinates;

    impl Kernel for Coordinates {
        fn shade(&self, cell: Cell) -> Vec4 {
            Vec4::new(cell.x as f32, cell.y as f32, cell.uv.x, cell.uv.y)
        }
    }

    struct AddOne<'a> {
        source: &'a Field,
    }

    impl Kernel for AddOne<'_> {
        fn shade(&self, cell: Cell) -> Vec4 {
            self.source.get(cell.x, cell.y) + Vec4::ONE
        }
    }

    #[test]
    fn pass_writes_every_cell_with_texel_centres() {
        let mut field = Field::new(4, 2, ChannelFormat::RGBA, FilterMode::Nearest).unwrap();
        run_pass(&Coordinates, &mut field);

        assert_eq!(field.get(3, 1), Vec4::new(3.0, 1.0, 0.875, 0.75));
        assert_eq!(field.get(0, 0), Vec4::new(0.0, 0.0, 0.125, 0.25));
    }

    #[test]
    fn pass_respects_channel_format() {
        let mut field = Field::new(2, 2, ChannelFormat::R, FilterMode::Nearest).unwrap();
        run_pass(&Coordinates, &mut field);
        assert_eq!(field.get(1, 1), Vec4::new(1.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn double_buffer_pass_reads_previous_and_swaps() {
        let mut pair = DoubleBuffer::new(3, 3, ChannelFormat::RGBA, FilterMode::Nearest).unwrap();
        pair.pass(|read, write| run_pass(&AddOne { source: read }, write));
        pair.pass(|read, write| run_pass(&AddOne { source: read }, write));
        assert_eq!(pair.read().get(1, 1), Vec4::splat(2.0));
        assert_eq!(pair.write().get(1, 1), Vec4::splat(1.0));
    }
}
