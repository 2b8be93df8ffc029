//! FieldStore - every field the stepper owns
//!
//! Two resolution classes: simulation fields (velocity, pressure, divergence,
//! curl) and dye fields. A stencil pass never mixes classes in its output.

use crate::core::FluidError;

use super::{ChannelFormat, DoubleBuffer, Field, FilterMode};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn cells(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }
}

pub struct FieldStore {
    sim: Resolution,
    dye_res: Resolution,
    pub velocity: DoubleBuffer,
    pub dye: DoubleBuffer,
    pub pressure: DoubleBuffer,
    pub divergence: Field,
    pub curl: Field,
}

impl FieldStore {
    /// Allocate every field empty at the given resolutions.
    pub fn allocate(sim: Resolution, dye: Resolution) -> Result<Self, FluidError> {
        Ok(Self {
            sim,
            dye_res: dye,
            velocity: DoubleBuffer::new(sim.width, sim.height, ChannelFormat::RG, FilterMode::Linear)?,
            dye: DoubleBuffer::new(dye.width, dye.height, ChannelFormat::RGBA, FilterMode::Linear)?,
            pressure: DoubleBuffer::new(sim.width, sim.height, ChannelFormat::R, FilterMode::Nearest)?,
            divergence: Field::new(sim.width, sim.height, ChannelFormat::R, FilterMode::Nearest)?,
            curl: Field::new(sim.width, sim.height, ChannelFormat::R, FilterMode::Nearest)?,
        })
    }

    pub fn sim_resolution(&self) -> Resolution { self.sim }

    pub fn dye_resolution(&self) -> Resolution { self.dye_res }

    pub fn clear(&mut self) {
        self.velocity.clear();
        self.dye.clear();
        self.pressure.clear();
        self.divergence.clear();
        self.curl.clear();
    }

    pub fn approx_bytes(&self) -> usize {
        self.velocity.approx_bytes()
            + self.dye.approx_bytes()
            + self.pressure.approx_bytes()
            + self.divergence.approx_bytes()
            + self.curl.approx_bytes()
    }
}
