//! Systems - the stencil stages of the fluid pipeline
//!
//! Every stage is a pure function of its input fields and parameters that
//! writes one output field in full. The stepper decides the order.

pub mod kernel;
pub mod advection;
pub mod vorticity;
pub mod pressure;
pub mod splat;
pub mod bloom;
pub mod particles;

pub use kernel::{run_pass, Cell, Kernel};
pub use bloom::BloomCompositor;
pub use particles::{Particle, ParticleOverlay, VelocitySampler};
pub use pressure::PressureSolver;
