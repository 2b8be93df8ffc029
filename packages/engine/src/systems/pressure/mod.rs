//! PressureSolver - projection of velocity onto its divergence-free part
//!
//! divergence -> pressure warm-start decay -> N Jacobi sweeps -> gradient
//! subtraction. The sweep count is a quality knob; no residual is checked.

#[path = "divergence.rs"]
mod divergence;
#[path = "jacobi.rs"]
mod jacobi;
#[path = "gradient.rs"]
mod gradient;

pub use divergence::{divergence_norm, DivergenceKernel};
pub use gradient::GradientKernel;
pub use jacobi::{DecayKernel, JacobiKernel};

use crate::core::FluidError;
use crate::spatial::{DoubleBuffer, Field};

use super::kernel::run_pass;

#[derive(Clone, Copy, Debug)]
pub struct PressureSolver {
    pub iterations: u32,
    /// Warm-start factor applied to last frame's pressure before iterating.
    pub dissipation: f32,
}

impl PressureSolver {
    pub fn new(iterations: u32, dissipation: f32) -> Self {
        Self { iterations, dissipation }
    }

    /// Checked constructor for solvers built from host options.
    pub fn build(iterations: u32, dissipation: f32) -> Result<Self, FluidError> {
        if !dissipation.is_finite() || !(0.0..=1.0).contains(&dissipation) {
            return Err(FluidError::ProgramBuild {
                stage: "pressure",
                diagnostic: format!("warm-start factor {dissipation} outside [0, 1]"),
            });
        }
        Ok(Self::new(iterations, dissipation))
    }

    pub fn project(&self, velocity: &mut DoubleBuffer, pressure: &mut DoubleBuffer, divergence: &mut Field) {
        run_pass(&DivergenceKernel { velocity: velocity.read() }, divergence);

        let factor = self.dissipation;
        pressure.pass(|read, write| run_pass(&DecayKernel { source: read, factor }, write));

        let divergence: &Field = divergence;
        for _ in 0..self.iterations {
            pressure.pass(|read, write| run_pass(&JacobiKernel { pressure: read, divergence }, write));
        }

        let pressure = pressure.read();
        velocity.pass(|read, write| run_pass(&GradientKernel { pressure, velocity: read }, write));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::{ChannelFormat, FilterMode};
    use glam::Vec4;

    const N: u32 = 64;

    /// Smooth source: a Gaussian outflow centred in the grid plus a weaker
    /// off-centre sink.
    fn diverging_velocity() -> DoubleBuffer {
        let mut velocity = DoubleBuffer::new(N, N, ChannelFormat::RG, FilterMode::Linear).unwrap();
        let field = velocity.read_mut();
        for y in 0..N {
            for x in 0..N {
                let (dx, dy) = (x as f32 - 32.0, y as f32 - 32.0);
                let src = (-(dx * dx + dy * dy) / 64.0).exp();
                let (ex, ey) = (x as f32 - 20.0, y as f32 - 44.0);
                let sink = 0.5 * (-(ex * ex + ey * ey) / 36.0).exp();
                field.set(x, y, Vec4::new(dx * src - ex * sink, dy * src - ey * sink, 0.0, 1.0));
            }
        }
        velocity
    }

    fn divergence_after(iterations: u32) -> f64 {
        let mut velocity = diverging_velocity();
        let mut pressure = DoubleBuffer::new(N, N, ChannelFormat::R, FilterMode::Nearest).unwrap();
        let mut divergence = Field::new(N, N, ChannelFormat::R, FilterMode::Nearest).unwrap();
        PressureSolver::new(iterations, 0.8).project(&mut velocity, &mut pressure, &mut divergence);
        divergence_norm(velocity.read())
    }

    #[test]
    fn projection_reduces_divergence_monotonically_with_iterations() {
        let before = divergence_norm(diverging_velocity().read());
        let d0 = divergence_after(0);
        let d1 = divergence_after(1);
        let d10 = divergence_after(10);
        let d50 = divergence_after(50);

        assert!(before > 0.0);
        // Zero sweeps leaves a zero pressure field, so nothing is subtracted.
        assert!((d0 - before).abs() < 1e-9 * before.max(1.0));
        assert!(d1 < d0, "d1={d1} d0={d0}");
        assert!(d10 < d1, "d10={d10} d1={d1}");
        assert!(d50 < d10, "d50={d50} d10={d10}");
        assert!(d50 < before);
    }

    #[test]
    fn build_rejects_bad_warm_start() {
        assert!(PressureSolver::build(20, 0.8).is_ok());
        let err = PressureSolver::build(20, f32::NAN).unwrap_err();
        assert!(matches!(err, FluidError::ProgramBuild { stage: "pressure", .. }));
        assert!(PressureSolver::build(20, 1.5).is_err());
    }

    #[test]
    fn warm_start_decays_previous_pressure() {
        let mut velocity = DoubleBuffer::new(8, 8, ChannelFormat::RG, FilterMode::Linear).unwrap();
        let mut pressure = DoubleBuffer::new(8, 8, ChannelFormat::R, FilterMode::Nearest).unwrap();
        pressure.read_mut().fill(Vec4::new(2.0, 0.0, 0.0, 1.0));
        let mut divergence = Field::new(8, 8, ChannelFormat::R, FilterMode::Nearest).unwrap();

        PressureSolver::new(0, 0.5).project(&mut velocity, &mut pressure, &mut divergence);

        for t in pressure.read().texels() {
            assert!((t.x - 1.0).abs() < 1e-6);
        }
        // Uniform pressure has no gradient.
        for t in velocity.read().texels() {
            assert_eq!(t.x, 0.0);
            assert_eq!(t.y, 0.0);
        }
    }
}
