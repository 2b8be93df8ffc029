//! Engine error taxonomy.
//!
//! Every variant is fatal for the frame (or the construction) that produced
//! it: a pipeline that failed halfway would feed corrupt fields into the next
//! frame, so nothing here is retried.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FluidError {
    /// The backend cannot provide a field of the requested shape.
    #[error("unsupported capability: {0}")]
    UnsupportedCapability(String),

    /// A stage rejected its build parameters.
    #[error("failed to build {stage} stage: {diagnostic}")]
    ProgramBuild {
        stage: &'static str,
        diagnostic: String,
    },

    #[error("invalid resolution {width}x{height}")]
    InvalidResolution { width: u32, height: u32 },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Field storage could not be allocated.
    #[error("out of field memory allocating {texels} texels")]
    ResourceExhausted { texels: usize },

    #[error("failed to parse config options: {0}")]
    ConfigParse(#[from] serde_json::Error),
}
