//! Dyeflow Engine - stable-fluids dye simulation with bloom, in WASM
//!
//! Architecture:
//! - core/        - errors, logging, indexing macros
//! - spatial/     - fields and read/write field pairs
//! - domain/      - config, colors, resolution scaling
//! - systems/     - stencil stages (advection, vorticity, pressure, splat, bloom)
//! - simulation/  - per-frame stepper and the JS facade

// Utils with safety macros (must be first for macro export!)
#[macro_use]
pub mod core;
pub mod spatial;
pub mod domain;
pub mod systems;
pub mod simulation;

use wasm_bindgen::prelude::*;

// Re-export wasm-bindgen-rayon for thread pool initialization
#[cfg(feature = "parallel")]
pub use wasm_bindgen_rayon::init_thread_pool;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    crate::core::logging::install(log::LevelFilter::Info);
    log::info!("dyeflow engine {} initialized", env!("CARGO_PKG_VERSION"));
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use crate::core::FluidError;
pub use crate::domain::{ConfigPatch, FluidConfig};
pub use crate::simulation::{FluidCore, FluidSimulation, FramePhase, PerfStats};
