//! Domain - tunables, colors and resolution policy

pub mod color;
pub mod config;
pub mod resolution;

pub use color::{generate_color, hsv_to_rgb, normalize_rgb, pack_abgr};
pub use config::{ConfigPatch, FluidConfig};
pub use resolution::resolution_for;
