//! Spatial storage - grid fields and their double-buffered pairs

pub mod field;

pub use field::{ChannelFormat, DoubleBuffer, Field, FieldStore, FilterMode, Neighbors, Resolution};
