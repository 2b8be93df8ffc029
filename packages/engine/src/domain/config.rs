//! Engine configuration.
//!
//! The stepper holds one `FluidConfig` by value. External controllers send
//! partial options (`ConfigPatch`, usually as JSON from the UI); the patch is
//! merged into a copy, validated, and the copy replaces the old config
//! between frames.

use serde::{Deserialize, Serialize};

use crate::core::FluidError;
use crate::spatial::field::MAX_FIELD_DIM;

pub const MAX_PRESSURE_ITERATIONS: u32 = 1000;
pub const MAX_BLOOM_ITERATIONS: u32 = 16;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FluidConfig {
    /// Short-side resolution of velocity/pressure fields.
    pub sim_resolution: u32,
    /// Short-side resolution of the dye field.
    pub dye_resolution: u32,
    /// Per-pass dye multiplier, in (0, 1].
    pub density_dissipation: f32,
    /// Per-pass velocity multiplier, in (0, 1].
    pub velocity_dissipation: f32,
    /// Warm-start decay applied to last frame's pressure.
    pub pressure_dissipation: f32,
    pub pressure_iterations: u32,
    /// Vorticity confinement strength.
    pub curl: f32,
    /// Splat radius in percent of the screen.
    pub splat_radius: f32,
    /// Velocity gain applied to splat forces (pointer delta in uv units).
    pub splat_force: f32,
    pub shading: bool,
    pub colorful: bool,
    pub color_update_speed: f32,
    pub paused: bool,
    pub back_color: [u8; 3],
    pub transparent: bool,
    pub bloom: bool,
    pub bloom_iterations: u32,
    pub bloom_resolution: u32,
    pub bloom_intensity: f32,
    pub bloom_threshold: f32,
    pub bloom_soft_knee: f32,
    /// Ceiling on the integration step, seconds.
    pub max_dt: f32,
    /// Minimum pointer delta length (uv units) that produces a drag splat.
    pub pointer_speed_threshold: f32,
    /// Per-frame probability of one ambient random splat.
    pub random_splat_chance: f32,
    /// Excitation level that triggers an audio splat.
    pub audio_threshold: f32,
    pub audio_force_gain: f32,
}

impl Default for FluidConfig {
    fn default() -> Self {
        Self {
            sim_resolution: 128,
            dye_resolution: 512,
            density_dissipation: 0.97,
            velocity_dissipation: 0.98,
            pressure_dissipation: 0.8,
            pressure_iterations: 20,
            curl: 30.0,
            splat_radius: 0.25,
            splat_force: 6000.0,
            shading: true,
            colorful: true,
            color_update_speed: 10.0,
            paused: false,
            back_color: [0, 0, 0],
            transparent: false,
            bloom: true,
            bloom_iterations: 8,
            bloom_resolution: 256,
            bloom_intensity: 0.8,
            bloom_threshold: 0.6,
            bloom_soft_knee: 0.7,
            max_dt: 1.0 / 60.0,
            pointer_speed_threshold: 1e-5,
            random_splat_chance: 0.002,
            audio_threshold: 0.6,
            audio_force_gain: 4.0,
        }
    }
}

impl FluidConfig {
    pub fn from_json(json: &str) -> Result<Self, FluidError> {
        let config: FluidConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn validate(&self) -> Result<(), FluidError> {
        fn unit_interval(name: &str, v: f32) -> Result<(), FluidError> {
            if v > 0.0 && v <= 1.0 {
                Ok(())
            } else {
                Err(FluidError::InvalidConfig(format!("{} must be in (0, 1], got {}", name, v)))
            }
        }
        fn probability(name: &str, v: f32) -> Result<(), FluidError> {
            if (0.0..=1.0).contains(&v) {
                Ok(())
            } else {
                Err(FluidError::InvalidConfig(format!("{} must be in [0, 1], got {}", name, v)))
            }
        }
        fn non_negative(name: &str, v: f32) -> Result<(), FluidError> {
            if v >= 0.0 && v.is_finite() {
                Ok(())
            } else {
                Err(FluidError::InvalidConfig(format!("{} must be finite and >= 0, got {}", name, v)))
            }
        }

        for (name, res) in [
            ("sim_resolution", self.sim_resolution),
            ("dye_resolution", self.dye_resolution),
            ("bloom_resolution", self.bloom_resolution),
        ] {
            if res == 0 || res > MAX_FIELD_DIM {
                return Err(FluidError::InvalidConfig(format!(
                    "{} must be in 1..={}, got {}",
                    name, MAX_FIELD_DIM, res
                )));
            }
        }

        unit_interval("density_dissipation", self.density_dissipation)?;
        unit_interval("velocity_dissipation", self.velocity_dissipation)?;
        probability("pressure_dissipation", self.pressure_dissipation)?;
        probability("random_splat_chance", self.random_splat_chance)?;
        probability("audio_threshold", self.audio_threshold)?;

        if self.pressure_iterations > MAX_PRESSURE_ITERATIONS {
            return Err(FluidError::InvalidConfig(format!(
                "pressure_iterations must be <= {}, got {}",
                MAX_PRESSURE_ITERATIONS, self.pressure_iterations
            )));
        }
        if self.bloom_iterations > MAX_BLOOM_ITERATIONS {
            return Err(FluidError::InvalidConfig(format!(
                "bloom_iterations must be <= {}, got {}",
                MAX_BLOOM_ITERATIONS, self.bloom_iterations
            )));
        }

        non_negative("curl", self.curl)?;
        non_negative("splat_radius", self.splat_radius)?;
        non_negative("splat_force", self.splat_force)?;
        non_negative("color_update_speed", self.color_update_speed)?;
        non_negative("bloom_intensity", self.bloom_intensity)?;
        non_negative("bloom_threshold", self.bloom_threshold)?;
        non_negative("bloom_soft_knee", self.bloom_soft_knee)?;
        non_negative("pointer_speed_threshold", self.pointer_speed_threshold)?;
        non_negative("audio_force_gain", self.audio_force_gain)?;

        if !(self.max_dt > 0.0 && self.max_dt.is_finite()) {
            return Err(FluidError::InvalidConfig(format!("max_dt must be > 0, got {}", self.max_dt)));
        }
        Ok(())
    }

    /// Whether switching from `self` to `next` needs the simulation fields
    /// reallocated.
    pub fn needs_field_realloc(&self, next: &FluidConfig) -> bool {
        self.sim_resolution != next.sim_resolution || self.dye_resolution != next.dye_resolution
    }

    pub fn needs_bloom_rebuild(&self, next: &FluidConfig) -> bool {
        self.bloom_resolution != next.bloom_resolution || self.bloom_iterations != next.bloom_iterations
    }
}

/// Partial options; every `Some` field overrides the current value.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigPatch {
    pub sim_resolution: Option<u32>,
    pub dye_resolution: Option<u32>,
    pub density_dissipation: Option<f32>,
    pub velocity_dissipation: Option<f32>,
    pub pressure_dissipation: Option<f32>,
    pub pressure_iterations: Option<u32>,
    pub curl: Option<f32>,
    pub splat_radius: Option<f32>,
    pub splat_force: Option<f32>,
    pub shading: Option<bool>,
    pub colorful: Option<bool>,
    pub color_update_speed: Option<f32>,
    pub paused: Option<bool>,
    pub back_color: Option<[u8; 3]>,
    pub transparent: Option<bool>,
    pub bloom: Option<bool>,
    pub bloom_iterations: Option<u32>,
    pub bloom_resolution: Option<u32>,
    pub bloom_intensity: Option<f32>,
    pub bloom_threshold: Option<f32>,
    pub bloom_soft_knee: Option<f32>,
    pub max_dt: Option<f32>,
    pub pointer_speed_threshold: Option<f32>,
    pub random_splat_chance: Option<f32>,
    pub audio_threshold: Option<f32>,
    pub audio_force_gain: Option<f32>,
}

macro_rules! merge_fields {
    ($patch:expr, $config:expr, $($field:ident),* $(,)?) => {
        $(
            if let Some(v) = $patch.$field {
                $config.$field = v;
            }
        )*
    };
}

impl ConfigPatch {
    pub fn from_json(json: &str) -> Result<Self, FluidError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Merge into a copy of `base`; `base` itself is untouched.
    pub fn merged_into(&self, base: &FluidConfig) -> FluidConfig {
        let mut next = base.clone();
        merge_fields!(
            self,
            next,
            sim_resolution,
            dye_resolution,
            density_dissipation,
            velocity_dissipation,
            pressure_dissipation,
            pressure_iterations,
            curl,
            splat_radius,
            splat_force,
            shading,
            colorful,
            color_update_speed,
            paused,
            back_color,
            transparent,
            bloom,
            bloom_iterations,
            bloom_resolution,
            bloom_intensity,
            bloom_threshold,
            bloom_soft_knee,
            max_dt,
            pointer_speed_threshold,
            random_splat_chance,
            audio_threshold,
            audio_force_gain,
        );
        next
    }
}
