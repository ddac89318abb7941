//! Filter configuration.
//!
//! The host hands over an optional `strength` and `temporal` once, when the
//! filter is built. [`DenoiseConfig`] mirrors that parameter map as it
//! arrives (every field optional); [`DenoiseParams`] is the clamped,
//! immutable value that every frame computation reads.

use serde::Deserialize;

/// Default spatial strength when the host does not supply one.
pub const DEFAULT_STRENGTH: i64 = 20;
/// Default temporal weight when the host does not supply one.
pub const DEFAULT_TEMPORAL: f64 = 0.4;

pub const MAX_STRENGTH: u8 = 100;

/// How the kernel walks a plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Execution {
    /// Rows are distributed over the rayon thread pool.
    #[default]
    Parallel,
    /// Rows are processed in order on the calling thread.
    Sequential,
}

/// Parameters as supplied by the host; missing values take defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DenoiseConfig {
    pub strength: Option<i64>,
    pub temporal: Option<f64>,
    pub parallel: Option<bool>,
}

impl DenoiseConfig {
    pub fn params(&self) -> DenoiseParams {
        DenoiseParams::new(
            self.strength.unwrap_or(DEFAULT_STRENGTH),
            self.temporal.unwrap_or(DEFAULT_TEMPORAL),
        )
    }

    pub fn execution(&self) -> Execution {
        match self.parallel {
            Some(false) => Execution::Sequential,
            _ => Execution::Parallel,
        }
    }
}

/// Validated filter parameters.
///
/// `strength` lies in `0..=100` and `temporal` in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DenoiseParams {
    strength: u8,
    temporal: f32,
}

impl DenoiseParams {
    /// Build parameters, clamping both values into their valid domain.
    pub fn new(strength: i64, temporal: f64) -> Self {
        let clamped_strength = strength.clamp(0, MAX_STRENGTH as i64);
        if clamped_strength != strength {
            tracing::warn!(strength, clamped = clamped_strength, "strength clamped to 0..=100");
        }

        let clamped_temporal = if temporal.is_nan() {
            tracing::warn!(default = DEFAULT_TEMPORAL, "temporal is NaN, using default");
            DEFAULT_TEMPORAL
        } else {
            let t = temporal.clamp(0.0, 1.0);
            if t != temporal {
                tracing::warn!(temporal, clamped = t, "temporal clamped to 0.0..=1.0");
            }
            t
        };

        Self {
            strength: clamped_strength as u8,
            temporal: clamped_temporal as f32,
        }
    }

    pub fn strength(&self) -> u8 {
        self.strength
    }

    pub fn temporal(&self) -> f32 {
        self.temporal
    }
}

impl Default for DenoiseParams {
    fn default() -> Self {
        Self::new(DEFAULT_STRENGTH, DEFAULT_TEMPORAL)
    }
}
