//! Spatial smoothing stage.
//!
//! Each sample is replaced by a weighted average of its 3x3 neighborhood in
//! the current plane. Taps past the plane border read the nearest edge
//! sample (clamp-to-edge), so planes as small as 1x1 are valid input.

use ndarray::Array2;

use super::core::{clamp_index, round_to_u8, spatial_weights, RADIUS, TAPS};
use crate::plane::PlaneView;

/// Precomputed spatial window for one strength.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialKernel {
    weights: [[f32; TAPS]; TAPS],
    weight_sum: f32,
    identity: bool,
}

impl SpatialKernel {
    pub fn new(strength: u8) -> Self {
        let weights = spatial_weights(strength);
        let weight_sum: f32 = weights.iter().flatten().sum();
        Self {
            weights,
            weight_sum,
            identity: strength == 0,
        }
    }

    pub fn is_identity(&self) -> bool {
        self.identity
    }

    /// Smoothed value at `(x, y)`, unrounded.
    ///
    /// `(x, y)` must lie inside `plane`.
    #[inline]
    pub fn smooth_at(&self, plane: &PlaneView<'_>, x: usize, y: usize) -> f32 {
        if self.identity {
            return plane[[y, x]] as f32;
        }

        let (height, width) = plane.dim();
        let mut sum = 0.0f32;

        for (ky, row) in self.weights.iter().enumerate() {
            let sy = clamp_index(y, ky as isize - RADIUS as isize, height);
            for (kx, &w) in row.iter().enumerate() {
                let sx = clamp_index(x, kx as isize - RADIUS as isize, width);
                sum += plane[[sy, sx]] as f32 * w;
            }
        }

        sum / self.weight_sum
    }
}

/// Apply the spatial stage alone to a plane.
///
/// # Arguments
/// * `input` - Plane view (height, width)
/// * `strength` - Smoothing strength (0-100)
///
/// # Returns
/// Smoothed plane, tightly packed
pub fn spatial_smooth_u8(input: PlaneView<'_>, strength: u8) -> Array2<u8> {
    let kernel = SpatialKernel::new(strength);
    Array2::from_shape_fn(input.dim(), |(y, x)| {
        round_to_u8(kernel.smooth_at(&input, x, y))
    })
}
