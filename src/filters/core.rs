//! Core utilities shared by the denoise stages.
//!
//! This module provides:
//! - Spatial tap weights for the 3x3 smoothing window
//! - Clamp-to-edge coordinate lookup
//! - Float to 8-bit sample conversion

/// Radius of the spatial window (3x3).
pub const RADIUS: usize = 1;

/// Window side length.
pub const TAPS: usize = RADIUS * 2 + 1;

/// Standard deviation of the spatial falloff, in samples.
pub const SIGMA: f32 = 1.0;

/// Generate the 3x3 spatial weights for a strength in `0..=100`.
///
/// The center tap always weighs 1.0. Every other tap gets a Gaussian
/// falloff by distance, scaled by `strength / 100`, so strength 0 yields
/// the identity and strength 100 the full Gaussian window.
///
/// # Returns
/// Weights indexed as `[dy + RADIUS][dx + RADIUS]`
pub fn spatial_weights(strength: u8) -> [[f32; TAPS]; TAPS] {
    let scale = strength.min(100) as f32 / 100.0;
    let mut weights = [[0.0f32; TAPS]; TAPS];

    for (ky, row) in weights.iter_mut().enumerate() {
        for (kx, w) in row.iter_mut().enumerate() {
            let dy = ky as f32 - RADIUS as f32;
            let dx = kx as f32 - RADIUS as f32;
            *w = if ky == RADIUS && kx == RADIUS {
                1.0
            } else {
                (-(dx * dx + dy * dy) / (2.0 * SIGMA * SIGMA)).exp() * scale
            };
        }
    }

    weights
}

/// Offset `index` by `offset`, clamped to `0..len`.
///
/// `len` must be non-zero.
#[inline]
pub fn clamp_index(index: usize, offset: isize, len: usize) -> usize {
    (index as isize + offset).clamp(0, len as isize - 1) as usize
}

/// Round to nearest (halves away from zero) and clamp to 0-255.
#[inline]
pub fn round_to_u8(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_strength_is_identity_kernel() {
        let w = spatial_weights(0);
        let total: f32 = w.iter().flatten().sum();
        assert_eq!(w[1][1], 1.0);
        assert_eq!(total, 1.0);
    }

    #[test]
    fn test_full_strength_weights() {
        let w = spatial_weights(100);
        assert!((w[0][1] - (-0.5f32).exp()).abs() < 1e-6);
        assert!((w[0][0] - (-1.0f32).exp()).abs() < 1e-6);
        // Symmetric
        assert_eq!(w[0][0], w[2][2]);
        assert_eq!(w[1][0], w[1][2]);
    }

    #[test]
    fn test_strength_is_capped() {
        assert_eq!(spatial_weights(200), spatial_weights(100));
    }

    #[test]
    fn test_clamp_index() {
        assert_eq!(clamp_index(0, -1, 5), 0);
        assert_eq!(clamp_index(4, 1, 5), 4);
        assert_eq!(clamp_index(2, 1, 5), 3);
        assert_eq!(clamp_index(0, 1, 1), 0);
    }

    #[test]
    fn test_round_to_u8() {
        assert_eq!(round_to_u8(15.5), 16);
        assert_eq!(round_to_u8(15.49), 15);
        assert_eq!(round_to_u8(-3.0), 0);
        assert_eq!(round_to_u8(300.0), 255);
    }
}
