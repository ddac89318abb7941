//! Temporal blending stage.
//!
//! The spatially smoothed sample is pulled toward the co-located samples of
//! the neighboring frames. With both neighbors the target is their mean;
//! with one neighbor it is that sample; with none the spatial value passes
//! through untouched.

/// Blend target from the available neighbors.
#[inline]
pub fn temporal_reference(previous: Option<u8>, next: Option<u8>) -> Option<f32> {
    match (previous, next) {
        (Some(p), Some(n)) => Some((p as f32 + n as f32) / 2.0),
        (Some(v), None) | (None, Some(v)) => Some(v as f32),
        (None, None) => None,
    }
}

/// Blend a spatial value toward its temporal reference.
///
/// # Arguments
/// * `spatial` - Spatially smoothed current sample
/// * `previous` - Co-located sample of the previous frame, if any
/// * `next` - Co-located sample of the next frame, if any
/// * `weight` - Temporal weight (0.0-1.0)
#[inline]
pub fn blend(spatial: f32, previous: Option<u8>, next: Option<u8>, weight: f32) -> f32 {
    match temporal_reference(previous, next) {
        Some(reference) => spatial * (1.0 - weight) + reference * weight,
        None => spatial,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_neighbors_use_mean() {
        assert_eq!(temporal_reference(Some(80), Some(120)), Some(100.0));
        assert_eq!(blend(100.0, Some(80), Some(120), 0.5), 100.0);
        assert_eq!(blend(60.0, Some(80), Some(120), 0.5), 80.0);
    }

    #[test]
    fn test_single_neighbor_stands_in_for_mean() {
        assert_eq!(blend(100.0, None, Some(200), 0.25), 125.0);
        assert_eq!(blend(100.0, Some(0), None, 0.5), 50.0);
    }

    #[test]
    fn test_no_neighbors_ignores_weight() {
        assert_eq!(blend(42.5, None, None, 1.0), 42.5);
    }

    #[test]
    fn test_weight_extremes() {
        assert_eq!(blend(33.0, Some(10), Some(21), 0.0), 33.0);
        assert_eq!(blend(33.0, Some(10), Some(21), 1.0), 15.5);
    }
}
