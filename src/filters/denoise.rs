//! Spatial + temporal denoise kernel.
//!
//! Every output sample is computed independently from the co-located
//! samples of the previous/current/next planes (plus the 3x3 neighborhood
//! in the current plane), so rows can be handed to rayon in any order and
//! the result is identical to a sequential pass.
//!
//! Input planes are only borrowed immutably; the output plane is written
//! row by row.

use ndarray::parallel::prelude::*;
use ndarray::{Array2, ArrayViewMut1, Axis};

use super::core::round_to_u8;
use super::spatial::SpatialKernel;
use super::temporal::blend;
use crate::config::{DenoiseParams, Execution};
use crate::error::{DenoiseError, Dimensions, PlaneRole, Result};
use crate::plane::{PlaneView, PlaneViewMut};

fn check_dimensions(
    expected: Dimensions,
    role: PlaneRole,
    dim: (usize, usize),
) -> Result<()> {
    let actual = Dimensions::new(dim.1, dim.0);
    if actual != expected {
        return Err(DenoiseError::DimensionMismatch {
            role,
            expected,
            actual,
        });
    }
    Ok(())
}

fn denoise_row(
    y: usize,
    mut row: ArrayViewMut1<'_, u8>,
    current: &PlaneView<'_>,
    previous: Option<&PlaneView<'_>>,
    next: Option<&PlaneView<'_>>,
    spatial: &SpatialKernel,
    temporal: f32,
) {
    for (x, out) in row.iter_mut().enumerate() {
        let s = spatial.smooth_at(current, x, y);
        let p = previous.map(|plane| plane[[y, x]]);
        let n = next.map(|plane| plane[[y, x]]);
        *out = round_to_u8(blend(s, p, n, temporal));
    }
}

/// Denoise one plane into `output` using the row-parallel path.
///
/// # Arguments
/// * `current` - Plane being filtered (height, width)
/// * `previous` - Same plane of the previous frame, `None` at clip start
/// * `next` - Same plane of the next frame, `None` at clip end
/// * `output` - Destination, same width and height as `current`
/// * `params` - Strength and temporal weight
///
/// # Errors
/// `DimensionMismatch` if any plane disagrees with `current` on width or
/// height. Nothing is written in that case.
pub fn denoise_plane(
    current: PlaneView<'_>,
    previous: Option<PlaneView<'_>>,
    next: Option<PlaneView<'_>>,
    output: PlaneViewMut<'_>,
    params: &DenoiseParams,
) -> Result<()> {
    denoise_plane_with(current, previous, next, output, params, Execution::Parallel)
}

/// Denoise one plane into `output` with an explicit execution mode.
pub fn denoise_plane_with(
    current: PlaneView<'_>,
    previous: Option<PlaneView<'_>>,
    next: Option<PlaneView<'_>>,
    mut output: PlaneViewMut<'_>,
    params: &DenoiseParams,
    execution: Execution,
) -> Result<()> {
    let (height, width) = current.dim();
    let expected = Dimensions::new(width, height);
    if let Some(plane) = &previous {
        check_dimensions(expected, PlaneRole::Previous, plane.dim())?;
    }
    if let Some(plane) = &next {
        check_dimensions(expected, PlaneRole::Next, plane.dim())?;
    }
    check_dimensions(expected, PlaneRole::Output, output.dim())?;

    let spatial = SpatialKernel::new(params.strength());
    let temporal = params.temporal();
    let previous = previous.as_ref();
    let next = next.as_ref();

    match execution {
        Execution::Parallel => output
            .axis_iter_mut(Axis(0))
            .into_par_iter()
            .enumerate()
            .for_each(|(y, row)| {
                denoise_row(y, row, &current, previous, next, &spatial, temporal)
            }),
        Execution::Sequential => {
            for (y, row) in output.axis_iter_mut(Axis(0)).enumerate() {
                denoise_row(y, row, &current, previous, next, &spatial, temporal);
            }
        }
    }

    Ok(())
}

/// Denoise one plane into a newly allocated, tightly packed array.
///
/// # Returns
/// Denoised plane with the same width and height as `current`
pub fn denoise_u8(
    current: PlaneView<'_>,
    previous: Option<PlaneView<'_>>,
    next: Option<PlaneView<'_>>,
    params: &DenoiseParams,
) -> Result<Array2<u8>> {
    let mut output = Array2::<u8>::zeros(current.dim());
    denoise_plane(current, previous, next, output.view_mut(), params)?;
    Ok(output)
}
