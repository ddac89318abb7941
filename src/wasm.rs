//! WebAssembly exports for the denoiser.
//!
//! These functions are exposed to JavaScript via wasm-bindgen. Planes are
//! passed as tightly packed `u8` buffers (stride = width).

use wasm_bindgen::prelude::*;

use crate::config::DenoiseParams;
use crate::filters::denoise::denoise_u8;
use crate::plane::plane_view;

fn js_error(err: crate::DenoiseError) -> JsError {
    JsError::new(&err.to_string())
}

/// Denoise one plane given its temporal neighbors.
///
/// # Arguments
/// * `current` - Flat plane (length = width * height)
/// * `previous` - Previous frame's plane, or `undefined` at clip start
/// * `next` - Next frame's plane, or `undefined` at clip end
/// * `width` - Plane width in samples
/// * `height` - Plane height in samples
/// * `strength` - Spatial strength (0-100, clamped)
/// * `temporal` - Temporal weight (0.0-1.0, clamped)
///
/// # Returns
/// Flat denoised plane, same length as `current`
#[wasm_bindgen]
pub fn simple_denoise_wasm(
    current: &[u8],
    previous: Option<Vec<u8>>,
    next: Option<Vec<u8>>,
    width: usize,
    height: usize,
    strength: i32,
    temporal: f32,
) -> Result<Vec<u8>, JsError> {
    let params = DenoiseParams::new(strength as i64, temporal as f64);

    let current = plane_view(current, width, height, width).map_err(js_error)?;
    let previous = previous
        .as_deref()
        .map(|p| plane_view(p, width, height, width))
        .transpose()
        .map_err(js_error)?;
    let next = next
        .as_deref()
        .map(|n| plane_view(n, width, height, width))
        .transpose()
        .map_err(js_error)?;

    let result = denoise_u8(current, previous, next, &params).map_err(js_error)?;
    Ok(result.into_raw_vec_and_offset().0)
}
