//! SimpleDenoise Rust Core
//!
//! Spatial + temporal video denoiser working on a sliding window of three
//! frames (previous, current, next), with Python bindings via PyO3 and WASM
//! bindings for JavaScript.
//!
//! ## Plane Format
//! Every plane is an 8-bit grid `(height, width)` whose rows may be padded
//! (stride >= width). Frames are lists of planes; each plane is processed
//! independently, so luma, chroma or any other planar layout works alike.
//!
//! ## Pipeline
//! 1. [`window::resolve_window`] fetches frame `n` and its existing
//!    neighbors from a [`source::FrameSource`]
//! 2. [`filters::denoise`] smooths the current plane spatially, then blends
//!    it toward the neighbors' mean by the temporal weight
//! 3. [`filter::SimpleDenoise`] returns the finished frame
//!
//! Parameters ([`config::DenoiseParams`]) are clamped once at construction
//! and shared read-only by all frame requests.

pub mod config;
pub mod error;
pub mod filter;
pub mod filters;
pub mod plane;
pub mod source;
pub mod window;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use config::{DenoiseConfig, DenoiseParams, Execution};
pub use error::{DenoiseError, Dimensions, PlaneRole, Result};
pub use filter::SimpleDenoise;
pub use filters::denoise::{denoise_plane, denoise_plane_with, denoise_u8};
pub use plane::{
    plane_view, plane_view_mut, Frame, Plane, PlaneView, PlaneViewMut, VideoFormat, VideoInfo,
};
pub use source::{FrameSource, InMemorySource, SourceError};
pub use window::{resolve_window, FrameWindow, PlaneWindow};

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use ndarray::{Array3, Axis};
    use numpy::{IntoPyArray, PyArray2, PyArray3, PyReadonlyArray2, PyReadonlyArray3};
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;

    use crate::config::{DEFAULT_STRENGTH, DEFAULT_TEMPORAL};
    use crate::{
        denoise_u8, DenoiseError, DenoiseParams, Frame, InMemorySource, Plane, SimpleDenoise,
        VideoFormat, VideoInfo,
    };

    fn to_py_err(err: DenoiseError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }

    // ========================================================================
    // Single Plane
    // ========================================================================

    /// Denoise one plane given its temporal neighbors.
    ///
    /// # Arguments
    /// * `current` - Plane (height, width) as uint8
    /// * `previous` - Same plane of the previous frame, or None
    /// * `next` - Same plane of the next frame, or None
    /// * `strength` - Spatial strength (0-100, clamped)
    /// * `temporal` - Temporal weight (0.0-1.0, clamped)
    #[pyfunction]
    #[pyo3(signature = (current, previous=None, next=None, strength=DEFAULT_STRENGTH, temporal=DEFAULT_TEMPORAL))]
    pub fn simple_denoise<'py>(
        py: Python<'py>,
        current: PyReadonlyArray2<'py, u8>,
        previous: Option<PyReadonlyArray2<'py, u8>>,
        next: Option<PyReadonlyArray2<'py, u8>>,
        strength: i64,
        temporal: f64,
    ) -> PyResult<Bound<'py, PyArray2<u8>>> {
        let params = DenoiseParams::new(strength, temporal);
        let current = current.as_array();
        let previous = previous.as_ref().map(|p| p.as_array());
        let next = next.as_ref().map(|n| n.as_array());

        let result = py
            .allow_threads(|| denoise_u8(current, previous, next, &params))
            .map_err(to_py_err)?;
        Ok(result.into_pyarray(py))
    }

    // ========================================================================
    // Whole Clip
    // ========================================================================

    /// Denoise a stack of single-plane frames (frames, height, width).
    ///
    /// Frame 0 has no previous neighbor and the last frame no next one.
    #[pyfunction]
    #[pyo3(signature = (frames, strength=DEFAULT_STRENGTH, temporal=DEFAULT_TEMPORAL))]
    pub fn simple_denoise_clip<'py>(
        py: Python<'py>,
        frames: PyReadonlyArray3<'py, u8>,
        strength: i64,
        temporal: f64,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let input = frames.as_array();
        let (num_frames, height, width) = input.dim();

        let info = VideoInfo {
            format: VideoFormat::GRAY8,
            width,
            height,
            num_frames,
        };
        let clip: Vec<Frame> = input
            .axis_iter(Axis(0))
            .map(|plane| Frame::new(vec![Plane::from_view(plane)]))
            .collect();
        let filter = SimpleDenoise::with_params(
            InMemorySource::new(info, clip),
            DenoiseParams::new(strength, temporal),
        );

        let mut output = Array3::<u8>::zeros((num_frames, height, width));
        py.allow_threads(|| -> crate::Result<()> {
            for (n, mut dst) in output.axis_iter_mut(Axis(0)).enumerate() {
                let frame = filter.get_frame(n)?;
                if let Some(plane) = frame.plane(0) {
                    dst.assign(&plane.view());
                }
            }
            Ok(())
        })
        .map_err(to_py_err)?;

        Ok(output.into_pyarray(py))
    }

    /// SimpleDenoise Rust extension module
    #[pymodule]
    pub fn sden_rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(simple_denoise, m)?)?;
        m.add_function(wrap_pyfunction!(simple_denoise_clip, m)?)?;
        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::sden_rust;
