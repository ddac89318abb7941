//! Per-frame denoise filter.
//!
//! [`SimpleDenoise`] ties the pieces together: for each requested index it
//! resolves the frame window, allocates an output frame shaped like the
//! current frame and runs the kernel over every plane. It holds no mutable
//! state, so any number of threads may request frames concurrently.

use std::sync::Arc;

use crate::config::{DenoiseConfig, DenoiseParams, Execution};
use crate::error::{DenoiseError, PlaneRole, Result};
use crate::filters::denoise::denoise_plane_with;
use crate::plane::{Frame, VideoInfo};
use crate::source::{FrameSource, SourceError};
use crate::window::resolve_window;

pub struct SimpleDenoise<S> {
    source: S,
    params: DenoiseParams,
    execution: Execution,
}

impl<S: FrameSource> SimpleDenoise<S> {
    /// Build the filter from host-supplied configuration.
    pub fn new(source: S, config: &DenoiseConfig) -> Self {
        let filter = Self {
            source,
            params: config.params(),
            execution: config.execution(),
        };
        tracing::debug!(
            strength = filter.params.strength(),
            temporal = filter.params.temporal(),
            num_frames = filter.video_info().num_frames,
            "denoise filter created"
        );
        filter
    }

    pub fn with_params(source: S, params: DenoiseParams) -> Self {
        Self {
            source,
            params,
            execution: Execution::Parallel,
        }
    }

    pub fn execution(mut self, execution: Execution) -> Self {
        self.execution = execution;
        self
    }

    pub fn params(&self) -> &DenoiseParams {
        &self.params
    }

    pub fn video_info(&self) -> &VideoInfo {
        self.source.video_info()
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Produce denoised frame `index`.
    ///
    /// Source frames are released before this returns, on success and on
    /// error alike. No output is returned unless every plane succeeded.
    pub fn get_frame(&self, index: usize) -> Result<Frame> {
        let window = resolve_window(&self.source, index)?;
        let mut output = Frame::with_geometry_of(window.current());

        for plane in 0..output.num_planes() {
            let planes = window.plane(plane)?;
            let dst = output.plane_mut(plane).ok_or(DenoiseError::MissingPlane {
                role: PlaneRole::Output,
                plane,
            })?;
            denoise_plane_with(
                planes.current,
                planes.previous,
                planes.next,
                dst.view_mut(),
                &self.params,
                self.execution,
            )?;
            tracing::trace!(index, plane, "plane denoised");
        }

        Ok(output)
    }
}

/// A denoiser is itself a frame source, so filters can be stacked.
impl<S: FrameSource> FrameSource for SimpleDenoise<S> {
    fn video_info(&self) -> &VideoInfo {
        self.source.video_info()
    }

    fn get_frame(&self, index: usize) -> std::result::Result<Arc<Frame>, SourceError> {
        SimpleDenoise::get_frame(self, index)
            .map(Arc::new)
            .map_err(|e| SourceError::Failed(e.to_string()))
    }
}
