//! Upstream frame sources.

use std::sync::Arc;

use thiserror::Error;

use crate::plane::{Frame, VideoInfo};

#[derive(Debug, Clone, Error)]
pub enum SourceError {
    #[error("frame {0} is not available")]
    Missing(usize),
    #[error("{0}")]
    Failed(String),
}

/// Anything that can produce decoded frames by index.
///
/// Implementations may block while a frame is decoded. Frames are handed
/// out as shared references; dropping the `Arc` releases the frame.
pub trait FrameSource: Send + Sync {
    fn video_info(&self) -> &VideoInfo;

    fn get_frame(&self, index: usize) -> Result<Arc<Frame>, SourceError>;
}

impl<S: FrameSource + ?Sized> FrameSource for Arc<S> {
    fn video_info(&self) -> &VideoInfo {
        (**self).video_info()
    }

    fn get_frame(&self, index: usize) -> Result<Arc<Frame>, SourceError> {
        (**self).get_frame(index)
    }
}

/// Clip held fully in memory.
#[derive(Debug, Clone)]
pub struct InMemorySource {
    info: VideoInfo,
    frames: Vec<Arc<Frame>>,
}

impl InMemorySource {
    /// Wrap already decoded frames. Every frame should match `info`'s
    /// format; `num_frames` is taken from `frames`.
    pub fn new(mut info: VideoInfo, frames: Vec<Frame>) -> Self {
        info.num_frames = frames.len();
        Self {
            info,
            frames: frames.into_iter().map(Arc::new).collect(),
        }
    }
}

impl FrameSource for InMemorySource {
    fn video_info(&self) -> &VideoInfo {
        &self.info
    }

    fn get_frame(&self, index: usize) -> Result<Arc<Frame>, SourceError> {
        self.frames
            .get(index)
            .cloned()
            .ok_or(SourceError::Missing(index))
    }
}
