//! Frame-window resolution.
//!
//! For output frame `n` the denoiser needs frame `n` and, where they exist,
//! frames `n - 1` and `n + 1`. All requests are issued at once and the
//! window is only handed out after every request has completed.

use std::sync::Arc;

use crate::error::{DenoiseError, PlaneRole, Result};
use crate::plane::{Frame, PlaneView};
use crate::source::FrameSource;

/// Up to three time-adjacent frames around one output index.
///
/// Holding a window keeps its frames alive; dropping it releases them.
#[derive(Debug, Clone)]
pub struct FrameWindow {
    index: usize,
    previous: Option<Arc<Frame>>,
    current: Arc<Frame>,
    next: Option<Arc<Frame>>,
}

/// Co-located planes of a [`FrameWindow`].
#[derive(Debug, Clone)]
pub struct PlaneWindow<'a> {
    pub previous: Option<PlaneView<'a>>,
    pub current: PlaneView<'a>,
    pub next: Option<PlaneView<'a>>,
}

impl FrameWindow {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> &Frame {
        &self.current
    }

    pub fn previous(&self) -> Option<&Frame> {
        self.previous.as_deref()
    }

    pub fn next(&self) -> Option<&Frame> {
        self.next.as_deref()
    }

    /// Views of plane `plane` in every frame of the window.
    pub fn plane(&self, plane: usize) -> Result<PlaneWindow<'_>> {
        Ok(PlaneWindow {
            previous: self
                .previous()
                .map(|f| plane_of(f, plane, PlaneRole::Previous))
                .transpose()?,
            current: plane_of(&self.current, plane, PlaneRole::Current)?,
            next: self
                .next()
                .map(|f| plane_of(f, plane, PlaneRole::Next))
                .transpose()?,
        })
    }
}

fn plane_of(frame: &Frame, plane: usize, role: PlaneRole) -> Result<PlaneView<'_>> {
    frame
        .plane(plane)
        .map(|p| p.view())
        .ok_or(DenoiseError::MissingPlane { role, plane })
}

/// Fetch the window for output frame `index`.
///
/// The current frame is mandatory. A neighbor that lies inside the clip
/// but cannot be fetched is treated like a clip boundary and left out.
pub fn resolve_window<S>(source: &S, index: usize) -> Result<FrameWindow>
where
    S: FrameSource + ?Sized,
{
    let num_frames = source.video_info().num_frames;
    if index >= num_frames {
        return Err(DenoiseError::InvalidIndex { index, num_frames });
    }

    let has_previous = index > 0;
    let has_next = index + 1 < num_frames;

    let (current, (previous, next)) = rayon::join(
        || source.get_frame(index),
        || {
            rayon::join(
                || has_previous.then(|| fetch_neighbor(source, index - 1)).flatten(),
                || has_next.then(|| fetch_neighbor(source, index + 1)).flatten(),
            )
        },
    );

    // Neighbors fetched alongside a failed current frame are dropped here.
    let current =
        current.map_err(|source| DenoiseError::UpstreamUnavailable { index, source })?;

    tracing::debug!(
        index,
        previous = previous.is_some(),
        next = next.is_some(),
        "frame window resolved"
    );

    Ok(FrameWindow {
        index,
        previous,
        current,
        next,
    })
}

fn fetch_neighbor<S>(source: &S, index: usize) -> Option<Arc<Frame>>
where
    S: FrameSource + ?Sized,
{
    match source.get_frame(index) {
        Ok(frame) => Some(frame),
        Err(err) => {
            tracing::warn!(index, error = %err, "neighbor frame unavailable, treating as absent");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plane::{Plane, VideoFormat, VideoInfo};
    use crate::source::SourceError;

    /// Serves frames whose samples equal their index; fails for `broken`.
    struct TestSource {
        info: VideoInfo,
        frames: Vec<Arc<Frame>>,
        broken: Vec<usize>,
    }

    impl TestSource {
        fn new(num_frames: usize, broken: Vec<usize>) -> Self {
            let info = VideoInfo {
                format: VideoFormat::GRAY8,
                width: 3,
                height: 2,
                num_frames,
            };
            let frames = (0..num_frames)
                .map(|i| Arc::new(Frame::new(vec![Plane::filled(3, 2, i as u8)])))
                .collect();
            Self {
                info,
                frames,
                broken,
            }
        }
    }

    impl FrameSource for TestSource {
        fn video_info(&self) -> &VideoInfo {
            &self.info
        }

        fn get_frame(&self, index: usize) -> std::result::Result<Arc<Frame>, SourceError> {
            if self.broken.contains(&index) {
                return Err(SourceError::Failed(format!("decode error at {index}")));
            }
            self.frames
                .get(index)
                .cloned()
                .ok_or(SourceError::Missing(index))
        }
    }

    fn sample(frame: Option<&Frame>) -> Option<u8> {
        frame.map(|f| f.plane(0).unwrap().view()[[0, 0]])
    }

    #[test]
    fn test_interior_frame_has_both_neighbors() {
        let source = TestSource::new(10, vec![]);
        let window = resolve_window(&source, 4).unwrap();
        assert_eq!(window.index(), 4);
        assert_eq!(sample(window.previous()), Some(3));
        assert_eq!(sample(Some(window.current())), Some(4));
        assert_eq!(sample(window.next()), Some(5));
    }

    #[test]
    fn test_first_and_last_frames() {
        let source = TestSource::new(10, vec![]);

        let first = resolve_window(&source, 0).unwrap();
        assert!(first.previous().is_none());
        assert_eq!(sample(first.next()), Some(1));

        let last = resolve_window(&source, 9).unwrap();
        assert_eq!(sample(last.previous()), Some(8));
        assert!(last.next().is_none());
    }

    #[test]
    fn test_single_frame_clip() {
        let source = TestSource::new(1, vec![]);
        let window = resolve_window(&source, 0).unwrap();
        assert!(window.previous().is_none());
        assert!(window.next().is_none());
    }

    #[test]
    fn test_out_of_range_index() {
        let source = TestSource::new(3, vec![]);
        let err = resolve_window(&source, 3).unwrap_err();
        assert!(matches!(
            err,
            DenoiseError::InvalidIndex {
                index: 3,
                num_frames: 3
            }
        ));
    }

    #[test]
    fn test_current_frame_failure_is_fatal() {
        let source = TestSource::new(5, vec![2]);
        let err = resolve_window(&source, 2).unwrap_err();
        assert!(matches!(err, DenoiseError::UpstreamUnavailable { index: 2, .. }));

        // Neighbors fetched for the failed request were released.
        assert_eq!(Arc::strong_count(&source.frames[1]), 1);
        assert_eq!(Arc::strong_count(&source.frames[3]), 1);
    }

    #[test]
    fn test_neighbor_failure_degrades_to_absent() {
        let source = TestSource::new(5, vec![1]);
        let window = resolve_window(&source, 2).unwrap();
        assert!(window.previous().is_none());
        assert_eq!(sample(window.next()), Some(3));
    }

    #[test]
    fn test_dropping_window_releases_frames() {
        let source = TestSource::new(5, vec![]);
        let window = resolve_window(&source, 2).unwrap();
        assert_eq!(Arc::strong_count(&source.frames[1]), 2);
        drop(window);
        assert!(source.frames.iter().all(|f| Arc::strong_count(f) == 1));
    }

    #[test]
    fn test_plane_window_views() {
        let source = TestSource::new(3, vec![]);
        let window = resolve_window(&source, 0).unwrap();
        let planes = window.plane(0).unwrap();
        assert!(planes.previous.is_none());
        assert_eq!(planes.current.dim(), (2, 3));
        assert_eq!(planes.next.map(|p| p[[1, 2]]), Some(1));

        assert!(matches!(
            window.plane(1),
            Err(DenoiseError::MissingPlane {
                role: PlaneRole::Current,
                plane: 1
            })
        ));
    }
}
