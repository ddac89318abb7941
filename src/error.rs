//! Error types for window resolution and the denoise kernel.

use std::fmt;

use thiserror::Error;

use crate::source::SourceError;

/// Which buffer of a denoise call an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaneRole {
    Previous,
    Current,
    Next,
    Output,
}

impl fmt::Display for PlaneRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlaneRole::Previous => "previous",
            PlaneRole::Current => "current",
            PlaneRole::Next => "next",
            PlaneRole::Output => "output",
        };
        f.write_str(name)
    }
}

/// Width and height of a plane, in samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: usize,
    pub height: usize,
}

impl Dimensions {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[derive(Debug, Error)]
pub enum DenoiseError {
    #[error("frame {index} is out of range for a clip of {num_frames} frames")]
    InvalidIndex { index: usize, num_frames: usize },

    #[error("upstream could not provide frame {index}: {source}")]
    UpstreamUnavailable {
        index: usize,
        #[source]
        source: SourceError,
    },

    #[error("{role} plane is {actual}, expected {expected}")]
    DimensionMismatch {
        role: PlaneRole,
        expected: Dimensions,
        actual: Dimensions,
    },

    #[error("{role} frame has no plane {plane}")]
    MissingPlane { role: PlaneRole, plane: usize },

    #[error("invalid plane layout: {0}")]
    InvalidLayout(String),
}

pub type Result<T> = std::result::Result<T, DenoiseError>;
