//! Denoise filter stages.
//!
//! ## Supported Formats
//!
//! Filters work on one plane at a time:
//!
//! | Input | Shape | Type | Description |
//! |-------|-------|------|-------------|
//! | Plane view | (H, W) | u8 | Any 8-bit plane (luma or chroma), row stride may exceed W |
//!
//! Color model is irrelevant; every plane of a frame is filtered the same
//! way.
//!
//! ## Architecture
//!
//! - **Spatial** - 3x3 Gaussian-weighted smoothing of the current plane,
//!   clamp-to-edge at borders
//! - **Temporal** - blend toward the mean of the previous/next co-located
//!   samples
//! - **Denoise** - runs both stages per sample, row-parallel via rayon

pub mod core;
pub mod denoise;
pub mod spatial;
pub mod temporal;
