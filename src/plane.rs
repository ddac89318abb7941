//! Plane and frame buffers.
//!
//! A plane is a rectangular grid of 8-bit samples whose rows may be padded:
//! the row stride can exceed the logical width. Borrowed planes are plain
//! `ndarray` views carrying that stride, so previous, current, next and
//! output planes can each have their own layout while sharing one width and
//! height.
//!
//! Owned planes ([`Plane`]) are allocated with rows padded to
//! [`STRIDE_ALIGNMENT`] samples.

use ndarray::{s, Array2, ArrayView2, ArrayViewMut2, ShapeBuilder};

use crate::error::{DenoiseError, Dimensions, Result};

/// Row alignment, in samples, of freshly allocated planes.
pub const STRIDE_ALIGNMENT: usize = 32;

/// Read-only plane: shape `(height, width)`, row stride may exceed width.
pub type PlaneView<'a> = ArrayView2<'a, u8>;

/// Writable plane: shape `(height, width)`, row stride may exceed width.
pub type PlaneViewMut<'a> = ArrayViewMut2<'a, u8>;

/// Smallest multiple of [`STRIDE_ALIGNMENT`] that holds `width` samples.
pub fn aligned_stride(width: usize) -> usize {
    width.div_ceil(STRIDE_ALIGNMENT) * STRIDE_ALIGNMENT
}

fn check_layout(len: usize, width: usize, height: usize, stride: usize) -> Result<()> {
    if stride < width {
        return Err(DenoiseError::InvalidLayout(format!(
            "stride {stride} is smaller than width {width}"
        )));
    }
    let required = if height == 0 || width == 0 {
        0
    } else {
        (height - 1) * stride + width
    };
    if len < required {
        return Err(DenoiseError::InvalidLayout(format!(
            "{width}x{height} plane with stride {stride} needs {required} samples, buffer has {len}"
        )));
    }
    Ok(())
}

/// Borrow a strided buffer as a read-only plane.
///
/// `data` starts at the first sample of row 0; row `y` starts at
/// `y * stride`. The final row only needs `width` samples.
pub fn plane_view(
    data: &[u8],
    width: usize,
    height: usize,
    stride: usize,
) -> Result<PlaneView<'_>> {
    check_layout(data.len(), width, height, stride)?;
    ArrayView2::from_shape((height, width).strides((stride, 1)), data)
        .map_err(|e| DenoiseError::InvalidLayout(e.to_string()))
}

/// Borrow a strided buffer as a writable plane.
pub fn plane_view_mut(
    data: &mut [u8],
    width: usize,
    height: usize,
    stride: usize,
) -> Result<PlaneViewMut<'_>> {
    check_layout(data.len(), width, height, stride)?;
    ArrayViewMut2::from_shape((height, width).strides((stride, 1)), data)
        .map_err(|e| DenoiseError::InvalidLayout(e.to_string()))
}

/// Owned plane with padded rows.
///
/// Backed by a `(height, stride)` array; only the first `width` columns
/// carry samples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plane {
    data: Array2<u8>,
    width: usize,
}

impl Plane {
    /// Zero-filled plane with an aligned stride.
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, 0)
    }

    /// Plane with every sample set to `value`.
    pub fn filled(width: usize, height: usize, value: u8) -> Self {
        let mut data = Array2::<u8>::zeros((height, aligned_stride(width)));
        data.slice_mut(s![.., ..width]).fill(value);
        Self { data, width }
    }

    /// Plane with aligned stride and samples from `f(x, y)`.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> u8) -> Self {
        let mut plane = Self::new(width, height);
        for ((y, x), v) in plane.view_mut().indexed_iter_mut() {
            *v = f(x, y);
        }
        plane
    }

    /// Take ownership of a strided buffer of exactly `height * stride` samples.
    pub fn from_vec(data: Vec<u8>, width: usize, height: usize, stride: usize) -> Result<Self> {
        if stride < width {
            return Err(DenoiseError::InvalidLayout(format!(
                "stride {stride} is smaller than width {width}"
            )));
        }
        let data = Array2::from_shape_vec((height, stride), data)
            .map_err(|e| DenoiseError::InvalidLayout(e.to_string()))?;
        Ok(Self { data, width })
    }

    /// Copy a view into a new plane with aligned stride.
    pub fn from_view(view: PlaneView<'_>) -> Self {
        let (height, width) = view.dim();
        let mut plane = Self::new(width, height);
        plane.view_mut().assign(&view);
        plane
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }

    pub fn stride(&self) -> usize {
        self.data.ncols()
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width, self.height())
    }

    pub fn view(&self) -> PlaneView<'_> {
        self.data.slice(s![.., ..self.width])
    }

    pub fn view_mut(&mut self) -> PlaneViewMut<'_> {
        let width = self.width;
        self.data.slice_mut(s![.., ..width])
    }

    /// Copy the samples into a tightly packed `(height, width)` array.
    pub fn to_array(&self) -> Array2<u8> {
        self.view().to_owned()
    }
}

/// Planar 8-bit sample layout.
///
/// Plane 0 is full size; every further plane is subsampled by
/// `sub_sampling_w`/`sub_sampling_h` (as right shifts).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoFormat {
    pub num_planes: usize,
    pub sub_sampling_w: u32,
    pub sub_sampling_h: u32,
}

impl VideoFormat {
    pub const GRAY8: Self = Self {
        num_planes: 1,
        sub_sampling_w: 0,
        sub_sampling_h: 0,
    };
    pub const YUV420P8: Self = Self {
        num_planes: 3,
        sub_sampling_w: 1,
        sub_sampling_h: 1,
    };
    pub const YUV444P8: Self = Self {
        num_planes: 3,
        sub_sampling_w: 0,
        sub_sampling_h: 0,
    };
}

/// Static properties of a clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoInfo {
    pub format: VideoFormat,
    pub width: usize,
    pub height: usize,
    pub num_frames: usize,
}

impl VideoInfo {
    /// Dimensions of plane `plane`, or `None` past the last plane.
    pub fn plane_dimensions(&self, plane: usize) -> Option<Dimensions> {
        if plane >= self.format.num_planes {
            return None;
        }
        if plane == 0 {
            return Some(Dimensions::new(self.width, self.height));
        }
        Some(Dimensions::new(
            self.width >> self.format.sub_sampling_w,
            self.height >> self.format.sub_sampling_h,
        ))
    }
}

/// One decoded frame: an ordered list of planes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    planes: Vec<Plane>,
}

impl Frame {
    pub fn new(planes: Vec<Plane>) -> Self {
        Self { planes }
    }

    /// Zero-filled frame laid out per `info`.
    pub fn blank(info: &VideoInfo) -> Self {
        let planes = (0..info.format.num_planes)
            .filter_map(|p| info.plane_dimensions(p))
            .map(|d| Plane::new(d.width, d.height))
            .collect();
        Self { planes }
    }

    /// Zero-filled frame whose planes match `other` in width and height.
    pub fn with_geometry_of(other: &Frame) -> Self {
        let planes = other
            .planes
            .iter()
            .map(|p| Plane::new(p.width(), p.height()))
            .collect();
        Self { planes }
    }

    pub fn num_planes(&self) -> usize {
        self.planes.len()
    }

    pub fn plane(&self, index: usize) -> Option<&Plane> {
        self.planes.get(index)
    }

    pub fn plane_mut(&mut self, index: usize) -> Option<&mut Plane> {
        self.planes.get_mut(index)
    }

    pub fn planes(&self) -> &[Plane] {
        &self.planes
    }

    pub fn into_planes(self) -> Vec<Plane> {
        self.planes
    }
}
