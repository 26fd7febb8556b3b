use arista_image::{Image, ImageError};
use rayon::prelude::*;

use crate::extrema::{find_extrema_grid, suppress_close_points, ExtremaPolicy};
use crate::filter::{kernels, separable_filter, spatial_gradient, BorderMode, SobelAperture};
use crate::normalize::find_min_max;

/// Errors produced by the harris corner detector.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum HarrisError {
    /// The structure tensor window must be odd and at least 1.
    #[error("block size must be odd and at least 1, got {0}")]
    InvalidBlockSize(usize),

    /// The relative threshold must lie in (0, 1].
    #[error("relative threshold must be in (0, 1], got {0}")]
    InvalidRelativeThreshold(f32),

    /// Error produced by image operations.
    #[error(transparent)]
    Image(#[from] ImageError),
}

/// How the gradient products are accumulated into the structure tensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TensorWindow {
    /// Gaussian-weighted sum over the block window.
    #[default]
    Gaussian,
    /// Uniform box sum over the block window.
    Box,
}

/// Parameters for [`harris_response`].
///
/// The defaults expect intensities on the [0, 1] scale; `k` is the empirical
/// edge suppression constant (typical range 0.01 to 0.06, higher values
/// suppress more edge-like responses).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HarrisParams {
    /// Size of the structure tensor window; must be odd and at least 1.
    pub block_size: usize,
    /// Aperture of the sobel derivative kernels.
    pub aperture: SobelAperture,
    /// Harris edge suppression constant.
    pub k: f32,
    /// Weighting of the structure tensor window.
    pub window: TensorWindow,
    /// Border handling used by every convolution in the engine.
    pub border: BorderMode,
}

impl Default for HarrisParams {
    fn default() -> Self {
        Self {
            block_size: 5,
            aperture: SobelAperture::Three,
            k: 0.04,
            window: TensorWindow::Gaussian,
            border: BorderMode::Replicate,
        }
    }
}

/// A detected corner point with its response value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Corner {
    /// The x-coordinate of the corner in the image.
    pub x: u32,
    /// The y-coordinate of the corner in the image.
    pub y: u32,
    /// The harris response at the corner.
    pub response: f32,
}

impl Corner {
    /// Creates a new corner with the specified coordinates and response.
    pub fn new(x: u32, y: u32, response: f32) -> Self {
        Corner { x, y, response }
    }
}

/// Parameters for [`harris_corners`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CornerExtractParams {
    /// Fraction of the maximum response a corner must reach, in (0, 1].
    pub relative_threshold: f32,
    /// Radius of the non-maximum suppression neighborhood.
    pub nms_radius: usize,
    /// The extrema policy applied to the response field.
    pub policy: ExtremaPolicy,
    /// Minimum distance in pixels between reported corners; non-positive
    /// values disable the distance filter.
    pub min_distance: f32,
}

impl Default for CornerExtractParams {
    fn default() -> Self {
        Self {
            relative_threshold: 0.05,
            nms_radius: 2,
            policy: ExtremaPolicy::StrictMax,
            min_distance: 3.0,
        }
    }
}

/// Compute the harris corner response of an image.
///
/// The response is `det(M) - k * trace(M)^2` where M is the per-pixel
/// structure tensor: the windowed sums of Ix*Ix, Iy*Iy and Ix*Iy over the
/// block window. The sign of the raw response is preserved: positive values
/// are corner-like, negative values edge-like, near-zero values flat.
///
/// The input is expected on the [0, 1] intensity scale for the default `k`;
/// see [`harris_response_u8`] for 8-bit inputs.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W).
/// * `dst` - The destination response field with shape (H, W).
/// * `params` - The detector parameters.
///
/// # Errors
///
/// Fails on an even block size, a zero-sized image or mismatched shapes,
/// before any allocation.
pub fn harris_response(
    src: &Image<f32, 1>,
    dst: &mut Image<f32, 1>,
    params: &HarrisParams,
) -> Result<(), HarrisError> {
    if params.block_size == 0 || params.block_size % 2 == 0 {
        return Err(HarrisError::InvalidBlockSize(params.block_size));
    }
    if src.cols() == 0 || src.rows() == 0 {
        return Err(ImageError::ZeroSizedImage.into());
    }
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        )
        .into());
    }

    let size = src.size();
    let cols = src.cols();

    // directional derivatives
    let mut ix = Image::from_size_val(size, 0.0f32)?;
    let mut iy = Image::from_size_val(size, 0.0f32)?;
    spatial_gradient(src, &mut ix, &mut iy, params.aperture, params.border)?;

    // per-pixel products of derivatives
    let mut ixx = Image::from_size_val(size, 0.0f32)?;
    let mut iyy = Image::from_size_val(size, 0.0f32)?;
    let mut ixy = Image::from_size_val(size, 0.0f32)?;
    ixx.as_slice_mut()
        .iter_mut()
        .zip(iyy.as_slice_mut().iter_mut())
        .zip(ixy.as_slice_mut().iter_mut())
        .zip(ix.as_slice().iter().zip(iy.as_slice().iter()))
        .for_each(|(((xx, yy), xy), (&gx, &gy))| {
            *xx = gx * gx;
            *yy = gy * gy;
            *xy = gx * gy;
        });

    // windowed structure tensor entries
    let window_kernel = match params.window {
        TensorWindow::Gaussian => kernels::gaussian_kernel_1d(params.block_size, -1.0),
        TensorWindow::Box => kernels::box_kernel_1d(params.block_size),
    };
    let mut sxx = Image::from_size_val(size, 0.0f32)?;
    let mut syy = Image::from_size_val(size, 0.0f32)?;
    let mut sxy = Image::from_size_val(size, 0.0f32)?;
    separable_filter(&ixx, &mut sxx, &window_kernel, &window_kernel, params.border)?;
    separable_filter(&iyy, &mut syy, &window_kernel, &window_kernel, params.border)?;
    separable_filter(&ixy, &mut sxy, &window_kernel, &window_kernel, params.border)?;

    // response: det - k * trace^2
    let k = params.k;
    dst.as_slice_mut()
        .par_chunks_exact_mut(cols)
        .zip(sxx.as_slice().par_chunks_exact(cols))
        .zip(syy.as_slice().par_chunks_exact(cols))
        .zip(sxy.as_slice().par_chunks_exact(cols))
        .for_each(|(((dst_row, sxx_row), syy_row), sxy_row)| {
            dst_row
                .iter_mut()
                .zip(sxx_row.iter())
                .zip(syy_row.iter())
                .zip(sxy_row.iter())
                .for_each(|(((dst_pixel, &xx), &yy), &xy)| {
                    let det = xx * yy - xy * xy;
                    let trace = xx + yy;
                    *dst_pixel = det - k * trace * trace;
                });
        });

    Ok(())
}

/// Compute the harris corner response of an 8-bit image.
///
/// The input is normalized to [0, 1] before the response computation, so the
/// default `k` applies unchanged.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W).
/// * `dst` - The destination response field with shape (H, W).
/// * `params` - The detector parameters.
pub fn harris_response_u8(
    src: &Image<u8, 1>,
    dst: &mut Image<f32, 1>,
    params: &HarrisParams,
) -> Result<(), HarrisError> {
    let src_f32 = src.cast_and_scale::<f32>(1.0 / 255.0)?;
    harris_response(&src_f32, dst, params)
}

/// Extract discrete corner points from a harris response field.
///
/// The absolute gate is `relative_threshold * max(response)`. A field whose
/// maximum is not positive carries no corner evidence and yields an empty
/// vector. Gated positions go through the extrema policy and the minimum
/// distance filter; the result is ordered by descending response.
///
/// # Arguments
///
/// * `response` - The response field produced by [`harris_response`].
/// * `params` - The extraction parameters.
///
/// # Returns
///
/// The detected corners ordered by descending response.
///
/// # Errors
///
/// Fails when the relative threshold is outside (0, 1] or the field is
/// zero-sized.
pub fn harris_corners(
    response: &Image<f32, 1>,
    params: &CornerExtractParams,
) -> Result<Vec<Corner>, HarrisError> {
    if params.relative_threshold <= 0.0 || params.relative_threshold > 1.0 {
        return Err(HarrisError::InvalidRelativeThreshold(
            params.relative_threshold,
        ));
    }

    let (_, max_response) = find_min_max(response)?;
    if max_response <= 0.0 {
        // flat or purely edge-like field
        return Ok(Vec::new());
    }

    let gate = params.relative_threshold * max_response;
    let mut peaks = find_extrema_grid(
        response.as_slice(),
        response.cols(),
        response.rows(),
        params.nms_radius,
        params.nms_radius,
        gate,
        false,
        params.policy,
    );

    peaks.sort_unstable_by(|a, b| {
        b.value
            .total_cmp(&a.value)
            .then(a.y.cmp(&b.y))
            .then(a.x.cmp(&b.x))
    });
    let kept = suppress_close_points(&peaks, params.min_distance);

    Ok(kept
        .into_iter()
        .map(|peak| Corner::new(peak.x as u32, peak.y as u32, peak.value))
        .collect())
}
