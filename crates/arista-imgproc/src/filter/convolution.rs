use arista_image::{Image, ImageError};
use rayon::prelude::*;

/// How a convolution reads pixels past the image edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderMode {
    /// Repeat the edge pixel.
    #[default]
    Replicate,
    /// Mirror the image across the edge.
    Reflect,
}

/// Resolve an index that may fall outside `[0, len)` according to the border mode.
#[inline]
pub(super) fn border_index(i: isize, len: usize, mode: BorderMode) -> usize {
    let n = len as isize;
    let j = match mode {
        BorderMode::Replicate => i.clamp(0, n - 1),
        BorderMode::Reflect => {
            if i < 0 {
                -i - 1
            } else if i >= n {
                2 * n - i - 1
            } else {
                i
            }
        }
    };
    j.clamp(0, n - 1) as usize
}

/// Apply a dense 2D convolution with a square kernel to a single channel image.
///
/// The border is handled according to `border`; no out of bounds reads occur.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W).
/// * `dst` - The destination image with shape (H, W).
/// * `kernel` - The square convolution kernel.
/// * `border` - The border handling mode.
///
/// PRECONDITION: `src` and `dst` must have the same shape.
pub fn filter_2d<const K: usize>(
    src: &Image<f32, 1>,
    dst: &mut Image<f32, 1>,
    kernel: &[[f32; K]; K],
    border: BorderMode,
) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    let cols = src.cols();
    let rows = src.rows();
    let half = (K / 2) as isize;
    let src_data = src.as_slice();

    dst.as_slice_mut()
        .par_chunks_exact_mut(cols)
        .enumerate()
        .for_each(|(y, dst_row)| {
            for (x, dst_pixel) in dst_row.iter_mut().enumerate() {
                let mut sum = 0.0;
                for (ky, kernel_row) in kernel.iter().enumerate() {
                    let sy = border_index(y as isize + ky as isize - half, rows, border);
                    let row_offset = sy * cols;
                    for (kx, &kval) in kernel_row.iter().enumerate() {
                        let sx = border_index(x as isize + kx as isize - half, cols, border);
                        sum += src_data[row_offset + sx] * kval;
                    }
                }
                *dst_pixel = sum;
            }
        });

    Ok(())
}
