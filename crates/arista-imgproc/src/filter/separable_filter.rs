use arista_image::{Image, ImageError};
use rayon::prelude::*;

use super::convolution::{border_index, BorderMode};

/// Apply a separable filter to a single channel image.
///
/// The horizontal kernel is applied first, then the vertical kernel over the
/// intermediate result. Border pixels are resolved with `border`; no out of
/// bounds reads occur.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W).
/// * `dst` - The destination image with shape (H, W).
/// * `kernel_x` - The horizontal convolution kernel.
/// * `kernel_y` - The vertical convolution kernel.
/// * `border` - The border handling mode.
///
/// PRECONDITION: `src` and `dst` must have the same shape.
/// PRECONDITION: the kernels must not be empty.
pub fn separable_filter(
    src: &Image<f32, 1>,
    dst: &mut Image<f32, 1>,
    kernel_x: &[f32],
    kernel_y: &[f32],
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
    let half_x = (kernel_x.len() / 2) as isize;
    let half_y = (kernel_y.len() / 2) as isize;
    let src_data = src.as_slice();

    // horizontal pass
    let mut temp = vec![0.0f32; src_data.len()];
    temp.par_chunks_exact_mut(cols)
        .enumerate()
        .for_each(|(y, temp_row)| {
            let row_offset = y * cols;
            for (x, temp_pixel) in temp_row.iter_mut().enumerate() {
                let mut sum = 0.0;
                for (k, &kval) in kernel_x.iter().enumerate() {
                    let sx = border_index(x as isize + k as isize - half_x, cols, border);
                    sum += src_data[row_offset + sx] * kval;
                }
                *temp_pixel = sum;
            }
        });

    // vertical pass
    dst.as_slice_mut()
        .par_chunks_exact_mut(cols)
        .enumerate()
        .for_each(|(y, dst_row)| {
            for (x, dst_pixel) in dst_row.iter_mut().enumerate() {
                let mut sum = 0.0;
                for (k, &kval) in kernel_y.iter().enumerate() {
                    let sy = border_index(y as isize + k as isize - half_y, rows, border);
                    sum += temp[sy * cols + x] * kval;
                }
                *dst_pixel = sum;
            }
        });

    Ok(())
}
