use arista_image::{Image, ImageError};

use crate::parallel;

/// Find the minimum and maximum values in an image.
///
/// # Arguments
///
/// * `image` - The input image of any size and channel count.
///
/// # Returns
///
/// A tuple with the minimum and maximum values found in the image.
///
/// # Errors
///
/// Returns an error for a zero-sized image.
pub fn find_min_max<T, const C: usize>(image: &Image<T, C>) -> Result<(T, T), ImageError>
where
    T: Copy + PartialOrd,
{
    let data = image.as_slice();
    let first = *data.first().ok_or(ImageError::ZeroSizedImage)?;

    let mut min_val = first;
    let mut max_val = first;
    for &val in data {
        if val < min_val {
            min_val = val;
        }
        if val > max_val {
            max_val = val;
        }
    }

    Ok((min_val, max_val))
}

/// Normalize an image to a given range using the min-max normalization.
///
/// The output values are scaled linearly so that the input minimum maps to
/// `min_val` and the input maximum to `max_val`. A constant image maps to
/// `min_val` everywhere. Used to make a raw corner response field consumable
/// by a visualization collaborator.
///
/// # Arguments
///
/// * `src` - The input image of any size and channel count.
/// * `dst` - The output image.
/// * `min_val` - The minimum value of the output range.
/// * `max_val` - The maximum value of the output range.
pub fn normalize_min_max<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    min_val: T,
    max_val: T,
) -> Result<(), ImageError>
where
    T: Copy + Send + Sync + PartialOrd + num_traits::Float,
{
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    let (src_min, src_max) = find_min_max(src)?;
    let range = src_max - src_min;

    if range == T::zero() {
        parallel::par_iter_rows_val(src, dst, |_, dst_val| {
            *dst_val = min_val;
        });
        return Ok(());
    }

    parallel::par_iter_rows_val(src, dst, |src_val, dst_val| {
        *dst_val = (*src_val - src_min) / range * (max_val - min_val) + min_val;
    });

    Ok(())
}
