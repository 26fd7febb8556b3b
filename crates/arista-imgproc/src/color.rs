use arista_image::{Image, ImageError};

use crate::parallel;

/// Luma weight for the red channel (ITU-R BT.601).
const RW: f64 = 0.299;
/// Luma weight for the green channel (ITU-R BT.601).
const GW: f64 = 0.587;
/// Luma weight for the blue channel (ITU-R BT.601).
const BW: f64 = 0.114;

/// Convert an RGB image to grayscale using the formula:
///
/// Y = 0.299 * R + 0.587 * G + 0.114 * B
///
/// # Arguments
///
/// * `src` - The input RGB image.
/// * `dst` - The output grayscale image.
///
/// Precondition: the input image must have 3 channels.
/// Precondition: the output image must have 1 channel.
/// Precondition: the input and output images must have the same size.
pub fn gray_from_rgb<T>(src: &Image<T, 3>, dst: &mut Image<T, 1>) -> Result<(), ImageError>
where
    T: Send + Sync + num_traits::Float,
{
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    let rw = T::from(RW).ok_or(ImageError::CastError)?;
    let gw = T::from(GW).ok_or(ImageError::CastError)?;
    let bw = T::from(BW).ok_or(ImageError::CastError)?;

    // parallelize the grayscale conversion by rows
    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        let r = src_pixel[0];
        let g = src_pixel[1];
        let b = src_pixel[2];
        dst_pixel[0] = rw * r + gw * g + bw * b;
    });

    Ok(())
}

/// Convert an RGB8 image to grayscale using the formula:
///
/// Y = 77 * R + 150 * G + 29 * B
///
/// # Arguments
///
/// * `src` - The input RGB8 image.
/// * `dst` - The output grayscale image.
///
/// Precondition: the input and output images must have the same size.
pub fn gray_from_rgb_u8(src: &Image<u8, 3>, dst: &mut Image<u8, 1>) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        let r = src_pixel[0] as u16;
        let g = src_pixel[1] as u16;
        let b = src_pixel[2] as u16;
        dst_pixel[0] = ((r * 77 + g * 150 + b * 29) >> 8) as u8;
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use arista_image::ImageSize;

    #[test]
    fn gray_from_rgb_f32() -> Result<(), ImageError> {
        let image = Image::<f32, 3>::new(
            ImageSize {
                width: 1,
                height: 2,
            },
            vec![0.0, 128.0, 255.0, 128.0, 128.0, 128.0],
        )?;

        let mut gray = Image::<f32, 1>::from_size_val(image.size(), 0.0)?;
        gray_from_rgb(&image, &mut gray)?;

        approx::assert_relative_eq!(gray.as_slice()[0], 104.206, epsilon = 1e-3);
        approx::assert_relative_eq!(gray.as_slice()[1], 128.0, epsilon = 1e-3);

        Ok(())
    }

    #[test]
    fn gray_from_rgb_u8_smoke() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::new(
            ImageSize {
                width: 2,
                height: 1,
            },
            vec![0, 128, 255, 128, 128, 128],
        )?;

        let mut gray = Image::<u8, 1>::from_size_val(image.size(), 0)?;
        gray_from_rgb_u8(&image, &mut gray)?;

        assert_eq!(gray.as_slice(), &[103, 128]);

        Ok(())
    }

    #[test]
    fn gray_size_mismatch() -> Result<(), ImageError> {
        let image = Image::<f32, 3>::from_size_val(
            ImageSize {
                width: 2,
                height: 1,
            },
            0.0,
        )?;
        let mut gray = Image::<f32, 1>::from_size_val(
            ImageSize {
                width: 1,
                height: 1,
            },
            0.0,
        )?;

        let res = gray_from_rgb(&image, &mut gray);
        assert_eq!(res, Err(ImageError::InvalidImageSize(2, 1, 1, 1)));

        Ok(())
    }
}
