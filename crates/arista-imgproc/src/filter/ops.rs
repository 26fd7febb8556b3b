use arista_image::{Image, ImageError};

use super::convolution::{filter_2d, BorderMode};
use super::kernels;
use super::separable_filter::separable_filter;

/// The aperture of the sobel derivative kernels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SobelAperture {
    /// 3x3 sobel kernels.
    #[default]
    Three,
    /// 5x5 sobel kernels, normalized by 1/48.
    Five,
}

/// Blur an image using a gaussian blur filter.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W).
/// * `dst` - The destination image with shape (H, W).
/// * `kernel_size` - The size of the kernel.
/// * `sigma` - The sigma of the gaussian kernel; non-positive values derive
///   the sigma from the kernel size.
/// * `border` - The border handling mode.
///
/// PRECONDITION: `src` and `dst` must have the same shape.
pub fn gaussian_blur(
    src: &Image<f32, 1>,
    dst: &mut Image<f32, 1>,
    kernel_size: usize,
    sigma: f32,
    border: BorderMode,
) -> Result<(), ImageError> {
    let kernel = kernels::gaussian_kernel_1d(kernel_size, sigma);
    separable_filter(src, dst, &kernel, &kernel, border)
}

/// Blur an image using a box blur filter.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W).
/// * `dst` - The destination image with shape (H, W).
/// * `kernel_size` - The size of the kernel.
/// * `border` - The border handling mode.
///
/// PRECONDITION: `src` and `dst` must have the same shape.
pub fn box_blur(
    src: &Image<f32, 1>,
    dst: &mut Image<f32, 1>,
    kernel_size: usize,
    border: BorderMode,
) -> Result<(), ImageError> {
    let kernel = kernels::box_kernel_1d(kernel_size);
    separable_filter(src, dst, &kernel, &kernel, border)
}

/// Compute the first order image derivatives in x and y using sobel kernels.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W).
/// * `dx` - The destination image for the x derivative with shape (H, W).
/// * `dy` - The destination image for the y derivative with shape (H, W).
/// * `aperture` - The sobel kernel aperture.
/// * `border` - The border handling mode.
///
/// PRECONDITION: `src`, `dx` and `dy` must have the same shape.
pub fn spatial_gradient(
    src: &Image<f32, 1>,
    dx: &mut Image<f32, 1>,
    dy: &mut Image<f32, 1>,
    aperture: SobelAperture,
    border: BorderMode,
) -> Result<(), ImageError> {
    match aperture {
        SobelAperture::Three => {
            let (kernel_x, kernel_y) = kernels::sobel_kernel_3x3();
            filter_2d(src, dx, &kernel_x, border)?;
            filter_2d(src, dy, &kernel_y, border)?;
        }
        SobelAperture::Five => {
            let (kernel_x, kernel_y) = kernels::sobel_kernel_5x5();
            filter_2d(src, dx, &kernel_x, border)?;
            filter_2d(src, dy, &kernel_y, border)?;
        }
    }

    Ok(())
}
