/// Create a box blur kernel.
///
/// # Arguments
///
/// * `kernel_size` - The size of the kernel.
///
/// # Returns
///
/// A vector of the kernel.
pub fn box_kernel_1d(kernel_size: usize) -> Vec<f32> {
    vec![1.0 / kernel_size as f32; kernel_size]
}

/// Create a gaussian blur kernel.
///
/// When `sigma` is not positive, it is derived from the kernel size as
/// `0.3 * ((kernel_size - 1) * 0.5 - 1) + 0.8`, the rule used by the
/// reference implementations this crate reproduces.
///
/// # Arguments
///
/// * `kernel_size` - The size of the kernel.
/// * `sigma` - The sigma of the gaussian kernel.
///
/// # Returns
///
/// A vector of the kernel.
pub fn gaussian_kernel_1d(kernel_size: usize, sigma: f32) -> Vec<f32> {
    let sigma = if sigma > 0.0 {
        sigma
    } else {
        0.3 * ((kernel_size.saturating_sub(1)) as f32 * 0.5 - 1.0) + 0.8
    };

    let mut kernel = Vec::with_capacity(kernel_size);

    let mean = (kernel_size - 1) as f32 / 2.0;
    let sigma_sq = sigma * sigma;

    // compute the kernel
    for i in 0..kernel_size {
        let x = i as f32 - mean;
        kernel.push((-(x * x) / (2.0 * sigma_sq)).exp());
    }

    // normalize the kernel
    let norm = kernel.iter().sum::<f32>();
    kernel.iter_mut().for_each(|k| *k /= norm);
    kernel
}

/// Create the pair of 3x3 sobel kernels for the x and y derivatives.
///
/// # Returns
///
/// The x kernel and the y kernel.
pub fn sobel_kernel_3x3() -> ([[f32; 3]; 3], [[f32; 3]; 3]) {
    (
        [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]],
        [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]],
    )
}

/// Create the pair of 5x5 sobel kernels for the x and y derivatives.
///
/// The kernels are normalized by 1/48 so that their magnitude matches the
/// 3x3 variant on smooth gradients.
///
/// # Returns
///
/// The x kernel and the y kernel.
pub fn sobel_kernel_5x5() -> ([[f32; 5]; 5], [[f32; 5]; 5]) {
    let mut kernel_x: [[f32; 5]; 5] = [
        [-1.0, -2.0, 0.0, 2.0, 1.0],
        [-4.0, -8.0, 0.0, 8.0, 4.0],
        [-6.0, -12.0, 0.0, 12.0, 6.0],
        [-4.0, -8.0, 0.0, 8.0, 4.0],
        [-1.0, -2.0, 0.0, 2.0, 1.0],
    ];
    let mut kernel_y: [[f32; 5]; 5] = [
        [-1.0, -4.0, -6.0, -4.0, -1.0],
        [-2.0, -8.0, -12.0, -8.0, -2.0],
        [0.0, 0.0, 0.0, 0.0, 0.0],
        [2.0, 8.0, 12.0, 8.0, 2.0],
        [1.0, 4.0, 6.0, 4.0, 1.0],
    ];

    for row in kernel_x.iter_mut() {
        for val in row.iter_mut() {
            *val /= 48.0;
        }
    }
    for row in kernel_y.iter_mut() {
        for val in row.iter_mut() {
            *val /= 48.0;
        }
    }

    (kernel_x, kernel_y)
}
