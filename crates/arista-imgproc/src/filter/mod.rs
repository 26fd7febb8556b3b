mod convolution;
/// kernel generators for the filters.
pub mod kernels;
mod ops;
mod separable_filter;

pub use convolution::{filter_2d, BorderMode};
pub use ops::{box_blur, gaussian_blur, spatial_gradient, SobelAperture};
pub use separable_filter::separable_filter;
