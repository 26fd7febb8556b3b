#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use arista_image as image;

#[doc(inline)]
pub use arista_imgproc as imgproc;
