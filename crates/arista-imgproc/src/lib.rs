#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// color transformations module.
pub mod color;

/// shared local-extrema extraction primitive.
pub mod extrema;

/// image filtering module.
pub mod filter;

/// harris corner response engine.
pub mod harris;

/// hough line transform engine.
pub mod hough;

/// operations to normalize images.
pub mod normalize;

/// module containing parallelization utilities.
pub mod parallel;

/// operations to threshold images.
pub mod threshold;
