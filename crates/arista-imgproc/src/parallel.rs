use arista_image::Image;
use rayon::prelude::*;

/// Apply a function to each pixel of a source and destination image pair in
/// parallel by rows.
///
/// The closure receives one pixel slice per image, with as many elements as
/// the image has channels.
///
/// PRECONDITION: `src` and `dst` must have the same spatial size.
pub fn par_iter_rows<T1, const C1: usize, T2, const C2: usize>(
    src: &Image<T1, C1>,
    dst: &mut Image<T2, C2>,
    f: impl Fn(&[T1], &mut [T2]) + Send + Sync,
) where
    T1: Copy + Send + Sync,
    T2: Copy + Send + Sync,
{
    let src_cols = src.cols();
    let dst_cols = dst.cols();
    src.as_slice()
        .par_chunks_exact(src_cols * C1)
        .zip(dst.as_slice_mut().par_chunks_exact_mut(dst_cols * C2))
        .for_each(|(src_row, dst_row)| {
            src_row
                .chunks_exact(C1)
                .zip(dst_row.chunks_exact_mut(C2))
                .for_each(|(src_pixel, dst_pixel)| f(src_pixel, dst_pixel));
        });
}

/// Apply a function to each value of a source and destination image pair in
/// parallel by rows.
///
/// The closure receives one scalar value per call, independent of the channel
/// layout.
///
/// PRECONDITION: `src` and `dst` must have the same shape.
pub fn par_iter_rows_val<T1, const C1: usize, T2, const C2: usize>(
    src: &Image<T1, C1>,
    dst: &mut Image<T2, C2>,
    f: impl Fn(&T1, &mut T2) + Send + Sync,
) where
    T1: Copy + Send + Sync,
    T2: Copy + Send + Sync,
{
    let src_cols = src.cols();
    let dst_cols = dst.cols();
    src.as_slice()
        .par_chunks_exact(src_cols * C1)
        .zip(dst.as_slice_mut().par_chunks_exact_mut(dst_cols * C2))
        .for_each(|(src_row, dst_row)| {
            src_row
                .iter()
                .zip(dst_row.iter_mut())
                .for_each(|(src_val, dst_val)| f(src_val, dst_val));
        });
}
