use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::Rng;

use arista_image::{Image, ImageSize};
use arista_imgproc::hough::{hough_lines, HoughLinesParams};

fn synthetic_edge_mask(side: usize) -> Image<u8, 1> {
    let size = ImageSize {
        width: side,
        height: side,
    };
    let mut mask = Image::from_size_val(size, 0u8).unwrap();
    let cols = mask.cols();
    let data = mask.as_slice_mut();

    // a few strong segments
    let mid = side / 2;
    for i in side / 8..side - side / 8 {
        data[mid * cols + i] = 255;
        data[i * cols + mid] = 255;
        data[i * cols + i] = 255;
    }

    // plus sparse salt noise
    let mut rng = rand::rng();
    for _ in 0..side * side / 100 {
        let x = rng.random_range(0..side);
        let y = rng.random_range(0..side);
        data[y * cols + x] = 255;
    }

    mask
}

fn bench_hough_lines(c: &mut Criterion) {
    let mut group = c.benchmark_group("HoughLines");

    for side in [160usize, 320] {
        let mask = synthetic_edge_mask(side);
        let params = HoughLinesParams {
            vote_threshold: (side / 3) as u32,
            ..Default::default()
        };
        let parameter_string = format!("{side}x{side}");

        group.bench_with_input(
            BenchmarkId::new("hough_lines", &parameter_string),
            &mask,
            |b, i| {
                b.iter(|| {
                    let _res = black_box(hough_lines(i, &params)).unwrap();
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_hough_lines);
criterion_main!(benches);
