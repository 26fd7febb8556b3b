use std::f64::consts::{FRAC_PI_2, PI};

use arista_image::{Image, ImageSize};
use arista_imgproc::hough::{hough_lines, HoughError, HoughLinesParams};

/// Draw a one pixel wide segment into a binary mask.
fn draw_segment(mask: &mut Image<u8, 1>, p0: (f32, f32), p1: (f32, f32)) {
    let cols = mask.cols();
    let rows = mask.rows();
    let (dx, dy) = (p1.0 - p0.0, p1.1 - p0.1);
    let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as usize;
    let data = mask.as_slice_mut();
    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        let x = (p0.0 + t * dx).round() as isize;
        let y = (p0.1 + t * dy).round() as isize;
        if x >= 0 && y >= 0 && (x as usize) < cols && (y as usize) < rows {
            data[y as usize * cols + x as usize] = 255;
        }
    }
}

#[test]
fn recovers_single_horizontal_segment() -> Result<(), HoughError> {
    let mut mask = Image::from_size_val(
        ImageSize {
            width: 200,
            height: 200,
        },
        0u8,
    )
    .unwrap();
    draw_segment(&mut mask, (10.0, 50.0), (190.0, 50.0));

    let params = HoughLinesParams {
        rho_step: 1.0,
        theta_step: PI / 180.0,
        vote_threshold: 50,
        ..Default::default()
    };
    let lines = hough_lines(&mask, &params)?;

    assert_eq!(lines.len(), 1);
    let line = &lines[0];
    // horizontal: the line normal points straight down
    assert!((line.theta - FRAC_PI_2).abs() <= params.theta_step);
    assert!((line.rho - 50.0).abs() <= params.rho_step);
    assert_eq!(line.votes, 181);

    Ok(())
}

#[test]
fn empty_mask_is_empty_for_any_threshold() -> Result<(), HoughError> {
    let mask = Image::from_size_val(
        ImageSize {
            width: 200,
            height: 200,
        },
        0u8,
    )
    .unwrap();

    for vote_threshold in [0u32, 1, 50, 100_000] {
        let params = HoughLinesParams {
            vote_threshold,
            ..Default::default()
        };
        let lines = hough_lines(&mask, &params)?;
        assert!(lines.is_empty(), "threshold {vote_threshold}");
    }

    Ok(())
}

#[test]
fn output_is_deterministic() -> Result<(), HoughError> {
    let mut mask = Image::from_size_val(
        ImageSize {
            width: 200,
            height: 200,
        },
        0u8,
    )
    .unwrap();
    draw_segment(&mut mask, (10.0, 50.0), (190.0, 50.0));
    draw_segment(&mut mask, (100.0, 5.0), (100.0, 195.0));
    draw_segment(&mut mask, (20.0, 20.0), (180.0, 180.0));
    draw_segment(&mut mask, (10.0, 120.0), (190.0, 140.0));

    let params = HoughLinesParams {
        vote_threshold: 60,
        ..Default::default()
    };

    let reference = hough_lines(&mask, &params)?;
    assert!(!reference.is_empty());
    for _ in 0..5 {
        let lines = hough_lines(&mask, &params)?;
        assert_eq!(lines, reference);
    }

    Ok(())
}

#[test]
fn duplicate_lines_are_merged() -> Result<(), HoughError> {
    let mut mask = Image::from_size_val(
        ImageSize {
            width: 200,
            height: 200,
        },
        0u8,
    )
    .unwrap();
    // two horizontal segments four pixels apart, closer than the merge
    // distance: only the stronger survives
    draw_segment(&mut mask, (10.0, 50.0), (190.0, 50.0));
    draw_segment(&mut mask, (30.0, 54.0), (170.0, 54.0));

    let params = HoughLinesParams {
        vote_threshold: 50,
        ..Default::default()
    };
    let lines = hough_lines(&mask, &params)?;

    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].votes, 181);

    Ok(())
}

#[test]
fn lines_are_ordered_by_votes() -> Result<(), HoughError> {
    let mut mask = Image::from_size_val(
        ImageSize {
            width: 200,
            height: 200,
        },
        0u8,
    )
    .unwrap();
    draw_segment(&mut mask, (10.0, 50.0), (190.0, 50.0));
    draw_segment(&mut mask, (60.0, 10.0), (60.0, 120.0));

    let params = HoughLinesParams {
        vote_threshold: 50,
        ..Default::default()
    };
    let lines = hough_lines(&mask, &params)?;

    assert_eq!(lines.len(), 2);
    assert!(lines[0].votes >= lines[1].votes);
    // the longer horizontal segment wins
    assert!((lines[0].theta - FRAC_PI_2).abs() <= params.theta_step);
    // the vertical segment has its normal along x
    assert!(lines[1].theta <= params.theta_step);

    Ok(())
}
