use std::f64::consts::{FRAC_PI_2, PI};

use arista_image::{Image, ImageError};
use rayon::prelude::*;

use crate::extrema::{find_extrema_grid, ExtremaPolicy};

/// Errors produced by the hough line transform.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum HoughError {
    /// The rho resolution must be positive.
    #[error("rho step must be positive, got {0}")]
    InvalidRhoStep(f64),

    /// The theta resolution must lie in (0, pi).
    #[error("theta step must be in (0, pi), got {0}")]
    InvalidThetaStep(f64),

    /// At least one line must be requested.
    #[error("max_lines must be at least 1")]
    InvalidMaxLines,

    /// Error produced by image operations.
    #[error(transparent)]
    Image(#[from] ImageError),
}

/// A detected line in normal form.
///
/// The line is the set of points (x, y) with `x*cos(theta) + y*sin(theta) = rho`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    /// Signed distance from the origin in pixels.
    pub rho: f64,
    /// Angle of the line normal in radians, in [0, pi).
    pub theta: f64,
    /// Number of edge pixels that voted for the line.
    pub votes: u32,
}

/// Which line orientations pass the post-extraction filter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AngleFilter {
    /// Keep every orientation.
    All,
    /// Keep only lines whose normal angle lies within `tolerance` radians of
    /// 0, pi/2 or pi, i.e. nearly horizontal or vertical lines.
    AxisAligned {
        /// Angular tolerance in radians.
        tolerance: f64,
    },
}

/// Parameters for [`hough_lines`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoughLinesParams {
    /// Distance resolution of the accumulator in pixels.
    pub rho_step: f64,
    /// Angle resolution of the accumulator in radians.
    pub theta_step: f64,
    /// Minimum number of votes a cell must exceed to become a candidate.
    pub vote_threshold: u32,
    /// Maximum number of candidates considered for output.
    pub max_lines: usize,
    /// Orientation filter applied to candidates.
    pub angle_filter: AngleFilter,
    /// Candidates closer than this in rho to an accepted line are merged.
    pub rho_merge: f64,
    /// Candidates closer than this in wrapped theta to an accepted line are merged.
    pub theta_merge: f64,
}

impl Default for HoughLinesParams {
    fn default() -> Self {
        Self {
            rho_step: 1.0,
            theta_step: PI / 180.0,
            vote_threshold: 100,
            max_lines: 20,
            angle_filter: AngleFilter::All,
            rho_merge: 15.0,
            theta_merge: 0.15,
        }
    }
}

/// The vote accumulator over the (rho, theta) parameter plane.
///
/// A cell can collect at most one vote per edge pixel, so u32 counts cannot
/// overflow for any practical image size.
struct Accumulator {
    bins: Vec<u32>,
    num_rhos: usize,
    num_angles: usize,
    rho_max: f64,
}

/// Detect straight lines in a binary edge mask with the hough transform.
///
/// Every active pixel (value > 0) votes for all parameter cells whose line
/// passes through it. Cells that exceed the vote threshold and are local
/// maxima of the accumulator become candidates; candidates are walked in
/// descending vote order through the orientation filter and the duplicate
/// merge before conversion back to (rho, theta).
///
/// An empty mask, or a vote threshold above the achievable maximum, yields an
/// empty vector and no error.
///
/// # Arguments
///
/// * `edges` - The binary edge mask.
/// * `params` - The transform parameters.
///
/// # Returns
///
/// The detected lines ordered by descending vote count.
///
/// # Errors
///
/// Fails on invalid parameters or a zero-sized mask, before any allocation.
pub fn hough_lines(
    edges: &Image<u8, 1>,
    params: &HoughLinesParams,
) -> Result<Vec<Line>, HoughError> {
    if params.rho_step <= 0.0 {
        return Err(HoughError::InvalidRhoStep(params.rho_step));
    }
    if params.theta_step <= 0.0 || params.theta_step >= PI {
        return Err(HoughError::InvalidThetaStep(params.theta_step));
    }
    if params.max_lines == 0 {
        return Err(HoughError::InvalidMaxLines);
    }
    if edges.cols() == 0 || edges.rows() == 0 {
        return Err(ImageError::ZeroSizedImage.into());
    }

    let acc = fill_accumulator(edges, params.rho_step, params.theta_step);

    // candidate cells must strictly exceed the vote threshold and win their
    // 5x5 accumulator neighborhood; theta wraps, rho does not
    let gate = params.vote_threshold.saturating_add(1);
    let mut candidates = find_extrema_grid(
        &acc.bins,
        acc.num_angles,
        acc.num_rhos,
        2,
        1,
        gate,
        true,
        ExtremaPolicy::StrictMax,
    );

    candidates.sort_unstable_by(|a, b| {
        b.value
            .cmp(&a.value)
            .then(a.y.cmp(&b.y))
            .then(a.x.cmp(&b.x))
    });
    candidates.truncate(params.max_lines);

    let mut lines: Vec<Line> = Vec::new();
    for candidate in candidates {
        let rho = candidate.y as f64 * params.rho_step - acc.rho_max;
        let theta = candidate.x as f64 * params.theta_step;

        if !passes_angle_filter(params.angle_filter, theta) {
            continue;
        }
        if lines
            .iter()
            .any(|line| near_duplicate(line, rho, theta, params.rho_merge, params.theta_merge))
        {
            continue;
        }

        lines.push(Line {
            rho,
            theta,
            votes: candidate.value,
        });
    }

    Ok(lines)
}

/// Fill the vote accumulator for the given edge mask.
///
/// Rows are processed in parallel with one partial accumulator per partition,
/// merged by element-wise addition afterwards.
fn fill_accumulator(edges: &Image<u8, 1>, rho_step: f64, theta_step: f64) -> Accumulator {
    let cols = edges.cols();
    let rows = edges.rows();

    let rho_max = ((cols * cols + rows * rows) as f64).sqrt();
    let num_angles = (PI / theta_step).ceil() as usize;
    let num_rhos = (2.0 * rho_max / rho_step).ceil() as usize + 1;

    // trig lookup tables, one entry per angle bin
    let (cos_table, sin_table): (Vec<f64>, Vec<f64>) = (0..num_angles)
        .map(|t| {
            let angle = t as f64 * theta_step;
            (angle.cos(), angle.sin())
        })
        .unzip();

    let bins = edges
        .as_slice()
        .par_chunks_exact(cols)
        .enumerate()
        .fold(
            || vec![0u32; num_rhos * num_angles],
            |mut bins, (y, row)| {
                for (x, &pixel) in row.iter().enumerate() {
                    if pixel == 0 {
                        continue;
                    }
                    for t in 0..num_angles {
                        let rho = x as f64 * cos_table[t] + y as f64 * sin_table[t];
                        let rho_idx = ((rho + rho_max) / rho_step).round() as isize;
                        if rho_idx >= 0 && (rho_idx as usize) < num_rhos {
                            bins[rho_idx as usize * num_angles + t] += 1;
                        }
                    }
                }
                bins
            },
        )
        .reduce(
            || vec![0u32; num_rhos * num_angles],
            |mut a, b| {
                a.iter_mut().zip(b).for_each(|(a, b)| *a += b);
                a
            },
        );

    Accumulator {
        bins,
        num_rhos,
        num_angles,
        rho_max,
    }
}

fn passes_angle_filter(filter: AngleFilter, theta: f64) -> bool {
    match filter {
        AngleFilter::All => true,
        AngleFilter::AxisAligned { tolerance } => {
            theta < tolerance || (theta - FRAC_PI_2).abs() < tolerance || PI - theta < tolerance
        }
    }
}

/// True when the candidate parameters describe nearly the same physical line
/// as an already accepted one.
fn near_duplicate(line: &Line, rho: f64, theta: f64, rho_merge: f64, theta_merge: f64) -> bool {
    let mut theta_diff = (theta - line.theta).abs();
    // the normal angle wraps: theta and pi - theta describe close orientations
    if theta_diff > FRAC_PI_2 {
        theta_diff = PI - theta_diff;
    }
    (rho - line.rho).abs() < rho_merge && theta_diff < theta_merge
}

#[cfg(test)]
mod tests {
    use super::*;
    use arista_image::ImageSize;

    fn mask_with_pixels(size: ImageSize, pixels: &[(usize, usize)]) -> Image<u8, 1> {
        let mut mask = Image::from_size_val(size, 0u8).unwrap();
        let cols = mask.cols();
        for &(x, y) in pixels {
            mask.as_slice_mut()[y * cols + x] = 255;
        }
        mask
    }

    #[test]
    fn accumulator_counts_votes() {
        // a single edge pixel votes once per angle bin
        let mask = mask_with_pixels(
            ImageSize {
                width: 16,
                height: 16,
            },
            &[(5, 7)],
        );

        let acc = fill_accumulator(&mask, 1.0, PI / 4.0);
        assert_eq!(acc.num_angles, 4);

        let total: u32 = acc.bins.iter().sum();
        assert_eq!(total, 4);
    }

    #[test]
    fn accumulator_bins_match_geometry() {
        let mask = mask_with_pixels(
            ImageSize {
                width: 16,
                height: 16,
            },
            &[(5, 7)],
        );

        let acc = fill_accumulator(&mask, 1.0, PI / 2.0);
        // theta = 0: rho = x = 5
        let rho_idx = ((5.0 + acc.rho_max) / 1.0_f64).round() as usize;
        assert_eq!(acc.bins[rho_idx * acc.num_angles], 1);
        // theta = pi/2: rho = y = 7
        let rho_idx = ((7.0 + acc.rho_max) / 1.0_f64).round() as usize;
        assert_eq!(acc.bins[rho_idx * acc.num_angles + 1], 1);
    }

    #[test]
    fn empty_mask_yields_no_lines() -> Result<(), HoughError> {
        let mask = Image::from_size_val(
            ImageSize {
                width: 64,
                height: 64,
            },
            0u8,
        )
        .map_err(HoughError::from)?;

        let lines = hough_lines(&mask, &HoughLinesParams::default())?;
        assert!(lines.is_empty());

        // a zero threshold must not resurrect empty cells
        let params = HoughLinesParams {
            vote_threshold: 0,
            ..Default::default()
        };
        let lines = hough_lines(&mask, &params)?;
        assert!(lines.is_empty());

        Ok(())
    }

    #[test]
    fn unreachable_threshold_yields_no_lines() -> Result<(), HoughError> {
        let size = ImageSize {
            width: 64,
            height: 64,
        };
        let pixels: Vec<(usize, usize)> = (8..56).map(|x| (x, 32)).collect();
        let mask = mask_with_pixels(size, &pixels);

        let params = HoughLinesParams {
            vote_threshold: 1_000_000,
            ..Default::default()
        };
        let lines = hough_lines(&mask, &params)?;
        assert!(lines.is_empty());

        Ok(())
    }

    #[test]
    fn rejects_invalid_parameters() {
        let mask = Image::from_size_val(
            ImageSize {
                width: 8,
                height: 8,
            },
            0u8,
        )
        .unwrap();

        let params = HoughLinesParams {
            rho_step: 0.0,
            ..Default::default()
        };
        assert_eq!(
            hough_lines(&mask, &params),
            Err(HoughError::InvalidRhoStep(0.0))
        );

        let params = HoughLinesParams {
            theta_step: PI,
            ..Default::default()
        };
        assert_eq!(
            hough_lines(&mask, &params),
            Err(HoughError::InvalidThetaStep(PI))
        );

        let params = HoughLinesParams {
            max_lines: 0,
            ..Default::default()
        };
        assert_eq!(hough_lines(&mask, &params), Err(HoughError::InvalidMaxLines));
    }

    #[test]
    fn rejects_zero_sized_mask() {
        let mask = Image::<u8, 1>::new(
            ImageSize {
                width: 0,
                height: 0,
            },
            vec![],
        )
        .unwrap();

        assert_eq!(
            hough_lines(&mask, &HoughLinesParams::default()),
            Err(HoughError::Image(ImageError::ZeroSizedImage))
        );
    }

    #[test]
    fn horizontal_segment_recovered() -> Result<(), HoughError> {
        let size = ImageSize {
            width: 100,
            height: 100,
        };
        let pixels: Vec<(usize, usize)> = (10..90).map(|x| (x, 40)).collect();
        let mask = mask_with_pixels(size, &pixels);

        let params = HoughLinesParams {
            vote_threshold: 40,
            ..Default::default()
        };
        let lines = hough_lines(&mask, &params)?;

        assert_eq!(lines.len(), 1);
        let line = &lines[0];
        assert!((line.theta - FRAC_PI_2).abs() < 2.0 * params.theta_step);
        assert!((line.rho - 40.0).abs() <= params.rho_step);
        assert_eq!(line.votes, 80);

        Ok(())
    }

    #[test]
    fn axis_aligned_filter_drops_diagonals() -> Result<(), HoughError> {
        let size = ImageSize {
            width: 100,
            height: 100,
        };
        // the main diagonal: theta = 3*pi/4, about 45 degrees from both axes
        let pixels: Vec<(usize, usize)> = (10..90).map(|i| (i, i)).collect();
        let mask = mask_with_pixels(size, &pixels);

        let open = HoughLinesParams {
            vote_threshold: 40,
            ..Default::default()
        };
        let found = hough_lines(&mask, &open)?;
        assert!(!found.is_empty());

        let filtered = HoughLinesParams {
            angle_filter: AngleFilter::AxisAligned {
                tolerance: 15.0_f64.to_radians(),
            },
            ..open
        };
        let found = hough_lines(&mask, &filtered)?;
        assert!(found.is_empty());

        Ok(())
    }

    #[test]
    fn duplicate_merge_collapses_near_lines() {
        let line = Line {
            rho: 50.0,
            theta: FRAC_PI_2,
            votes: 100,
        };

        assert!(near_duplicate(&line, 52.0, FRAC_PI_2 + 0.02, 15.0, 0.15));
        assert!(!near_duplicate(&line, 80.0, FRAC_PI_2, 15.0, 0.15));
        assert!(!near_duplicate(&line, 50.0, FRAC_PI_2 + 0.5, 15.0, 0.15));

        // wrapped comparison: theta near 0 and near pi describe close normals
        let near_zero = Line {
            rho: 30.0,
            theta: 0.05,
            votes: 100,
        };
        assert!(near_duplicate(&near_zero, 30.0, PI - 0.05, 15.0, 0.15));
    }

    #[test]
    fn deterministic_output() -> Result<(), HoughError> {
        let size = ImageSize {
            width: 128,
            height: 128,
        };
        let mut pixels: Vec<(usize, usize)> = (10..120).map(|x| (x, 30)).collect();
        pixels.extend((5..100).map(|y| (64, y)));
        pixels.extend((20..110).map(|i| (i, i)));
        let mask = mask_with_pixels(size, &pixels);

        let params = HoughLinesParams {
            vote_threshold: 30,
            ..Default::default()
        };

        let first = hough_lines(&mask, &params)?;
        let second = hough_lines(&mask, &params)?;
        assert_eq!(first, second);
        assert!(!first.is_empty());

        Ok(())
    }
}
