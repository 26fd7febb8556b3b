use argh::FromArgs;

use arista::image::{Image, ImageSize};
use arista::imgproc::hough::{hough_lines, HoughLinesParams};

#[derive(FromArgs)]
/// Detect lines in a synthetic edge mask with the hough transform
struct Args {
    /// side length of the synthetic mask
    #[argh(option, short = 's', default = "200")]
    size: usize,

    /// vote count a line must exceed
    #[argh(option, short = 't', default = "80")]
    threshold: u32,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();
    if args.size < 16 {
        return Err("size must be at least 16".into());
    }

    // synthetic mask with one horizontal, one vertical and one diagonal segment
    let size = ImageSize {
        width: args.size,
        height: args.size,
    };
    let mut edges = Image::<u8, 1>::from_size_val(size, 0)?;
    let cols = edges.cols();
    let mid = args.size / 2;
    let lo = args.size / 8;
    let hi = args.size - lo;
    {
        let data = edges.as_slice_mut();
        for i in lo..hi {
            data[mid * cols + i] = 255;
            data[i * cols + mid] = 255;
            data[i * cols + i] = 255;
        }
    }

    let params = HoughLinesParams {
        vote_threshold: args.threshold,
        ..Default::default()
    };

    log::info!(
        "running the hough transform on a {}x{} mask with threshold {}",
        size.width,
        size.height,
        args.threshold
    );
    let lines = hough_lines(&edges, &params)?;

    println!("found {} lines", lines.len());
    for line in &lines {
        println!(
            "rho = {:8.2}  theta = {:6.1} deg  votes = {}",
            line.rho,
            line.theta.to_degrees(),
            line.votes
        );
    }

    Ok(())
}
