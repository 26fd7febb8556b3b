use argh::FromArgs;

use arista::image::{Image, ImageSize};
use arista::imgproc::harris::{
    harris_corners, harris_response_u8, CornerExtractParams, HarrisParams,
};

#[derive(FromArgs)]
/// Detect corners of a synthetic square outline with the harris detector
struct Args {
    /// side length of the synthetic image
    #[argh(option, short = 's', default = "100")]
    size: usize,

    /// fraction of the maximum response a corner must reach
    #[argh(option, short = 'r', default = "0.1")]
    relative_threshold: f32,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();
    if args.size < 16 {
        return Err("size must be at least 16".into());
    }

    // one pixel wide square outline
    let size = ImageSize {
        width: args.size,
        height: args.size,
    };
    let lo = args.size / 5;
    let hi = args.size - 1 - lo;
    let mut src = Image::<u8, 1>::from_size_val(size, 0)?;
    let cols = src.cols();
    {
        let data = src.as_slice_mut();
        for i in lo..=hi {
            data[lo * cols + i] = 255;
            data[hi * cols + i] = 255;
            data[i * cols + lo] = 255;
            data[i * cols + hi] = 255;
        }
    }

    log::info!(
        "computing the harris response on a {}x{} image",
        size.width,
        size.height
    );
    let mut response = Image::<f32, 1>::from_size_val(size, 0.0)?;
    harris_response_u8(&src, &mut response, &HarrisParams::default())?;

    let params = CornerExtractParams {
        relative_threshold: args.relative_threshold,
        ..Default::default()
    };
    let corners = harris_corners(&response, &params)?;

    println!("found {} corners", corners.len());
    for corner in &corners {
        println!(
            "x = {:4}  y = {:4}  response = {:10.4}",
            corner.x, corner.y, corner.response
        );
    }

    Ok(())
}
