use std::path::PathBuf;
use std::process::exit;

use env_logger::Env;
use log::info;
use structopt::StructOpt;

use mandelgray::bench::Throughput;
use mandelgray::config::RenderConfig;
use mandelgray::coord::{ImageSpec, ViewWindow};
use mandelgray::errors::*;
use mandelgray::raster::Raster;
use mandelgray::solver::{Strategy, DEFAULT_MAX_ITER};
use mandelgray::Mandelbrot;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "mandelgray-imagegen",
    about = "Render a grayscale Mandelbrot raster to a PNG file"
)]
struct Opt {
    /// Image width in pixels (a multiple of 8 for the simd strategy)
    #[structopt(long, default_value = "3200")]
    width: usize,

    /// Image height in pixels (a multiple of 8 for the simd strategy)
    #[structopt(long, default_value = "3200")]
    height: usize,

    /// Iteration budget per pixel
    #[structopt(long = "max-iter", default_value = "256")]
    max_iter: u32,

    #[structopt(long = "center-x", default_value = "-0.1", allow_hyphen_values = true)]
    center_x: f32,

    #[structopt(long = "center-y", default_value = "0.8", allow_hyphen_values = true)]
    center_y: f32,

    #[structopt(long = "view-width", default_value = "0.2")]
    view_width: f32,

    #[structopt(long = "view-height", default_value = "0.2")]
    view_height: f32,

    /// Evaluation strategy: scalar or simd
    #[structopt(long, default_value = "simd")]
    strategy: Strategy,

    #[structopt(short, long, default_value = "out.png", parse(from_os_str))]
    output: PathBuf,

    /// Log at debug level
    #[structopt(short, long)]
    verbose: bool,
}

impl Opt {
    fn config(&self) -> RenderConfig {
        RenderConfig::new(
            ImageSpec::new(self.width, self.height),
            ViewWindow::new(self.center_x, self.center_y, self.view_width, self.view_height),
            self.max_iter,
            self.strategy,
        )
    }
}

fn main() {
    if let Err(ref e) = run() {
        eprintln!("error: {}", e);
        for e in e.iter().skip(1) {
            eprintln!("caused by: {}", e);
        }
        exit(1);
    }
}

fn run() -> Result<()> {
    let opt = Opt::from_args();
    let level = if opt.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();
    if opt.max_iter != DEFAULT_MAX_ITER {
        info!("iteration budget {} (default {})", opt.max_iter, DEFAULT_MAX_ITER);
    }

    let mandelbrot = Mandelbrot::new(opt.config())?;
    let mut raster = Raster::allocate(&mandelbrot.config.image)?;
    let pixels = mandelbrot.config.image.pixel_count();
    let (rendered, throughput) =
        Throughput::measure(pixels, || mandelbrot.render_into(&mut raster));
    rendered?;
    println!("{}", throughput);

    raster
        .save_png(&opt.output)
        .chain_err(|| format!("could not write '{}'", opt.output.display()))?;
    info!(
        "{}x{} {} render saved to {}",
        raster.width(),
        raster.height(),
        opt.strategy,
        opt.output.display()
    );
    Ok(())
}
