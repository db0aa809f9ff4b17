use log::debug;

use crate::config::RenderConfig;
use crate::coord::Mapper;
use crate::errors::*;
use crate::raster::Raster;
use crate::solver::Solver;

pub mod bench;
pub mod complex;
pub mod config;
pub mod coord;
pub mod errors;
pub mod painter;
pub mod raster;
pub mod solver;

/// A validated render: configuration, coordinate mapping and the solver for
/// the configured strategy.
pub struct Mandelbrot {
    pub config: RenderConfig,
    mapper: Mapper,
    solver: Box<dyn Solver>,
}

impl Mandelbrot {
    pub fn new(config: RenderConfig) -> Result<Self> {
        config.validate()?;
        debug!(
            "{}x{} px, view {}x{} at ({}, {}), max_iter {}, {} strategy",
            config.image.pixel_width,
            config.image.pixel_height,
            config.view.width,
            config.view.height,
            config.view.center_x,
            config.view.center_y,
            config.max_iter,
            config.strategy
        );
        Ok(Self {
            mapper: Mapper::new(&config.image, &config.view),
            solver: config.strategy.solver(config.max_iter),
            config,
        })
    }

    pub fn render(&self) -> Result<Raster> {
        let mut raster = Raster::allocate(&self.config.image)?;
        self.render_into(&mut raster)?;
        Ok(raster)
    }

    /// Overwrites every byte of `raster`, which must match the configured
    /// image.
    pub fn render_into(&self, raster: &mut Raster) -> Result<()> {
        let image = &self.config.image;
        if (raster.width(), raster.height()) != (image.pixel_width, image.pixel_height)
            || raster.channels() != image.channels
        {
            bail!(ErrorKind::RasterMismatch(
                (image.pixel_width, image.pixel_height),
                (raster.width(), raster.height())
            ));
        }
        for (pixel_y, row) in raster.rows_mut().enumerate() {
            self.solver.solve_row(&self.mapper, pixel_y, row);
        }
        debug!(
            "rendered {} rows with {}-pixel groups",
            image.pixel_height,
            self.solver.group_size()
        );
        Ok(())
    }
}

pub fn mandelbrot(config: RenderConfig) -> Result<Raster> {
    Mandelbrot::new(config)?.render()
}
