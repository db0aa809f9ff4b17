use std::path::Path;
use std::slice::ChunksExactMut;

use image::{ColorType, ImageFormat};
use log::debug;

use crate::coord::ImageSpec;
use crate::errors::*;

/// Row-major intensity buffer, row 0 first, `channels` bytes per pixel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    width: usize,
    height: usize,
    channels: usize,
    pixels: Vec<u8>,
}

impl Raster {
    /// Allocates a zeroed raster; fails rather than aborting if the memory
    /// is not available.
    pub fn allocate(image: &ImageSpec) -> Result<Self> {
        Self::filled(image, 0)
    }

    pub fn filled(image: &ImageSpec, value: u8) -> Result<Self> {
        let len = image
            .pixel_width
            .checked_mul(image.pixel_height)
            .and_then(|n| n.checked_mul(image.channels))
            .ok_or_else(|| {
                ErrorKind::InvalidConfig(format!(
                    "{}x{}x{} raster overflows usize",
                    image.pixel_width, image.pixel_height, image.channels
                ))
            })?;
        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(len)
            .map_err(|_| ErrorKind::Allocation(len))?;
        pixels.resize(len, value);
        debug!("allocated {} byte raster", len);
        Ok(Self {
            width: image.pixel_width,
            height: image.pixel_height,
            channels: image.channels,
            pixels,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.pixels
    }

    pub fn rows_mut(&mut self) -> ChunksExactMut<u8> {
        let row_len = (self.width * self.channels).max(1);
        self.pixels.chunks_exact_mut(row_len)
    }

    /// Encodes the raster as a single-channel PNG. The raster is left
    /// untouched whether or not encoding succeeds.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let width = u32::try_from(self.width)?;
        let height = u32::try_from(self.height)?;
        image::save_buffer_with_format(
            path.as_ref(),
            &self.pixels,
            width,
            height,
            ColorType::L8,
            ImageFormat::Png,
        )?;
        debug!("wrote {}", path.as_ref().display());
        Ok(())
    }
}
