use lazy_static::lazy_static;
use num::{traits::NumOps, Num, One};
use wide::f32x8;

use crate::complex::*;

lazy_static! {
    static ref LANE_OFFSETS: f32x8 = f32x8::new([0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
}

trait Two {
    fn two() -> Self;
}

impl<T> Two for T
where
    T: One + NumOps,
{
    fn two() -> Self {
        T::one() + T::one()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Axis<T> {
    pub min: T,
    pub max: T,
}

impl<T> Axis<T>
where
    T: Num + Copy,
{
    pub fn new(min: T, max: T) -> Self {
        Self { min, max }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Frame<T> {
    pub x: Axis<T>,
    pub y: Axis<T>,
}

impl<T> Frame<T>
where
    T: Num + Copy,
{
    pub fn new(x: Axis<T>, y: Axis<T>) -> Self {
        Self { x, y }
    }

    pub fn from_box(center_x: T, center_y: T, width: T, height: T) -> Self {
        let x1 = center_x - (width / T::two());
        let x2 = center_x + (width / T::two());
        let y1 = center_y - (height / T::two());
        let y2 = center_y + (height / T::two());
        Self::new(Axis::new(x1, x2), Axis::new(y1, y2))
    }
}

/// Region of the complex plane sampled by a render.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ViewWindow {
    pub center_x: f32,
    pub center_y: f32,
    pub width: f32,
    pub height: f32,
}

impl ViewWindow {
    pub fn new(center_x: f32, center_y: f32, width: f32, height: f32) -> Self {
        Self {
            center_x,
            center_y,
            width,
            height,
        }
    }

    pub fn frame(&self) -> Frame<f32> {
        Frame::from_box(self.center_x, self.center_y, self.width, self.height)
    }
}

impl Default for ViewWindow {
    fn default() -> Self {
        Self::new(-0.1, 0.8, 0.2, 0.2)
    }
}

/// Pixel dimensions of the output raster.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ImageSpec {
    pub pixel_width: usize,
    pub pixel_height: usize,
    pub channels: usize,
}

impl ImageSpec {
    pub fn new(pixel_width: usize, pixel_height: usize) -> Self {
        Self {
            pixel_width,
            pixel_height,
            channels: 1,
        }
    }

    pub fn pixel_count(&self) -> usize {
        self.pixel_width * self.pixel_height
    }

    pub fn row_len(&self) -> usize {
        self.pixel_width * self.channels
    }

    /// Byte offset of `channel` of pixel `(x, y)` in a row-major buffer.
    pub fn offset(&self, x: usize, y: usize, channel: usize) -> usize {
        y * self.row_len() + x * self.channels + channel
    }

    pub fn pixels(&self) -> PixelIter {
        PixelIter {
            x: 0,
            y: 0,
            width: self.pixel_width,
            height: self.pixel_height,
        }
    }
}

impl Default for ImageSpec {
    fn default() -> Self {
        Self::new(3200, 3200)
    }
}

/// Row-major `(x, y)` pixel positions, row 0 first.
pub struct PixelIter {
    x: usize,
    y: usize,
    width: usize,
    height: usize,
}

impl Iterator for PixelIter {
    type Item = (usize, usize);
    fn next(&mut self) -> Option<(usize, usize)> {
        if self.width == 0 || self.y >= self.height {
            return None;
        }
        let current = (self.x, self.y);
        self.x += 1;
        if self.x == self.width {
            self.x = 0;
            self.y += 1;
        }
        Some(current)
    }
}

/// Maps pixel positions to sample points, measured from the bottom left
/// corner of the view in steps of `width / pixel_width`.
///
/// The group form offsets one pixel column by `0..8` before scaling, so
/// lane `k` of `map_group(x, y)` is bit-identical to `map(x + k, y)`.
#[derive(Copy, Clone, Debug)]
pub struct Mapper {
    botleft_x: f32,
    botleft_y: f32,
    step_x: f32,
    step_y: f32,
}

impl Mapper {
    pub fn new(image: &ImageSpec, view: &ViewWindow) -> Self {
        let frame = view.frame();
        Self {
            botleft_x: frame.x.min,
            botleft_y: frame.y.min,
            step_x: view.width / image.pixel_width as f32,
            step_y: view.height / image.pixel_height as f32,
        }
    }

    pub fn re(&self, pixel_x: usize) -> f32 {
        self.botleft_x + pixel_x as f32 * self.step_x
    }

    pub fn im(&self, pixel_y: usize) -> f32 {
        self.botleft_y + pixel_y as f32 * self.step_y
    }

    pub fn map(&self, pixel_x: usize, pixel_y: usize) -> C<f32> {
        c(self.re(pixel_x), self.im(pixel_y))
    }

    pub fn map_group(&self, pixel_x: usize, pixel_y: usize) -> C8 {
        let xs = f32x8::splat(pixel_x as f32) + *LANE_OFFSETS;
        let re = f32x8::splat(self.botleft_x) + xs * f32x8::splat(self.step_x);
        c8(re, f32x8::splat(self.im(pixel_y)))
    }
}

pub fn map(pixel_x: usize, pixel_y: usize, image: &ImageSpec, view: &ViewWindow) -> C<f32> {
    Mapper::new(image, view).map(pixel_x, pixel_y)
}
