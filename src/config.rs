use crate::coord::{ImageSpec, ViewWindow};
use crate::errors::*;
use crate::solver::{Strategy, DEFAULT_MAX_ITER, MAX_ITER_LIMIT};

/// Largest pixel index still exact as an `f32`.
pub const MAX_DIMENSION: usize = 1 << 24;

/// Everything fixed for one render. Nothing here changes while a render
/// runs.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RenderConfig {
    pub image: ImageSpec,
    pub view: ViewWindow,
    pub max_iter: u32,
    pub strategy: Strategy,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            image: ImageSpec::default(),
            view: ViewWindow::default(),
            max_iter: DEFAULT_MAX_ITER,
            strategy: Strategy::default(),
        }
    }
}

impl RenderConfig {
    pub fn new(image: ImageSpec, view: ViewWindow, max_iter: u32, strategy: Strategy) -> Self {
        Self {
            image,
            view,
            max_iter,
            strategy,
        }
    }

    pub fn validate(&self) -> Result<()> {
        let ImageSpec {
            pixel_width,
            pixel_height,
            channels,
        } = self.image;
        if channels != 1 {
            bail!(ErrorKind::InvalidConfig(format!(
                "{} channels requested, only single-channel output is supported",
                channels
            )));
        }
        for (name, n) in [("width", pixel_width), ("height", pixel_height)] {
            if n == 0 || n > MAX_DIMENSION {
                bail!(ErrorKind::InvalidConfig(format!(
                    "image {} {} is outside 1..={}",
                    name, n, MAX_DIMENSION
                )));
            }
        }
        let group = self.strategy.group_size();
        for (name, n) in [("width", pixel_width), ("height", pixel_height)] {
            if n % group != 0 {
                bail!(ErrorKind::InvalidConfig(format!(
                    "image {} {} is not divisible by {}, the {} group size",
                    name, n, group, self.strategy
                )));
            }
        }

        let ViewWindow {
            center_x,
            center_y,
            width,
            height,
        } = self.view;
        if !(center_x.is_finite() && center_y.is_finite()) {
            bail!(ErrorKind::InvalidConfig(format!(
                "view center ({}, {}) is not finite",
                center_x, center_y
            )));
        }
        for (name, v) in [("width", width), ("height", height)] {
            if !(v.is_finite() && v > 0.0) {
                bail!(ErrorKind::InvalidConfig(format!(
                    "view {} {} must be positive and finite",
                    name, v
                )));
            }
        }

        if self.max_iter == 0 || self.max_iter > MAX_ITER_LIMIT {
            bail!(ErrorKind::InvalidConfig(format!(
                "max iterations {} is outside 1..={}",
                self.max_iter, MAX_ITER_LIMIT
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn assert_invalid(config: RenderConfig) {
        match config.validate() {
            Err(e) => assert!(
                matches!(e.kind(), ErrorKind::InvalidConfig(_)),
                "unexpected error {}",
                e
            ),
            Ok(()) => panic!("{:?} should be rejected", config),
        }
    }

    #[test]
    fn test_default_is_valid() {
        let config = RenderConfig::default();
        assert_eq!(config.image, ImageSpec::new(3200, 3200));
        assert_eq!(config.max_iter, 256);
        config.validate().unwrap();
    }

    #[test]
    fn test_width_must_fit_groups() {
        let image = ImageSpec::new(20, 8);
        let view = ViewWindow::default();
        assert_invalid(RenderConfig::new(image, view, 50, Strategy::Simd));
        RenderConfig::new(image, view, 50, Strategy::Scalar)
            .validate()
            .unwrap();
    }

    #[test]
    fn test_height_must_fit_groups() {
        let image = ImageSpec::new(16, 5);
        let view = ViewWindow::default();
        assert_invalid(RenderConfig::new(image, view, 50, Strategy::Simd));
        RenderConfig::new(image, view, 50, Strategy::Scalar)
            .validate()
            .unwrap();
    }

    #[test]
    fn test_rejects_bad_image() {
        let view = ViewWindow::default();
        assert_invalid(RenderConfig::new(ImageSpec::new(0, 8), view, 50, Strategy::Scalar));
        assert_invalid(RenderConfig::new(ImageSpec::new(8, 0), view, 50, Strategy::Scalar));
        assert_invalid(RenderConfig::new(
            ImageSpec::new(MAX_DIMENSION + 8, 8),
            view,
            50,
            Strategy::Scalar,
        ));
        let mut rgb = ImageSpec::new(8, 8);
        rgb.channels = 3;
        assert_invalid(RenderConfig::new(rgb, view, 50, Strategy::Scalar));
    }

    #[test]
    fn test_rejects_bad_view() {
        let image = ImageSpec::new(16, 8);
        for view in [
            ViewWindow::new(0.0, 0.0, 0.0, 1.0),
            ViewWindow::new(0.0, 0.0, 1.0, -1.0),
            ViewWindow::new(0.0, 0.0, f32::NAN, 1.0),
            ViewWindow::new(f32::INFINITY, 0.0, 1.0, 1.0),
        ] {
            assert_invalid(RenderConfig::new(image, view, 50, Strategy::Simd));
        }
    }

    #[test]
    fn test_rejects_bad_budget() {
        let image = ImageSpec::new(16, 8);
        let view = ViewWindow::default();
        assert_invalid(RenderConfig::new(image, view, 0, Strategy::Simd));
        assert_invalid(RenderConfig::new(image, view, MAX_ITER_LIMIT + 1, Strategy::Simd));
        RenderConfig::new(image, view, MAX_ITER_LIMIT, Strategy::Simd)
            .validate()
            .unwrap();
    }
}
