use std::fmt;
use std::str::FromStr;

use crate::coord::Mapper;
use crate::errors::*;

pub mod scalar;
pub mod simd;

pub use scalar::{escape, ScalarSolver};
pub use simd::{escape_group, escape_lanes, SimdSolver};

/// Lanes per group in the vector strategy.
pub const LANES: usize = 8;

/// Squared-magnitude bailout, i.e. `|z| > 2`.
pub const BAILOUT: f32 = 4.0;

pub const DEFAULT_MAX_ITER: u32 = 256;

/// Largest budget whose `max_iter + 1` is still an exact `f32` lane value.
pub const MAX_ITER_LIMIT: u32 = (1 << 24) - 2;

pub trait Solver {
    /// Fills one output row with intensities for image row `pixel_y`.
    fn solve_row(&self, mapper: &Mapper, pixel_y: usize, row: &mut [u8]);

    /// Number of pixels evaluated together; row widths must be a multiple.
    fn group_size(&self) -> usize;

    fn max_iter(&self) -> u32;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Strategy {
    Scalar,
    Simd,
}

impl Strategy {
    pub fn solver(&self, max_iter: u32) -> Box<dyn Solver> {
        match self {
            Self::Scalar => Box::new(ScalarSolver::new(max_iter)),
            Self::Simd => Box::new(SimdSolver::new(max_iter)),
        }
    }

    pub fn group_size(&self) -> usize {
        match self {
            Self::Scalar => 1,
            Self::Simd => LANES,
        }
    }
}

impl Default for Strategy {
    fn default() -> Self {
        Self::Simd
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Scalar => write!(f, "scalar"),
            Self::Simd => write!(f, "simd"),
        }
    }
}

impl FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "scalar" => Ok(Self::Scalar),
            "simd" | "vector" => Ok(Self::Simd),
            other => bail!(ErrorKind::InvalidConfig(format!(
                "unknown strategy '{}', expected 'scalar' or 'simd'",
                other
            ))),
        }
    }
}
