use crate::complex::*;
use crate::coord::Mapper;
use crate::painter::pack;
use crate::solver::{Solver, BAILOUT, DEFAULT_MAX_ITER};

/// Escape time of `cx + cy i`: the number of `z = z^2 + c` steps taken
/// from `z = 0` before `|z|^2 > 4`, or `max_iter` if the orbit stays
/// bounded. The magnitude is checked before each step, so the count is
/// the iteration at which the failing check happened.
pub fn escape(cx: f32, cy: f32, max_iter: u32) -> u32 {
    let point = c(cx, cy);
    let mut z = c(0.0, 0.0);
    let mut iter = 0;
    while iter <= max_iter {
        if z.norm_sqr() > BAILOUT {
            break;
        }
        z = (z * z) + point;
        iter += 1;
    }
    iter.min(max_iter)
}

#[derive(Clone, Debug)]
pub struct ScalarSolver {
    max_iter: u32,
}

impl ScalarSolver {
    pub fn new(max_iter: u32) -> Self {
        Self { max_iter }
    }
}

impl Default for ScalarSolver {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ITER)
    }
}

impl Solver for ScalarSolver {
    fn solve_row(&self, mapper: &Mapper, pixel_y: usize, row: &mut [u8]) {
        let cy = mapper.im(pixel_y);
        for (pixel_x, byte) in row.iter_mut().enumerate() {
            let i = escape(mapper.re(pixel_x), cy, self.max_iter);
            *byte = pack(i, self.max_iter);
        }
    }

    fn group_size(&self) -> usize {
        1
    }

    fn max_iter(&self) -> u32 {
        self.max_iter
    }
}
