use lazy_static::lazy_static;
use wide::{f32x8, CmpLe};

use crate::complex::*;
use crate::coord::Mapper;
use crate::painter::pack_group;
use crate::solver::{Solver, BAILOUT, DEFAULT_MAX_ITER, LANES};

lazy_static! {
    static ref ZERO: f32x8 = f32x8::splat(0.0);
    static ref ONE: f32x8 = f32x8::splat(1.0);
    static ref LIMIT: f32x8 = f32x8::splat(BAILOUT);
}

/// Escape times of eight points at once, one per lane, as whole numbers in
/// `f32` lanes.
///
/// A lane is active while `|z|^2 <= 4`. The mask computed at the top of a
/// step gates both the count increment and the orbit update of that step,
/// so a lane that has escaped keeps its count and its last `z`. The loop
/// ends early once no lane is active. Each lane equals
/// [`escape`](crate::solver::escape) for the same point.
pub fn escape_group(point: C8, max_iter: u32) -> f32x8 {
    let mut z = c8(*ZERO, *ZERO);
    let mut iters = *ZERO;
    for _ in 0..=max_iter {
        let x2 = z.x * z.x;
        let y2 = z.y * z.y;
        let active = (x2 + y2).cmp_le(*LIMIT);
        if !active.any() {
            break;
        }
        iters = active.blend(iters + *ONE, iters);

        let xy = z.x * z.y;
        let re = (x2 - y2) + point.x;
        let im = (xy + xy) + point.y;
        z = c8(active.blend(re, z.x), active.blend(im, z.y));
    }
    iters.min(f32x8::splat(max_iter as f32))
}

/// [`escape_group`] over plain arrays, with integer results.
pub fn escape_lanes(cx: [f32; LANES], cy: [f32; LANES], max_iter: u32) -> [u32; LANES] {
    let iters = escape_group(c8_from_arrays(cx, cy), max_iter).to_array();
    let mut out = [0; LANES];
    for (o, i) in out.iter_mut().zip(iters) {
        *o = i as u32;
    }
    out
}

#[derive(Clone, Debug)]
pub struct SimdSolver {
    max_iter: u32,
}

impl SimdSolver {
    pub fn new(max_iter: u32) -> Self {
        Self { max_iter }
    }
}

impl Default for SimdSolver {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ITER)
    }
}

impl Solver for SimdSolver {
    /// `row.len()` must be a multiple of [`LANES`].
    fn solve_row(&self, mapper: &Mapper, pixel_y: usize, row: &mut [u8]) {
        debug_assert_eq!(row.len() % LANES, 0, "row of {} bytes", row.len());
        for (group, chunk) in row.chunks_exact_mut(LANES).enumerate() {
            let point = mapper.map_group(group * LANES, pixel_y);
            let iters = escape_group(point, self.max_iter);
            chunk.copy_from_slice(&pack_group(iters, self.max_iter));
        }
    }

    fn group_size(&self) -> usize {
        LANES
    }

    fn max_iter(&self) -> u32 {
        self.max_iter
    }
}
