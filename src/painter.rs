use lazy_static::lazy_static;
use wide::{f32x8, f64x4};

use crate::solver::LANES;

/// Just under 256, so a full budget truncates to 255.
pub const SCALE: f64 = 255.99;

lazy_static! {
    static ref SCALE4: f64x4 = f64x4::splat(SCALE);
}

/// Intensity of an escape time: `floor(255.99 * i / max_iter)`, in `f64`.
pub fn pack(i_value: u32, max_iter: u32) -> u8 {
    (SCALE * i_value as f64 / max_iter as f64) as u8
}

fn scale_half(lanes: &[f32], max_iter: f64x4) -> [f64; 4] {
    let half = f64x4::new([
        lanes[0] as f64,
        lanes[1] as f64,
        lanes[2] as f64,
        lanes[3] as f64,
    ]);
    (*SCALE4 * half / max_iter).floor().to_array()
}

/// Lane-wise [`pack`]. The products are floored in `f64` before narrowing
/// back to `f32`, so no lane rounds up to the next level. Each lane is then
/// truncated to a 32-bit integer and its low byte kept: byte `k` is the
/// pixel of lane `k`.
pub fn pack_group(i_values: f32x8, max_iter: u32) -> [u8; LANES] {
    let lanes = i_values.to_array();
    let max = f64x4::splat(max_iter as f64);
    let lo = scale_half(&lanes[..4], max);
    let hi = scale_half(&lanes[4..], max);
    let mut levels = [0.0f32; LANES];
    for (level, v) in levels.iter_mut().zip(lo.iter().chain(hi.iter())) {
        *level = *v as f32;
    }
    let ints = f32x8::new(levels).trunc_int().to_array();
    let mut bytes = [0u8; LANES];
    for (byte, int) in bytes.iter_mut().zip(ints) {
        *byte = int.to_le_bytes()[0];
    }
    bytes
}

/// Every intensity `pack` can produce for a budget.
pub fn intensity_levels(max_iter: u32) -> Vec<u8> {
    let mut values: Vec<u8> = (0..=max_iter).map(|i| pack(i, max_iter)).collect();
    values.dedup();
    values
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_pack_endpoints() {
        for max_iter in [1, 50, 100, 256, 10_000] {
            assert_eq!(pack(0, max_iter), 0);
            assert_eq!(pack(max_iter, max_iter), 255);
        }
    }

    #[test]
    fn test_pack_truncates() {
        // 255.99 * 25 / 50 = 127.995
        assert_eq!(pack(25, 50), 127);
        assert_eq!(pack(1, 256), 0);
        assert_eq!(pack(2, 256), 1);
        // 255.99 * 601 / 850 = 180.99998..., which an f32 product rounds to 181
        assert_eq!(pack(601, 850), 180);
    }

    #[test]
    fn test_pack_group_near_level_boundary() {
        let iters = [601, 0, 850, 425, 601, 1, 849, 600];
        let bytes = pack_group(f32x8::new(iters.map(|i| i as f32)), 850);
        assert_eq!(bytes[0], 180);
        assert_eq!(bytes[4], 180);
        for k in 0..LANES {
            assert_eq!(bytes[k], pack(iters[k], 850));
        }
    }

    #[test]
    fn test_pack_group_matches_pack_across_budgets() {
        for max_iter in (1..=2000).step_by(7) {
            for start in (0..=max_iter).step_by(LANES) {
                let mut lanes = [0.0f32; LANES];
                for (k, lane) in lanes.iter_mut().enumerate() {
                    *lane = (start + k as u32).min(max_iter) as f32;
                }
                let bytes = pack_group(f32x8::new(lanes), max_iter);
                for k in 0..LANES {
                    let expected = pack(lanes[k] as u32, max_iter);
                    assert_eq!(bytes[k], expected, "max_iter {}", max_iter);
                }
            }
        }
    }

    #[test]
    fn test_pack_is_monotone() {
        for max_iter in [1, 3, 50, 256, 5000] {
            let mut last = 0;
            for i in 0..=max_iter {
                let b = pack(i, max_iter);
                assert!(b >= last, "pack({}, {}) = {} < {}", i, max_iter, b, last);
                last = b;
            }
        }
    }

    #[test]
    fn test_pack_group_keeps_lane_order() {
        let bytes = pack_group(f32x8::new([0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]), 7);
        assert_eq!(bytes, [0, 36, 73, 109, 146, 182, 219, 255]);
    }

    #[test]
    fn test_intensity_levels() {
        let values = intensity_levels(50);
        assert_eq!(values.len(), 51);
        assert_eq!(values.first(), Some(&0));
        assert_eq!(values.last(), Some(&255));
        assert_eq!(intensity_levels(1000).len(), 256);
    }
}
