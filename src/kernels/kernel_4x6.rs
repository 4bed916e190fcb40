//! 4×6 int8 dot-product microkernel (MK4 layout).

use super::load_or_zero;
use crate::simd::{Int8x4, Int8x16};

/// Computes a 4×6 tile: C[0:4, 0:6] (+)= A_packed × B_packed
///
/// The bottom-edge partner of [`super::kern_8x6`]: one 4-row group, six
/// accumulators `c0..c5`, one per output column. Same two-step loop and
/// odd tail. `k == 0` zeroes the tile on the first K block and leaves it
/// alone otherwise.
///
/// # Safety
///
/// Caller must ensure:
/// - `k` is a multiple of 4
/// - `pack_a` points to `4 * k` packed bytes (a 4-row panel from `pack_a`)
/// - `pack_b` points to `6 * k` packed bytes (a 6-column tile from `pack_b`)
/// - `output` is valid for reading and writing 24 `i32`s
#[allow(unsafe_op_in_unsafe_fn)]
#[allow(clippy::identity_op)]
#[allow(clippy::erasing_op)]
pub unsafe fn kern_4x6(
    pack_a: *const i8,
    pack_b: *const i8,
    k: usize,
    output: *mut i32,
    _ldc: usize,
    is_first_k: bool,
) {
    let k = k / 4;
    let oddk = k & 1 == 1;
    let mut k_iter = k.div_ceil(2).saturating_sub(1);

    let mut a_ptr = pack_a;
    let mut b_ptr = pack_b;
    let outptr0 = output;

    let mut c0 = load_or_zero(outptr0.add(0 * 4), is_first_k);
    let mut c1 = load_or_zero(outptr0.add(1 * 4), is_first_k);
    let mut c2 = load_or_zero(outptr0.add(2 * 4), is_first_k);
    let mut c3 = load_or_zero(outptr0.add(3 * 4), is_first_k);
    let mut c4 = load_or_zero(outptr0.add(4 * 4), is_first_k);
    let mut c5 = load_or_zero(outptr0.add(5 * 4), is_first_k);

    macro_rules! step {
        () => {{
            let b = Int8x4::load_n::<6>(b_ptr);
            let a0 = Int8x16::load(a_ptr);
            b_ptr = b_ptr.add(24);
            a_ptr = a_ptr.add(16);

            c0 = c0.sdot_lane(a0, b[0]);
            c1 = c1.sdot_lane(a0, b[1]);
            c2 = c2.sdot_lane(a0, b[2]);
            c3 = c3.sdot_lane(a0, b[3]);
            c4 = c4.sdot_lane(a0, b[4]);
            c5 = c5.sdot_lane(a0, b[5]);
        }};
    }

    while k_iter > 0 {
        step!();
        step!();
        k_iter -= 1;
    }

    if k > 0 {
        step!();
        if !oddk {
            step!();
        }
    }

    c0.store(outptr0.add(0 * 4));
    c1.store(outptr0.add(1 * 4));
    c2.store(outptr0.add(2 * 4));
    c3.store(outptr0.add(3 * 4));
    c4.store(outptr0.add(4 * 4));
    c5.store(outptr0.add(5 * 4));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernels::test_util::{at, expected, make_tile};

    #[test]
    fn test_kernel_4x6_correctness() {
        for steps in [1, 2, 3, 4, 7, 16] {
            let k = steps * 4;
            let tile = make_tile(4, 6, k);
            let ldc = 6 * 4;
            let mut c = vec![0i32; ldc];

            unsafe {
                kern_4x6(tile.pack_a.as_ptr(), tile.pack_b.as_ptr(), k, c.as_mut_ptr(), ldc, true);
            }

            for i in 0..4 {
                for j in 0..6 {
                    assert_eq!(
                        at(&c, ldc, i, j),
                        expected(&tile, 6, k, i, j),
                        "k={} mismatch at ({}, {})",
                        k,
                        i,
                        j
                    );
                }
            }
        }
    }

    #[test]
    fn test_kernel_4x6_accumulates_onto_c() {
        let k = 12;
        let tile = make_tile(4, 6, k);
        let ldc = 6 * 4;
        let mut c = vec![100i32; ldc];

        unsafe {
            kern_4x6(tile.pack_a.as_ptr(), tile.pack_b.as_ptr(), k, c.as_mut_ptr(), ldc, false);
        }

        for i in 0..4 {
            for j in 0..6 {
                assert_eq!(at(&c, ldc, i, j), 100 + expected(&tile, 6, k, i, j));
            }
        }
    }

    #[test]
    fn test_kernel_4x6_first_k_ignores_garbage() {
        let k = 8;
        let tile = make_tile(4, 6, k);
        let ldc = 6 * 4;
        let mut c = vec![i32::MIN; ldc];

        unsafe {
            kern_4x6(tile.pack_a.as_ptr(), tile.pack_b.as_ptr(), k, c.as_mut_ptr(), ldc, true);
        }

        for i in 0..4 {
            for j in 0..6 {
                assert_eq!(at(&c, ldc, i, j), expected(&tile, 6, k, i, j));
            }
        }
    }

    #[test]
    fn test_kernel_4x6_zero_k() {
        let ldc = 6 * 4;
        let empty: Vec<i8> = Vec::new();

        let mut c = vec![-3i32; ldc];
        unsafe {
            kern_4x6(empty.as_ptr(), empty.as_ptr(), 0, c.as_mut_ptr(), ldc, true);
        }
        assert!(c.iter().all(|&v| v == 0));

        let mut c = vec![-3i32; ldc];
        unsafe {
            kern_4x6(empty.as_ptr(), empty.as_ptr(), 0, c.as_mut_ptr(), ldc, false);
        }
        assert!(c.iter().all(|&v| v == -3));
    }
}
