//! 8×4 int8 dot-product microkernel with column-remainder masking.

use super::{load_line, store_line};
use crate::simd::{Int8x4, Int8x16, Int32x4};

/// Computes an 8×4 tile: C[0:8, 0:n_remain] (+)= A_packed × B_packed
///
/// Eight accumulators: `c0..c3` are rows 0-3 of columns 0-3, `c4..c7` are
/// rows 4-7. This is the right-edge kernel for 8-row panels, so the B tile
/// may be a zero-padded short tile and `n_remain` (0..=4) says how many of
/// its columns are real. Only those columns are loaded (when accumulating)
/// and stored; memory past them is never touched. Values above 4 act as 4.
///
/// An odd step count is handled up front, then the loop consumes two steps
/// per trip. `k == 0` is allowed and just rewrites (or zeroes) the tile.
///
/// # Safety
///
/// Caller must ensure:
/// - `k` is a multiple of 4
/// - `pack_a` points to `8 * k` packed bytes
/// - `pack_b` points to `4 * k` packed bytes (a 4-column or padded tile)
/// - `output` and `output.add(ldc)` are each valid for reading and writing
///   `4 * min(n_remain, 4)` `i32`s
#[allow(unsafe_op_in_unsafe_fn)]
pub unsafe fn kern_8x4(
    pack_a: *const i8,
    pack_b: *const i8,
    k: usize,
    output: *mut i32,
    ldc: usize,
    is_first_k: bool,
    n_remain: usize,
) {
    let k = k / 4;
    let oddk = k & 1 == 1;
    let mut k_iter = k / 2;

    let mut a_ptr = pack_a;
    let mut b_ptr = pack_b;
    let outptr0 = output;
    let outptr1 = output.add(ldc);

    let [mut c0, mut c1, mut c2, mut c3] = if is_first_k {
        [Int32x4::zero(); 4]
    } else {
        load_line(outptr0, n_remain)
    };
    let [mut c4, mut c5, mut c6, mut c7] = if is_first_k {
        [Int32x4::zero(); 4]
    } else {
        load_line(outptr1, n_remain)
    };

    macro_rules! step {
        () => {{
            let b = Int8x4::load_n::<4>(b_ptr);
            let a0 = Int8x16::load(a_ptr);
            let a1 = Int8x16::load(a_ptr.add(16));
            b_ptr = b_ptr.add(16);
            a_ptr = a_ptr.add(32);

            c0 = c0.sdot_lane(a0, b[0]);
            c1 = c1.sdot_lane(a0, b[1]);
            c2 = c2.sdot_lane(a0, b[2]);
            c3 = c3.sdot_lane(a0, b[3]);
            c4 = c4.sdot_lane(a1, b[0]);
            c5 = c5.sdot_lane(a1, b[1]);
            c6 = c6.sdot_lane(a1, b[2]);
            c7 = c7.sdot_lane(a1, b[3]);
        }};
    }

    if oddk {
        step!();
    }

    while k_iter > 0 {
        step!();
        step!();
        k_iter -= 1;
    }

    store_line(outptr0, [c0, c1, c2, c3], n_remain);
    store_line(outptr1, [c4, c5, c6, c7], n_remain);
}
