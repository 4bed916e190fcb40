//! 4×4 int8 dot-product microkernel with column-remainder masking.

use super::{load_line, store_line};
use crate::simd::{Int8x4, Int8x16, Int32x4};

/// Computes a 4×4 tile: C[0:4, 0:n_remain] (+)= A_packed × B_packed
///
/// The smallest kernel, used at the bottom-right corner: one 4-row group,
/// four accumulators, and the same `n_remain` masking as
/// [`super::kern_8x4`].
///
/// # Safety
///
/// Caller must ensure:
/// - `k` is a multiple of 4
/// - `pack_a` points to `4 * k` packed bytes
/// - `pack_b` points to `4 * k` packed bytes
/// - `output` is valid for reading and writing `4 * min(n_remain, 4)` `i32`s
#[allow(unsafe_op_in_unsafe_fn)]
pub unsafe fn kern_4x4(
    pack_a: *const i8,
    pack_b: *const i8,
    k: usize,
    output: *mut i32,
    _ldc: usize,
    is_first_k: bool,
    n_remain: usize,
) {
    let k = k / 4;
    let oddk = k & 1 == 1;
    let mut k_iter = k / 2;

    let mut a_ptr = pack_a;
    let mut b_ptr = pack_b;
    let outptr0 = output;

    let [mut c0, mut c1, mut c2, mut c3] = if is_first_k {
        [Int32x4::zero(); 4]
    } else {
        load_line(outptr0, n_remain)
    };

    macro_rules! step {
        () => {{
            let b = Int8x4::load_n::<4>(b_ptr);
            let a0 = Int8x16::load(a_ptr);
            b_ptr = b_ptr.add(16);
            a_ptr = a_ptr.add(16);

            c0 = c0.sdot_lane(a0, b[0]);
            c1 = c1.sdot_lane(a0, b[1]);
            c2 = c2.sdot_lane(a0, b[2]);
            c3 = c3.sdot_lane(a0, b[3]);
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
}
