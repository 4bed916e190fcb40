//! 8×6 int8 dot-product microkernel (MK4 layout).

use super::load_or_zero;
use crate::simd::{Int8x4, Int8x16};

/// Computes an 8×6 tile: C[0:8, 0:6] (+)= A_packed × B_packed
///
/// Uses 12 accumulators: `c0..c5` hold rows 0-3 of columns 0-5, `c6..c11`
/// hold rows 4-7. Every K-step loads one 6-column B step (24 bytes) and
/// the two 4-row halves of A (32 bytes), then issues 12 lane dot products.
///
/// The reduction loop consumes two steps per trip. `oddk` is fixed at
/// entry and only picks whether the tail runs one or two more steps.
/// `k == 0` skips the tail and just rewrites (or zeroes) the tile.
///
/// # Safety
///
/// Caller must ensure:
/// - `k` is a multiple of 4
/// - `pack_a` points to `8 * k` packed bytes (an 8-row panel from `pack_a`)
/// - `pack_b` points to `6 * k` packed bytes (a 6-column tile from `pack_b`)
/// - `output` and `output.add(ldc)` are each valid for reading and writing
///   24 `i32`s, and nobody else touches that region during the call
#[allow(unsafe_op_in_unsafe_fn)]
#[allow(clippy::identity_op)]
#[allow(clippy::erasing_op)]
pub unsafe fn kern_8x6(
    pack_a: *const i8,
    pack_b: *const i8,
    k: usize,
    output: *mut i32,
    ldc: usize,
    is_first_k: bool,
) {
    let k = k / 4;
    let oddk = k & 1 == 1;
    let mut k_iter = k.div_ceil(2).saturating_sub(1);

    let mut a_ptr = pack_a;
    let mut b_ptr = pack_b;
    let outptr0 = output;
    let outptr1 = output.add(ldc);

    let mut c0 = load_or_zero(outptr0.add(0 * 4), is_first_k);
    let mut c1 = load_or_zero(outptr0.add(1 * 4), is_first_k);
    let mut c2 = load_or_zero(outptr0.add(2 * 4), is_first_k);
    let mut c3 = load_or_zero(outptr0.add(3 * 4), is_first_k);
    let mut c4 = load_or_zero(outptr0.add(4 * 4), is_first_k);
    let mut c5 = load_or_zero(outptr0.add(5 * 4), is_first_k);
    let mut c6 = load_or_zero(outptr1.add(0 * 4), is_first_k);
    let mut c7 = load_or_zero(outptr1.add(1 * 4), is_first_k);
    let mut c8 = load_or_zero(outptr1.add(2 * 4), is_first_k);
    let mut c9 = load_or_zero(outptr1.add(3 * 4), is_first_k);
    let mut c10 = load_or_zero(outptr1.add(4 * 4), is_first_k);
    let mut c11 = load_or_zero(outptr1.add(5 * 4), is_first_k);

    macro_rules! step {
        () => {{
            let b = Int8x4::load_n::<6>(b_ptr);
            let a0 = Int8x16::load(a_ptr);
            let a1 = Int8x16::load(a_ptr.add(16));
            b_ptr = b_ptr.add(24);
            a_ptr = a_ptr.add(32);

            c0 = c0.sdot_lane(a0, b[0]);
            c1 = c1.sdot_lane(a0, b[1]);
            c2 = c2.sdot_lane(a0, b[2]);
            c3 = c3.sdot_lane(a0, b[3]);
            c4 = c4.sdot_lane(a0, b[4]);
            c5 = c5.sdot_lane(a0, b[5]);
            c6 = c6.sdot_lane(a1, b[0]);
            c7 = c7.sdot_lane(a1, b[1]);
            c8 = c8.sdot_lane(a1, b[2]);
            c9 = c9.sdot_lane(a1, b[3]);
            c10 = c10.sdot_lane(a1, b[4]);
            c11 = c11.sdot_lane(a1, b[5]);
        }};
    }

    while k_iter > 0 {
        step!();
        step!();
        k_iter -= 1;
    }

    // Tail: one or two steps left, never zero.
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
    c6.store(outptr1.add(0 * 4));
    c7.store(outptr1.add(1 * 4));
    c8.store(outptr1.add(2 * 4));
    c9.store(outptr1.add(3 * 4));
    c10.store(outptr1.add(4 * 4));
    c11.store(outptr1.add(5 * 4));
}
