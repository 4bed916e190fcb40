//! Blocked int8 GEMM over MK4 operands using the dot-product kernels.

use crate::blocked::pack::{pack_a, pack_b, packed_a_size, packed_b_size};
use crate::config::GemmConfig;
use crate::detect::simd_level;
use crate::error::{GemmError, Result};
use crate::kernels::{kern_4x4, kern_4x6, kern_8x4, kern_8x6};

/// Cache-blocked int8 matrix multiplication: C = A × B (or C += A × B when
/// `config.accumulate` is set).
///
/// All three matrices are MK4 (see [`crate::matrix::mk4`]): A is `m × k`,
/// B is `k × n`, C is `m × n` int32 with group stride `4 * n`. `m` and `k`
/// must be multiples of 4, `n` is arbitrary.
///
/// K is split into `config.kc` blocks. For each block A and B are packed
/// once, then every output tile is covered by one kernel call: 8-row panels
/// use 8×6 across the full 6-column tiles and 8×4 (with `n_remain`) on the
/// right edge, and a trailing 4-row panel does the same with 4×6 and 4×4.
/// The first block resets the accumulators, later ones add onto C.
///
/// # Errors
///
/// Returns an error without touching C if a dimension or buffer length is
/// wrong, if the shape is too large to address, if the config is invalid, or if `require_dotprod` is set on a CPU
/// without the extension.
pub fn gemm_mk4(
    a: &[i8],
    b: &[i8],
    c: &mut [i32],
    m: usize,
    n: usize,
    k: usize,
    config: &GemmConfig,
) -> Result<()> {
    validate(a, b, c, m, n, k, config)?;

    let level = simd_level();
    log::debug!(
        "gemm_mk4: m={} n={} k={} kc={} accumulate={} simd={:?}",
        m,
        n,
        k,
        config.kc,
        config.accumulate,
        level
    );
    if config.require_dotprod && !level.has_dotprod() {
        return Err(GemmError::DotProdUnavailable);
    }

    if m == 0 || n == 0 {
        return Ok(());
    }
    if k == 0 {
        if !config.accumulate {
            c.fill(0);
        }
        return Ok(());
    }

    let lda = k * 4;
    let ldb = n * 4;
    let ldc = n * 4;
    let kc = config.kc.min(k);

    // Pre-allocate buffers for packed data, reused by every K block.
    let mut a_panel = vec![0i8; packed_a_size(m, kc)];
    let mut b_panel = vec![0i8; packed_b_size(n, kc)];

    for kk in (0..k).step_by(kc) {
        let k_block = (kk + kc).min(k) - kk;
        let is_first_k = kk == 0 && !config.accumulate;
        log::trace!("gemm_mk4: k block {}..{} first={}", kk, kk + k_block, is_first_k);

        pack_a(&mut a_panel, a, lda, 0, m, kk, kk + k_block);
        pack_b(&mut b_panel, b, ldb, 0, n, kk, kk + k_block);

        // SAFETY: panels were sized for (m, n, kc) and filled for k_block <= kc;
        // c was checked to hold m * n values with group stride ldc.
        unsafe {
            run_tiles(&a_panel, &b_panel, c, m, n, k_block, ldc, is_first_k);
        }
    }

    Ok(())
}

/// Shape and config checks shared with [`crate::multiply`].
pub(crate) fn validate(
    a: &[i8],
    b: &[i8],
    c: &[i32],
    m: usize,
    n: usize,
    k: usize,
    config: &GemmConfig,
) -> Result<()> {
    config.validate()?;

    if m % 4 != 0 {
        return Err(GemmError::NotMultipleOfFour { dim: "m", value: m });
    }
    if k % 4 != 0 {
        return Err(GemmError::NotMultipleOfFour { dim: "k", value: k });
    }

    let overflow = || GemmError::ShapeOverflow { m, n, k };
    for (operand, expected, actual) in [
        ("A", m.checked_mul(k).ok_or_else(overflow)?, a.len()),
        ("B", k.checked_mul(n).ok_or_else(overflow)?, b.len()),
        ("C", m.checked_mul(n).ok_or_else(overflow)?, c.len()),
    ] {
        if expected != actual {
            return Err(GemmError::DimensionMismatch {
                operand,
                expected,
                actual,
            });
        }
    }
    Ok(())
}

/// Sweeps every output tile of one K block.
///
/// # Safety
///
/// `a_panel` holds `pack_a` output for rows `0..m` and depth `k_block`,
/// `b_panel` holds `pack_b` output for columns `0..n` and the same depth,
/// `k_block` is a non-zero multiple of 4 and `c` is an MK4 `m × n` buffer
/// with group stride `ldc`.
#[allow(unsafe_op_in_unsafe_fn)]
#[allow(clippy::too_many_arguments)]
unsafe fn run_tiles(
    a_panel: &[i8],
    b_panel: &[i8],
    c: &mut [i32],
    m: usize,
    n: usize,
    k_block: usize,
    ldc: usize,
    is_first_k: bool,
) {
    // Right-edge tiles live after all the 6-column tiles.
    let tail_base = (n / 6) * 6 * k_block;
    let b_ptr = b_panel.as_ptr();
    let c_ptr = c.as_mut_ptr();

    let mut y = 0;
    while y + 8 <= m {
        let a_ptr = a_panel.as_ptr().add(y * k_block);
        let out = c_ptr.add((y / 4) * ldc);

        let mut x = 0;
        while x + 6 <= n {
            kern_8x6(a_ptr, b_ptr.add(x * k_block), k_block, out.add(x * 4), ldc, is_first_k);
            x += 6;
        }

        let mut b_off = tail_base;
        while x < n {
            let n_remain = (n - x).min(4);
            kern_8x4(a_ptr, b_ptr.add(b_off), k_block, out.add(x * 4), ldc, is_first_k, n_remain);
            x += 4;
            b_off += 4 * k_block;
        }
        y += 8;
    }

    if y + 4 <= m {
        let a_ptr = a_panel.as_ptr().add(y * k_block);
        let out = c_ptr.add((y / 4) * ldc);

        let mut x = 0;
        while x + 6 <= n {
            kern_4x6(a_ptr, b_ptr.add(x * k_block), k_block, out.add(x * 4), ldc, is_first_k);
            x += 6;
        }

        let mut b_off = tail_base;
        while x < n {
            let n_remain = (n - x).min(4);
            kern_4x4(a_ptr, b_ptr.add(b_off), k_block, out.add(x * 4), ldc, is_first_k, n_remain);
            x += 4;
            b_off += 4 * k_block;
        }
    }
}
