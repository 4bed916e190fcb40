//! Int8 dot-product microkernels for the inner loop of the MK4 GEMM.
//!
//! Each kernel computes one output tile of C (+)= A_packed × B_packed over
//! int8 operands with int32 accumulators. They're called by the blocked
//! driver after A and B have been packed by [`crate::blocked::pack`].
//!
//! Available kernels:
//! - `kernel_8x6`: 8×6 tile, 12 accumulators, full tiles only
//! - `kernel_8x4`: 8×4 tile, 8 accumulators, `n_remain` column masking
//! - `kernel_4x6`: 4×6 tile, 6 accumulators, full tiles only
//! - `kernel_4x4`: 4×4 tile, 4 accumulators, `n_remain` column masking
//!
//! Output is MK4: a 4-row group of one column is 4 contiguous `i32`s, the
//! columns of a group follow each other, and `ldc` (in `i32`s) separates
//! consecutive 4-row groups.

pub mod kernel_4x4;
pub mod kernel_4x6;
pub mod kernel_8x4;
pub mod kernel_8x6;

pub use kernel_4x4::kern_4x4;
pub use kernel_4x6::kern_4x6;
pub use kernel_8x4::kern_8x4;
pub use kernel_8x6::kern_8x6;

use crate::simd::Int32x4;

/// Zero when starting a fresh reduction, otherwise the current value of C.
///
/// # Safety
///
/// When `is_first_k` is false, `ptr` must be valid for reading 4 `i32`s.
#[inline(always)]
pub(crate) unsafe fn load_or_zero(ptr: *const i32, is_first_k: bool) -> Int32x4 {
    if is_first_k {
        Int32x4::zero()
    } else {
        unsafe { Int32x4::load(ptr) }
    }
}

/// Loads the first `n_remain` columns of a 4-row output group. Columns past
/// `n_remain` come back as zero and are never read from memory.
///
/// # Safety
///
/// `ptr` must be valid for reading `4 * min(n_remain, 4)` `i32`s.
#[inline(always)]
pub(crate) unsafe fn load_line(ptr: *const i32, n_remain: usize) -> [Int32x4; 4] {
    let mut line = [Int32x4::zero(); 4];
    for (j, col) in line.iter_mut().enumerate().take(n_remain.min(4)) {
        *col = unsafe { Int32x4::load(ptr.add(j * 4)) };
    }
    line
}

/// Stores the first `n_remain` columns of a 4-row output group.
///
/// # Safety
///
/// `ptr` must be valid for writing `4 * min(n_remain, 4)` `i32`s.
#[inline(always)]
pub(crate) unsafe fn store_line(ptr: *mut i32, line: [Int32x4; 4], n_remain: usize) {
    for (j, col) in line.iter().enumerate().take(n_remain.min(4)) {
        unsafe { col.store(ptr.add(j * 4)) };
    }
}
