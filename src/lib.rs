//! Int8 matrix multiplication micro-kernels for the MK4 dot-product layout.
//!
//! The innermost piece of a quantized GEMM: four register-tiled kernels
//! (8×6, 8×4, 4×6, 4×4) that multiply packed int8 panels into int32 tiles
//! with a fused 4-way dot product per lane, plus the packers that build
//! those panels. Everything is expressed over a small portable vector
//! layer, so the results are bit-identical on every target.
//!
//! ## Usage
//!
//! Row-major in, row-major out:
//!
//! ```
//! use mk4dot::multiply;
//!
//! let (m, n, k) = (12, 10, 16);
//! let a = vec![1i8; m * k];
//! let b = vec![2i8; k * n];
//! let mut c = vec![0i32; m * n];
//!
//! multiply(&a, &b, &mut c, m, n, k).unwrap();
//! assert!(c.iter().all(|&v| v == 32));
//! ```
//!
//! If the data is already MK4, skip the conversions and call the driver:
//!
//! ```
//! use mk4dot::{gemm_mk4, GemmConfig};
//!
//! let (m, n, k) = (8, 6, 8);
//! let a = vec![1i8; m * k];
//! let b = vec![1i8; k * n];
//! let mut c = vec![0i32; m * n];
//!
//! gemm_mk4(&a, &b, &mut c, m, n, k, &GemmConfig::default().with_kc(4)).unwrap();
//! assert!(c.iter().all(|&v| v == 8));
//! ```
//!
//! ## What's inside
//!
//! - 8×6 and 4×6 kernels for full column tiles
//! - 8×4 and 4×4 kernels with `n_remain` masking for the right edge
//! - A/B panel packers (8-row zip, 6/4/padded column tiles)
//! - A single-threaded blocked driver with K splitting

pub mod blocked;
pub mod config;
pub mod detect;
pub mod error;
pub mod kernels;
pub mod matrix;
pub mod simd;

pub use blocked::gemm_mk4::gemm_mk4;
pub use config::GemmConfig;
pub use detect::{SimdLevel, simd_level};
pub use error::{GemmError, Result};
pub use matrix::naive::matmul_naive_i8;

/// Matrix multiply: C = A * B over int8, producing int32.
///
/// Matrices are row-major: A is m×k, B is k×n, C is m×n. They are
/// converted to MK4, multiplied with the default [`GemmConfig`], and C is
/// converted back.
///
/// # Errors
///
/// Returns [`GemmError`] if the slice sizes don't match m, n, k, or if `m`
/// or `k` is not a multiple of 4.
pub fn multiply(a: &[i8], b: &[i8], c: &mut [i32], m: usize, n: usize, k: usize) -> Result<()> {
    use matrix::mk4::{a_to_mk4, b_to_mk4, c_from_mk4};

    // Shapes must be checked before the conversions index into the slices.
    let config = GemmConfig::default();
    blocked::gemm_mk4::validate(a, b, c, m, n, k, &config)?;

    let a_mk4 = a_to_mk4(a, m, k);
    let b_mk4 = b_to_mk4(b, k, n);
    let mut c_mk4 = vec![0i32; m * n];

    gemm_mk4(&a_mk4, &b_mk4, &mut c_mk4, m, n, k, &config)?;

    c.copy_from_slice(&c_from_mk4(&c_mk4, m, n));
    Ok(())
}
