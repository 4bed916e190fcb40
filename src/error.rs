//! Error types for the safe GEMM entry points.
//!
//! Kernels and packers don't report errors: their inputs are contracts.
//! Only the driver validates, once per call, before any packing happens.

use thiserror::Error;

/// Errors that can occur when validating a GEMM call.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GemmError {
    /// A buffer length doesn't match the given dimensions.
    #[error("Dimension mismatch: {operand} expected {expected} elements, got {actual}")]
    DimensionMismatch {
        operand: &'static str,
        expected: usize,
        actual: usize,
    },

    /// MK4 needs `m` and `k` in whole groups of 4.
    #[error("{dim} = {value} is not a multiple of 4")]
    NotMultipleOfFour { dim: &'static str, value: usize },

    /// `m`, `n` and `k` describe a matrix too large to address.
    #[error("Shape {m}x{n}x{k} overflows usize")]
    ShapeOverflow { m: usize, n: usize, k: usize },

    /// Configuration rejected by `GemmConfig::validate`.
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// The config requires the dot-product extension and the CPU lacks it.
    #[error("CPU does not support the int8 dot-product extension")]
    DotProdUnavailable,
}

/// Result type for GEMM operations.
pub type Result<T> = std::result::Result<T, GemmError>;
