//! Basic matrix operations and naive implementations.
//!
//! These provide the correctness baseline and the layout conversions used
//! to feed the MK4 kernels from ordinary row-major data.

pub mod mk4;
pub mod naive;
