//! Cache-blocked int8 GEMM over MK4 operands.
//!
//! The driver breaks K into blocks, packs A and B for sequential access,
//! then calls the dot-product microkernels for every output tile.
//!
//! - `pack`: A/B panel packers and their buffer sizes
//! - `gemm_mk4`: the blocked driver choosing 8×6 / 8×4 / 4×6 / 4×4 per tile

pub mod gemm_mk4;
pub mod pack;
