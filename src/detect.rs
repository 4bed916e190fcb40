//! Runtime detection of the int8 dot-product extension.
//!
//! Detection never selects a code path: the kernels are written against
//! the portable vectors in [`crate::simd`] and always run. The detected
//! level only gates `GemmConfig::require_dotprod` and is logged.

use std::sync::OnceLock;

/// What the host offers for int8 dot products.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimdLevel {
    /// No `sdot`-style instruction detected.
    Portable,
    /// Armv8.2 `dotprod` (`sdot`/`udot`) available.
    DotProd,
}

impl SimdLevel {
    pub fn has_dotprod(self) -> bool {
        self == SimdLevel::DotProd
    }
}

static SIMD_LEVEL: OnceLock<SimdLevel> = OnceLock::new();

/// Detected level, computed once per process.
pub fn simd_level() -> SimdLevel {
    *SIMD_LEVEL.get_or_init(|| {
        let level = detect();
        log::debug!("int8 dot-product support: {:?}", level);
        level
    })
}

#[cfg(target_arch = "aarch64")]
fn detect() -> SimdLevel {
    if std::arch::is_aarch64_feature_detected!("dotprod") {
        SimdLevel::DotProd
    } else {
        SimdLevel::Portable
    }
}

#[cfg(not(target_arch = "aarch64"))]
fn detect() -> SimdLevel {
    SimdLevel::Portable
}
