//! Blocking configuration for the MK4 driver.

use crate::error::{GemmError, Result};

/// Default depth block: keeps an 8-row A panel plus a B panel within L1.
pub const DEFAULT_KC: usize = 256;

/// Knobs for [`crate::blocked::gemm_mk4::gemm_mk4`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GemmConfig {
    /// Depth of one packed block. Blocks after the first accumulate onto C
    /// (`is_first_k = false`). Must be a non-zero multiple of 4.
    pub kc: usize,
    /// Add A·B onto the existing C instead of overwriting it.
    pub accumulate: bool,
    /// Refuse to run unless the CPU has the hardware dot-product extension.
    pub require_dotprod: bool,
}

impl Default for GemmConfig {
    fn default() -> Self {
        Self {
            kc: DEFAULT_KC,
            accumulate: false,
            require_dotprod: false,
        }
    }
}

impl GemmConfig {
    pub fn with_kc(mut self, kc: usize) -> Self {
        self.kc = kc;
        self
    }

    pub fn with_accumulate(mut self, accumulate: bool) -> Self {
        self.accumulate = accumulate;
        self
    }

    pub fn with_require_dotprod(mut self, require: bool) -> Self {
        self.require_dotprod = require;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.kc == 0 || self.kc % 4 != 0 {
            return Err(GemmError::InvalidConfig(format!(
                "kc must be a non-zero multiple of 4, got {}",
                self.kc
            )));
        }
        Ok(())
    }
}
