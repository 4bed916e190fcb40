//! Portable fixed-width vectors for the int8 dot-product kernels.
//!
//! The kernels are written against these three types instead of target
//! intrinsics. Each operation mirrors one hardware instruction of the
//! `sdot` family:
//!
//! | Operation              | Hardware equivalent        |
//! |------------------------|----------------------------|
//! | `Int8x16::load`        | `vld1.s8 {q}`              |
//! | `Int8x4::load`         | one 32-bit lane of a `d`   |
//! | `Int32x4::load/store`  | `vld1.32` / `vst1.32`      |
//! | `Int32x4::sdot_lane`   | `vsdot.s8 q, q, d[lane]`   |
//!
//! The values are plain arrays, so the compiler is free to keep them in
//! vector registers.

/// 16 signed bytes: one MK4 step of a 4-row group (4 rows × 4 k values).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(C, align(16))]
pub struct Int8x16(pub [i8; 16]);

/// 4 signed bytes: one MK4 step of a single column of B.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(C, align(4))]
pub struct Int8x4(pub [i8; 4]);

/// 4 int32 accumulator lanes: one column of a 4-row output group.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(C, align(16))]
pub struct Int32x4(pub [i32; 4]);

impl Int8x16 {
    /// # Safety
    ///
    /// `ptr` must be valid for reading 16 bytes. No alignment required.
    #[inline(always)]
    pub unsafe fn load(ptr: *const i8) -> Self {
        Self(unsafe { ptr.cast::<[i8; 16]>().read_unaligned() })
    }
}

impl Int8x4 {
    /// # Safety
    ///
    /// `ptr` must be valid for reading 4 bytes. No alignment required.
    #[inline(always)]
    pub unsafe fn load(ptr: *const i8) -> Self {
        Self(unsafe { ptr.cast::<[i8; 4]>().read_unaligned() })
    }

    /// Loads `N` consecutive columns of one packed B step.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reading `4 * N` bytes.
    #[inline(always)]
    pub unsafe fn load_n<const N: usize>(ptr: *const i8) -> [Self; N] {
        let mut out = [Self::default(); N];
        for (j, lane) in out.iter_mut().enumerate() {
            *lane = unsafe { Self::load(ptr.add(j * 4)) };
        }
        out
    }
}

impl Int32x4 {
    #[inline(always)]
    pub fn zero() -> Self {
        Self([0; 4])
    }

    /// # Safety
    ///
    /// `ptr` must be valid for reading 4 `i32`s. No alignment required.
    #[inline(always)]
    pub unsafe fn load(ptr: *const i32) -> Self {
        Self(unsafe { ptr.cast::<[i32; 4]>().read_unaligned() })
    }

    /// # Safety
    ///
    /// `ptr` must be valid for writing 4 `i32`s. No alignment required.
    #[inline(always)]
    pub unsafe fn store(self, ptr: *mut i32) {
        unsafe { ptr.cast::<[i32; 4]>().write_unaligned(self.0) }
    }

    /// `self[i] += dot(a[4i..4i+4], b)` for each of the four lanes.
    ///
    /// The four products of a lane are summed first, then added into the
    /// accumulator with wrapping, matching `vsdot.s8` bit for bit. The
    /// partial dot itself cannot overflow: `4 * 128 * 128` fits in i32.
    #[inline(always)]
    pub fn sdot_lane(self, a: Int8x16, b: Int8x4) -> Self {
        let mut out = self.0;
        for (i, acc) in out.iter_mut().enumerate() {
            let row = &a.0[i * 4..i * 4 + 4];
            let dot = row[0] as i32 * b.0[0] as i32
                + row[1] as i32 * b.0[1] as i32
                + row[2] as i32 * b.0[2] as i32
                + row[3] as i32 * b.0[3] as i32;
            *acc = acc.wrapping_add(dot);
        }
        Self(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sdot_lane_matches_scalar() {
        let a = Int8x16(core::array::from_fn(|i| i as i8 - 8));
        let b = Int8x4([3, -1, 2, -4]);
        let acc = Int32x4([10, 20, 30, 40]).sdot_lane(a, b);

        for i in 0..4 {
            let mut expected = [10, 20, 30, 40][i];
            for j in 0..4 {
                expected += a.0[i * 4 + j] as i32 * b.0[j] as i32;
            }
            assert_eq!(acc.0[i], expected, "lane {}", i);
        }
    }

    #[test]
    fn test_sdot_lane_extremes() {
        let a = Int8x16([i8::MIN; 16]);
        let b = Int8x4([i8::MIN; 4]);
        let acc = Int32x4::zero().sdot_lane(a, b);
        assert_eq!(acc, Int32x4([4 * 128 * 128; 4]));
    }

    #[test]
    fn test_sdot_lane_wraps_like_hardware() {
        let a = Int8x16([1; 16]);
        let b = Int8x4([1, 0, 0, 0]);
        let acc = Int32x4([i32::MAX; 4]).sdot_lane(a, b);
        assert_eq!(acc, Int32x4([i32::MIN; 4]));
    }

    #[test]
    fn test_load_store_unaligned() {
        let src: Vec<i32> = (0..9).collect();
        let v = unsafe { Int32x4::load(src.as_ptr().add(1)) };
        assert_eq!(v, Int32x4([1, 2, 3, 4]));

        let mut dst = vec![-1i32; 9];
        unsafe { v.store(dst.as_mut_ptr().add(3)) };
        assert_eq!(dst, vec![-1, -1, -1, 1, 2, 3, 4, -1, -1]);

        let bytes: Vec<i8> = (0..25).collect();
        let cols = unsafe { Int8x4::load_n::<6>(bytes.as_ptr().add(1)) };
        assert_eq!(cols[0], Int8x4([1, 2, 3, 4]));
        assert_eq!(cols[5], Int8x4([21, 22, 23, 24]));
    }
}
