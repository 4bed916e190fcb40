//! Conversions between row-major matrices and the MK4 layout.
//!
//! MK4 groups 4 logical rows (A, C) or 4 reduction steps (B) into one
//! interleaved lane, so a single 16-byte load fetches a whole K-step:
//!
//! ```text
//! A (m × k):  a[(m/4)·4k + (k/4)·16 + (m%4)·4 + k%4]
//! B (k × n):  b[(k/4)·4n + n·4 + k%4]
//! C (m × n):  c[(m/4)·4n + n·4 + m%4]
//! ```
//!
//! `m` and `k` must be multiples of 4. `n` is free.

/// Converts a row-major `m × k` A into MK4. Group stride is `4 * k`.
///
/// # Example
///
/// ```
/// use mk4dot::matrix::mk4::a_to_mk4;
///
/// // 4×8: rows 0..4, each row is [r*10 + 0, .., r*10 + 7]
/// let a: Vec<i8> = (0..4).flat_map(|r| (0..8).map(move |c| r * 10 + c)).collect();
/// let mk4 = a_to_mk4(&a, 4, 8);
///
/// // First K-step: 4 k values of row 0, then row 1, ...
/// assert_eq!(&mk4[..8], &[0, 1, 2, 3, 10, 11, 12, 13]);
/// // Second K-step starts at byte 16.
/// assert_eq!(&mk4[16..20], &[4, 5, 6, 7]);
/// ```
pub fn a_to_mk4(a: &[i8], m: usize, k: usize) -> Vec<i8> {
    let mut out = vec![0i8; m * k];
    for i in 0..m {
        for p in 0..k {
            out[(i / 4) * 4 * k + (p / 4) * 16 + (i % 4) * 4 + p % 4] = a[i * k + p];
        }
    }
    out
}

/// Converts a row-major `k × n` B into MK4. K-step stride is `4 * n`.
pub fn b_to_mk4(b: &[i8], k: usize, n: usize) -> Vec<i8> {
    let mut out = vec![0i8; k * n];
    for p in 0..k {
        for j in 0..n {
            out[(p / 4) * 4 * n + j * 4 + p % 4] = b[p * n + j];
        }
    }
    out
}

/// Converts a row-major `m × n` C into MK4. Group stride (`ldc`) is `4 * n`.
pub fn c_to_mk4(c: &[i32], m: usize, n: usize) -> Vec<i32> {
    let mut out = vec![0i32; m * n];
    for i in 0..m {
        for j in 0..n {
            out[(i / 4) * 4 * n + j * 4 + i % 4] = c[i * n + j];
        }
    }
    out
}

/// Converts an MK4 `m × n` C back to row-major.
pub fn c_from_mk4(c_mk4: &[i32], m: usize, n: usize) -> Vec<i32> {
    let mut out = vec![0i32; m * n];
    for i in 0..m {
        for j in 0..n {
            out[i * n + j] = c_mk4[(i / 4) * 4 * n + j * 4 + i % 4];
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_b_to_mk4_layout() {
        // 4×2: column 0 is [1,2,3,4], column 1 is [5,6,7,8]
        let b = vec![1, 5, 2, 6, 3, 7, 4, 8];
        assert_eq!(b_to_mk4(&b, 4, 2), vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_c_round_trip() {
        let (m, n) = (8, 5);
        let c: Vec<i32> = (0..(m * n) as i32).map(|v| v * 3 - 7).collect();
        let mk4 = c_to_mk4(&c, m, n);
        assert_ne!(mk4, c);
        assert_eq!(c_from_mk4(&mk4, m, n), c);
    }
}
