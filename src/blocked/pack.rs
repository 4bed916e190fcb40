//! Panel packing for the MK4 dot-product kernels.
//!
//! Both inputs are already MK4, so packing is mostly block copies: the only
//! real rearrangement is zipping two 4-row groups of A into one 8-row panel
//! and splitting B into 6-, 4- and padded short column tiles.

/// Bytes `pack_a` writes for `rows` rows (multiple of 4) and `k` depth.
pub fn packed_a_size(rows: usize, k: usize) -> usize {
    (rows / 4) * 4 * k
}

/// Bytes `pack_b` writes for `cols` columns and `k` depth.
///
/// Full 6-column tiles first, then whatever is left rounded up to 4-column
/// tiles (at most one full tile and one padded short tile).
pub fn packed_b_size(cols: usize, k: usize) -> usize {
    let tiles6 = cols / 6;
    let rest = cols - tiles6 * 6;
    tiles6 * 6 * k + rest.div_ceil(4) * 4 * k
}

/// Packs rows `[y0, ymax)` × depth `[k0, kmax)` of an MK4 A into `out`.
///
/// 8-row panels hold, for every K-step, the 16 bytes of the upper 4-row
/// group followed by the 16 bytes of the lower one, so the kernel reads one
/// 32-byte step per iteration. A trailing 4-row group is copied as is.
///
/// `lda` is the distance between 4-row groups in `input`, `y0` must be a
/// multiple of 4 and `kmax - k0` a multiple of 4. Rows past the last full
/// group of 4 are not packed.
///
/// # Panics
///
/// Panics if `input` or `out` is too short for the requested range.
pub fn pack_a(
    out: &mut [i8],
    input: &[i8],
    lda: usize,
    y0: usize,
    ymax: usize,
    k0: usize,
    kmax: usize,
) {
    let ksize = kmax - k0;
    let mut y = y0;
    let mut group = y0 / 4;
    let mut o = 0;

    while y + 8 <= ymax {
        let mut in0 = group * lda + k0 * 4;
        let mut in1 = in0 + lda;
        for _ in 0..ksize / 4 {
            out[o..o + 16].copy_from_slice(&input[in0..in0 + 16]);
            out[o + 16..o + 32].copy_from_slice(&input[in1..in1 + 16]);
            o += 32;
            in0 += 16;
            in1 += 16;
        }
        y += 8;
        group += 2;
    }

    while y + 4 <= ymax {
        let in0 = group * lda + k0 * 4;
        let len = ksize * 4;
        out[o..o + len].copy_from_slice(&input[in0..in0 + len]);
        o += len;
        y += 4;
        group += 1;
    }
}

/// Packs columns `[x0, xmax)` × depth `[k0, kmax)` of an MK4 B into `out`.
///
/// Output is tile-major: all 6-column tiles (24 bytes per K-step), then the
/// 4-column tile if any (16 bytes per step), then a short tile padded with
/// zero columns up to 4. Within a tile the K-steps are consecutive, so a
/// kernel streams it front to back.
///
/// `ldb` is the distance between K-steps in `input`; `kmax - k0` must be a
/// multiple of 4.
///
/// # Panics
///
/// Panics if `input` or `out` is too short for the requested range.
pub fn pack_b(
    out: &mut [i8],
    input: &[i8],
    ldb: usize,
    x0: usize,
    xmax: usize,
    k0: usize,
    kmax: usize,
) {
    let ksize = kmax - k0;
    let ksize4 = ksize * 4;
    let ksize6 = ksize * 6;
    let mut base6 = 0;
    let mut base4 = ((xmax - x0) / 6) * ksize6;

    let mut k = k0;
    while k + 4 <= kmax {
        let mut inp = (k / 4) * ldb + x0 * 4;

        let mut o = base6;
        let mut x = x0;
        while x + 6 <= xmax {
            out[o..o + 24].copy_from_slice(&input[inp..inp + 24]);
            o += ksize6;
            inp += 24;
            x += 6;
        }

        o = base4;
        while x + 4 <= xmax {
            out[o..o + 16].copy_from_slice(&input[inp..inp + 16]);
            o += ksize4;
            inp += 16;
            x += 4;
        }

        if x < xmax {
            let real = (xmax - x) * 4;
            out[o..o + real].copy_from_slice(&input[inp..inp + real]);
            out[o + real..o + 16].fill(0);
        }

        base6 += 24;
        base4 += 16;
        k += 4;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::mk4::{a_to_mk4, b_to_mk4};

    /// Reverses `pack_a` for an 8/4-row panel sequence back to row-major.
    fn unpack_a(packed: &[i8], rows: usize, k: usize) -> Vec<i8> {
        let mut a = vec![0i8; rows * k];
        let mut o = 0;
        let mut y = 0;
        while y < rows {
            let height = if y + 8 <= rows { 8 } else { 4 };
            for step in 0..k / 4 {
                for half in 0..height / 4 {
                    for r in 0..4 {
                        for kk in 0..4 {
                            a[(y + half * 4 + r) * k + step * 4 + kk] = packed[o];
                            o += 1;
                        }
                    }
                }
            }
            y += height;
        }
        a
    }

    /// Reverses `pack_b` back to row-major `k × cols`, also returning the
    /// padding bytes of the short tile.
    fn unpack_b(packed: &[i8], cols: usize, k: usize) -> (Vec<i8>, Vec<i8>) {
        let mut b = vec![0i8; k * cols];
        let mut padding = Vec::new();
        let mut o = 0;
        let mut x = 0;
        while x < cols {
            let width = if x + 6 <= cols { 6 } else { 4 };
            for step in 0..k / 4 {
                for j in 0..width {
                    for kk in 0..4 {
                        if x + j < cols {
                            b[(step * 4 + kk) * cols + x + j] = packed[o];
                        } else {
                            padding.push(packed[o]);
                        }
                        o += 1;
                    }
                }
            }
            x += width;
        }
        (b, padding)
    }

    #[test]
    fn test_packed_sizes() {
        assert_eq!(packed_a_size(12, 16), 12 * 16);
        assert_eq!(packed_b_size(6, 8), 48);
        assert_eq!(packed_b_size(10, 8), 80);
        assert_eq!(packed_b_size(11, 8), 6 * 8 + 8 * 8);
        assert_eq!(packed_b_size(3, 8), 32);
        assert_eq!(packed_b_size(8, 4), 6 * 4 + 4 * 4);
    }

    #[test]
    fn test_pack_a_round_trip() {
        for (rows, k) in [(8, 8), (12, 16), (4, 4), (20, 12)] {
            let a: Vec<i8> = (0..rows * k).map(|i| (i % 251) as i8).collect();
            let mk4 = a_to_mk4(&a, rows, k);
            let mut packed = vec![0i8; packed_a_size(rows, k)];
            pack_a(&mut packed, &mk4, k * 4, 0, rows, 0, k);

            assert_eq!(unpack_a(&packed, rows, k), a, "rows={} k={}", rows, k);
        }
    }

    #[test]
    fn test_pack_a_interleaves_two_groups() {
        let (rows, k) = (8, 4);
        let a: Vec<i8> = (0..rows * k).map(|i| i as i8).collect();
        let mk4 = a_to_mk4(&a, rows, k);
        let mut packed = vec![0i8; 32];
        pack_a(&mut packed, &mk4, k * 4, 0, rows, 0, k);

        // Upper group (rows 0-3) then lower group (rows 4-7), 4 k each.
        assert_eq!(&packed[..16], &a[..16]);
        assert_eq!(&packed[16..], &a[16..]);
    }

    #[test]
    fn test_pack_a_sub_range() {
        let (rows, k) = (16, 16);
        let a: Vec<i8> = (0..rows * k).map(|i| (i * 3 % 127) as i8).collect();
        let mk4 = a_to_mk4(&a, rows, k);

        // Rows 4..16, depth 8..16: one 8-row panel then one 4-row panel.
        let (y0, ymax, k0, kmax) = (4, 16, 8, 16);
        let mut packed = vec![0i8; packed_a_size(ymax - y0, kmax - k0)];
        pack_a(&mut packed, &mk4, k * 4, y0, ymax, k0, kmax);

        let sub: Vec<i8> = (y0..ymax)
            .flat_map(|i| a[i * k + k0..i * k + kmax].to_vec())
            .collect();
        assert_eq!(unpack_a(&packed, ymax - y0, kmax - k0), sub);
    }

    #[test]
    fn test_pack_b_round_trip_with_padding() {
        for (cols, k) in [(6, 8), (4, 4), (10, 16), (11, 8), (3, 12), (13, 4), (1, 4)] {
            let b: Vec<i8> = (0..k * cols).map(|i| (i % 97) as i8 + 1).collect();
            let mk4 = b_to_mk4(&b, k, cols);
            let mut packed = vec![i8::MAX; packed_b_size(cols, k)];
            pack_b(&mut packed, &mk4, cols * 4, 0, cols, 0, k);

            let (unpacked, padding) = unpack_b(&packed, cols, k);
            assert_eq!(unpacked, b, "cols={} k={}", cols, k);
            assert!(padding.iter().all(|&v| v == 0), "cols={} padding not zeroed", cols);

            let short = (cols % 6) % 4;
            let expected_pad = if short == 0 { 0 } else { (4 - short) * k };
            assert_eq!(padding.len(), expected_pad, "cols={}", cols);
        }
    }

    #[test]
    fn test_pack_b_sub_range() {
        let (k, cols) = (8, 12);
        let b: Vec<i8> = (0..k * cols).map(|i| (i % 50) as i8 - 25).collect();
        let mk4 = b_to_mk4(&b, k, cols);

        // Columns 2..12 (6 + 4), depth 4..8.
        let (x0, xmax, k0, kmax) = (2, 12, 4, 8);
        let mut packed = vec![0i8; packed_b_size(xmax - x0, kmax - k0)];
        pack_b(&mut packed, &mk4, cols * 4, x0, xmax, k0, kmax);

        let sub: Vec<i8> = (k0..kmax)
            .flat_map(|p| b[p * cols + x0..p * cols + xmax].to_vec())
            .collect();
        let (unpacked, padding) = unpack_b(&packed, xmax - x0, kmax - k0);
        assert_eq!(unpacked, sub);
        assert!(padding.is_empty());
    }

    #[test]
    fn test_pack_b_offset_range_with_short_tile() {
        let (k, cols) = (8, 13);
        let b: Vec<i8> = (0..k * cols).map(|i| (i % 61) as i8 - 30).collect();
        let mk4 = b_to_mk4(&b, k, cols);

        for x0 in 0..cols {
            let width = cols - x0;
            let mut packed = vec![i8::MIN; packed_b_size(width, k)];
            pack_b(&mut packed, &mk4, cols * 4, x0, cols, 0, k);

            let sub: Vec<i8> = (0..k)
                .flat_map(|p| b[p * cols + x0..p * cols + cols].to_vec())
                .collect();
            let (unpacked, padding) = unpack_b(&packed, width, k);
            assert_eq!(unpacked, sub, "x0={}", x0);
            assert!(padding.iter().all(|&v| v == 0), "x0={} padding not zeroed", x0);
        }
    }
}
