/// Naive int8 matrix multiplication using i-k-j loop order.
///
/// Each output accumulates its products one at a time in increasing `p`,
/// with int32 wrapping like the kernels. This is the oracle the MK4 kernels
/// are checked against.
///
/// # Arguments
///
/// * `a` - Matrix A (m × k), row-major
/// * `b` - Matrix B (k × n), row-major
/// * `c` - Matrix C (m × n), row-major, accumulated into (C += A * B)
/// * `m` - Rows of A and C
/// * `n` - Columns of B and C
/// * `k` - Columns of A, rows of B
pub fn matmul_naive_i8(a: &[i8], b: &[i8], c: &mut [i32], m: usize, n: usize, k: usize) {
    for i in 0..m {
        for p in 0..k {
            let a_ip = a[i * k + p] as i32;
            for j in 0..n {
                c[i * n + j] = c[i * n + j].wrapping_add(a_ip * b[p * n + j] as i32);
            }
        }
    }
}
