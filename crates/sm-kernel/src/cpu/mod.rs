pub mod parallel;

pub use parallel::ParallelCpuBackend;

use crate::backend::ComputeBackend;
use crate::dims::Dims;
use crate::element::Element;
use crate::matrix::LocalMatrix;

/// Pure-Rust sequential CPU backend.
///
/// Computes the output cells in row-major order with straightforward nested
/// loops. This is the reference implementation and the default.
#[derive(Debug, Clone)]
pub struct CpuBackend;

impl CpuBackend {
    pub fn new() -> Self {
        CpuBackend
    }
}

impl Default for CpuBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// One output cell: the dot product of row `i` of `a` with column `j` of
/// `b`, accumulated over `k = 0..n` in order.
#[inline]
pub(crate) fn dot<T: Element>(
    a: &LocalMatrix<T>,
    b: &LocalMatrix<T>,
    i: usize,
    j: usize,
    n: usize,
) -> T {
    let mut sum = T::zero();
    for k in 0..n {
        sum = sum.mul_add_wrapping(a[(i, k)], b[(k, j)]);
    }
    sum
}

impl<T: Element> ComputeBackend<T> for CpuBackend {
    fn name(&self) -> &str {
        "cpu"
    }

    fn matmul(&self, a: &LocalMatrix<T>, b: &LocalMatrix<T>, dims: Dims, c: &mut LocalMatrix<T>) {
        for i in 0..dims.m() {
            for j in 0..dims.p() {
                c[(i, j)] = dot(a, b, i, j, dims.n());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matmul(a: &[i32], b: &[i32], dims: Dims) -> Vec<i32> {
        let a = LocalMatrix::from_row_major(dims.m(), dims.n(), a).unwrap();
        let b = LocalMatrix::from_row_major(dims.n(), dims.p(), b).unwrap();
        let mut c = LocalMatrix::zeroed();
        CpuBackend::new().matmul(&a, &b, dims, &mut c);
        c.to_row_major(dims.m(), dims.p())
    }

    #[test]
    fn test_matmul_basic() {
        // [1,2;3,4] @ [5,6;7,8] = [19,22;43,50]
        let dims = Dims::new(2, 2, 2).unwrap();
        assert_eq!(matmul(&[1, 2, 3, 4], &[5, 6, 7, 8], dims), vec![19, 22, 43, 50]);
    }

    #[test]
    fn test_matmul_rectangular() {
        // [1,2,3] @ [4;5;6] = [32]
        let dims = Dims::new(1, 3, 1).unwrap();
        assert_eq!(matmul(&[1, 2, 3], &[4, 5, 6], dims), vec![32]);

        // [1;2] @ [3,4] = [3,4;6,8]
        let dims = Dims::new(2, 1, 2).unwrap();
        assert_eq!(matmul(&[1, 2], &[3, 4], dims), vec![3, 4, 6, 8]);
    }

    #[test]
    fn test_matmul_empty_contraction() {
        let dims = Dims::new(2, 0, 2).unwrap();
        assert_eq!(matmul(&[], &[], dims), vec![0, 0, 0, 0]);
    }

    #[test]
    fn test_matmul_wraps() {
        let dims = Dims::new(1, 2, 1).unwrap();
        // i32::MAX * 1 + 1 * 1 wraps to i32::MIN.
        assert_eq!(matmul(&[i32::MAX, 1], &[1, 1], dims), vec![i32::MIN]);
    }

    #[test]
    fn test_matmul_leaves_outside_block() {
        let dims = Dims::new(1, 1, 1).unwrap();
        let a = LocalMatrix::from_row_major(1, 1, &[2]).unwrap();
        let b = LocalMatrix::from_row_major(1, 1, &[3]).unwrap();
        let mut c = LocalMatrix::zeroed();
        c[(1, 1)] = 7;
        CpuBackend::new().matmul(&a, &b, dims, &mut c);
        assert_eq!(c[(0, 0)], 6);
        assert_eq!(c[(1, 1)], 7);
    }
}
