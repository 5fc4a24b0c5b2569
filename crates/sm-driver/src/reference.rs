use sm_kernel::{Dims, Element};

use crate::error::{DriverError, Result};

/// Host-side oracle: row-major C = A @ B over flat slices.
///
/// Uses the same wrapping arithmetic and accumulation order as the kernel,
/// so results match it exactly, overflow included.
///
/// - `a`: row-major data of shape [m, n]
/// - `b`: row-major data of shape [n, p]
/// - Returns: row-major data of shape [m, p]
pub fn reference_matmul<T: Element>(a: &[T], b: &[T], dims: Dims) -> Result<Vec<T>> {
    let (m, n, p) = (dims.m(), dims.n(), dims.p());
    if a.len() != m * n {
        return Err(DriverError::OperandLength {
            operand: "A",
            expected: m * n,
            got: a.len(),
        });
    }
    if b.len() != n * p {
        return Err(DriverError::OperandLength {
            operand: "B",
            expected: n * p,
            got: b.len(),
        });
    }

    let mut c = vec![T::zero(); m * p];
    for i in 0..m {
        for j in 0..p {
            let mut sum = T::zero();
            for k in 0..n {
                sum = sum.mul_add_wrapping(a[i * n + k], b[k * p + j]);
            }
            c[i * p + j] = sum;
        }
    }
    Ok(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_basic() {
        let dims = Dims::new(2, 2, 2).unwrap();
        let c = reference_matmul(&[1, 2, 3, 4], &[5, 6, 7, 8], dims).unwrap();
        assert_eq!(c, vec![19, 22, 43, 50]);
    }

    #[test]
    fn test_reference_empty_contraction() {
        let dims = Dims::new(2, 0, 2).unwrap();
        let c = reference_matmul::<i32>(&[], &[], dims).unwrap();
        assert_eq!(c, vec![0; 4]);
    }

    #[test]
    fn test_reference_wraps() {
        let dims = Dims::new(1, 1, 1).unwrap();
        assert_eq!(reference_matmul(&[i32::MAX], &[2], dims).unwrap(), vec![-2]);
    }

    #[test]
    fn test_reference_length_mismatch() {
        let dims = Dims::new(2, 2, 2).unwrap();
        let err = reference_matmul(&[1, 2, 3], &[1, 2, 3, 4], dims).unwrap_err();
        assert!(matches!(
            err,
            DriverError::OperandLength {
                operand: "A",
                expected: 4,
                got: 3
            }
        ));
        assert!(reference_matmul(&[1, 2, 3, 4], &[1], dims).is_err());
    }
}
