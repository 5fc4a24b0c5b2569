use rayon::prelude::*;

use super::dot;
use crate::backend::ComputeBackend;
use crate::dims::Dims;
use crate::element::Element;
use crate::matrix::LocalMatrix;

/// CPU backend that computes output rows in parallel on the rayon pool.
///
/// Each cell is still accumulated in increasing `k`, so results are identical
/// to `CpuBackend` including wraparound.
#[derive(Debug, Clone, Default)]
pub struct ParallelCpuBackend;

impl ParallelCpuBackend {
    pub fn new() -> Self {
        ParallelCpuBackend
    }
}

impl<T: Element> ComputeBackend<T> for ParallelCpuBackend {
    fn name(&self) -> &str {
        "parallel"
    }

    fn matmul(&self, a: &LocalMatrix<T>, b: &LocalMatrix<T>, dims: Dims, c: &mut LocalMatrix<T>) {
        let n = dims.n();
        let p = dims.p();
        c.rows_mut()[..dims.m()]
            .par_iter_mut()
            .enumerate()
            .for_each(|(i, row)| {
                for (j, cell) in row[..p].iter_mut().enumerate() {
                    *cell = dot(a, b, i, j, n);
                }
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu::CpuBackend;
    use crate::dims::MAX_SIZE;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_matrix(rng: &mut StdRng, rows: usize, cols: usize) -> LocalMatrix<i32> {
        let values: Vec<i32> = (0..rows * cols).map(|_| rng.gen()).collect();
        LocalMatrix::from_row_major(rows, cols, &values).unwrap()
    }

    #[test]
    fn test_matches_sequential() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let dims = Dims::new(
                rng.gen_range(0..=MAX_SIZE),
                rng.gen_range(0..=MAX_SIZE),
                rng.gen_range(0..=MAX_SIZE),
            )
            .unwrap();
            // Full-range values, so most cells wrap.
            let a = random_matrix(&mut rng, dims.m(), dims.n());
            let b = random_matrix(&mut rng, dims.n(), dims.p());

            let mut expected = LocalMatrix::zeroed();
            CpuBackend::new().matmul(&a, &b, dims, &mut expected);
            let mut got = LocalMatrix::zeroed();
            ParallelCpuBackend::new().matmul(&a, &b, dims, &mut got);

            assert_eq!(got, expected, "dims {}", dims);
        }
    }

    #[test]
    fn test_name() {
        assert_eq!(ComputeBackend::<i32>::name(&ParallelCpuBackend::new()), "parallel");
    }
}
