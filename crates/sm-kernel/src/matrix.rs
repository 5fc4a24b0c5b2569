use std::ops::{Index, IndexMut};

use crate::dims::MAX_SIZE;
use crate::element::Element;
use crate::error::{KernelError, Result};

/// Fixed-capacity, stack-allocated matrix local to one kernel invocation.
///
/// Storage is always `MAX_SIZE x MAX_SIZE`; a run only touches the leading
/// rows and columns its `Dims` call for. Cells outside that region stay zero.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalMatrix<T: Element> {
    data: [[T; MAX_SIZE]; MAX_SIZE],
}

impl<T: Element> LocalMatrix<T> {
    /// Create a matrix with every cell set to zero.
    pub fn zeroed() -> Self {
        LocalMatrix {
            data: [[T::zero(); MAX_SIZE]; MAX_SIZE],
        }
    }

    /// Build a matrix from `rows * cols` row-major values.
    ///
    /// # Errors
    /// Returns an error if either extent exceeds `MAX_SIZE` or the value
    /// count does not match.
    pub fn from_row_major(rows: usize, cols: usize, values: &[T]) -> Result<Self> {
        if rows > MAX_SIZE || cols > MAX_SIZE {
            return Err(KernelError::InvalidDims(format!(
                "{}x{} matrix exceeds the {}x{} local storage",
                rows, cols, MAX_SIZE, MAX_SIZE
            )));
        }
        if values.len() != rows * cols {
            return Err(KernelError::InvalidDims(format!(
                "{} values for a {}x{} matrix",
                values.len(),
                rows,
                cols
            )));
        }

        let mut matrix = Self::zeroed();
        for (idx, &value) in values.iter().enumerate() {
            matrix.data[idx / cols][idx % cols] = value;
        }
        Ok(matrix)
    }

    /// Row-major copy of the leading `rows x cols` block.
    ///
    /// # Panics
    /// Panics if either extent exceeds `MAX_SIZE`.
    pub fn to_row_major(&self, rows: usize, cols: usize) -> Vec<T> {
        self.data[..rows]
            .iter()
            .flat_map(|row| row[..cols].iter().copied())
            .collect()
    }

    pub fn rows(&self) -> &[[T; MAX_SIZE]; MAX_SIZE] {
        &self.data
    }

    pub fn rows_mut(&mut self) -> &mut [[T; MAX_SIZE]; MAX_SIZE] {
        &mut self.data
    }
}

impl<T: Element> Default for LocalMatrix<T> {
    fn default() -> Self {
        Self::zeroed()
    }
}

/// `(row, col)` indexing.
///
/// # Panics
/// Panics if `row` or `col` is `>= MAX_SIZE`.
impl<T: Element> Index<(usize, usize)> for LocalMatrix<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        &self.data[row][col]
    }
}

impl<T: Element> IndexMut<(usize, usize)> for LocalMatrix<T> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        &mut self.data[row][col]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeroed() {
        let m = LocalMatrix::<i32>::zeroed();
        assert!(m.rows().iter().flatten().all(|&v| v == 0));
    }

    #[test]
    fn test_row_major_layout() {
        let m = LocalMatrix::from_row_major(2, 3, &[1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(m[(0, 2)], 3);
        assert_eq!(m[(1, 0)], 4);
        // Outside the populated block.
        assert_eq!(m[(2, 0)], 0);
        assert_eq!(m.to_row_major(2, 3), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_from_row_major_errors() {
        assert!(LocalMatrix::<i32>::from_row_major(2, 2, &[1, 2, 3]).is_err());
        assert!(LocalMatrix::<i32>::from_row_major(MAX_SIZE + 1, 1, &[0; 11]).is_err());
    }

    #[test]
    fn test_index_mut() {
        let mut m = LocalMatrix::<u8>::zeroed();
        m[(9, 9)] = 42;
        assert_eq!(m.rows()[9][9], 42);
        assert_eq!(m.to_row_major(0, 0), Vec::<u8>::new());
    }

    #[test]
    #[should_panic]
    fn test_index_out_of_bounds_panics() {
        let m = LocalMatrix::<i32>::zeroed();
        let _ = m[(MAX_SIZE, 0)];
    }
}
