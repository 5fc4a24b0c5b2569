use std::fmt::Debug;

use crate::dims::Dims;
use crate::element::Element;
use crate::matrix::LocalMatrix;

/// Trait for pluggable implementations of the kernel's compute phase.
///
/// A backend only sees local storage; it never touches a channel, so the
/// choice of backend cannot change the observable channel traffic.
pub trait ComputeBackend<T: Element>: Send + Sync + Debug {
    /// Returns the name of this backend (e.g., "cpu", "parallel").
    fn name(&self) -> &str;

    /// Matrix multiplication over the leading blocks: C = A @ B.
    ///
    /// For every `(i, j)` with `i < dims.m()` and `j < dims.p()`, sets
    /// `c[(i, j)]` to the wrapping sum of `a[(i, k)] * b[(k, j)]` for
    /// `k = 0..dims.n()`, accumulated in increasing `k` starting from zero.
    /// Cells of `c` outside the `m x p` block are left untouched.
    fn matmul(&self, a: &LocalMatrix<T>, b: &LocalMatrix<T>, dims: Dims, c: &mut LocalMatrix<T>);
}
