use std::fmt;
use std::str::FromStr;

use crate::error::{KernelError, Result};

/// Upper bound on every dimension, and the size of the fixed block.
pub const MAX_SIZE: usize = 10;

/// Operand and result shapes of one multiply: A is m×n, B is n×p, C is m×p.
///
/// Every dimension is at most `MAX_SIZE`. A zero dimension is allowed and
/// simply removes the corresponding channel traffic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dims {
    m: usize,
    n: usize,
    p: usize,
}

impl Dims {
    /// Create a dimension descriptor.
    ///
    /// # Errors
    /// Returns `KernelError::DimsTooLarge` if any dimension exceeds `MAX_SIZE`.
    pub fn new(m: usize, n: usize, p: usize) -> Result<Self> {
        if m > MAX_SIZE || n > MAX_SIZE || p > MAX_SIZE {
            return Err(KernelError::DimsTooLarge {
                m,
                n,
                p,
                max: MAX_SIZE,
            });
        }
        Ok(Dims { m, n, p })
    }

    /// The fixed-size block: every dimension equals `MAX_SIZE`.
    pub const fn fixed() -> Self {
        Dims {
            m: MAX_SIZE,
            n: MAX_SIZE,
            p: MAX_SIZE,
        }
    }

    /// Build dimensions from the `(m, n, p)` triple carried by a size channel.
    pub fn from_size_values(values: [u32; 3]) -> Result<Self> {
        let [m, n, p] = values;
        Dims::new(m as usize, n as usize, p as usize)
    }

    /// Rows of A and C.
    pub fn m(&self) -> usize {
        self.m
    }

    /// Contraction dimension: columns of A, rows of B.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Columns of B and C.
    pub fn p(&self) -> usize {
        self.p
    }

    /// Number of values read from the A channel (m·n).
    pub fn a_len(&self) -> usize {
        self.m * self.n
    }

    /// Number of values read from the B channel (n·p).
    pub fn b_len(&self) -> usize {
        self.n * self.p
    }

    /// Number of values written to the C channel (m·p).
    pub fn c_len(&self) -> usize {
        self.m * self.p
    }
}

impl Default for Dims {
    fn default() -> Self {
        Self::fixed()
    }
}

impl fmt::Display for Dims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.m, self.n, self.p)
    }
}

/// Parses `"MxNxP"`, e.g. `"2x3x4"`.
impl FromStr for Dims {
    type Err = KernelError;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split('x').map(str::trim).collect();
        if parts.len() != 3 {
            return Err(KernelError::InvalidDims(format!(
                "expected MxNxP, got '{}'",
                s
            )));
        }

        let mut values = [0usize; 3];
        for (slot, part) in values.iter_mut().zip(&parts) {
            *slot = part.parse().map_err(|e| {
                KernelError::InvalidDims(format!("bad dimension '{}' in '{}': {}", part, s, e))
            })?;
        }

        Dims::new(values[0], values[1], values[2])
    }
}
