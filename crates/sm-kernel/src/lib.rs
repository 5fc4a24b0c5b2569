//! `sm-kernel` - Channel-driven fixed-size integer matrix-multiply kernel.
//!
//! This crate provides:
//! - `MatMulKernel`, a block whose only interface is its channel endpoints
//! - A `ComputeBackend` trait for the compute phase, with sequential and
//!   rayon-parallel CPU implementations
//! - `Dims` and `LocalMatrix`, the bounded shapes and storage of one run
//! - `KernelConfig` for choosing the dimension source and backend

pub mod backend;
pub mod config;
pub mod cpu;
pub mod dims;
pub mod element;
pub mod error;
pub mod kernel;
pub mod matrix;
pub mod phase;

// Re-export primary types at the crate root for convenience.
pub use backend::ComputeBackend;
pub use config::{BackendKind, DimsSource, KernelConfig};
pub use cpu::{CpuBackend, ParallelCpuBackend};
pub use dims::{Dims, MAX_SIZE};
pub use element::Element;
pub use error::{KernelError, Result};
pub use kernel::{KernelPorts, MatMulKernel, RunReport};
pub use matrix::LocalMatrix;
pub use phase::Phase;
