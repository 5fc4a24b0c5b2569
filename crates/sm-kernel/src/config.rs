use std::fmt;
use std::str::FromStr;

use crate::backend::ComputeBackend;
use crate::cpu::{CpuBackend, ParallelCpuBackend};
use crate::dims::Dims;
use crate::element::Element;
use crate::error::{KernelError, Result};

/// Environment key selecting the dimension source.
pub const DIMS_KEY: &str = "SM_KERNEL_DIMS";
/// Environment key selecting the compute backend.
pub const BACKEND_KEY: &str = "SM_KERNEL_BACKEND";

/// Where a kernel run takes its dimensions from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DimsSource {
    /// Dimensions fixed at construction; the size channel is never read.
    Fixed(Dims),
    /// Read `(m, n, p)` from the size channel at the start of every run.
    SizeChannel,
}

impl Default for DimsSource {
    fn default() -> Self {
        DimsSource::Fixed(Dims::fixed())
    }
}

impl fmt::Display for DimsSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DimsSource::Fixed(dims) => write!(f, "{}", dims),
            DimsSource::SizeChannel => write!(f, "size-channel"),
        }
    }
}

/// Accepts `"fixed"`, `"size-channel"`, or explicit `"MxNxP"` dimensions.
impl FromStr for DimsSource {
    type Err = KernelError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "fixed" => Ok(DimsSource::Fixed(Dims::fixed())),
            "size-channel" => Ok(DimsSource::SizeChannel),
            other => Ok(DimsSource::Fixed(other.parse()?)),
        }
    }
}

/// Selects the compute backend a kernel is built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendKind {
    #[default]
    Cpu,
    Parallel,
}

impl BackendKind {
    /// Instantiate the selected backend for element type `T`.
    pub fn create<T: Element>(self) -> Box<dyn ComputeBackend<T>> {
        match self {
            BackendKind::Cpu => Box::new(CpuBackend::new()),
            BackendKind::Parallel => Box::new(ParallelCpuBackend::new()),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Cpu => write!(f, "cpu"),
            BackendKind::Parallel => write!(f, "parallel"),
        }
    }
}

impl FromStr for BackendKind {
    type Err = KernelError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "cpu" => Ok(BackendKind::Cpu),
            "parallel" => Ok(BackendKind::Parallel),
            other => Err(KernelError::InvalidConfig(format!(
                "unknown backend '{}', expected 'cpu' or 'parallel'",
                other
            ))),
        }
    }
}

/// Configuration for a `MatMulKernel`.
///
/// The default is the fixed `MAX_SIZE` block on the sequential CPU backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KernelConfig {
    /// Where dimensions come from.
    pub dims: DimsSource,
    /// Which backend runs the compute phase.
    pub backend: BackendKind,
}

impl KernelConfig {
    /// Configuration with fixed dimensions.
    pub fn fixed(dims: Dims) -> Self {
        KernelConfig {
            dims: DimsSource::Fixed(dims),
            backend: BackendKind::default(),
        }
    }

    /// Configuration that reads dimensions from the size channel.
    pub fn size_channel() -> Self {
        KernelConfig {
            dims: DimsSource::SizeChannel,
            backend: BackendKind::default(),
        }
    }

    /// Returns the configuration with `backend` selected.
    pub fn with_backend(mut self, backend: BackendKind) -> Self {
        self.backend = backend;
        self
    }

    /// Parse a configuration from key lookups.
    ///
    /// Reads the following keys:
    /// - `SM_KERNEL_DIMS` -> dims (default: fixed `MAX_SIZE` block)
    /// - `SM_KERNEL_BACKEND` -> backend (default: `cpu`)
    pub fn from_lookup<F>(lookup: F) -> Result<KernelConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let dims = match lookup(DIMS_KEY) {
            Some(value) => value.parse()?,
            None => DimsSource::default(),
        };
        let backend = match lookup(BACKEND_KEY) {
            Some(value) => value.parse()?,
            None => BackendKind::default(),
        };

        let config = KernelConfig { dims, backend };
        log::debug!("kernel config: dims={}, backend={}", config.dims, config.backend);
        Ok(config)
    }

    /// Parse a configuration from the process environment.
    pub fn from_env() -> Result<KernelConfig> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = KernelConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, KernelConfig::default());
        assert_eq!(config.dims, DimsSource::Fixed(Dims::fixed()));
        assert_eq!(config.backend, BackendKind::Cpu);
    }

    #[test]
    fn test_explicit_values() {
        let config = KernelConfig::from_lookup(lookup(&[
            (DIMS_KEY, "2x3x4"),
            (BACKEND_KEY, "parallel"),
        ]))
        .unwrap();
        assert_eq!(config.dims, DimsSource::Fixed(Dims::new(2, 3, 4).unwrap()));
        assert_eq!(config.backend, BackendKind::Parallel);

        let config = KernelConfig::from_lookup(lookup(&[(DIMS_KEY, "size-channel")])).unwrap();
        assert_eq!(config, KernelConfig::size_channel());
    }

    #[test]
    fn test_invalid_values() {
        assert!(KernelConfig::from_lookup(lookup(&[(BACKEND_KEY, "gpu")])).is_err());
        assert!(KernelConfig::from_lookup(lookup(&[(DIMS_KEY, "11x1x1")])).is_err());
        assert!(KernelConfig::from_lookup(lookup(&[(DIMS_KEY, "square")])).is_err());
    }

    #[test]
    fn test_display_roundtrip() {
        for source in [DimsSource::SizeChannel, DimsSource::Fixed(Dims::new(1, 2, 3).unwrap())] {
            assert_eq!(source.to_string().parse::<DimsSource>().unwrap(), source);
        }
        assert_eq!("fixed".parse::<DimsSource>().unwrap(), DimsSource::default());
        assert_eq!(BackendKind::Parallel.to_string(), "parallel");
    }

    #[test]
    fn test_create_backend() {
        assert_eq!(BackendKind::Cpu.create::<i32>().name(), "cpu");
        assert_eq!(BackendKind::Parallel.create::<u64>().name(), "parallel");
    }
}
