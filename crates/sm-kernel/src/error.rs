use sm_channel::ChannelError;
use thiserror::Error;

use crate::phase::Phase;

#[derive(Error, Debug)]
pub enum KernelError {
    #[error("channel error during {phase}: {source}")]
    Channel {
        phase: Phase,
        #[source]
        source: ChannelError,
    },
    #[error("dimensions {m}x{n}x{p} exceed the maximum supported size {max}")]
    DimsTooLarge {
        m: usize,
        n: usize,
        p: usize,
        max: usize,
    },
    #[error("invalid dimensions: {0}")]
    InvalidDims(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl KernelError {
    /// Phase in which a channel failure occurred, if this is one.
    pub fn phase(&self) -> Option<Phase> {
        match self {
            KernelError::Channel { phase, .. } => Some(*phase),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, KernelError>;
