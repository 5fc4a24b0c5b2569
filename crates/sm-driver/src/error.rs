use sm_channel::ChannelError;
use sm_kernel::{Dims, KernelError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DriverError {
    #[error("kernel error: {0}")]
    Kernel(#[from] KernelError),
    #[error("channel error: {0}")]
    Channel(#[from] ChannelError),
    #[error("operand {operand} has {got} values, expected {expected}")]
    OperandLength {
        operand: &'static str,
        expected: usize,
        got: usize,
    },
    #[error("dimensions {got} do not match the kernel's fixed dimensions {expected}")]
    DimsMismatch { expected: Dims, got: Dims },
    #[error("kernel reads its dimensions from the size channel; pass them explicitly")]
    DimsRequired,
    #[error("{0} thread panicked")]
    WorkerPanicked(&'static str),
}

pub type Result<T> = std::result::Result<T, DriverError>;
