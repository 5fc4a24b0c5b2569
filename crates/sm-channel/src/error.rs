use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChannelError {
    #[error("channel closed: the peer endpoint was dropped")]
    Closed,
    #[error("invalid channel capacity {0}: a bounded channel needs at least one slot")]
    InvalidCapacity(usize),
}

pub type Result<T> = std::result::Result<T, ChannelError>;
