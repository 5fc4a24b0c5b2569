//! `sm-driver` - Host-side activation of the stream-matmul kernel.
//!
//! The driver owns every channel endpoint the kernel is wired to. It feeds
//! the operands from a producer thread, runs the kernel once on a worker
//! thread, and collects the result on the calling thread.

pub mod driver;
pub mod error;
pub mod reference;

pub use driver::Driver;
pub use error::{DriverError, Result};
pub use reference::reference_matmul;
