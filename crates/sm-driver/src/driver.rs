use std::thread;

use sm_channel::{channel, ChannelCapacity, ChannelRead, ChannelWrite};
use sm_kernel::{Dims, DimsSource, Element, KernelConfig, KernelPorts, MatMulKernel, RunReport};

use crate::error::{DriverError, Result};

/// Activates a `MatMulKernel` for one multiply at a time.
///
/// Every call builds fresh channels and a fresh kernel, so calls are
/// independent and may run concurrently from different threads.
#[derive(Debug, Clone, Default)]
pub struct Driver {
    config: KernelConfig,
    capacity: ChannelCapacity,
}

impl Driver {
    /// Create a driver for kernels built from `config`, on unbounded channels.
    pub fn new(config: KernelConfig) -> Self {
        Driver {
            config,
            capacity: ChannelCapacity::Unbounded,
        }
    }

    /// Returns the driver using channels of the given capacity.
    pub fn with_capacity(mut self, capacity: ChannelCapacity) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn config(&self) -> &KernelConfig {
        &self.config
    }

    pub fn capacity(&self) -> ChannelCapacity {
        self.capacity
    }

    /// Multiply `a` by `b` using the kernel's fixed dimensions.
    ///
    /// # Errors
    /// Returns `DriverError::DimsRequired` if the kernel reads its
    /// dimensions from the size channel; use `multiply_sized` instead.
    pub fn multiply<T: Element>(&self, a: &[T], b: &[T]) -> Result<Vec<T>> {
        match self.config.dims {
            DimsSource::Fixed(dims) => self.multiply_sized(dims, a, b),
            DimsSource::SizeChannel => Err(DriverError::DimsRequired),
        }
    }

    /// Multiply `a` (m×n, row-major) by `b` (n×p, row-major) and return C
    /// (m×p, row-major).
    pub fn multiply_sized<T: Element>(&self, dims: Dims, a: &[T], b: &[T]) -> Result<Vec<T>> {
        let mut out = Vec::with_capacity(dims.c_len());
        self.multiply_streaming(dims, a, b, |value| out.push(value))?;
        Ok(out)
    }

    /// Run one multiply, handing each C value to `on_value` as soon as the
    /// kernel writes it.
    ///
    /// `dims` is written to the size channel when the kernel reads its
    /// dimensions from there; otherwise it must equal the fixed dimensions.
    /// Operand lengths are checked up front so the kernel is never starved.
    pub fn multiply_streaming<T, F>(
        &self,
        dims: Dims,
        a: &[T],
        b: &[T],
        mut on_value: F,
    ) -> Result<RunReport>
    where
        T: Element,
        F: FnMut(T),
    {
        let send_size = match self.config.dims {
            DimsSource::Fixed(fixed) if fixed != dims => {
                return Err(DriverError::DimsMismatch {
                    expected: fixed,
                    got: dims,
                });
            }
            DimsSource::Fixed(_) => false,
            DimsSource::SizeChannel => true,
        };
        check_len("A", dims.a_len(), a.len())?;
        check_len("B", dims.b_len(), b.len())?;

        let (mut size_tx, size_rx) = channel::<u32>(self.capacity)?;
        let (mut a_tx, a_rx) = channel::<T>(self.capacity)?;
        let (mut b_tx, b_rx) = channel::<T>(self.capacity)?;
        let (c_tx, mut c_rx) = channel::<T>(self.capacity)?;

        let mut kernel = MatMulKernel::new(
            KernelPorts {
                size: size_rx,
                a: a_rx,
                b: b_rx,
                c: c_tx,
            },
            self.config,
        );
        log::debug!(
            "driver: activating kernel, dims={}, backend={}, capacity={:?}",
            dims,
            kernel.backend_name(),
            self.capacity
        );

        thread::scope(|s| -> Result<RunReport> {
            let producer = s.spawn(move || -> sm_channel::Result<()> {
                if send_size {
                    for extent in [dims.m(), dims.n(), dims.p()] {
                        size_tx.write(extent as u32)?;
                    }
                }
                for &value in a {
                    a_tx.write(value)?;
                }
                for &value in b {
                    b_tx.write(value)?;
                }
                Ok(())
            });

            // The kernel and its C endpoint are dropped when this thread
            // ends, which unblocks the collector below on failure.
            let worker = s.spawn(move || kernel.run());

            for _ in 0..dims.c_len() {
                match c_rx.read() {
                    Ok(value) => on_value(value),
                    Err(_) => break,
                }
            }

            let report = match worker.join() {
                Ok(result) => result.map_err(|e| {
                    log::warn!("driver: kernel run failed: {}", e);
                    e
                })?,
                Err(_) => {
                    log::warn!("driver: kernel thread panicked");
                    return Err(DriverError::WorkerPanicked("kernel"));
                }
            };
            match producer.join() {
                Ok(result) => result?,
                Err(_) => {
                    log::warn!("driver: producer thread panicked");
                    return Err(DriverError::WorkerPanicked("producer"));
                }
            }

            log::debug!("driver: collected {} values", c_rx.transferred());
            Ok(report)
        })
    }
}

fn check_len(operand: &'static str, expected: usize, got: usize) -> Result<()> {
    if expected != got {
        return Err(DriverError::OperandLength {
            operand,
            expected,
            got,
        });
    }
    Ok(())
}
