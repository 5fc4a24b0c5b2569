use sm_channel::{ChannelError, ChannelRead, ChannelWrite, Disconnected};

use crate::backend::ComputeBackend;
use crate::config::{DimsSource, KernelConfig};
use crate::dims::Dims;
use crate::element::Element;
use crate::error::{KernelError, Result};
use crate::matrix::LocalMatrix;
use crate::phase::Phase;

/// The channel endpoints a kernel is wired to.
///
/// `size`, `a` and `b` are read by the kernel; `c` is written by it. The
/// size port is only read when dimensions come from the size channel.
#[derive(Debug)]
pub struct KernelPorts<S, A, B, C> {
    pub size: S,
    pub a: A,
    pub b: B,
    pub c: C,
}

impl<A, B, C> KernelPorts<Disconnected<u32>, A, B, C> {
    /// Ports for a fixed-size kernel that has nothing wired to its size port.
    pub fn without_size(a: A, b: B, c: C) -> Self {
        KernelPorts {
            size: Disconnected::new(),
            a,
            b,
            c,
        }
    }
}

/// Channel traffic of one completed run, counted as the operations happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    pub dims: Dims,
    pub size_reads: usize,
    pub a_reads: usize,
    pub b_reads: usize,
    pub c_writes: usize,
}

/// Streaming matrix-multiply block.
///
/// Each call to `run` performs one complete product using only its channel
/// ports: it reads A (m×n) then B (n×p) in row-major order into local
/// storage, computes C = A @ B, and writes C (m×p) in row-major order. Local
/// matrices live for a single run; nothing carries over between runs.
pub struct MatMulKernel<T: Element, S, A, B, C> {
    ports: KernelPorts<S, A, B, C>,
    dims: DimsSource,
    backend: Box<dyn ComputeBackend<T>>,
    phase: Phase,
}

impl<T: Element, S, A, B, C> MatMulKernel<T, S, A, B, C> {
    /// Last phase the kernel entered. After a failed run this is the phase
    /// that failed; after a successful one it is `Phase::Done`.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    pub fn ports(&self) -> &KernelPorts<S, A, B, C> {
        &self.ports
    }

    /// Consume the kernel, handing the endpoints back to the caller.
    pub fn into_ports(self) -> KernelPorts<S, A, B, C> {
        self.ports
    }
}

impl<T, S, A, B, C> MatMulKernel<T, S, A, B, C>
where
    T: Element,
    S: ChannelRead<Item = u32>,
    A: ChannelRead<Item = T>,
    B: ChannelRead<Item = T>,
    C: ChannelWrite<Item = T>,
{
    /// Build a kernel with the dimension source and backend from `config`.
    pub fn new(ports: KernelPorts<S, A, B, C>, config: KernelConfig) -> Self {
        Self::with_backend(ports, config.dims, config.backend.create())
    }

    /// Build a kernel around an explicit backend.
    pub fn with_backend(
        ports: KernelPorts<S, A, B, C>,
        dims: DimsSource,
        backend: Box<dyn ComputeBackend<T>>,
    ) -> Self {
        MatMulKernel {
            ports,
            dims,
            backend,
            phase: Phase::Start,
        }
    }

    /// Perform one full multiply.
    ///
    /// Channel operations happen strictly in the order size (if configured),
    /// A, B, then C, and exactly `m·n`, `n·p` and `m·p` of them respectively.
    /// Blocks while an input has no value or the output is full.
    ///
    /// # Errors
    /// Returns `KernelError::Channel` if a peer endpoint was dropped, tagged
    /// with the phase that observed it, and `KernelError::DimsTooLarge` if the
    /// size channel supplies dimensions beyond `MAX_SIZE`. Arithmetic never
    /// fails.
    pub fn run(&mut self) -> Result<RunReport> {
        self.phase = Phase::Start;

        let (dims, size_reads) = match self.dims {
            DimsSource::Fixed(dims) => (dims, 0),
            DimsSource::SizeChannel => {
                self.phase = Phase::ReadSize;
                let mut values = [0u32; 3];
                let mut size_reads = 0;
                for slot in values.iter_mut() {
                    *slot = self.ports.size.read().map_err(at(Phase::ReadSize))?;
                    size_reads += 1;
                }
                (Dims::from_size_values(values)?, size_reads)
            }
        };
        log::debug!(
            "matmul run start: dims={}, element={}, backend={}",
            dims,
            T::name(),
            self.backend.name()
        );

        self.phase = Phase::LoadA;
        let mut a = LocalMatrix::zeroed();
        let a_reads = load(&mut self.ports.a, &mut a, dims.m(), dims.n(), Phase::LoadA)?;
        log::trace!("{}: read {} values", Phase::LoadA, a_reads);

        self.phase = Phase::LoadB;
        let mut b = LocalMatrix::zeroed();
        let b_reads = load(&mut self.ports.b, &mut b, dims.n(), dims.p(), Phase::LoadB)?;
        log::trace!("{}: read {} values", Phase::LoadB, b_reads);

        self.phase = Phase::Compute;
        let mut c = LocalMatrix::zeroed();
        self.backend.matmul(&a, &b, dims, &mut c);

        self.phase = Phase::StoreC;
        let mut c_writes = 0;
        for i in 0..dims.m() {
            for j in 0..dims.p() {
                self.ports.c.write(c[(i, j)]).map_err(at(Phase::StoreC))?;
                c_writes += 1;
            }
        }
        log::trace!("{}: wrote {} values", Phase::StoreC, c_writes);

        self.phase = Phase::Done;
        log::debug!("matmul run done: dims={}", dims);

        Ok(RunReport {
            dims,
            size_reads,
            a_reads,
            b_reads,
            c_writes,
        })
    }
}

/// Fill the leading `rows x cols` block of `dst` from `src`, row-major.
/// Returns the number of values read.
fn load<R>(
    src: &mut R,
    dst: &mut LocalMatrix<R::Item>,
    rows: usize,
    cols: usize,
    phase: Phase,
) -> Result<usize>
where
    R: ChannelRead,
    R::Item: Element,
{
    let mut reads = 0;
    for i in 0..rows {
        for j in 0..cols {
            dst[(i, j)] = src.read().map_err(at(phase))?;
            reads += 1;
        }
    }
    Ok(reads)
}

fn at(phase: Phase) -> impl FnOnce(ChannelError) -> KernelError {
    move |source| KernelError::Channel { phase, source }
}
