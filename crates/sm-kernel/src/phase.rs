use std::fmt;

/// Stage of a single kernel invocation.
///
/// A run moves strictly forward through
/// `Start -> [ReadSize] -> LoadA -> LoadB -> Compute -> StoreC -> Done`.
/// `ReadSize` is only visited when dimensions come from the size channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    Start,
    ReadSize,
    LoadA,
    LoadB,
    Compute,
    StoreC,
    Done,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Start => "start",
            Phase::ReadSize => "read-size",
            Phase::LoadA => "load-a",
            Phase::LoadB => "load-b",
            Phase::Compute => "compute",
            Phase::StoreC => "store-c",
            Phase::Done => "done",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_order() {
        assert!(Phase::Start < Phase::ReadSize);
        assert!(Phase::LoadA < Phase::LoadB);
        assert!(Phase::LoadB < Phase::Compute);
        assert!(Phase::StoreC < Phase::Done);
    }

    #[test]
    fn test_display() {
        assert_eq!(Phase::LoadA.to_string(), "load-a");
        assert_eq!(Phase::StoreC.to_string(), "store-c");
    }
}
