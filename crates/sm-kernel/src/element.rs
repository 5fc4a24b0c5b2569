use std::fmt::Debug;

use num_traits::{WrappingAdd, WrappingMul, Zero};

/// Fixed-width integer element carried by the kernel's channels.
///
/// Arithmetic wraps on overflow in every build profile: two's complement for
/// signed types, modular for unsigned ones. The kernel never faults on
/// overflow. Every primitive integer type is an `Element`.
pub trait Element:
    Copy + Default + PartialEq + Debug + Send + Sync + 'static + Zero + WrappingAdd + WrappingMul
{
    /// Type name, for logs and diagnostics.
    fn name() -> &'static str {
        std::any::type_name::<Self>()
    }

    /// `self + a * b` with wrapping arithmetic.
    #[inline]
    fn mul_add_wrapping(self, a: Self, b: Self) -> Self {
        self.wrapping_add(&a.wrapping_mul(&b))
    }
}

impl<T> Element for T where
    T: Copy
        + Default
        + PartialEq
        + Debug
        + Send
        + Sync
        + 'static
        + Zero
        + WrappingAdd
        + WrappingMul
{
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sum_of_products<T: Element>(pairs: &[(T, T)]) -> T {
        pairs
            .iter()
            .fold(T::zero(), |acc, &(a, b)| acc.mul_add_wrapping(a, b))
    }

    #[test]
    fn test_signed_wraps() {
        assert_eq!(0i32.mul_add_wrapping(i32::MAX, 2), -2);
        assert_eq!(i32::MAX.mul_add_wrapping(1, 1), i32::MIN);
        assert_eq!(sum_of_products(&[(i8::MAX, 1), (1, 1)]), i8::MIN);
    }

    #[test]
    fn test_unsigned_wraps() {
        assert_eq!(u8::MAX.mul_add_wrapping(1, 1), 0);
        assert_eq!(0u8.mul_add_wrapping(16, 16), 0);
        assert_eq!(sum_of_products(&[(200u8, 2), (100, 1)]), 244);
        assert!(u32::zero().is_zero());
    }

    #[test]
    fn test_names() {
        assert_eq!(i32::name(), "i32");
        assert_eq!(u64::name(), "u64");
    }
}
