use crate::ordering::{BitwiseOp, FetchOp, UpdateOrdering};
use crate::storage::{AtomicArithmeticRepr, AtomicBitwiseRepr, AtomicStorage, AtomicValue};

impl<T> AtomicStorage<T>
where
    T: AtomicValue,
    T::Atomic: AtomicBitwiseRepr,
{
    /// Applies a bitwise operation, returning the previous value.
    ///
    /// For `bool` storage these are logical or, xor and and.
    #[inline(always)]
    pub fn fetch_bitwise(&self, op: BitwiseOp, operand: T, ordering: UpdateOrdering) -> T {
        match op {
            BitwiseOp::Or => self.fetch_or(operand, ordering),
            BitwiseOp::Xor => self.fetch_xor(operand, ordering),
            BitwiseOp::And => self.fetch_and(operand, ordering),
        }
    }

    /// Bitwise or, returning the previous value.
    #[inline(always)]
    pub fn fetch_or(&self, operand: T, ordering: UpdateOrdering) -> T {
        T::decode(self.cell().fetch_or(operand.encode(), ordering.to_ordering()))
    }

    /// Bitwise xor, returning the previous value.
    #[inline(always)]
    pub fn fetch_xor(&self, operand: T, ordering: UpdateOrdering) -> T {
        T::decode(self.cell().fetch_xor(operand.encode(), ordering.to_ordering()))
    }

    /// Bitwise and, returning the previous value.
    #[inline(always)]
    pub fn fetch_and(&self, operand: T, ordering: UpdateOrdering) -> T {
        T::decode(self.cell().fetch_and(operand.encode(), ordering.to_ordering()))
    }
}

impl<T> AtomicStorage<T>
where
    T: AtomicValue,
    T::Atomic: AtomicArithmeticRepr,
{
    /// Applies `op` with `operand`, returning the previous value.
    ///
    /// Arithmetic wraps on overflow.
    #[inline(always)]
    pub fn fetch_modify(&self, op: FetchOp, operand: T, ordering: UpdateOrdering) -> T {
        match op {
            FetchOp::Add => self.fetch_add(operand, ordering),
            FetchOp::Sub => self.fetch_sub(operand, ordering),
            FetchOp::Or => self.fetch_or(operand, ordering),
            FetchOp::Xor => self.fetch_xor(operand, ordering),
            FetchOp::And => self.fetch_and(operand, ordering),
        }
    }

    /// Wrapping add, returning the previous value.
    #[inline(always)]
    pub fn fetch_add(&self, operand: T, ordering: UpdateOrdering) -> T {
        T::decode(self.cell().fetch_add(operand.encode(), ordering.to_ordering()))
    }

    /// Wrapping subtract, returning the previous value.
    #[inline(always)]
    pub fn fetch_sub(&self, operand: T, ordering: UpdateOrdering) -> T {
        T::decode(self.cell().fetch_sub(operand.encode(), ordering.to_ordering()))
    }
}
