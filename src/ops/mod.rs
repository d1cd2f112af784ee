//! The atomic operation set.
//!
//! Every operation is defined once, generically over [`AtomicValue`], and
//! takes its memory ordering as an argument. Encoding and decoding happen at
//! the boundary of each call; the hardware cell only ever sees representation
//! values.

mod fetch;
mod update;

use crate::ordering::{
    CompareExchangeOrdering, CompareExchangeStrength, LoadOrdering, StoreOrdering, UpdateOrdering,
};
use crate::storage::{AtomicRepr, AtomicStorage, AtomicValue};

impl<T: AtomicValue> AtomicStorage<T> {
    /// Loads the current value.
    #[inline(always)]
    pub fn load(&self, ordering: LoadOrdering) -> T {
        T::decode(self.cell().load(ordering.to_ordering()))
    }

    /// Stores `value`.
    #[inline(always)]
    pub fn store(&self, value: T, ordering: StoreOrdering) {
        self.cell().store(value.encode(), ordering.to_ordering());
    }

    /// Stores `value`, returning the previous value.
    #[inline(always)]
    pub fn exchange(&self, value: T, ordering: UpdateOrdering) -> T {
        T::decode(self.cell().swap(value.encode(), ordering.to_ordering()))
    }

    /// Stores `desired` if the current value equals `expected`.
    ///
    /// Returns `Ok(previous)` on success, where `previous` equals `expected`
    /// and the storage now holds `desired`. Returns `Err(observed)` on failure,
    /// leaving the storage unchanged. A [`Weak`](CompareExchangeStrength::Weak)
    /// exchange may fail even when the values are equal; it never succeeds
    /// when they differ.
    #[inline(always)]
    pub fn compare_exchange(
        &self,
        strength: CompareExchangeStrength,
        expected: T,
        desired: T,
        ordering: CompareExchangeOrdering,
    ) -> Result<T, T> {
        let success = ordering.success().to_ordering();
        let failure = ordering.failure().to_ordering();
        let result = match strength {
            CompareExchangeStrength::Strong => {
                self.cell()
                    .compare_exchange(expected.encode(), desired.encode(), success, failure)
            }
            CompareExchangeStrength::Weak => {
                self.cell()
                    .compare_exchange_weak(expected.encode(), desired.encode(), success, failure)
            }
        };
        result.map(T::decode).map_err(T::decode)
    }

    /// Strong compare-exchange; fails only when the values differ.
    #[inline(always)]
    pub fn compare_exchange_strong(
        &self,
        expected: T,
        desired: T,
        ordering: CompareExchangeOrdering,
    ) -> Result<T, T> {
        self.compare_exchange(CompareExchangeStrength::Strong, expected, desired, ordering)
    }

    /// Weak compare-exchange; may fail spuriously.
    #[inline(always)]
    pub fn compare_exchange_weak(
        &self,
        expected: T,
        desired: T,
        ordering: CompareExchangeOrdering,
    ) -> Result<T, T> {
        self.compare_exchange(CompareExchangeStrength::Weak, expected, desired, ordering)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strong_exchange_reports_witness() {
        let storage = AtomicStorage::prepare(10i32);
        let stale = storage.compare_exchange_strong(11, 12, CompareExchangeOrdering::SeqCstSeqCst);
        assert_eq!(stale, Err(10));
        assert_eq!(storage.load(LoadOrdering::Relaxed), 10);
        let fresh =
            storage.compare_exchange_strong(10, 12, CompareExchangeOrdering::AcquireRelaxed);
        assert_eq!(fresh, Ok(10));
        assert_eq!(storage.load(LoadOrdering::Relaxed), 12);
    }

    #[test]
    fn weak_exchange_eventually_lands() {
        let storage = AtomicStorage::prepare(false);
        loop {
            let attempt =
                storage.compare_exchange_weak(false, true, CompareExchangeOrdering::AcqRelAcquire);
            match attempt {
                Ok(previous) => {
                    assert!(!previous);
                    break;
                }
                Err(observed) => assert!(!observed),
            }
        }
        assert!(storage.load(LoadOrdering::Acquire));
    }

    #[test]
    fn exchange_returns_previous() {
        let storage = AtomicStorage::prepare(u8::MAX);
        for ordering in UpdateOrdering::ALL {
            let previous = storage.exchange(1, ordering);
            assert!(previous == u8::MAX || previous == 1);
        }
        assert_eq!(storage.dispose(), 1);
    }
}
