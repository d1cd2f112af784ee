use crossbeam_utils::Backoff;

use crate::ordering::CompareExchangeOrdering;
use crate::storage::{AtomicStorage, AtomicValue};

impl<T: AtomicValue> AtomicStorage<T> {
    /// Atomically replaces the value with `f(current)`.
    ///
    /// Runs a weak compare-exchange loop, spinning with exponential backoff
    /// after each failed attempt. `f` may be called several times. Returns
    /// `Ok(previous)` once an update lands, or `Err(current)` as soon as `f`
    /// returns `None`.
    ///
    /// The initial and retry loads use `ordering.failure()`.
    pub fn fetch_update<F>(&self, ordering: CompareExchangeOrdering, mut f: F) -> Result<T, T>
    where
        F: FnMut(T) -> Option<T>,
    {
        let backoff = Backoff::new();
        let mut current = self.load(ordering.failure());
        while let Some(next) = f(current) {
            match self.compare_exchange_weak(current, next, ordering) {
                Ok(previous) => return Ok(previous),
                Err(observed) => {
                    current = observed;
                    backoff.spin();
                }
            }
        }
        Err(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LoadOrdering;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn rejecting_closure_leaves_value() {
        let storage = AtomicStorage::prepare(3u32);
        let result =
            storage.fetch_update(CompareExchangeOrdering::SeqCstSeqCst, |v| (v > 5).then_some(0));
        assert_eq!(result, Err(3));
        assert_eq!(storage.load(LoadOrdering::Relaxed), 3);
    }

    #[test]
    fn saturating_increment_under_contention() {
        let storage = Arc::new(AtomicStorage::prepare(0u8));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let storage = Arc::clone(&storage);
                thread::spawn(move || {
                    for _ in 0..100 {
                        let ordering = CompareExchangeOrdering::AcqRelAcquire;
                        let _ = storage.fetch_update(ordering, |v| v.checked_add(1));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(storage.load(LoadOrdering::Acquire), u8::MAX);
    }
}
