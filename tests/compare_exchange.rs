use atomics_shims::{AtomicStorage, CompareExchangeOrdering, CompareExchangeStrength, LoadOrdering, StoreOrdering};
use proptest::prelude::*;
use std::sync::Arc;
use std::thread;

#[test]
fn strong_succeeds_iff_equal() {
    for ordering in CompareExchangeOrdering::ALL {
        let storage = AtomicStorage::prepare(7u32);

        assert_eq!(storage.compare_exchange_strong(8, 9, ordering), Err(7), "{ordering}");
        assert_eq!(storage.load(LoadOrdering::Relaxed), 7);

        assert_eq!(storage.compare_exchange_strong(7, 9, ordering), Ok(7), "{ordering}");
        assert_eq!(storage.load(LoadOrdering::Relaxed), 9);
    }
}

#[test]
fn weak_never_succeeds_on_mismatch() {
    for ordering in CompareExchangeOrdering::ALL {
        let storage = AtomicStorage::prepare(-1i16);
        for _ in 0..1000 {
            assert_eq!(storage.compare_exchange_weak(0, 1, ordering), Err(-1));
        }
        assert_eq!(storage.dispose(), -1);
    }
}

#[test]
fn weak_retry_loop_lands() {
    for ordering in CompareExchangeOrdering::ALL {
        let storage = AtomicStorage::prepare(0u8);
        let mut attempts = 0;
        while storage.compare_exchange_weak(0, 1, ordering).is_err() {
            attempts += 1;
            assert!(attempts < 1_000_000, "weak compare-exchange never succeeded");
        }
        assert_eq!(storage.load(LoadOrdering::Acquire), 1);
    }
}

#[test]
fn exactly_one_thread_claims_the_slot() {
    for strength in CompareExchangeStrength::ALL {
        let slot = Arc::new(AtomicStorage::prepare(0usize));
        let handles: Vec<_> = (1..=16usize)
            .map(|id| {
                let slot = Arc::clone(&slot);
                thread::spawn(move || loop {
                    match slot.compare_exchange(strength, 0, id, CompareExchangeOrdering::AcqRelAcquire) {
                        Ok(_) => return true,
                        // Spurious weak failure: the slot is still free, try again.
                        Err(0) => continue,
                        Err(_) => return false,
                    }
                })
            })
            .collect();

        let winners = handles.into_iter().map(|h| h.join().unwrap()).filter(|won| *won).count();
        assert_eq!(winners, 1, "{strength:?}");
        assert_ne!(slot.load(LoadOrdering::Acquire), 0);
    }
}

proptest! {
    #[test]
    fn strong_matches_sequential_model(initial in any::<i64>(), ops in proptest::collection::vec((any::<bool>(), any::<i64>(), any::<i64>()), 1..64)) {
        let storage = AtomicStorage::prepare(initial);
        let mut model = initial;

        for (use_current, guess, desired) in ops {
            let expected = if use_current { model } else { guess };
            let result = storage.compare_exchange_strong(expected, desired, CompareExchangeOrdering::SeqCstSeqCst);
            if expected == model {
                prop_assert_eq!(result, Ok(model));
                model = desired;
            } else {
                prop_assert_eq!(result, Err(model));
            }
            prop_assert_eq!(storage.load(LoadOrdering::SeqCst), model);
        }
    }

    #[test]
    fn weak_success_implies_equality(stored in any::<u16>(), expected in any::<u16>(), desired in any::<u16>()) {
        let storage = AtomicStorage::prepare(0u16);
        storage.store(stored, StoreOrdering::Release);
        match storage.compare_exchange_weak(expected, desired, CompareExchangeOrdering::AcquireAcquire) {
            Ok(previous) => {
                prop_assert_eq!(previous, stored);
                prop_assert_eq!(expected, stored);
                prop_assert_eq!(storage.load(LoadOrdering::Acquire), desired);
            }
            Err(observed) => {
                prop_assert_eq!(observed, stored);
                prop_assert_eq!(storage.load(LoadOrdering::Acquire), stored);
            }
        }
    }
}
