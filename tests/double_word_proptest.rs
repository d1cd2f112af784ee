use atomics_shims::{DoubleWord, DoubleWordStorageLayout};
use proptest::prelude::*;

proptest! {
    #[test]
    fn halves_survive_construction(high in any::<usize>(), low in any::<usize>()) {
        let word = DoubleWord::new(high, low);
        prop_assert_eq!(word.high(), high);
        prop_assert_eq!(word.low(), low);
        prop_assert_eq!(DoubleWord::from_bits(word.to_bits()), word);
        prop_assert_eq!(DoubleWord::from((high, low)), word);
    }

    #[test]
    fn halves_occupy_disjoint_bits(high in any::<usize>(), low in any::<usize>()) {
        let bits = DoubleWord::new(high, low).to_bits();
        let low_mask = DoubleWord::new(0, usize::MAX).to_bits();
        prop_assert_eq!(DoubleWord::from_bits(bits & !low_mask), DoubleWord::new(high, 0));
        prop_assert_eq!(DoubleWord::from_bits(bits & low_mask), DoubleWord::new(0, low));
    }
}

#[test]
fn layout_is_two_words_double_aligned() {
    let word = core::mem::size_of::<usize>();
    assert_eq!(DoubleWordStorageLayout::SIZE, 2 * word);
    assert_eq!(DoubleWordStorageLayout::ALIGN, 2 * word);
    assert_eq!(core::mem::size_of::<DoubleWord>(), 2 * word);
}

#[cfg(atomics_dword)]
mod atomic {
    use super::*;
    use atomics_shims::{AtomicStorage, CompareExchangeOrdering, LoadOrdering, StoreOrdering};

    proptest! {
        #[test]
        fn stored_pairs_load_back(pairs in proptest::collection::vec((any::<usize>(), any::<usize>()), 1..32)) {
            let storage = AtomicStorage::prepare(DoubleWord::default());
            for (high, low) in pairs {
                let word = DoubleWord::new(high, low);
                storage.store(word, StoreOrdering::Release);
                prop_assert_eq!(storage.load(LoadOrdering::Acquire), word);
            }
        }

        #[test]
        fn compare_exchange_checks_both_halves(high in any::<usize>(), low in any::<usize>(), flip_high in any::<bool>()) {
            let current = DoubleWord::new(high, low);
            let stale = if flip_high {
                DoubleWord::new(!high, low)
            } else {
                DoubleWord::new(high, !low)
            };
            let storage = AtomicStorage::prepare(current);
            let desired = DoubleWord::new(low, high);

            prop_assert_eq!(
                storage.compare_exchange_strong(stale, desired, CompareExchangeOrdering::SeqCstSeqCst),
                Err(current)
            );
            prop_assert_eq!(
                storage.compare_exchange_strong(current, desired, CompareExchangeOrdering::AcqRelAcquire),
                Ok(current)
            );
            prop_assert_eq!(storage.dispose(), desired);
        }
    }
}
