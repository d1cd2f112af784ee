use atomics_shims::{AtomicStorage, LoadOrdering, UpdateOrdering};
use std::sync::Barrier;
use std::thread;

/// Two threads race an exchange on a zeroed cell. Each exchange must observe
/// exactly the value the other left behind (or the initial zero), so the
/// outcomes form a single chain ending in the final value.
#[test]
fn racing_exchanges_form_a_chain() {
    for _ in 0..2_000 {
        let cell = AtomicStorage::prepare(0i32);
        let barrier = Barrier::new(2);

        let (seen_by_one, seen_by_two) = thread::scope(|s| {
            let one = s.spawn(|| {
                barrier.wait();
                cell.exchange(1, UpdateOrdering::AcqRel)
            });
            let two = s.spawn(|| {
                barrier.wait();
                cell.exchange(2, UpdateOrdering::AcqRel)
            });
            (one.join().unwrap(), two.join().unwrap())
        });

        let last = cell.load(LoadOrdering::Acquire);
        match (seen_by_one, seen_by_two) {
            (0, 1) => assert_eq!(last, 2),
            (2, 0) => assert_eq!(last, 1),
            other => panic!("inconsistent exchange chain {other:?}, final {last}"),
        }
    }
}

/// Every value handed in is handed back out exactly once.
#[test]
fn exchange_conserves_tokens() {
    const THREADS: u64 = 8;
    const PER_THREAD: u64 = 500;

    let cell = AtomicStorage::prepare(0u64);
    let collected: Vec<u64> = thread::scope(|s| {
        let handles: Vec<_> = (0..THREADS)
            .map(|t| {
                let cell = &cell;
                s.spawn(move || {
                    (0..PER_THREAD)
                        .map(|i| cell.exchange(1 + t * PER_THREAD + i, UpdateOrdering::SeqCst))
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles.into_iter().flat_map(|h| h.join().unwrap()).collect()
    });

    let mut all = collected;
    all.push(cell.dispose());
    all.sort_unstable();
    let expected: Vec<u64> = (0..=THREADS * PER_THREAD).collect();
    assert_eq!(all, expected);
}
