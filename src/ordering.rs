//! Typed memory orderings.
//!
//! `core::sync::atomic::Ordering` admits combinations the hardware model does
//! not: a `Release` load, an `Acquire` store, an `AcqRel` compare-exchange
//! failure ordering. The standard atomics panic on those at runtime. Here each
//! operation family gets its own enum holding only the orderings it accepts,
//! so an illegal call cannot be expressed.
//!
//! Every enum converts into `core::sync::atomic::Ordering` with a `const fn`;
//! with a constant argument the conversion folds away.

use core::fmt;
use core::sync::atomic::Ordering;

/// Orderings accepted by loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadOrdering {
    /// No ordering constraint.
    Relaxed,
    /// Subsequent accesses are not reordered before the load.
    Acquire,
    /// Acquire, plus a single total order with other `SeqCst` operations.
    SeqCst,
}

impl LoadOrdering {
    /// All load orderings, weakest first.
    pub const ALL: [Self; 3] = [Self::Relaxed, Self::Acquire, Self::SeqCst];

    /// The equivalent `core` ordering.
    #[inline(always)]
    pub const fn to_ordering(self) -> Ordering {
        match self {
            Self::Relaxed => Ordering::Relaxed,
            Self::Acquire => Ordering::Acquire,
            Self::SeqCst => Ordering::SeqCst,
        }
    }

    /// The name used in exported symbols.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Relaxed => "relaxed",
            Self::Acquire => "acquire",
            Self::SeqCst => "seq_cst",
        }
    }
}

/// Orderings accepted by stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOrdering {
    /// No ordering constraint.
    Relaxed,
    /// Preceding accesses are not reordered after the store.
    Release,
    /// Release, plus a single total order with other `SeqCst` operations.
    SeqCst,
}

impl StoreOrdering {
    /// All store orderings, weakest first.
    pub const ALL: [Self; 3] = [Self::Relaxed, Self::Release, Self::SeqCst];

    /// The equivalent `core` ordering.
    #[inline(always)]
    pub const fn to_ordering(self) -> Ordering {
        match self {
            Self::Relaxed => Ordering::Relaxed,
            Self::Release => Ordering::Release,
            Self::SeqCst => Ordering::SeqCst,
        }
    }

    /// The name used in exported symbols.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Relaxed => "relaxed",
            Self::Release => "release",
            Self::SeqCst => "seq_cst",
        }
    }
}

/// Orderings accepted by read-modify-write operations (exchange, fetch-modify).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpdateOrdering {
    /// No ordering constraint.
    Relaxed,
    /// The load half is `Acquire`, the store half `Relaxed`.
    Acquire,
    /// The load half is `Relaxed`, the store half `Release`.
    Release,
    /// Both halves ordered.
    AcqRel,
    /// `AcqRel`, plus a single total order with other `SeqCst` operations.
    SeqCst,
}

impl UpdateOrdering {
    /// All read-modify-write orderings, weakest first.
    pub const ALL: [Self; 5] =
        [Self::Relaxed, Self::Acquire, Self::Release, Self::AcqRel, Self::SeqCst];

    /// The equivalent `core` ordering.
    #[inline(always)]
    pub const fn to_ordering(self) -> Ordering {
        match self {
            Self::Relaxed => Ordering::Relaxed,
            Self::Acquire => Ordering::Acquire,
            Self::Release => Ordering::Release,
            Self::AcqRel => Ordering::AcqRel,
            Self::SeqCst => Ordering::SeqCst,
        }
    }

    /// The name used in exported symbols.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Relaxed => "relaxed",
            Self::Acquire => "acquire",
            Self::Release => "release",
            Self::AcqRel => "acq_rel",
            Self::SeqCst => "seq_cst",
        }
    }
}

/// Orderings accepted by standalone fences.
///
/// There is no `Relaxed` fence: it would have no effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FenceOrdering {
    /// Acquire fence.
    Acquire,
    /// Release fence.
    Release,
    /// Acquire and release fence.
    AcqRel,
    /// Sequentially consistent fence.
    SeqCst,
}

impl FenceOrdering {
    /// All fence orderings, weakest first.
    pub const ALL: [Self; 4] = [Self::Acquire, Self::Release, Self::AcqRel, Self::SeqCst];

    /// The equivalent `core` ordering.
    #[inline(always)]
    pub const fn to_ordering(self) -> Ordering {
        match self {
            Self::Acquire => Ordering::Acquire,
            Self::Release => Ordering::Release,
            Self::AcqRel => Ordering::AcqRel,
            Self::SeqCst => Ordering::SeqCst,
        }
    }

    /// The name used in exported symbols.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Acquire => "acquire",
            Self::Release => "release",
            Self::AcqRel => "acq_rel",
            Self::SeqCst => "seq_cst",
        }
    }
}

/// The nine legal `(success, failure)` ordering pairs of a compare-exchange.
///
/// The failure ordering is a load ordering no stronger than the success
/// ordering; it is never `Release` or `AcqRel`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareExchangeOrdering {
    /// `Relaxed` / `Relaxed`.
    RelaxedRelaxed,
    /// `Acquire` / `Relaxed`.
    AcquireRelaxed,
    /// `Release` / `Relaxed`.
    ReleaseRelaxed,
    /// `AcqRel` / `Relaxed`.
    AcqRelRelaxed,
    /// `SeqCst` / `Relaxed`.
    SeqCstRelaxed,
    /// `Acquire` / `Acquire`.
    AcquireAcquire,
    /// `AcqRel` / `Acquire`.
    AcqRelAcquire,
    /// `SeqCst` / `Acquire`.
    SeqCstAcquire,
    /// `SeqCst` / `SeqCst`.
    SeqCstSeqCst,
}

impl CompareExchangeOrdering {
    /// Every legal pair.
    pub const ALL: [Self; 9] = [
        Self::RelaxedRelaxed,
        Self::AcquireRelaxed,
        Self::ReleaseRelaxed,
        Self::AcqRelRelaxed,
        Self::SeqCstRelaxed,
        Self::AcquireAcquire,
        Self::AcqRelAcquire,
        Self::SeqCstAcquire,
        Self::SeqCstSeqCst,
    ];

    /// Pairs a success and a failure ordering, or `None` if the pair is illegal.
    pub const fn new(success: UpdateOrdering, failure: LoadOrdering) -> Option<Self> {
        use LoadOrdering as F;
        use UpdateOrdering as S;

        Some(match (success, failure) {
            (S::Relaxed, F::Relaxed) => Self::RelaxedRelaxed,
            (S::Acquire, F::Relaxed) => Self::AcquireRelaxed,
            (S::Release, F::Relaxed) => Self::ReleaseRelaxed,
            (S::AcqRel, F::Relaxed) => Self::AcqRelRelaxed,
            (S::SeqCst, F::Relaxed) => Self::SeqCstRelaxed,
            (S::Acquire, F::Acquire) => Self::AcquireAcquire,
            (S::AcqRel, F::Acquire) => Self::AcqRelAcquire,
            (S::SeqCst, F::Acquire) => Self::SeqCstAcquire,
            (S::SeqCst, F::SeqCst) => Self::SeqCstSeqCst,
            _ => return None,
        })
    }

    /// Ordering applied when the exchange happens.
    #[inline(always)]
    pub const fn success(self) -> UpdateOrdering {
        match self {
            Self::RelaxedRelaxed => UpdateOrdering::Relaxed,
            Self::AcquireRelaxed | Self::AcquireAcquire => UpdateOrdering::Acquire,
            Self::ReleaseRelaxed => UpdateOrdering::Release,
            Self::AcqRelRelaxed | Self::AcqRelAcquire => UpdateOrdering::AcqRel,
            Self::SeqCstRelaxed | Self::SeqCstAcquire | Self::SeqCstSeqCst => {
                UpdateOrdering::SeqCst
            }
        }
    }

    /// Ordering applied to the load when the comparison fails.
    #[inline(always)]
    pub const fn failure(self) -> LoadOrdering {
        match self {
            Self::RelaxedRelaxed
            | Self::AcquireRelaxed
            | Self::ReleaseRelaxed
            | Self::AcqRelRelaxed
            | Self::SeqCstRelaxed => LoadOrdering::Relaxed,
            Self::AcquireAcquire | Self::AcqRelAcquire | Self::SeqCstAcquire => {
                LoadOrdering::Acquire
            }
            Self::SeqCstSeqCst => LoadOrdering::SeqCst,
        }
    }
}

/// Whether a compare-exchange may fail spuriously.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareExchangeStrength {
    /// Fails only when the stored value differs from the expected one.
    Strong,
    /// May also fail when the values are equal; meant for retry loops.
    Weak,
}

impl CompareExchangeStrength {
    /// Both strengths.
    pub const ALL: [Self; 2] = [Self::Strong, Self::Weak];

    /// The name used in exported symbols.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Strong => "strong",
            Self::Weak => "weak",
        }
    }
}

/// Read-modify-write operations on integer storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchOp {
    /// Wrapping addition.
    Add,
    /// Wrapping subtraction.
    Sub,
    /// Bitwise or.
    Or,
    /// Bitwise exclusive or.
    Xor,
    /// Bitwise and.
    And,
}

impl FetchOp {
    /// All operations.
    pub const ALL: [Self; 5] = [Self::Add, Self::Sub, Self::Or, Self::Xor, Self::And];

    /// The name used in exported symbols.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Or => "or",
            Self::Xor => "xor",
            Self::And => "and",
        }
    }
}

/// The bitwise subset of [`FetchOp`]; the only operations boolean storage has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BitwiseOp {
    /// Bitwise (logical for `bool`) or.
    Or,
    /// Bitwise (logical for `bool`) exclusive or.
    Xor,
    /// Bitwise (logical for `bool`) and.
    And,
}

impl BitwiseOp {
    /// All bitwise operations.
    pub const ALL: [Self; 3] = [Self::Or, Self::Xor, Self::And];
}

impl From<BitwiseOp> for FetchOp {
    fn from(op: BitwiseOp) -> Self {
        match op {
            BitwiseOp::Or => Self::Or,
            BitwiseOp::Xor => Self::Xor,
            BitwiseOp::And => Self::And,
        }
    }
}

macro_rules! impl_into_ordering {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Ordering {
                #[inline(always)]
                fn from(ordering: $ty) -> Self {
                    ordering.to_ordering()
                }
            }

            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

impl_into_ordering!(LoadOrdering, StoreOrdering, UpdateOrdering, FenceOrdering);

impl fmt::Display for CompareExchangeOrdering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.success(), self.failure())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exactly_nine_legal_pairs() {
        let mut legal = Vec::new();
        for success in UpdateOrdering::ALL {
            for failure in LoadOrdering::ALL {
                if let Some(pair) = CompareExchangeOrdering::new(success, failure) {
                    assert_eq!(pair.success(), success);
                    assert_eq!(pair.failure(), failure);
                    legal.push(pair);
                }
            }
        }
        assert_eq!(legal.len(), 9);
        for pair in CompareExchangeOrdering::ALL {
            assert!(legal.contains(&pair));
        }
    }

    #[test]
    fn failure_never_stronger_than_success() {
        use LoadOrdering as L;
        use UpdateOrdering as U;

        assert_eq!(CompareExchangeOrdering::new(U::Relaxed, L::Acquire), None);
        assert_eq!(CompareExchangeOrdering::new(U::Release, L::Acquire), None);
        assert_eq!(CompareExchangeOrdering::new(U::AcqRel, L::SeqCst), None);
        assert_eq!(CompareExchangeOrdering::new(U::Acquire, L::SeqCst), None);
    }

    #[test]
    fn symbol_names() {
        assert_eq!(CompareExchangeOrdering::AcqRelAcquire.to_string(), "acq_rel_acquire");
        assert_eq!(CompareExchangeOrdering::SeqCstSeqCst.to_string(), "seq_cst_seq_cst");
        assert_eq!(UpdateOrdering::AcqRel.to_string(), "acq_rel");
        assert_eq!(FetchOp::from(BitwiseOp::Xor).as_str(), "xor");
    }

    #[test]
    fn converts_to_core_ordering() {
        assert_eq!(Ordering::from(LoadOrdering::Acquire), Ordering::Acquire);
        assert_eq!(Ordering::from(StoreOrdering::Release), Ordering::Release);
        assert_eq!(Ordering::from(FenceOrdering::AcqRel), Ordering::AcqRel);
        assert_eq!(UpdateOrdering::SeqCst.to_ordering(), Ordering::SeqCst);
    }
}
