use crate::fence::thread_fence;
use crate::ordering::FenceOrdering;

macro_rules! ffi_fence_fns {
    ($($order:ident => $variant:ident),*) => {
        paste::paste! {
            $(
                #[doc = concat!("`", stringify!($variant), "` thread fence.")]
                #[no_mangle]
                pub extern "C" fn [<_sa_thread_fence_ $order>]() {
                    thread_fence(FenceOrdering::$variant);
                }
            )*
        }
    };
}

ffi_fence_fns!(acquire => Acquire, release => Release, acq_rel => AcqRel, seq_cst => SeqCst);
