//! Row dispatch for per-pixel operations.
//!
//! Output rows never alias, so each one can be handed to a different rayon
//! worker. Without the `parallel` feature (or with it switched off in
//! [`GradeOptions`](crate::GradeOptions)) rows run in order on the calling
//! thread.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Calls `f(y, row)` for every `stride`-sized row of `dst`.
///
/// Each call sees only its own row, so `f` may run concurrently.
pub(crate) fn for_each_row<F>(dst: &mut [u8], stride: usize, parallel: bool, f: F)
where
    F: Fn(usize, &mut [u8]) + Send + Sync,
{
    debug_assert!(stride > 0, "stride must be non-zero");

    #[cfg(feature = "parallel")]
    {
        if parallel {
            dst.par_chunks_mut(stride)
                .enumerate()
                .for_each(|(y, row)| f(y, row));
            return;
        }
    }

    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    dst.chunks_mut(stride)
        .enumerate()
        .for_each(|(y, row)| f(y, row));
}
