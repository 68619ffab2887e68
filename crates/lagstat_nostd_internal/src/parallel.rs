//! Defines the seam between a [`LagReduction`] and the backend that drives it
//!
//! In general, a parallel reduction is a way of characterizing a certain kind
//! of calculation that can be broken into parts, where each part can be
//! computed simultaneously, and each of the partial results can be combined
//! together into a single result.
//!
//! A [`LagReduction`] decomposes its pair loop into chunks (contiguous blocks
//! of the outer loop index). A backend distributes those chunks however it
//! likes, accumulating each chunk into some statepack and merging the partial
//! statepacks into a single result. The one requirement placed on backends is
//! that the final merge happens in a fixed order, so that a given
//! `(reduction, n_chunks)` pair always produces bitwise identical output.

use crate::apply::LagReduction;
use crate::bins::BinEdges;
use crate::reducer::Reducer;
use crate::state::StatePackViewMut;
use core::num::NonZeroUsize;

/// a trait for expressing how to launch a reduction
///
/// The idea is that we implement this for each parallelism "backend," so we
/// have a uniform interface for easily switching between backends.
///
/// **NOTE:** Types that implement this trait are intended to live entirely on
/// the CPU. An accelerator backend would provide a type that implements this
/// trait in order to execute the CPU calls that are needed for managing
/// memory and launching device calculations.
pub trait Executor {
    /// Execute `reduction` and store the result in `out`.
    ///
    /// `out` must have the shape given by `reduction.statepack_shape()`. It
    /// is fully overwritten (callers don't need to initialize it).
    fn drive_reduce<R: Reducer, B: BinEdges>(
        &mut self,
        out: &mut StatePackViewMut,
        reduction: &LagReduction<'_, R, B>,
        n_chunks: NonZeroUsize,
    ) -> Result<(), &'static str>;
}
