//! Implements the fused pair loop at the heart of the structure function
//! calculation.
//!
//! Rather than materializing the full list of pairs (which grows as O(N²)),
//! we generate each pair, compute its contribution, and immediately feed it
//! to the reducer.

use crate::bins::BinEdges;
use crate::lightcurve::LightCurve;
use crate::reducer::{Datum, Reducer};
use crate::state::StatePackViewMut;

/// Specifies a lag-binned reduction over the unique pairs of a lightcurve.
///
/// Each unordered pair of observations `(i, j)` with a nonzero time
/// separation contributes its noise-corrected squared difference,
/// `(values[j] - values[i])² - (errors[i]² + errors[j]²)`, to the bin that
/// its lag falls in. Pairs with identical times carry no lag information and
/// are skipped. A pair whose lag falls outside the bin edges is an error
/// (the edges are required to cover the full range of retained lags).
///
/// The overall reduction can be decomposed into units of work: chunk `c` of
/// `n` covers a contiguous block of the outer pair-loop index. Accumulating
/// every chunk exactly once (into one or more statepacks that are later
/// merged) visits each unique pair exactly once.
pub struct LagReduction<'a, R: Reducer, B: BinEdges> {
    reducer: &'a R,
    curve: &'a LightCurve<'a>,
    lag_bin_edges: &'a B,
}

impl<'a, R: Reducer, B: BinEdges> LagReduction<'a, R, B> {
    pub fn new(reducer: &'a R, curve: &'a LightCurve<'a>, lag_bin_edges: &'a B) -> Self {
        Self {
            reducer,
            curve,
            lag_bin_edges,
        }
    }

    /// return a reference to the reducer
    pub fn reducer(&self) -> &R {
        self.reducer
    }

    /// the number of lag bins in this reduction
    pub fn n_bins(&self) -> usize {
        self.lag_bin_edges.n_bins()
    }

    /// the required shape of a statepack, as `[accum_state_size, n_bins]`
    pub fn statepack_shape(&self) -> [usize; 2] {
        [self.reducer.accum_state_size(), self.n_bins()]
    }

    /// Provides the bounds on the outer pair-loop index covered by the
    /// specified chunk.
    ///
    /// The chunks partition the outer index range: every index is covered by
    /// exactly one chunk (trailing chunks may be empty when `n_chunks`
    /// exceeds the number of outer indices).
    pub fn chunk_loop_bounds(&self, chunk_id: usize, n_chunks: usize) -> (usize, usize) {
        // the last observation never leads a pair
        let n_outer = self.curve.n_observations() - 1;
        let per_chunk = n_outer.div_ceil(n_chunks);
        let start = (chunk_id * per_chunk).min(n_outer);
        let stop = (start + per_chunk).min(n_outer);
        (start, stop)
    }

    /// Accumulate the pair contributions of a single chunk into `statepack`.
    ///
    /// The caller is responsible for initializing `statepack` beforehand
    /// (states are updated, never reset).
    pub fn accumulate_chunk(
        &self,
        statepack: &mut StatePackViewMut,
        chunk_id: usize,
        n_chunks: usize,
    ) -> Result<(), &'static str> {
        debug_assert!(chunk_id < n_chunks);
        let times = self.curve.times();
        let values = self.curve.values();
        let errors = self.curve.errors();
        let n = self.curve.n_observations();

        let (start, stop) = self.chunk_loop_bounds(chunk_id, n_chunks);
        for i in start..stop {
            for j in (i + 1)..n {
                let dt = times[j] - times[i];
                if dt == 0.0 {
                    continue;
                }
                let lag = dt.abs();
                let Some(bin_idx) = self.lag_bin_edges.bin_index(lag) else {
                    return Err("a retained pair lag lies outside the lag bin edges");
                };
                let dm = values[j] - values[i];
                let err2 = (errors[i] * errors[i]) + (errors[j] * errors[j]);
                let datum = Datum {
                    value: (dm * dm) - err2,
                    weight: 1.0,
                };
                self.reducer
                    .consume(&mut statepack.get_state_mut(bin_idx), &datum);
            }
        }
        Ok(())
    }
}

/// Accumulate the contributions from every unique pair of `curve` into
/// `statepack` (the single-chunk case of [`LagReduction`]).
///
/// The caller is responsible for initializing `statepack` beforehand.
pub fn apply_accum(
    statepack: &mut StatePackViewMut,
    reducer: &impl Reducer,
    curve: &LightCurve,
    lag_bin_edges: &impl BinEdges,
) -> Result<(), &'static str> {
    let reduction = LagReduction::new(reducer, curve, lag_bin_edges);
    reduction.accumulate_chunk(statepack, 0, 1)
}
