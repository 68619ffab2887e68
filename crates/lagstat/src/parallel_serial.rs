//! Implements the "serial" backend for driving lag reductions

use lagstat_nostd_internal::{
    BinEdges, Executor, LagReduction, Reducer, StatePackViewMut, reset_full_statepack,
    serial_consolidate_scratch_statepacks,
};
use std::num::NonZeroUsize;

/// A backend that executes every chunk of a reduction on the current thread.
///
/// Even though a single thread does all the work, the reduction is still
/// decomposed into `n_chunks` chunks that are accumulated into separate
/// scratch statepacks and merged at the end. This mirrors the control flow
/// of a multi-threaded backend.
pub struct SerialExecutor;

impl Executor for SerialExecutor {
    fn drive_reduce<R: Reducer, B: BinEdges>(
        &mut self,
        out: &mut StatePackViewMut,
        reduction: &LagReduction<'_, R, B>,
        n_chunks: NonZeroUsize,
    ) -> Result<(), &'static str> {
        let n_chunks = n_chunks.get();
        let [accum_state_size, n_bins] = reduction.statepack_shape();
        if [out.state_size(), out.n_states()] != [accum_state_size, n_bins] {
            return Err("the out argument doesn't have the correct shape!");
        }
        let chunk_statepack_size = accum_state_size * n_bins;

        let mut chunk_statepack_storage: Vec<f64> = vec![0.0; chunk_statepack_size * n_chunks];

        // the reason the following logic isn't written in a more
        // straight-forward way is to make sure it is bitwise reproducible
        // with a parallel backend

        let mut chunk_statepacks: Vec<StatePackViewMut> = chunk_statepack_storage
            .as_mut_slice()
            .chunks_exact_mut(chunk_statepack_size)
            .map(|buf: &mut [f64]| StatePackViewMut::from_slice(n_bins, accum_state_size, buf))
            .collect();

        // fill up the statepack for each chunk
        for (chunk_id, statepack) in chunk_statepacks.iter_mut().enumerate() {
            reset_full_statepack(reduction.reducer(), statepack);
            reduction.accumulate_chunk(statepack, chunk_id, n_chunks)?;
        }

        // consolidate each chunk's statepack (the merge order is fixed)
        serial_consolidate_scratch_statepacks(reduction.reducer(), &mut chunk_statepacks);

        out.as_slice_mut()[..chunk_statepack_size]
            .copy_from_slice(&chunk_statepacks[0].as_slice()[..chunk_statepack_size]);
        Ok(())
    }
}
