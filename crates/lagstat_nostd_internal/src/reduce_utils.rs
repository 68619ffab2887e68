// this defines some basic utilities used in reductions.

use crate::reducer::Reducer;
use crate::state::{StatePackView, StatePackViewMut};

/// (re)initialize every accum_state in `statepack`
pub fn reset_full_statepack(reducer: &impl Reducer, statepack: &mut StatePackViewMut) {
    for i in 0..statepack.n_states() {
        reducer.init_accum_state(&mut statepack.get_state_mut(i));
    }
}

/// merge every accum_state in `other` into the corresponding accum_state of
/// `statepack`
pub fn merge_full_statepacks(
    reducer: &impl Reducer,
    statepack: &mut StatePackViewMut,
    other: &StatePackView,
) {
    let n_bins = statepack.n_states();
    assert_eq!(n_bins, other.n_states());
    for i in 0..n_bins {
        reducer.merge(&mut statepack.get_state_mut(i), &other.get_state(i));
    }
}

/// consolidates the statepacks in such a way that scratch_statepacks[0]
/// contains the results of every other statepack
///
/// this function makes no guarantees about the final state of other
/// entries within scratch_statepacks
///
/// The merge order is fixed (entry 1, then entry 2, and so on). Callers rely
/// on this to produce bitwise identical results regardless of how the work
/// that filled the scratch statepacks was decomposed.
pub fn serial_consolidate_scratch_statepacks(
    reducer: &impl Reducer,
    scratch_statepacks: &mut [StatePackViewMut],
) {
    for i in 1..scratch_statepacks.len() {
        let [main, other] = scratch_statepacks.get_disjoint_mut([0, i]).unwrap();
        merge_full_statepacks(reducer, main, &other.as_view());
    }
}
