#![no_std]
mod apply;
mod bins;
mod lightcurve;
mod parallel;
mod reduce_utils;
mod reducer;
mod state;

pub use apply::{LagReduction, apply_accum};
pub use bins::{BinEdges, IrregularBinEdges, RegularBinEdges, validate_bin_edges};
pub use lightcurve::LightCurve;
pub use parallel::Executor;
pub use reduce_utils::{
    merge_full_statepacks, reset_full_statepack, serial_consolidate_scratch_statepacks,
};
pub use reducer::{Datum, Mean, OutputDescr, Reducer};
pub use state::{AccumStateView, AccumStateViewMut, StatePackView, StatePackViewMut};
