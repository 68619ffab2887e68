/*!
Provides routines for directly computing the structure function of
irregularly sampled time-series (e.g. astronomical lightcurves) with known
measurement uncertainties.

# High-Level: Structure Functions

The squared structure function characterizes how much a signal varies as a
function of time separation (the "lag"). The calculation consists of
computing a noise-corrected squared difference from each unique pair of
observations and partitioning those values into bins based on the pair's
lag. Subtracting the pair's measurement variance from each squared
difference makes the per-bin mean an unbiased estimate of the intrinsic
variability (at the cost of allowing small negative values in bins
dominated by noise).

The simplest entrypoint is [`sf2`]. The [`Accumulator`] type exposes the
same calculation incrementally: partial results from separately processed
lightcurve chunks can be merged into a single estimate.

# Developer Guide

See the crate-level documentation for [`lagstat_nostd_internal`].

*/

#![deny(rustdoc::broken_intra_doc_links)]

// inform build-system of the crates in this package
mod accumulator;
mod error;
mod func;
mod parallel_serial;

// pull in symbols that visible outside of the package
pub use accumulator::{Accumulator, AccumulatorBuilder, get_output};
pub use error::Error;
pub use func::sf2;
pub use lagstat_nostd_internal::{
    AccumStateView, AccumStateViewMut, BinEdges, Datum, Executor, IrregularBinEdges, LagReduction,
    LightCurve, Mean, OutputDescr, Reducer, RegularBinEdges, StatePackView, StatePackViewMut,
    apply_accum, merge_full_statepacks, reset_full_statepack,
    serial_consolidate_scratch_statepacks, validate_bin_edges,
};
pub use parallel_serial::SerialExecutor;
