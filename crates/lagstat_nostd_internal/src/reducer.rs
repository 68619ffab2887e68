//! Define basic reducer machinery (that doesn't require the standard lib)
//!
//! # Reducer Machinery
//!
//! The architecture of this crate is built upon the concept of accumulation.
//! We want to compute a binned statistic for a stream of pair values, where
//! the ith element of the stream carries a scalar `yᵢ` (the quantity that
//! contributes to the statistic) and a weighting `wᵢ`. The time lag of the
//! pair is used for binning and is handled separately. In practice, we use
//! [`Datum`] to package together `yᵢ` & `wᵢ`.
//!
//! The reducer machinery is responsible for computing the statistic within a
//! single bin. We draw a distinction between the current state of the
//! reduction and the actual reducer logic.
//! - We refer to the current state of a single reduction as the `accum_state`
//! - The reducer logic is encapsulated by the functions implemented by the
//!   [`Reducer`] trait. A Reducer implements logic for modifying a single
//!   `accum_state` at a time.
//! - From the perspective of a reducer, the `accum_state` is packaged inside
//!   the [`AccumStateView`] & [`AccumStateViewMut`] types (the exact type
//!   depends on context)
//!
//! External code manages each bin's `accum_state`. A collection of
//! `accum_state`s is usually managed by a [`StatePackViewMut`] instance.
//! The reducers are designed to be agnostic about the precise way a given
//! `accum_state` is organized in memory.
//!
//! [`StatePackViewMut`]: crate::state::StatePackViewMut

use crate::state::{AccumStateView, AccumStateViewMut};
use ndarray::ArrayViewMut1;

/// Instances of this type are consumed by a [`Reducer`].
///
/// `value` holds the pair's noise-corrected squared difference and `weight`
/// holds the weighting applied to it.
#[derive(Clone, Copy)]
pub struct Datum {
    pub value: f64,
    pub weight: f64,
}

/// describes the output components from a single Reducer accum_state
pub enum OutputDescr {
    MultiScalarComp(&'static [&'static str]),
    SingleVecComp { size: usize, name: &'static str },
}

impl OutputDescr {
    /// the number of output elements to allocate per accum_state
    pub fn n_per_accum_state(&self) -> usize {
        match self {
            Self::MultiScalarComp(names) => names.len(),
            Self::SingleVecComp { size, .. } => *size,
        }
    }
}

/// Reducers generally operate on individual `accum_state`s.
pub trait Reducer {
    /// the number of f64 elements needed to track the accumulator data
    fn accum_state_size(&self) -> usize;

    /// initializes the storage tracking the accumulator's state.
    ///
    /// You need to call this function before you start working with the
    /// storage. You can also use this to reset the accumulator's state since
    /// it blindly overwrites any existing values.
    fn init_accum_state(&self, accum_state: &mut AccumStateViewMut);

    /// consume the value and weight to update the accum_state
    fn consume(&self, accum_state: &mut AccumStateViewMut, datum: &Datum);

    /// merge the state information tracked by `accum_state` and `other`, and
    /// update `accum_state` accordingly
    fn merge(&self, accum_state: &mut AccumStateViewMut, other: &AccumStateView);

    /// extract all output-values from a single accum_state. Expects `value`
    /// to have the shape given by `[self.output_descr().n_per_accum_state()]`
    /// and `accum_state` to have the shape `[self.accum_state_size()]`
    fn value_from_accum_state(&self, value: &mut ArrayViewMut1<f64>, accum_state: &AccumStateView);

    /// Describes the outputs produced from a single accum_state
    fn output_descr(&self) -> OutputDescr;
}

/// Computes the weighted mean of the consumed data.
///
/// The accum_state tracks a running total and a running weight. The reported
/// mean is their ratio, so a state that never consumed anything reports
/// `0.0 / 0.0 = NaN`.
#[derive(Clone, Copy, Default, Debug)]
pub struct Mean;

impl Mean {
    const TOTAL: usize = 0;
    const WEIGHT: usize = 1;

    const VALUE_MEAN: usize = 0;
    const VALUE_WEIGHT: usize = 1;
    const OUTPUT_COMPONENTS: &'static [&'static str] = &["mean", "weight"];

    pub fn new() -> Self {
        Self
    }
}

impl Reducer for Mean {
    fn accum_state_size(&self) -> usize {
        2_usize
    }

    fn init_accum_state(&self, accum_state: &mut AccumStateViewMut) {
        accum_state[Self::TOTAL] = 0.0;
        accum_state[Self::WEIGHT] = 0.0;
    }

    fn consume(&self, accum_state: &mut AccumStateViewMut, datum: &Datum) {
        accum_state[Self::WEIGHT] += datum.weight;
        accum_state[Self::TOTAL] += datum.value * datum.weight;
    }

    fn merge(&self, accum_state: &mut AccumStateViewMut, other: &AccumStateView) {
        accum_state[Self::TOTAL] += other[Self::TOTAL];
        accum_state[Self::WEIGHT] += other[Self::WEIGHT];
    }

    fn output_descr(&self) -> OutputDescr {
        OutputDescr::MultiScalarComp(Self::OUTPUT_COMPONENTS)
    }

    fn value_from_accum_state(&self, value: &mut ArrayViewMut1<f64>, accum_state: &AccumStateView) {
        value[[Self::VALUE_MEAN]] = accum_state[Self::TOTAL] / accum_state[Self::WEIGHT];
        value[[Self::VALUE_WEIGHT]] = accum_state[Self::WEIGHT];
    }
}
