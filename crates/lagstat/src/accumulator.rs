//! Implements the [`Accumulator`] type, which carries the state of an
//! in-progress structure function calculation, and the builder used to
//! construct it.
//!
//! An accumulator owns a binned statepack (an accum_state per lag bin). The
//! statepack starts out empty, [`Accumulator::process`] folds in the
//! contributions from a lightcurve, and [`Accumulator::merge`] combines the
//! statepacks of separately-processed accumulators. This makes it possible to
//! split a collection of lightcurves across processes and combine the partial
//! results at the end.

use std::collections::HashMap;
use std::num::NonZeroUsize;

use ndarray::{ArrayView1, ArrayViewMut2, Axis};

use crate::error::Error;
use crate::parallel_serial::SerialExecutor;
use lagstat_nostd_internal::{
    BinEdges, Executor, IrregularBinEdges, LagReduction, LightCurve, Mean, OutputDescr, Reducer,
    RegularBinEdges, StatePackView, StatePackViewMut, merge_full_statepacks, reset_full_statepack,
    validate_bin_edges,
};

/// Wraps a vector holding pre-validated bin edges. This primarily exists so
/// that we can implement the `Eq` trait.
///
/// # Note
/// Ordinarily, [`f64`], and by extension `Vec<f64>` doesn't implement `Eq`
/// since `NaN` != `NaN`. We can implement it here since
/// [`lagstat_nostd_internal::validate_bin_edges`] ensures there aren't any
/// `NaN` values
#[derive(Clone, Debug)]
pub(crate) struct ValidatedBinEdgeVec(Vec<f64>);

impl ValidatedBinEdgeVec {
    pub(crate) fn new(edges: Vec<f64>) -> Result<Self, Error> {
        validate_bin_edges(&edges).map_err(Error::bin_edge)?;
        Ok(Self(edges))
    }

    fn as_irregular_edge_view<'a>(&'a self) -> IrregularBinEdges<'a> {
        // TODO consider introducing a way to bypass error checks when
        // we construct IrregularBinEdges from ValidatedBinEdgeVec
        IrregularBinEdges::new(self.0.as_slice()).expect(
            "There must be a bug: either in the pre-validation of the bin \
            edges, OR that somehow mutated bin-edges after they were \
            pre-validated!",
        )
    }
}

impl PartialEq for ValidatedBinEdgeVec {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for ValidatedBinEdgeVec {}

/// Holds data that represent lag bin edges. Importantly, all variants have
/// been pre-validated.
///
/// # Note
/// It's important that this type implements the [`Eq`] trait.
#[derive(Clone, PartialEq, Eq, Debug)]
pub(crate) enum BinEdgeSpec {
    Regular(RegularBinEdges),
    Vec(ValidatedBinEdgeVec),
}

impl BinEdgeSpec {
    pub(crate) fn n_bins(&self) -> usize {
        match self {
            BinEdgeSpec::Regular(edges) => edges.n_bins(),
            BinEdgeSpec::Vec(v) => v.0.len() - 1,
        }
    }

    /// the center of each lag bin (the arithmetic mean of its edges)
    pub(crate) fn bin_centers(&self) -> Vec<f64> {
        match self {
            BinEdgeSpec::Regular(edges) => {
                let n_bins = edges.n_bins();
                let left = edges.leftmost_edge();
                let width = (edges.rightmost_edge() - left) / (n_bins as f64);
                (0..n_bins)
                    .map(|i| left + width * ((i as f64) + 0.5))
                    .collect()
            }
            BinEdgeSpec::Vec(v) => v.0.windows(2).map(|w| 0.5 * (w[0] + w[1])).collect(),
        }
    }
}

/// A configuration object for a structure function calculation.
///
/// It tracks the lag bin-edge information used in the calculation. The basic
/// premise is that this serves as the "single source of truth" for the
/// calculation properties, so that 2 accumulators can cheaply check whether
/// their statepacks are compatible before merging.
#[derive(Clone, PartialEq, Eq, Debug)]
pub(crate) struct Config {
    lag_bin_edges: BinEdgeSpec,
}

/// Constructs an [`Accumulator`] from the specified lag bin edges.
pub struct AccumulatorBuilder {
    lag_bin_edges: Option<EdgeInput>,
}

/// unvalidated bin-edge arguments (validation is deferred until `build`)
enum EdgeInput {
    Irregular(Vec<f64>),
    Regular { min: f64, max: f64, n_bins: usize },
}

impl AccumulatorBuilder {
    pub fn new() -> Self {
        Self {
            lag_bin_edges: None,
        }
    }

    /// use the specified sequence of (monotonically increasing) lag bin edges
    pub fn lag_bin_edges(mut self, edges: &[f64]) -> Self {
        self.lag_bin_edges = Some(EdgeInput::Irregular(edges.to_vec()));
        self
    }

    /// use `n_bins` uniformly spaced lag bins spanning `min` through `max`
    pub fn regular_lag_bin_edges(mut self, min: f64, max: f64, n_bins: usize) -> Self {
        self.lag_bin_edges = Some(EdgeInput::Regular { min, max, n_bins });
        self
    }

    pub fn build(self) -> Result<Accumulator, Error> {
        let Some(edge_input) = self.lag_bin_edges else {
            return Err(Error::lag_edge_presence());
        };
        let lag_bin_edges = match edge_input {
            EdgeInput::Irregular(edges) => BinEdgeSpec::Vec(ValidatedBinEdgeVec::new(edges)?),
            EdgeInput::Regular { min, max, n_bins } => BinEdgeSpec::Regular(
                RegularBinEdges::new(min, max, n_bins).map_err(Error::bin_edge)?,
            ),
        };
        Ok(Accumulator::new(Config { lag_bin_edges }))
    }
}

impl Default for AccumulatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Tracks the state of an in-progress structure function calculation.
#[derive(Debug)]
pub struct Accumulator {
    config: Config,
    reducer: Mean,
    statepack: Vec<f64>,
}

impl Accumulator {
    fn new(config: Config) -> Self {
        let reducer = Mean::new();
        let n_bins = config.lag_bin_edges.n_bins();
        let state_size = reducer.accum_state_size();
        let mut statepack = vec![0.0; state_size * n_bins];
        reset_full_statepack(
            &reducer,
            &mut StatePackViewMut::from_slice(n_bins, state_size, &mut statepack),
        );
        Self {
            config,
            reducer,
            statepack,
        }
    }

    /// the number of lag bins
    pub fn n_bins(&self) -> usize {
        self.config.lag_bin_edges.n_bins()
    }

    /// the center of each lag bin (the arithmetic mean of its edges)
    pub fn lag_bin_centers(&self) -> Vec<f64> {
        self.config.lag_bin_edges.bin_centers()
    }

    /// Fold the contributions from every unique pair of `curve` into the
    /// tracked state.
    ///
    /// When this returns an error, the tracked state is left untouched (the
    /// reduction runs against a scratch statepack that only gets merged in
    /// after the full lightcurve has been processed).
    pub fn process(&mut self, curve: &LightCurve) -> Result<(), Error> {
        let n_bins = self.n_bins();
        let state_size = self.reducer.accum_state_size();
        let mut scratch = vec![0.0; state_size * n_bins];
        let mut scratch_statepack = StatePackViewMut::from_slice(n_bins, state_size, &mut scratch);
        exec_reduction(
            &self.reducer,
            &mut scratch_statepack,
            curve,
            &self.config.lag_bin_edges,
        )?;

        let mut statepack =
            StatePackViewMut::from_slice(n_bins, state_size, &mut self.statepack);
        merge_full_statepacks(&self.reducer, &mut statepack, &scratch_statepack.as_view());
        Ok(())
    }

    /// Merge the state tracked by `other` into `self`.
    ///
    /// The accumulators must have identical configurations.
    pub fn merge(&mut self, other: &Accumulator) -> Result<(), Error> {
        if self.config != other.config {
            return Err(Error::accum_mismatch());
        }
        let n_bins = self.n_bins();
        let state_size = self.reducer.accum_state_size();
        let mut statepack = StatePackViewMut::from_slice(n_bins, state_size, &mut self.statepack);
        let other_statepack = StatePackView::from_slice(n_bins, state_size, &other.statepack);
        merge_full_statepacks(&self.reducer, &mut statepack, &other_statepack);
        Ok(())
    }

    /// Restore the tracked state to its freshly-constructed (empty) value.
    pub fn reset(&mut self) {
        let n_bins = self.n_bins();
        let state_size = self.reducer.accum_state_size();
        let mut statepack = StatePackViewMut::from_slice(n_bins, state_size, &mut self.statepack);
        reset_full_statepack(&self.reducer, &mut statepack);
    }

    /// compute the output quantities from the tracked state and return the
    /// result in a HashMap
    pub fn get_output(&self) -> HashMap<&'static str, Vec<f64>> {
        let n_bins = self.n_bins();
        let state_size = self.reducer.accum_state_size();
        let statepack = StatePackView::from_slice(n_bins, state_size, &self.statepack);
        get_output(&self.reducer, &statepack)
    }
}

/// launch the reduction for a single lightcurve
fn exec_reduction(
    reducer: &Mean,
    statepack: &mut StatePackViewMut,
    curve: &LightCurve,
    lag_bin_edges: &BinEdgeSpec,
) -> Result<(), Error> {
    // this can't be a closure if it accepts generic parameters
    fn inner<B: BinEdges>(
        reducer: &Mean,
        statepack: &mut StatePackViewMut,
        curve: &LightCurve,
        lag_bin_edges: &B,
    ) -> Result<(), Error> {
        let reduction = LagReduction::new(reducer, curve, lag_bin_edges);
        // the statepack shape is constructed to match the reduction, so the
        // only reachable failure is a lag-coverage one
        SerialExecutor
            .drive_reduce(statepack, &reduction, NonZeroUsize::MIN)
            .map_err(Error::lag_coverage)
    }

    match lag_bin_edges {
        BinEdgeSpec::Vec(v) => inner(reducer, statepack, curve, &v.as_irregular_edge_view()),
        BinEdgeSpec::Regular(edges) => inner(reducer, statepack, curve, edges),
    }
}

/// compute the output quantities from a binned statepack and return the
/// result in a HashMap.
///
/// # Notes
/// This is primarily used for testing against [`Accumulator::get_output`]
/// with hand-built statepacks.
pub fn get_output(
    reducer: &impl Reducer,
    statepack: &StatePackView,
) -> HashMap<&'static str, Vec<f64>> {
    let description = reducer.output_descr();
    let n_bins = statepack.n_states();
    let n_comps = description.n_per_accum_state();

    let mut buffer = vec![0.0; n_comps * n_bins];
    let mut buffer_view = ArrayViewMut2::from_shape([n_comps, n_bins], &mut buffer).unwrap();
    for i in 0..n_bins {
        let mut column = buffer_view.index_axis_mut(Axis(1), i);
        reducer.value_from_accum_state(&mut column, &statepack.get_state(i));
    }

    match description {
        OutputDescr::MultiScalarComp(names) => {
            let _to_vec = |row: ArrayView1<f64>| row.iter().cloned().collect();
            let row_iter = buffer_view.rows().into_iter().map(_to_vec);
            HashMap::from_iter(names.iter().cloned().zip(row_iter))
        }
        OutputDescr::SingleVecComp { name, .. } => HashMap::from([(name, buffer)]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bin_centers_are_edge_means() {
        let spec = BinEdgeSpec::Vec(ValidatedBinEdgeVec::new(vec![0.0, 1.0, 4.0]).unwrap());
        assert_eq!(spec.bin_centers(), vec![0.5, 2.5]);
    }

    #[test]
    fn regular_and_irregular_bin_centers_agree() {
        let regular = BinEdgeSpec::Regular(RegularBinEdges::new(0.0, 4.0, 4).unwrap());
        let irregular = BinEdgeSpec::Vec(
            ValidatedBinEdgeVec::new(vec![0.0, 1.0, 2.0, 3.0, 4.0]).unwrap(),
        );
        assert_eq!(regular.bin_centers(), irregular.bin_centers());
    }
}
