//! Defines the high-level convenience function for the common case: computing
//! the structure function of a single lightcurve in one shot.
//!
//! Workflows that spread the work over multiple calls (or multiple processes)
//! should use [`crate::Accumulator`] directly and merge the partial results.

use crate::accumulator::AccumulatorBuilder;
use crate::error::Error;
use lagstat_nostd_internal::LightCurve;

/// Compute the noise-corrected squared structure function of a lightcurve.
///
/// Every unique pair of observations with a nonzero time separation
/// contributes `(values[j] - values[i])² - (errors[i]² + errors[j]²)` to the
/// lag bin containing `|times[j] - times[i]|`. The result holds the per-bin
/// mean of those contributions alongside the center of each lag bin (the
/// arithmetic mean of its edges). Bins that receive no pairs report `NaN`.
///
/// The lag bins are contiguous: `bin_edges` must increase strictly, each bin
/// spans `[left, right)`, and the final bin also includes its right edge. A
/// retained pair whose lag falls outside the edges is an error rather than
/// being silently dropped.
pub fn sf2(
    times: &[f64],
    values: &[f64],
    errors: &[f64],
    bin_edges: &[f64],
) -> Result<(Vec<f64>, Vec<f64>), Error> {
    if (times.len() != values.len()) || (times.len() != errors.len()) {
        return Err(Error::shape_mismatch(
            times.len(),
            values.len(),
            errors.len(),
        ));
    }
    let curve = LightCurve::new(times, values, errors).map_err(Error::observations)?;
    let mut accum = AccumulatorBuilder::new().lag_bin_edges(bin_edges).build()?;
    accum.process(&curve)?;
    let mut output = accum.get_output();
    let sf_means = output
        .remove("mean")
        .expect("There must be a bug: the Mean reducer always reports a \"mean\" component");
    Ok((sf_means, accum.lag_bin_centers()))
}
