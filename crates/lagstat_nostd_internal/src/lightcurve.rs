//! Defines the [`LightCurve`] type, the basic observational input of this
//! crate.

/// An irregularly sampled time series of measurements with known
/// measurement uncertainties.
///
/// We place the following constraints on the contained slices:
/// - `times`, `values`, and `errors` must all have the same length and must
///   hold at least 2 entries.
/// - every entry must be finite. The sign of an entry in `errors` carries no
///   meaning (uncertainties only ever enter the calculation squared).
pub struct LightCurve<'a> {
    times: &'a [f64],
    values: &'a [f64],
    errors: &'a [f64],
}

impl<'a> LightCurve<'a> {
    /// create a new instance
    pub fn new(
        times: &'a [f64],
        values: &'a [f64],
        errors: &'a [f64],
    ) -> Result<LightCurve<'a>, &'static str> {
        if times.len() < 2 {
            Err("a lightcurve requires at least two observations")
        } else if values.len() != times.len() {
            Err("values must have the same number of entries as times")
        } else if errors.len() != times.len() {
            Err("errors must have the same number of entries as times")
        } else if times.iter().any(|&x| !x.is_finite()) {
            Err("times must be finite")
        } else if values.iter().any(|&x| !x.is_finite()) {
            Err("values must be finite")
        } else if errors.iter().any(|&x| !x.is_finite()) {
            Err("errors must be finite")
        } else {
            Ok(Self {
                times,
                values,
                errors,
            })
        }
    }

    #[inline]
    pub fn n_observations(&self) -> usize {
        self.times.len()
    }

    #[inline]
    pub fn times(&self) -> &[f64] {
        self.times
    }

    #[inline]
    pub fn values(&self) -> &[f64] {
        self.values
    }

    #[inline]
    pub fn errors(&self) -> &[f64] {
        self.errors
    }
}
