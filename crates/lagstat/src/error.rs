// We define separate error machinery here in the public crate and just wrap
// the stringly errors that `lagstat_nostd_internal` reports (the internal
// crate can't easily do better without `std`).
//
// The jiff crate has a whole discussion about error types. It merits further
// review!

/// The error type used throughout this crate.
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
}

/// The underlying internal error type
#[non_exhaustive]
#[derive(Clone, Debug)]
enum ErrorKind {
    /// An error that occurs when a problematic lag bin edge is specified
    BinEdge(BinEdgeError),
    /// An error that occurs when lag bin edges aren't specified at all
    LagEdgePresence(LagEdgePresenceError),
    /// An error that occurs when a retained pair lag falls outside the
    /// specified lag bin edges
    LagCoverage(LagCoverageError),
    /// An error that occurs when an observation sequence is invalid
    Observations(ObservationError),
    /// An error that occurs when the observation sequences have unequal
    /// lengths
    ShapeMismatch(ShapeMismatchError),
    /// An error that occurs when trying to merge accumulators with different
    /// configurations
    AccumMismatch(AccumMismatchError),
}

// define constructor methods for Error
impl Error {
    /// produce an error indicating that a problematic lag bin edge was
    /// specified
    pub(crate) fn bin_edge(what: &'static str) -> Self {
        Error {
            kind: ErrorKind::BinEdge(BinEdgeError(what)),
        }
    }

    /// produce an error indicating that lag bin edges weren't specified
    pub(crate) fn lag_edge_presence() -> Self {
        Error {
            kind: ErrorKind::LagEdgePresence(LagEdgePresenceError),
        }
    }

    /// produce an error indicating that a retained pair lag falls outside
    /// the specified lag bin edges
    pub(crate) fn lag_coverage(what: &'static str) -> Self {
        Error {
            kind: ErrorKind::LagCoverage(LagCoverageError(what)),
        }
    }

    /// produce an error indicating that an observation sequence is invalid
    pub(crate) fn observations(what: &'static str) -> Self {
        Error {
            kind: ErrorKind::Observations(ObservationError(what)),
        }
    }

    /// produce an error indicating that the observation sequences have
    /// unequal lengths
    pub(crate) fn shape_mismatch(n_times: usize, n_values: usize, n_errors: usize) -> Self {
        Error {
            kind: ErrorKind::ShapeMismatch(ShapeMismatchError {
                n_times,
                n_values,
                n_errors,
            }),
        }
    }

    /// produce an error indicating that 2 accumulators have different
    /// configurations
    pub(crate) fn accum_mismatch() -> Self {
        Error {
            kind: ErrorKind::AccumMismatch(AccumMismatchError),
        }
    }

    /// `true` when the error relates to the specified lag bin edges (they
    /// were malformed, missing, or failed to cover the full range of
    /// retained lags)
    pub fn is_invalid_bins(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::BinEdge(_) | ErrorKind::LagEdgePresence(_) | ErrorKind::LagCoverage(_)
        )
    }

    /// `true` when the error indicates observation sequences with unequal
    /// lengths
    pub fn is_shape_mismatch(&self) -> bool {
        matches!(self.kind, ErrorKind::ShapeMismatch(_))
    }
}

impl std::error::Error for Error {}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        self.kind.fmt(f)
    }
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match *self {
            ErrorKind::BinEdge(ref err) => err.fmt(f),
            ErrorKind::LagEdgePresence(ref err) => err.fmt(f),
            ErrorKind::LagCoverage(ref err) => err.fmt(f),
            ErrorKind::Observations(ref err) => err.fmt(f),
            ErrorKind::ShapeMismatch(ref err) => err.fmt(f),
            ErrorKind::AccumMismatch(ref err) => err.fmt(f),
        }
    }
}

/// An error that occurs when a problematic lag bin edge is specified
#[derive(Clone, Debug)]
struct BinEdgeError(&'static str);

impl core::fmt::Display for BinEdgeError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "problem with the lag bin edges: {}", self.0)
    }
}

/// An error that occurs when lag bin edges aren't specified
#[derive(Clone, Debug)]
struct LagEdgePresenceError;

impl core::fmt::Display for LagEdgePresenceError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "lag bin edges were not specified")
    }
}

/// An error that occurs when a retained pair lag falls outside the specified
/// lag bin edges
#[derive(Clone, Debug)]
struct LagCoverageError(&'static str);

impl core::fmt::Display for LagCoverageError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// An error that occurs when an observation sequence is invalid
#[derive(Clone, Debug)]
struct ObservationError(&'static str);

impl core::fmt::Display for ObservationError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// An error that occurs when the observation sequences have unequal lengths
#[derive(Clone, Debug)]
struct ShapeMismatchError {
    n_times: usize,
    n_values: usize,
    n_errors: usize,
}

impl core::fmt::Display for ShapeMismatchError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "the observation sequences have unequal lengths: {} times, {} \
             values, {} errors",
            self.n_times, self.n_values, self.n_errors
        )
    }
}

/// An error that occurs when trying to merge accumulators with different
/// configurations
#[derive(Clone, Debug)]
struct AccumMismatchError;

impl core::fmt::Display for AccumMismatchError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "the accumulators being merged have different configurations"
        )
    }
}
