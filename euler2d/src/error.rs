use lib_config::ConfigError;
use lib_euler2d::RiemannError;




/**
 * Errors raised by the solver. Everything except `Io` and `Hdf5` is a
 * configuration error, reported before the first step is taken.
 */
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Riemann(#[from] RiemannError),

    #[error("invalid parameter '{key}': {why}")]
    InvalidParameter { key: String, why: String },

    #[error("unknown boundary condition '{0}' (expected 'outflow', 'reflective', or 'periodic')")]
    UnknownBoundary(String),

    #[error("unknown problem '{0}'")]
    UnknownProblem(String),

    #[error("{what} has shape {actual:?}, expected {expected:?}")]
    ShapeMismatch { what: String, expected: Vec<usize>, actual: Vec<usize> },

    #[error("a diagnostic named '{0}' is already registered")]
    DuplicateDiagnostic(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "hdf5")]
    #[error("hdf5 error: {0}")]
    Hdf5(#[from] hdf5::Error),
}

impl Error {
    pub fn invalid(key: &str, why: impl Into<String>) -> Self {
        Error::InvalidParameter{key: key.into(), why: why.into()}
    }

    pub fn shape_mismatch(what: &str, expected: &[usize], actual: &[usize]) -> Self {
        Error::ShapeMismatch{what: what.into(), expected: expected.to_vec(), actual: actual.to_vec()}
    }
}
