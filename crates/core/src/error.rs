/// Errors raised by the geofilters operations.
///
/// Parameter problems are reported before any work starts. Numeric
/// degeneracies are reported when they are met. In both cases the
/// operation stops without producing partial output.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GeometryError {
    /// Malformed configuration or input buffers.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    /// The input is numerically degenerate for the requested computation.
    #[error("computation error: {0}")]
    Computation(String),
    /// The caller asked the operation to stop.
    #[error("operation cancelled")]
    Cancelled,
}

impl GeometryError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    pub fn computation(msg: impl Into<String>) -> Self {
        Self::Computation(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, GeometryError>;
