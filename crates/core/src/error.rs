/// Result alias that carries the custom [`UnitCircleError`] type.
pub type Result<T> = std::result::Result<T, UnitCircleError>;

/// Common error type for the core crate.
///
/// Geometry and rendering never fail; errors only come from the edges of the
/// system (reading configuration and scripts, writing rendered surfaces).
#[derive(Debug, thiserror::Error)]
pub enum UnitCircleError {
    /// Free-form message, used for malformed interactive input.
    #[error("{0}")]
    Message(String),
    /// A configuration value is outside the accepted range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// Wrapper around standard IO errors.
    #[error("{0}")]
    Io(#[from] std::io::Error),
    /// Configuration or script JSON failed to parse.
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    /// The drawing backend rejected a command.
    #[error("drawing failed: {0}")]
    Drawing(String),
}

impl UnitCircleError {
    /// Creates a new error that simply wraps the provided message.
    pub fn msg<T: Into<String>>(msg: T) -> Self {
        Self::Message(msg.into())
    }
}
