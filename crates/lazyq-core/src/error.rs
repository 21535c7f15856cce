use thiserror::Error;

/// Canonical result for core.
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed foreign error carried by [`Error::Upstream`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum Error {
    /// A required argument was absent when composing an operator.
    #[error("missing required argument: {argument}")]
    NullSource { argument: String },

    #[error("operation cancelled")]
    Cancelled,

    // Ordering operators never wrap upstream errors; this variant exists for
    // sources that surface foreign failures through lazyq's own error type.
    #[error("upstream failure: {0}")]
    Upstream(BoxError),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    pub fn null_source(argument: impl Into<String>) -> Self {
        Error::NullSource {
            argument: argument.into(),
        }
    }

    pub fn upstream(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Error::Upstream(Box::new(err))
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled)
    }
}

/// Outcome of observing a [`CancelSignal`](crate::CancelSignal).
///
/// Operators generic over an upstream error `E` require `E: From<Cancelled>`
/// so cancellation is reported in the caller's own error type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("operation cancelled")]
pub struct Cancelled;

impl From<Cancelled> for Error {
    fn from(_: Cancelled) -> Self {
        Error::Cancelled
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Config(e.to_string())
    }
}
