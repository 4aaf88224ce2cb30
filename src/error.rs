use crate::filter::InvalidFilter;
use crate::registry::UnknownSymbol;
use thiserror::Error;

/// The one error type the crate's public surface returns.
///
/// Each module keeps its own error and converts into this through the usual
/// `?` chain, so callers match on [`ErrorKind`] when they care which boundary
/// rejected the input and just print it when they don't.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    kind: ErrorKind,
}

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error(transparent)]
    UnknownSymbol(#[from] UnknownSymbol),
    #[error(transparent)]
    InvalidFilter(#[from] InvalidFilter),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl From<UnknownSymbol> for Error {
    fn from(error: UnknownSymbol) -> Error {
        Error { kind: error.into() }
    }
}

impl From<InvalidFilter> for Error {
    fn from(error: InvalidFilter) -> Error {
        Error { kind: error.into() }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Error {
        Error { kind: error.into() }
    }
}
