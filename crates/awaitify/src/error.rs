use aw_parser::ParseError;
use aw_transform::PatternError;
use thiserror::Error;

/// Errors produced by an awaitify transformation.
///
/// No partial output is ever returned alongside an error.
#[derive(Debug, Error)]
pub enum AwaitifyError {
    /// The function path list was not a sequence of strings.
    #[error(transparent)]
    InvalidArgument(#[from] PatternError),

    /// The input is not a syntactically valid program.
    #[error("could not parse code: {0}")]
    Parse(#[from] ParseError),

    /// The pipeline broke one of its own invariants.
    #[error("internal error: {0}")]
    Internal(String),
}
