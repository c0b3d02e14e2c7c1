use thiserror::Error;

/// Violations of the host page contract, or a browser without WebGPU.
///
/// Any of these stops the effect from starting; the page itself is unaffected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SetupError {
    #[error("no window")]
    NoWindow,
    #[error("no document")]
    NoDocument,
    #[error("missing #{0}")]
    MissingCanvas(String),
    #[error("#{0} is not a canvas element")]
    NotACanvas(String),
    #[error("no WebGPU adapter")]
    NoAdapter,
}
