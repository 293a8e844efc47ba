//! Error types for cost accounting.

/// Errors that can occur while tracking or projecting voice session costs.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CostError {
    /// A live cost reading was requested while no session is running.
    #[error("no active session")]
    NoActiveSession,

    /// The baseline monthly cost is zero, so a savings percentage has no meaning.
    #[error("division by zero: baseline monthly cost is zero")]
    DivisionByZero,

    /// An input was rejected before any computation took place.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
