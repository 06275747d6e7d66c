//! Error types.

use thiserror::Error;

/// Errors reported by the expression engine.
///
/// Mathematical domain errors are not errors at this level: evaluation
/// returns NaN or an infinity and propagates it. The only recoverable
/// failure is writing a non-finite number into a variable.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum Error {
    /// Variables hold finite values only; assignments of NaN or infinity
    /// are rejected and leave the variable untouched.
    #[error("cannot assign non-finite value {value} to variable {name}")]
    NonFiniteAssignment {
        /// Display name of the rejected variable.
        name: String,
        /// The offending value.
        value: f64,
    },
}
