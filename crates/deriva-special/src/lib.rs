//! # deriva-special
//!
//! Numeric kernels for the special functions the expression engine
//! evaluates but the standard library does not provide: the real
//! dilogarithm (Spence's function), its softplus-integral companion, and
//! the error functions.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error_func;
pub mod polylog;

pub use error_func::{erf, erfc};
pub use polylog::{dilog, softpp};
