//! # deriva
//!
//! Symbolic expressions over named real variables: build a function at
//! runtime, differentiate it exactly, and evaluate it many times under
//! changing bindings.
//!
//! ## Quick start
//!
//! ```
//! use deriva::prelude::*;
//!
//! let scope = Scope::new();
//! let x = scope.var("x");
//! let quadratic = &x * &x + 2.0 * &x + 1.0;
//!
//! x.set(3.0).unwrap();
//! assert_eq!(quadratic.evaluate(), 16.0);
//!
//! let slope = quadratic.derive(&x); // 2x + 2
//! assert_eq!(slope.evaluate(), 8.0);
//! ```
//!
//! Expressions are hash-consed and simplified as they are built, so
//! equivalent forms share one node; derivatives are cached; evaluation is
//! memoized per node and invalidated in O(1) when any variable changes.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub use deriva_core as core;
pub use deriva_special as special;

mod expression;
mod scope;
mod variable;

pub use deriva_core::{Attribute, Error};
pub use expression::{atomic_assign, Expression, Operand};
pub use scope::Scope;
pub use variable::Variable;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{atomic_assign, Attribute, Error, Expression, Scope, Variable};
}
