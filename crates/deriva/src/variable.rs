//! First-class variable identities.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use deriva_core::{Attribute, Context, Error, VarId};

use crate::expression::Expression;

/// A mutable real variable with identity semantics.
///
/// Cloning shares identity: the clone refers to the same storage, both
/// observe assignments, and both denote the same symbolic variable inside
/// expressions. A variable lives as long as its scope.
#[derive(Clone)]
pub struct Variable {
    pub(crate) ctx: Rc<RefCell<Context>>,
    pub(crate) id: VarId,
}

impl Variable {
    /// Assigns a new value and invalidates every cached evaluation.
    ///
    /// # Errors
    ///
    /// Rejects non-finite values, leaving the variable untouched.
    pub fn set(&self, value: f64) -> Result<(), Error> {
        self.ctx.borrow_mut().set_value(self.id, value)
    }

    /// Reads the current value.
    #[must_use]
    pub fn get(&self) -> f64 {
        self.ctx.borrow().value_of(self.id)
    }

    /// The display name.
    #[must_use]
    pub fn name(&self) -> String {
        self.ctx.borrow().var_name(self.id)
    }

    /// Renames the variable.
    pub fn set_name(&self, name: &str) {
        self.ctx.borrow_mut().set_var_name(self.id, name);
    }

    /// Declares that `attr` holds for every value this variable will take.
    ///
    /// Assumptions drive the conditionally-valid rewrites (for example,
    /// `sin(asin(x))` collapses to `x` only when `x` is known to lie in
    /// `[-1, 1]`). Declare them before building expressions over the
    /// variable.
    pub fn assume(&self, attr: Attribute) {
        self.ctx.borrow_mut().assume(self.id, attr);
    }

    /// This variable as an expression.
    #[must_use]
    pub fn expr(&self) -> Expression {
        let handle = self.ctx.borrow_mut().variable(self.id);
        Expression {
            ctx: Rc::clone(&self.ctx),
            handle,
        }
    }

    /// True if `other` denotes the same variable.
    #[must_use]
    pub fn same_identity(&self, other: &Variable) -> bool {
        Rc::ptr_eq(&self.ctx, &other.ctx) && self.id == other.id
    }
}

impl From<&Variable> for Expression {
    fn from(v: &Variable) -> Expression {
        v.expr()
    }
}

impl fmt::Debug for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Variable({} = {})", self.name(), self.get())
    }
}
