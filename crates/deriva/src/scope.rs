//! Shared ownership of a core context.

use std::cell::RefCell;
use std::rc::Rc;

use deriva_core::Context;

use crate::expression::Expression;
use crate::variable::Variable;

/// Owner of one family of variables and expressions.
///
/// Everything created from a scope shares the same interning tables,
/// derivative cache and dirty counter. The engine is single-threaded;
/// `Scope` is deliberately neither `Send` nor `Sync`, and mixing values
/// from different scopes in one operation panics.
#[derive(Clone)]
pub struct Scope {
    pub(crate) ctx: Rc<RefCell<Context>>,
}

impl Scope {
    /// Creates a scope with the default rebalancing depth limit.
    #[must_use]
    pub fn new() -> Self {
        Self {
            ctx: Rc::new(RefCell::new(Context::new())),
        }
    }

    /// Creates a scope whose rebalancing rewrites trigger past `limit`.
    #[must_use]
    pub fn with_depth_limit(limit: u32) -> Self {
        Self {
            ctx: Rc::new(RefCell::new(Context::with_depth_limit(limit))),
        }
    }

    /// Creates a named variable with initial value 0.
    #[must_use]
    pub fn var(&self, name: &str) -> Variable {
        self.variable(name, 0.0)
    }

    /// Creates a named variable with the given initial value.
    ///
    /// # Panics
    ///
    /// Panics if `initial` is not finite.
    #[must_use]
    pub fn variable(&self, name: &str, initial: f64) -> Variable {
        let id = {
            let mut ctx = self.ctx.borrow_mut();
            let id = ctx.new_variable(initial);
            ctx.set_var_name(id, name);
            id
        };
        Variable {
            ctx: Rc::clone(&self.ctx),
            id,
        }
    }

    /// Wraps a number as a constant expression.
    ///
    /// Non-finite input yields the NaN sentinel, which absorbs every
    /// operation.
    #[must_use]
    pub fn constant(&self, value: f64) -> Expression {
        let handle = self.ctx.borrow_mut().constant(value);
        Expression {
            ctx: Rc::clone(&self.ctx),
            handle,
        }
    }

    /// Bumps the global dirty level, invalidating every cached value.
    pub fn touch(&self) {
        self.ctx.borrow_mut().touch();
    }
}

impl Default for Scope {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_clone_shares_state() {
        let scope = Scope::new();
        let twin = scope.clone();
        let x = scope.var("x");
        x.set(5.0).unwrap();
        let e = twin.constant(1.0) + &x;
        assert_eq!(e.evaluate(), 6.0);
    }

    #[test]
    fn test_constant_expression() {
        let scope = Scope::new();
        let c = scope.constant(2.5);
        assert_eq!(c.evaluate(), 2.5);
        assert!(scope.constant(f64::NAN).evaluate().is_nan());
    }
}
