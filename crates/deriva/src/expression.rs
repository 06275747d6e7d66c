//! User-facing expression values with operator overloading.

use std::cell::RefCell;
use std::fmt;
use std::ops;
use std::rc::Rc;

use deriva_core::{Attribute, Context, Error, ExprHandle, UnaryOp, VarId};

use crate::variable::Variable;

/// A handle to an immutable symbolic expression.
///
/// Cloning is O(1); two expressions compare equal exactly when they are the
/// same node of the same scope, which hash-consing makes equivalent to
/// structural identity.
#[derive(Clone)]
pub struct Expression {
    pub(crate) ctx: Rc<RefCell<Context>>,
    pub(crate) handle: ExprHandle,
}

impl Expression {
    fn wrap(&self, handle: ExprHandle) -> Expression {
        Expression {
            ctx: Rc::clone(&self.ctx),
            handle,
        }
    }

    fn unary(&self, op: UnaryOp) -> Expression {
        let handle = self.ctx.borrow_mut().apply(op, self.handle);
        self.wrap(handle)
    }

    fn combine(
        &self,
        rhs: &Expression,
        f: fn(&mut Context, ExprHandle, ExprHandle) -> ExprHandle,
    ) -> Expression {
        assert!(
            Rc::ptr_eq(&self.ctx, &rhs.ctx),
            "expressions belong to different scopes"
        );
        let handle = f(&mut self.ctx.borrow_mut(), self.handle, rhs.handle);
        self.wrap(handle)
    }

    /// Raises this expression to `exp`.
    #[must_use]
    pub fn pow(&self, exp: impl Operand) -> Expression {
        let exp = exp.resolve(&self.ctx);
        self.combine(&exp, Context::pow)
    }

    /// Symbolic derivative with respect to `v`.
    ///
    /// The first call computes and caches; later calls return the cached
    /// node. Use [`Expression::purge`] to bound the cache between training
    /// steps.
    #[must_use]
    pub fn derive(&self, v: &Variable) -> Expression {
        assert!(
            Rc::ptr_eq(&self.ctx, &v.ctx),
            "variable belongs to a different scope"
        );
        let handle = self.ctx.borrow_mut().derive(self.handle, v.id);
        self.wrap(handle)
    }

    /// Evaluates under the current variable values.
    ///
    /// Memoized per node; between two variable writes, repeated evaluation
    /// is one cache probe per node.
    #[must_use]
    pub fn evaluate(&self) -> f64 {
        self.ctx.borrow_mut().evaluate(self.handle)
    }

    /// True if `attr` provably holds for every assignment of the free
    /// variables; `false` means unknown.
    #[must_use]
    pub fn guaranteed(&self, attr: Attribute) -> bool {
        self.ctx.borrow().guaranteed(self.handle, attr)
    }

    /// Node depth: 0 for leaves, 1 + max child depth otherwise.
    #[must_use]
    pub fn depth(&self) -> u32 {
        self.ctx.borrow().depth(self.handle)
    }

    /// Releases cached derivatives of this expression and its
    /// subexpressions. A hint only; recomputed derivatives are
    /// structurally identical.
    pub fn purge(&self) {
        self.ctx.borrow_mut().purge(self.handle);
    }

    /// Replaces `v` by a concrete number, simplifying throughout.
    #[must_use]
    pub fn bind(&self, v: &Variable, value: f64) -> Expression {
        assert!(
            Rc::ptr_eq(&self.ctx, &v.ctx),
            "variable belongs to a different scope"
        );
        let handle = self.ctx.borrow_mut().bind_value(self.handle, v.id, value);
        self.wrap(handle)
    }

    /// Replaces every listed variable by its paired expression, all at
    /// once; occurrences inside the replacement expressions are not
    /// themselves rewritten.
    #[must_use]
    pub fn atomic_bind(&self, bindings: &[(Variable, Expression)]) -> Expression {
        let subs = resolve_bindings(&self.ctx, bindings);
        let handle = self.ctx.borrow_mut().bind(self.handle, &subs);
        self.wrap(handle)
    }
}

/// Evaluates every right-hand side under the current values, then writes
/// all results back to the paired variables.
///
/// This is the primitive behind simultaneous gradient updates: with
/// `u = 1, v = 2`, assigning `[(u, v), (v, u)]` leaves `u = 2, v = 1`,
/// where sequential assignment would leave both at 2.
///
/// # Errors
///
/// If any right-hand side evaluates non-finite, nothing is written.
pub fn atomic_assign(bindings: &[(Variable, Expression)]) -> Result<(), Error> {
    let Some((first, _)) = bindings.first() else {
        return Ok(());
    };
    let ctx = Rc::clone(&first.ctx);
    let subs = resolve_bindings(&ctx, bindings);
    let result = ctx.borrow_mut().atomic_assign(&subs);
    result
}

fn resolve_bindings(
    ctx: &Rc<RefCell<Context>>,
    bindings: &[(Variable, Expression)],
) -> Vec<(VarId, ExprHandle)> {
    bindings
        .iter()
        .map(|(v, e)| {
            assert!(
                Rc::ptr_eq(ctx, &v.ctx) && Rc::ptr_eq(ctx, &e.ctx),
                "bindings belong to different scopes"
            );
            (v.id, e.handle)
        })
        .collect()
}

macro_rules! elementary_functions {
    ($($(#[$doc:meta])* $name:ident => $op:ident,)*) => {
        impl Expression {
            $(
                $(#[$doc])*
                #[must_use]
                pub fn $name(&self) -> Expression {
                    self.unary(UnaryOp::$op)
                }
            )*
        }
    };
}

elementary_functions! {
    /// Absolute value.
    abs => Abs,
    /// Sign (-1, 0 or 1).
    sign => Sgn,
    /// Square root.
    sqrt => Sqrt,
    /// Cube root.
    cbrt => Cbrt,
    /// Natural exponential.
    exp => Exp,
    /// `exp(x) - 1`, numerically stable near zero.
    exp_m1 => ExpM1,
    /// Natural logarithm.
    ln => Log,
    /// `log(1 + x)`, numerically stable near zero.
    ln_1p => Log1P,
    /// Sine.
    sin => Sin,
    /// Cosine.
    cos => Cos,
    /// Tangent.
    tan => Tan,
    /// Secant.
    sec => Sec,
    /// Inverse sine.
    asin => Asin,
    /// Inverse cosine.
    acos => Acos,
    /// Inverse tangent.
    atan => Atan,
    /// Hyperbolic sine.
    sinh => Sinh,
    /// Hyperbolic cosine.
    cosh => Cosh,
    /// Hyperbolic tangent.
    tanh => Tanh,
    /// Hyperbolic secant.
    sech => Sech,
    /// Inverse hyperbolic sine.
    asinh => Asinh,
    /// Inverse hyperbolic cosine.
    acosh => Acosh,
    /// Inverse hyperbolic tangent.
    atanh => Atanh,
    /// Gauss error function.
    erf => Erf,
    /// Complementary error function.
    erfc => Erfc,
    /// Dilogarithm `Li2(x)`.
    li2 => Spence,
    /// Softplus integral, `-Li2(-exp x)`.
    softpp => SoftPP,
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ctx = self.ctx.borrow();
        write!(f, "{}", ctx.display(self.handle))
    }
}

impl fmt::Debug for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Expression({self})")
    }
}

impl PartialEq for Expression {
    /// Structural identity: same node of the same scope.
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.ctx, &other.ctx) && self.handle == other.handle
    }
}

/// Types usable as the second operand of an expression operation:
/// expressions, variables, and plain numbers.
pub trait Operand {
    /// Produces an expression in the given scope.
    fn resolve(self, ctx: &Rc<RefCell<Context>>) -> Expression;
}

impl Operand for Expression {
    fn resolve(self, _ctx: &Rc<RefCell<Context>>) -> Expression {
        self
    }
}

impl Operand for &Expression {
    fn resolve(self, _ctx: &Rc<RefCell<Context>>) -> Expression {
        self.clone()
    }
}

impl Operand for Variable {
    fn resolve(self, _ctx: &Rc<RefCell<Context>>) -> Expression {
        self.expr()
    }
}

impl Operand for &Variable {
    fn resolve(self, _ctx: &Rc<RefCell<Context>>) -> Expression {
        self.expr()
    }
}

impl Operand for f64 {
    fn resolve(self, ctx: &Rc<RefCell<Context>>) -> Expression {
        let handle = ctx.borrow_mut().constant(self);
        Expression {
            ctx: Rc::clone(ctx),
            handle,
        }
    }
}

impl Operand for i32 {
    fn resolve(self, ctx: &Rc<RefCell<Context>>) -> Expression {
        f64::from(self).resolve(ctx)
    }
}

macro_rules! impl_binary_op {
    ($Trait:ident, $method:ident, $ctxfn:ident) => {
        impl<R: Operand> ops::$Trait<R> for &Expression {
            type Output = Expression;
            fn $method(self, rhs: R) -> Expression {
                let rhs = rhs.resolve(&self.ctx);
                self.combine(&rhs, Context::$ctxfn)
            }
        }

        impl<R: Operand> ops::$Trait<R> for Expression {
            type Output = Expression;
            fn $method(self, rhs: R) -> Expression {
                ops::$Trait::$method(&self, rhs)
            }
        }

        impl<R: Operand> ops::$Trait<R> for &Variable {
            type Output = Expression;
            fn $method(self, rhs: R) -> Expression {
                ops::$Trait::$method(self.expr(), rhs)
            }
        }

        impl<R: Operand> ops::$Trait<R> for Variable {
            type Output = Expression;
            fn $method(self, rhs: R) -> Expression {
                ops::$Trait::$method(self.expr(), rhs)
            }
        }

        impl_binary_op!(@num f64, $Trait, $method);
        impl_binary_op!(@num i32, $Trait, $method);
    };

    (@num $num:ty, $Trait:ident, $method:ident) => {
        impl ops::$Trait<Expression> for $num {
            type Output = Expression;
            fn $method(self, rhs: Expression) -> Expression {
                let lhs = Operand::resolve(self, &rhs.ctx);
                ops::$Trait::$method(lhs, rhs)
            }
        }

        impl ops::$Trait<&Expression> for $num {
            type Output = Expression;
            fn $method(self, rhs: &Expression) -> Expression {
                let lhs = Operand::resolve(self, &rhs.ctx);
                ops::$Trait::$method(lhs, rhs)
            }
        }

        impl ops::$Trait<Variable> for $num {
            type Output = Expression;
            fn $method(self, rhs: Variable) -> Expression {
                ops::$Trait::$method(self, rhs.expr())
            }
        }

        impl ops::$Trait<&Variable> for $num {
            type Output = Expression;
            fn $method(self, rhs: &Variable) -> Expression {
                ops::$Trait::$method(self, rhs.expr())
            }
        }
    };
}

impl_binary_op!(Add, add, add);
impl_binary_op!(Sub, sub, sub);
impl_binary_op!(Mul, mul, mul);
impl_binary_op!(Div, div, div);

impl ops::Neg for &Expression {
    type Output = Expression;
    fn neg(self) -> Expression {
        self.unary(UnaryOp::Negate)
    }
}

impl ops::Neg for Expression {
    type Output = Expression;
    fn neg(self) -> Expression {
        -&self
    }
}

impl ops::Neg for &Variable {
    type Output = Expression;
    fn neg(self) -> Expression {
        -self.expr()
    }
}

impl ops::Neg for Variable {
    type Output = Expression;
    fn neg(self) -> Expression {
        -self.expr()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use crate::prelude::*;

    #[test]
    fn test_quadratic_scenario() {
        let scope = Scope::new();
        let a = scope.var("a");
        let b = scope.var("b");
        let c = scope.var("c");
        let x = scope.var("x");

        let quadratic = &a * &x * &x + &b * &x + &c;

        a.set(1.0).unwrap();
        b.set(-5.0).unwrap();
        c.set(4.0).unwrap();
        x.set(3.0).unwrap();

        assert_eq!(quadratic.evaluate(), -2.0);
        assert_eq!(quadratic.derive(&x).evaluate(), 1.0);
        assert_eq!(quadratic.derive(&a).evaluate(), 9.0);
        assert_eq!(quadratic.derive(&b).evaluate(), 3.0);
        assert_eq!(quadratic.derive(&c).evaluate(), 1.0);
    }

    #[test]
    fn test_second_derivative_with_unit_leading_coefficient() {
        let scope = Scope::new();
        let b = scope.var("b");
        let c = scope.var("c");
        let x = scope.var("x");

        let quadratic = &x * &x + &b * &x + &c;
        let second = quadratic.derive(&x).derive(&x);
        assert_eq!(second, scope.constant(2.0));
    }

    #[test]
    fn test_chain_rule_scenario() {
        let scope = Scope::new();
        let x = scope.variable("x", 0.5);
        let e = x.expr().exp().sin();
        let d = e.derive(&x);
        let expected = 0.5_f64.exp().cos() * 0.5_f64.exp();
        assert_relative_eq!(d.evaluate(), expected, max_relative = 1e-12);
    }

    #[test]
    fn test_inverse_collapse_scenario() {
        let scope = Scope::new();
        let x = scope.var("x");
        x.assume(Attribute::UnitRange);
        let roundtrip = x.expr().asin().sin();
        assert_eq!(roundtrip, x.expr());

        // without the domain assumption the chain survives
        let y = scope.var("y");
        let kept = y.expr().asin().sin();
        assert_ne!(kept, y.expr());
    }

    #[test]
    fn test_pruning_via_zero_scenario() {
        let scope = Scope::new();
        let x = scope.var("x");
        let v = scope.var("v");
        let y = &v * x.expr().ln();
        // x = 0, v = 0: log(0) would be -inf, but the zero factor prunes it
        assert_eq!(y.evaluate(), 0.0);

        v.set(1.0).unwrap();
        x.set(1.0).unwrap();
        assert_eq!(y.evaluate(), 0.0);
        x.set(std::f64::consts::E).unwrap();
        assert_relative_eq!(y.evaluate(), 1.0);
    }

    #[test]
    fn test_atomic_update_scenario() {
        let scope = Scope::new();
        let u = scope.variable("u", 1.0);
        let v = scope.variable("v", 2.0);

        atomic_assign(&[(u.clone(), v.expr()), (v.clone(), u.expr())]).unwrap();
        assert_eq!(u.get(), 2.0);
        assert_eq!(v.get(), 1.0);
    }

    #[test]
    fn test_mixed_numeric_operands() {
        let scope = Scope::new();
        let x = scope.variable("x", 3.0);
        let e = 2.0 * &x + 1.0;
        assert_eq!(e.evaluate(), 7.0);
        let f = 1 - &x / 3.0;
        assert_eq!(f.evaluate(), 0.0);
        let g = x.expr().pow(2) - 9.0;
        assert_eq!(g.evaluate(), 0.0);
    }

    #[test]
    fn test_division_by_constant_and_expression() {
        let scope = Scope::new();
        let x = scope.variable("x", 8.0);
        let half = &x / 2.0;
        assert_eq!(half.evaluate(), 4.0);
        let ratio = 16.0 / &x;
        assert_eq!(ratio.evaluate(), 2.0);
    }

    #[test]
    fn test_derivative_of_newton_step() {
        let scope = Scope::new();
        let a = scope.variable("a", 1.0);
        let b = scope.variable("b", -5.0);
        let c = scope.variable("c", 4.0);
        let x = scope.variable("x", 5.0);

        let f = &a * &x * &x + &b * &x + &c;
        let fp = f.derive(&x);
        let newton = &x - &f / &fp;
        // at x=5: f=4, f'=5, g(x) = 5 - 4/5
        assert_relative_eq!(newton.evaluate(), 4.2, max_relative = 1e-12);

        // the step is itself differentiable
        let g = newton.derive(&x);
        assert!(g.evaluate().is_finite());
    }

    #[test]
    fn test_depth_reporting() {
        let scope = Scope::new();
        let x = scope.var("x");
        assert_eq!(x.expr().depth(), 0);
        assert_eq!(x.expr().sin().depth(), 1);
        assert_eq!((x.expr().sin() + 1.0).depth(), 2);
    }

    #[test]
    fn test_display_round_trip_of_training_expression() {
        let scope = Scope::new();
        let x = scope.var("x");
        let w = scope.var("w");
        let net = (&w * &x).tanh();
        assert_eq!(net.to_string(), "tanh(w*x)");
    }

    #[test]
    #[should_panic(expected = "different scopes")]
    fn test_cross_scope_mixing_panics() {
        let s1 = Scope::new();
        let s2 = Scope::new();
        let x = s1.var("x");
        let y = s2.var("y");
        let _ = &x + &y;
    }

    #[test]
    fn test_structural_sharing_of_clones() {
        let scope = Scope::new();
        let x = scope.var("x");
        let e1 = x.expr().sin() + x.expr().cos();
        let e2 = x.expr().sin() + x.expr().cos();
        assert_eq!(e1, e2);
    }
}
