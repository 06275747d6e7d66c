//! Symbolic differentiation.
//!
//! Derivatives are built exclusively through the smart constructors, so
//! the simplification rewrites cascade through every rule. Results are
//! cached per (node, variable) pair; `purge` releases the cache for a
//! subgraph once a training step has consumed it.

use hashbrown::HashSet;

use crate::context::Context;
use crate::handle::ExprHandle;
use crate::node::{Node, UnaryOp, VarId};

use UnaryOp as U;

impl Context {
    /// Returns the symbolic derivative of `e` with respect to `var`.
    ///
    /// The first call computes and caches; later calls return the cached
    /// handle, which hash-consing guarantees is the canonical node.
    pub fn derive(&mut self, e: ExprHandle, var: VarId) -> ExprHandle {
        if let Some(&d) = self.deriv_cache.get(&(e, var)) {
            return d;
        }
        let node = *self.node(e);
        let d = match node {
            Node::Nan => self.nan(),
            Node::Constant(_) => self.constant(0.0),
            Node::Variable(id) => {
                if id == var {
                    self.constant(1.0)
                } else {
                    self.constant(0.0)
                }
            }
            Node::Unary(op, x) => self.derive_unary(op, x, e, var),
            Node::Add(f, g) => {
                // D(f+g) = D(f) + D(g)
                let df = self.derive(f, var);
                let dg = self.derive(g, var);
                self.add(df, dg)
            }
            Node::Mul(f, g) => {
                // D(f*g) = f*D(g) + g*D(f)
                let df = self.derive(f, var);
                let dg = self.derive(g, var);
                let t1 = self.mul(f, dg);
                let t2 = self.mul(g, df);
                self.add(t1, t2)
            }
            Node::Pow { base, exp } => {
                // D(f^g) = D(f) * g*f^(g-1) + D(g) * f^g*log(f)
                let df = self.derive(base, var);
                let dg = self.derive(exp, var);
                let neg1 = self.constant(-1.0);
                let gm1 = self.add(exp, neg1);
                let fgm1 = self.pow(base, gm1);
                let lhs_factor = self.mul(exp, fgm1);
                let lnf = self.ln(base);
                let rhs_factor = self.mul(e, lnf);
                let lhs = self.mul(df, lhs_factor);
                let rhs = self.mul(dg, rhs_factor);
                self.add(lhs, rhs)
            }
        };
        self.deriv_cache.insert((e, var), d);
        d
    }

    /// Chain rule: D(op(x)) = D(x) * factor, where `e` is the `op(x)` node.
    fn derive_unary(&mut self, op: UnaryOp, x: ExprHandle, e: ExprHandle, var: VarId) -> ExprHandle {
        // sgn is flat wherever it is defined
        if op == U::Sgn {
            return self.constant(0.0);
        }
        let dx = self.derive(x, var);
        if op == U::Negate {
            // D(-x) = -D(x)
            return self.negate(dx);
        }
        let factor = match op {
            U::Abs => self.sgn(x),
            U::Sqrt => {
                // 1/2 * 1/sqrt(x)
                let i = self.invert(e);
                let half = self.constant(0.5);
                self.mul(i, half)
            }
            U::Cbrt => {
                // 1/3 * 1/cbrt(x)^2
                let sq = self.square(e);
                let i = self.invert(sq);
                let third = self.constant(1.0 / 3.0);
                self.mul(i, third)
            }
            U::Exp => e,
            U::ExpM1 => self.exp(x),
            U::Log => self.invert(x),
            U::Log1P => {
                let one = self.constant(1.0);
                let xp1 = self.add(x, one);
                self.invert(xp1)
            }
            U::Sin => self.cos(x),
            U::Cos => {
                let s = self.sin(x);
                self.negate(s)
            }
            U::Tan => {
                let s = self.sec(x);
                self.square(s)
            }
            U::Sec => {
                let t = self.tan(x);
                self.mul(t, e)
            }
            U::Asin => {
                let z = self.zconic(x);
                self.invert(z)
            }
            U::Acos => {
                let z = self.zconic(x);
                let i = self.invert(z);
                self.negate(i)
            }
            U::Atan => {
                let y = self.yconic(x);
                let sq = self.square(y);
                self.invert(sq)
            }
            U::Sinh => self.cosh(x),
            U::Cosh => self.sinh(x),
            U::Tanh => {
                let s = self.sech(x);
                self.square(s)
            }
            U::Sech => {
                let t = self.tanh(x);
                let m = self.mul(t, e);
                self.negate(m)
            }
            U::Asinh => {
                let y = self.yconic(x);
                self.invert(y)
            }
            U::Acosh => {
                let c = self.xconic(x);
                self.invert(c)
            }
            U::Atanh => {
                let z = self.zconic(x);
                let sq = self.square(z);
                self.invert(sq)
            }
            U::Erf => {
                // 2/sqrt(pi) * exp(-x^2)
                let sq = self.square(x);
                let ex = self.exp(sq);
                let i = self.invert(ex);
                let c = self.constant(std::f64::consts::FRAC_2_SQRT_PI);
                self.mul(i, c)
            }
            U::Erfc => {
                let sq = self.square(x);
                let ex = self.exp(sq);
                let i = self.invert(ex);
                let c = self.constant(-std::f64::consts::FRAC_2_SQRT_PI);
                self.mul(i, c)
            }
            U::Invert => {
                // -(1/x)^2
                let sq = self.square(e);
                self.negate(sq)
            }
            U::SoftPP => {
                // log(1 + exp x)
                let ex = self.exp(x);
                self.ln_1p(ex)
            }
            U::Spence => {
                // log(1-x) / (-x)
                let nx = self.negate(x);
                let l = self.ln_1p(nx);
                let i = self.invert(nx);
                self.mul(l, i)
            }
            U::Square => {
                let two = self.constant(2.0);
                self.mul(x, two)
            }
            U::XConic | U::YConic => {
                // x / conic(x)
                let i = self.invert(e);
                self.mul(i, x)
            }
            U::ZConic => {
                let i = self.invert(e);
                let m = self.mul(i, x);
                self.negate(m)
            }
            U::Sgn | U::Negate => unreachable!("handled above"),
        };
        self.mul(dx, factor)
    }

    /// Releases cached derivatives for `e` and all of its descendants.
    ///
    /// A hint, not a correctness requirement: recomputed derivatives are
    /// structurally identical thanks to hash-consing. Bounds the working
    /// set of long-running gradient loops.
    pub fn purge(&mut self, e: ExprHandle) {
        let mut reachable = HashSet::new();
        let mut stack = vec![e];
        while let Some(h) = stack.pop() {
            if !reachable.insert(h) {
                continue;
            }
            stack.extend(self.node(h).children());
        }
        self.deriv_cache.retain(|&(h, _), _| !reachable.contains(&h));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_constant_derivative_is_zero() {
        let mut ctx = Context::new();
        let c = ctx.constant(42.0);
        let v = ctx.new_variable(0.0);
        let d = ctx.derive(c, v);
        assert_eq!(ctx.const_value(d), Some(0.0));
    }

    #[test]
    fn test_variable_derivative() {
        let mut ctx = Context::new();
        let v = ctx.new_variable(0.0);
        let u = ctx.new_variable(0.0);
        let ve = ctx.variable(v);
        let dv = ctx.derive(ve, v);
        assert_eq!(ctx.const_value(dv), Some(1.0));
        let du = ctx.derive(ve, u);
        assert_eq!(ctx.const_value(du), Some(0.0));
    }

    #[test]
    fn test_derivative_is_cached() {
        let mut ctx = Context::new();
        let v = ctx.new_variable(1.0);
        let ve = ctx.variable(v);
        let e = ctx.sin(ve);
        let d1 = ctx.derive(e, v);
        let d2 = ctx.derive(e, v);
        assert_eq!(d1, d2);

        ctx.purge(e);
        // recomputation yields the same interned node
        let d3 = ctx.derive(e, v);
        assert_eq!(d1, d3);
    }

    #[test]
    fn test_sum_and_product_rules() {
        let mut ctx = Context::new();
        let x = ctx.new_variable(0.7);
        let xe = ctx.variable(x);
        let s = ctx.sin(xe);
        let c = ctx.cos(xe);

        let sum = ctx.add(s, c);
        let dsum = ctx.derive(sum, x);
        let expected = 0.7_f64.cos() - 0.7_f64.sin();
        assert_relative_eq!(ctx.evaluate(dsum), expected, max_relative = 1e-12);

        let prod = ctx.mul(s, c);
        let dprod = ctx.derive(prod, x);
        // D(sin*cos) = cos^2 - sin^2
        let expected = 0.7_f64.cos().powi(2) - 0.7_f64.sin().powi(2);
        assert_relative_eq!(ctx.evaluate(dprod), expected, max_relative = 1e-12);
    }

    #[test]
    fn test_chain_rule_numeric() {
        let mut ctx = Context::new();
        let x = ctx.new_variable(0.5);
        let xe = ctx.variable(x);
        let ex = ctx.exp(xe);
        let e = ctx.sin(ex);
        let d = ctx.derive(e, x);
        // D(sin(exp x)) = cos(exp x) * exp x
        let expected = 0.5_f64.exp().cos() * 0.5_f64.exp();
        assert_relative_eq!(ctx.evaluate(d), expected, max_relative = 1e-12);
    }

    #[test]
    fn test_asin_derivative_uses_conic() {
        let mut ctx = Context::new();
        let x = ctx.new_variable(0.3);
        let xe = ctx.variable(x);
        let a = ctx.asin(xe);
        let d = ctx.derive(a, x);
        // the derivative should be 1/zconic(x), not a sqrt chain
        assert!(matches!(ctx.node(d), Node::Unary(U::Invert, _)));
        assert_relative_eq!(
            ctx.evaluate(d),
            (1.0 - 0.09_f64).sqrt().recip(),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_power_rule_constant_exponent() {
        let mut ctx = Context::new();
        let x = ctx.new_variable(2.0);
        let xe = ctx.variable(x);
        let three = ctx.constant(3.0);
        let p = ctx.pow(xe, three);
        let d = ctx.derive(p, x);
        // D(x^3) = 3x^2
        assert_relative_eq!(ctx.evaluate(d), 12.0, max_relative = 1e-12);
    }

    #[test]
    fn test_general_power_rule() {
        let mut ctx = Context::new();
        let x = ctx.new_variable(1.5);
        let xe = ctx.variable(x);
        let p = ctx.pow(xe, xe);
        let d = ctx.derive(p, x);
        // D(x^x) = x^x * (ln x + 1)
        let expected = 1.5_f64.powf(1.5) * (1.5_f64.ln() + 1.0);
        assert_relative_eq!(ctx.evaluate(d), expected, max_relative = 1e-12);
    }

    #[test]
    fn test_second_derivative_of_quadratic() {
        let mut ctx = Context::new();
        let x = ctx.new_variable(3.0);
        let b = ctx.new_variable(-5.0);
        let c = ctx.new_variable(4.0);
        let xe = ctx.variable(x);
        let be = ctx.variable(b);
        let ce = ctx.variable(c);

        // x^2 + b*x + c  (leading coefficient 1)
        let x2 = ctx.mul(xe, xe);
        let bx = ctx.mul(be, xe);
        let t = ctx.add(x2, bx);
        let q = ctx.add(t, ce);

        let d1 = ctx.derive(q, x);
        let d2 = ctx.derive(d1, x);
        assert_eq!(ctx.const_value(d2), Some(2.0));
    }

    #[test]
    fn test_sgn_derivative_is_zero() {
        let mut ctx = Context::new();
        let x = ctx.new_variable(1.0);
        let xe = ctx.variable(x);
        let s = ctx.sgn(xe);
        let d = ctx.derive(s, x);
        assert_eq!(ctx.const_value(d), Some(0.0));
    }

    #[test]
    fn test_spence_derivative() {
        let mut ctx = Context::new();
        let x = ctx.new_variable(0.25);
        let xe = ctx.variable(x);
        let li = ctx.li2(xe);
        let d = ctx.derive(li, x);
        // D(Li2(x)) = -log(1-x)/x
        let expected = -(1.0_f64 - 0.25).ln() / 0.25;
        assert_relative_eq!(ctx.evaluate(d), expected, max_relative = 1e-12);
    }

    #[test]
    fn test_softpp_derivative_is_softplus() {
        let mut ctx = Context::new();
        let x = ctx.new_variable(0.8);
        let xe = ctx.variable(x);
        let s = ctx.softpp(xe);
        let d = ctx.derive(s, x);
        let expected = 0.8_f64.exp().ln_1p();
        assert_relative_eq!(ctx.evaluate(d), expected, max_relative = 1e-12);
    }

    #[test]
    fn test_erf_derivative() {
        let mut ctx = Context::new();
        let x = ctx.new_variable(0.4);
        let xe = ctx.variable(x);
        let e = ctx.erf(xe);
        let d = ctx.derive(e, x);
        let expected = std::f64::consts::FRAC_2_SQRT_PI * (-0.16_f64).exp();
        assert_relative_eq!(ctx.evaluate(d), expected, max_relative = 1e-12);
    }
}
