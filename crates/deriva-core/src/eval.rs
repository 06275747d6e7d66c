//! Cached numeric evaluation.
//!
//! Each node stores one numeric value together with the dirty level at
//! which it was computed. Variable writes bump the level, invalidating
//! every cache in O(1); nothing is recomputed until the next read.

use crate::context::Context;
use crate::handle::ExprHandle;
use crate::node::{Node, UnaryOp};

/// Numeric kernel shared by evaluation and constant folding.
///
/// Domain violations are not errors: the IEEE result (NaN or an infinity)
/// is returned and propagates.
pub(crate) fn unary_value(op: UnaryOp, x: f64) -> f64 {
    match op {
        UnaryOp::Abs => x.abs(),
        UnaryOp::Sgn => f64::from(x > 0.0) - f64::from(x < 0.0),
        UnaryOp::Sqrt => x.sqrt(),
        UnaryOp::Cbrt => x.cbrt(),
        UnaryOp::Exp => x.exp(),
        UnaryOp::ExpM1 => x.exp_m1(),
        UnaryOp::Log => x.ln(),
        UnaryOp::Log1P => x.ln_1p(),
        UnaryOp::Sin => x.sin(),
        UnaryOp::Cos => x.cos(),
        UnaryOp::Tan => x.tan(),
        UnaryOp::Sec => x.cos().recip(),
        UnaryOp::Asin => x.asin(),
        UnaryOp::Acos => x.acos(),
        UnaryOp::Atan => x.atan(),
        UnaryOp::Sinh => x.sinh(),
        UnaryOp::Cosh => x.cosh(),
        UnaryOp::Tanh => x.tanh(),
        UnaryOp::Sech => x.cosh().recip(),
        UnaryOp::Asinh => x.asinh(),
        UnaryOp::Acosh => x.acosh(),
        UnaryOp::Atanh => x.atanh(),
        UnaryOp::Erf => deriva_special::erf(x),
        UnaryOp::Erfc => deriva_special::erfc(x),
        UnaryOp::Invert => x.recip(),
        UnaryOp::Negate => -x,
        UnaryOp::SoftPP => deriva_special::softpp(x),
        UnaryOp::Spence => deriva_special::dilog(x),
        UnaryOp::Square => x * x,
        UnaryOp::XConic => (x * x - 1.0).sqrt(),
        UnaryOp::YConic => (x * x + 1.0).sqrt(),
        UnaryOp::ZConic => (1.0 - x * x).sqrt(),
    }
}

impl Context {
    /// Evaluates `e` under the current variable values.
    ///
    /// Values are memoized per node; between two variable writes, repeated
    /// evaluation costs one cache probe per node. A product whose first
    /// evaluated factor is exactly zero is zero without evaluating the
    /// other factor, which lets a selector variable prune subexpressions
    /// that would otherwise be undefined.
    pub fn evaluate(&mut self, e: ExprHandle) -> f64 {
        let slot = &self.nodes[e.index() as usize];
        if slot.stamp == self.dirty_level {
            return slot.value;
        }
        let node = slot.node;
        let value = match node {
            Node::Nan => f64::NAN,
            Node::Constant(r) => r.get(),
            Node::Variable(id) => self.vars[id.index() as usize].value,
            Node::Unary(op, x) => unary_value(op, self.evaluate(x)),
            Node::Add(f, g) => self.evaluate(f) + self.evaluate(g),
            Node::Mul(f, g) => {
                let x = self.evaluate(f);
                if x == 0.0 {
                    0.0
                } else {
                    let y = self.evaluate(g);
                    if y == 0.0 {
                        0.0
                    } else {
                        x * y
                    }
                }
            }
            Node::Pow { base, exp } => {
                let b = self.evaluate(base);
                let p = self.evaluate(exp);
                b.powf(p)
            }
        };
        let slot = &mut self.nodes[e.index() as usize];
        slot.stamp = self.dirty_level;
        slot.value = value;
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_evaluate_leaves() {
        let mut ctx = Context::new();
        let c = ctx.constant(2.5);
        assert_eq!(ctx.evaluate(c), 2.5);

        let v = ctx.new_variable(7.0);
        let ve = ctx.variable(v);
        assert_eq!(ctx.evaluate(ve), 7.0);

        let nan = ctx.nan();
        assert!(ctx.evaluate(nan).is_nan());
    }

    #[test]
    fn test_evaluate_tracks_variable_writes() {
        let mut ctx = Context::new();
        let x = ctx.new_variable(1.0);
        let xe = ctx.variable(x);
        let e = ctx.sin(xe);
        assert_relative_eq!(ctx.evaluate(e), 1.0_f64.sin());

        ctx.set_value(x, 2.0).unwrap();
        assert_relative_eq!(ctx.evaluate(e), 2.0_f64.sin());
    }

    #[test]
    fn test_cache_is_stable_between_writes() {
        let mut ctx = Context::new();
        let x = ctx.new_variable(3.0);
        let xe = ctx.variable(x);
        let sq = ctx.square(xe);
        let first = ctx.evaluate(sq);
        // poke the raw storage: a cached read must not see this until the
        // dirty level moves
        ctx.vars[x.index() as usize].value = 100.0;
        assert_eq!(ctx.evaluate(sq), first);
        ctx.touch();
        assert_eq!(ctx.evaluate(sq), 10_000.0);
    }

    #[test]
    fn test_multiply_short_circuits_on_zero() {
        let mut ctx = Context::new();
        let x = ctx.new_variable(0.0);
        let v = ctx.new_variable(0.0);
        let xe = ctx.variable(x);
        let ve = ctx.variable(v);
        let lx = ctx.ln(xe);
        let y = ctx.mul(ve, lx);

        // log(0) is -inf, but the zero selector prunes it
        assert_eq!(ctx.evaluate(y), 0.0);

        ctx.set_value(v, 1.0).unwrap();
        ctx.set_value(x, std::f64::consts::E).unwrap();
        assert_relative_eq!(ctx.evaluate(y), 1.0);
    }

    #[test]
    fn test_short_circuit_right_factor() {
        let mut ctx = Context::new();
        let x = ctx.new_variable(0.0);
        let v = ctx.new_variable(0.0);
        let xe = ctx.variable(x);
        let ve = ctx.variable(v);
        let inv = ctx.invert(xe);
        let y = ctx.mul(inv, ve);
        // 1/0 * 0: the right factor is zero, so the product is zero
        assert_eq!(ctx.evaluate(y), 0.0);
    }

    #[test]
    fn test_domain_errors_propagate_as_nan() {
        let mut ctx = Context::new();
        let x = ctx.new_variable(-1.0);
        let xe = ctx.variable(x);
        let r = ctx.sqrt(xe);
        assert!(ctx.evaluate(r).is_nan());

        let l = ctx.ln(xe);
        assert!(ctx.evaluate(l).is_nan());

        ctx.set_value(x, 4.0).unwrap();
        assert_eq!(ctx.evaluate(r), 2.0);
    }

    #[test]
    fn test_pow_evaluation() {
        let mut ctx = Context::new();
        let x = ctx.new_variable(2.0);
        let y = ctx.new_variable(10.0);
        let xe = ctx.variable(x);
        let ye = ctx.variable(y);
        let p = ctx.pow(xe, ye);
        assert_eq!(ctx.evaluate(p), 1024.0);
    }

    #[test]
    fn test_special_function_evaluation() {
        let mut ctx = Context::new();
        let x = ctx.new_variable(0.0);
        let xe = ctx.variable(x);

        let e = ctx.erf(xe);
        assert_eq!(ctx.evaluate(e), 0.0);

        let ec = ctx.erfc(xe);
        assert_eq!(ctx.evaluate(ec), 1.0);

        let li = ctx.li2(xe);
        assert_eq!(ctx.evaluate(li), 0.0);

        ctx.set_value(x, 1.0).unwrap();
        assert_relative_eq!(
            ctx.evaluate(li),
            std::f64::consts::PI * std::f64::consts::PI / 6.0,
            max_relative = 1e-12
        );
    }
}
