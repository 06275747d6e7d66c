//! Property-based tests for the differentiation laws and structural
//! invariants.

#[cfg(test)]
mod tests {
    use approx::relative_eq;
    use proptest::prelude::*;

    use crate::{Context, UnaryOp};

    // Strategy for well-behaved evaluation points
    fn point() -> impl Strategy<Value = f64> {
        -2.0..2.0f64
    }

    // Strategy for small nonzero coefficients
    fn coeff() -> impl Strategy<Value = f64> {
        prop_oneof![(-4.0..-0.25f64), (0.25..4.0f64)]
    }

    fn close(a: f64, b: f64) -> bool {
        relative_eq!(a, b, max_relative = 1e-9, epsilon = 1e-9)
    }

    proptest! {
        // Interning: rebuilding the same expression yields the same handle
        #[test]
        fn interning_is_stable(v in point()) {
            let mut ctx = Context::new();
            let x = ctx.new_variable(v);
            let xe = ctx.variable(x);
            let s1 = ctx.sin(xe);
            let e1 = ctx.exp(s1);
            let s2 = ctx.sin(xe);
            let e2 = ctx.exp(s2);
            prop_assert_eq!(e1, e2);
            let sum1 = ctx.add(e1, xe);
            let sum2 = ctx.add(xe, e2);
            prop_assert_eq!(sum1, sum2);
        }

        // Linearity: D(a*f + b*g) = a*D(f) + b*D(g)
        #[test]
        fn derivative_is_linear(v in point(), a in coeff(), b in coeff()) {
            let mut ctx = Context::new();
            let x = ctx.new_variable(v);
            let xe = ctx.variable(x);
            let f = ctx.sin(xe);
            let g = ctx.cosh(xe);
            let ca = ctx.constant(a);
            let cb = ctx.constant(b);

            let af = ctx.mul(ca, f);
            let bg = ctx.mul(cb, g);
            let combo = ctx.add(af, bg);
            let d_combo = ctx.derive(combo, x);

            let df = ctx.derive(f, x);
            let dg = ctx.derive(g, x);
            let adf = ctx.mul(ca, df);
            let bdg = ctx.mul(cb, dg);
            let expected = ctx.add(adf, bdg);

            let lhs = ctx.evaluate(d_combo);
            let rhs = ctx.evaluate(expected);
            prop_assert!(close(lhs, rhs), "lhs={lhs}, rhs={rhs}");
        }

        // Product rule: D(f*g) = D(f)*g + f*D(g)
        #[test]
        fn product_rule_holds(v in point()) {
            let mut ctx = Context::new();
            let x = ctx.new_variable(v);
            let xe = ctx.variable(x);
            let f = ctx.atan(xe);
            let g = ctx.exp(xe);

            let fg = ctx.mul(f, g);
            let d_fg = ctx.derive(fg, x);

            let df = ctx.derive(f, x);
            let dg = ctx.derive(g, x);
            let t1 = ctx.mul(df, g);
            let t2 = ctx.mul(f, dg);
            let expected = ctx.add(t1, t2);

            let lhs = ctx.evaluate(d_fg);
            let rhs = ctx.evaluate(expected);
            prop_assert!(close(lhs, rhs), "lhs={lhs}, rhs={rhs}");
        }

        // Chain rule against the closed forms, for each elementary function
        // on a domain where it is smooth
        #[test]
        fn chain_rule_matches_closed_form(v in 0.1..0.9f64) {
            let mut ctx = Context::new();
            let x = ctx.new_variable(v);
            let xe = ctx.variable(x);
            // inner function u = x^2, so D(phi(u)) = phi'(u) * 2x
            let u = ctx.square(xe);
            let du = 2.0 * v;
            let uv = v * v;

            let cases: &[(UnaryOp, f64)] = &[
                (UnaryOp::Exp, uv.exp()),
                (UnaryOp::Log, uv.recip()),
                (UnaryOp::Sin, uv.cos()),
                (UnaryOp::Cos, -uv.sin()),
                (UnaryOp::Tan, uv.cos().powi(2).recip()),
                (UnaryOp::Asin, (1.0 - uv * uv).sqrt().recip()),
                (UnaryOp::Atan, (1.0 + uv * uv).recip()),
                (UnaryOp::Sinh, uv.cosh()),
                (UnaryOp::Cosh, uv.sinh()),
                (UnaryOp::Tanh, uv.cosh().powi(2).recip()),
                (UnaryOp::Asinh, (uv * uv + 1.0).sqrt().recip()),
                (UnaryOp::Atanh, (1.0 - uv * uv).recip()),
                (UnaryOp::Sqrt, 0.5 * uv.sqrt().recip()),
            ];

            for &(op, phi_prime) in cases {
                let e = ctx.apply(op, u);
                let d = ctx.derive(e, x);
                let got = ctx.evaluate(d);
                let want = phi_prime * du;
                prop_assert!(close(got, want), "{op:?}: got={got}, want={want}");
            }
        }

        // Involutions hold structurally for arbitrary operands
        #[test]
        fn negation_is_an_involution(v in point()) {
            let mut ctx = Context::new();
            let x = ctx.new_variable(v);
            let xe = ctx.variable(x);
            let e = ctx.tanh(xe);
            let n = ctx.negate(e);
            let nn = ctx.negate(n);
            prop_assert_eq!(nn, e);
        }

        // After any write, evaluation observes the new value
        #[test]
        fn dirty_tracking_is_exact(v1 in point(), v2 in point()) {
            let mut ctx = Context::new();
            let x = ctx.new_variable(v1);
            let xe = ctx.variable(x);
            let sq = ctx.square(xe);
            let e = ctx.exp(sq);
            prop_assert!(close(ctx.evaluate(e), (v1 * v1).exp()));
            ctx.set_value(x, v2).unwrap();
            prop_assert!(close(ctx.evaluate(e), (v2 * v2).exp()));
        }

        // Binding every variable to a number produces the value the
        // evaluator computes under those same bindings
        #[test]
        fn bind_agrees_with_evaluate(v in point(), w in point()) {
            let mut ctx = Context::new();
            let x = ctx.new_variable(v);
            let y = ctx.new_variable(w);
            let xe = ctx.variable(x);
            let ye = ctx.variable(y);
            let s = ctx.sin(xe);
            let p = ctx.mul(s, ye);
            let e = ctx.add(p, xe);

            let direct = ctx.evaluate(e);
            let bx = ctx.bind_value(e, x, v);
            let bxy = ctx.bind_value(bx, y, w);
            let folded = ctx.evaluate(bxy);
            prop_assert!(close(direct, folded), "direct={direct}, folded={folded}");
        }
    }
}
