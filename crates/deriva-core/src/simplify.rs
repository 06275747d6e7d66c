//! Simplifying smart constructors.
//!
//! Every expression is built through the constructors in this module. Each
//! one tries, in order: sentinel absorption, constant folding, attribute
//! shortcuts, peephole rewrites keyed by the operand's node kind, and
//! depth-guarded rebalancing; only when nothing applies is a node interned.
//! Because rewrites forward to other smart constructors, simplifications
//! cascade and equivalent forms collapse to one shared node.

use crate::attrs::Attribute;
use crate::context::Context;
use crate::eval::unary_value;
use crate::handle::ExprHandle;
use crate::node::{Node, Real, UnaryOp};

use UnaryOp as U;

impl Context {
    /// Builds a constant node.
    ///
    /// Non-finite input (including overflow from constant folding) yields
    /// the NaN sentinel.
    pub fn constant(&mut self, value: f64) -> ExprHandle {
        match Real::new(value) {
            Some(r) => self.intern(Node::Constant(r)),
            None => self.nan(),
        }
    }

    pub(crate) fn const_value(&self, e: ExprHandle) -> Option<f64> {
        self.node(e).constant_value()
    }

    pub(crate) fn is_nan(&self, e: ExprHandle) -> bool {
        matches!(self.node(e), Node::Nan)
    }

    /// True if negation of `e` simplifies away instead of adding a node.
    fn easy_negate(&self, e: ExprHandle) -> bool {
        match *self.node(e) {
            Node::Constant(_) | Node::Unary(U::Negate, _) => true,
            Node::Unary(U::Invert, x) => self.easy_negate(x),
            _ => false,
        }
    }

    /// True if inversion of `e` simplifies away instead of adding a node.
    fn easy_invert(&self, e: ExprHandle) -> bool {
        match *self.node(e) {
            Node::Constant(r) => r.get() != 0.0,
            Node::Unary(U::Invert, _) => true,
            Node::Unary(U::Negate, x) => self.easy_invert(x),
            _ => false,
        }
    }

    /// Inverts an operand `easy_invert` approved of, peeling reciprocal
    /// nodes directly rather than going through the guarded rewrite.
    fn peel_invert(&mut self, e: ExprHandle) -> ExprHandle {
        match *self.node(e) {
            Node::Unary(U::Invert, w) => w,
            Node::Unary(U::Negate, w) => {
                let i = self.peel_invert(w);
                self.apply(U::Negate, i)
            }
            _ => self.apply(U::Invert, e),
        }
    }

    /// Applies a unary function through the rewrite table.
    pub fn apply(&mut self, op: UnaryOp, x: ExprHandle) -> ExprHandle {
        if self.is_nan(x) {
            return self.nan();
        }
        if let Some(c) = self.const_value(x) {
            return self.constant(unary_value(op, c));
        }
        match op {
            U::Abs if self.guaranteed(x, Attribute::NonNegative) => return x,
            U::Abs if self.guaranteed(x, Attribute::NonPositive) => {
                return self.apply(U::Negate, x)
            }
            U::Sgn if self.guaranteed(x, Attribute::Positive) => return self.constant(1.0),
            U::Sgn if self.guaranteed(x, Attribute::Negative) => return self.constant(-1.0),
            _ => {}
        }
        if let Some(rewritten) = self.rewrite_unary(op, x) {
            return rewritten;
        }
        self.intern(Node::Unary(op, x))
    }

    /// Peephole rewrites for `op` applied to `x`, keyed by the kind of `x`.
    ///
    /// The conditionally-valid inverse collapses consult `guaranteed` and
    /// fall through when the guard fails.
    #[allow(clippy::too_many_lines)]
    fn rewrite_unary(&mut self, op: UnaryOp, x: ExprHandle) -> Option<ExprHandle> {
        // powers first: roots, reciprocals and squares of a power fold into
        // the exponent
        let x_node = *self.node(x);
        if let Node::Pow { base, exp } = x_node {
            return match op {
                U::Sqrt => {
                    let half = self.constant(0.5);
                    let e = self.mul(exp, half);
                    Some(self.pow(base, e))
                }
                U::Cbrt => {
                    let third = self.constant(1.0 / 3.0);
                    let e = self.mul(exp, third);
                    Some(self.pow(base, e))
                }
                U::Square => {
                    let two = self.constant(2.0);
                    let e = self.mul(exp, two);
                    Some(self.pow(base, e))
                }
                U::Invert => {
                    let e = self.apply(U::Negate, exp);
                    Some(self.pow(base, e))
                }
                _ => None,
            };
        }

        let Node::Unary(tag, u) = x_node else {
            return None;
        };

        match (op, tag) {
            // === involutions and fixed points ===
            (U::Abs, U::Abs | U::Sqrt | U::Exp | U::Cosh | U::Acos | U::Acosh)
            | (U::Abs, U::Square | U::XConic | U::YConic | U::ZConic)
            | (U::Sgn, U::Sgn)
            | (U::Cbrt, U::Sgn) => Some(x),

            // === abs ===
            (U::Abs, U::Negate) => Some(self.apply(U::Abs, u)),
            (U::Abs, U::Invert) => {
                let a = self.apply(U::Abs, u);
                Some(self.apply(U::Invert, a))
            }

            // === sgn ===
            (U::Sgn, U::Abs) => {
                let s = self.apply(U::Sgn, u);
                Some(self.apply(U::Abs, s))
            }
            (U::Sgn, U::Exp | U::Cosh) => Some(self.constant(1.0)),
            (
                U::Sgn,
                U::Cbrt | U::Asin | U::Atan | U::Sinh | U::Tanh | U::Asinh | U::Atanh | U::Erf,
            ) => Some(self.apply(U::Sgn, u)),
            (U::Sgn, U::Negate) => {
                let s = self.apply(U::Sgn, u);
                Some(self.apply(U::Negate, s))
            }
            (U::Sgn, U::Invert) => {
                let s = self.apply(U::Sgn, u);
                Some(self.apply(U::Invert, s))
            }

            // === roots ===
            (U::Sqrt, U::Square) => Some(self.apply(U::Abs, u)),
            (U::Sqrt, U::Invert) => {
                let r = self.apply(U::Sqrt, u);
                Some(self.apply(U::Invert, r))
            }
            (U::Cbrt, U::Abs) => {
                let c = self.apply(U::Cbrt, u);
                Some(self.apply(U::Abs, c))
            }
            (U::Cbrt, U::Negate) => {
                let c = self.apply(U::Cbrt, u);
                Some(self.apply(U::Negate, c))
            }
            (U::Cbrt, U::Invert) => {
                let c = self.apply(U::Cbrt, u);
                Some(self.apply(U::Invert, c))
            }

            // === exp / log ===
            (U::Exp, U::Log) if self.guaranteed(u, Attribute::Positive) => Some(u),
            (U::Exp, U::Negate) => {
                let e = self.apply(U::Exp, u);
                Some(self.apply(U::Invert, e))
            }
            (U::Exp, U::Asinh) => {
                let y = self.apply(U::YConic, u);
                Some(self.add(u, y))
            }
            (U::Log, U::Exp) => Some(u),
            (U::Log, U::Invert) => {
                let l = self.apply(U::Log, u);
                Some(self.apply(U::Negate, l))
            }

            // === circular functions ===
            (U::Sin, U::Asin) if self.guaranteed(u, Attribute::UnitRange) => Some(u),
            (U::Sin, U::Acos) if self.guaranteed(u, Attribute::UnitRange) => {
                Some(self.apply(U::ZConic, u))
            }
            (U::Sin, U::Negate) => {
                let s = self.apply(U::Sin, u);
                Some(self.apply(U::Negate, s))
            }
            (U::Cos, U::Abs | U::Negate) => Some(self.apply(U::Cos, u)),
            (U::Cos, U::Asin) if self.guaranteed(u, Attribute::UnitRange) => {
                Some(self.apply(U::ZConic, u))
            }
            (U::Cos, U::Acos) if self.guaranteed(u, Attribute::UnitRange) => Some(u),
            (U::Cos, U::Atan) => {
                let y = self.apply(U::YConic, u);
                Some(self.apply(U::Invert, y))
            }
            (U::Tan, U::Atan) => Some(u),
            (U::Tan, U::Negate) => {
                let t = self.apply(U::Tan, u);
                Some(self.apply(U::Negate, t))
            }
            (U::Sec, U::Abs | U::Negate) => Some(self.apply(U::Sec, u)),
            (U::Sec, U::Asin) if self.guaranteed(u, Attribute::UnitRange) => {
                let z = self.apply(U::ZConic, u);
                Some(self.apply(U::Invert, z))
            }
            (U::Sec, U::Acos) if self.guaranteed(u, Attribute::UnitRange) => {
                Some(self.apply(U::Invert, u))
            }
            (U::Sec, U::Atan) => Some(self.apply(U::YConic, u)),

            // === inverse circular ===
            (U::Asin, U::Abs) => {
                let s = self.apply(U::Asin, u);
                Some(self.apply(U::Abs, s))
            }
            (U::Asin, U::Negate) => {
                let s = self.apply(U::Asin, u);
                Some(self.apply(U::Negate, s))
            }
            (U::Asin, U::ZConic) => {
                let a = self.apply(U::Abs, u);
                Some(self.apply(U::Acos, a))
            }
            (U::Acos, U::ZConic) => {
                let s = self.apply(U::Asin, u);
                Some(self.apply(U::Abs, s))
            }
            (U::Atan, U::Abs) => {
                let t = self.apply(U::Atan, u);
                Some(self.apply(U::Abs, t))
            }
            (U::Atan, U::Negate) => {
                let t = self.apply(U::Atan, u);
                Some(self.apply(U::Negate, t))
            }

            // === hyperbolic functions ===
            (U::Sinh, U::Abs) => {
                let s = self.apply(U::Sinh, u);
                Some(self.apply(U::Abs, s))
            }
            (U::Sinh, U::Negate) => {
                let s = self.apply(U::Sinh, u);
                Some(self.apply(U::Negate, s))
            }
            (U::Sinh, U::Asinh) => Some(u),
            (U::Sinh, U::Acosh) if self.acosh_domain(u) => Some(self.apply(U::XConic, u)),
            (U::Cosh, U::Abs | U::Negate) => Some(self.apply(U::Cosh, u)),
            (U::Cosh, U::Asinh) => Some(self.apply(U::YConic, u)),
            (U::Cosh, U::Acosh) if self.acosh_domain(u) => Some(u),
            (U::Cosh, U::Atanh) if self.guaranteed(u, Attribute::OpenUnitRange) => {
                let z = self.apply(U::ZConic, u);
                Some(self.apply(U::Invert, z))
            }
            (U::Tanh, U::Abs) => {
                let t = self.apply(U::Tanh, u);
                Some(self.apply(U::Abs, t))
            }
            (U::Tanh, U::Negate) => {
                let t = self.apply(U::Tanh, u);
                Some(self.apply(U::Negate, t))
            }
            (U::Tanh, U::Atanh) if self.guaranteed(u, Attribute::OpenUnitRange) => Some(u),
            (U::Sech, U::Abs | U::Negate) => Some(self.apply(U::Sech, u)),

            // === inverse hyperbolic ===
            (U::Asinh, U::Abs) => {
                let s = self.apply(U::Asinh, u);
                Some(self.apply(U::Abs, s))
            }
            (U::Asinh, U::Negate) => {
                let s = self.apply(U::Asinh, u);
                Some(self.apply(U::Negate, s))
            }
            (U::Asinh, U::Sinh) => Some(u),
            (U::Asinh, U::XConic) => {
                let a = self.apply(U::Abs, u);
                Some(self.apply(U::Acosh, a))
            }
            (U::Acosh, U::Cosh) => Some(self.apply(U::Abs, u)),
            (U::Acosh, U::YConic) => {
                let s = self.apply(U::Asinh, u);
                Some(self.apply(U::Abs, s))
            }
            (U::Atanh, U::Abs) => {
                let t = self.apply(U::Atanh, u);
                Some(self.apply(U::Abs, t))
            }
            (U::Atanh, U::Negate) => {
                let t = self.apply(U::Atanh, u);
                Some(self.apply(U::Negate, t))
            }
            (U::Atanh, U::Tanh) => Some(u),

            // === error function ===
            (U::Erf, U::Abs) => {
                let e = self.apply(U::Erf, u);
                Some(self.apply(U::Abs, e))
            }
            (U::Erf, U::Negate) => {
                let e = self.apply(U::Erf, u);
                Some(self.apply(U::Negate, e))
            }

            // === reciprocal ===
            (U::Invert, U::Cos) => Some(self.apply(U::Sec, u)),
            (U::Invert, U::Sec) => Some(self.apply(U::Cos, u)),
            (U::Invert, U::Cosh) => Some(self.apply(U::Sech, u)),
            (U::Invert, U::Sech) => Some(self.apply(U::Cosh, u)),
            (U::Invert, U::Invert) if self.guaranteed(u, Attribute::Nonzero) => Some(u),
            (U::Invert, U::Negate) => {
                let i = self.apply(U::Invert, u);
                Some(self.apply(U::Negate, i))
            }

            // === negation ===
            (U::Negate, U::Negate) => Some(u),

            // === square ===
            (U::Square, U::Abs | U::Negate) => Some(self.apply(U::Square, u)),
            (U::Square, U::Sqrt) => Some(u),
            (U::Square, U::Sgn) => {
                let s = self.apply(U::Square, u);
                Some(self.apply(U::Sgn, s))
            }
            (U::Square, U::Invert) => {
                let s = self.apply(U::Square, u);
                Some(self.apply(U::Invert, s))
            }

            // === conic radicals ===
            (U::XConic, U::Abs | U::Negate) => Some(self.apply(U::XConic, u)),
            (U::XConic, U::Cosh) => {
                let s = self.apply(U::Sinh, u);
                Some(self.apply(U::Abs, s))
            }
            (U::XConic, U::YConic) => Some(self.apply(U::Abs, u)),
            (U::YConic, U::Abs | U::Negate) => Some(self.apply(U::YConic, u)),
            (U::YConic, U::Sinh) => Some(self.apply(U::Cosh, u)),
            (U::YConic, U::XConic) => Some(self.apply(U::Abs, u)),
            (U::ZConic, U::Abs | U::Negate) => Some(self.apply(U::ZConic, u)),
            (U::ZConic, U::Sin) => {
                let c = self.apply(U::Cos, u);
                Some(self.apply(U::Abs, c))
            }
            (U::ZConic, U::Cos) => {
                let s = self.apply(U::Sin, u);
                Some(self.apply(U::Abs, s))
            }
            (U::ZConic, U::ZConic) => Some(self.apply(U::Abs, u)),

            _ => None,
        }
    }

    /// `acosh`'s inverse collapses require the argument to lie in `[1, ∞)`.
    fn acosh_domain(&self, u: ExprHandle) -> bool {
        self.guaranteed(u, Attribute::Positive)
            && self.guaranteed(u, Attribute::AntiOpenUnitRange)
    }

    /// Simplifying sum constructor.
    pub fn add(&mut self, a: ExprHandle, b: ExprHandle) -> ExprHandle {
        if self.is_nan(a) || self.is_nan(b) {
            return self.nan();
        }
        match (self.const_value(a), self.const_value(b)) {
            (Some(x), Some(y)) => return self.constant(x + y),
            (Some(x), None) if x == 0.0 => return b,
            (None, Some(y)) if y == 0.0 => return a,
            _ => {}
        }
        if let Some(r) = self.rebalance_add(a, b) {
            return r;
        }
        if let Some(r) = self.rebalance_add(b, a) {
            return r;
        }
        self.intern(Node::Add(a, b))
    }

    /// Folds the new operand into the shallower branch of an over-deep sum,
    /// keeping recursion bounded near the depth limit.
    fn rebalance_add(&mut self, deep: ExprHandle, other: ExprHandle) -> Option<ExprHandle> {
        if self.depth(deep) <= self.depth_limit {
            return None;
        }
        let deep_node = *self.node(deep);
        if let Node::Add(f, g) = deep_node {
            let (df, dg) = (self.depth(f), self.depth(g));
            if df < dg {
                let t = self.add(f, other);
                return Some(self.add(g, t));
            }
            if df > dg {
                let t = self.add(g, other);
                return Some(self.add(f, t));
            }
        }
        None
    }

    /// Simplifying product constructor.
    pub fn mul(&mut self, a: ExprHandle, b: ExprHandle) -> ExprHandle {
        if self.is_nan(a) || self.is_nan(b) {
            return self.nan();
        }
        if a == b {
            return self.apply(U::Square, a);
        }
        if let Some(x) = self.const_value(a) {
            if let Some(r) = self.mul_const(x, a, b) {
                return r;
            }
        }
        if let Some(y) = self.const_value(b) {
            if let Some(r) = self.mul_const(y, b, a) {
                return r;
            }
        }
        // reciprocal fusion: 1/x * 1/y = 1/(x*y)
        let a_node = *self.node(a);
        if let Node::Unary(U::Invert, u) = a_node {
            if self.easy_invert(b) {
                let ib = self.peel_invert(b);
                let m = self.mul(u, ib);
                return self.apply(U::Invert, m);
            }
        }
        // sign propagation: -x * -y = x*y; -x * y = -(x*y)
        if let Node::Unary(U::Negate, u) = a_node {
            if self.easy_negate(b) {
                let nb = self.apply(U::Negate, b);
                return self.mul(u, nb);
            }
            let m = self.mul(u, b);
            return self.apply(U::Negate, m);
        }
        if let Some(r) = self.distribute_mul(a, b) {
            return r;
        }
        if let Some(r) = self.rebalance_mul(a, b) {
            return r;
        }
        if let Some(r) = self.pow_absorb(a, b) {
            return r;
        }
        if let Some(r) = self.distribute_mul(b, a) {
            return r;
        }
        if let Some(r) = self.rebalance_mul(b, a) {
            return r;
        }
        if let Some(r) = self.pow_absorb(b, a) {
            return r;
        }
        self.intern(Node::Mul(a, b))
    }

    fn mul_const(&mut self, c: f64, cexpr: ExprHandle, other: ExprHandle) -> Option<ExprHandle> {
        if let Some(y) = self.const_value(other) {
            return Some(self.constant(c * y));
        }
        if c == 0.0 {
            // exact zero absorbs; evaluation short-circuits the same way
            return Some(cexpr);
        }
        if c == 1.0 {
            return Some(other);
        }
        if c == -1.0 {
            return Some(self.apply(U::Negate, other));
        }
        None
    }

    /// Distributes a product over an over-deep sum: `(a+b)*c -> a*c + b*c`.
    fn distribute_mul(&mut self, deep: ExprHandle, other: ExprHandle) -> Option<ExprHandle> {
        if self.depth(deep) <= self.depth_limit {
            return None;
        }
        let deep_node = *self.node(deep);
        if let Node::Add(f, g) = deep_node {
            let t1 = self.mul(f, other);
            let t2 = self.mul(g, other);
            return Some(self.add(t1, t2));
        }
        None
    }

    /// Folds the new factor into the shallower branch of an over-deep
    /// product.
    fn rebalance_mul(&mut self, deep: ExprHandle, other: ExprHandle) -> Option<ExprHandle> {
        if self.depth(deep) <= self.depth_limit {
            return None;
        }
        let deep_node = *self.node(deep);
        if let Node::Mul(f, g) = deep_node {
            let (df, dg) = (self.depth(f), self.depth(g));
            if df < dg {
                let t = self.mul(f, other);
                return Some(self.mul(g, t));
            }
            if df > dg {
                let t = self.mul(g, other);
                return Some(self.mul(f, t));
            }
        }
        None
    }

    /// `x^a * x = x^(a+1)`.
    fn pow_absorb(&mut self, p: ExprHandle, other: ExprHandle) -> Option<ExprHandle> {
        let p_node = *self.node(p);
        if let Node::Pow { base, exp } = p_node {
            if base == other {
                let one = self.constant(1.0);
                let e = self.add(exp, one);
                return Some(self.pow(base, e));
            }
        }
        None
    }

    /// Simplifying power constructor.
    pub fn pow(&mut self, base: ExprHandle, exp: ExprHandle) -> ExprHandle {
        if self.is_nan(base) || self.is_nan(exp) {
            return self.nan();
        }
        let base_node = *self.node(base);
        match base_node {
            Node::Constant(r) => {
                let n = r.get();
                if let Some(p) = self.const_value(exp) {
                    return self.constant(n.powf(p));
                }
                if n == 0.0 && self.guaranteed(exp, Attribute::Nonzero) {
                    return base;
                }
                if n == 1.0 {
                    return base;
                }
                if n == std::f64::consts::E {
                    return self.apply(U::Exp, exp);
                }
            }
            Node::Unary(U::Sqrt, u) => {
                let half = self.constant(0.5);
                let e = self.mul(exp, half);
                return self.pow(u, e);
            }
            Node::Unary(U::Cbrt, u) => {
                let third = self.constant(1.0 / 3.0);
                let e = self.mul(exp, third);
                return self.pow(u, e);
            }
            Node::Unary(U::Exp, u) => {
                let e = self.mul(u, exp);
                return self.apply(U::Exp, e);
            }
            Node::Unary(U::Square, u) => {
                let two = self.constant(2.0);
                let e = self.mul(exp, two);
                return self.pow(u, e);
            }
            Node::Unary(U::Invert, u) => {
                let p = self.pow(u, exp);
                return self.apply(U::Invert, p);
            }
            Node::Pow { base: b, exp: e } => {
                let m = self.mul(e, exp);
                return self.pow(b, m);
            }
            _ => {}
        }
        if let Some(n) = self.const_value(exp) {
            if n == 0.0 {
                return self.constant(1.0);
            }
            if n == 1.0 {
                return base;
            }
            if n == 2.0 {
                return self.apply(U::Square, base);
            }
            if n == -1.0 {
                return self.apply(U::Invert, base);
            }
            if n == 0.5 {
                return self.apply(U::Sqrt, base);
            }
            if n == 1.0 / 3.0 {
                return self.apply(U::Cbrt, base);
            }
        }
        self.intern(Node::Pow { base, exp })
    }

    /// `a - b`, expressed as `a + (-b)`.
    pub fn sub(&mut self, a: ExprHandle, b: ExprHandle) -> ExprHandle {
        let nb = self.apply(U::Negate, b);
        self.add(a, nb)
    }

    /// `a / b`, expressed as `a * (1/b)`.
    pub fn div(&mut self, a: ExprHandle, b: ExprHandle) -> ExprHandle {
        let ib = self.apply(U::Invert, b);
        self.mul(a, ib)
    }
}

macro_rules! unary_constructors {
    ($($(#[$doc:meta])* $name:ident => $op:ident,)*) => {
        impl Context {
            $(
                $(#[$doc])*
                pub fn $name(&mut self, x: ExprHandle) -> ExprHandle {
                    self.apply(U::$op, x)
                }
            )*
        }
    };
}

unary_constructors! {
    /// Absolute value.
    abs => Abs,
    /// Sign function (-1, 0 or 1).
    sgn => Sgn,
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
    /// Reciprocal `1/x`.
    invert => Invert,
    /// Negation.
    negate => Negate,
    /// Softplus integral, `-Li2(-exp x)`.
    softpp => SoftPP,
    /// Dilogarithm.
    li2 => Spence,
    /// `x^2`.
    square => Square,
    /// `sqrt(x^2 - 1)`.
    xconic => XConic,
    /// `sqrt(x^2 + 1)`.
    yconic => YConic,
    /// `sqrt(1 - x^2)`.
    zconic => ZConic,
}
