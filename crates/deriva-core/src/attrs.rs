//! Conservative attribute inference.
//!
//! Every node can answer whether an attribute *provably* holds for all real
//! assignments of its free variables. Answers are conservative: `false`
//! means "unknown or false", never "false for some assignment". The sole
//! purpose of these answers is to guard conditionally-valid rewrites in the
//! smart constructors.

use crate::context::Context;
use crate::handle::ExprHandle;
use crate::node::{Node, UnaryOp};

/// A provable property of a subexpression's real-valued behavior.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Attribute {
    /// Defined (finite) for every assignment.
    Defined,
    /// Never exactly zero.
    Nonzero,
    /// Strictly greater than zero.
    Positive,
    /// Strictly less than zero.
    Negative,
    /// At most zero.
    NonPositive,
    /// At least zero.
    NonNegative,
    /// `|x| <= 1`.
    UnitRange,
    /// `|x| > 1`.
    AntiUnitRange,
    /// `|x| < 1`.
    OpenUnitRange,
    /// `|x| >= 1`.
    AntiOpenUnitRange,
    /// Continuous in every variable.
    Continuous,
    /// Strictly increasing in every variable.
    Increasing,
    /// Strictly decreasing in every variable.
    Decreasing,
    /// Never increases in any variable.
    NonIncreasing,
    /// Never decreases in any variable.
    NonDecreasing,
    /// Bounded from above.
    BoundedAbove,
    /// Bounded from below.
    BoundedBelow,
}

use Attribute as A;

impl Context {
    /// Returns true if `attr` provably holds for `e` under every real
    /// assignment of its free variables.
    #[must_use]
    pub fn guaranteed(&self, e: ExprHandle, attr: Attribute) -> bool {
        match *self.node(e) {
            Node::Nan => false,
            Node::Constant(r) => constant_guaranteed(r.get(), attr),
            Node::Variable(id) => {
                matches!(
                    attr,
                    A::Defined | A::Continuous | A::Increasing | A::NonDecreasing
                ) || self.assumed(id).contains(&attr)
            }
            Node::Unary(op, x) => self.unary_guaranteed(op, x, attr),
            Node::Add(f, g) => self.add_guaranteed(f, g, attr),
            Node::Mul(f, g) => self.mul_guaranteed(f, g, attr),
            Node::Pow { base, exp } => self.pow_guaranteed(base, exp, attr),
        }
    }

    fn unary_guaranteed(&self, op: UnaryOp, x: ExprHandle, a: Attribute) -> bool {
        let g = |attr: Attribute| self.guaranteed(x, attr);
        match op {
            UnaryOp::Abs => {
                g(A::Defined)
                    && match a {
                        A::Defined | A::NonNegative | A::BoundedBelow => true,
                        A::Nonzero
                        | A::UnitRange
                        | A::AntiUnitRange
                        | A::OpenUnitRange
                        | A::AntiOpenUnitRange
                        | A::Continuous => g(a),
                        A::Positive => g(A::Nonzero),
                        A::Increasing => {
                            g(A::Increasing) && g(A::Positive)
                                || g(A::Decreasing) && g(A::Negative)
                        }
                        A::Decreasing => {
                            g(A::Decreasing) && g(A::Positive)
                                || g(A::Increasing) && g(A::Negative)
                        }
                        A::NonIncreasing => {
                            g(A::NonIncreasing) && g(A::NonNegative)
                                || g(A::NonDecreasing) && g(A::NonPositive)
                        }
                        A::NonDecreasing => {
                            g(A::NonDecreasing) && g(A::NonNegative)
                                || g(A::NonIncreasing) && g(A::NonPositive)
                        }
                        A::BoundedAbove => g(A::BoundedAbove) && g(A::BoundedBelow),
                        A::Negative | A::NonPositive => false,
                    }
            }
            UnaryOp::Sgn => {
                g(A::Defined)
                    && match a {
                        A::Defined | A::UnitRange | A::BoundedAbove | A::BoundedBelow => true,
                        A::Nonzero
                        | A::Positive
                        | A::Negative
                        | A::NonPositive
                        | A::NonNegative => g(a),
                        A::AntiOpenUnitRange => g(A::Nonzero),
                        A::Continuous => g(A::Positive) || g(A::Negative),
                        A::NonIncreasing => {
                            g(A::NonIncreasing) || g(A::Positive) || g(A::Negative)
                        }
                        A::NonDecreasing => {
                            g(A::NonDecreasing) || g(A::Positive) || g(A::Negative)
                        }
                        A::AntiUnitRange | A::OpenUnitRange | A::Increasing | A::Decreasing => {
                            false
                        }
                    }
            }
            UnaryOp::Sqrt => {
                g(A::NonNegative)
                    && match a {
                        A::Defined | A::NonNegative | A::BoundedBelow => true,
                        A::Nonzero
                        | A::Positive
                        | A::UnitRange
                        | A::AntiUnitRange
                        | A::OpenUnitRange
                        | A::AntiOpenUnitRange
                        | A::Continuous
                        | A::Increasing
                        | A::Decreasing
                        | A::NonIncreasing
                        | A::NonDecreasing
                        | A::BoundedAbove => g(a),
                        A::Negative | A::NonPositive => false,
                    }
            }
            UnaryOp::Cbrt => {
                g(A::Defined)
                    && match a {
                        A::Defined => true,
                        _ => g(a),
                    }
            }
            UnaryOp::Exp => {
                g(A::Defined)
                    && match a {
                        A::Defined
                        | A::Nonzero
                        | A::Positive
                        | A::NonNegative
                        | A::BoundedBelow => true,
                        A::Continuous
                        | A::Increasing
                        | A::Decreasing
                        | A::NonIncreasing
                        | A::NonDecreasing
                        | A::BoundedAbove => g(a),
                        A::UnitRange => g(A::NonPositive),
                        A::AntiUnitRange => g(A::Positive),
                        A::OpenUnitRange => g(A::Negative),
                        A::AntiOpenUnitRange => g(A::NonNegative),
                        A::Negative | A::NonPositive => false,
                    }
            }
            UnaryOp::ExpM1 => {
                g(A::Defined)
                    && match a {
                        A::Defined | A::BoundedBelow => true,
                        A::Nonzero
                        | A::Positive
                        | A::Negative
                        | A::NonPositive
                        | A::NonNegative
                        | A::Continuous
                        | A::Increasing
                        | A::Decreasing
                        | A::NonIncreasing
                        | A::NonDecreasing
                        | A::BoundedAbove => g(a),
                        A::UnitRange | A::OpenUnitRange => g(A::NonPositive),
                        A::AntiUnitRange | A::AntiOpenUnitRange => false,
                    }
            }
            UnaryOp::Log => {
                g(A::Positive)
                    && match a {
                        A::Defined => true,
                        A::Continuous
                        | A::Increasing
                        | A::Decreasing
                        | A::NonIncreasing
                        | A::NonDecreasing
                        | A::BoundedAbove => g(a),
                        A::Nonzero => g(A::AntiUnitRange) || g(A::OpenUnitRange),
                        A::Positive => g(A::AntiUnitRange),
                        A::Negative => g(A::OpenUnitRange),
                        A::NonPositive => g(A::UnitRange),
                        A::NonNegative => g(A::AntiOpenUnitRange),
                        A::UnitRange
                        | A::AntiUnitRange
                        | A::OpenUnitRange
                        | A::AntiOpenUnitRange
                        | A::BoundedBelow => false,
                    }
            }
            UnaryOp::Log1P => {
                (g(A::OpenUnitRange) || g(A::Positive))
                    && match a {
                        A::Defined => true,
                        A::Nonzero
                        | A::Positive
                        | A::Negative
                        | A::NonPositive
                        | A::NonNegative
                        | A::Continuous
                        | A::Increasing
                        | A::Decreasing
                        | A::NonIncreasing
                        | A::NonDecreasing
                        | A::BoundedAbove
                        | A::BoundedBelow => g(a),
                        A::UnitRange
                        | A::AntiUnitRange
                        | A::OpenUnitRange
                        | A::AntiOpenUnitRange => false,
                    }
            }
            UnaryOp::Sin | UnaryOp::Cos => {
                g(A::Defined)
                    && match a {
                        A::Defined | A::UnitRange | A::BoundedAbove | A::BoundedBelow => true,
                        A::Continuous => g(a),
                        _ => false,
                    }
            }
            UnaryOp::Tan | UnaryOp::Sec | UnaryOp::Sech | UnaryOp::SoftPP => false,
            UnaryOp::Asin => {
                g(A::UnitRange)
                    && match a {
                        A::Defined | A::BoundedAbove | A::BoundedBelow => true,
                        A::Nonzero
                        | A::Positive
                        | A::Negative
                        | A::NonPositive
                        | A::NonNegative
                        | A::Continuous
                        | A::Increasing
                        | A::Decreasing
                        | A::NonIncreasing
                        | A::NonDecreasing => g(a),
                        A::UnitRange
                        | A::AntiUnitRange
                        | A::OpenUnitRange
                        | A::AntiOpenUnitRange => false,
                    }
            }
            UnaryOp::Acos => {
                g(A::UnitRange)
                    && match a {
                        A::Defined | A::NonNegative | A::BoundedAbove | A::BoundedBelow => true,
                        A::Continuous => g(a),
                        A::Nonzero | A::Positive => g(A::OpenUnitRange),
                        A::NonPositive => g(A::Positive) && g(A::AntiOpenUnitRange),
                        A::Increasing => g(A::Decreasing),
                        A::Decreasing => g(A::Increasing),
                        A::NonIncreasing => g(A::NonDecreasing),
                        A::NonDecreasing => g(A::NonIncreasing),
                        A::Negative
                        | A::UnitRange
                        | A::AntiUnitRange
                        | A::OpenUnitRange
                        | A::AntiOpenUnitRange => false,
                    }
            }
            UnaryOp::Atan => {
                g(A::Defined)
                    && match a {
                        A::Defined | A::BoundedAbove | A::BoundedBelow => true,
                        A::Nonzero
                        | A::Positive
                        | A::Negative
                        | A::NonPositive
                        | A::NonNegative
                        | A::Continuous
                        | A::Increasing
                        | A::Decreasing
                        | A::NonIncreasing
                        | A::NonDecreasing => g(a),
                        A::UnitRange
                        | A::AntiUnitRange
                        | A::OpenUnitRange
                        | A::AntiOpenUnitRange => false,
                    }
            }
            UnaryOp::Sinh | UnaryOp::Asinh => {
                g(A::Defined)
                    && match a {
                        A::Defined => true,
                        A::Nonzero
                        | A::Positive
                        | A::Negative
                        | A::NonPositive
                        | A::NonNegative
                        | A::Continuous
                        | A::Increasing
                        | A::Decreasing
                        | A::NonIncreasing
                        | A::NonDecreasing
                        | A::BoundedAbove
                        | A::BoundedBelow => g(a),
                        A::UnitRange
                        | A::AntiUnitRange
                        | A::OpenUnitRange
                        | A::AntiOpenUnitRange => false,
                    }
            }
            UnaryOp::Cosh => {
                g(A::Defined)
                    && match a {
                        A::Defined
                        | A::Nonzero
                        | A::Positive
                        | A::NonNegative
                        | A::AntiOpenUnitRange
                        | A::BoundedBelow => true,
                        A::Continuous => g(a),
                        A::AntiUnitRange => g(A::Nonzero),
                        A::Increasing => {
                            g(A::Increasing) && g(A::Positive)
                                || g(A::Decreasing) && g(A::Negative)
                        }
                        A::Decreasing => {
                            g(A::Decreasing) && g(A::Positive)
                                || g(A::Increasing) && g(A::Negative)
                        }
                        A::NonIncreasing => {
                            g(A::NonIncreasing) && g(A::NonNegative)
                                || g(A::NonDecreasing) && g(A::NonPositive)
                        }
                        A::NonDecreasing => {
                            g(A::NonDecreasing) && g(A::NonNegative)
                                || g(A::NonIncreasing) && g(A::NonPositive)
                        }
                        A::BoundedAbove => g(A::BoundedAbove) && g(A::BoundedBelow),
                        A::Negative | A::NonPositive | A::UnitRange | A::OpenUnitRange => false,
                    }
            }
            UnaryOp::Tanh => {
                g(A::Defined)
                    && match a {
                        A::Defined
                        | A::UnitRange
                        | A::OpenUnitRange
                        | A::BoundedAbove
                        | A::BoundedBelow => true,
                        A::Nonzero
                        | A::Positive
                        | A::Negative
                        | A::NonPositive
                        | A::NonNegative
                        | A::Continuous
                        | A::Increasing
                        | A::Decreasing
                        | A::NonIncreasing
                        | A::NonDecreasing => g(a),
                        A::AntiUnitRange | A::AntiOpenUnitRange => false,
                    }
            }
            UnaryOp::Acosh => {
                g(A::Positive)
                    && g(A::AntiOpenUnitRange)
                    && match a {
                        A::Defined | A::NonNegative | A::BoundedBelow => true,
                        A::Continuous
                        | A::Increasing
                        | A::Decreasing
                        | A::NonIncreasing
                        | A::NonDecreasing
                        | A::BoundedAbove => g(a),
                        A::Nonzero | A::Positive => g(A::AntiUnitRange),
                        _ => false,
                    }
            }
            UnaryOp::Atanh => {
                g(A::OpenUnitRange)
                    && match a {
                        A::Defined => true,
                        A::Nonzero
                        | A::Positive
                        | A::Negative
                        | A::NonPositive
                        | A::NonNegative
                        | A::Continuous
                        | A::Increasing
                        | A::Decreasing
                        | A::NonIncreasing
                        | A::NonDecreasing => g(a),
                        _ => false,
                    }
            }
            UnaryOp::Erf => {
                g(A::Defined)
                    && match a {
                        A::Defined
                        | A::UnitRange
                        | A::OpenUnitRange
                        | A::BoundedAbove
                        | A::BoundedBelow => true,
                        A::Nonzero
                        | A::Positive
                        | A::Negative
                        | A::NonPositive
                        | A::NonNegative
                        | A::Continuous
                        | A::Increasing
                        | A::Decreasing
                        | A::NonIncreasing
                        | A::NonDecreasing => g(a),
                        A::AntiUnitRange | A::AntiOpenUnitRange => false,
                    }
            }
            // erfc(x) lies in (0, 2) and decreases where its argument grows
            UnaryOp::Erfc => {
                g(A::Defined)
                    && match a {
                        A::Defined
                        | A::Nonzero
                        | A::Positive
                        | A::NonNegative
                        | A::BoundedAbove
                        | A::BoundedBelow => true,
                        A::Continuous => g(a),
                        A::Increasing => g(A::Decreasing),
                        A::Decreasing => g(A::Increasing),
                        A::NonIncreasing => g(A::NonDecreasing),
                        A::NonDecreasing => g(A::NonIncreasing),
                        A::UnitRange => g(A::NonNegative),
                        // erfc(0) is exactly 1, so only a strictly positive
                        // argument keeps the value strictly below 1
                        A::OpenUnitRange => g(A::Positive),
                        _ => false,
                    }
            }
            UnaryOp::Invert => {
                g(A::Nonzero)
                    && match a {
                        A::Defined | A::Nonzero => true,
                        A::Positive | A::Negative | A::NonPositive | A::NonNegative => g(a),
                        A::UnitRange => g(A::AntiOpenUnitRange),
                        A::AntiUnitRange => g(A::OpenUnitRange),
                        A::OpenUnitRange => g(A::AntiUnitRange),
                        A::AntiOpenUnitRange => g(A::UnitRange),
                        A::Continuous => g(A::Positive) || g(A::Negative),
                        A::Increasing => {
                            g(A::Decreasing) && (g(A::Positive) || g(A::Negative))
                        }
                        A::Decreasing => {
                            g(A::Increasing) && (g(A::Positive) || g(A::Negative))
                        }
                        A::NonIncreasing => {
                            g(A::NonDecreasing) && (g(A::Positive) || g(A::Negative))
                        }
                        A::NonDecreasing => {
                            g(A::NonIncreasing) && (g(A::Positive) || g(A::Negative))
                        }
                        A::BoundedAbove | A::BoundedBelow => false,
                    }
            }
            UnaryOp::Negate => {
                g(A::Defined)
                    && match a {
                        A::Defined => true,
                        A::Nonzero
                        | A::UnitRange
                        | A::AntiUnitRange
                        | A::OpenUnitRange
                        | A::AntiOpenUnitRange
                        | A::Continuous => g(a),
                        A::Positive => g(A::Negative),
                        A::Negative => g(A::Positive),
                        A::NonPositive => g(A::NonNegative),
                        A::NonNegative => g(A::NonPositive),
                        A::Increasing => g(A::Decreasing),
                        A::Decreasing => g(A::Increasing),
                        A::NonIncreasing => g(A::NonDecreasing),
                        A::NonDecreasing => g(A::NonIncreasing),
                        A::BoundedAbove => g(A::BoundedBelow),
                        A::BoundedBelow => g(A::BoundedAbove),
                    }
            }
            UnaryOp::Spence => {
                (g(A::UnitRange) || g(A::Negative))
                    && match a {
                        A::Defined | A::BoundedAbove => true,
                        A::Nonzero
                        | A::Positive
                        | A::Negative
                        | A::NonPositive
                        | A::NonNegative
                        | A::Continuous
                        | A::Increasing
                        | A::Decreasing
                        | A::NonIncreasing
                        | A::NonDecreasing
                        | A::BoundedBelow => g(a),
                        A::UnitRange
                        | A::AntiUnitRange
                        | A::OpenUnitRange
                        | A::AntiOpenUnitRange => false,
                    }
            }
            UnaryOp::Square => {
                g(A::Defined)
                    && match a {
                        A::Defined | A::NonNegative | A::BoundedBelow => true,
                        A::Nonzero
                        | A::UnitRange
                        | A::AntiUnitRange
                        | A::OpenUnitRange
                        | A::AntiOpenUnitRange
                        | A::Continuous => g(a),
                        A::Positive => g(A::Nonzero),
                        A::Increasing => {
                            g(A::Increasing) && g(A::Positive)
                                || g(A::Decreasing) && g(A::Negative)
                        }
                        A::Decreasing => {
                            g(A::Decreasing) && g(A::Positive)
                                || g(A::Increasing) && g(A::Negative)
                        }
                        A::NonIncreasing => {
                            g(A::NonIncreasing) && g(A::NonNegative)
                                || g(A::NonDecreasing) && g(A::NonPositive)
                        }
                        A::NonDecreasing => {
                            g(A::NonDecreasing) && g(A::NonNegative)
                                || g(A::NonIncreasing) && g(A::NonPositive)
                        }
                        A::BoundedAbove => g(A::BoundedAbove) && g(A::BoundedBelow),
                        A::Negative | A::NonPositive => false,
                    }
            }
            UnaryOp::XConic => {
                g(A::Positive)
                    && g(A::AntiOpenUnitRange)
                    && match a {
                        A::Defined | A::NonNegative | A::BoundedBelow => true,
                        A::Continuous
                        | A::Increasing
                        | A::Decreasing
                        | A::NonIncreasing
                        | A::NonDecreasing
                        | A::BoundedAbove => g(a),
                        A::Nonzero | A::Positive => g(A::AntiUnitRange),
                        _ => false,
                    }
            }
            UnaryOp::YConic => {
                g(A::Defined)
                    && match a {
                        A::Defined
                        | A::Nonzero
                        | A::Positive
                        | A::NonNegative
                        | A::AntiOpenUnitRange
                        | A::BoundedBelow => true,
                        A::Continuous => g(a),
                        A::AntiUnitRange => g(A::Nonzero),
                        A::Increasing => {
                            g(A::Increasing) && g(A::Positive)
                                || g(A::Decreasing) && g(A::Negative)
                        }
                        A::Decreasing => {
                            g(A::Decreasing) && g(A::Positive)
                                || g(A::Increasing) && g(A::Negative)
                        }
                        A::NonIncreasing => {
                            g(A::NonIncreasing) && g(A::NonNegative)
                                || g(A::NonDecreasing) && g(A::NonPositive)
                        }
                        A::NonDecreasing => {
                            g(A::NonDecreasing) && g(A::NonNegative)
                                || g(A::NonIncreasing) && g(A::NonPositive)
                        }
                        A::BoundedAbove => g(A::BoundedAbove) && g(A::BoundedBelow),
                        A::Negative | A::NonPositive | A::UnitRange | A::OpenUnitRange => false,
                    }
            }
            UnaryOp::ZConic => {
                g(A::UnitRange)
                    && match a {
                        A::Defined
                        | A::NonNegative
                        | A::UnitRange
                        | A::BoundedAbove
                        | A::BoundedBelow => true,
                        A::Continuous => g(a),
                        A::Nonzero | A::Positive => g(A::OpenUnitRange),
                        A::NonPositive => g(A::AntiOpenUnitRange),
                        A::OpenUnitRange => g(A::Nonzero),
                        A::Increasing => {
                            g(A::Increasing) && g(A::Negative)
                                || g(A::Decreasing) && g(A::Positive)
                        }
                        A::Decreasing => {
                            g(A::Decreasing) && g(A::Negative)
                                || g(A::Increasing) && g(A::Positive)
                        }
                        A::NonIncreasing => {
                            g(A::NonIncreasing) && g(A::NonPositive)
                                || g(A::NonDecreasing) && g(A::NonNegative)
                        }
                        A::NonDecreasing => {
                            g(A::NonDecreasing) && g(A::NonPositive)
                                || g(A::NonIncreasing) && g(A::NonNegative)
                        }
                        A::Negative | A::AntiUnitRange | A::AntiOpenUnitRange => false,
                    }
            }
        }
    }

    fn add_guaranteed(&self, f: ExprHandle, g: ExprHandle, a: Attribute) -> bool {
        let fa = |attr: Attribute| self.guaranteed(f, attr);
        let ga = |attr: Attribute| self.guaranteed(g, attr);
        if !fa(A::Defined) || !ga(A::Defined) {
            return false;
        }
        match a {
            A::Defined => true,
            A::Nonzero => {
                fa(A::Positive) && ga(A::NonNegative)
                    || fa(A::Negative) && ga(A::NonPositive)
                    || fa(A::NonPositive) && ga(A::Negative)
                    || fa(A::NonNegative) && ga(A::Positive)
            }
            A::Positive => {
                fa(A::Positive) && ga(A::NonNegative) || fa(A::NonNegative) && ga(A::Positive)
            }
            A::Negative => {
                fa(A::Negative) && ga(A::NonPositive) || fa(A::NonPositive) && ga(A::Negative)
            }
            A::NonPositive
            | A::NonNegative
            | A::Continuous
            | A::NonIncreasing
            | A::NonDecreasing
            | A::BoundedAbove
            | A::BoundedBelow => fa(a) && ga(a),
            A::Increasing => {
                fa(A::Increasing) && ga(A::NonDecreasing)
                    || fa(A::NonDecreasing) && ga(A::Increasing)
            }
            A::Decreasing => {
                fa(A::Decreasing) && ga(A::NonIncreasing)
                    || fa(A::NonIncreasing) && ga(A::Decreasing)
            }
            A::UnitRange | A::AntiUnitRange | A::OpenUnitRange | A::AntiOpenUnitRange => false,
        }
    }

    fn mul_guaranteed(&self, f: ExprHandle, g: ExprHandle, a: Attribute) -> bool {
        let fa = |attr: Attribute| self.guaranteed(f, attr);
        let ga = |attr: Attribute| self.guaranteed(g, attr);
        if !fa(A::Defined) || !ga(A::Defined) {
            return false;
        }
        match a {
            A::Defined => true,
            A::Nonzero
            | A::UnitRange
            | A::AntiUnitRange
            | A::OpenUnitRange
            | A::AntiOpenUnitRange
            | A::Continuous => fa(a) && ga(a),
            A::Positive => {
                fa(A::Positive) && ga(A::Positive) || fa(A::Negative) && ga(A::Negative)
            }
            A::Negative => {
                fa(A::Positive) && ga(A::Negative) || fa(A::Negative) && ga(A::Positive)
            }
            _ => false,
        }
    }

    fn pow_guaranteed(&self, base: ExprHandle, exp: ExprHandle, a: Attribute) -> bool {
        if !self.guaranteed(base, A::Positive) || !self.guaranteed(exp, A::Defined) {
            return false;
        }
        match a {
            A::Defined | A::Nonzero | A::Positive | A::NonNegative => true,
            A::Continuous => self.guaranteed(base, a) && self.guaranteed(exp, a),
            _ => false,
        }
    }
}

fn constant_guaranteed(n: f64, a: Attribute) -> bool {
    match a {
        A::Defined
        | A::Continuous
        | A::NonIncreasing
        | A::NonDecreasing
        | A::BoundedAbove
        | A::BoundedBelow => true,
        A::Nonzero => n != 0.0,
        A::Positive => n > 0.0,
        A::Negative => n < 0.0,
        A::NonPositive => n <= 0.0,
        A::NonNegative => n >= 0.0,
        A::UnitRange => (-1.0..=1.0).contains(&n),
        A::AntiUnitRange => !(-1.0..=1.0).contains(&n),
        A::OpenUnitRange => n > -1.0 && n < 1.0,
        A::AntiOpenUnitRange => n <= -1.0 || n >= 1.0,
        A::Increasing | A::Decreasing => false,
    }
}
