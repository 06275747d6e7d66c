//! Expression node types.
//!
//! This module defines the node variants stored in a context's arena: the
//! NaN sentinel, finite constants, variable references, unary function
//! applications, and the three binary operators.

use smallvec::SmallVec;

use crate::handle::ExprHandle;

/// Identifier of a variable registered in a [`Context`](crate::Context).
///
/// Identity, not value, decides whether two variable references denote the
/// same symbolic variable.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct VarId(pub(crate) u32);

impl VarId {
    /// Returns the raw index of this variable.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

/// A finite `f64` usable as a hash key.
///
/// Stored as the bit pattern of the value. Negative zero is normalized to
/// zero, so `0.0` and `-0.0` intern to the same constant node.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Real(u64);

impl Real {
    /// Wraps a finite value; returns `None` for NaN or infinities.
    #[must_use]
    pub fn new(value: f64) -> Option<Self> {
        if value.is_finite() {
            let value = if value == 0.0 { 0.0 } else { value };
            Some(Self(value.to_bits()))
        } else {
            None
        }
    }

    /// Returns the wrapped value.
    #[must_use]
    pub fn get(self) -> f64 {
        f64::from_bits(self.0)
    }
}

/// Tags identifying the unary function node kinds.
///
/// `Invert`, `Negate`, `Square` and the conic radicals are internal
/// canonical forms produced by simplification and differentiation; the rest
/// correspond to user-facing elementary functions. `Erfc` is a distinct tag
/// so that `erfc(x)` never shares an interning slot with `erf(x)`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[allow(missing_docs)]
pub enum UnaryOp {
    Abs,
    Sgn,
    Sqrt,
    Cbrt,
    Exp,
    ExpM1,
    Log,
    Log1P,
    Sin,
    Cos,
    Tan,
    Sec,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Sech,
    Asinh,
    Acosh,
    Atanh,
    Erf,
    Erfc,
    /// Reciprocal `1/x`.
    Invert,
    /// Negation `-x`.
    Negate,
    /// Softplus integral, `-Li2(-exp x)`.
    SoftPP,
    /// Dilogarithm `Li2(x)`.
    Spence,
    /// `x^2`, kept as its own kind so squares stay compact.
    Square,
    /// `sqrt(x^2 - 1)`.
    XConic,
    /// `sqrt(x^2 + 1)`.
    YConic,
    /// `sqrt(1 - x^2)`.
    ZConic,
}

impl UnaryOp {
    /// The spelling used by infix printing for function-call forms.
    #[must_use]
    pub(crate) fn name(self) -> &'static str {
        match self {
            UnaryOp::Abs => "abs",
            UnaryOp::Sgn => "sgn",
            UnaryOp::Sqrt => "sqrt",
            UnaryOp::Cbrt => "cbrt",
            UnaryOp::Exp => "exp",
            UnaryOp::ExpM1 => "expm1",
            UnaryOp::Log => "log",
            UnaryOp::Log1P => "log1p",
            UnaryOp::Sin => "sin",
            UnaryOp::Cos => "cos",
            UnaryOp::Tan => "tan",
            UnaryOp::Sec => "sec",
            UnaryOp::Asin => "asin",
            UnaryOp::Acos => "acos",
            UnaryOp::Atan => "atan",
            UnaryOp::Sinh => "sinh",
            UnaryOp::Cosh => "cosh",
            UnaryOp::Tanh => "tanh",
            UnaryOp::Sech => "sech",
            UnaryOp::Asinh => "asinh",
            UnaryOp::Acosh => "acosh",
            UnaryOp::Atanh => "atanh",
            UnaryOp::Erf => "erf",
            UnaryOp::Erfc => "erfc",
            UnaryOp::Invert => "invert",
            UnaryOp::Negate => "negate",
            UnaryOp::SoftPP => "softpp",
            UnaryOp::Spence => "Li2",
            UnaryOp::Square => "square",
            UnaryOp::XConic => "xconic",
            UnaryOp::YConic => "yconic",
            UnaryOp::ZConic => "zconic",
        }
    }
}

/// An expression node stored in the context arena.
///
/// Nodes are immutable after construction and always refer to children that
/// were interned earlier, so the graph is acyclic by construction.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Node {
    /// Propagating not-a-number sentinel; absorbs every operation.
    Nan,
    /// A finite real constant.
    Constant(Real),
    /// A reference to a context variable.
    Variable(VarId),
    /// A unary function application.
    Unary(UnaryOp, ExprHandle),
    /// Sum of two subexpressions.
    Add(ExprHandle, ExprHandle),
    /// Product of two subexpressions.
    Mul(ExprHandle, ExprHandle),
    /// `base` raised to `exp`.
    Pow {
        /// The base of the power.
        base: ExprHandle,
        /// The exponent.
        exp: ExprHandle,
    },
}

impl Node {
    /// Returns true if this node has no children.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Nan | Node::Constant(_) | Node::Variable(_))
    }

    /// Returns the constant payload, if this is a constant node.
    #[must_use]
    pub fn constant_value(&self) -> Option<f64> {
        match self {
            Node::Constant(r) => Some(r.get()),
            _ => None,
        }
    }

    /// Returns the children of this node.
    #[must_use]
    pub fn children(&self) -> SmallVec<[ExprHandle; 2]> {
        match *self {
            Node::Nan | Node::Constant(_) | Node::Variable(_) => SmallVec::new(),
            Node::Unary(_, x) => smallvec::smallvec![x],
            Node::Add(a, b) | Node::Mul(a, b) => smallvec::smallvec![a, b],
            Node::Pow { base, exp } => smallvec::smallvec![base, exp],
        }
    }
}
