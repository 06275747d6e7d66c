//! Infix printing.
//!
//! Parentheses appear only where the outer operator would otherwise change
//! meaning: sums inside products and powers, products inside powers, and
//! negated sums.

use std::fmt;

use crate::context::Context;
use crate::handle::ExprHandle;
use crate::node::{Node, UnaryOp};

/// Borrowed display adapter returned by [`Context::display`].
pub struct DisplayExpr<'a> {
    ctx: &'a Context,
    handle: ExprHandle,
}

impl Context {
    /// Renders `e` in infix form.
    #[must_use]
    pub fn display(&self, e: ExprHandle) -> DisplayExpr<'_> {
        DisplayExpr {
            ctx: self,
            handle: e,
        }
    }
}

impl fmt::Display for DisplayExpr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_expr(self.ctx, self.handle, f)
    }
}

impl fmt::Debug for DisplayExpr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_expr(self.ctx, self.handle, f)
    }
}

fn write_expr(ctx: &Context, e: ExprHandle, out: &mut fmt::Formatter<'_>) -> fmt::Result {
    match *ctx.node(e) {
        Node::Nan => write!(out, "nan"),
        Node::Constant(r) => write!(out, "{}", r.get()),
        Node::Variable(id) => write!(out, "{}", ctx.var_name(id)),
        Node::Unary(UnaryOp::Invert, x) => {
            write!(out, "1/(")?;
            write_expr(ctx, x, out)?;
            write!(out, ")")
        }
        Node::Unary(UnaryOp::Negate, x) => {
            write!(out, "-")?;
            let parens = matches!(ctx.node(x), Node::Add(_, _));
            maybe_parens(ctx, x, parens, out)
        }
        Node::Unary(UnaryOp::Square, x) => {
            let parens = matches!(ctx.node(x), Node::Add(_, _) | Node::Mul(_, _));
            maybe_parens(ctx, x, parens, out)?;
            write!(out, "^2")
        }
        Node::Unary(op, x) => {
            write!(out, "{}(", op.name())?;
            write_expr(ctx, x, out)?;
            write!(out, ")")
        }
        Node::Add(a, b) => {
            write_expr(ctx, a, out)?;
            write!(out, "+")?;
            write_expr(ctx, b, out)
        }
        Node::Mul(a, b) => {
            let pa = needs_parens_in_mul(ctx, a);
            maybe_parens(ctx, a, pa, out)?;
            write!(out, "*")?;
            let pb = needs_parens_in_mul(ctx, b);
            maybe_parens(ctx, b, pb, out)
        }
        Node::Pow { base, exp } => {
            let pb = needs_parens_in_pow(ctx, base);
            maybe_parens(ctx, base, pb, out)?;
            write!(out, "^")?;
            let pe = needs_parens_in_pow(ctx, exp);
            maybe_parens(ctx, exp, pe, out)
        }
    }
}

fn needs_parens_in_mul(ctx: &Context, e: ExprHandle) -> bool {
    matches!(ctx.node(e), Node::Add(_, _) | Node::Pow { .. })
}

fn needs_parens_in_pow(ctx: &Context, e: ExprHandle) -> bool {
    matches!(
        ctx.node(e),
        Node::Add(_, _) | Node::Mul(_, _) | Node::Pow { .. }
    )
}

fn maybe_parens(
    ctx: &Context,
    e: ExprHandle,
    parens: bool,
    out: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    if parens {
        write!(out, "(")?;
        write_expr(ctx, e, out)?;
        write!(out, ")")
    } else {
        write_expr(ctx, e, out)
    }
}
