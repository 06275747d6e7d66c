//! Substitution and batch assignment.

use hashbrown::HashMap;

use crate::context::Context;
use crate::error::Error;
use crate::handle::ExprHandle;
use crate::node::{Node, VarId};

impl Context {
    /// Replaces every referenced variable by its paired expression.
    ///
    /// The substitution runs through the smart constructors, so the result
    /// is fully simplified. All handles must belong to this context;
    /// expressions never migrate between contexts.
    pub fn bind(&mut self, e: ExprHandle, subs: &[(VarId, ExprHandle)]) -> ExprHandle {
        let mut memo = HashMap::new();
        self.bind_memo(e, subs, &mut memo)
    }

    fn bind_memo(
        &mut self,
        e: ExprHandle,
        subs: &[(VarId, ExprHandle)],
        memo: &mut HashMap<ExprHandle, ExprHandle>,
    ) -> ExprHandle {
        if let Some(&r) = memo.get(&e) {
            return r;
        }
        let node = *self.node(e);
        let r = match node {
            Node::Nan | Node::Constant(_) => e,
            Node::Variable(id) => subs
                .iter()
                .find(|&&(v, _)| v == id)
                .map_or(e, |&(_, replacement)| replacement),
            Node::Unary(op, x) => {
                let bx = self.bind_memo(x, subs, memo);
                self.apply(op, bx)
            }
            Node::Add(f, g) => {
                let bf = self.bind_memo(f, subs, memo);
                let bg = self.bind_memo(g, subs, memo);
                self.add(bf, bg)
            }
            Node::Mul(f, g) => {
                let bf = self.bind_memo(f, subs, memo);
                let bg = self.bind_memo(g, subs, memo);
                self.mul(bf, bg)
            }
            Node::Pow { base, exp } => {
                let bb = self.bind_memo(base, subs, memo);
                let be = self.bind_memo(exp, subs, memo);
                self.pow(bb, be)
            }
        };
        memo.insert(e, r);
        r
    }

    /// Binds a single variable to a concrete number.
    pub fn bind_value(&mut self, e: ExprHandle, var: VarId, value: f64) -> ExprHandle {
        let c = self.constant(value);
        self.bind(e, &[(var, c)])
    }

    /// Evaluates every right-hand side under the current bindings, then
    /// writes all results back — the primitive behind simultaneous gradient
    /// updates without sequencing hazards.
    ///
    /// # Errors
    ///
    /// If any right-hand side evaluates non-finite, nothing is written.
    pub fn atomic_assign(&mut self, pairs: &[(VarId, ExprHandle)]) -> Result<(), Error> {
        let snapshot: Vec<f64> = pairs.iter().map(|&(_, rhs)| self.evaluate(rhs)).collect();
        for (&(var, _), &value) in pairs.iter().zip(&snapshot) {
            if !value.is_finite() {
                return Err(Error::NonFiniteAssignment {
                    name: self.var_name(var),
                    value,
                });
            }
        }
        for (&(var, _), &value) in pairs.iter().zip(&snapshot) {
            self.vars[var.index() as usize].value = value;
        }
        self.touch();
        Ok(())
    }
}
