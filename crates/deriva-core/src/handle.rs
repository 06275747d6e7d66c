//! Arena positions used as expression identities.

/// Position of an interned expression node in its
/// [`Context`](crate::Context).
///
/// A handle is a bare `u32` slot number, so copying one costs nothing and
/// a `Node` holding two of them stays small. Hash-consing is what makes
/// the number meaningful: the context never stores the same structure
/// twice, so comparing two handles from the same context answers "are
/// these the same expression?" exactly.
///
/// Handles sort by interning order (earlier nodes first); the commutative
/// constructors rely on that ordering to canonicalize their table keys.
/// There is no public constructor — the only way to obtain a handle is to
/// build an expression through a context.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct ExprHandle(u32);

impl ExprHandle {
    pub(crate) const fn new(slot: u32) -> Self {
        Self(slot)
    }

    /// The arena slot this handle refers to.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}
