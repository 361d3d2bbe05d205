/// Comparison operator of a simple filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ge,
    Le,
    /// `~=`, treated as equality by relational backends
    Approx,
    /// SQL pattern match, produced when rewriting substring filters
    Like,
}

impl CompareOp {
    pub fn is_eq(self) -> bool {
        matches!(self, CompareOp::Eq)
    }
}
