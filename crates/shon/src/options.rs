/// Options shared by every decode entry point.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    /// Keep the exact literal text of numbers decoded into the dynamic
    /// destination ([`crate::Value`]) instead of converting them to an
    /// `i64` or `f64`.
    pub preserve_numeric_literal: bool,
}

impl Options {
    pub fn with_preserve_numeric_literal(mut self, yes: bool) -> Self {
        self.preserve_numeric_literal = yes;
        self
    }
}
