#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Reject single-quoted strings and explicit `+` signs.
    pub strict: bool,
    pub max_depth: Option<usize>,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }
}
