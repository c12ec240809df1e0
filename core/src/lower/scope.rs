/// Stack of "current instance" names active during the traversal.
///
/// Pushes and pops are strictly paired around each node's
/// property-processing phase; the driver asserts the stack is empty again
/// once the pass returns, even when errors were recorded mid-traversal.
#[derive(Debug, Clone, Default)]
pub struct ScopeStack {
    names: Vec<String>,
}

impl ScopeStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>) {
        self.names.push(name.into());
    }

    pub fn pop(&mut self) -> Option<String> {
        self.names.pop()
    }

    pub fn current(&self) -> Option<&str> {
        self.names.last().map(|s| s.as_str())
    }

    pub fn depth(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
