use std::collections::HashMap;

/// Hands out `Prefix1`, `Prefix2`, … with one counter per prefix.
///
/// Owned by the caller, so two layouts never share counters.
#[derive(Debug, Clone, Default)]
pub struct ShapeNamer {
    counters: HashMap<String, usize>,
}

impl ShapeNamer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Next name for `prefix`.
    pub fn next(&mut self, prefix: &str) -> String {
        let count = self.counters.entry(prefix.to_owned()).or_insert(0);
        *count += 1;
        format!("{prefix}{count}")
    }

    /// Restarts every counter at 1.
    pub fn reset(&mut self) {
        self.counters.clear();
    }
}
