//! Per-connection state shared by the dispatcher and the renderers.

use indexmap::IndexSet;

use crate::render::LogCursor;

/// Chart ids that already have a listener, in discovery order.
///
/// Ids are only ever added; the registry lives as long as the connection.
#[derive(Debug, Clone, Default)]
pub struct DispatchRegistry {
    ids: IndexSet<String>,
}

impl DispatchRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `id`. Returns `false` if it was already registered.
    pub fn register(&mut self, id: &str) -> bool {
        if self.ids.contains(id) {
            return false;
        }
        self.ids.insert(id.to_string())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}

/// State for one stream, created when the stream starts.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub registry: DispatchRegistry,
    pub log_cursor: LogCursor,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn test_register_once() {
        let mut registry = DispatchRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.register("cpu"));
        assert!(!registry.register("cpu"));
        assert!(registry.register("mem"));
        assert_eq!(registry.len(), 2);
        assert!(registry.contains("cpu"));
        assert_eq!(registry.iter().collect::<Vec<_>>(), ["cpu", "mem"]);
    }
}
