use std::collections::{BTreeMap, VecDeque};

use side_core::RuntimeError;

/// Named FIFO queues for passing values between commands.
///
/// Unlike the variable store, collections are cleared at the start of every
/// test-case run; they never carry state across cases.
#[derive(Debug, Clone, Default)]
pub struct CollectionStore {
    queues: BTreeMap<String, VecDeque<String>>,
}

impl CollectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Idempotent: re-creating an existing collection keeps its contents.
    pub fn create(&mut self, name: impl Into<String>) {
        self.queues.entry(name.into()).or_default();
    }

    /// Auto-creates the collection if absent.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.queues
            .entry(name.into())
            .or_default()
            .push_back(value.into());
    }

    pub fn poll(&mut self, name: &str) -> Result<String, RuntimeError> {
        self.queues
            .get_mut(name)
            .and_then(VecDeque::pop_front)
            .ok_or_else(|| RuntimeError::EmptyCollection {
                name: name.to_string(),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.queues.contains_key(name)
    }

    pub fn clear(&mut self) {
        self.queues.clear();
    }
}
