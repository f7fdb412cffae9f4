use std::sync::Arc;

use side_core::RuntimeError;

use crate::command::Command;
use crate::sequence::CommandSequence;

/// Stateful traversal pointer over one sequence for one run.
///
/// Linear advance via [`next`](Self::next) plus arbitrary jumps are what let
/// flow-control commands express loops, skips and branches without the
/// runner knowing about them. A jump takes effect at the next `next` call.
/// The cursor is exclusively owned by a single run and is not `Clone`.
#[derive(Debug)]
pub struct SequenceCursor {
    sequence: Arc<CommandSequence>,
    position: usize,
}

impl SequenceCursor {
    pub fn new(sequence: Arc<CommandSequence>) -> Self {
        Self {
            sequence,
            position: 0,
        }
    }

    pub fn has_next(&self) -> bool {
        self.position < self.sequence.len()
    }

    pub fn next(&mut self) -> Result<Arc<dyn Command>, RuntimeError> {
        if !self.has_next() {
            return Err(RuntimeError::CursorExhausted {
                position: self.position,
            });
        }
        let command = self.sequence.get(self.position)?.clone();
        self.position += 1;
        Ok(command)
    }

    /// Index the next `next` call will read from.
    pub fn current_index(&self) -> usize {
        self.position
    }

    /// Jumping to `len` is valid and means "skip to completion".
    pub fn jump_to_index(&mut self, index: usize) -> Result<(), RuntimeError> {
        if index > self.sequence.len() {
            return Err(RuntimeError::IndexOutOfRange {
                index,
                len: self.sequence.len(),
            });
        }
        self.position = index;
        Ok(())
    }

    /// On an unknown label the position is left unchanged.
    pub fn jump_to_label(&mut self, label: &str) -> Result<(), RuntimeError> {
        let index = self.sequence.resolve_label(label)?;
        self.position = index;
        Ok(())
    }
}
