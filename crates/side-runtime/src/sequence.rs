use std::collections::BTreeMap;
use std::sync::Arc;

use side_core::RuntimeError;

use crate::command::Command;

/// Build-once, run-many ordered container of commands.
///
/// Indices are assigned at append time and equal the command's position.
/// Label markers are registered as they are appended; there is no removal.
#[derive(Debug, Clone, Default)]
pub struct CommandSequence {
    commands: Vec<Arc<dyn Command>>,
    labels: BTreeMap<String, usize>,
}

impl CommandSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, command: Arc<dyn Command>) -> Result<usize, RuntimeError> {
        let index = self.commands.len();
        if let Some(marker) = command.label_marker() {
            if let Some(&existing) = self.labels.get(marker) {
                return Err(RuntimeError::DuplicateLabel {
                    label: marker.to_string(),
                    index: existing,
                });
            }
            self.labels.insert(marker.to_string(), index);
        }
        self.commands.push(command);
        Ok(index)
    }

    pub fn get(&self, index: usize) -> Result<&Arc<dyn Command>, RuntimeError> {
        self.commands
            .get(index)
            .ok_or(RuntimeError::IndexOutOfRange {
                index,
                len: self.commands.len(),
            })
    }

    pub fn resolve_label(&self, name: &str) -> Result<usize, RuntimeError> {
        self.labels
            .get(name)
            .copied()
            .ok_or_else(|| RuntimeError::UnknownLabel {
                label: name.to_string(),
            })
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::CommandRegistry;
    use crate::command::CommandFactory;

    fn label(sequence: &mut CommandSequence, marker: &str) -> Result<usize, RuntimeError> {
        let registry = CommandRegistry::builtin();
        let command = registry.new_command(sequence.len(), "label", &[marker.to_string()])?;
        sequence.append(command)
    }

    #[test]
    fn append_assigns_positional_indices() {
        let registry = CommandRegistry::builtin();
        let mut sequence = CommandSequence::new();
        for expected in 0..3 {
            let command = registry
                .new_command(sequence.len(), "echo", &["hi".to_string()])
                .expect("command should build");
            let index = sequence.append(command).expect("append should pass");
            assert_eq!(index, expected);
        }
        assert_eq!(sequence.len(), 3);
        assert_eq!(sequence.get(1).expect("get should pass").index(), 1);
    }

    #[test]
    fn labels_resolve_to_their_own_index() {
        let mut sequence = CommandSequence::new();
        label(&mut sequence, "start").expect("label should append");
        let registry = CommandRegistry::builtin();
        let echo = registry
            .new_command(sequence.len(), "echo", &["hi".to_string()])
            .expect("command should build");
        sequence.append(echo).expect("append should pass");
        label(&mut sequence, "end").expect("label should append");

        assert_eq!(sequence.resolve_label("start").expect("resolve"), 0);
        assert_eq!(sequence.resolve_label("end").expect("resolve"), 2);
    }

    #[test]
    fn duplicate_labels_are_rejected() {
        let mut sequence = CommandSequence::new();
        label(&mut sequence, "loop").expect("label should append");
        let error = label(&mut sequence, "loop").expect_err("duplicate should fail");
        assert_eq!(
            error,
            RuntimeError::DuplicateLabel {
                label: "loop".to_string(),
                index: 0,
            }
        );
        // The failed append must not have grown the sequence.
        assert_eq!(sequence.len(), 1);
    }

    #[test]
    fn unknown_label_is_an_error() {
        let sequence = CommandSequence::new();
        let error = sequence
            .resolve_label("missing")
            .expect_err("unknown label should fail");
        assert_eq!(
            error,
            RuntimeError::UnknownLabel {
                label: "missing".to_string(),
            }
        );
    }

    #[test]
    fn get_out_of_range_is_an_error() {
        let sequence = CommandSequence::new();
        let error = sequence.get(0).expect_err("empty sequence has no commands");
        assert_eq!(error, RuntimeError::IndexOutOfRange { index: 0, len: 0 });
    }
}
