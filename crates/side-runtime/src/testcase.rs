use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::sync::Arc;

use side_core::{CommandRecord, Outcome, RuntimeError};
use tracing::debug;

use crate::command::{Command, CommandFactory};
use crate::context::ExecutionContext;
use crate::cursor::SequenceCursor;
use crate::sequence::CommandSequence;

/// One runnable script: a command sequence plus identity and the verdict of
/// its last run.
#[derive(Debug)]
pub struct TestCase {
    filename: Option<String>,
    base_name: String,
    name: String,
    base_url: String,
    sequence: CommandSequence,
    result: Outcome,
}

impl TestCase {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            filename: None,
            base_name: "nofile".to_string(),
            name: name.into(),
            base_url: String::new(),
            sequence: CommandSequence::new(),
            result: Outcome::Unexecuted,
        }
    }

    /// Identity taken from a script file: the base name is the filename stem
    /// and trailing slashes are stripped from the base URL.
    pub fn with_script(
        filename: impl Into<String>,
        name: impl Into<String>,
        base_url: &str,
    ) -> Self {
        let filename = filename.into();
        let base_name = Path::new(&filename)
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "nofile".to_string());
        Self {
            filename: Some(filename),
            base_name,
            name: name.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
            sequence: CommandSequence::new(),
            result: Outcome::Unexecuted,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn sequence(&self) -> &CommandSequence {
        &self.sequence
    }

    pub fn result(&self) -> &Outcome {
        &self.result
    }

    pub fn add_command(&mut self, command: Arc<dyn Command>) -> Result<usize, RuntimeError> {
        self.sequence.append(command)
    }

    pub fn add_new_command(
        &mut self,
        factory: &dyn CommandFactory,
        name: &str,
        args: &[String],
    ) -> Result<usize, RuntimeError> {
        let command = factory.new_command(self.sequence.len(), name, args)?;
        self.sequence.append(command)
    }

    /// Drives the whole run: empty sequences pass trivially; otherwise the
    /// cursor is installed in the context, each command's arguments are
    /// substituted and the per-command outcomes are folded into the verdict
    /// until the sequence ends or a terminal outcome is observed.
    pub fn execute(&mut self, context: &mut ExecutionContext) -> Outcome {
        if self.sequence.is_empty() {
            self.result = Outcome::Success;
            return self.result.clone();
        }

        context.set_current_test_case(self.name.clone());
        context.collections_mut().clear();
        // The log sink is scoped to one run; only the variable store may
        // carry state across cases.
        context.log_mut().clear();
        context.stop_watch_mut().start();
        context.set_cursor(SequenceCursor::new(Arc::new(self.sequence.clone())));

        loop {
            let command = match context.cursor_mut() {
                Ok(cursor) if cursor.has_next() => match cursor.next() {
                    Ok(command) => command,
                    Err(error) => {
                        self.update_result(Outcome::error(error.to_string()));
                        break;
                    }
                },
                Ok(_) => break,
                Err(error) => {
                    self.update_result(Outcome::error(error.to_string()));
                    break;
                }
            };

            let args = context.vars().substitute_all(command.arg_templates());
            let outcome = do_command(context, command.as_ref(), &args);
            debug!(
                index = command.index(),
                name = command.name(),
                outcome = %outcome,
                "command finished"
            );
            context.log_mut().record_command(CommandRecord {
                index: command.index(),
                name: command.name().to_string(),
                args,
                outcome: outcome.clone(),
            });

            self.update_result(outcome);
            if self.result.is_terminal() {
                break;
            }
            context.wait_speed();
        }

        context.take_cursor();
        context.stop_watch_mut().stop();
        self.result.clone()
    }

    fn update_result(&mut self, incoming: Outcome) {
        self.result = self.result.clone().combine(incoming);
    }
}

impl fmt::Display for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TestCase[{}]", self.name)?;
        if let Some(filename) = &self.filename {
            write!(f, " ({filename})")?;
        }
        Ok(())
    }
}

/// Fault-containment boundary around one command invocation: an `Err` return
/// or a panic becomes an error outcome, so a run always terminates with a
/// well-formed verdict.
fn do_command(
    context: &mut ExecutionContext,
    command: &dyn Command,
    args: &[String],
) -> Outcome {
    let invoked = panic::catch_unwind(AssertUnwindSafe(|| command.execute(context, args)));
    match invoked {
        Ok(Ok(outcome)) => outcome,
        Ok(Err(error)) => Outcome::error(error.to_string()),
        Err(payload) => Outcome::error(panic_text(payload.as_ref())),
    }
}

fn panic_text(payload: &(dyn Any + Send)) -> String {
    if let Some(text) = payload.downcast_ref::<&str>() {
        format!("command panicked: {text}")
    } else if let Some(text) = payload.downcast_ref::<String>() {
        format!("command panicked: {text}")
    } else {
        "command panicked".to_string()
    }
}
