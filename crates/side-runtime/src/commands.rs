use std::collections::BTreeMap;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use side_core::{Outcome, RuntimeError};

use crate::command::{Command, CommandFactory};
use crate::context::ExecutionContext;

/// Built-in command catalog: enough to exercise every engine path without a
/// live browser. Severity mapping: `verifyTrue`/`assertTrue` report soft
/// failures, only `exitTest` aborts the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinKind {
    Echo,
    Label,
    GotoLabel,
    GotoIf,
    Store,
    Pause,
    ExitTest,
    VerifyTrue,
    AssertTrue,
    AddCollection,
    AddToCollection,
    StoreFromCollection,
}

impl BuiltinKind {
    const ALL: [BuiltinKind; 12] = [
        Self::Echo,
        Self::Label,
        Self::GotoLabel,
        Self::GotoIf,
        Self::Store,
        Self::Pause,
        Self::ExitTest,
        Self::VerifyTrue,
        Self::AssertTrue,
        Self::AddCollection,
        Self::AddToCollection,
        Self::StoreFromCollection,
    ];

    pub fn command_name(self) -> &'static str {
        match self {
            Self::Echo => "echo",
            Self::Label => "label",
            Self::GotoLabel => "gotoLabel",
            Self::GotoIf => "gotoIf",
            Self::Store => "store",
            Self::Pause => "pause",
            Self::ExitTest => "exitTest",
            Self::VerifyTrue => "verifyTrue",
            Self::AssertTrue => "assertTrue",
            Self::AddCollection => "addCollection",
            Self::AddToCollection => "addToCollection",
            Self::StoreFromCollection => "storeFromCollection",
        }
    }

    fn arity(self) -> usize {
        match self {
            Self::ExitTest => 0,
            Self::Echo
            | Self::Label
            | Self::GotoLabel
            | Self::Pause
            | Self::VerifyTrue
            | Self::AssertTrue
            | Self::AddCollection => 1,
            Self::GotoIf
            | Self::Store
            | Self::AddToCollection
            | Self::StoreFromCollection => 2,
        }
    }
}

#[derive(Debug)]
struct BuiltinCommand {
    index: usize,
    kind: BuiltinKind,
    name: String,
    arg_templates: Vec<String>,
}

impl BuiltinCommand {
    fn create(
        kind: BuiltinKind,
        index: usize,
        name: &str,
        args: &[String],
    ) -> Result<Arc<dyn Command>, RuntimeError> {
        let expected = kind.arity();
        if args.len() != expected {
            return Err(RuntimeError::ArgumentCount {
                name: name.to_string(),
                expected,
                actual: args.len(),
            });
        }
        Ok(Arc::new(Self {
            index,
            kind,
            name: name.to_string(),
            arg_templates: args.to_vec(),
        }))
    }
}

fn is_truthy(text: &str) -> bool {
    text.trim().eq_ignore_ascii_case("true")
}

impl Command for BuiltinCommand {
    fn index(&self) -> usize {
        self.index
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn arg_templates(&self) -> &[String] {
        &self.arg_templates
    }

    fn label_marker(&self) -> Option<&str> {
        match self.kind {
            BuiltinKind::Label => Some(self.arg_templates[0].as_str()),
            _ => None,
        }
    }

    fn execute(
        &self,
        context: &mut ExecutionContext,
        args: &[String],
    ) -> Result<Outcome, RuntimeError> {
        // Arity was validated at construction and substitution preserves
        // argument count, so positional access below is in bounds.
        match self.kind {
            BuiltinKind::Echo => {
                context.log_mut().info(args[0].clone());
                Ok(Outcome::Success)
            }
            BuiltinKind::Label => Ok(Outcome::Success),
            BuiltinKind::GotoLabel => {
                context.cursor_mut()?.jump_to_label(&args[0])?;
                Ok(Outcome::Success)
            }
            BuiltinKind::GotoIf => {
                if is_truthy(&args[0]) {
                    context.cursor_mut()?.jump_to_label(&args[1])?;
                }
                Ok(Outcome::Success)
            }
            BuiltinKind::Store => {
                context.vars_mut().set(args[1].clone(), args[0].clone());
                Ok(Outcome::Success)
            }
            BuiltinKind::Pause => {
                let millis = args[0].trim().parse::<u64>().map_err(|parse_error| {
                    RuntimeError::InvalidArgument {
                        name: self.name.clone(),
                        message: format!("\"{}\" is not a millisecond count: {parse_error}", args[0]),
                    }
                })?;
                thread::sleep(Duration::from_millis(millis));
                Ok(Outcome::Success)
            }
            BuiltinKind::ExitTest => Ok(Outcome::aborted("exitTest requested")),
            BuiltinKind::VerifyTrue | BuiltinKind::AssertTrue => {
                if is_truthy(&args[0]) {
                    Ok(Outcome::Success)
                } else {
                    Ok(Outcome::failure(format!(
                        "expected \"true\" but got \"{}\"",
                        args[0]
                    )))
                }
            }
            BuiltinKind::AddCollection => {
                context.collections_mut().create(args[0].clone());
                Ok(Outcome::Success)
            }
            BuiltinKind::AddToCollection => {
                context
                    .collections_mut()
                    .push(args[0].clone(), args[1].clone());
                Ok(Outcome::Success)
            }
            BuiltinKind::StoreFromCollection => {
                let value = context.collections_mut().poll(&args[0])?;
                context.vars_mut().set(args[1].clone(), value);
                Ok(Outcome::Success)
            }
        }
    }
}

pub type CommandConstructor =
    Box<dyn Fn(usize, &str, &[String]) -> Result<Arc<dyn Command>, RuntimeError> + Send + Sync>;

/// Name→constructor registry behind the [`CommandFactory`] seam.
///
/// Command names are resolved here once, at sequence-build time; plugins add
/// their own constructors with [`register`](Self::register).
#[derive(Default)]
pub struct CommandRegistry {
    constructors: BTreeMap<String, CommandConstructor>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with the built-in catalog.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for kind in BuiltinKind::ALL {
            registry.register(
                kind.command_name(),
                Box::new(move |index, name, args| BuiltinCommand::create(kind, index, name, args)),
            );
        }
        registry
    }

    pub fn register(&mut self, name: impl Into<String>, constructor: CommandConstructor) {
        self.constructors.insert(name.into(), constructor);
    }
}

impl CommandFactory for CommandRegistry {
    fn new_command(
        &self,
        index: usize,
        name: &str,
        args: &[String],
    ) -> Result<Arc<dyn Command>, RuntimeError> {
        let constructor = self
            .constructors
            .get(name)
            .ok_or_else(|| RuntimeError::UnknownCommand {
                name: name.to_string(),
            })?;
        constructor(index, name, args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| (*value).to_string()).collect()
    }

    #[test]
    fn unknown_command_names_are_rejected_at_build_time() {
        let registry = CommandRegistry::builtin();
        let error = registry
            .new_command(0, "clickAndHope", &args(&["locator"]))
            .expect_err("unknown name should fail");
        assert_eq!(
            error,
            RuntimeError::UnknownCommand {
                name: "clickAndHope".to_string(),
            }
        );
    }

    #[test]
    fn arity_is_checked_at_build_time() {
        let registry = CommandRegistry::builtin();
        let error = registry
            .new_command(0, "store", &args(&["value-only"]))
            .expect_err("missing variable name should fail");
        assert_eq!(
            error,
            RuntimeError::ArgumentCount {
                name: "store".to_string(),
                expected: 2,
                actual: 1,
            }
        );
    }

    #[test]
    fn echo_appends_to_the_log() {
        let registry = CommandRegistry::builtin();
        let command = registry
            .new_command(0, "echo", &args(&["hello"]))
            .expect("command should build");
        let mut context = ExecutionContext::new();
        let outcome = command
            .execute(&mut context, &args(&["hello"]))
            .expect("execute should pass");
        assert!(outcome.is_success());
        assert_eq!(context.log().entries()[0].message, "hello");
    }

    #[test]
    fn store_writes_the_variable() {
        let registry = CommandRegistry::builtin();
        let command = registry
            .new_command(0, "store", &args(&["42", "answer"]))
            .expect("command should build");
        let mut context = ExecutionContext::new();
        command
            .execute(&mut context, &args(&["42", "answer"]))
            .expect("execute should pass");
        assert_eq!(context.vars().get("answer"), "42");
    }

    #[test]
    fn assert_true_reports_a_soft_failure() {
        let registry = CommandRegistry::builtin();
        let command = registry
            .new_command(0, "assertTrue", &args(&["${flag}"]))
            .expect("command should build");
        let mut context = ExecutionContext::new();
        let outcome = command
            .execute(&mut context, &args(&["false"]))
            .expect("execute should pass");
        assert_eq!(
            outcome,
            Outcome::failure("expected \"true\" but got \"false\"")
        );
        assert!(!outcome.is_terminal());
    }

    #[test]
    fn exit_test_aborts() {
        let registry = CommandRegistry::builtin();
        let command = registry
            .new_command(0, "exitTest", &args(&[]))
            .expect("command should build");
        let mut context = ExecutionContext::new();
        let outcome = command
            .execute(&mut context, &[])
            .expect("execute should pass");
        assert!(outcome.is_terminal());
    }

    #[test]
    fn goto_outside_a_run_is_a_fault() {
        let registry = CommandRegistry::builtin();
        let command = registry
            .new_command(0, "gotoLabel", &args(&["loop"]))
            .expect("command should build");
        let mut context = ExecutionContext::new();
        let error = command
            .execute(&mut context, &args(&["loop"]))
            .expect_err("no cursor should fail");
        assert_eq!(error, RuntimeError::NoActiveCursor);
    }

    #[test]
    fn pause_rejects_a_non_numeric_delay() {
        let registry = CommandRegistry::builtin();
        let command = registry
            .new_command(0, "pause", &args(&["${delay}"]))
            .expect("command should build");
        let mut context = ExecutionContext::new();
        let error = command
            .execute(&mut context, &args(&["soon"]))
            .expect_err("non-numeric delay should fail");
        assert!(matches!(error, RuntimeError::InvalidArgument { .. }));
    }

    #[test]
    fn truthiness_ignores_case_and_padding() {
        assert!(is_truthy("true"));
        assert!(is_truthy(" TRUE "));
        assert!(!is_truthy("false"));
        assert!(!is_truthy("1"));
        assert!(!is_truthy(""));
    }
}
