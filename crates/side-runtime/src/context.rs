use std::thread;
use std::time::Duration;

use side_core::{LogRecorder, RuntimeError, StopWatch};

use crate::collections::CollectionStore;
use crate::cursor::SequenceCursor;
use crate::vars::VarStore;

/// Per-run mutable environment handed to every command for the duration of
/// one `execute` call.
///
/// The context owns the active cursor, both stores, the stopwatch, the log
/// sink and the configured inter-command delay. Nothing else holds ambient
/// references to any of these; commands reach them only through the `&mut`
/// they are passed. A caller may reuse one context across several test cases
/// to let the variable store span cases; the collection store and the log
/// sink are reset by the runner at the start of each case regardless.
#[derive(Debug, Default)]
pub struct ExecutionContext {
    current_test_case: Option<String>,
    cursor: Option<SequenceCursor>,
    vars: VarStore,
    collections: CollectionStore,
    stop_watch: StopWatch,
    log: LogRecorder,
    speed: Duration,
}

impl ExecutionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_speed(speed: Duration) -> Self {
        Self {
            speed,
            ..Self::default()
        }
    }

    pub fn current_test_case(&self) -> Option<&str> {
        self.current_test_case.as_deref()
    }

    pub fn set_current_test_case(&mut self, name: impl Into<String>) {
        self.current_test_case = Some(name.into());
    }

    pub fn cursor(&self) -> Option<&SequenceCursor> {
        self.cursor.as_ref()
    }

    /// Fails with [`RuntimeError::NoActiveCursor`] outside a running test
    /// case; flow-control commands surface that as an error outcome.
    pub fn cursor_mut(&mut self) -> Result<&mut SequenceCursor, RuntimeError> {
        self.cursor.as_mut().ok_or(RuntimeError::NoActiveCursor)
    }

    pub fn set_cursor(&mut self, cursor: SequenceCursor) {
        self.cursor = Some(cursor);
    }

    pub fn take_cursor(&mut self) -> Option<SequenceCursor> {
        self.cursor.take()
    }

    pub fn vars(&self) -> &VarStore {
        &self.vars
    }

    pub fn vars_mut(&mut self) -> &mut VarStore {
        &mut self.vars
    }

    pub fn collections(&self) -> &CollectionStore {
        &self.collections
    }

    pub fn collections_mut(&mut self) -> &mut CollectionStore {
        &mut self.collections
    }

    pub fn stop_watch(&self) -> &StopWatch {
        &self.stop_watch
    }

    pub fn stop_watch_mut(&mut self) -> &mut StopWatch {
        &mut self.stop_watch
    }

    pub fn log(&self) -> &LogRecorder {
        &self.log
    }

    pub fn log_mut(&mut self) -> &mut LogRecorder {
        &mut self.log
    }

    pub fn speed(&self) -> Duration {
        self.speed
    }

    pub fn set_speed(&mut self, speed: Duration) {
        self.speed = speed;
    }

    /// Inter-command delay; a zero speed never sleeps.
    pub fn wait_speed(&self) {
        if !self.speed.is_zero() {
            thread::sleep(self.speed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_mut_without_a_run_fails() {
        let mut context = ExecutionContext::new();
        let error = context.cursor_mut().expect_err("no cursor installed");
        assert_eq!(error, RuntimeError::NoActiveCursor);
    }

    #[test]
    fn zero_speed_does_not_sleep() {
        let context = ExecutionContext::new();
        let before = std::time::Instant::now();
        context.wait_speed();
        assert!(before.elapsed() < Duration::from_millis(50));
    }
}
