use std::time::{Duration, Instant};

/// Elapsed-time tracker for one run. Reading the duration while the watch is
/// still running reports the time elapsed so far.
#[derive(Debug, Default, Clone)]
pub struct StopWatch {
    started_at: Option<Instant>,
    recorded: Option<Duration>,
}

impl StopWatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self) {
        self.started_at = Some(Instant::now());
        self.recorded = None;
    }

    pub fn stop(&mut self) {
        if let Some(started_at) = self.started_at.take() {
            self.recorded = Some(started_at.elapsed());
        }
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn duration(&self) -> Option<Duration> {
        match (self.started_at, self.recorded) {
            (Some(started_at), _) => Some(started_at.elapsed()),
            (None, recorded) => recorded,
        }
    }
}
