pub mod error;
pub mod log;
pub mod outcome;
pub mod stopwatch;

pub use error::RuntimeError;
pub use log::{CommandRecord, LogEntry, LogLevel, LogRecorder};
pub use outcome::Outcome;
pub use stopwatch::StopWatch;
