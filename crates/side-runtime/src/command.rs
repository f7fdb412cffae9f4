use std::fmt;
use std::sync::Arc;

use side_core::{Outcome, RuntimeError};

use crate::context::ExecutionContext;

/// One executable step of a recorded script.
///
/// Expected failures (an assertion that does not hold, an abort request) are
/// reported as an [`Outcome`]; `Err` is reserved for faults the command could
/// not anticipate, and the runner converts those to [`Outcome::Error`].
pub trait Command: fmt::Debug + Send + Sync {
    fn index(&self) -> usize;

    fn name(&self) -> &str;

    fn arg_templates(&self) -> &[String];

    /// Label commands report the marker they register in the owning
    /// sequence's label table; every other command returns `None`.
    fn label_marker(&self) -> Option<&str> {
        None
    }

    fn execute(
        &self,
        context: &mut ExecutionContext,
        args: &[String],
    ) -> Result<Outcome, RuntimeError>;
}

/// Instantiates a typed command from the raw (name, args) tuples a script
/// loader supplies. Resolved once at sequence-build time.
pub trait CommandFactory {
    fn new_command(
        &self,
        index: usize,
        name: &str,
        args: &[String],
    ) -> Result<Arc<dyn Command>, RuntimeError>;
}
