pub mod collections;
pub mod command;
pub mod commands;
pub mod context;
pub mod cursor;
pub mod sequence;
pub mod suite;
pub mod testcase;
pub mod vars;

pub use collections::CollectionStore;
pub use command::{Command, CommandFactory};
pub use commands::{BuiltinKind, CommandRegistry};
pub use context::ExecutionContext;
pub use cursor::SequenceCursor;
pub use sequence::CommandSequence;
pub use suite::TestSuite;
pub use testcase::TestCase;
pub use vars::VarStore;
