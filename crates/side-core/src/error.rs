use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    #[error("Label \"{label}\" is not registered in this sequence.")]
    UnknownLabel { label: String },
    #[error("Label \"{label}\" is already registered at index {index}.")]
    DuplicateLabel { label: String, index: usize },
    #[error("Index {index} is out of range for a sequence of length {len}.")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("Cursor is exhausted at position {position}.")]
    CursorExhausted { position: usize },
    #[error("Collection \"{name}\" is empty or was never created.")]
    EmptyCollection { name: String },
    #[error("No cursor is active; flow control requires a running test case.")]
    NoActiveCursor,
    #[error("Command \"{name}\" is not registered.")]
    UnknownCommand { name: String },
    #[error("Command \"{name}\" expects {expected} argument(s), got {actual}.")]
    ArgumentCount {
        name: String,
        expected: usize,
        actual: usize,
    },
    #[error("Command \"{name}\": invalid argument: {message}")]
    InvalidArgument { name: String, message: String },
}
