use std::fmt;

use serde::{Deserialize, Serialize};

/// Verdict of one command invocation, or of a whole run once folded.
///
/// The five kinds are strictly ordered by severity. `Unexecuted` is the
/// pre-run sentinel and is never produced by an invoked command; `Aborted`
/// is the only terminal kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Outcome {
    #[default]
    Unexecuted,
    Success,
    Failure { message: String },
    Error { message: String },
    Aborted { message: String },
}

impl Outcome {
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure {
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    pub fn aborted(message: impl Into<String>) -> Self {
        Self::Aborted {
            message: message.into(),
        }
    }

    pub fn severity(&self) -> u8 {
        match self {
            Self::Unexecuted => 0,
            Self::Success => 1,
            Self::Failure { .. } => 2,
            Self::Error { .. } => 3,
            Self::Aborted { .. } => 4,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Terminal outcomes stop the enclosing run at the next fold.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Aborted { .. })
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Unexecuted | Self::Success => None,
            Self::Failure { message } | Self::Error { message } | Self::Aborted { message } => {
                Some(message.as_str())
            }
        }
    }

    /// Keeps the higher-severity outcome; the incoming one wins ties so the
    /// newest message survives.
    pub fn combine(self, incoming: Outcome) -> Outcome {
        if incoming.severity() >= self.severity() {
            incoming
        } else {
            self
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Unexecuted => "unexecuted",
            Self::Success => "success",
            Self::Failure { .. } => "failure",
            Self::Error { .. } => "error",
            Self::Aborted { .. } => "aborted",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.message() {
            Some(message) => write!(f, "{}: {}", self.kind_name(), message),
            None => f.write_str(self.kind_name()),
        }
    }
}
