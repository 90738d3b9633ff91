//! Error type for help rendering and dispatch.

use thiserror::Error;

/// Errors surfaced by help dispatch.
///
/// External probe failures during documentation walks never show up here;
/// they degrade to the next probe or a placeholder entry instead.
#[derive(Debug, Error)]
pub enum HelpError {
    #[error("{path}: unknown command or topic \"{segment}\"")]
    UnknownCommand { path: String, segment: String },

    #[error("exit code {0}")]
    ExitCode(i32),

    #[error("failed to launch {program}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("unknown style \"{0}\"")]
    InvalidStyle(String),

    #[error("invalid help flag: {0}")]
    InvalidFlag(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("formatting help output")]
    Format(#[from] std::fmt::Error),
}

impl HelpError {
    /// Process exit code matching this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            HelpError::UnknownCommand { .. }
            | HelpError::InvalidStyle(_)
            | HelpError::InvalidFlag(_) => 2,
            HelpError::ExitCode(code) => *code,
            _ => 1,
        }
    }

    /// True for errors that were reported together with usage text.
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            HelpError::UnknownCommand { .. } | HelpError::InvalidStyle(_) | HelpError::InvalidFlag(_)
        )
    }
}
