use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("STDIO error: {}", .0)]
    Stdio(#[from] std::io::Error),

    #[error("Input ended while waiting for an answer to `{}`", .prompt)]
    EndOfInput { prompt: String },

    #[error("Input interrupted by the user")]
    Interrupted,

    #[error("No menu entry named `{}`", .0)]
    EntryNotFound(String),

    #[error("Menu action `{}` failed: {}", .entry, .message)]
    Action { entry: String, message: String },

    #[error("Expected a {} answer, got `{}`", .expected, .found)]
    UnexpectedAnswer { expected: String, found: String },

    #[error("Invalid menu entry `{}`: expected `name=description`", .0)]
    EntryFormat(String),

    #[error("Found a non-unique menu entry name: `{}`", .0)]
    NonUniqueEntryName(String),

    #[error("Misc error: {}", .0)]
    Misc(String),
}

impl Error {
    pub fn end_of_input(prompt: &str) -> Self {
        Self::EndOfInput {
            prompt: prompt.trim_end().to_string(),
        }
    }

    pub fn action(entry: &str, message: impl Into<String>) -> Self {
        Self::Action {
            entry: entry.to_string(),
            message: message.into(),
        }
    }

    pub fn unexpected_answer(expected: &str, found: impl ToString) -> Self {
        Self::UnexpectedAnswer {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// Whether the error came from running out of input rather than a fault.
    #[must_use]
    pub fn is_end_of_input(&self) -> bool {
        matches!(self, Self::EndOfInput { .. })
    }
}
