//! Error types for tool execution.

use crate::client::UpstreamError;
use thiserror::Error;

/// Errors raised inside an adapter before they are folded into the
/// envelope.
///
/// The variants follow the shared taxonomy: input format faults, upstream
/// faults, empty-result conditions, and a catch-all. Adapters translate
/// these into their own wording; none of them propagate past `execute`.
#[derive(Debug, Error)]
pub enum ToolError {
    /// A date argument did not match the required `mm/dd/yy` format.
    #[error("Invalid date '{value}': expected mm/dd/yy format (e.g. '12/13/25')")]
    DateFormat {
        /// The rejected input.
        value: String,
    },

    /// A required argument was absent or of the wrong type.
    #[error("Missing required argument '{name}'")]
    MissingArgument {
        /// Name of the absent argument.
        name: String,
    },

    /// A tool with the same name is already registered.
    #[error("Tool already registered: {name}")]
    DuplicateName {
        /// Name of the duplicate tool.
        name: String,
    },

    /// The upstream service failed.
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    /// The upstream succeeded but had nothing matching; the message is
    /// already domain-specific.
    #[error("{0}")]
    Empty(String),
}

impl ToolError {
    /// Create a DateFormat error for the given input.
    pub fn date_format(value: impl Into<String>) -> Self {
        Self::DateFormat {
            value: value.into(),
        }
    }

    /// Create a MissingArgument error.
    pub fn missing_argument(name: impl Into<String>) -> Self {
        Self::MissingArgument { name: name.into() }
    }

    /// Create a DuplicateName error.
    pub fn duplicate_name(name: impl Into<String>) -> Self {
        Self::DuplicateName { name: name.into() }
    }

    /// Create an Empty error with a domain-specific message.
    pub fn empty(message: impl Into<String>) -> Self {
        Self::Empty(message.into())
    }
}
