//! Error types for medialoop-av.

use std::path::PathBuf;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while decoding, editing or encoding media.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required external tool is not available.
    #[error("tool not found: {tool}")]
    ToolNotFound { tool: String },

    /// An external tool failed to execute.
    #[error("Tool error [{tool}]: {message}")]
    Tool { tool: String, message: String },

    /// Media probing failed or returned unusable data.
    #[error("Probe error [{}]: {message}", path.display())]
    Probe { path: PathBuf, message: String },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid input provided by the caller.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A track with no samples was used where a length is required.
    #[error("track has zero length: {}", path.display())]
    EmptyTrack { path: PathBuf },

    /// Two tracks with different PCM layouts were combined.
    #[error(
        "format mismatch: {left_rate} Hz/{left_channels}ch vs {right_rate} Hz/{right_channels}ch"
    )]
    FormatMismatch {
        left_rate: u32,
        left_channels: u16,
        right_rate: u32,
        right_channels: u16,
    },
}

impl Error {
    /// Create a tool not found error.
    pub fn tool_not_found(tool: impl Into<String>) -> Self {
        Self::ToolNotFound { tool: tool.into() }
    }

    /// Create a tool execution failed error.
    pub fn tool(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Tool {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Create a probe error for the given file.
    pub fn probe(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Probe {
            path: path.into(),
            message: message.into(),
        }
    }
}
