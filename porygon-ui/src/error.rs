//! UI engine error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the frame engine and by component render code.
///
/// Usage errors (`NotInFrame`, `FrameAlreadyActive`, `DuplicateChild`,
/// `UnbalancedContainers`, `ContainerUnderflow`) indicate a programming
/// error in the caller. Layout itself never fails.
#[derive(Debug, Error)]
pub enum UiError {
    #[error("{operation} called outside begin_frame/end_frame")]
    NotInFrame { operation: &'static str },

    #[error("begin_frame called while a frame is already active")]
    FrameAlreadyActive,

    #[error("a sibling named '{name}' with the same id is already attached")]
    DuplicateChild { name: String },

    #[error("frame ended with {depth} container(s) still open")]
    UnbalancedContainers { depth: usize },

    #[error("end_container called with no open container")]
    ContainerUnderflow,

    #[error("component '{name}' failed to render: {message}")]
    Component { name: String, message: String },

    #[error("theme error: {0}")]
    Theme(#[from] ThemeError),
}

impl UiError {
    /// Convenience constructor for component render failures.
    pub fn component(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Component {
            name: name.into(),
            message: message.into(),
        }
    }
}

/// Errors loading or saving a theme file.
#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("failed to read theme {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid theme json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown built-in theme: {0}")]
    Unknown(String),
}

pub type Result<T, E = UiError> = std::result::Result<T, E>;
