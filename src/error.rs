//! Error types for the upload-and-restore operation.

use thiserror::Error;

use crate::config::ConfigError;
use crate::constants::{ALERT_ERROR_PREFIX, MSG_NO_FILE, MSG_RESTORATION_FAILED};

/// Errors that can occur while submitting an image for restoration.
#[derive(Error, Debug)]
pub enum RestoreError {
    /// The form was submitted without a file selected
    #[error("{}", MSG_NO_FILE)]
    NoFileSelected,

    /// The server answered with a non-success status
    #[error("{}", MSG_RESTORATION_FAILED)]
    RestorationFailed {
        /// HTTP status code returned by the server
        status: u16,
    },

    /// The selected file could not be read or packed into the upload
    #[error("{0}")]
    Payload(String),

    /// The request never produced a response
    #[error("{0}")]
    Network(String),

    /// The response body could not be consumed
    #[error("{0}")]
    Response(String),

    /// The restored image could not be handed to the display
    #[error("{0}")]
    Display(String),

    /// Another submission is still waiting for its response
    #[error("A restoration request is already in progress")]
    AlreadyInFlight,

    /// Configuration could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl RestoreError {
    /// Create a payload error with a message.
    pub fn payload(message: impl Into<String>) -> Self {
        Self::Payload(message.into())
    }

    /// Create a network error with a message.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Create a response error with a message.
    pub fn response(message: impl Into<String>) -> Self {
        Self::Response(message.into())
    }

    /// Create a display error with a message.
    pub fn display(message: impl Into<String>) -> Self {
        Self::Display(message.into())
    }

    /// Whether this error was raised before any request was attempted
    /// because the user had not chosen a file.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::NoFileSelected)
    }

    /// Text to show the user in an alert.
    ///
    /// Validation errors are shown verbatim, everything else carries the
    /// `Error: ` prefix.
    pub fn user_message(&self) -> String {
        if self.is_validation() {
            self.to_string()
        } else {
            format!("{}{}", ALERT_ERROR_PREFIX, self)
        }
    }
}
