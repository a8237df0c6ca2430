//! Error types for the audioswitch crates.
//!
//! The resolver itself never fails: empty queries, empty candidate lists
//! and hopeless inputs are all ordinary [`ResolutionResult`] values. These
//! errors exist for the facility boundary - the external tools that
//! enumerate and control devices.
//!
//! [`ResolutionResult`]: crate::matcher::ResolutionResult

use thiserror::Error;

/// Result type alias for audioswitch operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur at the audio facility boundary
#[derive(Debug, Error)]
pub enum Error {
    /// Required external tool is not installed
    #[error("`{tool}` not found. Install it via `{hint}`")]
    ToolMissing {
        /// Name of the missing executable
        tool: &'static str,
        /// Install hint shown to the user
        hint: &'static str,
    },

    /// External command ran but exited with a failure status
    #[error("{command} failed: {stderr}")]
    CommandFailed {
        /// The command that failed
        command: String,
        /// Trimmed stderr of the failed invocation
        stderr: String,
    },

    /// External command produced output we could not interpret
    #[error("unexpected output from {command}: {detail}")]
    UnexpectedOutput {
        /// The command whose output was rejected
        command: String,
        /// What was wrong with it
        detail: String,
    },

    /// Volume or mute control could not be reached on this system.
    /// Device switching keeps working when this is returned.
    #[error("{control} control is not available on this system (additional permissions may be required)")]
    ControlUnavailable {
        /// Which control surface is unavailable ("volume" or "mute")
        control: &'static str,
    },

    /// No audio output devices were reported by the directory
    #[error("no audio output devices found")]
    NoDevices,

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
