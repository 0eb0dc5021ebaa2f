//! Result type alias shared across the workspace.
//!
//! Defaults the error type to the common `EchoError`, so functions can simply
//! return `Result<T>`.
use crate::error::EchoError;

/// Workspace-wide `Result` alias with `EchoError` as the default error.
pub type Result<T, E = EchoError> = std::result::Result<T, E>;
