//! Cross-cutting error types for the SDV platform.
//!
//! Domain-specific errors (`AuthError`, `GatewayError`, ...) live in their
//! respective crates. The binary converges them through `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any SDV crate.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// A string did not match any variant of an enumerated value.
    #[error("unknown {kind} '{value}'")]
    UnknownVariant { kind: &'static str, value: String },

    /// Data failed validation (missing fields, bad format).
    #[error("Validation error: {0}")]
    Validation(String),
}
