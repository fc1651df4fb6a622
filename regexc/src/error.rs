//! The unified fallible-pipeline error type.
//!
//! Every stage of the compiler returns [`CompileResult`] rather than panicking on malformed
//! input. There is a single sink for parse failures (mirroring the source tool's `reject`),
//! but unlike that tool's `errx`-and-exit call, rejection here is an ordinary [`Result::Err`]
//! that unwinds out of the parser through `?` and is only turned into a process exit by a host.

use std::fmt;

/// A single error produced anywhere in the compilation pipeline.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CompileError {
    /// A disallowed byte, bad escape, or bad hex digit.
    #[error("lexical error at byte {pos}: {msg}")]
    Lexical { pos: usize, msg: String },

    /// A malformed production: mismatched bracket, empty class, bad range, unresolved
    /// reference, unexpected terminator.
    #[error("syntax error at byte {pos} (while parsing {production}): {msg}")]
    Syntactic {
        pos: usize,
        production: &'static str,
        msg: String,
    },

    /// Failure to allocate or open an external resource (an output file, typically).
    #[error("resource error: {0}")]
    Resource(String),

    /// Something the implementation asserts can't happen, happened.
    #[error("internal error: {0}")]
    Internal(String),
}

impl CompileError {
    pub fn lexical(pos: usize, msg: impl Into<String>) -> Self {
        CompileError::Lexical { pos, msg: msg.into() }
    }

    pub fn syntactic(pos: usize, production: &'static str, msg: impl Into<String>) -> Self {
        CompileError::Syntactic {
            pos,
            production,
            msg: msg.into(),
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        CompileError::Internal(msg.into())
    }
}

/// Renders the byte position a [`CompileError`] occurred at, for callers that want to print
/// their own diagnostic prefix (the CLI driver uses this to match `reject`'s "Rejected at char
/// N" framing).
impl CompileError {
    pub fn position(&self) -> Option<usize> {
        match self {
            CompileError::Lexical { pos, .. } => Some(*pos),
            CompileError::Syntactic { pos, .. } => Some(*pos),
            CompileError::Resource(_) | CompileError::Internal(_) => None,
        }
    }
}

/// Convenience alias used throughout the pipeline.
pub type CompileResult<T> = Result<T, CompileError>;

/// A tiny wrapper so `CompileError` can also carry an arbitrary `Display`-able cause without
/// pulling in `anyhow` for a single call site (the CLI's file-open error path).
pub fn resource_err(cause: impl fmt::Display) -> CompileError {
    CompileError::Resource(cause.to_string())
}
