// Error types module

use std::fmt;

use crate::token::TokenError;

/// Top-level error for the command-line tool
///
/// Categorizes failures so the CLI can report them and pick an exit code.
#[derive(Debug)]
pub enum ImgveilError {
    /// Configuration errors (unreadable file, invalid YAML, failed validation)
    Config(String),

    /// Token construction or inspection failures
    Token(TokenError),

    /// Reading input or writing output failed
    Io(std::io::Error),

    /// Invalid command-line usage
    Usage(String),
}

impl fmt::Display for ImgveilError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImgveilError::Config(msg) => write!(f, "Configuration error: {}", msg),
            ImgveilError::Token(err) => write!(f, "Token error: {}", err),
            ImgveilError::Io(err) => write!(f, "I/O error: {}", err),
            ImgveilError::Usage(msg) => write!(f, "Usage error: {}", msg),
        }
    }
}

impl std::error::Error for ImgveilError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImgveilError::Token(err) => Some(err),
            ImgveilError::Io(err) => Some(err),
            ImgveilError::Config(_) | ImgveilError::Usage(_) => None,
        }
    }
}

impl From<TokenError> for ImgveilError {
    fn from(err: TokenError) -> Self {
        ImgveilError::Token(err)
    }
}

impl From<std::io::Error> for ImgveilError {
    fn from(err: std::io::Error) -> Self {
        ImgveilError::Io(err)
    }
}

impl ImgveilError {
    /// Process exit code (sysexits-style)
    pub fn exit_code(&self) -> i32 {
        match self {
            ImgveilError::Usage(_) => 64,
            ImgveilError::Token(err) if !err.is_fatal() => 65,
            ImgveilError::Token(_) => 70,
            ImgveilError::Io(_) => 74,
            ImgveilError::Config(_) => 78,
        }
    }
}
