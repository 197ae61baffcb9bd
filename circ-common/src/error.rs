//! Error handling for the CPS IR compiler
//! 
//! `CompilerError` is what the driver reports. Each stage keeps its own
//! precise error type and converts into this one at the crate boundary.

use thiserror::Error;

/// Top-level compiler error covering every stage of the pipeline
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompilerError {
    #[error("Lowering error: {message}")]
    LoweringError { message: String },

    #[error("Invalid CPS input: {message}")]
    InputError { message: String },

    #[error("IO error: {message}")]
    IoError { message: String },

    #[error("Internal compiler error: {message}")]
    InternalError { message: String },
}

impl CompilerError {
    /// Create an input error
    pub fn input_error(message: String) -> Self {
        CompilerError::InputError { message }
    }
}

/// Convert from std::io::Error
impl From<std::io::Error> for CompilerError {
    fn from(err: std::io::Error) -> Self {
        CompilerError::IoError {
            message: err.to_string(),
        }
    }
}

/// Convert from String (for simple error cases)
impl From<String> for CompilerError {
    fn from(message: String) -> Self {
        CompilerError::InternalError { message }
    }
}
