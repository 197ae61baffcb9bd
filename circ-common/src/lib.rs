//! CPS IR Compiler - Common Types and Utilities
//! 
//! This crate contains the error type and source location tracking shared
//! by every stage of the CPS-to-stack-IR backend.

pub mod error;
pub mod source_loc;

pub use error::CompilerError;
pub use source_loc::SourceLocation;
