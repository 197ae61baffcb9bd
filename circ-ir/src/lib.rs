//! CPS IR Compiler - Intermediate Representation
//! 
//! This crate defines the linear stack-machine IR (labels and flat
//! instructions) and lowers CPS trees into it. Lambda bodies are lifted into
//! independently labeled blocks, conditionals become explicit jumps, and
//! builtin calls resolve to dedicated instructions.

pub mod builtins;
pub mod error;
pub mod ir;
pub mod lower;
pub mod naming;

pub use builtins::BUILTINS;
pub use error::LoweringError;
pub use ir::{Argument, Entry, Instruction, Mnemonic, Program};
pub use lower::{
    lower_block, lower_expression, lower_program, lower_statement, strip_trailing_drop, Lowered,
};
pub use naming::{escape_name, ConditionalLabels, NameCounters};

/// Label of the top-level entry point
pub const MAIN_LABEL: &str = "__main__";

/// Base name for lambdas without a source name
pub const ANONYMOUS_LAMBDA_NAME: &str = "__lambda__";

/// Counter key used for conditional tags
pub const IF_COUNTER_KEY: &str = "if";
