//! CPS IR Compiler - Assembly Text Emission
//! 
//! This crate handles the final phase: rendering a lowered `Program` as the
//! line-oriented assembly text consumed by the virtual machine.

pub mod emit;

pub use emit::{emit_entry, emit_instruction, format_argument, render};

use circ_cps::CpsProgram;
use circ_ir::{lower_program, LoweringError};
use log::debug;

/// Main entry point: lower a CPS program and render it
pub fn compile(program: &CpsProgram) -> Result<String, LoweringError> {
    let ir = lower_program(program)?;
    let text = render(&ir);
    debug!("Rendered {} entries into {} bytes", ir.len(), text.len());
    Ok(text)
}
