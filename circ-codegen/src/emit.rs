//! Assembly text rendering
//! 
//! Labels are written as `<name>:` preceded by a blank line. Instructions
//! are indented four spaces and followed by their operand; `drop` and
//! `return` are written alone when they have none, every other missing
//! operand is written as `nil`.

use circ_ir::{Argument, Entry, Instruction, Program};

/// Format an operand, `nil` when absent
pub fn format_argument(argument: Option<&Argument>) -> String {
    match argument {
        Some(argument) => argument.to_string(),
        None => "nil".to_string(),
    }
}

/// Render one instruction line
pub fn emit_instruction(instruction: &Instruction) -> String {
    if instruction.mnemonic.takes_no_argument() && instruction.argument.is_none() {
        format!("    {}", instruction.mnemonic)
    } else {
        format!(
            "    {} {}",
            instruction.mnemonic,
            format_argument(instruction.argument.as_ref())
        )
    }
}

/// Render one entry; labels carry their leading blank line
pub fn emit_entry(entry: &Entry) -> String {
    match entry {
        Entry::Label(name) => format!("\n{}:", name),
        Entry::Instruction(instruction) => emit_instruction(instruction),
    }
}

/// Render a whole program
pub fn render(program: &Program) -> String {
    let lines: Vec<String> = program.entries().iter().map(emit_entry).collect();
    lines.join("\n").trim_start().to_string()
}
