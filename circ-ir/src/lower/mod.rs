//! CPS to stack IR lowering
//! 
//! Every lowering function returns a `Lowered`: the closure entries (lifted
//! lambda bodies, each a label followed by its code) discovered anywhere in
//! the subtree, and the instructions to run in place.
//! 
//! Stack discipline: an expression's instructions push exactly one value.
//! An expression statement ends in `drop`, assignments and initializations
//! end in `pop`, so statement code leaves the stack as it found it. Push
//! statements deliberately leave their value behind for a following call.

mod block;
mod expressions;
mod statements;

pub use block::{lower_block, strip_trailing_drop};
pub use expressions::lower_expression;
pub use statements::lower_statement;

use crate::error::LoweringError;
use crate::ir::{Entry, Instruction, Mnemonic, Program};
use crate::naming::NameCounters;
use crate::MAIN_LABEL;
use circ_cps::CpsProgram;
use log::info;

/// Result of lowering one node
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Lowered {
    pub closure_entries: Vec<Entry>,
    pub instructions: Vec<Entry>,
}

impl Lowered {
    pub fn new() -> Self {
        Self::default()
    }

    /// A single in-place instruction and no closure entries
    pub fn single(instruction: Instruction) -> Self {
        Self {
            closure_entries: Vec::new(),
            instructions: vec![instruction.into()],
        }
    }

    pub fn push(&mut self, instruction: Instruction) {
        self.instructions.push(instruction.into());
    }

    /// Concatenate `other` after `self`, both closure entries and code
    pub fn append(&mut self, other: Lowered) {
        self.closure_entries.extend(other.closure_entries);
        self.instructions.extend(other.instructions);
    }
}

/// Lower a whole CPS program
/// 
/// Output order: every closure entry in discovery order, then `__main__`,
/// then the top-level code in source order, then `end`.
pub fn lower_program(program: &CpsProgram) -> Result<Program, LoweringError> {
    info!("Lowering program with {} top-level statements", program.statements.len());

    let mut counters = NameCounters::new();
    let mut closure_entries = Vec::new();
    let mut main_instructions = Vec::new();

    for statement in &program.statements {
        let lowered = lower_statement(&mut counters, statement)?;
        closure_entries.extend(lowered.closure_entries);
        main_instructions.extend(lowered.instructions);
    }

    let mut entry_list = closure_entries;
    entry_list.push(Entry::label(MAIN_LABEL));
    entry_list.extend(main_instructions);
    entry_list.push(Instruction::bare(Mnemonic::End).into());

    let program = Program::new(entry_list);
    info!(
        "Lowering complete: {} entries, {} labels",
        program.len(),
        program.labels().count()
    );
    Ok(program)
}
