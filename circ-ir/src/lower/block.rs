//! Statement blocks embedded in lambda bodies and conditional arms

use super::{lower_statement, Lowered};
use crate::error::LoweringError;
use crate::ir::Entry;
use crate::naming::NameCounters;
use circ_common::SourceLocation;
use circ_cps::Statement;

/// Lower statements in order and concatenate the results
/// 
/// For a well-formed block the instructions end in the `drop` of its last
/// statement.
pub fn lower_block(
    counters: &mut NameCounters,
    statements: &[Statement],
) -> Result<Lowered, LoweringError> {
    let mut block = Lowered::new();
    for statement in statements {
        block.append(lower_statement(counters, statement)?);
    }
    Ok(block)
}

/// Remove the trailing `drop` of a block
/// 
/// `context` names the enclosing node for the diagnostic and `location` is the
/// position of the block's last statement, if known.
pub fn strip_trailing_drop(
    mut instructions: Vec<Entry>,
    context: &str,
    location: Option<&SourceLocation>,
) -> Result<Vec<Entry>, LoweringError> {
    let ends_in_drop = matches!(
        instructions.last(),
        Some(Entry::Instruction(instruction)) if instruction.is_drop()
    );
    if ends_in_drop {
        instructions.pop();
        return Ok(instructions);
    }

    Err(LoweringError::MalformedBody {
        context: context.to_string(),
        found: instructions
            .last()
            .map_or_else(|| "an empty block".to_string(), Entry::describe),
        location: location.cloned(),
    })
}
