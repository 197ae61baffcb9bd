//! Statement lowering

use super::{lower_expression, Lowered};
use crate::error::LoweringError;
use crate::ir::{Argument, Instruction, Mnemonic};
use crate::naming::NameCounters;
use circ_cps::{Expression, Statement, StatementKind};
use log::trace;

/// Lower one CPS statement
/// 
/// Errors raised inside the statement without a position of their own are
/// reported at the statement's location.
pub fn lower_statement(
    counters: &mut NameCounters,
    statement: &Statement,
) -> Result<Lowered, LoweringError> {
    trace!("Lowering {} statement", statement.shape_name());

    lower_statement_kind(counters, &statement.kind)
        .map_err(|err| err.or_location(statement.location.as_ref()))
}

fn lower_statement_kind(
    counters: &mut NameCounters,
    kind: &StatementKind,
) -> Result<Lowered, LoweringError> {
    match kind {
        StatementKind::Assignment { target, expression } => {
            lower_binding(counters, target, expression)
        }

        StatementKind::ExpressionStatement { expression } => {
            let mut lowered = lower_expression(counters, expression)?;
            lowered.push(Instruction::bare(Mnemonic::Drop));
            Ok(lowered)
        }

        StatementKind::PushStatement { expression } => lower_expression(counters, expression),

        StatementKind::VariableInitialization { variable, expression } => {
            lower_binding(counters, variable, expression)
        }
    }
}

/// Evaluate `expression` and pop it into `name`
fn lower_binding(
    counters: &mut NameCounters,
    name: &str,
    expression: &Expression,
) -> Result<Lowered, LoweringError> {
    let mut lowered = lower_expression(counters, expression)?;
    lowered.push(Instruction::new(Mnemonic::Pop, Argument::Symbol(name.to_string())));
    Ok(lowered)
}
