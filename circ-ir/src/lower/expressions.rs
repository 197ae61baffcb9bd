//! Expression lowering

use super::{lower_block, strip_trailing_drop, Lowered};
use crate::error::LoweringError;
use crate::ir::{Argument, Entry, Instruction, Mnemonic};
use crate::naming::{escape_name, ConditionalLabels, NameCounters};
use crate::ANONYMOUS_LAMBDA_NAME;
use circ_common::SourceLocation;
use circ_cps::{Expression, Statement};
use log::{debug, trace};

/// Lower one CPS expression; the instructions push exactly one value
pub fn lower_expression(
    counters: &mut NameCounters,
    expression: &Expression,
) -> Result<Lowered, LoweringError> {
    trace!("Lowering {} expression", expression.shape_name());

    match expression {
        Expression::Builtin { symbol } => Err(LoweringError::UnhandledNodeShape {
            shape: expression.shape_name().to_string(),
            context: format!("value position (builtin '{}' can only be called)", symbol),
            location: None,
        }),

        Expression::FunctionCall {
            function_expression,
            argument_count,
        } => lower_function_call(counters, function_expression, *argument_count),

        Expression::IfElse {
            condition_expression,
            if_statement_list,
            else_statement_list,
        } => lower_if_else(counters, condition_expression, if_statement_list, else_statement_list),

        Expression::IntegerLiteral { integer } => Ok(Lowered::single(Instruction::new(
            Mnemonic::PushInteger,
            Argument::Integer(*integer),
        ))),

        Expression::Lambda {
            name,
            argument_name_list,
            statement_list,
        } => lower_lambda(counters, name.as_deref(), argument_name_list, statement_list),

        Expression::ListConstruct => Ok(Lowered::single(Instruction::new(
            Mnemonic::List,
            Argument::Count(2),
        ))),

        Expression::StringLiteral { string } => Ok(Lowered::single(Instruction::new(
            Mnemonic::PushString,
            Argument::String(string.clone()),
        ))),

        Expression::StructureLiteral { field_count } => Ok(Lowered::single(Instruction::new(
            Mnemonic::Structure,
            Argument::Count(*field_count),
        ))),

        Expression::Symbol { symbol } => Ok(Lowered::single(Instruction::new(
            Mnemonic::Push,
            Argument::Symbol(symbol.clone()),
        ))),

        Expression::SymbolLiteral { symbol } => Ok(Lowered::single(Instruction::new(
            Mnemonic::PushSymbol,
            Argument::Symbol(symbol.clone()),
        ))),

        Expression::Variable { variable } => Ok(Lowered::single(Instruction::new(
            Mnemonic::Push,
            Argument::Symbol(variable.clone()),
        ))),
    }
}

fn lower_function_call(
    counters: &mut NameCounters,
    function_expression: &Expression,
    argument_count: usize,
) -> Result<Lowered, LoweringError> {
    if let Expression::Builtin { symbol } = function_expression {
        let mnemonic = Mnemonic::from_builtin(symbol)?;
        debug!("Builtin '{}' resolved to '{}'", symbol, mnemonic);
        return Ok(Lowered::single(Instruction::new(
            mnemonic,
            Argument::Count(argument_count),
        )));
    }

    let mut lowered = lower_expression(counters, function_expression)?;
    lowered.push(Instruction::new(Mnemonic::Call, Argument::Count(argument_count)));
    Ok(lowered)
}

fn lower_if_else(
    counters: &mut NameCounters,
    condition_expression: &Expression,
    if_statement_list: &[Statement],
    else_statement_list: &[Statement],
) -> Result<Lowered, LoweringError> {
    let tag = counters.next_if_tag();
    let labels = ConditionalLabels::new(tag);
    debug!("Lowering conditional {}", labels.if_label);

    let condition = lower_expression(counters, condition_expression)?;

    let if_arm = lower_block(counters, if_statement_list)?;
    let if_instructions = strip_trailing_drop(
        if_arm.instructions,
        &format!("if-arm of {}", labels.if_label),
        last_location(if_statement_list),
    )?;

    let else_arm = lower_block(counters, else_statement_list)?;
    let else_instructions = strip_trailing_drop(
        else_arm.instructions,
        &format!("else-arm of {}", labels.if_label),
        last_location(else_statement_list),
    )?;

    let mut closure_entries = condition.closure_entries;
    closure_entries.extend(if_arm.closure_entries);
    closure_entries.extend(else_arm.closure_entries);

    let mut instructions = condition.instructions;
    instructions.push(
        Instruction::new(Mnemonic::JumpIfFalse, Argument::Label(labels.else_label.clone())).into(),
    );
    instructions.push(Instruction::new(Mnemonic::Jump, Argument::Label(labels.if_label.clone())).into());
    instructions.push(Entry::Label(labels.if_label));
    instructions.extend(if_instructions);
    instructions.push(
        Instruction::new(Mnemonic::Jump, Argument::Label(labels.endif_label.clone())).into(),
    );
    instructions.push(Entry::Label(labels.else_label));
    instructions.extend(else_instructions);
    instructions.push(Entry::Label(labels.endif_label));

    Ok(Lowered {
        closure_entries,
        instructions,
    })
}

/// Lift a lambda body into its own labeled block and close over it in place
fn lower_lambda(
    counters: &mut NameCounters,
    name: Option<&str>,
    argument_name_list: &[String],
    statement_list: &[Statement],
) -> Result<Lowered, LoweringError> {
    let base = match name {
        Some(name) => escape_name(name),
        None => ANONYMOUS_LAMBDA_NAME.to_string(),
    };
    let label = counters.fresh_label(&base);
    debug!(
        "Lifting lambda '{}' with {} arguments",
        label,
        argument_name_list.len()
    );

    let body = lower_block(counters, statement_list)?;
    let body_instructions = strip_trailing_drop(
        body.instructions,
        &format!("body of lambda '{}'", label),
        last_location(statement_list),
    )?;

    // Nested lambdas precede this one
    let mut closure_entries = body.closure_entries;
    closure_entries.push(Entry::Label(label.clone()));

    // Arguments were pushed left to right, so the last one is on top
    closure_entries.extend(argument_name_list.iter().rev().map(|argument| {
        Entry::from(Instruction::new(Mnemonic::Pop, Argument::Symbol(argument.clone())))
    }));
    closure_entries.extend(body_instructions);
    closure_entries.push(Instruction::bare(Mnemonic::Return).into());

    Ok(Lowered {
        closure_entries,
        instructions: vec![Instruction::new(Mnemonic::Close, Argument::Label(label)).into()],
    })
}

fn last_location(statements: &[Statement]) -> Option<&SourceLocation> {
    statements.last().and_then(|statement| statement.location.as_ref())
}
