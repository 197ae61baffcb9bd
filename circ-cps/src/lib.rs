//! CPS IR Compiler - Continuation-Passing-Style Tree
//! 
//! The node vocabulary produced by the CPS conversion stage. The tree is
//! treated as immutable input by the backend; it is deserialized from JSON
//! by the driver or built directly with the constructor helpers below.

use circ_common::SourceLocation;
use serde::{Deserialize, Serialize};

/// A whole converted program: top-level statements in source order
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CpsProgram {
    pub statements: Vec<Statement>,
}

impl CpsProgram {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }
}

/// A CPS statement with the position it came from, when the front end kept it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    pub kind: StatementKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceLocation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum StatementKind {
    /// `target = expression` on an already bound name
    Assignment { target: String, expression: Expression },

    /// Evaluate and discard
    ExpressionStatement { expression: Expression },

    /// Evaluate and leave the value on the stack for a following call
    PushStatement { expression: Expression },

    /// Introduce `variable` bound to the value of `expression`
    VariableInitialization { variable: String, expression: Expression },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Expression {
    /// Callee marker selecting a builtin instruction. Only valid as the
    /// `function_expression` of a `FunctionCall`.
    Builtin { symbol: String },

    /// Call whose arguments have already been pushed by preceding statements
    FunctionCall {
        function_expression: Box<Expression>,
        argument_count: usize,
    },

    IfElse {
        condition_expression: Box<Expression>,
        if_statement_list: Vec<Statement>,
        else_statement_list: Vec<Statement>,
    },

    IntegerLiteral { integer: i64 },

    Lambda {
        #[serde(default)]
        name: Option<String>,
        argument_name_list: Vec<String>,
        statement_list: Vec<Statement>,
    },

    /// Pair construction from the two topmost values
    ListConstruct,

    StringLiteral { string: String },

    StructureLiteral { field_count: usize },

    Symbol { symbol: String },

    SymbolLiteral { symbol: String },

    Variable { variable: String },
}

impl Statement {
    pub fn new(kind: StatementKind) -> Self {
        Self { kind, location: None }
    }

    pub fn expression(expression: Expression) -> Self {
        Self::new(StatementKind::ExpressionStatement { expression })
    }

    pub fn push(expression: Expression) -> Self {
        Self::new(StatementKind::PushStatement { expression })
    }

    pub fn assignment(target: &str, expression: Expression) -> Self {
        Self::new(StatementKind::Assignment {
            target: target.to_string(),
            expression,
        })
    }

    pub fn initialization(variable: &str, expression: Expression) -> Self {
        Self::new(StatementKind::VariableInitialization {
            variable: variable.to_string(),
            expression,
        })
    }

    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }

    /// Name of the node shape, used in diagnostics
    pub fn shape_name(&self) -> &'static str {
        match &self.kind {
            StatementKind::Assignment { .. } => "Assignment",
            StatementKind::ExpressionStatement { .. } => "ExpressionStatement",
            StatementKind::PushStatement { .. } => "PushStatement",
            StatementKind::VariableInitialization { .. } => "VariableInitialization",
        }
    }
}

impl Expression {
    pub fn builtin(symbol: &str) -> Self {
        Expression::Builtin { symbol: symbol.to_string() }
    }

    pub fn call(function_expression: Expression, argument_count: usize) -> Self {
        Expression::FunctionCall {
            function_expression: Box::new(function_expression),
            argument_count,
        }
    }

    /// Call of a builtin, e.g. `Expression::builtin_call("__add__", 2)`
    pub fn builtin_call(symbol: &str, argument_count: usize) -> Self {
        Self::call(Self::builtin(symbol), argument_count)
    }

    pub fn if_else(
        condition_expression: Expression,
        if_statement_list: Vec<Statement>,
        else_statement_list: Vec<Statement>,
    ) -> Self {
        Expression::IfElse {
            condition_expression: Box::new(condition_expression),
            if_statement_list,
            else_statement_list,
        }
    }

    pub fn integer(integer: i64) -> Self {
        Expression::IntegerLiteral { integer }
    }

    pub fn lambda(name: Option<&str>, argument_name_list: &[&str], statement_list: Vec<Statement>) -> Self {
        Expression::Lambda {
            name: name.map(str::to_string),
            argument_name_list: argument_name_list.iter().map(|arg| arg.to_string()).collect(),
            statement_list,
        }
    }

    pub fn string(string: &str) -> Self {
        Expression::StringLiteral { string: string.to_string() }
    }

    pub fn structure(field_count: usize) -> Self {
        Expression::StructureLiteral { field_count }
    }

    pub fn symbol(symbol: &str) -> Self {
        Expression::Symbol { symbol: symbol.to_string() }
    }

    pub fn symbol_literal(symbol: &str) -> Self {
        Expression::SymbolLiteral { symbol: symbol.to_string() }
    }

    pub fn variable(variable: &str) -> Self {
        Expression::Variable { variable: variable.to_string() }
    }

    /// Name of the node shape, used in diagnostics
    pub fn shape_name(&self) -> &'static str {
        match self {
            Expression::Builtin { .. } => "Builtin",
            Expression::FunctionCall { .. } => "FunctionCall",
            Expression::IfElse { .. } => "IfElse",
            Expression::IntegerLiteral { .. } => "IntegerLiteral",
            Expression::Lambda { .. } => "Lambda",
            Expression::ListConstruct => "ListConstruct",
            Expression::StringLiteral { .. } => "StringLiteral",
            Expression::StructureLiteral { .. } => "StructureLiteral",
            Expression::Symbol { .. } => "Symbol",
            Expression::SymbolLiteral { .. } => "SymbolLiteral",
            Expression::Variable { .. } => "Variable",
        }
    }
}
