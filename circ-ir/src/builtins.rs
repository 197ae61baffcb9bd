//! Builtin symbol resolution
//! 
//! A `FunctionCall` whose callee is a `Builtin` marker compiles to a single
//! instruction instead of a `call`.

use crate::error::LoweringError;
use crate::ir::Mnemonic;

/// Builtin symbol to instruction mapping
pub const BUILTINS: &[(&str, Mnemonic)] = &[
    // Environment operations
    ("__get__", Mnemonic::Get),

    // Integer operations
    ("__add__", Mnemonic::Add),
    ("__integer_divide__", Mnemonic::Idiv),
    ("__modular_divide__", Mnemonic::Mod),
    ("__multiply__", Mnemonic::Mul),
    ("__negate__", Mnemonic::Neg),
    ("__subtract__", Mnemonic::Sub),

    // Boolean operations
    ("__eq__", Mnemonic::Eq),
    ("__neq__", Mnemonic::Neq),
    ("__lt__", Mnemonic::Lt),
    ("__lte__", Mnemonic::Lte),
    ("__gt__", Mnemonic::Gt),
    ("__gte__", Mnemonic::Gte),

    // String operations
    ("__concat__", Mnemonic::Concat),

    // Structure operations
    ("__field__", Mnemonic::Field),
];

impl Mnemonic {
    /// Resolve a builtin symbol to the instruction implementing it
    pub fn from_builtin(symbol: &str) -> Result<Mnemonic, LoweringError> {
        BUILTINS
            .iter()
            .find(|(builtin, _)| *builtin == symbol)
            .map(|(_, mnemonic)| *mnemonic)
            .ok_or_else(|| LoweringError::unknown_builtin(symbol))
    }
}
