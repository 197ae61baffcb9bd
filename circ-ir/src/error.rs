//! Lowering errors

use circ_common::source_loc::describe_location;
use circ_common::{CompilerError, SourceLocation};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoweringError {
    #[error("Unknown builtin '{symbol}'{}", describe_location(.location))]
    UnknownBuiltin {
        symbol: String,
        location: Option<SourceLocation>,
    },

    /// A lambda body or conditional arm does not end in `drop`. The CPS tree
    /// is malformed; nothing downstream can recover from this.
    #[error("Malformed body in {context}{}: expected a trailing drop, found {found}", describe_location(.location))]
    MalformedBody {
        context: String,
        found: String,
        location: Option<SourceLocation>,
    },

    #[error("Unhandled node shape '{shape}' in {context}{}", describe_location(.location))]
    UnhandledNodeShape {
        shape: String,
        context: String,
        location: Option<SourceLocation>,
    },
}

impl LoweringError {
    pub fn unknown_builtin(symbol: &str) -> Self {
        LoweringError::UnknownBuiltin {
            symbol: symbol.to_string(),
            location: None,
        }
    }

    pub fn location(&self) -> Option<&SourceLocation> {
        match self {
            LoweringError::UnknownBuiltin { location, .. }
            | LoweringError::MalformedBody { location, .. }
            | LoweringError::UnhandledNodeShape { location, .. } => location.as_ref(),
        }
    }

    /// Attach `location` unless a more precise one is already recorded
    pub fn or_location(mut self, fallback: Option<&SourceLocation>) -> Self {
        match &mut self {
            LoweringError::UnknownBuiltin { location, .. }
            | LoweringError::MalformedBody { location, .. }
            | LoweringError::UnhandledNodeShape { location, .. } => {
                if location.is_none() {
                    *location = fallback.cloned();
                }
            }
        }
        self
    }
}

impl From<LoweringError> for CompilerError {
    fn from(err: LoweringError) -> Self {
        CompilerError::LoweringError {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_body_message() {
        let err = LoweringError::MalformedBody {
            context: "body of lambda 'f$0'".to_string(),
            found: "'pop sym(x)'".to_string(),
            location: Some(SourceLocation::new("f.fur", 4, 2)),
        };
        assert_eq!(
            err.to_string(),
            "Malformed body in body of lambda 'f$0' at f.fur:4:2: expected a trailing drop, found 'pop sym(x)'"
        );
    }

    #[test]
    fn test_unknown_builtin_message() {
        let err = LoweringError::unknown_builtin("__pow__");
        assert_eq!(err.to_string(), "Unknown builtin '__pow__'");

        let err = err.or_location(Some(&SourceLocation::new("calc.fur", 7, 3)));
        assert_eq!(err.to_string(), "Unknown builtin '__pow__' at calc.fur:7:3");
    }

    #[test]
    fn test_or_location_keeps_inner_location() {
        let inner = SourceLocation::new("calc.fur", 9, 5);
        let outer = SourceLocation::new("calc.fur", 2, 1);
        let err = LoweringError::UnhandledNodeShape {
            shape: "Builtin".to_string(),
            context: "value position".to_string(),
            location: Some(inner.clone()),
        };

        assert_eq!(err.or_location(Some(&outer)).location(), Some(&inner));
        assert_eq!(LoweringError::unknown_builtin("__x__").or_location(None).location(), None);
    }

    #[test]
    fn test_into_compiler_error() {
        let err: CompilerError = LoweringError::unknown_builtin("__unknown__").into();
        assert_eq!(err.to_string(), "Lowering error: Unknown builtin '__unknown__'");
    }
}
