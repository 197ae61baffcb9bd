//! Stack IR definitions
//! 
//! A `Program` is an ordered list of entries. Order is load order: lifted
//! lambda bodies come first, then `__main__` and the top-level code.

use std::fmt;

/// Operand-stack instruction set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mnemonic {
    // Pushes
    Push,
    PushInteger,
    PushString,
    PushSymbol,

    // Construction
    List,
    Structure,
    Close,

    // Bindings and stack
    Pop,
    Drop,

    // Control flow
    Call,
    Return,
    Jump,
    JumpIfFalse,
    End,

    // Environment operations
    Get,

    // Integer operations
    Add,
    Idiv,
    Mod,
    Mul,
    Neg,
    Sub,

    // Boolean operations
    Eq,
    Neq,
    Lt,
    Lte,
    Gt,
    Gte,

    // String operations
    Concat,

    // Structure operations
    Field,
}

impl Mnemonic {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mnemonic::Push => "push",
            Mnemonic::PushInteger => "push_integer",
            Mnemonic::PushString => "push_string",
            Mnemonic::PushSymbol => "push_symbol",
            Mnemonic::List => "list",
            Mnemonic::Structure => "structure",
            Mnemonic::Close => "close",
            Mnemonic::Pop => "pop",
            Mnemonic::Drop => "drop",
            Mnemonic::Call => "call",
            Mnemonic::Return => "return",
            Mnemonic::Jump => "jump",
            Mnemonic::JumpIfFalse => "jump_if_false",
            Mnemonic::End => "end",
            Mnemonic::Get => "get",
            Mnemonic::Add => "add",
            Mnemonic::Idiv => "idiv",
            Mnemonic::Mod => "mod",
            Mnemonic::Mul => "mul",
            Mnemonic::Neg => "neg",
            Mnemonic::Sub => "sub",
            Mnemonic::Eq => "eq",
            Mnemonic::Neq => "neq",
            Mnemonic::Lt => "lt",
            Mnemonic::Lte => "lte",
            Mnemonic::Gt => "gt",
            Mnemonic::Gte => "gte",
            Mnemonic::Concat => "concat",
            Mnemonic::Field => "field",
        }
    }

    /// Instructions written without an operand when they carry none
    pub fn takes_no_argument(&self) -> bool {
        matches!(self, Mnemonic::Drop | Mnemonic::Return)
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Instruction operand
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Argument {
    Integer(i64),
    /// Arity of a call, builtin, list or structure
    Count(usize),
    /// Emitted wrapped in double quotes, contents unescaped
    String(String),
    /// Emitted as `sym(<name>)`
    Symbol(String),
    /// Jump or closure target
    Label(String),
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Argument::Integer(value) => write!(f, "{}", value),
            Argument::Count(count) => write!(f, "{}", count),
            Argument::String(string) => write!(f, "\"{}\"", string),
            Argument::Symbol(symbol) => write!(f, "sym({})", symbol),
            Argument::Label(label) => f.write_str(label),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub mnemonic: Mnemonic,
    pub argument: Option<Argument>,
}

impl Instruction {
    pub fn new(mnemonic: Mnemonic, argument: Argument) -> Self {
        Self {
            mnemonic,
            argument: Some(argument),
        }
    }

    /// Instruction without an operand
    pub fn bare(mnemonic: Mnemonic) -> Self {
        Self {
            mnemonic,
            argument: None,
        }
    }

    pub fn is_drop(&self) -> bool {
        self.mnemonic == Mnemonic::Drop && self.argument.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Label(String),
    Instruction(Instruction),
}

impl Entry {
    pub fn label(name: &str) -> Self {
        Entry::Label(name.to_string())
    }

    /// Short human-readable form for diagnostics
    pub fn describe(&self) -> String {
        match self {
            Entry::Label(name) => format!("label '{}'", name),
            Entry::Instruction(Instruction { mnemonic, argument: Some(argument) }) => {
                format!("'{} {}'", mnemonic, argument)
            }
            Entry::Instruction(Instruction { mnemonic, argument: None }) => format!("'{}'", mnemonic),
        }
    }
}

impl From<Instruction> for Entry {
    fn from(instruction: Instruction) -> Self {
        Entry::Instruction(instruction)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub entry_list: Vec<Entry>,
}

impl Program {
    pub fn new(entry_list: Vec<Entry>) -> Self {
        Self { entry_list }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entry_list
    }

    /// Label names in program order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entry_list.iter().filter_map(|entry| match entry {
            Entry::Label(name) => Some(name.as_str()),
            Entry::Instruction(_) => None,
        })
    }

    pub fn len(&self) -> usize {
        self.entry_list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entry_list.is_empty()
    }
}
