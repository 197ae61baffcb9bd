//! CPS IR Compiler Driver
//! 
//! Reads a CPS tree serialized as JSON, lowers it to the stack IR and writes
//! the assembly text.

use circ_codegen::render;
use circ_common::CompilerError;
use circ_cps::CpsProgram;
use circ_ir::{lower_program, BUILTINS};
use clap::{Parser, Subcommand};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "circ")]
#[command(about = "CPS to stack IR compiler backend")]
#[command(version = "0.1.0")]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides the level)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a JSON CPS tree to assembly text
    Compile {
        /// Input CPS tree (JSON)
        input: PathBuf,

        /// Output assembly file, `-` for stdout (default: input with .cir extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the lowered entries to stdout before rendering
        #[arg(long)]
        print_ir: bool,
    },

    /// List the builtin symbols and the instructions they compile to
    Builtins,
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    let result = match cli.command {
        Commands::Compile { input, output, print_ir } => {
            compile_file(&input, output.as_deref(), print_ir)
        }
        Commands::Builtins => {
            print!("{}", builtin_listing());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Parse a CPS program from its JSON form
fn parse_program(source: &str) -> Result<CpsProgram, CompilerError> {
    serde_json::from_str(source).map_err(|e| CompilerError::input_error(e.to_string()))
}

/// Where the assembly goes; `None` means stdout
///
/// Refuses any destination that would overwrite the input.
fn output_path(input: &Path, output: Option<&Path>) -> Result<Option<PathBuf>, CompilerError> {
    let path = match output {
        Some(path) if path == Path::new("-") => return Ok(None),
        Some(path) => path.to_path_buf(),
        None => input.with_extension("cir"),
    };

    if path.as_path() == input {
        return Err(CompilerError::input_error(format!(
            "output '{}' would overwrite the input file; pass --output",
            path.display()
        )));
    }
    Ok(Some(path))
}

fn compile_file(input: &Path, output: Option<&Path>, print_ir: bool) -> Result<(), CompilerError> {
    info!("Compiling {}", input.display());

    let destination = output_path(input, output)?;
    let source = fs::read_to_string(input)?;
    let program = parse_program(&source)?;
    let ir = lower_program(&program)?;

    if print_ir {
        println!("=== IR Output ===");
        for entry in ir.entries() {
            println!("{:?}", entry);
        }
        println!("=== End IR ===");
    }

    let text = render(&ir);
    match destination {
        Some(path) => {
            fs::write(&path, format!("{}\n", text))?;
            info!("Assembly written to {}", path.display());
        }
        None => println!("{}", text),
    }

    Ok(())
}

fn builtin_listing() -> String {
    BUILTINS
        .iter()
        .map(|(symbol, mnemonic)| format!("{:<20} {}\n", symbol, mnemonic))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("circ-driver-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_output_path() {
        let input = Path::new("programs/fact.json");
        assert_eq!(output_path(input, None).unwrap(), Some(PathBuf::from("programs/fact.cir")));
        assert_eq!(output_path(input, Some(Path::new("-"))).unwrap(), None);
        assert_eq!(
            output_path(input, Some(Path::new("out.s"))).unwrap(),
            Some(PathBuf::from("out.s"))
        );
    }

    #[test]
    fn test_output_path_never_overwrites_input() {
        let input = Path::new("prog.cir");

        let err = output_path(input, None).unwrap_err();
        assert!(matches!(err, CompilerError::InputError { .. }));
        assert!(err.to_string().contains("prog.cir"));

        assert!(output_path(input, Some(Path::new("prog.cir"))).is_err());
        assert_eq!(
            output_path(input, Some(Path::new("prog.out.cir"))).unwrap(),
            Some(PathBuf::from("prog.out.cir"))
        );
    }

    #[test]
    fn test_compile_file_keeps_cir_input() {
        let input = scratch_path("keep.cir");
        let source = r#"{"statements":[]}"#;
        fs::write(&input, source).unwrap();

        assert!(compile_file(&input, None, false).is_err());
        assert_eq!(fs::read_to_string(&input).unwrap(), source);

        let _ = fs::remove_file(&input);
    }

    #[test]
    fn test_compile_error_reports_statement_location() {
        let input = scratch_path("calc.json");
        fs::write(
            &input,
            r#"{"statements":[{"kind":{"type":"ExpressionStatement","expression":
                {"type":"FunctionCall","function_expression":{"type":"Builtin","symbol":"__pow__"},"argument_count":2}},
                "location":{"filename":"calc.fur","line":7,"column":3}}]}"#,
        )
        .unwrap();

        let err = compile_file(&input, Some(&scratch_path("calc.cir")), false).unwrap_err();
        assert_eq!(err.to_string(), "Lowering error: Unknown builtin '__pow__' at calc.fur:7:3");

        let _ = fs::remove_file(&input);
    }

    #[test]
    fn test_parse_rejects_unknown_shape() {
        let err = parse_program(r#"{"statements":[{"kind":{"type":"Loop"}}]}"#).unwrap_err();
        assert!(matches!(err, CompilerError::InputError { .. }));
    }

    #[test]
    fn test_compile_file_writes_assembly() {
        let input = scratch_path("five.json");
        let output = scratch_path("five.cir");
        fs::write(
            &input,
            r#"{"statements":[{"kind":{"type":"ExpressionStatement","expression":{"type":"IntegerLiteral","integer":5}}}]}"#,
        )
        .unwrap();

        compile_file(&input, Some(&output), false).unwrap();
        let text = fs::read_to_string(&output).unwrap();
        assert_eq!(text, "__main__:\n    push_integer 5\n    drop\n    end nil\n");

        let _ = fs::remove_file(&input);
        let _ = fs::remove_file(&output);
    }

    #[test]
    fn test_compile_file_reports_unknown_builtin() {
        let input = scratch_path("bad.json");
        fs::write(
            &input,
            r#"{"statements":[{"kind":{"type":"ExpressionStatement","expression":
                {"type":"FunctionCall","function_expression":{"type":"Builtin","symbol":"__unknown__"},"argument_count":1}}}]}"#,
        )
        .unwrap();

        let err = compile_file(&input, Some(&scratch_path("bad.cir")), false).unwrap_err();
        assert_eq!(err.to_string(), "Lowering error: Unknown builtin '__unknown__'");
        assert!(!scratch_path("bad.cir").exists());

        let _ = fs::remove_file(&input);
    }

    #[test]
    fn test_missing_input_is_io_error() {
        let err = compile_file(&scratch_path("missing.json"), None, false).unwrap_err();
        assert!(matches!(err, CompilerError::IoError { .. }));
    }

    #[test]
    fn test_builtin_listing() {
        let listing = builtin_listing();
        assert_eq!(listing.lines().count(), BUILTINS.len());
        assert!(listing.contains("__integer_divide__"));
        assert!(listing.lines().any(|line| line.starts_with("__add__") && line.ends_with("add")));
    }
}
