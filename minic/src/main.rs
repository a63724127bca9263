//! minic CLI

use clap::{Parser, Subcommand};
use minic::interp::{declared_signature, InterpConfig, Interpreter, DEFAULT_MAX_CALL_DEPTH};
use minic::Program;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "minic", version, about = "Tree-walking interpreter for a small typed language")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a program, starting at main()
    Run {
        /// Program syntax tree as JSON
        file: PathBuf,
        /// Maximum nesting of function calls
        #[arg(long, default_value_t = DEFAULT_MAX_CALL_DEPTH)]
        max_call_depth: usize,
    },
    /// Load a program and list its function signatures
    Check {
        /// Program syntax tree as JSON
        file: PathBuf,
    },
    /// Pretty-print the syntax tree (debug)
    Dump {
        /// Program syntax tree as JSON
        file: PathBuf,
    },
}

fn main() {
    minic::init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Run {
            file,
            max_call_depth,
        } => run_file(&file, InterpConfig { max_call_depth }),
        Command::Check { file } => check_file(&file),
        Command::Dump { file } => dump_file(&file),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn load_program(path: &Path) -> Result<Program, Box<dyn std::error::Error>> {
    let source = std::fs::read_to_string(path)?;
    Ok(Program::from_json(&source)?)
}

fn run_file(path: &Path, config: InterpConfig) -> Result<(), Box<dyn std::error::Error>> {
    let program = load_program(path)?;
    let mut interp = Interpreter::new().with_config(config);
    interp.run(&program)?;
    Ok(())
}

fn check_file(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let program = load_program(path)?;
    let mut interp = Interpreter::new();
    interp.load(&program)?;

    for function in &program.functions {
        println!("{} -> {}", declared_signature(function), function.return_type);
    }
    println!("✓ {} loads successfully", path.display());
    Ok(())
}

fn dump_file(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let program = load_program(path)?;
    println!("{}", program.to_json_pretty()?);
    Ok(())
}
