use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use datalog::parser::{parse_source, tokenize};
use datalog::{diagnostic, Checker};
use std::path::{Path, PathBuf};
use std::process;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "datalog")]
#[command(about = "Parse and check Datalog programs", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a program and print its canonical rendering
    Parse {
        /// Input Datalog file
        input: PathBuf,

        /// Also print an annotated diagnostic to stderr on failure
        #[arg(long)]
        diagnostics: bool,
    },

    /// Parse a program and run the semantic checks
    Check {
        /// Input Datalog file
        input: PathBuf,
    },

    /// Print the token stream of a file
    Tokens {
        /// Input Datalog file
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ok = match cli.command {
        Commands::Parse { input, diagnostics } => parse_program(&input, diagnostics)?,
        Commands::Check { input } => check_program(&input)?,
        Commands::Tokens { input } => {
            print_tokens(&input)?;
            true
        }
    };

    if !ok {
        process::exit(1);
    }
    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_source(input: &Path) -> Result<String> {
    debug!(path = %input.display(), "reading source");
    std::fs::read_to_string(input).with_context(|| format!("Failed to read {}", input.display()))
}

fn parse_program(input: &Path, diagnostics: bool) -> Result<bool> {
    let source = read_source(input)?;
    let result = parse_source(&source);
    println!("{}", datalog::outcome(&result));

    match result {
        Ok(program) => {
            info!(
                schemes = program.schemes().len(),
                facts = program.facts().len(),
                rules = program.rules().len(),
                queries = program.queries().len(),
                "parsed {}",
                input.display()
            );
            Ok(true)
        }
        Err(error) => {
            if diagnostics {
                diagnostic::eprint(&error, &source)?;
            }
            Ok(false)
        }
    }
}

fn check_program(input: &Path) -> Result<bool> {
    let source = read_source(input)?;

    let program = match parse_source(&source) {
        Ok(program) => program,
        Err(error) => {
            diagnostic::eprint(&error, &source)?;
            return Ok(false);
        }
    };

    match Checker::new().check_program(&program) {
        Ok(()) => {
            println!("{}: ok", input.display());
            Ok(true)
        }
        Err(error) => {
            eprintln!("{}: {}", input.display(), error);
            Ok(false)
        }
    }
}

fn print_tokens(input: &Path) -> Result<()> {
    let source = read_source(input)?;
    let tokens = tokenize(&source);
    for token in &tokens {
        println!("{}", token);
    }
    println!("Total Tokens = {}", tokens.len());
    Ok(())
}
