//! PLC Compiler - type checker for the PLC image manipulation language
//!
//! Usage: plcc [OPTIONS] <input>

use anyhow::Context;
use clap::Parser as ClapParser;
use log::LevelFilter;
use plc_compiler::FrontendConfig;
use plc_compiler::driver::Pipeline;
use std::path::PathBuf;
use std::process;

#[derive(ClapParser, Debug)]
#[command(name = "plcc")]
#[command(author = "PLC Toolchain Team")]
#[command(version)]
#[command(about = "Type checker for the PLC image manipulation language", long_about = None)]
struct Args {
    /// Input source file (.plc)
    #[arg(required = true)]
    input: PathBuf,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Dump the annotated AST after a successful check
    #[arg(long)]
    dump_ast: bool,

    /// Dump tokens (for debugging)
    #[arg(long)]
    dump_tokens: bool,
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("error: {:#}", e);
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.format_timestamp(None).init();
}

fn run(args: &Args) -> anyhow::Result<()> {
    let config = FrontendConfig {
        dump_tokens: args.dump_tokens,
        dump_ast: args.dump_ast,
        verbose: args.verbose,
    };

    if args.verbose {
        eprintln!("Checking {}", args.input.display());
    }

    let mut pipeline = Pipeline::new(config);
    let program = pipeline
        .check_file(&args.input)
        .with_context(|| format!("{} failed to type check", args.input.display()))?;

    if args.verbose {
        eprintln!(
            "'{}' is well typed ({} declarations, {} statements)",
            program.name,
            program.decls.len(),
            program.body.len()
        );
    }

    Ok(())
}
