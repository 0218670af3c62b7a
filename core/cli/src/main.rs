#![warn(clippy::pedantic)]

//! # SDL Compiler CLI
//!
//! Command line interface for the SDL schema toolchain.
//!
//! * `sdlc run <path> <output-path> <lang>` – compile and emit `schema.<lang>`.
//! * `sdlc print-ast <path>` – compile and print the debug tree.
//!
//! Warnings are printed to stderr and do not affect the exit code.
//!
//! ## Exit codes
//! * 0 – success.
//! * 1 – usage / IO / schema failure.

mod parser;

use std::path::Path;
use std::process;

use clap::Parser;
use parser::{Cli, Command};
use sdl::emit::emit;
use sdl::{Schema, compile_path};
use sdl_ast::printer::print_packages;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

fn compile(path: &Path) -> Schema {
    if !path.exists() {
        eprintln!("Error: path not found");
        process::exit(1);
    }
    tracing::debug!(path = %path.display(), "compiling");
    match compile_path(path) {
        Ok(schema) => {
            for warning in schema.warnings() {
                eprintln!("{warning}");
            }
            schema
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(1);
        }
    }
}

/// Entry point for the CLI executable.
///
/// On any failure a diagnostic is printed to stderr and the process exits with code `1`.
fn main() {
    let args = Cli::parse();
    init_tracing(args.verbose);

    match args.command {
        Command::Run {
            path,
            output_path,
            lang,
        } => {
            let schema = compile(&path);
            match emit(&schema, lang, &output_path) {
                Ok(written) => println!("Generated: {}", written.display()),
                Err(e) => {
                    eprintln!("Error: {e:#}");
                    process::exit(1);
                }
            }
        }
        Command::PrintAst { path } => {
            let schema = compile(&path);
            print!("{}", print_packages(schema.packages()));
        }
    }
}
