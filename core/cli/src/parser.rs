//! Command line argument parsing for the SDL compiler.
//!
//! This module defines the CLI interface using `clap`. The `Cli` struct captures
//! the global flags and the subcommand passed to the `sdlc` binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sdl::emit::Language;

/// Command line interface definition for the SDL compiler.
///
/// ## Examples
///
/// Compile a directory of schemas to JSON:
/// ```bash
/// sdlc run schemas/ out/ json
/// ```
///
/// Print the parsed tree of one file:
/// ```bash
/// sdlc print-ast schemas/game.sdl
/// ```
#[derive(Parser)]
#[command(
    name = "sdlc",
    author,
    version,
    about = "SDL schema compiler CLI (sdlc)",
    long_about = "The 'sdlc' command parses one .sdl file or a directory of them, merges fragments of the same package, \
links and validates every type reference, and emits the result in the requested language."
)]
pub(crate) struct Cli {
    /// Enable debug logging on stderr. `RUST_LOG` takes precedence when set.
    #[arg(short, long, global = true)]
    pub(crate) verbose: bool,

    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Compile schemas and write the output for a target language.
    Run {
        /// A `.sdl` file or a directory searched recursively for `.sdl` files.
        path: PathBuf,

        /// Directory the generated file is written to; created if missing.
        output_path: PathBuf,

        /// Target language of the generated file.
        #[arg(value_enum)]
        lang: Language,
    },

    /// Compile schemas and print the linked tree to stdout.
    PrintAst {
        /// A `.sdl` file or a directory searched recursively for `.sdl` files.
        path: PathBuf,
    },
}
