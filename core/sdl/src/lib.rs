#![warn(clippy::pedantic)]
//! Orchestration crate for the SDL schema pipeline
//!
//! This crate ties the parser from `sdl-ast` and the passes from
//! `sdl-analyzer` into one pipeline:
//!
//! ```text
//! .sdl files → parse → merge → type finder → static analyzer → validator → emit
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use sdl::{compile_path, emit::{emit, Language}};
//!
//! let schema = compile_path(Path::new("schemas/"))?;
//! for warning in schema.warnings() {
//!     eprintln!("{warning}");
//! }
//! emit(&schema, Language::Json, Path::new("out/"))?;
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! Every phase stops at its first error. The returned error names the phase
//! and, for schema errors, carries the source location of the problem.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use sdl_analyzer::AnalyzerBuilder;
use sdl_analyzer::linked_context::LinkedContext;
use sdl_analyzer::validator::Validator;
use sdl_ast::nodes::PackageDef;
use walkdir::WalkDir;

pub mod emit;
pub mod merge;

/// File extension of schema sources.
pub const SOURCE_EXTENSION: &str = "sdl";

/// A validated and fully linked package set.
#[derive(Debug)]
pub struct Schema {
    context: LinkedContext,
    warnings: Vec<String>,
}

impl Schema {
    #[must_use]
    pub fn packages(&self) -> &[PackageDef] {
        self.context.packages()
    }

    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    #[must_use]
    pub fn context(&self) -> &LinkedContext {
        &self.context
    }
}

/// Parses one schema source. `source_name` is recorded in every location.
///
/// # Errors
///
/// Returns the first syntax error.
pub fn parse(source: &str, source_name: &str) -> anyhow::Result<PackageDef> {
    Ok(sdl_ast::parser::parse(source, source_name)?)
}

/// Parses a `.sdl` file, or every `.sdl` file below a directory in file
/// name order.
///
/// # Errors
///
/// Returns an error if the path cannot be read, a directory holds no schema
/// files, or any file fails to parse.
#[tracing::instrument(level = "debug")]
pub fn load_path(path: &Path) -> anyhow::Result<Vec<PackageDef>> {
    let metadata =
        fs::metadata(path).with_context(|| format!("failed to access {}", path.display()))?;
    if !metadata.is_dir() {
        return Ok(vec![load_file(path)?]);
    }

    let mut packages = Vec::new();
    for entry in WalkDir::new(path).sort_by_file_name() {
        let entry = entry.with_context(|| format!("failed to walk {}", path.display()))?;
        if entry.file_type().is_file()
            && entry.path().extension().is_some_and(|ext| ext == SOURCE_EXTENSION)
        {
            packages.push(load_file(entry.path())?);
        }
    }
    if packages.is_empty() {
        anyhow::bail!("no .{SOURCE_EXTENSION} files found in {}", path.display());
    }
    tracing::debug!(files = packages.len(), "schema sources parsed");
    Ok(packages)
}

fn load_file(path: &Path) -> anyhow::Result<PackageDef> {
    let source =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    parse(&source, &path.display().to_string())
        .with_context(|| format!("failed to parse {}", path.display()))
}

/// Merges, analyzes and validates parsed packages.
///
/// # Errors
///
/// Returns the first analysis or validation error.
#[tracing::instrument(level = "debug", skip_all, fields(fragments = packages.len()))]
pub fn compile_packages(packages: Vec<PackageDef>) -> anyhow::Result<Schema> {
    let packages = merge::merge(packages);
    let context = AnalyzerBuilder::analyze(packages)
        .context("schema analysis failed")?
        .linked_context();
    let warnings = Validator::validate(context.packages()).context("schema validation failed")?;
    tracing::debug!(warnings = warnings.len(), "schema compiled");
    Ok(Schema { context, warnings })
}

/// Loads and compiles a file or directory.
///
/// # Errors
///
/// See [`load_path`] and [`compile_packages`].
pub fn compile_path(path: &Path) -> anyhow::Result<Schema> {
    compile_packages(load_path(path)?)
}

/// Loads every path and compiles them as one package set.
///
/// # Errors
///
/// See [`load_path`] and [`compile_packages`].
pub fn compile_paths(paths: &[PathBuf]) -> anyhow::Result<Schema> {
    let mut packages = Vec::new();
    for path in paths {
        packages.extend(load_path(path)?);
    }
    compile_packages(packages)
}
