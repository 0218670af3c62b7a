//! Emission backends keyed by target language.

use std::fmt::{self, Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::ValueEnum;
use sdl_ast::printer::print_packages;

use crate::Schema;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Language {
    /// The linked package list as pretty-printed JSON.
    Json,
    /// The indented debug tree.
    Ast,
}

impl Language {
    #[must_use]
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Json => "schema.json",
            Self::Ast => "schema.ast",
        }
    }

    /// Renders `schema` in this language.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn generate(self, schema: &Schema) -> anyhow::Result<String> {
        match self {
            Self::Json => serde_json::to_string_pretty(schema.packages())
                .context("failed to serialize schema to JSON"),
            Self::Ast => Ok(print_packages(schema.packages())),
        }
    }
}

impl Display for Language {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Ast => write!(f, "ast"),
        }
    }
}

/// Writes `schema` into `output_dir`, creating the directory if needed, and
/// returns the path of the written file.
///
/// # Errors
///
/// Returns an error if rendering fails or the output cannot be written.
#[tracing::instrument(level = "debug", skip(schema))]
pub fn emit(schema: &Schema, language: Language, output_dir: &Path) -> anyhow::Result<PathBuf> {
    let output = language.generate(schema)?;
    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output directory {}", output_dir.display()))?;
    let path = output_dir.join(language.file_name());
    fs::write(&path, output).with_context(|| format!("failed to write {}", path.display()))?;
    tracing::debug!(path = %path.display(), "schema written");
    Ok(path)
}
