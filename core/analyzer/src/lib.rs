#![warn(clippy::pedantic)]
//! Semantic analysis for SDL schemas
//!
//! This crate takes merged [`PackageDef`]s from `sdl-ast` and turns them into
//! a fully linked package set, or reports the first semantic error.
//!
//! ## Passes
//!
//! 1. **Type Finder** ([`finder`]) - maps every `package.Name` to the
//!    [`DefinitionId`](sdl_ast::nodes::DefinitionId) of its declaration and
//!    rejects duplicate packages and duplicate types.
//! 2. **Static Analyzer** ([`analyzer`]) - resolves field types and parent
//!    clauses, validates inheritance chains (kind, cycles, member hiding)
//!    and attribute applicability, then writes the resolved ids back.
//! 3. **Validator** ([`validator`]) - an independent name-level check that
//!    can also run on a single package and produces the warnings of a run.
//!
//! Every pass is fail-fast: the first error ends the run and is the only
//! error reported.
//!
//! ## Quick Start
//!
//! ```ignore
//! use sdl_analyzer::{AnalyzerBuilder, validator::Validator};
//!
//! let context = AnalyzerBuilder::analyze(packages)?.linked_context();
//! let warnings = Validator::validate(context.packages())?;
//! let player = context.find("game.Player");
//! ```

use std::marker::PhantomData;

use sdl_ast::nodes::PackageDef;

use crate::errors::AnalysisError;
use crate::finder::TypeTable;
use crate::linked_context::LinkedContext;

pub mod analyzer;
pub mod errors;
pub mod finder;
pub mod linked_context;
pub mod validator;

/// Marker state: no packages analyzed yet.
pub struct AnalyzerInitState;

/// Marker state: both passes succeeded and the context is linked.
pub struct AnalyzerCompleteState;

pub type CompletedAnalyzerBuilder = AnalyzerBuilder<AnalyzerCompleteState>;

/// Runs the type finder and the static analyzer over a package set.
///
/// The typestate makes the linked context reachable only after both passes
/// have succeeded.
pub struct AnalyzerBuilder<S> {
    context: LinkedContext,
    _state: PhantomData<S>,
}

impl AnalyzerBuilder<AnalyzerInitState> {
    /// Finds all types, then links and checks every reference.
    ///
    /// `packages` must already be merged so that each package name occurs
    /// once.
    ///
    /// # Errors
    ///
    /// Returns the first error of either pass.
    #[must_use = "returns builder with linked context, extract with .linked_context()"]
    pub fn analyze(
        mut packages: Vec<PackageDef>,
    ) -> Result<AnalyzerBuilder<AnalyzerCompleteState>, AnalysisError> {
        let table = TypeTable::build(&packages)?;
        analyzer::analyze(&mut packages, &table)?;
        Ok(AnalyzerBuilder {
            context: LinkedContext::new(packages, table),
            _state: PhantomData,
        })
    }
}

impl AnalyzerBuilder<AnalyzerCompleteState> {
    /// Consume the builder and return the linked context.
    #[must_use = "consumes builder and returns the linked context"]
    pub fn linked_context(self) -> LinkedContext {
        self.context
    }
}
