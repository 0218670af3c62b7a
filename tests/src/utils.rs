use sdl::Schema;
use sdl_analyzer::AnalyzerBuilder;
use sdl_analyzer::errors::AnalysisError;
use sdl_analyzer::linked_context::LinkedContext;
use sdl_ast::nodes::PackageDef;

pub(crate) fn get_test_data_path() -> std::path::PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| std::env::current_dir().unwrap());
    manifest_dir.join("test_data")
}

/// Resolves `tests/test_data/sdl/<name>`; `name` may be a file or a directory.
pub(crate) fn get_sdl_path(name: &str) -> std::path::PathBuf {
    get_test_data_path().join("sdl").join(name)
}

pub(crate) fn parse_source(source: &str) -> PackageDef {
    sdl_ast::parser::parse(source, "").unwrap()
}

pub(crate) fn compile_fixture(name: &str) -> anyhow::Result<Schema> {
    sdl::compile_path(&get_sdl_path(name))
}

/// Runs the type finder and the static analyzer over in-memory sources
/// without merging them.
pub(crate) fn analyze_sources(sources: &[&str]) -> Result<LinkedContext, AnalysisError> {
    let packages = sources.iter().map(|source| parse_source(source)).collect();
    Ok(AnalyzerBuilder::analyze(packages)?.linked_context())
}

/// Extracts the semantic error behind a failed pipeline run.
pub(crate) fn analysis_error(err: &anyhow::Error) -> &AnalysisError {
    err.downcast_ref::<AnalysisError>()
        .unwrap_or_else(|| panic!("expected an analysis error, got: {err:#}"))
}
