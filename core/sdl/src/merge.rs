//! Folding package fragments from several files into one package per name.

use rustc_hash::FxHashMap;
use sdl_ast::nodes::PackageDef;

/// Merges packages that share a name.
///
/// The first package with a given name is kept in place; attributes,
/// imports and elements of every later package with that name are appended
/// to it in input order. Nothing is renamed, deduplicated or validated, so
/// two fragments declaring the same type still collide in the type finder.
#[must_use]
#[tracing::instrument(level = "debug", skip_all, fields(fragments = packages.len()))]
pub fn merge(packages: Vec<PackageDef>) -> Vec<PackageDef> {
    let mut merged: Vec<PackageDef> = Vec::with_capacity(packages.len());
    let mut index_by_name: FxHashMap<String, usize> = FxHashMap::default();

    for package in packages {
        if let Some(&index) = index_by_name.get(&package.name) {
            let canonical = &mut merged[index];
            canonical.attributes.extend(package.attributes);
            canonical.body.imports.extend(package.body.imports);
            canonical.body.elements.extend(package.body.elements);
        } else {
            index_by_name.insert(package.name.clone(), merged.len());
            merged.push(package);
        }
    }

    tracing::debug!(packages = merged.len(), "packages merged");
    merged
}
