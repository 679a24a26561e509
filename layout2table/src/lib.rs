//! Compiles a declarative kana layout definition into the two downstream
//! artifacts: a flat priority-ordered lookup table for an IME front end,
//! and a finite-state key-remapping ruleset for a low-level remapping
//! engine.

pub mod parser;
pub mod rules;
pub mod table;

pub use shingetsu_core::*;

use std::fs;
use std::path::{Path, PathBuf};

use shingetsu_core::buckets::classify;
use shingetsu_core::keymap::remap_binding;

/// A layout compiled for one physical key arrangement: the immutable
/// snapshot both generators consume.
#[derive(Debug)]
pub struct CompiledLayout {
    pub name: String,
    pub arrangement: Arrangement,
    pub classified: Classified,
    pub compositions: CompositionSet,
    /// Layout-declared composition edges, kept apart from the built-in set
    /// so the ruleset generator can verify their sources are bound.
    pub declared_compositions: Vec<parser::DeclaredComposition>,
}

/// Parses a layout document and classifies it for the given arrangement.
pub fn compile_layout(input: &str, arrangement: Arrangement) -> Result<CompiledLayout> {
    let model = parser::parse_layout(input)?;

    let remapped: Vec<KeyBinding> = model
        .bindings
        .iter()
        .map(|b| remap_binding(b, arrangement))
        .collect();
    let classified = classify(&remapped)?;

    let mut compositions = CompositionSet::standard();
    for decl in &model.declared_compositions {
        compositions.add_declared(decl.source.clone(), decl.target.clone(), decl.kind)?;
    }

    Ok(CompiledLayout {
        name: model.name,
        arrangement,
        classified,
        compositions,
        declared_compositions: model.declared_compositions,
    })
}

/// Both artifacts for one arrangement, as final file contents.
#[derive(Debug)]
pub struct Artifacts {
    pub table: String,
    pub ruleset: String,
}

/// Generates both artifacts from a layout document.
pub fn generate_artifacts(input: &str, arrangement: Arrangement) -> Result<Artifacts> {
    let compiled = compile_layout(input, arrangement)?;
    let table = table::generate(&compiled);
    let ruleset = rules::generate(&compiled)?;
    let ruleset = rules::render_json(&ruleset);
    Ok(Artifacts { table, ruleset })
}

/// Reads a layout file and writes the four artifacts (table and ruleset,
/// once per supported arrangement) next to it or into `out_dir`. Returns
/// the written paths.
pub fn convert_layout_file(input_path: &Path, out_dir: Option<&Path>) -> Result<Vec<PathBuf>> {
    let input = fs::read_to_string(input_path)?;
    let stem = input_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("layout");
    let dir = out_dir
        .map(Path::to_path_buf)
        .or_else(|| input_path.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."));

    let mut written = Vec::new();
    for arrangement in Arrangement::ALL {
        let artifacts = generate_artifacts(&input, arrangement)?;

        let table_path = dir.join(format!("{stem}-{}.tsv", arrangement.label()));
        fs::write(&table_path, artifacts.table)?;
        written.push(table_path);

        let ruleset_path = dir.join(format!("{stem}-karabiner-{}.json", arrangement.label()));
        fs::write(&ruleset_path, artifacts.ruleset)?;
        written.push(ruleset_path);
    }
    Ok(written)
}
