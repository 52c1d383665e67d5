//! Discovery of existing components in a source tree.

use std::fs;
use std::path::{Component, Path};
use std::sync::OnceLock;

use convert_case::{Case, Casing};
use log::{debug, warn};
use regex::Regex;
use walkdir::{DirEntry, WalkDir};

use crate::error::Result;
use crate::registry::ComponentMapping;

/// Directories never descended into.
pub const SKIPPED_DIRS: &[&str] = &["node_modules", ".git", "dist", "build", ".next"];

const SOURCE_EXTENSIONS: &[&str] = &["jsx", "tsx", "js", "ts"];

fn export_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?m)^\s*export\s+(?:default\s+)?(?:const|function)\s+([A-Z][A-Za-z0-9]*)")
            .expect("export pattern is valid")
    })
}

/// Walk `root` and build a mapping for every exported PascalCase component.
///
/// Triggers are the Title Case form of the component name (`UserProfile`
/// becomes `User Profile`). Paths are `@/` plus the file path relative to
/// `root`, without extension. Unreadable files are skipped.
pub fn scan_components(root: &Path) -> Result<Vec<ComponentMapping>> {
    let mut mappings: Vec<ComponentMapping> = Vec::new();

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_skipped(entry));

    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() || !is_source(entry.path()) {
            continue;
        }

        let source = match fs::read_to_string(entry.path()) {
            Ok(source) => source,
            Err(err) => {
                warn!(path = entry.path().display().to_string().as_str(), error = err.to_string().as_str(); "Skipping unreadable file");
                continue;
            }
        };
        let Some(import_path) = import_path(root, entry.path()) else {
            continue;
        };

        for capture in export_pattern().captures_iter(&source) {
            let component = &capture[1];
            if mappings
                .iter()
                .any(|m| m.component == component && m.path == import_path)
            {
                continue;
            }
            debug!(component = component, path = import_path.as_str(); "Found component");
            mappings.push(ComponentMapping::new(
                component.to_case(Case::Title),
                component,
                import_path.clone(),
            ));
        }
    }

    Ok(mappings)
}

fn is_skipped(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| SKIPPED_DIRS.contains(&name))
}

fn is_source(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}

/// `@/`-prefixed import path of `file` relative to `root`.
fn import_path(root: &Path, file: &Path) -> Option<String> {
    let relative = file.strip_prefix(root).ok()?.with_extension("");
    let parts: Vec<&str> = relative
        .components()
        .map(|part| match part {
            Component::Normal(name) => name.to_str(),
            _ => None,
        })
        .collect::<Option<_>>()?;
    Some(format!("@/{}", parts.join("/")))
}
