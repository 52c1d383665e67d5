//! Full component files around the emitted markup.

use convert_case::{Case, Casing};
use log::info;
use sprout_core::{DesignNode, ZONE_BEGIN, ZONE_END};

use crate::emitter::{AssetRecord, MarkupEmitter, RenderContext, RenderState};

/// Depth of the frame's root element inside the scaffold.
const ZONE_DEPTH: usize = 3;

/// A generated component file and what it needs.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedComponent {
    /// Component identifier.
    pub name: String,
    /// Complete file text.
    pub source: String,
    /// Assets to export, in discovery order.
    pub assets: Vec<AssetRecord>,
    /// Import statements of registered components, sorted.
    pub imports: Vec<String>,
}

impl GeneratedComponent {
    /// File name for the component source.
    pub fn file_name(&self) -> String {
        format!("{}.jsx", self.name)
    }
}

/// Turn a design name into a component identifier.
///
/// `"user profile"` becomes `UserProfile`. Names without usable characters
/// become `Component`, and a leading digit gets the same prefix.
pub fn component_name(raw: &str) -> String {
    let name: String = raw
        .to_case(Case::Pascal)
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect();
    match name.chars().next() {
        None => "Component".to_string(),
        Some(first) if first.is_ascii_digit() => format!("Component{}", name),
        Some(_) => name,
    }
}

impl MarkupEmitter<'_> {
    /// Generate a complete component file for `frame`.
    ///
    /// The frame's markup sits between the zone markers inside a fragment,
    /// so later merges can replace it without touching the rest of the file.
    pub fn generate_component(&self, name: &str, frame: &DesignNode) -> GeneratedComponent {
        let name = component_name(name);
        let mut state = RenderState::new();
        let ctx = RenderContext::root(self.options().root_heading_level, ZONE_DEPTH);
        let markup = self.render(frame, &mut state, ctx);
        let (assets, mut imports) = state.into_parts();
        imports.sort();

        let zone_indent = "  ".repeat(ZONE_DEPTH);
        let mut lines = vec!["import React from 'react';".to_string()];
        lines.extend(imports.iter().cloned());
        lines.push(String::new());
        lines.push(format!("export const {} = () => {{", name));
        lines.push("  return (".to_string());
        lines.push("    <>".to_string());
        lines.push(format!("{}{}", zone_indent, ZONE_BEGIN));
        if !markup.is_empty() {
            lines.push(markup);
        }
        lines.push(format!("{}{}", zone_indent, ZONE_END));
        lines.push("    </>".to_string());
        lines.push("  );".to_string());
        lines.push("};".to_string());
        lines.push(String::new());
        lines.push(format!("export default {};", name));

        let mut source = lines.join("\n");
        source.push('\n');

        info!(
            component = name.as_str(),
            assets = assets.len(),
            imports = imports.len();
            "Generated component"
        );

        GeneratedComponent {
            name,
            source,
            assets,
            imports,
        }
    }
}
