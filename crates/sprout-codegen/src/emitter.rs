//! Recursive JSX emission.
//!
//! One element per node, two spaces of indentation per depth level. Every
//! element carries the identity attribute as its last prop so that later
//! merges can match it back to the design node.

use indexmap::{IndexMap, IndexSet};
use log::trace;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sprout_core::{BoundingBox, DesignNode, NodeType, ID_ATTRIBUTE};
use sprout_style::{ClassList, LayoutClassBuilder, StyleResolver};

use crate::registry::ComponentRegistry;
use crate::tags::{ResolvedTag, TagResolver, MAX_HEADING_LEVEL};

const INDENT: &str = "  ";

/// Emission settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitOptions {
    /// URL prefix for exported assets.
    pub asset_prefix: String,
    /// Heading level used for headings at the top of a frame.
    pub root_heading_level: u8,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            asset_prefix: "/assets/".to_string(),
            root_heading_level: 2,
        }
    }
}

/// Kind of exported asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetType {
    Svg,
    Png,
}

impl AssetType {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
        }
    }
}

/// An image the caller must export from the design tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRecord {
    pub id: String,
    pub name: String,
    pub filename: String,
    #[serde(rename = "type")]
    pub asset_type: AssetType,
}

impl AssetRecord {
    fn for_node(node: &DesignNode) -> Self {
        let asset_type = if node.is_vector() {
            AssetType::Svg
        } else {
            AssetType::Png
        };
        let name = match sanitize(&node.name) {
            name if name.is_empty() => format!("asset_{}", sanitize(&node.id)),
            name => name,
        };
        let filename = format!("{}.{}", name, asset_type.extension());
        Self {
            id: node.id.clone(),
            name,
            filename,
            asset_type,
        }
    }
}

/// Lowercase, with every run of non-alphanumeric characters collapsed to `_`.
fn sanitize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_separator = false;
    for c in raw.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !out.is_empty() {
                out.push('_');
            }
            pending_separator = false;
            out.push(c.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }
    out
}

/// Assets and imports collected across one render.
#[derive(Debug, Clone, Default)]
pub struct RenderState {
    assets: IndexMap<String, AssetRecord>,
    imports: IndexSet<String>,
}

impl RenderState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the asset for `node`. The first record for an id is kept.
    pub fn register_asset(&mut self, node: &DesignNode) -> &AssetRecord {
        self.assets
            .entry(node.id.clone())
            .or_insert_with(|| AssetRecord::for_node(node))
    }

    pub fn add_import(&mut self, line: String) {
        self.imports.insert(line);
    }

    /// Assets in discovery order.
    pub fn assets(&self) -> impl Iterator<Item = &AssetRecord> {
        self.assets.values()
    }

    /// Imports in discovery order.
    pub fn imports(&self) -> impl Iterator<Item = &str> {
        self.imports.iter().map(String::as_str)
    }

    pub fn into_parts(self) -> (Vec<AssetRecord>, Vec<String>) {
        (
            self.assets.into_values().collect(),
            self.imports.into_iter().collect(),
        )
    }
}

/// Position of a node in the tree being rendered.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'n> {
    pub parent_bbox: Option<&'n BoundingBox>,
    pub heading_level: u8,
    pub depth: usize,
}

impl<'n> RenderContext<'n> {
    pub fn root(heading_level: u8, depth: usize) -> Self {
        Self {
            parent_bbox: None,
            heading_level,
            depth,
        }
    }

    /// Context for the children of `node`.
    pub fn child(&self, node: &'n DesignNode) -> Self {
        let heading_level = if node.name.to_lowercase().contains("section") {
            (self.heading_level + 1).min(MAX_HEADING_LEVEL)
        } else {
            self.heading_level
        };
        Self {
            parent_bbox: node.absolute_bounding_box.as_ref(),
            heading_level,
            depth: self.depth + 1,
        }
    }
}

/// Compiles design nodes to JSX markup.
pub struct MarkupEmitter<'a> {
    resolver: &'a StyleResolver,
    tags: TagResolver<'a>,
    options: EmitOptions,
}

impl<'a> MarkupEmitter<'a> {
    pub fn new(resolver: &'a StyleResolver, registry: Option<&'a ComponentRegistry>) -> Self {
        Self {
            resolver,
            tags: TagResolver::new(registry),
            options: EmitOptions::default(),
        }
    }

    pub fn with_options(mut self, options: EmitOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &EmitOptions {
        &self.options
    }

    /// Render `node` and its subtree. Hidden nodes render as an empty string.
    pub fn render<'n>(
        &self,
        node: &'n DesignNode,
        state: &mut RenderState,
        ctx: RenderContext<'n>,
    ) -> String {
        if !node.visible {
            trace!(node_id = node.id.as_str(); "Skipping hidden node");
            return String::new();
        }

        let indent = INDENT.repeat(ctx.depth);
        let classes = LayoutClassBuilder::new(self.resolver).build(node, ctx.parent_bbox);

        if node.is_asset() {
            let record = state.register_asset(node);
            let alt = node.description().unwrap_or(&node.name);
            let mut props = vec![
                format!("src=\"{}{}\"", self.options.asset_prefix, record.filename),
                format!("alt=\"{}\"", escape_attribute(alt)),
            ];
            props.extend(self.props(node, classes, None, false));
            return format!("{}<img {} />", indent, props.join(" "));
        }

        let tag = self.tags.resolve(node, ctx.heading_level);
        let mapping_props = match &tag {
            ResolvedTag::Component(mapping) => {
                state.add_import(mapping.import_line());
                Some(&mapping.props)
            }
            ResolvedTag::Element(_) => None,
        };
        let props = self.props(node, classes, mapping_props, tag.is_natively_interactive());
        let open = format!("{}<{} {}", indent, tag.name(), props.join(" "));

        if tag.is_void() {
            return format!("{} />", open);
        }

        if node.node_type == NodeType::Text {
            return match node.characters.as_deref().filter(|text| !text.is_empty()) {
                Some(text) => format!("{}>{}</{}>", open, escape_text(text), tag.name()),
                None => format!("{} />", open),
            };
        }

        let child_ctx = ctx.child(node);
        let children: Vec<String> = node
            .children
            .iter()
            .map(|child| self.render(child, state, child_ctx))
            .filter(|markup| !markup.is_empty())
            .collect();

        if children.is_empty() {
            return format!("{} />", open);
        }
        format!(
            "{}>\n{}\n{}</{}>",
            open,
            children.join("\n"),
            indent,
            tag.name()
        )
    }

    fn props(
        &self,
        node: &DesignNode,
        mut classes: ClassList,
        mapping_props: Option<&IndexMap<String, Value>>,
        natively_interactive: bool,
    ) -> Vec<String> {
        let interactive = node.is_interactive();
        let mut props = Vec::new();

        if interactive {
            classes.push("cursor-pointer");
        }
        if !classes.is_empty() {
            props.push(format!(
                "className=\"{}\"",
                escape_attribute(&classes.to_class_string())
            ));
        }

        for (name, value) in mapping_props.into_iter().flatten() {
            props.push(match value {
                Value::String(text) => format!("{}=\"{}\"", name, escape_attribute(text)),
                other => format!("{}={{{}}}", name, other),
            });
        }

        if interactive {
            props.push("onClick={() => {}}".to_string());
        }
        if let Some(description) = node.description() {
            props.push(format!("aria-label=\"{}\"", escape_attribute(description)));
        }
        if interactive && !natively_interactive {
            props.push("role=\"button\"".to_string());
            props.push("tabIndex={0}".to_string());
        }

        props.push(format!("{}=\"{}\"", ID_ATTRIBUTE, escape_attribute(&node.id)));
        props
    }
}

/// Escape a string for a double-quoted attribute value.
pub fn escape_attribute(value: &str) -> String {
    value.replace('"', "&quot;")
}

/// Escape text content so braces are not read as expressions.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '{' => out.push_str("{'{'}"),
            '}' => out.push_str("{'}'}"),
            c => out.push(c),
        }
    }
    out
}
