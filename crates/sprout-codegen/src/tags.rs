//! Tag selection: registered components first, then semantic HTML.

use log::trace;
use sprout_core::{DesignNode, NodeType};

use crate::registry::{ComponentMapping, ComponentRegistry};

/// Highest heading level HTML provides.
pub const MAX_HEADING_LEVEL: u8 = 6;

/// Tags that handle clicks and keyboard focus on their own.
const NATIVE_INTERACTIVE: &[&str] = &["button", "a", "input", "select", "textarea"];

/// Tags that never have children.
const VOID_TAGS: &[&str] = &["input", "img"];

/// Name keywords mapped to fixed tags, checked in order after headings.
const NAME_TAGS: &[(&[&str], &str)] = &[
    (&["label"], "label"),
    (&["button", "btn"], "button"),
    (&["input", "field"], "input"),
    (&["header"], "header"),
    (&["nav"], "nav"),
    (&["footer"], "footer"),
    (&["section"], "section"),
    (&["card"], "article"),
];

/// The tag chosen for a node.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedTag<'a> {
    /// A registered component.
    Component(&'a ComponentMapping),
    /// A plain HTML element.
    Element(String),
}

impl ResolvedTag<'_> {
    pub fn name(&self) -> &str {
        match self {
            Self::Component(mapping) => &mapping.component,
            Self::Element(tag) => tag,
        }
    }

    /// Check if the element handles interaction without extra ARIA props.
    pub fn is_natively_interactive(&self) -> bool {
        matches!(self, Self::Element(tag) if NATIVE_INTERACTIVE.contains(&tag.as_str()))
    }

    /// Check if the element must self-close.
    pub fn is_void(&self) -> bool {
        matches!(self, Self::Element(tag) if VOID_TAGS.contains(&tag.as_str()))
    }
}

/// Chooses the tag for each node.
#[derive(Debug, Clone, Copy, Default)]
pub struct TagResolver<'a> {
    registry: Option<&'a ComponentRegistry>,
}

impl<'a> TagResolver<'a> {
    pub fn new(registry: Option<&'a ComponentRegistry>) -> Self {
        Self { registry }
    }

    /// Resolve the tag for `node` at the given heading level.
    pub fn resolve(&self, node: &DesignNode, heading_level: u8) -> ResolvedTag<'a> {
        if let Some(mapping) = self.registry.and_then(|r| r.find_match(&node.name)) {
            trace!(node_id = node.id.as_str(), component = mapping.component.as_str(); "Registry hit");
            return ResolvedTag::Component(mapping);
        }
        ResolvedTag::Element(semantic_tag(node, heading_level))
    }
}

/// Infer an HTML tag from the node name and type.
pub fn semantic_tag(node: &DesignNode, heading_level: u8) -> String {
    let name = node.name.to_lowercase();

    if name.contains("heading") || name.contains("title") {
        return format!("h{}", heading_level.clamp(1, MAX_HEADING_LEVEL));
    }

    let by_name = NAME_TAGS
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|keyword| name.contains(keyword)))
        .map(|(_, tag)| *tag);

    match by_name {
        Some(tag) => tag.to_string(),
        None if node.node_type == NodeType::Text => "p".to_string(),
        None => "div".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str, node_type: NodeType) -> DesignNode {
        DesignNode::new("1:1", node_type).with_name(name)
    }

    #[test]
    fn test_semantic_tags() {
        let cases = [
            ("Section Heading", NodeType::Text, "h3"),
            ("Page Title", NodeType::Text, "h3"),
            ("Email Label", NodeType::Text, "label"),
            ("Submit Btn", NodeType::Frame, "button"),
            ("Email Field", NodeType::Frame, "input"),
            ("Site Header", NodeType::Frame, "header"),
            ("Main Nav", NodeType::Frame, "nav"),
            ("Footer", NodeType::Frame, "footer"),
            ("Pricing Section", NodeType::Frame, "section"),
            ("Product Card", NodeType::Frame, "article"),
            ("Body copy", NodeType::Text, "p"),
            ("Frame 12", NodeType::Frame, "div"),
        ];
        for (name, node_type, expected) in cases {
            assert_eq!(semantic_tag(&named(name, node_type), 3), expected, "{name}");
        }
    }

    #[test]
    fn test_title_follows_heading_level() {
        let node = named("Card Title", NodeType::Text);
        assert_eq!(semantic_tag(&node, 2), "h2");
        assert_eq!(semantic_tag(&node, 4), "h4");
        assert_eq!(semantic_tag(&node, 0), "h1");
    }

    #[test]
    fn test_heading_level_is_clamped() {
        let node = named("Heading", NodeType::Text);
        assert_eq!(semantic_tag(&node, 9), "h6");
    }

    #[test]
    fn test_registry_takes_precedence() {
        let registry = ComponentRegistry::in_memory(vec![ComponentMapping::new(
            "Button",
            "Button",
            "@/components/ui/button",
        )]);
        let resolver = TagResolver::new(Some(&registry));

        let tag = resolver.resolve(&named("Primary Button", NodeType::Frame), 2);
        assert_eq!(tag.name(), "Button");
        assert!(!tag.is_natively_interactive());

        let tag = resolver.resolve(&named("Card", NodeType::Frame), 2);
        assert_eq!(tag, ResolvedTag::Element("article".into()));
    }

    #[test]
    fn test_tag_flags() {
        assert!(ResolvedTag::Element("button".into()).is_natively_interactive());
        assert!(!ResolvedTag::Element("div".into()).is_natively_interactive());
        assert!(ResolvedTag::Element("input".into()).is_void());
        assert!(!ResolvedTag::Element("p".into()).is_void());
    }
}
