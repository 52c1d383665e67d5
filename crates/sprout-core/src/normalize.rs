//! Frame extraction from document and page hierarchies.

use log::{debug, info};
use serde_json::Value;

use crate::error::{CoreError, Result};
use crate::node::{DesignNode, NodeType};

/// Collect the renderable top-level frames under `node`.
///
/// A DOCUMENT yields the FRAME children of each of its CANVAS pages, a
/// CANVAS yields its FRAME children, and a FRAME yields itself. Anything
/// else yields nothing; an empty result means there is nothing to render.
pub fn extract_frames(node: &DesignNode) -> Vec<&DesignNode> {
    let frames: Vec<&DesignNode> = match node.node_type {
        NodeType::Document => node
            .children
            .iter()
            .filter(|page| page.node_type == NodeType::Canvas)
            .flat_map(page_frames)
            .collect(),
        NodeType::Canvas => page_frames(node).collect(),
        NodeType::Frame => vec![node],
        _ => Vec::new(),
    };

    info!(
        root_id = node.id.as_str(),
        frames = frames.len();
        "Extracted top-level frames"
    );
    frames
}

fn page_frames(page: &DesignNode) -> impl Iterator<Item = &DesignNode> {
    page.children
        .iter()
        .filter(|child| child.node_type == NodeType::Frame)
}

/// Parse design JSON into its root nodes.
///
/// Accepts a bare node, a file response (`{"document": {...}}`) or a
/// node-batch response (`{"nodes": {"<id>": {"document": {...}}}}`).
/// Batch entries keep their response order.
pub fn parse_design(json: &str) -> Result<Vec<DesignNode>> {
    let value: Value = serde_json::from_str(json)?;
    let Value::Object(mut object) = value else {
        return Err(CoreError::InvalidDesign(
            "expected a JSON object at the top level".into(),
        ));
    };

    if let Some(document) = object.remove("document") {
        debug!("Reading file response");
        return Ok(vec![serde_json::from_value(document)?]);
    }

    if let Some(Value::Object(nodes)) = object.remove("nodes") {
        debug!(entries = nodes.len(); "Reading node batch response");
        return nodes
            .into_iter()
            .filter_map(|(_, mut entry)| entry.get_mut("document").map(Value::take))
            .map(|document| serde_json::from_value(document).map_err(CoreError::from))
            .collect();
    }

    if !object.contains_key("type") && !object.contains_key("id") {
        return Err(CoreError::InvalidDesign(
            "object is neither a node nor an API response".into(),
        ));
    }

    Ok(vec![serde_json::from_value(Value::Object(object))?])
}
