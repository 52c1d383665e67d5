//! JSX generation from design trees.
//!
//! [`MarkupEmitter`] walks a frame and emits one JSX element per visible
//! node, with utility classes from `sprout-style`, tags from the
//! [`TagResolver`] and the identity attribute on every element. Wrapped by
//! [`MarkupEmitter::generate_component`], the markup becomes a full
//! component file with its managed zone, imports and asset manifest.
//!
//! # Example
//!
//! ```
//! use sprout_codegen::MarkupEmitter;
//! use sprout_core::{DesignNode, NodeType};
//! use sprout_style::StyleResolver;
//!
//! let resolver = StyleResolver::default();
//! let emitter = MarkupEmitter::new(&resolver, None);
//! let frame = DesignNode::new("1:1", NodeType::Frame).with_name("Profile");
//!
//! let generated = emitter.generate_component("Profile", &frame);
//! assert!(generated.source.contains("export const Profile = () => {"));
//! assert!(generated.source.contains("data-mcp-id=\"1:1\""));
//! ```

pub mod discover;
pub mod emitter;
pub mod error;
pub mod registry;
pub mod scaffold;
pub mod tags;

pub use discover::scan_components;
pub use emitter::{
    escape_attribute, escape_text, AssetRecord, AssetType, EmitOptions, MarkupEmitter,
    RenderContext, RenderState,
};
pub use error::{RegistryError, Result};
pub use registry::{
    ComponentMapping, ComponentRegistry, JsonFileStore, MemoryStore, RegistryDocument,
    RegistryStore, REGISTRY_VERSION,
};
pub use scaffold::{component_name, GeneratedComponent};
pub use tags::{semantic_tag, ResolvedTag, TagResolver};
