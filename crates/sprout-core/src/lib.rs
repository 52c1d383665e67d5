//! Core types for the Sprout design-to-code compiler.
//!
//! This crate holds the design node model deserialized from design-tool JSON
//! and the normalization step that extracts the renderable top-level frames,
//! plus the [`markers`] that generated files carry.
//!
//! # Example
//!
//! ```
//! use sprout_core::{extract_frames, parse_design};
//!
//! let roots = parse_design(r#"{"id": "1:1", "type": "FRAME", "name": "Card"}"#).unwrap();
//! let frames = extract_frames(&roots[0]);
//! assert_eq!(frames.len(), 1);
//! ```

pub mod error;
pub mod markers;
pub mod node;
pub mod normalize;

pub use error::{CoreError, Result};
pub use markers::{CLASS_ATTRIBUTE, ID_ATTRIBUTE, ZONE_BEGIN, ZONE_END};
pub use node::{
    AxisAlign, BoundingBox, ColorStop, Constraints, DesignNode, HorizontalConstraint, LayoutAlign,
    LayoutMode, LayoutPositioning, NodeStyle, NodeType, Paint, PaintType, Rgba, TextAlign, Vector2,
    VerticalConstraint,
};
pub use normalize::{extract_frames, parse_design};
