//! Byte-stable markers shared by the emitter and the merge engine.
//!
//! Generated files and the merge engine agree on these exact strings. Changing
//! any of them orphans every file generated before the change.

/// Opens the managed zone.
pub const ZONE_BEGIN: &str = "{/* @mcp-begin:view */}";

/// Closes the managed zone.
pub const ZONE_END: &str = "{/* @mcp-end:view */}";

/// Attribute carrying the design node id on every generated element.
pub const ID_ATTRIBUTE: &str = "data-mcp-id";

/// Attribute carrying the utility classes.
pub const CLASS_ATTRIBUTE: &str = "className";
