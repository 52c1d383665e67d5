//! Zone-bounded merge of regenerated markup into hand-edited files.
//!
//! Generated files mark the region the generator owns with a pair of
//! comment markers. On regeneration [`ZoneMerger`] swaps in the new markup
//! between the markers and leaves the rest of the file alone. Inside the
//! zone, [`StyleReconciler`] matches elements by their `data-mcp-id` and
//! carries hand-added interaction and arbitrary-value classes into the new
//! markup.
//!
//! # Example
//!
//! ```
//! use sprout_core::{ZONE_BEGIN, ZONE_END};
//! use sprout_merge::ZoneMerger;
//!
//! let existing = format!(
//!     "const x = 1;\n{ZONE_BEGIN}<div className=\"p-4 hover:shadow\" data-mcp-id=\"1:1\" />{ZONE_END}\n"
//! );
//! let generated = format!("{ZONE_BEGIN}<div className=\"p-6\" data-mcp-id=\"1:1\" />{ZONE_END}\n");
//!
//! let merged = ZoneMerger::default().merge(&existing, &generated);
//! assert!(merged.starts_with("const x = 1;\n"));
//! assert!(merged.contains("className=\"hover:shadow p-6\""));
//! ```

pub mod reconcile;
pub mod scanner;
pub mod zone;

pub use reconcile::{IdClassMap, MergeOptions, StyleReconciler, DEFAULT_PROTECTED_PREFIXES};
pub use scanner::{scan_open_tags, AttrValue, Attribute, OpenTag};
pub use zone::{add_missing_imports, find_zone, ManagedZone, ZoneMerger};
