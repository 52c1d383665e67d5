//! Utility-class resolution for design nodes.
//!
//! Two layers:
//!
//! - [`StyleResolver`] snaps raw design values (colors, pixel lengths, radii)
//!   onto a fixed utility vocabulary and falls back to bracketed literals
//!   (`bg-[#ff00ff]`, `w-[17px]`) when nothing is close enough.
//! - [`LayoutClassBuilder`] walks one node's sizing, positioning, auto
//!   layout, fills, typography and corner radius and produces its ordered
//!   [`ClassList`].
//!
//! # Example
//!
//! ```
//! use sprout_core::Rgba;
//! use sprout_style::{spacing_scale, StyleResolver};
//!
//! let resolver = StyleResolver::default();
//! assert_eq!(resolver.color_token(&Rgba::rgb(0.937, 0.267, 0.267)), Some("red-500"));
//! assert_eq!(spacing_scale(16.0).as_deref(), Some("4"));
//! ```

pub mod layout;
pub mod resolver;

pub use layout::{ClassList, LayoutClassBuilder};
pub use resolver::{
    format_px, radius_class, spacing_class, spacing_scale, Palette, StyleResolver, Swatch,
    DEFAULT_COLOR_THRESHOLD,
};
