//! Design node model.
//!
//! Mirrors the node JSON produced by the design tool's REST API. Every optional
//! field is read leniently: a missing, `null` or malformed value becomes
//! "absent" instead of failing the whole tree, so a half-broken node still
//! renders with whatever styling could be recovered.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// A node in the design tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignNode {
    /// Stable node id. Survives repeated fetches of the same design element.
    #[serde(default, deserialize_with = "or_default")]
    pub id: String,
    #[serde(rename = "type", default, deserialize_with = "or_default")]
    pub node_type: NodeType,
    #[serde(default, deserialize_with = "or_default")]
    pub name: String,
    #[serde(default = "default_true", deserialize_with = "visible_flag")]
    pub visible: bool,
    #[serde(default, deserialize_with = "lenient")]
    pub x: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub y: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub absolute_bounding_box: Option<BoundingBox>,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub fills: Vec<Paint>,
    #[serde(default, deserialize_with = "or_default")]
    pub style: NodeStyle,
    #[serde(default, deserialize_with = "lenient")]
    pub background_color: Option<Rgba>,
    #[serde(default, deserialize_with = "lenient")]
    pub corner_radius: Option<f64>,

    // Auto layout
    #[serde(default, deserialize_with = "or_default")]
    pub layout_mode: LayoutMode,
    #[serde(default, deserialize_with = "lenient")]
    pub item_spacing: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub padding_left: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub padding_right: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub padding_top: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub padding_bottom: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub primary_axis_align_items: Option<AxisAlign>,
    #[serde(default, deserialize_with = "lenient")]
    pub counter_axis_align_items: Option<AxisAlign>,

    // Placement within the parent
    #[serde(default, deserialize_with = "or_default")]
    pub layout_positioning: LayoutPositioning,
    #[serde(default, deserialize_with = "lenient")]
    pub constraints: Option<Constraints>,
    #[serde(default, deserialize_with = "lenient")]
    pub layout_align: Option<LayoutAlign>,
    #[serde(default, deserialize_with = "lenient")]
    pub layout_grow: Option<f64>,

    /// Text content of TEXT nodes.
    #[serde(default, deserialize_with = "lenient")]
    pub characters: Option<String>,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub children: Vec<DesignNode>,
    /// Prototype link target; its presence marks the node as interactive.
    #[serde(rename = "transitionNodeID", default, deserialize_with = "lenient")]
    pub transition_node_id: Option<String>,
    /// Designer-provided description, used as accessibility text.
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,
}

impl DesignNode {
    /// Create a visible node with no styling.
    pub fn new(id: impl Into<String>, node_type: NodeType) -> Self {
        Self {
            id: id.into(),
            node_type,
            name: String::new(),
            visible: true,
            x: None,
            y: None,
            absolute_bounding_box: None,
            fills: Vec::new(),
            style: NodeStyle::default(),
            background_color: None,
            corner_radius: None,
            layout_mode: LayoutMode::None,
            item_spacing: None,
            padding_left: None,
            padding_right: None,
            padding_top: None,
            padding_bottom: None,
            primary_axis_align_items: None,
            counter_axis_align_items: None,
            layout_positioning: LayoutPositioning::Auto,
            constraints: None,
            layout_align: None,
            layout_grow: None,
            characters: None,
            children: Vec::new(),
            transition_node_id: None,
            description: None,
        }
    }

    /// Set the node name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Add a fill.
    pub fn with_fill(mut self, paint: Paint) -> Self {
        self.fills.push(paint);
        self
    }

    /// Set the absolute bounding box.
    pub fn with_bounds(mut self, x: f64, y: f64, width: f64, height: f64) -> Self {
        self.absolute_bounding_box = Some(BoundingBox { x, y, width, height });
        self
    }

    /// Set the text content.
    pub fn with_characters(mut self, text: impl Into<String>) -> Self {
        self.characters = Some(text.into());
        self
    }

    /// Add a child node.
    pub fn with_child(mut self, child: DesignNode) -> Self {
        self.children.push(child);
        self
    }

    /// Fills that are not hidden.
    pub fn visible_fills(&self) -> impl Iterator<Item = &Paint> {
        self.fills.iter().filter(|paint| paint.visible)
    }

    /// Check if any visible fill is an image.
    pub fn has_image_fill(&self) -> bool {
        self.visible_fills()
            .any(|paint| paint.paint_type == PaintType::Image)
    }

    /// Check if the node is vector artwork.
    pub fn is_vector(&self) -> bool {
        matches!(
            self.node_type,
            NodeType::Vector | NodeType::BooleanOperation
        )
    }

    /// Check if the node should be exported as an image asset.
    pub fn is_asset(&self) -> bool {
        self.is_vector() || self.has_image_fill()
    }

    /// Check if the node carries a prototype link.
    pub fn is_interactive(&self) -> bool {
        self.transition_node_id
            .as_deref()
            .is_some_and(|target| !target.is_empty())
    }

    /// Check if the node is absolutely positioned inside its parent.
    pub fn is_absolute(&self) -> bool {
        self.layout_positioning == LayoutPositioning::Absolute
    }

    /// Padding edges in left, right, top, bottom order. Absent edges are zero.
    pub fn paddings(&self) -> [f64; 4] {
        [
            self.padding_left.unwrap_or(0.0),
            self.padding_right.unwrap_or(0.0),
            self.padding_top.unwrap_or(0.0),
            self.padding_bottom.unwrap_or(0.0),
        ]
    }

    /// Non-empty description, if any.
    pub fn description(&self) -> Option<&str> {
        self.description
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }
}

/// Node types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeType {
    Document,
    Canvas,
    Frame,
    Group,
    Component,
    Instance,
    Text,
    Vector,
    BooleanOperation,
    Rectangle,
    Ellipse,
    #[default]
    #[serde(other)]
    Other,
}

/// Axis-aligned box in absolute canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// A color with normalized float components.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    #[serde(default)]
    pub r: f64,
    #[serde(default)]
    pub g: f64,
    #[serde(default)]
    pub b: f64,
    #[serde(default = "default_one")]
    pub a: f64,
}

impl Rgba {
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Convert to 8-bit channels.
    pub fn to_rgb8(&self) -> [u8; 3] {
        [channel(self.r), channel(self.g), channel(self.b)]
    }

    /// Convert to a lowercase `#rrggbb` string.
    pub fn to_hex(&self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }
}

fn channel(value: f64) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// A fill paint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paint {
    #[serde(rename = "type", default, deserialize_with = "or_default")]
    pub paint_type: PaintType,
    #[serde(default, deserialize_with = "lenient")]
    pub color: Option<Rgba>,
    #[serde(default = "default_one", deserialize_with = "opacity")]
    pub opacity: f64,
    #[serde(default = "default_true", deserialize_with = "visible_flag")]
    pub visible: bool,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub gradient_stops: Vec<ColorStop>,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub gradient_handle_positions: Vec<Vector2>,
}

impl Paint {
    /// Create a visible, opaque solid paint.
    pub fn solid(color: Rgba) -> Self {
        Self {
            paint_type: PaintType::Solid,
            color: Some(color),
            opacity: 1.0,
            visible: true,
            gradient_stops: Vec::new(),
            gradient_handle_positions: Vec::new(),
        }
    }

    /// Create a visible image paint.
    pub fn image() -> Self {
        Self {
            paint_type: PaintType::Image,
            color: None,
            ..Self::solid(Rgba::rgb(0.0, 0.0, 0.0))
        }
    }

    /// Create a linear gradient through the given stops.
    pub fn linear_gradient(stops: Vec<ColorStop>) -> Self {
        Self {
            paint_type: PaintType::GradientLinear,
            color: None,
            gradient_stops: stops,
            ..Self::solid(Rgba::rgb(0.0, 0.0, 0.0))
        }
    }
}

/// Paint types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaintType {
    Solid,
    GradientLinear,
    Image,
    #[default]
    #[serde(other)]
    Other,
}

/// A gradient stop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    #[serde(default)]
    pub position: f64,
    pub color: Rgba,
}

/// A point in normalized paint space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

/// Node-level style block: typography plus explicit sizing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeStyle {
    #[serde(default, deserialize_with = "lenient")]
    pub font_size: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub font_weight: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub text_align_horizontal: Option<TextAlign>,
    #[serde(default, deserialize_with = "lenient")]
    pub color: Option<Rgba>,
    #[serde(default, deserialize_with = "lenient")]
    pub width: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub height: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub background_color: Option<Rgba>,
    #[serde(default, deserialize_with = "lenient")]
    pub border_radius: Option<f64>,
}

/// Auto-layout direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayoutMode {
    Horizontal,
    Vertical,
    #[default]
    #[serde(other)]
    None,
}

/// Alignment along an auto-layout axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AxisAlign {
    Min,
    Max,
    Center,
    SpaceBetween,
    Baseline,
    #[serde(other)]
    Other,
}

/// Whether a child takes part in its parent's auto layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayoutPositioning {
    Absolute,
    #[default]
    #[serde(other)]
    Auto,
}

/// Cross-axis behavior of an auto-layout child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayoutAlign {
    Inherit,
    Stretch,
    Min,
    Center,
    Max,
    #[serde(other)]
    Other,
}

/// Constraint anchors relative to the parent frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Constraints {
    #[serde(default)]
    pub horizontal: HorizontalConstraint,
    #[serde(default)]
    pub vertical: VerticalConstraint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HorizontalConstraint {
    #[default]
    Left,
    Right,
    Center,
    LeftRight,
    Scale,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerticalConstraint {
    #[default]
    Top,
    Bottom,
    Center,
    TopBottom,
    Scale,
    #[serde(other)]
    Other,
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextAlign {
    Left,
    Center,
    Right,
    Justified,
    #[serde(other)]
    Other,
}

fn default_true() -> bool {
    true
}

fn default_one() -> f64 {
    1.0
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(lenient(deserializer)?.unwrap_or_default())
}

fn visible_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient(deserializer)?.unwrap_or(true))
}

fn opacity<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<f64> = lenient(deserializer)?;
    Ok(value.map(|value| value.clamp(0.0, 1.0)).unwrap_or(1.0))
}

fn lenient_seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}
