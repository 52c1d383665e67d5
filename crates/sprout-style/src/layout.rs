//! Per-node utility class construction.

use std::fmt;

use indexmap::IndexSet;
use log::trace;
use sprout_core::{
    AxisAlign, BoundingBox, DesignNode, HorizontalConstraint, LayoutAlign, LayoutMode, NodeType,
    Paint, PaintType, Rgba, TextAlign, Vector2, VerticalConstraint,
};

use crate::resolver::{format_px, radius_class, spacing_class, StyleResolver};

/// Widths above this are treated as full-page containers.
const SCREEN_WIDTH: f64 = 1200.0;

/// Insertion-ordered, deduplicated set of utility classes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList {
    classes: IndexSet<String>,
}

impl ClassList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a class. Empty strings and repeats are ignored.
    pub fn push(&mut self, class: impl Into<String>) {
        let class = class.into();
        if !class.is_empty() {
            self.classes.insert(class);
        }
    }

    pub fn contains(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }

    /// Space-separated class attribute value.
    pub fn to_class_string(&self) -> String {
        self.iter().collect::<Vec<_>>().join(" ")
    }
}

impl<S: Into<String>> Extend<S> for ClassList {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for class in iter {
            self.push(class);
        }
    }
}

impl fmt::Display for ClassList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_class_string())
    }
}

/// Builds the utility classes for a single node.
///
/// Classes are produced in a fixed order: sizing, absolute positioning,
/// auto layout, fills, typography, corner radius.
pub struct LayoutClassBuilder<'a> {
    resolver: &'a StyleResolver,
}

impl<'a> LayoutClassBuilder<'a> {
    pub fn new(resolver: &'a StyleResolver) -> Self {
        Self { resolver }
    }

    /// Build the class list for `node` placed inside a parent with the
    /// given bounding box.
    pub fn build(&self, node: &DesignNode, parent_bbox: Option<&BoundingBox>) -> ClassList {
        let mut classes = ClassList::new();

        self.sizing(node, &mut classes);
        self.positioning(node, parent_bbox, &mut classes);
        self.auto_layout(node, &mut classes);
        if node.node_type != NodeType::Text {
            self.fills(node, &mut classes);
        } else {
            self.typography(node, &mut classes);
        }
        if let Some(radius) = node
            .corner_radius
            .or(node.style.border_radius)
            .and_then(radius_class)
        {
            classes.push(radius);
        }

        trace!(node_id = node.id.as_str(), classes = classes.to_class_string().as_str(); "Built classes");
        classes
    }

    fn sizing(&self, node: &DesignNode, classes: &mut ClassList) {
        let stretches = node.layout_align == Some(LayoutAlign::Stretch);
        let grows = node.layout_grow.is_some_and(|grow| grow > 0.0);

        if stretches {
            classes.push("w-full");
        }
        if grows {
            classes.push("flex-1");
        }
        if !stretches && !grows {
            if let Some(width) = node.style.width {
                if width > SCREEN_WIDTH {
                    classes.extend(["w-full", "max-w-screen-xl", "mx-auto"]);
                } else {
                    classes.push(spacing_class("w", width));
                }
            }
        }
        if !grows {
            if let Some(height) = node.style.height {
                classes.push(spacing_class("h", height));
            }
        }
    }

    fn positioning(
        &self,
        node: &DesignNode,
        parent_bbox: Option<&BoundingBox>,
        classes: &mut ClassList,
    ) {
        if node.is_absolute() {
            classes.push("absolute");

            let bbox = node.absolute_bounding_box.as_ref();
            let (dx, dy) = match (bbox, parent_bbox) {
                (Some(own), Some(parent)) => (own.x - parent.x, own.y - parent.y),
                _ => (node.x.unwrap_or(0.0), node.y.unwrap_or(0.0)),
            };
            let constraints = node.constraints.unwrap_or_default();

            match (constraints.horizontal, bbox, parent_bbox) {
                (HorizontalConstraint::Center, _, _) => {
                    classes.extend(["left-1/2", "-translate-x-1/2"]);
                }
                (HorizontalConstraint::Right, Some(own), Some(parent)) => {
                    classes.push(offset_class("right", parent.width - dx - own.width));
                }
                _ => classes.push(offset_class("left", dx)),
            }

            match (constraints.vertical, bbox, parent_bbox) {
                (VerticalConstraint::Center, _, _) => {
                    classes.extend(["top-1/2", "-translate-y-1/2"]);
                }
                (VerticalConstraint::Bottom, Some(own), Some(parent)) => {
                    classes.push(offset_class("bottom", parent.height - dy - own.height));
                }
                _ => classes.push(offset_class("top", dy)),
            }
        } else if node.children.iter().any(DesignNode::is_absolute) {
            classes.push("relative");
        }
    }

    fn auto_layout(&self, node: &DesignNode, classes: &mut ClassList) {
        let direction = match node.layout_mode {
            LayoutMode::Horizontal => "flex-row",
            LayoutMode::Vertical => "flex-col",
            LayoutMode::None => return,
        };
        classes.extend(["flex", direction]);

        let justify = match node.primary_axis_align_items {
            Some(AxisAlign::Min) => Some("justify-start"),
            Some(AxisAlign::Max) => Some("justify-end"),
            Some(AxisAlign::Center) => Some("justify-center"),
            Some(AxisAlign::SpaceBetween) => Some("justify-between"),
            _ => None,
        };
        classes.extend(justify);

        let items = match node.counter_axis_align_items {
            Some(AxisAlign::Min) => Some("items-start"),
            Some(AxisAlign::Max) => Some("items-end"),
            Some(AxisAlign::Center) => Some("items-center"),
            Some(AxisAlign::Baseline) => Some("items-baseline"),
            _ => None,
        };
        classes.extend(items);

        if let Some(spacing) = node.item_spacing.filter(|spacing| *spacing > 0.0) {
            classes.push(spacing_class("gap", spacing));
        }

        let paddings = node.paddings();
        let [left, ..] = paddings;
        if left > 0.0 && paddings.iter().all(|edge| *edge == left) {
            classes.push(spacing_class("p", left));
        } else {
            for (prefix, edge) in ["pl", "pr", "pt", "pb"].into_iter().zip(paddings) {
                if edge > 0.0 {
                    classes.push(spacing_class(prefix, edge));
                }
            }
        }
    }

    fn fills(&self, node: &DesignNode, classes: &mut ClassList) {
        // Image-filled nodes are exported as assets
        if node.has_image_fill() {
            return;
        }

        for paint in node.visible_fills() {
            match paint.paint_type {
                PaintType::Solid => {
                    if let Some(color) = paint.color {
                        self.solid(&color, paint.opacity, classes);
                        return;
                    }
                }
                PaintType::GradientLinear => {
                    if self.gradient(paint, classes) {
                        return;
                    }
                }
                _ => {}
            }
        }

        let background = node
            .background_color
            .or(node.style.background_color)
            .filter(|color| color.a > 0.0);
        if let Some(color) = background {
            self.solid(&color, 1.0, classes);
        }
    }

    fn solid(&self, color: &Rgba, opacity: f64, classes: &mut ClassList) {
        classes.push(self.resolver.color_class("bg", color));
        if opacity < 1.0 {
            classes.push(format!("bg-opacity-{}", (opacity * 100.0).round() as i64));
        }
    }

    fn gradient(&self, paint: &Paint, classes: &mut ClassList) -> bool {
        let (Some(first), Some(last)) = (paint.gradient_stops.first(), paint.gradient_stops.last())
        else {
            return false;
        };
        let direction = gradient_direction(&paint.gradient_handle_positions);
        classes.push(format!("bg-gradient-to-{}", direction));
        classes.push(self.resolver.color_class("from", &first.color));
        classes.push(self.resolver.color_class("to", &last.color));
        true
    }

    fn typography(&self, node: &DesignNode, classes: &mut ClassList) {
        let style = &node.style;

        if let Some(size) = style.font_size {
            classes.push(format!("text-[{}]", format_px(size)));
        }

        match style.font_weight {
            Some(weight) if weight >= 700.0 => classes.push("font-bold"),
            Some(weight) if weight >= 600.0 => classes.push("font-semibold"),
            Some(weight) if weight >= 500.0 => classes.push("font-medium"),
            _ => {}
        }

        match style.text_align_horizontal {
            Some(TextAlign::Center) => classes.push("text-center"),
            Some(TextAlign::Right) => classes.push("text-right"),
            Some(TextAlign::Justified) => classes.push("text-justify"),
            _ => {}
        }

        let color = node
            .visible_fills()
            .find(|paint| paint.paint_type == PaintType::Solid)
            .and_then(|paint| paint.color)
            .or(style.color);
        if let Some(color) = color {
            classes.push(self.resolver.color_class("text", &color));
        }
    }
}

/// Offset utility, using the negative form for negative lengths.
fn offset_class(prefix: &str, px: f64) -> String {
    if px <= -0.5 {
        format!("-{}", spacing_class(prefix, -px))
    } else {
        spacing_class(prefix, px)
    }
}

/// Direction suffix for `bg-gradient-to-*` from the first two handles.
/// Paint space has y pointing down.
fn gradient_direction(handles: &[Vector2]) -> &'static str {
    const OCTANTS: [&str; 8] = ["r", "br", "b", "bl", "l", "tl", "t", "tr"];

    let [start, end, ..] = handles else {
        return "r";
    };
    let (dx, dy) = (end.x - start.x, end.y - start.y);
    if dx == 0.0 && dy == 0.0 {
        return "r";
    }
    let octant = (dy.atan2(dx).to_degrees() / 45.0).round() as i64;
    OCTANTS[octant.rem_euclid(8) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprout_core::{ColorStop, Constraints, LayoutPositioning};

    fn build(node: &DesignNode, parent: Option<&BoundingBox>) -> String {
        let resolver = StyleResolver::default();
        LayoutClassBuilder::new(&resolver)
            .build(node, parent)
            .to_class_string()
    }

    fn absolute(mut node: DesignNode) -> DesignNode {
        node.layout_positioning = LayoutPositioning::Absolute;
        node
    }

    #[test]
    fn test_class_list_dedup_and_order() {
        let mut classes = ClassList::new();
        classes.extend(["flex", "flex-col", "flex", ""]);
        classes.push("gap-4");
        assert_eq!(classes.len(), 3);
        assert_eq!(classes.to_string(), "flex flex-col gap-4");
    }

    #[test]
    fn test_absolute_without_parent_uses_xy() {
        let mut node = absolute(DesignNode::new("1:1", NodeType::Frame));
        node.x = Some(50.0);
        node.y = Some(20.0);
        assert_eq!(build(&node, None), "absolute left-[50px] top-5");
    }

    #[test]
    fn test_absolute_relative_to_parent() {
        let node = absolute(DesignNode::new("1:1", NodeType::Frame).with_bounds(200.0, 200.0, 50.0, 50.0));
        let parent = BoundingBox { x: 100.0, y: 100.0, width: 400.0, height: 400.0 };
        assert_eq!(build(&node, Some(&parent)), "absolute left-25 top-25");
    }

    #[test]
    fn test_absolute_constraints() {
        let mut node = absolute(DesignNode::new("1:1", NodeType::Frame).with_bounds(340.0, 100.0, 40.0, 40.0));
        node.constraints = Some(Constraints {
            horizontal: HorizontalConstraint::Right,
            vertical: VerticalConstraint::Center,
        });
        let parent = BoundingBox { x: 0.0, y: 0.0, width: 400.0, height: 300.0 };
        assert_eq!(
            build(&node, Some(&parent)),
            "absolute right-5 top-1/2 -translate-y-1/2"
        );
    }

    #[test]
    fn test_negative_offset() {
        let mut node = absolute(DesignNode::new("1:1", NodeType::Frame));
        node.x = Some(-8.0);
        node.y = Some(-5.0);
        assert_eq!(build(&node, None), "absolute -left-2 -top-[5px]");
    }

    #[test]
    fn test_parent_of_absolute_child_is_relative() {
        let badge = absolute(DesignNode::new("1:2", NodeType::Frame));
        let card = DesignNode::new("1:1", NodeType::Frame).with_child(badge);
        assert_eq!(build(&card, None), "relative");
    }

    #[test]
    fn test_auto_layout() {
        let mut node = DesignNode::new("1:1", NodeType::Frame);
        node.layout_mode = LayoutMode::Vertical;
        node.item_spacing = Some(24.0);
        node.primary_axis_align_items = Some(AxisAlign::SpaceBetween);
        node.counter_axis_align_items = Some(AxisAlign::Center);
        node.padding_left = Some(16.0);
        node.padding_right = Some(16.0);
        node.padding_top = Some(16.0);
        node.padding_bottom = Some(16.0);
        assert_eq!(
            build(&node, None),
            "flex flex-col justify-between items-center gap-6 p-4"
        );
    }

    #[test]
    fn test_uneven_padding_and_fractional_gap() {
        let mut node = DesignNode::new("1:1", NodeType::Frame);
        node.layout_mode = LayoutMode::Horizontal;
        node.item_spacing = Some(16.1);
        node.padding_left = Some(8.0);
        node.padding_top = Some(17.0);
        assert_eq!(build(&node, None), "flex flex-row gap-4 pl-2 pt-[17px]");
    }

    #[test]
    fn test_solid_fills() {
        let red = DesignNode::new("1:1", NodeType::Rectangle)
            .with_fill(Paint::solid(Rgba::rgb(0.937, 0.267, 0.267)));
        assert_eq!(build(&red, None), "bg-red-500");

        let black = DesignNode::new("1:2", NodeType::Rectangle)
            .with_fill(Paint::solid(Rgba::rgb(0.0, 0.0, 0.0)));
        assert_eq!(build(&black, None), "bg-black");

        let magenta = DesignNode::new("1:3", NodeType::Rectangle)
            .with_fill(Paint::solid(Rgba::rgb(1.0, 0.0, 1.0)));
        assert_eq!(build(&magenta, None), "bg-[#ff00ff]");
    }

    #[test]
    fn test_fill_opacity_and_hidden_fills() {
        let mut hidden = Paint::solid(Rgba::rgb(0.0, 0.0, 0.0));
        hidden.visible = false;
        let mut faded = Paint::solid(Rgba::rgb(1.0, 1.0, 1.0));
        faded.opacity = 0.5;

        let node = DesignNode::new("1:1", NodeType::Frame)
            .with_fill(hidden)
            .with_fill(faded);
        assert_eq!(build(&node, None), "bg-white bg-opacity-50");
    }

    #[test]
    fn test_image_fill_suppresses_background() {
        let node = DesignNode::new("1:1", NodeType::Rectangle)
            .with_fill(Paint::solid(Rgba::rgb(0.0, 0.0, 0.0)))
            .with_fill(Paint::image());
        assert_eq!(build(&node, None), "");
    }

    #[test]
    fn test_gradient() {
        let mut paint = Paint::linear_gradient(vec![
            ColorStop { position: 0.0, color: Rgba::rgb(0.231, 0.510, 0.965) },
            ColorStop { position: 1.0, color: Rgba::rgb(0.659, 0.333, 0.969) },
        ]);
        paint.gradient_handle_positions = vec![
            Vector2 { x: 0.5, y: 0.0 },
            Vector2 { x: 0.5, y: 1.0 },
        ];
        let node = DesignNode::new("1:1", NodeType::Frame).with_fill(paint);
        assert_eq!(
            build(&node, None),
            "bg-gradient-to-b from-blue-500 to-purple-500"
        );
    }

    #[test]
    fn test_gradient_direction() {
        let at = |x0, y0, x1, y1| {
            gradient_direction(&[Vector2 { x: x0, y: y0 }, Vector2 { x: x1, y: y1 }])
        };
        assert_eq!(at(0.0, 0.5, 1.0, 0.5), "r");
        assert_eq!(at(0.0, 0.0, 1.0, 1.0), "br");
        assert_eq!(at(1.0, 0.5, 0.0, 0.5), "l");
        assert_eq!(at(0.0, 1.0, 1.0, 0.0), "tr");
        assert_eq!(gradient_direction(&[]), "r");
    }

    #[test]
    fn test_background_color_fallback() {
        let mut node = DesignNode::new("1:1", NodeType::Frame);
        node.background_color = Some(Rgba { r: 1.0, g: 1.0, b: 1.0, a: 0.0 });
        assert_eq!(build(&node, None), "");

        node.style.background_color = Some(Rgba::rgb(0.0, 0.0, 0.0));
        node.background_color = None;
        assert_eq!(build(&node, None), "bg-black");
    }

    #[test]
    fn test_typography() {
        let mut node = DesignNode::new("1:1", NodeType::Text)
            .with_fill(Paint::solid(Rgba::rgb(0.0, 0.0, 0.0)));
        node.style.font_size = Some(24.0);
        node.style.font_weight = Some(600.0);
        node.style.text_align_horizontal = Some(TextAlign::Center);
        assert_eq!(
            build(&node, None),
            "text-[24px] font-semibold text-center text-black"
        );
    }

    #[test]
    fn test_sizing() {
        let mut page = DesignNode::new("1:1", NodeType::Frame);
        page.style.width = Some(1440.0);
        assert_eq!(build(&page, None), "w-full max-w-screen-xl mx-auto");

        let mut tile = DesignNode::new("1:2", NodeType::Frame);
        tile.style.width = Some(64.0);
        tile.style.height = Some(30.0);
        assert_eq!(build(&tile, None), "w-16 h-[30px]");

        tile.layout_grow = Some(1.0);
        assert_eq!(build(&tile, None), "flex-1");

        tile.layout_grow = None;
        tile.layout_align = Some(LayoutAlign::Stretch);
        assert_eq!(build(&tile, None), "w-full h-[30px]");
    }

    #[test]
    fn test_corner_radius() {
        let mut node = DesignNode::new("1:1", NodeType::Frame);
        node.corner_radius = Some(8.0);
        assert_eq!(build(&node, None), "rounded-lg");

        node.corner_radius = None;
        node.style.border_radius = Some(5.0);
        assert_eq!(build(&node, None), "rounded-[5px]");
    }
}
