#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for tower defense adapters.
//!
//! Game components draw through the object-safe [`Surface`] trait so that the
//! simulation never depends on a concrete graphics backend. [`DrawList`]
//! records every call for headless adapters and tests.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns the same color with a replaced alpha channel.
    #[must_use]
    pub const fn with_alpha(self, alpha: f32) -> Self {
        Self { alpha, ..self }
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

/// Axis-aligned rectangle in screen space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    /// Top-left corner.
    pub origin: Vec2,
    /// Width and height.
    pub size: Vec2,
}

impl Rect {
    /// Creates a rectangle from its top-left corner and size.
    #[must_use]
    pub const fn new(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    /// Centre point of the rectangle.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        self.origin + self.size * 0.5
    }

    /// Reports whether `point` lies inside the half-open rectangle.
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        let far = self.origin + self.size;
        point.x >= self.origin.x && point.y >= self.origin.y && point.x < far.x && point.y < far.y
    }
}

/// Drawing target implemented by rendering backends.
pub trait Surface {
    /// Fills the entire surface.
    fn fill(&mut self, color: Color);

    /// Fills a rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Outlines a rectangle.
    fn stroke_rect(&mut self, rect: Rect, thickness: f32, color: Color);

    /// Fills a circle.
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);

    /// Draws a straight line segment.
    fn draw_line(&mut self, from: Vec2, to: Vec2, thickness: f32, color: Color);

    /// Draws a single line of text with its top-left corner at `position`.
    fn draw_text(&mut self, text: &str, position: Vec2, size: f32, color: Color);
}

/// Anything that knows how to draw itself onto a [`Surface`].
pub trait Paint {
    /// Draws onto `surface`.
    fn paint(&self, surface: &mut dyn Surface);
}

/// Single drawing call captured by a [`DrawList`].
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// Whole-surface fill.
    Fill {
        /// Fill color.
        color: Color,
    },
    /// Filled rectangle.
    FillRect {
        /// Rectangle to fill.
        rect: Rect,
        /// Fill color.
        color: Color,
    },
    /// Rectangle outline.
    StrokeRect {
        /// Rectangle to outline.
        rect: Rect,
        /// Outline thickness.
        thickness: f32,
        /// Outline color.
        color: Color,
    },
    /// Filled circle.
    FillCircle {
        /// Circle centre.
        center: Vec2,
        /// Circle radius.
        radius: f32,
        /// Fill color.
        color: Color,
    },
    /// Line segment.
    Line {
        /// Segment start.
        from: Vec2,
        /// Segment end.
        to: Vec2,
        /// Line thickness.
        thickness: f32,
        /// Line color.
        color: Color,
    },
    /// Text label.
    Text {
        /// Label contents.
        text: String,
        /// Top-left corner of the label.
        position: Vec2,
        /// Font size.
        size: f32,
        /// Text color.
        color: Color,
    },
}

impl DrawCommand {
    /// Color used by the command.
    #[must_use]
    pub fn color(&self) -> Color {
        match self {
            Self::Fill { color }
            | Self::FillRect { color, .. }
            | Self::StrokeRect { color, .. }
            | Self::FillCircle { color, .. }
            | Self::Line { color, .. }
            | Self::Text { color, .. } => *color,
        }
    }
}

/// Surface that records drawing calls in order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    /// Creates an empty draw list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded commands in submission order.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of recorded commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Reports whether nothing was drawn.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Drops every recorded command, keeping the allocation.
    pub fn reset(&mut self) {
        self.commands.clear();
    }
}

impl Surface for DrawList {
    fn fill(&mut self, color: Color) {
        self.commands.push(DrawCommand::Fill { color });
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn stroke_rect(&mut self, rect: Rect, thickness: f32, color: Color) {
        self.commands.push(DrawCommand::StrokeRect {
            rect,
            thickness,
            color,
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
        });
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, thickness: f32, color: Color) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            thickness,
            color,
        });
    }

    fn draw_text(&mut self, text: &str, position: Vec2, size: f32, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_owned(),
            position,
            size,
            color,
        });
    }
}

/// Colors used by every painted component.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Screen clear color.
    pub background: Color,
    /// World fill.
    pub world: Color,
    /// Grid lines drawn over the world.
    pub grid_line: Color,
    /// Menu panel fill.
    pub menu: Color,
    /// Purchase button fill.
    pub button: Color,
    /// Button fill while its purchase is in progress.
    pub button_armed: Color,
    /// Menu label text.
    pub text: Color,
    /// Range indicator of an active tower.
    pub range: Color,
    /// Range indicator of a purchaser over an unbuildable spot.
    pub range_bad: Color,
    /// Basic tower body.
    pub tower: Color,
    /// Green tower body.
    pub green_tower: Color,
    /// Outline drawn around active towers.
    pub highlight: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color::from_rgb_u8(0x10, 0x10, 0x18),
            world: Color::from_rgb_u8(0x3b, 0x5a, 0x2f),
            grid_line: Color::from_rgb_u8(0x2c, 0x44, 0x23),
            menu: Color::from_rgb_u8(0x30, 0x30, 0x3a),
            button: Color::from_rgb_u8(0x46, 0x46, 0x52),
            button_armed: Color::from_rgb_u8(0x46, 0x46, 0x52).lighten(0.25),
            text: Color::from_rgb_u8(0xff, 0xff, 0xff),
            range: Color::from_rgb_u8(0xff, 0xff, 0xff).with_alpha(0.25),
            range_bad: Color::from_rgb_u8(0xc8, 0x2a, 0x36).with_alpha(0.35),
            tower: Color::from_rgb_u8(0x8a, 0x8a, 0x9a),
            green_tower: Color::from_rgb_u8(0x2f, 0x95, 0x32),
            highlight: Color::from_rgb_u8(0xff, 0xc1, 0x07),
        }
    }
}
