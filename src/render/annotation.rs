//! Overlay drawing on top of a chart's base scene.
//!
//! Annotations are appended to an existing [`RenderFrame`] after the chart's
//! own axes and curves, so they are always drawn last.

use crate::render::{
    Color, LinePrimitive, LineStrokeStyle, RenderFrame, Shadow, TextHAlign, TextPrimitive,
    TextVAlign,
};

pub const ANNOTATION_LINE_WIDTH: f64 = 1.5;
pub const ANNOTATION_FONT_SIZE_PX: f64 = 16.0;
pub const ANNOTATION_FONT_FAMILY: &str = "Helvetica";
pub const GUIDE_DASH: LineStrokeStyle = LineStrokeStyle::Dashed {
    on: 10.0,
    off: 10.0,
};
/// `#a3a3a3`
pub const GUIDE_COLOR: Color = Color::from_rgb8(0xa3, 0xa3, 0xa3);

/// Draws guide lines and labels into a frame.
///
/// Once [`enable_shadow`](Self::enable_shadow) is called, every stroke drawn
/// afterwards carries the shadow; text is never shadowed.
#[derive(Debug)]
pub struct AnnotationRenderer<'a> {
    frame: &'a mut RenderFrame,
    shadow: Option<Shadow>,
}

impl<'a> AnnotationRenderer<'a> {
    #[must_use]
    pub fn new(frame: &'a mut RenderFrame) -> Self {
        Self {
            frame,
            shadow: None,
        }
    }

    pub fn enable_shadow(&mut self, shadow: Shadow) {
        self.shadow = Some(shadow);
    }

    #[must_use]
    pub fn shadow(&self) -> Option<Shadow> {
        self.shadow
    }

    /// Solid vertical line, used for curve shifts and net-export brackets.
    pub fn draw_vertical_line(&mut self, x: f64, start_y: f64, end_y: f64, color: Color) {
        self.stroke(x, start_y, x, end_y, color, LineStrokeStyle::Solid);
    }

    /// Solid horizontal line.
    pub fn draw_horizontal_line(&mut self, y: f64, start_x: f64, end_x: f64, color: Color) {
        self.stroke(start_x, y, end_x, y, color, LineStrokeStyle::Solid);
    }

    /// Dashed guide from a point down to the x axis.
    pub fn draw_line_height_annotation(&mut self, x: f64, bottom_y: f64, highest_y: f64) {
        self.stroke(x, highest_y, x, bottom_y, GUIDE_COLOR, GUIDE_DASH);
    }

    /// Dashed guide from the y axis across to a point.
    pub fn draw_line_offset_annotation(&mut self, y: f64, left_x: f64, offset_x: f64) {
        self.stroke(left_x, y, offset_x, y, GUIDE_COLOR, GUIDE_DASH);
    }

    /// Label centered on `(x, y)`.
    pub fn write_annotation(&mut self, text: impl Into<String>, x: f64, y: f64, color: Color) {
        self.frame.push_text(
            TextPrimitive::new(text, x, y, ANNOTATION_FONT_SIZE_PX, color, TextHAlign::Center)
                .with_font_family(ANNOTATION_FONT_FAMILY)
                .with_v_align(TextVAlign::Middle),
        );
    }

    fn stroke(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: Color, style: LineStrokeStyle) {
        self.frame.push_line(
            LinePrimitive::new(x1, y1, x2, y2, ANNOTATION_LINE_WIDTH, color)
                .with_style(style)
                .with_shadow(self.shadow),
        );
    }
}
