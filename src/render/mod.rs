mod annotation;
mod frame;
mod null_renderer;
mod primitives;

pub use annotation::{
    ANNOTATION_FONT_FAMILY, ANNOTATION_FONT_SIZE_PX, ANNOTATION_LINE_WIDTH, AnnotationRenderer,
    GUIDE_COLOR, GUIDE_DASH,
};
pub use frame::RenderFrame;
pub use null_renderer::NullRenderer;
pub use primitives::{
    Color, LinePrimitive, LineStrokeStyle, RectPrimitive, Shadow, TextHAlign, TextPrimitive,
    TextVAlign,
};

use crate::error::GraphResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `RenderFrame` so
/// drawing code remains isolated from model and screen logic.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> GraphResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContextRenderer, CairoRenderStats, CairoRenderer};
