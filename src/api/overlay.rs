//! Helpers shared by the screens' annotation passes.

use crate::core::{PixelPoint, PlotArea};
use crate::render::{AnnotationRenderer, RenderFrame, Shadow};

/// Gap between the x axis and a label written below it.
pub(crate) const LABEL_BELOW_PX: f64 = 20.0;
/// Gap between the y axis and a label written left of it.
pub(crate) const LABEL_LEFT_PX: f64 = 35.0;

pub(crate) fn annotator(frame: &mut RenderFrame, shadow: Option<Shadow>) -> AnnotationRenderer<'_> {
    let mut annotations = AnnotationRenderer::new(frame);
    if let Some(shadow) = shadow {
        annotations.enable_shadow(shadow);
    }
    annotations
}

/// `"{prefix} = {value:.2}"`
pub(crate) fn value_label(prefix: &str, value: f64) -> String {
    format!("{prefix} = {value:.2}")
}

/// Keeps a guide endpoint on the plot rectangle.
pub(crate) fn clamp_to_area(point: PixelPoint, area: PlotArea) -> PixelPoint {
    PixelPoint::new(
        point.x.clamp(area.left, area.right),
        point.y.clamp(area.top, area.bottom),
    )
}

/// Dashed guides from the y axis across to `point` and from `point` down to
/// the x axis.
pub(crate) fn guides_to_point(
    annotations: &mut AnnotationRenderer<'_>,
    point: PixelPoint,
    area: PlotArea,
) {
    let point = clamp_to_area(point, area);
    annotations.draw_line_offset_annotation(point.y, area.left, point.x);
    annotations.draw_line_height_annotation(point.x, area.bottom, point.y);
}
