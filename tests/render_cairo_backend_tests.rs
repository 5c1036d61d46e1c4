#![cfg(feature = "cairo-backend")]

use cairo::{Context, Format, ImageSurface};
use macro_charts::GraphError;
use macro_charts::api::{AdasScreen, GrapherConfig, Screen, SolowScreen};
use macro_charts::models::PolicyResponse;
use macro_charts::render::{CairoContextRenderer, CairoRenderer, Renderer};

#[test]
fn cairo_renderer_rejects_invalid_surface_size() {
    let err = CairoRenderer::new(0, 480).expect_err("invalid width must fail");
    assert!(matches!(err, GraphError::InvalidData(_)));
}

#[test]
fn cairo_renderer_draws_solow_scene_with_shadows() {
    let screen = SolowScreen::new(GrapherConfig::default()).expect("screen");
    let frame = screen.render_frames().expect("frames").remove(0);

    let mut renderer = CairoRenderer::new(900, 520).expect("renderer");
    renderer.render(&frame).expect("render");
    let stats = renderer.last_stats();

    assert_eq!(stats.lines_drawn, frame.lines.len());
    assert_eq!(stats.texts_drawn, frame.texts.len());
    assert!(stats.shadows_drawn > 0);
}

#[test]
fn cairo_renderer_encodes_png() {
    let mut screen = AdasScreen::new(GrapherConfig::default()).expect("screen");
    screen.set_slider("ad_offset", 2.0).expect("shock");
    screen
        .select_policy(PolicyResponse::StabilizeInflation)
        .expect("policy");

    let mut renderer = CairoRenderer::new(900, 520).expect("renderer");
    let drawn = screen.render_with(&mut renderer).expect("render");
    assert_eq!(drawn, 1);

    let mut png = Vec::new();
    renderer.write_png(&mut png).expect("png");
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
}

#[test]
fn cairo_renderer_can_draw_on_external_context() {
    let screen = SolowScreen::new(GrapherConfig::default()).expect("screen");
    let frame = screen.render_frames().expect("frames").remove(0);

    let mut renderer = CairoRenderer::new(900, 520).expect("renderer");
    let surface = ImageSurface::create(Format::ARgb32, 900, 520).expect("surface");
    let context = Context::new(&surface).expect("context");
    renderer
        .render_on_cairo_context(&context, &frame)
        .expect("render on context");
    assert_eq!(renderer.last_stats().lines_drawn, frame.lines.len());
}
