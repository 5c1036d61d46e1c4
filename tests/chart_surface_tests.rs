use macro_charts::api::{AxisOverrides, CURVE_LINE_WIDTH, Chart, ChartConfig, ChartSeries};
use macro_charts::core::{
    AxisOptions, CurveDataset, SampleDomain, SampleMode, TickSource, Viewport,
};
use macro_charts::render::{Color, NullRenderer, Renderer};

const RED: Color = Color::rgb(1.0, 0.0, 0.0);
const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);

fn line_series(label: &str, slope: f64, color: Color) -> ChartSeries {
    let dataset = CurveDataset::sample(
        label,
        SampleDomain::new(0.0, 1.0, 11),
        SampleMode::Forward,
        |x| slope * x,
    )
    .expect("dataset");
    ChartSeries::new(dataset, color)
}

#[test]
fn line_chart_needs_at_least_two_labels() {
    let config = ChartConfig::line("one label", vec![0.0]);
    assert!(Chart::new(config, Viewport::default()).is_err());
}

#[test]
fn invalid_viewport_is_rejected() {
    let config = ChartConfig::scatter("empty");
    assert!(Chart::new(config, Viewport::new(0, 400)).is_err());
}

#[test]
fn line_chart_uses_category_ticks() {
    let labels: Vec<f64> = (0..11).map(f64::from).collect();
    let mut chart =
        Chart::new(ChartConfig::line("line", labels.clone()), Viewport::default()).expect("chart");
    chart
        .update(vec![line_series("rising", 2.0, RED)])
        .expect("update");

    assert_eq!(chart.x_ticks().values.as_slice(), labels.as_slice());
    let x = chart.x_bounds().expect("x bounds");
    assert_eq!((x.min, x.max), (0.0, 10.0));
    let y = chart.y_bounds().expect("y bounds");
    assert!(y.min <= 0.0 && y.max >= 20.0);
}

#[test]
fn axis_options_pin_the_first_and_last_tick() {
    let config = ChartConfig::scatter("pinned").with_y_axis(AxisOptions::default().with_min(-10.0));
    let mut chart = Chart::new(config, Viewport::default()).expect("chart");
    chart
        .update(vec![line_series("rising", 3.0, RED)])
        .expect("update");
    assert_eq!(chart.y_bounds().expect("y bounds").min, -10.0);
}

#[test]
fn overrides_leave_natural_bounds_untouched() {
    let mut chart = Chart::new(ChartConfig::scatter("linked"), Viewport::default()).expect("chart");
    chart
        .update(vec![line_series("rising", 1.0, RED)])
        .expect("update");
    let natural = chart.natural_y_bounds();

    chart
        .set_overrides(AxisOverrides {
            x_max: Some(40.0),
            y_min: None,
            y_max: Some(50.0),
        })
        .expect("overrides");

    assert_eq!(chart.y_bounds().expect("y bounds").max, 50.0);
    assert_eq!(chart.x_bounds().expect("x bounds").max, 40.0);
    assert_eq!(chart.natural_y_bounds(), natural);
    assert!(!chart.overrides().is_empty());
}

#[test]
fn y_ticks_are_listed_top_down() {
    let mut chart = Chart::new(ChartConfig::scatter("order"), Viewport::default()).expect("chart");
    chart
        .update(vec![line_series("rising", 1.0, RED)])
        .expect("update");
    let values = &chart.y_ticks().values;
    assert!(values.windows(2).all(|pair| pair[0] > pair[1]));
}

#[test]
fn curves_are_clipped_to_the_plot_area() {
    let config = ChartConfig::scatter("clipped").with_y_axis(AxisOptions::default().with_max(4.0));
    let mut chart = Chart::new(config, Viewport::default()).expect("chart");
    chart
        .update(vec![line_series("steep", 5.0, RED)])
        .expect("update");

    let frame = chart.build_frame().expect("frame");
    let area = chart.plot_area();
    let curves: Vec<_> = frame
        .lines
        .iter()
        .filter(|line| line.stroke_width == CURVE_LINE_WIDTH)
        .collect();
    assert!(!curves.is_empty());
    for line in curves {
        for (x, y) in [(line.x1, line.y1), (line.x2, line.y2)] {
            assert!(x >= area.left - 1e-9 && x <= area.right + 1e-9);
            assert!(y >= area.top - 1e-9 && y <= area.bottom + 1e-9);
        }
    }
}

#[test]
fn frame_carries_axes_titles_and_legend() {
    let labels: Vec<f64> = (0..11).map(f64::from).collect();
    let config = ChartConfig::line("Legend chart", labels)
        .with_axis_titles("x title", "y title")
        .with_legend(true);
    let mut chart = Chart::new(config, Viewport::default()).expect("chart");
    chart
        .update(vec![
            line_series("first", 1.0, RED),
            line_series("second", 2.0, BLUE),
        ])
        .expect("update");

    let frame = chart.build_frame().expect("frame");
    let area = chart.plot_area();
    let x_axis = frame.lines[0];
    assert_eq!((x_axis.y1, x_axis.y2), (area.bottom, area.bottom));
    let y_axis = frame.lines[1];
    assert_eq!((y_axis.x1, y_axis.x2), (area.left, area.left));

    let texts: Vec<&str> = frame.texts.iter().map(|text| text.text.as_str()).collect();
    for expected in ["Legend chart", "x title", "y title", "first", "second", "10"] {
        assert!(texts.contains(&expected), "missing `{expected}`");
    }
    assert_eq!(frame.rects.len(), 2);
    assert_eq!(frame.rects[1].fill_color, BLUE);

    let mut renderer = NullRenderer::default();
    renderer.render(&frame).expect("valid frame");
    assert_eq!(renderer.frames_rendered, 1);
}

#[test]
fn non_finite_samples_are_skipped() {
    let mut chart = Chart::new(ChartConfig::scatter("pole"), Viewport::default()).expect("chart");
    let dataset = CurveDataset::sample(
        "reciprocal",
        SampleDomain::new(0.0, 1.0, 5),
        SampleMode::Forward,
        |x| 1.0 / x,
    )
    .expect("dataset");
    chart
        .update(vec![ChartSeries::new(dataset, RED)])
        .expect("update");

    let frame = chart.build_frame().expect("frame");
    frame.validate().expect("no NaN or infinite primitives");
}
