use drinkviz::core::{BinningStrategy, Dataset, Viewport};
use drinkviz::render::{
    ArcPrimitive, Color, Renderer, Scene, SceneElement, SceneKey, SvgRenderer, TextHAlign,
    TextPrimitive, diff_scenes,
};
use drinkviz::{Dashboard, DashboardConfig};

#[test]
fn svg_output_requires_a_patch() {
    assert!(SvgRenderer::new().to_svg_string().is_err());
}

#[test]
fn dashboard_renders_to_svg_document() {
    let fixture =
        std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/drinks_sample.csv");
    let dataset = Dataset::from_csv_path(fixture, "country").expect("fixture loads");
    let config = DashboardConfig::default()
        .with_seed(11)
        .with_binning(BinningStrategy::Uniform { count: 4 });
    let mut dashboard = Dashboard::new(
        SvgRenderer::new().with_background(Color::WHITE),
        config,
        dataset,
    )
    .expect("dashboard builds");
    dashboard.search_select("Albania");
    dashboard.tick(10.0);
    dashboard.render().expect("render");

    let svg = dashboard.renderer().to_svg_string().expect("svg");
    assert!(svg.starts_with("<svg"));
    assert!(svg.trim_end().ends_with("</svg>"));
    assert!(svg.contains(r#"width="1120" height="500""#));
    assert!(svg.contains("<rect"));
    assert!(svg.contains("<circle"));
    assert!(svg.contains("<path"));
    assert!(svg.contains("<polyline"));
    assert!(svg.contains(r#"id="dot:Albania""#));
    assert!(svg.contains("favorite drink"));
}

#[test]
fn text_is_escaped_and_rotation_is_kept() {
    let scene = Scene::new(Viewport::new(200, 100)).with(
        SceneKey::AxisTitle,
        SceneElement::Text(
            TextPrimitive::new(
                "beer & <wine>",
                10.0,
                50.0,
                12.0,
                Color::BLACK,
                TextHAlign::Center,
            )
            .with_rotation(-90.0),
        ),
    );
    let mut renderer = SvgRenderer::new();
    renderer
        .render(&diff_scenes(None, &scene))
        .expect("render");

    let svg = renderer.to_svg_string().expect("svg");
    assert!(svg.contains("beer &amp; &lt;wine&gt;"));
    assert!(svg.contains("rotate(-90"));
    assert!(svg.contains(r#"text-anchor="middle""#));
}

#[test]
fn full_turn_slice_is_drawn_as_two_half_arcs() {
    let scene = Scene::new(Viewport::new(200, 200)).with(
        SceneKey::Slice("beer_servings".to_owned()),
        SceneElement::Arc(ArcPrimitive {
            cx: 100.0,
            cy: 100.0,
            inner_radius: 40.0,
            outer_radius: 80.0,
            start_angle: 0.0,
            end_angle: std::f64::consts::TAU,
            fill: Color::from_hex("#FDBF6F").expect("hex"),
            stroke: Color::WHITE,
            stroke_width: 2.0,
        }),
    );
    let mut renderer = SvgRenderer::new();
    renderer
        .render(&diff_scenes(None, &scene))
        .expect("render");

    let svg = renderer.to_svg_string().expect("svg");
    let path = svg
        .lines()
        .find(|line| line.contains("<path"))
        .expect("slice path");
    assert_eq!(path.matches(" A").count(), 4);
}
