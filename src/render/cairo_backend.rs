use cairo::{Context, Format, ImageSurface};
use pango::FontDescription;
use std::f64::consts::FRAC_PI_2;

use crate::error::{ChartError, ChartResult};
use crate::render::{
    ArcPrimitive, CirclePrimitive, Color, LinePrimitive, PolylinePrimitive, Renderer,
    RetainedScene, SceneElement, ScenePatch, TextHAlign, TextPrimitive,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub circles_drawn: usize,
    pub arcs_drawn: usize,
    pub lines_drawn: usize,
    pub texts_drawn: usize,
}

/// Optional extension trait for renderers that can draw into an external Cairo
/// context (for example a GTK `DrawingArea` callback).
pub trait CairoContextRenderer {
    fn render_on_cairo_context(&mut self, context: &Context, patch: &ScenePatch)
    -> ChartResult<()>;
}

/// Cairo + Pango + PangoCairo renderer backend.
///
/// Cairo is immediate mode, so the renderer keeps the retained scene up to
/// date from each patch and repaints all of it.
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    retained: RetainedScene,
    clear_color: Color,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> ChartResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(ChartError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            retained: RetainedScene::default(),
            clear_color: Color::WHITE,
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo+pango+pangocairo"
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    #[must_use]
    pub fn retained(&self) -> &RetainedScene {
        &self.retained
    }

    pub fn set_clear_color(&mut self, color: Color) -> ChartResult<()> {
        color.validate()?;
        self.clear_color = color;
        Ok(())
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    /// Writes the current surface as PNG.
    pub fn write_png<W: std::io::Write>(&self, writer: &mut W) -> ChartResult<()> {
        self.surface
            .write_to_png(writer)
            .map_err(|err| ChartError::InvalidData(format!("failed to encode png: {err}")))
    }

    fn render_with_context(&mut self, context: &Context, patch: &ScenePatch) -> ChartResult<()> {
        patch.validate()?;
        self.retained.apply(patch)?;

        apply_color(context, self.clear_color);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;

        let mut stats = CairoRenderStats::default();
        for (_, element) in self.retained.iter() {
            match element {
                SceneElement::Circle(circle) => {
                    draw_circle(context, circle)?;
                    stats.circles_drawn += 1;
                }
                SceneElement::Arc(arc) => {
                    if draw_arc(context, arc)? {
                        stats.arcs_drawn += 1;
                    }
                }
                SceneElement::Polyline(polyline) => {
                    draw_polyline(context, polyline)?;
                    stats.lines_drawn += 1;
                }
                SceneElement::Line(line) => {
                    draw_line(context, line)?;
                    stats.lines_drawn += 1;
                }
                SceneElement::Text(text) => {
                    draw_text(context, text);
                    stats.texts_drawn += 1;
                }
            }
        }

        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, patch: &ScenePatch) -> ChartResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_with_context(&context, patch)
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        patch: &ScenePatch,
    ) -> ChartResult<()> {
        self.render_with_context(context, patch)
    }
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn fill_and_stroke(
    context: &Context,
    fill: Color,
    stroke: Color,
    stroke_width: f64,
    what: &str,
) -> ChartResult<()> {
    apply_color(context, fill);
    if stroke_width > 0.0 {
        context
            .fill_preserve()
            .map_err(|err| map_backend_error(&format!("failed to fill {what}"), err))?;
        apply_color(context, stroke);
        context.set_line_width(stroke_width);
        context
            .stroke()
            .map_err(|err| map_backend_error(&format!("failed to stroke {what}"), err))
    } else {
        context
            .fill()
            .map_err(|err| map_backend_error(&format!("failed to fill {what}"), err))
    }
}

fn draw_circle(context: &Context, circle: &CirclePrimitive) -> ChartResult<()> {
    context.new_sub_path();
    context.arc(
        circle.cx,
        circle.cy,
        circle.radius,
        0.0,
        std::f64::consts::TAU,
    );
    fill_and_stroke(
        context,
        circle.fill,
        circle.stroke,
        circle.stroke_width,
        "circle",
    )
}

/// Returns `false` for zero-span slices, which draw nothing.
fn draw_arc(context: &Context, arc: &ArcPrimitive) -> ChartResult<bool> {
    if arc.span() <= 0.0 {
        return Ok(false);
    }
    // Pie angles start at twelve o'clock; cairo starts at three.
    let start = arc.start_angle - FRAC_PI_2;
    let end = arc.end_angle - FRAC_PI_2;

    context.new_sub_path();
    context.arc(arc.cx, arc.cy, arc.outer_radius, start, end);
    if arc.inner_radius > 0.0 {
        context.arc_negative(arc.cx, arc.cy, arc.inner_radius, end, start);
    } else {
        context.line_to(arc.cx, arc.cy);
    }
    context.close_path();
    fill_and_stroke(context, arc.fill, arc.stroke, arc.stroke_width, "arc")?;
    Ok(true)
}

fn draw_polyline(context: &Context, polyline: &PolylinePrimitive) -> ChartResult<()> {
    let mut points = polyline.points.iter();
    if let Some((x, y)) = points.next() {
        context.move_to(*x, *y);
    }
    for (x, y) in points {
        context.line_to(*x, *y);
    }
    apply_color(context, polyline.color);
    context.set_line_width(polyline.stroke_width);
    context
        .stroke()
        .map_err(|err| map_backend_error("failed to stroke polyline", err))
}

fn draw_line(context: &Context, line: &LinePrimitive) -> ChartResult<()> {
    apply_color(context, line.color);
    context.set_line_width(line.stroke_width);
    context.move_to(line.x1, line.y1);
    context.line_to(line.x2, line.y2);
    context
        .stroke()
        .map_err(|err| map_backend_error("failed to stroke line", err))
}

fn draw_text(context: &Context, text: &TextPrimitive) {
    let layout = pangocairo::functions::create_layout(context);
    let font_description = FontDescription::from_string(&format!("Sans {}", text.font_size_px));
    layout.set_font_description(Some(&font_description));
    layout.set_text(&text.text);

    let (text_width, text_height) = layout.pixel_size();
    let dx = match text.h_align {
        TextHAlign::Left => 0.0,
        TextHAlign::Center => -f64::from(text_width) / 2.0,
        TextHAlign::Right => -f64::from(text_width),
    };

    context.save().ok();
    context.translate(text.x, text.y);
    if text.rotation_deg != 0.0 {
        context.rotate(text.rotation_deg.to_radians());
    }
    apply_color(context, text.color);
    // `y` is the baseline, pango lays out from the top edge.
    context.move_to(dx, -f64::from(text_height) * 0.8);
    pangocairo::functions::show_layout(context, &layout);
    context.restore().ok();
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::InvalidData(format!("{prefix}: {err}"))
}
