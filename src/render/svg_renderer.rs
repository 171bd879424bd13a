use std::f64::consts::{PI, TAU};
use std::fmt::Write as _;

use crate::core::polar;
use crate::error::{ChartError, ChartResult};
use crate::render::{
    ArcPrimitive, CirclePrimitive, Color, LinePrimitive, PolylinePrimitive, Renderer,
    RetainedScene, SceneElement, ScenePatch, TextHAlign, TextPrimitive,
};

const FULL_TURN_EPSILON: f64 = 1e-9;

/// Retained renderer that serializes the current scene as an SVG document.
#[derive(Debug, Default)]
pub struct SvgRenderer {
    retained: RetainedScene,
    background: Option<Color>,
}

impl SvgRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "svg"
    }

    #[must_use]
    pub fn retained(&self) -> &RetainedScene {
        &self.retained
    }

    /// Serializes the retained scene; fails before the first patch.
    pub fn to_svg_string(&self) -> ChartResult<String> {
        let viewport = self.retained.viewport().ok_or_else(|| {
            ChartError::InvalidData("svg renderer has not received a patch yet".to_owned())
        })?;

        let mut out = String::new();
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = viewport.width,
            h = viewport.height
        );
        if let Some(background) = self.background {
            let _ = writeln!(
                out,
                r#"<rect width="100%" height="100%" {}/>"#,
                paint("fill", background)
            );
        }
        for (key, element) in self.retained.iter() {
            match element {
                SceneElement::Circle(circle) => write_circle(&mut out, &key.to_string(), circle),
                SceneElement::Arc(arc) => write_arc(&mut out, &key.to_string(), arc),
                SceneElement::Polyline(polyline) => {
                    write_polyline(&mut out, &key.to_string(), polyline);
                }
                SceneElement::Line(line) => write_line(&mut out, &key.to_string(), line),
                SceneElement::Text(text) => write_text(&mut out, &key.to_string(), text),
            }
        }
        out.push_str("</svg>\n");
        Ok(out)
    }
}

impl Renderer for SvgRenderer {
    fn render(&mut self, patch: &ScenePatch) -> ChartResult<()> {
        patch.validate()?;
        self.retained.apply(patch)
    }
}

fn paint(attribute: &str, color: Color) -> String {
    if color.alpha >= 1.0 {
        format!(r#"{attribute}="{}""#, color.to_hex())
    } else {
        format!(
            r#"{attribute}="{}" {attribute}-opacity="{:.3}""#,
            color.to_hex(),
            color.alpha
        )
    }
}

fn write_circle(out: &mut String, id: &str, circle: &CirclePrimitive) {
    let _ = write!(
        out,
        r#"<circle id="{}" cx="{:.2}" cy="{:.2}" r="{:.2}" {}"#,
        escape(id),
        circle.cx,
        circle.cy,
        circle.radius,
        paint("fill", circle.fill)
    );
    if circle.stroke_width > 0.0 {
        let _ = write!(
            out,
            r#" {} stroke-width="{:.2}""#,
            paint("stroke", circle.stroke),
            circle.stroke_width
        );
    }
    out.push_str("/>\n");
}

fn write_arc(out: &mut String, id: &str, arc: &ArcPrimitive) {
    if arc.span() <= 0.0 {
        return;
    }
    let mut d = String::new();
    if arc.span() >= TAU - FULL_TURN_EPSILON {
        let half = arc.start_angle + PI;
        append_sector(&mut d, arc, arc.start_angle, half);
        append_sector(&mut d, arc, half, arc.start_angle + TAU);
    } else {
        append_sector(&mut d, arc, arc.start_angle, arc.end_angle);
    }
    let _ = write!(
        out,
        r#"<path id="{}" d="{}" {}"#,
        escape(id),
        d.trim_end(),
        paint("fill", arc.fill)
    );
    if arc.stroke_width > 0.0 {
        let _ = write!(
            out,
            r#" {} stroke-width="{:.2}""#,
            paint("stroke", arc.stroke),
            arc.stroke_width
        );
    }
    out.push_str("/>\n");
}

fn append_sector(d: &mut String, arc: &ArcPrimitive, start: f64, end: f64) {
    let large_arc = u8::from(end - start > PI);
    let at = |radius: f64, angle: f64| {
        let (x, y) = polar(radius, angle);
        (arc.cx + x, arc.cy + y)
    };
    let (x0, y0) = at(arc.outer_radius, start);
    let (x1, y1) = at(arc.outer_radius, end);
    let _ = write!(
        d,
        "M{x0:.2},{y0:.2} A{r:.2},{r:.2} 0 {large_arc} 1 {x1:.2},{y1:.2} ",
        r = arc.outer_radius
    );
    if arc.inner_radius > 0.0 {
        let (x2, y2) = at(arc.inner_radius, end);
        let (x3, y3) = at(arc.inner_radius, start);
        let _ = write!(
            d,
            "L{x2:.2},{y2:.2} A{r:.2},{r:.2} 0 {large_arc} 0 {x3:.2},{y3:.2} Z ",
            r = arc.inner_radius
        );
    } else {
        let _ = write!(d, "L{:.2},{:.2} Z ", arc.cx, arc.cy);
    }
}

fn write_polyline(out: &mut String, id: &str, polyline: &PolylinePrimitive) {
    let points = polyline
        .points
        .iter()
        .map(|(x, y)| format!("{x:.2},{y:.2}"))
        .collect::<Vec<_>>()
        .join(" ");
    let _ = writeln!(
        out,
        r#"<polyline id="{}" points="{points}" fill="none" {} stroke-width="{:.2}"/>"#,
        escape(id),
        paint("stroke", polyline.color),
        polyline.stroke_width
    );
}

fn write_line(out: &mut String, id: &str, line: &LinePrimitive) {
    let _ = writeln!(
        out,
        r#"<line id="{}" x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" {} stroke-width="{:.2}"/>"#,
        escape(id),
        line.x1,
        line.y1,
        line.x2,
        line.y2,
        paint("stroke", line.color),
        line.stroke_width
    );
}

fn write_text(out: &mut String, id: &str, text: &TextPrimitive) {
    let anchor = match text.h_align {
        TextHAlign::Left => "start",
        TextHAlign::Center => "middle",
        TextHAlign::Right => "end",
    };
    let _ = write!(
        out,
        r#"<text id="{}" x="{:.2}" y="{:.2}" font-size="{:.1}" text-anchor="{anchor}" {}"#,
        escape(id),
        text.x,
        text.y,
        text.font_size_px,
        paint("fill", text.color)
    );
    if text.rotation_deg != 0.0 {
        let _ = write!(
            out,
            r#" transform="rotate({:.2} {:.2} {:.2})""#,
            text.rotation_deg, text.x, text.y
        );
    }
    let _ = writeln!(out, ">{}</text>", escape(&text.text));
}

fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
