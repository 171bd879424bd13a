use crate::core::{
    CategorySet, Dataset, DominantCategory, HistogramLayout, LinearScale, PlotArea,
    dominant_category, drawn_radius, format_tick, nice_ticks,
};
use crate::error::ChartResult;
use crate::interaction::SelectionSession;
use crate::render::{
    ArcPrimitive, CirclePrimitive, Color, LinePrimitive, PolylinePrimitive, Scene, SceneElement,
    SceneKey, TextHAlign, TextPrimitive,
};

use super::{DashboardConfig, DotAnimator, PieAnimator};

const AXIS_OFFSET_PX: f64 = 6.0;
const TICK_SIZE_PX: f64 = 6.0;
const TICK_PADDING_PX: f64 = 8.0;
const SLICE_STROKE_PX: f64 = 2.0;
const LEADER_STROKE_PX: f64 = 1.0;
const PIE_TITLE: &str = "number of servings";
const TOTAL_TITLE: &str = "total";
const FAVORITE_TITLE: &str = "favorite drink";

/// Category colors parsed once, in category order.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Color>,
    fallback: Color,
}

impl Palette {
    pub fn from_categories(categories: &CategorySet) -> ChartResult<Self> {
        Ok(Self {
            colors: categories
                .categories
                .iter()
                .map(|category| Color::from_hex(&category.color))
                .collect::<ChartResult<Vec<_>>>()?,
            fallback: Color::from_hex(&categories.fallback_color)?,
        })
    }

    #[must_use]
    pub fn color_of(&self, dominant: DominantCategory) -> Color {
        match dominant {
            DominantCategory::Category(index) => {
                self.colors.get(index).copied().unwrap_or(self.fallback)
            }
            DominantCategory::None => self.fallback,
        }
    }

    #[must_use]
    pub fn category(&self, index: usize) -> Color {
        self.color_of(DominantCategory::Category(index))
    }

    fn for_field(&self, categories: &CategorySet, field: &str) -> Color {
        categories
            .categories
            .iter()
            .position(|category| category.field == field)
            .map_or(self.fallback, |index| self.category(index))
    }
}

#[derive(Debug, Clone, PartialEq)]
struct AxisTick {
    y: f64,
    label: String,
}

/// Turns dashboard state into the full desired scene.
///
/// Holds everything that only depends on configuration and the binned
/// dataset; per-frame state is passed to [`SceneBuilder::build`].
#[derive(Debug, Clone)]
pub struct SceneBuilder {
    plot: PlotArea,
    axis: LinearScale,
    ticks: Vec<AxisTick>,
    palette: Palette,
    pie_center: (f64, f64),
}

/// Per-frame inputs of [`SceneBuilder::build`].
pub struct FrameState<'a> {
    pub dataset: &'a Dataset,
    pub layout: &'a HistogramLayout,
    pub session: &'a SelectionSession,
    pub dots: &'a DotAnimator,
    pub pie: &'a PieAnimator,
}

impl SceneBuilder {
    pub fn new(config: &DashboardConfig, plot: PlotArea, axis: LinearScale) -> ChartResult<Self> {
        let (min, max) = axis.domain();
        let values = nice_ticks(min, max, config.axis_tick_count);
        let step = match values.as_slice() {
            [first, second, ..] => second - first,
            _ => 1.0,
        };
        let ticks = values
            .iter()
            .map(|value| {
                Ok(AxisTick {
                    y: axis.map(*value)?,
                    label: format_tick(*value, step),
                })
            })
            .collect::<ChartResult<Vec<_>>>()?;

        Ok(Self {
            plot,
            axis,
            ticks,
            palette: Palette::from_categories(&config.categories)?,
            pie_center: config.pie_center()?,
        })
    }

    #[must_use]
    pub fn axis(&self) -> LinearScale {
        self.axis
    }

    #[must_use]
    pub fn plot(&self) -> PlotArea {
        self.plot
    }

    #[must_use]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    #[must_use]
    pub fn build(&self, config: &DashboardConfig, frame: &FrameState<'_>) -> Scene {
        let mut scene = Scene::new(config.viewport);
        self.push_axis(&mut scene, config);
        self.push_legend(&mut scene, config);
        self.push_dots(&mut scene, config, frame);
        self.push_pie(&mut scene, config, frame);
        scene
    }

    fn point(&self, x: f64, y: f64) -> (f64, f64) {
        self.plot.to_viewport(x, y)
    }

    fn pie_point(&self, x: f64, y: f64) -> (f64, f64) {
        self.point(self.pie_center.0 + x, self.pie_center.1 + y)
    }

    fn push_axis(&self, scene: &mut Scene, config: &DashboardConfig) {
        let (range_start, range_end) = self.axis.range();
        let (x, y1) = self.point(-AXIS_OFFSET_PX, range_start);
        let (_, y2) = self.point(-AXIS_OFFSET_PX, range_end);
        scene.insert(
            SceneKey::AxisLine,
            SceneElement::Line(LinePrimitive::new(x, y1, x, y2, 1.0, Color::BLACK)),
        );

        let typography = config.typography;
        for (i, tick) in self.ticks.iter().enumerate() {
            let (x0, y) = self.point(-AXIS_OFFSET_PX - TICK_SIZE_PX, tick.y);
            scene.insert(
                SceneKey::AxisTick(i),
                SceneElement::Line(LinePrimitive::new(x0, y, x, y, 1.0, Color::BLACK)),
            );
            scene.insert(
                SceneKey::AxisTickLabel(i),
                SceneElement::Text(TextPrimitive::new(
                    tick.label.clone(),
                    x0 - TICK_PADDING_PX,
                    y + typography.tick_px * 0.32,
                    typography.tick_px,
                    Color::BLACK,
                    TextHAlign::Right,
                )),
            );
        }

        let (tx, ty) = self.point(-60.0 - AXIS_OFFSET_PX, self.plot.height / 2.0);
        scene.insert(
            SceneKey::AxisTitle,
            SceneElement::Text(
                TextPrimitive::new(
                    config.axis_title.clone(),
                    tx,
                    ty,
                    typography.title_px,
                    Color::BLACK,
                    TextHAlign::Center,
                )
                .with_rotation(-90.0),
            ),
        );

        let (rx, ry) = self.point(25.0, self.plot.height + 20.0);
        scene.insert(
            SceneKey::RowTitle,
            SceneElement::Text(TextPrimitive::new(
                config.row_title.clone(),
                rx,
                ry,
                typography.title_px,
                Color::BLACK,
                TextHAlign::Left,
            )),
        );
    }

    fn push_legend(&self, scene: &mut Scene, config: &DashboardConfig) {
        let (ox, oy) = config.legend_origin;
        for (i, category) in config.categories.categories.iter().enumerate() {
            let (x, y) = self.point(ox, oy + i as f64 * config.legend_row_spacing);
            scene.insert(
                SceneKey::Legend(category.field.clone()),
                SceneElement::Text(TextPrimitive::new(
                    category.label.clone(),
                    x,
                    y,
                    config.typography.label_px,
                    self.palette.category(i),
                    TextHAlign::Left,
                )),
            );
        }
    }

    fn push_dots(&self, scene: &mut Scene, config: &DashboardConfig, frame: &FrameState<'_>) {
        let radius = drawn_radius(frame.layout.radius, config.dot_gap_px);
        for entry in &frame.layout.positioned {
            let Some(record) = frame.dataset.record(entry.record) else {
                continue;
            };
            let opacity = frame.dots.opacity(entry.record);
            let (cx, cy) = self.point(entry.cx, entry.cy);
            scene.insert(
                SceneKey::Dot(record.key().to_owned()),
                SceneElement::Circle(CirclePrimitive {
                    cx,
                    cy,
                    radius,
                    fill: self.palette.color_of(entry.dominant).with_opacity(opacity),
                    stroke: Color::BLACK.with_opacity(opacity),
                    stroke_width: frame.dots.stroke_width(entry.record),
                }),
            );
        }
    }

    fn push_pie(&self, scene: &mut Scene, config: &DashboardConfig, frame: &FrameState<'_>) {
        let geometry = config.pie;
        let typography = config.typography;
        let text = |key: SceneKey, value: String, y: f64, size: f64, color: Color| {
            let (x, y) = self.pie_point(0.0, y);
            (
                key,
                SceneElement::Text(TextPrimitive::new(
                    value,
                    x,
                    y,
                    size,
                    color,
                    TextHAlign::Center,
                )),
            )
        };

        let (key, element) = text(
            SceneKey::PieTitle,
            PIE_TITLE.to_owned(),
            -geometry.radius - 14.0,
            typography.title_px,
            Color::BLACK,
        );
        scene.insert(key, element);

        let (cx, cy) = self.pie_point(0.0, 0.0);
        let slices = frame.pie.frames();
        for slice in &slices {
            let color = self.palette.for_field(&config.categories, &slice.field);
            scene.insert(
                SceneKey::Slice(slice.field.clone()),
                SceneElement::Arc(ArcPrimitive {
                    cx,
                    cy,
                    inner_radius: geometry.inner_radius(),
                    outer_radius: geometry.outer_radius(),
                    start_angle: slice.angles.start,
                    end_angle: slice.angles.end,
                    fill: color.with_opacity(slice.opacity),
                    stroke: Color::WHITE.with_opacity(slice.opacity),
                    stroke_width: SLICE_STROKE_PX,
                }),
            );
        }

        for slice in &slices {
            let placement = geometry.label_placement(slice.label_angles);
            scene.insert(
                SceneKey::SliceLeader(slice.field.clone()),
                SceneElement::Polyline(PolylinePrimitive {
                    points: placement
                        .leader
                        .iter()
                        .map(|(x, y)| self.pie_point(*x, *y))
                        .collect(),
                    stroke_width: LEADER_STROKE_PX,
                    color: Color::BLACK.with_opacity(slice.label_opacity),
                }),
            );
        }

        for slice in &slices {
            let color = self.palette.for_field(&config.categories, &slice.field);
            let placement = geometry.label_placement(slice.label_angles);
            let (x, y) = self.pie_point(placement.anchor.0, placement.anchor.1);
            let align = if placement.right_side {
                TextHAlign::Left
            } else {
                TextHAlign::Right
            };
            scene.insert(
                SceneKey::SliceLabel(slice.field.clone()),
                SceneElement::Text(TextPrimitive::new(
                    slice.text.clone(),
                    x,
                    y + typography.label_px * 0.35,
                    typography.label_px,
                    color.with_opacity(slice.label_opacity),
                    align,
                )),
            );
        }

        let (key, element) = text(
            SceneKey::TotalTitle,
            TOTAL_TITLE.to_owned(),
            -5.0,
            typography.label_px,
            Color::BLACK,
        );
        scene.insert(key, element);
        if frame.pie.is_present() {
            let (key, element) = text(
                SceneKey::TotalValue,
                frame.pie.total().to_string(),
                15.0,
                typography.label_px,
                Color::BLACK,
            );
            scene.insert(key, element);
        }

        let (key, element) = text(
            SceneKey::FavoriteTitle,
            FAVORITE_TITLE.to_owned(),
            config.favorite_offset,
            typography.title_px,
            Color::BLACK,
        );
        scene.insert(key, element);

        let selected = frame
            .session
            .current()
            .and_then(|index| frame.dataset.record(index));
        if let Some(record) = selected {
            let dominant = dominant_category(record, &config.categories);
            let (key, element) = text(
                SceneKey::FavoriteValue,
                config.categories.label_of(dominant).to_owned(),
                config.favorite_offset + 30.0,
                typography.value_px,
                self.palette.color_of(dominant),
            );
            scene.insert(key, element);
        }
    }
}
