//! Metric graph component using Iced canvas.
//!
//! A [`ChartState`] holds the fetched series and the user's selection. Every
//! selection change re-windows the series, rebuilds the [`ChartConfig`] and
//! clears the cached geometry. Nothing here touches the store.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use iced::mouse;
use iced::widget::canvas::{self, Cache, Canvas, Frame, Geometry, Path, Stroke, Text};
use iced::widget::{Row, button, column, container, pick_list, row, text};
use iced::{Alignment, Color, Element, Length, Point, Rectangle, Renderer, Size, Theme};

use partnerdash_common::{
    ChartKind, DateRange, Selection, Series, Window, metric_color, metric_palette,
};

use super::formatting::{
    capitalize, format_count, format_tick_label, format_tooltip_label, format_value,
};
use super::theme::{self, ThemeColors, rgb};
use crate::message::{ChartMessage, ChartTarget, Message};

/// Height of the graph canvas.
const CHART_HEIGHT: f32 = 300.0;

const PADDING_LEFT: f32 = 50.0;
const PADDING_RIGHT: f32 = 20.0;
const PADDING_TOP: f32 = 20.0;
const PADDING_BOTTOM: f32 = 30.0;

/// Horizontal grid lines above the zero line.
const GRID_LINES: usize = 5;

/// Upper bound on x-axis labels drawn.
const MAX_TICKS: usize = 6;

/// Entry of the metric picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetricChoice {
    All,
    Metric(String),
}

impl fmt::Display for MetricChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricChoice::All => write!(f, "All Metrics"),
            MetricChoice::Metric(name) => write!(f, "{}", capitalize(name)),
        }
    }
}

/// One plotted metric. `values` lines up with the config's ticks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlotSeries {
    pub metric: String,
    pub color: [u8; 3],
    pub values: Vec<Option<u64>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendEntry {
    pub label: String,
    pub color: [u8; 3],
}

/// Everything the renderer needs to draw a window.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChartConfig {
    pub kind: ChartKind,
    /// X-axis labels, one per sample ("Mar 5").
    pub ticks: Vec<String>,
    /// Hover labels, one per sample ("March 5, 2025").
    pub tooltips: Vec<String>,
    /// Selected metrics that have at least one value in the window.
    pub series: Vec<PlotSeries>,
    /// Every selected metric, with or without data.
    pub legend: Vec<LegendEntry>,
    /// Top of the y axis. The bottom is always zero.
    pub y_max: u64,
}

impl ChartConfig {
    pub fn build(window: &Window, kind: ChartKind, palette: &BTreeMap<String, [u8; 3]>) -> Self {
        let ticks = window
            .samples
            .iter()
            .map(|s| format_tick_label(s.timestamp))
            .collect();
        let tooltips = window
            .samples
            .iter()
            .map(|s| format_tooltip_label(s.timestamp))
            .collect();

        let series = window
            .metrics
            .iter()
            .filter_map(|metric| {
                let values: Vec<Option<u64>> =
                    window.samples.iter().map(|s| s.value(metric)).collect();
                values.iter().any(Option::is_some).then(|| PlotSeries {
                    metric: metric.clone(),
                    color: metric_color(palette, metric),
                    values,
                })
            })
            .collect();

        let legend = window
            .metrics
            .iter()
            .map(|metric| LegendEntry {
                label: capitalize(metric),
                color: metric_color(palette, metric),
            })
            .collect();

        Self {
            kind,
            ticks,
            tooltips,
            series,
            legend,
            y_max: nice_ceil(window.max_value().unwrap_or(0)),
        }
    }

    /// Number of samples on the x axis.
    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }
}

/// Round up to 1, 2 or 5 times a power of ten. Zero rounds to one.
pub fn nice_ceil(max: u64) -> u64 {
    if max == 0 {
        return 1;
    }

    let mut magnitude = 1u64;
    while let Some(next) = magnitude.checked_mul(10) {
        if next > max {
            break;
        }
        magnitude = next;
    }

    [1, 2, 5, 10]
        .into_iter()
        .filter_map(|step| magnitude.checked_mul(step))
        .find(|candidate| *candidate >= max)
        .unwrap_or(max)
}

/// State for one metric graph.
#[derive(Debug)]
pub struct ChartState {
    title: String,
    /// Metrics offered by the containing view.
    metrics: Vec<String>,
    selection: Selection,
    /// `None` until the series has been fetched.
    series: Option<Arc<Series>>,
    palette: BTreeMap<String, [u8; 3]>,
    /// Day windows end on.
    today: NaiveDate,
    config: ChartConfig,
    cache: Cache,
}

impl ChartState {
    pub fn new(title: impl Into<String>, metrics: Vec<String>, range: DateRange) -> Self {
        let selection = Selection::with_range(range);
        Self {
            title: title.into(),
            metrics,
            config: ChartConfig {
                kind: selection.kind,
                y_max: 1,
                ..ChartConfig::default()
            },
            selection,
            series: None,
            palette: metric_palette(),
            today: Local::now().date_naive(),
            cache: Cache::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn is_loading(&self) -> bool {
        self.series.is_none()
    }

    /// Replace the held series.
    pub fn set_series(&mut self, series: Arc<Series>) {
        self.series = Some(series);
        self.rebuild();
    }

    /// Move the end of the window.
    pub fn set_today(&mut self, today: NaiveDate) {
        if self.today != today {
            self.today = today;
            self.rebuild();
        }
    }

    /// Apply a control event.
    pub fn update(&mut self, message: ChartMessage) {
        match message {
            ChartMessage::SelectMetric(MetricChoice::All) => self.selection.clear_metric(),
            ChartMessage::SelectMetric(MetricChoice::Metric(metric)) => {
                self.selection.set_metric(metric)
            }
            ChartMessage::SetKind(kind) => self.selection.set_kind(kind),
            ChartMessage::SetRange(range) => self.selection.set_range(range),
        }
        self.rebuild();
    }

    /// Picker entries: "All Metrics" then every offered metric.
    pub fn metric_choices(&self) -> Vec<MetricChoice> {
        std::iter::once(MetricChoice::All)
            .chain(self.metrics.iter().cloned().map(MetricChoice::Metric))
            .collect()
    }

    pub fn metric_choice(&self) -> MetricChoice {
        match &self.selection.metric {
            Some(metric) => MetricChoice::Metric(metric.clone()),
            None => MetricChoice::All,
        }
    }

    fn rebuild(&mut self) {
        let window = match &self.series {
            Some(series) => self
                .selection
                .apply(series.samples(), &self.metrics, self.today),
            None => Window::default(),
        };
        self.config = ChartConfig::build(&window, self.selection.kind, &self.palette);
        self.cache.clear();
    }
}

/// Canvas program drawing a [`ChartConfig`].
///
/// The interaction state is the sample index under the cursor.
struct Chart<'a> {
    state: &'a ChartState,
}

impl canvas::Program<Message> for Chart<'_> {
    type State = Option<usize>;

    fn update(
        &self,
        hovered: &mut Self::State,
        event: &canvas::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<canvas::Action<Message>> {
        let canvas::Event::Mouse(mouse::Event::CursorMoved { .. } | mouse::Event::CursorLeft) =
            event
        else {
            return None;
        };

        let index = cursor
            .position_in(bounds)
            .and_then(|position| self.index_at(position, bounds.size()));

        if index != *hovered {
            *hovered = index;
            Some(canvas::Action::request_redraw())
        } else {
            None
        }
    }

    fn draw(
        &self,
        hovered: &Self::State,
        renderer: &Renderer,
        theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let colors = theme::colors(theme);

        let chart = self.state.cache.draw(renderer, bounds.size(), |frame| {
            self.draw_chart(frame, bounds.size(), &colors);
        });

        let mut layers = vec![chart];

        if let Some(index) = self.hovered_sample(*hovered) {
            let mut frame = Frame::new(renderer, bounds.size());
            self.draw_hover(&mut frame, bounds.size(), index, &colors);
            layers.push(frame.into_geometry());
        }

        layers
    }
}

impl Chart<'_> {
    fn config(&self) -> &ChartConfig {
        &self.state.config
    }

    /// Hover index, if it still names a sample of the current window.
    fn hovered_sample(&self, hovered: Option<usize>) -> Option<usize> {
        hovered.filter(|&index| index < self.config().len())
    }

    /// Area inside the axis padding.
    fn plot_area(size: Size) -> Option<Rectangle> {
        let width = size.width - PADDING_LEFT - PADDING_RIGHT;
        let height = size.height - PADDING_TOP - PADDING_BOTTOM;

        (width > 0.0 && height > 0.0).then(|| {
            Rectangle::new(
                Point::new(PADDING_LEFT, PADDING_TOP),
                Size::new(width, height),
            )
        })
    }

    /// Horizontal center of a sample.
    fn x_at(&self, area: Rectangle, index: usize) -> f32 {
        let n = self.config().len();
        match self.config().kind {
            ChartKind::Line if n > 1 => {
                area.x + index as f32 / (n - 1) as f32 * area.width
            }
            ChartKind::Line => area.x + area.width / 2.0,
            ChartKind::Bar => area.x + (index as f32 + 0.5) * area.width / n.max(1) as f32,
        }
    }

    fn y_at(&self, area: Rectangle, value: u64) -> f32 {
        let ratio = value as f64 / self.config().y_max.max(1) as f64;
        area.y + area.height - ratio as f32 * area.height
    }

    /// Sample nearest to a cursor position, if over the plot.
    fn index_at(&self, position: Point, size: Size) -> Option<usize> {
        let n = self.config().len();
        let area = Self::plot_area(size)?;
        if n == 0 || position.x < area.x || position.x > area.x + area.width {
            return None;
        }

        let offset = (position.x - area.x) / area.width;
        let index = match self.config().kind {
            ChartKind::Line => (offset * (n - 1) as f32).round() as usize,
            ChartKind::Bar => (offset * n as f32).floor() as usize,
        };
        Some(index.min(n - 1))
    }

    fn draw_chart(&self, frame: &mut Frame, size: Size, colors: &ThemeColors<'_>) {
        let background = Path::rectangle(Point::ORIGIN, size);
        frame.fill(&background, colors.chart_background());

        let Some(area) = Self::plot_area(size) else {
            return;
        };

        if self.config().is_empty() {
            let no_data = Text {
                content: "No data".to_string(),
                position: Point::new(size.width / 2.0 - 30.0, size.height / 2.0 - 8.0),
                color: colors.chart_label(),
                size: 16.0.into(),
                ..Text::default()
            };
            frame.fill_text(no_data);
            return;
        }

        self.draw_grid(frame, area, colors);

        match self.config().kind {
            ChartKind::Line => self.draw_lines(frame, area),
            ChartKind::Bar => self.draw_bars(frame, area),
        }
    }

    /// Draw value grid lines and date labels.
    fn draw_grid(&self, frame: &mut Frame, area: Rectangle, colors: &ThemeColors<'_>) {
        let grid_color = colors.chart_grid();
        let label_color = colors.chart_label();
        let y_max = self.config().y_max as f64;

        for i in 0..=GRID_LINES {
            let y = area.y + (i as f32 / GRID_LINES as f32) * area.height;
            let value = y_max * (1.0 - i as f64 / GRID_LINES as f64);

            let line = Path::line(Point::new(area.x, y), Point::new(area.x + area.width, y));
            frame.stroke(
                &line,
                Stroke::default().with_color(grid_color).with_width(1.0),
            );

            let label = Text {
                content: format_value(value),
                position: Point::new(5.0, y - 6.0),
                color: label_color,
                size: 10.0.into(),
                ..Text::default()
            };
            frame.fill_text(label);
        }

        let step = self.config().len().div_ceil(MAX_TICKS).max(1);
        for (index, tick) in self.config().ticks.iter().enumerate().step_by(step) {
            let label = Text {
                content: tick.clone(),
                position: Point::new(
                    self.x_at(area, index) - 15.0,
                    area.y + area.height + 10.0,
                ),
                color: label_color,
                size: 10.0.into(),
                ..Text::default()
            };
            frame.fill_text(label);
        }
    }

    /// One polyline per metric. Gaps break the line.
    fn draw_lines(&self, frame: &mut Frame, area: Rectangle) {
        for series in &self.config().series {
            let color = rgb(series.color);
            let mut builder = canvas::path::Builder::new();
            let mut pen_down = false;

            for (index, value) in series.values.iter().enumerate() {
                match value {
                    Some(value) => {
                        let point = Point::new(self.x_at(area, index), self.y_at(area, *value));
                        if pen_down {
                            builder.line_to(point);
                        } else {
                            builder.move_to(point);
                            pen_down = true;
                        }
                    }
                    None => pen_down = false,
                }
            }

            frame.stroke(
                &builder.build(),
                Stroke::default().with_color(color).with_width(2.0),
            );

            if self.config().len() == 1 {
                if let Some(Some(value)) = series.values.first() {
                    let dot = Path::circle(
                        Point::new(self.x_at(area, 0), self.y_at(area, *value)),
                        3.0,
                    );
                    frame.fill(&dot, color);
                }
            }
        }
    }

    /// Bars grouped per sample, one bar per metric.
    fn draw_bars(&self, frame: &mut Frame, area: Rectangle) {
        let series = &self.config().series;
        if series.is_empty() {
            return;
        }

        let slot = area.width / self.config().len() as f32;
        let group = slot * 0.8;
        let bar_width = group / series.len() as f32;
        let baseline = area.y + area.height;

        for index in 0..self.config().len() {
            let group_left = area.x + index as f32 * slot + (slot - group) / 2.0;

            for (j, metric) in series.iter().enumerate() {
                let Some(value) = metric.values[index] else {
                    continue;
                };
                let top = self.y_at(area, value);
                frame.fill_rectangle(
                    Point::new(group_left + j as f32 * bar_width, top),
                    Size::new(bar_width, baseline - top),
                    rgb(metric.color),
                );
            }
        }
    }

    /// Cursor line, point markers and the tooltip for a sample.
    fn draw_hover(&self, frame: &mut Frame, size: Size, index: usize, colors: &ThemeColors<'_>) {
        let Some(area) = Self::plot_area(size) else {
            return;
        };
        let config = self.config();
        let x = self.x_at(area, index);

        match config.kind {
            ChartKind::Line => {
                let cursor_line =
                    Path::line(Point::new(x, area.y), Point::new(x, area.y + area.height));
                frame.stroke(
                    &cursor_line,
                    Stroke::default()
                        .with_color(colors.chart_highlight())
                        .with_width(1.0),
                );

                for series in &config.series {
                    if let Some(Some(value)) = series.values.get(index) {
                        let marker = Path::circle(Point::new(x, self.y_at(area, *value)), 4.0);
                        frame.fill(&marker, rgb(series.color));
                    }
                }
            }
            ChartKind::Bar => {
                let slot = area.width / config.len().max(1) as f32;
                frame.fill_rectangle(
                    Point::new(x - slot / 2.0, area.y),
                    Size::new(slot, area.height),
                    colors.chart_highlight().scale_alpha(0.3),
                );
            }
        }

        let Some(title) = config.tooltips.get(index) else {
            return;
        };

        let mut lines: Vec<(String, Color)> = vec![(title.clone(), colors.text())];
        lines.extend(config.series.iter().filter_map(|series| {
            series.values.get(index).copied().flatten().map(|value| {
                (
                    format!("{}: {}", capitalize(&series.metric), format_count(value)),
                    rgb(series.color),
                )
            })
        }));

        let line_height = 16.0;
        let widest = lines.iter().map(|(s, _)| s.chars().count()).max().unwrap_or(0);
        let box_size = Size::new(
            widest as f32 * 7.0 + 16.0,
            lines.len() as f32 * line_height + 10.0,
        );

        let left = if x + 10.0 + box_size.width > size.width {
            x - 10.0 - box_size.width
        } else {
            x + 10.0
        };
        let top = area.y + 5.0;

        frame.fill_rectangle(
            Point::new(left, top),
            box_size,
            colors.chart_tooltip_background(),
        );

        for (i, (content, color)) in lines.into_iter().enumerate() {
            frame.fill_text(Text {
                content,
                position: Point::new(left + 8.0, top + 5.0 + i as f32 * line_height),
                color,
                size: 12.0.into(),
                ..Text::default()
            });
        }
    }
}

/// Graph with its controls and legend.
pub fn chart_panel(state: &ChartState, target: ChartTarget) -> Element<'_, Message> {
    let title = text(state.title()).size(18);
    let controls = render_controls(state, target);

    let body: Element<'_, Message> = if state.is_loading() {
        container(text("Loading graph...").size(14))
            .width(Length::Fill)
            .height(Length::Fixed(CHART_HEIGHT))
            .center_x(Length::Fill)
            .center_y(Length::Fixed(CHART_HEIGHT))
            .into()
    } else {
        Canvas::new(Chart { state })
            .width(Length::Fill)
            .height(Length::Fixed(CHART_HEIGHT))
            .into()
    };

    column![title, controls, body, render_legend(state)]
        .spacing(10)
        .into()
}

/// Metric picker, chart type toggle and range buttons.
fn render_controls(state: &ChartState, target: ChartTarget) -> Element<'_, Message> {
    let picker = pick_list(
        state.metric_choices(),
        Some(state.metric_choice()),
        move |choice| Message::Chart(target, ChartMessage::SelectMetric(choice)),
    )
    .width(Length::Fixed(170.0));

    let selection = state.selection();

    let kinds = ChartKind::ALL.iter().map(|kind| {
        button(text(kind.label()).size(12))
            .on_press(Message::Chart(target, ChartMessage::SetKind(*kind)))
            .style(if selection.kind == *kind {
                button::primary
            } else {
                button::secondary
            })
            .into()
    });

    let ranges = DateRange::ALL.iter().map(|range| {
        button(text(range.label()).size(12))
            .on_press(Message::Chart(target, ChartMessage::SetRange(*range)))
            .style(if selection.range == *range {
                button::primary
            } else {
                button::secondary
            })
            .into()
    });

    row![
        picker,
        Row::with_children(kinds).spacing(4),
        Row::with_children(ranges).spacing(4),
    ]
    .spacing(20)
    .align_y(Alignment::Center)
    .into()
}

fn render_legend(state: &ChartState) -> Element<'_, Message> {
    let entries = state.config().legend.iter().map(|entry| {
        let color = rgb(entry.color);
        let swatch = container(text(""))
            .width(Length::Fixed(10.0))
            .height(Length::Fixed(10.0))
            .style(move |_theme: &Theme| container::Style {
                background: Some(iced::Background::Color(color)),
                border: iced::Border {
                    radius: 5.0.into(),
                    ..Default::default()
                },
                ..Default::default()
            });

        row![swatch, text(entry.label.as_str()).size(12)]
            .spacing(6)
            .align_y(Alignment::Center)
            .into()
    });

    Row::with_children(entries).spacing(16).into()
}
