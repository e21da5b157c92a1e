//! Horizontal stacked Yes/No bar chart.

use super::palette::{NO_COLOR, YES_COLOR};
use crate::config::StyleConfig;
use crate::data::{BarTable, Response};
use crate::error::Result;
use plotters::coord::ranged1d::{DefaultFormatting, KeyPointHint, Ranged};
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::ops::Range;
use std::path::Path;
use tracing::{debug, info};

/// X-axis key points. Fixed regardless of the data range: when a category
/// total exceeds 10 the axis still extends, but carries no further ticks.
pub const BAR_X_TICKS: [f64; 6] = [0.0, 2.0, 4.0, 6.0, 8.0, 10.0];

const BAR_HEIGHT: f64 = 0.8;

/// Linear `f64` axis whose mesh ticks are exactly `ticks`, whatever the
/// label-count hint asks for.
#[derive(Debug, Clone)]
pub struct FixedTicks {
    range: Range<f64>,
    ticks: Vec<f64>,
}

impl FixedTicks {
    pub fn new(range: Range<f64>, ticks: Vec<f64>) -> Self {
        Self { range, ticks }
    }
}

impl Ranged for FixedTicks {
    type FormatOption = DefaultFormatting;
    type ValueType = f64;

    fn map(&self, value: &f64, limit: (i32, i32)) -> i32 {
        RangedCoordf64::from(self.range.clone()).map(value, limit)
    }

    fn key_points<Hint: KeyPointHint>(&self, _hint: Hint) -> Vec<f64> {
        self.ticks
            .iter()
            .copied()
            .filter(|t| self.range.contains(t) || *t == self.range.end)
            .collect()
    }

    fn range(&self) -> Range<f64> {
        self.range.clone()
    }
}

/// Yes/No counts per category, in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BarCounts {
    pub categories: Vec<String>,
    pub no: Vec<u32>,
    pub yes: Vec<u32>,
}

/// One colored piece of a stacked bar.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSegment {
    pub category: usize,
    pub response: Response,
    pub start: u32,
    pub width: u32,
}

impl BarSegment {
    pub fn end(&self) -> u32 {
        self.start + self.width
    }

    /// Text drawn at the segment's center; zero-width segments get none.
    pub fn label(&self) -> Option<String> {
        (self.width > 0).then(|| self.width.to_string())
    }
}

impl BarCounts {
    /// Count responses per category. Rows without a valid response are not
    /// counted and do not introduce a category.
    pub fn from_table(table: &BarTable) -> Self {
        let mut counts = BarCounts::default();

        for row in &table.rows {
            let Some(response) = row.response else {
                continue;
            };
            let idx = match counts.categories.iter().position(|c| c == &row.label) {
                Some(idx) => idx,
                None => {
                    counts.categories.push(row.label.clone());
                    counts.no.push(0);
                    counts.yes.push(0);
                    counts.categories.len() - 1
                }
            };
            match response {
                Response::No => counts.no[idx] += 1,
                Response::Yes => counts.yes[idx] += 1,
            }
        }

        counts
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn total(&self, category: usize) -> u32 {
        self.no[category] + self.yes[category]
    }

    pub fn max_total(&self) -> u32 {
        (0..self.len()).map(|i| self.total(i)).max().unwrap_or(0)
    }

    /// All segments: every "No" bar starting at zero, then every "Yes" bar
    /// stacked on the end of its "No" bar.
    pub fn segments(&self) -> Vec<BarSegment> {
        let no = (0..self.len()).map(|i| BarSegment {
            category: i,
            response: Response::No,
            start: 0,
            width: self.no[i],
        });
        let yes = (0..self.len()).map(|i| BarSegment {
            category: i,
            response: Response::Yes,
            start: self.no[i],
            width: self.yes[i],
        });
        no.chain(yes).collect()
    }
}

pub struct BarChartRenderer;

impl BarChartRenderer {
    pub fn render(
        counts: &BarCounts,
        path: &Path,
        size: (u32, u32),
        style: &StyleConfig,
    ) -> Result<()> {
        debug!(
            "bar chart: {} categories, largest total {}",
            counts.len(),
            counts.max_total()
        );

        let family = style.font_family.as_str();
        let root = BitMapBackend::new(path, size).into_drawing_area();
        root.fill(&WHITE)?;

        let x_max = f64::from(counts.max_total().max(10)) * 1.05;
        let y_max = counts.len().max(1) as f64 - 0.5;
        let y_keys: Vec<f64> = (0..counts.len()).map(|i| i as f64).collect();

        let mut chart = ChartBuilder::on(&root)
            .caption("Horizontal Stacked Bar Chart", (family, style.font_size))
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(120)
            .build_cartesian_2d(
                FixedTicks::new(0.0..x_max, BAR_X_TICKS.to_vec()),
                FixedTicks::new(-0.5..y_max, y_keys),
            )?;

        let categories = &counts.categories;
        chart
            .configure_mesh()
            .disable_mesh()
            .x_desc("Count")
            .y_desc("Category")
            .x_label_formatter(&|x| format!("{x:.0}"))
            .y_label_formatter(&|y| {
                categories
                    .get(y.round() as usize)
                    .cloned()
                    .unwrap_or_default()
            })
            .label_style((family, style.font_size * 0.8))
            .axis_desc_style((family, style.font_size))
            .draw()?;

        let segments = counts.segments();
        for (response, color) in [(Response::No, NO_COLOR), (Response::Yes, YES_COLOR)] {
            chart
                .draw_series(
                    segments
                        .iter()
                        .filter(|s| s.response == response)
                        .map(|s| {
                            let y = s.category as f64;
                            Rectangle::new(
                                [
                                    (f64::from(s.start), y - BAR_HEIGHT / 2.0),
                                    (f64::from(s.end()), y + BAR_HEIGHT / 2.0),
                                ],
                                color.filled(),
                            )
                        }),
                )?
                .label(response.as_str())
                .legend(move |(x, y)| {
                    Rectangle::new([(x, y - 6), (x + 14, y + 6)], color.filled())
                });
        }

        let annotation = (family, style.annotation_size)
            .into_font()
            .style(FontStyle::Bold)
            .color(&WHITE)
            .pos(Pos::new(HPos::Center, VPos::Center));
        chart.draw_series(segments.iter().filter_map(|s| {
            let text = s.label()?;
            let x = f64::from(s.start) + f64::from(s.width) / 2.0;
            Some(Text::new(text, (x, s.category as f64), annotation.clone()))
        }))?;

        // Legend box with a "Response" heading in the upper right corner.
        let plot_area = chart.plotting_area().strip_coord_spec();
        let (plot_w, _) = plot_area.dim_in_pixel();
        let legend_x = plot_w as i32 - 140;
        plot_area.draw(&Text::new(
            "Response",
            (legend_x + 10, 12),
            (family, style.font_size * 0.8),
        ))?;
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::Coordinate(legend_x, 36))
            .label_font((family, style.font_size * 0.8))
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()?;

        root.present()?;
        info!("Bar chart written to {}", path.display());
        Ok(())
    }
}
