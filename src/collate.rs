//! Collated figure: the three chart images re-read from disk and arranged on
//! one titled page.
//!
//! The collator depends only on the image files, never on renderer state, so
//! it can run on its own against any three existing PNGs.

use crate::config::StyleConfig;
use crate::error::{ChartError, Result};
use crate::pdf::{PdfGenerator, POINTS_PER_INCH};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const FIGURE_TITLE: &str = "Collated Visualization";

/// Pixels per inch of the composite raster.
const DPI: f64 = 100.0;
const JPEG_QUALITY: u8 = 95;
const FIGURE_TITLE_BAND: u32 = 60;
const PANEL_TITLE_BAND: u32 = 36;
const PANEL_GAP: u32 = 20;

/// Which chart a panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKind {
    Bar,
    Sankey,
    Network,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PanelSpec {
    pub kind: PanelKind,
    pub title: &'static str,
    pub row: usize,
    pub col: usize,
    pub row_span: usize,
    pub col_span: usize,
}

/// Pixel rectangle `(x, y, width, height)`.
pub type CellRect = (u32, u32, u32, u32);

#[derive(Debug, Clone, PartialEq)]
pub struct CollageLayout {
    pub rows: usize,
    pub cols: usize,
    pub title: &'static str,
    pub panels: Vec<PanelSpec>,
}

impl CollageLayout {
    /// 2x2 grid: bar top-left, Sankey bottom-left, network down the right column.
    pub fn standard() -> Self {
        Self {
            rows: 2,
            cols: 2,
            title: FIGURE_TITLE,
            panels: vec![
                PanelSpec {
                    kind: PanelKind::Bar,
                    title: "Bar Chart",
                    row: 0,
                    col: 0,
                    row_span: 1,
                    col_span: 1,
                },
                PanelSpec {
                    kind: PanelKind::Sankey,
                    title: "Sankey",
                    row: 1,
                    col: 0,
                    row_span: 1,
                    col_span: 1,
                },
                PanelSpec {
                    kind: PanelKind::Network,
                    title: "Network Plot",
                    row: 0,
                    col: 1,
                    row_span: 2,
                    col_span: 1,
                },
            ],
        }
    }

    /// Area a panel occupies on a `width` x `height` canvas, below the figure title.
    pub fn cell_rect(&self, panel: &PanelSpec, width: u32, height: u32) -> CellRect {
        let grid_h = height.saturating_sub(FIGURE_TITLE_BAND);
        let cell_w = width / self.cols as u32;
        let cell_h = grid_h / self.rows as u32;

        let x = panel.col as u32 * cell_w;
        let y = FIGURE_TITLE_BAND + panel.row as u32 * cell_h;
        (x, y, cell_w * panel.col_span as u32, cell_h * panel.row_span as u32)
    }
}

/// Scale `(w, h)` to fit inside `(max_w, max_h)` keeping the aspect ratio.
pub fn fit_within(size: (u32, u32), bounds: (u32, u32)) -> (u32, u32) {
    let (w, h) = size;
    let (max_w, max_h) = bounds;
    if w == 0 || h == 0 {
        return (0, 0);
    }
    let scale = f64::min(f64::from(max_w) / f64::from(w), f64::from(max_h) / f64::from(h));
    (
        ((f64::from(w) * scale).floor() as u32).max(1),
        ((f64::from(h) * scale).floor() as u32).max(1),
    )
}

/// The three image files the collator reads back.
#[derive(Debug, Clone)]
pub struct CollageInputs {
    pub bar: PathBuf,
    pub sankey: PathBuf,
    pub network: PathBuf,
}

impl CollageInputs {
    pub fn path_for(&self, kind: PanelKind) -> &Path {
        match kind {
            PanelKind::Bar => &self.bar,
            PanelKind::Sankey => &self.sankey,
            PanelKind::Network => &self.network,
        }
    }
}

pub struct Collator;

impl Collator {
    pub fn collate(
        inputs: &CollageInputs,
        output: &Path,
        size: (u32, u32),
        style: &StyleConfig,
    ) -> Result<()> {
        let layout = CollageLayout::standard();
        let canvas = Self::compose(&layout, inputs, size, style)?;

        let mut jpeg = Vec::new();
        JpegEncoder::new_with_quality(&mut jpeg, JPEG_QUALITY).encode_image(&canvas)?;

        let page = (
            f64::from(size.0) / DPI * POINTS_PER_INCH,
            f64::from(size.1) / DPI * POINTS_PER_INCH,
        );
        PdfGenerator::write_image_page(output, &jpeg, size, page, layout.title)?;

        info!("Collated figure written to {}", output.display());
        Ok(())
    }

    /// Build the composite raster: panel images first, then all titles.
    pub fn compose(
        layout: &CollageLayout,
        inputs: &CollageInputs,
        size: (u32, u32),
        style: &StyleConfig,
    ) -> Result<RgbImage> {
        let (width, height) = size;
        let mut canvas = RgbImage::from_pixel(width, height, Rgb([255, 255, 255]));

        for panel in &layout.panels {
            let path = inputs.path_for(panel.kind);
            if !path.is_file() {
                return Err(ChartError::MissingFile {
                    path: path.to_path_buf(),
                });
            }
            let img = image::open(path)?.to_rgb8();

            let (x, y, w, h) = layout.cell_rect(panel, width, height);
            let bounds = (
                w.saturating_sub(PANEL_GAP),
                h.saturating_sub(PANEL_TITLE_BAND + PANEL_GAP),
            );
            let (fit_w, fit_h) = fit_within(img.dimensions(), bounds);
            let resized = imageops::resize(&img, fit_w, fit_h, FilterType::Lanczos3);

            let left = x + w.saturating_sub(fit_w) / 2;
            let top = y + PANEL_TITLE_BAND;
            imageops::overlay(&mut canvas, &resized, i64::from(left), i64::from(top));
            debug!(
                "panel '{}': {}x{} from {}",
                panel.title,
                fit_w,
                fit_h,
                path.display()
            );
        }

        {
            let root = BitMapBackend::with_buffer(&mut canvas, (width, height)).into_drawing_area();
            let family = style.font_family.as_str();

            let figure_title = (family, style.title_size * 1.5)
                .into_font()
                .style(FontStyle::Bold)
                .color(&BLACK)
                .pos(Pos::new(HPos::Center, VPos::Center));
            root.draw(&Text::new(
                layout.title,
                ((width / 2) as i32, (FIGURE_TITLE_BAND / 2) as i32),
                figure_title,
            ))?;

            let panel_title = (family, style.font_size * 1.4)
                .into_font()
                .style(FontStyle::Bold)
                .color(&BLACK)
                .pos(Pos::new(HPos::Center, VPos::Center));
            for panel in &layout.panels {
                let (x, y, w, _) = layout.cell_rect(panel, width, height);
                root.draw(&Text::new(
                    panel.title,
                    ((x + w / 2) as i32, (y + PANEL_TITLE_BAND / 2) as i32),
                    panel_title.clone(),
                ))?;
            }

            root.present()?;
        }

        Ok(canvas)
    }
}
