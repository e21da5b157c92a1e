//! Three-tier Sankey flow diagram.
//!
//! Tiers: the fixed origin codes, the intermediate labels supplied by the
//! table rows, and the fixed destination codes. Every origin code links to
//! every row label and every row label links to every destination code,
//! including zero-value links.

use super::palette::{sankey_node_color, SANKEY_LINK_COLOR};
use crate::config::StyleConfig;
use crate::data::schema::{DESTINATION_CODES, ORIGIN_CODES};
use crate::data::SankeyTable;
use crate::error::Result;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

/// Vertical gap between stacked nodes, in pixels.
pub const NODE_PAD: f64 = 15.0;
/// Node bar width, in pixels.
pub const NODE_THICKNESS: f64 = 20.0;

const MARGIN: i32 = 40;
const CURVE_STEPS: usize = 24;

#[derive(Debug, Clone, PartialEq)]
pub struct SankeyEdge {
    pub source: String,
    pub target: String,
    pub value: f64,
}

#[derive(Debug, Clone, Default)]
pub struct SankeyDiagram {
    pub nodes: Vec<String>,
    pub edges: Vec<SankeyEdge>,
    index: HashMap<String, usize>,
}

impl SankeyDiagram {
    /// Expand the wide table into origin→label and label→destination edges.
    pub fn build(table: &SankeyTable) -> Self {
        let tiers = ORIGIN_CODES.len() + DESTINATION_CODES.len();
        let mut edges = Vec::with_capacity(tiers * table.len());

        for code in ORIGIN_CODES {
            for (row, label) in table.labels.iter().enumerate() {
                edges.push(SankeyEdge {
                    source: code.to_string(),
                    target: label.clone(),
                    value: table.value(code, row),
                });
            }
        }
        for code in DESTINATION_CODES {
            for (row, label) in table.labels.iter().enumerate() {
                edges.push(SankeyEdge {
                    source: label.clone(),
                    target: code.to_string(),
                    value: table.value(code, row),
                });
            }
        }

        Self::from_edges(edges)
    }

    /// Node list is every source label followed by every target label,
    /// deduplicated with the first occurrence kept.
    pub fn from_edges(edges: Vec<SankeyEdge>) -> Self {
        let mut nodes = Vec::new();
        let mut index = HashMap::new();
        let labels = edges
            .iter()
            .map(|e| &e.source)
            .chain(edges.iter().map(|e| &e.target));
        for label in labels {
            if !index.contains_key(label) {
                index.insert(label.clone(), nodes.len());
                nodes.push(label.clone());
            }
        }

        Self {
            nodes,
            edges,
            index,
        }
    }

    pub fn node_index(&self, label: &str) -> Option<usize> {
        self.index.get(label).copied()
    }

    pub fn node_color(&self, node: usize) -> RGBColor {
        sankey_node_color(node)
    }

    /// Edges as `(source index, target index, value)`.
    pub fn links(&self) -> Vec<(usize, usize, f64)> {
        self.edges
            .iter()
            .map(|e| (self.index[&e.source], self.index[&e.target], e.value))
            .collect()
    }
}

/// Pixel rectangle of a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeBox {
    pub column: usize,
    pub x0: f64,
    pub x1: f64,
    pub y0: f64,
    pub y1: f64,
}

/// A link band: vertical spans where it leaves the source and enters the target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkBand {
    pub source: usize,
    pub target: usize,
    pub source_span: (f64, f64),
    pub target_span: (f64, f64),
}

#[derive(Debug, Clone, Default)]
pub struct SankeyLayout {
    pub columns: usize,
    pub nodes: Vec<NodeBox>,
    pub links: Vec<LinkBand>,
}

impl SankeyLayout {
    /// Place nodes in columns by longest path from a source node (sinks are
    /// pushed to the last column), stack each column vertically and size
    /// everything with one shared value-to-pixel scale.
    pub fn compute(diagram: &SankeyDiagram, width: f64, height: f64) -> Self {
        let n = diagram.nodes.len();
        if n == 0 {
            return Self::default();
        }
        let links = diagram.links();

        let mut inflow = vec![0.0; n];
        let mut outflow = vec![0.0; n];
        let mut has_outgoing = vec![false; n];
        for &(s, t, v) in &links {
            outflow[s] += v;
            inflow[t] += v;
            has_outgoing[s] = true;
        }
        let magnitude: Vec<f64> = (0..n).map(|i| f64::max(inflow[i], outflow[i])).collect();

        // Longest-path depth; bounded by n so a cycle cannot loop forever.
        let mut depth = vec![0usize; n];
        for _ in 0..n {
            let mut changed = false;
            for &(s, t, _) in &links {
                if s != t && depth[t] < depth[s] + 1 && depth[s] + 1 < n {
                    depth[t] = depth[s] + 1;
                    changed = true;
                }
            }
            if !changed {
                break;
            }
        }
        let last = depth.iter().copied().max().unwrap_or(0);
        for i in 0..n {
            if !has_outgoing[i] {
                depth[i] = last;
            }
        }
        let columns = last + 1;

        let mut members: Vec<Vec<usize>> = vec![Vec::new(); columns];
        for i in 0..n {
            members[depth[i]].push(i);
        }

        // Shared scale: the fullest column exactly fills the height.
        let ky = members
            .iter()
            .filter(|m| !m.is_empty())
            .map(|m| {
                let total: f64 = m.iter().map(|&i| magnitude[i]).sum();
                let free = height - NODE_PAD * (m.len() - 1) as f64;
                if total > 0.0 {
                    (free / total).max(0.0)
                } else {
                    f64::INFINITY
                }
            })
            .fold(f64::INFINITY, f64::min);
        let ky = if ky.is_finite() { ky } else { 0.0 };

        let column_step = if columns > 1 {
            (width - NODE_THICKNESS) / (columns - 1) as f64
        } else {
            0.0
        };

        let mut nodes = vec![
            NodeBox {
                column: 0,
                x0: 0.0,
                x1: 0.0,
                y0: 0.0,
                y1: 0.0,
            };
            n
        ];
        for (column, member) in members.iter().enumerate() {
            let used: f64 = member.iter().map(|&i| magnitude[i] * ky).sum::<f64>()
                + NODE_PAD * member.len().saturating_sub(1) as f64;
            let mut y = ((height - used) / 2.0).max(0.0);
            let x0 = column as f64 * column_step;
            for &i in member {
                let h = magnitude[i] * ky;
                nodes[i] = NodeBox {
                    column,
                    x0,
                    x1: x0 + NODE_THICKNESS,
                    y0: y,
                    y1: y + h,
                };
                y += h + NODE_PAD;
            }
        }

        // Links leave/enter each node ordered by the far end's position.
        let mut order: Vec<usize> = (0..links.len()).collect();
        order.sort_by(|&a, &b| {
            let ka = (nodes[links[a].1].y0, nodes[links[a].0].y0);
            let kb = (nodes[links[b].1].y0, nodes[links[b].0].y0);
            ka.partial_cmp(&kb).unwrap_or(std::cmp::Ordering::Equal)
        });
        let mut out_cursor: Vec<f64> = nodes.iter().map(|b| b.y0).collect();
        let mut source_spans = vec![(0.0, 0.0); links.len()];
        for &k in &order {
            let (s, _, v) = links[k];
            let start = out_cursor[s];
            out_cursor[s] += v * ky;
            source_spans[k] = (start, out_cursor[s]);
        }

        order.sort_by(|&a, &b| {
            let ka = (nodes[links[a].0].y0, nodes[links[a].1].y0);
            let kb = (nodes[links[b].0].y0, nodes[links[b].1].y0);
            ka.partial_cmp(&kb).unwrap_or(std::cmp::Ordering::Equal)
        });
        let mut in_cursor: Vec<f64> = nodes.iter().map(|b| b.y0).collect();
        let mut target_spans = vec![(0.0, 0.0); links.len()];
        for &k in &order {
            let (_, t, v) = links[k];
            let start = in_cursor[t];
            in_cursor[t] += v * ky;
            target_spans[k] = (start, in_cursor[t]);
        }

        let bands = links
            .iter()
            .enumerate()
            .map(|(k, &(source, target, _))| LinkBand {
                source,
                target,
                source_span: source_spans[k],
                target_span: target_spans[k],
            })
            .collect();

        Self {
            columns,
            nodes,
            links: bands,
        }
    }
}

/// Cubic curve from `(x0, y0)` to `(x1, y1)` with horizontal tangents.
fn link_curve(x0: f64, y0: f64, x1: f64, y1: f64) -> impl Iterator<Item = (f64, f64)> {
    let xm = (x0 + x1) / 2.0;
    (0..=CURVE_STEPS).map(move |step| {
        let t = step as f64 / CURVE_STEPS as f64;
        let u = 1.0 - t;
        let x = u * u * u * x0 + 3.0 * u * u * t * xm + 3.0 * u * t * t * xm + t * t * t * x1;
        let y = (u * u * u + 3.0 * u * u * t) * y0 + (3.0 * u * t * t + t * t * t) * y1;
        (x, y)
    })
}

pub struct SankeyRenderer;

impl SankeyRenderer {
    pub fn render(
        diagram: &SankeyDiagram,
        path: &Path,
        size: (u32, u32),
        style: &StyleConfig,
    ) -> Result<()> {
        debug!(
            "sankey: {} nodes, {} links",
            diagram.nodes.len(),
            diagram.edges.len()
        );

        let family = style.font_family.as_str();
        let root = BitMapBackend::new(path, size).into_drawing_area();
        root.fill(&WHITE)?;
        let area = root.margin(MARGIN, MARGIN, MARGIN * 2, MARGIN * 2);
        let (w, h) = area.dim_in_pixel();
        let layout = SankeyLayout::compute(diagram, f64::from(w), f64::from(h));

        let px = |(x, y): (f64, f64)| (x.round() as i32, y.round() as i32);

        for band in &layout.links {
            let from = layout.nodes[band.source];
            let to = layout.nodes[band.target];
            let mut outline: Vec<(i32, i32)> =
                link_curve(from.x1, band.source_span.0, to.x0, band.target_span.0)
                    .map(px)
                    .collect();
            let lower: Vec<(i32, i32)> =
                link_curve(from.x1, band.source_span.1, to.x0, band.target_span.1)
                    .map(px)
                    .collect();
            outline.extend(lower.into_iter().rev());
            area.draw(&Polygon::new(outline, SANKEY_LINK_COLOR.filled()))?;
        }

        let label_style = (family, style.font_size * 0.75).into_font().color(&BLACK);
        for (i, node) in layout.nodes.iter().enumerate() {
            let corners = [px((node.x0, node.y0)), px((node.x1, node.y1))];
            area.draw(&Rectangle::new(corners, diagram.node_color(i).filled()))?;
            area.draw(&Rectangle::new(corners, BLACK.stroke_width(1)))?;

            let mid = (node.y0 + node.y1) / 2.0;
            let (anchor, x) = if node.column + 1 == layout.columns && layout.columns > 1 {
                (HPos::Right, node.x0 - 6.0)
            } else {
                (HPos::Left, node.x1 + 6.0)
            };
            area.draw(&Text::new(
                diagram.nodes[i].clone(),
                px((x, mid)),
                label_style.pos(Pos::new(anchor, VPos::Center)),
            ))?;
        }

        root.present()?;
        info!("Sankey diagram written to {}", path.display());
        Ok(())
    }
}
