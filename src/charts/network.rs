//! Undirected node-link network with a two-shell layout.

use super::palette::*;
use crate::config::StyleConfig;
use crate::data::AdjacencyTable;
use crate::error::Result;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::collections::{BTreeSet, HashMap};
use std::f64::consts::PI;
use std::path::Path;
use tracing::{debug, info};

/// Node circle radius in pixels.
pub const NODE_RADIUS: i32 = 14;

const MARGIN: i32 = 30;

/// Fixed color groups a node can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeGroup {
    Central,
    Green,
    Yellow,
    Other,
}

impl NodeGroup {
    pub fn classify(label: &str) -> Self {
        if CENTRAL_NODES.contains(&label) {
            NodeGroup::Central
        } else if GREEN_NODES.contains(&label) {
            NodeGroup::Green
        } else if YELLOW_NODES.contains(&label) {
            NodeGroup::Yellow
        } else {
            NodeGroup::Other
        }
    }

    pub fn color(&self) -> RGBColor {
        match self {
            NodeGroup::Central => CENTRAL_COLOR,
            NodeGroup::Green => GREEN_COLOR,
            NodeGroup::Yellow => YELLOW_COLOR,
            NodeGroup::Other => DEFAULT_NODE_COLOR,
        }
    }
}

/// Simple undirected graph keyed by label. Nodes keep insertion order,
/// edges carry no weight and are stored once per unordered pair.
#[derive(Debug, Clone, Default)]
pub struct NetworkGraph {
    nodes: Vec<String>,
    index: HashMap<String, usize>,
    edges: BTreeSet<(usize, usize)>,
}

impl NetworkGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every positive cell links the row's label with the column's label.
    /// Columns are walked in file order, rows inside each column.
    pub fn from_adjacency(table: &AdjacencyTable) -> Self {
        let mut graph = Self::new();
        for (column, values) in &table.columns {
            for (label, &value) in table.row_labels.iter().zip(values) {
                if value > 0.0 {
                    graph.add_edge(label, column);
                }
            }
        }
        debug!(
            "network: {} nodes, {} edges",
            graph.node_count(),
            graph.edge_count()
        );
        graph
    }

    fn add_node(&mut self, label: &str) -> usize {
        if let Some(&idx) = self.index.get(label) {
            return idx;
        }
        let idx = self.nodes.len();
        self.nodes.push(label.to_string());
        self.index.insert(label.to_string(), idx);
        idx
    }

    pub fn add_edge(&mut self, a: &str, b: &str) {
        let a = self.add_node(a);
        let b = self.add_node(b);
        self.edges.insert((a.min(b), a.max(b)));
    }

    pub fn has_edge(&self, a: &str, b: &str) -> bool {
        match (self.index.get(a), self.index.get(b)) {
            (Some(&a), Some(&b)) => self.edges.contains(&(a.min(b), a.max(b))),
            _ => false,
        }
    }

    pub fn contains(&self, label: &str) -> bool {
        self.index.contains_key(label)
    }

    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.edges
            .iter()
            .map(|&(a, b)| (self.nodes[a].as_str(), self.nodes[b].as_str()))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Central nodes first, then every other graph node in insertion order.
    pub fn shells(&self) -> Vec<Vec<String>> {
        let central: Vec<String> = CENTRAL_NODES.iter().map(|s| s.to_string()).collect();
        let outer = self
            .nodes
            .iter()
            .filter(|n| !CENTRAL_NODES.contains(&n.as_str()))
            .cloned()
            .collect();
        vec![central, outer]
    }
}

/// Node positions on concentric rings inside the unit square.
#[derive(Debug, Clone, Default)]
pub struct ShellLayout {
    pub shells: Vec<Vec<String>>,
    positions: HashMap<String, (f64, f64)>,
}

impl ShellLayout {
    /// Shell `k` sits on radius `(k + 1) / shells` (a lone first node goes to
    /// the center). Each ring starts a further `π / shells` around.
    pub fn compute(shells: Vec<Vec<String>>) -> Self {
        let count = shells.len().max(1) as f64;
        let radius_bump = 1.0 / count;
        let rotate = PI / count;

        let mut radius = match shells.first() {
            Some(first) if first.len() == 1 => 0.0,
            _ => radius_bump,
        };
        let mut first_theta = rotate;
        let mut positions = HashMap::new();

        for shell in &shells {
            let len = shell.len() as f64;
            for (i, node) in shell.iter().enumerate() {
                let theta = i as f64 / len * 2.0 * PI + first_theta;
                positions.insert(node.clone(), (radius * theta.cos(), radius * theta.sin()));
            }
            radius += radius_bump;
            first_theta += rotate;
        }

        Self { shells, positions }
    }

    pub fn position(&self, node: &str) -> Option<(f64, f64)> {
        self.positions.get(node).copied()
    }

    /// Index of the ring holding `node`.
    pub fn shell_of(&self, node: &str) -> Option<usize> {
        self.shells.iter().position(|s| s.iter().any(|n| n == node))
    }
}

pub struct NetworkRenderer;

impl NetworkRenderer {
    pub fn render(
        graph: &NetworkGraph,
        path: &Path,
        size: (u32, u32),
        style: &StyleConfig,
    ) -> Result<()> {
        let layout = ShellLayout::compute(graph.shells());

        let root = BitMapBackend::new(path, size).into_drawing_area();
        root.fill(&WHITE)?;
        let area = root.margin(MARGIN, MARGIN, MARGIN, MARGIN);

        let mut chart =
            ChartBuilder::on(&area).build_cartesian_2d(-1.1f64..1.1f64, -1.1f64..1.1f64)?;

        let segments: Vec<[(f64, f64); 2]> = graph
            .edges()
            .filter_map(|(a, b)| Some([layout.position(a)?, layout.position(b)?]))
            .collect();
        for segment in segments {
            chart.draw_series(LineSeries::new(segment, EDGE_COLOR.stroke_width(1)))?;
        }

        let label_style = (style.font_family.as_str(), style.font_size * 0.75)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Center));
        chart.draw_series(graph.nodes().iter().filter_map(|node| {
            let pos = layout.position(node)?;
            let color = NodeGroup::classify(node).color();
            Some(
                EmptyElement::at(pos)
                    + Circle::new((0, 0), NODE_RADIUS, color.filled())
                    + Text::new(node.clone(), (0, 0), label_style.clone()),
            )
        }))?;

        root.present()?;
        info!("Network plot written to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adjacency() -> AdjacencyTable {
        AdjacencyTable {
            row_labels: vec!["D".into(), "USA".into(), "XYZ".into()],
            columns: vec![
                ("USA".into(), vec![2.0, 0.0, 0.0]),
                ("FRA".into(), vec![0.0, 1.0, -1.0]),
                ("D".into(), vec![0.0, 3.0, 0.0]),
            ],
        }
    }

    #[test]
    fn test_edges_from_positive_cells_only() {
        let graph = NetworkGraph::from_adjacency(&adjacency());

        assert!(graph.has_edge("D", "USA"));
        assert!(graph.has_edge("USA", "FRA"));
        assert!(!graph.has_edge("XYZ", "FRA"));
        assert!(!graph.contains("XYZ"));
        // (D, USA) and (USA, D) are both positive but form one edge.
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_edges_are_symmetric() {
        let graph = NetworkGraph::from_adjacency(&adjacency());
        for (a, b) in graph.edges() {
            assert!(graph.has_edge(a, b));
            assert!(graph.has_edge(b, a));
        }
    }

    #[test]
    fn test_nodes_in_insertion_order() {
        let graph = NetworkGraph::from_adjacency(&adjacency());
        assert_eq!(graph.nodes(), &["D", "USA", "FRA"]);
    }

    #[test]
    fn test_classify_groups() {
        assert_eq!(NodeGroup::classify("D"), NodeGroup::Central);
        assert_eq!(NodeGroup::classify("USA"), NodeGroup::Green);
        assert_eq!(NodeGroup::classify("FRA"), NodeGroup::Yellow);
        assert_eq!(NodeGroup::classify("JPN"), NodeGroup::Other);
        assert_eq!(NodeGroup::classify("d"), NodeGroup::Other);
        assert_eq!(NodeGroup::Other.color(), DEFAULT_NODE_COLOR);
    }

    #[test]
    fn test_central_nodes_in_innermost_shell() {
        let graph = NetworkGraph::from_adjacency(&adjacency());
        let layout = ShellLayout::compute(graph.shells());

        for node in CENTRAL_NODES {
            assert_eq!(layout.shell_of(node), Some(0));
            let (x, y) = layout.position(node).unwrap();
            assert!(((x * x + y * y).sqrt() - 0.5).abs() < 1e-9);
        }
        assert_eq!(layout.shell_of("USA"), Some(1));
        assert_eq!(layout.shell_of("D"), Some(0));
        let (x, y) = layout.position("FRA").unwrap();
        assert!(((x * x + y * y).sqrt() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_node_first_shell_is_centered() {
        let layout = ShellLayout::compute(vec![
            vec!["hub".to_string()],
            vec!["a".to_string(), "b".to_string()],
        ]);
        assert_eq!(layout.position("hub"), Some((0.0, 0.0)));
        let (x, y) = layout.position("a").unwrap();
        assert!(((x * x + y * y).sqrt() - 0.5).abs() < 1e-9);
    }
}
