//! Charts module - Chart rendering

mod bar;
mod network;
pub mod palette;
mod sankey;

pub use bar::{BarChartRenderer, BarCounts, BarSegment, BAR_X_TICKS};
pub use network::{NetworkGraph, NetworkRenderer, NodeGroup, ShellLayout, NODE_RADIUS};
pub use sankey::{
    LinkBand, NodeBox, SankeyDiagram, SankeyEdge, SankeyLayout, SankeyRenderer, NODE_PAD,
    NODE_THICKNESS,
};
