//! Colors and fixed label lists shared by the renderers.

use plotters::style::{RGBAColor, RGBColor};

pub const NO_COLOR: RGBColor = RGBColor(255, 0, 0); // Red
pub const YES_COLOR: RGBColor = RGBColor(0, 0, 255); // Blue

/// Sankey node colors, repeated cyclically over the node list.
pub const SANKEY_PALETTE: [RGBColor; 10] = [
    RGBColor(0x1f, 0x77, 0xb4), // Blue
    RGBColor(0xff, 0x7f, 0x0e), // Orange
    RGBColor(0x2c, 0xa0, 0x2c), // Green
    RGBColor(0xd6, 0x27, 0x28), // Red
    RGBColor(0x94, 0x67, 0xbd), // Purple
    RGBColor(0x8c, 0x56, 0x4b), // Brown
    RGBColor(0xe3, 0x77, 0xc2), // Pink
    RGBColor(0x7f, 0x7f, 0x7f), // Gray
    RGBColor(0xbc, 0xbd, 0x22), // Olive
    RGBColor(0x17, 0xbe, 0xcf), // Cyan
];

pub const SANKEY_LINK_COLOR: RGBAColor = RGBAColor(150, 150, 150, 0.4);

/// Network nodes pinned to the innermost layout shell.
pub const CENTRAL_NODES: [&str; 5] = ["D", "F", "I", "N", "S"];

pub const GREEN_NODES: [&str; 12] = [
    "BIH", "GEO", "ISR", "MNE", "SRB", "CHE", "TUR", "UKR", "GBR", "AUS", "HKG", "USA",
];

pub const YELLOW_NODES: [&str; 20] = [
    "AUT", "BEL", "BGR", "HRV", "CZE", "EST", "FRA", "DEU", "GRC", "HUN", "IRL", "ITA", "LVA",
    "LUX", "NLD", "PRT", "ROU", "SVK", "SVN", "ESP",
];

pub const CENTRAL_COLOR: RGBColor = RGBColor(0, 0, 255); // Blue
pub const GREEN_COLOR: RGBColor = RGBColor(0, 128, 0);
pub const YELLOW_COLOR: RGBColor = RGBColor(255, 255, 0);
pub const DEFAULT_NODE_COLOR: RGBColor = RGBColor(128, 128, 128); // Gray
pub const EDGE_COLOR: RGBColor = RGBColor(128, 128, 128);

/// Color for the `index`-th Sankey node.
pub fn sankey_node_color(index: usize) -> RGBColor {
    SANKEY_PALETTE[index % SANKEY_PALETTE.len()]
}
