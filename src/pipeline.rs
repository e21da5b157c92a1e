//! End-to-end report run: load, render each chart, collate.
//!
//! Steps run strictly in order and the first failure aborts the run. Each
//! chart is handed to the collator only through its image file.

use crate::charts::{
    BarChartRenderer, BarCounts, NetworkGraph, NetworkRenderer, SankeyDiagram, SankeyRenderer,
};
use crate::collate::{CollageInputs, Collator};
use crate::config::ReportConfig;
use crate::data::{DataLoader, DataProcessor};
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;

/// Files written by one run.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportOutputs {
    pub bar: PathBuf,
    pub sankey: PathBuf,
    pub network: PathBuf,
    pub collated: PathBuf,
}

pub fn run(config: &ReportConfig) -> Result<ReportOutputs> {
    let inputs = &config.inputs;
    let outputs = &config.outputs;
    let style = &config.style;

    std::fs::create_dir_all(&outputs.dir)
        .with_context(|| format!("Failed to create {}", outputs.dir.display()))?;

    let bar_df = DataLoader::load_csv(&inputs.bar).context("Loading bar data")?;
    let sankey_df = DataLoader::load_csv(&inputs.sankey).context("Loading sankey data")?;
    let network_df = DataLoader::load_csv(&inputs.network).context("Loading network data")?;

    let report = ReportOutputs {
        bar: outputs.bar_path(),
        sankey: outputs.sankey_path(),
        network: outputs.network_path(),
        collated: outputs.collated_path(),
    };

    let bar_table = DataProcessor::bar_table(&bar_df).context("Reading bar table")?;
    let counts = BarCounts::from_table(&bar_table);
    BarChartRenderer::render(&counts, &report.bar, config.sizes.bar, style)
        .context("Rendering bar chart")?;

    let sankey_table = DataProcessor::sankey_table(&sankey_df).context("Reading sankey table")?;
    let diagram = SankeyDiagram::build(&sankey_table);
    SankeyRenderer::render(&diagram, &report.sankey, config.sizes.sankey, style)
        .context("Rendering sankey diagram")?;

    let adjacency =
        DataProcessor::adjacency_table(&network_df).context("Reading network table")?;
    let graph = NetworkGraph::from_adjacency(&adjacency);
    NetworkRenderer::render(&graph, &report.network, config.sizes.network, style)
        .context("Rendering network plot")?;

    let panels = CollageInputs {
        bar: report.bar.clone(),
        sankey: report.sankey.clone(),
        network: report.network.clone(),
    };
    Collator::collate(&panels, &report.collated, config.sizes.collated, style)
        .context("Collating charts")?;

    info!("Report complete");
    Ok(report)
}
