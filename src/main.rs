//! Assignment Charts - renders the bar, Sankey and network charts and the
//! collated PDF into the working directory.
//!
//! Usage: `assignment_charts [config.json]`

use anyhow::Result;
use assignment_charts::{logger, pipeline, ReportConfig};

fn main() -> Result<()> {
    let config = match std::env::args_os().nth(1) {
        Some(path) => ReportConfig::load(path)?,
        None => ReportConfig::default(),
    };

    logger::init(&config.log_level)?;

    let outputs = pipeline::run(&config)?;
    for path in [
        &outputs.bar,
        &outputs.sankey,
        &outputs.network,
        &outputs.collated,
    ] {
        println!("{}", path.display());
    }

    Ok(())
}
