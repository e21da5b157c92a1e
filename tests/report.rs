use assignment_charts::charts::{BarCounts, NetworkGraph, SankeyDiagram, ShellLayout};
use assignment_charts::config::{InputFiles, OutputFiles, ReportConfig};
use assignment_charts::data::{DataLoader, DataProcessor};
use std::path::{Path, PathBuf};

const BAR_CSV: &str = "LABEL,COUNT\n\
Health,1\nHealth,0\nHealth,1\nEducation,0\nHealth,1\nHealth,0\nEducation,0\n";

fn sankey_csv() -> String {
    let mut csv = String::from("LABEL,PS,OMP,CNP,NRP,NMCCC,PEC,NCDM,RGS,Reg,Aca,Oth\n");
    csv.push_str("Alpha,1,2,0,1,3,0,1,2,4,3,2\n");
    csv.push_str("Beta,0,1,1,0,2,1,0,1,2,1,0\n");
    csv.push_str("Gamma,2,0,1,1,0,0,0,0,1,1,0\n");
    csv
}

const NETWORK_CSV: &str = "LABELS,USA,FRA,D,JPN\nD,1,0,0,2\nF,0,3,0,0\nUSA,0,0,1,0\nJPN,0,0,0,0\n";

fn write(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, body).unwrap();
    path
}

fn config_in(dir: &Path) -> ReportConfig {
    ReportConfig {
        inputs: InputFiles {
            bar: write(dir, "bar_assignment.csv", BAR_CSV),
            sankey: write(dir, "sankey_assignment.csv", &sankey_csv()),
            network: write(dir, "networks_assignment.csv", NETWORK_CSV),
        },
        outputs: OutputFiles {
            dir: dir.join("out"),
            ..OutputFiles::default()
        },
        ..ReportConfig::default()
    }
}

#[test]
fn bar_counts_from_csv() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());

    let df = DataLoader::load_csv(&config.inputs.bar).unwrap();
    let counts = BarCounts::from_table(&DataProcessor::bar_table(&df).unwrap());

    assert_eq!(counts.categories, vec!["Health", "Education"]);
    assert_eq!((counts.no[0], counts.yes[0]), (2, 3));
    assert_eq!((counts.no[1], counts.yes[1]), (2, 0));

    let labels: Vec<Option<String>> = counts
        .segments()
        .iter()
        .filter(|s| s.category == 0)
        .map(|s| s.label())
        .collect();
    assert_eq!(labels, vec![Some("2".to_string()), Some("3".to_string())]);
}

#[test]
fn sankey_from_csv() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());

    let df = DataLoader::load_csv(&config.inputs.sankey).unwrap();
    let diagram = SankeyDiagram::build(&DataProcessor::sankey_table(&df).unwrap());

    assert_eq!(diagram.edges.len(), 8 * 3 + 3 * 3);
    assert_eq!(diagram.nodes.len(), 8 + 3 + 3);
    let nmccc_alpha = diagram
        .edges
        .iter()
        .find(|e| e.source == "NMCCC" && e.target == "Alpha")
        .unwrap();
    assert_eq!(nmccc_alpha.value, 3.0);
    // Zero cells still produce links.
    assert!(diagram
        .edges
        .iter()
        .any(|e| e.source == "Beta" && e.target == "Oth" && e.value == 0.0));
}

#[test]
fn network_from_csv() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());

    let df = DataLoader::load_csv(&config.inputs.network).unwrap();
    let graph = NetworkGraph::from_adjacency(&DataProcessor::adjacency_table(&df).unwrap());

    assert!(graph.has_edge("D", "USA"));
    assert!(graph.has_edge("USA", "D"));
    assert!(graph.has_edge("F", "FRA"));
    assert!(graph.has_edge("D", "JPN"));
    assert!(!graph.has_edge("F", "USA"));
    // D-USA appears in both (D, USA) and (USA, D) cells.
    assert_eq!(graph.edge_count(), 3);

    let layout = ShellLayout::compute(graph.shells());
    assert_eq!(layout.shell_of("D"), Some(0));
    assert_eq!(layout.shell_of("N"), Some(0));
    assert_eq!(layout.shell_of("JPN"), Some(1));
}

#[test]
fn missing_input_aborts_run() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config_in(dir.path());
    config.inputs.sankey = dir.path().join("absent.csv");

    let err = assignment_charts::run(&config).unwrap_err();
    assert!(format!("{err:#}").contains("absent.csv"));
    assert!(!config.outputs.collated_path().exists());
}

#[test]
fn full_report_writes_four_files() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());

    let outputs = assignment_charts::run(&config).unwrap();

    for png in [&outputs.bar, &outputs.sankey, &outputs.network] {
        let img = image::open(png).unwrap();
        assert!(img.width() > 0 && img.height() > 0);
    }
    let (w, h) = config.sizes.bar;
    assert_eq!(image::image_dimensions(&outputs.bar).unwrap(), (w, h));

    let pdf = std::fs::read(&outputs.collated).unwrap();
    assert!(pdf.starts_with(b"%PDF-1.4"));
    assert!(pdf.ends_with(b"%%EOF\n"));
    assert_eq!(
        outputs.collated.file_name().unwrap(),
        "Collated Visualization.pdf"
    );
}
