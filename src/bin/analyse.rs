//! Analyse a directory of generated graph instances.
//!
//! Walks an input directory for files named `graph_n<N>_m<M>_k<K>_*`,
//! computes topological metrics per instance, folds repeated samples per
//! parameter triplet into a running aggregate, and writes the `stats.csv`
//! report consumed by the plotting scripts. Files are processed in lexical
//! filename order so the order-dependent merge is deterministic.

use netmetrics::aggregate::StatsTable;
use netmetrics::loader;
use netmetrics::metrics::MetricSample;
use netmetrics::report;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

fn print_usage() {
    println!("Usage: analyse [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --input <dir>    Directory of graph instance files (default: ./stats)");
    println!("  --output <file>  Report path (default: <input>/stats.csv)");
    println!("  --json <file>    Also dump the aggregate records as JSON");
    println!("  -h, --help       Show this help");
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let mut input = PathBuf::from("./stats");
    let mut output: Option<PathBuf> = None;
    let mut json_output: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--input" if i + 1 < args.len() => {
                input = PathBuf::from(&args[i + 1]);
                i += 1;
            }
            "--output" if i + 1 < args.len() => {
                output = Some(PathBuf::from(&args[i + 1]));
                i += 1;
            }
            "--json" if i + 1 < args.len() => {
                json_output = Some(PathBuf::from(&args[i + 1]));
                i += 1;
            }
            "-h" | "--help" => {
                print_usage();
                return;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_usage();
                std::process::exit(2);
            }
        }
        i += 1;
    }

    let output = output.unwrap_or_else(|| input.join("stats.csv"));
    if let Err(err) = run(&input, &output, json_output.as_deref()) {
        eprintln!("analyse failed: {}", err);
        std::process::exit(1);
    }
}

fn run(
    input: &Path,
    output: &Path,
    json_output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut names: Vec<String> = std::fs::read_dir(input)?
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| name.starts_with("graph_"))
        .collect();
    // lexical order keeps the order-dependent merge reproducible
    names.sort();

    let total = names.len();
    info!(count = total, dir = %input.display(), "analysing graph instances");

    let mut table = StatsTable::new();
    for (index, name) in names.iter().enumerate() {
        info!("analysing {} ({}/{})", name, index + 1, total);
        let (key, graph) = match loader::load_graph_file(&input.join(name)) {
            Ok(loaded) => loaded,
            Err(err) => {
                warn!("skipping {}: {}", name, err);
                continue;
            }
        };
        let sample = MetricSample::compute(&graph);
        if sample.avg_path_length.is_none() {
            debug!("{}: average path length unavailable", name);
        }
        if sample.diameter.is_none() {
            debug!("{}: diameter unavailable", name);
        }
        table.ingest(key, &sample);
    }

    let records = table.into_records();
    report::write_report(output, &records)?;
    info!(rows = records.len(), report = %output.display(), "report written");

    if let Some(json_path) = json_output {
        let file = std::fs::File::create(json_path)?;
        serde_json::to_writer_pretty(file, &records)?;
        info!(path = %json_path.display(), "JSON summary written");
    }

    Ok(())
}
