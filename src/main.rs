use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use rainfall_sql::export::{next_output_path, write_output};
use rainfall_sql::ingestion::ParseOptions;
use rainfall_sql::observability::{ConversionObserver, EventLogObserver, TracingObserver};
use rainfall_sql::pipeline::{convert_from_source, ConvertOptions};

#[derive(Parser)]
#[command(
    name = "rainfall-sql",
    version,
    about = "Convert pasted rain gauge logger exports into SQL VALUES tuples"
)]
struct Cli {
    /// Input file with the pasted export; `-` reads stdin.
    #[arg(default_value = "-")]
    input: String,

    /// Write to this exact file.
    #[arg(short, long, conflicts_with_all = ["out_dir", "stdout"])]
    output: Option<PathBuf>,

    /// Auto-name the output (`Precip_N.txt`) inside this directory. Defaults to the current
    /// directory.
    #[arg(long, conflicts_with = "stdout")]
    out_dir: Option<PathBuf>,

    /// Print the tuples to stdout instead of writing a file.
    #[arg(long)]
    stdout: bool,

    /// JSON file with parse options (timestamp_column, excluded_columns, null_markers).
    #[arg(long)]
    options: Option<PathBuf>,

    /// Name of the combined timestamp column.
    #[arg(long)]
    timestamp_column: Option<String>,

    /// Extra column to drop; may be repeated.
    #[arg(long = "exclude", value_name = "COLUMN")]
    excluded: Vec<String>,

    /// Append one line per conversion outcome to this file.
    #[arg(long)]
    event_log: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut parse = match &cli.options {
        Some(path) => ParseOptions::from_json_path(path)
            .with_context(|| format!("loading parse options from {}", path.display()))?,
        None => ParseOptions::default(),
    };
    if let Some(col) = cli.timestamp_column {
        parse.timestamp_column = col;
    }
    parse.excluded_columns.extend(cli.excluded);

    let mut observers: Vec<Arc<dyn ConversionObserver>> = vec![Arc::new(TracingObserver)];
    if let Some(path) = &cli.event_log {
        observers.push(Arc::new(EventLogObserver::new(path)));
    }
    let options = ConvertOptions {
        parse,
        observer: Some(Arc::new(observers)),
        ..Default::default()
    };

    let (source, raw) = read_input(&cli.input)?;
    let sql = convert_from_source(&source, &raw, &options)?;

    if cli.stdout {
        println!("{sql}");
        return Ok(());
    }

    let path = match cli.output {
        Some(path) => path,
        None => {
            let dir = cli.out_dir.unwrap_or_else(|| PathBuf::from("."));
            next_output_path(&dir)
                .with_context(|| format!("choosing output name in {}", dir.display()))?
        }
    };
    write_output(&path, &sql).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

fn read_input(input: &str) -> anyhow::Result<(String, String)> {
    if input == "-" {
        let mut raw = String::new();
        std::io::stdin()
            .read_to_string(&mut raw)
            .context("reading stdin")?;
        return Ok(("<stdin>".to_string(), raw));
    }
    let raw = std::fs::read_to_string(input).with_context(|| format!("reading {input}"))?;
    Ok((input.to_string(), raw))
}
