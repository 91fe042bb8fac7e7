//! Command-line interface for gar-stream

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
use std::io::{self, BufWriter};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
use gar_stream::catalog::SchemaCatalog;
#[cfg(feature = "cli")]
use gar_stream::config::{ConvertOptions, ExpectedCount, MatchMode};
#[cfg(feature = "cli")]
use gar_stream::converters::JsonLinesSink;
#[cfg(feature = "cli")]
use gar_stream::loaders::collect_xml_files;
#[cfg(feature = "cli")]
use gar_stream::pipeline::Pipeline;
#[cfg(feature = "cli")]
use gar_stream::report::WarningLog;

#[cfg(feature = "cli")]
#[derive(Parser, Debug)]
#[command(name = "gar-stream")]
#[command(author, version, about = "Convert GAR/FIAS XML exports to newline-delimited JSON", long_about = None)]
struct Cli {
    /// Directory with GAR XSD schemas
    #[arg(long, value_name = "DIR", default_value = "gar_schemas")]
    schema_dir: PathBuf,

    /// XML file or directory of XML files to convert
    #[arg(long, value_name = "PATH")]
    xml: PathBuf,

    /// Element to stream (defaults to the first child of the root)
    #[arg(short, long)]
    element: Option<String>,

    /// Expected number of records per file (skips the counting pass)
    #[arg(long, value_name = "N", conflicts_with = "no_count")]
    expected_count: Option<usize>,

    /// Do not count records or report count mismatches
    #[arg(long)]
    no_count: bool,

    /// File that validation warnings are appended to
    #[arg(long, value_name = "FILE", default_value = "validation.log")]
    warn_log: PathBuf,

    /// Schema matching: prefix (dataset prefix) or root (root element)
    #[arg(long, value_name = "MODE", default_value = "prefix")]
    match_by: String,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[cfg(feature = "cli")]
fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(feature = "cli")]
fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[cfg(feature = "cli")]
fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let match_mode: MatchMode = cli.match_by.parse()?;

    let expected = match (cli.no_count, cli.expected_count) {
        (true, _) => ExpectedCount::Disabled,
        (false, Some(count)) => ExpectedCount::Fixed(count),
        (false, None) => ExpectedCount::Counted,
    };

    let options = ConvertOptions::new()
        .with_element(cli.element)
        .with_expected_count(expected);

    let catalog = SchemaCatalog::load(&cli.schema_dir, match_mode)?;
    let files = collect_xml_files(&cli.xml)?;

    let warnings = WarningLog::new(cli.warn_log);
    let stdout = io::stdout();
    let mut sink = JsonLinesSink::new(BufWriter::new(stdout.lock()));

    Pipeline::new(&catalog, options).run(&files, &mut sink, &warnings)?;
    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Rebuild with --features cli");
    std::process::exit(1);
}
