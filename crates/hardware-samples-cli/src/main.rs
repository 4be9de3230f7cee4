//! CLI tool for querying interpolated hardware samples.

mod error;
mod render;
mod request;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use hardware_samples_core::SampleStore;
use log::info;
use snafu::ResultExt;

use crate::{
    error::{CliResult, PopulateSnafu, QuerySnafu},
    render::OutputFormat,
    request::{InlineRequest, load_request, parse_instant},
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormatArg {
    Json,
    Table,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(v: OutputFormatArg) -> Self {
        match v {
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Table => OutputFormat::Table,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List ingested devices with their sample counts and time spans
    Devices,

    /// Interpolate one dense sample and print it as JSON
    Interpolate {
        #[arg(long)]
        device: String,

        /// RFC 3339 instant or integer epoch milliseconds
        #[arg(long)]
        at: String,
    },

    /// Interpolate evenly spaced samples over [from, to)
    Tabulate {
        /// JSON file holding {"id", "from", "to", "count"}
        #[arg(long, conflicts_with_all = ["device", "from", "to", "count"])]
        request: Option<PathBuf>,

        #[arg(long, required_unless_present = "request")]
        device: Option<String>,

        /// RFC 3339 instant or integer epoch milliseconds
        #[arg(long, required_unless_present = "request")]
        from: Option<String>,

        /// RFC 3339 instant or integer epoch milliseconds (exclusive)
        #[arg(long, required_unless_present = "request")]
        to: Option<String>,

        #[arg(long, required_unless_present = "request")]
        count: Option<usize>,

        #[arg(long, value_enum, default_value_t = OutputFormatArg::Json)]
        format: OutputFormatArg,
    },
}

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Root of the sample tree (one directory per device)
    #[arg(long, env = "HWSAMPLES_DIR", default_value = "samples", global = true)]
    samples: PathBuf,

    #[command(subcommand)]
    cmd: Command,
}

async fn open_store(root: &Path) -> CliResult<SampleStore> {
    let store = SampleStore::populate(root).await.context(PopulateSnafu {
        root: root.display().to_string(),
    })?;
    info!(
        "loaded {} devices ({} samples) from {}",
        store.device_count(),
        store.sample_count(),
        root.display()
    );
    Ok(store)
}

fn cmd_devices(store: &SampleStore) -> CliResult<()> {
    println!("{}", render::devices(store));
    Ok(())
}

fn cmd_interpolate(store: &SampleStore, device: &str, at: &str) -> CliResult<()> {
    let at = parse_instant(at)?;
    let sample = store.interpolate(device, at).context(QuerySnafu)?;
    println!("{}", render::to_json(&sample)?);
    Ok(())
}

async fn cmd_tabulate(
    store: &SampleStore,
    request: Option<PathBuf>,
    inline: InlineRequest,
    format: OutputFormat,
) -> CliResult<()> {
    let request = match request {
        Some(path) => load_request(&path).await?,
        None => inline.into_request()?,
    };
    let tab = store.tabulate(&request).context(QuerySnafu)?;
    println!("{}", render::tabulation(&tab, format)?);
    Ok(())
}

async fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let store = open_store(&cli.samples).await?;

    match cli.cmd {
        Command::Devices => cmd_devices(&store),

        Command::Interpolate { device, at } => cmd_interpolate(&store, &device, &at),

        Command::Tabulate {
            request,
            device,
            from,
            to,
            count,
            format,
        } => {
            let inline = InlineRequest {
                device,
                from,
                to,
                count,
            };
            cmd_tabulate(&store, request, inline, format.into()).await
        }
    }
}

#[tokio::main]
async fn main() {
    env_logger::init();

    if let Err(e) = run().await {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
