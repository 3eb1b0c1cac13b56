use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use isotopos::config::{DATASET_ENV, DEFAULT_DATASET_URL, MAPBOX_TOKEN_ENV};
use isotopos::{ColorScale, Config, DatasetLoader, DatasetSource, FigureComposer, MapPanel};
use isotopos::{Selection, export, viz};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "isotopos",
    version,
    about = "Inspect the groundwater isotope dataset and export the dashboard panels"
)]
struct Cli {
    /// Dataset URL or CSV path.
    #[arg(long, global = true, env = DATASET_ENV, default_value = DEFAULT_DATASET_URL)]
    dataset: String,
    /// Map-styling access token, embedded in exported map JSON.
    #[arg(long, global = true, env = MAPBOX_TOKEN_ENV, hide_env_values = true)]
    mapbox_token: Option<String>,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print record count, site types and map color bounds.
    Info,
    /// Export the isotope scatter panel for a selection.
    Scatter(ScatterArgs),
    /// Export the site map panel.
    Map(OutArgs),
}

#[derive(Args, Debug)]
struct OutArgs {
    /// Output file (.json, .svg or .png).
    #[arg(long)]
    out: PathBuf,
    /// Width in pixels (images only).
    #[arg(long)]
    width: Option<u32>,
    /// Height in pixels (images only).
    #[arg(long)]
    height: Option<u32>,
}

#[derive(Args, Debug)]
struct ScatterArgs {
    /// Row positions separated by comma or semicolon (e.g., 0,2,5). Omit for all rows.
    #[arg(short, long)]
    select: Option<String>,
    #[command(flatten)]
    out: OutArgs,
}

fn parse_indices(s: &str) -> Result<Vec<usize>> {
    s.split([',', ';'])
        .map(str::trim)
        .filter(|x| !x.is_empty())
        .map(|x| {
            x.parse::<usize>()
                .with_context(|| format!("invalid row position {:?}", x))
        })
        .collect()
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"))
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let cfg = Config {
        dataset: DatasetSource::parse(&cli.dataset),
        mapbox_token: cli.mapbox_token.filter(|t| !t.trim().is_empty()),
    };
    let dataset = DatasetLoader::new()?
        .load(&cfg.dataset)
        .with_context(|| format!("loading dataset from {}", cfg.dataset))?;

    match cli.cmd {
        Command::Info => {
            println!("source: {}", dataset.origin());
            println!("records: {}", dataset.len());
            for (kind, n) in dataset.kind_counts() {
                println!("  {kind}: {n}");
            }
            match ColorScale::for_dataset(&dataset) {
                Some(s) => println!("color bounds (P/GW): cmin={} cmax={}", s.cmin, s.cmax),
                None => println!("color bounds (P/GW): none (no finite ratio values)"),
            }
        }
        Command::Scatter(args) => {
            let selection = match args.select.as_deref() {
                Some(s) => Selection::from_indices(parse_indices(s)?),
                None => Selection::all(),
            };
            if let Some(bad) = selection.indices().iter().find(|i| **i >= dataset.len()) {
                bail!("row position {} out of range (dataset has {} rows)", bad, dataset.len());
            }
            let spec = FigureComposer::new(dataset).compose(&selection);
            let path = &args.out.out;
            if is_json(path) {
                export::save_json(&spec, path)?;
            } else {
                let (w, h) = viz::DEFAULT_SCATTER_SIZE;
                viz::render_scatter(
                    &spec,
                    path,
                    args.out.width.unwrap_or(w),
                    args.out.height.unwrap_or(h),
                )?;
            }
            eprintln!(
                "Wrote scatter panel ({} samples) to {}",
                spec.samples().len(),
                path.display()
            );
        }
        Command::Map(args) => {
            let panel = MapPanel::from_dataset(&dataset, cfg.mapbox_token.as_deref());
            if is_json(&args.out) {
                export::save_json(&panel, &args.out)?;
            } else {
                let (w, h) = viz::DEFAULT_MAP_SIZE;
                viz::render_map(
                    &panel,
                    &args.out,
                    args.width.unwrap_or(w),
                    args.height.unwrap_or(h),
                )?;
            }
            eprintln!("Wrote map panel ({} sites) to {}", panel.len(), args.out.display());
        }
    }

    Ok(())
}
