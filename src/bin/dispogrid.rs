//! CLI for dispogrid - inspect, repair and preview disposition files
//!
//! Usage:
//!   dispogrid inspect plate.json              # Shape, merges, contents, size in mm
//!   dispogrid normalize plate.json -o out.json
//!   dispogrid render plate.json -o plate.svg  # SVG preview
//!   dispogrid new -o empty.json               # Default 1x1 disposition

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use dispogrid::render::{RenderBackend, SvgRenderer};
use dispogrid::{Disposition, EditorConfig, GridLayoutEngine, GridView, Result};

#[derive(Parser, Debug)]
#[command(name = "dispogrid", version, about = "Inspect, repair and preview disposition layouts")]
struct Cli {
    /// Editor configuration (JSON); missing fields keep their defaults
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log engine activity (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a summary of a disposition
    Inspect {
        file: PathBuf,
    },
    /// Load leniently, repair, and write the disposition back out
    Normalize {
        file: PathBuf,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Render an SVG preview
    Render {
        file: PathBuf,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Write the default 1x1 disposition
    New {
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<EditorConfig> {
    match path {
        Some(path) => EditorConfig::from_json(&fs::read_to_string(path)?),
        None => Ok(EditorConfig::default()),
    }
}

fn load_engine(file: &Path, config: EditorConfig) -> Result<GridLayoutEngine> {
    let json = fs::read_to_string(file)?;
    info!(file = %file.display(), "loading disposition");
    Ok(GridLayoutEngine::from_disposition(
        Disposition::from_json_lenient(&json),
        config,
    ))
}

fn write_output(output: Option<&Path>, text: &str) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, text)?;
            info!(file = %path.display(), bytes = text.len(), "written");
        }
        None => println!("{text}"),
    }
    Ok(())
}

fn inspect(engine: &GridLayoutEngine) {
    let (w, h) = engine.page_size();
    let (w_mm, h_mm) = engine.page_size_mm();
    if let Some(name) = engine.name() {
        println!("name:          {name}");
    }
    println!("grid:          {} rows x {} columns", engine.num_rows(), engine.num_cols());
    println!("column widths: {:?}", engine.column_widths());
    println!("row height:    {}", engine.row_height());
    println!("page:          {w} x {h} px ({w_mm:.1} x {h_mm:.1} mm)");
    println!("merged regions ({}):", engine.regions().len());
    for r in engine.regions() {
        println!("  ({}, {}) spanning {} x {}", r.row, r.col, r.rowspan, r.colspan);
    }
    let filled: Vec<_> = engine.cells().iter().filter(|c| !c.content.is_empty()).collect();
    println!("contents ({}):", filled.len());
    for cell in filled {
        let kind = cell.content.kind().map_or("none", |k| k.as_str());
        let text = cell.content.to_parts().and_then(|(_, t)| t).unwrap_or_default();
        println!("  ({}, {}) {kind} {text:?}", cell.row, cell.col);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    match cli.command {
        Command::Inspect { file } => inspect(&load_engine(&file, config)?),
        Command::Normalize { file, output } => {
            let json = load_engine(&file, config)?.to_disposition().to_json()?;
            write_output(output.as_deref(), &json)?;
        }
        Command::Render { file, output } => {
            let mut view = GridView::from_engine(load_engine(&file, config)?);
            let mut svg = SvgRenderer::new();
            view.render(&mut svg)?;
            info!(width = svg.width(), height = svg.height(), "rendered preview");
            write_output(output.as_deref(), svg.output())?;
        }
        Command::New { output } => {
            let json = GridLayoutEngine::new(config).to_disposition().to_json()?;
            write_output(output.as_deref(), &json)?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
