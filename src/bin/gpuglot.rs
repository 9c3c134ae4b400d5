//! gpuglot - Interactive GPU spec table.
//!
//! Usage:
//!   gpuglot                        # browse the bundled dataset
//!   gpuglot --filter rtx           # start with a name filter
//!   gpuglot --print --sort fp16:desc --show bf16
//!   gpuglot --data ./gpus.json     # browse a custom dataset

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use gpuglot::column::ColumnId;
use gpuglot::grid::{PAGE_SIZES, SortDirection, SortState};
use gpuglot::model::Dataset;
use gpuglot::settings::{FileStore, KeyValueStore, MemoryStore};
use gpuglot::tui::{App, AppState};
use gpuglot::view::gpu::render_plain;

/// Interactive GPU spec table.
#[derive(Parser)]
#[command(name = "gpuglot", about = "GPU spec table viewer", version)]
struct Args {
    /// Load GPU records from this JSON file instead of the bundled dataset.
    #[arg(long, value_name = "PATH")]
    data: Option<PathBuf>,

    /// Directory for persisted preferences.
    /// Default: $XDG_CONFIG_HOME/gpuglot or $HOME/.config/gpuglot
    #[arg(long, value_name = "DIR")]
    config_dir: Option<PathBuf>,

    /// Keep preferences in memory only.
    #[arg(long)]
    no_persist: bool,

    /// Print one page as plain text and exit.
    #[arg(long)]
    print: bool,

    /// Initial name filter (case-insensitive substring).
    #[arg(short, long, value_name = "TEXT")]
    filter: Option<String>,

    /// Initial sort, e.g. "fp16" or "fp16:desc".
    #[arg(short, long, value_name = "COLUMN[:asc|:desc]", value_parser = parse_sort)]
    sort: Option<SortState>,

    /// Rows per page (10 or 20).
    #[arg(long, value_parser = parse_page_size)]
    page_size: Option<usize>,

    /// 1-based page to start on; clamped to the last page.
    #[arg(long, value_name = "N")]
    page: Option<usize>,

    /// Show a column hidden by default (repeatable), e.g. "bf16".
    #[arg(long, value_name = "COLUMN")]
    show: Vec<String>,

    /// Hide a column (repeatable), e.g. "citation".
    #[arg(long, value_name = "COLUMN")]
    hide: Vec<String>,

    /// Write logs to this file. Nothing is logged otherwise.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Increase logging verbosity (-v for debug, -vv for trace). Default is info level.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_sort(s: &str) -> Result<SortState, String> {
    let (key, direction) = match s.split_once(':') {
        None => (s, SortDirection::Ascending),
        Some((key, "asc")) => (key, SortDirection::Ascending),
        Some((key, "desc")) => (key, SortDirection::Descending),
        Some((_, dir)) => return Err(format!("invalid sort direction '{}'", dir)),
    };
    let column = key.parse::<ColumnId>().map_err(|e| e.to_string())?;
    Ok(SortState { column, direction })
}

fn parse_page_size(s: &str) -> Result<usize, String> {
    let size = s
        .trim()
        .parse::<usize>()
        .map_err(|e| format!("invalid page size '{}': {}", s, e))?;
    if !PAGE_SIZES.contains(&size) {
        return Err(format!("page size must be one of {:?}", PAGE_SIZES));
    }
    Ok(size)
}

fn init_logging(verbose: u8, path: &Path) -> std::io::Result<()> {
    let level = match verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn open_store(args: &Args) -> Box<dyn KeyValueStore> {
    if args.no_persist {
        return Box::new(MemoryStore::new());
    }
    match args.config_dir.clone().or_else(FileStore::default_dir) {
        Some(dir) => {
            let store = FileStore::new(dir);
            info!(dir = %store.dir().display(), "preferences directory");
            Box::new(store)
        }
        None => {
            warn!("no config directory found, preferences will not persist");
            Box::new(MemoryStore::new())
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let dataset = match &args.data {
        Some(path) => Dataset::from_path(path)?,
        None => Dataset::embedded()?,
    };
    info!(records = dataset.len(), "dataset loaded");

    let mut state = AppState::new(dataset.records().to_vec(), open_store(&args));

    for key in &args.show {
        state.prefs.show_key(key)?;
    }
    for key in &args.hide {
        state.prefs.hide_key(key)?;
    }

    let factor_in_cripple = state.factor_in_cripple();
    if let Some(sort) = args.sort {
        state.grid.set_sort(Some(sort), factor_in_cripple);
    }
    let visibility = state.prefs.visibility();
    state.grid.sync_visibility(&visibility, factor_in_cripple);

    if let Some(filter) = args.filter {
        state.filter_input = filter.clone();
        state.grid.set_filter(Some(filter));
    }
    if let Some(size) = args.page_size {
        state.grid.set_page_size(size);
    }
    if let Some(page) = args.page {
        state.grid.set_page_index(page.saturating_sub(1));
    }

    if args.print {
        print!("{}", render_plain(&state.view()));
        return Ok(());
    }

    App::new(state).run(gpuglot::tui::TICK_RATE)?;
    Ok(())
}

fn main() {
    let args = Args::parse();

    if let Some(path) = &args.log_file
        && let Err(e) = init_logging(args.verbose, path)
    {
        eprintln!("Error: cannot open log file '{}': {}", path.display(), e);
        std::process::exit(1);
    }

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sort_argument() {
        assert_eq!(
            parse_sort("fp16:desc"),
            Ok(SortState {
                column: ColumnId::Fp16,
                direction: SortDirection::Descending
            })
        );
        assert_eq!(parse_sort("name").map(|s| s.direction), Ok(SortDirection::Ascending));
        assert!(parse_sort("fp16:sideways").is_err());
        assert!(parse_sort("gpu_color").is_err());
    }

    #[test]
    fn page_size_must_be_supported() {
        assert_eq!(parse_page_size("20"), Ok(20));
        assert!(parse_page_size("15").is_err());
        assert!(parse_page_size("ten").is_err());
    }
}
