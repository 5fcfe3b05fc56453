mod app;
mod error;
mod input;
mod paths;
mod render;
mod sample;
mod settings;
mod terminal;
mod theme;

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use clap::Parser;
use log::info;
use simplelog::{Config, LevelFilter, WriteLogger};

use sylva_lib::{TreeNode, TreeStore, model};

use crate::app::App;
use crate::error::AppError;
use crate::settings::Settings;
use crate::terminal::TerminalGuard;

#[derive(Parser)]
#[command(name = "sylva")]
#[command(about = "Browse, filter and edit a JSON tree in the terminal")]
struct Cli {
    /// Tree JSON file (an array of nodes). Uses a built-in sample when omitted.
    tree: Option<PathBuf>,

    /// Use a generated tree with a few thousand nodes instead of the small sample
    #[arg(long, conflicts_with = "tree")]
    large: bool,

    /// Settings file (defaults to config.json in the config directory)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    init_logging();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging() {
    paths::rotate_logs();
    let Some(path) = paths::log_file() else {
        return;
    };
    if let Some(dir) = path.parent() {
        let _ = fs::create_dir_all(dir);
    }
    if let Ok(file) = File::create(&path) {
        let _ = WriteLogger::init(LevelFilter::Debug, Config::default(), file);
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let settings = match cli.config.or_else(paths::settings_file) {
        Some(path) => Settings::load(&path)?,
        None => Settings::default(),
    };

    let data = match (&cli.tree, cli.large) {
        (Some(path), _) => load_tree(path)?,
        (None, true) => sample::large(20, 10, 15),
        (None, false) => sample::demo(),
    };
    info!("Starting with {} nodes", model::count(&data));

    let store = TreeStore::new(data, settings.terminal_tree_config())?;
    let app = App::new(store, settings.theme);

    let mut terminal = TerminalGuard::new()?;
    app.run(&mut terminal).await
}

fn load_tree(path: &Path) -> Result<Vec<TreeNode>, AppError> {
    let text = fs::read_to_string(path).map_err(|source| AppError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(model::from_json(&text)?)
}
