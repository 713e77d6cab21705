/// wire3d - wireframe model viewer for the terminal
///
/// Usage: wire3d [model.obj]   (defaults to models/sphere.obj)
///
/// Controls:
///   - WASD: Move horizontally
///   - Space / C / Left Shift: Move up / down
///   - Mouse or Arrow Keys: Look around
///   - Mouse Wheel: Change movement speed
///   - Ctrl+C: Quit

use anyhow::{Context, Result};
use std::env;
use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use wire3d_core::{load_obj, ViewerConfig};
use wire3d_terminal::{TerminalApp, TerminalConfig};

const DEFAULT_MODEL: &str = "models/sphere.obj";
const LOG_FILE: &str = "wire3d.log";

fn main() -> Result<()> {
    init_tracing()?;

    let path = env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL));
    let mesh = load_obj(&path)
        .with_context(|| format!("failed to load model {}", path.display()))?;

    let mut app = TerminalApp::new(mesh, ViewerConfig::default(), TerminalConfig::default())
        .context("failed to open the terminal display")?;
    app.run().context("renderer stopped")?;

    tracing::info!("exiting");
    Ok(())
}

/// Log to a file; the alternate screen owns the terminal while running.
fn init_tracing() -> Result<()> {
    let log_path = env::temp_dir().join(LOG_FILE);
    let file = File::create(&log_path)
        .with_context(|| format!("failed to create log file {}", log_path.display()))?;

    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("wire3d=info,wire3d_core=info,wire3d_terminal=info"))?;
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
    Ok(())
}
