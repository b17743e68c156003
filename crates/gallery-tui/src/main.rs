mod action;
mod app;
mod app_state;
mod component;
mod components;
mod engine;
mod focus;
mod theme;
mod widgets;
mod workspace;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use gallery_core::catalog::Catalog;
use gallery_core::config::{Config, EngineKind, ThemeMode};
use gallery_core::demo::demo_catalog;
use gallery_core::manifest::Manifest;
use gallery_core::platform;

use crate::app_state::AppState;
use crate::theme::ThemeState;

/// Browse and play the media gallery in the terminal.
#[derive(Debug, Parser)]
#[command(name = "gallery", version, about)]
struct Cli {
    /// JSON manifest overlaid on the built-in catalog.
    #[arg(long, value_name = "PATH")]
    manifest: Option<PathBuf>,

    /// Playback engine for video and audio: `simulated` or `mpv`.
    #[arg(long, value_parser = parse_engine)]
    engine: Option<EngineKind>,

    /// Start with the light theme.
    #[arg(long)]
    light: bool,
}

fn parse_engine(raw: &str) -> Result<EngineKind, String> {
    match raw.to_ascii_lowercase().as_str() {
        "simulated" | "sim" => Ok(EngineKind::Simulated),
        "mpv" => Ok(EngineKind::Mpv),
        other => Err(format!("unknown engine '{}' (expected simulated or mpv)", other)),
    }
}

/// Build the catalog: embedded demo content plus the optional manifest.
/// A manifest that cannot be read is reported and skipped.
fn load_catalog(manifest: Option<&PathBuf>, warnings: &mut Vec<String>) -> anyhow::Result<Catalog> {
    let catalog = demo_catalog().context("built-in catalog is inconsistent")?;
    let Some(path) = manifest else {
        return Ok(catalog);
    };
    match Manifest::load(path) {
        Ok(m) => {
            tracing::info!("manifest: applied {}", path.display());
            Ok(m.apply(catalog))
        }
        Err(e) => {
            tracing::warn!("manifest: {}", e);
            warnings.push(format!("לא ניתן לטעון את קובץ המניפסט: {}", path.display()));
            Ok(catalog)
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let data_dir = platform::data_dir();
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("creating {}", data_dir.display()))?;
    let log_path = data_dir.join("gallery.log");

    // ── Load config ──────────────────────────────────────────────────────────
    let mut warnings = Vec::new();
    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            warnings.push("קובץ ההגדרות פגום, נטענו ברירות מחדל".to_string());
            eprintln!("gallery: config error: {:#}", e);
            Config::default()
        }
    };

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    // RUST_LOG wins over the config's filter.
    let log_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| config.log.filter.clone());
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(log_filter.as_str())
        .with_ansi(false)
        .init();

    // Print log path to stderr so the operator can tail it immediately.
    eprintln!("gallery log: {}", log_path.display());
    tracing::info!("gallery starting…");

    // ── Flags override config for this run only ─────────────────────────────
    let mut playback = config.playback.clone();
    if let Some(engine) = cli.engine {
        playback.engine = engine;
    }
    let theme = if cli.light {
        ThemeMode::Light
    } else {
        config.ui.theme
    };
    let manifest = cli.manifest.clone().or_else(|| config.library.manifest.clone());

    // ── Catalog ──────────────────────────────────────────────────────────────
    let catalog = load_catalog(manifest.as_ref(), &mut warnings)?;
    tracing::info!(
        "catalog: {} categories, {} items",
        catalog.categories().len(),
        catalog.item_count()
    );

    // ── Run TUI ──────────────────────────────────────────────────────────────
    let state = AppState::new(catalog, ThemeState::new(theme), playback);
    let app = app::App::new(state, config, warnings);
    app.run().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_engine() {
        assert_eq!(parse_engine("mpv"), Ok(EngineKind::Mpv));
        assert_eq!(parse_engine("Simulated"), Ok(EngineKind::Simulated));
        assert!(parse_engine("vlc").is_err());
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::parse_from(["gallery", "--engine", "mpv", "--light", "--manifest", "m.json"]);
        assert_eq!(cli.engine, Some(EngineKind::Mpv));
        assert!(cli.light);
        assert_eq!(cli.manifest, Some(PathBuf::from("m.json")));
    }

    #[test]
    fn test_bad_manifest_keeps_demo_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manifest.json");
        std::fs::write(&path, "{ not json").unwrap();
        let mut warnings = Vec::new();
        let catalog = load_catalog(Some(&path), &mut warnings).unwrap();
        assert_eq!(catalog.item_count(), 9);
        assert_eq!(warnings.len(), 1);
    }
}
