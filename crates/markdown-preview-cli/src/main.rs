use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use markdown_preview_config::{Config, Mode};
use markdown_preview_engine::{Renderer, standalone_document};
use std::io::{Read, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "markdown-preview")]
#[command(about = "Render markdown to HTML the way the preview pane does")]
#[command(version)]
struct Cli {
    /// Markdown file to render; reads stdin when omitted
    input: Option<PathBuf>,

    /// Write HTML here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Wrap the fragment in a complete HTML document
    #[arg(long)]
    standalone: bool,

    /// Override the configured parser mode
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    /// Config file location
    #[arg(long, env = "MARKDOWN_PREVIEW_CONFIG")]
    config: Option<PathBuf>,

    /// Override the configured document title (with --standalone)
    #[arg(long)]
    title: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Auto,
    Fallback,
    Standards,
}

impl From<ModeArg> for Mode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Auto => Mode::Auto,
            ModeArg::Fallback => Mode::Fallback,
            ModeArg::Standards => Mode::Standards,
        }
    }
}

fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let config_path = path.unwrap_or_else(Config::config_path);
    match Config::load_from_path(&config_path)? {
        Some(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Ok(config)
        }
        None => {
            log::debug!(
                "No config file at {}, using defaults",
                config_path.display()
            );
            Ok(Config::default())
        }
    }
}

fn read_input(input: Option<&PathBuf>) -> Result<String> {
    match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut content = String::new();
            std::io::stdin()
                .read_to_string(&mut content)
                .context("Failed to read stdin")?;
            Ok(content)
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    let mut config = load_config(cli.config)?;
    if let Some(mode) = cli.mode {
        config.mode = mode.into();
    }
    if let Some(title) = cli.title {
        config.export.title = title;
    }

    let markdown = read_input(cli.input.as_ref())?;

    let renderer = Renderer::new();
    renderer.load(config.parser_mode());
    let fragment = renderer.render(&markdown).await?;

    let html = if cli.standalone {
        standalone_document(&fragment, &config.export_options()?)
    } else {
        fragment
    };

    match cli.output {
        Some(path) => {
            std::fs::write(&path, html)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("Wrote {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(html.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}
