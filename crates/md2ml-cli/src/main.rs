use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use md2ml_config::Config;
use md2ml_engine::{Converter, HtmlSink, PatternRegistry, RecordingSink, SinkCommand, io};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

mod preview;

#[derive(Parser)]
#[command(name = "md2ml")]
#[command(about = "Convert markdown into document construction commands")]
struct Cli {
    /// Config file (defaults to ~/.config/md2ml/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the command log, one command per line
    Commands {
        /// Input markdown file
        input: PathBuf,

        /// Print the log as TOML, one `[[commands]]` table per command
        #[arg(long)]
        toml: bool,
    },
    /// Render the document as HTML
    Html {
        /// Input markdown file
        input: PathBuf,

        /// Output HTML file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Browse the command log next to a text preview
    Preview {
        /// Input markdown file
        input: PathBuf,
    },
    /// Write a config file holding the default settings
    Init {
        /// Replace an existing config file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Serialize)]
struct CommandLog<'a> {
    commands: &'a [SinkCommand],
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config_arg = cli.config.as_deref();

    match cli.command {
        Command::Commands { input, toml } => {
            let sink = record(&input, &load_config(config_arg)?)?;
            if toml {
                print!("{}", command_log_toml(sink.commands())?);
            } else {
                println!("{}", sink.render());
            }
        }
        Command::Html { input, output } => {
            let html = render_html(&input, &load_config(config_arg)?)?;
            match output {
                Some(path) => {
                    fs::write(&path, html)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    log::info!("Created {}", path.display());
                }
                None => print!("{html}"),
            }
        }
        Command::Preview { input } => {
            let sink = record(&input, &load_config(config_arg)?)?;
            preview::run(&input, sink.into_commands())?;
        }
        Command::Init { force } => {
            let path = init_config(config_arg, force)?;
            log::info!("Created {}", path.display());
        }
    }
    Ok(())
}

/// Loads the config at `path`, or the default location when `path` is
/// `None`. Only an explicitly named file has to exist.
fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => {
            log::debug!("Config path: {}", path.display());
            Config::load_from_path(path)?
                .with_context(|| format!("Config file '{}' not found", path.display()))
        }
        None => {
            log::debug!("Config path: {}", Config::config_path().display());
            Ok(Config::load()?.unwrap_or_default())
        }
    }
}

/// Writes the default settings to `path` (or the default location) and
/// returns where they went.
fn init_config(path: Option<&Path>, force: bool) -> Result<PathBuf> {
    let target = path.map_or_else(Config::config_path, Path::to_path_buf);
    if target.exists() && !force {
        anyhow::bail!(
            "Config file '{}' already exists (use --force to replace it)",
            target.display()
        );
    }

    let config = Config::default();
    let saved = match path {
        Some(path) => config.save_to_path(path),
        None => config.save(),
    };
    saved.with_context(|| format!("Failed to write {}", target.display()))?;
    Ok(target)
}

fn command_log_toml(commands: &[SinkCommand]) -> Result<String> {
    toml::to_string(&CommandLog { commands }).context("Failed to serialize command log")
}

fn read_input(input: &Path) -> Result<String> {
    io::read_markdown(input).with_context(|| format!("Failed to read {}", input.display()))
}

fn convert_into(
    input: &Path,
    config: &Config,
    sink: &mut dyn md2ml_engine::DocumentSink,
) -> Result<()> {
    let markdown = read_input(input)?;
    let registry = PatternRegistry::new();
    let options = config.parse_options();
    let resolver = config.image_resolver(input);

    let stats = Converter::new(&registry, &options)
        .convert(&markdown, sink, &resolver)
        .with_context(|| format!("Failed to convert {}", input.display()))?;
    log::info!(
        "Converted {}: {} blocks from {} lines",
        input.display(),
        stats.blocks,
        stats.lines
    );
    Ok(())
}

fn record(input: &Path, config: &Config) -> Result<RecordingSink> {
    let mut sink = RecordingSink::new();
    convert_into(input, config, &mut sink)?;
    Ok(sink)
}

fn render_html(input: &Path, config: &Config) -> Result<String> {
    let mut sink = HtmlSink::new();
    convert_into(input, config, &mut sink)?;

    let title = config.html_title.clone().unwrap_or_else(|| {
        input
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default()
    });
    Ok(sink.finish_document(&title))
}
