//! cubed - render math scenes to SVG.
//!
//! Reads a JSON scene description (axes, graphs, labels and points), draws it
//! and writes the SVG document, optionally with the animation timeline.

mod logger;
mod scene;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use cubicon::Group;
use log::LevelFilter;
use logger::{log_section, CubedLogger};
use scene::{BuiltinFn, SceneConfig};
use std::fs;
use std::path::{Path, PathBuf};
use strum::IntoEnumIterator;

/// cubed - declarative math visualizations
#[derive(Parser)]
#[command(name = "cubed")]
#[command(about = "Render axes, function graphs and annotations to SVG")]
struct Cli {
    /// Log verbosity
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    /// Log to stderr only, without writing a log file
    #[arg(long)]
    no_log_file: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a scene description to SVG
    Render {
        /// Path of the JSON scene
        scene: PathBuf,

        /// Where to write the SVG (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also write the animation timeline as JSON
        #[arg(long)]
        timeline: Option<PathBuf>,
    },

    /// Render the built-in parabola scene
    Demo {
        /// Where to write the SVG (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the functions a scene can graph
    Functions,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    CubedLogger::init(cli.log_level.into(), !cli.no_log_file)?;

    match cli.command {
        Commands::Render {
            scene,
            output,
            timeline,
        } => render(&scene, output.as_deref(), timeline.as_deref()),
        Commands::Demo { output } => demo(output.as_deref()),
        Commands::Functions => {
            list_functions();
            Ok(())
        }
    }
}

/// Renders the scene at `path`.
fn render(path: &Path, output: Option<&Path>, timeline: Option<&Path>) -> Result<()> {
    log_section(&format!("render {}", path.display()));

    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read scene: {}", path.display()))?;
    let config: SceneConfig = serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse scene: {}", path.display()))?;

    let scene = config.build().context("Failed to build scene")?;
    log::debug!(
        "{} graph(s) over {} function(s)",
        scene.graphs.len(),
        scene.axes.functions().len()
    );
    write_svg(&scene.group, output)?;

    if let Some(timeline_path) = timeline {
        let json = serde_json::to_string_pretty(&scene.group.timeline())
            .context("Failed to serialize timeline")?;
        fs::write(timeline_path, json).with_context(|| {
            format!("Failed to write timeline: {}", timeline_path.display())
        })?;
        log::info!("timeline written to {}", timeline_path.display());
    }

    Ok(())
}

fn demo(output: Option<&Path>) -> Result<()> {
    log_section("demo");
    let scene = SceneConfig::demo()
        .build()
        .context("Failed to build demo scene")?;
    write_svg(&scene.group, output)
}

fn list_functions() {
    for function in BuiltinFn::iter() {
        println!("{:<12} {}", function.to_string(), function.latex());
    }
}

fn write_svg(group: &Group, output: Option<&Path>) -> Result<()> {
    let svg = group.to_svg();
    match output {
        Some(path) => {
            fs::write(path, &svg)
                .with_context(|| format!("Failed to write SVG: {}", path.display()))?;
            log::info!("wrote {} ({} cubicons)", path.display(), group.len());
        }
        None => print!("{}", svg),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from([
            "cubed",
            "--log-level",
            "debug",
            "--no-log-file",
            "render",
            "scene.json",
            "-o",
            "out.svg",
            "--timeline",
            "timeline.json",
        ])
        .unwrap();

        assert!(cli.no_log_file);
        assert_eq!(LevelFilter::from(cli.log_level), LevelFilter::Debug);
        match cli.command {
            Commands::Render {
                scene,
                output,
                timeline,
            } => {
                assert_eq!(scene, PathBuf::from("scene.json"));
                assert_eq!(output, Some(PathBuf::from("out.svg")));
                assert_eq!(timeline, Some(PathBuf::from("timeline.json")));
            }
            _ => panic!("expected render"),
        }
    }

    #[test]
    fn test_default_log_level() {
        let cli = Cli::try_parse_from(["cubed", "functions"]).unwrap();
        assert_eq!(LevelFilter::from(cli.log_level), LevelFilter::Info);
        assert!(!cli.no_log_file);
    }
}
