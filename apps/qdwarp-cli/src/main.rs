mod console;

use anyhow::Context;
use clap::{Parser, Subcommand};
use console::ConsoleSource;
use qdwarp_commands::{WarpConfig, WarpPlugin};
use qdwarp_common::DimensionId;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "qdwarp-cli", about = "Inspect and edit a world's warps")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// World save directory holding the warps file
    #[arg(short, long, default_value = ".")]
    world: PathBuf,

    /// Plugin config (JSON); defaults are used if it does not exist
    #[arg(short, long, default_value = "qdwarp.json")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List warps in file order
    List {
        /// Only names containing this text
        #[arg(short, long)]
        filter: Option<String>,
    },
    /// Show a single warp
    Show {
        name: String,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Report malformed lines in the warps file
    Check,
    /// Run a warp command as the server console
    Run {
        /// Console location: DIM,X,Y,Z[,YAW,PITCH]
        #[arg(long)]
        at: Option<String>,
        /// Extra dimensions the offline server should treat as loaded
        #[arg(long = "dimension")]
        dimensions: Vec<DimensionId>,
        /// Command line, e.g. `mkwarp pos-exact rot-exact home`
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        line: Vec<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = WarpConfig::load(&cli.config)
        .with_context(|| format!("reading config {}", cli.config.display()))?;
    let warps_path = config.warps_path(&cli.world);
    let plugin = WarpPlugin::new(config);

    match cli.command {
        Commands::List { filter } => {
            plugin.on_server_starting(&cli.world);
            let table = plugin.store().snapshot();
            let wanted = filter.unwrap_or_default();
            for (name, pos) in table.iter().filter(|(n, _)| n.contains(wanted.as_str())) {
                println!("{name}: {pos}");
            }
        }
        Commands::Show { name, json } => {
            plugin.on_server_starting(&cli.world);
            let pos = plugin
                .store()
                .get(&name)
                .with_context(|| format!("no warp named {name:?}"))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&pos)?);
            } else {
                println!("{name}: {pos}");
            }
        }
        Commands::Check => {
            let text = std::fs::read_to_string(&warps_path)
                .with_context(|| format!("reading {}", warps_path.display()))?;
            let issues = qdwarp_persist::check_document(&text);
            for issue in &issues {
                println!("{}:{}: {}", warps_path.display(), issue.line, issue.error);
            }
            if !issues.is_empty() {
                anyhow::bail!("{} malformed line(s)", issues.len());
            }
            println!("{}: OK", warps_path.display());
        }
        Commands::Run {
            at,
            dimensions,
            line,
        } => {
            plugin.on_server_starting(&cli.world);
            let mut source = match at {
                Some(at) => {
                    let (pos, has_rotation) = ConsoleSource::parse_at(&at)
                        .with_context(|| format!("invalid --at {at:?}"))?;
                    ConsoleSource::new(pos, has_rotation, dimensions)
                }
                None => ConsoleSource::at_origin(dimensions),
            };
            let line = line.join(" ");
            match plugin.dispatch(&mut source, &line)? {
                Some(feedback) => println!("{}", feedback.message),
                None => println!("OK"),
            }
        }
    }

    Ok(())
}
