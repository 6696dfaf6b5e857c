use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use storm_core::{RULES, View, classify};
use storm_ingest::{load_storm_csv, since_year, to_raw_records};
use tracing_subscriber::EnvFilter;

mod categories;
mod config;
mod output;

use config::{Config, OutputFormat};

#[derive(Parser, Debug)]
#[command(
    name = "stormrank",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("STORMRANK_BUILD_SHA"), ")"),
    about = "Rank storm event categories by human and economic harm"
)]
struct Cli {
    /// Config file (default: ~/.stormrank/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging, overrides RUST_LOG and the config filter
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load a storm events CSV and print both ranked views
    Report {
        /// Path to the storm events CSV
        #[arg(long)]
        csv: PathBuf,

        /// Categories kept per view (default from config: 10)
        #[arg(long)]
        top: Option<usize>,

        /// Only count events that began in this year or later
        #[arg(long)]
        since: Option<i32>,

        #[arg(long, value_enum)]
        format: Option<OutputFormat>,

        /// Also save health.<ext> and economic.<ext> into this directory
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Print the category for each label
    Classify {
        #[arg(required = true)]
        labels: Vec<String>,
    },

    /// Show which raw labels fold into each category
    Categories {
        #[arg(long)]
        csv: PathBuf,
    },

    /// Print the classification rules in priority order
    Rules,

    /// Config file commands
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config (never overwrites)
    Init,
    /// Print the effective config
    Show,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config(cli.config.as_deref())?;
    init_logging(&cfg, cli.verbose);

    match cli.command {
        Command::Report { csv, top, since, format, out } => {
            let top_n = top.unwrap_or(cfg.report.top_n);
            let since = since.or(cfg.report.since_year);
            let format = format.unwrap_or(cfg.report.format);
            report(&csv, top_n, since, format, out.as_deref(), cfg.report.economic_scale)?;
        }

        Command::Classify { labels } => {
            for label in &labels {
                println!("{} -> {}", label, classify(label));
            }
        }

        Command::Categories { csv } => {
            require_file(&csv)?;
            let events = load_storm_csv(&csv)?;
            let groups = categories::label_groups(events.iter().map(|e| e.event_type.as_str()));
            let distinct_labels: usize = groups.iter().map(|g| g.labels.len()).sum();
            let fallbacks = groups.iter().filter(|g| g.fallback).count();

            for g in &groups {
                let marker = if g.fallback { " (unmatched)" } else { "" };
                println!("{:>5}  {}{}", g.labels.len(), g.category, marker);
            }
            println!(
                "\n{} distinct labels -> {} categories ({} unmatched)",
                distinct_labels,
                groups.len(),
                fallbacks
            );
        }

        Command::Rules => {
            for (i, rule) in RULES.iter().enumerate() {
                println!("{:>2}. {:<12} {}", i + 1, rule.category, rule.keywords.join(", "));
            }
            println!("{:>2}. {:<12} label itself, capitalized", RULES.len() + 1, "(fallback)");
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => {
                let (path, wrote) = config::init_config(cli.config.as_deref())?;
                if wrote {
                    println!("Wrote {}", path.display());
                } else {
                    println!("Config already exists: {}", path.display());
                }
            }
            ConfigCommand::Show => {
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

fn init_logging(cfg: &Config, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.logging.filter))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn require_file(path: &Path) -> Result<()> {
    if !path.exists() {
        bail!("CSV not found: {} (pass --csv <path>)", path.display());
    }
    Ok(())
}

fn report(
    csv: &Path,
    top_n: usize,
    since: Option<i32>,
    format: OutputFormat,
    out: Option<&Path>,
    economic_scale: f64,
) -> Result<()> {
    require_file(csv)?;

    let mut events = load_storm_csv(csv)?;
    if let Some(year) = since {
        let before = events.len();
        events = since_year(events, year);
        tracing::info!(year, kept = events.len(), dropped = before - events.len(), "applied year filter");
    }

    let records = to_raw_records(&events);
    let report = storm_core::run(&records, top_n);

    let mut stdout = std::io::stdout().lock();
    for view in View::ALL {
        output::print_view(&mut stdout, view, report.view(view), format, economic_scale)?;
    }

    if let Some(dir) = out {
        std::fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
        for view in View::ALL {
            let path = output::view_path(dir, view, format);
            output::write_view(&path, report.view(view), format)?;
            tracing::info!(path = %path.display(), rows = report.view(view).len(), "saved view");
        }
    }

    Ok(())
}
