use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};

use super::stats::{TOP_VISITED, UsageStats};
use crate::config::Config;
use crate::database::Database;
use crate::models::{MatchResult, QueryOptions, SortMode};
use crate::shell::{Shell, hook};
use crate::utils::{format_last_visit, format_path_with_tilde, format_unix, normalize_path};

#[derive(Parser)]
#[command(name = "zoink")]
#[command(version)]
#[command(about = "Fast directory navigation with frecency", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Config file [default: <config dir>/zoink/config.json]
    #[arg(long, global = true, env = "ZOINK_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Verbose logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub find: FindArgs,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Find the best matching directory (default when no command is given)
    Find(FindArgs),
    /// Record a visit to a directory (defaults to the current one)
    Add {
        dir: Option<PathBuf>,
        /// Directory the shell came from; empty when the shell has no previous directory
        previous: Option<String>,
    },
    /// Remove a directory from the database
    Remove { dir: PathBuf },
    /// Remove directories that no longer exist
    Clean,
    /// Show usage statistics
    Stats,
    /// Print shell integration code
    Init {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug, Default, Clone)]
pub struct FindArgs {
    /// Search terms, matched against directory names
    pub query: Vec<String>,

    /// List matches instead of picking one
    #[arg(short, long)]
    pub list: bool,

    /// Print only the path, without a trailing newline
    #[arg(short, long)]
    pub echo: bool,

    /// Pick the nth match (1-based)
    #[arg(short, long, value_name = "N")]
    pub nth: Option<usize>,

    /// Sort by visit count only
    #[arg(short, long, conflicts_with = "recent")]
    pub rank: bool,

    /// Sort by last visit only
    #[arg(short = 't', long)]
    pub recent: bool,

    /// Maximum number of results [default: from config, else 10]
    #[arg(long, value_name = "N")]
    pub max_results: Option<usize>,
}

impl FindArgs {
    fn sort_mode(&self) -> SortMode {
        if self.rank {
            SortMode::Rank
        } else if self.recent {
            SortMode::Recent
        } else {
            SortMode::Frecency
        }
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(cli.config.as_deref())?;

    match &cli.command {
        Some(Commands::Find(args)) => find(&config, args),
        Some(Commands::Add { dir, previous }) => {
            let previous = previous.as_deref().filter(|previous| !previous.is_empty());
            add(&config, dir.as_deref(), previous)
        }
        Some(Commands::Remove { dir }) => remove(&config, dir),
        Some(Commands::Clean) => clean(&config),
        Some(Commands::Stats) => show_stats(&config),
        Some(Commands::Init { shell }) => {
            print!("{}", hook(*shell));
            Ok(())
        }
        None => find(&config, &cli.find),
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => {
            log::debug!("Using config {}", path.display());
            Ok(Config::load_from(path))
        }
        None => Config::load(),
    }
}

/// Open the database only if its file exists; `None` means nothing has been tracked yet
fn open_existing(config: &Config) -> Result<Option<Database>> {
    let path = config.database_path()?;
    if !path.exists() {
        return Ok(None);
    }
    open_database(&path).map(Some)
}

fn open_database(path: &Path) -> Result<Database> {
    Database::open(path).with_context(|| format!("Failed to open database {}", path.display()))
}

fn find(config: &Config, args: &FindArgs) -> Result<()> {
    let query = args.query.join(" ");

    if query.is_empty() && !args.list && !args.echo {
        println!("Use --help for usage information");
        return Ok(());
    }

    let Some(db) = open_existing(config)? else {
        if args.list {
            println!("Database does not exist yet");
            return Ok(());
        }
        bail!("Database does not exist yet. Visit some directories first.");
    };

    let nth = match args.nth {
        Some(0) => bail!("--nth is 1-based"),
        Some(n) => n,
        None => 1,
    };
    let max_results = args.max_results.unwrap_or_else(|| config.max_results()).max(nth);
    let options = QueryOptions::new(max_results).with_sort(args.sort_mode());
    let results = db.search(&query, &options);

    if results.is_empty() {
        let message = if query.is_empty() {
            "Database is empty".to_string()
        } else {
            format!("No directories found matching '{}'", query)
        };
        if args.list {
            println!("{}", message);
            return Ok(());
        }
        bail!(message);
    }

    if args.list {
        if args.echo {
            for result in &results {
                println!("{}", result.entry.path);
            }
        } else {
            print_directory_list(&results);
        }
        return Ok(());
    }

    let Some(selected) = results.get(nth - 1) else {
        bail!("Only {} matches for '{}'", results.len(), query);
    };

    if args.echo {
        print!("{}", selected.entry.path);
    } else {
        println!("{}", selected.entry.path);
    }

    Ok(())
}

fn print_directory_list(results: &[MatchResult]) {
    let noun = if results.len() == 1 { "directory" } else { "directories" };
    println!("Found {} {}:", results.len(), noun);
    println!();

    for (i, result) in results.iter().enumerate() {
        println!("  {}. {}", i + 1, format_path_with_tilde(Path::new(&result.entry.path)));
        println!(
            "     Visits: {} | Last: {}",
            result.entry.visit_count,
            format_last_visit(result.entry.last_visited)
        );
    }
}

fn add(config: &Config, dir: Option<&Path>, previous: Option<&str>) -> Result<()> {
    let dir = match dir {
        Some(dir) => dir.to_path_buf(),
        None => env::current_dir().context("Failed to get current directory")?,
    };
    let dir = normalize_path(&dir);

    if !dir.is_dir() {
        bail!("Directory '{}' does not exist", dir.display());
    }
    if config.is_excluded(&dir) {
        log::debug!("Skipping excluded directory {}", dir.display());
        return Ok(());
    }
    if let Some(previous) = previous {
        log::debug!("Came from {}", previous);
    }

    let db = open_database(&config.database_path()?)?;
    db.add_visit(&dir);
    db.close().context("Failed to save database")?;

    log::info!("Added visit to {}", dir.display());
    Ok(())
}

fn remove(config: &Config, dir: &Path) -> Result<()> {
    let dir = normalize_path(dir);

    let Some(db) = open_existing(config)? else {
        println!("Database does not exist yet");
        return Ok(());
    };

    if !db.remove_directory(&dir) {
        println!("Directory '{}' is not in the database", dir.display());
        return Ok(());
    }

    db.close().context("Failed to save database")?;
    println!("Removed: {}", dir.display());
    Ok(())
}

fn clean(config: &Config) -> Result<()> {
    let Some(db) = open_existing(config)? else {
        println!("Database does not exist yet");
        return Ok(());
    };

    let total = db.len();
    if total == 0 {
        println!("Database is empty - nothing to clean");
        return Ok(());
    }

    let removed = db.cleanup_missing();
    if removed == 0 {
        println!("All {} directories still exist - nothing to clean", total);
        return Ok(());
    }

    let remaining = db.len();
    db.close().context("Failed to save database")?;
    println!("Cleaned {} entries. {} directories remain.", removed, remaining);
    Ok(())
}

fn show_stats(config: &Config) -> Result<()> {
    let Some(db) = open_existing(config)? else {
        println!("Database does not exist yet");
        println!("Visit some directories or use 'zoink add /path' to create it");
        return Ok(());
    };

    let entries = db.get_all();
    let Some(stats) = UsageStats::from_entries(&entries, TOP_VISITED) else {
        println!("Database is empty");
        return Ok(());
    };

    println!("Database Statistics");
    println!("===================");
    println!();
    println!("Database location: {}", format_path_with_tilde(db.path()));
    println!("Total entries: {}", stats.total_entries);
    println!("Total visits: {}", stats.total_visits);
    println!("Average visits per directory: {:.1}", stats.average_visits());
    println!("Most visited directory: {} visits", stats.max_visits);
    println!(
        "Oldest entry: {} ({})",
        stats.oldest.basename(),
        format_unix(stats.oldest.first_visited, "%Y-%m-%d")
    );
    println!(
        "Most recent visit: {} ({})",
        stats.newest.basename(),
        format_unix(stats.newest.last_visited, "%Y-%m-%d %H:%M")
    );

    println!();
    println!("Top {} Most Visited:", stats.top.len());
    for (i, entry) in stats.top.iter().enumerate() {
        println!(
            "  {}. {} ({} visits, last: {})",
            i + 1,
            format_path_with_tilde(Path::new(&entry.path)),
            entry.visit_count,
            format_last_visit(entry.last_visited)
        );
    }

    Ok(())
}
