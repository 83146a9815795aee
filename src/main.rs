//! `placemarks` command-line front end.
//!
//! Every invocation opens the JSON config in the data directory, loads the
//! store, applies one command against the local filesystem host and saves the
//! store back when the command changed it.
//!
//! ```text
//! placemarks visit ~/src/project      # record a visit
//! placemarks add ~/Documents -t Docs  # append a favorite
//! placemarks favorites                # list favorites in order
//! placemarks recent -n 5              # top five frecently used places
//! placemarks clear-recents            # forget all visits
//! ```

use clap::{Parser, Subcommand};
use placemarks::infrastructure::{expand_tilde, home_dir};
use placemarks::observability::init_tracing;
use placemarks::storage::JsonFileConfig;
use placemarks::vfs::{MountedHost, VfsHost};
use placemarks::{open_store, Config, PlacemarkStore, Result};
use std::path::PathBuf;
use std::process::ExitCode;

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 3600;
const SECONDS_PER_DAY: i64 = 86400;

#[derive(Parser)]
#[command(name = "placemarks")]
#[command(author, version, about = "Favorite and frecently used locations", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a visit to a directory
    Visit {
        /// Directory that was visited
        path: String,
    },

    /// Append a directory to the favorites
    Add {
        /// Directory to add
        path: String,

        /// Title shown instead of the directory name
        #[arg(short, long, default_value = "")]
        title: String,
    },

    /// List favorites in order
    #[command(alias = "ls")]
    Favorites,

    /// List the most frecently used directories
    Recent {
        /// Maximum number of entries
        #[arg(short = 'n', long, default_value_t = 10)]
        amount: usize,
    },

    /// Forget every recorded visit
    ClearRecents,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    init_tracing(&config);

    let mut backend = JsonFileConfig::open(config.document_path())?;
    let host = MountedHost::native();
    let home = home_dir().unwrap_or_else(|| "/".to_string());
    let mut store = open_store(&config, &backend, &*host, &home)?;

    let changed = apply(&mut store, &*host, cli.command);

    if changed {
        store.save(&mut backend, &config.document_key)?;
    }
    Ok(())
}

/// Runs one command against `store`. Returns whether the store changed.
fn apply(store: &mut PlacemarkStore, host: &dyn VfsHost, command: Commands) -> bool {
    match command {
        Commands::Visit { path } => {
            store.report_visit(host, &absolute(&path));
            true
        }
        Commands::Add { path, title } => {
            let path = absolute(&path);
            let added = store.add_favorite_at(host, &path, &title);
            if !added {
                eprintln!("{path} is not reachable, nothing added");
            }
            added
        }
        Commands::Favorites => {
            print_favorites(store);
            false
        }
        Commands::Recent { amount } => {
            print_recent(store, amount);
            false
        }
        Commands::ClearRecents => {
            store.clear_visited();
            true
        }
    }
}

/// Expands `~` and anchors relative paths at the working directory.
fn absolute(path: &str) -> String {
    let expanded = expand_tilde(path);
    if expanded.starts_with('/') {
        return expanded;
    }

    match std::env::current_dir() {
        Ok(cwd) => cwd.join(expanded).to_string_lossy().into_owned(),
        Err(_) => expanded,
    }
}

fn print_favorites(store: &PlacemarkStore) {
    let favorites = store.favorites();
    if favorites.is_empty() {
        println!("No favorites");
        return;
    }

    for (index, favorite) in favorites.iter().enumerate() {
        println!("{:>3}. {:<20} {}", index + 1, favorite.display_title(), favorite.location());
    }
}

fn print_recent(store: &PlacemarkStore, amount: usize) {
    let now = chrono::Utc::now().timestamp();
    let recent = store.frecently_used_at(amount, now);
    if recent.is_empty() {
        println!("No recent locations");
        return;
    }

    for location in recent {
        let (count, last_visit) = store.visit(location.footprint()).unwrap_or((0, now));
        println!(
            "{:>5}  {:<10} {}",
            count,
            time_ago(now - last_visit),
            location
        );
    }
}

/// Formats an age in seconds as "just now", "5m ago", "3h ago" or "7d ago".
fn time_ago(diff: i64) -> String {
    if diff < SECONDS_PER_MINUTE {
        "just now".to_string()
    } else if diff < SECONDS_PER_HOUR {
        format!("{}m ago", diff / SECONDS_PER_MINUTE)
    } else if diff < SECONDS_PER_DAY {
        format!("{}h ago", diff / SECONDS_PER_HOUR)
    } else {
        format!("{}d ago", diff / SECONDS_PER_DAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_ago() {
        assert_eq!(time_ago(5), "just now");
        assert_eq!(time_ago(300), "5m ago");
        assert_eq!(time_ago(3 * 3600 + 10), "3h ago");
        assert_eq!(time_ago(7 * 86400), "7d ago");
    }

    #[test]
    fn test_absolute_keeps_absolute_paths() {
        assert_eq!(absolute("/srv/data"), "/srv/data");
        assert!(absolute("notes").ends_with("/notes"));
    }

    #[test]
    fn test_apply_reports_changes() {
        let native = MountedHost::native();
        let share = MountedHost::mount(&native, "sftp", "files.example.org");
        share.set_connected(false);
        let mut store = PlacemarkStore::default();

        let add = |path: &str| Commands::Add {
            path: path.to_string(),
            title: String::new(),
        };
        assert!(!apply(&mut store, &*share, add("/srv")));
        assert_eq!(store.favorite_count(), 0);

        assert!(apply(&mut store, &*native, add("/srv")));
        assert_eq!(store.favorite_count(), 1);

        assert!(!apply(&mut store, &*native, Commands::Favorites));
        assert!(apply(&mut store, &*native, Commands::ClearRecents));
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from(["placemarks", "add", "/tmp", "--title", "Scratch"]).unwrap();
        assert!(matches!(cli.command, Commands::Add { ref title, .. } if title == "Scratch"));

        let cli = Cli::try_parse_from(["placemarks", "recent", "-n", "3"]).unwrap();
        assert!(matches!(cli.command, Commands::Recent { amount: 3 }));
    }
}
