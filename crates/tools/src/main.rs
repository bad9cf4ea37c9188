use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use layers::query::{self, CategoryFilter, PlaceQuery};
use places::load_file;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use viewer::config::ViewerConfig;

mod report;

use report::CheckReport;

#[derive(Parser, Debug)]
#[command(author, version, about = "Inspect campus map datasets")]
struct Args {
    /// Viewer config JSON; supplies the category colors
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the places a filter leaves visible
    List {
        /// Dataset JSON file
        file: PathBuf,

        /// Category to keep, or "all"
        #[arg(long, default_value = "all")]
        category: String,

        /// Case-insensitive substring of name or description
        #[arg(long, default_value = "")]
        search: String,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Report records that would be skipped when loading
    Check {
        /// Dataset JSON file
        file: PathBuf,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    match run(Args::parse()) {
        Ok(code) => code,
        Err(e) => {
            error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<ExitCode, String> {
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => ViewerConfig::default(),
    };

    match args.command {
        Command::List {
            file,
            category,
            search,
            json,
        } => {
            let dataset = load_file(&file).map_err(|e| e.to_string())?;
            let mut q = PlaceQuery::new();
            q.set_category(CategoryFilter::parse(&category));
            q.set_search(&search);

            let visible = query::visible(&dataset.places, &q);
            info!(
                total = dataset.places.len(),
                visible = visible.len(),
                "filtered {}",
                file.display()
            );
            let rows = report::rows(&visible, &config.symbology);
            if json {
                let out = serde_json::to_string_pretty(&rows).map_err(|e| e.to_string())?;
                println!("{out}");
            } else {
                print!("{}", report::table(&rows));
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Check { file } => {
            let dataset = load_file(&file).map_err(|e| e.to_string())?;
            let report = CheckReport {
                accepted: dataset.places.len(),
                skipped: dataset.skipped,
            };
            print!("{}", report.render());
            Ok(if report.is_clean() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}

fn load_config(path: &Path) -> Result<ViewerConfig, String> {
    let json = fs::read_to_string(path).map_err(|e| format!("read {path:?}: {e}"))?;
    ViewerConfig::from_json_str(&json).map_err(|e| format!("{path:?}: {e}"))
}

#[cfg(test)]
mod tests {
    use super::{Args, Command};
    use clap::Parser;

    #[test]
    fn list_defaults_to_everything() {
        let args = Args::parse_from(["campus", "list", "data.json"]);
        match args.command {
            Command::List {
                category,
                search,
                json,
                ..
            } => {
                assert_eq!(category, "all");
                assert_eq!(search, "");
                assert!(!json);
            }
            other => panic!("unexpected command {other:?}"),
        }
        assert!(args.config.is_none());
    }

    #[test]
    fn config_is_accepted_after_the_subcommand() {
        let args = Args::parse_from(["campus", "check", "data.json", "--config", "config.json"]);
        assert_eq!(
            args.config.as_deref(),
            Some(std::path::Path::new("config.json"))
        );
        assert!(matches!(args.command, Command::Check { .. }));
    }
}
