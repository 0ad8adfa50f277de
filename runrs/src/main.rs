mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::info;
use runrs_core::cache::StateCache;
use runrs_core::config::RunrsConfig;
use runrs_core::dashboard::{Dashboard, DashboardParams};
use runrs_core::store::RunStore;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// path to a runrs configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the latest play state for every (host, playbook) pair
    Dashboard {
        /// run archive with hosts, playbooks, plays and results
        #[arg(short, long, value_name = "FILE")]
        results: PathBuf,

        /// free-text filter on host name or playbook path
        #[arg(short, long)]
        q: Option<String>,

        /// status filter: success or fail
        #[arg(short, long)]
        status: Option<String>,

        /// print the page model as JSON instead of plain text
        #[arg(long, action)]
        json: bool,
    },
    /// Show the single latest known state for each host
    Hosts {
        /// run archive with hosts, playbooks, plays and results
        #[arg(short, long, value_name = "FILE")]
        results: PathBuf,

        /// free-text filter on host name or playbook path
        #[arg(short, long)]
        q: Option<String>,

        /// status filter: success or fail
        #[arg(short, long)]
        status: Option<String>,

        /// print the states as JSON instead of plain text
        #[arg(long, action)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init_from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "info"),
    );

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => {
            info!("using configuration from {}", path.display());
            RunrsConfig::from_yaml_file(path)?
        }
        None => RunrsConfig::default(),
    };

    match cli.cmd {
        Commands::Dashboard {
            results,
            q,
            status,
            json,
        } => {
            let store = RunStore::from_yaml_file(&results)?;
            let cache = StateCache::from_settings(&config.cache);
            let dashboard = Dashboard::new(&store, &cache);
            let page = dashboard.render(&DashboardParams { q, status }).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&page)?);
            } else {
                output::print_dashboard(&page);
            }
        }
        Commands::Hosts {
            results,
            q,
            status,
            json,
        } => {
            let store = RunStore::from_yaml_file(&results)?;
            let cache = StateCache::from_settings(&config.cache);
            let dashboard = Dashboard::new(&store, &cache);
            let latest = dashboard.host_index(&DashboardParams { q, status }).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&latest)?);
            } else {
                output::print_hosts(&latest);
            }
        }
    }

    Ok(())
}
