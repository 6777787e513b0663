//! waypoint - mission-planning endpoint and terminal dashboard

mod chat;
mod config;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use waypoint_agent::{Planner, PlannerConfig};
use waypoint_ai::providers::openai::OpenAIProvider;
use waypoint_dashboard::{Dashboard, HttpTransport};

/// waypoint - mission-planning agent
#[derive(Parser, Debug)]
#[command(name = "waypoint")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Initialize config file
    #[arg(long)]
    init_config: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the planning endpoint
    Serve {
        /// Address to listen on (default: 127.0.0.1:8787)
        #[arg(short, long)]
        bind: Option<String>,

        /// Model to use (default: gpt-4o-mini)
        #[arg(short, long)]
        model: Option<String>,

        /// Ignore any API key and answer in local guidance mode
        #[arg(long)]
        local: bool,
    },
    /// Chat with a running endpoint from the terminal
    Chat {
        /// Planning endpoint URL
        #[arg(short, long)]
        endpoint: Option<String>,

        /// Initial goal
        #[arg(short, long, default_value = "")]
        goal: String,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("waypoint_cli=debug,waypoint_agent=debug,waypoint_ai=debug,waypoint_server=debug,waypoint_dashboard=debug,tower_http=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// How `serve` answers requests
#[derive(Debug, PartialEq, Eq)]
enum ServeMode {
    Model(String),
    LocalRequested,
    NoApiKey,
}

fn serve_mode(api_key: Option<String>, local: bool) -> ServeMode {
    match (api_key, local) {
        (_, true) => ServeMode::LocalRequested,
        (Some(key), false) => ServeMode::Model(key),
        (None, false) => ServeMode::NoApiKey,
    }
}

fn build_planner(config: &config::Config, model: Option<&str>, local: bool) -> Planner {
    let planner_config = PlannerConfig {
        model: config.model(model),
        ..Default::default()
    };
    let planner = Planner::new(planner_config);

    match serve_mode(config.api_key(), local) {
        ServeMode::Model(key) => {
            let provider = OpenAIProvider::new(key).with_base_url(config.base_url());
            planner.with_provider(Arc::new(provider))
        }
        ServeMode::LocalRequested => {
            tracing::info!("--local given, serving local guidance only");
            planner
        }
        ServeMode::NoApiKey => {
            tracing::info!("No API key configured, serving local guidance only");
            planner
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    if args.init_config {
        let path = config::Config::init().context("creating config file")?;
        println!("Config file at: {}", path.display());
        println!("\nExample config:\n{}", config::example_config());
        return Ok(());
    }

    let config = config::Config::load();

    match args.command {
        Some(Command::Serve { bind, model, local }) => {
            let addr: SocketAddr = config
                .bind(bind.as_deref())
                .parse()
                .context("invalid bind address")?;
            let planner = build_planner(&config, model.as_deref(), local);
            waypoint_server::serve(addr, Arc::new(planner)).await?;
        }
        Some(Command::Chat { endpoint, goal }) => {
            let transport = HttpTransport::new(config.endpoint(endpoint.as_deref()));
            let mut dashboard = Dashboard::new(goal);
            chat::run(&mut dashboard, &transport).await?;
        }
        None => {
            eprintln!("No command given. Try `waypoint serve` or `waypoint chat --goal \"...\"`.");
            std::process::exit(2);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_mode() {
        assert_eq!(serve_mode(Some("sk".into()), false), ServeMode::Model("sk".into()));
        assert_eq!(serve_mode(Some("sk".into()), true), ServeMode::LocalRequested);
        assert_eq!(serve_mode(None, true), ServeMode::LocalRequested);
        assert_eq!(serve_mode(None, false), ServeMode::NoApiKey);
    }

    #[test]
    fn test_local_flag_builds_heuristic_planner() {
        let config = config::Config {
            api_key: Some("sk-test".into()),
            ..Default::default()
        };
        assert!(!build_planner(&config, None, true).is_model_backed());
        assert!(build_planner(&config, None, false).is_model_backed());
    }
}
