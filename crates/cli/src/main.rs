use anyhow::Result;
use clap::{Parser, Subcommand};
use std::sync::Arc;

use agent_roi_core::ConfigLoader;
use agent_roi_data::{CsvExport, DatabaseClient, Repositories};
use agent_roi_studies::StudyService;
use agent_roi_web_api::{ApiServer, AppState};

#[derive(Parser)]
#[command(name = "agent-roi")]
#[command(about = "ROI analytics for AI-agent deployments", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web API server
    Server {
        /// Config file path
        #[arg(short, long, default_value = "config/Config.toml")]
        config: String,
        /// Listen address override (host:port), defaults to the config values
        #[arg(short, long)]
        addr: Option<String>,
    },
    /// Export studies to a CSV file
    Export {
        /// Config file path
        #[arg(short, long, default_value = "config/Config.toml")]
        config: String,
        /// Output CSV file path
        #[arg(short, long)]
        output: String,
        /// Only include studies for this agent
        #[arg(long)]
        agent_id: Option<i32>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Server { config, addr } => {
            run_server(&config, addr).await?;
        }
        Commands::Export {
            config,
            output,
            agent_id,
        } => {
            run_export(&config, &output, agent_id).await?;
        }
    }

    Ok(())
}

async fn run_server(config_path: &str, addr: Option<String>) -> Result<()> {
    let config = ConfigLoader::load_from(config_path)?;
    let client =
        DatabaseClient::new(&config.database.url, config.database.max_connections).await?;
    let repos = Repositories::new(client.pool());

    let service = StudyService::new(
        Arc::new(repos.studies.clone()),
        Arc::new(repos.agents.clone()),
    );
    let state = Arc::new(AppState {
        service,
        agents: Arc::new(repos.agents.clone()),
        reference: Arc::new(repos),
    });

    let addr = addr.unwrap_or_else(|| format!("{}:{}", config.server.host, config.server.port));
    ApiServer::new(state).serve(&addr).await
}

async fn run_export(config_path: &str, output: &str, agent_id: Option<i32>) -> Result<()> {
    let config = ConfigLoader::load_from(config_path)?;
    let client =
        DatabaseClient::new(&config.database.url, config.database.max_connections).await?;
    let repos = Repositories::new(client.pool());

    // Same service path as the API, so headless exports carry the same
    // guarantees over stored derived fields.
    let service = StudyService::new(
        Arc::new(repos.studies.clone()),
        Arc::new(repos.agents.clone()),
    );
    let studies = service.list(agent_id).await?;
    CsvExport::write_studies(output, &studies)?;

    tracing::info!(count = studies.len(), output, "exported studies");
    Ok(())
}
