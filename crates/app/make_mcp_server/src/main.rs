//! make-mcp binary.
//!
//! Serves MCP over stdio. Stdout belongs to the protocol, so all logging goes
//! to stderr.

pub use self::error::{Error, Result};
mod error;

use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};

use cli::{Cli, Commands};
use make_core::{MakeApi, MakeClient};

mod cli;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,make_mcp=debug,make_core=debug".into()),
        )
        .init();

    if let Err(e) = run(Cli::parse()).await {
        error!("{e}");
        std::process::exit(1);
    }
}

async fn run(args: Cli) -> Result<()> {
    match args.command.unwrap_or(Commands::Serve) {
        Commands::Version => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        }
        Commands::Tools => {
            let (api, team_id) = connect(args.connection)?;
            let tools = make_mcp::registry::list_tools(api.as_ref(), team_id).await?;
            println!("{}", serde_json::to_string_pretty(&tools)?);
        }
        Commands::Serve => {
            let (api, team_id) = connect(args.connection)?;
            make_mcp::serve_stdio(api, team_id).await?;
        }
    }

    Ok(())
}

fn connect(connection: cli::ConnectionArgs) -> Result<(Arc<dyn MakeApi>, u64)> {
    let config = connection.into_config()?;
    info!(zone = %config.zone, team_id = config.team_id, "connecting to Make");
    let team_id = config.team_id;
    let api: Arc<dyn MakeApi> = Arc::new(MakeClient::new(config)?);
    Ok((api, team_id))
}
