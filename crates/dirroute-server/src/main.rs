mod config;

use anyhow::{Context, Result};
use axum::Router;
use clap::{Args, Parser, Subcommand};
use dirroute::axum::AxumRouter;
use dirroute::{setup_file_router, DiscoveryOptions, RouteTable, StaticResponse, TomlLoader};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{Config, DEFAULT_CONFIG_FILE};

#[derive(Parser)]
#[command(name = "dirroute-server")]
#[command(version, about = "Serve a directory of declarative route files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Discover routes and serve them over HTTP
    Serve {
        #[command(flatten)]
        discovery: DiscoveryArgs,

        /// Address to listen on (overrides the config file)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides the config file)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print the routes a directory would register, without serving
    Routes {
        #[command(flatten)]
        discovery: DiscoveryArgs,
    },
}

#[derive(Args)]
struct DiscoveryArgs {
    /// Configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Route directory (overrides the config file)
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// Handler file extension, repeatable (overrides the config file)
    #[arg(short, long = "ext")]
    ext: Vec<String>,
}

impl DiscoveryArgs {
    fn load(&self) -> Result<(Config, DiscoveryOptions)> {
        let config = Config::load(&self.config)?;
        let options = config.discovery(self.dir.clone(), &self.ext);
        Ok((config, options))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dirroute=info,dirroute_server=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            discovery,
            host,
            port,
        } => {
            let (mut config, options) = discovery.load()?;
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }

            let app = build_app(options).await?;
            serve(app, &config.server.addr()).await?;
        }
        Commands::Routes { discovery } => {
            let (_, options) = discovery.load()?;
            list_routes(options).await?;
        }
    }

    Ok(())
}

/// Bind every handler file under the route directory onto a fresh axum router
async fn build_app(options: DiscoveryOptions) -> Result<Router> {
    let mut router: AxumRouter = AxumRouter::new();
    let report = setup_file_router(Some(&mut router), TomlLoader, Some(options))
        .await
        .context("Failed to discover routes")?;

    info!(
        "Discovered {} routes in {} files under {:?}",
        report.routes.len(),
        report.files,
        report.root
    );

    Ok(router.into_inner())
}

async fn serve(app: Router, addr: &str) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Listening on http://{}", addr);
    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}

async fn list_routes(options: DiscoveryOptions) -> Result<()> {
    let mut table: RouteTable<StaticResponse> = RouteTable::new();
    setup_file_router(Some(&mut table), TomlLoader, Some(options))
        .await
        .context("Failed to discover routes")?;

    for entry in table.entries() {
        println!("{:<8} {}  ({})", entry.method.as_str(), entry.route, entry.handler.status);
    }
    Ok(())
}
