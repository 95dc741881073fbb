use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

use malaylanguage_mcp::{
    BindConfig, HttpModelProvider, ModelProvider, ProviderConfig, create_server, start_http,
};

// rmcp imports for MCP stdio server mode
use rmcp::service::ServiceExt;
use rmcp::transport::stdio;

#[derive(Parser)]
#[command(name = "malaylanguage-mcp")]
#[command(about = "Malay language processing MCP server")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run as an MCP stdio server (for use in mcp.json)
    Stdio {
        /// Base URL of the Malaya inference backend
        #[arg(long, env = "MALAYA_API_URL")]
        api_url: Option<String>,
    },
    /// Run the MCP HTTP server with the REST endpoints
    Http {
        /// Bind host (MCP_HOST overrides; default 0.0.0.0)
        #[arg(value_name = "HOST")]
        host: Option<String>,
        /// Bind port (MCP_PORT overrides; default 8000)
        #[arg(value_name = "PORT")]
        port: Option<u16>,
        /// Base URL of the Malaya inference backend
        #[arg(long, env = "MALAYA_API_URL")]
        api_url: Option<String>,
    },
    /// Print the tool catalog as JSON
    Tools,
    /// Probe a running server's health and root endpoints
    Check {
        /// Base URL of the server, e.g. http://localhost:8000
        url: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("malaylanguage_mcp=info".parse()?)
                .add_directive("rmcp=warn".parse()?),
        )
        .with_max_level(Level::INFO)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Stdio { api_url } => {
            info!("Starting MalayLanguage MCP server on stdio...");

            let server = create_server(build_provider(api_url)?);

            // Run as an MCP stdio server. McpServer implements ServerHandler.
            let service = server
                .as_ref()
                .clone()
                .serve(stdio())
                .await
                .inspect_err(|e| tracing::error!("serving error: {:?}", e))?;

            // Block until the MCP session ends.
            service.waiting().await?;
            info!("MCP stdio server session ended");
        }
        Commands::Http { host, port, api_url } => {
            let bind = BindConfig::resolve(host, port);
            info!("Starting MalayLanguage MCP HTTP server on {}", bind.addr());

            let server = create_server(build_provider(api_url)?);
            start_http(server, &bind.addr()).await?;
        }
        Commands::Tools => {
            let server = create_server(build_provider(None)?);
            let tools = server.tool_router().list_tools();
            println!("{}", serde_json::to_string_pretty(&tools)?);
        }
        Commands::Check { url } => {
            check_server(&url).await?;
        }
    }

    Ok(())
}

/// Build the inference provider, letting a CLI flag override the env config.
fn build_provider(api_url: Option<String>) -> Result<Arc<dyn ModelProvider>> {
    let mut config = ProviderConfig::from_env();
    if let Some(url) = api_url {
        config.base_url = url;
    }
    info!("Using Malaya inference backend at {}", config.base_url);
    Ok(Arc::new(HttpModelProvider::new(config)?))
}

/// Hit `/health` and `/` on a running server and report what came back.
async fn check_server(base_url: &str) -> Result<()> {
    let base = base_url.trim_end_matches('/');
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .build()?;

    let health: serde_json::Value = client
        .get(format!("{}/health", base))
        .send()
        .await?
        .json()
        .await?;

    if health.get("status").and_then(|s| s.as_str()) != Some("healthy") {
        anyhow::bail!("health check failed: {}", health);
    }
    println!("Health check passed");
    println!(
        "  Service: {}",
        health.get("service").and_then(|v| v.as_str()).unwrap_or("-")
    );
    println!(
        "  Version: {}",
        health.get("version").and_then(|v| v.as_str()).unwrap_or("-")
    );

    let root: serde_json::Value = client
        .get(format!("{}/", base))
        .send()
        .await?
        .json()
        .await?;

    println!("Root endpoint accessible");
    println!(
        "  MCP endpoint: {}",
        root.get("mcp_endpoint").and_then(|v| v.as_str()).unwrap_or("-")
    );

    Ok(())
}
