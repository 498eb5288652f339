use anyhow::Result;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use video_prompt_generator::models::Config;
use video_prompt_generator::orchestrator::Orchestrator;
use video_prompt_generator::server;

#[derive(Debug, Parser)]
#[command(name = "video-prompt-generator")]
#[command(about = "Turn an uploaded image into a cinematic video prompt")]
struct CliArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the analyze endpoint over HTTP.
    Serve {
        /// Listen address; defaults to BIND_ADDR.
        #[arg(long)]
        addr: Option<String>,
    },
    /// Run one request and print the response envelope as JSON.
    Analyze {
        /// Object key of the image in the configured bucket.
        #[arg(long)]
        key: String,
        #[arg(long, default_value = "")]
        user_text: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "video_prompt_generator=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = CliArgs::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let orchestrator = Orchestrator::new(&config).await;

    match args.command {
        Command::Serve { addr } => {
            let addr = addr.unwrap_or_else(|| config.bind_addr.clone());
            info!("Starting video-prompt-generator on {}", addr);
            server::serve(&addr, Arc::new(orchestrator)).await?;
        }
        Command::Analyze { key, user_text } => {
            let body = serde_json::json!({ "key": key, "userText": user_text }).to_string();
            let response = orchestrator.handle(&body).await;
            println!("{}", serde_json::to_string_pretty(&response)?);
            if !response.is_success() {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
