use std::sync::Arc;

use clap::Parser;
use clap::Subcommand;
use linkslogic::config::AppConfig;
use linkslogic::embeddings::EmbeddingClient;
use linkslogic::llm::CompletionClient;
use linkslogic::router::RulingService;

#[derive(Parser)]
#[command(name = "linkslogic")]
#[command(about = "Golf rules assistant with template matching and rule retrieval")]
#[command(version)]
struct Cli {
    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "0.0.0.0")]
        host: String,
        /// Port to bind to
        #[arg(short, long, default_value = "8080")]
        port: u16,
        /// Disable CORS headers
        #[arg(long)]
        no_cors: bool,
    },
    /// Answer a single question from the command line
    Ask {
        /// The rules question to answer
        question: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;

    if cli.verbose {
        // Default filter keeps crate-level debug output on the console
        linkslogic::logging::init_logging(None)?;
    } else {
        linkslogic::logging::init_logging(Some(&config))?;
    }

    match cli.command {
        Commands::Serve { host, port, no_cors } => {
            linkslogic::api::serve_api(&config, host, port, !no_cors).await?;
        }
        Commands::Ask { question } => {
            let embedding_client = Arc::new(EmbeddingClient::from_config(&config)?);
            let completion_client = Arc::new(CompletionClient::from_config(&config)?);
            let service =
                RulingService::bootstrap(&config, embedding_client, completion_client).await?;

            let response = service.answer(&question).await;

            println!("{}", response.answer);
            println!();
            println!(
                "[source: {} | confidence: {} | tokens: {} | {:.2}s]",
                response.source.as_str(),
                response.confidence.as_str(),
                response.tokens_used,
                response.response_time,
            );
            if !response.rule_ids_used.is_empty() {
                println!("[rules: {}]", response.rule_ids_used.join(", "));
            }
        }
    }

    Ok(())
}
