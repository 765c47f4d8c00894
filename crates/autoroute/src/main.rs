use anyhow::{Context, Result};
use autoroute_common::{logger, AppConfig};
use autoroute_llm::{LlmClient, OllamaClient};
use autoroute_router::Router;
use autoroute_vector::VectorSearchEngine;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// FAQ entries loaded by `seed` when no file is given
const SAMPLE_FAQ: &[&str] = &[
    "How to reset my password?",
    "What is the refund policy?",
    "How to contact customer support?",
    "What are the working hours?",
    "How to delete my account?",
];

#[derive(Parser)]
#[command(name = "autoroute")]
#[command(about = "AutoRoute - FAQ vector search and chat request router", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(long)]
        port: Option<u16>,

        /// Index snapshot path
        #[arg(long)]
        index_path: Option<PathBuf>,
    },

    /// Embed FAQ documents and write a fresh index snapshot
    Seed {
        /// File with one document per line (defaults to the built-in sample FAQ)
        #[arg(long)]
        docs_file: Option<PathBuf>,

        /// Index snapshot path
        #[arg(long)]
        index_path: Option<PathBuf>,
    },

    /// Print the route chosen for a piece of text
    Classify {
        /// Text to classify
        text: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::from_env().context("Failed to load configuration")?;

    match cli.command {
        Some(Commands::Serve {
            host,
            port,
            index_path,
        }) => {
            if let Some(host) = host {
                config.server_host = host;
            }
            if let Some(port) = port {
                config.server_port = port;
            }
            if let Some(path) = index_path {
                config.vector_index_path = path;
            }
            serve(config).await?;
        }
        Some(Commands::Seed {
            docs_file,
            index_path,
        }) => {
            if let Some(path) = index_path {
                config.vector_index_path = path;
            }
            logger::setup_console_logging(&config.log_level)?;
            seed(&config, docs_file.as_deref()).await?;
        }
        Some(Commands::Classify { text }) => {
            let router = Router::with_faq_keywords(&config.faq_keywords);
            println!("{}", router.classify(&text));
        }
        None => serve(config).await?,
    }

    Ok(())
}

async fn serve(config: AppConfig) -> Result<()> {
    config.validate()?;
    config.ensure_directories()?;
    logger::setup_logging(&config.log_dir, &config.log_level)?;

    tracing::info!("AutoRoute starting...");
    tracing::info!("  Bind: {}", config.server_bind_address());
    tracing::info!("  Ollama: {}", config.ollama_base_url);
    tracing::info!("  Index: {}", config.vector_index_path.display());

    println!("Server listening on http://{}", config.server_bind_address());

    autoroute_server::start_server(config).await?;
    Ok(())
}

async fn seed(config: &AppConfig, docs_file: Option<&Path>) -> Result<()> {
    let documents: Vec<String> = match docs_file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect(),
        None => SAMPLE_FAQ.iter().map(|s| s.to_string()).collect(),
    };

    if documents.is_empty() {
        anyhow::bail!("No documents to index");
    }

    // Seeding always starts from an empty index and persists it
    let seed_config = AppConfig {
        persist_index: false,
        ..config.clone()
    };
    let llm: Arc<dyn LlmClient> = Arc::new(OllamaClient::new(&config.ollama_base_url)?);
    let engine = VectorSearchEngine::new(&seed_config, llm).await?;

    let count = documents.len();
    engine.add_documents(documents).await?;
    engine.save_to(&config.vector_index_path).await?;

    tracing::info!(
        "Indexed {} documents into {}",
        count,
        config.vector_index_path.display()
    );
    println!(
        "Vector store initialized with {} documents and saved to {}",
        count,
        config.vector_index_path.display()
    );

    Ok(())
}
