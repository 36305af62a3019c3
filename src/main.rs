use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::*;
use std::io::{self, IsTerminal, Read};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use humanizer_api::{run_server, HumanizeService, ServerConfig};
use humanizer_core::{GenerationService, HumanizeMethod, HumanizeRequest, HumanizeResponse};
use humanizer_inference::HuggingFaceClient;

#[derive(Parser)]
#[command(name = "notecraft")]
#[command(about = "Rewrite machine-generated text so it reads naturally", long_about = None)]
struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true, env = "HUMANIZER_LOG_JSON")]
    log_json: bool,

    /// Skip the hosted model even when HF_API_TOKEN is set
    #[arg(long, global = true)]
    no_model: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        /// Address to listen on (overrides HUMANIZER_BIND)
        #[arg(short, long)]
        bind: Option<SocketAddr>,
    },
    /// Humanize one text and print the JSON response
    Humanize(HumanizeArgs),
}

#[derive(Args)]
struct HumanizeArgs {
    /// Text to rewrite; read from stdin when omitted
    text: Option<String>,

    #[arg(long, default_value = "neutral")]
    tone: String,

    #[arg(long, default_value = "professional")]
    style: String,

    #[arg(long, default_value = "maintain")]
    length: String,

    /// Print a colored summary instead of JSON
    #[arg(long)]
    summary: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let mut config = ServerConfig::from_env()?;
    let generator = if cli.no_model { None } else { load_generator() };

    match cli.command {
        Commands::Serve { bind } => {
            if let Some(bind) = bind {
                config = config.with_bind(bind);
            }
            let service = HumanizeService::new(&config, generator);
            run_server(&config, service, shutdown_signal()).await?;
        }
        Commands::Humanize(args) => {
            let service = HumanizeService::new(&config, generator);
            let text = match args.text {
                Some(text) => text,
                None => read_stdin()?,
            };
            let request = HumanizeRequest::new(text)
                .with_tone(args.tone)
                .with_style(args.style)
                .with_length(args.length);

            let response = service.humanize(&request).await?;
            if args.summary {
                print_summary(&response);
            } else {
                println!("{}", serde_json::to_string_pretty(&response)?);
            }
        }
    }

    Ok(())
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// The hosted model is optional; any configuration problem means running without it
fn load_generator() -> Option<Arc<dyn GenerationService>> {
    match HuggingFaceClient::from_env() {
        Ok(client) => {
            info!(model = client.model_id(), "generation model configured");
            Some(Arc::new(client))
        }
        Err(e) => {
            warn!(error = %e, "running without a generation model");
            None
        }
    }
}

fn read_stdin() -> Result<String> {
    let mut stdin = io::stdin();
    if stdin.is_terminal() {
        eprintln!("{}", "Enter text, then Ctrl-D:".dimmed());
    }
    let mut text = String::new();
    stdin
        .read_to_string(&mut text)
        .context("failed to read text from stdin")?;
    Ok(text)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for ctrl-c");
    }
}

fn print_summary(response: &HumanizeResponse) {
    let method = match response.method {
        HumanizeMethod::Model => "model".green(),
        HumanizeMethod::RuleBased => "rule-based".yellow(),
    };

    println!("{} {}", "→".green(), response.humanized_text.bold());
    println!(
        "  {} {}  {} {}  {} {}",
        "method:".dimmed(),
        method,
        "words:".dimmed(),
        response.word_count,
        "chars:".dimmed(),
        response.character_count
    );

    if let Some(metrics) = &response.quality_metrics {
        let verdict = if metrics.passes_validation {
            "passed".green()
        } else {
            "below threshold".yellow()
        };
        println!(
            "  {} {:.1}%  {} {:.1}%  {} {}",
            "similarity:".dimmed(),
            metrics.content_similarity * 100.0,
            "quality:".dimmed(),
            metrics.overall_quality * 100.0,
            "validation:".dimmed(),
            verdict
        );
    }

    if let Some(note) = &response.note {
        println!("  {} {}", "note:".dimmed(), note.cyan());
    }
}
