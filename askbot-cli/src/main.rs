//! CLI entry point for askbot

use anyhow::{Context, Result};
use askbot_agent::{generation_options, Chatbot};
use askbot_core::config::validate::validate_config;
use askbot_core::config::{Config, ConfigLoader, GeneratorConfig};
use askbot_core::logging::init_logging;
use askbot_providers::CompletionClient;
use clap::{Parser, Subcommand};
use console::style;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

mod demo;
mod repl;

use demo::run_demo;
use repl::ChatRepl;

#[derive(Parser)]
#[command(name = "askbot")]
#[command(about = "General knowledge chatbot on top of a pre-trained text generation model")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration directory
    #[arg(short, long, global = true)]
    config_dir: Option<PathBuf>,

    /// Model to request from the completion server
    #[arg(short, long, global = true)]
    model: Option<String>,

    /// Base URL of the OpenAI-compatible completion server
    #[arg(long, global = true)]
    api_base: Option<String>,
}

#[derive(Subcommand, Clone)]
enum Commands {
    /// Answer the example questions, then offer an interactive session (default)
    Demo,
    /// Go straight to the interactive session
    Chat,
    /// Answer a single question and exit
    Ask {
        /// Question to ask
        question: String,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_loader = if let Some(dir) = &cli.config_dir {
        ConfigLoader::with_dir(dir)
    } else {
        ConfigLoader::new()
    };

    let mut config = config_loader.load().context("Failed to load configuration")?;
    apply_cli_overrides(&mut config, &cli);
    validate_config(&config)?;
    config.logging.dir = resolve_log_dir(config_loader.config_dir(), &config.logging.dir);

    let _log_guard = init_logging(&config.logging).context("Failed to initialize logging")?;

    let mut bot = load_chatbot(&config.generator).await?;
    bot.start_conversation();
    println!("Conversation started. I can answer general knowledge questions!\n");

    match cli.command.clone().unwrap_or(Commands::Demo) {
        Commands::Demo => {
            info!("Running demo");
            let stdin = std::io::stdin();
            let outcome = run_demo(
                &mut bot,
                &config.chat.demo_questions,
                stdin.lock(),
                std::io::stdout(),
            )
            .await?;
            info!("Demo finished: {:?}", outcome);
        }
        Commands::Chat => {
            info!("Starting interactive chat");
            let stdin = std::io::stdin();
            ChatRepl::new(stdin.lock(), std::io::stdout())
                .run(&mut bot)
                .await?;
        }
        Commands::Ask { question } => {
            let question = question.trim();
            if question.is_empty() {
                anyhow::bail!("Question must not be empty");
            }
            let answer = bot.answer_question(question).await;
            println!("{} {}", style("Bot:").cyan().bold(), answer);
        }
    }

    Ok(())
}

fn apply_cli_overrides(config: &mut Config, cli: &Cli) {
    if let Some(model) = &cli.model {
        config.generator.model = model.clone();
    }
    if let Some(api_base) = &cli.api_base {
        config.generator.api_base = api_base.clone();
    }
}

/// Relative log directories live under the config directory
fn resolve_log_dir(config_dir: &Path, log_dir: &str) -> String {
    let path = Path::new(log_dir);
    if path.is_absolute() {
        log_dir.to_string()
    } else {
        config_dir.join(path).to_string_lossy().to_string()
    }
}

fn build_generator(config: &GeneratorConfig) -> CompletionClient {
    CompletionClient::new(
        Some(config.api_key.clone()),
        config.api_base.clone(),
        config.model.clone(),
        Some(config.extra_headers.clone()).filter(|headers| !headers.is_empty()),
        Duration::from_secs(config.request_timeout_secs),
    )
}

/// Load the model; failure here is fatal
async fn load_chatbot(config: &GeneratorConfig) -> Result<Chatbot> {
    println!("Loading model: {}...", config.model);

    let generator = build_generator(config);
    if let Err(e) = generator.load().await {
        error!(
            "Failed to load model {} from {}: {}",
            config.model,
            generator.api_base(),
            e
        );
        anyhow::bail!(
            "Failed to load model {} from {}: {}",
            config.model,
            generator.api_base(),
            e
        );
    }

    println!("{}", style("Model loaded successfully!").green());
    Ok(Chatbot::new(Arc::new(generator), generation_options(config)))
}
