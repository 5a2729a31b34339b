use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

mod app;
mod commands;
mod render;

#[derive(Parser)]
#[command(name = "sitechat")]
#[command(about = "SiteChat - ask a personal-site assistant about its owner")]
#[command(version)]
struct Cli {
    /// Ask a single question and exit
    #[arg(short, long)]
    prompt: Option<String>,

    /// LLM model to use
    #[arg(short, long)]
    model: Option<String>,

    /// Path to a config file (defaults to the user config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut settings = match cli.config {
        Some(ref path) => sitechat_core::Settings::load_from(path)?,
        None => sitechat_core::Settings::load(),
    };

    if let Some(ref model) = cli.model {
        settings.llm.model = model.clone();
    }

    if let Some(prompt) = cli.prompt {
        app::run_single_prompt(&settings, &prompt).await?;
    } else {
        app::run_repl(&settings).await?;
    }

    Ok(())
}
