//! infer-cli - Interactive menu for hosted LLM inference providers
//!
//! Pick a provider and a model, type a question, read the answer.

use std::io;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use infer_cli::menu::Menu;
use infer_cli::{Config, Dispatcher, ProviderId, Session};

#[derive(Parser)]
#[command(name = "infer-cli")]
#[command(about = "Query hosted LLM providers from an interactive menu")]
#[command(version)]
struct Cli {
    /// Path to an optional configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive menu (default)
    Chat,

    /// Send one query and print the result
    Ask {
        /// Provider: groq, hugging_face, openrouter, google_gemini
        #[arg(short, long)]
        provider: String,

        /// Model id; defaults to the provider's first listed model
        #[arg(short, long)]
        model: Option<String>,

        /// Query text
        query: String,
    },

    /// List the models offered for each provider
    Models,

    /// Validate configuration and show where each API key comes from
    Check,
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Ok(Config::from_file(path)?),
        None => Ok(Config::default()),
    }
}

/// The catalog as printed by `models`.
fn render_models() -> String {
    let mut out = String::new();
    for provider in ProviderId::MENU_ORDER {
        out.push_str(&format!("{} ({})\n", provider.label(), provider));
        for (i, model) in provider.models().iter().enumerate() {
            out.push_str(&format!("  {}. {:<32} {}\n", i + 1, model.label, model.id));
        }
    }
    out
}

/// The report printed by `check`: base URL and key source per provider.
///
/// Only the key's source is shown, never its value.
fn render_check<F>(config: &Config, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut out = String::from("Configuration OK\n");
    for provider in ProviderId::MENU_ORDER {
        let source = match config.resolve_key_with(provider, &lookup) {
            Ok((_, source)) => source.to_string(),
            Err(e) => format!("error: {}", e),
        };
        let required = if provider.requires_key() {
            "required"
        } else {
            "optional"
        };
        out.push_str(&format!(
            "{:<14} {:<52} key: {} ({})\n",
            provider.as_str(),
            config.base_url(provider),
            source,
            required
        ));
    }
    out
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;

    // Logs go to stderr so stdout stays the menu
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("infer_cli={}", config.logging.level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    if let Some(path) = &cli.config {
        tracing::info!(config = %path.display(), "Loaded configuration");
    }

    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => {
            let dispatcher = Dispatcher::new(config)?;
            let stdin = io::stdin();
            let mut session = Session::new(stdin.lock(), io::stdout(), dispatcher);
            session.run().await?;
            Ok(())
        }

        Commands::Ask {
            provider,
            model,
            query,
        } => {
            let provider: ProviderId = provider.parse()?;
            let model = model.unwrap_or_else(|| provider.default_model().id.to_string());
            let dispatcher = Dispatcher::new(config)?;

            let results = dispatcher.dispatch(provider, &model, &query).await?;
            let mut menu = Menu::new(io::empty(), io::stdout());
            menu.display_results(&results)?;
            Ok(())
        }

        Commands::Models => {
            print!("{}", render_models());
            Ok(())
        }

        Commands::Check => {
            print!(
                "{}",
                render_check(&config, |name| std::env::var(name).ok())
            );
            Ok(())
        }
    }
}
