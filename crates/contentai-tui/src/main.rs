use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use contentai_core::{Config, ContentType, GenerationClient, HttpBackend};
use tracing_subscriber::EnvFilter;

mod app;
mod clipboard;
mod handler;
mod tui;
mod ui;

#[cfg(test)]
mod testing;

use app::App;

#[derive(Parser)]
#[command(name = "contentai")]
#[command(version, about = "Generate blog posts, tweets, emails and more from a prompt")]
struct Cli {
    /// Generation API base URL (overrides env and config file)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive terminal UI (default)
    Tui,
    /// Generate content once and print it
    Generate {
        /// What you want to create
        prompt: String,
        /// Content type: blog, tweet, comment, email, tag or idea (freeform blog post if omitted)
        #[arg(short = 't', long = "type", value_parser = parse_content_type)]
        content_type: Option<ContentType>,
    },
    /// List the available content types
    Types,
    /// Show or change the saved API base URL
    Config {
        /// Save this URL as the default backend
        #[arg(long = "set-api-url")]
        set_api_url: Option<String>,
    },
}

fn parse_content_type(s: &str) -> Result<ContentType, String> {
    ContentType::from_id(s).ok_or_else(|| {
        let ids: Vec<&str> = ContentType::ALL.iter().map(|t| t.id()).collect();
        format!("unknown content type '{}', expected one of: {}", s, ids.join(", "))
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Tui);

    // The TUI owns the terminal, so its logs go to a file
    match command {
        Commands::Tui => init_file_logging()?,
        _ => init_stderr_logging(),
    }

    let config = Config::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Falling back to default config");
        Config::new()
    });
    let api_base_url = config.resolve_api_base_url(cli.api_url);
    tracing::info!(%api_base_url, "Using generation backend");

    match command {
        Commands::Tui => run_tui(api_base_url).await,
        Commands::Generate { prompt, content_type } => {
            generate_once(&api_base_url, &prompt, content_type).await
        }
        Commands::Types => {
            list_types();
            Ok(())
        }
        Commands::Config { set_api_url } => show_or_save_config(&api_base_url, set_api_url),
    }
}

fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("contentai=info,contentai_core=info"))
}

fn log_file_path() -> Result<PathBuf> {
    let dir = dirs::cache_dir()
        .ok_or_else(|| anyhow!("Could not determine cache directory"))?
        .join("contentai");
    fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;
    Ok(dir.join("contentai.log"))
}

fn init_file_logging() -> Result<()> {
    let path = log_file_path()?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(log_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .init();

    Ok(())
}

fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter())
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run_tui(api_base_url: String) -> Result<()> {
    let backend = Arc::new(HttpBackend::new(&api_base_url));
    let mut app = App::new(backend, api_base_url);

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let mut events = tui::EventHandler::new(tui::TICK_RATE);

    let result = async {
        while !app.should_quit {
            terminal.draw(|frame| ui::render(&mut app, frame))?;

            match events.next().await {
                Some(event) => handler::handle_event(&mut app, event),
                None => break,
            }

            app.poll_generation().await;
        }
        Ok::<(), anyhow::Error>(())
    }
    .await;

    tui::restore()?;
    result
}

async fn generate_once(
    api_base_url: &str,
    prompt: &str,
    content_type: Option<ContentType>,
) -> Result<()> {
    let mut client = GenerationClient::new(HttpBackend::new(api_base_url));

    let label = content_type.map(|t| t.title()).unwrap_or("Content");
    eprintln!(
        "{} {} via {}",
        "Generating".bold().cyan(),
        label.bold(),
        api_base_url.dimmed()
    );

    let submitted = match content_type {
        Some(content_type) => client.submit_typed(prompt, content_type).await,
        None => client.submit_freeform(prompt).await,
    };

    let session = client.session();
    if submitted.is_err() {
        let message = session.error_message().unwrap_or("Nothing to generate");
        return Err(anyhow!("{}", message));
    }

    if let Some(error) = session.error_message() {
        eprintln!("{}", error.red());
        return Err(anyhow!("generation failed"));
    }

    println!("{}", session.generated_text().unwrap_or_default());
    Ok(())
}

fn list_types() {
    println!("\n{}", "Content Types".bold().blue());
    println!("{}", "=".repeat(40).dimmed());

    for (i, t) in ContentType::ALL.iter().enumerate() {
        println!(
            "{}. {} ({}) - {}",
            (i + 1).to_string().bold(),
            t.title().bold().green(),
            t.id().yellow(),
            t.description().dimmed()
        );
    }
}

fn show_or_save_config(api_base_url: &str, set_api_url: Option<String>) -> Result<()> {
    match set_api_url {
        Some(url) => {
            let path = Config::save_api_base_url(&url)?;
            println!("Saved API base URL to {}", path.display().to_string().bold());
        }
        None => {
            println!("{} {}", "API base URL:".bold(), api_base_url.green());
        }
    }
    Ok(())
}
