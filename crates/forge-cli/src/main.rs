use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use forge_client::{ContentGenerator, GeminiClient};
use forge_core::{ContentType, ForgeConfig, GenerationOutcome, GenerationRequest, Length, Tone};

/// forge: AI content generation studio for the terminal.
///
/// Pick a content type, describe what you need, choose a tone and a length,
/// and Gemini writes it. Results can be copied straight to the clipboard.
#[derive(Parser, Debug)]
#[command(name = "forge", version, about)]
struct Cli {
    /// Topic or prompt for the content (can also be typed in the TUI).
    #[arg(short, long)]
    prompt: Option<String>,

    /// Content type: "marketing copy", "blog post" or "social media caption".
    #[arg(short = 't', long)]
    content_type: Option<ContentType>,

    /// Tone of voice: professional, casual, witty, enthusiastic or formal.
    #[arg(long)]
    tone: Option<Tone>,

    /// Length: short, medium or long.
    #[arg(short, long)]
    length: Option<Length>,

    /// Generate once and print the result to stdout instead of opening the TUI.
    #[arg(long)]
    print: bool,

    /// Model to use (overrides the config file).
    #[arg(long)]
    model: Option<String>,

    /// API base URL (overrides the config file).
    #[arg(long)]
    endpoint: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    // Load config.
    let config = ForgeConfig::load().unwrap_or_else(|e| {
        eprintln!("Warning: Failed to load config: {}. Using defaults.", e);
        ForgeConfig::default()
    });

    tracing::info!("Starting forge v{}", env!("CARGO_PKG_VERSION"));

    let api_key = config.resolve_api_key();
    if api_key.is_none() {
        tracing::warn!("No Gemini API key configured; generation requests will fail");
    }

    let model = cli.model.clone().unwrap_or(config.generation.model);
    let endpoint = cli.endpoint.clone().unwrap_or(config.generation.endpoint);
    let client = GeminiClient::new(
        endpoint,
        api_key.clone().unwrap_or_default(),
        Duration::from_secs(config.generation.timeout_seconds),
    );
    let generator = Arc::new(ContentGenerator::new(Arc::new(client), model));

    if cli.print {
        return print_once(&cli, &generator, api_key.is_some()).await;
    }

    // Start the TUI.
    let mut app = forge_tui::App::new(generator, Box::new(forge_tui::SystemClipboard::new()));

    // Pre-fill the form from CLI args if provided.
    if let Some(content_type) = cli.content_type {
        app.set_initial_content_type(content_type);
    }
    if let Some(tone) = cli.tone {
        app.set_initial_tone(tone);
    }
    if let Some(length) = cli.length {
        app.set_initial_length(length);
    }
    if let Some(ref prompt) = cli.prompt {
        app.set_initial_prompt(prompt.clone());
    }
    if api_key.is_none() {
        app.set_status("Warning: no API key set (GEMINI_API_KEY); generation will fail");
    }

    app.run().await?;

    tracing::info!("forge exited cleanly");
    Ok(())
}

/// Log to a file so the alternate screen is not corrupted. If the file can't
/// be opened, logs are discarded.
fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let log_dir = dirs::cache_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("content-forge");
    let _ = std::fs::create_dir_all(&log_dir);
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("forge.log"));

    match log_file {
        Ok(file) => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
                )
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        Err(_) => {
            tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::new("off"))
                .with_writer(std::io::sink)
                .init();
        }
    }
}

/// Headless mode: one generation, text to stdout, failure as the exit error.
async fn print_once(cli: &Cli, generator: &ContentGenerator, has_key: bool) -> Result<()> {
    if !has_key {
        eprintln!("Warning: no API key set (GEMINI_API_KEY); the request will likely fail.");
    }

    let request = GenerationRequest::new(
        cli.content_type.unwrap_or_default(),
        cli.prompt.clone().unwrap_or_default(),
        cli.tone.unwrap_or_default(),
        cli.length.unwrap_or_default(),
    )?;

    match generator.generate(&request).await {
        GenerationOutcome::Success(text) => {
            println!("{}", text);
            Ok(())
        }
        GenerationOutcome::Failure(message) => anyhow::bail!(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn typed_options_parse() {
        let cli = Cli::parse_from([
            "forge",
            "-t",
            "blog-post",
            "--tone",
            "Witty",
            "-l",
            "short",
            "-p",
            "eco sneakers",
            "--print",
        ]);
        assert_eq!(cli.content_type, Some(ContentType::BlogPost));
        assert_eq!(cli.tone, Some(Tone::Witty));
        assert_eq!(cli.length, Some(Length::Short));
        assert_eq!(cli.prompt.as_deref(), Some("eco sneakers"));
        assert!(cli.print);
    }

    #[test]
    fn unknown_tone_is_rejected() {
        assert!(Cli::try_parse_from(["forge", "--tone", "grumpy"]).is_err());
    }
}
