//! FinHealth - terminal client for the healthcare price-comparison assistant
//!
//! Talks to the pricing backend and shows its replies the way the web chat
//! widget does: typed messages, comparison tables and delayed follow-ups.

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt};

use finhealth::config::{Config, Overrides, Settings, config_dir};
use finhealth::paint::{AnsiPainter, HtmlPainter, Painter};
use finhealth::{ApiClient, ChatSession, repl};

#[derive(Parser)]
#[command(name = "finhealth")]
#[command(about = "Compare hospital prices from the terminal")]
#[command(version)]
struct Args {
    /// Pricing backend base URL
    #[arg(long, env = "FINHEALTH_API_URL")]
    api_url: Option<String>,

    /// Send one message, print the conversation and exit
    #[arg(long, value_name = "MESSAGE")]
    once: Option<String>,

    /// Print --once output as HTML
    #[arg(long, requires = "once")]
    html: bool,

    /// Milliseconds per typed character (0 disables the effect)
    #[arg(long, env = "FINHEALTH_TYPING_MS")]
    typing_ms: Option<u64>,

    /// Multiplier for follow-up pauses (0 shows them immediately)
    #[arg(long, env = "FINHEALTH_FOLLOW_UP_SCALE")]
    follow_up_scale: Option<f64>,

    /// Request timeout in seconds
    #[arg(long, env = "FINHEALTH_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    /// Disable ANSI colors
    #[arg(long)]
    no_color: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (from ~/.finhealth/.env or current dir)
    let env_path = Some(config_dir().join(".env")).filter(|p| p.exists());
    if let Some(path) = env_path {
        let _ = dotenvy::from_path(&path);
    } else {
        let _ = dotenvy::dotenv();
    }

    // Logs go to stderr so they never interleave with the chat
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    // Load config file (~/.finhealth/config.toml)
    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("Warning: {}", e);
        Config::default()
    });

    // Resolve values: CLI args > env vars (handled by clap) > config file > defaults
    let overrides = Overrides {
        api_url: args.api_url,
        typing_interval_ms: args.typing_ms,
        follow_up_delay_scale: args.follow_up_scale,
        request_timeout_secs: args.timeout_secs,
        no_color: args.no_color,
    };
    let settings = Settings::resolve(overrides, config).context("invalid configuration")?;

    let client = ApiClient::new(&settings.api_url, settings.request_timeout)
        .context("failed to create API client")?;
    let session = ChatSession::new(Arc::new(client));

    if let Some(message) = args.once {
        let entries = repl::run_once(&session, &settings, &message).await?;
        let painted = if args.html {
            HtmlPainter.transcript(&entries)
        } else {
            AnsiPainter::new(settings.color).transcript(&entries)
        };
        print!("{}", painted);
        return Ok(());
    }

    let painter = AnsiPainter::new(settings.color);

    // Startup banner
    println!();
    println!(
        "{}",
        painter.banner_accent(&format!("  FinHealth {}", env!("CARGO_PKG_VERSION")))
    );
    println!("{}", painter.separator(50));
    println!("{}", painter.banner_line("Backend", &settings.api_url));
    let status = match session.health().await {
        Ok(health) if health.is_healthy() => painter.success("connected"),
        Ok(health) => painter.warning(&format!("degraded ({})", health.status)),
        Err(e) => format!("{} ({})", painter.warning("unavailable"), e),
    };
    println!("{}", painter.banner_line("Status", &status));
    let typing = if settings.typing_interval.is_zero() {
        "off".to_string()
    } else {
        format!("{}ms/char", settings.typing_interval.as_millis())
    };
    println!("{}", painter.banner_line("Typing", &typing));
    println!("{}", painter.separator(50));
    println!();

    repl::run(session, settings).await
}
