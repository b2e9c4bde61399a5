use authorcheck::client::gateway::HttpGateway;
use authorcheck::client::{Analyzer, Outcome};
use authorcheck::config::ClientConfig;
use authorcheck::render::terminal;
use clap::Parser;
use std::io::Read;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "authorcheck",
    version,
    about = "Who wrote this? Readability, sentiment, style and an AI-vs-human verdict for any text"
)]
struct Cli {
    /// Text file to analyze, or "-" to read stdin
    #[arg(default_value = "-")]
    input: String,

    /// Print the analysis result as JSON
    #[arg(long)]
    json: bool,

    /// Skip the gateway; compute local statistics only
    #[arg(long)]
    local_only: bool,

    /// Analysis gateway URL (overrides AUTHORCHECK_GATEWAY_URL)
    #[arg(long, value_name = "URL")]
    gateway: Option<String>,

    /// Gateway timeout in milliseconds (clamped to 5000..=60000 by the gateway)
    #[arg(long, value_name = "MS")]
    timeout: Option<u64>,

    /// TOML file overlaying the environment configuration
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Check that the gateway answers, then exit
    #[arg(long)]
    check: bool,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: cannot start runtime: {}", e);
            std::process::exit(1);
        }
    };

    match runtime.block_on(run(cli)) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Returns `Ok(false)` when the run completed but should exit non-zero.
async fn run(cli: Cli) -> Result<bool, Box<dyn std::error::Error>> {
    let config = build_config(&cli)?;
    let gateway = HttpGateway::new(config.gateway_url.clone(), config.timeout_ms)?;
    let analyzer = Analyzer::new(gateway, config);

    if cli.check {
        let url = analyzer.config().gateway_url.clone();
        return if analyzer.check_connection().await {
            println!("Gateway OK: {}", url);
            Ok(true)
        } else {
            eprintln!("Gateway unreachable or failing: {}", url);
            Ok(false)
        };
    }

    let (text, source) = read_input(&cli.input)?;
    let analysis = analyzer.analyze(&text).await;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&analysis.result)?);
    } else {
        terminal::render(&analysis.result, &analysis.outcome, &source);
    }

    Ok(!matches!(analysis.outcome, Outcome::Error { .. }))
}

fn build_config(cli: &Cli) -> Result<ClientConfig, Box<dyn std::error::Error>> {
    let mut config = ClientConfig::from_env();
    if let Some(path) = &cli.config {
        config = config.with_file(path)?;
    }
    if let Some(url) = &cli.gateway {
        config.gateway_url = url.clone();
    }
    if let Some(ms) = cli.timeout {
        config.timeout_ms = ms;
    }
    if cli.local_only {
        config.enabled = false;
    }
    Ok(config)
}

fn read_input(input: &str) -> Result<(String, String), Box<dyn std::error::Error>> {
    if input == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok((text, "stdin".to_string()));
    }
    let path = PathBuf::from(input);
    let text = std::fs::read_to_string(&path)
        .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.to_string());
    Ok((text, name))
}
