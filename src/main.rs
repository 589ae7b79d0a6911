//! CareBridge Copilot - CLI Entry Point

use anyhow::{Context, Result};
use carebridge_copilot::{
    cli::{Args, Commands},
    config::CopilotConfig,
    doctor::Doctor,
    server,
    telemetry::{self, LogFormat},
    AlertExplanationRequest, Copilot,
};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let format = if args.json_logs { LogFormat::Json } else { LogFormat::Pretty };
    telemetry::init(args.verbosity(), format)?;

    let config = load_config(&args)?;

    match args.command {
        Commands::Serve { host, port } => run_server(config, host, port).await?,
        Commands::Explain {
            title,
            description,
            severity,
        } => {
            explain(
                &config,
                AlertExplanationRequest {
                    title,
                    description,
                    severity,
                },
            )
            .await?
        }
        Commands::Doctor => run_doctor(config).await,
        Commands::Config => show_config(&config)?,
    }

    Ok(())
}

/// File (or defaults) first, then the environment on top
fn load_config(args: &Args) -> Result<CopilotConfig> {
    let mut config =
        CopilotConfig::load(args.config.as_deref()).context("Failed to load configuration")?;
    config
        .apply_env(std::env::vars())
        .context("Invalid environment configuration")?;
    Ok(config)
}

async fn run_server(mut config: CopilotConfig, host: Option<String>, port: Option<u16>) -> Result<()> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    config.validate()?;

    let copilot = Copilot::from_config(&config)?;
    server::serve(&config, copilot).await?;
    Ok(())
}

async fn explain(config: &CopilotConfig, alert: AlertExplanationRequest) -> Result<()> {
    let copilot = Copilot::from_config(config)?;
    println!("{}", copilot.explain_alert(&alert).await);
    Ok(())
}

async fn run_doctor(config: CopilotConfig) {
    let checks = Doctor::new(config).run_diagnostics().await;
    Doctor::display_results(&checks);

    std::process::exit(if Doctor::overall_status(&checks) { 0 } else { 1 });
}

fn show_config(config: &CopilotConfig) -> Result<()> {
    if let Some(path) = CopilotConfig::default_path() {
        println!("# default location: {}", path.display());
    }
    println!("{}", config.redacted().to_toml()?);
    Ok(())
}
