use clap::Parser;
use github_user_proxy::utils::{logger, validation::Validate};
use github_user_proxy::{serve, CliConfig, TomlConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting github-user-proxy");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let result = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from {}", path);
            let file_config = TomlConfig::from_file(path)?;
            validate_or_exit(&file_config);
            serve(&file_config).await
        }
        None => {
            validate_or_exit(&cli);
            serve(&cli).await
        }
    };

    if let Err(e) = result {
        tracing::error!("❌ Server failed: {}", e);
        return Err(e.into());
    }

    Ok(())
}

fn validate_or_exit<C: Validate>(config: &C) {
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}
