use axum::http::{HeaderValue, Method};
use clap::Parser;
use consultation_relay::utils::{logger, validation::Validate};
use consultation_relay::{
    api, CliConfig, ConfigProvider, ConsultationService, ServerSettings, TomlConfig,
    Web3FormsRelay,
};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting consultation-relay");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    match cli.config.clone() {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path.display());
            let config = match TomlConfig::from_file(&path) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("❌ Failed to load config file '{}': {}", path.display(), e);
                    eprintln!("💡 Make sure the file exists and is valid TOML format");
                    std::process::exit(1);
                }
            };
            let server = config.server.clone();
            serve(config, server).await
        }
        None => {
            let server = cli.server_settings();
            serve(cli, server).await
        }
    }
}

async fn serve<C>(config: C, server: ServerSettings) -> Result<(), Box<dyn std::error::Error>>
where
    C: ConfigProvider + Validate + 'static,
{
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    tracing::info!(
        "📧 Relaying to {} via {} (policy: {:?})",
        config.recipient(),
        config.relay_endpoint(),
        config.failure_policy()
    );

    let relay = Web3FormsRelay::new(config.relay_endpoint(), config.relay_timeout())?;
    let service = Arc::new(ConsultationService::new(relay, config));
    let app = api::router(service, server.expose_diagnostics).layer(cors(&server.allowed_origins)?);

    let listener = tokio::net::TcpListener::bind(&server.listen_addr).await?;
    tracing::info!("✅ Consultation endpoint listening on {}", server.listen_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for shutdown signal: {}", e);
            }
            tracing::info!("Shutting down");
        })
        .await?;

    Ok(())
}

fn cors(allowed_origins: &[String]) -> Result<CorsLayer, Box<dyn std::error::Error>> {
    let origin = if allowed_origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        let origins = allowed_origins
            .iter()
            .map(|origin| origin.parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()?;
        AllowOrigin::list(origins)
    };

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::POST])
        .allow_headers(Any))
}
