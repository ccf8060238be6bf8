use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use synctube_bot::{
    config::{load_env_file, ConfigError},
    discord::{CommandRegistrar, RegistrationError, SignatureError, SignatureVerifier},
    dispatch::{SYNCTUBE_COMMAND, SYNCTUBE_COMMAND_DESCRIPTION},
    synctube::{EndpointError, ReqwestTransport, SyncTubeEndpoints, SystemClock, TungsteniteConnector},
    build_router, AppState, BotConfig, CommandDispatcher, RoomProvisioner,
};

#[derive(Debug, Error)]
enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Endpoint(#[from] EndpointError),

    #[error(transparent)]
    Signature(#[from] SignatureError),

    #[error("error registering command: {0}")]
    Registration(#[from] RegistrationError),

    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "synctube_bot=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting synctube bot");

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Bot stopped");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), StartupError> {
    if !load_env_file(Path::new(".env"))? {
        info!("no .env file found");
    }

    let config = BotConfig::from_env()?;
    info!(?config, "Configuration loaded");

    let client = reqwest::Client::new();

    // Wire the provisioner with its production transports
    let provisioner = RoomProvisioner::new(
        SyncTubeEndpoints::new(&config.synctube_url)?,
        config.room_name.clone(),
        Arc::new(ReqwestTransport::new(client.clone())),
        Arc::new(TungsteniteConnector),
        Arc::new(SystemClock),
    );
    let verifier = SignatureVerifier::from_hex(&config.public_key)?;

    let registrar = CommandRegistrar::new(
        client,
        &config.discord_api_url,
        config.app_id.clone(),
        config.server_id.clone(),
        config.bot_token.clone(),
    );
    let command = registrar
        .register(SYNCTUBE_COMMAND, SYNCTUBE_COMMAND_DESCRIPTION)
        .await?;

    let app_state = AppState::new(
        Arc::new(CommandDispatcher::new(Arc::new(provisioner))),
        Arc::new(verifier),
    );
    let app = build_router(app_state);

    let served = serve(app, config.bind_addr).await;

    if let Err(e) = registrar.delete(&command).await {
        error!(error = %e, command_id = %command.id, "Cannot delete command");
    }

    served
}

async fn serve(app: axum::Router, addr: std::net::SocketAddr) -> Result<(), StartupError> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %addr, "Listening for interactions");
    warn!("Press Ctrl+C to exit");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Cannot listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
