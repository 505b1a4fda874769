use anyhow::{Context, Result};
use std::sync::Arc;
use user_json_api::config::ServerConfig;
use user_json_api::id::UuidGenerator;
use user_json_api::model::UsersDocument;
use user_json_api::repo::UserRepository;
use user_json_api::service::UserService;
use user_json_api::state::AppState;
use user_json_api::store::JsonFile;
use user_json_api::web::build_router;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = load_config()?;
    tracing::info!("Starting user API");

    // The store bootstraps the file itself, but not its parent directory.
    if let Some(parent) = std::path::Path::new(&config.storage.path).parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create data directory: {}", parent.display()))?;
        }
    }

    let db = Arc::new(
        JsonFile::<UsersDocument>::builder(&config.storage.path)
            .initial_document(UsersDocument::default())
            .pretty(config.storage.pretty)
            .build(),
    );
    tracing::info!("User store at {}", db.path().display());

    let repo = UserRepository::new(db, Arc::new(UuidGenerator));
    let state = AppState::new(UserService::new(repo));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.listen)
        .await
        .with_context(|| format!("Failed to bind {}", config.listen))?;
    tracing::info!("Listening on {}", config.listen);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server closed");
    Ok(())
}

fn load_config() -> Result<ServerConfig> {
    match std::env::var("USER_API_CONFIG") {
        Ok(path) => {
            tracing::info!("Loading config from: {}", path);
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {path}"))?;
            serde_yml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {path}"))
        }
        Err(_) => Ok(ServerConfig::default()),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(_) => std::future::pending().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received, draining...");
}
