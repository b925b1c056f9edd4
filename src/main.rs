//! Todo endpoint entry point.
//!
//! Serves `/todo` backed by the in-memory store, resolving callers from the
//! claims in their SSO token.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;
use teams_todo::{handlers, serve, AppConfig, ClaimsIdentityResolver, InMemoryTodoStore, TodoApp};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("loading configuration")?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| config.log_filter.as_str().into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        host = %config.app_host,
        port = config.app_port,
        audience = config.sso_audience.as_deref().unwrap_or("<any>"),
        "starting todo endpoint"
    );

    let mut resolver =
        ClaimsIdentityResolver::new().with_leeway(Duration::from_secs(config.sso_leeway_secs));
    if let Some(audience) = &config.sso_audience {
        resolver = resolver.with_audience(audience.clone());
    }

    let store = InMemoryTodoStore::new();
    let app = Arc::new(TodoApp::new(handlers::todo_service(store), resolver));

    tracing::info!("  GET    /todo?channelOrChatId=<id> - list todos in a chat or channel");
    tracing::info!("  POST   /todo                      - create a todo owned by the caller");
    tracing::info!("  PUT    /todo                      - update description or completion");
    tracing::info!("  DELETE /todo                      - delete one todo, or all of the caller's");
    tracing::info!("  GET    /me                        - caller identity");
    tracing::info!("  GET    /health                    - health check");

    serve(app, &config.bind_address(), shutdown_signal())
        .await
        .context("serving todo endpoint")?;

    tracing::info!("todo endpoint stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
