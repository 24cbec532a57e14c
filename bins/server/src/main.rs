//! Remit API Server
//!
//! Main entry point for the fund-transfer service.

use std::sync::Arc;

use anyhow::Context;
use sea_orm_migration::MigratorTrait;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use remit_api::{AppState, create_router};
use remit_core::transfer::Stores;
use remit_core::{TransferService, Validator};
use remit_db::migration::Migrator;
use remit_db::{AccountRepository, TransactionRepository, UserRepository, connect};
use remit_gateway::HttpPaymentGateway;
use remit_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "remit=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let db = connect(&config.database).await?;
    info!(
        max_connections = config.database.max_connections,
        "Connected to database"
    );

    Migrator::up(&db, None).await?;
    info!("Database schema up to date");

    let gateway = HttpPaymentGateway::new(&config.gateway)?;
    info!(
        base_url = %config.gateway.base_url,
        read_timeout_secs = config.gateway.read_timeout_secs,
        "Payment gateway configured"
    );

    let stores = Stores {
        transactions: Arc::new(TransactionRepository::new(db.clone())),
        accounts: Arc::new(AccountRepository::new(db.clone())),
        users: Arc::new(UserRepository::new(db)),
    };
    let transfers = TransferService::new(Validator::for_transfer_requests(), stores, Arc::new(gateway));

    let app = create_router(AppState::new(transfers));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
