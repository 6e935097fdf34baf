use anyhow::Result;
use api::{AppState, ConnectionHealth};
use blockchain::{CoreRpcClient, SolanaRpcClient, TransactionService, WalletService};
use database::RedisCache;
use shared::config::Config;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,chain_gateway=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting chain gateway API");

    let config = Config::from_env()?;
    tracing::info!("Configuration loaded successfully");

    let db_pool = database::create_pool(&config.database.url, config.database.max_connections)?;
    tracing::info!("Database connection pool created");

    let redis = if config.redis.enabled {
        RedisCache::connect(&config.redis.url).await
    } else {
        RedisCache::disabled()
    };
    tracing::info!(
        "Redis cache {}",
        if redis.is_connected() { "connected" } else { "not connected" }
    );

    let core_client = Arc::new(CoreRpcClient::new(
        config.core_rpc.url.clone(),
        config.core_rpc.username.clone(),
        config.core_rpc.password.clone(),
    ));

    let solana_client = Arc::new(SolanaRpcClient::new(config.solana.rpc_url.clone()));

    let wallet_service = Arc::new(WalletService::new(solana_client.clone()));
    tracing::info!("Wallet service initialized");

    let transaction_service = Arc::new(TransactionService::new(solana_client));
    tracing::info!("Transaction service initialized");

    let connection_health = Arc::new(ConnectionHealth::new(
        core_client,
        db_pool,
        redis,
        config.clone(),
    ));
    tracing::info!("Connection health reporter initialized");

    let app_state = Arc::new(AppState::new(
        wallet_service,
        transaction_service,
        connection_health,
    ));

    // All origins on purpose: a public explorer API. The security report
    // carries a standing warning for it.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = api::routes::create_router(app_state).layer(cors);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("API server listening on {}", addr);
    tracing::info!("Health report available at http://{}/api/v1/health/full", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
