use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, AppState};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Connection health and configuration audit
        .route("/api/v1/health/connections", get(handlers::get_connection_health))
        .route("/api/v1/health/security", get(handlers::get_security_checks))
        .route("/api/v1/health/full", get(handlers::get_full_health_report))
        // Wallet service
        .route("/api/v1/solana/validate-address/:address", get(handlers::validate_address))
        .route("/api/v1/solana/balance/:address", get(handlers::get_balance))
        .route("/api/v1/solana/verify-signature", post(handlers::post_verify_signature))
        .route("/api/v1/solana/create-transaction", post(handlers::post_create_transaction))
        .route("/api/v1/solana/send-transaction", post(handlers::post_send_transaction))
        .route("/api/v1/solana/transaction-status/:signature", get(handlers::get_transaction_status))
        .route("/api/v1/solana/recent-blockhash", get(handlers::get_recent_blockhash))
        // Wallet aggregation
        .route("/api/v1/solana/wallet/:address", get(handlers::get_wallet_info))
        .route("/api/v1/solana/wallet/:address/balance", get(handlers::get_balance))
        .route("/api/v1/solana/wallet/:address/tokens", get(handlers::get_wallet_tokens))
        .route("/api/v1/solana/wallet/:address/transactions", get(handlers::get_wallet_transactions))
        .route("/api/v1/solana/wallet/:address/fees", get(handlers::get_wallet_fees))
        .route("/api/v1/solana/wallet/:address/pools", get(handlers::get_wallet_pools))
        .route("/api/v1/solana/wallet/:address/summary", get(handlers::get_wallet_summary))
        .route("/api/v1/solana/transaction/:signature", get(handlers::get_transaction))
        .with_state(state)
}
