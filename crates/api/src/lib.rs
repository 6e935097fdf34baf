pub mod error;
pub mod handlers;
pub mod health;
pub mod routes;

pub use error::{ApiError, ApiResult};
pub use health::{
    run_security_checks, CheckStatus, ConnectionHealth, ConnectionStatus, ConnectionTestResult,
    FullHealthReport, SecurityCheckResult,
};

use blockchain::{TransactionService, WalletService};
use std::sync::Arc;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub wallet_service: Arc<WalletService>,
    pub transaction_service: Arc<TransactionService>,
    pub connection_health: Arc<ConnectionHealth>,
}

impl AppState {
    pub fn new(
        wallet_service: Arc<WalletService>,
        transaction_service: Arc<TransactionService>,
        connection_health: Arc<ConnectionHealth>,
    ) -> Self {
        Self {
            wallet_service,
            transaction_service,
            connection_health,
        }
    }
}
