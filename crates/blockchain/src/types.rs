use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A token balance held by a wallet, as parsed from `getTokenAccountsByOwner`
/// with `jsonParsed` encoding.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenAccountRecord {
    pub pubkey: String,
    pub mint: String,
    pub owner: String,
    /// Raw amount in the mint's minor units, arbitrary precision.
    pub amount: String,
    pub decimals: u8,
    /// `amount / 10^decimals`; null when the node could not scale it.
    pub ui_amount: Option<f64>,
}

/// Point-in-time snapshot of one historical transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub signature: String,
    pub slot: u64,
    pub block_time: Option<i64>,
    pub confirmation_status: Option<String>,
    /// Null exactly when the transaction succeeded.
    pub err: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

impl TransactionRecord {
    pub fn succeeded(&self) -> bool {
        self.err.is_none()
    }
}

/// Fee paid by one historical transaction, in whole SOL.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionFees {
    pub signature: String,
    pub fee: f64,
    /// First account key of the transaction; best-effort, falls back to the
    /// queried address when the keys are unavailable.
    pub fee_payer: String,
    pub block_time: Option<i64>,
}

/// A liquidity-pool position. Detection is a documented placeholder, so this
/// only ever appears in empty lists for now.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiquidityPoolPosition {
    pub pool_address: String,
    pub protocol: String,
    pub lp_token_amount: String,
}

/// Balance, token accounts and recent history for one address.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletInfo {
    pub address: String,
    /// Whole SOL.
    pub balance: f64,
    pub token_accounts: Vec<TokenAccountRecord>,
    pub transactions: Vec<TransactionRecord>,
}

/// Fee aggregates alongside the per-transaction breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeSummary {
    pub total: f64,
    pub count: usize,
    pub average: f64,
    pub breakdown: Vec<TransactionFees>,
}

/// Success/failure statistics over a wallet's recent transactions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityStatistics {
    pub total_transactions: usize,
    pub successful_transactions: usize,
    pub failed_transactions: usize,
    /// Percentage; 0 when there are no transactions.
    pub success_rate: f64,
}

/// Aggregated view for one address, recomputed on every request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletSummary {
    pub wallet: WalletInfo,
    pub fees: FeeSummary,
    pub liquidity_pools: Vec<LiquidityPoolPosition>,
    pub statistics: ActivityStatistics,
}

/// Subset of `getblockchaininfo` the health reporter interprets.
#[derive(Debug, Clone, Deserialize)]
pub struct BlockchainInfo {
    pub chain: Option<String>,
    pub blocks: Option<u64>,
}
