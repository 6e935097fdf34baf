use serde_json::Value;
use shared::Result;
use solana_sdk::native_token::LAMPORTS_PER_SOL;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::solana::SolanaRpcClient;
use crate::types::{
    ActivityStatistics, FeeSummary, LiquidityPoolPosition, TokenAccountRecord, TransactionFees,
    TransactionRecord, WalletInfo, WalletSummary,
};

const SPL_MEMO_PROGRAM_ID: &str = "MemoSq4gqABAXKb96qnH8TysNcWxMyWCqXgDLGmfcHr";

pub const DEFAULT_HISTORY_LIMIT: usize = 20;
pub const DEFAULT_FEE_LIMIT: usize = 50;
const SUMMARY_FEE_LIMIT: usize = 100;

/// Derived read-only views over one wallet: balances, token accounts,
/// history, fee analytics. Everything is recomputed per call; nothing is
/// cached or persisted at this layer.
pub struct WalletService {
    rpc: Arc<SolanaRpcClient>,
}

impl WalletService {
    pub fn new(rpc: Arc<SolanaRpcClient>) -> Self {
        Self { rpc }
    }

    /// Balance in whole SOL.
    pub async fn get_balance(&self, address: &str) -> Result<f64> {
        let lamports = self.rpc.get_balance(address).await?;
        Ok(lamports as f64 / LAMPORTS_PER_SOL as f64)
    }

    pub async fn get_token_accounts(&self, address: &str) -> Result<Vec<TokenAccountRecord>> {
        self.rpc.get_token_accounts_by_owner(address).await
    }

    /// Recent transactions with details. A failed detail fetch drops that
    /// entry and keeps going; partial results are better than none here.
    pub async fn get_transaction_history(
        &self,
        address: &str,
        limit: usize,
    ) -> Result<Vec<TransactionRecord>> {
        let signatures = self.rpc.get_signatures_for_address(address, limit).await?;
        let mut transactions = Vec::with_capacity(signatures.len());

        for signature in &signatures {
            match self.rpc.get_transaction(signature).await {
                Ok(Some(details)) => transactions.push(transaction_record(signature, &details)),
                Ok(None) => debug!("No details for signature {}", signature),
                Err(e) => warn!("Failed to get transaction {}: {}", signature, e),
            }
        }

        Ok(transactions)
    }

    /// Balance, token accounts and recent history fetched concurrently. Any
    /// sub-fetch failing fails the whole aggregate.
    pub async fn get_wallet_info(&self, address: &str) -> Result<WalletInfo> {
        info!("Fetching wallet info for {}", address);

        let (balance, token_accounts, transactions) = tokio::try_join!(
            self.get_balance(address),
            self.get_token_accounts(address),
            self.get_transaction_history(address, DEFAULT_HISTORY_LIMIT),
        )?;

        Ok(WalletInfo {
            address: address.to_string(),
            balance,
            token_accounts,
            transactions,
        })
    }

    /// Per-transaction fees over the most recent `limit` signatures.
    /// Signature-level failures are dropped, as in history enumeration.
    pub async fn get_transaction_fees(
        &self,
        address: &str,
        limit: usize,
    ) -> Result<Vec<TransactionFees>> {
        let signatures = self.rpc.get_signatures_for_address(address, limit).await?;
        let mut fees = Vec::with_capacity(signatures.len());

        for signature in &signatures {
            match self.rpc.get_transaction(signature).await {
                Ok(Some(details)) => {
                    if let Some(record) = fee_record(signature, address, &details) {
                        fees.push(record);
                    }
                }
                Ok(None) => debug!("No details for signature {}", signature),
                Err(e) => warn!("Failed to get fees for transaction {}: {}", signature, e),
            }
        }

        Ok(fees)
    }

    /// Raw parsed details for one signature; `None` when the node does not
    /// know it.
    pub async fn get_transaction_details(&self, signature: &str) -> Result<Option<Value>> {
        self.rpc.get_transaction(signature).await
    }

    /// Liquidity-pool detection needs protocol-specific integrations
    /// (Raydium, Orca, aggregator APIs) that this layer does not carry.
    /// Callers receive an empty list until one exists.
    pub async fn detect_liquidity_pools(
        &self,
        _address: &str,
    ) -> Result<Vec<LiquidityPoolPosition>> {
        Ok(Vec::new())
    }

    /// Wallet info, fee analytics and pool positions assembled concurrently,
    /// with activity statistics over the fetched history.
    pub async fn get_wallet_summary(&self, address: &str) -> Result<WalletSummary> {
        info!("Building wallet summary for {}", address);

        let (wallet, fee_breakdown, liquidity_pools) = tokio::try_join!(
            self.get_wallet_info(address),
            self.get_transaction_fees(address, SUMMARY_FEE_LIMIT),
            self.detect_liquidity_pools(address),
        )?;

        let statistics = compute_statistics(&wallet.transactions);

        Ok(WalletSummary {
            wallet,
            fees: summarize_fees(fee_breakdown),
            liquidity_pools,
            statistics,
        })
    }
}

fn transaction_record(signature: &str, details: &Value) -> TransactionRecord {
    let err = details
        .pointer("/meta/err")
        .cloned()
        .filter(|e| !e.is_null());

    TransactionRecord {
        signature: signature.to_string(),
        slot: details["slot"].as_u64().unwrap_or_default(),
        block_time: details["blockTime"].as_i64(),
        confirmation_status: details["confirmationStatus"].as_str().map(str::to_string),
        err,
        memo: extract_memo(details),
    }
}

/// Scan the instruction list for a memo-program instruction and return its
/// payload. Extraction failures are swallowed; a memo is never required.
fn extract_memo(details: &Value) -> Option<String> {
    let instructions = details
        .pointer("/transaction/message/instructions")?
        .as_array()?;

    for instruction in instructions {
        let is_memo = instruction["program"].as_str() == Some("spl-memo")
            || instruction["programId"].as_str() == Some(SPL_MEMO_PROGRAM_ID);
        if is_memo {
            return instruction["parsed"]
                .as_str()
                .or_else(|| instruction["data"].as_str())
                .map(str::to_string);
        }
    }

    None
}

fn fee_record(signature: &str, queried_address: &str, details: &Value) -> Option<TransactionFees> {
    let meta = details.get("meta").filter(|m| !m.is_null())?;

    // First account key is the fee payer by convention. Best-effort: for
    // multi-signer transactions this can misattribute, and when the keys are
    // absent the queried address stands in.
    let fee_payer = details
        .pointer("/transaction/message/accountKeys/0/pubkey")
        .and_then(Value::as_str)
        .unwrap_or(queried_address)
        .to_string();

    Some(TransactionFees {
        signature: signature.to_string(),
        fee: meta["fee"].as_u64().unwrap_or_default() as f64 / LAMPORTS_PER_SOL as f64,
        fee_payer,
        block_time: details["blockTime"].as_i64(),
    })
}

fn summarize_fees(breakdown: Vec<TransactionFees>) -> FeeSummary {
    let total: f64 = breakdown.iter().map(|f| f.fee).sum();
    let count = breakdown.len();
    let average = if count > 0 { total / count as f64 } else { 0.0 };

    FeeSummary {
        total,
        count,
        average,
        breakdown,
    }
}

fn compute_statistics(transactions: &[TransactionRecord]) -> ActivityStatistics {
    let total_transactions = transactions.len();
    let successful_transactions = transactions.iter().filter(|tx| tx.succeeded()).count();
    let failed_transactions = total_transactions - successful_transactions;
    let success_rate = if total_transactions > 0 {
        successful_transactions as f64 / total_transactions as f64 * 100.0
    } else {
        0.0
    };

    ActivityStatistics {
        total_transactions,
        successful_transactions,
        failed_transactions,
        success_rate,
    }
}
