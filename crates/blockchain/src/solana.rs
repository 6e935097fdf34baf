use anyhow::Context;
use serde_json::{json, Value};
use shared::{Error, Result};
use tracing::{debug, info, warn};

use crate::rpc::{JsonRpcClient, RpcFailure};
use crate::types::TokenAccountRecord;

fn rpc_error(failure: RpcFailure) -> Error {
    Error::SolanaRpc(failure.to_string())
}

/// Typed client for the Solana JSON-RPC endpoint. Each call is a single
/// best-effort round trip that reshapes the raw result into the crate's
/// entity types.
pub struct SolanaRpcClient {
    rpc: JsonRpcClient,
}

impl SolanaRpcClient {
    pub fn new(rpc_url: impl Into<String>) -> Self {
        let rpc = JsonRpcClient::new(rpc_url);
        info!("Initializing Solana RPC client: {}", rpc.url());
        Self { rpc }
    }

    async fn call(&self, method: &str, params: Value) -> Result<Value> {
        self.rpc.call(method, params).await.map_err(|e| {
            warn!("Solana RPC call failed for {}: {}", method, e);
            rpc_error(e)
        })
    }

    /// Balance in lamports.
    pub async fn get_balance(&self, address: &str) -> Result<u64> {
        let result = self.call("getBalance", json!([address])).await?;
        result["value"]
            .as_u64()
            .ok_or_else(|| Error::SolanaRpc("unexpected getBalance response shape".to_string()))
    }

    /// Token accounts owned by `address`, filtered to the canonical token
    /// program. Entries the node returns in an unexpected shape are logged
    /// and skipped.
    pub async fn get_token_accounts_by_owner(
        &self,
        address: &str,
    ) -> Result<Vec<TokenAccountRecord>> {
        let result = self
            .call(
                "getTokenAccountsByOwner",
                json!([
                    address,
                    {"programId": spl_token::id().to_string()},
                    {"encoding": "jsonParsed"},
                ]),
            )
            .await?;

        let entries = result["value"].as_array().cloned().unwrap_or_default();

        let mut accounts = Vec::new();
        for entry in &entries {
            match parse_token_account(entry) {
                Ok(account) => accounts.push(account),
                Err(e) => {
                    warn!("Failed to parse token account: {}", e);
                    continue;
                }
            }
        }

        debug!("Retrieved {} token accounts for {}", accounts.len(), address);
        Ok(accounts)
    }

    /// Up to `limit` most recent transaction signatures for `address`.
    pub async fn get_signatures_for_address(
        &self,
        address: &str,
        limit: usize,
    ) -> Result<Vec<String>> {
        let result = self
            .call("getSignaturesForAddress", json!([address, {"limit": limit}]))
            .await?;

        let signatures = result
            .as_array()
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|e| e["signature"].as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default();

        Ok(signatures)
    }

    /// Full parsed transaction details; `None` when the node does not know
    /// the signature.
    pub async fn get_transaction(&self, signature: &str) -> Result<Option<Value>> {
        let result = self
            .call(
                "getTransaction",
                json!([signature, {"encoding": "jsonParsed", "maxSupportedTransactionVersion": 0}]),
            )
            .await?;

        Ok((!result.is_null()).then_some(result))
    }

    pub async fn get_latest_blockhash(&self) -> Result<String> {
        let result = self.call("getLatestBlockhash", json!([])).await?;
        result["value"]["blockhash"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| {
                Error::SolanaRpc("unexpected getLatestBlockhash response shape".to_string())
            })
    }

    /// Broadcast an externally signed transaction; returns the
    /// network-assigned signature. Rejections surface verbatim.
    pub async fn send_raw_transaction(&self, transaction_base64: &str) -> Result<String> {
        let result = self
            .call(
                "sendTransaction",
                json!([transaction_base64, {"encoding": "base64"}]),
            )
            .await?;

        result
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| Error::SolanaRpc("unexpected sendTransaction response shape".to_string()))
    }

    /// Confirmation status for one signature. Returns the node's
    /// `{context, value}` response verbatim; `value` holds null for unknown
    /// signatures.
    pub async fn get_signature_status(&self, signature: &str) -> Result<Value> {
        let result = self
            .call("getSignatureStatuses", json!([[signature]]))
            .await?;
        Ok(result)
    }
}

fn parse_token_account(entry: &Value) -> anyhow::Result<TokenAccountRecord> {
    let pubkey = entry["pubkey"].as_str().context("missing pubkey")?;
    let info = entry
        .pointer("/account/data/parsed/info")
        .context("missing parsed account info")?;

    let mint = info["mint"].as_str().context("missing mint")?;
    let owner = info["owner"].as_str().context("missing owner")?;
    let token_amount = info.get("tokenAmount").context("missing tokenAmount")?;
    let amount = token_amount["amount"]
        .as_str()
        .context("missing amount")?;
    let decimals = token_amount["decimals"]
        .as_u64()
        .context("missing decimals")? as u8;

    Ok(TokenAccountRecord {
        pubkey: pubkey.to_string(),
        mint: mint.to_string(),
        owner: owner.to_string(),
        amount: amount.to_string(),
        decimals,
        ui_amount: token_amount["uiAmount"].as_f64(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_entry() -> Value {
        json!({
            "pubkey": "FDwkzWGxx6LfCfzcmVVLEk3QUMxNhuFuKEMRwzR4Dtys",
            "account": {
                "data": {
                    "parsed": {
                        "info": {
                            "mint": "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v",
                            "owner": "4Qkev8aNZcqFNSRhQzwyLMFSsi94jHqE8WNVTJzTP99F",
                            "tokenAmount": {
                                "amount": "1500000",
                                "decimals": 6,
                                "uiAmount": 1.5,
                                "uiAmountString": "1.5"
                            }
                        },
                        "type": "account"
                    },
                    "program": "spl-token",
                    "space": 165
                }
            }
        })
    }

    #[test]
    fn test_parse_token_account() {
        let record = parse_token_account(&sample_entry()).unwrap();
        assert_eq!(record.pubkey, "FDwkzWGxx6LfCfzcmVVLEk3QUMxNhuFuKEMRwzR4Dtys");
        assert_eq!(record.mint, "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v");
        assert_eq!(record.amount, "1500000");
        assert_eq!(record.decimals, 6);
        assert_eq!(record.ui_amount, Some(1.5));
    }

    #[test]
    fn test_parse_token_account_null_ui_amount() {
        let mut entry = sample_entry();
        entry["account"]["data"]["parsed"]["info"]["tokenAmount"]["uiAmount"] = Value::Null;
        let record = parse_token_account(&entry).unwrap();
        assert_eq!(record.ui_amount, None);
    }

    #[test]
    fn test_parse_token_account_missing_info() {
        let entry = json!({"pubkey": "abc", "account": {"data": "base64-not-parsed"}});
        let err = parse_token_account(&entry).unwrap_err();
        assert!(err.to_string().contains("parsed account info"));
    }

    #[test]
    fn test_parse_token_account_missing_mint() {
        let mut entry = sample_entry();
        entry["account"]["data"]["parsed"]["info"]
            .as_object_mut()
            .unwrap()
            .remove("mint");
        assert!(parse_token_account(&entry).is_err());
    }

    #[tokio::test]
    #[ignore] // Only run against a live Solana RPC endpoint
    async fn test_get_balance_live() {
        let rpc_url = std::env::var("SOLANA_RPC_URL")
            .unwrap_or_else(|_| "https://api.devnet.solana.com".to_string());
        let client = SolanaRpcClient::new(rpc_url);

        let balance = client
            .get_balance("11111111111111111111111111111111")
            .await
            .expect("system program account should resolve");
        assert!(balance > 0);
    }
}
