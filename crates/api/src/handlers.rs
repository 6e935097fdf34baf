use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::error::{ApiError, ApiResult};
use crate::AppState;
use blockchain::{is_valid_address, verify_signature, DEFAULT_FEE_LIMIT, DEFAULT_HISTORY_LIMIT};

// Request types

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifySignatureRequest {
    pub message: Option<String>,
    pub signature: Option<String>,
    pub public_key: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionRequest {
    pub from_pubkey: Option<String>,
    pub to_pubkey: Option<String>,
    /// Left untyped so a non-numeric amount is a validation failure, not a
    /// body-rejection.
    pub amount: Option<Value>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendTransactionRequest {
    pub signed_transaction: Option<String>,
}

#[derive(Deserialize)]
pub struct LimitQuery {
    pub limit: Option<usize>,
}

fn require_address(address: &str) -> ApiResult<()> {
    if is_valid_address(address) {
        Ok(())
    } else {
        Err(ApiError::validation("Invalid Solana address"))
    }
}

// Health

pub async fn get_connection_health(State(state): State<Arc<AppState>>) -> Json<Value> {
    let results = state.connection_health.test_all_connections().await;
    Json(json!(results))
}

pub async fn get_security_checks(State(state): State<Arc<AppState>>) -> Json<Value> {
    let results = state.connection_health.run_security_checks();
    Json(json!(results))
}

pub async fn get_full_health_report(State(state): State<Arc<AppState>>) -> Json<Value> {
    let report = state.connection_health.full_report().await;
    Json(json!(report))
}

// Wallet service endpoints

pub async fn validate_address(Path(address): Path<String>) -> Json<Value> {
    let valid = is_valid_address(&address);
    Json(json!({ "valid": valid, "address": address }))
}

pub async fn get_balance(
    State(state): State<Arc<AppState>>,
    Path(address): Path<String>,
) -> ApiResult<Json<Value>> {
    require_address(&address)?;

    let balance = state
        .wallet_service
        .get_balance(&address)
        .await
        .map_err(|e| ApiError::upstream("Failed to get balance", e))?;

    Ok(Json(json!({ "address": address, "balance": balance })))
}

pub async fn post_verify_signature(
    Json(payload): Json<VerifySignatureRequest>,
) -> ApiResult<Json<Value>> {
    let (message, signature, public_key) =
        match (payload.message, payload.signature, payload.public_key) {
            (Some(message), Some(signature), Some(public_key)) => (message, signature, public_key),
            _ => {
                return Err(ApiError::validation(
                    "Missing required fields: message, signature, publicKey",
                ))
            }
        };

    if !is_valid_address(&public_key) {
        return Err(ApiError::validation("Invalid public key"));
    }

    let valid = verify_signature(&message, &signature, &public_key);
    Ok(Json(json!({
        "valid": valid,
        "message": message,
        "publicKey": public_key,
    })))
}

pub async fn post_create_transaction(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateTransactionRequest>,
) -> ApiResult<Json<Value>> {
    let (from_pubkey, to_pubkey, amount) =
        match (payload.from_pubkey, payload.to_pubkey, payload.amount) {
            (Some(from), Some(to), Some(amount)) => (from, to, amount),
            _ => {
                return Err(ApiError::validation(
                    "Missing required fields: fromPubkey, toPubkey, amount",
                ))
            }
        };

    if !is_valid_address(&from_pubkey) {
        return Err(ApiError::validation("Invalid sender address"));
    }
    if !is_valid_address(&to_pubkey) {
        return Err(ApiError::validation("Invalid recipient address"));
    }

    let amount = match amount.as_f64() {
        Some(amount) if amount > 0.0 => amount,
        _ => return Err(ApiError::validation("Invalid amount")),
    };

    let transaction = state
        .transaction_service
        .create_transfer_transaction(&from_pubkey, &to_pubkey, amount)
        .await
        .map_err(|e| ApiError::upstream("Failed to create transaction", e))?;

    Ok(Json(json!({
        "transaction": transaction,
        "fromPubkey": from_pubkey,
        "toPubkey": to_pubkey,
        "amount": amount,
    })))
}

pub async fn post_send_transaction(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SendTransactionRequest>,
) -> ApiResult<Json<Value>> {
    let signed_transaction = payload
        .signed_transaction
        .ok_or_else(|| ApiError::validation("Missing required field: signedTransaction"))?;

    let signature = state
        .transaction_service
        .send_transaction(&signed_transaction)
        .await
        .map_err(|e| ApiError::upstream("Failed to send transaction", e))?;

    Ok(Json(json!({ "signature": signature })))
}

pub async fn get_transaction_status(
    State(state): State<Arc<AppState>>,
    Path(signature): Path<String>,
) -> ApiResult<Json<Value>> {
    let status = state
        .transaction_service
        .get_transaction_status(&signature)
        .await
        .map_err(|e| ApiError::upstream("Failed to get transaction status", e))?;

    Ok(Json(json!({ "signature": signature, "status": status })))
}

pub async fn get_recent_blockhash(State(state): State<Arc<AppState>>) -> ApiResult<Json<Value>> {
    let blockhash = state
        .transaction_service
        .recent_blockhash()
        .await
        .map_err(|e| ApiError::upstream("Failed to get recent blockhash", e))?;

    Ok(Json(json!({ "blockhash": blockhash })))
}

// Wallet aggregation endpoints

pub async fn get_wallet_info(
    State(state): State<Arc<AppState>>,
    Path(address): Path<String>,
) -> ApiResult<Json<Value>> {
    require_address(&address)?;

    let info = state
        .wallet_service
        .get_wallet_info(&address)
        .await
        .map_err(|e| ApiError::upstream("Failed to fetch wallet information", e))?;

    Ok(Json(json!(info)))
}

pub async fn get_wallet_tokens(
    State(state): State<Arc<AppState>>,
    Path(address): Path<String>,
) -> ApiResult<Json<Value>> {
    require_address(&address)?;

    let token_accounts = state
        .wallet_service
        .get_token_accounts(&address)
        .await
        .map_err(|e| ApiError::upstream("Failed to fetch token accounts", e))?;

    Ok(Json(json!({ "address": address, "tokenAccounts": token_accounts })))
}

pub async fn get_wallet_transactions(
    State(state): State<Arc<AppState>>,
    Path(address): Path<String>,
    Query(query): Query<LimitQuery>,
) -> ApiResult<Json<Value>> {
    require_address(&address)?;

    let limit = query.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
    let transactions = state
        .wallet_service
        .get_transaction_history(&address, limit)
        .await
        .map_err(|e| ApiError::upstream("Failed to fetch transactions", e))?;

    Ok(Json(json!({ "address": address, "transactions": transactions })))
}

pub async fn get_wallet_fees(
    State(state): State<Arc<AppState>>,
    Path(address): Path<String>,
    Query(query): Query<LimitQuery>,
) -> ApiResult<Json<Value>> {
    require_address(&address)?;

    let limit = query.limit.unwrap_or(DEFAULT_FEE_LIMIT);
    let fees = state
        .wallet_service
        .get_transaction_fees(&address, limit)
        .await
        .map_err(|e| ApiError::upstream("Failed to fetch fees", e))?;

    let total_fees: f64 = fees.iter().map(|f| f.fee).sum();
    let average_fee = if fees.is_empty() {
        0.0
    } else {
        total_fees / fees.len() as f64
    };

    Ok(Json(json!({
        "address": address,
        "totalFees": total_fees,
        "averageFee": average_fee,
        "transactionCount": fees.len(),
        "fees": fees,
    })))
}

pub async fn get_wallet_pools(
    State(state): State<Arc<AppState>>,
    Path(address): Path<String>,
) -> ApiResult<Json<Value>> {
    require_address(&address)?;

    let pools = state
        .wallet_service
        .detect_liquidity_pools(&address)
        .await
        .map_err(|e| ApiError::upstream("Failed to fetch liquidity pools", e))?;

    Ok(Json(json!({ "address": address, "pools": pools })))
}

pub async fn get_wallet_summary(
    State(state): State<Arc<AppState>>,
    Path(address): Path<String>,
) -> ApiResult<Json<Value>> {
    require_address(&address)?;

    let summary = state
        .wallet_service
        .get_wallet_summary(&address)
        .await
        .map_err(|e| ApiError::upstream("Failed to fetch wallet summary", e))?;

    Ok(Json(json!(summary)))
}

pub async fn get_transaction(
    State(state): State<Arc<AppState>>,
    Path(signature): Path<String>,
) -> ApiResult<Json<Value>> {
    let transaction = state
        .wallet_service
        .get_transaction_details(&signature)
        .await
        .map_err(|e| ApiError::upstream("Failed to fetch transaction", e))?;

    Ok(Json(json!({ "signature": signature, "transaction": transaction })))
}
