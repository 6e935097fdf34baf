use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde_json::Value;
use shared::{Error, Result};
use solana_sdk::{
    hash::Hash, native_token::LAMPORTS_PER_SOL, pubkey::Pubkey, system_instruction,
    transaction::Transaction,
};
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;

use crate::solana::SolanaRpcClient;

/// Builds unsigned transfer transactions and broadcasts externally signed
/// ones. No keys are ever held here; signing happens in the caller's wallet.
pub struct TransactionService {
    rpc: Arc<SolanaRpcClient>,
}

/// Whole SOL to lamports, rounded to the nearest lamport.
pub fn sol_to_lamports(amount: f64) -> u64 {
    (amount * LAMPORTS_PER_SOL as f64).round() as u64
}

fn parse_address(address: &str, role: &str) -> Result<Pubkey> {
    Pubkey::from_str(address)
        .map_err(|e| Error::InvalidWalletAddress(format!("Invalid {} address: {}", role, e)))
}

impl TransactionService {
    pub fn new(rpc: Arc<SolanaRpcClient>) -> Self {
        Self { rpc }
    }

    /// Build a single-instruction transfer, anchored to a fresh blockhash,
    /// serialized unsigned as base64. The sender pays the fee.
    pub async fn create_transfer_transaction(
        &self,
        from: &str,
        to: &str,
        amount_sol: f64,
    ) -> Result<String> {
        let from_pubkey = parse_address(from, "sender")?;
        let to_pubkey = parse_address(to, "recipient")?;

        if !(amount_sol.is_finite() && amount_sol > 0.0) {
            return Err(Error::Validation(
                "Transfer amount must be positive".to_string(),
            ));
        }

        let blockhash = self.rpc.get_latest_blockhash().await?;
        build_transfer(
            &from_pubkey,
            &to_pubkey,
            sol_to_lamports(amount_sol),
            &blockhash,
        )
    }

    /// Broadcast an externally signed transaction; returns the
    /// network-assigned signature. Node rejections (bad or missing
    /// signatures included) surface verbatim, never retried.
    pub async fn send_transaction(&self, signed_transaction: &str) -> Result<String> {
        let transaction = decode_signed_transaction(signed_transaction)?;

        let wire = bincode::serialize(&transaction).map_err(|e| Error::Internal(e.to_string()))?;
        let signature = self.rpc.send_raw_transaction(&BASE64.encode(wire)).await?;

        info!("Transaction sent with signature: {}", signature);
        Ok(signature)
    }

    pub async fn get_transaction_status(&self, signature: &str) -> Result<Value> {
        self.rpc.get_signature_status(signature).await
    }

    pub async fn recent_blockhash(&self) -> Result<String> {
        self.rpc.get_latest_blockhash().await
    }
}

fn build_transfer(
    from: &Pubkey,
    to: &Pubkey,
    lamports: u64,
    blockhash: &str,
) -> Result<String> {
    let recent_blockhash = Hash::from_str(blockhash)
        .map_err(|e| Error::Decode(format!("Malformed blockhash: {}", e)))?;

    let instruction = system_instruction::transfer(from, to, lamports);
    let mut transaction = Transaction::new_with_payer(&[instruction], Some(from));
    transaction.message.recent_blockhash = recent_blockhash;

    // Serialized with placeholder signatures; the wallet signs client-side.
    let bytes = bincode::serialize(&transaction).map_err(|e| Error::Internal(e.to_string()))?;
    Ok(BASE64.encode(bytes))
}

fn decode_signed_transaction(signed_transaction: &str) -> Result<Transaction> {
    let bytes = BASE64
        .decode(signed_transaction)
        .map_err(|e| Error::Decode(format!("Signed transaction is not valid base64: {}", e)))?;

    bincode::deserialize(&bytes)
        .map_err(|e| Error::Decode(format!("Signed transaction did not deserialize: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::signature::Signature;

    const FROM: &str = "4Qkev8aNZcqFNSRhQzwyLMFSsi94jHqE8WNVTJzTP99F";
    const TO: &str = "8Nd4oyk9tmeLZrUvYXqoYmHTjGwfyHa2VNdMnQkmBnBW";
    // Any 32 bytes of base58 works as a blockhash for offline construction.
    const BLOCKHASH: &str = "EkSnNWid2cvwEVnVx9aBqawnmiCNiDgp3gUdkDPTKN1N";

    #[test]
    fn test_sol_to_lamports() {
        assert_eq!(sol_to_lamports(1.0), LAMPORTS_PER_SOL);
        assert_eq!(sol_to_lamports(1.5), 1_500_000_000);
        // 0.1 is not exactly representable; rounding keeps the lamport.
        assert_eq!(sol_to_lamports(0.1), 100_000_000);
    }

    #[test]
    fn test_build_transfer_round_trips_unsigned() {
        let from = Pubkey::from_str(FROM).unwrap();
        let to = Pubkey::from_str(TO).unwrap();

        let encoded = build_transfer(&from, &to, 1_500_000_000, BLOCKHASH).unwrap();
        let transaction = decode_signed_transaction(&encoded).unwrap();

        assert_eq!(transaction.message.account_keys[0], from);
        assert_eq!(
            transaction.message.recent_blockhash,
            Hash::from_str(BLOCKHASH).unwrap()
        );
        assert_eq!(transaction.message.instructions.len(), 1);
        // Unsigned: one required signature slot, still the placeholder.
        assert_eq!(transaction.signatures.len(), 1);
        assert_eq!(transaction.signatures[0], Signature::default());
    }

    #[test]
    fn test_build_transfer_rejects_malformed_blockhash() {
        let from = Pubkey::from_str(FROM).unwrap();
        let to = Pubkey::from_str(TO).unwrap();

        let result = build_transfer(&from, &to, 1, "not-a-blockhash");
        assert!(matches!(result, Err(Error::Decode(_))));
    }

    #[test]
    fn test_decode_signed_transaction_rejects_garbage() {
        assert!(matches!(
            decode_signed_transaction("!!!not base64!!!"),
            Err(Error::Decode(_))
        ));
        // Valid base64, not a transaction.
        assert!(matches!(
            decode_signed_transaction("aGVsbG8gd29ybGQ="),
            Err(Error::Decode(_))
        ));
    }
}
