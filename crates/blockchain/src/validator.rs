use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use solana_sdk::{pubkey::Pubkey, signature::Signature};
use std::str::FromStr;

/// Whether `address` is a well-formed Solana address: base58 text decoding to
/// exactly 32 bytes. Never fails, only answers.
pub fn is_valid_address(address: &str) -> bool {
    Pubkey::from_str(address).is_ok()
}

/// Signatures arrive encoded as base64 from browser wallets and as hex from
/// older tooling. Hex text is usually valid base64 too, so base64 only wins
/// when it yields a usable 64-byte signature; otherwise hex is tried.
fn decode_signature_text(signature: &str) -> Option<Signature> {
    if let Ok(bytes) = BASE64.decode(signature) {
        if let Ok(signature) = Signature::try_from(bytes.as_slice()) {
            return Some(signature);
        }
    }

    hex::decode(signature)
        .ok()
        .and_then(|bytes| Signature::try_from(bytes.as_slice()).ok())
}

/// Detached Ed25519 verification of `message` against `signature` and the
/// signer's address. Returns false, never an error, for malformed or empty
/// inputs and for verification failure.
pub fn verify_signature(message: &str, signature: &str, address: &str) -> bool {
    let Ok(pubkey) = Pubkey::from_str(address) else {
        return false;
    };
    let Some(signature) = decode_signature_text(signature) else {
        return false;
    };

    signature.verify(pubkey.as_ref(), message.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::signature::Keypair;
    use solana_sdk::signer::Signer;

    #[test]
    fn test_valid_address() {
        assert!(is_valid_address("11111111111111111111111111111111"));
    }

    #[test]
    fn test_invalid_addresses() {
        assert!(!is_valid_address("invalid-address"));
        assert!(!is_valid_address(""));
        // Valid base58 but too short to be a 32-byte key.
        assert!(!is_valid_address("abc"));
        // Characters outside the base58 alphabet.
        assert!(!is_valid_address("0OIl+/=="));
    }

    #[test]
    fn test_verify_signature_empty_inputs() {
        assert!(!verify_signature("", "", ""));
        assert!(!verify_signature("hello", "", "11111111111111111111111111111111"));
        assert!(!verify_signature("hello", "not-a-signature", ""));
    }

    #[test]
    fn test_verify_signature_base64() {
        let keypair = Keypair::new();
        let message = "Sign in to the explorer";
        let signature = keypair.sign_message(message.as_bytes());

        let encoded = BASE64.encode(signature.as_ref());
        assert!(verify_signature(
            message,
            &encoded,
            &keypair.pubkey().to_string()
        ));
    }

    #[test]
    fn test_verify_signature_hex_fallback() {
        let keypair = Keypair::new();
        let message = "hex encoded round";
        let signature = keypair.sign_message(message.as_bytes());

        let encoded = hex::encode(signature.as_ref());
        assert!(verify_signature(
            message,
            &encoded,
            &keypair.pubkey().to_string()
        ));
    }

    #[test]
    fn test_verify_signature_wrong_message() {
        let keypair = Keypair::new();
        let signature = keypair.sign_message(b"original message");

        let encoded = BASE64.encode(signature.as_ref());
        assert!(!verify_signature(
            "tampered message",
            &encoded,
            &keypair.pubkey().to_string()
        ));
    }

    #[test]
    fn test_verify_signature_wrong_signer() {
        let signer = Keypair::new();
        let other = Keypair::new();
        let message = "who signed this";
        let signature = signer.sign_message(message.as_bytes());

        let encoded = BASE64.encode(signature.as_ref());
        assert!(!verify_signature(
            message,
            &encoded,
            &other.pubkey().to_string()
        ));
    }

    #[test]
    fn test_verify_signature_garbage_signature_bytes() {
        // Decodes as base64 but is not 64 bytes long.
        assert!(!verify_signature(
            "msg",
            "AAAA",
            "11111111111111111111111111111111"
        ));
    }
}
