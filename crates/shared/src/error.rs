use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid wallet address: {0}")]
    InvalidWalletAddress(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Solana RPC error: {0}")]
    SolanaRpc(String),

    #[error("Core RPC error: {0}")]
    CoreRpc(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// True for errors detected before any remote call was made.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_) | Error::InvalidWalletAddress(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
