pub mod core_rpc;
pub mod rpc;
pub mod solana;
pub mod transaction;
pub mod types;
pub mod validator;
pub mod wallet;

pub use core_rpc::CoreRpcClient;
pub use rpc::{JsonRpcClient, RpcFailure};
pub use solana::SolanaRpcClient;
pub use transaction::{sol_to_lamports, TransactionService};
pub use types::{
    ActivityStatistics, BlockchainInfo, FeeSummary, LiquidityPoolPosition, TokenAccountRecord,
    TransactionFees, TransactionRecord, WalletInfo, WalletSummary,
};
pub use validator::{is_valid_address, verify_signature};
pub use wallet::{WalletService, DEFAULT_FEE_LIMIT, DEFAULT_HISTORY_LIMIT};
