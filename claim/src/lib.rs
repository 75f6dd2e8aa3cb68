pub mod client;
pub mod error;
pub mod jetton;
pub mod response;
pub mod user_claim;

pub use client::{ClaimClient, Network};
pub use error::ClaimError;
pub use jetton::{apply_jetton_info, JettonClient, JettonInfo};
pub use response::{ClaimErrorCode, ClaimFailure, ClaimResponse};
pub use user_claim::{InternalMessage, TransactionMessage, TransactionRequest, UserClaimInfo};

pub type Result<T> = std::result::Result<T, ClaimError>;
