pub mod process_claim_tx;
pub mod process_schedule;
pub mod process_status;

pub use process_claim_tx::*;
pub use process_schedule::*;
pub use process_status::*;
