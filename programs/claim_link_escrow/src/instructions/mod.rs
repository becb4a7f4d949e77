pub mod initialize;
pub mod opt_in_asset;
pub mod create_claim_link;
pub mod claim;
pub mod cancel;
pub mod get_claim_info;

pub use initialize::*;
pub use opt_in_asset::*;
pub use create_claim_link::*;
pub use claim::*;
pub use cancel::*;
pub use get_claim_info::*;
