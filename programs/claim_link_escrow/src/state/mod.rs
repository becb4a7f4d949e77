pub mod escrow_state;
pub mod asset_state;
pub mod claim_link;

pub use escrow_state::*;
pub use asset_state::*;
pub use claim_link::*;
