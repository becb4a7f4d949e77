use anchor_lang::prelude::*;

/// Event emitted when the escrow state and native vault are created
#[event]
pub struct EscrowInitialized {
    /// The escrow state account public key
    pub escrow_state: Pubkey,
    /// Native vault holding escrowed lamports
    pub native_vault: Pubkey,
    /// Account that paid for initialization
    pub payer: Pubkey,
}

/// Event emitted when the escrow opts into a fungible token
#[event]
pub struct AssetOptedIn {
    /// Asset id assigned to the mint
    pub asset_id: u64,
    /// Token mint address
    pub token_mint: Pubkey,
    /// Token vault address
    pub token_vault: Pubkey,
}

/// Event emitted when a claim link is created and funded
#[event]
pub struct ClaimLinkCreated {
    /// Id of the new claim link
    pub claim_id: u64,
    /// Funder of the link
    pub sender: Pubkey,
    /// Designated receiver, all-zero when anyone may claim
    pub receiver: Pubkey,
    /// Escrowed amount
    pub amount: u64,
    /// Asset id, 0 for lamports
    pub asset_id: u64,
    /// Expiry timestamp, 0 for none
    pub expiry_time: u64,
}

/// Event emitted when a claim link is redeemed
#[event]
pub struct ClaimLinkClaimed {
    /// Id of the claim link
    pub claim_id: u64,
    /// Address that received the funds
    pub claimant: Pubkey,
    /// Amount disbursed
    pub amount: u64,
    /// Asset id, 0 for lamports
    pub asset_id: u64,
}

/// Event emitted when a claim link is cancelled and refunded
#[event]
pub struct ClaimLinkCancelled {
    /// Id of the claim link
    pub claim_id: u64,
    /// Sender who received the refund
    pub sender: Pubkey,
    /// Amount refunded
    pub amount: u64,
    /// Asset id, 0 for lamports
    pub asset_id: u64,
}
