use anchor_lang::prelude::*;

/**
 * Registered fungible asset
 *
 * Maps a numeric asset id onto a token mint and the escrow vault that
 * custodies it. Claim links store only the asset id.
 *
 * Derivation: ["asset", token_mint]
 *
 * Lifecycle:
 * 1. Created by opt_in_asset (once per mint)
 * 2. Read by create_claim_link, claim and cancel for token links
 */
#[account]
#[derive(Default, Debug)]
pub struct AssetEntry {
    /// Bump seed for PDA derivation
    pub bump: u8,

    /// Numeric id stored in claim link records
    pub asset_id: u64,

    /// Token mint address
    pub mint: Pubkey,

    /// Token vault address
    /// - Derived from: ["vault", token_mint]
    /// - Authority is the escrow state PDA
    pub vault: Pubkey,
}

impl AssetEntry {
    /// Calculate the space required for this account
    /// - Includes 8-byte discriminator + struct size
    pub const LEN: usize = 8 + std::mem::size_of::<AssetEntry>();
}
