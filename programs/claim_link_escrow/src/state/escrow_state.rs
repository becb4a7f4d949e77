use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::*;

/**
 * Global escrow state account
 *
 * Single owned state object for the whole program. It carries the id counters
 * and the bumps needed to sign for the vaults.
 *
 * Derivation: ["escrow_state"]
 *
 * Lifecycle:
 * 1. Created by `initialize` with both counters at zero
 * 2. claim_count incremented by every successful create_claim_link
 * 3. asset_count incremented by every successful opt_in_asset
 * 4. Never closed
 *
 * Design Notes:
 * - Claim ids are dense: the id handed to the n-th link is n - 1
 * - Ids are never reused, so any id below claim_count was issued once
 * - This PDA is the token authority of every registered token vault
 */
#[account]
#[derive(Default, Debug)]
pub struct EscrowState {
    /// Bump seed for this PDA
    pub bump: u8,

    /// Bump seed for the native vault PDA
    /// - Needed to sign lamport transfers out of the vault
    pub native_vault_bump: u8,

    /// Native vault address
    /// - Derived from: ["native_vault"]
    /// - Only valid destination for lamport funding
    pub native_vault: Pubkey,

    /// Number of claim links ever created, also the next claim id
    pub claim_count: u64,

    /// Number of token assets ever registered
    pub asset_count: u64,
}

impl EscrowState {
    /// Calculate the space required for this account
    /// - Includes 8-byte discriminator + struct size
    pub const LEN: usize = 8 + std::mem::size_of::<EscrowState>();

    /// Allocates the next claim id and advances the counter
    pub fn next_claim_id(&mut self) -> Result<u64> {
        let claim_id = self.claim_count;
        self.claim_count = claim_id
            .checked_add(1)
            .ok_or(ClaimLinkError::ArithmeticOverflow)?;
        Ok(claim_id)
    }

    /// Allocates the next token asset id, starting at FIRST_TOKEN_ASSET_ID
    pub fn next_asset_id(&mut self) -> Result<u64> {
        let asset_id = self
            .asset_count
            .checked_add(FIRST_TOKEN_ASSET_ID)
            .ok_or(ClaimLinkError::ArithmeticOverflow)?;
        self.asset_count = asset_id;
        Ok(asset_id)
    }

    /// Error for an id with no stored record
    ///
    /// Records only disappear when a cancel reclaims them, so an issued id
    /// without storage is a cancelled link.
    pub fn missing_record_error(&self, claim_id: u64) -> ClaimLinkError {
        if claim_id < self.claim_count {
            ClaimLinkError::AlreadyFinalized
        } else {
            ClaimLinkError::NotFound
        }
    }
}
