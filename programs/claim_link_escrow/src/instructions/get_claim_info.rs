use anchor_lang::prelude::*;
use crate::constants::*;
use crate::processor::read_link;
use crate::state::*;

/// Account context for reading a link
#[derive(Accounts)]
#[instruction(claim_id: u64)]
pub struct GetClaimInfo<'info> {
    /// Claim link record
    /// - Derived from: ["claim_", claim_id.to_be_bytes()]
    /// CHECK: Read-only, decoded with the claim link layout
    #[account(
        seeds = [CLAIM_SEED.as_bytes(), claim_id.to_be_bytes().as_ref()],
        bump
    )]
    pub claim_link: UncheckedAccount<'info>,
}

/// Snapshot of a claim link returned to callers
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct ClaimInfo {
    pub sender: Pubkey,
    pub receiver: Pubkey,
    pub amount: u64,
    pub asset_id: u64,
    pub expiry_time: u64,
    pub status: LinkStatus,
}

impl From<&ClaimLink> for ClaimInfo {
    fn from(link: &ClaimLink) -> Self {
        Self {
            sender: link.sender,
            receiver: link.receiver,
            amount: link.amount,
            asset_id: link.asset_id,
            expiry_time: link.expiry_time,
            status: link.status,
        }
    }
}

/**
 * Reads a claim link without mutating it
 *
 * @param ctx - The account context
 * @param claim_id - Id of the link
 *
 * @returns the link fields, NotFound when no record is stored
 */
pub fn handle_get_claim_info(ctx: Context<GetClaimInfo>, claim_id: u64) -> Result<ClaimInfo> {
    read_link(&ctx.accounts.claim_link.to_account_info(), claim_id)
}
