use anchor_lang::prelude::*;

declare_id!("CLinkEscrow11111111111111111111111111111111");

pub mod constants;
pub mod error;
pub mod event;
pub mod instructions;
pub mod processor;
pub mod state;
pub mod utils;

#[cfg(test)]
pub mod test;

use instructions::*;

/**
 * Claim Link Escrow Program
 *
 * A Solana program for pre-funded claim links. A sender escrows lamports or
 * tokens behind a numeric link id; the designated receiver (or anyone, when
 * no receiver is set) redeems it exactly once.
 *
 * Key Features:
 * - Escrow funding in the same instruction that creates the link
 * - Optional receiver restriction (all-zero receiver means anyone)
 * - Optional expiry (claims fail from the expiry timestamp onward)
 * - Sender cancellation with refund and rent reclamation
 * - Support for lamports and both SPL Token and Token 2022
 *
 * Architecture:
 * - Escrow State PDA: claim id counter, asset id counter, vault bumps
 * - Native Vault PDA: system-owned account holding escrowed lamports
 * - Asset Entry PDAs: map asset ids to mints and vaults
 * - Token Vault PDAs: hold escrowed tokens, authority is the escrow state
 * - Claim Link PDAs: one fixed-layout record per link id
 *
 * Lifecycle per link:
 *   Open --claim--> Claimed     (record kept)
 *   Open --cancel-> Cancelled   (record closed)
 */
#[program]
pub mod claim_link_escrow {
    use super::*;

    /**
     * Initializes the escrow
     *
     * Creates the escrow state with the claim counter at zero and makes the
     * native vault rent exempt.
     *
     * Access Control: Anyone, once
     */
    pub fn initialize(ctx: Context<Initialize>) -> Result<()> {
        handle_initialize(ctx)
    }

    /**
     * Opts the escrow into a token mint
     *
     * @param ctx - Account context containing the registry entry, vault and mint
     *
     * @returns the asset id assigned to the mint
     *
     * Access Control: Anyone, once per mint
     */
    pub fn opt_in_asset(ctx: Context<OptInAsset>) -> Result<u64> {
        handle_opt_in_asset(ctx)
    }

    /**
     * Creates and funds a claim link
     *
     * @param ctx - Account context containing the record, vaults and funding accounts
     * @param amount - Amount to escrow
     * @param receiver - Designated claimant, all-zero for anyone
     * @param expiry_time - Unix timestamp from which claims fail, 0 for never
     *
     * @returns the new claim id
     *
     * Access Control: Any funder
     */
    pub fn create_claim_link(
        ctx: Context<CreateClaimLink>,
        amount: u64,
        receiver: Pubkey,
        expiry_time: u64,
    ) -> Result<u64> {
        handle_create_claim_link(ctx, amount, receiver, expiry_time)
    }

    /**
     * Claims a link
     *
     * @param ctx - Account context containing the record and payout accounts
     * @param claim_id - Id of the link
     *
     * Access Control: Designated receiver, or anyone for unrestricted links
     */
    pub fn claim(ctx: Context<Claim>, claim_id: u64) -> Result<bool> {
        handle_claim(ctx, claim_id)
    }

    /**
     * Cancels a link and refunds the sender
     *
     * @param ctx - Account context containing the record and refund accounts
     * @param claim_id - Id of the link
     *
     * Access Control: Original sender only
     */
    pub fn cancel(ctx: Context<Cancel>, claim_id: u64) -> Result<bool> {
        handle_cancel(ctx, claim_id)
    }

    /**
     * Reads a link
     *
     * @param ctx - Account context containing the record
     * @param claim_id - Id of the link
     *
     * Access Control: Anyone, read-only
     */
    pub fn get_claim_info(ctx: Context<GetClaimInfo>, claim_id: u64) -> Result<ClaimInfo> {
        handle_get_claim_info(ctx, claim_id)
    }
}
