use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use crate::constants::*;
use crate::event::*;
use crate::state::*;
use crate::processor::redeem_link;
use crate::utils::{EscrowAccounts, RecordAccount, TokenAccounts};

/**
 * Account context for claiming a link
 *
 * Redeems an open link: the status is set to Claimed and the escrowed amount
 * is paid to the signing claimant. The record is kept so its status stays
 * queryable.
 *
 * Access Control: The designated receiver, or anyone when the receiver is all-zero
 */
#[event_cpi]
#[derive(Accounts)]
#[instruction(claim_id: u64)]
pub struct Claim<'info> {
    /// Global escrow state, signs token disbursements
    #[account(
        seeds = [ESCROW_STATE_SEED.as_bytes()],
        bump = escrow_state.bump
    )]
    pub escrow_state: Account<'info, EscrowState>,

    /// Claim link record
    /// - Derived from: ["claim_", claim_id.to_be_bytes()]
    /// CHECK: Decoded with the claim link layout, missing records are reported by the handler
    #[account(
        mut,
        seeds = [CLAIM_SEED.as_bytes(), claim_id.to_be_bytes().as_ref()],
        bump
    )]
    pub claim_link: UncheckedAccount<'info>,

    /// Native vault, source of lamport payouts
    #[account(
        mut,
        address = escrow_state.native_vault
    )]
    pub native_vault: SystemAccount<'info>,

    /// The claimant, receives the funds
    #[account(mut)]
    pub claimant: Signer<'info>,

    /// Registry entry of the link's asset (token links only)
    pub asset_entry: Option<Account<'info, AssetEntry>>,

    /// Registered vault of the asset (token links only)
    #[account(mut)]
    pub token_vault: Option<InterfaceAccount<'info, TokenAccount>>,

    /// Claimant's token account for the asset (token links only)
    #[account(mut)]
    pub claimant_token_account: Option<InterfaceAccount<'info, TokenAccount>>,

    /// Mint of the asset (token links only)
    pub token_mint: Option<InterfaceAccount<'info, Mint>>,

    /// Token program (token links only)
    pub token_program: Option<Interface<'info, TokenInterface>>,

    /// System program for lamport payouts
    pub system_program: Program<'info, System>,
}

/**
 * Claims a link
 *
 * @param ctx - The account context
 * @param claim_id - Id of the link to claim
 *
 * Validation Process:
 * 1. Record must exist and be Open
 * 2. Link must not be expired (when an expiry is set)
 * 3. Claimant must match the receiver (when a receiver is set)
 */
pub fn handle_claim(ctx: Context<Claim>, claim_id: u64) -> Result<bool> {
    let claimant_key = ctx.accounts.claimant.key();

    // Negative clock values are treated as the epoch
    let now = u64::try_from(Clock::get()?.unix_timestamp).unwrap_or(0);

    let mut records = RecordAccount {
        record: ctx.accounts.claim_link.to_account_info(),
        bump: ctx.bumps.claim_link,
        payer: ctx.accounts.claimant.to_account_info(),
        system_program: ctx.accounts.system_program.to_account_info(),
    };

    let mut vault = EscrowAccounts {
        escrow_state: ctx.accounts.escrow_state.to_account_info(),
        escrow_bump: ctx.accounts.escrow_state.bump,
        native_vault: ctx.accounts.native_vault.to_account_info(),
        native_vault_bump: ctx.accounts.escrow_state.native_vault_bump,
        user: ctx.accounts.claimant.to_account_info(),
        system_program: ctx.accounts.system_program.to_account_info(),
        tokens: TokenAccounts {
            asset_entry: &ctx.accounts.asset_entry,
            token_vault: &ctx.accounts.token_vault,
            user_token_account: &ctx.accounts.claimant_token_account,
            token_mint: &ctx.accounts.token_mint,
            token_program: &ctx.accounts.token_program,
        },
    };

    let payout = redeem_link(
        &ctx.accounts.escrow_state,
        &mut records,
        &mut vault,
        claim_id,
        &claimant_key,
        now,
    )?;

    msg!("Claim link {} claimed by {}", claim_id, claimant_key);

    emit_cpi!(ClaimLinkClaimed {
        claim_id,
        claimant: claimant_key,
        amount: payout.amount,
        asset_id: payout.asset_id,
    });

    Ok(true)
}
