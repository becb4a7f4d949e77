use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use crate::constants::*;
use crate::event::*;
use crate::state::*;
use crate::processor::refund_link;
use crate::utils::{EscrowAccounts, RecordAccount, TokenAccounts};

/**
 * Account context for cancelling a link
 *
 * Refunds an open link to its sender and closes the record, returning its
 * rent to the sender as well. Cancelling needs no expiry: a sender may pull
 * back a still-open, unexpired link.
 *
 * Access Control: Only the original sender
 */
#[event_cpi]
#[derive(Accounts)]
#[instruction(claim_id: u64)]
pub struct Cancel<'info> {
    /// Global escrow state, signs token disbursements
    #[account(
        seeds = [ESCROW_STATE_SEED.as_bytes()],
        bump = escrow_state.bump
    )]
    pub escrow_state: Account<'info, EscrowState>,

    /// Claim link record, closed on success
    /// - Derived from: ["claim_", claim_id.to_be_bytes()]
    /// CHECK: Decoded with the claim link layout, missing records are reported by the handler
    #[account(
        mut,
        seeds = [CLAIM_SEED.as_bytes(), claim_id.to_be_bytes().as_ref()],
        bump
    )]
    pub claim_link: UncheckedAccount<'info>,

    /// Native vault, source of lamport refunds
    #[account(
        mut,
        address = escrow_state.native_vault
    )]
    pub native_vault: SystemAccount<'info>,

    /// The original sender, receives the refund and the record rent
    #[account(mut)]
    pub sender: Signer<'info>,

    /// Registry entry of the link's asset (token links only)
    pub asset_entry: Option<Account<'info, AssetEntry>>,

    /// Registered vault of the asset (token links only)
    #[account(mut)]
    pub token_vault: Option<InterfaceAccount<'info, TokenAccount>>,

    /// Sender's token account for the asset (token links only)
    #[account(mut)]
    pub sender_token_account: Option<InterfaceAccount<'info, TokenAccount>>,

    /// Mint of the asset (token links only)
    pub token_mint: Option<InterfaceAccount<'info, Mint>>,

    /// Token program (token links only)
    pub token_program: Option<Interface<'info, TokenInterface>>,

    /// System program for lamport refunds
    pub system_program: Program<'info, System>,
}

/**
 * Cancels a link and refunds the sender
 *
 * @param ctx - The account context
 * @param claim_id - Id of the link to cancel
 */
pub fn handle_cancel(ctx: Context<Cancel>, claim_id: u64) -> Result<bool> {
    let sender_key = ctx.accounts.sender.key();

    // Record rent goes back to the sender on reclaim
    let mut records = RecordAccount {
        record: ctx.accounts.claim_link.to_account_info(),
        bump: ctx.bumps.claim_link,
        payer: ctx.accounts.sender.to_account_info(),
        system_program: ctx.accounts.system_program.to_account_info(),
    };

    let mut vault = EscrowAccounts {
        escrow_state: ctx.accounts.escrow_state.to_account_info(),
        escrow_bump: ctx.accounts.escrow_state.bump,
        native_vault: ctx.accounts.native_vault.to_account_info(),
        native_vault_bump: ctx.accounts.escrow_state.native_vault_bump,
        user: ctx.accounts.sender.to_account_info(),
        system_program: ctx.accounts.system_program.to_account_info(),
        tokens: TokenAccounts {
            asset_entry: &ctx.accounts.asset_entry,
            token_vault: &ctx.accounts.token_vault,
            user_token_account: &ctx.accounts.sender_token_account,
            token_mint: &ctx.accounts.token_mint,
            token_program: &ctx.accounts.token_program,
        },
    };

    let payout = refund_link(
        &ctx.accounts.escrow_state,
        &mut records,
        &mut vault,
        claim_id,
        &sender_key,
    )?;

    msg!("Claim link {} cancelled", claim_id);

    emit_cpi!(ClaimLinkCancelled {
        claim_id,
        sender: sender_key,
        amount: payout.amount,
        asset_id: payout.asset_id,
    });

    Ok(true)
}
