use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use crate::constants::*;
use crate::error::*;
use crate::event::*;
use crate::state::*;
use crate::processor::open_link;
use crate::utils::{EscrowAccounts, RecordAccount, TokenAccounts};

/**
 * Account context for creating a claim link
 *
 * The sender funds the escrow in the same instruction that records the link:
 * - Lamport links: `amount` lamports move from the sender to the native vault
 * - Token links: `amount` tokens move from the sender's token account to the
 *   registered vault of the mint (all five token accounts must be supplied)
 *
 * The record PDA is derived from the current claim counter, so callers never
 * choose the id.
 *
 * Access Control: Anyone can create a link they fund themselves
 */
#[event_cpi]
#[derive(Accounts)]
pub struct CreateClaimLink<'info> {
    /// Global escrow state, holds the claim id counter
    #[account(
        mut,
        seeds = [ESCROW_STATE_SEED.as_bytes()],
        bump = escrow_state.bump
    )]
    pub escrow_state: Account<'info, EscrowState>,

    /// Claim link record to create
    /// - Derived from: ["claim_", claim_count.to_be_bytes()]
    /// CHECK: Created in the handler and written with the claim link layout
    #[account(
        mut,
        seeds = [CLAIM_SEED.as_bytes(), escrow_state.claim_count.to_be_bytes().as_ref()],
        bump
    )]
    pub claim_link: UncheckedAccount<'info>,

    /// Native vault, destination of lamport funding
    #[account(
        mut,
        address = escrow_state.native_vault @ ClaimLinkError::InvalidFundingTarget
    )]
    pub native_vault: SystemAccount<'info>,

    /// The funder of the link
    /// - Pays for the record account and the escrowed amount
    #[account(mut)]
    pub sender: Signer<'info>,

    /// Registry entry of the funded asset (token links only)
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

    /// System program for account creation and lamport funding
    pub system_program: Program<'info, System>,
}

/**
 * Creates and funds a claim link
 *
 * @param ctx - The account context
 * @param amount - Amount to escrow, in the smallest unit of the asset
 * @param receiver - Only address allowed to claim, all-zero for anyone
 * @param expiry_time - Unix timestamp from which claiming fails, 0 for never
 *
 * @returns the new claim id
 */
pub fn handle_create_claim_link(
    ctx: Context<CreateClaimLink>,
    amount: u64,
    receiver: Pubkey,
    expiry_time: u64,
) -> Result<u64> {
    let sender_key = ctx.accounts.sender.key();

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

    let (claim_id, link) = open_link(
        &mut ctx.accounts.escrow_state,
        &mut records,
        &mut vault,
        &sender_key,
        amount,
        receiver,
        expiry_time,
    )?;

    msg!("Claim link {} created, asset {}", claim_id, link.asset_id);

    emit_cpi!(ClaimLinkCreated {
        claim_id,
        sender: sender_key,
        receiver,
        amount,
        asset_id: link.asset_id,
        expiry_time,
    });

    Ok(claim_id)
}
