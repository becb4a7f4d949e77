use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use crate::constants::*;
use crate::event::*;
use crate::state::*;

/**
 * Account context for opting the escrow into a fungible token
 *
 * Registers a mint under the next asset id and creates the vault that will
 * custody every claim link funded with that mint.
 *
 * Access Control: Permissionless, the payer funds rent
 *
 * Business Logic:
 * - Asset ids start at 1, id 0 is reserved for lamports
 * - A mint can only be registered once (asset entry and vault are seeded by mint)
 * - The vault authority is the escrow state PDA
 */
#[event_cpi]
#[derive(Accounts)]
pub struct OptInAsset<'info> {
    /// Global escrow state, holds the asset id counter
    #[account(
        mut,
        seeds = [ESCROW_STATE_SEED.as_bytes()],
        bump = escrow_state.bump
    )]
    pub escrow_state: Account<'info, EscrowState>,

    /// Registry entry for the mint
    /// - Derived from: ["asset", token_mint]
    #[account(
        init,
        payer = payer,
        space = AssetEntry::LEN,
        seeds = [ASSET_SEED.as_bytes(), token_mint.key().as_ref()],
        bump
    )]
    pub asset_entry: Account<'info, AssetEntry>,

    /// Token vault (PDA) holding escrowed tokens of this mint
    /// - Derived from: ["vault", token_mint]
    #[account(
        init,
        token::mint = token_mint,
        token::authority = escrow_state,
        token::token_program = token_program,
        seeds = [TOKEN_VAULT_SEED.as_bytes(), token_mint.key().as_ref()],
        bump,
        payer = payer,
    )]
    pub token_vault: InterfaceAccount<'info, TokenAccount>,

    /// The token mint being registered
    /// - Supports both SPL Token and Token 2022 programs
    #[account(
        mint::token_program = token_program,
    )]
    pub token_mint: InterfaceAccount<'info, Mint>,

    #[account(mut)]
    pub payer: Signer<'info>,

    /// System program for account creation
    pub system_program: Program<'info, System>,

    /// Token program (supports both SPL Token and Token 2022)
    pub token_program: Interface<'info, TokenInterface>,
}

/**
 * Registers a token mint with the escrow
 *
 * @param ctx - The account context containing the registry, vault and mint accounts
 *
 * @returns the asset id assigned to the mint
 */
pub fn handle_opt_in_asset(ctx: Context<OptInAsset>) -> Result<u64> {
    let asset_id = ctx.accounts.escrow_state.next_asset_id()?;

    let asset_entry = &mut ctx.accounts.asset_entry;
    asset_entry.bump = ctx.bumps.asset_entry;
    asset_entry.asset_id = asset_id;
    asset_entry.mint = ctx.accounts.token_mint.key();
    asset_entry.vault = ctx.accounts.token_vault.key();

    msg!("Asset {} registered for mint {}", asset_id, asset_entry.mint);

    emit_cpi!(AssetOptedIn {
        asset_id,
        token_mint: ctx.accounts.token_mint.key(),
        token_vault: ctx.accounts.token_vault.key(),
    });

    Ok(asset_id)
}
