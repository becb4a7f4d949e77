use anchor_lang::prelude::*;
use crate::constants::*;
use crate::event::*;
use crate::state::*;
use crate::utils::transfer_lamports;

/**
 * Account context for initializing the escrow
 *
 * Creates the global escrow state with both counters at zero and makes the
 * native vault rent exempt so it can receive lamport funding of any size.
 *
 * Access Control: Anyone can pay for initialization, and it can only succeed once
 */
#[event_cpi]
#[derive(Accounts)]
pub struct Initialize<'info> {
    /// Global escrow state (PDA)
    /// - Derived from: ["escrow_state"]
    /// - Holds the claim id counter
    #[account(
        init,
        payer = payer,
        space = EscrowState::LEN,
        seeds = [ESCROW_STATE_SEED.as_bytes()],
        bump
    )]
    pub escrow_state: Account<'info, EscrowState>,

    /// Native vault (system-owned PDA) custodying escrowed lamports
    /// - Derived from: ["native_vault"]
    #[account(
        mut,
        seeds = [NATIVE_VAULT_SEED.as_bytes()],
        bump
    )]
    pub native_vault: SystemAccount<'info>,

    /// Pays for the state account and the vault reserve
    #[account(mut)]
    pub payer: Signer<'info>,

    /// System program for account creation
    pub system_program: Program<'info, System>,
}

/**
 * Initializes the escrow
 *
 * @param ctx - The account context containing the state, vault and payer accounts
 */
pub fn handle_initialize(ctx: Context<Initialize>) -> Result<()> {
    let escrow_state = &mut ctx.accounts.escrow_state;

    // Explicit initialization rule: ids start at zero
    escrow_state.bump = ctx.bumps.escrow_state;
    escrow_state.native_vault_bump = ctx.bumps.native_vault;
    escrow_state.native_vault = ctx.accounts.native_vault.key();
    escrow_state.claim_count = 0;
    escrow_state.asset_count = 0;

    // Keep the vault rent exempt so disbursements never touch the reserve
    let reserve = Rent::get()?.minimum_balance(0);
    let current = ctx.accounts.native_vault.lamports();
    if current < reserve {
        transfer_lamports(
            ctx.accounts.payer.to_account_info(),
            ctx.accounts.native_vault.to_account_info(),
            ctx.accounts.system_program.to_account_info(),
            reserve - current,
            None,
        )?;
    }

    emit_cpi!(EscrowInitialized {
        escrow_state: ctx.accounts.escrow_state.key(),
        native_vault: ctx.accounts.native_vault.key(),
        payer: ctx.accounts.payer.key(),
    });

    Ok(())
}
