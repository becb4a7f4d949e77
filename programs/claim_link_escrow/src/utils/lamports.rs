use anchor_lang::prelude::*;
use anchor_lang::system_program::{transfer, Transfer};
use crate::error::*;

/// Lamport transfer through the system program
///
/// `from` must be a system-owned account. Pass signer seeds when `from` is the
/// native vault PDA.
pub fn transfer_lamports<'a>(
    from: AccountInfo<'a>,
    to: AccountInfo<'a>,
    system_program: AccountInfo<'a>,
    amount: u64,
    signer_seeds: Option<&[&[&[u8]]]>,
) -> Result<()> {
    let cpi_accounts = Transfer { from, to };

    let cpi_ctx = if let Some(seeds) = signer_seeds {
        CpiContext::new_with_signer(system_program, cpi_accounts, seeds)
    } else {
        CpiContext::new(system_program, cpi_accounts)
    };

    transfer(cpi_ctx, amount)
}

/// Pays `amount` lamports out of the native vault
///
/// The vault's rent-exempt reserve is never disbursed.
pub fn release_lamports<'a>(
    native_vault: AccountInfo<'a>,
    recipient: AccountInfo<'a>,
    system_program: AccountInfo<'a>,
    amount: u64,
    signer_seeds: &[&[&[u8]]],
) -> Result<()> {
    let reserve = Rent::get()?.minimum_balance(0);
    require!(
        disbursable(native_vault.lamports(), reserve) >= amount,
        ClaimLinkError::TransferFailed
    );

    transfer_lamports(
        native_vault,
        recipient,
        system_program,
        amount,
        Some(signer_seeds),
    )
    .map_err(|_| error!(ClaimLinkError::TransferFailed))
}

/// Lamports the vault can pay out while keeping `reserve`
pub fn disbursable(balance: u64, reserve: u64) -> u64 {
    balance.saturating_sub(reserve)
}
