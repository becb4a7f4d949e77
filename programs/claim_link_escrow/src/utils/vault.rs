use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::*;
use crate::processor::{EscrowVault, TokenRoute};
use crate::state::Payout;
use crate::utils::{release_lamports, transfer_lamports, TokenAccounts};

/// Escrow custody for one instruction
///
/// Lamports sit in the native vault and leave it signed by the vault PDA.
/// Tokens sit in the registered vault of their mint and leave it signed by the
/// escrow state PDA.
pub struct EscrowAccounts<'a, 'info> {
    pub escrow_state: AccountInfo<'info>,
    pub escrow_bump: u8,
    pub native_vault: AccountInfo<'info>,
    pub native_vault_bump: u8,
    /// Signer of the instruction: funder on create, payee on claim and cancel
    pub user: AccountInfo<'info>,
    pub system_program: AccountInfo<'info>,
    pub tokens: TokenAccounts<'a, 'info>,
}

impl<'a, 'info> EscrowVault for EscrowAccounts<'a, 'info> {
    fn native_target(&self) -> Pubkey {
        self.native_vault.key()
    }

    fn token_route(&self) -> Result<Option<TokenRoute>> {
        Ok(self.tokens.resolve()?.map(|leg| leg.route()))
    }

    fn pull(&mut self, from: &Pubkey, asset_id: u64, amount: u64) -> Result<u64> {
        require_keys_eq!(*from, self.user.key(), ClaimLinkError::Unauthorized);

        if asset_id == NATIVE_ASSET_ID {
            transfer_lamports(
                self.user.clone(),
                self.native_vault.clone(),
                self.system_program.clone(),
                amount,
                None,
            )?;
            return Ok(amount);
        }

        let leg = self
            .tokens
            .resolve()?
            .ok_or(ClaimLinkError::MissingTokenAccounts)?;

        // Transfer-fee mints credit less than `amount`
        let before = leg.vault_balance()?;
        leg.deposit(self.user.clone(), amount)?;
        let after = leg.vault_balance()?;

        Ok(after.saturating_sub(before))
    }

    fn push(&mut self, payout: &Payout) -> Result<()> {
        require_keys_eq!(payout.recipient, self.user.key(), ClaimLinkError::Unauthorized);

        if payout.asset_id == NATIVE_ASSET_ID {
            let bump = [self.native_vault_bump];
            let seeds = &[NATIVE_VAULT_SEED.as_bytes(), bump.as_ref()];
            return release_lamports(
                self.native_vault.clone(),
                self.user.clone(),
                self.system_program.clone(),
                payout.amount,
                &[&seeds[..]],
            );
        }

        let leg = self
            .tokens
            .resolve()?
            .ok_or(ClaimLinkError::MissingTokenAccounts)?;

        let bump = [self.escrow_bump];
        let seeds = &[ESCROW_STATE_SEED.as_bytes(), bump.as_ref()];
        leg.release(self.escrow_state.clone(), payout.amount, &[&seeds[..]])
    }
}
