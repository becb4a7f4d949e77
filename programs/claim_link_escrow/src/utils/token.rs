use anchor_lang::prelude::*;
use anchor_spl::token_interface::{
    transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked,
};
use crate::error::*;
use crate::processor::TokenRoute;
use crate::state::AssetEntry;

/// Universal token transfer function that supports both SPL Token and Token 2022
pub fn transfer_token<'a>(
    authority: AccountInfo<'a>,
    from: AccountInfo<'a>,
    to: AccountInfo<'a>,
    mint: AccountInfo<'a>,
    token_program: AccountInfo<'a>,
    amount: u64,
    decimals: u8,
    signer_seeds: Option<&[&[&[u8]]]>,
) -> Result<()> {
    let cpi_accounts = TransferChecked {
        from,
        mint,
        to,
        authority,
    };

    let cpi_ctx = if let Some(seeds) = signer_seeds {
        CpiContext::new_with_signer(token_program, cpi_accounts, seeds)
    } else {
        CpiContext::new(token_program, cpi_accounts)
    };

    transfer_checked(cpi_ctx, amount, decimals)
}

/// Optional token accounts of an instruction, as declared in its context
#[derive(Clone, Copy)]
pub struct TokenAccounts<'a, 'info> {
    pub asset_entry: &'a Option<Account<'info, AssetEntry>>,
    pub token_vault: &'a Option<InterfaceAccount<'info, TokenAccount>>,
    pub user_token_account: &'a Option<InterfaceAccount<'info, TokenAccount>>,
    pub token_mint: &'a Option<InterfaceAccount<'info, Mint>>,
    pub token_program: &'a Option<Interface<'info, TokenInterface>>,
}

impl<'a, 'info> TokenAccounts<'a, 'info> {
    /// None without a registry entry, MissingTokenAccounts for a partial set
    pub fn resolve(&self) -> Result<Option<TokenLeg<'a, 'info>>> {
        match (
            self.asset_entry,
            self.token_vault,
            self.user_token_account,
            self.token_mint,
            self.token_program,
        ) {
            (None, _, _, _, _) => Ok(None),
            (Some(asset_entry), Some(token_vault), Some(user_token_account), Some(token_mint), Some(token_program)) => {
                Ok(Some(TokenLeg {
                    asset_entry,
                    token_vault,
                    user_token_account,
                    token_mint,
                    token_program,
                }))
            }
            _ => err!(ClaimLinkError::MissingTokenAccounts),
        }
    }
}

/// Complete set of token accounts for moving a registered asset
pub struct TokenLeg<'a, 'info> {
    pub asset_entry: &'a Account<'info, AssetEntry>,
    pub token_vault: &'a InterfaceAccount<'info, TokenAccount>,
    pub user_token_account: &'a InterfaceAccount<'info, TokenAccount>,
    pub token_mint: &'a InterfaceAccount<'info, Mint>,
    pub token_program: &'a Interface<'info, TokenInterface>,
}

impl<'a, 'info> TokenLeg<'a, 'info> {
    pub fn route(&self) -> TokenRoute {
        TokenRoute {
            asset_id: self.asset_entry.asset_id,
            registered_mint: self.asset_entry.mint,
            registered_vault: self.asset_entry.vault,
            mint: self.token_mint.key(),
            vault: self.token_vault.key(),
            account_mint: self.user_token_account.mint,
            account_owner: self.user_token_account.owner,
        }
    }

    /// Current vault balance read from account data
    ///
    /// The deserialized `token_vault` is a snapshot from instruction start and
    /// does not see CPIs made since.
    pub fn vault_balance(&self) -> Result<u64> {
        let info = self.token_vault.to_account_info();
        let data = info.try_borrow_data()?;
        let vault = TokenAccount::try_deserialize(&mut &data[..])?;
        Ok(vault.amount)
    }

    /// Moves `amount` from the user's token account into the vault
    pub fn deposit(&self, user: AccountInfo<'info>, amount: u64) -> Result<()> {
        transfer_token(
            user,
            self.user_token_account.to_account_info(),
            self.token_vault.to_account_info(),
            self.token_mint.to_account_info(),
            self.token_program.to_account_info(),
            amount,
            self.token_mint.decimals,
            None, // Owner-signed transfer
        )
    }

    /// Moves `amount` from the vault to the user's token account
    pub fn release(
        &self,
        vault_authority: AccountInfo<'info>,
        amount: u64,
        signer_seeds: &[&[&[u8]]],
    ) -> Result<()> {
        require!(
            self.vault_balance()? >= amount,
            ClaimLinkError::TransferFailed
        );

        transfer_token(
            vault_authority,
            self.token_vault.to_account_info(),
            self.user_token_account.to_account_info(),
            self.token_mint.to_account_info(),
            self.token_program.to_account_info(),
            amount,
            self.token_mint.decimals,
            Some(signer_seeds), // PDA signing for vault withdrawal
        )
        .map_err(|_| error!(ClaimLinkError::TransferFailed))
    }
}
