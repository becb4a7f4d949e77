use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::*;
use crate::instructions::ClaimInfo;
use crate::state::*;

/**
 * Claim link lifecycle over abstract storage and custody
 *
 * Every instruction handler builds a `RecordStore` over its record account and
 * an `EscrowVault` over its vault and token accounts, then calls one of the
 * functions below. The order of checks, writes and transfers lives here only.
 */

/// Read access to claim link records
pub trait RecordSource {
    /// Returns the record for `claim_id`, or None when nothing is stored
    fn load(&self, claim_id: u64) -> Result<Option<ClaimLink>>;
}

/// Write access to claim link records
pub trait RecordStore: RecordSource {
    /// Allocates storage for a new record and writes it
    fn create(&mut self, claim_id: u64, link: &ClaimLink) -> Result<()>;

    /// Overwrites an existing record
    fn save(&mut self, claim_id: u64, link: &ClaimLink) -> Result<()>;

    /// Deletes a record and returns its storage deposit to the payer
    fn reclaim(&mut self, claim_id: u64) -> Result<()>;
}

/// Custody of escrowed funds for one call
pub trait EscrowVault {
    /// Native vault supplied with the call
    fn native_target(&self) -> Pubkey;

    /// Token accounts supplied with the call
    ///
    /// Ok(None) when no registry entry was passed. A registry entry without
    /// the rest of the token accounts is MissingTokenAccounts.
    fn token_route(&self) -> Result<Option<TokenRoute>>;

    /// Moves `amount` from `from` into escrow and returns what the escrow received
    fn pull(&mut self, from: &Pubkey, asset_id: u64, amount: u64) -> Result<u64>;

    /// Sends a payout out of escrow
    fn push(&mut self, payout: &Payout) -> Result<()>;
}

/// Token accounts of a call, reduced to the keys that must line up
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenRoute {
    /// Asset id of the registry entry
    pub asset_id: u64,
    /// Mint recorded in the registry entry
    pub registered_mint: Pubkey,
    /// Vault recorded in the registry entry
    pub registered_vault: Pubkey,
    /// Mint account supplied
    pub mint: Pubkey,
    /// Vault account supplied
    pub vault: Pubkey,
    /// Mint of the user's token account
    pub account_mint: Pubkey,
    /// Owner of the user's token account
    pub account_owner: Pubkey,
}

impl TokenRoute {
    /// Checks the route against `asset_id` for a transfer to or from `wallet`
    ///
    /// The vault is checked separately: a wrong vault is a funding error on
    /// create and a vault error on payout.
    pub fn check(&self, asset_id: u64, wallet: &Pubkey) -> Result<()> {
        require!(self.asset_id == asset_id, ClaimLinkError::AssetMismatch);
        require_keys_eq!(self.mint, self.registered_mint, ClaimLinkError::TokenMintMismatch);
        require_keys_eq!(
            self.account_mint,
            self.registered_mint,
            ClaimLinkError::TokenMintMismatch
        );
        require_keys_eq!(
            self.account_owner,
            *wallet,
            ClaimLinkError::TokenAccountOwnerMismatch
        );
        Ok(())
    }

    pub fn vault_matches(&self) -> bool {
        self.vault == self.registered_vault
    }
}

/// Funds and records a new link, returning its id and record
pub fn open_link<R: RecordStore, V: EscrowVault>(
    state: &mut EscrowState,
    records: &mut R,
    vault: &mut V,
    sender: &Pubkey,
    amount: u64,
    receiver: Pubkey,
    expiry_time: u64,
) -> Result<(u64, ClaimLink)> {
    // Token accounts present means a token link
    let route = vault.token_route()?;
    let asset_id = route.map_or(NATIVE_ASSET_ID, |route| route.asset_id);

    let link = ClaimLink::new(*sender, receiver, amount, asset_id, expiry_time)?;

    match route {
        Some(route) => {
            route.check(asset_id, sender)?;
            require!(route.vault_matches(), ClaimLinkError::InvalidFundingTarget);
        }
        None => {
            require_keys_eq!(
                vault.native_target(),
                state.native_vault,
                ClaimLinkError::InvalidFundingTarget
            );
        }
    }

    let received = vault.pull(sender, asset_id, amount)?;
    require!(received == amount, ClaimLinkError::FundingShortfall);

    let claim_id = state.next_claim_id()?;
    records.create(claim_id, &link)?;

    Ok((claim_id, link))
}

/// Moves an open link to Claimed and pays `caller`
pub fn redeem_link<R: RecordStore, V: EscrowVault>(
    state: &EscrowState,
    records: &mut R,
    vault: &mut V,
    claim_id: u64,
    caller: &Pubkey,
    now: u64,
) -> Result<Payout> {
    let mut link = load_link(state, records, claim_id)?;

    // Status is written before the transfer; a failed transfer reverts both
    let payout = link.claim(caller, now)?;
    records.save(claim_id, &link)?;

    disburse(vault, &payout)?;
    Ok(payout)
}

/// Moves an open link to Cancelled, refunds the sender and reclaims the record
pub fn refund_link<R: RecordStore, V: EscrowVault>(
    state: &EscrowState,
    records: &mut R,
    vault: &mut V,
    claim_id: u64,
    caller: &Pubkey,
) -> Result<Payout> {
    let mut link = load_link(state, records, claim_id)?;

    let payout = link.cancel(caller)?;
    records.save(claim_id, &link)?;

    disburse(vault, &payout)?;
    records.reclaim(claim_id)?;
    Ok(payout)
}

/// Reads a stored link
pub fn read_link<R: RecordSource>(records: &R, claim_id: u64) -> Result<ClaimInfo> {
    let link = records.load(claim_id)?.ok_or(ClaimLinkError::NotFound)?;
    Ok(ClaimInfo::from(&link))
}

fn load_link<R: RecordSource>(state: &EscrowState, records: &R, claim_id: u64) -> Result<ClaimLink> {
    records
        .load(claim_id)?
        .ok_or_else(|| state.missing_record_error(claim_id).into())
}

fn disburse<V: EscrowVault>(vault: &mut V, payout: &Payout) -> Result<()> {
    if payout.asset_id != NATIVE_ASSET_ID {
        let route = vault
            .token_route()?
            .ok_or(ClaimLinkError::MissingTokenAccounts)?;
        route.check(payout.asset_id, &payout.recipient)?;
        require!(route.vault_matches(), ClaimLinkError::TokenVaultMismatch);
    }

    vault.push(payout)
}
