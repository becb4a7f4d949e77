use std::collections::HashMap;

use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::ClaimLinkError;
use crate::instructions::ClaimInfo;
use crate::processor::*;
use crate::state::*;

pub fn addr(seed: u8) -> Pubkey {
    Pubkey::new_from_array([seed; 32])
}

/// Anchor error code carried by `err`
pub fn error_code(err: &anchor_lang::error::Error) -> u32 {
    match err {
        anchor_lang::error::Error::AnchorError(e) => e.error_code_number,
        anchor_lang::error::Error::ProgramError(_) => u32::MAX,
    }
}

pub fn assert_fails<T: std::fmt::Debug>(result: Result<T>, expected: ClaimLinkError) {
    let expected_code = error_code(&anchor_lang::error::Error::from(expected));
    match result {
        Ok(value) => panic!("expected {:?}, got Ok({:?})", expected_code, value),
        Err(err) => assert_eq!(error_code(&err), expected_code, "unexpected error {:?}", err),
    }
}

/// Balances per (holder, asset id)
#[derive(Clone, Default, Debug)]
pub struct Ledger {
    balances: HashMap<(Pubkey, u64), u64>,
    frozen: Vec<Pubkey>,
    /// Transfer fee per asset, in basis points of the amount sent
    fees: HashMap<u64, u64>,
}

impl Ledger {
    pub fn mint(&mut self, holder: &Pubkey, asset_id: u64, amount: u64) {
        *self.balances.entry((*holder, asset_id)).or_default() += amount;
    }

    pub fn balance(&self, holder: &Pubkey, asset_id: u64) -> u64 {
        self.balances.get(&(*holder, asset_id)).copied().unwrap_or(0)
    }

    /// Every later transfer touching `holder` fails
    pub fn freeze(&mut self, holder: &Pubkey) {
        self.frozen.push(*holder);
    }

    pub fn thaw(&mut self, holder: &Pubkey) {
        self.frozen.retain(|key| key != holder);
    }

    /// Withholds `bps` of every later transfer of `asset_id`
    pub fn set_transfer_fee(&mut self, asset_id: u64, bps: u64) {
        self.fees.insert(asset_id, bps);
    }

    pub fn transfer(&mut self, from: &Pubkey, to: &Pubkey, asset_id: u64, amount: u64) -> Result<()> {
        require!(
            !self.frozen.contains(from) && !self.frozen.contains(to),
            ClaimLinkError::TransferFailed
        );

        let available = self.balance(from, asset_id);
        require!(available >= amount, ClaimLinkError::TransferFailed);

        let fee = amount * self.fees.get(&asset_id).copied().unwrap_or(0) / 10_000;
        self.balances.insert((*from, asset_id), available - amount);
        self.mint(to, asset_id, amount - fee);
        Ok(())
    }
}

impl RecordSource for HashMap<u64, Vec<u8>> {
    fn load(&self, claim_id: u64) -> Result<Option<ClaimLink>> {
        self.get(&claim_id)
            .map(|data| ClaimLink::from_account_data(data))
            .transpose()
    }
}

impl RecordStore for HashMap<u64, Vec<u8>> {
    fn create(&mut self, claim_id: u64, link: &ClaimLink) -> Result<()> {
        require!(!self.contains_key(&claim_id), ClaimLinkError::InvalidRecordLayout);
        self.insert(claim_id, link.to_account_data().to_vec());
        Ok(())
    }

    fn save(&mut self, claim_id: u64, link: &ClaimLink) -> Result<()> {
        self.insert(claim_id, link.to_account_data().to_vec());
        Ok(())
    }

    fn reclaim(&mut self, claim_id: u64) -> Result<()> {
        self.remove(&claim_id);
        Ok(())
    }
}

/// Token accounts a caller passes
#[derive(Clone, Copy, Debug)]
pub enum TokenArgs {
    Absent,
    /// Registry entry passed without the rest of the token accounts
    Partial,
    Full(TokenRoute),
}

/// Accounts a caller passes besides the record
#[derive(Clone, Copy, Debug)]
pub struct CallAccounts {
    pub native_vault: Pubkey,
    pub tokens: TokenArgs,
}

/// Funding attached to a create call
#[derive(Clone, Copy, Debug)]
pub struct Funding {
    pub amount: u64,
    pub accounts: CallAccounts,
}

/// Ledger-backed custody for one call
pub struct LedgerVault<'a> {
    pub ledger: &'a mut Ledger,
    pub accounts: CallAccounts,
}

impl LedgerVault<'_> {
    fn holder(&self, asset_id: u64) -> Result<Pubkey> {
        if asset_id == NATIVE_ASSET_ID {
            return Ok(self.accounts.native_vault);
        }
        let route = self.token_route()?.ok_or(ClaimLinkError::MissingTokenAccounts)?;
        Ok(route.vault)
    }
}

impl EscrowVault for LedgerVault<'_> {
    fn native_target(&self) -> Pubkey {
        self.accounts.native_vault
    }

    fn token_route(&self) -> Result<Option<TokenRoute>> {
        match self.accounts.tokens {
            TokenArgs::Absent => Ok(None),
            TokenArgs::Partial => err!(ClaimLinkError::MissingTokenAccounts),
            TokenArgs::Full(route) => Ok(Some(route)),
        }
    }

    fn pull(&mut self, from: &Pubkey, asset_id: u64, amount: u64) -> Result<u64> {
        let holder = self.holder(asset_id)?;
        let before = self.ledger.balance(&holder, asset_id);
        self.ledger.transfer(from, &holder, asset_id, amount)?;
        Ok(self.ledger.balance(&holder, asset_id) - before)
    }

    fn push(&mut self, payout: &Payout) -> Result<()> {
        let holder = self.holder(payout.asset_id)?;
        self.ledger
            .transfer(&holder, &payout.recipient, payout.asset_id, payout.amount)
    }
}

/**
 * In-memory escrow host
 *
 * Runs the same lifecycle functions as the instruction handlers against a
 * keyed byte store and a ledger. Each operation runs on a snapshot that is
 * discarded on error, matching a failed transaction on chain.
 */
#[derive(Clone, Debug)]
pub struct EscrowHarness {
    /// Native vault
    pub escrow: Pubkey,
    pub state: EscrowState,
    pub assets: HashMap<u64, AssetEntry>,
    pub records: HashMap<u64, Vec<u8>>,
    pub ledger: Ledger,
    pub now: u64,
}

impl EscrowHarness {
    pub fn new() -> Self {
        let escrow = addr(0xEE);
        Self {
            escrow,
            state: EscrowState {
                native_vault: escrow,
                ..EscrowState::default()
            },
            assets: HashMap::new(),
            records: HashMap::new(),
            ledger: Ledger::default(),
            now: 1_700_000_000,
        }
    }

    fn atomically<T>(&mut self, op: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        let snapshot = self.clone();
        let result = op(self);
        if result.is_err() {
            *self = snapshot;
        }
        result
    }

    /// Registers `mint` and returns its asset id
    pub fn opt_in(&mut self, mint: &Pubkey) -> Result<u64> {
        let mint = *mint;
        self.atomically(|host| {
            let asset_id = host.state.next_asset_id()?;
            let (vault, bump) = Pubkey::find_program_address(
                &[TOKEN_VAULT_SEED.as_bytes(), mint.as_ref()],
                &crate::ID,
            );
            host.assets.insert(
                asset_id,
                AssetEntry {
                    bump,
                    asset_id,
                    mint,
                    vault,
                },
            );
            Ok(asset_id)
        })
    }

    /// Accounts a well-behaved client passes for `wallet` moving `asset_id`
    pub fn accounts(&self, wallet: &Pubkey, asset_id: u64) -> CallAccounts {
        let tokens = match self.assets.get(&asset_id) {
            Some(entry) if asset_id != NATIVE_ASSET_ID => TokenArgs::Full(TokenRoute {
                asset_id: entry.asset_id,
                registered_mint: entry.mint,
                registered_vault: entry.vault,
                mint: entry.mint,
                vault: entry.vault,
                account_mint: entry.mint,
                account_owner: *wallet,
            }),
            _ => TokenArgs::Absent,
        };

        CallAccounts {
            native_vault: self.escrow,
            tokens,
        }
    }

    /// Accounts for the asset of a stored record, native when nothing is stored
    fn accounts_for_record(&self, wallet: &Pubkey, claim_id: u64) -> CallAccounts {
        let asset_id = self
            .records
            .load(claim_id)
            .ok()
            .flatten()
            .map_or(NATIVE_ASSET_ID, |link| link.asset_id);
        self.accounts(wallet, asset_id)
    }

    pub fn native(&self, amount: u64) -> Funding {
        Funding {
            amount,
            accounts: self.accounts(&Pubkey::default(), NATIVE_ASSET_ID),
        }
    }

    pub fn token(&self, sender: &Pubkey, asset_id: u64, amount: u64) -> Funding {
        Funding {
            amount,
            accounts: self.accounts(sender, asset_id),
        }
    }

    pub fn create(
        &mut self,
        sender: &Pubkey,
        funding: Funding,
        receiver: Pubkey,
        expiry_time: u64,
    ) -> Result<u64> {
        let sender = *sender;
        self.atomically(|host| {
            let mut vault = LedgerVault {
                ledger: &mut host.ledger,
                accounts: funding.accounts,
            };
            let (claim_id, _) = open_link(
                &mut host.state,
                &mut host.records,
                &mut vault,
                &sender,
                funding.amount,
                receiver,
                expiry_time,
            )?;
            Ok(claim_id)
        })
    }

    pub fn claim(&mut self, caller: &Pubkey, claim_id: u64) -> Result<bool> {
        let accounts = self.accounts_for_record(caller, claim_id);
        self.claim_with(caller, claim_id, accounts)
    }

    pub fn claim_with(&mut self, caller: &Pubkey, claim_id: u64, accounts: CallAccounts) -> Result<bool> {
        let caller = *caller;
        self.atomically(|host| {
            let mut vault = LedgerVault {
                ledger: &mut host.ledger,
                accounts,
            };
            redeem_link(&host.state, &mut host.records, &mut vault, claim_id, &caller, host.now)?;
            Ok(true)
        })
    }

    pub fn cancel(&mut self, caller: &Pubkey, claim_id: u64) -> Result<bool> {
        let accounts = self.accounts_for_record(caller, claim_id);
        self.cancel_with(caller, claim_id, accounts)
    }

    pub fn cancel_with(&mut self, caller: &Pubkey, claim_id: u64, accounts: CallAccounts) -> Result<bool> {
        let caller = *caller;
        self.atomically(|host| {
            let mut vault = LedgerVault {
                ledger: &mut host.ledger,
                accounts,
            };
            refund_link(&host.state, &mut host.records, &mut vault, claim_id, &caller)?;
            Ok(true)
        })
    }

    pub fn info(&self, claim_id: u64) -> Result<ClaimInfo> {
        read_link(&self.records, claim_id)
    }

    pub fn escrow_balance(&self, asset_id: u64) -> u64 {
        let holder = match self.assets.get(&asset_id) {
            Some(entry) if asset_id != NATIVE_ASSET_ID => entry.vault,
            _ => self.escrow,
        };
        self.ledger.balance(&holder, asset_id)
    }
}
