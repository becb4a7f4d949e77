use anchor_lang::prelude::*;
use anchor_lang::system_program::{
    allocate, assign, create_account, Allocate, Assign, CreateAccount,
};
use crate::constants::*;
use crate::error::*;
use crate::processor::{RecordSource, RecordStore};
use crate::state::ClaimLink;
use crate::utils::transfer_lamports;

/// How a PDA gets its rent before it is allocated
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PdaFunding {
    /// Empty address, created in one call
    Create { lamports: u64 },
    /// Address already holds lamports: top up, then allocate and assign
    Adopt { top_up: u64 },
}

pub fn pda_funding(required: u64, current: u64) -> PdaFunding {
    if current == 0 {
        PdaFunding::Create { lamports: required }
    } else {
        PdaFunding::Adopt {
            top_up: required.saturating_sub(current),
        }
    }
}

/// Creates a program-owned PDA with `space` bytes of zeroed data
///
/// Follows the same steps as Anchor's `init`, so an address someone funded
/// beforehand can still be created.
pub fn create_pda_account<'a>(
    payer: AccountInfo<'a>,
    target: AccountInfo<'a>,
    system_program: AccountInfo<'a>,
    space: usize,
    signer_seeds: &[&[&[u8]]],
) -> Result<()> {
    let required = Rent::get()?.minimum_balance(space);

    let top_up = match pda_funding(required, target.lamports()) {
        PdaFunding::Create { lamports } => {
            return create_account(
                CpiContext::new_with_signer(
                    system_program,
                    CreateAccount {
                        from: payer,
                        to: target,
                    },
                    signer_seeds,
                ),
                lamports,
                space as u64,
                &crate::ID,
            );
        }
        PdaFunding::Adopt { top_up } => top_up,
    };

    if top_up > 0 {
        transfer_lamports(payer, target.clone(), system_program.clone(), top_up, None)?;
    }

    allocate(
        CpiContext::new_with_signer(
            system_program.clone(),
            Allocate {
                account_to_allocate: target.clone(),
            },
            signer_seeds,
        ),
        space as u64,
    )?;

    assign(
        CpiContext::new_with_signer(
            system_program,
            Assign {
                account_to_assign: target,
            },
            signer_seeds,
        ),
        &crate::ID,
    )
}

/// Moves every lamport of `account` to `destination`
pub fn drain_lamports(account: &AccountInfo, destination: &AccountInfo) -> Result<()> {
    let total = destination
        .lamports()
        .checked_add(account.lamports())
        .ok_or(ClaimLinkError::ArithmeticOverflow)?;

    **destination.try_borrow_mut_lamports()? = total;
    **account.try_borrow_mut_lamports()? = 0;
    Ok(())
}

/// Closes a program-owned account, sending its lamports to `destination`
pub fn close_account<'a>(account: AccountInfo<'a>, destination: AccountInfo<'a>) -> Result<()> {
    drain_lamports(&account, &destination)?;

    account.assign(&System::id());
    account.realloc(0, false)?;
    Ok(())
}

impl<'info> RecordSource for AccountInfo<'info> {
    fn load(&self, _claim_id: u64) -> Result<Option<ClaimLink>> {
        ClaimLink::try_load(self)
    }
}

/// Record store over the single claim link PDA of an instruction
///
/// `payer` funds the account on create and receives its rent on reclaim.
pub struct RecordAccount<'info> {
    pub record: AccountInfo<'info>,
    pub bump: u8,
    pub payer: AccountInfo<'info>,
    pub system_program: AccountInfo<'info>,
}

impl<'info> RecordSource for RecordAccount<'info> {
    fn load(&self, claim_id: u64) -> Result<Option<ClaimLink>> {
        self.record.load(claim_id)
    }
}

impl<'info> RecordStore for RecordAccount<'info> {
    fn create(&mut self, claim_id: u64, link: &ClaimLink) -> Result<()> {
        let claim_id_bytes = claim_id.to_be_bytes();
        let bump = [self.bump];
        let seeds = &[CLAIM_SEED.as_bytes(), claim_id_bytes.as_ref(), bump.as_ref()];

        create_pda_account(
            self.payer.clone(),
            self.record.clone(),
            self.system_program.clone(),
            ClaimLink::LEN,
            &[&seeds[..]],
        )?;
        link.store(&self.record)
    }

    fn save(&mut self, _claim_id: u64, link: &ClaimLink) -> Result<()> {
        link.store(&self.record)
    }

    fn reclaim(&mut self, _claim_id: u64) -> Result<()> {
        close_account(self.record.clone(), self.payer.clone())
    }
}
