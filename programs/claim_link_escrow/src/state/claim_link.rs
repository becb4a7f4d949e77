use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::*;

/// Lifecycle status of a claim link
///
/// Open is the only non-terminal state.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkStatus {
    Open,
    Claimed,
    Cancelled,
}

impl LinkStatus {
    pub fn to_byte(self) -> u8 {
        match self {
            LinkStatus::Open => 0,
            LinkStatus::Claimed => 1,
            LinkStatus::Cancelled => 2,
        }
    }

    pub fn from_byte(byte: u8) -> Result<Self> {
        match byte {
            0 => Ok(LinkStatus::Open),
            1 => Ok(LinkStatus::Claimed),
            2 => Ok(LinkStatus::Cancelled),
            _ => err!(ClaimLinkError::InvalidRecordLayout),
        }
    }

    pub fn is_terminal(self) -> bool {
        self != LinkStatus::Open
    }
}

/// Funds a terminal transition must move out of the escrow
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Payout {
    pub recipient: Pubkey,
    pub amount: u64,
    pub asset_id: u64,
}

/**
 * Claim link record
 *
 * One record per claim id, stored in the PDA ["claim_", claim_id.to_be_bytes()].
 *
 * The account is not an Anchor `#[account]`: its data is an 8-byte layout tag
 * followed by a fixed 89-byte big-endian record.
 *
 *   offset  width  field
 *   0       32     sender
 *   32      32     receiver (all-zero = anyone)
 *   64      8      amount
 *   72      8      asset_id (0 = lamports)
 *   80      8      expiry_time (0 = never)
 *   88      1      status (0 Open, 1 Claimed, 2 Cancelled)
 *
 * Lifecycle:
 * 1. Created and funded by create_claim_link
 * 2. Status set to Claimed by claim, record retained
 * 3. Status set to Cancelled by cancel, then the account is closed
 *
 * Only `status` ever changes after creation.
 */
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClaimLink {
    pub sender: Pubkey,
    pub receiver: Pubkey,
    pub amount: u64,
    pub asset_id: u64,
    pub expiry_time: u64,
    pub status: LinkStatus,
}

impl ClaimLink {
    /// Account tag, the trailing byte is the layout version
    pub const TAG: [u8; 8] = *b"CLMLINK1";

    pub const SENDER_OFFSET: usize = 0;
    pub const RECEIVER_OFFSET: usize = 32;
    pub const AMOUNT_OFFSET: usize = 64;
    pub const ASSET_ID_OFFSET: usize = 72;
    pub const EXPIRY_OFFSET: usize = 80;
    pub const STATUS_OFFSET: usize = 88;

    /// Encoded record size
    pub const RECORD_LEN: usize = 89;

    /// Account size: tag + record
    pub const LEN: usize = Self::TAG.len() + Self::RECORD_LEN;

    /// Builds a new open link
    pub fn new(
        sender: Pubkey,
        receiver: Pubkey,
        amount: u64,
        asset_id: u64,
        expiry_time: u64,
    ) -> Result<Self> {
        require!(amount > 0, ClaimLinkError::NonPositiveAmount);

        Ok(Self {
            sender,
            receiver,
            amount,
            asset_id,
            expiry_time,
            status: LinkStatus::Open,
        })
    }

    pub fn is_open(&self) -> bool {
        self.status == LinkStatus::Open
    }

    pub fn is_native(&self) -> bool {
        self.asset_id == NATIVE_ASSET_ID
    }

    /// Validates a claim by `caller` at unix time `now`
    pub fn check_claim(&self, caller: &Pubkey, now: u64) -> Result<()> {
        require!(self.is_open(), ClaimLinkError::AlreadyFinalized);

        if self.expiry_time != NO_EXPIRY {
            require!(now < self.expiry_time, ClaimLinkError::Expired);
        }

        if self.receiver != ANY_RECEIVER {
            require_keys_eq!(*caller, self.receiver, ClaimLinkError::ReceiverMismatch);
        }

        Ok(())
    }

    /// Moves Open -> Claimed and returns the payout owed to `caller`
    pub fn claim(&mut self, caller: &Pubkey, now: u64) -> Result<Payout> {
        self.check_claim(caller, now)?;
        self.status = LinkStatus::Claimed;

        Ok(Payout {
            recipient: *caller,
            amount: self.amount,
            asset_id: self.asset_id,
        })
    }

    /// Validates a cancel by `caller`
    pub fn check_cancel(&self, caller: &Pubkey) -> Result<()> {
        require!(self.is_open(), ClaimLinkError::AlreadyFinalized);
        require_keys_eq!(*caller, self.sender, ClaimLinkError::Unauthorized);
        Ok(())
    }

    /// Moves Open -> Cancelled and returns the refund owed to the sender
    pub fn cancel(&mut self, caller: &Pubkey) -> Result<Payout> {
        self.check_cancel(caller)?;
        self.status = LinkStatus::Cancelled;

        Ok(Payout {
            recipient: self.sender,
            amount: self.amount,
            asset_id: self.asset_id,
        })
    }

    /// Encodes the 89-byte record
    pub fn to_record_bytes(&self) -> [u8; Self::RECORD_LEN] {
        let mut out = [0u8; Self::RECORD_LEN];
        out[Self::SENDER_OFFSET..Self::RECEIVER_OFFSET].copy_from_slice(self.sender.as_ref());
        out[Self::RECEIVER_OFFSET..Self::AMOUNT_OFFSET].copy_from_slice(self.receiver.as_ref());
        out[Self::AMOUNT_OFFSET..Self::ASSET_ID_OFFSET].copy_from_slice(&self.amount.to_be_bytes());
        out[Self::ASSET_ID_OFFSET..Self::EXPIRY_OFFSET].copy_from_slice(&self.asset_id.to_be_bytes());
        out[Self::EXPIRY_OFFSET..Self::STATUS_OFFSET].copy_from_slice(&self.expiry_time.to_be_bytes());
        out[Self::STATUS_OFFSET] = self.status.to_byte();
        out
    }

    /// Decodes an 89-byte record
    pub fn from_record_bytes(bytes: &[u8]) -> Result<Self> {
        require!(bytes.len() == Self::RECORD_LEN, ClaimLinkError::InvalidRecordLayout);

        Ok(Self {
            sender: read_key(bytes, Self::SENDER_OFFSET),
            receiver: read_key(bytes, Self::RECEIVER_OFFSET),
            amount: read_u64(bytes, Self::AMOUNT_OFFSET),
            asset_id: read_u64(bytes, Self::ASSET_ID_OFFSET),
            expiry_time: read_u64(bytes, Self::EXPIRY_OFFSET),
            status: LinkStatus::from_byte(bytes[Self::STATUS_OFFSET])?,
        })
    }

    /// Encodes the full account data (tag + record)
    pub fn to_account_data(&self) -> [u8; Self::LEN] {
        let mut out = [0u8; Self::LEN];
        out[..Self::TAG.len()].copy_from_slice(&Self::TAG);
        out[Self::TAG.len()..].copy_from_slice(&self.to_record_bytes());
        out
    }

    /// Decodes full account data, rejecting foreign tags
    pub fn from_account_data(data: &[u8]) -> Result<Self> {
        require!(data.len() >= Self::LEN, ClaimLinkError::InvalidRecordLayout);
        require!(data[..Self::TAG.len()] == Self::TAG, ClaimLinkError::InvalidRecordLayout);
        Self::from_record_bytes(&data[Self::TAG.len()..Self::LEN])
    }

    /// Reads the record stored in `info`, or None when no record exists
    pub fn try_load(info: &AccountInfo) -> Result<Option<Self>> {
        if info.data_is_empty() || info.owner != &crate::ID {
            return Ok(None);
        }

        let data = info.try_borrow_data()?;
        Self::from_account_data(&data).map(Some)
    }

    /// Writes the record into `info`
    pub fn store(&self, info: &AccountInfo) -> Result<()> {
        let mut data = info.try_borrow_mut_data()?;
        require!(data.len() >= Self::LEN, ClaimLinkError::InvalidRecordLayout);
        data[..Self::LEN].copy_from_slice(&self.to_account_data());
        Ok(())
    }
}

fn read_key(bytes: &[u8], offset: usize) -> Pubkey {
    let mut key = [0u8; 32];
    key.copy_from_slice(&bytes[offset..offset + 32]);
    Pubkey::new_from_array(key)
}

fn read_u64(bytes: &[u8], offset: usize) -> u64 {
    let mut word = [0u8; 8];
    word.copy_from_slice(&bytes[offset..offset + 8]);
    u64::from_be_bytes(word)
}
