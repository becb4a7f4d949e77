use anchor_lang::prelude::*;

/**
 * Program Constants
 *
 * PDA seeds, sentinels and record layout constants shared by every instruction.
 */

#[constant]
/// ===== PDA SEED CONSTANTS =====

/// Seed for the global escrow state PDA
/// - Used in: ["escrow_state"]
/// - Holds the claim id counter and the asset id counter
/// - Acts as token authority for every registered token vault
pub const ESCROW_STATE_SEED: &str = "escrow_state";

/// Seed for the native vault PDA
/// - Used in: ["native_vault"]
/// - System-owned account that custodies escrowed lamports
pub const NATIVE_VAULT_SEED: &str = "native_vault";

/// Seed for asset registry PDAs
/// - Used in: ["asset", token_mint]
/// - One entry per opted-in mint, so a mint can only be registered once
pub const ASSET_SEED: &str = "asset";

/// Seed for token vault PDAs
/// - Used in: ["vault", token_mint]
/// - Token account owned by the escrow state PDA
pub const TOKEN_VAULT_SEED: &str = "vault";

/// Seed prefix for claim link records
/// - Used in: ["claim_", claim_id.to_be_bytes()]
/// - The id is encoded as 8 big-endian bytes so record addresses are
///   derivable from the id alone
pub const CLAIM_SEED: &str = "claim_";

/// ===== ASSET CONSTANTS =====

/// Asset id reserved for native lamports
pub const NATIVE_ASSET_ID: u64 = 0;

/// First asset id handed out by `opt_in_asset`
pub const FIRST_TOKEN_ASSET_ID: u64 = 1;

/// ===== CLAIM LINK CONSTANTS =====

/// Expiry value meaning the link never expires
pub const NO_EXPIRY: u64 = 0;

/// Receiver value meaning any address may claim (all-zero key)
pub const ANY_RECEIVER: Pubkey = Pubkey::new_from_array([0u8; 32]);
