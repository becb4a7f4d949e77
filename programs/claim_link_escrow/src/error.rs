use anchor_lang::prelude::*;

#[error_code]
pub enum ClaimLinkError {
    // Record lookup errors
    #[msg("Claim link not found")]
    NotFound,
    #[msg("Claim link has already been claimed or cancelled")]
    AlreadyFinalized,
    #[msg("Claim link record has an invalid layout")]
    InvalidRecordLayout,

    // Claim validation errors
    #[msg("Claim link has expired")]
    Expired,
    #[msg("Only the designated receiver can claim this link")]
    ReceiverMismatch,

    // Cancel validation errors
    #[msg("Only the sender can cancel this link")]
    Unauthorized,

    // Funding errors
    #[msg("Amount must be greater than zero")]
    NonPositiveAmount,
    #[msg("Funding must be sent to the escrow vault")]
    InvalidFundingTarget,
    #[msg("Escrow received less than the link amount")]
    FundingShortfall,

    // Disbursement errors
    #[msg("Transfer out of the escrow failed")]
    TransferFailed,

    // Asset account errors
    #[msg("Token accounts are required for this asset")]
    MissingTokenAccounts,
    #[msg("Asset entry does not match the claim link asset")]
    AssetMismatch,
    #[msg("Token mint does not match the registered asset mint")]
    TokenMintMismatch,
    #[msg("Token vault does not match the registered asset vault")]
    TokenVaultMismatch,
    #[msg("Token account is not owned by the expected wallet")]
    TokenAccountOwnerMismatch,

    // System level errors
    #[msg("Arithmetic overflow")]
    ArithmeticOverflow,
}
