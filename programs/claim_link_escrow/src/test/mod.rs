pub mod harness;
pub mod test_escrow_state;
pub mod test_accounts;
