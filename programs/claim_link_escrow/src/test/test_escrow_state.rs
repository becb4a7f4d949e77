#[cfg(test)]
mod tests {
    use crate::constants::*;
    use crate::error::ClaimLinkError;
    use crate::state::*;
    use crate::test::harness::assert_fails;

    #[test]
    fn test_claim_ids_start_at_zero_and_are_dense() {
        let mut state = EscrowState::default();

        let ids: Vec<u64> = (0..5).map(|_| state.next_claim_id().unwrap()).collect();

        assert_eq!(ids, vec![0, 1, 2, 3, 4]);
        assert_eq!(state.claim_count, 5);
    }

    #[test]
    fn test_asset_ids_skip_native() {
        let mut state = EscrowState::default();

        assert_eq!(state.next_asset_id().unwrap(), FIRST_TOKEN_ASSET_ID);
        assert_eq!(state.next_asset_id().unwrap(), 2);
        assert_eq!(state.asset_count, 2);
        assert_ne!(FIRST_TOKEN_ASSET_ID, NATIVE_ASSET_ID);
    }

    #[test]
    fn test_counter_overflow_is_an_error() {
        let mut state = EscrowState {
            claim_count: u64::MAX,
            asset_count: u64::MAX,
            ..EscrowState::default()
        };

        assert_fails(state.next_claim_id(), ClaimLinkError::ArithmeticOverflow);
        assert_fails(state.next_asset_id(), ClaimLinkError::ArithmeticOverflow);
        assert_eq!(state.claim_count, u64::MAX);
        assert_eq!(state.asset_count, u64::MAX);
    }

    #[test]
    fn test_missing_record_error_depends_on_issued_ids() {
        let mut state = EscrowState::default();
        state.next_claim_id().unwrap();
        state.next_claim_id().unwrap();

        assert!(matches!(state.missing_record_error(0), ClaimLinkError::AlreadyFinalized));
        assert!(matches!(state.missing_record_error(1), ClaimLinkError::AlreadyFinalized));
        assert!(matches!(state.missing_record_error(2), ClaimLinkError::NotFound));
        assert!(matches!(state.missing_record_error(u64::MAX), ClaimLinkError::NotFound));
    }
}
